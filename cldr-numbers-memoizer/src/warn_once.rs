use rustc_hash::FxHashSet;
use std::sync::Mutex;

/// Process-wide, concurrent-safe "have we already warned about this"
/// ledger, per `spec.md §5`: at most one `log::warn!` per distinct key for
/// the process lifetime. Deduplication here is best-effort, not a
/// correctness contract — losing a race and warning twice is harmless.
#[derive(Default)]
pub struct WarnOnceSet {
    seen: Mutex<FxHashSet<String>>,
}

impl WarnOnceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `log::warn!("{}", message())` the first time `key` is seen.
    pub fn warn_once(&self, key: &str, message: impl FnOnce() -> String) {
        let mut seen = self.seen.lock().expect("warn-once set lock poisoned");
        if seen.insert(key.to_string()) {
            log::warn!("{}", message());
        }
    }

    #[cfg(test)]
    pub fn has_warned(&self, key: &str) -> bool {
        self.seen.lock().expect("warn-once set lock poisoned").contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn warns_once_per_key() {
        let set = WarnOnceSet::new();
        let calls = AtomicUsize::new(0);
        set.warn_once("foo", || {
            calls.fetch_add(1, Ordering::SeqCst);
            "first".to_string()
        });
        set.warn_once("foo", || {
            calls.fetch_add(1, Ordering::SeqCst);
            "second".to_string()
        });
        set.warn_once("bar", || {
            calls.fetch_add(1, Ordering::SeqCst);
            "third".to_string()
        });
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(set.has_warned("foo"));
        assert!(set.has_warned("bar"));
    }
}
