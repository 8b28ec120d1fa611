use rustc_hash::FxHashMap;
use std::sync::RwLock;

/// A concurrent-safe, string-keyed cache of compiled values.
///
/// Backs both the precompiled `FormatMeta` dispatch table (`spec.md §4.1`'s
/// "precompilation contract") and the on-demand transliteration map cache
/// (`spec.md §4.6`). Every supported format/locale pair known at startup is
/// expected to be pre-populated via [`DispatchTable::insert`]; anything else
/// is compiled on first use through [`DispatchTable::get_or_try_compile`]
/// and memoized for the remainder of the process.
pub struct DispatchTable<V> {
    entries: RwLock<FxHashMap<String, V>>,
}

impl<V> Default for DispatchTable<V> {
    fn default() -> Self {
        Self { entries: RwLock::new(FxHashMap::default()) }
    }
}

impl<V: Clone> DispatchTable<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: impl Into<String>, value: V) {
        self.entries
            .write()
            .expect("dispatch table lock poisoned")
            .insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.entries.read().expect("dispatch table lock poisoned").get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("dispatch table lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the memoized value for `key`, compiling and caching it with
    /// `compile` on a miss. Concurrent misses for the same key may each run
    /// `compile` once (last writer wins); the result is always read back
    /// from the table so every caller observes the same compiled value.
    pub fn get_or_try_compile<F, E>(&self, key: &str, compile: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(hit) = self.get(key) {
            return Ok(hit);
        }
        let compiled = compile()?;
        self.insert(key.to_string(), compiled.clone());
        Ok(compiled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_once_then_hits_cache() {
        let table: DispatchTable<u32> = DispatchTable::new();
        let mut calls = 0;
        let first = table
            .get_or_try_compile("#,##0", || -> Result<u32, ()> {
                calls += 1;
                Ok(42)
            })
            .unwrap();
        assert_eq!(first, 42);
        let second = table
            .get_or_try_compile("#,##0", || -> Result<u32, ()> {
                calls += 1;
                Ok(7)
            })
            .unwrap();
        assert_eq!(second, 42);
        assert_eq!(calls, 1);
    }
}
