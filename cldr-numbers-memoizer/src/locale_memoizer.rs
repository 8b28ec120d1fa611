use std::sync::Mutex;
use type_map::concurrent::TypeMap;

/// Something that can be lazily constructed once per `(locale, args)` pair
/// and then shared by reference with every subsequent caller.
///
/// Mirrors the role `intl-memoizer`'s `Memoizable` plays for `fluent-rs`:
/// a `PluralSelector` adapter, a compiled transliteration map, or any other
/// per-locale capability the pipeline needs more than once.
pub trait Memoizable {
    type Args;
    type Error;

    fn construct(args: Self::Args) -> Result<Self, Self::Error>
    where
        Self: Sized;
}

/// A single locale's lazily-populated, thread-safe capability cache.
///
/// `spec.md §5` requires locale data and derived caches to be safe to share
/// across any number of concurrent callers without external
/// synchronization; this is the only memoization primitive the pipeline
/// needs to satisfy that, so (unlike `intl-memoizer`, which offers both a
/// thread-local and a `Mutex`-guarded variant) only the concurrent form is
/// provided here.
pub struct LocaleMemoizer<L> {
    lang: L,
    map: Mutex<TypeMap>,
}

impl<L> LocaleMemoizer<L> {
    pub fn new(lang: L) -> Self {
        Self { lang, map: Mutex::new(TypeMap::new()) }
    }

    pub fn lang(&self) -> &L {
        &self.lang
    }

    /// Runs `cb` against the memoized `I`, constructing it on first use.
    pub fn with_try_get<I, R, U>(&self, args: I::Args, cb: U) -> Result<R, I::Error>
    where
        I: Memoizable + Send + Sync + 'static,
        I::Args: Send + Sync + 'static,
        U: FnOnce(&I) -> R,
    {
        let mut map = self.map.lock().expect("locale memoizer mutex poisoned");
        if map.get::<I>().is_none() {
            let value = I::construct(args)?;
            map.insert(value);
        }
        Ok(cb(map.get::<I>().expect("just inserted")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doubler(i64);

    impl Memoizable for Doubler {
        type Args = i64;
        type Error = ();

        fn construct(args: i64) -> Result<Self, ()> {
            Ok(Doubler(args))
        }
    }

    #[test]
    fn constructs_once_and_reuses() {
        let memo = LocaleMemoizer::new("en".to_string());
        let first = memo.with_try_get::<Doubler, _, _>(21, |d| d.0 * 2).unwrap();
        assert_eq!(first, 42);
        // second call with a different arg is ignored: already memoized.
        let second = memo.with_try_get::<Doubler, _, _>(99, |d| d.0 * 2).unwrap();
        assert_eq!(second, 42);
        assert_eq!(memo.lang(), "en");
    }
}
