//! Concurrent memoization primitives shared by the formatting pipeline.
//!
//! Generalizes `intl-memoizer`'s per-locale, type-keyed lazy construction
//! (see [`locale_memoizer`]) and adds the two string-keyed caches the
//! pipeline needs on top of it: a compiled-value [`dispatch`] table and a
//! best-effort [`warn_once`] diagnostic set.

mod dispatch;
mod locale_memoizer;
mod warn_once;

pub use dispatch::DispatchTable;
pub use locale_memoizer::{LocaleMemoizer, Memoizable};
pub use warn_once::WarnOnceSet;
