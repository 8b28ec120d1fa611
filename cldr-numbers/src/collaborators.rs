use icu::plurals::PluralCategory;

use crate::backend::LocaleData;
use crate::currency::{Currency, DigitalToken};
use crate::error::Result;

/// External collaborator interfaces the core consumes, per `spec.md §6`.
/// This crate never loads CLDR data, evaluates plural rules, or stores
/// currency metadata itself — it is handed these capabilities by the host
/// application, the same split `fluent-bundle` draws around its own
/// `FluentArgs`/formatter boundary.

/// Filter applied to `currency_strings`, mirroring the CLDR currency
/// categories `spec.md §4.9` enumerates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurrencyStringsFilter {
    pub only_current: bool,
    pub only_historic: bool,
    pub only_tender: bool,
    pub only_unannotated: bool,
}

pub trait LocaleStore {
    fn get_locale(&self, name: &str) -> Result<LocaleData>;
}

/// `(category, n, locale) → plural_category`, per `spec.md §6`.
pub trait PluralSelector {
    fn cardinal(&self, n: f64, locale: &str) -> PluralCategory;
    fn ordinal(&self, n: f64, locale: &str) -> PluralCategory;
}

pub trait CurrencyResolver {
    fn currency_for_code(&self, code: &str, locale: &str) -> Result<Currency>;

    /// Canonical localized string → currency code, for `resolve_currency`/
    /// `resolve_currencies` (`spec.md §4.9`).
    fn currency_strings(
        &self,
        locale: &str,
        filter: CurrencyStringsFilter,
    ) -> Result<Vec<(String, String)>>;
}

pub trait DigitalTokenRegistry {
    fn long_name(&self, id: &str) -> Option<String>;
    /// `size` follows the same 1..4 width discipline as `Currency` ops
    /// (`spec.md §4.5.1`): `1` = symbol, `4` = narrow symbol.
    fn symbol(&self, id: &str, size: u8) -> Option<String>;
    fn get(&self, id: &str) -> Option<DigitalToken>;
}
