use rustc_hash::FxHashMap;

use icu::plurals::PluralCategory;

/// `{code, symbol, narrow_symbol?, iso_code, digits, rounding, cash_digits,
/// cash_rounding, iso_digits, plural_names}` per `spec.md §3`.
#[derive(Debug, Clone, PartialEq)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
    pub narrow_symbol: Option<String>,
    pub iso_code: String,
    pub digits: u32,
    pub rounding: f64,
    pub cash_digits: u32,
    pub cash_rounding: f64,
    pub iso_digits: u32,
    pub plural_names: FxHashMap<PluralCategory, String>,
}

impl Currency {
    pub fn plural_name(&self, category: PluralCategory) -> &str {
        self.plural_names
            .get(&category)
            .or_else(|| self.plural_names.get(&PluralCategory::Other))
            .map(String::as_str)
            .unwrap_or(&self.code)
    }
}

/// Which digit/rounding set a `currency_digits` option selects, per
/// `spec.md §6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyDigitsPolicy {
    Accounting,
    Cash,
    Iso,
}

impl Currency {
    pub fn fraction_digits(&self, policy: CurrencyDigitsPolicy) -> u32 {
        match policy {
            CurrencyDigitsPolicy::Accounting => self.digits,
            CurrencyDigitsPolicy::Cash => self.cash_digits,
            CurrencyDigitsPolicy::Iso => self.iso_digits,
        }
    }

    pub fn rounding_increment(&self, policy: CurrencyDigitsPolicy) -> f64 {
        match policy {
            CurrencyDigitsPolicy::Cash => self.cash_rounding,
            _ => self.rounding,
        }
    }
}

/// Which currency glyph/text `currency_symbol` selects, per `spec.md §6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencySymbolStyle {
    Standard,
    Iso,
    Narrow,
    Symbol,
}

/// A ISO-24165 digital token (crypto/financial-token currency): a 9-char
/// identifier with its own long/short symbol lookup, per `spec.md §3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitalToken {
    pub id: String,
    pub long_name: String,
    pub short_symbol: String,
}
