//! Hand-written, read-only fixture data for `cldr-numbers`'s integration
//! tests: `LocaleStore`/`PluralSelector`/`CurrencyResolver`/
//! `DigitalTokenRegistry` implementations for a handful of real locales
//! (`en`, `fr`, `de`, `es`, `th`, `ar`), mirroring the role
//! `fluent-testing` plays for `fluent-bundle` — a compiled-in substitute
//! for a real CLDR data loader.

use std::cell::RefCell;
use std::collections::HashMap as StdHashMap;
use std::str::FromStr;

use fixed_decimal::{FixedDecimal, FloatPrecision};
use icu::locid::Locale;
use icu::plurals::{PluralCategory, PluralOperands, PluralRuleType, PluralRules};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use cldr_numbers::{
    CldrNumberError, Currency, CurrencyResolver, CurrencyStringsFilter, DigitalToken,
    DigitalTokenRegistry, LocaleData, LocaleStore, PluralSelector, Result,
};

mod rbnf;
mod locales;

/// `icu::plurals`-backed cardinal/ordinal selection, grounded in
/// `fluent-bundle`'s `types/plural.rs` thread-local `PluralRules` cache.
#[derive(Debug, Default)]
pub struct FixturePlurals;

thread_local! {
    static PLURALS: RefCell<StdHashMap<String, (PluralRules, PluralRules)>> = RefCell::new(StdHashMap::new());
}

fn operands_for(n: f64) -> PluralOperands {
    let fd = FixedDecimal::try_from_f64(n, FloatPrecision::Floating).unwrap_or_else(|_| FixedDecimal::from(0u8));
    PluralOperands::from(&fd)
}

impl FixturePlurals {
    fn with_rules<R>(&self, locale: &str, f: impl FnOnce(&PluralRules, &PluralRules) -> R) -> R {
        PLURALS.with(|cell| {
            if !cell.borrow().contains_key(locale) {
                let parsed = Locale::from_str(locale).unwrap_or_else(|_| Locale::from_str("en").expect("en parses"));
                let cardinal = PluralRules::try_new(&(&parsed).into(), PluralRuleType::Cardinal)
                    .expect("fixture locales have cardinal plural data");
                let ordinal = PluralRules::try_new(&(&parsed).into(), PluralRuleType::Ordinal)
                    .expect("fixture locales have ordinal plural data");
                cell.borrow_mut().insert(locale.to_string(), (cardinal, ordinal));
            }
            let cell = cell.borrow();
            let (cardinal, ordinal) = cell.get(locale).expect("just inserted");
            f(cardinal, ordinal)
        })
    }
}

impl PluralSelector for FixturePlurals {
    fn cardinal(&self, n: f64, locale: &str) -> PluralCategory {
        self.with_rules(locale, |cardinal, _| cardinal.category_for(operands_for(n)))
    }

    fn ordinal(&self, n: f64, locale: &str) -> PluralCategory {
        self.with_rules(locale, |_, ordinal| ordinal.category_for(operands_for(n)))
    }
}

/// The fixture `LocaleStore`: builds each registered locale's `LocaleData`
/// from the hand-written tables in [`locales`] on first use, and clones it
/// out thereafter (`LocaleData` is a plain data record, cheap to clone for
/// test purposes).
#[derive(Debug, Default)]
pub struct FixtureLocales;

static LOCALE_TABLE: Lazy<FxHashMap<String, LocaleData>> = Lazy::new(locales::build_all);

impl LocaleStore for FixtureLocales {
    fn get_locale(&self, name: &str) -> Result<LocaleData> {
        LOCALE_TABLE.get(name).cloned().ok_or_else(|| CldrNumberError::UnknownLocale(name.to_string()))
    }
}

/// A small, fixed currency table covering the codes the fixture's tests
/// exercise.
fn currency_table() -> &'static FxHashMap<String, Currency> {
    static TABLE: Lazy<FxHashMap<String, Currency>> = Lazy::new(|| {
        let mut m = FxHashMap::default();
        m.insert(
            "EUR".to_string(),
            Currency {
                code: "EUR".to_string(),
                symbol: "\u{20AC}".to_string(),
                narrow_symbol: None,
                iso_code: "EUR".to_string(),
                digits: 2,
                rounding: 0.0,
                cash_digits: 2,
                cash_rounding: 0.0,
                iso_digits: 2,
                plural_names: {
                    let mut p = FxHashMap::default();
                    p.insert(PluralCategory::One, "euro".to_string());
                    p.insert(PluralCategory::Other, "euros".to_string());
                    p
                },
            },
        );
        m.insert(
            "USD".to_string(),
            Currency {
                code: "USD".to_string(),
                symbol: "$".to_string(),
                narrow_symbol: None,
                iso_code: "USD".to_string(),
                digits: 2,
                rounding: 0.0,
                cash_digits: 2,
                cash_rounding: 0.0,
                iso_digits: 2,
                plural_names: {
                    let mut p = FxHashMap::default();
                    p.insert(PluralCategory::One, "US dollar".to_string());
                    p.insert(PluralCategory::Other, "US dollars".to_string());
                    p
                },
            },
        );
        m.insert(
            "GBP".to_string(),
            Currency {
                code: "GBP".to_string(),
                symbol: "\u{A3}".to_string(),
                narrow_symbol: None,
                iso_code: "GBP".to_string(),
                digits: 2,
                rounding: 0.0,
                cash_digits: 2,
                cash_rounding: 0.0,
                iso_digits: 2,
                plural_names: {
                    let mut p = FxHashMap::default();
                    p.insert(PluralCategory::One, "British pound".to_string());
                    p.insert(PluralCategory::Other, "British pounds".to_string());
                    p
                },
            },
        );
        m.insert(
            "THB".to_string(),
            Currency {
                code: "THB".to_string(),
                // `en` has no dedicated glyph for the Thai baht; CLDR falls
                // back to the ISO code as the standard symbol.
                symbol: "THB".to_string(),
                narrow_symbol: None,
                iso_code: "THB".to_string(),
                digits: 2,
                rounding: 0.0,
                cash_digits: 2,
                cash_rounding: 0.0,
                iso_digits: 2,
                plural_names: {
                    let mut p = FxHashMap::default();
                    p.insert(PluralCategory::Other, "Thai baht".to_string());
                    p
                },
            },
        );
        m
    });
    &TABLE
}

#[derive(Debug, Default)]
pub struct FixtureCurrencies;

impl CurrencyResolver for FixtureCurrencies {
    fn currency_for_code(&self, code: &str, _locale: &str) -> Result<Currency> {
        currency_table().get(code).cloned().ok_or_else(|| CldrNumberError::UnknownCurrency(code.to_string()))
    }

    fn currency_strings(&self, _locale: &str, filter: CurrencyStringsFilter) -> Result<Vec<(String, String)>> {
        // The fixture only models "current" currencies; any historic/tender
        // filtering would exclude all of them, which no test exercises.
        if filter.only_historic {
            return Ok(Vec::new());
        }
        Ok(vec![
            ("\u{20AC}".to_string(), "EUR".to_string()),
            ("euro".to_string(), "EUR".to_string()),
            ("euros".to_string(), "EUR".to_string()),
            ("$".to_string(), "USD".to_string()),
            ("us dollar".to_string(), "USD".to_string()),
            ("\u{A3}".to_string(), "GBP".to_string()),
            ("THB".to_string(), "THB".to_string()),
            ("baht".to_string(), "THB".to_string()),
        ])
    }
}

/// No digital tokens (ISO-24165 crypto/financial-token currencies) are
/// registered; `cldr-numbers`'s currency-text resolution falls back to
/// [`FixtureCurrencies`] whenever this returns `None`.
#[derive(Debug, Default)]
pub struct FixtureDigitalTokens;

impl DigitalTokenRegistry for FixtureDigitalTokens {
    fn long_name(&self, _id: &str) -> Option<String> {
        None
    }

    fn symbol(&self, _id: &str, _size: u8) -> Option<String> {
        None
    }

    fn get(&self, _id: &str) -> Option<DigitalToken> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn en_and_fr_are_registered() {
        let store = FixtureLocales;
        assert!(store.get_locale("en").is_ok());
        assert!(store.get_locale("fr").is_ok());
        assert!(store.get_locale("nope").is_err());
    }

    #[test]
    fn cardinal_plural_matches_english_one_rule() {
        let plural = FixturePlurals;
        assert_eq!(plural.cardinal(1.0, "en"), PluralCategory::One);
        assert_eq!(plural.cardinal(2.0, "en"), PluralCategory::Other);
    }

    #[test]
    fn ordinal_plural_selects_few_for_123() {
        let plural = FixturePlurals;
        assert_eq!(plural.ordinal(123.0, "en"), PluralCategory::Few);
    }

    #[test]
    fn currency_table_resolves_known_codes() {
        let resolver = FixtureCurrencies;
        assert_eq!(resolver.currency_for_code("EUR", "en").unwrap().symbol, "\u{20AC}");
        assert!(resolver.currency_for_code("ZZZ", "en").is_err());
    }
}
