//! A locale-aware decimal and rule-based number formatter conforming to the
//! Unicode CLDR TR35 number-formatting specification.
//!
//! This crate is the core pipeline `spec.md §2` describes: pattern
//! compilation (delegated to [`cldr_numbers_syntax`]), rounding, grouping,
//! compact ("short"/"long") formats, RBNF spellout/ordinal/algorithmic
//! number systems, and locale-aware parsing/scanning. It consumes already-
//! resolved locale data through the [`collaborators`] traits rather than
//! loading CLDR itself — the same split `fluent-bundle` draws between
//! compiled Fluent resources and the resource manager that loads them.
//!
//! The entry point is [`Backend`], constructed by the host application from
//! its own `LocaleStore`/`PluralSelector`/`CurrencyResolver`/
//! `DigitalTokenRegistry` implementations.

mod assemble;
mod backend;
mod collaborators;
mod compact;
mod currency;
mod decompose;
mod error;
mod grouping;
mod locale;
mod number;
mod number_system;
mod options;
mod pipeline;
mod rbnf;
mod rounding;
mod scan;
mod symbols;
mod transliterate;

pub use backend::{CompactFormatRule, LenientParseMaps, LocaleData, MiscPatterns, OtherNumberSystems};
pub use collaborators::{CurrencyResolver, CurrencyStringsFilter, DigitalTokenRegistry, LocaleStore, PluralSelector};
pub use currency::{Currency, CurrencyDigitsPolicy, CurrencySymbolStyle, DigitalToken};
pub use error::{CldrNumberError, Result};
pub use locale::{CurrencyFormatPref, LocaleId, UExtensions};
pub use number::{Decimal, Number, Sign};
pub use number_system::{NumberSystem, NumberSystemKind, NumberSystemRequest};
pub use options::{FormatStyle, NumberFormatOptions, ResolvedOptions};
pub use pipeline::{currency_digits_override, Backend};
pub use rbnf::{BaseValue, Rule, RuleAccess, RuleArg, RuleCategory, RuleSet, Token};
pub use rounding::RoundingMode;
pub use scan::{NumericKind, PerToken, ScanElement};
pub use symbols::{CurrencySpacing, CurrencySpacingRule, NumberSymbols};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_from_integer_literal_roundtrips_sign() {
        let n = Number::from(-42i64);
        assert_eq!(n.sign(), Sign::Negative);
    }
}
