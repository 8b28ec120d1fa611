use thiserror::Error;

pub use cldr_numbers_syntax::PatternSyntaxError;

/// Every fallible outcome the public API can produce, per `spec.md §7`.
///
/// Errors are values: nothing in this crate panics to report a bad input.
/// `to_string!`-style wrappers exist purely to convert a `Result` into a
/// panic for callers that prefer that contract.
#[derive(Debug, Clone, Error)]
pub enum CldrNumberError {
    #[error("pattern syntax error: {0}")]
    PatternSyntax(#[from] PatternSyntaxError),

    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    #[error("invalid language subtag: {0}")]
    InvalidLanguage(String),

    #[error("unknown number system: {0}")]
    UnknownNumberSystem(String),

    #[error("number system '{system}' is algorithmic and has no '{format}' format for locale '{locale}'")]
    UnknownFormat { locale: String, system: String, format: String },

    #[error("unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("no RBNF rule set '{rule_set}' for locale '{locale}'")]
    RbnfNoRuleSet { locale: String, rule_set: String },

    #[error("no RBNF rule in '{rule_set}' matches {value}")]
    RbnfNoRuleForNumber { rule_set: String, value: String },

    #[error("RBNF does not support {0}")]
    RbnfUnsupported(String),

    #[error("could not parse '{input}' as a {kind}")]
    ParseError { input: String, kind: &'static str },

    #[error("argument error: {0}")]
    ArgumentError(String),
}

pub type Result<T> = std::result::Result<T, CldrNumberError>;
