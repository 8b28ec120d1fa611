/// Per-`(locale, number system)` graphemes substituted for the canonical
/// placeholders produced by the digit decomposer and assembler, per
/// `spec.md §3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberSymbols {
    pub decimal: String,
    pub group: String,
    pub plus: String,
    pub minus: String,
    pub percent: String,
    pub per_mille: String,
    pub exponent: String,
    pub infinity: String,
    pub nan: String,
    pub superscripting_exponent: String,
}

impl NumberSymbols {
    pub fn latin_default() -> Self {
        Self {
            decimal: ".".to_string(),
            group: ",".to_string(),
            plus: "+".to_string(),
            minus: "-".to_string(),
            percent: "%".to_string(),
            per_mille: "\u{2030}".to_string(),
            exponent: "E".to_string(),
            infinity: "\u{221E}".to_string(),
            nan: "NaN".to_string(),
            superscripting_exponent: "\u{00D7}".to_string(),
        }
    }
}

/// TR35 currency-spacing rule: a separator inserted between a `Currency` op
/// and an adjacent `FormatNumber` op only when both the currency glyph and
/// the adjacent digit match their configured character classes
/// (`spec.md §4.5`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencySpacingRule {
    pub currency_match: String,
    pub surrounding_match: String,
    pub insert_between: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencySpacing {
    pub before_currency: CurrencySpacingRule,
    pub after_currency: CurrencySpacingRule,
}

impl CurrencySpacing {
    /// CLDR root defaults: a digit immediately touching a currency symbol
    /// gets a (locale-supplied) separator; a `[:letter:]`-class glyph does
    /// not.
    pub fn root_default() -> Self {
        let rule = |insert: &str| CurrencySpacingRule {
            currency_match: "[:^S:]".to_string(),
            surrounding_match: "[:digit:]".to_string(),
            insert_between: insert.to_string(),
        };
        Self {
            before_currency: rule("\u{00A0}"),
            after_currency: rule("\u{00A0}"),
        }
    }
}
