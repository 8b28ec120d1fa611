use crate::currency::{CurrencyDigitsPolicy, CurrencySymbolStyle};
use crate::error::{CldrNumberError, Result};
use crate::locale::{CurrencyFormatPref, LocaleId};
use crate::number_system::NumberSystemRequest;
use crate::rounding::RoundingMode;

/// Which named format style, or literal pattern, `format` selects
/// (`spec.md §6`).
#[derive(Debug, Clone, PartialEq)]
pub enum FormatStyle {
    Standard,
    Currency,
    Accounting,
    Percent,
    Permille,
    Scientific,
    Short,
    Long,
    CurrencyShort,
    CurrencyLong,
    CurrencyLongWithSymbol,
    DecimalShort,
    DecimalLong,
    Spellout,
    SpelloutVerbose,
    SpelloutYear,
    Ordinal,
    Roman,
    RomanLower,
    Pattern(String),
}

impl FormatStyle {
    fn parse(name: &str) -> Self {
        match name {
            "standard" => FormatStyle::Standard,
            "currency" => FormatStyle::Currency,
            "accounting" => FormatStyle::Accounting,
            "percent" => FormatStyle::Percent,
            "permille" => FormatStyle::Permille,
            "scientific" => FormatStyle::Scientific,
            "short" => FormatStyle::Short,
            "long" => FormatStyle::Long,
            "currency_short" => FormatStyle::CurrencyShort,
            "currency_long" => FormatStyle::CurrencyLong,
            "currency_long_with_symbol" => FormatStyle::CurrencyLongWithSymbol,
            "decimal_short" => FormatStyle::DecimalShort,
            "decimal_long" => FormatStyle::DecimalLong,
            "spellout" => FormatStyle::Spellout,
            "spellout_verbose" => FormatStyle::SpelloutVerbose,
            "spellout_year" => FormatStyle::SpelloutYear,
            "ordinal" => FormatStyle::Ordinal,
            "roman" => FormatStyle::Roman,
            "roman_lower" => FormatStyle::RomanLower,
            other => FormatStyle::Pattern(other.to_string()),
        }
    }

    pub fn is_rbnf(&self) -> bool {
        matches!(
            self,
            FormatStyle::Spellout
                | FormatStyle::SpelloutVerbose
                | FormatStyle::SpelloutYear
                | FormatStyle::Ordinal
                | FormatStyle::Roman
                | FormatStyle::RomanLower
        )
    }

    pub fn is_compact(&self) -> bool {
        matches!(
            self,
            FormatStyle::Short
                | FormatStyle::Long
                | FormatStyle::CurrencyShort
                | FormatStyle::CurrencyLong
                | FormatStyle::CurrencyLongWithSymbol
                | FormatStyle::DecimalShort
                | FormatStyle::DecimalLong
        )
    }

    pub fn implies_currency(&self) -> bool {
        matches!(
            self,
            FormatStyle::Currency | FormatStyle::CurrencyShort | FormatStyle::CurrencyLong | FormatStyle::CurrencyLongWithSymbol
        )
    }
}

/// Unvalidated, as-supplied option map the caller passes to any `to_string`-
/// family function. Field names mirror `spec.md §6`'s option table.
#[derive(Debug, Clone, Default)]
pub struct NumberFormatOptions {
    pub format: Option<String>,
    pub currency: Option<String>,
    pub currency_symbol: Option<String>,
    pub currency_digits: Option<String>,
    pub cash: Option<bool>,
    pub rounding_mode: Option<String>,
    pub number_system: Option<String>,
    pub locale: Option<String>,
    pub fractional_digits: Option<u32>,
    pub maximum_integer_digits: Option<u32>,
    pub round_nearest: Option<f64>,
    pub minimum_grouping_digits: Option<u32>,
}

/// Canonical, validated record the formatting pipeline actually consumes
/// (`spec.md §3`, §6). Produced once per call by [`resolve`] and immutable
/// thereafter.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub format: FormatStyle,
    pub currency: Option<String>,
    pub currency_symbol: CurrencySymbolStyle,
    pub currency_digits: CurrencyDigitsPolicy,
    pub rounding_mode: RoundingMode,
    pub number_system: NumberSystemRequest,
    pub number_system_name: Option<String>,
    pub locale: LocaleId,
    pub fractional_digits: Option<u32>,
    pub maximum_integer_digits: Option<u32>,
    pub round_nearest: Option<f64>,
    pub minimum_grouping_digits: u32,
}

/// Normalizes `opts` into a [`ResolvedOptions`], per `spec.md §6`'s
/// precedence rule: explicit option, then locale `u`-extension, then locale
/// default, highest first.
pub fn resolve(opts: &NumberFormatOptions, default_locale: &str) -> Result<ResolvedOptions> {
    let locale_name = opts.locale.as_deref().unwrap_or(default_locale);
    let locale = LocaleId::parse(locale_name)?;

    let mut format = match &opts.format {
        Some(f) => FormatStyle::parse(f),
        None => FormatStyle::Standard,
    };
    if matches!(format, FormatStyle::Standard) && opts.currency.is_some() {
        format = FormatStyle::Currency;
    }
    if matches!(format, FormatStyle::Short) && opts.currency.is_some() {
        format = FormatStyle::CurrencyShort;
    }

    let currency = opts.currency.clone().or_else(|| locale.extensions.currency.clone());

    if format.implies_currency() && currency.is_none() {
        return Err(CldrNumberError::ArgumentError(
            "currency option is required for currency formats".to_string(),
        ));
    }

    if matches!(format, FormatStyle::Accounting) {
        // `cf` extension only overrides plain :currency, not an explicit :accounting request.
    } else if matches!(format, FormatStyle::Currency)
        && locale.extensions.currency_format == Some(CurrencyFormatPref::Account)
    {
        format = FormatStyle::Accounting;
    }

    let currency_symbol = match opts.currency_symbol.as_deref() {
        Some("iso") => CurrencySymbolStyle::Iso,
        Some("narrow") => CurrencySymbolStyle::Narrow,
        Some("symbol") => CurrencySymbolStyle::Symbol,
        Some("standard") | None => CurrencySymbolStyle::Standard,
        Some(_other) => CurrencySymbolStyle::Standard,
    };

    let currency_digits = if opts.cash == Some(true) {
        CurrencyDigitsPolicy::Cash
    } else {
        match opts.currency_digits.as_deref() {
            Some("cash") => CurrencyDigitsPolicy::Cash,
            Some("iso") => CurrencyDigitsPolicy::Iso,
            Some("accounting") | None => CurrencyDigitsPolicy::Accounting,
            Some(_other) => CurrencyDigitsPolicy::Accounting,
        }
    };

    let rounding_mode = match &opts.rounding_mode {
        Some(name) => RoundingMode::parse(name).ok_or_else(|| {
            CldrNumberError::ArgumentError(format!("unknown rounding_mode: {name}"))
        })?,
        None => RoundingMode::default(),
    };

    let (number_system, number_system_name) = match opts.number_system.as_deref() {
        Some("default") | None => {
            (NumberSystemRequest::Default, locale.extensions.number_system.clone())
        }
        Some("native") => (NumberSystemRequest::Native, None),
        Some("traditional") => (NumberSystemRequest::Traditional, None),
        Some("finance") => (NumberSystemRequest::Finance, None),
        Some(named) => (NumberSystemRequest::Named, Some(named.to_string())),
    };

    Ok(ResolvedOptions {
        format,
        currency,
        currency_symbol,
        currency_digits,
        rounding_mode,
        number_system,
        number_system_name,
        locale,
        fractional_digits: opts.fractional_digits,
        maximum_integer_digits: opts.maximum_integer_digits,
        round_nearest: opts.round_nearest,
        minimum_grouping_digits: opts.minimum_grouping_digits.unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_option_implies_currency_format() {
        let opts = NumberFormatOptions { currency: Some("EUR".into()), ..Default::default() };
        let resolved = resolve(&opts, "en").unwrap();
        assert!(matches!(resolved.format, FormatStyle::Currency));
    }

    #[test]
    fn missing_currency_for_currency_format_errors() {
        let opts = NumberFormatOptions { format: Some("currency".into()), ..Default::default() };
        assert!(resolve(&opts, "en").is_err());
    }

    #[test]
    fn cash_alias_maps_to_cash_policy() {
        let opts = NumberFormatOptions { currency: Some("EUR".into()), cash: Some(true), ..Default::default() };
        let resolved = resolve(&opts, "en").unwrap();
        assert_eq!(resolved.currency_digits, CurrencyDigitsPolicy::Cash);
    }

    #[test]
    fn cf_account_extension_upgrades_currency_to_accounting() {
        let opts = NumberFormatOptions { currency: Some("EUR".into()), ..Default::default() };
        let resolved = resolve(&opts, "de-u-cf-account").unwrap();
        assert!(matches!(resolved.format, FormatStyle::Accounting));
    }
}
