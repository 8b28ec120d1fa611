use std::str::FromStr;

use fixed_decimal::FixedDecimal;
use icu::plurals::PluralCategory;

use cldr_numbers_memoizer::{DispatchTable, WarnOnceSet};
use cldr_numbers_syntax::{compile, FormatMeta, Op};

use crate::assemble::{assemble, mantissa_pieces, CurrencyTexts, Piece};
use crate::backend::LocaleData;
use crate::collaborators::{CurrencyResolver, CurrencyStringsFilter, DigitalTokenRegistry, LocaleStore, PluralSelector};
use crate::compact;
use crate::currency::{Currency, CurrencySymbolStyle};
use crate::decompose::decompose;
use crate::error::{CldrNumberError, Result};
use crate::grouping::{group_fraction_digits, group_integer_digits};
use crate::number::{Decimal, Number, Sign};
use crate::number_system::{NumberSystem, NumberSystemRequest};
use crate::options::{resolve, FormatStyle, NumberFormatOptions, ResolvedOptions};
use crate::rbnf::{self, RbnfContext};
use crate::rounding::{round_fractional, round_nearest as apply_round_nearest, round_significant, RoundingMode};
use crate::scan::ScanElement;
use crate::transliterate::{render, render_special};

/// The shared runtime context every formatting/parsing entry point in
/// `spec.md §6` is a method on: the `BackendCtx` `spec.md §9`'s design notes
/// describe as the value the RBNF evaluator and decimal pipeline cooperate
/// through. Holds no mutable state of its own beyond the two process-wide
/// memoization caches.
pub struct Backend<'a> {
    pub locale_store: &'a dyn LocaleStore,
    pub plural: &'a dyn PluralSelector,
    pub currency_resolver: &'a dyn CurrencyResolver,
    pub token_registry: &'a dyn DigitalTokenRegistry,
    pub meta_cache: &'a DispatchTable<std::sync::Arc<FormatMeta>>,
    pub warn_once: &'a WarnOnceSet,
    pub default_locale: &'a str,
}

impl<'a> Backend<'a> {
    fn compiled(&self, pattern: &str, precompiled: bool) -> Result<std::sync::Arc<FormatMeta>> {
        self.meta_cache.get_or_try_compile(pattern, || {
            if !precompiled {
                self.warn_once.warn_once(pattern, || {
                    format!("compiling number format pattern '{pattern}' at runtime; consider precompiling it")
                });
            }
            compile(pattern).map(std::sync::Arc::new).map_err(CldrNumberError::from)
        })
    }

    fn number_system(&self, data: &LocaleData, resolved: &ResolvedOptions) -> Result<NumberSystem> {
        let aliased = match resolved.number_system {
            NumberSystemRequest::Native => data.other_number_systems.native.as_deref(),
            NumberSystemRequest::Traditional => data.other_number_systems.traditional.as_deref(),
            NumberSystemRequest::Finance => data.other_number_systems.finance.as_deref(),
            NumberSystemRequest::Default | NumberSystemRequest::Named => None,
        };
        let name = aliased
            .map(str::to_string)
            .or_else(|| resolved.number_system_name.clone())
            .unwrap_or_else(|| data.default_number_system.clone());
        data.number_system(&name)
            .cloned()
            .ok_or_else(|| CldrNumberError::UnknownNumberSystem(name))
    }

    /// `to_string(number, options) -> Result<String, FormatError>`, `spec.md §6`.
    pub fn to_string(&self, number: &Number, opts: &NumberFormatOptions) -> Result<String> {
        let resolved = resolve(opts, self.default_locale)?;
        let data = self.locale_store.get_locale(&resolved.locale.cldr_locale_name)?;

        if resolved.format.is_rbnf() {
            return self.format_rbnf(number, &resolved, &data);
        }
        if resolved.format.is_compact() {
            return self.format_compact(number, &resolved, &data);
        }
        self.format_pattern_style(number, &resolved, &data)
    }

    pub fn to_string_or_panic(&self, number: &Number, opts: &NumberFormatOptions) -> String {
        self.to_string(number, opts).expect("to_string! requires a valid format")
    }

    fn format_name_for(style: &FormatStyle) -> Option<&'static str> {
        match style {
            FormatStyle::Standard => Some("standard"),
            FormatStyle::Currency => Some("currency"),
            FormatStyle::Accounting => Some("accounting"),
            FormatStyle::Percent => Some("percent"),
            FormatStyle::Permille => Some("permille"),
            FormatStyle::Scientific => Some("scientific"),
            _ => None,
        }
    }

    fn format_pattern_style(&self, number: &Number, resolved: &ResolvedOptions, data: &LocaleData) -> Result<String> {
        let system = self.number_system(data, resolved)?;
        if system.is_algorithmic() {
            return Err(CldrNumberError::UnknownFormat {
                locale: resolved.locale.cldr_locale_name.clone(),
                system: system.name.clone(),
                format: "standard".to_string(),
            });
        }

        let (pattern, precompiled) = match &resolved.format {
            FormatStyle::Pattern(p) => (p.clone(), false),
            style => {
                let name = Self::format_name_for(style).unwrap_or("standard");
                let p = data.number_formats.get(name).cloned().ok_or_else(|| CldrNumberError::UnknownFormat {
                    locale: resolved.locale.cldr_locale_name.clone(),
                    system: system.name.clone(),
                    format: name.to_string(),
                })?;
                (p, true)
            }
        };

        let meta = self.compiled(&pattern, precompiled)?;
        let symbols = data
            .symbols_for(&system.name)
            .ok_or_else(|| CldrNumberError::UnknownNumberSystem(system.name.clone()))?;

        if number.is_nan() {
            return Ok(render_special(true, false, symbols));
        }
        if number.is_infinite() {
            return Ok(render_special(false, number.sign() == Sign::Negative, symbols));
        }

        let currency = resolved.currency.as_deref();
        let is_negative = number.sign() == Sign::Negative && !number.is_zero();

        let mut fd = number.to_working_decimal().ok_or_else(|| CldrNumberError::ArgumentError(
            "number has no finite working representation".to_string(),
        ))?;

        let uses_currency = meta.format.positive.iter().chain(meta.format.negative.iter()).any(|o| matches!(o, Op::Currency(_)));
        let currency_policy = match (uses_currency, currency) {
            (true, Some(code)) => {
                let currency_data = self.currency_resolver.currency_for_code(code, &resolved.locale.cldr_locale_name)?;
                Some(currency_digits_override(&currency_data, resolved))
            }
            _ => None,
        };

        if meta.multiplier != 1 {
            let shift = match meta.multiplier {
                100 => 2,
                1000 => 3,
                _ => 0,
            };
            fd.multiply_pow10(shift);
        }

        round_significant(&mut fd, meta.significant_digits, resolved.rounding_mode);

        let nearest = resolved
            .round_nearest
            .unwrap_or_else(|| currency_policy.as_ref().map(|(_, r)| *r).unwrap_or(meta.round_nearest).max(meta.round_nearest));
        if nearest > 0.0 {
            fd = apply_round_nearest(&fd, nearest, resolved.rounding_mode);
        }

        let exponent = if meta.exponent_digits > 0 {
            crate::rounding::extract_scientific_exponent(&mut fd, meta.integer_digits.max)
        } else {
            0
        };

        let frac_range = resolved
            .fractional_digits
            .map(|d| cldr_numbers_syntax::DigitRange { min: d, max: d })
            .unwrap_or_else(|| currency_policy.map(|(r, _)| r).unwrap_or(meta.fractional_digits));

        // A scientific pattern with no fractional digits and no significant-digit
        // constraint (e.g. the bare `#E0`) keeps the mantissa's full available
        // precision rather than truncating it to the integer part; TR35 leaves
        // this underspecified, see `DESIGN.md`'s Open Question on `#E0`.
        if meta.exponent_digits > 0 && frac_range.max == 0 && meta.significant_digits.max == 0 {
            fd.trim_end();
        } else {
            round_fractional(&mut fd, frac_range, resolved.rounding_mode);
        }

        if let Some(max_int) = resolved.maximum_integer_digits {
            fd = truncate_integer_digits(&fd, max_int);
        }

        let mut decomposed = decompose(&fd, exponent);
        crate::rounding::pad_integer_digits(&mut decomposed.integer_digits, meta.integer_digits.min);
        if meta.exponent_digits > 0 {
            crate::rounding::pad_integer_digits(&mut decomposed.exp_digits, meta.exponent_digits);
        }
        let grouping = meta.grouping;
        let min_grouping = resolved.minimum_grouping_digits + data.minimum_grouping_digits;
        let grouped_int = group_integer_digits(&decomposed.integer_digits, grouping.integer, min_grouping);
        let grouped_frac = group_fraction_digits(&decomposed.fraction_digits, grouping.fraction);
        let mantissa = mantissa_pieces(
            &grouped_int,
            &grouped_frac,
            if meta.exponent_digits > 0 {
                Some((decomposed.exp_sign == Sign::Negative, meta.exponent_sign, &decomposed.exp_digits))
            } else {
                None
            },
        );

        let ops: &[Op] = if is_negative { &meta.format.negative } else { &meta.format.positive };
        let currency_texts = self.resolve_currency_texts(ops, currency, resolved, &fd)?;

        let pieces = assemble(
            ops,
            &mantissa,
            &currency_texts,
            &data.currency_spacing,
            meta.padding_length,
            meta.padding_char,
        );
        Ok(render(&pieces, &system, symbols))
    }

    fn resolve_currency_texts(
        &self,
        ops: &[Op],
        currency: Option<&str>,
        resolved: &ResolvedOptions,
        value: &FixedDecimal,
    ) -> Result<CurrencyTexts> {
        if !ops.iter().any(|o| matches!(o, Op::Currency(_))) {
            return Ok(CurrencyTexts::default());
        }
        let Some(code) = currency else {
            return Err(CldrNumberError::ArgumentError("currency option is required".to_string()));
        };
        let n_f64: f64 = value.to_string().parse().unwrap_or(0.0);

        if let Some(token) = self.token_registry.get(code) {
            let symbol = self.token_registry.symbol(code, 1).unwrap_or_else(|| token.short_symbol.clone());
            let narrow = self.token_registry.symbol(code, 4).unwrap_or_else(|| token.short_symbol.clone());
            let long = self.token_registry.long_name(code).unwrap_or_else(|| token.long_name.clone());
            return Ok(CurrencyTexts { symbol, iso_code: token.id.clone(), plural_name: long, narrow_symbol: narrow });
        }

        let currency_data = self.currency_resolver.currency_for_code(code, &resolved.locale.cldr_locale_name)?;
        let category = self.plural.cardinal(n_f64, &resolved.locale.cldr_locale_name);
        Ok(CurrencyTexts {
            symbol: match resolved.currency_symbol {
                CurrencySymbolStyle::Iso => currency_data.iso_code.clone(),
                CurrencySymbolStyle::Narrow => currency_data.narrow_symbol.clone().unwrap_or_else(|| currency_data.symbol.clone()),
                _ => currency_data.symbol.clone(),
            },
            iso_code: currency_data.iso_code.clone(),
            plural_name: currency_data.plural_name(category).to_string(),
            narrow_symbol: currency_data.narrow_symbol.clone().unwrap_or_else(|| currency_data.symbol.clone()),
        })
    }

    fn format_rbnf(&self, number: &Number, resolved: &ResolvedOptions, data: &LocaleData) -> Result<String> {
        let rule_set_name = match resolved.format {
            FormatStyle::Spellout => "spellout-cardinal",
            FormatStyle::SpelloutVerbose => "spellout-cardinal-verbose",
            FormatStyle::SpelloutYear => "spellout-numbering-year",
            FormatStyle::Ordinal => "digits-ordinal",
            FormatStyle::Roman => "roman-upper",
            FormatStyle::RomanLower => "roman-lower",
            _ => unreachable!("format_rbnf only called for RBNF styles"),
        };

        let n = number.to_f64_lossy();
        let locale_name = resolved.locale.cldr_locale_name.clone();
        let cardinal = |v: f64| self.plural.cardinal(v, &locale_name);
        let ordinal = |v: f64| self.plural.ordinal(v, &locale_name);
        let format_embedded = |v: f64, fmt: &str| -> Result<String> {
            let mut opts = NumberFormatOptions { locale: Some(resolved.locale.cldr_locale_name.clone()), ..Default::default() };
            opts.format = Some(fmt.to_string());
            self.to_string(&Number::Float(v), &opts)
        };

        let ctx = RbnfContext {
            rule_sets: &data.rbnf,
            cardinal: &cardinal,
            ordinal: &ordinal,
            format_embedded: &format_embedded,
            locale_name: &resolved.locale.cldr_locale_name,
        };
        rbnf::eval(&ctx, rule_set_name, n)
    }

    fn format_compact(&self, number: &Number, resolved: &ResolvedOptions, data: &LocaleData) -> Result<String> {
        let n = number.to_f64_lossy();
        let n_abs = n.abs();
        let locale_name = resolved.locale.cldr_locale_name.clone();
        let cardinal = |v: f64| self.plural.cardinal(v, &locale_name);

        if matches!(resolved.format, FormatStyle::CurrencyLongWithSymbol) {
            return self.format_currency_long_with_symbol(number, resolved, data);
        }
        if matches!(resolved.format, FormatStyle::CurrencyLong) {
            return self.format_currency_long(number, resolved, data, false);
        }

        let rules = match resolved.format {
            FormatStyle::Short => &data.decimal_short,
            FormatStyle::Long => &data.decimal_long,
            FormatStyle::CurrencyShort => &data.currency_short,
            FormatStyle::DecimalShort => &data.decimal_short,
            FormatStyle::DecimalLong => &data.decimal_long,
            _ => unreachable!("format_compact only called for compact styles"),
        };

        let selected = compact::select(rules, n_abs, cardinal);
        let Some(selected) = selected else {
            // Fall through to the standard (or currency) format, `spec.md §4.7`.
            let mut fallback = resolved.clone();
            fallback.format = if resolved.currency.is_some() { FormatStyle::Currency } else { FormatStyle::Standard };
            return self.format_pattern_style(number, &fallback, data);
        };

        let normalized = n_abs / selected.divisor;
        let meta = self.compiled(&selected.template, true)?;
        let system = self.number_system(data, resolved)?;
        let symbols = data.symbols_for(&system.name).ok_or_else(|| CldrNumberError::UnknownNumberSystem(system.name.clone()))?;

        let mut fd = FixedDecimal::from_str(&format!("{normalized}"))
            .map_err(|_| CldrNumberError::ArgumentError("compact-normalized value is not representable".to_string()))?;
        round_fractional(&mut fd, meta.fractional_digits, resolved.rounding_mode);

        let decomposed = decompose(&fd, 0);
        let grouped_int = group_integer_digits(&decomposed.integer_digits, meta.grouping.integer, 0);
        let grouped_frac = group_fraction_digits(&decomposed.fraction_digits, meta.grouping.fraction);
        let mantissa = mantissa_pieces(&grouped_int, &grouped_frac, None);

        let is_negative = n < 0.0 && !number.is_zero();
        let ops: &[Op] = if is_negative { &meta.format.negative } else { &meta.format.positive };
        let currency_texts =
            self.resolve_currency_texts(ops, resolved.currency.as_deref(), resolved, &fd)?;
        let pieces = assemble(ops, &mantissa, &currency_texts, &data.currency_spacing, meta.padding_length, meta.padding_char);
        Ok(render(&pieces, &system, symbols))
    }

    /// `:currency_long`, `spec.md §4.7`: the long decimal form of the number
    /// composed with the pluralized long currency name via the locale's
    /// `currency_long` substitution pattern.
    fn format_currency_long(&self, number: &Number, resolved: &ResolvedOptions, data: &LocaleData, _with_symbol: bool) -> Result<String> {
        let code = resolved
            .currency
            .as_deref()
            .ok_or_else(|| CldrNumberError::ArgumentError("currency option is required".to_string()))?;
        let n = number.to_f64_lossy();
        let currency_data = self.currency_resolver.currency_for_code(code, &resolved.locale.cldr_locale_name)?;
        let category = self.plural.cardinal(n, &resolved.locale.cldr_locale_name);
        let plural_name = currency_data.plural_name(category);

        let mut standard_opts = resolved.clone();
        standard_opts.format = FormatStyle::Standard;
        standard_opts.fractional_digits = standard_opts.fractional_digits.or(Some(0));
        let number_part = self.format_pattern_style(number, &standard_opts, data)?;

        Ok(data.misc_patterns.currency_long.replace("{0}", &number_part).replace("{1}", plural_name))
    }

    /// `:currency_long_with_symbol`, `spec.md §9`'s Open Question resolution:
    /// compose the long name, then substitute into the locale's
    /// currency-spacing-aware standard currency template.
    fn format_currency_long_with_symbol(&self, number: &Number, resolved: &ResolvedOptions, data: &LocaleData) -> Result<String> {
        let long = self.format_currency_long(number, resolved, data, true)?;
        let mut currency_opts = resolved.clone();
        currency_opts.format = FormatStyle::Currency;
        let currency_form = self.format_pattern_style(number, &currency_opts, data)?;
        Ok(data.misc_patterns.currency_long.replace("{0}", &currency_form).replace("{1}", &long))
    }

    /// `to_at_least_string`, `spec.md §6`.
    pub fn to_at_least_string(&self, number: &Number, opts: &NumberFormatOptions) -> Result<String> {
        let resolved = resolve(opts, self.default_locale)?;
        let data = self.locale_store.get_locale(&resolved.locale.cldr_locale_name)?;
        let formatted = self.to_string(number, opts)?;
        Ok(data.misc_patterns.at_least.replace("{0}", &formatted))
    }

    /// `to_at_most_string`, `spec.md §6`.
    pub fn to_at_most_string(&self, number: &Number, opts: &NumberFormatOptions) -> Result<String> {
        let resolved = resolve(opts, self.default_locale)?;
        let data = self.locale_store.get_locale(&resolved.locale.cldr_locale_name)?;
        let formatted = self.to_string(number, opts)?;
        Ok(data.misc_patterns.at_most.replace("{0}", &formatted))
    }

    /// `to_approx_string`, `spec.md §6`.
    pub fn to_approx_string(&self, number: &Number, opts: &NumberFormatOptions) -> Result<String> {
        let resolved = resolve(opts, self.default_locale)?;
        let data = self.locale_store.get_locale(&resolved.locale.cldr_locale_name)?;
        let formatted = self.to_string(number, opts)?;
        Ok(data.misc_patterns.approximately.replace("{0}", &formatted))
    }

    /// `to_range_string`, `spec.md §6`: substitutes two formatted numbers
    /// into the locale's range template, collapsing to a single formatted
    /// number when both ends round to the same display value.
    pub fn to_range_string(&self, from: &Number, to: &Number, opts: &NumberFormatOptions) -> Result<String> {
        let resolved = resolve(opts, self.default_locale)?;
        let data = self.locale_store.get_locale(&resolved.locale.cldr_locale_name)?;
        let from_s = self.to_string(from, opts)?;
        let to_s = self.to_string(to, opts)?;
        if from_s == to_s {
            return Ok(from_s);
        }
        Ok(data.misc_patterns.range.replace("{0}", &from_s).replace("{1}", &to_s))
    }

    /// `to_number_system(number, system) -> Result<String, _>`, `spec.md §6`.
    pub fn to_number_system(&self, number: &Number, system: &str, locale: &str) -> Result<String> {
        let data = self.locale_store.get_locale(locale)?;
        let ns = data.number_system(system).ok_or_else(|| CldrNumberError::UnknownNumberSystem(system.to_string()))?;
        if ns.is_algorithmic() {
            let rule_set = ns.rule_set.as_deref().ok_or_else(|| CldrNumberError::UnknownNumberSystem(system.to_string()))?;
            let n = number.to_f64_lossy();
            let cardinal = |v: f64| self.plural.cardinal(v, locale);
            let ordinal = |v: f64| self.plural.ordinal(v, locale);
            let owned_locale = locale.to_string();
            let format_embedded = |v: f64, fmt: &str| -> Result<String> {
                self.to_string(&Number::Float(v), &NumberFormatOptions {
                    locale: Some(owned_locale.clone()),
                    format: Some(fmt.to_string()),
                    ..Default::default()
                })
            };
            let ctx = RbnfContext { rule_sets: &data.rbnf, cardinal: &cardinal, ordinal: &ordinal, format_embedded: &format_embedded, locale_name: locale };
            return rbnf::eval(&ctx, rule_set, n);
        }

        let symbols = data.symbols_for(&ns.name).ok_or_else(|| CldrNumberError::UnknownNumberSystem(ns.name.clone()))?;
        let fd = number
            .to_working_decimal()
            .ok_or_else(|| CldrNumberError::ArgumentError("number has no finite working representation".to_string()))?;
        let decomposed = decompose(&fd, 0);
        let grouped_int: Vec<_> = decomposed.integer_digits.iter().map(|&d| crate::grouping::GroupedDigit::Digit(d)).collect();
        let grouped_frac: Vec<_> = decomposed.fraction_digits.iter().map(|&d| crate::grouping::GroupedDigit::Digit(d)).collect();
        let mut pieces = vec![];
        if decomposed.sign == Sign::Negative {
            pieces.push(Piece::Symbol(crate::assemble::SymbolKind::Minus));
        }
        pieces.extend(mantissa_pieces(&grouped_int, &grouped_frac, None));
        Ok(render(&pieces, &ns, symbols))
    }

    /// `parse(string, options) -> Result<Number, ParseError>`, `spec.md §6`.
    pub fn parse(&self, input: &str, opts: &NumberFormatOptions, kind: crate::scan::NumericKind) -> Result<Number> {
        let resolved = resolve(opts, self.default_locale)?;
        let data = self.locale_store.get_locale(&resolved.locale.cldr_locale_name)?;
        let system = self.number_system(&data, &resolved)?;
        crate::scan::parse(input, &system, &data.lenient_parse_maps, kind)
    }

    /// `scan(string, options) -> Sequence<Text | Number>`, `spec.md §6`.
    pub fn scan(&self, input: &str, opts: &NumberFormatOptions, kind: crate::scan::NumericKind) -> Result<Vec<ScanElement>> {
        let resolved = resolve(opts, self.default_locale)?;
        let data = self.locale_store.get_locale(&resolved.locale.cldr_locale_name)?;
        let system = self.number_system(&data, &resolved)?;
        Ok(crate::scan::scan(input, &system, &data.lenient_parse_maps, kind))
    }

    /// `resolve_currency(string, options) -> Result<CurrencyCode, _>`, `spec.md §6`.
    pub fn resolve_currency(&self, input: &str, locale: &str, filter: CurrencyStringsFilter, fuzzy: Option<f64>) -> Result<String> {
        crate::scan::resolve_currency(input, locale, self.currency_resolver, filter, fuzzy)
    }

    /// `resolve_currencies(list, options) -> Sequence<CurrencyCode | String>`, `spec.md §6`.
    pub fn resolve_currencies(&self, list: &[String], locale: &str, filter: CurrencyStringsFilter) -> Result<Vec<ScanElement>> {
        crate::scan::resolve_currencies(list, locale, self.currency_resolver, filter)
    }

    /// `resolve_per(string, options) -> Sequence<PerToken | String>`, `spec.md §6`.
    pub fn resolve_per(&self, input: &str, locale: &str) -> Result<Vec<ScanElement>> {
        let data = self.locale_store.get_locale(locale)?;
        Ok(crate::scan::resolve_per(input, &data.lenient_parse_maps))
    }
}

/// Applies a currency's fraction-digit/rounding-increment policy to an
/// already-resolved `FormatMeta`, per `spec.md §4.5.1` / `§6`'s
/// `currency_digits` option. Kept separate from [`currency_frac_range`]
/// since it additionally needs the resolved `Currency` record.
pub fn currency_digits_override(currency: &Currency, resolved: &ResolvedOptions) -> (cldr_numbers_syntax::DigitRange, f64) {
    let digits = currency.fraction_digits(resolved.currency_digits);
    let rounding = currency.rounding_increment(resolved.currency_digits);
    (cldr_numbers_syntax::DigitRange { min: digits, max: digits }, rounding)
}

fn truncate_integer_digits(fd: &FixedDecimal, max_digits: u32) -> FixedDecimal {
    let s = fd.to_string();
    let (sign, rest) = match s.strip_prefix('-') {
        Some(r) => ("-", r),
        None => ("", s.as_str()),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };
    let truncated_int = if int_part.len() > max_digits as usize {
        &int_part[int_part.len() - max_digits as usize..]
    } else {
        int_part
    };
    let rebuilt = match frac_part {
        Some(f) => format!("{sign}{truncated_int}.{f}"),
        None => format!("{sign}{truncated_int}"),
    };
    FixedDecimal::from_str(&rebuilt).unwrap_or_else(|_| fd.clone())
}
