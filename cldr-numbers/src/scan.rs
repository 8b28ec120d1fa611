use std::str::FromStr;

use regex::Regex;
use rustc_hash::FxHashMap;

use crate::backend::LenientParseMaps;
use crate::collaborators::{CurrencyResolver, CurrencyStringsFilter};
use crate::error::{CldrNumberError, Result};
use crate::number::{Decimal, Number};
use crate::number_system::NumberSystem;

/// One element of a [`scan`] result, per `spec.md §4.9`.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanElement {
    Text(String),
    Number(Number),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Integer,
    Float,
    Decimal,
}

/// Transliterates non-Latin digits in `s` to Latin, per `spec.md §4.9`,
/// step 3 / `§4.6`'s reverse direction.
pub fn transliterate_to_latin(s: &str, system: &NumberSystem) -> String {
    let Some(digits) = &system.digits else { return s.to_string() };
    if system.is_latin_digits() {
        return s.to_string();
    }
    let mut reverse: FxHashMap<&str, char> = FxHashMap::default();
    for (value, grapheme) in digits.iter().enumerate() {
        reverse.insert(grapheme.as_str(), (b'0' + value as u8) as char);
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    'outer: while !rest.is_empty() {
        for (grapheme, latin) in &reverse {
            if rest.starts_with(grapheme) {
                out.push(*latin);
                rest = &rest[grapheme.len()..];
                continue 'outer;
            }
        }
        let mut chars = rest.chars();
        out.push(chars.next().unwrap());
        rest = chars.as_str();
    }
    out
}

/// Lenient-parse normalization, `spec.md §4.9 parse/2` step 1: every
/// Unicode plus/minus/group/decimal variant the locale recognizes collapses
/// to its canonical ASCII form, and `_` digit-group separators are
/// stripped.
pub fn normalize_lenient(s: &str, maps: &LenientParseMaps) -> String {
    let mut out = s.replace('_', "");
    out = replace_any(&out, &maps.plus, "+");
    out = replace_any(&out, &maps.minus, "-");
    out = replace_any(&out, &maps.group, "\u{0}GROUP\u{0}");
    out = replace_any(&out, &maps.decimal, ".");
    out = out.replace("\u{0}GROUP\u{0}", "");
    out
}

fn replace_any(s: &str, variants: &[String], canonical: &str) -> String {
    let mut out = s.to_string();
    for v in variants {
        if !v.is_empty() {
            out = out.replace(v.as_str(), canonical);
        }
    }
    out
}

/// `parse(string, options) → number | error`, per `spec.md §4.9`.
pub fn parse(input: &str, system: &NumberSystem, maps: &LenientParseMaps, kind: NumericKind) -> Result<Number> {
    let latin = transliterate_to_latin(input, system);
    let normalized = normalize_lenient(&latin, maps);
    let trimmed = normalized.trim();

    match kind {
        NumericKind::Integer => {
            if trimmed.contains('.') {
                return Err(CldrNumberError::ParseError { input: input.to_string(), kind: "integer" });
            }
            num_bigint::BigInt::from_str(trimmed)
                .map(Number::Integer)
                .map_err(|_| CldrNumberError::ParseError { input: input.to_string(), kind: "integer" })
        }
        NumericKind::Float => f64::from_str(trimmed)
            .map(Number::Float)
            .map_err(|_| CldrNumberError::ParseError { input: input.to_string(), kind: "float" }),
        NumericKind::Decimal => Decimal::from_decimal_str(trimmed)
            .map(Number::Decimal)
            .map_err(|_| CldrNumberError::ParseError { input: input.to_string(), kind: "decimal" }),
    }
}

fn number_pattern(maps: &LenientParseMaps) -> Regex {
    let class = |variants: &[String], fallback: &str| -> String {
        let mut alts: Vec<String> = variants.iter().filter(|v| !v.is_empty()).map(|v| regex::escape(v)).collect();
        if alts.is_empty() {
            alts.push(regex::escape(fallback));
        }
        format!("(?:{})", alts.join("|"))
    };
    let sign = format!("(?:{}|{})?", class(&maps.plus, "+"), class(&maps.minus, "-"));
    let group = class(&maps.group, ",");
    let decimal = class(&maps.decimal, ".");
    let pattern = format!(
        r"{sign}[0-9](?:[0-9]|{group})*(?:{decimal}[0-9]+)?(?:[eE][-+]?[0-9]+)?",
    );
    Regex::new(&pattern).expect("lenient-parse number regex is always well-formed")
}

/// `scan(string, options) → sequence of text-or-number elements`, per
/// `spec.md §4.9`.
pub fn scan(input: &str, system: &NumberSystem, maps: &LenientParseMaps, kind: NumericKind) -> Vec<ScanElement> {
    let latin = transliterate_to_latin(input, system);
    let re = number_pattern(maps);

    let mut out = Vec::new();
    let mut last_end = 0;
    for m in re.find_iter(&latin) {
        if m.start() > last_end {
            out.push(ScanElement::Text(latin[last_end..m.start()].to_string()));
        }
        match parse(m.as_str(), system, maps, kind) {
            Ok(n) => out.push(ScanElement::Number(n)),
            Err(_) => out.push(ScanElement::Text(m.as_str().to_string())),
        }
        last_end = m.end();
    }
    if last_end < latin.len() {
        out.push(ScanElement::Text(latin[last_end..].to_string()));
    }
    out
}

/// `find_and_replace`, `spec.md §4.9`, step 2: locates the longest key of
/// `map` matching at the start and/or end of `haystack` (after trimming
/// whitespace), with the match boundary not adjacent to an alphabetic
/// character. Returns `(leading_match, middle, trailing_match)`.
pub fn find_and_replace<'h>(
    haystack: &'h str,
    map: &FxHashMap<String, String>,
) -> (Option<(&'h str, &'h str)>, &'h str, Option<(&'h str, &'h str)>) {
    let trimmed = haystack.trim();

    let mut leading: Option<(&str, &str)> = None;
    let mut best_leading_len = 0;
    for key in map.keys() {
        if trimmed.len() > key.len()
            && trimmed[..key.len()].eq_ignore_ascii_case(key)
            && key.len() > best_leading_len
            && !trimmed[key.len()..].starts_with(|c: char| c.is_alphabetic())
        {
            best_leading_len = key.len();
            leading = Some((&trimmed[..key.len()], map.get(key).map(String::as_str).unwrap_or(key)));
        }
    }

    let remainder_start = leading.map(|(m, _)| m.len()).unwrap_or(0);
    let remainder = trimmed[remainder_start..].trim_start();

    let mut trailing: Option<(&str, &str)> = None;
    let mut best_trailing_len = 0;
    for key in map.keys() {
        if remainder.len() > key.len()
            && remainder[remainder.len() - key.len()..].eq_ignore_ascii_case(key)
            && key.len() > best_trailing_len
        {
            let boundary = remainder.len() - key.len();
            if !remainder[..boundary].ends_with(|c: char| c.is_alphabetic()) {
                best_trailing_len = key.len();
                trailing = Some((&remainder[boundary..], map.get(key).map(String::as_str).unwrap_or(key)));
            }
        }
    }

    let middle_end = remainder.len() - trailing.map(|(m, _)| m.len()).unwrap_or(0);
    let middle = remainder[..middle_end].trim();

    (leading, middle, trailing)
}

/// Trims a leading/trailing run of digits, whitespace or grouping/decimal
/// punctuation, isolating the textual currency designator in a string like
/// `"100 eurosports"` before a fuzzy comparison (`spec.md §4.9`, step 3).
fn strip_numeric_bounds(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii_digit() || c.is_whitespace() || c == '.' || c == ',')
}

/// Jaro similarity fuzzy match, `spec.md §4.9`, step 3.
fn best_fuzzy_match<'m>(needle: &str, map: &'m FxHashMap<String, String>, threshold: f64) -> Option<(&'m str, &'m str)> {
    map.iter()
        .map(|(k, v)| (strsim::jaro(needle, k), k.as_str(), v.as_str()))
        .filter(|(score, _, _)| *score >= threshold)
        .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(_, k, v)| (k, v))
}

/// `resolve_currency(string, options) → Result<CurrencyCode, _>`,
/// `spec.md §4.9` / `§6`.
pub fn resolve_currency(
    input: &str,
    locale: &str,
    resolver: &dyn CurrencyResolver,
    filter: CurrencyStringsFilter,
    fuzzy: Option<f64>,
) -> Result<String> {
    let entries = resolver.currency_strings(locale, filter)?;
    let map: FxHashMap<String, String> = entries.into_iter().collect();

    let trimmed = input.trim();
    if let Some(code) = map.iter().find(|(k, _)| k.eq_ignore_ascii_case(trimmed)).map(|(_, v)| v.clone()) {
        return Ok(code);
    }

    if let Some(fuzzy) = fuzzy {
        if !(0.0..=1.0).contains(&fuzzy) || fuzzy == 0.0 {
            return Err(CldrNumberError::ArgumentError("fuzzy must be in (0, 1]".to_string()));
        }
        // A currency designator is rarely the whole input (`"100 eurosports"`);
        // strip the embedded-number boundary so the Jaro comparison runs
        // against the designator text itself, not the number alongside it.
        let candidate = strip_numeric_bounds(trimmed);
        if let Some((_, code)) = best_fuzzy_match(candidate, &map, fuzzy) {
            return Ok(code.to_string());
        }
    }

    Err(CldrNumberError::UnknownCurrency(input.to_string()))
}

/// `resolve_currencies(list, options)`, `spec.md §4.9`: resolves each
/// haystack in `list` against the locale's currency-strings map, returning
/// the original string for unmatched entries.
pub fn resolve_currencies(
    list: &[String],
    locale: &str,
    resolver: &dyn CurrencyResolver,
    filter: CurrencyStringsFilter,
) -> Result<Vec<ScanElement>> {
    let entries = resolver.currency_strings(locale, filter)?;
    let map: FxHashMap<String, String> = entries.into_iter().collect();

    Ok(list
        .iter()
        .map(|s| {
            let (_, middle, trailing) = find_and_replace(s, &map);
            match trailing {
                Some((_, code)) if middle.is_empty() => ScanElement::Text(code.to_string()),
                _ => ScanElement::Text(s.clone()),
            }
        })
        .collect())
}

/// A percent/permille token recognized by [`resolve_per`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerToken {
    Percent,
    PerMille,
}

/// `resolve_per(string, options)`, `spec.md §4.9`: as `resolve_currency`,
/// but against the locale's lenient-parse percent/per-mille equivalence
/// sets.
pub fn resolve_per(input: &str, maps: &LenientParseMaps) -> Vec<ScanElement> {
    let percent_map: FxHashMap<String, String> =
        maps.percent_sign.iter().map(|v| (v.clone(), "%".to_string())).collect();
    let permille_map: FxHashMap<String, String> =
        maps.per_mille_sign.iter().map(|v| (v.clone(), "\u{2030}".to_string())).collect();

    let (lead_p, mid, trail_p) = find_and_replace(input, &percent_map);
    if lead_p.is_some() || trail_p.is_some() {
        return render_per_match(input, lead_p, mid, trail_p, PerToken::Percent);
    }
    let (lead_m, mid, trail_m) = find_and_replace(input, &permille_map);
    if lead_m.is_some() || trail_m.is_some() {
        return render_per_match(input, lead_m, mid, trail_m, PerToken::PerMille);
    }
    vec![ScanElement::Text(input.to_string())]
}

fn render_per_match(
    _original: &str,
    leading: Option<(&str, &str)>,
    middle: &str,
    trailing: Option<(&str, &str)>,
    _token: PerToken,
) -> Vec<ScanElement> {
    let mut out = Vec::new();
    if let Some((_, canon)) = leading {
        out.push(ScanElement::Text(canon.to_string()));
    }
    if !middle.is_empty() {
        out.push(ScanElement::Text(middle.to_string()));
    }
    if let Some((_, canon)) = trailing {
        out.push(ScanElement::Text(canon.to_string()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_maps() -> LenientParseMaps {
        LenientParseMaps {
            plus: vec!["+".to_string(), "\u{FF0B}".to_string()],
            minus: vec!["-".to_string()],
            decimal: vec![".".to_string()],
            group: vec![",".to_string()],
            percent_sign: vec!["%".to_string()],
            per_mille_sign: vec!["\u{2030}".to_string()],
        }
    }

    #[test]
    fn normalizes_fullwidth_plus() {
        let maps = root_maps();
        assert_eq!(normalize_lenient("\u{FF0B}1.000,34", &maps), "+1.000,34");
    }

    #[test]
    fn parses_integer_rejects_fraction() {
        let system = NumberSystem::latin();
        let maps = root_maps();
        assert!(parse("12.5", &system, &maps, NumericKind::Integer).is_err());
        assert!(parse("12", &system, &maps, NumericKind::Integer).is_ok());
    }

    #[test]
    fn underscore_separated_input_parses() {
        let system = NumberSystem::latin();
        let maps = root_maps();
        let n = parse("1_000_000", &system, &maps, NumericKind::Integer).unwrap();
        assert!(matches!(n, Number::Integer(i) if i == num_bigint::BigInt::from(1_000_000)));
    }

    #[test]
    fn find_and_replace_matches_leading_symbol() {
        let mut map = FxHashMap::default();
        map.insert("£".to_string(), "GBP".to_string());
        let (leading, middle, trailing) = find_and_replace("£1000000.34", &map);
        assert_eq!(leading.map(|(_, v)| v), Some("GBP"));
        assert_eq!(middle, "1000000.34");
        assert!(trailing.is_none());
    }

    #[test]
    fn fuzzy_match_finds_closest_currency_name() {
        let mut map = FxHashMap::default();
        map.insert("euros".to_string(), "EUR".to_string());
        let hit = best_fuzzy_match("eurosports", &map, 0.8);
        assert_eq!(hit.map(|(_, v)| v), Some("EUR"));
    }

    struct ToyResolver;
    impl CurrencyResolver for ToyResolver {
        fn currency_for_code(&self, _code: &str, _locale: &str) -> Result<crate::currency::Currency> {
            unimplemented!("not exercised by resolve_currency")
        }
        fn currency_strings(&self, _locale: &str, _filter: CurrencyStringsFilter) -> Result<Vec<(String, String)>> {
            Ok(vec![("euros".to_string(), "EUR".to_string())])
        }
    }

    #[test]
    fn resolve_currency_fuzzy_matches_text_amid_a_number() {
        let code = resolve_currency("100 eurosports", "en", &ToyResolver, CurrencyStringsFilter::default(), Some(0.8)).unwrap();
        assert_eq!(code, "EUR");
    }
}
