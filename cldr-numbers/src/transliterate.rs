use cldr_numbers_memoizer::WarnOnceSet;

use crate::assemble::{Piece, SymbolKind};
use crate::number_system::NumberSystem;
use crate::symbols::NumberSymbols;

/// Transliterator: `spec.md §4.6`.
///
/// Renders an assembled piece sequence to its final string by replacing
/// each [`Piece::Digit`] with the target number system's grapheme and each
/// [`Piece::Symbol`] with the locale's symbol. Short-circuits to the ASCII
/// digit when `system.is_latin_digits()` — the common case for most
/// Latin-script locales.
pub fn render(pieces: &[Piece], system: &NumberSystem, symbols: &NumberSymbols) -> String {
    let mut out = String::new();
    let latin = system.is_latin_digits();
    for piece in pieces {
        match piece {
            Piece::Literal(s) => out.push_str(s),
            Piece::Digit(d) => {
                if latin {
                    out.push((b'0' + d) as char);
                } else if let Some(g) = system.digit(*d) {
                    out.push_str(g);
                } else {
                    out.push((b'0' + d) as char);
                }
            }
            Piece::Symbol(kind) => out.push_str(symbol_text(*kind, symbols)),
        }
    }
    out
}

fn symbol_text<'a>(kind: SymbolKind, symbols: &'a NumberSymbols) -> &'a str {
    match kind {
        SymbolKind::Decimal => &symbols.decimal,
        SymbolKind::Group => &symbols.group,
        SymbolKind::Plus => &symbols.plus,
        SymbolKind::Minus => &symbols.minus,
        SymbolKind::Percent => &symbols.percent,
        SymbolKind::PerMille => &symbols.per_mille,
        SymbolKind::Exponent => &symbols.exponent,
        SymbolKind::ExponentPlus => &symbols.plus,
        SymbolKind::ExponentMinus => &symbols.minus,
    }
}

/// The locale's localized graphemes for special (non-finite) values,
/// rendered directly without going through the assembler/transliterator
/// piece pipeline (`spec.md §4.3`'s "NaN and ±∞ skip rounding" edge case).
pub fn render_special(is_nan: bool, is_negative: bool, symbols: &NumberSymbols) -> String {
    if is_nan {
        symbols.nan.clone()
    } else if is_negative {
        format!("{}{}", symbols.minus, symbols.infinity)
    } else {
        symbols.infinity.clone()
    }
}

/// Builds (and memoizes) a `grapheme → digit value` map for a non-Latin
/// number system, used by the Parser/Scanner to transliterate user input
/// back to Latin digits before numeric parsing (`spec.md §4.9`, step 3).
/// Logs at most one warning per system the first time its map is built on
/// demand, per `spec.md §5`'s one-time-warning discipline.
pub fn digit_to_latin_map(system: &NumberSystem, warned: &WarnOnceSet) -> rustc_hash::FxHashMap<String, u8> {
    let mut map = rustc_hash::FxHashMap::default();
    if let Some(digits) = &system.digits {
        for (value, grapheme) in digits.iter().enumerate() {
            map.insert(grapheme.clone(), value as u8);
        }
    } else {
        warned.warn_once(&system.name, || {
            format!("number system '{}' has no digit table to transliterate from", system.name)
        });
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin_digits_render_as_ascii() {
        let system = NumberSystem::latin();
        let symbols = NumberSymbols::latin_default();
        let pieces = vec![Piece::Digit(1), Piece::Digit(2), Piece::Symbol(SymbolKind::Decimal), Piece::Digit(5)];
        assert_eq!(render(&pieces, &system, &symbols), "12.5");
    }

    #[test]
    fn non_latin_digits_use_system_graphemes() {
        let thai = NumberSystem {
            name: "thai".to_string(),
            kind: crate::number_system::NumberSystemKind::Numeric,
            digits: Some([
                "\u{0E50}".into(), "\u{0E51}".into(), "\u{0E52}".into(), "\u{0E53}".into(), "\u{0E54}".into(),
                "\u{0E55}".into(), "\u{0E56}".into(), "\u{0E57}".into(), "\u{0E58}".into(), "\u{0E59}".into(),
            ]),
            rule_set: None,
        };
        let symbols = NumberSymbols::latin_default();
        let pieces = vec![Piece::Digit(1), Piece::Digit(2), Piece::Digit(3)];
        assert_eq!(render(&pieces, &thai, &symbols), "\u{0E51}\u{0E52}\u{0E53}");
    }
}
