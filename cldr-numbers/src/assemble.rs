use cldr_numbers_syntax::Op;

use crate::grouping::GroupedDigit;
use crate::symbols::{CurrencySpacing, CurrencySpacingRule};

/// A placeholder emitted by the Assembler (`spec.md §4.5`) and consumed by
/// the Transliterator (`spec.md §4.6`). Digits and canonical symbols are
/// kept distinct from literal text so transliteration never touches a
/// pattern's literal affixes (e.g. a currency symbol, or `"Rp. "`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Literal(String),
    Digit(u8),
    Symbol(SymbolKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Decimal,
    Group,
    Plus,
    Minus,
    Percent,
    PerMille,
    Exponent,
    ExponentPlus,
    ExponentMinus,
}

/// Resolved currency text for each of the four widths the pattern's
/// `Currency(width)` op can select, per `spec.md §4.5.1`.
#[derive(Debug, Clone, Default)]
pub struct CurrencyTexts {
    pub symbol: String,
    pub iso_code: String,
    pub plural_name: String,
    pub narrow_symbol: String,
}

impl CurrencyTexts {
    fn for_width(&self, width: u8) -> &str {
        match width {
            1 => &self.symbol,
            2 => &self.iso_code,
            3 => &self.plural_name,
            4 => &self.narrow_symbol,
            _ => &self.symbol,
        }
    }
}

/// The number's canonical digit/separator piece sequence, built from the
/// grouped integer and fraction digits plus an optional scientific
/// exponent (`spec.md §4.4`'s output feeding `spec.md §4.5`'s `FormatNumber`
/// op).
pub fn mantissa_pieces(
    integer: &[GroupedDigit],
    fraction: &[GroupedDigit],
    exponent: Option<(bool, bool, &[u8])>,
) -> Vec<Piece> {
    let mut pieces = Vec::new();
    for g in integer {
        pieces.push(match g {
            GroupedDigit::Digit(d) => Piece::Digit(*d),
            GroupedDigit::Separator => Piece::Symbol(SymbolKind::Group),
        });
    }
    if !fraction.is_empty() {
        pieces.push(Piece::Symbol(SymbolKind::Decimal));
        for g in fraction {
            pieces.push(match g {
                GroupedDigit::Digit(d) => Piece::Digit(*d),
                GroupedDigit::Separator => Piece::Symbol(SymbolKind::Group),
            });
        }
    }
    if let Some((negative, show_plus, exp_digits)) = exponent {
        pieces.push(Piece::Symbol(SymbolKind::Exponent));
        if negative {
            pieces.push(Piece::Symbol(SymbolKind::ExponentMinus));
        } else if show_plus {
            pieces.push(Piece::Symbol(SymbolKind::ExponentPlus));
        }
        for &d in exp_digits {
            pieces.push(Piece::Digit(d));
        }
    }
    pieces
}

/// Walks `ops` (the selected positive or negative operation list) and
/// produces the fully assembled piece sequence, applying currency spacing
/// and pad-directive expansion (`spec.md §4.5`).
pub fn assemble(
    ops: &[Op],
    mantissa: &[Piece],
    currency: &CurrencyTexts,
    currency_spacing: &CurrencySpacing,
    padding_length: u32,
    padding_char: char,
) -> Vec<Piece> {
    let mut out: Vec<Piece> = Vec::new();
    let mut pad_slot: Option<usize> = None;

    for (i, op) in ops.iter().enumerate() {
        match op {
            Op::Literal(s) => out.push(Piece::Literal(s.clone())),
            Op::FormatNumber => {
                maybe_insert_currency_spacing(&mut out, ops, i, currency, currency_spacing, mantissa, true);
                out.extend(mantissa.iter().cloned());
                maybe_insert_currency_spacing(&mut out, ops, i, currency, currency_spacing, mantissa, false);
            }
            Op::Currency(width) => out.push(Piece::Literal(currency.for_width(*width).to_string())),
            Op::Plus => out.push(Piece::Symbol(SymbolKind::Plus)),
            Op::Minus => {
                if !is_zero_mantissa(mantissa) {
                    out.push(Piece::Symbol(SymbolKind::Minus));
                }
            }
            Op::Percent => out.push(Piece::Symbol(SymbolKind::Percent)),
            Op::Permille => out.push(Piece::Symbol(SymbolKind::PerMille)),
            Op::Pad => pad_slot = Some(out.len()),
        }
    }

    if let Some(slot) = pad_slot {
        let current_len = out.len();
        if (current_len as u32) < padding_length {
            let fill = padding_length - current_len as u32;
            let filler = vec![Piece::Literal(padding_char.to_string().repeat(fill as usize))];
            out.splice(slot..slot, filler);
        }
    }

    out
}

fn is_zero_mantissa(mantissa: &[Piece]) -> bool {
    mantissa.iter().all(|p| matches!(p, Piece::Digit(0) | Piece::Symbol(SymbolKind::Decimal)))
}

fn maybe_insert_currency_spacing(
    out: &mut Vec<Piece>,
    ops: &[Op],
    format_number_index: usize,
    currency: &CurrencyTexts,
    spacing: &CurrencySpacing,
    mantissa: &[Piece],
    before: bool,
) {
    let neighbor_index = if before {
        format_number_index.checked_sub(1)
    } else {
        Some(format_number_index + 1)
    };
    let Some(neighbor_index) = neighbor_index else { return };
    let Some(Op::Currency(width)) = ops.get(neighbor_index) else { return };

    let currency_text = currency.for_width(*width);
    let boundary_char = if before {
        currency_text.chars().last()
    } else {
        currency_text.chars().next()
    };
    let Some(boundary_char) = boundary_char else { return };

    let surrounding_piece = if before { mantissa.first() } else { mantissa.last() };
    let Some(surrounding_char) = surrounding_piece.and_then(piece_boundary_char) else { return };

    let rule: &CurrencySpacingRule = if before { &spacing.before_currency } else { &spacing.after_currency };
    if matches_class(&rule.currency_match, boundary_char) && matches_class(&rule.surrounding_match, surrounding_char) {
        out.push(Piece::Literal(rule.insert_between.clone()));
    }
}

/// The character TR35's `surroundingMatch` class is tested against: the
/// mantissa-side glyph immediately touching the currency. Only a digit
/// piece carries a concrete character; separators/decimal points have no
/// fixed glyph at this layer, so they never satisfy `[:digit:]`.
fn piece_boundary_char(piece: &Piece) -> Option<char> {
    match piece {
        Piece::Digit(d) => char::from_digit(*d as u32, 10),
        _ => None,
    }
}

/// Approximates the small set of TR35 UnicodeSet character-class patterns
/// locale data actually uses for currency spacing (`[:digit:]`, `[:^S:]`,
/// `[:alpha:]`). Full UnicodeSet parsing is a `LocaleStore` concern; this
/// core only needs to evaluate the handful of classes CLDR's root data ships.
fn matches_class(pattern: &str, ch: char) -> bool {
    match pattern {
        "[:digit:]" => ch.is_ascii_digit(),
        "[:alpha:]" => ch.is_alphabetic(),
        "[:^S:]" => ch.is_alphanumeric() || ch.is_whitespace(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::GroupedDigit::{Digit, Separator};

    #[test]
    fn suppresses_minus_for_zero() {
        let ops = vec![Op::Minus, Op::FormatNumber];
        let mantissa = vec![Piece::Digit(0)];
        let out = assemble(&ops, &mantissa, &CurrencyTexts::default(), &CurrencySpacing::root_default(), 0, '*');
        assert!(!out.contains(&Piece::Symbol(SymbolKind::Minus)));
    }

    #[test]
    fn keeps_minus_for_nonzero() {
        let ops = vec![Op::Minus, Op::FormatNumber];
        let mantissa = vec![Piece::Digit(1)];
        let out = assemble(&ops, &mantissa, &CurrencyTexts::default(), &CurrencySpacing::root_default(), 0, '*');
        assert!(out.contains(&Piece::Symbol(SymbolKind::Minus)));
    }

    #[test]
    fn inserts_spacing_for_alphabetic_currency_boundary() {
        let ops = vec![Op::FormatNumber, Op::Currency(2)];
        let mantissa = vec![Digit(1), Digit(0), Digit(0)].into_iter().map(|g| match g {
            Digit(d) => Piece::Digit(d),
            Separator => Piece::Symbol(SymbolKind::Group),
        }).collect::<Vec<_>>();
        let currency = CurrencyTexts { iso_code: "USD".to_string(), ..Default::default() };
        let out = assemble(&ops, &mantissa, &currency, &CurrencySpacing::root_default(), 0, '*');
        assert!(out.iter().any(|p| matches!(p, Piece::Literal(s) if s == "\u{00A0}")));
    }

    #[test]
    fn no_spacing_when_surrounding_char_is_not_a_digit() {
        let ops = vec![Op::FormatNumber, Op::Currency(2)];
        let mantissa = vec![Piece::Symbol(SymbolKind::Decimal)];
        let currency = CurrencyTexts { iso_code: "USD".to_string(), ..Default::default() };
        let out = assemble(&ops, &mantissa, &currency, &CurrencySpacing::root_default(), 0, '*');
        assert!(!out.iter().any(|p| matches!(p, Piece::Literal(s) if s == "\u{00A0}")));
    }

    #[test]
    fn exponent_plus_omitted_unless_requested() {
        let pieces = mantissa_pieces(&[Digit(1)], &[], Some((false, false, &[2])));
        assert!(!pieces.contains(&Piece::Symbol(SymbolKind::ExponentPlus)));
    }

    #[test]
    fn exponent_plus_shown_when_requested() {
        let pieces = mantissa_pieces(&[Digit(1)], &[], Some((false, true, &[2])));
        assert!(pieces.contains(&Piece::Symbol(SymbolKind::ExponentPlus)));
    }

    #[test]
    fn exponent_minus_always_shown() {
        let pieces = mantissa_pieces(&[Digit(1)], &[], Some((true, false, &[2])));
        assert!(pieces.contains(&Piece::Symbol(SymbolKind::ExponentMinus)));
    }

    #[test]
    fn no_spacing_for_symbol_currency_boundary() {
        let ops = vec![Op::Currency(1), Op::FormatNumber];
        let mantissa = vec![Piece::Digit(5)];
        let currency = CurrencyTexts { symbol: "$".to_string(), ..Default::default() };
        let out = assemble(&ops, &mantissa, &currency, &CurrencySpacing::root_default(), 0, '*');
        assert!(!out.iter().any(|p| matches!(p, Piece::Literal(s) if s == "\u{00A0}")));
    }
}
