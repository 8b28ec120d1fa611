use crate::error::PatternSyntaxError;
use crate::lexer::Tok;
use crate::ops::{Op, OpList, PadPosition};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigitRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupSizes {
    pub first: u32,
    pub rest: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Grouping {
    pub integer: GroupSizes,
    pub fraction: GroupSizes,
}

/// Everything the number part of a single subpattern determines, plus the
/// subpattern's fully resolved operation list (prefix + number + suffix).
#[derive(Debug, Clone, Default)]
pub struct Subpattern {
    pub ops: OpList,
    pub integer_digits: DigitRange,
    pub fractional_digits: DigitRange,
    pub significant_digits: DigitRange,
    pub grouping: Grouping,
    pub multiplier: u32,
    pub exponent_digits: u32,
    pub exponent_sign: bool,
    pub round_nearest: f64,
    pub padding_length: u32,
    pub padding_char: char,
    pub pad_position: PadPosition,
}

fn is_number_core(t: &Tok) -> bool {
    matches!(
        t,
        Tok::Digit0 | Tok::DigitHash | Tok::DigitNonZero(_) | Tok::DigitAt | Tok::Comma | Tok::Dot | Tok::Exponent
    )
}

pub fn parse_subpattern(tokens: &[Tok]) -> Result<Subpattern, PatternSyntaxError> {
    let start = tokens.iter().position(is_number_core);
    let Some(start) = start else {
        return Err(PatternSyntaxError::MissingNumberPart);
    };

    let mut end = start;
    while end < tokens.len() {
        let is_core = is_number_core(&tokens[end])
            || (tokens[end] == Tok::PlusSign && end > 0 && tokens[end - 1] == Tok::Exponent);
        if is_core {
            end += 1;
        } else {
            break;
        }
    }

    let prefix = &tokens[..start];
    let number = &tokens[start..end];
    let suffix = &tokens[end..];

    validate_number_core(number)?;

    let (integer_part, rest_after_dot) = split_on_dot(number)?;
    let (fraction_part, exponent_part) = split_on_exponent(rest_after_dot)?;

    let integer_min = integer_part
        .iter()
        .filter(|t| matches!(t, Tok::Digit0 | Tok::DigitNonZero(_)))
        .count() as u32;
    let integer_max = integer_part
        .iter()
        .filter(|t| matches!(t, Tok::Digit0 | Tok::DigitHash | Tok::DigitNonZero(_)))
        .count() as u32;

    let fractional_min = fraction_part
        .iter()
        .filter(|t| matches!(t, Tok::Digit0))
        .count() as u32;
    let fractional_max = fraction_part
        .iter()
        .filter(|t| matches!(t, Tok::Digit0 | Tok::DigitHash))
        .count() as u32;

    let all_digits: Vec<&Tok> = integer_part.iter().chain(fraction_part.iter()).collect();
    let sig_min = all_digits.iter().filter(|t| matches!(t, Tok::DigitAt)).count() as u32;
    let last_at = all_digits.iter().rposition(|t| matches!(t, Tok::DigitAt));
    let sig_max = match last_at {
        Some(pos) => {
            let trailing_hash = all_digits[pos + 1..]
                .iter()
                .filter(|t| matches!(t, Tok::DigitHash))
                .count() as u32;
            sig_min + trailing_hash
        }
        None => 0,
    };

    let grouping = Grouping {
        integer: compute_integer_grouping(integer_part),
        fraction: GroupSizes::default(),
    };

    let round_nearest = extract_round_nearest(integer_part, fraction_part);

    let (exponent_digits, exponent_sign) = match exponent_part {
        Some(exp_tokens) => {
            let sign = exp_tokens.first() == Some(&Tok::PlusSign);
            let digit_tokens = if sign { &exp_tokens[1..] } else { exp_tokens };
            (digit_tokens.iter().filter(|t| matches!(t, Tok::Digit0)).count() as u32, sign)
        }
        None => (0, false),
    };

    let integer_digits = DigitRange {
        min: if sig_min == 0 && integer_min == 0 { 1 } else { integer_min },
        max: integer_max,
    };
    let fractional_digits = DigitRange { min: fractional_min, max: fractional_max };
    let significant_digits = DigitRange { min: sig_min, max: sig_max };

    let mut multiplier = 1u32;
    let mut saw_percent = false;
    let mut saw_permille = false;
    for t in prefix.iter().chain(suffix.iter()) {
        match t {
            Tok::Percent => saw_percent = true,
            Tok::PerMille => saw_permille = true,
            _ => {}
        }
    }
    if saw_percent && saw_permille {
        return Err(PatternSyntaxError::ConflictingMultiplier);
    }
    if saw_percent {
        multiplier = 100;
    } else if saw_permille {
        multiplier = 1000;
    }

    let (pad_position, padding_char) = locate_pad(prefix, suffix);

    let padding_length = integer_digits.min
        + if fractional_digits.max > 0 { 1 + fractional_digits.max } else { 0 };

    let mut ops = Vec::new();
    push_affix_ops(prefix, &mut ops);
    ops.push(Op::FormatNumber);
    push_affix_ops(suffix, &mut ops);

    Ok(Subpattern {
        ops,
        integer_digits,
        fractional_digits,
        significant_digits,
        grouping,
        multiplier,
        exponent_digits,
        exponent_sign,
        round_nearest,
        padding_length,
        padding_char,
        pad_position,
    })
}

fn validate_number_core(number: &[Tok]) -> Result<(), PatternSyntaxError> {
    let dots = number.iter().filter(|t| matches!(t, Tok::Dot)).count();
    if dots > 1 {
        return Err(PatternSyntaxError::MultipleDecimalPoints);
    }
    let exps = number.iter().filter(|t| matches!(t, Tok::Exponent)).count();
    if exps > 1 {
        return Err(PatternSyntaxError::MultipleExponents);
    }
    // '#' may not appear to the left of '0' in the integer part of a
    // significant-digit-free pattern (plain TR35 rule); we only enforce the
    // narrower invariant this spec calls out: '@' cannot follow '#'.
    let mut seen_hash_before_at = false;
    for t in number {
        match t {
            Tok::Dot | Tok::Exponent => break,
            Tok::DigitHash => seen_hash_before_at = true,
            Tok::DigitAt if seen_hash_before_at => {
                return Err(PatternSyntaxError::MisplacedSignificantDigit)
            }
            _ => {}
        }
    }
    Ok(())
}

fn split_on_dot(number: &[Tok]) -> Result<(&[Tok], &[Tok]), PatternSyntaxError> {
    match number.iter().position(|t| matches!(t, Tok::Dot)) {
        Some(i) => Ok((&number[..i], &number[i + 1..])),
        None => Ok((number, &[])),
    }
}

fn split_on_exponent(after_dot: &[Tok]) -> Result<(&[Tok], Option<&[Tok]>), PatternSyntaxError> {
    match after_dot.iter().position(|t| matches!(t, Tok::Exponent)) {
        Some(i) => Ok((&after_dot[..i], Some(&after_dot[i + 1..]))),
        None => Ok((after_dot, None)),
    }
}

fn compute_integer_grouping(integer_part: &[Tok]) -> GroupSizes {
    let mut first = None;
    let mut rest = None;
    let mut digits_since_comma = 0u32;
    for t in integer_part.iter().rev() {
        match t {
            Tok::Comma => {
                if first.is_none() {
                    first = Some(digits_since_comma);
                } else if rest.is_none() {
                    rest = Some(digits_since_comma);
                }
                digits_since_comma = 0;
            }
            _ => digits_since_comma += 1,
        }
    }
    match (first, rest) {
        (Some(f), Some(r)) => GroupSizes { first: f, rest: r },
        (Some(f), None) => GroupSizes { first: f, rest: f },
        _ => GroupSizes::default(),
    }
}

/// Reconstructs the literal rounding increment implied by `1..9` digits
/// anywhere in the integer or fractional part, e.g. `0.05` in `#,##0.05`.
fn extract_round_nearest(integer_part: &[Tok], fraction_part: &[Tok]) -> f64 {
    let has_nonzero = integer_part
        .iter()
        .chain(fraction_part.iter())
        .any(|t| matches!(t, Tok::DigitNonZero(_)));
    if !has_nonzero {
        return 0.0;
    }
    let mut s = String::new();
    for t in integer_part {
        match t {
            Tok::Digit0 | Tok::DigitHash => s.push('0'),
            Tok::DigitNonZero(n) => s.push((b'0' + n) as char),
            _ => {}
        }
    }
    if s.is_empty() {
        s.push('0');
    }
    if !fraction_part.is_empty() {
        s.push('.');
        for t in fraction_part {
            match t {
                Tok::Digit0 | Tok::DigitHash => s.push('0'),
                Tok::DigitNonZero(n) => s.push((b'0' + n) as char),
                _ => {}
            }
        }
    }
    s.parse().unwrap_or(0.0)
}

fn locate_pad(prefix: &[Tok], suffix: &[Tok]) -> (PadPosition, char) {
    if let Some(idx) = prefix.iter().position(|t| matches!(t, Tok::Pad(_))) {
        let ch = match prefix[idx] {
            Tok::Pad(c) => c,
            _ => unreachable!(),
        };
        let pos = if idx == 0 { PadPosition::BeforePrefix } else { PadPosition::AfterPrefix };
        return (pos, ch);
    }
    if let Some(idx) = suffix.iter().position(|t| matches!(t, Tok::Pad(_))) {
        let ch = match suffix[idx] {
            Tok::Pad(c) => c,
            _ => unreachable!(),
        };
        let pos = if idx == 0 { PadPosition::BeforeSuffix } else { PadPosition::AfterSuffix };
        return (pos, ch);
    }
    (PadPosition::default(), '*')
}

fn push_affix_ops(tokens: &[Tok], ops: &mut OpList) {
    let mut literal = String::new();
    macro_rules! flush {
        () => {
            if !literal.is_empty() {
                ops.push(Op::Literal(std::mem::take(&mut literal)));
            }
        };
    }
    for t in tokens {
        match t {
            Tok::Char(c) => literal.push(*c),
            Tok::PlusSign => {
                flush!();
                ops.push(Op::Plus);
            }
            Tok::MinusSign => {
                flush!();
                ops.push(Op::Minus);
            }
            Tok::Percent => {
                flush!();
                ops.push(Op::Percent);
            }
            Tok::PerMille => {
                flush!();
                ops.push(Op::Permille);
            }
            Tok::Currency(width) => {
                flush!();
                ops.push(Op::Currency(*width as u8));
            }
            Tok::Pad(_) => {
                flush!();
                ops.push(Op::Pad);
            }
            // Digits/grouping/exponent tokens never reach an affix region.
            _ => {}
        }
    }
    flush!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex_subpattern_for_tests;

    fn parse(s: &str) -> Subpattern {
        parse_subpattern(&lex_subpattern_for_tests(s).unwrap()).unwrap()
    }

    #[test]
    fn simple_grouping() {
        let sp = parse("#,##0.00");
        assert_eq!(sp.grouping.integer, GroupSizes { first: 3, rest: 3 });
        assert_eq!(sp.integer_digits, DigitRange { min: 1, max: 4 });
        assert_eq!(sp.fractional_digits, DigitRange { min: 2, max: 2 });
    }

    #[test]
    fn significant_digits() {
        let sp = parse("@@@##");
        assert_eq!(sp.significant_digits, DigitRange { min: 3, max: 5 });
    }

    #[test]
    fn percent_sets_multiplier() {
        let sp = parse("#,##0%");
        assert_eq!(sp.multiplier, 100);
        assert!(sp.ops.iter().any(|o| matches!(o, Op::Percent)));
    }

    #[test]
    fn scientific_exponent() {
        let sp = parse("0.000E+00");
        assert_eq!(sp.exponent_digits, 2);
        assert!(sp.exponent_sign);
    }

    #[test]
    fn nearest_increment() {
        let sp = parse("#,##0.05");
        assert!((sp.round_nearest - 0.05).abs() < 1e-9);
    }
}
