use fixed_decimal::FixedDecimal;

use crate::number::Sign;

/// Output of the Digit Decomposer, `spec.md §4.2`: a sign plus most-significant-first
/// digit sequences for the integer part, the fraction part, and (when the
/// caller has already performed scientific-notation magnitude shifting) the
/// exponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposed {
    pub sign: Sign,
    pub integer_digits: Vec<u8>,
    pub fraction_digits: Vec<u8>,
    pub exp_sign: Sign,
    pub exp_digits: Vec<u8>,
}

/// Splits `fd` (already rounded and, for scientific mode, already shifted by
/// the caller) into its component digit sequences. `exponent` is `0` outside
/// scientific mode.
pub fn decompose(fd: &FixedDecimal, exponent: i32) -> Decomposed {
    let text = fd.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (Sign::Negative, rest),
        None => (Sign::Positive, text.as_str()),
    };

    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, f),
        None => (unsigned, ""),
    };

    let integer_digits = digits_of(int_part);
    let fraction_digits = digits_of(frac_part);

    let exp_sign = if exponent < 0 { Sign::Negative } else { Sign::Positive };
    let exp_digits = digits_of(&exponent.unsigned_abs().to_string());

    Decomposed {
        sign,
        integer_digits: if integer_digits.is_empty() { vec![0] } else { integer_digits },
        fraction_digits,
        exp_sign,
        exp_digits: if exp_digits.is_empty() { vec![0] } else { exp_digits },
    }
}

fn digits_of(s: &str) -> Vec<u8> {
    s.chars().filter_map(|c| c.to_digit(10)).map(|d| d as u8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn splits_integer_and_fraction() {
        let fd = FixedDecimal::from_str("-124.56").unwrap();
        let d = decompose(&fd, 0);
        assert_eq!(d.sign, Sign::Negative);
        assert_eq!(d.integer_digits, vec![1, 2, 4]);
        assert_eq!(d.fraction_digits, vec![5, 6]);
    }

    #[test]
    fn scientific_exponent_is_carried_separately() {
        let fd = FixedDecimal::from_str("1.2456").unwrap();
        let d = decompose(&fd, 2);
        assert_eq!(d.exp_sign, Sign::Positive);
        assert_eq!(d.exp_digits, vec![2]);
    }

    #[test]
    fn whole_number_has_empty_fraction() {
        let fd = FixedDecimal::from_str("42").unwrap();
        let d = decompose(&fd, 0);
        assert_eq!(d.integer_digits, vec![4, 2]);
        assert!(d.fraction_digits.is_empty());
    }
}
