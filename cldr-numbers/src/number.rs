use std::str::FromStr;

use fixed_decimal::FixedDecimal;
use num_bigint::BigInt;

use crate::error::CldrNumberError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn of_f64(v: f64) -> Self {
        if v.is_sign_negative() {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }
}

/// An arbitrary-precision decimal: `{sign, coefficient, exponent}` per
/// `spec.md §3`, with `Nan`/`Infinity` as sentinel variants standing in for
/// a `Nan`/`+∞` coefficient. Backed by [`FixedDecimal`], the crate
/// `fluent-bundle::types::number` already relies on for digit-exact
/// rounding, padding and trimming of exactly this shape of value.
#[derive(Debug, Clone)]
pub enum Decimal {
    Finite(FixedDecimal),
    Nan,
    Infinity(Sign),
}

impl Decimal {
    pub fn zero() -> Self {
        Decimal::Finite(FixedDecimal::from(0u8))
    }

    pub fn from_decimal_str(s: &str) -> Result<Self, CldrNumberError> {
        match s {
            "NaN" | "nan" => Ok(Decimal::Nan),
            "Infinity" | "inf" | "+Infinity" => Ok(Decimal::Infinity(Sign::Positive)),
            "-Infinity" | "-inf" => Ok(Decimal::Infinity(Sign::Negative)),
            _ => {
                let fd = FixedDecimal::from_str(s).map_err(|_| CldrNumberError::ParseError {
                    input: s.to_string(),
                    kind: "decimal",
                })?;
                Ok(Decimal::Finite(fd))
            }
        }
    }

    pub fn is_special(&self) -> bool {
        !matches!(self, Decimal::Finite(_))
    }

    pub fn sign(&self) -> Sign {
        match self {
            Decimal::Finite(fd) => {
                if fd.to_string().starts_with('-') {
                    Sign::Negative
                } else {
                    Sign::Positive
                }
            }
            Decimal::Infinity(s) => *s,
            Decimal::Nan => Sign::Positive,
        }
    }

    /// Best-effort `f64` view, used for magnitude comparisons (RBNF rule
    /// selection, compact-format range selection, plural-category input)
    /// that don't need exact precision.
    pub fn to_f64_lossy(&self) -> f64 {
        match self {
            Decimal::Finite(fd) => fd.to_string().parse().unwrap_or(0.0),
            Decimal::Infinity(Sign::Positive) => f64::INFINITY,
            Decimal::Infinity(Sign::Negative) => f64::NEG_INFINITY,
            Decimal::Nan => f64::NAN,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Decimal::Finite(fd) if fd.to_string().trim_start_matches('-').chars().all(|c| c == '0' || c == '.'))
    }
}

/// `Integer` (arbitrary precision), `Float` (IEEE-754 double), or `Decimal`
/// per `spec.md §3`.
#[derive(Debug, Clone)]
pub enum Number {
    Integer(BigInt),
    Float(f64),
    Decimal(Decimal),
}

impl Number {
    pub fn sign(&self) -> Sign {
        match self {
            Number::Integer(i) => {
                if *i < BigInt::from(0) {
                    Sign::Negative
                } else {
                    Sign::Positive
                }
            }
            Number::Float(f) => Sign::of_f64(*f),
            Number::Decimal(d) => d.sign(),
        }
    }

    /// True for `0`, `-0`, `0.0`, `-0.0` alike — `sign()` alone can't tell a
    /// negative zero from a genuinely negative value, and callers choosing
    /// between positive/negative pattern affixes need to suppress the sign
    /// for zero regardless of which way it's signed (`spec.md §8`).
    pub fn is_zero(&self) -> bool {
        match self {
            Number::Integer(i) => *i == BigInt::from(0),
            Number::Float(f) => *f == 0.0,
            Number::Decimal(d) => d.is_zero(),
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Number::Float(f) if f.is_nan()) || matches!(self, Number::Decimal(Decimal::Nan))
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Number::Float(f) if f.is_infinite())
            || matches!(self, Number::Decimal(Decimal::Infinity(_)))
    }

    pub fn to_f64_lossy(&self) -> f64 {
        match self {
            Number::Integer(i) => i.to_string().parse().unwrap_or(0.0),
            Number::Float(f) => *f,
            Number::Decimal(d) => d.to_f64_lossy(),
        }
    }

    /// Converts to the internal `FixedDecimal` working representation the
    /// rest of the pipeline operates on, or `None` for NaN/Infinity (which
    /// skip rounding entirely per `spec.md §4.3`).
    pub fn to_working_decimal(&self) -> Option<FixedDecimal> {
        match self {
            Number::Integer(i) => FixedDecimal::from_str(&i.to_string()).ok(),
            Number::Float(f) => {
                if f.is_finite() {
                    FixedDecimal::from_str(&format!("{f}")).ok()
                } else {
                    None
                }
            }
            Number::Decimal(Decimal::Finite(fd)) => Some(fd.clone()),
            Number::Decimal(_) => None,
        }
    }

    pub fn is_integer_valued(&self) -> bool {
        match self {
            Number::Integer(_) => true,
            Number::Float(f) => f.is_finite() && f.fract() == 0.0,
            Number::Decimal(Decimal::Finite(fd)) => match fd.to_string().split_once('.') {
                Some((_, frac)) => frac.chars().all(|c| c == '0'),
                None => true,
            },
            Number::Decimal(_) => false,
        }
    }
}

macro_rules! from_int {
    ($($t:ty)+) => {
        $(impl From<$t> for Number {
            fn from(v: $t) -> Self {
                Number::Integer(BigInt::from(v))
            }
        })+
    };
}
from_int!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Number::Float(v)
    }
}

impl From<f32> for Number {
    fn from(v: f32) -> Self {
        Number::Float(v as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_zero_decimal_is_zero() {
        let d = Decimal::from_decimal_str("-0").unwrap();
        assert!(d.is_zero());
    }

    #[test]
    fn integer_sign() {
        assert_eq!(Number::from(-5i64).sign(), Sign::Negative);
        assert_eq!(Number::from(5u32).sign(), Sign::Positive);
    }

    #[test]
    fn float_to_working_decimal() {
        let n = Number::Float(124.56);
        let fd = n.to_working_decimal().unwrap();
        assert_eq!(fd.to_string(), "124.56");
    }
}
