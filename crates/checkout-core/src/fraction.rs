//! # Fraction Module
//!
//! Exact rational numbers for the fractional volume discount.
//!
//! A fraction like `"2/3"` is kept as a numerator/denominator pair in lowest
//! terms and only turns into cents at the final rounding step, so no
//! floating-point drift creeps into the charged amount.
//!
//! ## Accepted Notation
//! ```text
//! "2/3"   → 2/3
//! " 4/6 " → 2/3   (whitespace trimmed, reduced)
//! "0.75"  → 3/4
//! "1"     → 1/1
//! "-1/2"  → -1/2  (parses; range checks happen in the factory)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Why a string could not be read as a fraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FractionParseError {
    #[error("fraction is empty")]
    Empty,

    #[error("invalid fraction: '{0}'")]
    Invalid(String),

    #[error("fraction has a zero denominator")]
    ZeroDenominator,

    #[error("fraction is out of range")]
    OutOfRange,
}

/// An exact rational number `numerator / denominator`.
///
/// ## Invariants
/// - `denominator > 0`
/// - `gcd(|numerator|, denominator) == 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fraction {
    numerator: i64,
    denominator: i64,
}

impl Fraction {
    /// Creates a fraction, reducing it to lowest terms.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::fraction::Fraction;
    ///
    /// let f = Fraction::new(4, 6).unwrap();
    /// assert_eq!((f.numerator(), f.denominator()), (2, 3));
    /// assert!(Fraction::new(1, 0).is_err());
    /// ```
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, FractionParseError> {
        if denominator == 0 {
            return Err(FractionParseError::ZeroDenominator);
        }
        if numerator == i64::MIN || denominator == i64::MIN {
            return Err(FractionParseError::OutOfRange);
        }

        let sign = if denominator < 0 { -1 } else { 1 };
        let divisor = gcd(numerator.unsigned_abs(), denominator.unsigned_abs()).max(1) as i64;

        Ok(Fraction {
            numerator: sign * numerator / divisor,
            denominator: sign * denominator / divisor,
        })
    }

    #[inline]
    pub const fn numerator(&self) -> i64 {
        self.numerator
    }

    #[inline]
    pub const fn denominator(&self) -> i64 {
        self.denominator
    }

    /// True when `0 < self < 1`.
    pub const fn is_proper_positive(&self) -> bool {
        self.numerator > 0 && self.numerator < self.denominator
    }

    /// Multiplies a cent amount by this fraction and rounds to the nearest
    /// cent, halves rounding up (away from zero).
    ///
    /// ## Rounding
    /// ```text
    /// 5¢ × 1/2 = 2.5¢  → 3¢
    /// 3369¢ × 2/3      → 2246¢ (exact)
    /// 1123¢ × 2/3 = 748.67¢ → 749¢
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::fraction::Fraction;
    ///
    /// let half: Fraction = "1/2".parse().unwrap();
    /// assert_eq!(half.apply_rounded(5), 3);
    /// ```
    pub fn apply_rounded(&self, cents: i64) -> i64 {
        // i128 so cents × numerator cannot overflow
        let product = cents as i128 * self.numerator as i128;
        let denominator = self.denominator as i128;

        // round(p / d) = floor((2p + d) / 2d) for p >= 0
        let rounded = if product >= 0 {
            (product * 2 + denominator) / (denominator * 2)
        } else {
            -((-product * 2 + denominator) / (denominator * 2))
        };

        rounded.clamp(i64::MIN as i128, i64::MAX as i128) as i64
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Parses `"n/d"`, an integer, or a decimal like `"0.75"`.
fn parse_decimal(s: &str) -> Result<Fraction, FractionParseError> {
    let invalid = || FractionParseError::Invalid(s.to_string());

    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };

    let (negative, whole_digits) = match whole.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, whole.strip_prefix('+').unwrap_or(whole)),
    };

    if whole_digits.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
    if !all_digits(whole_digits) || !all_digits(frac) || frac.len() > 9 {
        return Err(invalid());
    }

    let whole_value: i64 = if whole_digits.is_empty() {
        0
    } else {
        whole_digits.parse().map_err(|_| invalid())?
    };
    let scale = 10_i64.pow(frac.len() as u32);
    let frac_value: i64 = if frac.is_empty() {
        0
    } else {
        frac.parse().map_err(|_| invalid())?
    };

    let magnitude = whole_value
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_value))
        .ok_or_else(invalid)?;

    Fraction::new(if negative { -magnitude } else { magnitude }, scale)
}

impl FromStr for Fraction {
    type Err = FractionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(FractionParseError::Empty);
        }

        match s.split_once('/') {
            Some((num, den)) => {
                let numerator: i64 = num
                    .parse()
                    .map_err(|_| FractionParseError::Invalid(s.to_string()))?;
                let denominator: i64 = den
                    .parse()
                    .map_err(|_| FractionParseError::Invalid(s.to_string()))?;
                Fraction::new(numerator, denominator)
            }
            None => parse_decimal(s),
        }
    }
}

impl TryFrom<String> for Fraction {
    type Error = FractionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Fraction> for String {
    fn from(value: Fraction) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slash_notation() {
        let f: Fraction = "2/3".parse().unwrap();
        assert_eq!((f.numerator(), f.denominator()), (2, 3));

        let f: Fraction = " 4/6 ".parse().unwrap();
        assert_eq!((f.numerator(), f.denominator()), (2, 3));
    }

    #[test]
    fn test_slash_form_is_strict() {
        for raw in ["4 / 6", "4 /6", "1.5/3", "1e-1", "2/3/4"] {
            assert!(
                matches!(raw.parse::<Fraction>(), Err(FractionParseError::Invalid(_))),
                "{raw:?} should not parse"
            );
        }
    }

    #[test]
    fn test_parse_decimal_and_integer() {
        let f: Fraction = "0.75".parse().unwrap();
        assert_eq!((f.numerator(), f.denominator()), (3, 4));

        let f: Fraction = ".5".parse().unwrap();
        assert_eq!((f.numerator(), f.denominator()), (1, 2));

        let f: Fraction = "1".parse().unwrap();
        assert_eq!((f.numerator(), f.denominator()), (1, 1));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("".parse::<Fraction>(), Err(FractionParseError::Empty));
        assert!(matches!(
            "invalid".parse::<Fraction>(),
            Err(FractionParseError::Invalid(_))
        ));
        assert!(matches!(
            "2/x".parse::<Fraction>(),
            Err(FractionParseError::Invalid(_))
        ));
        assert!(matches!(
            "1.2.3".parse::<Fraction>(),
            Err(FractionParseError::Invalid(_))
        ));
        assert_eq!(
            "1/0".parse::<Fraction>(),
            Err(FractionParseError::ZeroDenominator)
        );
    }

    #[test]
    fn test_negative_denominator_is_normalised() {
        let f = Fraction::new(1, -2).unwrap();
        assert_eq!((f.numerator(), f.denominator()), (-1, 2));
        assert!(!f.is_proper_positive());
    }

    #[test]
    fn test_proper_positive() {
        assert!("2/3".parse::<Fraction>().unwrap().is_proper_positive());
        assert!(!"1".parse::<Fraction>().unwrap().is_proper_positive());
        assert!(!"0/5".parse::<Fraction>().unwrap().is_proper_positive());
        assert!(!"3/2".parse::<Fraction>().unwrap().is_proper_positive());
    }

    #[test]
    fn test_apply_rounded_half_up() {
        let half: Fraction = "1/2".parse().unwrap();
        assert_eq!(half.apply_rounded(5), 3);
        assert_eq!(half.apply_rounded(3), 2);
        assert_eq!(half.apply_rounded(4), 2);

        let two_thirds: Fraction = "2/3".parse().unwrap();
        assert_eq!(two_thirds.apply_rounded(3369), 2246);
        assert_eq!(two_thirds.apply_rounded(1123), 749);
        assert_eq!(two_thirds.apply_rounded(1), 1);
    }

    #[test]
    fn test_display_round_trips_through_serde() {
        let f: Fraction = "6/9".parse().unwrap();
        assert_eq!(f.to_string(), "2/3");

        let json = serde_json::to_string(&f).unwrap();
        assert_eq!(json, "\"2/3\"");
        let back: Fraction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, f);
    }
}
