// Reduced fraction arithmetic.
//
// A small exact-rational type used wherever pitch ratios must stay in
// lowest terms: generator products, common-tone multiplication, and `.scl`
// formatting. The canonical form keeps the denominator strictly positive
// and the numerator/denominator coprime, so two fractions are equal exactly
// when their fields are equal and `Display` output is stable.
//
// Arithmetic is checked: chained products of ordinary microtonal ratios
// (six schisma-sized generators, say) exceed i64 well before they exceed
// f64, so `checked_mul`/`checked_div` return `None` on overflow and the
// caller drops to the float representation `PitchValue` already carries.
// Deserialization routes through `Fraction::new`, so a zero denominator
// can no more enter through serde than through construction.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pitch::PitchError;

/// Serde mirror: deserialization re-validates through `Fraction::new`.
#[derive(Serialize, Deserialize)]
struct RawFraction {
    num: i64,
    den: i64,
}

/// A fraction in canonical reduced form: `den > 0`, `gcd(|num|, den) == 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFraction", into = "RawFraction")]
pub struct Fraction {
    num: i64,
    den: i64,
}

impl Fraction {
    /// Build a fraction, rejecting a zero denominator and reducing to
    /// canonical form. The sign lives on the numerator.
    pub fn new(num: i64, den: i64) -> Result<Self, PitchError> {
        if den == 0 {
            return Err(PitchError::ZeroDenominator { num });
        }
        let sign = if (num < 0) != (den < 0) { -1 } else { 1 };
        let (num, den) = (num.abs(), den.abs());
        let g = gcd(num, den);
        Ok(Fraction {
            num: sign * num / g,
            den: den / g,
        })
    }

    /// The unison, 1/1.
    pub fn one() -> Self {
        Fraction { num: 1, den: 1 }
    }

    pub fn numerator(self) -> i64 {
        self.num
    }

    pub fn denominator(self) -> i64 {
        self.den
    }

    /// Exact product, reduced, or `None` when the result overflows i64.
    /// Cross-reduces before multiplying so only genuinely large results
    /// overflow.
    pub fn checked_mul(self, other: Fraction) -> Option<Fraction> {
        let g1 = gcd(self.num.abs(), other.den);
        let g2 = gcd(other.num.abs(), self.den);
        Some(Fraction {
            num: (self.num / g1).checked_mul(other.num / g2)?,
            den: (self.den / g2).checked_mul(other.den / g1)?,
        })
    }

    /// Exact quotient, reduced, or `None` on overflow.
    pub fn checked_div(self, other: Fraction) -> Option<Fraction> {
        // other is canonical, so other.num == 0 only for the zero fraction;
        // pitch ratios are never zero.
        let sign = if other.num < 0 { -1 } else { 1 };
        let flipped = Fraction {
            num: sign * other.den,
            den: other.num.abs(),
        };
        self.checked_mul(flipped)
    }

    /// True when the two fractions share no common factor across their
    /// numerators and denominators (their product is already reduced).
    pub fn is_coprime_to(self, other: Fraction) -> bool {
        gcd(self.num.abs(), other.den) == 1 && gcd(other.num.abs(), self.den) == 1
    }

    pub fn as_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl TryFrom<RawFraction> for Fraction {
    type Error = PitchError;

    fn try_from(raw: RawFraction) -> Result<Self, Self::Error> {
        Fraction::new(raw.num, raw.den)
    }
}

impl From<Fraction> for RawFraction {
    fn from(f: Fraction) -> Self {
        RawFraction {
            num: f.num,
            den: f.den,
        }
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// Euclid's algorithm on non-negative inputs. `gcd(0, 0)` is defined as 1
/// so reduction never divides by zero.
pub fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    if a == 0 { 1 } else { a }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduces_to_canonical_form() {
        let f = Fraction::new(6, 4).unwrap();
        assert_eq!(f.numerator(), 3);
        assert_eq!(f.denominator(), 2);
    }

    #[test]
    fn sign_lives_on_numerator() {
        let f = Fraction::new(3, -2).unwrap();
        assert_eq!(f.numerator(), -3);
        assert_eq!(f.denominator(), 2);
        let f = Fraction::new(-3, -2).unwrap();
        assert_eq!(f.numerator(), 3);
    }

    #[test]
    fn zero_denominator_rejected() {
        assert!(Fraction::new(5, 0).is_err());
    }

    #[test]
    fn mul_reduces() {
        let a = Fraction::new(3, 2).unwrap();
        let b = Fraction::new(4, 3).unwrap();
        assert_eq!(a.checked_mul(b), Some(Fraction::new(2, 1).unwrap()));
    }

    #[test]
    fn div_is_mul_by_reciprocal() {
        let a = Fraction::new(15, 1).unwrap();
        let b = Fraction::new(5, 1).unwrap();
        assert_eq!(a.checked_div(b), Some(Fraction::new(3, 1).unwrap()));
    }

    #[test]
    fn mul_overflow_is_none_not_wraparound() {
        // The schisma: numerator and denominator are coprime, so nothing
        // cross-cancels and the fifth power overflows i64.
        let schisma = Fraction::new(32_805, 32_768).unwrap();
        let mut product = Fraction::one();
        let mut steps = 0;
        while let Some(next) = product.checked_mul(schisma) {
            product = next;
            steps += 1;
            assert!(steps < 16, "expected overflow");
        }
        assert_eq!(steps, 4);
        assert!(product.numerator() > 0);
    }

    #[test]
    fn coprimality() {
        let a = Fraction::new(3, 2).unwrap();
        let b = Fraction::new(5, 7).unwrap();
        assert!(a.is_coprime_to(b));
        let c = Fraction::new(2, 5).unwrap();
        assert!(!a.is_coprime_to(c)); // 3/2 * 2/5 would cross-cancel
    }

    #[test]
    fn display_is_reduced() {
        assert_eq!(Fraction::new(10, 4).unwrap().to_string(), "5/2");
    }

    #[test]
    fn serde_roundtrip() {
        let f = Fraction::new(32_805, 32_768).unwrap();
        let json = serde_json::to_string(&f).unwrap();
        let back: Fraction = serde_json::from_str(&json).unwrap();
        assert_eq!(f, back);
    }

    #[test]
    fn serde_rejects_zero_denominator() {
        let result: Result<Fraction, _> = serde_json::from_str(r#"{"num":1,"den":0}"#);
        assert!(result.is_err());
        // Unreduced input is canonicalized, not rejected.
        let f: Fraction = serde_json::from_str(r#"{"num":6,"den":4}"#).unwrap();
        assert_eq!(f, Fraction::new(3, 2).unwrap());
    }
}
