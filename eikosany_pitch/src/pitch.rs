// The pitch value: one frequency ratio with descriptive text.
//
// A `PitchValue` is a frequency expressed as a multiple of an implicit root
// (1.0 = the root itself). Values built from a ratio keep their exact
// reduced fraction alongside the float, and arithmetic between two rational
// values stays exact — the float is always recomputed from the fraction, so
// recomputing an unchanged product reproduces the same bits. Values built
// from a raw frequency carry no fraction and fall back to float arithmetic.
//
// The pitch-space tag records how the value was conceived (a linear ratio
// vs a logarithmic cents offset); it affects description text and `.scl`
// formatting, not arithmetic.
//
// Pitch values are immutable by convention: every operation returns a new
// value and copies are deep clones.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::FREQUENCY_EPSILON;
use crate::fraction::Fraction;

/// Construction failures for pitch values and fractions. Detected at
/// construction and rejected immediately — a malformed pitch never enters a
/// collection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PitchError {
    /// A rational pitch was given a zero denominator.
    #[error("zero denominator in ratio {num}/0")]
    ZeroDenominator { num: i64 },

    /// A pitch frequency must be strictly positive.
    #[error("non-positive frequency {frequency}")]
    NonPositiveFrequency { frequency: f64 },
}

/// How a pitch value was conceived: as a linear frequency ratio or as a
/// logarithmic (cents) offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PitchSpace {
    /// A frequency multiple: 3/2, 1.5, etc.
    Linear,
    /// A logarithmic offset: 701.955 cents, etc.
    Logarithmic,
}

/// The default period (octave divisor): the 2/1 octave.
pub const DEFAULT_PERIOD: f64 = 2.0;

/// Serde mirror: deserialization re-validates the frequency invariant and
/// rebuilds the cached description, so a malformed snapshot cannot smuggle
/// an invalid pitch into a tree.
#[derive(Serialize, Deserialize)]
struct RawPitchValue {
    frequency: f64,
    ratio: Option<Fraction>,
    space: PitchSpace,
    period: f64,
    description: String,
}

/// A single pitch: frequency multiple of the root, optional exact rational
/// form, space tag, reduction period, and cached description text.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawPitchValue", into = "RawPitchValue")]
pub struct PitchValue {
    frequency: f64,
    ratio: Option<Fraction>,
    space: PitchSpace,
    period: f64,
    description: String,
}

impl PitchValue {
    /// Build a pitch from a ratio. Fails fast on a zero denominator or a
    /// non-positive value.
    pub fn from_ratio(num: i64, den: i64) -> Result<Self, PitchError> {
        let ratio = Fraction::new(num, den)?;
        let frequency = ratio.as_f64();
        if frequency <= 0.0 {
            return Err(PitchError::NonPositiveFrequency { frequency });
        }
        Ok(Self::assemble(frequency, Some(ratio), PitchSpace::Linear))
    }

    /// Build a pitch from a raw frequency multiple. Fails fast on a
    /// non-positive or non-finite value.
    pub fn from_frequency(frequency: f64, space: PitchSpace) -> Result<Self, PitchError> {
        if !(frequency > 0.0 && frequency.is_finite()) {
            return Err(PitchError::NonPositiveFrequency { frequency });
        }
        Ok(Self::assemble(frequency, None, space))
    }

    /// The unison, 1/1.
    pub fn unison() -> Self {
        Self::assemble(1.0, Some(Fraction::one()), PitchSpace::Linear)
    }

    fn assemble(frequency: f64, ratio: Option<Fraction>, space: PitchSpace) -> Self {
        let mut value = PitchValue {
            frequency,
            ratio,
            space,
            period: DEFAULT_PERIOD,
            description: String::new(),
        };
        value.refresh_description();
        value
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// The exact rational form, when one is known.
    pub fn ratio(&self) -> Option<Fraction> {
        self.ratio
    }

    pub fn space(&self) -> PitchSpace {
        self.space
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    /// The value as a logarithmic offset in cents above the root.
    pub fn cents(&self) -> f64 {
        1_200.0 * self.frequency.log2()
    }

    /// Cached description text: the reduced ratio for rational values,
    /// otherwise the frequency or cents figure per the space tag.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Product of two pitches. Exact when both carry a rational form and
    /// the product fits i64; the float is recomputed from the exact
    /// fraction so repeated evaluation is bit-identical. On rational
    /// overflow the exact form is dropped and the float product stands —
    /// the same representation a frequency-built pitch always has.
    pub fn multiply(&self, other: &PitchValue) -> PitchValue {
        if let (Some(a), Some(b)) = (self.ratio, other.ratio)
            && let Some(r) = a.checked_mul(b)
        {
            return Self::assemble(r.as_f64(), Some(r), PitchSpace::Linear);
        }
        Self::assemble(self.frequency * other.frequency, None, PitchSpace::Linear)
    }

    /// Quotient of two pitches. Exact when both carry a rational form and
    /// the quotient fits i64; float fallback otherwise.
    pub fn divide(&self, other: &PitchValue) -> PitchValue {
        if let (Some(a), Some(b)) = (self.ratio, other.ratio)
            && let Some(r) = a.checked_div(b)
        {
            return Self::assemble(r.as_f64(), Some(r), PitchSpace::Linear);
        }
        Self::assemble(self.frequency / other.frequency, None, PitchSpace::Linear)
    }

    /// Fold the value into the register `[period, period²)` by repeated
    /// multiplication/division by the period. Stays exact when the value is
    /// rational and the period is a whole number; otherwise folds the float
    /// and drops any exact form, since the fold no longer preserves it.
    pub fn octave_reduced(&self, period: f64) -> PitchValue {
        if !(period > 1.0 && period.is_finite()) {
            return self.clone();
        }
        let upper = period * period;
        let whole_period = (period.fract() == 0.0).then(|| period as i64);
        let exact = match (self.ratio, whole_period) {
            (Some(r), Some(p)) => fold_exact(r, period, p),
            _ => None,
        };
        let mut out = match exact {
            Some(r) => Self::assemble(r.as_f64(), Some(r), self.space),
            None => {
                let mut f = self.frequency;
                while f < period {
                    f *= period;
                }
                while f >= upper {
                    f /= period;
                }
                Self::assemble(f, None, self.space)
            }
        };
        out.period = period;
        out
    }

    /// Approximate-frequency equality within `FREQUENCY_EPSILON`.
    pub fn approx_eq(&self, other: &PitchValue) -> bool {
        (self.frequency - other.frequency).abs() < FREQUENCY_EPSILON
    }

    fn refresh_description(&mut self) {
        self.description = match (self.ratio, self.space) {
            (Some(r), _) => r.to_string(),
            (None, PitchSpace::Linear) => format!("{:.6}", self.frequency),
            (None, PitchSpace::Logarithmic) => format!("{:.3}c", self.cents()),
        };
    }
}

/// Exact octave fold into `[period, period²)`, or `None` when a step
/// overflows i64 — the caller then folds the float instead.
fn fold_exact(mut r: Fraction, period: f64, p: i64) -> Option<Fraction> {
    let step = Fraction::new(p, 1).ok()?;
    let upper = period * period;
    while r.as_f64() < period {
        r = r.checked_mul(step)?;
    }
    while r.as_f64() >= upper {
        r = r.checked_div(step)?;
    }
    Some(r)
}

impl TryFrom<RawPitchValue> for PitchValue {
    type Error = PitchError;

    fn try_from(raw: RawPitchValue) -> Result<Self, Self::Error> {
        if !(raw.frequency > 0.0 && raw.frequency.is_finite()) {
            return Err(PitchError::NonPositiveFrequency {
                frequency: raw.frequency,
            });
        }
        // Rebuild through assemble so the cached description always agrees
        // with the validated fields.
        let mut value = PitchValue::assemble(raw.frequency, raw.ratio, raw.space);
        value.period = raw.period;
        Ok(value)
    }
}

impl From<PitchValue> for RawPitchValue {
    fn from(value: PitchValue) -> Self {
        RawPitchValue {
            frequency: value.frequency,
            ratio: value.ratio,
            space: value.space,
            period: value.period,
            description: value.description,
        }
    }
}

/// Equality is approximate-frequency equality: two pitches closer than
/// `FREQUENCY_EPSILON` are the same pitch regardless of how they were built.
impl PartialEq for PitchValue {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other)
    }
}

impl fmt::Display for PitchValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_construction_reduces() {
        let p = PitchValue::from_ratio(6, 4).unwrap();
        assert_eq!(p.description(), "3/2");
        assert_eq!(p.frequency(), 1.5);
    }

    #[test]
    fn zero_denominator_fails_fast() {
        assert_eq!(
            PitchValue::from_ratio(3, 0),
            Err(PitchError::ZeroDenominator { num: 3 })
        );
    }

    #[test]
    fn non_positive_frequency_rejected() {
        assert!(PitchValue::from_frequency(0.0, PitchSpace::Linear).is_err());
        assert!(PitchValue::from_frequency(-1.5, PitchSpace::Linear).is_err());
        assert!(PitchValue::from_ratio(-3, 2).is_err());
    }

    #[test]
    fn multiply_is_exact_for_rationals() {
        let a = PitchValue::from_ratio(3, 1).unwrap();
        let b = PitchValue::from_ratio(5, 1).unwrap();
        let p = a.multiply(&b);
        assert_eq!(p.ratio(), Some(Fraction::new(15, 1).unwrap()));
        assert_eq!(p.frequency(), 15.0);
    }

    #[test]
    fn multiply_falls_back_to_float() {
        let a = PitchValue::from_frequency(1.25, PitchSpace::Linear).unwrap();
        let b = PitchValue::from_ratio(2, 1).unwrap();
        let p = a.multiply(&b);
        assert_eq!(p.ratio(), None);
        assert_eq!(p.frequency(), 2.5);
    }

    #[test]
    fn divide_recovers_factor() {
        let a = PitchValue::from_ratio(15, 1).unwrap();
        let b = PitchValue::from_ratio(5, 1).unwrap();
        assert_eq!(a.divide(&b), PitchValue::from_ratio(3, 1).unwrap());
    }

    #[test]
    fn octave_reduce_folds_into_period_register() {
        // Register is [period, period²): [2, 4) for the octave.
        let p = PitchValue::from_ratio(5, 1).unwrap().octave_reduced(2.0);
        assert_eq!(p.ratio(), Some(Fraction::new(5, 2).unwrap()));
        let p = PitchValue::from_ratio(1, 3).unwrap().octave_reduced(2.0);
        assert_eq!(p.ratio(), Some(Fraction::new(8, 3).unwrap()));
        // Already in register: unchanged.
        let p = PitchValue::from_ratio(3, 1).unwrap().octave_reduced(2.0);
        assert_eq!(p.ratio(), Some(Fraction::new(3, 1).unwrap()));
    }

    #[test]
    fn octave_reduce_float_path() {
        let p = PitchValue::from_frequency(10.0, PitchSpace::Linear)
            .unwrap()
            .octave_reduced(2.0);
        assert!(p.frequency() >= 2.0 && p.frequency() < 4.0);
        assert!((p.frequency() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn approximate_equality() {
        let a = PitchValue::from_ratio(3, 2).unwrap();
        let b = PitchValue::from_frequency(1.5 + 1.0e-9, PitchSpace::Linear).unwrap();
        assert_eq!(a, b);
        let c = PitchValue::from_ratio(5, 3).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn cents_of_the_fifth() {
        let fifth = PitchValue::from_ratio(3, 2).unwrap();
        assert!((fifth.cents() - 701.955).abs() < 1e-3);
    }

    #[test]
    fn multiply_overflow_drops_exact_form() {
        // Five schisma products still fit i64; the sixth does not. The
        // product must survive as a float, never panic or wrap.
        let schisma = PitchValue::from_ratio(32_805, 32_768).unwrap();
        let mut product = PitchValue::unison();
        for _ in 0..6 {
            product = product.multiply(&schisma);
        }
        assert_eq!(product.ratio(), None);
        let expected = (32_805.0f64 / 32_768.0).powi(6);
        assert!((product.frequency() - expected).abs() < 1.0e-12);
        assert!(product.frequency() > 1.0);
    }

    #[test]
    fn serde_roundtrip() {
        let p = PitchValue::from_ratio(7, 4).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        let back: PitchValue = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
        assert_eq!(back.description(), "7/4");
    }

    #[test]
    fn serde_rejects_invalid_frequency() {
        let json = r#"{"frequency":-1.5,"ratio":null,"space":"Linear","period":2.0,"description":"x"}"#;
        assert!(serde_json::from_str::<PitchValue>(json).is_err());
        let json = r#"{"frequency":0.0,"ratio":null,"space":"Linear","period":2.0,"description":"x"}"#;
        assert!(serde_json::from_str::<PitchValue>(json).is_err());
    }

    #[test]
    fn serde_rejects_zero_denominator_ratio() {
        // A malformed ratio inside a pitch is caught by the fraction's own
        // validated deserialization.
        let json = r#"{"frequency":1.5,"ratio":{"num":3,"den":0},"space":"Linear","period":2.0,"description":"x"}"#;
        assert!(serde_json::from_str::<PitchValue>(json).is_err());
    }
}
