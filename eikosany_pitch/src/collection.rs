// Ordered pitch collections with pure transforms.
//
// A `PitchCollection` is the derived output of every lattice node: an
// ordered sequence of pitch values whose slot order is meaningful (it
// mirrors the lattice diagram), so transforms never mutate in place — each
// returns a new collection and the original keeps its order. The raw slot
// order is the source of truth; sorted/reduced/deduplicated views are
// derived from it, never the other way around.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::FREQUENCY_EPSILON;
use crate::pitch::PitchValue;

/// An ordered sequence of pitch values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PitchCollection {
    values: Vec<PitchValue>,
}

impl PitchCollection {
    pub fn new() -> Self {
        PitchCollection { values: Vec::new() }
    }

    pub fn push(&mut self, value: PitchValue) {
        self.values.push(value);
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn at(&self, index: usize) -> Option<&PitchValue> {
        self.values.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PitchValue> {
        self.values.iter()
    }

    pub fn values(&self) -> &[PitchValue] {
        &self.values
    }

    /// The product of every value in the collection, starting from the
    /// unison. Folds left in slot order so the result is deterministic.
    pub fn product(&self) -> PitchValue {
        self.values
            .iter()
            .fold(PitchValue::unison(), |acc, v| acc.multiply(v))
    }

    /// New collection sorted ascending by frequency. Total ordering via
    /// `f64::total_cmp`, so the result is deterministic even for equal
    /// frequencies (stable sort preserves slot order among ties).
    pub fn sorted(&self) -> Self {
        let mut values = self.values.clone();
        values.sort_by(|a, b| a.frequency().total_cmp(&b.frequency()));
        PitchCollection { values }
    }

    /// New collection with every value folded into `[period, period²)`.
    pub fn octave_reduced(&self, period: f64) -> Self {
        PitchCollection {
            values: self.values.iter().map(|v| v.octave_reduced(period)).collect(),
        }
    }

    /// New collection with near-equal frequencies collapsed; the first
    /// occurrence wins and slot order is otherwise preserved.
    pub fn uniquified(&self) -> Self {
        let mut values: Vec<PitchValue> = Vec::with_capacity(self.values.len());
        for v in &self.values {
            let seen = values
                .iter()
                .any(|kept| (kept.frequency() - v.frequency()).abs() < FREQUENCY_EPSILON);
            if !seen {
                values.push(v.clone());
            }
        }
        PitchCollection { values }
    }

    /// New collection keeping only values with an exact rational form whose
    /// reduced numerator and denominator fit the given bounds. Values with
    /// no rational form have no numerator to test and are dropped.
    pub fn harmonic_limited(&self, num_limit: i64, den_limit: i64) -> Self {
        PitchCollection {
            values: self
                .values
                .iter()
                .filter(|v| {
                    v.ratio()
                        .is_some_and(|r| r.numerator() <= num_limit && r.denominator() <= den_limit)
                })
                .cloned()
                .collect(),
        }
    }
}

impl From<Vec<PitchValue>> for PitchCollection {
    fn from(values: Vec<PitchValue>) -> Self {
        PitchCollection { values }
    }
}

impl FromIterator<PitchValue> for PitchCollection {
    fn from_iter<I: IntoIterator<Item = PitchValue>>(iter: I) -> Self {
        PitchCollection {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PitchCollection {
    type Item = &'a PitchValue;
    type IntoIter = std::slice::Iter<'a, PitchValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Space-separated descriptions, e.g. `3/1 5/1 7/1`.
impl fmt::Display for PitchCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(v.description())?;
        }
        Ok(())
    }
}
