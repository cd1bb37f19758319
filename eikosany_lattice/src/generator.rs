// The generator set: the named master tuple a lattice is built from.
//
// A `GeneratorSet` holds 1 to 6 pitch values named A through F. The arity
// is fixed at construction; elements are mutable through `set`, which is
// how a generator edit enters the system (the owning node's `update` then
// cascades the change). `without` produces the reduced (n-1)-element set a
// child lattice is built over — the core move of the parent/child
// decomposition.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use eikosany_pitch::PitchValue;

use crate::error::LatticeError;

/// The most generators a lattice supports.
pub const MAX_GENERATORS: usize = 6;

/// Display names for generator slots, in order.
pub const GENERATOR_NAMES: [char; MAX_GENERATORS] = ['A', 'B', 'C', 'D', 'E', 'F'];

/// Serde mirror: deserialization re-validates the 1..=6 arity, so a
/// malformed snapshot cannot introduce a set no node could be built from.
#[derive(Serialize, Deserialize)]
struct RawGeneratorSet {
    values: Vec<PitchValue>,
}

/// An ordered tuple of 1..=6 named pitch values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeneratorSet", into = "RawGeneratorSet")]
pub struct GeneratorSet {
    values: SmallVec<[PitchValue; MAX_GENERATORS]>,
}

impl GeneratorSet {
    /// Fix the arity at construction; outside 1..=6 is rejected.
    pub fn new(values: Vec<PitchValue>) -> Result<Self, LatticeError> {
        let n = values.len();
        if n == 0 || n > MAX_GENERATORS {
            return Err(LatticeError::GeneratorCount { n });
        }
        Ok(GeneratorSet {
            values: SmallVec::from_vec(values),
        })
    }

    /// Convenience constructor from `(numerator, denominator)` pairs.
    pub fn from_ratios(pairs: &[(i64, i64)]) -> Result<Self, LatticeError> {
        let values = pairs
            .iter()
            .map(|&(num, den)| PitchValue::from_ratio(num, den))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn at(&self, index: usize) -> Option<&PitchValue> {
        self.values.get(index)
    }

    pub fn values(&self) -> &[PitchValue] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PitchValue> {
        self.values.iter()
    }

    /// Replace one generator value. The arity never changes.
    pub fn set(&mut self, index: usize, value: PitchValue) -> Result<(), LatticeError> {
        let len = self.values.len();
        match self.values.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(LatticeError::GeneratorIndex { index, len }),
        }
    }

    /// The reduced set with the generator at `index` removed. Asking to
    /// remove a generator that is not there is a caller bug: the result
    /// would have the wrong arity for any child built from it. Asserts in
    /// debug builds; release clamps to an unchanged clone.
    pub fn without(&self, index: usize) -> GeneratorSet {
        debug_assert!(
            index < self.values.len(),
            "generator index {index} out of range for {} generators",
            self.values.len()
        );
        let values = self
            .values
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, v)| v.clone())
            .collect();
        GeneratorSet { values }
    }

    /// The display name of a generator slot: A..F.
    pub fn name(index: usize) -> char {
        GENERATOR_NAMES.get(index).copied().unwrap_or('?')
    }
}

impl TryFrom<RawGeneratorSet> for GeneratorSet {
    type Error = LatticeError;

    fn try_from(raw: RawGeneratorSet) -> Result<Self, Self::Error> {
        GeneratorSet::new(raw.values)
    }
}

impl From<GeneratorSet> for RawGeneratorSet {
    fn from(set: GeneratorSet) -> Self {
        RawGeneratorSet {
            values: set.values.into_vec(),
        }
    }
}

/// Named values, e.g. `A=3/1 B=5/1 C=7/1`.
impl fmt::Display for GeneratorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", Self::name(i), v.description())?;
        }
        Ok(())
    }
}
