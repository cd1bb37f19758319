// Error taxonomy for lattice construction and navigation.
//
// Two classes surface as values: configuration errors (a node asked to
// exist with an impossible shape — wrong generator arity, k outside [1, n])
// and range errors (an accessor asked for a row, child, or generator that
// is not there). Both reject the operation rather than produce a wrong
// lattice. Recomputation after a structurally valid edit never fails, so
// `update` only ever reports configuration misuse.
//
// Invariant violations (a derived collection whose size disagrees with
// C(n,k)) are programming errors, not values: `debug_assert!` in debug
// builds, defensive clamp in release. See `node.rs`.

use eikosany_pitch::PitchError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    /// A generator set must hold between 1 and 6 values.
    #[error("generator set size {n} outside [1, 6]")]
    GeneratorCount { n: usize },

    /// An update supplied a generator set of the wrong arity for this node.
    #[error("generator set has {actual} values, node requires {expected}")]
    GeneratorArity { expected: usize, actual: usize },

    /// Combination size k must satisfy 1 <= k <= n.
    #[error("combination size k={k} outside [1, {n}]")]
    CombinationSize { n: usize, k: usize },

    /// A genus row request outside k = 1..=n.
    #[error("row k={k} outside [1, {n}]")]
    RowOutOfRange { k: usize, n: usize },

    /// A child-index request beyond the allocated children.
    #[error("child index {index} out of range for {len} children")]
    ChildOutOfRange { index: usize, len: usize },

    /// A generator-index request beyond the set's arity.
    #[error("generator index {index} out of range for {len} generators")]
    GeneratorIndex { index: usize, len: usize },

    /// A pitch value failed to construct (zero denominator, non-positive
    /// frequency).
    #[error(transparent)]
    Pitch(#[from] PitchError),
}
