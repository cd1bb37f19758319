// Eikosany Pitch Primitives
//
// The leaf crate of the Eikosany lattice generator: pitch values, pitch
// collections, and the reduced-fraction arithmetic that keeps generated
// ratios in lowest terms. Everything here is a pure value type — no lattice
// topology, no selection state, no I/O.
//
// Architecture:
// - fraction.rs: reduced i64 fraction (GCD-canonical, denominator > 0)
// - pitch.rs: PitchValue — a frequency ratio with an optional exact rational
//   form, a pitch-space tag (linear ratio vs logarithmic cents), and a
//   period used for octave reduction
// - collection.rs: PitchCollection — an ordered pitch sequence with pure
//   transforms (sort, octave-reduce, uniquify, harmonic-limit), each
//   returning a new collection
//
// **Critical constraint: determinism.** Pitch products feed lattice slots
// that downstream code compares bit-for-bit across recomputations. All
// arithmetic in this crate is exact where a rational form exists and uses a
// fixed operation order where it does not.

pub mod collection;
pub mod fraction;
pub mod pitch;

pub use collection::PitchCollection;
pub use fraction::Fraction;
pub use pitch::{PitchError, PitchSpace, PitchValue};

/// Two frequencies closer than this are considered the same pitch.
///
/// Used by approximate equality on `PitchValue` and by
/// `PitchCollection::uniquified`. Generator frequencies in practice are
/// small-integer ratios, so the nearest distinct pair is orders of magnitude
/// wider than this.
pub const FREQUENCY_EPSILON: f64 = 1.0e-6;
