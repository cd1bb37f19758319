// Eikosany Lattice Generator
//
// The combination-product-set (CPS) / Euler-genus core: given an ordered
// set of 1-6 generator pitches, build every lattice of k-element product
// combinations and the parent/child decomposition between lattices — the
// family of derived scales from Erv Wilson's "Pascal's Triangle of
// Combination Set Lattices".
//
// Architecture:
// - generator.rs: GeneratorSet — the named master tuple (A..F) an edit
//   enters through
// - tables.rs: canonical subset-to-slot order per (n,k), literal reference
//   data transcribed from the published lattice diagrams
// - node.rs: CpsNode — one generic, (n,k)-parametrized generator with
//   typeA/typeB child families, synchronous update cascade, config flags,
//   and the TuningSnapshot export hook
// - genus.rs: EulerGenus — the full row family CPS(n,1)..CPS(n,n) over one
//   generator set, with path resolution and table-driven default row
// - selection.rs: the caller-held selection index (NodePath + Selection);
//   the tree itself carries no selection state
// - error.rs: configuration/range error taxonomy
//
// Everything is single-threaded and synchronous: `update` and child
// allocation run to completion on the calling thread and leave the whole
// reachable subtree consistent before returning. The crate does no I/O and
// holds no locks; real-time handoff happens via the immutable
// `TuningSnapshot` a caller publishes after an update.

pub mod error;
pub mod generator;
pub mod genus;
pub mod node;
pub mod selection;
pub mod tables;

pub use error::LatticeError;
pub use generator::{GENERATOR_NAMES, GeneratorSet, MAX_GENERATORS};
pub use genus::EulerGenus;
pub use node::{CpsNode, NodeConfig, SnapshotPitch, TuningSnapshot};
pub use selection::{Branch, NodePath, PathStep, Selection};
