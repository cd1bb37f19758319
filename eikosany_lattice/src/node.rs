// The generic CPS(n,k) node.
//
// One `CpsNode` computes all C(n,k) products of k-element subsets of its
// n-element generator set, in the canonical slot order from `tables.rs`,
// and owns the two neighboring lower-level decompositions: for each of the
// n ways to remove one named generator, a typeA child CPS(n-1, k-1) and a
// typeB child CPS(n-1, k) over the reduced set. The typeA child carries the
// removed generator as an extra common tone, which makes the decomposition
// exact — the parent's C(n,k) products split into the C(n-1, k-1) subsets
// that contain the removed generator (typeA, with it factored out as the
// common tone) and the C(n-1, k) subsets that do not (typeB).
//
// Child allocation takes an explicit `depth` parameter: depth 0 builds a
// bare node, depth d builds d levels of children. This bounds combinatorial
// blow-up at n=6 to the levels a caller actually navigates.
//
// `update` is synchronous and leaves the whole reachable subtree consistent
// before returning: it stores the new generators, recomputes this node's
// derived collection, then updates every allocated child with the
// appropriately reduced subset (and, for typeA, the refreshed removed
// generator as common tone). Products are computed in fixed slot order with
// exact fraction arithmetic where possible, so slots whose subsets exclude
// an edited generator recompute to bit-identical values.

use serde::{Deserialize, Serialize};
use std::fmt;

use eikosany_pitch::{PitchCollection, PitchValue};

use crate::error::LatticeError;
use crate::generator::GeneratorSet;
use crate::selection::Branch;
use crate::tables;

/// Display/export configuration flags. These shape `scale()` and
/// `snapshot()`; the raw derived collection always keeps the canonical slot
/// order untouched.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Fold every scale value into the period register.
    pub octave_reduce: bool,
    /// Sort the scale ascending by frequency.
    pub sort: bool,
    /// Collapse near-equal frequencies in the scale.
    pub uniquify: bool,
    /// Notes-per-octave override: truncate the processed scale to this
    /// count. An override larger than the scale is a no-op.
    pub npo_override: Option<usize>,
    /// The period (octave divisor) used for reduction.
    pub period: f64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            octave_reduce: true,
            sort: true,
            uniquify: true,
            npo_override: None,
            period: 2.0,
        }
    }
}

/// One pitch in an exported snapshot: an exact ratio where one is known,
/// otherwise a cents figure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SnapshotPitch {
    Ratio { num: i64, den: i64 },
    Cents(f64),
}

impl SnapshotPitch {
    pub fn of(value: &PitchValue) -> Self {
        match value.ratio() {
            Some(r) => SnapshotPitch::Ratio {
                num: r.numerator(),
                den: r.denominator(),
            },
            None => SnapshotPitch::Cents(value.cents()),
        }
    }

    pub fn frequency(&self) -> f64 {
        match *self {
            SnapshotPitch::Ratio { num, den } => num as f64 / den as f64,
            SnapshotPitch::Cents(c) => (c / 1_200.0).exp2(),
        }
    }
}

/// A fully-formed, immutable export of one node's scale: the handoff unit
/// to an external Scala writer or a real-time reader. The core never
/// mutates a snapshot after publishing it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TuningSnapshot {
    /// Stable machine name, usable as an automation/export key.
    pub name: String,
    /// Human-readable description: generator values plus common tones.
    pub comment: String,
    /// The processed scale, in export order.
    pub pitches: Vec<SnapshotPitch>,
}

/// A combination-product-set lattice node for one (n, k) pair.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CpsNode {
    generators: GeneratorSet,
    k: usize,
    common_tones: PitchCollection,
    derived: PitchCollection,
    type_a: Vec<CpsNode>,
    type_b: Vec<CpsNode>,
    config: NodeConfig,
}

impl CpsNode {
    /// A bare node with no children.
    pub fn new(generators: GeneratorSet, k: usize) -> Result<Self, LatticeError> {
        Self::with_depth(generators, k, 0)
    }

    /// A node with `depth` levels of children pre-allocated.
    pub fn with_depth(
        generators: GeneratorSet,
        k: usize,
        depth: usize,
    ) -> Result<Self, LatticeError> {
        Self::build(generators, k, PitchCollection::new(), depth)
    }

    fn build(
        generators: GeneratorSet,
        k: usize,
        common_tones: PitchCollection,
        depth: usize,
    ) -> Result<Self, LatticeError> {
        let n = generators.len();
        if k < 1 || k > n {
            return Err(LatticeError::CombinationSize { n, k });
        }
        let mut node = CpsNode {
            generators,
            k,
            // Common tones are order-canonicalized so equal multisets give
            // identical nodes.
            common_tones: common_tones.sorted(),
            derived: PitchCollection::new(),
            type_a: Vec::new(),
            type_b: Vec::new(),
            config: NodeConfig::default(),
        };
        node.recompute();
        node.allocate_children(depth)?;
        Ok(node)
    }

    pub fn n(&self) -> usize {
        self.generators.len()
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn generators(&self) -> &GeneratorSet {
        &self.generators
    }

    pub fn common_tones(&self) -> &PitchCollection {
        &self.common_tones
    }

    /// The derived collection: slot i holds the product of the generators
    /// in the i-th canonical subset times the common-tone product.
    pub fn derived(&self) -> &PitchCollection {
        &self.derived
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Replace the display/export flags. The derived collection is
    /// unaffected; only `scale()` and `snapshot()` change.
    pub fn set_config(&mut self, config: NodeConfig) {
        self.config = config;
    }

    /// The typeA child family: CPS(n-1, k-1) per removed generator. Empty
    /// when k = 1, when k = n, or before allocation.
    pub fn type_a(&self) -> &[CpsNode] {
        &self.type_a
    }

    /// The typeB child family: CPS(n-1, k) per removed generator. Empty
    /// when k = n or before allocation.
    pub fn type_b(&self) -> &[CpsNode] {
        &self.type_b
    }

    pub fn child(&self, branch: Branch, index: usize) -> Result<&CpsNode, LatticeError> {
        let family = match branch {
            Branch::TypeA => &self.type_a,
            Branch::TypeB => &self.type_b,
        };
        family.get(index).ok_or(LatticeError::ChildOutOfRange {
            index,
            len: family.len(),
        })
    }

    /// Allocate children down to `depth` levels below this node. Levels
    /// that already exist are descended into rather than rebuilt, so this
    /// is safe to call repeatedly with growing depths.
    pub fn allocate_children(&mut self, depth: usize) -> Result<(), LatticeError> {
        let n = self.n();
        if depth == 0 || self.k == n {
            return Ok(());
        }
        if self.type_a.is_empty() && self.type_b.is_empty() {
            for i in 0..n {
                let reduced = self.generators.without(i);
                let Some(removed) = self.generators.at(i).cloned() else {
                    continue;
                };
                if self.k > 1 {
                    let mut tones = self.common_tones.clone();
                    tones.push(removed);
                    self.type_a
                        .push(Self::build(reduced.clone(), self.k - 1, tones, depth - 1)?);
                }
                self.type_b.push(Self::build(
                    reduced,
                    self.k,
                    self.common_tones.clone(),
                    depth - 1,
                )?);
            }
        } else {
            for child in self.type_a.iter_mut().chain(self.type_b.iter_mut()) {
                child.allocate_children(depth - 1)?;
            }
        }
        Ok(())
    }

    /// Apply a generator edit: store the new values, recompute this node's
    /// derived collection, and cascade synchronously through every
    /// allocated child. The subtree is fully consistent on return.
    pub fn update(&mut self, generators: GeneratorSet) -> Result<(), LatticeError> {
        let n = self.n();
        if generators.len() != n {
            return Err(LatticeError::GeneratorArity {
                expected: n,
                actual: generators.len(),
            });
        }
        self.generators = generators;
        self.recompute();
        for i in 0..n {
            let reduced = self.generators.without(i);
            if let Some(child) = self.type_a.get_mut(i) {
                let Some(removed) = self.generators.at(i).cloned() else {
                    continue;
                };
                let mut tones = self.common_tones.clone();
                tones.push(removed);
                child.set_common_tones(tones);
                child.update(reduced.clone())?;
            }
            if let Some(child) = self.type_b.get_mut(i) {
                child.update(reduced)?;
            }
        }
        Ok(())
    }

    fn set_common_tones(&mut self, tones: PitchCollection) {
        self.common_tones = tones.sorted();
    }

    fn recompute(&mut self) {
        let n = self.n();
        let Some(table) = tables::subset_table(n, self.k) else {
            // Unreachable: construction validated (n, k). Clamp to empty.
            debug_assert!(false, "no table for ({n}, {})", self.k);
            self.derived = PitchCollection::new();
            return;
        };
        let tone_product = self.common_tones.product();
        let mut derived = PitchCollection::new();
        for subset in table {
            let mut slot = tone_product.clone();
            for &gi in subset.iter() {
                if let Some(g) = self.generators.at(gi as usize) {
                    slot = slot.multiply(g);
                }
            }
            derived.push(slot);
        }
        debug_assert_eq!(derived.count(), tables::binomial(n, self.k));
        self.derived = derived;
    }

    /// The derived collection passed through the config pipeline:
    /// octave reduce, uniquify, sort, NPO truncation.
    pub fn scale(&self) -> PitchCollection {
        let mut scale = self.derived.clone();
        if self.config.octave_reduce {
            scale = scale.octave_reduced(self.config.period);
        }
        if self.config.uniquify {
            scale = scale.uniquified();
        }
        if self.config.sort {
            scale = scale.sorted();
        }
        if let Some(npo) = self.config.npo_override
            && npo < scale.count()
        {
            scale = scale.iter().take(npo).cloned().collect();
        }
        scale
    }

    /// Stable machine name, e.g. `cps-4-2`, with common tones suffixed as
    /// `-x<ratio>` (slashes flattened for key safety).
    pub fn name(&self) -> String {
        let mut name = format!("cps-{}-{}", self.n(), self.k);
        for tone in &self.common_tones {
            name.push_str("-x");
            name.push_str(&tone.description().replace('/', "_"));
        }
        name
    }

    /// Human-readable identity: kind, generator values, common tones.
    pub fn description(&self) -> String {
        let mut text = format!("CPS({},{}) {}", self.n(), self.k, self.generators);
        for tone in &self.common_tones {
            text.push_str(" x ");
            text.push_str(tone.description());
        }
        text
    }

    /// Publish an immutable export snapshot of the processed scale.
    pub fn snapshot(&self) -> TuningSnapshot {
        TuningSnapshot {
            name: self.name(),
            comment: self.description(),
            pitches: self.scale().iter().map(SnapshotPitch::of).collect(),
        }
    }
}

impl fmt::Display for CpsNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}
