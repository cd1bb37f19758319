// The Euler genus: the full row family CPS(n,1)..CPS(n,n).
//
// An `EulerGenus` owns one CPS node per combination size k over a single
// shared generator set — the complete "Pascal's triangle row" for that set.
// A generator edit enters here and forwards to every row; each row then
// cascades through its own allocated subtree.
//
// Every genus has a table-driven default row of particular musical
// significance (the hexany row at n=4, the 2-out-of-5 dekany at n=5, the
// eikosany row at n=6); callers seed their `Selection` from
// `default_selection()`. Paths are resolved against the tree with
// `resolve`, which range-checks the row and every descent step.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LatticeError;
use crate::generator::GeneratorSet;
use crate::node::CpsNode;
use crate::selection::NodePath;

/// Default row k per generator count n = 1..6. Not the middle index: the
/// musically significant row for each n.
const DEFAULT_ROW_K: [usize; 6] = [1, 1, 2, 2, 2, 3];

/// The family {CPS(n,1), ..., CPS(n,n)} over one generator set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EulerGenus {
    generators: GeneratorSet,
    rows: Vec<CpsNode>,
}

impl EulerGenus {
    /// Build the genus with bare rows (no children allocated).
    pub fn new(generators: GeneratorSet) -> Result<Self, LatticeError> {
        Self::with_depth(generators, 0)
    }

    /// Build the genus with `depth` levels of children under every row.
    pub fn with_depth(generators: GeneratorSet, depth: usize) -> Result<Self, LatticeError> {
        let n = generators.len();
        let rows = (1..=n)
            .map(|k| CpsNode::with_depth(generators.clone(), k, depth))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(EulerGenus { generators, rows })
    }

    pub fn n(&self) -> usize {
        self.generators.len()
    }

    pub fn generators(&self) -> &GeneratorSet {
        &self.generators
    }

    pub fn rows(&self) -> &[CpsNode] {
        &self.rows
    }

    /// The CPS(n, k) row, k in 1..=n.
    pub fn row(&self, k: usize) -> Result<&CpsNode, LatticeError> {
        if k < 1 || k > self.n() {
            return Err(LatticeError::RowOutOfRange { k, n: self.n() });
        }
        Ok(&self.rows[k - 1])
    }

    /// Mutable row access, for per-row configuration and child allocation.
    pub fn row_mut(&mut self, k: usize) -> Result<&mut CpsNode, LatticeError> {
        let n = self.n();
        if k < 1 || k > n {
            return Err(LatticeError::RowOutOfRange { k, n });
        }
        Ok(&mut self.rows[k - 1])
    }

    /// Forward a generator edit to every row. Each row cascades through its
    /// allocated subtree before this returns.
    pub fn update(&mut self, generators: GeneratorSet) -> Result<(), LatticeError> {
        let n = self.n();
        if generators.len() != n {
            return Err(LatticeError::GeneratorArity {
                expected: n,
                actual: generators.len(),
            });
        }
        self.generators = generators;
        for row in &mut self.rows {
            row.update(self.generators.clone())?;
        }
        Ok(())
    }

    /// The musically significant default row for this n.
    pub fn default_row_k(&self) -> usize {
        DEFAULT_ROW_K[self.n() - 1]
    }

    pub fn default_row(&self) -> &CpsNode {
        &self.rows[self.default_row_k() - 1]
    }

    /// The path callers seed a fresh `Selection` with.
    pub fn default_selection(&self) -> NodePath {
        NodePath::row(self.default_row_k())
    }

    /// Resolve a path to the node it addresses, range-checking every step.
    pub fn resolve(&self, path: &NodePath) -> Result<&CpsNode, LatticeError> {
        let mut node = self.row(path.row_k())?;
        for step in path.steps() {
            node = node.child(step.branch, step.index)?;
        }
        Ok(node)
    }

    /// Stable machine name, e.g. `euler-genus-4`.
    pub fn name(&self) -> String {
        format!("euler-genus-{}", self.n())
    }

    pub fn description(&self) -> String {
        format!("EulerGenus({}) {}", self.n(), self.generators)
    }
}

impl fmt::Display for EulerGenus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}
