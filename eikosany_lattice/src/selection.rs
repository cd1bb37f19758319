// The selection index: a caller-held pointer into the lattice tree.
//
// Selection is not state threaded through the nodes. The tree stays pure —
// nodes know nothing about being selected — and the UI (or any other
// caller) holds a single `Selection` containing at most one `NodePath`.
// The "at most one node selected tree-wide" invariant therefore holds by
// construction: selecting a new path replaces the old one, there is nothing
// to clear recursively, and concurrent readers of the tree are undisturbed.
//
// A `NodePath` addresses a node relative to a genus: the row k, then a
// descent of (branch, removed-generator-index) steps. Paths are resolved
// against the tree by `EulerGenus::resolve`, which range-checks every step.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which child family a descent step enters: the CPS(n-1, k-1) family
/// (typeA) or the CPS(n-1, k) family (typeB).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    TypeA,
    TypeB,
}

/// One descent step: which family, and which removed-generator slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathStep {
    pub branch: Branch,
    pub index: usize,
}

/// An opaque id for one node in the tree under a genus.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodePath {
    row_k: usize,
    steps: Vec<PathStep>,
}

impl NodePath {
    /// A path to a genus row: the CPS(n, k) node itself.
    pub fn row(k: usize) -> Self {
        NodePath {
            row_k: k,
            steps: Vec::new(),
        }
    }

    /// Extend the path one level down.
    pub fn child(mut self, branch: Branch, index: usize) -> Self {
        self.steps.push(PathStep { branch, index });
        self
    }

    pub fn row_k(&self) -> usize {
        self.row_k
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k{}", self.row_k)?;
        for step in &self.steps {
            let tag = match step.branch {
                Branch::TypeA => 'a',
                Branch::TypeB => 'b',
            };
            write!(f, "/{}{}", tag, step.index)?;
        }
        Ok(())
    }
}

/// The single global selection: at most one path at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    current: Option<NodePath>,
}

impl Selection {
    pub fn new() -> Self {
        Selection { current: None }
    }

    /// Select one node, replacing any previous selection.
    pub fn select(&mut self, path: NodePath) {
        self.current = Some(path);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn selected(&self) -> Option<&NodePath> {
        self.current.as_ref()
    }

    pub fn is_selected(&self, path: &NodePath) -> bool {
        self.current.as_ref() == Some(path)
    }
}
