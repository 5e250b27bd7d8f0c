//! Build-graph assembly.
//!
//! A `BuildGraph` is the fully resolved form of one configuration: every
//! transformation edge for every binary, in declaration order, ready for
//! serialization. It exists only for the duration of one compilation run
//! and is rebuilt from scratch on every invocation.

pub mod assemble;
pub mod classify;
pub mod env;
pub mod resolve;

use std::path::PathBuf;

/// One declared transformation from an input path to an output path via a
/// named rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEdge {
    /// Resolved input path.
    pub input: PathBuf,

    /// Name of the rule that transforms the input.
    pub rule: String,

    /// Computed output path.
    pub output: PathBuf,

    /// Implicit inputs that must exist before this edge runs.
    pub implicit: Vec<PathBuf>,
}

/// All edges computed for one binary target.
#[derive(Debug, Clone)]
pub struct BinaryEdges {
    /// Product name, post-substitution.
    pub name: String,

    /// Rule for the product's own link edge.
    pub rule: String,

    /// Direct inputs of the link edge: outputs of the direct edges plus any
    /// rule-less dependency paths.
    pub deps: Vec<PathBuf>,

    /// Implicit inputs of the link edge.
    pub implicit_deps: Vec<PathBuf>,

    /// Direct build edges. Each carries the binary's intermediate outputs
    /// as implicit inputs.
    pub edges: Vec<BuildEdge>,

    /// Intermediate edges, built before any direct edge of this binary.
    pub intermediates: Vec<BuildEdge>,
}

/// The complete build graph for one compilation run.
#[derive(Debug, Clone, Default)]
pub struct BuildGraph {
    /// Per-binary edge sets, in configuration declaration order.
    pub binaries: Vec<BinaryEdges>,
}

impl BuildGraph {
    /// The default target: the first binary declared, positionally.
    pub fn default_target(&self) -> Option<&str> {
        self.binaries.first().map(|b| b.name.as_str())
    }

    /// Every product name, in declaration order.
    pub fn binary_names(&self) -> impl Iterator<Item = &str> {
        self.binaries.iter().map(|b| b.name.as_str())
    }
}
