//! Per-binary edge assembly and whole-graph construction.

use std::path::Path;

use crate::config::{Binary, Config};
use crate::error::Result;
use crate::graph::env::VarEnv;
use crate::graph::resolve::{resolve_spec, ResolvedSpec};
use crate::graph::{BinaryEdges, BuildGraph};

/// Assemble the complete build graph from a loaded configuration.
///
/// Binaries are processed in declaration order; the first one becomes the
/// default target (see [`BuildGraph::default_target`]).
pub fn assemble(
    config: &Config,
    env: &VarEnv,
    root: &Path,
    build_dir: &Path,
) -> Result<BuildGraph> {
    let mut binaries = Vec::with_capacity(config.binary.len());

    for (key, binary) in &config.binary {
        let name = env.expand(key)?;
        binaries.push(assemble_binary(&name, binary, config, env, root, build_dir)?);
    }

    Ok(BuildGraph { binaries })
}

/// Resolve one binary target into its edge set.
///
/// Direct and implicit dependency specs both produce direct build edges;
/// they differ only in which link-edge input list receives their outputs.
/// Intermediates become independent edges whose outputs are wired in as
/// implicit inputs on every direct edge of this binary, so that e.g. a
/// precompiled header exists before any source of the binary compiles.
fn assemble_binary(
    name: &str,
    binary: &Binary,
    config: &Config,
    env: &VarEnv,
    root: &Path,
    build_dir: &Path,
) -> Result<BinaryEdges> {
    let referenced_by = format!("binary `{name}`");
    config.require_rule(&binary.rule, &referenced_by)?;

    let mut deps = Vec::new();
    let mut implicit_deps = Vec::new();
    let mut edges = Vec::new();
    let mut intermediates = Vec::new();

    for spec in &binary.dependencies {
        match resolve_spec(spec, env, config, root, build_dir, &referenced_by)? {
            ResolvedSpec::Path(path) => deps.push(path),
            ResolvedSpec::Edge(edge) => {
                deps.push(edge.output.clone());
                edges.push(edge);
            }
        }
    }

    for spec in &binary.implicit_dependencies {
        match resolve_spec(spec, env, config, root, build_dir, &referenced_by)? {
            ResolvedSpec::Path(path) => implicit_deps.push(path),
            ResolvedSpec::Edge(edge) => {
                implicit_deps.push(edge.output.clone());
                edges.push(edge);
            }
        }
    }

    for spec in &binary.intermediates {
        match resolve_spec(spec, env, config, root, build_dir, &referenced_by)? {
            ResolvedSpec::Edge(edge) => intermediates.push(edge),
            ResolvedSpec::Path(path) => {
                // An intermediate without a rule builds nothing.
                tracing::debug!(
                    "ignoring rule-less intermediate `{}` of {referenced_by}",
                    path.display()
                );
            }
        }
    }

    let intermediate_outputs: Vec<_> = intermediates.iter().map(|e| e.output.clone()).collect();
    for edge in &mut edges {
        edge.implicit = intermediate_outputs.clone();
    }

    tracing::debug!(
        "assembled {referenced_by}: {} direct edges, {} intermediates, {} link inputs",
        edges.len(),
        intermediates.len(),
        deps.len()
    );

    Ok(BinaryEdges {
        name: name.to_string(),
        rule: binary.rule.clone(),
        deps,
        implicit_deps,
        edges,
        intermediates,
    })
}
