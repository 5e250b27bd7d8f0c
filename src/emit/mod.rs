//! Build-script serialization.
//!
//! Renders the assembled graph in a fixed order: pools, rules, intermediate
//! edges, direct edges, link edges, the default target, a phony `all`
//! aggregate, and finally the self-regeneration edge. The whole script is
//! rendered to a buffer; callers write it to disk in one step so a fatal
//! error never leaves a half-written script behind.

pub mod ninja;

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;
use crate::graph::env::VarEnv;
use crate::graph::BuildGraph;
use ninja::NinjaWriter;

/// Inputs of the self-regeneration edge.
///
/// The command re-invokes the compiler with the same arguments; the edge
/// rebuilds the script whenever the configuration file or the compiler
/// executable changes. The `generator` attribute tells the executor this is
/// not an ordinary build step.
#[derive(Debug, Clone)]
pub struct Regeneration {
    /// Equivalent command line for re-running the compiler.
    pub command: String,

    /// The configuration file the script was compiled from.
    pub config_path: PathBuf,

    /// The compiler executable itself.
    pub program_path: PathBuf,

    /// The emitted script, i.e. the regeneration edge's output.
    pub output_path: PathBuf,
}

/// Render the complete build script.
pub fn render(
    config: &Config,
    env: &VarEnv,
    graph: &BuildGraph,
    regen: Option<&Regeneration>,
) -> Result<String> {
    let mut nw = NinjaWriter::new();
    nw.comment("generated by slipway; edit the project configuration instead");

    for (name, pool) in &config.pool {
        nw.pool(name, pool.depth);
    }

    for (name, rule) in &config.rule {
        let command = env.expand(&rule.command)?;
        let mut attrs = Vec::with_capacity(rule.attrs.len());
        for (key, value) in &rule.attrs {
            if let Some(rendered) = attr_value(env, value)? {
                attrs.push((key.clone(), rendered));
            }
        }
        nw.rule(
            name,
            &command,
            attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        );
    }

    for binary in &graph.binaries {
        for edge in &binary.intermediates {
            nw.build(&path_str(&edge.output), &edge.rule, &[path_str(&edge.input)], &[]);
        }
    }

    for binary in &graph.binaries {
        for edge in &binary.edges {
            let implicit: Vec<String> = edge.implicit.iter().map(|p| path_str(p)).collect();
            nw.build(
                &path_str(&edge.output),
                &edge.rule,
                &[path_str(&edge.input)],
                &implicit,
            );
        }
    }

    for binary in &graph.binaries {
        let inputs: Vec<String> = binary.deps.iter().map(|p| path_str(p)).collect();
        let implicit: Vec<String> = binary.implicit_deps.iter().map(|p| path_str(p)).collect();
        nw.build(&binary.name, &binary.rule, &inputs, &implicit);
    }

    if let Some(default) = graph.default_target() {
        nw.default(default);
    }

    let names: Vec<String> = graph.binary_names().map(String::from).collect();
    nw.build("all", "phony", &names, &[]);

    if let Some(regen) = regen {
        nw.rule("regen_ninja", &regen.command, [("generator", "1")]);
        nw.build(
            &path_str(&regen.output_path),
            "regen_ninja",
            &[path_str(&regen.config_path)],
            &[path_str(&regen.program_path)],
        );
    }

    Ok(nw.into_string())
}

/// Render one rule attribute. Strings are substituted; `true` becomes the
/// `1` ninja expects; `false` omits the attribute entirely.
fn attr_value(env: &VarEnv, value: &toml::Value) -> Result<Option<String>> {
    match value {
        toml::Value::String(s) => env.expand(s).map(Some),
        toml::Value::Boolean(true) => Ok(Some("1".to_string())),
        toml::Value::Boolean(false) => Ok(None),
        toml::Value::Integer(i) => Ok(Some(i.to_string())),
        other => Ok(Some(other.to_string())),
    }
}

fn path_str(path: &Path) -> String {
    path.display().to_string()
}
