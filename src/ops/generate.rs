//! The compile operation: configuration in, build script out.
//!
//! One linear pass: load the configuration, merge the variable environment,
//! assemble the graph, render the script, write it. Every failure surfaces
//! before the output file is touched.

use std::path::PathBuf;

use crate::config::Config;
use crate::emit::{self, Regeneration};
use crate::error::Result;
use crate::graph::assemble::assemble;
use crate::graph::env::VarEnv;

/// Invocation parameters of one compilation run.
///
/// All paths are taken as given; callers decide whether to absolutize them.
/// There is no implicit default profile. Verbosity is deliberately not a
/// field: the caller owns the tracing subscriber, so the CLI's `--verbose`
/// flag selects the debug filter that gates this op's environment and
/// graph dumps.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Path to the configuration document.
    pub input: PathBuf,

    /// Path the build script is written to.
    pub output: PathBuf,

    /// Name of the active profile.
    pub profile: String,

    /// Build-output directory that derived output paths are mirrored under.
    pub build_dir: PathBuf,

    /// Build-tree root that input paths are made relative to.
    pub root: PathBuf,

    /// Self-regeneration edge data; `None` omits the edge.
    pub regen: Option<Regeneration>,
}

/// Compile a configuration into a build script.
pub fn generate(opts: &GenerateOptions) -> Result<()> {
    let config = Config::load(&opts.input)?;
    let profile = config.require_profile(&opts.profile)?;

    let mut env = VarEnv::new(&opts.root, &opts.build_dir);
    env.layer(&config.variable);
    env.layer(&profile.variable);

    for (key, value) in env.iter() {
        tracing::debug!("variable {key} = {value}");
    }

    let graph = assemble(&config, &env, &opts.root, &opts.build_dir)?;
    let script = emit::render(&config, &env, &graph, opts.regen.as_ref())?;

    crate::util::fs::write_string(&opts.output, &script).map_err(|e| {
        crate::error::Error::OutputWrite {
            path: opts.output.clone(),
            source: e,
        }
    })?;

    tracing::info!(
        "wrote {} ({} binaries, profile `{}`)",
        opts.output.display(),
        graph.binaries.len(),
        opts.profile
    );
    Ok(())
}
