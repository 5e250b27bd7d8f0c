//! File-spec resolution: one configuration entry to one build edge.
//!
//! A spec with a rule becomes a `BuildEdge` whose output path is either the
//! explicit `out` template or the input's root-relative path mirrored under
//! the build directory with the classifier's suffix appended. A spec with
//! no rule resolves to a bare path.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::{Config, FileSpec};
use crate::error::Result;
use crate::graph::classify::classify;
use crate::graph::env::VarEnv;
use crate::graph::BuildEdge;

/// Outcome of resolving one file spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedSpec {
    /// Rule-less entry: a plain path contributed to a dependency list.
    Path(PathBuf),

    /// Entry with a rule: a full transformation edge.
    Edge(BuildEdge),
}

/// Resolve one file spec against the environment and the path layout.
///
/// `referenced_by` names the configuration entry for error messages.
pub fn resolve_spec(
    spec: &FileSpec,
    env: &VarEnv,
    config: &Config,
    root: &Path,
    build_dir: &Path,
    referenced_by: &str,
) -> Result<ResolvedSpec> {
    let input = PathBuf::from(env.expand(&spec.input)?);

    let Some(rule) = &spec.rule else {
        return Ok(ResolvedSpec::Path(input));
    };
    config.require_rule(rule, referenced_by)?;

    let relative = relative_to_root(&input, root);

    let output = match &spec.out {
        Some(template) => {
            let name = env.expand(template)?;
            let parent = relative.parent().unwrap_or_else(|| Path::new(""));
            build_dir.join(parent).join(name)
        }
        None => {
            let mirrored = build_dir.join(&relative);
            match classify(&mirrored) {
                Some(suffix) => append_suffix(mirrored, suffix),
                None => mirrored,
            }
        }
    };

    Ok(ResolvedSpec::Edge(BuildEdge {
        input,
        rule: rule.clone(),
        output,
        implicit: Vec::new(),
    }))
}

/// Compute the input's path relative to the build-tree root.
///
/// Inputs outside the root fall back to a `..`-relative path; inputs that
/// are already relative are taken as root-relative verbatim.
fn relative_to_root(input: &Path, root: &Path) -> PathBuf {
    if let Ok(stripped) = input.strip_prefix(root) {
        return stripped.to_path_buf();
    }
    pathdiff::diff_paths(input, root).unwrap_or_else(|| input.to_path_buf())
}

/// Append an output suffix to a path, keeping the original extension
/// (`main.cpp` becomes `main.cpp.o`, not `main.o`).
fn append_suffix(path: PathBuf, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.into_os_string();
    raw.push(suffix);
    PathBuf::from(raw)
}
