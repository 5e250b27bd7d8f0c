//! Project configuration parsing and schema.
//!
//! The configuration is a TOML document with five top-level tables:
//! `[variable]`, `[profile.<name>]`, `[pool.<name>]`, `[rule.<name>]`, and
//! `[binary.<name>]`. Table order is semantic (the first binary declared is
//! the default target), so every table is an order-preserving map.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{Error, Result};

/// A configuration value written either as a string or as a list of strings.
///
/// Lists are normalized to a single whitespace-joined string at load time,
/// so `cflags = ["-g", "-Wall"]` and `cflags = "-g -Wall"` are equivalent.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum VarValue {
    Single(String),
    List(Vec<String>),
}

impl VarValue {
    /// Normalize to the flat string form.
    pub fn join(&self) -> String {
        match self {
            VarValue::Single(s) => s.clone(),
            VarValue::List(items) => items.join(" "),
        }
    }
}

/// A named variable-override set selected at invocation time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Profile {
    /// Variables layered over the global `[variable]` table.
    #[serde(default)]
    pub variable: IndexMap<String, VarValue>,
}

/// A concurrency-limiting bucket declared for the external build executor.
#[derive(Debug, Clone, Deserialize)]
pub struct Pool {
    /// Maximum number of edges in this pool the executor may run at once.
    pub depth: u32,
}

/// A transformation rule: a command template plus passthrough attributes.
#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    /// Command template, itself subject to variable substitution.
    pub command: String,

    /// Passthrough attributes (`depfile`, `deps`, `pool`, `generator`,
    /// `description`, ...) copied into the emitted rule after substitution.
    #[serde(flatten)]
    pub attrs: IndexMap<String, toml::Value>,
}

/// One declared dependency entry of a binary target.
#[derive(Debug, Clone, Deserialize)]
pub struct FileSpec {
    /// Input path template (may reference variables).
    #[serde(rename = "in")]
    pub input: String,

    /// Rule used to transform the input. Absent means the entry contributes
    /// a plain path (a pass-through dependency such as a prebuilt library).
    #[serde(default)]
    pub rule: Option<String>,

    /// Explicit output name template, overriding derived output naming.
    /// Resolved under the build directory joined with the input's relative
    /// parent; an override that expands to an absolute path is used
    /// verbatim instead.
    #[serde(default)]
    pub out: Option<String>,
}

/// A named build product.
#[derive(Debug, Clone, Deserialize)]
pub struct Binary {
    /// Rule for the product's own (link) edge.
    pub rule: String,

    /// Direct dependencies; their outputs feed the link edge's inputs.
    #[serde(default)]
    pub dependencies: Vec<FileSpec>,

    /// Implicit dependencies of the link edge.
    #[serde(default)]
    pub implicit_dependencies: Vec<FileSpec>,

    /// Intermediates built before any direct edge of this binary.
    #[serde(default)]
    pub intermediates: Vec<FileSpec>,
}

/// The root parsed configuration document. Immutable once loaded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub variable: IndexMap<String, VarValue>,

    #[serde(default)]
    pub profile: IndexMap<String, Profile>,

    #[serde(default)]
    pub pool: IndexMap<String, Pool>,

    #[serde(default)]
    pub rule: IndexMap<String, Rule>,

    #[serde(default)]
    pub binary: IndexMap<String, Binary>,
}

impl Config {
    /// Load and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::ConfigurationParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::parse(&text).map_err(|e| match e {
            Error::ConfigurationParse { message, .. } => Error::ConfigurationParse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Parse a configuration document from a string.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::ConfigurationParse {
            path: "<string>".into(),
            message: e.to_string(),
        })
    }

    /// Look up the active profile, failing fast when it is not declared.
    pub fn require_profile(&self, name: &str) -> Result<&Profile> {
        self.profile
            .get(name)
            .ok_or_else(|| Error::UnknownProfile {
                profile: name.to_string(),
                available: self.profile.keys().cloned().collect(),
            })
    }

    /// Look up a rule by name, recording who referenced it on failure.
    pub fn require_rule(&self, name: &str, referenced_by: &str) -> Result<&Rule> {
        self.rule.get(name).ok_or_else(|| Error::UnknownRule {
            rule: name.to_string(),
            referenced_by: referenced_by.to_string(),
        })
    }
}
