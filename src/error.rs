//! Fatal error taxonomy for a compilation run.
//!
//! Every error aborts the run before the build script is written; none are
//! retried. The CLI maps them to a non-zero exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Error raised while compiling a configuration into a build script.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load configuration from `{path}`: {message}")]
    ConfigurationParse { path: PathBuf, message: String },

    #[error("unknown rule `{rule}` referenced by `{referenced_by}`")]
    UnknownRule { rule: String, referenced_by: String },

    #[error("unknown profile `{profile}` (declared profiles: {})", .available.join(", "))]
    UnknownProfile {
        profile: String,
        available: Vec<String>,
    },

    #[error("cyclic variable reference involving: {}", .keys.join(", "))]
    CyclicVariableReference { keys: Vec<String> },

    #[error("failed to write build script to `{path}`")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
