//! Slipway - a build-graph compiler.
//!
//! Slipway turns a declarative TOML project description (variables, build
//! profiles, concurrency pools, rules, and named binaries) into a concrete
//! ninja build script: per-file transformation edges, derived output paths,
//! dependency wiring, a default target, and a self-regenerating entry
//! point. It never runs compilers or schedules work itself; the emitted
//! script is handed to ninja verbatim.

pub mod config;
pub mod emit;
pub mod error;
pub mod graph;
pub mod ops;
pub mod util;

pub use config::Config;
pub use error::{Error, Result};
pub use graph::{BuildEdge, BuildGraph};
pub use ops::generate::{generate, GenerateOptions};
