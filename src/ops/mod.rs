//! High-level operations invoked by the CLI.

pub mod generate;
