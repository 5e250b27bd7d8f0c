//! CLI definitions using clap.

use std::path::PathBuf;

use clap::Parser;

/// Slipway - compile a TOML project description into a ninja build script
#[derive(Parser)]
#[command(name = "slipway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the project configuration file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path the generated ninja script is written to
    #[arg(short, long)]
    pub output: PathBuf,

    /// Name of the build profile to apply
    #[arg(short, long)]
    pub profile: String,

    /// Directory that receives build outputs
    #[arg(short, long)]
    pub build_dir: PathBuf,

    /// Build-tree root (defaults to the configuration file's directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
