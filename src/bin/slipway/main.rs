//! Slipway CLI - compile a project description into a ninja build script

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("slipway=debug")
    } else {
        EnvFilter::new("slipway=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let input = absolutize(&cli.input)?;
    let output = absolutize(&cli.output)?;
    let build_dir = absolutize(&cli.build_dir)?;
    let root = match &cli.root {
        Some(root) => absolutize(root)?,
        None => input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/")),
    };

    let program = std::env::current_exe().context("failed to locate the slipway executable")?;
    let regen = slipway::emit::Regeneration {
        command: regen_command(&program, &input, &output, &cli.profile, &build_dir, &root, cli.verbose),
        config_path: input.clone(),
        program_path: program,
        output_path: output.clone(),
    };

    let opts = slipway::GenerateOptions {
        input,
        output,
        profile: cli.profile,
        build_dir,
        root,
        regen: Some(regen),
    };

    slipway::generate(&opts)?;
    Ok(())
}

/// Resolve a possibly relative path against the current directory.
fn absolutize(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .with_context(|| format!("failed to resolve path: {}", path.display()))
}

/// The command line the regeneration edge re-runs to rebuild the script.
fn regen_command(
    program: &Path,
    input: &Path,
    output: &Path,
    profile: &str,
    build_dir: &Path,
    root: &Path,
    verbose: bool,
) -> String {
    let mut parts = vec![
        program.display().to_string(),
        "--input".to_string(),
        input.display().to_string(),
        "--output".to_string(),
        output.display().to_string(),
        "--profile".to_string(),
        profile.to_string(),
        "--build-dir".to_string(),
        build_dir.display().to_string(),
        "--root".to_string(),
        root.display().to_string(),
    ];
    if verbose {
        parts.push("--verbose".to_string());
    }
    parts.join(" ")
}
