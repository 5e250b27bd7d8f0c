//! CLI integration tests for Slipway.
//!
//! These tests run the binary against small projects in temporary
//! directories and inspect the emitted ninja script.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the slipway binary command.
fn slipway() -> Command {
    Command::cargo_bin("slipway").unwrap()
}

/// Write a project configuration and return (project dir, config path).
fn project(config: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("project.toml");
    fs::write(&path, config).unwrap();
    (tmp, path)
}

const BASIC_PROJECT: &str = r#"
[variable]
warnings = "-Wall -Wextra"

[profile.debug.variable]
cflags = ["-g", "{warnings}"]

[profile.optimized.variable]
cflags = ["-O2", "{warnings}"]

[pool.heavy_link]
depth = 1

[rule.cxx]
command = "g++ {cflags} -MD -MF {out}.d -c -o {out} {in}"
depfile = "{out}.d"
deps = "gcc"

[rule.ld]
command = "g++ -o {out} {in}"
pool = "heavy_link"

[binary.app]
rule = "ld"
dependencies = [
    { in = "{root}/src/main.cpp", rule = "cxx" },
    { in = "{root}/src/util.cpp", rule = "cxx" },
]
intermediates = [{ in = "{root}/src/pch.hpp", rule = "cxx" }]

[binary.tool]
rule = "ld"
dependencies = [{ in = "{root}/src/tool.cpp", rule = "cxx" }]
"#;

fn generate(config_path: &Path, dir: &TempDir, profile: &str) -> PathBuf {
    let output = dir.path().join("build.ninja");
    slipway()
        .args([
            "--input",
            config_path.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--profile",
            profile,
            "--build-dir",
            dir.path().join("build").to_str().unwrap(),
        ])
        .assert()
        .success();
    output
}

// ============================================================================
// successful generation
// ============================================================================

#[test]
fn test_generates_complete_script() {
    let (tmp, config) = project(BASIC_PROJECT);
    let output = generate(&config, &tmp, "debug");

    let script = fs::read_to_string(output).unwrap();
    let build = tmp.path().join("build");

    // Pools and substituted rules.
    assert!(script.contains("pool heavy_link\n  depth = 1"));
    assert!(script.contains("command = g++ -g -Wall -Wextra -MD -MF $out.d -c -o $out $in"));
    assert!(script.contains("  depfile = $out.d"));
    assert!(script.contains("  pool = heavy_link"));

    // Derived outputs mirror the source tree under the build directory, and
    // the precompiled header is implicit on app's compiles only.
    let pch = format!("{}/src/pch.hpp.gch", build.display());
    assert!(script.contains(&format!(
        "build {}/src/main.cpp.o: cxx {}/src/main.cpp | {pch}",
        build.display(),
        tmp.path().display()
    )));
    assert!(script.contains(&format!(
        "build {}/src/tool.cpp.o: cxx {}/src/tool.cpp\n",
        build.display(),
        tmp.path().display()
    )));

    // Link edges, default target, aggregate.
    assert!(script.contains(&format!(
        "build app: ld {b}/src/main.cpp.o {b}/src/util.cpp.o\n",
        b = build.display()
    )));
    assert!(script.contains("default app\n"));
    assert!(script.contains("build all: phony app tool\n"));
}

#[test]
fn test_profile_selects_variable_overrides() {
    let (tmp, config) = project(BASIC_PROJECT);
    let output = generate(&config, &tmp, "optimized");

    let script = fs::read_to_string(output).unwrap();
    assert!(script.contains("command = g++ -O2 -Wall -Wextra"));
    assert!(!script.contains("g++ -g"));
}

#[test]
fn test_regeneration_edge_points_back_at_the_compiler() {
    let (tmp, config) = project(BASIC_PROJECT);
    let output = generate(&config, &tmp, "debug");

    let script = fs::read_to_string(&output).unwrap();
    assert!(script.contains("rule regen_ninja"));
    assert!(script.contains("  generator = 1"));
    assert!(script.contains(&format!(
        "build {}: regen_ninja {}",
        output.display(),
        config.display()
    )));
    // The regen command re-invokes with the same arguments.
    assert!(script.contains("--profile debug"));
}

// ============================================================================
// fatal errors
// ============================================================================

#[test]
fn test_unknown_profile_fails_fast() {
    let (tmp, config) = project(BASIC_PROJECT);
    let output = tmp.path().join("build.ninja");

    slipway()
        .args([
            "--input",
            config.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--profile",
            "release",
            "--build-dir",
            tmp.path().join("build").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown profile `release`"))
        .stderr(predicate::str::contains("debug, optimized"));

    assert!(!output.exists());
}

#[test]
fn test_unknown_rule_fails_before_writing() {
    let (tmp, config) = project(
        r#"
        [profile.debug.variable]

        [rule.ld]
        command = "g++ -o {out} {in}"

        [binary.app]
        rule = "ld"
        dependencies = [{ in = "src/main.cpp", rule = "missing_rule" }]
        "#,
    );
    let output = tmp.path().join("build.ninja");

    slipway()
        .args([
            "--input",
            config.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--profile",
            "debug",
            "--build-dir",
            tmp.path().join("build").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown rule `missing_rule`"))
        .stderr(predicate::str::contains("binary `app`"));

    assert!(!output.exists());
}

#[test]
fn test_cyclic_variables_are_reported_not_looped() {
    let (tmp, config) = project(
        r#"
        [variable]
        a = "{b}"
        b = "{a}"

        [profile.debug.variable]

        [rule.cxx]
        command = "g++ {a} -c -o {out} {in}"

        [binary.app]
        rule = "cxx"
        dependencies = [{ in = "src/main.cpp", rule = "cxx" }]
        "#,
    );

    slipway()
        .args([
            "--input",
            config.to_str().unwrap(),
            "--output",
            tmp.path().join("build.ninja").to_str().unwrap(),
            "--profile",
            "debug",
            "--build-dir",
            tmp.path().join("build").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cyclic variable reference"));
}

#[test]
fn test_malformed_configuration_fails() {
    let (tmp, config) = project("[pool.link]\ndepth = \"not a number\"\n");

    slipway()
        .args([
            "--input",
            config.to_str().unwrap(),
            "--output",
            tmp.path().join("build.ninja").to_str().unwrap(),
            "--profile",
            "debug",
            "--build-dir",
            tmp.path().join("build").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn test_unwritable_output_destination_fails() {
    let (tmp, config) = project(BASIC_PROJECT);
    let blocker = tmp.path().join("blocker");
    fs::write(&blocker, "").unwrap();

    slipway()
        .args([
            "--input",
            config.to_str().unwrap(),
            "--output",
            blocker.join("build.ninja").to_str().unwrap(),
            "--profile",
            "debug",
            "--build-dir",
            tmp.path().join("build").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to write build script"));
}

#[test]
fn test_missing_configuration_fails() {
    let tmp = TempDir::new().unwrap();

    slipway()
        .args([
            "--input",
            tmp.path().join("nope.toml").to_str().unwrap(),
            "--output",
            tmp.path().join("build.ninja").to_str().unwrap(),
            "--profile",
            "debug",
            "--build-dir",
            tmp.path().join("build").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}
