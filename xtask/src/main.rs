// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - workspace automation
//!
//! - `cargo xtask ci` runs lint, dependency checks, build and tests
//! - `cargo xtask test-props` runs the property tests with a larger case count
//! - `cargo xtask sample` plans every request under `demos/` through the CLI

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{fmt::Debug, io, path::PathBuf, process::Output};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{eyre::Context, Result};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

/// Property test cases per property when running `test-props`.
const EXTENDED_PROPTEST_CASES: &str = "2048";

/// Directory holding sample request files.
const DEMOS_DIR: &str = "demos";

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, deny, machete, build, test)
    CI,

    /// Build the workspace
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Generate an lcov coverage report
    #[command(visible_alias = "cov")]
    Coverage,

    /// Check dependency licenses and advisories
    #[command(visible_alias = "d")]
    Deny,

    /// Look for unused dependencies
    #[command(visible_alias = "m")]
    Machete,

    /// Lint formatting, clippy and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Build the docs of every library crate with warnings denied
    #[command(visible_alias = "ld")]
    LintDocs,

    /// Check formatting
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Apply clippy fixes
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Apply formatting
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run all tests
    #[command(visible_alias = "t")]
    Test,

    /// Run doc tests
    #[command(visible_alias = "td")]
    TestDocs,

    /// Run unit and integration tests
    #[command(visible_alias = "tl")]
    TestLibs,

    /// Run the property tests with an extended case count
    #[command(visible_alias = "tp")]
    TestProps,

    /// Plan every sample request through the CLI
    #[command(visible_alias = "s")]
    Sample,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Coverage => coverage(),
            Self::Deny => deny(),
            Self::Machete => machete(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::FixClippy => fix_clippy(),
            Self::FixFormatting => fix_format(),
            Self::Test => test(),
            Self::TestDocs => test_docs(),
            Self::TestLibs => test_libs(),
            Self::TestProps => test_props(),
            Self::Sample => sample(),
        }
    }
}

fn ci() -> Result<()> {
    lint()?;
    deny()?;
    machete()?;
    build()?;
    test()?;
    sample()?;
    Ok(())
}

fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets", "--all-features"])
}

fn coverage() -> Result<()> {
    run_cargo(vec![
        "llvm-cov",
        "--lcov",
        "--output-path",
        "target/lcov.info",
        "--all-features",
    ])
}

fn deny() -> Result<()> {
    run_cargo(vec!["deny", "check"])
}

fn machete() -> Result<()> {
    cmd!("cargo-machete").run_with_trace()?;
    Ok(())
}

fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    Ok(())
}

fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

fn fix_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
        "--",
        "-D",
        "warnings",
    ])
}

/// Docs are built per library crate; the CLI binary has no public API.
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    let libraries = meta
        .workspace_default_packages()
        .into_iter()
        .filter(|package| package.targets.iter().any(cargo_metadata::Target::is_lib));

    for package in libraries {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env_remove("CARGO")
        .env("RUSTDOCFLAGS", "-D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

fn lint_format() -> Result<()> {
    run_cargo(vec!["fmt", "--all", "--check"])
}

fn fix_format() -> Result<()> {
    run_cargo(vec!["fmt", "--all"])
}

fn test() -> Result<()> {
    test_libs()?;
    test_docs()?;
    Ok(())
}

fn test_docs() -> Result<()> {
    run_cargo(vec!["test", "--doc", "--all-features"])
}

fn test_libs() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])
}

fn test_props() -> Result<()> {
    cmd(
        "cargo",
        ["test", "--package", "fixture-domain", "--lib", "properties"],
    )
    .env("PROPTEST_CASES", EXTENDED_PROPTEST_CASES)
    .run_with_trace()?;
    Ok(())
}

/// Runs the CLI with a fixed seed over every `*.json` file in `demos/`.
fn sample() -> Result<()> {
    let mut requests: Vec<PathBuf> = std::fs::read_dir(DEMOS_DIR)
        .wrap_err_with(|| format!("failed to read {DEMOS_DIR}/"))?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    requests.sort();

    if requests.is_empty() {
        tracing::warn!("no sample requests found in {DEMOS_DIR}/");
    }

    for request in requests {
        let input = request.to_string_lossy().into_owned();
        cmd(
            "cargo",
            [
                "run",
                "--quiet",
                "--package",
                "fixture-cli",
                "--",
                "--input",
                input.as_str(),
                "--seed",
                "1",
            ],
        )
        .run_with_trace()
        .wrap_err_with(|| format!("sample {input} failed"))?;
    }

    Ok(())
}

fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
