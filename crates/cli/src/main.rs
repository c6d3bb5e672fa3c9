// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod error;
mod request;
mod response;

use clap::Parser;
use error::CliError;
use fixture_engine::plan_fixture;
use rand::SeedableRng;
use rand::rngs::StdRng;
use request::FixtureRequestFile;
use response::PlanResponse;
use std::path::PathBuf;
use tracing::{error, info};

/// Fixture planner - draws groups, generates pairings and schedules matches
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON request file
    #[arg(short, long)]
    input: PathBuf,

    /// Seed for the draw and random venue selection. Uses OS entropy if omitted.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Pretty-print the JSON plan
    #[arg(short, long)]
    pretty: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    // Logs go to stderr so stdout carries only the plan
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Reading fixture request from {}", args.input.display());

    let input: String =
        std::fs::read_to_string(&args.input).map_err(|source| CliError::ReadInput {
            path: args.input.clone(),
            source,
        })?;

    match run(&input, args.seed, args.pretty) {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(err) => {
            error!("Planning failed: {err}");
            Err(err.into())
        }
    }
}

/// Plans the fixture described by `input` and renders it as JSON.
fn run(input: &str, seed: Option<u64>, pretty: bool) -> Result<String, CliError> {
    let file: FixtureRequestFile = serde_json::from_str(input)?;
    let request = file.into_request()?;

    let mut rng: StdRng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    if let Some(seed) = seed {
        info!(seed, "Using fixed seed");
    }

    let plan = plan_fixture(&request, &mut rng)?;
    let response = PlanResponse::from_plan(&plan)?;

    let output = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    Ok(output)
}
