#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Mars rover mission file.

mod config;
mod mission_file;
mod report;

use std::{fs, io, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use mars_rover_core::Size;
use mars_rover_plateau::{Plateau, RandomLocations, SeedingConfig};
use mars_rover_system_mission::{FailurePolicy, Mission, MissionConfig, MissionReport};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{config::RunConfig, mission_file::MissionPlan};

/// Exit status reported when the mission ran but a rover failed.
const ROVER_FAILURE_EXIT: u8 = 2;

/// Simulates rovers exploring a plateau from a mission file.
#[derive(Debug, Parser)]
#[command(name = "mars-rover", version, long_about = None)]
struct Args {
    /// Mission file holding the plateau size and rover instructions.
    mission: PathBuf,
    /// Optional TOML file with run settings; flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for sample and obstacle placement.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of samples to place on the plateau.
    #[arg(long)]
    samples: Option<usize>,
    /// Number of obstacles to place on the plateau.
    #[arg(long)]
    obstacles: Option<usize>,
    /// Keep running remaining rovers after a rover fails.
    #[arg(long)]
    continue_on_error: bool,
    /// Do not register finished rovers as obstacles for later rovers.
    #[arg(long)]
    no_register: bool,
    /// Report format written to stdout.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Output formats supported by the report writer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One line per rover.
    Text,
    /// Pretty-printed JSON report.
    Json,
}

/// Entry point for the Mars rover command-line interface.
fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(ROVER_FAILURE_EXIT),
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<MissionReport> {
    let config = resolve_config(args)?;

    let contents = fs::read_to_string(&args.mission)
        .with_context(|| format!("failed to read mission file {}", args.mission.display()))?;
    let plan = MissionPlan::parse(&contents)
        .with_context(|| format!("failed to parse mission file {}", args.mission.display()))?;

    let defaults = SeedingConfig::proportional(Size::new(plan.width, plan.height));
    let seeding = SeedingConfig::new(
        config.samples.unwrap_or(defaults.sample_count()),
        config.obstacles.unwrap_or(defaults.obstacle_count()),
    );
    let mut plateau = Plateau::with_seeding(plan.width, plan.height, seeding)
        .context("failed to create plateau")?;

    let mut source = match config.seed {
        Some(seed) => RandomLocations::seeded(seed),
        None => RandomLocations::from_entropy(),
    };
    let policy = if config.continue_on_error {
        FailurePolicy::Continue
    } else {
        FailurePolicy::Abort
    };
    let mission = Mission::new(MissionConfig::new(config.register_rovers, policy));
    mission
        .seed(&mut plateau, &mut source)
        .context("failed to seed plateau")?;
    let requested = plateau.seeding();
    info!(
        requested_samples = requested.sample_count(),
        requested_obstacles = requested.obstacle_count(),
        samples = plateau.remaining_samples(),
        obstacles = plateau.obstacles().count(),
        rovers = plan.instructions.len(),
        "starting mission"
    );

    let report = mission.run(&mut plateau, &plan.instructions);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = match args.format {
        Format::Text => report::write_text(&report, &mut out),
        Format::Json => report::write_json(&report, &mut out),
    };
    written.context("failed to write mission report")?;

    Ok(report)
}

fn resolve_config(args: &Args) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };

    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.samples.is_some() {
        config.samples = args.samples;
    }
    if args.obstacles.is_some() {
        config.obstacles = args.obstacles;
    }
    if args.continue_on_error {
        config.continue_on_error = true;
    }
    if args.no_register {
        config.register_rovers = false;
    }
    Ok(config)
}
