//! Command-line entry: load a timetable description, solve it with CP-SAT and print it.
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug};
use timetable_core::{CpSatBackend, SolverSettings, TimetableConfig, schedule_timetable};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON timetable description. The built-in six-day instance is used when omitted.
    config_path: Option<PathBuf>,

    /// Solver time limit in seconds.
    #[arg(
        short = 't',
        long = "time-limit",
        default_value_t = 60.0,
        value_parser = parse_time_limit
    )]
    time_limit: f64,

    /// Number of parallel CP-SAT search workers; 0 lets CP-SAT choose.
    #[arg(
        short = 'w',
        long,
        default_value_t = 8,
        value_parser = clap::value_parser!(i32).range(0..)
    )]
    workers: i32,

    #[arg(long, default_value_t = 42)]
    seed: i32,

    /// Let CP-SAT log its search progress.
    #[arg(long)]
    log_search: bool,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    print_config: bool,

    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn parse_time_limit(arg: &str) -> Result<f64, String> {
    let seconds: f64 = arg.parse().map_err(|e| format!("{e}"))?;
    if seconds.is_nan() || seconds < 0.0 {
        return Err(format!("expected a non-negative number of seconds, got {arg}"));
    }
    Ok(seconds)
}

pub fn main() {
    if let Err(e) = run() {
        eprintln!("Execution failed, error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let level_filter = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .format(|buf, record| writeln!(buf, "% {}", record.args()))
        .filter_level(level_filter)
        .target(env_logger::Target::Stderr)
        .init();

    let config = match &args.config_path {
        Some(path) => TimetableConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => TimetableConfig::default(),
    };
    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let instance = config.validate().context("checking timetable input")?;
    debug!(
        "{} batches, {} courses, {} days x {} slots",
        instance.batches().len(),
        instance.courses().len(),
        instance.days(),
        instance.slots_per_day()
    );

    let settings = SolverSettings {
        time_limit_seconds: Some(args.time_limit),
        num_workers: args.workers,
        random_seed: args.seed,
        log_search_progress: args.log_search,
    };
    let timetable = schedule_timetable(&instance, &CpSatBackend::new(), &settings)?;
    print!("{timetable}");
    Ok(())
}
