use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vinculo::{
    error::{Result, SolverError},
    rlfap::RlfapInstance,
    solver::{
        outcome::SearchOutcome,
        stats::{render_stats_table, SearchStats},
        strategy::{SolveOptions, StrategyKind},
    },
};

/// Solve an RLFAP instance with one of the available search strategies.
#[derive(Debug, Parser)]
#[command(name = "vinculo", version)]
struct Args {
    /// Instance identifier: the files var<ID>.txt, dom<ID>.txt and
    /// ctr<ID>.txt are read from the data directory.
    instance: String,

    /// Strategy name: forward-checking, maintaining-arc-consistency,
    /// backjumping or min-conflicts (aliases: fc, mac, fc-cbj).
    strategy: String,

    /// Directory containing the instance files.
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Step budget for min-conflicts.
    #[arg(long, default_value_t = 1000)]
    max_steps: u64,

    /// Random seed for min-conflicts; defaults to entropy.
    #[arg(long)]
    seed: Option<u64>,

    /// Emit the result as JSON instead of the human-readable report.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    instance: &'a str,
    strategy: &'a str,
    #[serde(flatten)]
    outcome: &'a SearchOutcome,
    stats: &'a SearchStats,
    seconds: f64,
}

fn run(args: &Args) -> Result<()> {
    let strategy: StrategyKind = args.strategy.parse()?;

    let instance = RlfapInstance::load(&args.data_dir, &args.instance)?;
    info!(
        instance = %args.instance,
        variables = instance.num_variables(),
        constraints = instance.num_constraints(),
        "instance loaded"
    );
    let problem = instance.into_problem();

    if !args.json {
        println!(
            "Trying to solve instance {:?} using {}...\n",
            args.instance, strategy
        );
    }

    let options = SolveOptions {
        max_steps: args.max_steps,
        seed: args.seed,
    };
    let started = Instant::now();
    let (outcome, stats) = strategy.build(options).solve(&problem)?;
    let elapsed = started.elapsed();

    if args.json {
        let report = Report {
            instance: &args.instance,
            strategy: strategy.name(),
            outcome: &outcome,
            stats: &stats,
            seconds: elapsed.as_secs_f64(),
        };
        println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
    } else {
        match &outcome {
            SearchOutcome::Solution(_) => println!("{outcome}"),
            SearchOutcome::NoSolution => println!("UNSAT"),
        }
        println!();
        println!("{}", render_stats_table(&stats, elapsed));
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Usage errors get the short form; everything else keeps the
            // captured backtrace for debugging.
            match err.inner() {
                SolverError::UnknownStrategy(_) => eprintln!("error: {}", err.inner()),
                _ => eprintln!("error: {err}"),
            }
            ExitCode::FAILURE
        }
    }
}
