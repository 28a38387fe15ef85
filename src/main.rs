use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use uipsat::*;

#[derive(Debug, Parser)]
#[command(version, about = "CDCL SAT solver for DIMACS CNF files")]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[arg(long, global = true, value_enum, default_value_t)]
    algorithm: Algorithm,

    #[arg(long, global = true, value_enum, default_value_t)]
    propagation: Propagation,

    #[arg(long, global = true, value_enum, default_value_t)]
    resolution: ResolutionOrder,

    #[arg(long, global = true, value_enum, default_value_t)]
    phase: Phase,

    /// Print the report as JSON to stdout
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decide a single DIMACS file
    Solve { path: PathBuf },
    /// Grade the solver against directories of satisfiable and unsatisfiable instances
    Grade { sat_dir: PathBuf, unsat_dir: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum Algorithm {
    #[default]
    Cdcl,
    BruteForce,
}

impl Args {
    fn solver(&self) -> Box<dyn Solver> {
        match self.algorithm {
            Algorithm::Cdcl => Box::new(CdclSolver::new(Config {
                propagation: self.propagation,
                resolution: self.resolution,
                phase: self.phase,
            })),
            Algorithm::BruteForce => Box::new(BruteForce),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut solver = args.solver();
    match &args.command {
        Command::Solve { path } => {
            let sat = grader::check_file(solver.as_mut(), path)?;
            let verdict = if sat { "SAT" } else { "UNSAT" };
            if args.json {
                let output = serde_json::json!({
                    "path": path,
                    "solver": solver.name(),
                    "verdict": verdict,
                    "config": solver.config(),
                    "stats": solver.stats(),
                });
                println!("{output}");
            } else {
                println!("{verdict}");
            }
        }
        Command::Grade { sat_dir, unsat_dir } => {
            let report = grader::grade(solver.as_mut(), sat_dir, unsat_dir)?;
            report.print_summary();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            if !report.all_passed() {
                bail!("{} of {} instances failed", report.failed, report.outcomes.len());
            }
        }
    }
    Ok(())
}
