//! Batch grading of a [Solver] against directories of labelled instances

use crate::{dimacs, flatten, Config, Solver, Stats};
use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expected {
    Sat,
    UnSat,
}

impl Expected {
    fn label(self) -> &'static str {
        match self {
            Expected::Sat => "SAT",
            Expected::UnSat => "UNSAT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub path: PathBuf,
    pub expected: Expected,
    pub passed: bool,
    pub elapsed: Duration,
    /// Error while reading, parsing or solving the instance
    pub error: Option<String>,
    /// Counters of the solver, if it keeps them
    pub stats: Option<Stats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub solver: String,
    pub config: Option<Config>,
    pub passed: usize,
    pub failed: usize,
    pub total: Duration,
    pub outcomes: Vec<Outcome>,
}

impl Report {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn print_summary(&self) {
        let n = self.passed + self.failed;
        eprintln!(
            "{:>12} {} passed, {} failed in {:?}",
            "Summary".bold().blue(),
            self.passed.to_string().green(),
            self.failed.to_string().red(),
            self.total
        );
        if n > 0 {
            eprintln!(
                "{:>12} {:?} per instance",
                "Average".bold().blue(),
                self.total / n as u32
            );
        }
        for outcome in self.outcomes.iter().filter(|o| !o.passed) {
            eprintln!(
                "{:>12} {} (expected {})",
                "Failed".bold().red(),
                outcome.path.display(),
                outcome.expected.label()
            );
        }
    }
}

/// Every regular file below `dir`, sorted by path. A missing directory has no files.
pub fn collect_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !dir.exists() {
        log::warn!("{} does not exist", dir.display());
        return Ok(files);
    }
    let mut stack = vec![dir.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let entries =
            fs::read_dir(&dir).with_context(|| format!("Cannot read {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.is_file() {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Read, parse and solve a single DIMACS file
pub fn check_file(solver: &mut dyn Solver, path: &Path) -> Result<bool> {
    let input =
        fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let expr = dimacs::parse(&input)?;
    let clauses = flatten(&expr)?;
    solver.solve(clauses)
}

pub fn grade(solver: &mut dyn Solver, sat_dir: &Path, unsat_dir: &Path) -> Result<Report> {
    let mut cases: Vec<(PathBuf, Expected)> = Vec::new();
    cases.extend(collect_files(sat_dir)?.into_iter().map(|p| (p, Expected::Sat)));
    cases.extend(collect_files(unsat_dir)?.into_iter().map(|p| (p, Expected::UnSat)));

    let n = cases.len();
    eprintln!("{:>12} {} instances", "Found".bold().magenta(), n);

    let mut outcomes = Vec::with_capacity(n);
    let mut total = Duration::ZERO;
    for (i, (path, expected)) in cases.into_iter().enumerate() {
        eprintln!(
            "{:>12} ({}/{n}) {}",
            "Solving".bold().blue(),
            i + 1,
            path.display()
        );
        let start = Instant::now();
        let result = check_file(solver, &path);
        let elapsed = start.elapsed();
        total += elapsed;

        let (passed, error, stats) = match result {
            Ok(sat) => (sat == (expected == Expected::Sat), None, solver.stats()),
            Err(err) => (false, Some(format!("{err:#}")), None),
        };
        if passed {
            eprintln!(
                "{:>12} {} (in {:?})",
                expected.label().bold().green(),
                path.display(),
                elapsed
            );
        } else if let Some(error) = &error {
            eprintln!(
                "{:>12} {} {}",
                "Error".bold().red(),
                path.display(),
                error
            );
        } else {
            eprintln!(
                "{:>12} {} expected {} (in {:?})",
                "Wrong".bold().red(),
                path.display(),
                expected.label(),
                elapsed
            );
        }
        outcomes.push(Outcome {
            path,
            expected,
            passed,
            elapsed,
            error,
            stats,
        });
    }

    let passed = outcomes.iter().filter(|o| o.passed).count();
    Ok(Report {
        solver: solver.name().to_string(),
        config: solver.config(),
        passed,
        failed: outcomes.len() - passed,
        total,
        outcomes,
    })
}
