use crate::{Clause, Decide, Phase, Solver};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

mod analyze;
mod clause_db;
mod trail;
mod watch;

pub use analyze::ResolutionOrder;
pub use clause_db::{ClauseDb, ClauseRef};
pub use trail::{Reason, Trail, TrailDisplay};

use analyze::{analyze, Analysis};
use watch::{full_scan, Watcher};

/// How unit propagation finds unit and falsified clauses
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Propagation {
    /// Only visit clauses watching a literal which has become false
    #[default]
    WatchedLiterals,
    /// Rescan every clause until nothing changes
    FullScan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub propagation: Propagation,
    pub resolution: ResolutionOrder,
    pub phase: Phase,
}

/// Counters of the last [CDCL::solve]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Stats {
    pub decisions: usize,
    pub conflicts: usize,
    pub propagations: usize,
    pub learned: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum State {
    Propagating,
    Conflict(ClauseRef),
    Deciding,
    Satisfied,
    Unsatisfied,
}

/// Conflict-Driven Clause-Learning solver for a fixed formula.
///
/// Learned clauses are kept across [CDCL::solve] calls, the trail is not.
#[derive(Debug)]
pub struct CDCL {
    clauses: ClauseDb,
    /// Variables of the input formula in ascending order
    variables: Vec<NonZeroU32>,
    trail: Trail,
    watcher: Watcher,
    config: Config,
    decider: Box<dyn Decide>,
    stats: Stats,
}

impl CDCL {
    pub fn new(clauses: Vec<Clause>) -> Self {
        Self::with_config(clauses, Config::default())
    }

    pub fn with_config(clauses: Vec<Clause>, config: Config) -> Self {
        Self::with_decider(clauses, config, config.phase.decider())
    }

    /// Use a custom decision policy instead of [Config::phase]
    pub fn with_decider(clauses: Vec<Clause>, config: Config, decider: Box<dyn Decide>) -> Self {
        let clauses = ClauseDb::new(clauses);
        let variables = clauses.variables();
        Self {
            trail: Trail::new(&variables),
            watcher: Watcher::default(),
            clauses,
            variables,
            config,
            decider,
            stats: Stats::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn clauses(&self) -> &ClauseDb {
        &self.clauses
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    fn reset(&mut self) {
        self.trail.reset();
        self.watcher = Watcher::new(&self.clauses, &self.trail);
        self.stats = Stats::default();
    }

    /// Unit propagation up to a fixpoint
    fn propagate(&mut self) -> State {
        let before = self.trail.len();
        let conflict = match self.config.propagation {
            Propagation::WatchedLiterals => self.watcher.propagate(&self.clauses, &mut self.trail),
            Propagation::FullScan => full_scan(&self.clauses, &mut self.trail),
        };
        self.stats.propagations += self.trail.len() - before;

        if let Some(conflict) = conflict {
            return State::Conflict(conflict);
        }
        // Learned clauses only mention variables of the input formula
        if self.trail.len() == self.variables.len() {
            return State::Satisfied;
        }
        State::Deciding
    }

    fn decide(&mut self) -> State {
        let Some(lit) = self.decider.decide(&self.trail, &self.variables) else {
            return State::Satisfied;
        };
        self.stats.decisions += 1;
        self.trail.assign_decision(lit);
        log::trace!("Decision: {} at level {}", lit, self.trail.level());
        State::Propagating
    }

    /// Learn from the conflict and backjump
    fn resolve_conflict(&mut self, conflict: ClauseRef) -> State {
        self.stats.conflicts += 1;
        if self.trail.level() == 0 {
            log::debug!("Conflict at root level: {}", self.clauses[conflict]);
            return State::Unsatisfied;
        }

        let Analysis { learned, backjump } =
            analyze(conflict, &self.clauses, &self.trail, self.config.resolution);
        log::debug!(
            "Conflict {} at level {}, learned {}, backjump to {}",
            self.clauses[conflict],
            self.trail.level(),
            learned,
            backjump
        );

        self.trail.backtrack(backjump);
        self.watcher.backtrack(&self.trail);

        let unit = learned.as_unit();
        let cref = self.clauses.push(learned);
        self.watcher.attach(cref, &self.clauses[cref], &self.trail);
        self.stats.learned += 1;

        if let Some(lit) = unit {
            if !self.trail.is_assigned(lit.id) {
                self.trail.assign_implied(lit, cref);
                self.stats.propagations += 1;
            }
        }
        State::Propagating
    }

    /// Decide satisfiability of the formula.
    ///
    /// Returns `true` if the formula is satisfiable.
    pub fn solve(&mut self) -> bool {
        self.reset();
        let mut state = State::Propagating;
        loop {
            state = match state {
                State::Propagating => self.propagate(),
                State::Deciding => self.decide(),
                State::Conflict(conflict) => self.resolve_conflict(conflict),
                State::Satisfied | State::Unsatisfied => break,
            };
        }
        let sat = state == State::Satisfied;
        log::info!(
            "{} after {} decisions, {} conflicts",
            if sat { "SAT" } else { "UNSAT" },
            self.stats.decisions,
            self.stats.conflicts
        );
        sat
    }
}

/// [CDCL] as a [Solver], building a fresh engine for every formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CdclSolver {
    pub config: Config,
    /// Counters of the last formula
    stats: Option<Stats>,
}

impl CdclSolver {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            stats: None,
        }
    }
}

impl Solver for CdclSolver {
    fn name(&self) -> &'static str {
        "cdcl"
    }

    fn solve(&mut self, clauses: Vec<Clause>) -> Result<bool> {
        let mut cdcl = CDCL::with_config(clauses, self.config);
        let sat = cdcl.solve();
        log::debug!("{:?}", cdcl.stats());
        self.stats = Some(*cdcl.stats());
        Ok(sat)
    }

    fn config(&self) -> Option<Config> {
        Some(self.config)
    }

    fn stats(&self) -> Option<Stats> {
        self.stats
    }
}
