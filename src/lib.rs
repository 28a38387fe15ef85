//! Conflict-Driven Clause-Learning (CDCL) SAT solver with First-UIP learning

mod brute_force;
mod cdcl;
mod expr;
mod selector;

pub mod dimacs;
pub mod grader;
pub mod instances;

#[cfg(test)]
mod testing;

pub use brute_force::*;
pub use cdcl::*;
pub use expr::*;
pub use selector::*;

use anyhow::Result;
use std::fmt;

/// A decision procedure for formulas given as clauses
pub trait Solver {
    fn name(&self) -> &'static str;

    /// Returns `true` if the conjunction of `clauses` is satisfiable
    fn solve(&mut self, clauses: Vec<Clause>) -> Result<bool>;

    /// Engine configuration, for solvers which have one
    fn config(&self) -> Option<Config> {
        None
    }

    /// Counters of the last [Solver::solve], for solvers which keep them
    fn stats(&self) -> Option<Stats> {
        None
    }
}

/// Check whether a CNF expression is satisfiable with the default [CDCL] configuration
///
/// ```rust
/// use uipsat::{check_sat, Expr};
///
/// let x = Expr::variable;
/// assert!(check_sat(&((x(1) | x(2)) & !x(1))).unwrap());
/// assert!(!check_sat(&(x(1) & !x(1))).unwrap());
/// assert!(check_sat(&(x(1) | (x(2) & x(3)))).is_err());
/// ```
pub fn check_sat<N>(formula: &N) -> Result<bool, NotCnfError>
where
    N: CnfNode + fmt::Display,
{
    let clauses = flatten(formula)?;
    Ok(CDCL::new(clauses).solve())
}
