use crate::{Clause, Solver};
use anyhow::{ensure, Result};
use std::{
    collections::{BTreeMap, BTreeSet},
    num::NonZeroU32,
};

/// Largest number of variables [brute_force] accepts
pub const MAX_BRUTE_FORCE_VARIABLES: usize = 24;

type Values = BTreeMap<NonZeroU32, bool>;

/// Try every assignment of the variables of `clauses`
pub fn brute_force(clauses: &[Clause]) -> Result<bool> {
    let variables: Vec<NonZeroU32> = clauses
        .iter()
        .flat_map(Clause::variables)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    ensure!(
        variables.len() <= MAX_BRUTE_FORCE_VARIABLES,
        "Too many variables for brute force: {} > {}",
        variables.len(),
        MAX_BRUTE_FORCE_VARIABLES
    );
    Ok(search(clauses, &variables, &mut Values::new()))
}

fn is_falsified(clause: &Clause, values: &Values) -> bool {
    clause
        .literals()
        .iter()
        .all(|lit| values.get(&lit.id).is_some_and(|&value| value != lit.positive))
}

fn search(clauses: &[Clause], variables: &[NonZeroU32], values: &mut Values) -> bool {
    if clauses.iter().any(|c| is_falsified(c, values)) {
        return false;
    }
    let Some((&fix, rest)) = variables.split_first() else {
        // Every clause has a true literal
        return true;
    };
    for value in [true, false] {
        log::trace!("Set x{} = {}", fix, value);
        values.insert(fix, value);
        if search(clauses, rest, values) {
            return true;
        }
    }
    values.remove(&fix);
    false
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BruteForce;

impl Solver for BruteForce {
    fn name(&self) -> &'static str {
        "brute-force"
    }

    fn solve(&mut self, clauses: Vec<Clause>) -> Result<bool> {
        brute_force(&clauses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clause, instances, testing};

    #[test]
    fn test_brute_force() {
        for (clauses, expected) in testing::single_solution_cases() {
            assert_eq!(brute_force(&clauses).unwrap(), expected, "{clauses:?}");
        }

        // x3 ∨ x4
        assert!(brute_force(&[clause![3, 4]]).unwrap());
        // Empty formula and empty clause
        assert!(brute_force(&[]).unwrap());
        assert!(!brute_force(&[clause![]]).unwrap());
    }

    #[test]
    fn pigeonhole() {
        assert!(!brute_force(&instances::pigeonhole(2)).unwrap());
    }

    #[test]
    fn too_many_variables() {
        let clauses: Vec<Clause> = (1..=25).map(|id| clause![id]).collect();
        assert!(brute_force(&clauses).is_err());
        assert!(BruteForce.solve(clauses[..24].to_vec()).unwrap());
    }
}
