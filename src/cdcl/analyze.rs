//! Conflict analysis

use super::{ClauseDb, ClauseRef, Reason, Trail};
use crate::{Clause, Literal};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which implied literal of the current level is resolved next.
///
/// Every order ends with at most one literal of the current level left, so each of them
/// learns an asserting clause. The learned clause itself may differ.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionOrder {
    /// The latest assignment first, which stops at the first UIP
    #[default]
    ReverseTrail,
    SmallestVariable,
    LargestVariable,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Analysis {
    /// Negation of the conflict set, i.e. falsified by the current trail
    pub(crate) learned: Clause,
    /// Level to backjump to
    pub(crate) backjump: usize,
}

/// Derive a clause from the falsified `conflict` by resolving with reason clauses
/// until a single literal of the current level is left.
pub(crate) fn analyze(
    conflict: ClauseRef,
    db: &ClauseDb,
    trail: &Trail,
    order: ResolutionOrder,
) -> Analysis {
    let level = trail.level();
    let at_level = |lit: &&Literal| trail.level_of(lit.id) == Some(level);

    // Assignments responsible for the conflict, all of them are true in the trail
    let mut conflict_set: BTreeSet<Literal> = db[conflict].literals().iter().map(|l| !*l).collect();

    while conflict_set.iter().filter(at_level).count() > 1 {
        let candidates = conflict_set
            .iter()
            .filter(at_level)
            .filter_map(|lit| match trail.reason(lit.id) {
                Some(Reason::Clause(reason)) => Some((*lit, reason)),
                _ => None,
            });
        let pivot = match order {
            ResolutionOrder::ReverseTrail => candidates.max_by_key(|(lit, _)| trail.position(lit.id)),
            ResolutionOrder::SmallestVariable => candidates.min_by_key(|(lit, _)| lit.id),
            ResolutionOrder::LargestVariable => candidates.max_by_key(|(lit, _)| lit.id),
        };
        let Some((pivot, reason)) = pivot else {
            log::warn!(
                "No implied literal left to resolve at level {level}, learning a non-asserting clause"
            );
            break;
        };
        conflict_set.remove(&pivot);
        conflict_set.remove(&!pivot);
        for lit in db[reason].literals() {
            if lit.id != pivot.id {
                conflict_set.insert(!*lit);
            }
        }
    }

    let learned: Clause = conflict_set.iter().map(|lit| !*lit).collect();
    let backjump = backjump_level(&learned, trail);
    Analysis { learned, backjump }
}

/// The second highest decision level among the variables of `learned`, or 0
pub(crate) fn backjump_level(learned: &Clause, trail: &Trail) -> usize {
    if learned.len() <= 1 {
        return 0;
    }
    let levels: BTreeSet<usize> = learned
        .literals()
        .iter()
        .filter_map(|lit| trail.level_of(lit.id))
        .collect();
    levels.iter().rev().nth(1).copied().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clause, lit, testing::variables};

    const ORDERS: [ResolutionOrder; 3] = [
        ResolutionOrder::ReverseTrail,
        ResolutionOrder::SmallestVariable,
        ResolutionOrder::LargestVariable,
    ];

    #[test]
    fn inconsistent_xor() {
        let db = ClauseDb::new(vec![
            clause![1, 2],
            clause![-1, 2],
            clause![1, -2],
            clause![-1, -2],
        ]);
        let mut trail = Trail::new(&variables(2));
        trail.assign_decision(lit!(1));
        trail.assign_implied(lit!(2), ClauseRef(1));

        for order in ORDERS {
            let analysis = analyze(ClauseRef(3), &db, &trail, order);
            assert_eq!(analysis.learned, clause![-1]);
            assert_eq!(analysis.backjump, 0);
        }
    }

    /// Level 1 decides x1, level 2 decides x2, which implies x3, x4 and then the conflict
    fn two_levels() -> (ClauseDb, Trail) {
        let db = ClauseDb::new(vec![
            clause![-2, 3],
            clause![-1, -3, 4],
            clause![-3, -4, 5],
            clause![-4, -5],
        ]);
        let mut trail = Trail::new(&variables(5));
        trail.assign_decision(lit!(1));
        trail.assign_decision(lit!(2));
        trail.assign_implied(lit!(3), ClauseRef(0));
        trail.assign_implied(lit!(4), ClauseRef(1));
        trail.assign_implied(lit!(5), ClauseRef(2));
        (db, trail)
    }

    #[test]
    fn first_uip() {
        let (db, trail) = two_levels();
        let analysis = analyze(ClauseRef(3), &db, &trail, ResolutionOrder::ReverseTrail);
        // x3 dominates the conflict within level 2
        assert_eq!(analysis.learned, clause![-1, -3]);
        assert_eq!(analysis.backjump, 1);
    }

    #[test]
    fn every_order_is_asserting() {
        let (db, trail) = two_levels();
        for order in ORDERS {
            let analysis = analyze(ClauseRef(3), &db, &trail, order);
            let at_current = analysis
                .learned
                .literals()
                .iter()
                .filter(|lit| trail.level_of(lit.id) == Some(2))
                .count();
            assert_eq!(at_current, 1, "{order:?}");
            assert!(analysis
                .learned
                .literals()
                .iter()
                .all(|lit| trail.value(*lit) == Some(false)));
            assert_eq!(analysis.backjump, 1);
        }
    }

    #[test]
    fn backjump_needs_two_distinct_levels() {
        let (_, trail) = two_levels();
        assert_eq!(backjump_level(&clause![-3], &trail), 0);
        assert_eq!(backjump_level(&clause![-3, -4], &trail), 0);
        assert_eq!(backjump_level(&clause![-1, -3, -4], &trail), 1);
    }
}
