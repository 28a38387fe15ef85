use crate::{clause, Clause, Literal};
use proptest::prelude::*;
use std::num::NonZeroU32;

pub fn single_solution_cases() -> Vec<(Vec<Clause>, bool)> {
    vec![
        // x3
        (vec![clause![3]], true),
        // ¬x3
        (vec![clause![-3]], true),
        // x3 ∧ ¬x4
        (vec![clause![3], clause![-4]], true),
        // x3 ∧ ¬x3
        (vec![clause![3], clause![-3]], false),
        // (x3 ∨ x4) ∧ ¬x3 ∧ ¬x4
        (vec![clause![3, 4], clause![-3], clause![-4]], false),
        // x3 ∧ x4 ∧ x5
        (vec![clause![3], clause![4], clause![5]], true),
        // (x1 ∨ x2) ∧ (¬x1 ∨ x2) ∧ (x1 ∨ ¬x2)
        (vec![clause![1, 2], clause![-1, 2], clause![1, -2]], true),
        // (¬x1 ∨ x2) ∧ (¬x2 ∨ x3) ∧ (¬x3 ∨ ¬x1)
        (vec![clause![-1, 2], clause![-2, 3], clause![-3, -1]], true),
    ]
}

/// Variables `x1` to `x{max_id}` in ascending order
pub fn variables(max_id: u32) -> Vec<NonZeroU32> {
    (1..=max_id).filter_map(NonZeroU32::new).collect()
}

/// Random formulas over a handful of variables, small enough for brute force
pub fn small_cnf() -> impl Strategy<Value = Vec<Clause>> {
    let literal = (1..=6i32, any::<bool>()).prop_map(|(id, positive)| {
        Literal::new(if positive { id } else { -id })
    });
    let clause = proptest::collection::vec(literal, 1..=3)
        .prop_map(|literals| Clause::from_literals(&literals));
    proptest::collection::vec(clause, 1..=16)
}
