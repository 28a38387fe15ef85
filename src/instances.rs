//! Generators of well-known formulas, shared by tests and benchmarks

use crate::{clause, Clause, Literal};

/// `n + 1` pigeons into `n` holes, unsatisfiable for every `n`
pub fn pigeonhole(n: i32) -> Vec<Clause> {
    // x(p, h): pigeon p sits in hole h
    let x = |p: i32, h: i32| p * n + h + 1;
    let mut clauses = Vec::new();
    for p in 0..=n {
        clauses.push((0..n).map(|h| Literal::new(x(p, h))).collect());
    }
    for h in 0..n {
        for p in 0..=n {
            for q in (p + 1)..=n {
                clauses.push(clause![-x(p, h), -x(q, h)]);
            }
        }
    }
    clauses
}

/// x1 → x2 → ... → xn, satisfiable
pub fn implication_chain(n: i32) -> Vec<Clause> {
    (1..n).map(|i| clause![-i, i + 1]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CDCL;

    #[test]
    fn pigeonhole_size() {
        // n + 1 "somewhere" clauses and n * C(n + 1, 2) "not together" clauses
        assert_eq!(pigeonhole(3).len(), 4 + 3 * 6);
        assert_eq!(pigeonhole(1), vec![clause![1], clause![2], clause![-1, -2]]);
    }

    #[test]
    fn chain_is_satisfiable() {
        let chain = implication_chain(50);
        assert_eq!(chain.len(), 49);
        assert!(CDCL::new(chain).solve());
    }
}
