use crate::Clause;
use std::{collections::BTreeSet, fmt, num::NonZeroU32, ops::Index};

/// Index of a clause in a [ClauseDb]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClauseRef(pub(crate) usize);

impl ClauseRef {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ClauseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Append-only clause collection.
///
/// The clauses of the input formula come first and are never touched afterwards,
/// learned clauses are appended behind them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ClauseDb {
    clauses: Vec<Clause>,
    num_originals: usize,
}

impl ClauseDb {
    pub fn new(originals: Vec<Clause>) -> Self {
        let num_originals = originals.len();
        Self {
            clauses: originals,
            num_originals,
        }
    }

    pub fn push(&mut self, clause: Clause) -> ClauseRef {
        self.clauses.push(clause);
        ClauseRef(self.clauses.len() - 1)
    }

    pub fn get(&self, cref: ClauseRef) -> &Clause {
        &self.clauses[cref.0]
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn originals(&self) -> &[Clause] {
        &self.clauses[..self.num_originals]
    }

    pub fn learned(&self) -> &[Clause] {
        &self.clauses[self.num_originals..]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClauseRef, &Clause)> {
        self.clauses.iter().enumerate().map(|(i, c)| (ClauseRef(i), c))
    }

    /// Variables of the input formula in ascending order
    pub fn variables(&self) -> Vec<NonZeroU32> {
        self.originals()
            .iter()
            .flat_map(Clause::variables)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl Index<ClauseRef> for ClauseDb {
    type Output = Clause;
    fn index(&self, cref: ClauseRef) -> &Clause {
        self.get(cref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause;

    #[test]
    fn learned_clauses_go_behind_originals() {
        let mut db = ClauseDb::new(vec![clause![1, 2], clause![-3]]);
        let cref = db.push(clause![-1]);
        assert_eq!(cref, ClauseRef(2));
        assert_eq!(db.originals(), &[clause![1, 2], clause![-3]]);
        assert_eq!(db.learned(), &[clause![-1]]);
        assert_eq!(db[cref], clause![-1]);
        assert_eq!(
            db.variables(),
            vec![
                NonZeroU32::new(1).unwrap(),
                NonZeroU32::new(2).unwrap(),
                NonZeroU32::new(3).unwrap()
            ]
        );
    }
}
