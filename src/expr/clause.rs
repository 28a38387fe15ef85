use super::Literal;
use proptest::prelude::*;
use std::{collections::BTreeSet, fmt, num::NonZeroU32};

/// A clause in [Conjunctive Normal Form](https://en.wikipedia.org/wiki/Conjunctive_normal_form)
///
/// The literals are kept sorted and without duplicates, so a clause behaves as a set.
/// A clause containing both `x` and `¬x` is kept as is; see [Clause::is_tautology].
///
/// # Order
///
/// Clauses are in graded lexical order, i.e. the number of literals is the primary key.
///
/// ```rust
/// use uipsat::clause;
///
/// let a = clause![1, 2];
/// let b = clause![1];
/// let c = clause![2];
/// let d = clause![];
///
/// assert!(d < b);
/// assert!(b < c); // since 1 < 2
/// assert!(c < a);
/// ```
///
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Clause {
    literals: Vec<Literal>,
}

#[macro_export]
macro_rules! clause {
    ($($lit:expr),*) => {
        $crate::Clause::from_literals(&[$($crate::Literal::from($lit)),*])
    };
}

impl PartialOrd for Clause {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Clause {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.len().cmp(&other.len()) {
            std::cmp::Ordering::Equal => self.literals.cmp(&other.literals),
            ordering => ordering,
        }
    }
}

impl Clause {
    pub fn new(literals: BTreeSet<Literal>) -> Self {
        Self {
            literals: literals.into_iter().collect(),
        }
    }

    pub fn from_literals(literals: &[Literal]) -> Self {
        Self::new(literals.iter().copied().collect())
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Number of literals in the clause
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn contains(&self, lit: Literal) -> bool {
        self.literals.binary_search(&lit).is_ok()
    }

    /// Check if the clause contains both polarities of some variable
    ///
    /// ```rust
    /// use uipsat::clause;
    ///
    /// assert!(clause![1, -1, 2].is_tautology());
    /// assert!(!clause![1, -2].is_tautology());
    /// ```
    pub fn is_tautology(&self) -> bool {
        // The negation of some literal must be next to it since sorted.
        self.literals.windows(2).any(|w| w[0].id == w[1].id)
    }

    pub fn variables(&self) -> BTreeSet<NonZeroU32> {
        self.literals.iter().map(|lit| lit.id).collect()
    }

    pub fn as_unit(&self) -> Option<Literal> {
        match self.literals.as_slice() {
            [lit] => Some(*lit),
            _ => None,
        }
    }
}

impl From<Literal> for Clause {
    fn from(literal: Literal) -> Self {
        Self {
            literals: vec![literal],
        }
    }
}

impl From<Vec<i32>> for Clause {
    fn from(literals: Vec<i32>) -> Self {
        Self::new(literals.into_iter().map(Literal::new).collect())
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.literals.is_empty() {
            return write!(f, "⊥");
        }
        for (i, literal) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " ∨ ")?;
            }
            write!(f, "{}", literal)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Arbitrary for Clause {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        proptest::collection::vec(any::<Literal>(), 0..5)
            .prop_map(|literals| Clause::from_literals(&literals))
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lit;

    #[test]
    fn dedup_and_sort() {
        let c = clause![2, -1, 2, 1];
        assert_eq!(c.literals(), &[lit!(1), lit!(-1), lit!(2)]);
        assert!(c.is_tautology());
        assert_eq!(c.to_string(), "x1 ∨ ¬x1 ∨ x2");
    }

    proptest! {
        #[test]
        fn test_sorted_set(c: Clause) {
            prop_assert!(c.literals().windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn test_contains_every_literal(c: Clause) {
            for lit in c.literals() {
                prop_assert!(c.contains(*lit));
            }
        }

        #[test]
        fn test_tautology_iff_complementary_pair(c: Clause) {
            let expected = c.literals().iter().any(|l| c.contains(!*l));
            prop_assert_eq!(c.is_tautology(), expected);
        }
    }
}
