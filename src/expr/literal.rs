use proptest::prelude::*;
use std::{fmt, num::NonZeroU32, ops::Not};

/// A literal in [Conjunctive Normal Form](https://en.wikipedia.org/wiki/Conjunctive_normal_form)
///
/// # Order
///
/// - Literals are ordered by their ID
/// - If the IDs are the same, positive literals are less than negative literals
///
/// ```rust
/// use uipsat::lit;
///
/// let a = lit!(1);
/// let b = lit!(-1);
/// let c = lit!(2);
/// let d = lit!(-2);
///
/// assert!(a < b); // x1 < ¬x1
/// assert!(b < c); // ¬x1 < x2
/// assert!(c < d); // x2 < ¬x2
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal {
    pub id: NonZeroU32,
    pub positive: bool,
}

#[macro_export]
macro_rules! lit {
    ($lit:expr) => {
        $crate::Literal::new($lit)
    };
}

impl Literal {
    /// Similar to DIMACS format, literals are 1-indexed and negative literals are negated
    pub fn new(lit: i32) -> Self {
        assert!(lit != 0, "0 is not allowed for ID");
        Self {
            id: NonZeroU32::new(lit.unsigned_abs()).expect("Checked above"),
            positive: lit > 0,
        }
    }

    pub fn positive(id: NonZeroU32) -> Self {
        Self { id, positive: true }
    }

    pub fn negative(id: NonZeroU32) -> Self {
        Self {
            id,
            positive: false,
        }
    }

}

impl From<i32> for Literal {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::Output {
            positive: !self.positive,
            ..self
        }
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Literal {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.id.cmp(&other.id) {
            std::cmp::Ordering::Equal => self.positive.cmp(&other.positive).reverse(),
            ordering => ordering,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.positive {
            write!(f, "x{}", self.id)
        } else {
            write!(f, "¬x{}", self.id)
        }
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Arbitrary for Literal {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (1..=i32::MAX, any::<bool>())
            .prop_map(|(id, positive)| Literal::new(if positive { id } else { -id }))
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_zero_id_is_not_allowed(lit: Literal) {
            assert_ne!(lit.id.get(), 0);
        }

        #[test]
        fn test_double_negation(lit: Literal) {
            assert_eq!(!(!lit), lit);
        }

        #[test]
        fn test_order_of_negation(lit: Literal) {
            let negated = !lit;
            if lit.positive {
                assert!(negated > lit);
            } else {
                assert!(lit > negated);
            }
        }

        #[test]
        fn test_sign_is_polarity(id in 1..=i32::MAX) {
            assert_eq!(Literal::new(id), !Literal::new(-id));
            assert_eq!(Literal::new(-id).id.get(), id as u32);
        }
    }

    #[test]
    #[should_panic(expected = "0 is not allowed")]
    fn zero_literal() {
        let _ = Literal::new(0);
    }

    #[test]
    fn most_negative_i32() {
        let lit = Literal::new(i32::MIN);
        assert!(!lit.positive);
        assert_eq!(lit.id.get(), 1 << 31);
        assert_eq!(lit.to_string(), "¬x2147483648");
    }

    #[test]
    fn display() {
        assert_eq!(lit!(3).to_string(), "x3");
        assert_eq!(lit!(-3).to_string(), "¬x3");
    }
}
