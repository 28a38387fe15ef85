use std::{
    fmt,
    num::NonZeroU32,
    ops::{BitAnd, BitOr, Not},
};

mod clause;
mod cnf;
mod literal;

pub use clause::Clause;
pub use cnf::{flatten, CnfNode, NodeKind, NotCnfError};
pub use literal::Literal;

/// Expression in propositional (or Boolean) logic.
///
/// This does not assume that the expression is in conjunctive normal form (CNF).
/// [flatten] rejects expressions which are not.
///
/// # Examples
///
/// [BitAnd] (`&`), [BitOr] (`|`), and [Not] (`!`) operators can be used to construct ∧, ∨, and ¬ operations.
///
/// ```rust
/// use uipsat::Expr;
///
/// let expr = Expr::variable(1) & Expr::variable(2) | Expr::variable(3);
/// assert_eq!(expr.to_string(), "(x1 ∧ x2) ∨ x3");
///
/// let expr = Expr::variable(1) | Expr::variable(2) & Expr::variable(3);
/// assert_eq!(expr.to_string(), "x1 ∨ (x2 ∧ x3)");
///
/// let expr = !Expr::variable(1) & Expr::variable(2);
/// assert_eq!(expr.to_string(), "¬x1 ∧ x2");
/// ```
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),

    /// Propositional variable.
    Var {
        /// Unique identifier for the variable. `0` is not a valid variable.
        id: u32,
    },
    /// True constant.
    True,
    /// False constant.
    False,
}

impl Expr {
    /// Propositional variable.
    pub fn variable(id: u32) -> Expr {
        Expr::Var { id }
    }

    /// Literal in DIMACS convention, i.e. `-3` is `¬x3`.
    pub fn literal(lit: Literal) -> Expr {
        let var = Expr::variable(lit.id.get());
        if lit.positive {
            var
        } else {
            !var
        }
    }

    /// Conjunction of `exprs` as a balanced tree, `None` if `exprs` is empty.
    pub fn conjunction(exprs: Vec<Expr>) -> Option<Expr> {
        balanced(exprs, |a, b| a & b)
    }

    /// Disjunction of `exprs` as a balanced tree, `None` if `exprs` is empty.
    pub fn disjunction(exprs: Vec<Expr>) -> Option<Expr> {
        balanced(exprs, |a, b| a | b)
    }
}

/// Pairwise reduction keeps the depth logarithmic, so dropping a large tree does not exhaust the stack.
fn balanced(mut exprs: Vec<Expr>, join: impl Fn(Expr, Expr) -> Expr) -> Option<Expr> {
    while exprs.len() > 1 {
        let mut next = Vec::with_capacity(exprs.len().div_ceil(2));
        let mut iter = exprs.into_iter();
        while let Some(lhs) = iter.next() {
            match iter.next() {
                Some(rhs) => next.push(join(lhs, rhs)),
                None => next.push(lhs),
            }
        }
        exprs = next;
    }
    exprs.pop()
}

impl CnfNode for Expr {
    fn kind(&self) -> NodeKind {
        match self {
            Expr::And(..) => NodeKind::And,
            Expr::Or(..) => NodeKind::Or,
            Expr::Var { id } => match NonZeroU32::new(*id) {
                Some(id) => NodeKind::Literal(Literal::positive(id)),
                None => NodeKind::Unsupported,
            },
            Expr::Not(inner) => match inner.as_ref() {
                Expr::Var { id } => match NonZeroU32::new(*id) {
                    Some(id) => NodeKind::Literal(Literal::negative(id)),
                    None => NodeKind::Unsupported,
                },
                _ => NodeKind::Unsupported,
            },
            Expr::True | Expr::False => NodeKind::Unsupported,
        }
    }

    fn operands(&self) -> Option<(&Self, &Self)> {
        match self {
            Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) => Some((lhs.as_ref(), rhs.as_ref())),
            _ => None,
        }
    }
}

impl From<u32> for Expr {
    fn from(id: u32) -> Self {
        Expr::variable(id)
    }
}

impl From<Literal> for Expr {
    fn from(lit: Literal) -> Self {
        Expr::literal(lit)
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        if b {
            Expr::True
        } else {
            Expr::False
        }
    }
}

impl BitAnd for Expr {
    type Output = Expr;
    fn bitand(self, rhs: Self) -> Self::Output {
        Expr::And(Box::new(self), Box::new(rhs))
    }
}

impl BitOr for Expr {
    type Output = Expr;
    fn bitor(self, rhs: Self) -> Self::Output {
        Expr::Or(Box::new(self), Box::new(rhs))
    }
}

impl Not for Expr {
    type Output = Expr;
    fn not(self) -> Self::Output {
        Expr::Not(Box::new(self))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::And(lhs, rhs) => {
                match lhs.as_ref() {
                    Expr::Or(_, _) => write!(f, "({})", lhs)?,
                    _ => write!(f, "{}", lhs)?,
                }
                write!(f, " ∧ ")?;
                match rhs.as_ref() {
                    Expr::Or(_, _) => write!(f, "({})", rhs),
                    _ => write!(f, "{}", rhs),
                }
            }
            Expr::Or(lhs, rhs) => {
                match lhs.as_ref() {
                    Expr::And(_, _) => write!(f, "({})", lhs)?,
                    _ => write!(f, "{}", lhs)?,
                }
                write!(f, " ∨ ")?;
                match rhs.as_ref() {
                    Expr::And(_, _) => write!(f, "({})", rhs),
                    _ => write!(f, "{}", rhs),
                }
            }
            Expr::Not(e) => match e.as_ref() {
                Expr::And(..) | Expr::Or(..) => write!(f, "¬({})", e),
                _ => write!(f, "¬{}", e),
            },
            Expr::Var { id } => write!(f, "x{}", id),
            Expr::True => write!(f, "⊤"),
            Expr::False => write!(f, "⊥"),
        }
    }
}
