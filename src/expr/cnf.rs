use super::{Clause, Literal};
use std::{collections::BTreeSet, fmt};

/// Shape of a single node of an expression tree, as far as CNF is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    And,
    Or,
    /// A variable or the negation of a variable
    Literal(Literal),
    /// Anything else, e.g. constants or a negated compound expression
    Unsupported,
}

/// The capabilities [flatten] needs from an expression tree.
///
/// Any tree representation can be fed to the solver by implementing this trait;
/// see the implementation for [crate::Expr].
pub trait CnfNode {
    fn kind(&self) -> NodeKind;

    /// Both operands of a binary [NodeKind::And] or [NodeKind::Or] node
    fn operands(&self) -> Option<(&Self, &Self)>;

    /// Whether this node may appear in a CNF expression at all
    fn is_cnf_node(&self) -> bool {
        !matches!(self.kind(), NodeKind::Unsupported)
    }
}

/// The expression handed to [flatten] is not in conjunctive normal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotCnfError {
    node: String,
}

impl NotCnfError {
    const MAX_NODE_WIDTH: usize = 80;

    fn new(node: &impl fmt::Display) -> Self {
        let mut node = node.to_string();
        if let Some((cut, _)) = node.char_indices().nth(Self::MAX_NODE_WIDTH) {
            node.truncate(cut);
            node.push('…');
        }
        Self { node }
    }

    /// Rendering of the offending node
    pub fn node(&self) -> &str {
        &self.node
    }
}

impl fmt::Display for NotCnfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expression is not in CNF: {}", self.node)
    }
}

impl std::error::Error for NotCnfError {}

/// Decompose a CNF expression into its clauses, in left-to-right order.
///
/// ```rust
/// use uipsat::{clause, flatten, Expr};
///
/// let x = Expr::variable;
/// let expr = (x(1) | !x(2)) & x(3) & (x(2) | x(4) | x(1));
/// assert_eq!(
///     flatten(&expr).unwrap(),
///     vec![clause![1, -2], clause![3], clause![1, 2, 4]]
/// );
///
/// // Disjunction of conjunctions is not CNF
/// assert!(flatten(&(x(1) | (x(2) & x(3)))).is_err());
/// ```
pub fn flatten<N>(root: &N) -> Result<Vec<Clause>, NotCnfError>
where
    N: CnfNode + fmt::Display,
{
    let mut clauses = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if !node.is_cnf_node() {
            return Err(NotCnfError::new(node));
        }
        match node.kind() {
            NodeKind::And => {
                let (lhs, rhs) = node.operands().ok_or_else(|| NotCnfError::new(node))?;
                // Pushed in reverse so that the left operand is visited first
                stack.push(rhs);
                stack.push(lhs);
            }
            NodeKind::Or | NodeKind::Literal(_) => clauses.push(clause_of(node)?),
            NodeKind::Unsupported => unreachable!("Checked by is_cnf_node"),
        }
    }
    Ok(clauses)
}

/// Collect the literals of a disjunction (or of a single literal) into a clause
fn clause_of<N>(node: &N) -> Result<Clause, NotCnfError>
where
    N: CnfNode + fmt::Display,
{
    let mut literals = BTreeSet::new();
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        match node.kind() {
            NodeKind::Literal(lit) => {
                literals.insert(lit);
            }
            NodeKind::Or => {
                let (lhs, rhs) = node.operands().ok_or_else(|| NotCnfError::new(node))?;
                stack.push(rhs);
                stack.push(lhs);
            }
            NodeKind::And | NodeKind::Unsupported => return Err(NotCnfError::new(node)),
        }
    }
    Ok(Clause::new(literals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clause, Expr};

    fn x(id: u32) -> Expr {
        Expr::variable(id)
    }

    #[test]
    fn single_literal() {
        assert_eq!(flatten(&x(1)).unwrap(), vec![clause![1]]);
        assert_eq!(flatten(&!x(1)).unwrap(), vec![clause![-1]]);
    }

    #[test]
    fn keeps_duplicate_clauses_and_tautologies() {
        let expr = (x(1) | !x(1)) & x(2) & x(2);
        assert_eq!(
            flatten(&expr).unwrap(),
            vec![clause![1, -1], clause![2], clause![2]]
        );
    }

    #[test]
    fn rejects_constants_anywhere() {
        assert!(flatten(&Expr::True).is_err());
        assert!(flatten(&(x(1) & Expr::False)).is_err());
        assert!(flatten(&(x(1) & (x(2) | Expr::True))).is_err());
    }

    #[test]
    fn rejects_nested_negation() {
        let err = flatten(&(x(1) & !!x(2))).unwrap_err();
        assert_eq!(err.node(), "¬¬x2");
        assert_eq!(err.to_string(), "Expression is not in CNF: ¬¬x2");
        assert!(flatten(&!(x(1) | x(2))).is_err());
    }

    #[test]
    fn rejects_conjunction_below_disjunction() {
        let err = flatten(&((x(1) & x(2)) | x(3))).unwrap_err();
        assert_eq!(err.node(), "x1 ∧ x2");
    }

    #[test]
    fn rejects_zero_variable() {
        assert!(flatten(&x(0)).is_err());
    }

    #[test]
    fn deep_conjunction_does_not_recurse() {
        let mut expr = x(1);
        for id in 2..=20_000 {
            expr = expr & x(id);
        }
        let clauses = flatten(&expr).unwrap();
        assert_eq!(clauses.len(), 20_000);
        assert_eq!(clauses[0], clause![1]);
        assert_eq!(clauses[19_999], clause![20_000]);
        // Dropping a left-leaning chain is recursive, so leak it instead
        std::mem::forget(expr);
    }

    #[test]
    fn long_error_is_truncated() {
        let exprs = (1..=100).map(x).collect();
        let bad = Expr::conjunction(exprs).unwrap() | x(101);
        let err = flatten(&bad).unwrap_err();
        assert!(err.node().ends_with('…'));
        assert_eq!(err.node().chars().count(), 81);
    }
}
