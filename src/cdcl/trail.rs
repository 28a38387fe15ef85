use super::{ClauseDb, ClauseRef};
use crate::Literal;
use std::{fmt, num::NonZeroU32};

/// Why a variable is assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    Decision,
    /// Forced by unit propagation of this clause
    Clause(ClauseRef),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Slot {
    literal: Literal,
    level: usize,
    reason: Reason,
    /// Position in [Trail::literals]
    position: usize,
}

/// Implication graph: the current partial assignment with levels and reasons.
///
/// Per-variable data lives in a table indexed densely by the rank of the variable among the
/// variables of the formula, so sparse IDs cost nothing. Assignments are also kept in the order
/// they were made, and the decision stack records where each level starts in that order, so
/// [Trail::backtrack] only touches what it undoes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trail {
    /// Variables of the formula in ascending order, `slots[i]` belongs to `variables[i]`
    variables: Vec<NonZeroU32>,
    slots: Vec<Option<Slot>>,
    assigned: Vec<Literal>,
    /// Position of the decision of level `i + 1` in `assigned`
    decisions: Vec<usize>,
}

impl Trail {
    /// Empty trail over `variables`, which must be strictly ascending
    pub fn new(variables: &[NonZeroU32]) -> Self {
        debug_assert!(
            variables.windows(2).all(|w| w[0] < w[1]),
            "Variables must be strictly ascending"
        );
        Self {
            variables: variables.to_vec(),
            slots: vec![None; variables.len()],
            assigned: Vec::with_capacity(variables.len()),
            decisions: Vec::new(),
        }
    }

    /// Number of variables the trail can assign
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Dense index of `id` in `0..num_variables()`, `None` if `id` is not a variable of the formula
    pub fn index(&self, id: NonZeroU32) -> Option<usize> {
        self.variables.binary_search(&id).ok()
    }

    /// Dense index of `lit` for per-literal tables, `2 * index` for positive and `2 * index + 1`
    /// for negative literals
    pub fn code(&self, lit: Literal) -> Option<usize> {
        self.index(lit.id).map(|index| 2 * index + usize::from(!lit.positive))
    }

    /// Current decision level. This returns 0 if in the root level.
    pub fn level(&self) -> usize {
        self.decisions.len()
    }

    /// Number of assigned variables
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    /// Assigned literals in the order they were assigned
    pub fn literals(&self) -> &[Literal] {
        &self.assigned
    }

    /// Decision literals, one per level starting from level 1
    pub fn decisions(&self) -> impl Iterator<Item = Literal> + '_ {
        self.decisions.iter().map(|&pos| self.assigned[pos])
    }

    fn slot(&self, id: NonZeroU32) -> Option<&Slot> {
        self.slots[self.index(id)?].as_ref()
    }

    /// The literal asserted for `id`, if any
    pub fn assignment(&self, id: NonZeroU32) -> Option<Literal> {
        self.slot(id).map(|s| s.literal)
    }

    pub fn is_assigned(&self, id: NonZeroU32) -> bool {
        self.slot(id).is_some()
    }

    /// Decision level at which `id` was assigned, `None` if unassigned
    pub fn level_of(&self, id: NonZeroU32) -> Option<usize> {
        self.slot(id).map(|s| s.level)
    }

    pub fn reason(&self, id: NonZeroU32) -> Option<Reason> {
        self.slot(id).map(|s| s.reason)
    }

    /// Position of `id` in [Trail::literals]
    pub fn position(&self, id: NonZeroU32) -> Option<usize> {
        self.slot(id).map(|s| s.position)
    }

    /// Truth value of `lit` under the current assignment
    pub fn value(&self, lit: Literal) -> Option<bool> {
        self.assignment(lit.id).map(|assigned| assigned == lit)
    }

    fn assign(&mut self, literal: Literal, reason: Reason) {
        let Some(index) = self.index(literal.id) else {
            panic!("x{} is not a variable of the formula", literal.id);
        };
        debug_assert!(
            self.slots[index].is_none(),
            "x{} is already assigned",
            literal.id
        );
        self.slots[index] = Some(Slot {
            literal,
            level: self.level(),
            reason,
            position: self.assigned.len(),
        });
        self.assigned.push(literal);
    }

    /// Open a new decision level with `literal` as its decision
    pub fn assign_decision(&mut self, literal: Literal) {
        self.decisions.push(self.assigned.len());
        self.assign(literal, Reason::Decision);
    }

    /// Record `literal` at the current level, forced by `reason`
    pub fn assign_implied(&mut self, literal: Literal, reason: ClauseRef) {
        self.assign(literal, Reason::Clause(reason));
    }

    /// Undo every assignment made above `level`
    pub fn backtrack(&mut self, level: usize) {
        let Some(&start) = self.decisions.get(level) else {
            // Already at or below `level`
            return;
        };
        for lit in self.assigned.drain(start..) {
            if let Ok(index) = self.variables.binary_search(&lit.id) {
                self.slots[index] = None;
            }
        }
        self.decisions.truncate(level);
    }

    pub fn reset(&mut self) {
        self.backtrack(0);
        for lit in self.assigned.drain(..) {
            if let Ok(index) = self.variables.binary_search(&lit.id) {
                self.slots[index] = None;
            }
        }
    }

    /// Render the trail in assignment order, with the reason clauses taken from `db`
    pub fn display<'a>(&'a self, db: &'a ClauseDb) -> TrailDisplay<'a> {
        TrailDisplay { trail: self, db }
    }
}

pub struct TrailDisplay<'a> {
    trail: &'a Trail,
    db: &'a ClauseDb,
}

impl fmt::Display for TrailDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let trail = self.trail;
        let level_width = trail.level().to_string().len();
        let Some(max_id) = trail.assigned.iter().map(|lit| lit.id).max() else {
            // No output for empty trail
            return Ok(());
        };
        let literal_width = max_id.to_string().len() + 2;

        for lit in &trail.assigned {
            let slot = trail.slot(lit.id).expect("Assigned literal has a slot");
            write!(
                f,
                "{:>level_width$} | {:<literal_width$} | ",
                slot.level,
                lit.to_string()
            )?;
            match slot.reason {
                Reason::Decision => writeln!(f, "Λ")?,
                Reason::Clause(cref) => writeln!(f, "{}", self.db[cref])?,
            }
        }
        Ok(())
    }
}
