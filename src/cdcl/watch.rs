//! Unit propagation

use super::{ClauseDb, ClauseRef, Trail};
use crate::{Clause, Literal};

/// State of a clause under a partial assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Status {
    Satisfied,
    /// Exactly one literal is unassigned and all others are false
    Unit(Literal),
    /// Every literal is false
    Falsified,
    Unresolved,
}

pub(crate) fn evaluate(clause: &Clause, trail: &Trail) -> Status {
    let mut unassigned = None;
    let mut num_unassigned = 0;
    for &lit in clause.literals() {
        match trail.value(lit) {
            Some(true) => return Status::Satisfied,
            Some(false) => {}
            None => {
                num_unassigned += 1;
                unassigned = Some(lit);
            }
        }
    }
    match (num_unassigned, unassigned) {
        (0, _) => Status::Falsified,
        (1, Some(lit)) => Status::Unit(lit),
        _ => Status::Unresolved,
    }
}

/// Scan every clause until a whole pass assigns nothing.
///
/// Returns the first falsified clause found.
pub(crate) fn full_scan(db: &ClauseDb, trail: &mut Trail) -> Option<ClauseRef> {
    loop {
        let mut changed = false;
        for (cref, clause) in db.iter() {
            match evaluate(clause, trail) {
                Status::Unit(lit) => {
                    log::trace!("Implied: {} by {}", lit, clause);
                    trail.assign_implied(lit, cref);
                    changed = true;
                }
                Status::Falsified => return Some(cref),
                Status::Satisfied | Status::Unresolved => {}
            }
        }
        if !changed {
            return None;
        }
    }
}

/// Two watched literals.
///
/// Every clause watches two of its positions (both the same one for a unit clause). A clause is
/// only looked at when one of its watched literals becomes false. The positions are kept here
/// rather than by reordering the clause, so clauses in the [ClauseDb] are never modified.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Watcher {
    /// Clauses watching each literal, indexed by [Trail::code]
    watches: Vec<Vec<ClauseRef>>,
    /// Watched positions of each clause
    positions: Vec<[usize; 2]>,
    /// Next position of the trail to propagate
    head: usize,
    /// Clauses to be evaluated in full before watching
    pending: Vec<ClauseRef>,
}

impl Watcher {
    /// Watch every clause of `db` over the variables of `trail`, which must be empty
    pub(crate) fn new(db: &ClauseDb, trail: &Trail) -> Self {
        debug_assert!(trail.is_empty());
        let mut watcher = Self {
            watches: vec![Vec::new(); 2 * trail.num_variables()],
            positions: Vec::with_capacity(db.len()),
            head: 0,
            pending: Vec::with_capacity(db.len()),
        };
        for (cref, clause) in db.iter() {
            watcher.attach(cref, clause, trail);
        }
        watcher
    }

    fn watch(&mut self, lit: Literal, cref: ClauseRef, trail: &Trail) {
        if let Some(code) = trail.code(lit) {
            self.watches[code].push(cref);
        }
    }

    /// Start watching a clause appended to the database.
    ///
    /// Non-false literals are preferred as watches, then false ones assigned at the highest levels.
    /// The clause is evaluated in full by the next [Watcher::propagate].
    pub(crate) fn attach(&mut self, cref: ClauseRef, clause: &Clause, trail: &Trail) {
        debug_assert_eq!(cref.index(), self.positions.len());
        let rank = |pos: &usize| {
            let lit = clause.literals()[*pos];
            match trail.value(lit) {
                Some(false) => trail.level_of(lit.id),
                _ => Some(usize::MAX),
            }
        };
        let mut order: Vec<usize> = (0..clause.len()).collect();
        order.sort_by_key(|pos| std::cmp::Reverse(rank(pos)));
        let positions = match order.as_slice() {
            [] => [0, 0],
            [only] => [*only, *only],
            [first, second, ..] => [*first, *second],
        };
        self.positions.push(positions);
        if let Some(lit) = clause.literals().get(positions[0]) {
            self.watch(*lit, cref, trail);
        }
        if positions[1] != positions[0] {
            self.watch(clause.literals()[positions[1]], cref, trail);
        }
        self.pending.push(cref);
    }

    /// Forget the propagation of assignments undone by a backtrack
    pub(crate) fn backtrack(&mut self, trail: &Trail) {
        self.head = self.head.min(trail.len());
    }

    /// Propagate every assignment made since the last call.
    ///
    /// This returns if
    /// - A conflict clause is found. In this case, the conflict clause is returned.
    /// - All implications are resolved. In this case, `None` is returned.
    pub(crate) fn propagate(&mut self, db: &ClauseDb, trail: &mut Trail) -> Option<ClauseRef> {
        let pending = std::mem::take(&mut self.pending);
        for (i, &cref) in pending.iter().enumerate() {
            match evaluate(&db[cref], trail) {
                Status::Unit(lit) => {
                    log::trace!("Implied: {} by {}", lit, db[cref]);
                    trail.assign_implied(lit, cref);
                }
                Status::Falsified => {
                    // Still pending after the backjump
                    self.pending.extend_from_slice(&pending[i..]);
                    return Some(cref);
                }
                Status::Satisfied | Status::Unresolved => {}
            }
        }

        while self.head < trail.len() {
            let lit = trail.literals()[self.head];
            self.head += 1;
            if let Some(conflict) = self.falsify(!lit, db, trail) {
                return Some(conflict);
            }
        }
        None
    }

    /// Visit every clause watching `lit`, which has just become false
    fn falsify(&mut self, lit: Literal, db: &ClauseDb, trail: &mut Trail) -> Option<ClauseRef> {
        let code = trail.code(lit)?;
        let mut watchers = std::mem::take(&mut self.watches[code]);
        let mut conflict = None;
        let mut kept = 0;
        let mut i = 0;
        while i < watchers.len() {
            let cref = watchers[i];
            i += 1;
            let literals = db[cref].literals();
            let [a, b] = self.positions[cref.index()];
            let (this, other) = if literals[a] == lit { (0, b) } else { (1, a) };
            let other_lit = literals[other];
            let other_value = trail.value(other_lit);

            if other_value != Some(true) {
                let replacement = (0..literals.len())
                    .find(|&k| k != a && k != b && trail.value(literals[k]) != Some(false));
                if let Some(k) = replacement {
                    self.positions[cref.index()][this] = k;
                    self.watch(literals[k], cref, trail);
                    continue;
                }
            }

            watchers[kept] = cref;
            kept += 1;
            match other_value {
                Some(true) => {}
                None => {
                    log::trace!("Implied: {} by {}", other_lit, db[cref]);
                    trail.assign_implied(other_lit, cref);
                }
                Some(false) => {
                    conflict = Some(cref);
                    while i < watchers.len() {
                        watchers[kept] = watchers[i];
                        kept += 1;
                        i += 1;
                    }
                }
            }
        }
        watchers.truncate(kept);
        self.watches[code] = watchers;
        conflict
    }
}
