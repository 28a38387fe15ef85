use crate::{Literal, Trail};
use serde::{Deserialize, Serialize};
use std::{fmt, num::NonZeroU32};

/// Decision policy of the CDCL engine
pub trait Decide: fmt::Debug {
    /// Literal to assert as the next decision, `None` if every variable is assigned.
    ///
    /// `variables` is the variable set of the input formula in ascending order.
    fn decide(&mut self, trail: &Trail, variables: &[NonZeroU32]) -> Option<Literal>;
}

pub fn take_minimal_id(trail: &Trail, variables: &[NonZeroU32]) -> Option<NonZeroU32> {
    variables.iter().copied().find(|id| !trail.is_assigned(*id))
}

/// The smallest unassigned variable, always set to true
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PositiveFirst;

impl Decide for PositiveFirst {
    fn decide(&mut self, trail: &Trail, variables: &[NonZeroU32]) -> Option<Literal> {
        take_minimal_id(trail, variables).map(Literal::positive)
    }
}

/// The smallest unassigned variable, set to true and false in turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AlternatingPhase {
    negative_next: bool,
}

impl Decide for AlternatingPhase {
    fn decide(&mut self, trail: &Trail, variables: &[NonZeroU32]) -> Option<Literal> {
        let id = take_minimal_id(trail, variables)?;
        let positive = !self.negative_next;
        self.negative_next = positive;
        Some(Literal { id, positive })
    }
}

/// Built-in decision policies
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    #[default]
    Positive,
    Alternating,
}

impl Phase {
    pub fn decider(self) -> Box<dyn Decide> {
        match self {
            Phase::Positive => Box::new(PositiveFirst),
            Phase::Alternating => Box::new(AlternatingPhase::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lit;

    fn ids(ids: &[u32]) -> Vec<NonZeroU32> {
        ids.iter().map(|&id| NonZeroU32::new(id).unwrap()).collect()
    }

    #[test]
    fn scan_order() {
        let variables = ids(&[2, 5, 7]);
        let mut trail = Trail::new(&variables);
        assert_eq!(PositiveFirst.decide(&trail, &variables), Some(lit!(2)));
        trail.assign_decision(lit!(2));
        assert_eq!(PositiveFirst.decide(&trail, &variables), Some(lit!(5)));
        trail.assign_decision(lit!(-5));
        trail.assign_decision(lit!(7));
        assert_eq!(PositiveFirst.decide(&trail, &variables), None);
    }

    #[test]
    fn alternating() {
        let variables = ids(&[1, 2, 3]);
        let mut trail = Trail::new(&variables);
        let mut decider = AlternatingPhase::default();
        for expected in [lit!(1), lit!(-2), lit!(3)] {
            let lit = decider.decide(&trail, &variables).unwrap();
            assert_eq!(lit, expected);
            trail.assign_decision(lit);
        }
        assert_eq!(decider.decide(&trail, &variables), None);
    }
}
