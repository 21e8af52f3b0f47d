//! Edit operations, bundles, and the per-operation cost model.

use std::fmt::{Display, Formatter};

use crate::state::StateRef;

/// A single edit applied to the automaton under correction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditOp {
    /// Create a brand-new state standing for the given class.
    AddNewState { state: StateRef },
    /// Add a transition.
    AddTransition {
        source: StateRef,
        symbol: char,
        target: StateRef,
    },
    /// Keep the existing initial mark where it is.
    LeaveInitial { state: StateRef },
    /// Keep an existing transition as it is.
    LeaveTransition {
        source: StateRef,
        symbol: char,
        target: StateRef,
    },
    /// Mark a state as the initial one.
    MarkAsInitial { state: StateRef },
    /// Make a state accepting.
    MarkStateAsFinal { state: StateRef },
    /// Make a state non-accepting.
    MarkStateAsNonFinal { state: StateRef },
    /// Drop the existing initial mark.
    RemoveMarkAsInitial { state: StateRef },
    /// Drop a transition.
    RemoveTransition {
        source: StateRef,
        symbol: char,
        target: StateRef,
    },
}

/// The ordered edits of one construction step.
pub type EditBundle = Vec<EditOp>;

/// An ordered sequence of bundles, from the initial-state choice onwards.
pub type Correction = Vec<EditBundle>;

impl Display for EditOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EditOp::AddNewState { state } => write!(f, "AddNewState({})", state),
            EditOp::AddTransition { source, symbol, target } => {
                write!(f, "AddTransition({} -{}-> {})", source, symbol, target)
            }
            EditOp::LeaveInitial { state } => write!(f, "LeaveInitial({})", state),
            EditOp::LeaveTransition { source, symbol, target } => {
                write!(f, "LeaveTransition({} -{}-> {})", source, symbol, target)
            }
            EditOp::MarkAsInitial { state } => write!(f, "MarkAsInitial({})", state),
            EditOp::MarkStateAsFinal { state } => write!(f, "MarkStateAsFinal({})", state),
            EditOp::MarkStateAsNonFinal { state } => write!(f, "MarkStateAsNonFinal({})", state),
            EditOp::RemoveMarkAsInitial { state } => write!(f, "RemoveMarkAsInitial({})", state),
            EditOp::RemoveTransition { source, symbol, target } => {
                write!(f, "RemoveTransition({} -{}-> {})", source, symbol, target)
            }
        }
    }
}

/// Cost of each operation kind. Keeping things costs nothing by default;
/// every change costs one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCosts {
    pub add_new_state: u64,
    pub add_transition: u64,
    pub leave_initial: u64,
    pub leave_transition: u64,
    pub mark_as_initial: u64,
    pub mark_final: u64,
    pub mark_non_final: u64,
    pub remove_initial_mark: u64,
    pub remove_transition: u64,
}

impl Default for EditCosts {
    fn default() -> Self {
        Self {
            add_new_state: 1,
            add_transition: 1,
            leave_initial: 0,
            leave_transition: 0,
            mark_as_initial: 1,
            mark_final: 1,
            mark_non_final: 1,
            remove_initial_mark: 1,
            remove_transition: 1,
        }
    }
}

impl EditCosts {
    pub fn op_cost(&self, op: &EditOp) -> u64 {
        match op {
            EditOp::AddNewState { .. } => self.add_new_state,
            EditOp::AddTransition { .. } => self.add_transition,
            EditOp::LeaveInitial { .. } => self.leave_initial,
            EditOp::LeaveTransition { .. } => self.leave_transition,
            EditOp::MarkAsInitial { .. } => self.mark_as_initial,
            EditOp::MarkStateAsFinal { .. } => self.mark_final,
            EditOp::MarkStateAsNonFinal { .. } => self.mark_non_final,
            EditOp::RemoveMarkAsInitial { .. } => self.remove_initial_mark,
            EditOp::RemoveTransition { .. } => self.remove_transition,
        }
    }

    pub fn bundle_cost(&self, bundle: &[EditOp]) -> u64 {
        bundle.iter().map(|op| self.op_cost(op)).sum()
    }

    pub fn correction_cost(&self, correction: &[EditBundle]) -> u64 {
        correction.iter().map(|bundle| self.bundle_cost(bundle)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_costs() {
        let costs = EditCosts::default();
        assert_eq!(costs.op_cost(&EditOp::LeaveInitial { state: StateRef::Original(0) }), 0);
        assert_eq!(
            costs.op_cost(&EditOp::LeaveTransition {
                source: StateRef::Original(0),
                symbol: 'a',
                target: StateRef::Original(1),
            }),
            0
        );
        assert_eq!(costs.op_cost(&EditOp::AddNewState { state: StateRef::StartClass }), 1);
        assert_eq!(costs.op_cost(&EditOp::MarkAsInitial { state: StateRef::Class(1) }), 1);
    }

    #[test]
    fn test_correction_cost_sums_bundles() {
        let costs = EditCosts::default();
        let correction: Correction = vec![
            vec![
                EditOp::RemoveMarkAsInitial { state: StateRef::Original(0) },
                EditOp::MarkAsInitial { state: StateRef::Original(1) },
            ],
            vec![EditOp::LeaveTransition {
                source: StateRef::Original(1),
                symbol: 'a',
                target: StateRef::Original(1),
            }],
            vec![EditOp::AddTransition {
                source: StateRef::Original(1),
                symbol: '0',
                target: StateRef::Original(0),
            }],
        ];
        assert_eq!(costs.correction_cost(&correction), 3);
    }

    #[test]
    fn test_custom_costs() {
        let costs = EditCosts {
            remove_transition: 5,
            ..EditCosts::default()
        };
        let op = EditOp::RemoveTransition {
            source: StateRef::Original(0),
            symbol: 'a',
            target: StateRef::Original(1),
        };
        assert_eq!(costs.op_cost(&op), 5);
    }

    #[test]
    fn test_display() {
        let op = EditOp::AddTransition {
            source: StateRef::Original(0),
            symbol: 'a',
            target: StateRef::Class(1),
        };
        assert_eq!(op.to_string(), "AddTransition(s0 -a-> c1)");
        let op = EditOp::RemoveMarkAsInitial { state: StateRef::Original(2) };
        assert_eq!(op.to_string(), "RemoveMarkAsInitial(s2)");
    }
}
