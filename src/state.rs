use std::fmt::{Display, Formatter};

use crate::automaton::StateId;

/// Identity of a state while a correction is being derived.
///
/// The derived order is the scan order of the construction: original states
/// first (by id), then target classes (by id), then the start class.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StateRef {
    /// A state of the automaton under correction.
    Original(StateId),
    /// An equivalence class (state) of the target automaton, naming either
    /// a synthetic state introduced for it or the class an original state
    /// was mapped to.
    Class(StateId),
    /// The target's start class, tracked apart from its plain class id: a
    /// brand-new start state and a mid-path synthetic for the same class
    /// are different states and must stay distinguishable.
    StartClass,
}

impl StateRef {
    pub fn is_original(&self) -> bool {
        matches!(self, StateRef::Original(_))
    }

    /// Class identities, i.e. everything that may name a synthetic state.
    pub fn is_synthetic(&self) -> bool {
        !self.is_original()
    }
}

impl Display for StateRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StateRef::Original(id) => write!(f, "s{}", id),
            StateRef::Class(id) => write!(f, "c{}", id),
            StateRef::StartClass => write!(f, "start"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_order() {
        let mut refs = vec![
            StateRef::StartClass,
            StateRef::Class(0),
            StateRef::Original(2),
            StateRef::Class(3),
            StateRef::Original(0),
        ];
        refs.sort();
        assert_eq!(
            refs,
            vec![
                StateRef::Original(0),
                StateRef::Original(2),
                StateRef::Class(0),
                StateRef::Class(3),
                StateRef::StartClass,
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(StateRef::Original(4).to_string(), "s4");
        assert_eq!(StateRef::Class(1).to_string(), "c1");
        assert_eq!(StateRef::StartClass.to_string(), "start");
    }

    #[test]
    fn test_kind_predicates() {
        assert!(StateRef::Original(0).is_original());
        assert!(!StateRef::Original(0).is_synthetic());
        assert!(StateRef::Class(0).is_synthetic());
        assert!(StateRef::StartClass.is_synthetic());
    }
}
