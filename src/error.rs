use crate::node::NodeId;
use crate::state::StateRef;

/// Errors reported by forest construction, queries, and correction replay.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CorrectionError {
    /// An input automaton has two transitions with the same source and symbol.
    #[error("automaton `{0}` is not deterministic")]
    NotDeterministic(&'static str),

    /// An input automaton uses a transition symbol outside the fixed alphabet.
    #[error("automaton `{0}` uses symbol {1:?} outside the alphabet")]
    ForeignSymbol(&'static str, char),

    /// An input automaton does not have exactly one initial state.
    #[error("automaton `{0}` must have exactly one initial state, found {1}")]
    InitialCount(&'static str, usize),

    /// The target automaton has a state with no outgoing transitions.
    #[error("target state {0} has no outgoing transitions")]
    PartialTarget(u32),

    /// Minimal-cost results were read before any costing pass ran.
    #[error("minimal corrections have not been computed yet")]
    NotComputed,

    /// Every alternative below the root loops back into itself.
    #[error("no finite correction reaches the terminal leaf")]
    Unresolved,

    /// Random descent re-entered a node on its own path.
    #[error("sampling revisited node {0} on its own path")]
    SamplingCycle(NodeId),

    /// Random descent reached a symbol node without alternatives.
    #[error("node {0} has no alternatives to sample from")]
    EmptyNode(NodeId),

    /// A transition endpoint names a class before any state was added for it.
    #[error("correction references class {0} before adding a state for it")]
    UnknownClass(StateRef),

    /// An initial or final mark names a class other than the one added in the
    /// current step.
    #[error("correction marks class {0} outside the step that added it")]
    ForeignClassMark(StateRef),

    /// An operation carries a payload kind it can never act on.
    #[error("{op} cannot act on {state}")]
    MalformedOperation { op: &'static str, state: StateRef },
}
