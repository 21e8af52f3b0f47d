use std::fmt::{Display, Formatter};

use crate::edits::EditBundle;
use crate::frontier::Frontier;

/// Handle of a symbol node in the forest arena.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Right child of a packed node: the payload of one derivation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackedChild {
    /// Another symbol node.
    Symbol(NodeId),
    /// The edits of one construction step.
    Edits(EditBundle),
    /// End of derivation: nothing left to correct.
    End,
}

/// One alternative of a symbol node: the continuation (left) paired with
/// this step's payload (right).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedNode {
    pub left: Option<NodeId>,
    pub right: PackedChild,
}

/// A frontier together with its packed alternatives. The node cache keeps
/// one symbol node per distinct frontier, so equal sub-derivations share.
#[derive(Debug, Clone)]
pub struct SymbolNode {
    pub(crate) frontier: Frontier,
    pub(crate) families: Vec<PackedNode>,
}

impl SymbolNode {
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn families(&self) -> &[PackedNode] {
        &self.families
    }
}
