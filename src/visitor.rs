//! Generic traversal over the packed forest.
//!
//! [`ForestVisitor`] is implemented by analyses that walk the forest:
//! minimal-cost extraction and correction counting both build on it. The
//! walk is driven by an explicit frame stack, so deep forests cannot
//! overflow the call stack, and an on-path set turns revisits of an
//! active ancestor into [`ForestVisitor::on_cycle`] calls instead of
//! infinite descent. A node reachable along several distinct paths is
//! visited once per path.
//!
//! Within one packed node the order is: left symbol subtree, then the
//! right child (symbol subtree or leaf), then `packed_out`.

use std::collections::HashSet;

use crate::edits::EditBundle;
use crate::forest::Forest;
use crate::node::{NodeId, PackedChild};

/// Callbacks fired during a forest walk. All hooks default to no-ops, so
/// implementors only write the ones they need.
pub trait ForestVisitor {
    /// A symbol node is entered, before any of its families.
    fn symbol_in(&mut self, _node: NodeId) {}

    /// A symbol node is left, after all of its families.
    fn symbol_out(&mut self, _node: NodeId) {}

    /// Family `family` of `node` is entered.
    fn packed_in(&mut self, _node: NodeId, _family: usize) {}

    /// Family `family` of `node` is left, after both children.
    fn packed_out(&mut self, _node: NodeId, _family: usize) {}

    /// The right child of the family is an edit bundle.
    fn edit_leaf(&mut self, _node: NodeId, _family: usize, _edits: &EditBundle) {}

    /// The right child of the family is the terminal leaf.
    fn end_leaf(&mut self, _node: NodeId, _family: usize) {}

    /// A child symbol node is already on the active path; the walk does
    /// not descend into it.
    fn on_cycle(&mut self, _node: NodeId) {}
}

enum Frame {
    EnterSymbol(NodeId),
    LeaveSymbol(NodeId),
    EnterPacked(NodeId, usize),
    LeavePacked(NodeId, usize),
    EditLeaf(NodeId, usize),
    EndLeaf(NodeId, usize),
}

impl Forest {
    /// Walks the whole forest from the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use cspf_rs::automaton::{Alphabet, Automaton};
    /// use cspf_rs::forest::Forest;
    /// use cspf_rs::node::NodeId;
    /// use cspf_rs::visitor::ForestVisitor;
    ///
    /// #[derive(Default)]
    /// struct EndCounter(usize);
    ///
    /// impl ForestVisitor for EndCounter {
    ///     fn end_leaf(&mut self, _node: NodeId, _family: usize) {
    ///         self.0 += 1;
    ///     }
    /// }
    ///
    /// let to_correct = Automaton::new([0], [(0, 'a', 0)], [0]);
    /// let target = Automaton::new([0], [(0, 'a', 0)], [0]);
    /// let forest = Forest::build(&to_correct, &target, &Alphabet::new(['a']))?;
    /// let mut counter = EndCounter::default();
    /// forest.visit(&mut counter);
    /// assert!(counter.0 > 0);
    /// # Ok::<(), cspf_rs::error::CorrectionError>(())
    /// ```
    pub fn visit<V: ForestVisitor>(&self, visitor: &mut V) {
        self.visit_from(self.root(), visitor);
    }

    /// Walks the subgraph reachable from `node`.
    pub fn visit_from<V: ForestVisitor>(&self, node: NodeId, visitor: &mut V) {
        let mut stack = vec![Frame::EnterSymbol(node)];
        let mut on_path: HashSet<NodeId> = HashSet::new();

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::EnterSymbol(node) => {
                    if !on_path.insert(node) {
                        visitor.on_cycle(node);
                        continue;
                    }
                    visitor.symbol_in(node);
                    stack.push(Frame::LeaveSymbol(node));
                    for family in (0..self.families(node).len()).rev() {
                        stack.push(Frame::EnterPacked(node, family));
                    }
                }
                Frame::LeaveSymbol(node) => {
                    on_path.remove(&node);
                    visitor.symbol_out(node);
                }
                Frame::EnterPacked(node, family) => {
                    visitor.packed_in(node, family);
                    let packed = &self.families(node)[family];
                    stack.push(Frame::LeavePacked(node, family));
                    match &packed.right {
                        PackedChild::Symbol(right) => stack.push(Frame::EnterSymbol(*right)),
                        PackedChild::Edits(_) => stack.push(Frame::EditLeaf(node, family)),
                        PackedChild::End => stack.push(Frame::EndLeaf(node, family)),
                    }
                    if let Some(left) = packed.left {
                        stack.push(Frame::EnterSymbol(left));
                    }
                }
                Frame::LeavePacked(node, family) => {
                    visitor.packed_out(node, family);
                }
                Frame::EditLeaf(node, family) => {
                    if let PackedChild::Edits(edits) = &self.families(node)[family].right {
                        visitor.edit_leaf(node, family, edits);
                    }
                }
                Frame::EndLeaf(node, family) => {
                    visitor.end_leaf(node, family);
                }
            }
        }
    }
}
