//! Forest construction by exhaustive frontier exploration.
//!
//! `Forest::build` explores every way of making `to_correct` language-equal
//! to `minimal_dfa`: each path maps original states onto target classes (or
//! introduces synthetic states for classes) and rewires one transition per
//! step. Paths reaching equal frontiers continue through the same symbol
//! node, so the result is a shared packed forest rather than a correction
//! list. Queries live in sibling modules: minimal-cost extraction, random
//! sampling, counting, and DOT export.

use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;

use log::debug;

use crate::automaton::{Alphabet, Automaton, StateId};
use crate::cost::MinimalSet;
use crate::edits::{EditBundle, EditOp};
use crate::error::CorrectionError;
use crate::frontier::Frontier;
use crate::node::{NodeId, PackedChild, PackedNode, SymbolNode};
use crate::state::StateRef;

/// A shared packed forest of corrections.
///
/// Symbol nodes live in an arena addressed by [`NodeId`]; construction
/// interns one node per distinct frontier, so sharing is structural. The
/// structure is read-only after construction; a costing pass records its
/// result separately.
#[derive(Clone)]
pub struct Forest {
    nodes: Vec<SymbolNode>,
    root: NodeId,
    pub(crate) minimal: Option<MinimalSet>,
}

impl Debug for Forest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Forest")
            .field("nodes", &self.nodes.len())
            .field("root", &self.root)
            .finish()
    }
}

impl Forest {
    /// Builds the forest of all corrections turning `to_correct` into an
    /// automaton language-equivalent to `minimal_dfa`.
    pub fn build(
        to_correct: &Automaton,
        minimal_dfa: &Automaton,
        alphabet: &Alphabet,
    ) -> Result<Forest, CorrectionError> {
        let (old_initial, start_class) = check_inputs(to_correct, minimal_dfa, alphabet)?;
        let mut builder = Builder::new(to_correct, minimal_dfa, alphabet, old_initial, start_class);
        builder.run();
        Ok(builder.finish())
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    pub fn node(&self, id: NodeId) -> &SymbolNode {
        &self.nodes[id.index()]
    }

    pub fn frontier(&self, id: NodeId) -> &Frontier {
        &self.nodes[id.index()].frontier
    }

    pub fn families(&self, id: NodeId) -> &[PackedNode] {
        &self.nodes[id.index()].families
    }

    /// Assembles a forest from raw nodes, bypassing construction. Tests use
    /// this to exercise traversal on shapes `build` cannot produce, such as
    /// cyclic graphs.
    #[cfg(test)]
    pub(crate) fn from_parts(nodes: Vec<SymbolNode>, root: NodeId) -> Forest {
        Forest {
            nodes,
            root,
            minimal: None,
        }
    }
}

/// Validates the inputs and returns the initial state of `to_correct` and
/// the start class of `minimal_dfa`.
fn check_inputs(
    to_correct: &Automaton,
    minimal_dfa: &Automaton,
    alphabet: &Alphabet,
) -> Result<(StateId, StateId), CorrectionError> {
    for (role, automaton) in [("to_correct", to_correct), ("minimal_dfa", minimal_dfa)] {
        if !automaton.is_deterministic() {
            return Err(CorrectionError::NotDeterministic(role));
        }
        for &(_, symbol, _) in automaton.transitions() {
            if !alphabet.contains(symbol) {
                return Err(CorrectionError::ForeignSymbol(role, symbol));
            }
        }
        if automaton.initials().len() != 1 {
            return Err(CorrectionError::InitialCount(role, automaton.initials().len()));
        }
    }
    for state in minimal_dfa.states() {
        if minimal_dfa.all_successors(state).next().is_none() {
            return Err(CorrectionError::PartialTarget(state));
        }
    }
    let old_initial = to_correct
        .initials()
        .iter()
        .next()
        .copied()
        .ok_or(CorrectionError::InitialCount("to_correct", 0))?;
    let start_class = minimal_dfa
        .initials()
        .iter()
        .next()
        .copied()
        .ok_or(CorrectionError::InitialCount("minimal_dfa", 0))?;
    Ok((old_initial, start_class))
}

struct Builder<'a> {
    to_correct: &'a Automaton,
    minimal_dfa: &'a Automaton,
    alphabet: &'a Alphabet,
    old_initial: StateId,
    start_class: StateId,
    originals: Vec<StateId>,
    nodes: Vec<SymbolNode>,
    cache: HashMap<Frontier, NodeId>,
    worklist: VecDeque<NodeId>,
    root: NodeId,
}

impl<'a> Builder<'a> {
    fn new(
        to_correct: &'a Automaton,
        minimal_dfa: &'a Automaton,
        alphabet: &'a Alphabet,
        old_initial: StateId,
        start_class: StateId,
    ) -> Self {
        // The root holds the empty frontier. It is interned by hand: its
        // families are the initial-state alternatives, never the terminal.
        let root_frontier = Frontier::default();
        let nodes = vec![SymbolNode {
            frontier: root_frontier.clone(),
            families: Vec::new(),
        }];
        let mut cache = HashMap::new();
        cache.insert(root_frontier, NodeId(0));
        Self {
            to_correct,
            minimal_dfa,
            alphabet,
            old_initial,
            start_class,
            originals: to_correct.states().collect(),
            nodes,
            cache,
            worklist: VecDeque::new(),
            root: NodeId(0),
        }
    }

    fn run(&mut self) {
        self.seed_initial_choices();
        while let Some(id) = self.worklist.pop_front() {
            self.expand(id);
        }
    }

    fn finish(self) -> Forest {
        debug!("forest of {} nodes", self.nodes.len());
        Forest {
            nodes: self.nodes,
            root: self.root,
            minimal: None,
        }
    }

    /// Returns the node for a frontier, creating and scheduling it if new.
    /// A complete frontier receives the terminal leaf as its only child and
    /// is never scheduled.
    fn intern(&mut self, frontier: Frontier) -> NodeId {
        if let Some(&id) = self.cache.get(&frontier) {
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        debug!("node {} for {}", id, frontier);
        let complete = frontier.is_complete();
        self.cache.insert(frontier.clone(), id);
        self.nodes.push(SymbolNode {
            frontier,
            families: Vec::new(),
        });
        if complete {
            self.nodes[id.index()].families.push(PackedNode {
                left: None,
                right: PackedChild::End,
            });
        } else {
            self.worklist.push_back(id);
        }
        id
    }

    fn add_family(&mut self, parent: NodeId, destination: Frontier, edits: EditBundle) {
        let child = self.intern(destination);
        self.nodes[parent.index()].families.push(PackedNode {
            left: Some(child),
            right: PackedChild::Edits(edits),
        });
    }

    /// Every original state may serve as the corrected initial state, and
    /// one extra alternative introduces a brand-new start state.
    fn seed_initial_choices(&mut self) {
        let start_accepting = self.minimal_dfa.is_final(self.start_class);

        for i in 0..self.originals.len() {
            let s = self.originals[i];
            let mut frontier = Frontier::default();
            frontier.mapping.insert(s, StateRef::StartClass);
            frontier.queue.insert(StateRef::Original(s));

            let mut edits = Vec::new();
            if s == self.old_initial {
                edits.push(EditOp::LeaveInitial { state: StateRef::Original(s) });
            } else {
                edits.push(EditOp::RemoveMarkAsInitial {
                    state: StateRef::Original(self.old_initial),
                });
                edits.push(EditOp::MarkAsInitial { state: StateRef::Original(s) });
            }
            if let Some(fix) = self.finality_fix(s, start_accepting) {
                edits.push(fix);
            }
            self.add_family(self.root, frontier, edits);
        }

        let mut frontier = Frontier::default();
        frontier.queue.insert(StateRef::StartClass);
        frontier.added.insert(StateRef::StartClass);
        let mut edits = vec![
            EditOp::RemoveMarkAsInitial {
                state: StateRef::Original(self.old_initial),
            },
            EditOp::AddNewState { state: StateRef::StartClass },
            EditOp::MarkAsInitial { state: StateRef::StartClass },
        ];
        if start_accepting {
            edits.push(EditOp::MarkStateAsFinal { state: StateRef::StartClass });
        }
        self.add_family(self.root, frontier, edits);
    }

    /// Emits the alternatives for one scan step of the popped node.
    fn expand(&mut self, id: NodeId) {
        let frontier = self.nodes[id.index()].frontier.clone();
        let focus = match frontier.scan_target() {
            Some(focus) => focus,
            None => return, // complete nodes are never scheduled
        };
        let symbol = self.alphabet.symbol(frontier.seen);
        let class = self.focus_class(&frontier, focus);
        debug!("expand {}: focus {} (class {}) on {:?}", id, focus, class, symbol);

        let base = frontier.advanced(focus, self.alphabet.len());

        let Some(successor) = self.minimal_dfa.successor(class, symbol) else {
            // The target has no move on this symbol, so the corrected
            // automaton must not have one either.
            let edits = match self.existing_transition(focus, symbol) {
                Some(target) => vec![EditOp::RemoveTransition {
                    source: focus,
                    symbol,
                    target: StateRef::Original(target),
                }],
                None => Vec::new(),
            };
            self.add_family(id, base, edits);
            return;
        };

        let succ_ref = StateRef::Class(successor);
        let succ_accepting = self.minimal_dfa.is_final(successor);

        // (1) reuse any original state already equivalent to the successor
        for (&t, &value) in frontier.mapping.iter() {
            if self.class_of_value(value) == successor {
                let edits = self.transition_edits(focus, symbol, StateRef::Original(t));
                self.add_family(id, base.clone(), edits);
            }
        }

        // (2) claim any still-unmapped original state for it
        for i in 0..self.originals.len() {
            let t = self.originals[i];
            if frontier.mapping.contains_key(&t) {
                continue;
            }
            let mut destination = base.clone();
            destination.mapping.insert(t, succ_ref);
            destination.queue.insert(StateRef::Original(t));
            let mut edits = self.transition_edits(focus, symbol, StateRef::Original(t));
            if let Some(fix) = self.finality_fix(t, succ_accepting) {
                edits.push(fix);
            }
            self.add_family(id, destination, edits);
        }

        if !frontier.added.contains(&succ_ref) {
            // (3) introduce a brand-new state for the successor class
            let mut destination = base.clone();
            destination.queue.insert(succ_ref);
            destination.added.insert(succ_ref);
            let mut edits = vec![EditOp::AddNewState { state: succ_ref }];
            if succ_accepting {
                edits.push(EditOp::MarkStateAsFinal { state: succ_ref });
            }
            edits.extend(self.transition_edits(focus, symbol, succ_ref));
            self.add_family(id, destination, edits);
        } else {
            // (4) reconnect to the state already introduced for it
            let edits = self.transition_edits(focus, symbol, succ_ref);
            self.add_family(id, base.clone(), edits);
        }

        // (5) the successor may also be served by a synthetic start state
        if successor == self.start_class && frontier.added.contains(&StateRef::StartClass) {
            let edits = self.transition_edits(focus, symbol, StateRef::StartClass);
            self.add_family(id, base, edits);
        }
    }

    /// Class index a mapping value or synthetic identity stands for.
    fn class_of_value(&self, value: StateRef) -> StateId {
        match value {
            StateRef::Class(class) => class,
            StateRef::StartClass => self.start_class,
            StateRef::Original(_) => unreachable!("mapping values are class identities"),
        }
    }

    /// Target class the focus is being made equivalent to.
    fn focus_class(&self, frontier: &Frontier, focus: StateRef) -> StateId {
        match focus {
            StateRef::Original(s) => self.class_of_value(frontier.mapping[&s]),
            synthetic => self.class_of_value(synthetic),
        }
    }

    /// The existing move of the focus on `symbol`, if any. Synthetic states
    /// never have pre-existing moves.
    fn existing_transition(&self, focus: StateRef, symbol: char) -> Option<StateId> {
        match focus {
            StateRef::Original(s) => self.to_correct.successor(s, symbol),
            _ => None,
        }
    }

    /// Edits rewiring the focus's move on `symbol` to `target`, removing a
    /// conflicting existing move first.
    fn transition_edits(&self, focus: StateRef, symbol: char, target: StateRef) -> EditBundle {
        match self.existing_transition(focus, symbol) {
            Some(existing) if StateRef::Original(existing) == target => {
                vec![EditOp::LeaveTransition { source: focus, symbol, target }]
            }
            Some(existing) => vec![
                EditOp::RemoveTransition {
                    source: focus,
                    symbol,
                    target: StateRef::Original(existing),
                },
                EditOp::AddTransition { source: focus, symbol, target },
            ],
            None => vec![EditOp::AddTransition { source: focus, symbol, target }],
        }
    }

    fn finality_fix(&self, state: StateId, class_accepting: bool) -> Option<EditOp> {
        let state_final = self.to_correct.is_final(state);
        if class_accepting && !state_final {
            Some(EditOp::MarkStateAsFinal { state: StateRef::Original(state) })
        } else if !class_accepting && state_final {
            Some(EditOp::MarkStateAsNonFinal { state: StateRef::Original(state) })
        } else {
            None
        }
    }
}
