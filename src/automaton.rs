//! Concrete finite automata: the input of correction and the output of replay.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt::{Display, Formatter};

pub type StateId = u32;

/// The fixed, ordered symbol set a correction run works over.
///
/// The order is the insertion order and determines the scan order during
/// forest construction: frontiers record how many symbols of this order they
/// have already processed. Duplicates are dropped on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, usize>,
}

impl Alphabet {
    pub fn new(symbols: impl IntoIterator<Item = char>) -> Self {
        let mut seen = Vec::new();
        let mut index = HashMap::new();
        for c in symbols {
            if !index.contains_key(&c) {
                index.insert(c, seen.len());
                seen.push(c);
            }
        }
        Self { symbols: seen, index }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol at the given scan position. Panics if out of range.
    pub fn symbol(&self, position: usize) -> char {
        self.symbols[position]
    }

    pub fn position(&self, symbol: char) -> Option<usize> {
        self.index.get(&symbol).copied()
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.index.contains_key(&symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().copied()
    }
}

/// A finite automaton over `char` symbols with `u32` states.
///
/// States are the ids mentioned by the initial set, the final set, or a
/// transition endpoint; `num_states` is the largest mentioned id plus one.
/// Duplicate transitions collapse, so determinism means no two distinct
/// targets share a source state and symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    num_states: StateId,
    states: BTreeSet<StateId>,
    initials: BTreeSet<StateId>,
    finals: BTreeSet<StateId>,
    transitions: Vec<(StateId, char, StateId)>,
    successors: HashMap<(StateId, char), Vec<StateId>>,
}

impl Automaton {
    pub fn new(
        initials: impl IntoIterator<Item = StateId>,
        transitions: impl IntoIterator<Item = (StateId, char, StateId)>,
        finals: impl IntoIterator<Item = StateId>,
    ) -> Self {
        let initials: BTreeSet<StateId> = initials.into_iter().collect();
        let finals: BTreeSet<StateId> = finals.into_iter().collect();

        let mut unique = Vec::new();
        let mut dedup = HashSet::new();
        for t in transitions {
            if dedup.insert(t) {
                unique.push(t);
            }
        }

        let mut states: BTreeSet<StateId> = initials.iter().chain(finals.iter()).copied().collect();
        let mut successors: HashMap<(StateId, char), Vec<StateId>> = HashMap::new();
        for &(source, symbol, target) in &unique {
            states.insert(source);
            states.insert(target);
            successors.entry((source, symbol)).or_default().push(target);
        }

        let num_states = states.iter().next_back().map_or(0, |&max| max + 1);

        Self {
            num_states,
            states,
            initials,
            finals,
            transitions: unique,
            successors,
        }
    }

    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    /// All mentioned state ids, ascending.
    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.iter().copied()
    }

    pub fn initials(&self) -> &BTreeSet<StateId> {
        &self.initials
    }

    pub fn finals(&self) -> &BTreeSet<StateId> {
        &self.finals
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.finals.contains(&state)
    }

    pub fn transitions(&self) -> &[(StateId, char, StateId)] {
        &self.transitions
    }

    /// The deterministic move, if any. On a nondeterministic automaton this
    /// reads the first recorded target.
    pub fn successor(&self, state: StateId, symbol: char) -> Option<StateId> {
        self.successors.get(&(state, symbol)).map(|targets| targets[0])
    }

    /// All recorded moves for a source state and symbol.
    pub fn successors(&self, state: StateId, symbol: char) -> &[StateId] {
        self.successors.get(&(state, symbol)).map_or(&[], Vec::as_slice)
    }

    /// Outgoing `(symbol, target)` pairs of a state.
    pub fn all_successors(&self, state: StateId) -> impl Iterator<Item = (char, StateId)> + '_ {
        self.transitions
            .iter()
            .filter(move |&&(source, _, _)| source == state)
            .map(|&(_, symbol, target)| (symbol, target))
    }

    pub fn is_deterministic(&self) -> bool {
        self.successors.values().all(|targets| targets.len() == 1)
    }

    /// Whether every state has a move on every alphabet symbol.
    pub fn is_complete(&self, alphabet: &Alphabet) -> bool {
        self.states
            .iter()
            .all(|&state| alphabet.iter().all(|symbol| self.successor(state, symbol).is_some()))
    }

    /// Symbols used by at least one transition.
    pub fn symbols(&self) -> BTreeSet<char> {
        self.transitions.iter().map(|&(_, symbol, _)| symbol).collect()
    }
}

impl Display for Automaton {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "initials {:?}, finals {:?}, transitions [", self.initials, self.finals)?;
        for (i, &(source, symbol, target)) in self.transitions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} -{}-> {}", source, symbol, target)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_order_and_dedup() {
        let alphabet = Alphabet::new(['a', '0', 'a']);
        assert_eq!(alphabet.len(), 2);
        assert_eq!(alphabet.symbol(0), 'a');
        assert_eq!(alphabet.symbol(1), '0');
        assert_eq!(alphabet.position('0'), Some(1));
        assert_eq!(alphabet.position('b'), None);
        assert!(alphabet.contains('a'));
    }

    #[test]
    fn test_automaton_basic() {
        let a = Automaton::new([0], [(0, 'a', 1), (1, '0', 0), (1, 'a', 2)], [1]);
        println!("a = {}", a);
        assert_eq!(a.num_states(), 3);
        assert_eq!(a.states().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(a.successor(0, 'a'), Some(1));
        assert_eq!(a.successor(0, '0'), None);
        assert_eq!(a.all_successors(1).count(), 2);
        assert!(a.is_final(1));
        assert!(!a.is_final(0));
        assert!(a.is_deterministic());
    }

    #[test]
    fn test_duplicate_transitions_collapse() {
        let a = Automaton::new([0], [(0, 'a', 1), (0, 'a', 1)], [1]);
        assert_eq!(a.transitions().len(), 1);
        assert!(a.is_deterministic());
    }

    #[test]
    fn test_nondeterminism_detected() {
        let a = Automaton::new([0], [(0, 'a', 1), (0, 'a', 2)], [1]);
        assert!(!a.is_deterministic());
        assert_eq!(a.successors(0, 'a'), &[1, 2]);
    }

    #[test]
    fn test_completeness() {
        let alphabet = Alphabet::new(['a', '0']);
        let total = Automaton::new([0], [(0, 'a', 1), (1, 'a', 0), (0, '0', 0), (1, '0', 1)], [1]);
        assert!(total.is_complete(&alphabet));
        let partial = Automaton::new([0], [(0, 'a', 1), (1, 'a', 0)], [1]);
        assert!(!partial.is_complete(&alphabet));
        assert_eq!(partial.symbols(), BTreeSet::from(['a']));
    }

    #[test]
    fn test_isolated_initial_counts_as_state() {
        let a = Automaton::new([5], [], [5]);
        assert_eq!(a.num_states(), 6);
        assert_eq!(a.states().collect::<Vec<_>>(), vec![5]);
    }
}
