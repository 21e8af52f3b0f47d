//! Language-level helpers: acceptance, equivalence, minimization.
//!
//! These operate on whole automata and are deliberately outside the forest
//! construction: the correction algorithm never minimizes or compares
//! languages itself. Callers use them to prepare a minimal target and to
//! check materialized results. Missing transitions reject, so partial and
//! total automata compare correctly.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use crate::automaton::{Alphabet, Automaton, StateId};

/// Runs the automaton on the input. Missing transitions reject.
pub fn accepts(automaton: &Automaton, input: impl IntoIterator<Item = char>) -> bool {
    let mut current = match automaton.initials().iter().next() {
        Some(&state) => state,
        None => return false,
    };
    for symbol in input {
        match automaton.successor(current, symbol) {
            Some(next) => current = next,
            None => return false,
        }
    }
    automaton.is_final(current)
}

/// Language equivalence over the given alphabet, by a walk of the product
/// of reachable state pairs. `None` stands for the implicit dead state.
pub fn equivalent(a: &Automaton, b: &Automaton, alphabet: &Alphabet) -> bool {
    let start_a = a.initials().iter().next().copied();
    let start_b = b.initials().iter().next().copied();

    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    seen.insert((start_a, start_b));
    queue.push_back((start_a, start_b));

    while let Some((pa, pb)) = queue.pop_front() {
        let accept_a = pa.is_some_and(|s| a.is_final(s));
        let accept_b = pb.is_some_and(|s| b.is_final(s));
        if accept_a != accept_b {
            return false;
        }
        if pa.is_none() && pb.is_none() {
            continue; // both dead, stays dead
        }
        for symbol in alphabet.iter() {
            let qa = pa.and_then(|s| a.successor(s, symbol));
            let qb = pb.and_then(|s| b.successor(s, symbol));
            if seen.insert((qa, qb)) {
                queue.push_back((qa, qb));
            }
        }
    }
    true
}

/// States reachable from the initial state.
fn reachable(automaton: &Automaton, alphabet: &Alphabet) -> BTreeSet<StateId> {
    let mut found = BTreeSet::new();
    let mut queue = VecDeque::new();
    if let Some(&start) = automaton.initials().iter().next() {
        found.insert(start);
        queue.push_back(start);
    }
    while let Some(state) = queue.pop_front() {
        for symbol in alphabet.iter() {
            if let Some(next) = automaton.successor(state, symbol) {
                if found.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }
    found
}

/// Minimizes a deterministic automaton: trims to the reachable part, then
/// refines the finality partition until no signature splits further.
pub fn minimize(automaton: &Automaton, alphabet: &Alphabet) -> Automaton {
    let states = reachable(automaton, alphabet);
    if states.is_empty() {
        return Automaton::new([], [], []);
    }

    // Classes are numbered by first appearance in ascending state order,
    // which keeps the result stable across runs.
    let mut class_of: HashMap<StateId, usize> = HashMap::new();
    let mut by_finality: HashMap<bool, usize> = HashMap::new();
    for &state in &states {
        let next = by_finality.len();
        let class = *by_finality.entry(automaton.is_final(state)).or_insert(next);
        class_of.insert(state, class);
    }
    let mut num_classes = by_finality.len();

    loop {
        let mut by_signature: HashMap<(usize, Vec<Option<usize>>), usize> = HashMap::new();
        let mut refined: HashMap<StateId, usize> = HashMap::new();
        for &state in &states {
            let moves = alphabet
                .iter()
                .map(|symbol| automaton.successor(state, symbol).map(|next| class_of[&next]))
                .collect();
            let signature = (class_of[&state], moves);
            let next = by_signature.len();
            let class = *by_signature.entry(signature).or_insert(next);
            refined.insert(state, class);
        }
        let refined_count = by_signature.len();
        class_of = refined;
        if refined_count == num_classes {
            break;
        }
        num_classes = refined_count;
    }

    // One representative per class is enough: members share all moves
    // up to class identity.
    let mut representative: HashMap<usize, StateId> = HashMap::new();
    for &state in &states {
        representative.entry(class_of[&state]).or_insert(state);
    }

    let mut transitions = Vec::new();
    for class in 0..num_classes {
        let state = representative[&class];
        for symbol in alphabet.iter() {
            if let Some(next) = automaton.successor(state, symbol) {
                transitions.push((class as StateId, symbol, class_of[&next] as StateId));
            }
        }
    }
    let initial = automaton
        .initials()
        .iter()
        .next()
        .map(|start| class_of[start] as StateId);
    let finals: BTreeSet<StateId> = states
        .iter()
        .filter(|&&state| automaton.is_final(state))
        .map(|&state| class_of[&state] as StateId)
        .collect();

    Automaton::new(initial, transitions, finals)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts words with an odd number of `a`s.
    fn parity() -> Automaton {
        Automaton::new([0], [(0, 'a', 1), (1, 'a', 0), (0, '0', 0), (1, '0', 1)], [1])
    }

    #[test]
    fn test_accepts() {
        let a = parity();
        assert!(!accepts(&a, "".chars()));
        assert!(accepts(&a, "a".chars()));
        assert!(accepts(&a, "a0".chars()));
        assert!(!accepts(&a, "aa".chars()));
        assert!(accepts(&a, "0aa0a".chars()));
    }

    #[test]
    fn test_accepts_missing_transition_rejects() {
        let a = Automaton::new([0], [(0, 'a', 1)], [1]);
        assert!(accepts(&a, "a".chars()));
        assert!(!accepts(&a, "a0".chars()));
        assert!(!accepts(&a, "0".chars()));
    }

    #[test]
    fn test_equivalent_reflexive() {
        let alphabet = Alphabet::new(['a', '0']);
        assert!(equivalent(&parity(), &parity(), &alphabet));
    }

    #[test]
    fn test_equivalent_modulo_redundant_states() {
        let alphabet = Alphabet::new(['a', '0']);
        // Same language with state 2 duplicating state 0.
        let redundant = Automaton::new(
            [0],
            [(0, 'a', 1), (1, 'a', 2), (2, 'a', 1), (0, '0', 2), (2, '0', 0), (1, '0', 1)],
            [1],
        );
        assert!(equivalent(&parity(), &redundant, &alphabet));
    }

    #[test]
    fn test_not_equivalent() {
        let alphabet = Alphabet::new(['a', '0']);
        let even = Automaton::new([0], [(0, 'a', 1), (1, 'a', 0), (0, '0', 0), (1, '0', 1)], [0]);
        assert!(!equivalent(&parity(), &even, &alphabet));
    }

    #[test]
    fn test_partial_vs_total_differ() {
        let alphabet = Alphabet::new(['a', '0']);
        // Partial: no '0' moves at all, so "a0" is rejected.
        let partial = Automaton::new([0], [(0, 'a', 1), (1, 'a', 0)], [1]);
        assert!(!equivalent(&partial, &parity(), &alphabet));
        assert!(equivalent(&partial, &partial, &alphabet));
    }

    #[test]
    fn test_minimize_collapses_redundant_states() {
        let alphabet = Alphabet::new(['a', '0']);
        let redundant = Automaton::new(
            [0],
            [(0, 'a', 1), (1, 'a', 2), (2, 'a', 1), (0, '0', 2), (2, '0', 0), (1, '0', 1)],
            [1],
        );
        let minimal = minimize(&redundant, &alphabet);
        println!("minimal = {}", minimal);
        assert_eq!(minimal.num_states(), 2);
        assert!(minimal.is_deterministic());
        assert!(equivalent(&minimal, &redundant, &alphabet));
    }

    #[test]
    fn test_minimize_drops_unreachable() {
        let alphabet = Alphabet::new(['a']);
        let with_island = Automaton::new([0], [(0, 'a', 1), (1, 'a', 0), (7, 'a', 7)], [1]);
        let minimal = minimize(&with_island, &alphabet);
        assert_eq!(minimal.num_states(), 2);
        assert!(equivalent(&minimal, &with_island, &alphabet));
    }

    #[test]
    fn test_minimize_already_minimal() {
        let alphabet = Alphabet::new(['a', '0']);
        let minimal = minimize(&parity(), &alphabet);
        assert_eq!(minimal.num_states(), 2);
        assert!(equivalent(&minimal, &parity(), &alphabet));
    }
}
