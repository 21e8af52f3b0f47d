//! Exploration frontiers: the canonical identity of symbol nodes.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};

use crate::automaton::StateId;
use crate::state::StateRef;

/// The state of one correction path between two construction steps.
///
/// Frontiers are the node-cache keys: two paths reaching structurally equal
/// frontiers continue through the same symbol node. All collections are
/// ordered so that equality and hashing are canonical and iteration is
/// deterministic.
///
/// Canonical form: `focus` is `Some` only while a scan is underway, i.e.
/// with `1 <= seen < alphabet len`. Scanning the last symbol closes the
/// focus: it leaves the queue, `focus` clears and `seen` resets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Frontier {
    /// Original state -> identity it is being made equivalent to.
    /// Only grows along a path.
    pub(crate) mapping: BTreeMap<StateId, StateRef>,
    /// Identity currently being scanned symbol-by-symbol.
    pub(crate) focus: Option<StateRef>,
    /// Identities awaiting or undergoing their scan.
    pub(crate) queue: BTreeSet<StateRef>,
    /// Synthetic class identities already materialized on this path.
    pub(crate) added: BTreeSet<StateRef>,
    /// How many symbols of the fixed alphabet order the focus has scanned.
    pub(crate) seen: usize,
}

impl Frontier {
    pub fn mapping(&self) -> &BTreeMap<StateId, StateRef> {
        &self.mapping
    }

    pub fn focus(&self) -> Option<StateRef> {
        self.focus
    }

    pub fn queue(&self) -> &BTreeSet<StateRef> {
        &self.queue
    }

    pub fn added(&self) -> &BTreeSet<StateRef> {
        &self.added
    }

    pub fn seen(&self) -> usize {
        self.seen
    }

    /// Nothing left to scan: the path is a complete correction.
    pub fn is_complete(&self) -> bool {
        self.focus.is_none() && self.queue.is_empty()
    }

    /// Identity the next step scans: the recorded focus, or the least
    /// queued identity when none is underway.
    pub fn scan_target(&self) -> Option<StateRef> {
        self.focus.or_else(|| self.queue.iter().next().copied())
    }

    /// The frontier after `focus` scanned one more symbol.
    pub(crate) fn advanced(&self, focus: StateRef, alphabet_len: usize) -> Frontier {
        debug_assert!(self.queue.contains(&focus), "focus {} must be queued", focus);
        let mut next = self.clone();
        if self.seen + 1 == alphabet_len {
            next.focus = None;
            next.seen = 0;
            next.queue.remove(&focus);
        } else {
            next.focus = Some(focus);
            next.seen = self.seen + 1;
        }
        next
    }
}

impl Display for Frontier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "map[")?;
        for (i, (state, target)) in self.mapping.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}>{}", state, target)?;
        }
        write!(f, "] queue[")?;
        for (i, id) in self.queue.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", id)?;
        }
        write!(f, "] added[")?;
        for (i, id) in self.added.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", id)?;
        }
        write!(f, "]")?;
        if let Some(focus) = self.focus {
            write!(f, " focus {}/{}", focus, self.seen)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn sample() -> Frontier {
        let mut frontier = Frontier::default();
        frontier.mapping.insert(0, StateRef::StartClass);
        frontier.queue.insert(StateRef::Original(0));
        frontier
    }

    #[test]
    fn test_scan_target_prefers_focus() {
        let mut frontier = sample();
        frontier.queue.insert(StateRef::Original(1));
        assert_eq!(frontier.scan_target(), Some(StateRef::Original(0)));
        frontier.focus = Some(StateRef::Original(1));
        frontier.seen = 1;
        assert_eq!(frontier.scan_target(), Some(StateRef::Original(1)));
    }

    #[test]
    fn test_advanced_records_focus() {
        let frontier = sample();
        let next = frontier.advanced(StateRef::Original(0), 2);
        assert_eq!(next.focus, Some(StateRef::Original(0)));
        assert_eq!(next.seen, 1);
        assert!(next.queue.contains(&StateRef::Original(0)));
    }

    #[test]
    fn test_advanced_closes_on_last_symbol() {
        let mut frontier = sample();
        frontier.focus = Some(StateRef::Original(0));
        frontier.seen = 1;
        let next = frontier.advanced(StateRef::Original(0), 2);
        assert_eq!(next.focus, None);
        assert_eq!(next.seen, 0);
        assert!(!next.queue.contains(&StateRef::Original(0)));
        assert!(next.is_complete());
    }

    #[test]
    fn test_single_symbol_alphabet_closes_immediately() {
        let frontier = sample();
        let next = frontier.advanced(StateRef::Original(0), 1);
        assert!(next.is_complete());
    }

    #[test]
    fn test_structural_identity() {
        let a = sample();
        let b = sample();
        assert_eq!(a, b);
        let mut cache = HashMap::new();
        cache.insert(a, 7u32);
        assert_eq!(cache.get(&b), Some(&7));
    }

    #[test]
    fn test_display() {
        let mut frontier = sample();
        frontier.added.insert(StateRef::StartClass);
        let text = frontier.to_string();
        println!("{}", text);
        assert!(text.contains("s0>start"));
        assert!(text.contains("queue[s0]"));
        assert!(text.contains("added[start]"));
    }
}
