use std::collections::HashSet;

use rand::Rng;

use crate::edits::Correction;
use crate::error::CorrectionError;
use crate::forest::Forest;
use crate::node::{NodeId, PackedChild};

impl Forest {
    /// Draws one correction from the forest, choosing uniformly among the
    /// families of every symbol node along the way.
    ///
    /// The draw is uniform per node, not over the set of corrections:
    /// corrections below nodes with many alternatives are drawn less often
    /// than corrections below narrow ones.
    pub fn random_correction(&self, rng: &mut impl Rng) -> Result<Correction, CorrectionError> {
        let mut on_path = HashSet::new();
        self.sample_symbol(self.root(), rng, &mut on_path)
    }

    fn sample_symbol(
        &self,
        node: NodeId,
        rng: &mut impl Rng,
        on_path: &mut HashSet<NodeId>,
    ) -> Result<Correction, CorrectionError> {
        if !on_path.insert(node) {
            return Err(CorrectionError::SamplingCycle(node));
        }
        let families = self.families(node);
        if families.is_empty() {
            return Err(CorrectionError::EmptyNode(node));
        }
        let family = &families[rng.random_range(0..families.len())];
        // Bundles of the current step precede the bundles of the rest of
        // the scan.
        let mut correction = match &family.right {
            PackedChild::Symbol(right) => self.sample_symbol(*right, rng, on_path)?,
            PackedChild::Edits(edits) => vec![edits.clone()],
            PackedChild::End => Vec::new(),
        };
        if let Some(left) = family.left {
            correction.extend(self.sample_symbol(left, rng, on_path)?);
        }
        on_path.remove(&node);
        Ok(correction)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::automaton::{Alphabet, Automaton};
    use crate::edits::EditOp;
    use crate::frontier::Frontier;
    use crate::node::{PackedNode, SymbolNode};
    use crate::state::StateRef;

    fn fixture_forest() -> Forest {
        let to_correct = Automaton::new([0], [(0, 'a', 1), (1, '0', 0), (1, 'a', 2)], [1]);
        let minimal_dfa =
            Automaton::new([0], [(0, 'a', 1), (1, 'a', 0), (0, '0', 0), (1, '0', 1)], [1]);
        let alphabet = Alphabet::new(['a', '0']);
        Forest::build(&to_correct, &minimal_dfa, &alphabet).unwrap()
    }

    #[test]
    fn test_sampling_is_seeded() {
        let forest = fixture_forest();
        let a = forest
            .random_correction(&mut ChaCha8Rng::seed_from_u64(42))
            .unwrap();
        let b = forest
            .random_correction(&mut ChaCha8Rng::seed_from_u64(42))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_starts_with_initial_choice() {
        let forest = fixture_forest();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            let correction = forest.random_correction(&mut rng).unwrap();
            assert!(!correction.is_empty());
            let first = &correction[0];
            let picks_initial = first.iter().any(|op| {
                matches!(
                    op,
                    EditOp::LeaveInitial { .. } | EditOp::MarkAsInitial { .. }
                )
            });
            assert!(picks_initial, "first bundle {:?} fixes no initial state", first);
        }
    }

    #[test]
    fn test_sampling_detects_cycle() {
        let forest = Forest::from_parts(
            vec![SymbolNode {
                frontier: Frontier::default(),
                families: vec![PackedNode {
                    left: Some(NodeId(0)),
                    right: PackedChild::Edits(vec![EditOp::AddNewState {
                        state: StateRef::StartClass,
                    }]),
                }],
            }],
            NodeId(0),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = forest.random_correction(&mut rng).unwrap_err();
        assert_eq!(err, CorrectionError::SamplingCycle(NodeId(0)));
    }

    #[test]
    fn test_sampling_rejects_empty_node() {
        let forest = Forest::from_parts(
            vec![SymbolNode { frontier: Frontier::default(), families: Vec::new() }],
            NodeId(0),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = forest.random_correction(&mut rng).unwrap_err();
        assert_eq!(err, CorrectionError::EmptyNode(NodeId(0)));
    }
}
