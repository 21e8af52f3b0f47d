use std::collections::HashMap;

use log::debug;

use crate::edits::{Correction, EditBundle, EditCosts};
use crate::error::CorrectionError;
use crate::forest::Forest;
use crate::node::{NodeId, PackedChild};
use crate::visitor::ForestVisitor;

/// Root result of a costing pass: the minimal total cost and every
/// correction achieving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MinimalSet {
    pub(crate) cost: u64,
    pub(crate) corrections: Vec<Correction>,
}

struct MinCorrectionVisitor<'a> {
    forest: &'a Forest,
    costs: &'a EditCosts,
    symbols: HashMap<NodeId, (u64, Vec<Correction>)>,
    packed: HashMap<(NodeId, usize), (u64, Vec<Correction>)>,
    rights: HashMap<(NodeId, usize), (u64, Vec<Correction>)>,
}

impl<'a> MinCorrectionVisitor<'a> {
    fn new(forest: &'a Forest, costs: &'a EditCosts) -> Self {
        Self {
            forest,
            costs,
            symbols: HashMap::new(),
            packed: HashMap::new(),
            rights: HashMap::new(),
        }
    }
}

impl ForestVisitor for MinCorrectionVisitor<'_> {
    fn edit_leaf(&mut self, node: NodeId, family: usize, edits: &EditBundle) {
        let cost = self.costs.bundle_cost(edits);
        self.rights.insert((node, family), (cost, vec![vec![edits.clone()]]));
    }

    fn end_leaf(&mut self, node: NodeId, family: usize) {
        self.rights.insert((node, family), (0, vec![Vec::new()]));
    }

    fn packed_out(&mut self, node: NodeId, family: usize) {
        let shape = &self.forest.families(node)[family];
        // A child blocked by a cycle has no value; the family then has
        // none either and is skipped by the parent minimum.
        let right = match &shape.right {
            PackedChild::Symbol(right) => self.symbols.get(right),
            _ => self.rights.get(&(node, family)),
        };
        let Some((right_cost, right_corrections)) = right else {
            return;
        };
        let left = match shape.left {
            Some(left) => match self.symbols.get(&left) {
                Some(value) => value.clone(),
                None => return,
            },
            None => (0, vec![Vec::new()]),
        };
        let (left_cost, left_corrections) = left;
        // Bundles of the current scan step come before the bundles of the
        // remaining scan, so corrections read front to back.
        let mut merged = Vec::with_capacity(right_corrections.len() * left_corrections.len());
        for right_correction in right_corrections {
            for left_correction in &left_corrections {
                let mut correction = right_correction.clone();
                correction.extend(left_correction.iter().cloned());
                merged.push(correction);
            }
        }
        self.packed.insert((node, family), (left_cost + right_cost, merged));
    }

    fn symbol_out(&mut self, node: NodeId) {
        let mut best: Option<(u64, Vec<Correction>)> = None;
        for family in 0..self.forest.families(node).len() {
            let Some((cost, corrections)) = self.packed.get(&(node, family)) else {
                continue;
            };
            match &mut best {
                None => best = Some((*cost, corrections.clone())),
                Some((best_cost, best_corrections)) => {
                    if *cost < *best_cost {
                        *best_cost = *cost;
                        *best_corrections = corrections.clone();
                    } else if *cost == *best_cost {
                        best_corrections.extend(corrections.iter().cloned());
                    }
                }
            }
        }
        if let Some(value) = best {
            self.symbols.insert(node, value);
        }
    }
}

impl Forest {
    /// Runs the costing pass and records the root result, returning the
    /// minimal cost together with every correction achieving it.
    ///
    /// Fails with [`CorrectionError::Unresolved`] when no family of the
    /// root resolves, which requires every alternative to loop back into
    /// the active path.
    pub fn compute_minimal_corrections(
        &mut self,
        costs: &EditCosts,
    ) -> Result<(u64, Vec<Correction>), CorrectionError> {
        debug!("costing pass over {} nodes", self.num_nodes());
        let root = self.root();
        let result = {
            let mut visitor = MinCorrectionVisitor::new(self, costs);
            self.visit(&mut visitor);
            visitor.symbols.remove(&root)
        };
        let (cost, corrections) = result.ok_or(CorrectionError::Unresolved)?;
        debug!("minimal cost {} achieved by {} corrections", cost, corrections.len());
        self.minimal = Some(MinimalSet { cost, corrections: corrections.clone() });
        Ok((cost, corrections))
    }

    /// Minimal total cost recorded by the last costing pass.
    pub fn minimal_cost(&self) -> Result<u64, CorrectionError> {
        self.minimal
            .as_ref()
            .map(|minimal| minimal.cost)
            .ok_or(CorrectionError::NotComputed)
    }

    /// Corrections achieving the minimal cost, as recorded by the last
    /// costing pass.
    pub fn minimal_corrections(&self) -> Result<Vec<Correction>, CorrectionError> {
        self.minimal
            .as_ref()
            .map(|minimal| minimal.corrections.clone())
            .ok_or(CorrectionError::NotComputed)
    }
}
