use std::collections::{HashMap, HashSet};

use num_bigint::BigUint;

use crate::forest::Forest;
use crate::node::{NodeId, PackedChild};

impl Forest {
    /// Number of distinct corrections the forest holds.
    ///
    /// Counted over the acyclic unfolding: a family looping back into the
    /// active path contributes nothing, so the count is always finite.
    pub fn count_corrections(&self) -> BigUint {
        let mut cache = HashMap::new();
        let mut on_path = HashSet::new();
        self.count_node(self.root(), &mut cache, &mut on_path)
    }

    fn count_node(
        &self,
        node: NodeId,
        cache: &mut HashMap<NodeId, BigUint>,
        on_path: &mut HashSet<NodeId>,
    ) -> BigUint {
        if let Some(count) = cache.get(&node) {
            return count.clone();
        }
        if !on_path.insert(node) {
            return BigUint::ZERO;
        }
        let mut total = BigUint::ZERO;
        for family in self.families(node) {
            let right = match &family.right {
                PackedChild::Symbol(right) => self.count_node(*right, cache, on_path),
                _ => BigUint::from(1u32),
            };
            let count = match family.left {
                Some(left) => right * self.count_node(left, cache, on_path),
                None => right,
            };
            total += count;
        }
        on_path.remove(&node);
        cache.insert(node, total.clone());
        total
    }
}
