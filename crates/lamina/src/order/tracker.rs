//! Transitively closed record of the ordering decisions taken during one sort pass.

use crate::graph::NodeId;
use rustc_hash::FxBuildHasher;
use std::cmp::Ordering;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

/// Strict order relations discovered while sorting one layer.
///
/// Invariant: `b ∈ greater_than[a]` iff `a ∈ less_than[b]`, and both maps are transitively
/// closed after every [`record`](Self::record).
#[derive(Debug, Default, Clone)]
pub struct OrderTracker {
    /// For each node, the nodes it is known to be greater than.
    greater_than: HashMap<NodeId, HashSet<NodeId>>,
    /// For each node, the nodes it is known to be less than.
    less_than: HashMap<NodeId, HashSet<NodeId>>,
}

impl OrderTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded order of `a` relative to `b`, if any.
    pub fn relation_of(&self, a: NodeId, b: NodeId) -> Option<Ordering> {
        if self.greater_than.get(&a).is_some_and(|s| s.contains(&b)) {
            return Some(Ordering::Greater);
        }
        if self.less_than.get(&a).is_some_and(|s| s.contains(&b)) {
            return Some(Ordering::Less);
        }
        None
    }

    /// Records `greater > lesser` and closes the relation under transitivity.
    ///
    /// Every node known to be at or above `greater` becomes greater than every node known to be
    /// at or below `lesser`.
    pub fn record(&mut self, greater: NodeId, lesser: NodeId) {
        debug_assert_ne!(greater, lesser, "a node cannot be ordered against itself");
        debug_assert_ne!(
            self.relation_of(greater, lesser),
            Some(Ordering::Less),
            "contradicting order: {greater} < {lesser} is already recorded"
        );
        if self.relation_of(greater, lesser) == Some(Ordering::Greater) {
            return;
        }

        let mut uppers: Vec<NodeId> = self
            .less_than
            .get(&greater)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default();
        uppers.push(greater);
        let mut lowers: Vec<NodeId> = self
            .greater_than
            .get(&lesser)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default();
        lowers.push(lesser);

        for &u in &uppers {
            self.greater_than
                .entry(u)
                .or_default()
                .extend(lowers.iter().copied());
        }
        for &l in &lowers {
            self.less_than
                .entry(l)
                .or_default()
                .extend(uppers.iter().copied());
        }
    }

    /// Number of nodes that take part in at least one recorded relation.
    pub fn touched(&self) -> usize {
        let mut seen: HashSet<NodeId> = HashSet::default();
        seen.extend(self.greater_than.keys().copied());
        seen.extend(self.less_than.keys().copied());
        seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.greater_than.is_empty() && self.less_than.is_empty()
    }

    /// Drops every recorded relation.
    pub fn reset(&mut self) {
        self.greater_than.clear();
        self.less_than.clear();
    }
}
