use super::{BarycenterStates, OrderTracker, PartialOrderStrategy};
use crate::graph::NodeId;
use std::cmp::Ordering;

/// Three-tier node comparison: recorded relations, then the partial order, then barycenters.
///
/// Every strict answer that is not already in the tracker is recorded before it is returned, so
/// later comparisons see its transitive consequences. Comparing and recording are one step.
pub struct OrderComparator<'a, S: PartialOrderStrategy> {
    strategy: &'a S,
    pass: &'a S::Pass,
    states: &'a BarycenterStates,
    tracker: &'a mut OrderTracker,
}

impl<'a, S: PartialOrderStrategy> OrderComparator<'a, S> {
    pub fn new(
        strategy: &'a S,
        pass: &'a S::Pass,
        states: &'a BarycenterStates,
        tracker: &'a mut OrderTracker,
    ) -> Self {
        Self {
            strategy,
            pass,
            states,
            tracker,
        }
    }

    pub fn compare(&mut self, a: NodeId, b: NodeId) -> Ordering {
        if let Some(ordering) = self.tracker.relation_of(a, b) {
            return ordering;
        }

        match self.strategy.compare(self.pass, a, b) {
            Some(ordering) if ordering != Ordering::Equal => {
                self.note(a, b, ordering);
                ordering
            }
            _ => self.compare_barycenters(a, b),
        }
    }

    /// Nodes without a barycenter go after nodes with one; two of them are left as they are.
    fn compare_barycenters(&mut self, a: NodeId, b: NodeId) -> Ordering {
        let ordering = match (self.states.barycenter(a), self.states.barycenter(b)) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        self.note(a, b, ordering);
        ordering
    }

    fn note(&mut self, a: NodeId, b: NodeId, ordering: Ordering) {
        match ordering {
            Ordering::Less => self.tracker.record(b, a),
            Ordering::Greater => self.tracker.record(a, b),
            Ordering::Equal => {}
        }
    }
}
