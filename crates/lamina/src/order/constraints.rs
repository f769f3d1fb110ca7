use super::BarycenterStates;
use crate::graph::{LGraph, NodeId};

/// Post-processing hook that may reorder a sorted layer to satisfy hard layout constraints.
///
/// Its answer is authoritative: the heuristic does not re-check the layer afterwards.
pub trait ConstraintResolver {
    fn process_constraints(
        &mut self,
        graph: &LGraph,
        layer: &mut [NodeId],
        states: &BarycenterStates,
    );
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoConstraints;

impl ConstraintResolver for NoConstraints {
    fn process_constraints(
        &mut self,
        _graph: &LGraph,
        _layer: &mut [NodeId],
        _states: &BarycenterStates,
    ) {
    }
}
