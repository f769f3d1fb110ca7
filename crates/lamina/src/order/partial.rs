//! Partial orders that outrank barycenter values while a layer is sorted.

use crate::error::{Error, Result};
use crate::graph::alg::{actual_source, actual_target};
use crate::graph::{LGraph, NodeId, NodeKind};
use rustc_hash::FxHashMap as HashMap;
use std::cmp::Ordering;

/// A partial order over the nodes of one layer.
///
/// [`begin_pass`](Self::begin_pass) resolves whatever per-node data the order needs for the layer
/// about to be sorted; [`compare`](Self::compare) then answers, for a pair of nodes, whether the
/// order constrains them and in which direction. `None` (or `Some(Equal)`) leaves the pair to the
/// barycenter values.
pub trait PartialOrderStrategy {
    type Pass;

    /// Whether the heuristic hands the sorted layer to the constraint resolver.
    const RESOLVES_CONSTRAINTS: bool = false;

    fn begin_pass(&self, graph: &LGraph, layer: &[NodeId]) -> Result<Self::Pass>;

    fn compare(&self, pass: &Self::Pass, a: NodeId, b: NodeId) -> Option<Ordering>;

    /// Rearranges `layer` before sorting so that the insertion sort's preconditions hold.
    fn prepare_layer(&self, _pass: &Self::Pass, _layer: &mut [NodeId]) {}
}

/// Keeps normal nodes that carry a model order in that order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelOrderStrategy;

impl PartialOrderStrategy for ModelOrderStrategy {
    type Pass = HashMap<NodeId, usize>;

    fn begin_pass(&self, graph: &LGraph, layer: &[NodeId]) -> Result<Self::Pass> {
        Ok(layer
            .iter()
            .filter_map(|&v| {
                let node = graph.node(v);
                match (node.kind, node.model_order) {
                    (NodeKind::Normal, Some(order)) => Some((v, order)),
                    _ => None,
                }
            })
            .collect())
    }

    fn compare(&self, pass: &Self::Pass, a: NodeId, b: NodeId) -> Option<Ordering> {
        let (Some(oa), Some(ob)) = (pass.get(&a), pass.get(&b)) else {
            return None;
        };
        Some(oa.cmp(ob))
    }

    /// Puts the model-ordered nodes into model order among the slots they already occupy.
    ///
    /// The insertion sort never moves one of them past another, so the input order is the one
    /// that survives.
    fn prepare_layer(&self, pass: &Self::Pass, layer: &mut [NodeId]) {
        let slots: Vec<usize> = layer
            .iter()
            .enumerate()
            .filter(|(_, v)| pass.contains_key(*v))
            .map(|(ix, _)| ix)
            .collect();
        let mut ordered: Vec<NodeId> = slots.iter().map(|&ix| layer[ix]).collect();
        ordered.sort_by_key(|v| pass.get(v).copied());
        for (ix, v) in slots.into_iter().zip(ordered) {
            layer[ix] = v;
        }
    }
}

/// Groups nodes by swimlane; lower lanes come first.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaneStrategy;

impl PartialOrderStrategy for LaneStrategy {
    type Pass = HashMap<NodeId, i32>;

    const RESOLVES_CONSTRAINTS: bool = true;

    fn begin_pass(&self, graph: &LGraph, layer: &[NodeId]) -> Result<Self::Pass> {
        layer
            .iter()
            .map(|&v| lane_of(graph, v).map(|lane| (v, lane)))
            .collect()
    }

    fn compare(&self, pass: &Self::Pass, a: NodeId, b: NodeId) -> Option<Ordering> {
        let (Some(la), Some(lb)) = (pass.get(&a), pass.get(&b)) else {
            return None;
        };
        Some(la.cmp(lb))
    }
}

/// The lane a node belongs to.
///
/// Normal nodes carry their own lane. A long-edge dummy takes the larger lane of the real nodes
/// at both ends of its chain; other auxiliary nodes take the lane of their actual source.
pub fn lane_of(graph: &LGraph, v: NodeId) -> Result<i32> {
    let node = graph.node(v);
    match node.kind {
        NodeKind::Normal => node.lane.ok_or(Error::UnresolvedLane { node: v }),
        NodeKind::LongEdge => {
            let source = endpoint_lane(graph, v, actual_source(graph, v)?)?;
            let target = endpoint_lane(graph, v, actual_target(graph, v)?)?;
            Ok(source.max(target))
        }
        _ => endpoint_lane(graph, v, actual_source(graph, v)?),
    }
}

fn endpoint_lane(graph: &LGraph, dummy: NodeId, endpoint: Option<NodeId>) -> Result<i32> {
    endpoint
        .and_then(|w| graph.node(w).lane)
        .ok_or(Error::UnresolvedLane { node: dummy })
}
