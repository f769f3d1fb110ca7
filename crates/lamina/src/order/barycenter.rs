//! Barycenter values for the nodes of the layer being sorted.
//!
//! The heuristic only consumes these values. [`NeighborBarycenters`] computes them from the
//! positions of adjacent nodes; [`FixedBarycenters`] serves values computed elsewhere.

use crate::OrderOptions;
use crate::graph::{LGraph, NodeId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap as HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BarycenterState {
    /// Weighted sum of neighbour positions.
    pub sum: f64,
    /// Total weight of the edges that contributed to `sum`.
    pub weight: f64,
    pub barycenter: Option<f64>,
    visited: bool,
}

/// Per-node barycenter state for one heuristic pass.
#[derive(Debug, Clone, Default)]
pub struct BarycenterStates {
    states: HashMap<NodeId, BarycenterState>,
}

impl BarycenterStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, v: NodeId) -> Option<&BarycenterState> {
        self.states.get(&v)
    }

    pub fn barycenter(&self, v: NodeId) -> Option<f64> {
        self.states.get(&v).and_then(|s| s.barycenter)
    }

    pub fn entry(&mut self, v: NodeId) -> &mut BarycenterState {
        self.states.entry(v).or_default()
    }

    /// Gives `v` the barycenter `value`, as if it had a single neighbour at that position.
    pub fn set(&mut self, v: NodeId, value: f64) {
        let state = self.entry(v);
        state.barycenter = Some(value);
        state.sum = value;
        state.weight = 1.0;
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Source of barycenter values for a layer.
///
/// `forward` selects the fixed neighbour layer: predecessors when sweeping forward, successors
/// when sweeping backward. Nodes the provider knows nothing about keep `barycenter: None`.
pub trait BarycenterProvider {
    fn compute(
        &mut self,
        graph: &LGraph,
        layer: &[NodeId],
        forward: bool,
        states: &mut BarycenterStates,
    );
}

/// Barycenters from the positions of neighbours in the adjacent layers.
///
/// Edges between two nodes of the free layer pass the other node's sum and weight through.
#[derive(Debug, Clone)]
pub struct NeighborBarycenters {
    random_amount: f64,
    rng: StdRng,
}

impl NeighborBarycenters {
    pub fn new(options: &OrderOptions) -> Self {
        Self {
            random_amount: options.random_amount,
            rng: StdRng::seed_from_u64(options.random_seed ^ 0x9E37_79B9_7F4A_7C15),
        }
    }

    fn visit(
        &mut self,
        graph: &LGraph,
        positions: &HashMap<NodeId, usize>,
        v: NodeId,
        forward: bool,
        states: &mut BarycenterStates,
    ) {
        if states.entry(v).visited {
            return;
        }
        *states.entry(v) = BarycenterState {
            visited: true,
            ..BarycenterState::default()
        };

        let node = graph.node(v);
        let edges = if forward {
            &node.incoming
        } else {
            &node.outgoing
        };

        let mut sum = 0.0;
        let mut weight = 0.0;
        for &e in edges {
            let edge = graph.edge(e);
            let fixed = if forward { edge.source } else { edge.target };
            if graph.node(fixed).layer == node.layer {
                if fixed != v {
                    self.visit(graph, positions, fixed, forward, states);
                    let other = states.entry(fixed);
                    sum += other.sum;
                    weight += other.weight;
                }
            } else if let Some(&pos) = positions.get(&fixed) {
                sum += pos as f64 * edge.weight;
                weight += edge.weight;
            }
        }

        let mut barycenter = None;
        if weight > 0.0 {
            if self.random_amount > 0.0 {
                let half = self.random_amount / 2.0;
                sum += self.rng.gen_range(-half..half);
            }
            barycenter = Some(sum / weight);
        }

        let state = states.entry(v);
        state.sum = sum;
        state.weight = weight;
        state.barycenter = barycenter;
    }
}

impl BarycenterProvider for NeighborBarycenters {
    fn compute(
        &mut self,
        graph: &LGraph,
        layer: &[NodeId],
        forward: bool,
        states: &mut BarycenterStates,
    ) {
        let mut positions: HashMap<NodeId, usize> = HashMap::default();
        for nodes in graph.layers() {
            for (pos, &w) in nodes.iter().enumerate() {
                positions.insert(w, pos);
            }
        }

        for &v in layer {
            states.entry(v).visited = false;
        }
        for &v in layer {
            self.visit(graph, &positions, v, forward, states);
        }
    }
}

/// Barycenter values supplied by the caller; the direction flag is ignored.
#[derive(Debug, Clone, Default)]
pub struct FixedBarycenters {
    values: HashMap<NodeId, f64>,
}

impl FixedBarycenters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, v: NodeId, value: f64) -> &mut Self {
        self.values.insert(v, value);
        self
    }

    pub fn get(&self, v: NodeId) -> Option<f64> {
        self.values.get(&v).copied()
    }
}

impl FromIterator<(NodeId, f64)> for FixedBarycenters {
    fn from_iter<I: IntoIterator<Item = (NodeId, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl BarycenterProvider for FixedBarycenters {
    fn compute(
        &mut self,
        _graph: &LGraph,
        layer: &[NodeId],
        _forward: bool,
        states: &mut BarycenterStates,
    ) {
        for &v in layer {
            match self.values.get(&v) {
                Some(&value) => states.set(v, value),
                None => *states.entry(v) = BarycenterState::default(),
            }
        }
    }
}

/// Gives every node of `layer` without a barycenter a synthetic one.
///
/// On a pre-ordered layer the value sits halfway between the previous node's value (`-1` before
/// the first node) and the next known value, so such nodes keep their place. Otherwise they are
/// scattered uniformly over `[-1, max + 1)`.
pub fn fill_in_unknown_barycenters<R: Rng + ?Sized>(
    layer: &[NodeId],
    pre_ordered: bool,
    states: &mut BarycenterStates,
    rng: &mut R,
) {
    if pre_ordered {
        let mut last_value = -1.0;
        for (ix, &v) in layer.iter().enumerate() {
            let value = match states.barycenter(v) {
                Some(value) => value,
                None => {
                    let next_value = layer[ix + 1..]
                        .iter()
                        .find_map(|&w| states.barycenter(w))
                        .unwrap_or(last_value + 1.0);
                    let value = (last_value + next_value) / 2.0;
                    states.set(v, value);
                    value
                }
            };
            last_value = value;
        }
        return;
    }

    let mut max_barycenter: f64 = 0.0;
    for &v in layer {
        if let Some(value) = states.barycenter(v) {
            max_barycenter = max_barycenter.max(value);
        }
    }
    let upper = max_barycenter + 1.0;
    for &v in layer {
        if states.barycenter(v).is_none() {
            states.set(v, rng.gen_range(-1.0..upper));
        }
    }
}

/// Assigns a uniform random barycenter in `[0, 1)` to every node of `layer`.
pub fn randomize_barycenters<R: Rng + ?Sized>(
    layer: &[NodeId],
    states: &mut BarycenterStates,
    rng: &mut R,
) {
    for &v in layer {
        states.set(v, rng.gen_range(0.0..1.0));
    }
}
