use super::{
    BarycenterHeuristic, BarycenterProvider, ConstraintResolver, PartialOrderStrategy, cross_count,
};
use crate::OrderOptions;
use crate::error::Result;
use crate::graph::{LGraph, NodeId};
use tracing::{debug, debug_span};

/// Layer-by-layer sweeps over the whole graph, alternating direction.
///
/// Forward sweeps reorder layers `1..n` against their predecessors, backward sweeps reorder
/// layers `n-2..=0` against their successors. The layering with the fewest crossings wins.
#[derive(Debug, Clone, Copy)]
pub struct LayerSweep {
    max_sweeps_without_improvement: usize,
}

impl Default for LayerSweep {
    fn default() -> Self {
        Self::new(&OrderOptions::default())
    }
}

impl LayerSweep {
    pub fn new(options: &OrderOptions) -> Self {
        Self {
            max_sweeps_without_improvement: options.max_sweeps_without_improvement.max(1),
        }
    }

    /// Reorders the layers of `graph` and returns the crossing count of the result.
    pub fn minimize<S, P, R>(
        &self,
        graph: &mut LGraph,
        heuristic: &mut BarycenterHeuristic<S, P, R>,
    ) -> Result<f64>
    where
        S: PartialOrderStrategy,
        P: BarycenterProvider,
        R: ConstraintResolver,
    {
        graph.validate()?;

        let layer_count = graph.layer_count();
        let span = debug_span!("layer_sweep", layers = layer_count);
        let _enter = span.enter();

        let mut best_cc = cross_count(graph);
        let mut best_layering: Vec<Vec<NodeId>> = graph.layers().to_vec();
        debug!(crossings = best_cc, "initial layering");
        if layer_count < 2 || best_cc == 0.0 {
            return Ok(best_cc);
        }

        let mut i: usize = 0;
        let mut last_best: usize = 0;
        while last_best < self.max_sweeps_without_improvement {
            let forward = i % 2 == 0;
            let ranks: Vec<usize> = if forward {
                (1..layer_count).collect()
            } else {
                (0..layer_count - 1).rev().collect()
            };
            // only the first sweep keeps nodes without barycenter in place
            let pre_ordered = i == 0;
            for rank in ranks {
                heuristic.minimize_layer(graph, rank, pre_ordered, false, forward)?;
            }

            let cc = cross_count(graph);
            debug!(sweep = i, forward, crossings = cc, "sweep done");
            if cc < best_cc {
                last_best = 0;
                best_cc = cc;
                best_layering = graph.layers().to_vec();
            }
            if best_cc == 0.0 {
                break;
            }

            i += 1;
            last_best += 1;
        }

        for (index, layer) in best_layering.into_iter().enumerate() {
            graph.reorder_layer(index, layer)?;
        }
        Ok(best_cc)
    }
}
