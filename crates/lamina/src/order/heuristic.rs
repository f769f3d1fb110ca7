//! Per-layer driver of the order-constrained barycenter heuristic.

use super::{
    BarycenterProvider, BarycenterStates, ConstraintResolver, LaneStrategy, ModelOrderStrategy,
    NeighborBarycenters, NoConstraints, OrderComparator, OrderTracker, PartialOrderStrategy,
    fill_in_unknown_barycenters, insertion_sort, randomize_barycenters,
};
use crate::OrderOptions;
use crate::error::{Error, Result};
use crate::graph::{LGraph, NodeId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug_span, trace};

/// Barycenter heuristic whose sort never violates the partial order of `S`.
///
/// The heuristic holds no per-sort state: each call builds its own barycenter states and
/// [`OrderTracker`] and drops them before returning, so one instance per worker is enough to
/// sort independent layers concurrently.
#[derive(Debug, Clone)]
pub struct BarycenterHeuristic<S, P = NeighborBarycenters, R = NoConstraints> {
    strategy: S,
    barycenters: P,
    resolver: R,
    rng: StdRng,
    corrective_pass: bool,
}

pub type ModelOrderBarycenterHeuristic<P = NeighborBarycenters> =
    BarycenterHeuristic<ModelOrderStrategy, P, NoConstraints>;

pub type LaneBarycenterHeuristic<P = NeighborBarycenters, R = NoConstraints> =
    BarycenterHeuristic<LaneStrategy, P, R>;

impl<P: BarycenterProvider> BarycenterHeuristic<ModelOrderStrategy, P, NoConstraints> {
    pub fn model_order(barycenters: P, options: &OrderOptions) -> Self {
        Self::new(ModelOrderStrategy, barycenters, NoConstraints, options)
    }
}

impl<P: BarycenterProvider, R: ConstraintResolver> BarycenterHeuristic<LaneStrategy, P, R> {
    pub fn lane(barycenters: P, resolver: R, options: &OrderOptions) -> Self {
        Self::new(LaneStrategy, barycenters, resolver, options)
    }
}

impl<S, P, R> BarycenterHeuristic<S, P, R>
where
    S: PartialOrderStrategy,
    P: BarycenterProvider,
    R: ConstraintResolver,
{
    pub fn new(strategy: S, barycenters: P, resolver: R, options: &OrderOptions) -> Self {
        Self {
            strategy,
            barycenters,
            resolver,
            rng: StdRng::seed_from_u64(options.random_seed),
            corrective_pass: options.corrective_pass,
        }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn barycenters(&self) -> &P {
        &self.barycenters
    }

    /// Reorders `layer` in place.
    ///
    /// With `randomize` the barycenters are random; otherwise they come from the provider and
    /// missing ones are synthesized (keeping positions when `pre_ordered`). `forward` picks the
    /// fixed neighbour layer. Layers of at most one node are left alone. Fails before touching
    /// `layer` if the partial order cannot be resolved for one of its nodes.
    pub fn minimize_crossings(
        &mut self,
        graph: &LGraph,
        layer: &mut [NodeId],
        pre_ordered: bool,
        randomize: bool,
        forward: bool,
    ) -> Result<()> {
        let span = debug_span!(
            "minimize_crossings",
            nodes = layer.len(),
            pre_ordered,
            randomize,
            forward
        );
        let _enter = span.enter();

        let mut states = BarycenterStates::new();
        if randomize {
            trace!("randomizing barycenters");
            randomize_barycenters(layer, &mut states, &mut self.rng);
        } else {
            trace!("computing barycenters");
            self.barycenters.compute(graph, layer, forward, &mut states);
            fill_in_unknown_barycenters(layer, pre_ordered, &mut states, &mut self.rng);
        }

        if layer.len() <= 1 {
            trace!("nothing to sort");
            return Ok(());
        }

        let pass = self.strategy.begin_pass(graph, layer)?;
        self.strategy.prepare_layer(&pass, layer);

        let mut tracker = OrderTracker::new();
        sort_pass(&self.strategy, &pass, &states, &mut tracker, layer);
        trace!(touched = tracker.touched(), "insertion pass done");
        tracker.reset();

        if S::RESOLVES_CONSTRAINTS {
            if self.corrective_pass {
                sort_pass(&self.strategy, &pass, &states, &mut tracker, layer);
                trace!(touched = tracker.touched(), "corrective pass done");
                tracker.reset();
            }
            trace!("resolving constraints");
            self.resolver.process_constraints(graph, layer, &states);
        }

        trace!("layer sorted");
        Ok(())
    }

    /// Runs [`minimize_crossings`](Self::minimize_crossings) on layer `index` of `graph` and
    /// writes the new order back.
    pub fn minimize_layer(
        &mut self,
        graph: &mut LGraph,
        index: usize,
        pre_ordered: bool,
        randomize: bool,
        forward: bool,
    ) -> Result<()> {
        let Some(layer) = graph.layer(index) else {
            return Err(Error::LayerOutOfRange {
                layer: index,
                count: graph.layer_count(),
            });
        };
        let mut layer = layer.to_vec();
        self.minimize_crossings(graph, &mut layer, pre_ordered, randomize, forward)?;
        graph.reorder_layer(index, layer)?;
        Ok(())
    }
}

fn sort_pass<S: PartialOrderStrategy>(
    strategy: &S,
    pass: &S::Pass,
    states: &BarycenterStates,
    tracker: &mut OrderTracker,
    layer: &mut [NodeId],
) {
    let mut comparator = OrderComparator::new(strategy, pass, states, tracker);
    insertion_sort(layer, |a, b| comparator.compare(a, b));
}
