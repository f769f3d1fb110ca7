//! Node ordering / crossing minimization.
//!
//! One layer at a time, nodes are sorted by barycenter while a partial order chosen by a
//! [`PartialOrderStrategy`] is kept intact. [`LayerSweep`] drives the per-layer heuristic across
//! the whole graph and keeps the layering with the fewest crossings.

mod tracker;
pub use tracker::OrderTracker;

mod partial;
pub use partial::{LaneStrategy, ModelOrderStrategy, PartialOrderStrategy, lane_of};

mod barycenter;
pub use barycenter::{
    BarycenterProvider, BarycenterState, BarycenterStates, FixedBarycenters, NeighborBarycenters,
    fill_in_unknown_barycenters, randomize_barycenters,
};

mod comparator;
pub use comparator::OrderComparator;

mod sorter;
pub use sorter::insertion_sort;

mod constraints;
pub use constraints::{ConstraintResolver, NoConstraints};

mod heuristic;
pub use heuristic::{BarycenterHeuristic, LaneBarycenterHeuristic, ModelOrderBarycenterHeuristic};

mod cross_count;
pub use cross_count::cross_count;

mod sweep;
pub use sweep::LayerSweep;
