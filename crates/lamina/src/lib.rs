#![forbid(unsafe_code)]

//! Crossing minimization for layered (Sugiyama-style) graph drawings.
//!
//! The heart of the crate is an order-constrained barycenter heuristic: each layer is sorted by
//! barycenter values while a partial order (a caller-supplied model order, or swimlane indices)
//! is never violated. Decisions taken during a sort are kept transitively closed in an
//! [`order::OrderTracker`] so that a history-dependent comparator stays consistent.

pub use lamina_graph as graph;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod options;
pub mod order;

pub use error::{Error, Result};
pub use options::OrderOptions;
