//! Layered graph container used by `lamina`.
//!
//! Nodes and edges live in arenas addressed by [`NodeId`] / [`EdgeId`]. Layers are ordered lists
//! of node handles; that order is what crossing minimization rewrites.

mod error;
mod graph;

pub mod alg;

pub use error::{Error, Result};
pub use graph::{EdgeId, LEdge, LGraph, LNode, NodeId, NodeKind};
