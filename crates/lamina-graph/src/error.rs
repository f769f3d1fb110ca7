use crate::{EdgeId, NodeId};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("edge {edge} references a node that is not part of the graph")]
    MissingEndpoint { edge: EdgeId },

    #[error("layer {layer} references unknown node {node}")]
    UnknownNode { node: NodeId, layer: usize },

    #[error("node {node} is placed in layer {first} and layer {second}")]
    NodeInMultipleLayers {
        node: NodeId,
        first: usize,
        second: usize,
    },

    #[error("node {node} lists edge {edge}, which is not part of the graph")]
    UnknownIncidentEdge { node: NodeId, edge: EdgeId },

    #[error("incident edge lists of node {node} disagree with the endpoints of edge {edge}")]
    IncidentEdgeMismatch { node: NodeId, edge: EdgeId },

    #[error("node {node} records layer {recorded:?} but sits in layer {actual:?}")]
    LayerMismatch {
        node: NodeId,
        recorded: Option<usize>,
        actual: Option<usize>,
    },

    #[error("new order for layer {layer} is not a permutation of its nodes")]
    NotAPermutation { layer: usize },

    #[error("dummy chain loops back to node {node}")]
    DummyChainCycle { node: NodeId },
}

pub type Result<T> = std::result::Result<T, Error>;
