use crate::graph::NodeId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] lamina_graph::Error),

    #[error("cannot resolve a lane for node {node}")]
    UnresolvedLane { node: NodeId },

    #[error("layer {layer} does not exist (graph has {count} layers)")]
    LayerOutOfRange { layer: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
