use crate::error::{Error, Result};
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};
use std::fmt;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(u32);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    #[default]
    Normal,
    /// One segment of an edge spanning several layers.
    LongEdge,
    /// Holds an edge label in the middle of a long edge.
    Label,
    NorthSouthPort,
    ExternalPort,
    BreakingPoint,
}

impl NodeKind {
    /// Dummies that stand in for part of an edge; chain walks step over them.
    pub fn is_chain_dummy(self) -> bool {
        matches!(self, NodeKind::LongEdge | NodeKind::Label)
    }

    pub fn is_dummy(self) -> bool {
        self != NodeKind::Normal
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LNode {
    pub name: String,
    #[serde(default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub layer: Option<usize>,
    /// Position of the node in the input model, if the caller wants it respected.
    #[serde(default)]
    pub model_order: Option<usize>,
    #[serde(default)]
    pub lane: Option<i32>,
    #[serde(default)]
    pub incoming: Vec<EdgeId>,
    #[serde(default)]
    pub outgoing: Vec<EdgeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LEdge {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default = "default_edge_weight")]
    pub weight: f64,
}

fn default_edge_weight() -> f64 {
    1.0
}

/// A graph whose nodes have been assigned to layers.
///
/// Handles are only meaningful for the graph that produced them; accessors index the arenas
/// directly and panic on a foreign handle, the same way slice indexing does.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LGraph {
    nodes: Vec<LNode>,
    edges: Vec<LEdge>,
    #[serde(default)]
    layers: Vec<Vec<NodeId>>,
}

impl LGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, name: impl Into<String>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(LNode {
            name: name.into(),
            kind,
            layer: None,
            model_order: None,
            lane: None,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        });
        id
    }

    pub fn set_model_order(&mut self, v: NodeId, model_order: usize) -> &mut Self {
        self.nodes[v.index()].model_order = Some(model_order);
        self
    }

    pub fn set_lane(&mut self, v: NodeId, lane: i32) -> &mut Self {
        self.nodes[v.index()].lane = Some(lane);
        self
    }

    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> EdgeId {
        self.add_edge_with_weight(source, target, default_edge_weight())
    }

    pub fn add_edge_with_weight(&mut self, source: NodeId, target: NodeId, weight: f64) -> EdgeId {
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(LEdge {
            source,
            target,
            weight,
        });
        self.nodes[source.index()].outgoing.push(id);
        self.nodes[target.index()].incoming.push(id);
        id
    }

    /// Appends a layer and returns its index.
    pub fn push_layer(&mut self, nodes: Vec<NodeId>) -> usize {
        let index = self.layers.len();
        for &v in &nodes {
            self.nodes[v.index()].layer = Some(index);
        }
        self.layers.push(nodes);
        index
    }

    pub fn node(&self, v: NodeId) -> &LNode {
        &self.nodes[v.index()]
    }

    pub fn node_mut(&mut self, v: NodeId) -> &mut LNode {
        &mut self.nodes[v.index()]
    }

    pub fn edge(&self, e: EdgeId) -> &LEdge {
        &self.edges[e.index()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &LNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(ix, n)| (NodeId(ix as u32), n))
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|ix| NodeId(ix as u32))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &LEdge)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(ix, e)| (EdgeId(ix as u32), e))
    }

    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.name == name)
            .map(|ix| NodeId(ix as u32))
    }

    pub fn in_edges(&self, v: NodeId) -> impl Iterator<Item = &LEdge> {
        self.nodes[v.index()]
            .incoming
            .iter()
            .map(|&e| &self.edges[e.index()])
    }

    pub fn out_edges(&self, v: NodeId) -> impl Iterator<Item = &LEdge> {
        self.nodes[v.index()]
            .outgoing
            .iter()
            .map(|&e| &self.edges[e.index()])
    }

    pub fn predecessors(&self, v: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.in_edges(v).map(|e| e.source)
    }

    pub fn successors(&self, v: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.out_edges(v).map(|e| e.target)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layers(&self) -> &[Vec<NodeId>] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&[NodeId]> {
        self.layers.get(index).map(|l| l.as_slice())
    }

    /// Index of `v` within its layer.
    pub fn position_of(&self, v: NodeId) -> Option<usize> {
        let layer = self.nodes[v.index()].layer?;
        self.layers.get(layer)?.iter().position(|&w| w == v)
    }

    /// Replaces the order of layer `index` with `order`, which must hold exactly the same nodes.
    pub fn reorder_layer(&mut self, index: usize, order: Vec<NodeId>) -> Result<()> {
        let Some(current) = self.layers.get(index) else {
            return Err(Error::NotAPermutation { layer: index });
        };
        if current.len() != order.len() {
            return Err(Error::NotAPermutation { layer: index });
        }
        let mut remaining: HashMap<NodeId, usize> = HashMap::default();
        for &v in current {
            *remaining.entry(v).or_default() += 1;
        }
        for v in &order {
            match remaining.get_mut(v) {
                Some(count) if *count > 0 => *count -= 1,
                _ => return Err(Error::NotAPermutation { layer: index }),
            }
        }
        self.layers[index] = order;
        Ok(())
    }

    /// Checks that the graph is internally consistent.
    ///
    /// Edges and layers may only reference nodes of this graph, incident edge lists must match
    /// the edges' endpoints, and every node sits in at most one layer, the one its `layer` field
    /// names.
    pub fn validate(&self) -> Result<()> {
        let node_count = self.nodes.len();
        for (e, edge) in self.edges() {
            if edge.source.index() >= node_count || edge.target.index() >= node_count {
                return Err(Error::MissingEndpoint { edge: e });
            }
            if !self.nodes[edge.source.index()].outgoing.contains(&e) {
                return Err(Error::IncidentEdgeMismatch {
                    node: edge.source,
                    edge: e,
                });
            }
            if !self.nodes[edge.target.index()].incoming.contains(&e) {
                return Err(Error::IncidentEdgeMismatch {
                    node: edge.target,
                    edge: e,
                });
            }
        }

        for (v, node) in self.nodes() {
            for (edges, upstream) in [(&node.incoming, true), (&node.outgoing, false)] {
                for &e in edges {
                    let Some(edge) = self.edges.get(e.index()) else {
                        return Err(Error::UnknownIncidentEdge { node: v, edge: e });
                    };
                    let endpoint = if upstream { edge.target } else { edge.source };
                    if endpoint != v {
                        return Err(Error::IncidentEdgeMismatch { node: v, edge: e });
                    }
                }
            }
        }

        let mut placed: HashMap<NodeId, usize> = HashMap::default();
        for (layer, nodes) in self.layers.iter().enumerate() {
            for &v in nodes {
                if v.index() >= node_count {
                    return Err(Error::UnknownNode { node: v, layer });
                }
                if let Some(first) = placed.insert(v, layer) {
                    return Err(Error::NodeInMultipleLayers {
                        node: v,
                        first,
                        second: layer,
                    });
                }
            }
        }

        for (v, node) in self.nodes() {
            let actual = placed.get(&v).copied();
            if node.layer != actual {
                return Err(Error::LayerMismatch {
                    node: v,
                    recorded: node.layer,
                    actual,
                });
            }
        }
        Ok(())
    }
}
