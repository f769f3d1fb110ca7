//! Walks along chains of dummy nodes to the real nodes they connect.

use crate::{Error, LGraph, NodeId, Result};
use rustc_hash::FxBuildHasher;

type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Upstream,
    Downstream,
}

/// First node upstream of `v` that is not a long-edge or label dummy.
///
/// Only the first incoming edge of each dummy is followed. Returns `Ok(None)` when the chain
/// ends at a node without incoming edges.
pub fn actual_source(g: &LGraph, v: NodeId) -> Result<Option<NodeId>> {
    walk_chain(g, v, Direction::Upstream)
}

/// First node downstream of `v` that is not a long-edge or label dummy.
pub fn actual_target(g: &LGraph, v: NodeId) -> Result<Option<NodeId>> {
    walk_chain(g, v, Direction::Downstream)
}

fn walk_chain(g: &LGraph, start: NodeId, direction: Direction) -> Result<Option<NodeId>> {
    let mut visited: HashSet<NodeId> = HashSet::default();
    visited.insert(start);

    let mut current = start;
    loop {
        let node = g.node(current);
        let edges = match direction {
            Direction::Upstream => &node.incoming,
            Direction::Downstream => &node.outgoing,
        };
        let Some(&e) = edges.first() else {
            return Ok(None);
        };
        let edge = g.edge(e);
        let next = match direction {
            Direction::Upstream => edge.source,
            Direction::Downstream => edge.target,
        };
        if !g.node(next).kind.is_chain_dummy() {
            return Ok(Some(next));
        }
        if !visited.insert(next) {
            return Err(Error::DummyChainCycle { node: next });
        }
        current = next;
    }
}
