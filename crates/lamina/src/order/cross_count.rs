//! Weighted crossing count between adjacent layers, using the accumulator tree of Barth, Jünger
//! and Mutzel: edges are visited in north order and each one adds the weight of the edges already
//! ending to its right in the south layer.

use crate::graph::{LGraph, NodeId};
use rustc_hash::FxHashMap as HashMap;

/// Weighted number of edge crossings between every pair of adjacent layers of `g`.
pub fn cross_count(g: &LGraph) -> f64 {
    g.layers()
        .windows(2)
        .map(|pair| two_layer_cross_count(g, &pair[0], &pair[1]))
        .sum()
}

/// Accumulator-tree count over the edges running from `north` to `south`.
fn two_layer_cross_count(g: &LGraph, north: &[NodeId], south: &[NodeId]) -> f64 {
    if south.is_empty() {
        return 0.0;
    }

    let south_pos: HashMap<NodeId, usize> =
        south.iter().enumerate().map(|(i, &v)| (v, i)).collect();

    struct SouthEntry {
        pos: usize,
        weight: f64,
    }

    let mut south_entries: Vec<SouthEntry> = Vec::new();
    for &v in north {
        let mut entries: Vec<SouthEntry> = g
            .out_edges(v)
            .filter_map(|e| {
                let pos = *south_pos.get(&e.target)?;
                Some(SouthEntry {
                    pos,
                    weight: e.weight,
                })
            })
            .collect();
        entries.sort_by_key(|e| e.pos);
        south_entries.extend(entries);
    }

    let mut first_index: usize = 1;
    while first_index < south.len() {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree: Vec<f64> = vec![0.0; tree_size];

    let mut cc: f64 = 0.0;
    for entry in south_entries {
        let mut index = entry.pos + first_index;
        tree[index] += entry.weight;
        let mut weight_sum: f64 = 0.0;
        while index > 0 {
            if index % 2 == 1 {
                weight_sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += entry.weight;
        }
        cc += entry.weight * weight_sum;
    }

    cc
}
