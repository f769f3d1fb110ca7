use lamina::graph::{LGraph, NodeId, NodeKind};
use lamina::order::{
    BarycenterHeuristic, BarycenterStates, ConstraintResolver, FixedBarycenters,
    NeighborBarycenters, NoConstraints, lane_of,
};
use lamina::{Error, OrderOptions};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

fn lane_layer(specs: &[(&str, i32, f64)]) -> (LGraph, Vec<NodeId>, FixedBarycenters) {
    let mut g = LGraph::new();
    let mut bary = FixedBarycenters::new();
    let mut layer = Vec::new();
    for &(name, lane, value) in specs {
        let v = g.add_node(name, NodeKind::Normal);
        g.set_lane(v, lane);
        bary.insert(v, value);
        layer.push(v);
    }
    g.push_layer(layer.clone());
    (g, layer, bary)
}

fn names(g: &LGraph, layer: &[NodeId]) -> Vec<String> {
    layer.iter().map(|&v| g.node(v).name.clone()).collect()
}

#[test]
fn lanes_come_before_barycenters() {
    let (g, mut layer, bary) = lane_layer(&[("A", 1, 5.0), ("B", 0, 2.0), ("C", 1, 1.0)]);
    let mut h = BarycenterHeuristic::lane(bary, NoConstraints, &OrderOptions::default());

    h.minimize_crossings(&g, &mut layer, false, false, true).unwrap();
    assert_eq!(names(&g, &layer), vec!["B", "C", "A"]);
}

#[test]
fn long_edge_dummies_take_the_larger_endpoint_lane() {
    let mut g = LGraph::new();
    let s = g.add_node("s", NodeKind::Normal);
    let d = g.add_node("d", NodeKind::LongEdge);
    let x = g.add_node("x", NodeKind::Normal);
    let t = g.add_node("t", NodeKind::Normal);
    g.set_lane(s, 2).set_lane(x, 1).set_lane(t, 0);
    g.add_edge(s, d);
    g.add_edge(d, t);
    g.push_layer(vec![s]);
    g.push_layer(vec![d, x]);
    g.push_layer(vec![t]);

    assert_eq!(lane_of(&g, d).unwrap(), 2);

    let bary: FixedBarycenters = [(d, 0.0), (x, 5.0)].into_iter().collect();
    let mut h = BarycenterHeuristic::lane(bary, NoConstraints, &OrderOptions::default());
    let mut layer = vec![d, x];
    h.minimize_crossings(&g, &mut layer, true, false, true).unwrap();
    assert_eq!(layer, vec![x, d]);
}

#[test]
fn label_dummies_take_the_source_lane() {
    let mut g = LGraph::new();
    let s = g.add_node("s", NodeKind::Normal);
    let l = g.add_node("l", NodeKind::Label);
    let t = g.add_node("t", NodeKind::Normal);
    g.set_lane(s, 0).set_lane(t, 3);
    g.add_edge(s, l);
    g.add_edge(l, t);

    assert_eq!(lane_of(&g, l).unwrap(), 0);
}

#[test]
fn dummies_in_a_chain_resolve_through_every_hop() {
    let mut g = LGraph::new();
    let s = g.add_node("s", NodeKind::Normal);
    let d1 = g.add_node("d1", NodeKind::LongEdge);
    let l = g.add_node("l", NodeKind::Label);
    let d2 = g.add_node("d2", NodeKind::LongEdge);
    let t = g.add_node("t", NodeKind::Normal);
    g.set_lane(s, 4).set_lane(t, 7);
    g.add_edge(s, d1);
    g.add_edge(d1, l);
    g.add_edge(l, d2);
    g.add_edge(d2, t);

    assert_eq!(lane_of(&g, d1).unwrap(), 7);
    assert_eq!(lane_of(&g, d2).unwrap(), 7);
    assert_eq!(lane_of(&g, l).unwrap(), 4);
}

#[test]
fn node_without_lane_fails_and_leaves_the_layer_alone() {
    let mut g = LGraph::new();
    let a = g.add_node("a", NodeKind::Normal);
    let b = g.add_node("b", NodeKind::Normal);
    g.set_lane(a, 1);
    g.push_layer(vec![a, b]);

    let bary: FixedBarycenters = [(a, 5.0), (b, 0.0)].into_iter().collect();
    let mut h = BarycenterHeuristic::lane(bary, NoConstraints, &OrderOptions::default());
    let mut layer = vec![a, b];
    let err = h
        .minimize_crossings(&g, &mut layer, true, false, true)
        .unwrap_err();
    assert!(matches!(err, Error::UnresolvedLane { node } if node == b));
    assert_eq!(layer, vec![a, b]);
}

#[test]
fn single_node_layer_is_not_resolved() {
    let mut g = LGraph::new();
    let d = g.add_node("d", NodeKind::LongEdge);
    g.push_layer(vec![d]);

    let mut h = BarycenterHeuristic::lane(
        FixedBarycenters::new(),
        NoConstraints,
        &OrderOptions::default(),
    );
    let mut layer = vec![d];
    h.minimize_crossings(&g, &mut layer, true, false, true)
        .unwrap();
    assert_eq!(layer, vec![d]);
    assert!(lane_of(&g, d).is_err());
}

#[test]
fn dangling_long_edge_dummy_has_no_lane() {
    let mut g = LGraph::new();
    let d = g.add_node("d", NodeKind::LongEdge);
    let t = g.add_node("t", NodeKind::Normal);
    g.set_lane(t, 1);
    g.add_edge(d, t);

    assert!(matches!(
        lane_of(&g, d),
        Err(Error::UnresolvedLane { node }) if node == d
    ));
}

#[test]
fn cyclic_dummy_chain_is_an_error() {
    let mut g = LGraph::new();
    let d1 = g.add_node("d1", NodeKind::LongEdge);
    let d2 = g.add_node("d2", NodeKind::LongEdge);
    g.add_edge(d1, d2);
    g.add_edge(d2, d1);

    assert!(matches!(
        lane_of(&g, d1),
        Err(Error::Graph(lamina::graph::Error::DummyChainCycle { .. }))
    ));
}

fn random_lane_layer(rng: &mut StdRng, n: usize) -> (LGraph, Vec<NodeId>, FixedBarycenters) {
    let mut g = LGraph::new();
    let mut bary = FixedBarycenters::new();
    let mut layer = Vec::new();
    for i in 0..n {
        let v = g.add_node(format!("v{i}"), NodeKind::Normal);
        g.set_lane(v, rng.gen_range(0..4));
        // Distinct values so that within-lane order is fully determined.
        bary.insert(v, i as f64 + rng.gen_range(0.0..0.5));
        layer.push(v);
    }
    layer.shuffle(rng);
    g.push_layer(layer.clone());
    (g, layer, bary)
}

#[test]
fn lanes_stay_grouped_and_sorted_within_each_lane() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let (g, mut layer, bary) = random_lane_layer(&mut rng, 15);
        let mut h =
            BarycenterHeuristic::lane(bary.clone(), NoConstraints, &OrderOptions::default());
        h.minimize_crossings(&g, &mut layer, true, false, true).unwrap();

        for pair in layer.windows(2) {
            let (la, lb) = (g.node(pair[0]).lane, g.node(pair[1]).lane);
            assert!(la <= lb, "lane order violated: {la:?} before {lb:?}");
            if la == lb {
                assert!(bary.get(pair[0]) < bary.get(pair[1]));
            }
        }
    }
}

#[test]
fn corrective_pass_does_not_change_the_result() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        let (g, layer, bary) = random_lane_layer(&mut rng, 12);

        let mut single = layer.clone();
        BarycenterHeuristic::lane(bary.clone(), NoConstraints, &OrderOptions::default())
            .minimize_crossings(&g, &mut single, true, false, true)
            .unwrap();

        let mut double = layer.clone();
        let options = OrderOptions {
            corrective_pass: true,
            ..OrderOptions::default()
        };
        BarycenterHeuristic::lane(bary, NoConstraints, &options)
            .minimize_crossings(&g, &mut double, true, false, true)
            .unwrap();

        assert_eq!(single, double);
    }
}

#[derive(Default)]
struct ReversingResolver {
    seen: Vec<Vec<NodeId>>,
}

impl ConstraintResolver for ReversingResolver {
    fn process_constraints(
        &mut self,
        _graph: &LGraph,
        layer: &mut [NodeId],
        _states: &BarycenterStates,
    ) {
        self.seen.push(layer.to_vec());
        layer.reverse();
    }
}

#[test]
fn constraint_resolver_sees_the_sorted_layer_and_has_the_last_word() {
    let (g, mut layer, bary) = lane_layer(&[("A", 1, 5.0), ("B", 0, 2.0), ("C", 1, 1.0)]);
    let mut h = BarycenterHeuristic::lane(
        bary,
        ReversingResolver::default(),
        &OrderOptions::default(),
    );

    h.minimize_crossings(&g, &mut layer, false, false, true).unwrap();
    assert_eq!(h.resolver().seen.len(), 1);
    assert_eq!(names(&g, &h.resolver().seen[0]), vec!["B", "C", "A"]);
    assert_eq!(names(&g, &layer), vec!["A", "C", "B"]);
}

#[test]
fn resolver_is_skipped_for_single_node_layers() {
    let (g, mut layer, bary) = lane_layer(&[("A", 1, 5.0)]);
    let mut h = BarycenterHeuristic::lane(
        bary,
        ReversingResolver::default(),
        &OrderOptions::default(),
    );
    h.minimize_crossings(&g, &mut layer, false, false, true).unwrap();
    assert!(h.resolver().seen.is_empty());
}

#[test]
fn sorting_twice_gives_the_same_order() {
    let mut rng = StdRng::seed_from_u64(11);
    let (g, layer, bary) = random_lane_layer(&mut rng, 20);
    let mut h = BarycenterHeuristic::lane(bary, NoConstraints, &OrderOptions::default());

    let mut first = layer.clone();
    h.minimize_crossings(&g, &mut first, true, false, true).unwrap();
    let mut second = layer.clone();
    h.minimize_crossings(&g, &mut second, true, false, true).unwrap();
    assert_eq!(first, second);
}

#[test]
fn neighbour_barycenters_order_nodes_inside_a_lane() {
    let mut g = LGraph::new();
    let a = g.add_node("a", NodeKind::Normal);
    let b = g.add_node("b", NodeKind::Normal);
    let y = g.add_node("y", NodeKind::Normal);
    let x = g.add_node("x", NodeKind::Normal);
    for v in [a, b, x, y] {
        g.set_lane(v, 0);
    }
    g.add_edge(a, x);
    g.add_edge(b, y);
    g.push_layer(vec![a, b]);
    g.push_layer(vec![y, x]);

    let options = OrderOptions {
        random_amount: 0.0,
        ..OrderOptions::default()
    };
    let mut h =
        BarycenterHeuristic::lane(NeighborBarycenters::new(&options), NoConstraints, &options);
    h.minimize_layer(&mut g, 1, true, false, true).unwrap();
    assert_eq!(g.layer(1), Some(&[x, y][..]));
}

#[test]
fn independent_layers_can_be_sorted_on_separate_threads() {
    let mut rng = StdRng::seed_from_u64(5);
    let inputs: Vec<_> = (0..4).map(|_| random_lane_layer(&mut rng, 25)).collect();

    let sequential: Vec<Vec<NodeId>> = inputs
        .iter()
        .map(|(g, layer, bary)| {
            let mut layer = layer.clone();
            BarycenterHeuristic::lane(bary.clone(), NoConstraints, &OrderOptions::default())
                .minimize_crossings(g, &mut layer, true, false, true)
                .unwrap();
            layer
        })
        .collect();

    let parallel: Vec<Vec<NodeId>> = std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|(g, layer, bary)| {
                scope.spawn(move || {
                    let mut layer = layer.clone();
                    BarycenterHeuristic::lane(
                        bary.clone(),
                        NoConstraints,
                        &OrderOptions::default(),
                    )
                    .minimize_crossings(g, &mut layer, true, false, true)
                    .unwrap();
                    layer
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, parallel);
}
