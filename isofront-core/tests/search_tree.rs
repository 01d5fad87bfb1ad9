use geo::Point;
use isofront_core::model::{FastestWeighting, RoadEdge, RoadNetwork, Weighting};
use isofront_core::search::{ReachabilityTree, TraversalMode};
use isofront_core::seed::Seed;
use isofront_core::{Error, Millis, Weight};
use petgraph::graph::{EdgeIndex, NodeIndex};

/// A-B-C-D at 100 m spacing, 10 m/s: 10 s / 100 m per hop, both ways.
fn line_network() -> (RoadNetwork, Vec<NodeIndex>) {
    let mut builder = RoadNetwork::builder();
    let nodes: Vec<NodeIndex> = (0..4i64)
        .map(|i| builder.add_node(i + 1, Point::new(i as f64 * 0.001, 0.0)))
        .collect();
    for pair in nodes.windows(2) {
        builder.add_two_way(pair[0], pair[1], RoadEdge::new(100.0, 10.0));
    }
    (builder.build(), nodes)
}

#[test]
fn time_limited_line_graph() {
    let (network, nodes) = line_network();
    let weighting = FastestWeighting;
    let mut tree = ReachabilityTree::new(&network, &weighting, false, TraversalMode::NodeBased);
    tree.set_time_limit(25_000.0);

    let visited = tree.search_from_node(nodes[0], |_, _| {}).unwrap();
    assert_eq!(visited, 3, "A, B and C settle; D exceeds the budget");

    let retained = tree.retained_labels().unwrap();
    let time_at = |node: NodeIndex| {
        retained
            .iter()
            .find(|label| label.node == node)
            .map(|label| label.time)
            .unwrap()
    };
    assert_eq!(time_at(nodes[0]), 0);
    assert_eq!(time_at(nodes[1]), 10_000);
    assert_eq!(time_at(nodes[2]), 20_000);
    assert_eq!(time_at(nodes[3]), 30_000, "one just-over label is kept");

    let boundary = tree.boundary_labels().unwrap();
    assert_eq!(boundary.len(), 1);
    assert_eq!(boundary[0].node, nodes[3]);
    let parent = tree.parent_of(boundary[0]).unwrap();
    assert!(tree.explore_value(parent) <= 25_000.0);
}

#[test]
fn callback_sees_every_relaxation() {
    let (network, nodes) = line_network();
    let weighting = FastestWeighting;
    let mut tree = ReachabilityTree::new(&network, &weighting, false, TraversalMode::NodeBased);
    tree.set_time_limit(25_000.0);

    let mut observed = Vec::new();
    tree.search_from_node(nodes[0], |label, parent| {
        observed.push((label.node, parent.map(|p| p.node)));
    })
    .unwrap();

    // 1 seed + A->B, B->A, B->C, C->B, C->D
    assert_eq!(observed.len(), 6);
    assert!(
        observed.contains(&(nodes[3], Some(nodes[2]))),
        "the over-limit relaxation to D is still reported"
    );
    assert!(
        observed.contains(&(nodes[0], Some(nodes[1]))),
        "the dominated relaxation back to A is still reported"
    );
}

#[test]
fn second_search_rejected() {
    let (network, nodes) = line_network();
    let weighting = FastestWeighting;
    let mut tree = ReachabilityTree::new(&network, &weighting, false, TraversalMode::NodeBased);
    tree.set_time_limit(25_000.0);

    tree.search_from_node(nodes[0], |_, _| {}).unwrap();
    assert!(matches!(
        tree.search_from_node(nodes[0], |_, _| {}),
        Err(Error::SearchAlreadyRun)
    ));
}

#[test]
fn extraction_before_search_rejected() {
    let (network, _) = line_network();
    let weighting = FastestWeighting;
    let tree = ReachabilityTree::new(&network, &weighting, false, TraversalMode::NodeBased);
    assert!(matches!(tree.boundary_labels(), Err(Error::SearchNotRun)));
    assert!(matches!(tree.retained_labels(), Err(Error::SearchNotRun)));
}

#[test]
fn path_extraction_unsupported() {
    let (network, nodes) = line_network();
    let weighting = FastestWeighting;
    let mut tree = ReachabilityTree::new(&network, &weighting, false, TraversalMode::NodeBased);
    tree.set_time_limit(25_000.0);
    tree.search_from_node(nodes[0], |_, _| {}).unwrap();

    assert!(matches!(
        tree.extract_path(nodes[0], nodes[3]),
        Err(Error::UnsupportedOperation(_))
    ));
}

#[test]
fn missing_limit_rejected() {
    let (network, nodes) = line_network();
    let weighting = FastestWeighting;
    let mut tree = ReachabilityTree::new(&network, &weighting, false, TraversalMode::NodeBased);
    assert!(matches!(
        tree.search_from_node(nodes[0], |_, _| {}),
        Err(Error::LimitNotSet)
    ));
}

#[test]
fn empty_seed_set_rejected() {
    let (network, _) = line_network();
    let weighting = FastestWeighting;
    let mut tree = ReachabilityTree::new(&network, &weighting, false, TraversalMode::NodeBased);
    tree.set_time_limit(25_000.0);
    assert!(matches!(
        tree.search(&[], false, |_, _| {}),
        Err(Error::NoSeeds)
    ));
}

#[test]
fn costs_monotone_along_parent_chains() {
    let (network, nodes) = line_network();
    let weighting = FastestWeighting;
    let mut tree = ReachabilityTree::new(&network, &weighting, false, TraversalMode::NodeBased);
    tree.set_time_limit(60_000.0);
    tree.search_from_node(nodes[0], |_, _| {}).unwrap();

    for label in tree.retained_labels().unwrap() {
        let mut current = *label;
        while let Some(parent) = tree.parent_of(&current) {
            assert!(current.weight >= parent.weight);
            assert!(current.time >= parent.time);
            assert!(current.distance >= parent.distance);
            current = *parent;
        }
    }
}

#[test]
fn cheaper_path_supersedes_earlier_label() {
    // Direct A->X is slow; the detour A->M->X is cheaper but discovered
    // second. The retained label for X must be the cheap one.
    let mut builder = RoadNetwork::builder();
    let a = builder.add_node(1, Point::new(0.0, 0.0));
    let m = builder.add_node(2, Point::new(0.001, 0.001));
    let x = builder.add_node(3, Point::new(0.002, 0.0));
    builder.add_edge(a, x, RoadEdge::new(200.0, 2.0)); // 100 s
    builder.add_edge(a, m, RoadEdge::new(150.0, 15.0)); // 10 s
    builder.add_edge(m, x, RoadEdge::new(150.0, 15.0)); // 10 s
    let network = builder.build();

    let weighting = FastestWeighting;
    let mut tree = ReachabilityTree::new(&network, &weighting, false, TraversalMode::NodeBased);
    tree.set_time_limit(300_000.0);

    let mut candidates_for_x = Vec::new();
    tree.search_from_node(a, |label, _| {
        if label.node == x {
            candidates_for_x.push(label.weight);
        }
    })
    .unwrap();

    assert_eq!(candidates_for_x.len(), 2);
    let retained = tree.retained_labels().unwrap();
    let best = retained.iter().find(|label| label.node == x).unwrap();
    assert_eq!(best.weight, 20.0);
    assert_eq!(best.time, 20_000);
    assert!(candidates_for_x.iter().all(|&w| w >= best.weight));
}

#[test]
fn edge_based_traversal_keeps_one_label_per_incoming_edge() {
    // Diamond: D is reachable through B and through C. Edge-based
    // deduplication keeps both arrivals.
    let mut builder = RoadNetwork::builder();
    let a = builder.add_node(1, Point::new(0.0, 0.0));
    let b = builder.add_node(2, Point::new(0.001, 0.001));
    let c = builder.add_node(3, Point::new(0.001, -0.001));
    let d = builder.add_node(4, Point::new(0.002, 0.0));
    builder.add_edge(a, b, RoadEdge::new(100.0, 10.0));
    builder.add_edge(a, c, RoadEdge::new(120.0, 10.0));
    builder.add_edge(b, d, RoadEdge::new(100.0, 10.0));
    builder.add_edge(c, d, RoadEdge::new(100.0, 10.0));
    let network = builder.build();

    let weighting = FastestWeighting;
    let mut tree = ReachabilityTree::new(&network, &weighting, false, TraversalMode::EdgeBased);
    tree.set_time_limit(60_000.0);
    tree.search(
        &[Seed {
            node: a,
            distance: 0.0,
        }],
        false,
        |_, _| {},
    )
    .unwrap();

    let retained = tree.retained_labels().unwrap();
    let arrivals_at_d = retained.iter().filter(|label| label.node == d).count();
    assert_eq!(arrivals_at_d, 2);
}

#[test]
fn reverse_search_mirrors_forward_on_symmetric_graph() {
    let (network, nodes) = line_network();
    let weighting = FastestWeighting;

    let reachable = |reverse_flow: bool| {
        let mut tree =
            ReachabilityTree::new(&network, &weighting, reverse_flow, TraversalMode::NodeBased);
        tree.set_time_limit(25_000.0);
        tree.search_from_node(nodes[0], |_, _| {}).unwrap();
        let mut reached: Vec<NodeIndex> = tree
            .retained_labels()
            .unwrap()
            .iter()
            .filter(|label| tree.explore_value(label) <= 25_000.0)
            .map(|label| label.node)
            .collect();
        reached.sort();
        reached
    };

    assert_eq!(reachable(false), reachable(true));
}

/// Free-flow travel plus fixed penalties keyed by (from, to) edge pairs.
struct TurnTable {
    banned: (EdgeIndex, EdgeIndex),
    penalized: (EdgeIndex, EdgeIndex),
}

impl Weighting for TurnTable {
    fn edge_weight(&self, edge: EdgeIndex, payload: &RoadEdge, reverse: bool) -> Weight {
        FastestWeighting.edge_weight(edge, payload, reverse)
    }

    fn edge_millis(&self, edge: EdgeIndex, payload: &RoadEdge, reverse: bool) -> Millis {
        FastestWeighting.edge_millis(edge, payload, reverse)
    }

    fn turn_weight(&self, from: Option<EdgeIndex>, _via: NodeIndex, to: EdgeIndex) -> Weight {
        match from {
            Some(from) if (from, to) == self.banned => f64::INFINITY,
            Some(from) if (from, to) == self.penalized => 5.0,
            _ => 0.0,
        }
    }

    fn turn_millis(&self, from: Option<EdgeIndex>, _via: NodeIndex, to: EdgeIndex) -> Millis {
        if from == Some(self.penalized.0) && to == self.penalized.1 {
            5_000
        } else {
            0
        }
    }
}

#[test]
fn turn_costs_shape_the_tree_in_edge_based_traversal() {
    // A->B forks into B->C (penalized turn) and B->D (banned turn)
    let mut builder = RoadNetwork::builder();
    let a = builder.add_node(1, Point::new(0.0, 0.0));
    let b = builder.add_node(2, Point::new(0.001, 0.0));
    let c = builder.add_node(3, Point::new(0.002, 0.0));
    let d = builder.add_node(4, Point::new(0.001, 0.001));
    let ab = builder.add_edge(a, b, RoadEdge::new(100.0, 10.0));
    let bc = builder.add_edge(b, c, RoadEdge::new(100.0, 10.0));
    let bd = builder.add_edge(b, d, RoadEdge::new(100.0, 10.0));
    let network = builder.build();

    let weighting = TurnTable {
        banned: (ab, bd),
        penalized: (ab, bc),
    };
    let mut tree = ReachabilityTree::new(&network, &weighting, false, TraversalMode::EdgeBased);
    tree.set_time_limit(60_000.0);
    tree.search(
        &[Seed {
            node: a,
            distance: 0.0,
        }],
        false,
        |label, _| assert_ne!(label.node, d, "the banned turn must never be relaxed"),
    )
    .unwrap();

    let retained = tree.retained_labels().unwrap();
    assert!(retained.iter().all(|label| label.node != d));
    let at_c = retained.iter().find(|label| label.node == c).unwrap();
    assert_eq!(at_c.time, 25_000, "two edge times plus the turn penalty");
    assert_eq!(at_c.weight, 25.0);
}

#[test]
fn blocked_edges_are_never_expanded() {
    let mut builder = RoadNetwork::builder();
    let a = builder.add_node(1, Point::new(0.0, 0.0));
    let b = builder.add_node(2, Point::new(0.001, 0.0));
    let c = builder.add_node(3, Point::new(0.002, 0.0));
    builder.add_edge(a, b, RoadEdge::new(100.0, 10.0));
    builder.add_edge(b, c, RoadEdge::new(100.0, 0.0)); // impassable
    let network = builder.build();

    let weighting = FastestWeighting;
    let mut tree = ReachabilityTree::new(&network, &weighting, false, TraversalMode::NodeBased);
    tree.set_time_limit(60_000.0);
    tree.search_from_node(a, |label, _| {
        assert_ne!(label.node, c, "blocked edge must not produce labels");
    })
    .unwrap();

    let retained = tree.retained_labels().unwrap();
    assert!(retained.iter().all(|label| label.node != c));
}
