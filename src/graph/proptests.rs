//! Property-based tests for cycle search and topological sort, checked
//! against petgraph as an independent oracle.

use std::collections::{HashMap, HashSet};

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::DiGraph;
use proptest::prelude::*;

use super::{Graph, IterationOrder, Node};

/// Strategy for an arbitrary directed graph: a node count and an edge list
/// over node indices.
fn arb_edges() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..12).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..30)))
}

/// Strategy for an acyclic graph: edges only run from lower to higher index.
fn arb_dag_edges() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    arb_edges().prop_map(|(n, edges)| {
        let forward = edges
            .into_iter()
            .filter(|(a, b)| a != b)
            .map(|(a, b)| (a.min(b), a.max(b)))
            .collect();
        (n, forward)
    })
}

fn arb_order() -> impl Strategy<Value = IterationOrder> {
    prop_oneof![Just(IterationOrder::Insertion), Just(IterationOrder::Lexical)]
}

/// Builds the graph, skipping self loops and duplicates. Node ids are
/// inserted in reverse so insertion and lexical order differ.
fn build(n: usize, edges: &[(usize, usize)], order: IterationOrder) -> Graph<usize> {
    let mut graph = Graph::with_order(order);
    for i in (0..n).rev() {
        graph.add_node(Node::new(format!("n{i:02}"), i)).unwrap();
    }
    for &(a, b) in edges {
        let _ = graph.add_edge(&format!("n{a:02}"), &format!("n{b:02}"));
    }
    graph
}

fn oracle(graph: &Graph<usize>) -> DiGraph<(), ()> {
    let mut oracle = DiGraph::new();
    let index: HashMap<&str, _> = graph
        .get_all_nodes()
        .into_iter()
        .map(|node| (node.id().as_str(), oracle.add_node(())))
        .collect();
    for node in graph.get_all_nodes() {
        for target in node.edges() {
            oracle.add_edge(index[node.id().as_str()], index[target.as_str()], ());
        }
    }
    oracle
}

proptest! {
    #[test]
    fn has_cycle_iff_sort_fails((n, edges) in arb_edges(), order in arb_order()) {
        let graph = build(n, &edges, order);
        prop_assert_eq!(graph.has_cycle(), graph.topological_sort().is_err());
        prop_assert_eq!(graph.has_cycle(), is_cyclic_directed(&oracle(&graph)));
    }

    #[test]
    fn sort_places_every_node_once_before_its_successors(
        (n, edges) in arb_dag_edges(),
        order in arb_order(),
    ) {
        let graph = build(n, &edges, order);
        let sorted = graph.topological_sort().unwrap();

        prop_assert_eq!(sorted.len(), graph.len());
        let position: HashMap<&str, usize> = sorted
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id().as_str(), i))
            .collect();
        prop_assert_eq!(position.len(), graph.len());

        for node in graph.get_all_nodes() {
            for target in node.edges() {
                prop_assert!(position[node.id().as_str()] < position[target.as_str()]);
            }
        }
    }

    #[test]
    fn found_cycle_is_a_closed_walk((n, edges) in arb_edges(), order in arb_order()) {
        let graph = build(n, &edges, order);
        let walk: Vec<&str> = graph.find_cycle().iter().map(|node| node.id().as_str()).collect();

        if walk.is_empty() {
            prop_assert!(graph.validate().is_ok());
        } else {
            prop_assert!(walk.len() >= 3);
            prop_assert_eq!(walk.first(), walk.last());
            for pair in walk.windows(2) {
                prop_assert!(graph.has_edge(pair[0], pair[1]));
            }
            let distinct: HashSet<&str> = walk[..walk.len() - 1].iter().copied().collect();
            prop_assert_eq!(distinct.len(), walk.len() - 1);
        }
    }

    #[test]
    fn remove_node_leaves_no_dangling_edges(
        (n, edges) in arb_edges(),
        victim in 0usize..12,
    ) {
        let mut graph = build(n, &edges, IterationOrder::Insertion);
        let victim = format!("n{:02}", victim % n);
        graph.remove_node(&victim).unwrap();

        for node in graph.get_all_nodes() {
            for target in node.edges() {
                prop_assert!(graph.contains(target.as_str()));
            }
        }
    }

    #[test]
    fn preconnected_nodes_never_leave_dangling_edges((n, edges) in arb_edges()) {
        let mut standalone: Vec<Node<usize>> =
            (0..n).map(|i| Node::new(format!("n{i:02}"), i)).collect();
        for &(a, b) in &edges {
            let target = Node::new(format!("n{b:02}"), b);
            let _ = standalone[a].connect(&target);
        }

        let mut graph = Graph::new();
        for node in standalone {
            let _ = graph.add_node(node);
        }
        let victim = graph.get_all_nodes().first().map(|node| node.id().clone());
        if let Some(victim) = victim {
            let removed = graph.remove_node(victim.as_str()).unwrap();
            prop_assert_eq!(removed.out_degree(), 0);
        }

        for node in graph.get_all_nodes() {
            for target in node.edges() {
                prop_assert!(graph.contains(target.as_str()));
            }
        }
        prop_assert_eq!(graph.has_cycle(), is_cyclic_directed(&oracle(&graph)));
    }

    #[test]
    fn connect_then_disconnect_restores_adjacency(
        (n, edges) in arb_edges(),
        extra in (0usize..12, 0usize..12),
    ) {
        let mut graph = build(n, &edges, IterationOrder::Insertion);
        let from = format!("n{:02}", extra.0 % n);
        let to = format!("n{:02}", extra.1 % n);
        let before = graph.get_node(&from).unwrap().edge_to().to_vec();

        if graph.add_edge(&from, &to).is_ok() {
            graph.remove_edge(&from, &to).unwrap();
        }
        prop_assert_eq!(graph.get_node(&from).unwrap().edge_to(), before.as_slice());
    }
}
