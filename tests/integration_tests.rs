//! End-to-end checks of hub ranking and community detection

use retweet_network_analyzer::cluster::{summarize_communities, to_community_map_with_threshold};
use retweet_network_analyzer::data::build_community_graph;
use retweet_network_analyzer::{
    to_community_map, top_hubs, AnalysisError, CommunityDetector, Config, DetectorState, Graph,
};

fn names(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{}{}", prefix, i)).collect()
}

/// Complete graph over the given nodes
fn clique(nodes: &[String]) -> Vec<(String, String)> {
    let mut edges = Vec::new();
    for (i, u) in nodes.iter().enumerate() {
        for v in &nodes[i + 1..] {
            edges.push((u.clone(), v.clone()));
        }
    }
    edges
}

#[test]
fn test_triangle_and_pair_degrees() {
    let graph = Graph::build([("A", "B"), ("B", "C"), ("C", "A"), ("D", "E")], false);

    for (node, expected) in [("A", 2), ("B", 2), ("C", 2), ("D", 1), ("E", 1)] {
        assert_eq!(graph.degree(node).unwrap(), expected, "degree of {}", node);
    }

    assert_eq!(
        top_hubs(&graph, 2),
        vec![("A".to_string(), 2), ("B".to_string(), 2)]
    );
}

#[test]
fn test_bridge_between_triangles() {
    let graph = Graph::build(
        [("A", "B"), ("B", "C"), ("C", "A"), ("D", "E"), ("E", "F"), ("F", "D"), ("C", "D")],
        false,
    );
    let mut detector = CommunityDetector::new(&graph);

    let partition = detector.step().unwrap();

    assert_eq!(partition, vec![vec!["A", "B", "C"], vec!["D", "E", "F"]]);
    // The source graph is untouched
    assert_eq!(graph.edge_count(), 7);
}

#[test]
fn test_single_edge_exhausts() {
    let graph = Graph::build([("A", "B")], false);
    let mut detector = CommunityDetector::new(&graph);

    let err = detector.run(2).unwrap_err();
    assert_eq!(err, AnalysisError::ExhaustedPartitions { requested: 2, completed: 1 });
    assert_eq!(detector.state(), DetectorState::Exhausted);
    assert_eq!(
        detector.last_partition(),
        Some(&vec![vec!["A".to_string()], vec!["B".to_string()]])
    );
}

#[test]
fn test_residual_groups_share_id_zero() {
    let partition = vec![names("big", 7), names("pair", 2), names("solo", 1)];
    let map = to_community_map(&partition);

    assert_eq!(map.len(), 10);
    assert!(names("big", 7).iter().all(|n| map[n] == 1));
    assert!(names("pair", 2).iter().all(|n| map[n] == 0));
    assert_eq!(map["solo0"], 0);
}

#[test]
fn test_two_cliques_split_into_communities() {
    let left = names("l", 6);
    let right = names("r", 6);
    let mut edges = clique(&left);
    edges.extend(clique(&right));
    edges.push(("l5".to_string(), "r0".to_string()));
    edges.push(("loner".to_string(), "l0".to_string()));

    let graph = Graph::build(edges, false);
    let mut detector = CommunityDetector::new(&graph);

    // Step 1 drops the clique bridge, step 2 drops the pendant edge
    let partition = detector.run(1).unwrap();
    assert_eq!(partition.len(), 2);

    let partition = detector.run(1).unwrap();
    assert_eq!(partition.len(), 3);
    assert_eq!(detector.state(), DetectorState::Stepped(2));

    let map = to_community_map(&partition);
    assert_eq!(map["l0"], 1);
    assert_eq!(map["loner"], 0);
    assert_eq!(map["r3"], 2);

    let communities = summarize_communities(&graph, &partition, &map, 3);
    assert_eq!(communities.len(), 2);
    assert_eq!(communities[0].size, 6);
    assert_eq!(communities[0].density, 1.0);
    assert_eq!(communities[0].central_nodes[0], "l0");
    assert_eq!(communities[1].members, right);
}

#[test]
fn test_run_is_deterministic() {
    let mut edges = clique(&names("a", 4));
    edges.extend(clique(&names("b", 5)));
    edges.push(("a0".to_string(), "b0".to_string()));
    edges.push(("a3".to_string(), "b4".to_string()));
    edges.push(("c0".to_string(), "a1".to_string()));

    let graph = Graph::build(edges, false);
    let first = CommunityDetector::new(&graph).run(2).unwrap();
    let second = CommunityDetector::new(&graph).run(2).unwrap();

    assert_eq!(first, second);
    assert_eq!(to_community_map(&first), to_community_map(&second));
}

#[test]
fn test_empty_graph() {
    let graph = Graph::new(true);
    assert!(top_hubs(&graph, 5).is_empty());
    assert!(graph.connected_components().is_empty());

    let mut detector = CommunityDetector::new(&graph);
    assert!(matches!(
        detector.run(1),
        Err(AnalysisError::ExhaustedPartitions { completed: 0, .. })
    ));
    assert!(to_community_map_with_threshold(&Vec::new(), 5).is_empty());
}

#[test]
fn test_pipeline_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut body = String::new();
    for (u, v) in clique(&names("u", 6)) {
        body.push_str(&format!("@{};,.{}\n", u.to_uppercase(), v));
    }
    body.push_str("u0;,.NAN\n");
    body.push_str("x;,.y\n");
    std::fs::write(dir.path().join("part1.csv"), body).unwrap();

    let graph = build_community_graph(dir.path(), &Config::default()).unwrap();
    assert_eq!(graph.node_count(), 8);
    assert_eq!(graph.edge_count(), 16);

    let mut detector = CommunityDetector::new(&graph);
    let partition = detector.run(1).unwrap();
    let map = to_community_map(&partition);

    assert_eq!(map.len(), graph.node_count());
    assert_eq!(map["x"], 0);
}
