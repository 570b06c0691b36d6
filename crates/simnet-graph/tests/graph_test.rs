use simnet_graph::{EdgeKey, Graph, GraphOptions, alg};

fn multigraph() -> Graph<String, i32, ()> {
    Graph::new(GraphOptions {
        multigraph: true,
        compound: true,
        ..Default::default()
    })
}

#[test]
fn nodes_iterate_in_insertion_order() {
    let mut g = multigraph();
    g.set_node("b", "B".to_string());
    g.set_node("a", "A".to_string());
    g.ensure_node("c");

    assert_eq!(g.node_ids(), vec!["b", "a", "c"]);
    assert_eq!(g.node("a").map(String::as_str), Some("A"));
    assert_eq!(g.node("c").map(String::as_str), Some(""));
    assert_eq!(g.node_count(), 3);
}

#[test]
fn set_node_replaces_the_label_without_moving_the_node() {
    let mut g = multigraph();
    g.set_node("a", "1".to_string());
    g.set_node("b", "2".to_string());
    g.set_node("a", "3".to_string());

    assert_eq!(g.node_ids(), vec!["a", "b"]);
    assert_eq!(g.node("a").map(String::as_str), Some("3"));
}

#[test]
fn set_edge_creates_missing_endpoints_with_the_default_label() {
    let mut g = multigraph();
    g.set_default_node_label(|| "default".to_string());
    g.set_edge_with_label("a", "b", 4);

    assert_eq!(g.node("a").map(String::as_str), Some("default"));
    assert_eq!(g.edge("a", "b", None), Some(&4));
    assert!(!g.has_edge("b", "a", None));
}

#[test]
fn parallel_edges_are_distinguished_by_name() {
    let mut g = multigraph();
    g.set_edge_named("a", "b", Some("x"), Some(1));
    g.set_edge_named("a", "b", Some("y"), Some(2));
    g.set_edge_with_label("a", "b", 3);

    assert_eq!(g.edge_count(), 3);
    assert_eq!(g.out_edges("a", Some("b")).len(), 3);
    assert_eq!(g.edge("a", "b", Some("y")), Some(&2));
    assert_eq!(g.successors("a"), vec!["b"]);
}

#[test]
#[should_panic(expected = "multigraph")]
fn named_edges_require_a_multigraph() {
    let mut g: Graph<(), (), ()> = Graph::new(GraphOptions::default());
    g.set_edge_named("a", "b", Some("x"), None);
}

#[test]
fn removing_a_node_removes_incident_edges() {
    let mut g = multigraph();
    g.set_path(&["a", "b", "c"]);
    g.set_edge("b", "b");

    assert!(g.remove_node("b"));
    assert_eq!(g.edge_count(), 0);
    assert!(g.successors("a").is_empty());
    assert!(g.predecessors("c").is_empty());
    assert!(!g.remove_node("b"));
}

#[test]
fn reinserted_nodes_and_edges_move_to_the_end() {
    let mut g = multigraph();
    g.set_path(&["a", "b", "c"]);
    g.remove_node("a");
    g.ensure_node("a");
    g.remove_edge("b", "c", None);
    g.set_edge("b", "c");
    g.set_edge("a", "b");

    assert_eq!(g.node_ids(), vec!["b", "c", "a"]);
    assert_eq!(
        g.edge_keys(),
        vec![
            EdgeKey::new("b", "c", None::<String>),
            EdgeKey::new("a", "b", None::<String>)
        ]
    );
}

#[test]
fn adjacency_survives_compaction() {
    let mut g = multigraph();
    for i in 0..100 {
        g.set_edge(format!("n{i}"), format!("n{}", i + 1));
    }
    for i in 0..80 {
        g.remove_node(&format!("n{i}"));
    }

    assert_eq!(g.node_count(), 21);
    assert_eq!(g.edge_count(), 20);
    assert_eq!(g.successors("n80"), vec!["n81"]);
    assert_eq!(g.predecessors("n100"), vec!["n99"]);
    assert_eq!(g.sources(), vec!["n80"]);
    assert_eq!(g.sinks(), vec!["n100"]);
}

#[test]
fn take_edge_returns_the_label() {
    let mut g = multigraph();
    g.set_edge_named("a", "b", Some("x"), Some(9));

    assert_eq!(g.take_edge("a", "b", Some("x")), Some(9));
    assert_eq!(g.take_edge("a", "b", Some("x")), None);
}

#[test]
fn compound_children_and_parents() {
    let mut g = multigraph();
    g.set_parent("a", "sg");
    g.set_parent("b", "sg");
    g.set_parent("sg", "outer");

    assert_eq!(g.parent("a"), Some("sg"));
    assert_eq!(g.children("sg"), vec!["a", "b"]);
    assert!(g.has_children("outer"));
    assert_eq!(g.children_root(), vec!["outer"]);

    g.set_parent("a", "outer");
    assert_eq!(g.children("sg"), vec!["b"]);
    assert_eq!(g.children("outer"), vec!["sg", "a"]);

    g.clear_parent("a");
    assert_eq!(g.parent("a"), None);
}

#[test]
fn removing_a_parent_promotes_its_children() {
    let mut g = multigraph();
    g.set_parent("a", "sg");
    g.remove_node("sg");

    assert_eq!(g.parent("a"), None);
    assert_eq!(g.children_root(), vec!["a"]);
}

#[test]
#[should_panic(expected = "cycle")]
fn parent_cycles_are_rejected() {
    let mut g = multigraph();
    g.set_parent("a", "b");
    g.set_parent("b", "a");
}

#[test]
#[should_panic(expected = "non-compound")]
fn set_parent_requires_a_compound_graph() {
    let mut g: Graph<(), (), ()> = Graph::new(GraphOptions::default());
    g.set_parent("a", "b");
}

#[test]
fn with_options_keeps_configuration_only() {
    let mut g = multigraph();
    g.set_edge("a", "b");
    let copy: Graph<(), (), ()> = g.with_options();

    assert_eq!(copy.options(), g.options());
    assert_eq!(copy.node_count(), 0);
}

#[test]
fn components_groups_weakly_connected_nodes() {
    let mut g = multigraph();
    g.set_path(&["a", "b"]);
    g.set_edge("c", "b");
    g.ensure_node("d");

    assert_eq!(
        alg::components(&g),
        vec![
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec!["d".to_string()],
        ]
    );
}
