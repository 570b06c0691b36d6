use simnet::graph::{Graph, GraphOptions};
use simnet::order::{LayerGraph, LayerNode, Mass, SortEntry, conflicts, mass, sort, sort_subgraph};

type Constraints = Graph<(), (), ()>;

fn constraints() -> Constraints {
    Constraints::new(GraphOptions::default())
}

fn m(v: &str, value: Option<f64>, weight: Option<f64>) -> Mass {
    Mass {
        v: v.to_string(),
        value,
        weight,
    }
}

fn entry(vs: &[&str], i: usize, value: Option<f64>, weight: Option<f64>) -> SortEntry {
    SortEntry {
        vs: vs.iter().map(|v| v.to_string()).collect(),
        i,
        value,
        weight,
    }
}

fn by_index(mut entries: Vec<SortEntry>) -> Vec<SortEntry> {
    entries.sort_by_key(|e| e.i);
    entries
}

/// Layer graph with upstream nodes `n0`..`n4` at orders 0..4.
fn layer_graph() -> LayerGraph {
    let mut lg = LayerGraph::new(GraphOptions {
        compound: true,
        ..Default::default()
    });
    for i in 0..5 {
        lg.set_node(
            format!("n{i}"),
            LayerNode {
                order: Some(i),
                ..Default::default()
            },
        );
    }
    lg
}

#[test]
fn mass_is_the_weighted_mean_of_in_neighbor_orders() {
    let mut lg = layer_graph();
    lg.set_edge_with_label("n1", "x", 2.0);
    lg.set_edge_with_label("n4", "x", 1.0);
    lg.set_node("y", LayerNode::default());

    let masses = mass(&lg, &["x".to_string(), "y".to_string()]);
    assert_eq!(masses[0], m("x", Some(2.0), Some(3.0)));
    assert_eq!(masses[1], m("y", None, None));
}

#[test]
fn conflicts_keep_entries_without_constraints() {
    let masses = [m("a", Some(2.0), Some(3.0)), m("b", Some(1.0), Some(2.0))];
    assert_eq!(
        by_index(conflicts(&masses, &constraints())),
        [
            entry(&["a"], 0, Some(2.0), Some(3.0)),
            entry(&["b"], 1, Some(1.0), Some(2.0)),
        ]
    );
}

#[test]
fn conflicts_keep_entries_that_respect_their_constraints() {
    let masses = [m("a", Some(2.0), Some(3.0)), m("b", Some(1.0), Some(2.0))];
    let mut cg = constraints();
    cg.set_edge("b", "a");
    assert_eq!(
        by_index(conflicts(&masses, &cg)),
        [
            entry(&["a"], 0, Some(2.0), Some(3.0)),
            entry(&["b"], 1, Some(1.0), Some(2.0)),
        ]
    );
}

#[test]
fn conflicts_merge_a_violated_constraint() {
    let masses = [m("a", Some(2.0), Some(3.0)), m("b", Some(1.0), Some(2.0))];
    let mut cg = constraints();
    cg.set_edge("a", "b");
    assert_eq!(
        conflicts(&masses, &cg),
        [entry(&["a", "b"], 0, Some(8.0 / 5.0), Some(5.0))]
    );
}

#[test]
fn conflicts_merge_several_predecessors_of_one_target() {
    let masses = [
        m("a", Some(4.0), Some(1.0)),
        m("b", Some(3.0), Some(1.0)),
        m("c", Some(2.0), Some(1.0)),
    ];
    let mut cg = constraints();
    cg.set_edge("a", "c");
    cg.set_edge("b", "c");

    let out = conflicts(&masses, &cg);
    assert_eq!(out.len(), 1);
    let pos = |v: &str| out[0].vs.iter().position(|w| w == v).expect("merged");
    assert!(pos("c") > pos("a"));
    assert!(pos("c") > pos("b"));
    assert_eq!(out[0].i, 0);
    assert_eq!(out[0].value, Some(3.0));
    assert_eq!(out[0].weight, Some(3.0));
}

#[test]
fn conflicts_treat_a_missing_value_as_a_violation() {
    let masses = [m("a", None, None), m("b", Some(1.0), Some(1.0))];
    let mut cg = constraints();
    cg.set_edge("a", "b");
    assert_eq!(
        conflicts(&masses, &cg),
        [entry(&["a", "b"], 0, Some(1.0), Some(1.0))]
    );
}

#[test]
fn conflicts_ignore_constraints_on_absent_nodes() {
    let masses = [m("a", Some(2.0), Some(1.0))];
    let mut cg = constraints();
    cg.set_edge("a", "z");
    assert_eq!(
        conflicts(&masses, &cg),
        [entry(&["a"], 0, Some(2.0), Some(1.0))]
    );
}

#[test]
fn sort_orders_by_value_and_combines_the_weights() {
    let entries = [
        entry(&["a"], 0, Some(2.0), Some(3.0)),
        entry(&["b"], 1, Some(1.0), Some(2.0)),
    ];
    let out = sort(&entries, false);
    assert_eq!(out.vs, ["b", "a"]);
    assert_eq!(out.value, Some(8.0 / 5.0));
    assert_eq!(out.weight, Some(5.0));
}

#[test]
fn sort_keeps_merged_runs_together() {
    let entries = [
        entry(&["a", "c", "d"], 0, Some(2.0), Some(3.0)),
        entry(&["b"], 1, Some(1.0), Some(2.0)),
    ];
    assert_eq!(sort(&entries, false).vs, ["b", "a", "c", "d"]);
}

#[test]
fn sort_breaks_ties_by_index_in_the_bias_direction() {
    let entries = [
        entry(&["a"], 0, Some(1.0), Some(1.0)),
        entry(&["b"], 1, Some(1.0), Some(1.0)),
    ];
    assert_eq!(sort(&entries, false).vs, ["a", "b"]);
    assert_eq!(sort(&entries, true).vs, ["b", "a"]);
}

#[test]
fn sort_leaves_valueless_entries_at_their_index() {
    let entries = [
        entry(&["a"], 0, Some(2.0), Some(1.0)),
        entry(&["b"], 3, Some(1.0), Some(1.0)),
        entry(&["c"], 1, None, None),
    ];
    let out = sort(&entries, false);
    assert_eq!(out.vs, ["b", "c", "a"]);
    assert_eq!(out.value, Some(1.5));
}

#[test]
fn sort_without_any_values_keeps_index_order() {
    let entries = [
        entry(&["a"], 0, None, None),
        entry(&["b"], 3, None, None),
        entry(&["c"], 2, None, None),
        entry(&["d"], 1, None, None),
    ];
    let out = sort(&entries, false);
    assert_eq!(out.vs, ["a", "d", "c", "b"]);
    assert_eq!(out.value, None);
    assert_eq!(out.weight, None);
}

#[test]
fn sort_subgraph_orders_a_flat_subgraph() {
    let mut lg = layer_graph();
    lg.set_edge_with_label("n3", "x", 1.0);
    lg.set_edge_with_label("n1", "y", 2.0);
    lg.set_edge_with_label("n4", "y", 1.0);
    lg.set_parent("x", "movable");
    lg.set_parent("y", "movable");

    let out = sort_subgraph(&lg, "movable", &constraints(), false);
    assert_eq!(out.vs, ["y", "x"]);
}

#[test]
fn sort_subgraph_keeps_a_nested_subgraph_together_between_its_borders() {
    let mut lg = layer_graph();
    lg.set_node(
        "sg",
        LayerNode {
            border_left: Some("bl".into()),
            border_right: Some("br".into()),
            ..Default::default()
        },
    );
    for v in ["a", "b", "bl", "br"] {
        lg.set_parent(v, "sg");
    }
    lg.set_parent("sg", "root");
    lg.set_parent("x", "root");
    lg.set_edge_with_label("n4", "x", 1.0);
    lg.set_edge_with_label("n0", "a", 1.0);
    lg.set_edge_with_label("n1", "b", 1.0);

    let out = sort_subgraph(&lg, "root", &constraints(), false);
    assert_eq!(out.vs, ["bl", "a", "b", "br", "x"]);
}

#[test]
fn sort_subgraph_weighs_in_the_border_predecessors() {
    let mut lg = layer_graph();
    lg.set_node(
        "sg",
        LayerNode {
            border_left: Some("bl".into()),
            border_right: Some("br".into()),
            ..Default::default()
        },
    );
    for v in ["a", "b", "bl", "br"] {
        lg.set_parent(v, "sg");
    }
    lg.set_edge_with_label("n0", "a", 1.0);
    lg.set_edge_with_label("n1", "b", 1.0);
    lg.set_edge_with_label("n3", "bl", 1.0);
    lg.set_edge_with_label("n3", "br", 1.0);

    let out = sort_subgraph(&lg, "sg", &constraints(), false);
    assert_eq!(out.vs, ["bl", "a", "b", "br"]);
    assert_eq!(out.value, Some((0.5 * 2.0 + 3.0 + 3.0) / 4.0));
    assert_eq!(out.weight, Some(4.0));
}

#[test]
fn sort_subgraph_respects_constraints_between_siblings() {
    let mut lg = layer_graph();
    for v in ["s1", "s2"] {
        lg.set_parent(v, "root");
    }
    lg.set_parent("p", "s1");
    lg.set_parent("q", "s2");
    lg.set_edge_with_label("n4", "p", 1.0);
    lg.set_edge_with_label("n0", "q", 1.0);

    let free = sort_subgraph(&lg, "root", &constraints(), false);
    assert_eq!(free.vs, ["q", "p"]);

    let mut cg = constraints();
    cg.set_edge("s1", "s2");
    let constrained = sort_subgraph(&lg, "root", &cg, false);
    assert_eq!(constrained.vs, ["p", "q"]);
}
