use simnet::EdgeKey;
use simnet::algos::{greedy_fas, greedy_fas_unweighted, is_acyclic, walk_fas};
use simnet::graph::{Graph, GraphOptions};

type Weighted = Graph<(), i64, ()>;

fn multigraph() -> Weighted {
    Weighted::new(GraphOptions {
        multigraph: true,
        ..Default::default()
    })
}

fn without(g: &Weighted, fas: &[EdgeKey]) -> Weighted {
    let mut h = g.clone();
    for e in fas {
        assert!(h.remove_edge_key(e), "{e} is not an edge");
    }
    h
}

#[test]
fn greedy_fas_of_a_tiny_graph_is_empty() {
    let mut g = multigraph();
    assert!(greedy_fas_unweighted(&g).is_empty());
    g.set_edge_named("a", "a", None::<String>, Some(1));
    assert!(greedy_fas_unweighted(&g).is_empty());
}

#[test]
fn greedy_fas_of_a_dag_is_empty() {
    let mut g = multigraph();
    g.set_path(&["a", "b", "c", "d"]);
    g.set_edge("a", "d");
    assert!(greedy_fas_unweighted(&g).is_empty());
}

#[test]
fn greedy_fas_breaks_a_two_cycle_at_the_lighter_edge() {
    let mut g = multigraph();
    g.set_edge_with_label("a", "b", 2);
    g.set_edge_with_label("b", "a", 1);
    assert_eq!(greedy_fas(&g, |&w| w), [EdgeKey::new("b", "a", None::<String>)]);

    let mut g = multigraph();
    g.set_edge_with_label("a", "b", 1);
    g.set_edge_with_label("b", "a", 2);
    assert_eq!(greedy_fas(&g, |&w| w), [EdgeKey::new("a", "b", None::<String>)]);
}

#[test]
fn greedy_fas_returns_every_parallel_edge_of_a_merged_pair() {
    let mut g = multigraph();
    g.set_edge_with_label("a", "b", 5);
    g.set_edge_named("b", "a", Some("x"), Some(1));
    g.set_edge_named("b", "a", Some("y"), Some(1));

    let fas = greedy_fas(&g, |&w| w);
    assert_eq!(fas.len(), 2);
    assert!(fas.iter().all(|e| e.v == "b" && e.w == "a"));
    assert!(is_acyclic(&without(&g, &fas)));
}

#[test]
fn greedy_fas_leaves_an_acyclic_graph_behind() {
    let mut g = multigraph();
    g.set_path(&["n1", "n2", "n3", "n4", "n1"]);
    g.set_path(&["n3", "n5", "n6", "n3"]);
    g.set_path(&["n6", "n7", "n2"]);
    g.set_edge("n4", "n7");
    g.set_edge("n7", "n4");

    let fas = greedy_fas_unweighted(&g);
    assert!(!fas.is_empty());
    assert!(is_acyclic(&without(&g, &fas)));
}

#[test]
fn walk_fas_returns_the_back_edges_of_the_walk() {
    let mut g = multigraph();
    g.set_path(&["a", "b", "c", "a"]);
    g.set_edge("c", "d");
    g.set_edge("d", "d");

    let fas = walk_fas(&g);
    assert_eq!(
        fas,
        [
            EdgeKey::new("c", "a", None::<String>),
            EdgeKey::new("d", "d", None::<String>),
        ]
    );
}

#[test]
fn walk_fas_of_a_dag_is_empty() {
    let mut g = multigraph();
    g.set_path(&["a", "b", "c"]);
    g.set_edge("a", "c");
    assert!(walk_fas(&g).is_empty());
}
