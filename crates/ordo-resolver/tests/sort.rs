use std::collections::{BTreeMap, HashMap};

use ordo_core::graph::DependencyGraph;
use ordo_core::options::SortOptions;
use ordo_core::priority::{from_fn, MissingPriority};
use ordo_resolver::{sort, sort_by_priority, GraphSorter, SortError};
use ordo_util::errors::{OrdoError, OrdoResult};

fn graph(edges: &[(&'static str, &[&'static str])]) -> DependencyGraph<&'static str> {
    edges
        .iter()
        .map(|(node, succ)| (*node, succ.iter().copied()))
        .collect()
}

#[test]
fn test_diamond_without_priorities() {
    let g = graph(&[("A", &["B", "C"]), ("B", &["D"]), ("C", &["D"]), ("D", &[])]);
    assert_eq!(sort(&g).unwrap(), vec!["A", "B", "C", "D"]);
}

#[test]
fn test_two_cycle_is_rejected() {
    let g = graph(&[("A", &["B"]), ("B", &["A"])]);
    let err = sort(&g).unwrap_err();
    assert_eq!(err.unresolved(), &["A", "B"]);
}

#[test]
fn test_priority_picks_first_ready_node() {
    let g = graph(&[("X", &["Y"]), ("Z", &["Y"])]);
    let prio: HashMap<&str, &str> = [("X", "1"), ("Z", "0")].into_iter().collect();
    assert_eq!(sort_by_priority(&g, &prio).unwrap(), vec!["Z", "X", "Y"]);
}

#[test]
fn test_single_isolated_node() {
    let g = graph(&[("Q", &[])]);
    assert_eq!(sort(&g).unwrap(), vec!["Q"]);
}

#[test]
fn test_empty_graph() {
    let g: DependencyGraph<&str> = DependencyGraph::new();
    assert!(sort(&g).unwrap().is_empty());
    assert!(GraphSorter::new(&g).tiers().unwrap().is_empty());
}

#[test]
fn test_three_cycle_reports_all_nodes() {
    let g = graph(&[("A", &["B"]), ("B", &["C"]), ("C", &["A"])]);
    let err = sort(&g).unwrap_err();
    assert_eq!(err.unresolved(), &["A", "B", "C"]);
    assert_eq!(err.cycles(), vec![vec!["A", "B", "C"]]);
}

#[test]
fn test_cycle_diagnostics_separate_downstream_nodes() {
    // root -> a <-> b -> tail; root is placed, tail is stuck behind the cycle.
    let g = graph(&[("root", &["a"]), ("a", &["b"]), ("b", &["a", "tail"])]);
    let err = sort(&g).unwrap_err();
    assert_eq!(err.unresolved(), &["a", "b", "tail"]);
    assert_eq!(err.cycles(), vec![vec!["a", "b"]]);
}

#[test]
fn test_self_edge_is_a_cycle() {
    let g = graph(&[("solo", &["solo"])]);
    let err = sort(&g).unwrap_err();
    assert_eq!(err.cycles(), vec![vec!["solo"]]);
}

#[test]
fn test_priority_never_overrides_constraints() {
    // "late" has the best priority but must still follow "early".
    let g = graph(&[("early", &["late"])]);
    let prio: BTreeMap<&str, u8> = [("late", 0), ("early", 9)].into_iter().collect();
    assert_eq!(sort_by_priority(&g, prio).unwrap(), vec!["early", "late"]);
}

#[test]
fn test_missing_priority_last_by_default() {
    let g = graph(&[("a", &[]), ("b", &[]), ("c", &[])]);
    let prio: HashMap<&str, char> = [("c", 'z')].into_iter().collect();
    assert_eq!(sort_by_priority(&g, &prio).unwrap(), vec!["c", "a", "b"]);
}

#[test]
fn test_missing_priority_first() {
    let g = graph(&[("a", &[]), ("b", &[]), ("c", &[])]);
    let prio: HashMap<&str, char> = [("a", '0')].into_iter().collect();
    let order = GraphSorter::new(&g)
        .priority(&prio)
        .missing_priority(MissingPriority::First)
        .sort()
        .unwrap();
    assert_eq!(order, vec!["b", "c", "a"]);
}

#[test]
fn test_bucketed_priorities() {
    // Digit buckets with 'z' as the catch-all.
    let g = graph(&[
        ("build", &["test"]),
        ("docs", &[]),
        ("fetch", &["build"]),
        ("lint", &[]),
        ("test", &[]),
    ]);
    let prio: HashMap<&str, char> = [("fetch", '0'), ("lint", '1'), ("docs", 'z')]
        .into_iter()
        .collect();
    let order = sort_by_priority(&g, &prio).unwrap();
    assert_eq!(order, vec!["fetch", "lint", "docs", "build", "test"]);
}

#[test]
fn test_closure_priority() {
    let g: DependencyGraph<u32> = [(10, vec![]), (3, vec![]), (7, vec![])].into_iter().collect();
    let descending = from_fn(|n: &u32| Some(std::cmp::Reverse(*n)));
    assert_eq!(sort_by_priority(&g, descending).unwrap(), vec![10, 7, 3]);
}

#[test]
fn test_from_dependencies_places_dependencies_first() {
    let g = DependencyGraph::from_dependencies([
        ("app", vec!["http", "json"]),
        ("http", vec!["net"]),
        ("json", vec![]),
    ]);
    assert_eq!(sort(&g).unwrap(), vec!["json", "net", "http", "app"]);
}

#[test]
fn test_reversed_graph_reverses_constraints() {
    let g = graph(&[("a", &["b"]), ("b", &["c"])]);
    assert_eq!(sort(&g.reversed()).unwrap(), vec!["c", "b", "a"]);
}

#[test]
fn test_input_is_not_mutated() {
    let g = graph(&[("A", &["B", "C"]), ("B", &["D"]), ("C", &["D"])]);
    let before = g.clone();
    let sorter = GraphSorter::new(&g);
    let first = sorter.sort().unwrap();
    let second = sorter.sort().unwrap();
    assert_eq!(first, second);
    assert_eq!(g, before);
}

#[test]
fn test_tiers_concatenate_to_valid_order() {
    let g = graph(&[("A", &["B", "C"]), ("B", &["D"]), ("C", &["D"]), ("E", &["D"])]);
    let tiers = GraphSorter::new(&g).tiers().unwrap();
    assert_eq!(tiers, vec![vec!["A", "E"], vec!["B", "C"], vec!["D"]]);
    let flat: Vec<_> = tiers.into_iter().flatten().collect();
    assert_eq!(flat.len(), g.node_count());
}

#[test]
fn test_tiers_use_longest_chain() {
    // D hangs off both A (depth 1) and C (depth 2) and must land in tier 3.
    let g = graph(&[("A", &["B", "D"]), ("B", &["C"]), ("C", &["D"])]);
    let tiers = GraphSorter::new(&g).tiers().unwrap();
    assert_eq!(tiers, vec![vec!["A"], vec!["B"], vec!["C"], vec!["D"]]);
}

#[test]
fn test_tiers_respect_priority_within_tier() {
    let g = graph(&[("a", &[]), ("b", &[]), ("c", &[])]);
    let prio: HashMap<&str, u8> = [("c", 1), ("b", 0)].into_iter().collect();
    let tiers = GraphSorter::new(&g).priority(&prio).tiers().unwrap();
    assert_eq!(tiers, vec![vec!["b", "c", "a"]]);
}

#[test]
fn test_options_configure_sorter() {
    let options = SortOptions::from_toml_str(
        r#"
missing-priority = "first"
max-steps = 2
"#,
    )
    .unwrap();
    let g = graph(&[("a", &["b"]), ("b", &["c"])]);
    let err = GraphSorter::new(&g).options(&options).resolve().unwrap_err();
    assert!(matches!(
        err,
        SortError::ResourceExhausted { limit: 2, .. }
    ));

    let prio: HashMap<&str, u8> = [("x", 0)].into_iter().collect();
    let g = graph(&[("x", &[]), ("y", &[])]);
    let order = GraphSorter::new(&g)
        .options(&SortOptions::from_toml_str(r#"missing-priority = "first""#).unwrap())
        .priority(&prio)
        .resolve()
        .unwrap();
    assert_eq!(order, vec!["y", "x"]);
}

#[test]
fn test_unbounded_resolve_matches_sort() {
    let g = graph(&[("A", &["B", "C"]), ("B", &["D"]), ("C", &["D"])]);
    let sorter = GraphSorter::new(&g);
    assert_eq!(sorter.resolve().unwrap(), sorter.sort().unwrap());
}

#[test]
fn test_errors_convert_into_diagnostics() {
    fn resolve(g: &DependencyGraph<&'static str>) -> OrdoResult<Vec<&'static str>> {
        let order = GraphSorter::new(g).resolve().map_err(OrdoError::from)?;
        Ok(order)
    }

    let g = graph(&[("A", &["B"]), ("B", &["A"])]);
    let report: miette::Report = resolve(&g).unwrap_err();
    assert_eq!(
        report.to_string(),
        r#"Dependency cycle: 2 node(s) could not be ordered: ["A", "B"]"#
    );
    let exhausted: OrdoError = SortError::<&str>::ResourceExhausted { limit: 1, placed: 1 }.into();
    assert!(matches!(
        exhausted,
        OrdoError::ResourceExhausted { limit: 1, placed: 1 }
    ));
}

#[test]
fn test_sorting_from_many_threads() {
    let g: DependencyGraph<u32> = (0..200u32).map(|i| (i, vec![i + 1, i + 2])).collect();
    let expected = sort(&g).unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| sort(&g).unwrap())).collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
