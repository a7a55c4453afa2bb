// tests/query_suggest.rs

use dagit_layout::query::{
    PartialClause, SUGGESTION_LIMIT, confirm_suggestion, last_clause, placeholder_text, suggest,
    suggestions_for_input,
};
use dagit_layout_test_utils::builders::GraphBuilder;

const STEPS: [&str; 5] = ["load", "load_raw", "loader", "clean", "report"];

#[test]
fn test_suggest_matches_prefix_in_item_order() {
    assert_eq!(suggest(STEPS, "lo"), vec!["load", "load_raw", "loader"]);
    assert_eq!(suggest(STEPS, "x"), Vec::<String>::new());
}

#[test]
fn test_suggest_skips_exact_match() {
    assert_eq!(suggest(STEPS, "load"), vec!["load_raw", "loader"]);
}

#[test]
fn test_last_clause_splits_expansion_marks() {
    assert_eq!(
        last_clause("clean, *++rep"),
        Some(PartialClause {
            start: 7,
            prefix: "*++".to_string(),
            name: "rep".to_string(),
            suffix: String::new(),
        })
    );
    assert_eq!(last_clause("clean, "), None);
    assert_eq!(last_clause(""), None);
}

#[test]
fn test_suggestions_use_last_clause_only() {
    assert_eq!(
        suggestions_for_input(STEPS, "report, cl", SUGGESTION_LIMIT),
        vec!["clean"]
    );
    assert_eq!(
        suggestions_for_input(STEPS, "+lo", 2),
        vec!["load", "load_raw"]
    );
}

#[test]
fn test_no_suggestions_once_suffix_typed() {
    assert!(suggestions_for_input(STEPS, "lo+", SUGGESTION_LIMIT).is_empty());
    assert!(suggestions_for_input(STEPS, "lo*", SUGGESTION_LIMIT).is_empty());
    assert!(suggestions_for_input(STEPS, "lo, ", SUGGESTION_LIMIT).is_empty());
}

#[test]
fn test_confirm_keeps_marks_and_earlier_clauses() {
    assert_eq!(confirm_suggestion("clean, *++lo", "loader"), "clean, *++loader");
    assert_eq!(confirm_suggestion("lo+*", "load_raw"), "load_raw+*");
    assert_eq!(confirm_suggestion("", "clean"), "clean");
}

#[test]
fn test_placeholder_rotates_with_graph_size() {
    let base = "Type a step subset";

    assert_eq!(placeholder_text(base, &[]), base);

    // Three nodes: most depended-upon node, both directions.
    let three = GraphBuilder::new().edge("a", "b").edge("a", "c").build();
    assert_eq!(placeholder_text(base, &three), format!("{base} (ex: a+*)"));

    // Four nodes: most depended-upon node, downstream.
    let four = GraphBuilder::new().chain(&["a", "b", "c"]).edge("x", "c").build();
    assert_eq!(placeholder_text(base, &four), format!("{base} (ex: a+)"));

    // Two nodes: node with most inputs, upstream.
    let two = GraphBuilder::new().edge("a", "b").build();
    assert_eq!(placeholder_text(base, &two), format!("{base} (ex: ++b)"));
}
