// src/query/suggest.rs

//! Autocomplete helpers for the query input.

use std::sync::LazyLock;

use regex::Regex;

use crate::graph::SharedNode;

/// Number of suggestions shown in the dropdown.
pub const SUGGESTION_LIMIT: usize = 15;

static LAST_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\*?\+*)([A-Za-z0-9_-]+)(\+*\*?)$").expect("last-clause pattern is valid")
});

/// The clause currently being typed at the end of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialClause {
    /// Byte offset of the clause in the input.
    pub start: usize,
    pub prefix: String,
    pub name: String,
    pub suffix: String,
}

/// Items starting with `partial`, excluding `partial` itself, in item order.
pub fn suggest<I, S>(items: I, partial: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .filter(|item| {
            let item = item.as_ref();
            item.starts_with(partial) && item != partial
        })
        .map(|item| item.as_ref().to_string())
        .collect()
}

/// Find the clause at the end of `input`, if it ends in one.
pub fn last_clause(input: &str) -> Option<PartialClause> {
    let caps = LAST_CLAUSE.captures(input)?;
    let whole = caps.get(0)?;
    let part = |i: usize| caps.get(i).map(|m| m.as_str().to_string()).unwrap_or_default();

    Some(PartialClause {
        start: whole.start(),
        prefix: part(1),
        name: part(2),
        suffix: part(3),
    })
}

/// Suggestions for the name being typed, at most `limit` of them.
///
/// Once the clause has an expansion suffix the name is considered complete
/// and nothing is suggested.
pub fn suggestions_for_input<I, S>(items: I, input: &str, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let Some(clause) = last_clause(input) else {
        return Vec::new();
    };
    if !clause.suffix.is_empty() {
        return Vec::new();
    }

    let mut out = suggest(items, &clause.name);
    out.truncate(limit);
    out
}

/// Replace the name of the trailing clause with `suggestion`, keeping its
/// expansion marks and everything typed before it.
pub fn confirm_suggestion(input: &str, suggestion: &str) -> String {
    match last_clause(input) {
        Some(clause) => format!(
            "{}{}{}{}",
            &input[..clause.start],
            clause.prefix,
            suggestion,
            clause.suffix
        ),
        None => suggestion.to_string(),
    }
}

/// Placeholder text with a worked example drawn from the graph.
///
/// The example rotates with the graph size: the most depended-upon node with
/// `+*` or `+`, or the node with most inputs with `++`.
pub fn placeholder_text(base: &str, nodes: &[SharedNode]) -> String {
    if nodes.is_empty() {
        return base.to_string();
    }

    match nodes.len() % 3 {
        0 => format!("{base} (ex: {}+*)", most_by(nodes, |n| n.downstream_count()).name),
        1 => format!("{base} (ex: {}+)", most_by(nodes, |n| n.downstream_count()).name),
        _ => format!("{base} (ex: ++{})", most_by(nodes, |n| n.upstream_count()).name),
    }
}

/// First node with the highest `count`.
fn most_by<'a>(nodes: &'a [SharedNode], count: fn(&SharedNode) -> usize) -> &'a SharedNode {
    let mut best = &nodes[0];
    for node in &nodes[1..] {
        if count(node) > count(best) {
            best = node;
        }
    }
    best
}
