// tests/query_tokenizer.rs

use dagit_layout::query::{
    ClauseError, Expansion, Selection, Term, Token, parse_clause, parse_query, tokenize,
};

fn select(name: &str, upstream: Expansion, downstream: Expansion) -> Term {
    Term::Select(Selection {
        name: name.to_string(),
        upstream,
        downstream,
    })
}

#[test]
fn test_name_token_keeps_dashes_and_underscores() {
    let tokens = tokenize(" ++load-raw_data* ").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Plus,
            Token::Plus,
            Token::Name("load-raw_data"),
            Token::Star
        ]
    );
}

#[test]
fn test_offsets_are_relative_to_trimmed_clause() {
    assert_eq!(
        tokenize("  a.b"),
        Err(ClauseError::UnexpectedChar { ch: '.', offset: 1 })
    );
}

#[test]
fn test_bare_name_has_no_expansion() {
    assert_eq!(
        parse_clause("extract").unwrap(),
        select("extract", Expansion::Hops(0), Expansion::Hops(0))
    );
}

#[test]
fn test_plus_counts_hops_in_each_direction() {
    assert_eq!(
        parse_clause("++extract+").unwrap(),
        select("extract", Expansion::Hops(2), Expansion::Hops(1))
    );
}

#[test]
fn test_star_means_unbounded() {
    assert_eq!(
        parse_clause("*report").unwrap(),
        select("report", Expansion::Unbounded, Expansion::Hops(0))
    );
    assert_eq!(
        parse_clause("clean+*").unwrap(),
        select("clean", Expansion::Hops(0), Expansion::Unbounded)
    );
    // A star before the pluses wins over the hop count.
    assert_eq!(
        parse_clause("*++clean").unwrap(),
        select("clean", Expansion::Unbounded, Expansion::Hops(0))
    );
}

#[test]
fn test_lone_star_selects_everything() {
    assert_eq!(parse_clause(" * ").unwrap(), Term::All);
}

#[test]
fn test_malformed_clauses_are_reported() {
    assert_eq!(parse_clause("   "), Err(ClauseError::Empty));
    assert_eq!(parse_clause("++"), Err(ClauseError::MissingName));
    assert_eq!(parse_clause("+*a"), Err(ClauseError::MissingName));
    assert!(matches!(
        parse_clause("a*+"),
        Err(ClauseError::Trailing { .. })
    ));
    assert!(matches!(
        parse_clause("a AND b"),
        Err(ClauseError::UnexpectedChar { ch: ' ', .. })
    ));
}

#[test]
fn test_query_splits_on_commas_only() {
    let terms = parse_query("a+, *b ,c AND d");
    assert_eq!(terms.len(), 3);
    assert_eq!(
        terms[0],
        Ok(select("a", Expansion::Hops(0), Expansion::Hops(1)))
    );
    assert_eq!(
        terms[1],
        Ok(select("b", Expansion::Unbounded, Expansion::Hops(0)))
    );
    assert!(terms[2].is_err());
}
