// src/query/mod.rs

//! Graph query language.
//!
//! A query is a comma separated list of clauses such as `++load`, `clean+*`
//! or `*report`. Each clause names one node and optionally widens the
//! selection upstream (leading `+`/`*`) or downstream (trailing `+`/`*`).
//!
//! - [`token`] lexes and parses a single clause into a [`Term`].
//! - [`filter`] evaluates a whole query against a node list.
//! - [`suggest`] provides autocomplete helpers for a query being typed.

pub mod filter;
pub mod suggest;
pub mod token;

pub use filter::{QueryResult, filter_by_query};
pub use suggest::{
    PartialClause, SUGGESTION_LIMIT, confirm_suggestion, last_clause, placeholder_text, suggest,
    suggestions_for_input,
};
pub use token::{ClauseError, Expansion, Selection, Term, Token, parse_clause, parse_query, tokenize};
