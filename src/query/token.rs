// src/query/token.rs

//! Clause lexer and parser.
//!
//! Grammar of one clause (whitespace around the clause is ignored):
//!
//! ```text
//! clause  := "*" | prefix name suffix
//! prefix  := "*"? "+"*
//! suffix  := "+"* "*"?
//! name    := [A-Za-z0-9_-]+
//! ```

use thiserror::Error;

/// Lexical unit of a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Plus,
    Star,
    Name(&'a str),
}

/// How far to widen a selection in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// Follow edges this many hops. `Hops(0)` means no expansion.
    Hops(usize),
    /// Follow edges until no new nodes are found.
    Unbounded,
}

impl Expansion {
    fn from_marks(plus: usize, star: bool) -> Self {
        if star {
            Expansion::Unbounded
        } else {
            Expansion::Hops(plus)
        }
    }

    /// Maximum number of hops to follow.
    pub fn limit(self) -> usize {
        match self {
            Expansion::Hops(n) => n,
            Expansion::Unbounded => usize::MAX,
        }
    }

    pub fn is_none(self) -> bool {
        self == Expansion::Hops(0)
    }
}

/// A node selected by exact name, plus its expansion in each direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub name: String,
    pub upstream: Expansion,
    pub downstream: Expansion,
}

/// Parsed form of one clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// A bare `*`: every node.
    All,
    Select(Selection),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClauseError {
    #[error("empty clause")]
    Empty,

    #[error("unexpected character {ch:?} at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("clause has no node name")]
    MissingName,

    #[error("unexpected {token} after node name")]
    Trailing { token: String },
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Split a clause into tokens. Surrounding whitespace is trimmed; any other
/// character outside the grammar is an error.
pub fn tokenize(clause: &str) -> Result<Vec<Token<'_>>, ClauseError> {
    let text = clause.trim();
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '+' => tokens.push(Token::Plus),
            '*' => tokens.push(Token::Star),
            c if is_name_char(c) => {
                let mut end = offset + c.len_utf8();
                while let Some(&(next_offset, next)) = chars.peek() {
                    if !is_name_char(next) {
                        break;
                    }
                    end = next_offset + next.len_utf8();
                    chars.next();
                }
                tokens.push(Token::Name(&text[offset..end]));
            }
            other => return Err(ClauseError::UnexpectedChar { ch: other, offset }),
        }
    }

    Ok(tokens)
}

/// Parse one clause into a [`Term`].
pub fn parse_clause(clause: &str) -> Result<Term, ClauseError> {
    let tokens = tokenize(clause)?;

    match tokens.as_slice() {
        [] => return Err(ClauseError::Empty),
        [Token::Star] => return Ok(Term::All),
        _ => {}
    }

    let mut it = tokens.into_iter().peekable();

    let up_star = it.next_if_eq(&Token::Star).is_some();
    let mut up_plus = 0;
    while it.next_if_eq(&Token::Plus).is_some() {
        up_plus += 1;
    }

    let name = match it.next() {
        Some(Token::Name(name)) => name.to_string(),
        _ => return Err(ClauseError::MissingName),
    };

    let mut down_plus = 0;
    while it.next_if_eq(&Token::Plus).is_some() {
        down_plus += 1;
    }
    let down_star = it.next_if_eq(&Token::Star).is_some();

    if let Some(extra) = it.next() {
        let token = match extra {
            Token::Plus => "'+'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Name(n) => format!("name {n:?}"),
        };
        return Err(ClauseError::Trailing { token });
    }

    Ok(Term::Select(Selection {
        name,
        upstream: Expansion::from_marks(up_plus, up_star),
        downstream: Expansion::from_marks(down_plus, down_star),
    }))
}

/// Parse every comma separated clause of a query.
///
/// `AND` has no special meaning: `"a AND b"` is a single clause and fails to
/// parse because of the embedded spaces.
pub fn parse_query(query: &str) -> Vec<Result<Term, ClauseError>> {
    query.split(',').map(parse_clause).collect()
}

