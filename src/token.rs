//! The token model (C1): positioned, tagged token variants.

use crate::Position;
use std::fmt::{Display, Formatter};

/// A single lexical unit produced by the [`Tokenizer`](crate::Tokenizer).
///
/// Every variant carries its starting [`Position`]. The tokenizer never
/// raises on unrecognized input; lexical anomalies surface in-band as
/// [`Token::Invalid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Keyword(String, Position),
    Delimiter(String, Position),
    Operator(String, Position),
    Literal(String, String, Position),
    Identifier(String, String, Position),
    Comment(String, Position),
    Start(Position),
    End(Position),
    NewLine(Position),
    IndentIncr(Position),
    IndentDecr(Position),
    Invalid(String, Position),
}

impl Token {
    /// The display text of the token: the matched literal, the typed pattern
    /// text, or a fixed sentinel tag for structural tokens.
    pub fn value(&self) -> &str {
        match self {
            Token::Keyword(v, _)
            | Token::Delimiter(v, _)
            | Token::Operator(v, _)
            | Token::Comment(v, _)
            | Token::Invalid(v, _) => v,
            Token::Literal(_, v, _) | Token::Identifier(_, v, _) => v,
            Token::Start(_) => "<start>",
            Token::End(_) => "<end>",
            Token::NewLine(_) => "\n",
            Token::IndentIncr(_) => "<indent>",
            Token::IndentDecr(_) => "<dedent>",
        }
    }

    /// The type key used by the post-processor (C4) and by `Literal`/`Identifier`
    /// terminal steps (C6) to select a pattern. `None` for tokens without a
    /// meaningful type key (the structural sentinels).
    pub fn type_key(&self) -> Option<&str> {
        match self {
            Token::Keyword(_, _) => Some("keyword"),
            Token::Operator(_, _) => Some("operator"),
            Token::Delimiter(_, _) => Some("delimiter"),
            Token::Comment(_, _) => Some("comment"),
            Token::Literal(t, _, _) | Token::Identifier(t, _, _) => Some(t),
            _ => None,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Token::Keyword(_, p)
            | Token::Delimiter(_, p)
            | Token::Operator(_, p)
            | Token::Comment(_, p)
            | Token::Invalid(_, p)
            | Token::Start(p)
            | Token::End(p)
            | Token::NewLine(p)
            | Token::IndentIncr(p)
            | Token::IndentDecr(p) => *p,
            Token::Literal(_, _, p) | Token::Identifier(_, _, p) => *p,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Token::Invalid(_, _))
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Token::Comment(_, _))
    }

    /// Replace the token's carried value without changing its variant. Used by
    /// the post-processor (C4), whose documented precondition is that a
    /// transformation never changes the variant.
    pub fn with_value(&self, new_value: String) -> Token {
        match self {
            Token::Keyword(_, p) => Token::Keyword(new_value, *p),
            Token::Delimiter(_, p) => Token::Delimiter(new_value, *p),
            Token::Operator(_, p) => Token::Operator(new_value, *p),
            Token::Comment(_, p) => Token::Comment(new_value, *p),
            Token::Invalid(_, p) => Token::Invalid(new_value, *p),
            Token::Literal(t, _, p) => Token::Literal(t.clone(), new_value, *p),
            Token::Identifier(t, _, p) => Token::Identifier(t.clone(), new_value, *p),
            other => other.clone(),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The shape of a terminal match, used internally to key rule prototypes,
/// post-processor entries, and AST terminal steps against a produced token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Delimiter,
    Operator,
    Literal,
    Identifier,
    Comment,
    Start,
    End,
    NewLine,
    IndentIncr,
    IndentDecr,
    Invalid,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Keyword(_, _) => TokenKind::Keyword,
            Token::Delimiter(_, _) => TokenKind::Delimiter,
            Token::Operator(_, _) => TokenKind::Operator,
            Token::Literal(_, _, _) => TokenKind::Literal,
            Token::Identifier(_, _, _) => TokenKind::Identifier,
            Token::Comment(_, _) => TokenKind::Comment,
            Token::Start(_) => TokenKind::Start,
            Token::End(_) => TokenKind::End,
            Token::NewLine(_) => TokenKind::NewLine,
            Token::IndentIncr(_) => TokenKind::IndentIncr,
            Token::IndentDecr(_) => TokenKind::IndentDecr,
            Token::Invalid(_, _) => TokenKind::Invalid,
        }
    }
}

/// Collect every [`Token::Invalid`] from a token sequence, in order.
pub fn invalid_tokens(tokens: &[Token]) -> Vec<&Token> {
    tokens.iter().filter(|t| t.is_invalid()).collect()
}
