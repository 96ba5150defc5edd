//! Compiled matchers built once from a [`RuleTable`](crate::RuleTable)'s
//! prototypes: fixed-string literals (with the alphabetic boundary guard) and
//! anchored regex patterns.

use crate::token::TokenKind;
use crate::{Position, Prototype, Token};
use regex::bytes::{Regex, RegexBuilder};

pub(crate) enum MatcherSpec {
    Fixed { text: String, kind: TokenKind },
    Regex { regex: Regex, kind: TokenKind, type_key: String },
}

pub(crate) struct CompiledMatcher {
    spec: MatcherSpec,
}

impl CompiledMatcher {
    pub(crate) fn compile(prototype: &Prototype, case_sensitive: bool) -> Option<CompiledMatcher> {
        let spec = match prototype {
            Prototype::Keyword(text) => MatcherSpec::Fixed {
                text: text.clone(),
                kind: TokenKind::Keyword,
            },
            Prototype::Operator(text) => MatcherSpec::Fixed {
                text: text.clone(),
                kind: TokenKind::Operator,
            },
            Prototype::Delimiter(text) => MatcherSpec::Fixed {
                text: text.clone(),
                kind: TokenKind::Delimiter,
            },
            Prototype::Literal(type_key, pattern) => MatcherSpec::Regex {
                regex: compile_anchored(pattern, case_sensitive),
                kind: TokenKind::Literal,
                type_key: type_key.clone(),
            },
            Prototype::Identifier(type_key, pattern) => MatcherSpec::Regex {
                regex: compile_anchored(pattern, case_sensitive),
                kind: TokenKind::Identifier,
                type_key: type_key.clone(),
            },
            Prototype::Comment(pattern) => MatcherSpec::Regex {
                regex: compile_anchored(pattern, case_sensitive),
                kind: TokenKind::Comment,
                type_key: String::new(),
            },
            Prototype::Start | Prototype::End | Prototype::NewLine => return None,
        };
        Some(CompiledMatcher { spec })
    }

    pub(crate) fn kind(&self) -> TokenKind {
        match &self.spec {
            MatcherSpec::Fixed { kind, .. } => *kind,
            MatcherSpec::Regex { kind, .. } => *kind,
        }
    }

    /// Attempt a match at `pointer`; returns the matched byte length.
    pub(crate) fn try_match(&self, text: &str, case_sensitive: bool, pointer: usize) -> Option<usize> {
        let bytes = text.as_bytes();
        match &self.spec {
            MatcherSpec::Fixed { text: literal, .. } => {
                let needle = literal.as_bytes();
                if pointer + needle.len() > bytes.len() {
                    return None;
                }
                let candidate = &bytes[pointer..pointer + needle.len()];
                let matched = if case_sensitive {
                    candidate == needle
                } else {
                    candidate.eq_ignore_ascii_case(needle)
                };
                if !matched {
                    return None;
                }
                if literal.chars().all(|c| c.is_ascii_alphabetic()) {
                    if let Some(&next) = bytes.get(pointer + needle.len()) {
                        if next.is_ascii_alphanumeric() || next == b'_' {
                            return None;
                        }
                    }
                }
                Some(needle.len())
            }
            MatcherSpec::Regex { regex, .. } => {
                let haystack = &bytes[pointer..];
                match regex.find(haystack) {
                    Some(m) if m.start() == 0 && m.end() > 0 => Some(m.end()),
                    _ => None,
                }
            }
        }
    }

    pub(crate) fn build_token(&self, text: &str, pointer: usize, length: usize, position: Position) -> Token {
        let matched = text[pointer..pointer + length].to_string();
        match &self.spec {
            MatcherSpec::Fixed { kind, .. } => match kind {
                TokenKind::Keyword => Token::Keyword(matched, position),
                TokenKind::Operator => Token::Operator(matched, position),
                TokenKind::Delimiter => Token::Delimiter(matched, position),
                _ => unreachable!("fixed matcher with non-fixed kind"),
            },
            MatcherSpec::Regex { kind, type_key, .. } => match kind {
                TokenKind::Literal => Token::Literal(type_key.clone(), matched, position),
                TokenKind::Identifier => Token::Identifier(type_key.clone(), matched, position),
                TokenKind::Comment => Token::Comment(matched, position),
                _ => unreachable!("regex matcher with non-regex kind"),
            },
        }
    }
}

/// Strip a leading `^` and trailing `$` (user patterns are always anchored
/// at the current offset regardless of what they write), then
/// compile. The tokenizer itself enforces the anchor-at-offset-0 requirement
/// at match time via `try_match`.
fn compile_anchored(pattern: &str, case_sensitive: bool) -> Regex {
    let mut stripped = pattern;
    if let Some(rest) = stripped.strip_prefix('^') {
        stripped = rest;
    }
    if let Some(rest) = stripped.strip_suffix('$') {
        stripped = rest;
    }
    RegexBuilder::new(stripped)
        .case_insensitive(!case_sensitive)
        .build()
        .unwrap_or_else(|err| panic!("invalid regex pattern '{}': {}", pattern, err))
}

/// Resolve which matcher wins among candidates with equal matched length,
/// Delimiter beats Operator on the same matched text, else the
/// earliest matcher in declaration/priority order (see `RuleTableBuilder`).
pub(crate) fn break_tie(text: &str, candidates: &[(usize, usize, TokenKind)]) -> usize {
    let max_len = candidates.iter().map(|(_, len, _)| *len).max().unwrap();
    let tied: Vec<&(usize, usize, TokenKind)> =
        candidates.iter().filter(|(_, len, _)| *len == max_len).collect();

    if tied.len() > 1 {
        let delimiter = tied.iter().find(|(_, _, k)| *k == TokenKind::Delimiter);
        let operator = tied.iter().find(|(_, _, k)| *k == TokenKind::Operator);
        if let (Some((d_idx, d_len, _)), Some((_o_idx, o_len, _))) = (delimiter, operator) {
            let _ = text;
            if d_len == o_len {
                return *d_idx;
            }
        }
    }
    tied.iter().map(|(idx, _, _)| *idx).min().unwrap()
}
