//! The lexer rule table (C2): an immutable, declarative description of how to
//! lex, plus the builder that assembles one.

use std::fmt::Write as _;

/// How the tokenizer treats whitespace and line structure. Default: `Ignore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhitespaceMode {
    /// Whitespace is skipped; no `NewLine` or indentation tokens are emitted.
    Ignore,
    /// A `NewLine` token is emitted between adjacent non-empty lines.
    Significant,
    /// Leading whitespace on each line drives `IndentIncr`/`IndentDecr`
    /// bookkeeping.
    Indentation,
}

impl Default for WhitespaceMode {
    fn default() -> Self {
        WhitespaceMode::Ignore
    }
}

/// One declared lexical rule: either a fixed-string literal (keyword,
/// operator, delimiter) or a typed regex pattern (literal, identifier,
/// comment).
#[derive(Debug, Clone)]
pub enum Prototype {
    Keyword(String),
    Operator(String),
    Delimiter(String),
    Literal(String, String),
    Identifier(String, String),
    Comment(String),
    Start,
    End,
    NewLine,
}

impl Prototype {
    fn sort_rank(&self) -> u8 {
        // Used only to break ties among fixed-string prototypes of equal
        // length in longest-match-first mode: Delimiter before Operator
        // before Keyword, then regex-backed kinds.
        match self {
            Prototype::Delimiter(_) => 0,
            Prototype::Operator(_) => 1,
            Prototype::Keyword(_) => 2,
            Prototype::Literal(_, _) => 3,
            Prototype::Identifier(_, _) => 4,
            Prototype::Comment(_) => 5,
            Prototype::Start | Prototype::End | Prototype::NewLine => 6,
        }
    }

    fn fixed_text(&self) -> Option<&str> {
        match self {
            Prototype::Keyword(s) | Prototype::Operator(s) | Prototype::Delimiter(s) => Some(s),
            _ => None,
        }
    }
}

/// Immutable description of how to lex: keyword/operator/delimiter literals,
/// typed regex patterns, plus lexer settings.
///
/// Built via [`RuleTableBuilder`] and shared read-only across tokenizer
/// invocations.
pub struct RuleTable {
    pub(crate) prototypes: Vec<Prototype>,
    pub(crate) whitespace_mode: WhitespaceMode,
    pub(crate) case_sensitive: bool,
    pub(crate) longest_match_first: bool,
    pub(crate) has_start: bool,
    pub(crate) has_end: bool,
    pub(crate) has_new_line: bool,
}

impl RuleTable {
    pub fn builder() -> RuleTableBuilder {
        RuleTableBuilder::new()
    }

    pub fn whitespace_mode(&self) -> WhitespaceMode {
        self.whitespace_mode
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn has_start(&self) -> bool {
        self.has_start
    }

    pub fn has_end(&self) -> bool {
        self.has_end
    }

    /// Whether the rule table declared `.new_line()`, which requests
    /// `NewLine` tokens between adjacent non-empty lines regardless of
    /// whitespace mode — `WhitespaceMode::Significant` already implies this
    /// on its own; this lets `Ignore`/`Indentation` tables opt into the same
    /// line-boundary tokens without switching mode.
    pub fn has_new_line(&self) -> bool {
        self.has_new_line
    }

    /// Render a human-readable grammar dump of the compiled rule table,
    /// grounded on the teacher's `ITokenization::build_grammar`.
    pub fn build_grammar(&self) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        writeln!(out, "lexer {{")?;
        for prototype in &self.prototypes {
            match prototype {
                Prototype::Keyword(s) => writeln!(out, "  keyword {:?}", s)?,
                Prototype::Operator(s) => writeln!(out, "  operator {:?}", s)?,
                Prototype::Delimiter(s) => writeln!(out, "  delimiter {:?}", s)?,
                Prototype::Literal(t, p) => writeln!(out, "  literal {} : /{}/", t, p)?,
                Prototype::Identifier(t, p) => writeln!(out, "  identifier {} : /{}/", t, p)?,
                Prototype::Comment(p) => writeln!(out, "  comment : /{}/", p)?,
                Prototype::Start => writeln!(out, "  start")?,
                Prototype::End => writeln!(out, "  end")?,
                Prototype::NewLine => writeln!(out, "  new_line")?,
            }
        }
        writeln!(out, "}}")?;
        Ok(out)
    }
}

/// Accumulates declarative lexer rules; `build()` validates and produces an
/// immutable [`RuleTable`].
#[derive(Default)]
pub struct RuleTableBuilder {
    prototypes: Vec<Prototype>,
    whitespace_mode: WhitespaceMode,
    case_sensitive: bool,
    longest_match_first: bool,
}

impl RuleTableBuilder {
    pub fn new() -> Self {
        Self {
            prototypes: Vec::new(),
            whitespace_mode: WhitespaceMode::Ignore,
            case_sensitive: false,
            longest_match_first: false,
        }
    }

    pub fn keyword(mut self, text: impl Into<String>) -> Self {
        self.prototypes.push(Prototype::Keyword(text.into()));
        self
    }

    pub fn operator(mut self, text: impl Into<String>) -> Self {
        self.prototypes.push(Prototype::Operator(text.into()));
        self
    }

    pub fn delimiter(mut self, text: impl Into<String>) -> Self {
        self.prototypes.push(Prototype::Delimiter(text.into()));
        self
    }

    pub fn literal(mut self, kind: impl Into<String>, regex: impl Into<String>) -> Self {
        self.prototypes
            .push(Prototype::Literal(kind.into(), regex.into()));
        self
    }

    pub fn identifier(mut self, kind: impl Into<String>, regex: impl Into<String>) -> Self {
        self.prototypes
            .push(Prototype::Identifier(kind.into(), regex.into()));
        self
    }

    pub fn comment(mut self, regex: impl Into<String>) -> Self {
        self.prototypes.push(Prototype::Comment(regex.into()));
        self
    }

    pub fn start(mut self) -> Self {
        self.prototypes.push(Prototype::Start);
        self
    }

    pub fn end(mut self) -> Self {
        self.prototypes.push(Prototype::End);
        self
    }

    pub fn new_line(mut self) -> Self {
        self.prototypes.push(Prototype::NewLine);
        self
    }

    pub fn whitespace_mode(mut self, mode: WhitespaceMode) -> Self {
        self.whitespace_mode = mode;
        self
    }

    pub fn enable_longest_match_first(mut self) -> Self {
        self.longest_match_first = true;
        self
    }

    pub fn make_case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    /// Validate and freeze the rule table.
    ///
    /// A `Rule(name)` step referencing an undeclared rule is a C6 concern
    /// (validated by [`crate::ast::ASTRuleTableBuilder::build`]); the only
    /// structural error surfaced here is a duplicate fixed-string literal of
    /// the *same* kind (two prototypes claiming the same text and kind can
    /// never both win). A delimiter and an operator sharing the same text is
    /// not a conflict — that is the documented Delimiter-over-Operator
    /// tie-break — so the dedup key includes the kind, not just the text.
    pub fn build(mut self) -> Result<RuleTable, String> {
        let mut seen = std::collections::HashSet::new();
        for prototype in &self.prototypes {
            if let Some(text) = prototype.fixed_text() {
                let text_key = if self.case_sensitive {
                    text.to_string()
                } else {
                    text.to_lowercase()
                };
                if !seen.insert((prototype.sort_rank(), text_key)) {
                    return Err(format!("literal '{}' is declared more than once", text));
                }
            }
        }

        let has_start = self.prototypes.iter().any(|p| matches!(p, Prototype::Start));
        let has_end = self.prototypes.iter().any(|p| matches!(p, Prototype::End));
        let has_new_line = self.prototypes.iter().any(|p| matches!(p, Prototype::NewLine));

        if self.longest_match_first {
            self.prototypes.sort_by(|a, b| {
                let a_len = a.fixed_text().map(str::len).unwrap_or(0);
                let b_len = b.fixed_text().map(str::len).unwrap_or(0);
                b_len.cmp(&a_len).then(a.sort_rank().cmp(&b.sort_rank()))
            });
        }

        Ok(RuleTable {
            prototypes: self.prototypes,
            whitespace_mode: self.whitespace_mode,
            case_sensitive: self.case_sensitive,
            longest_match_first: self.longest_match_first,
            has_start,
            has_end,
            has_new_line,
        })
    }
}
