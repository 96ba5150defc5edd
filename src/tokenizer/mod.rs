//! The tokenizer (C3): turns normalized source text into a token sequence,
//! honoring rule priorities, whitespace mode, and case sensitivity. Exposes
//! both an eager view (`tokenize`) and a lazy, on-demand view
//! (`tokenize_lazy`) that are guaranteed to produce identical output because
//! both are thin wrappers over the same incremental [`Scanner`].

mod matcher;

use crate::debug::{trace_success, Log};
use crate::position::normalize_line_endings;
use crate::post_processor::PostProcessor;
use crate::rule_table::{Prototype, RuleTable, WhitespaceMode};
use crate::token::TokenKind;
use crate::{Position, Token};
use matcher::CompiledMatcher;
use std::collections::VecDeque;
use std::rc::Rc;

/// A compiled, reusable view of a [`RuleTable`], ready to scan source text.
/// Immutable and shareable read-only across independent invocations.
pub struct Tokenizer {
    rules: Rc<RuleTable>,
    matchers: Rc<[CompiledMatcher]>,
    debug: Log<&'static str>,
}

impl Tokenizer {
    pub fn new(rules: Rc<RuleTable>) -> Self {
        let matchers: Rc<[CompiledMatcher]> = rules
            .prototypes
            .iter()
            .filter_map(|p| CompiledMatcher::compile(p, rules.case_sensitive))
            .collect::<Vec<_>>()
            .into();
        Self { rules, matchers, debug: Log::None }
    }

    /// Opt into debug-build-only tracing of every emitted token at `level`.
    pub fn with_debug(mut self, level: Log<&'static str>) -> Self {
        self.debug = level;
        self
    }

    /// Produce the full, random-access token sequence for `source`.
    ///
    /// `source` is normalized (CRLF/CR folded to LF) before scanning begins,
    /// per the tokenizer's documented normalization contract.
    pub fn tokenize(&self, source: &str, post_processor: &PostProcessor) -> Vec<Token> {
        let mut scanner = Scanner::new(source, self.rules.clone(), self.matchers.clone());
        let mut out = Vec::new();
        while let Some(token) = scanner.next_raw() {
            let token = post_processor.apply(token);
            trace_success(&self.debug, || format!("token: {:?}", token));
            out.push(token);
        }
        out
    }

    /// Produce a lazy, on-demand iterator over the same output as
    /// [`Tokenizer::tokenize`]. The returned iterator owns its compiled
    /// rule/matcher state (cheap `Rc` clones) and its own normalized copy of
    /// `source`, borrowing only `post_processor` from the caller.
    pub fn tokenize_lazy<'p>(&self, source: &str, post_processor: &'p PostProcessor) -> LazyTokens<'p> {
        LazyTokens {
            scanner: Scanner::new(source, self.rules.clone(), self.matchers.clone()),
            post_processor,
            debug: self.debug,
        }
    }

    pub fn build_grammar(&self) -> Result<String, std::fmt::Error> {
        self.rules.build_grammar()
    }
}

/// The on-demand view returned by [`Tokenizer::tokenize_lazy`].
pub struct LazyTokens<'p> {
    scanner: Scanner,
    post_processor: &'p PostProcessor,
    debug: Log<&'static str>,
}

impl<'p> Iterator for LazyTokens<'p> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.scanner.next_raw().map(|t| self.post_processor.apply(t))?;
        trace_success(&self.debug, || format!("token: {:?}", token));
        Some(token)
    }
}

/// The incremental scanning state machine shared by the eager and lazy
/// views. Holds only a small look-behind queue for tokens produced ahead of
/// demand (sentinels, indentation flushes, deferred `NewLine`s) plus constant
/// per-line bookkeeping. Owns its compiled rule/matcher
/// state via cheap `Rc` clones rather than borrowing, so it never becomes
/// self-referential when embedded in an owning iterator.
struct Scanner {
    text: String,
    rules: Rc<RuleTable>,
    matchers: Rc<[CompiledMatcher]>,
    pending: VecDeque<Token>,
    pointer: usize,
    line: usize,
    column: usize,
    at_line_start: bool,
    started: bool,
    finished: bool,
    // Indentation-mode state.
    indent_stack: Vec<usize>,
    indent_char: Option<u8>,
    // Significant-whitespace-mode state.
    line_has_token: bool,
    pending_newline: Option<Position>,
}

impl Scanner {
    fn new(text: &str, rules: Rc<RuleTable>, matchers: Rc<[CompiledMatcher]>) -> Self {
        Self {
            text: normalize_line_endings(text),
            rules,
            matchers,
            pending: VecDeque::new(),
            pointer: 0,
            line: 1,
            column: 1,
            at_line_start: true,
            started: false,
            finished: false,
            indent_stack: Vec::new(),
            indent_char: None,
            line_has_token: false,
            pending_newline: None,
        }
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn at_eof(&self) -> bool {
        self.pointer >= self.text.len()
    }

    fn peek_char(&self) -> Option<char> {
        self.text[self.pointer..].chars().next()
    }

    /// Advance past one plain character (not through matcher machinery),
    /// correctly bumping line/column across the `\n` boundary.
    fn advance_one(&mut self) -> char {
        let c = self.peek_char().expect("advance_one called at EOF");
        self.pointer += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    fn emit(&mut self, token: Token) -> Token {
        self.line_has_token = true;
        token
    }

    /// Pull the next raw (pre-post-processor) token, or `None` once the
    /// stream is fully drained.
    fn next_raw(&mut self) -> Option<Token> {
        if let Some(t) = self.pending.pop_front() {
            return Some(t);
        }
        if self.finished {
            return None;
        }
        if !self.started {
            self.started = true;
            if self.rules.has_start() {
                return Some(Token::Start(Position::new(0, 0)));
            }
        }

        loop {
            if let Some(pos) = self.pending_newline.take() {
                return Some(self.emit(Token::NewLine(pos)));
            }

            if self.at_eof() {
                if self.rules.whitespace_mode() == WhitespaceMode::Indentation {
                    if self.indent_stack.pop().is_some() {
                        return Some(Token::IndentDecr(self.position()));
                    }
                }
                self.finished = true;
                if self.rules.has_end() {
                    return Some(Token::End(Position::new(self.text_last_line(), 1)));
                }
                return None;
            }

            if self.at_line_start {
                self.at_line_start = false;
                self.line_has_token = false;
                match self.rules.whitespace_mode() {
                    WhitespaceMode::Ignore | WhitespaceMode::Significant => {}
                    WhitespaceMode::Indentation => {
                        self.handle_indentation();
                        if let Some(t) = self.pending.pop_front() {
                            return Some(t);
                        }
                        continue;
                    }
                }
            }

            match self.peek_char() {
                None => continue,
                Some('\n') => {
                    self.on_line_crossed();
                    self.advance_one();
                    self.at_line_start = true;
                    continue;
                }
                Some(c) if c == ' ' || c == '\t' => {
                    self.advance_one();
                    continue;
                }
                Some(_) => {
                    return Some(self.scan_token());
                }
            }
        }
    }

    fn text_last_line(&self) -> usize {
        self.text.matches('\n').count() + 1
    }

    fn on_line_crossed(&mut self) {
        // `Significant` mode implies `NewLine` tokens on its own; a table
        // built with `.new_line()` requests the same line-boundary tokens
        // without switching whitespace mode (e.g. alongside `Indentation`).
        let wants_new_line =
            self.rules.whitespace_mode() == WhitespaceMode::Significant || self.rules.has_new_line();
        if wants_new_line && self.line_has_token {
            self.pending_newline = Some(self.position());
        }
    }

    /// Leading-whitespace handling for `INDENTATION` mode. Measures the line's
    /// leading run of spaces/tabs and queues whatever `IndentIncr`/
    /// `IndentDecr`/`Invalid` tokens it implies onto `self.pending`; a blank
    /// line (no content before EOF/`\n`) queues nothing.
    fn handle_indentation(&mut self) {
        let mut run = Vec::new();
        while let Some(c) = self.peek_char() {
            if c == ' ' || c == '\t' {
                run.push(c as u8);
                self.advance_one();
            } else {
                break;
            }
        }

        let blank_line = matches!(self.peek_char(), None | Some('\n'));
        if blank_line {
            return;
        }

        let width = run.len();
        let pos = Position::new(self.line, 1);

        let mixed = run.iter().any(|&b| b != run[0]);
        if mixed {
            self.pending.push_back(Token::Invalid(
                "Mixed tabs/spaces in indentation".to_string(),
                pos,
            ));
        } else if width > 0 {
            let c = run[0];
            match self.indent_char {
                None => self.indent_char = Some(c),
                Some(existing) if existing != c => {
                    self.pending.push_back(Token::Invalid(
                        "Inconsistent indentation character".to_string(),
                        pos,
                    ));
                }
                _ => {}
            }
        }

        let top = *self.indent_stack.last().unwrap_or(&0);
        if width > top {
            self.indent_stack.push(width);
            self.pending.push_back(Token::IndentIncr(pos));
        } else if width < top {
            while *self.indent_stack.last().unwrap_or(&0) > width {
                self.indent_stack.pop();
                self.pending.push_back(Token::IndentDecr(pos));
            }
            if *self.indent_stack.last().unwrap_or(&0) != width {
                self.pending.push_back(Token::Invalid(
                    format!("Inconsistent indentation level {}", width),
                    pos,
                ));
            }
        }
    }

    fn scan_token(&mut self) -> Token {
        let position = self.position();
        let candidates: Vec<(usize, usize, TokenKind)> = self
            .matchers
            .iter()
            .enumerate()
            .filter_map(|(i, m)| {
                m.try_match(&self.text, self.rules.is_case_sensitive(), self.pointer)
                    .map(|len| (i, len, m.kind()))
            })
            .collect();

        if candidates.is_empty() {
            let c = self.peek_char().expect("scan_token called at EOF");
            self.advance_one();
            return self.emit(Token::Invalid(c.to_string(), position));
        }

        let winner = matcher::break_tie(&self.text, &candidates);
        // `winner` is a matcher index (the `i` from `.enumerate()` above),
        // not a position within the filtered `candidates` vec — look it up
        // by that index rather than indexing `candidates` directly.
        let (_, length, _) = *candidates
            .iter()
            .find(|(i, _, _)| *i == winner)
            .expect("break_tie returns one of the candidates' matcher indices");
        let token = self.matchers[winner].build_token(&self.text, self.pointer, length, position);

        // `length` is a byte count, but `advance_one` walks one char at a
        // time (char boundaries don't line up with byte counts once the
        // match contains multi-byte UTF-8), so advance to the target byte
        // offset rather than looping `length` times.
        let target = self.pointer + length;
        while self.pointer < target && !self.at_eof() {
            self.advance_one();
        }

        self.emit(token)
    }
}
