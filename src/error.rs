//! The error reporter (C9): accumulates parse errors/warnings with source
//! context and formats them for human display, grounded on the teacher
//! crate's hand-rolled `ParseError`/`ProductionError` split (no `thiserror`
//! or `anyhow` — this crate never needed more than `Display` + plain
//! structs).

use crate::position::Source;
use std::io;

/// One accumulated diagnostic: a message tied to a source position, with an
/// optional hint shown as a trailing `help:` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub token_text: String,
    pub hint: Option<String>,
}

/// Accumulates diagnostics for one source file and renders them in the
/// `rustc`-style block format. `ansi` is off by default;
/// flip it on for SGR-colored `error:`/`warning:` headers and arrow lines —
/// deliberately hand-rolled rather than pulled in via `termcolor`, since two
/// escape sequences don't justify a new dependency.
pub struct ErrorReporter {
    file_name: String,
    source: Option<Source>,
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
    pub ansi: bool,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            file_name: String::from("<input>"),
            source: None,
            errors: Vec::new(),
            warnings: Vec::new(),
            ansi: false,
        }
    }

    /// Attach the file name and source text used to render the source-line
    /// snippet under each diagnostic's arrow line. `source` is normalized the
    /// same way the tokenizer normalizes it, so line lookups agree with the
    /// line numbers carried by tokens.
    pub fn set_context(&mut self, file_name: impl Into<String>, source: &str) {
        self.file_name = file_name.into();
        self.source = Some(Source::new(source));
    }

    pub fn error(
        &mut self,
        message: impl Into<String>,
        line: usize,
        column: usize,
        token_text: impl Into<String>,
        hint: Option<String>,
    ) {
        self.errors.push(Diagnostic {
            message: message.into(),
            line,
            column,
            token_text: token_text.into(),
            hint,
        });
    }

    pub fn warning(
        &mut self,
        message: impl Into<String>,
        line: usize,
        column: usize,
        token_text: impl Into<String>,
        hint: Option<String>,
    ) {
        self.warnings.push(Diagnostic {
            message: message.into(),
            line,
            column,
            token_text: token_text.into(),
            hint,
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn clear(&mut self) {
        self.errors.clear();
        self.warnings.clear();
    }

    /// Render every accumulated error, then every warning, to `output`.
    pub fn print_reports(&self, output: &mut dyn io::Write) -> io::Result<()> {
        for diagnostic in &self.errors {
            self.write_block(output, "error", diagnostic)?;
        }
        for diagnostic in &self.warnings {
            self.write_block(output, "warning", diagnostic)?;
        }
        Ok(())
    }

    fn write_block(&self, output: &mut dyn io::Write, label: &str, diagnostic: &Diagnostic) -> io::Result<()> {
        use std::fmt::Write as _;

        let mut block = String::new();
        let (open, close) = if self.ansi {
            (if label == "error" { "\u{1b}[31m" } else { "\u{1b}[33m" }, "\u{1b}[0m")
        } else {
            ("", "")
        };

        writeln!(block, "{open}{label}: {}{close}", diagnostic.message).ok();
        writeln!(
            block,
            "  --> {}:{}:{}",
            self.file_name, diagnostic.line, diagnostic.column
        )
        .ok();

        if let Some(source) = self.source.as_ref().and_then(|s| s.line_text(diagnostic.line)) {
            writeln!(block, "   |").ok();
            writeln!(block, "{:>3}| {}", diagnostic.line, source).ok();
            let underline_len = diagnostic.token_text.chars().count().max(1);
            let padding = " ".repeat(diagnostic.column.saturating_sub(1));
            writeln!(block, "   | {}{}", padding, "^".repeat(underline_len)).ok();
        }

        if let Some(hint) = &diagnostic.hint {
            writeln!(block, "   = help: {}", hint).ok();
        }

        output.write_all(block.as_bytes())
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}
