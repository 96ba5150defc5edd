//! gramlex is a toolkit for building the front end of small language
//! processors and DSLs: a configurable tokenizer and a declarative
//! AST-construction engine, described through builder APIs rather than
//! hand-written lexers and recursive-descent parsers.
//!
//! # Overview
//!
//! A language front end built with gramlex has two stages.
//!
//! The first stage is a [`RuleTable`] (built with [`RuleTableBuilder`])
//! describing keywords, operators, delimiters, and typed regex patterns,
//! compiled into a [`Tokenizer`]. The tokenizer turns source text into a
//! positioned [`Token`] sequence, available both eagerly
//! ([`Tokenizer::tokenize`]) and lazily ([`Tokenizer::tokenize_lazy`]). A
//! [`PostProcessor`] then threads type-keyed transformations through the
//! produced tokens.
//!
//! The second stage is an [`ast::ASTRuleTable`] (built with
//! [`ast::ASTRuleTableBuilder`]) describing named rules, each with one or
//! more alternative definitions made of terminal steps, rule calls, and the
//! `Repeat`/`Optional`/`Choice` combinators. [`ast::build_ast`] drives a
//! [`TokenCursor`] against this table, backtracking across failed
//! alternatives and invoking user-supplied builder closures to produce
//! caller-defined AST objects.
//!
//! # Example
//!
//! A minimal `let NAME = NUMBER;` language:
//!
//! ```
//! use gramlex::ast::ASTRuleTableBuilder;
//! use gramlex::{ErrorReporter, PostProcessor, RuleTable, Tokenizer, WhitespaceMode};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Node {
//!     Let(String, i64),
//! }
//!
//! let rules = Rc::new(
//!     RuleTable::builder()
//!         .keyword("let")
//!         .operator("=")
//!         .delimiter(";")
//!         .identifier("default", r"[A-Za-z_]\w*")
//!         .literal("integer", r"[0-9]+")
//!         .whitespace_mode(WhitespaceMode::Ignore)
//!         .build()
//!         .unwrap(),
//! );
//!
//! let tokenizer = Tokenizer::new(rules);
//! let tokens = tokenizer.tokenize("let x = 42;", &PostProcessor::empty());
//!
//! let ast_rules = ASTRuleTableBuilder::<Node>::new()
//!     .top_rule(vec!["let_statement"])
//!     .start_rule("let_statement")
//!     .add_definition(None)
//!     .keyword("let", |_, _| {})
//!     .identifier("default", |ctx, token| {
//!         ctx.put("name", token.value().to_string());
//!     })
//!     .operator("=", |_, _| {})
//!     .literal("integer", |ctx, token| {
//!         ctx.put("value", token.value().parse::<i64>().unwrap());
//!     })
//!     .delimiter(";", |_, _| {})
//!     .end_definition(
//!         |ctx| Node::Let(ctx.get::<String>("name").unwrap(), ctx.get::<i64>("value").unwrap()),
//!         None,
//!     )
//!     .build()
//!     .unwrap();
//!
//! let mut reporter = ErrorReporter::new();
//! let wrapper = gramlex::ast::build_ast(&tokens, &ast_rules, &mut reporter);
//! assert!(!wrapper.has_errors());
//! assert_eq!(wrapper.get(), &[Node::Let("x".to_string(), 42)]);
//! let _ = RefCell::new(()); // keep the doctest's imports honest
//! ```

pub mod ast;
mod cursor;
mod debug;
#[cfg(test)]
mod demos;
pub mod error;
mod field_tree;
mod post_processor;
mod rule_table;
mod token;
mod tokenizer;

mod position;

pub use cursor::TokenCursor;
pub use error::{Diagnostic, ErrorReporter};
pub use field_tree::FieldTree;
pub use post_processor::{PostProcessor, PostProcessorBuilder};
pub use position::{Position, Source};
pub use rule_table::{Prototype, RuleTable, RuleTableBuilder, WhitespaceMode};
pub use token::{invalid_tokens, Token, TokenKind};
pub use tokenizer::{LazyTokens, Tokenizer};

/// Tokenize `source` with `rules`, applying `post_processor` to every
/// produced token, and return the full random-access token sequence. A
/// thin free-function convenience wrapper over [`Tokenizer::tokenize`] for
/// callers who don't need to reuse a compiled tokenizer across inputs.
pub fn tokenize(source: &str, rules: std::rc::Rc<RuleTable>, post_processor: &PostProcessor) -> Vec<Token> {
    Tokenizer::new(rules).tokenize(source, post_processor)
}

/// Lazily tokenize `source` with `rules`, applying `post_processor` to each
/// token as it is pulled. This free function compiles its own `Tokenizer`
/// each call; callers tokenizing the same rule table repeatedly should
/// build one `Tokenizer` and call [`Tokenizer::tokenize_lazy`] directly to
/// avoid recompiling matchers on every call.
pub fn tokenize_lazy<'s>(
    source: &'s str,
    rules: std::rc::Rc<RuleTable>,
    post_processor: &PostProcessor,
) -> impl Iterator<Item = Token> + 's {
    Tokenizer::new(rules).tokenize(source, post_processor).into_iter()
}
