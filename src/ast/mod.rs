//! The declarative AST-construction engine (C6-C8): named rules built from
//! alternative definitions of steps, matched against a token cursor with
//! backtracking, producing user-defined tree objects.

mod builder;
mod context;
mod engine;
mod grammar_tree;
mod rule_table;

pub use builder::ASTRuleTableBuilder;
pub use context::{BuildContext, Disposer};
pub use engine::{build_ast, ASTWrapper};
pub use grammar_tree::GrammarNode;
pub use rule_table::{ASTRuleTable, ContextAction, Definition, ResultBuilder, Rule, RuleAction, Step, TerminalAction};
