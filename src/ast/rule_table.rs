//! The AST rule table (C6): an immutable description of named rules, each
//! holding an ordered list of alternative definitions built from steps.

use super::context::BuildContext;
use crate::Token;
use std::collections::HashMap;
use std::rc::Rc;

/// `(context, token) -> ()`, run when a terminal step matches.
pub type TerminalAction = Rc<dyn Fn(&BuildContext, &Token)>;
/// `(context, produced_object) -> ()`, run when a `Rule` step succeeds.
pub type RuleAction<TNode> = Rc<dyn Fn(&BuildContext, TNode)>;
/// `(context) -> ()`, the two combinator hooks (`Repeat`'s seed, `Optional`'s
/// fallback).
pub type ContextAction = Rc<dyn Fn(&BuildContext)>;
/// `(context) -> object`, a definition's result builder.
pub type ResultBuilder<TNode> = Rc<dyn Fn(&BuildContext) -> TNode>;

/// A single parsing instruction within a [`Definition`].
pub enum Step<TNode> {
    Keyword(String, TerminalAction),
    Operator(String, TerminalAction),
    Delimiter(String, TerminalAction),
    Identifier(String, TerminalAction),
    Literal(String, TerminalAction),
    Rule(String, RuleAction<TNode>),
    Repeat(Vec<Step<TNode>>, ContextAction),
    Optional(Vec<Step<TNode>>, ContextAction),
    Choice(Vec<Vec<Step<TNode>>>),
}

/// One alternative of a [`Rule`]: an ordered sequence of steps, a builder
/// invoked on success, and an optional hint surfaced when every alternative
/// in the rule fails.
pub struct Definition<TNode> {
    pub name: Option<String>,
    pub steps: Vec<Step<TNode>>,
    pub builder: ResultBuilder<TNode>,
    pub hint: Option<String>,
}

/// A named nonterminal: an ordered list of alternative [`Definition`]s, tried
/// in declaration order (the source's unordered-set `Rule` leaves this
/// unspecified; this implementation commits to declared order).
pub struct Rule<TNode> {
    pub name: String,
    pub definitions: Vec<Definition<TNode>>,
}

/// Immutable AST grammar: the set of named rules plus the ordered list of
/// rule names accepted at the outermost level.
pub struct ASTRuleTable<TNode> {
    pub(crate) top_rules: Vec<String>,
    pub(crate) ignore_comments: bool,
    pub(crate) rules: HashMap<String, Rule<TNode>>,
}

impl<TNode> ASTRuleTable<TNode> {
    pub fn top_rules(&self) -> &[String] {
        &self.top_rules
    }

    pub fn ignore_comments(&self) -> bool {
        self.ignore_comments
    }

    pub fn rule(&self, name: &str) -> Option<&Rule<TNode>> {
        self.rules.get(name)
    }
}
