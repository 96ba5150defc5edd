//! A `ptree`-renderable view of a compiled [`ASTRuleTable`], grounded on the
//! teacher crate's `TreeItem` impl for `ASTNode` (`ast_node.rs`): there the
//! tree being printed is a parsed result; here, since this rule-table/step
//! model has no crate-owned parsed-tree wrapper (a definition's builder
//! returns a caller's opaque `TNode` directly), the natural tree to walk is
//! the grammar itself — rules, their alternative definitions, and each
//! definition's step structure, recursing into `Repeat`/`Optional`/`Choice`.

use super::rule_table::{ASTRuleTable, Step};
use ptree::TreeItem;
use std::borrow::Cow;
use std::io;

/// One node of a [`ASTRuleTable::grammar_tree`] dump: a rule, a definition,
/// a step, or a `Choice` alternative, labeled for display.
#[derive(Clone)]
pub struct GrammarNode {
    label: String,
    children: Vec<GrammarNode>,
}

impl GrammarNode {
    fn leaf(label: impl Into<String>) -> Self {
        Self { label: label.into(), children: Vec::new() }
    }

    fn branch(label: impl Into<String>, children: Vec<GrammarNode>) -> Self {
        Self { label: label.into(), children }
    }
}

impl TreeItem for GrammarNode {
    type Child = GrammarNode;

    fn write_self<W: io::Write>(&self, f: &mut W, _style: &ptree::Style) -> io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> Cow<[Self::Child]> {
        Cow::from(&self.children)
    }
}

fn step_node<TNode>(step: &Step<TNode>) -> GrammarNode {
    match step {
        Step::Keyword(value, _) => GrammarNode::leaf(format!("keyword {:?}", value)),
        Step::Operator(value, _) => GrammarNode::leaf(format!("operator {:?}", value)),
        Step::Delimiter(value, _) => GrammarNode::leaf(format!("delimiter {:?}", value)),
        Step::Identifier(type_key, _) => GrammarNode::leaf(format!("identifier {}", type_key)),
        Step::Literal(type_key, _) => GrammarNode::leaf(format!("literal {}", type_key)),
        Step::Rule(name, _) => GrammarNode::leaf(format!("rule {}", name)),
        Step::Repeat(children, _) => GrammarNode::branch("repeat", children.iter().map(step_node).collect()),
        Step::Optional(children, _) => GrammarNode::branch("optional", children.iter().map(step_node).collect()),
        Step::Choice(alternatives) => GrammarNode::branch(
            "choice",
            alternatives
                .iter()
                .enumerate()
                .map(|(i, alternative)| GrammarNode::branch(format!("alt {}", i), alternative.iter().map(step_node).collect()))
                .collect(),
        ),
    }
}

impl<TNode> ASTRuleTable<TNode> {
    /// Build a `ptree`-renderable tree of the compiled grammar: every rule in
    /// name order, its alternative definitions, and the step structure of
    /// each definition.
    pub fn grammar_tree(&self) -> GrammarNode {
        let mut names: Vec<&String> = self.rules.keys().collect();
        names.sort();
        let children = names
            .into_iter()
            .map(|name| {
                let rule = &self.rules[name];
                let definitions = rule
                    .definitions
                    .iter()
                    .enumerate()
                    .map(|(i, definition)| {
                        let label = definition.name.clone().unwrap_or_else(|| format!("#{}", i));
                        GrammarNode::branch(label, definition.steps.iter().map(step_node).collect())
                    })
                    .collect();
                GrammarNode::branch(name.clone(), definitions)
            })
            .collect();
        GrammarNode::branch("grammar", children)
    }

    /// Pretty-print [`Self::grammar_tree`] to stdout via `ptree`.
    pub fn print_grammar(&self) -> io::Result<()> {
        ptree::print_tree(&self.grammar_tree())
    }
}
