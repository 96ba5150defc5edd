//! A minimal Lisp-style list-form DSL, worked as scenario 7 of the
//! testable-properties section: `list = "(" { expr } ")"`, where `expr` is
//! either a symbol or a nested list. `(define (square x) (* x x))` produces
//! three top-level children: a symbol, a two-symbol list, and a
//! three-symbol list. `()` produces an empty list.

use crate::ast::{ASTRuleTable, ASTRuleTableBuilder};
use crate::{PostProcessor, RuleTable, Tokenizer};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ListNode {
    Symbol(String),
    List(Vec<ListNode>),
}

fn rules() -> Rc<RuleTable> {
    Rc::new(
        RuleTable::builder()
            .delimiter("(")
            .delimiter(")")
            .identifier("default", r"[A-Za-z_+\-*/=<>!?][A-Za-z0-9_+\-*/=<>!?]*")
            .build()
            .unwrap(),
    )
}

fn ast_rules() -> Rc<ASTRuleTable<ListNode>> {
    Rc::new(
        ASTRuleTableBuilder::<ListNode>::new()
            .top_rule(vec!["list"])
            .start_rule("expr")
            .add_definition(Some("symbol"))
            .identifier("default", |ctx, token| {
                ctx.put("sym", token.value().to_string());
            })
            .end_definition(|ctx| ListNode::Symbol(ctx.get::<String>("sym").unwrap()), None)
            .add_definition(Some("nested_list"))
            .rule("list", |ctx, node| {
                ctx.put("inner", node);
            })
            .end_definition(|ctx| ctx.get::<ListNode>("inner").unwrap(), None)
            .start_rule("list")
            .add_definition(None)
            .delimiter("(", |_, _| {})
            .repeat(|ctx| {
                ctx.put("items", RefCell::new(Vec::<ListNode>::new()));
            })
            .rule("expr", |ctx, node| {
                ctx.get_rc::<RefCell<Vec<ListNode>>>("items").unwrap().borrow_mut().push(node);
            })
            .stop_repeat()
            .delimiter(")", |_, _| {})
            .end_definition(
                |ctx| {
                    let items = ctx
                        .get_rc::<RefCell<Vec<ListNode>>>("items")
                        .map(|r| r.borrow().clone())
                        .unwrap_or_default();
                    ListNode::List(items)
                },
                Some("expected ')'"),
            )
            .build()
            .unwrap(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorReporter;

    fn parse(source: &str) -> Vec<ListNode> {
        let tokenizer = Tokenizer::new(rules());
        let tokens = tokenizer.tokenize(source, &PostProcessor::empty());
        let ast_rules = ast_rules();
        let mut reporter = ErrorReporter::new();
        let wrapper = crate::ast::build_ast(&tokens, &ast_rules, &mut reporter);
        assert!(!wrapper.has_errors(), "unexpected errors: {:?}", wrapper.errors());
        wrapper.get().to_vec()
    }

    #[test]
    fn empty_list_form() {
        assert_eq!(parse("()"), vec![ListNode::List(vec![])]);
    }

    #[test]
    fn nested_define_form() {
        let roots = parse("(define (square x) (* x x))");
        assert_eq!(
            roots,
            vec![ListNode::List(vec![
                ListNode::Symbol("define".into()),
                ListNode::List(vec![ListNode::Symbol("square".into()), ListNode::Symbol("x".into())]),
                ListNode::List(vec![
                    ListNode::Symbol("*".into()),
                    ListNode::Symbol("x".into()),
                    ListNode::Symbol("x".into()),
                ]),
            ])]
        );
    }
}
