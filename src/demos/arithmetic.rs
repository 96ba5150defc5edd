//! A `let NAME = EXPR;` DSL with the usual `+ - * /` precedence, worked as
//! scenario 5 of the testable-properties section: `let x = 2 + 3 * 4;`
//! parses to a single `Let` node whose initializer nests multiplication
//! inside addition.

use crate::ast::{ASTRuleTableBuilder, ASTRuleTable};
use crate::{PostProcessor, RuleTable, Tokenizer};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Let(String, Box<Node>),
    Int(i64),
    Binary(String, Box<Node>, Box<Node>),
}

fn rules() -> Rc<RuleTable> {
    Rc::new(
        RuleTable::builder()
            .keyword("let")
            .operator("=")
            .operator("+")
            .operator("-")
            .operator("*")
            .operator("/")
            .delimiter(";")
            .delimiter("(")
            .delimiter(")")
            .identifier("default", r"[A-Za-z_]\w*")
            .literal("integer", r"[0-9]+")
            .build()
            .unwrap(),
    )
}

fn fold_binary(ctx: &crate::ast::BuildContext, op: &str, rhs: Node) {
    let acc = ctx.get_rc::<RefCell<Node>>("acc").expect("seeded by the first operand");
    let lhs = acc.borrow().clone();
    *acc.borrow_mut() = Node::Binary(op.to_string(), Box::new(lhs), Box::new(rhs));
}

fn ast_rules() -> Rc<ASTRuleTable<Node>> {
    Rc::new(
        ASTRuleTableBuilder::<Node>::new()
            .top_rule(vec!["let_statement"])
            .start_rule("factor")
            .add_definition(Some("int"))
            .literal("integer", |ctx, token| {
                ctx.put("value", token.value().parse::<i64>().expect("integer literal matched \\d+"));
            })
            .end_definition(|ctx| Node::Int(ctx.get::<i64>("value").unwrap()), None)
            .add_definition(Some("paren"))
            .delimiter("(", |_, _| {})
            .rule("expr", |ctx, node| {
                ctx.put("inner", node);
            })
            .delimiter(")", |_, _| {})
            .end_definition(|ctx| ctx.get::<Node>("inner").unwrap(), Some("expected an expression"))
            .start_rule("term")
            .add_definition(None)
            .rule("factor", |ctx, node| {
                ctx.put("acc", RefCell::new(node));
            })
            .repeat(|_ctx| {})
            .choice()
            .operator("*", |_, _| {})
            .rule("factor", |ctx, node| fold_binary(ctx, "*", node))
            .or()
            .operator("/", |_, _| {})
            .rule("factor", |ctx, node| fold_binary(ctx, "/", node))
            .end_choice()
            .stop_repeat()
            .end_definition(|ctx| ctx.get_rc::<RefCell<Node>>("acc").unwrap().borrow().clone(), None)
            .start_rule("expr")
            .add_definition(None)
            .rule("term", |ctx, node| {
                ctx.put("acc", RefCell::new(node));
            })
            .repeat(|_ctx| {})
            .choice()
            .operator("+", |_, _| {})
            .rule("term", |ctx, node| fold_binary(ctx, "+", node))
            .or()
            .operator("-", |_, _| {})
            .rule("term", |ctx, node| fold_binary(ctx, "-", node))
            .end_choice()
            .stop_repeat()
            .end_definition(|ctx| ctx.get_rc::<RefCell<Node>>("acc").unwrap().borrow().clone(), None)
            .start_rule("let_statement")
            .add_definition(None)
            .keyword("let", |_, _| {})
            .identifier("default", |ctx, token| {
                ctx.put("name", token.value().to_string());
            })
            .operator("=", |_, _| {})
            .rule("expr", |ctx, node| {
                ctx.put("init", node);
            })
            .delimiter(";", |_, _| {})
            .end_definition(
                |ctx| Node::Let(ctx.get::<String>("name").unwrap(), Box::new(ctx.get::<Node>("init").unwrap())),
                Some("expected 'let NAME = EXPR;'"),
            )
            .build()
            .unwrap(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorReporter;

    #[test]
    fn precedence_nests_multiplication_inside_addition() {
        let rules = rules();
        let ast_rules = ast_rules();
        let tokenizer = Tokenizer::new(rules);
        let tokens = tokenizer.tokenize("let x = 2 + 3 * 4;", &PostProcessor::empty());

        let mut reporter = ErrorReporter::new();
        let wrapper = crate::ast::build_ast(&tokens, &ast_rules, &mut reporter);
        assert!(!wrapper.has_errors());
        assert_eq!(
            wrapper.get(),
            &[Node::Let(
                "x".to_string(),
                Box::new(Node::Binary(
                    "+".to_string(),
                    Box::new(Node::Int(2)),
                    Box::new(Node::Binary("*".to_string(), Box::new(Node::Int(3)), Box::new(Node::Int(4)))),
                )),
            )]
        );
    }

    #[test]
    fn parenthesized_subexpression_overrides_precedence() {
        let rules = rules();
        let ast_rules = ast_rules();
        let tokenizer = Tokenizer::new(rules);
        let tokens = tokenizer.tokenize("let y = (2 + 3) * 4;", &PostProcessor::empty());

        let mut reporter = ErrorReporter::new();
        let wrapper = crate::ast::build_ast(&tokens, &ast_rules, &mut reporter);
        assert!(!wrapper.has_errors());
        assert_eq!(
            wrapper.get(),
            &[Node::Let(
                "y".to_string(),
                Box::new(Node::Binary(
                    "*".to_string(),
                    Box::new(Node::Binary("+".to_string(), Box::new(Node::Int(2)), Box::new(Node::Int(3)))),
                    Box::new(Node::Int(4)),
                )),
            )]
        );
    }
}
