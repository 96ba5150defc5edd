//! The AST builder (C8): drives a [`TokenCursor`] against an
//! [`ASTRuleTable`], applying backtracking definition selection and
//! producing user objects plus accumulated diagnostics.

use super::context::BuildContext;
use super::rule_table::{ASTRuleTable, Step};
use crate::cursor::TokenCursor;
use crate::error::ErrorReporter;
use crate::Token;

/// The result of [`build_ast`]: every root object produced at the top level,
/// plus the diagnostics recorded during this call.
pub struct ASTWrapper<TNode> {
    roots: Vec<TNode>,
    errors: Vec<crate::error::Diagnostic>,
}

impl<TNode> ASTWrapper<TNode> {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn get(&self) -> &[TNode] {
        &self.roots
    }

    pub fn errors(&self) -> &[crate::error::Diagnostic] {
        &self.errors
    }
}

/// Walk `tokens` against `rules`, recording failures into `reporter`. Never
/// panics on malformed input; the only way this function can fail loudly is
/// if `rules` itself is inconsistent, which [`super::builder::ASTRuleTableBuilder::build`]
/// already rejects.
pub fn build_ast<TNode: Clone + 'static>(
    tokens: &[Token],
    rules: &ASTRuleTable<TNode>,
    reporter: &mut ErrorReporter,
) -> ASTWrapper<TNode> {
    let mut cursor = TokenCursor::new(tokens, rules.ignore_comments());
    let mut roots = Vec::new();
    let start_len = reporter.errors().len();

    while let Some(token) = cursor.peek(0) {
        if matches!(token, Token::End(_)) {
            break;
        }
        if matches!(token, Token::Start(_)) {
            cursor.consume();
            continue;
        }

        let mut matched = false;
        for top in rules.top_rules() {
            if let Some(node) = try_rule(top, rules, &mut cursor, reporter) {
                roots.push(node);
                matched = true;
                break;
            }
        }

        if !matched {
            let token = cursor.peek(0).expect("loop condition guaranteed Some");
            let position = token.position();
            reporter.error(
                format!("no rule matched '{}'", token.value()),
                position.line,
                position.column,
                token.value().to_string(),
                None,
            );
            cursor.consume();
        }
    }

    let errors = reporter.errors()[start_len..].to_vec();
    ASTWrapper { roots, errors }
}

/// Try every definition of rule `name` in declared order; the first whose
/// steps all succeed wins. Restores the cursor and discards the context on
/// each failed attempt, so a failed alternative never leaks state.
fn try_rule<TNode: Clone + 'static>(
    name: &str,
    rules: &ASTRuleTable<TNode>,
    cursor: &mut TokenCursor,
    reporter: &mut ErrorReporter,
) -> Option<TNode> {
    let rule = rules.rule(name).expect("rule references are validated at build time");
    for definition in &rule.definitions {
        let save = cursor.save_position();
        let context = BuildContext::new();
        if run_steps(&definition.steps, rules, cursor, &context, reporter) {
            cursor.commit(save);
            return Some((definition.builder)(&context));
        }
        cursor.backtrack(save);
    }
    None
}

fn run_steps<TNode: Clone + 'static>(
    steps: &[Step<TNode>],
    rules: &ASTRuleTable<TNode>,
    cursor: &mut TokenCursor,
    context: &BuildContext,
    reporter: &mut ErrorReporter,
) -> bool {
    for step in steps {
        if !run_step(step, rules, cursor, context, reporter) {
            return false;
        }
    }
    true
}

fn run_step<TNode: Clone + 'static>(
    step: &Step<TNode>,
    rules: &ASTRuleTable<TNode>,
    cursor: &mut TokenCursor,
    context: &BuildContext,
    reporter: &mut ErrorReporter,
) -> bool {
    match step {
        Step::Keyword(value, action) => {
            terminal_match(cursor, context, action, |t| matches!(t, Token::Keyword(v, _) if v == value))
        }
        Step::Operator(value, action) => {
            terminal_match(cursor, context, action, |t| matches!(t, Token::Operator(v, _) if v == value))
        }
        Step::Delimiter(value, action) => {
            terminal_match(cursor, context, action, |t| matches!(t, Token::Delimiter(v, _) if v == value))
        }
        Step::Identifier(type_key, action) => terminal_match(cursor, context, action, |t| {
            matches!(t, Token::Identifier(k, _, _) if k == type_key)
        }),
        Step::Literal(type_key, action) => terminal_match(cursor, context, action, |t| {
            matches!(t, Token::Literal(k, _, _) if k == type_key)
        }),
        Step::Rule(name, consumer) => match try_rule(name, rules, cursor, reporter) {
            Some(node) => {
                consumer(context, node);
                true
            }
            None => false,
        },
        Step::Repeat(children, initializer) => {
            initializer(context);
            loop {
                let save = cursor.save_position();
                if run_steps(children, rules, cursor, context, reporter) {
                    cursor.commit(save);
                } else {
                    cursor.backtrack(save);
                    break;
                }
            }
            true
        }
        Step::Optional(children, fallback) => {
            let save = cursor.save_position();
            if run_steps(children, rules, cursor, context, reporter) {
                cursor.commit(save);
            } else {
                cursor.backtrack(save);
                fallback(context);
            }
            true
        }
        Step::Choice(alternatives) => {
            for alternative in alternatives {
                let save = cursor.save_position();
                if run_steps(alternative, rules, cursor, context, reporter) {
                    cursor.commit(save);
                    return true;
                }
                cursor.backtrack(save);
            }
            false
        }
    }
}

fn terminal_match(
    cursor: &mut TokenCursor,
    context: &BuildContext,
    action: &super::rule_table::TerminalAction,
    predicate: impl Fn(&Token) -> bool,
) -> bool {
    match cursor.peek(0) {
        Some(token) if predicate(token) => {
            action(context, token);
            cursor.consume();
            true
        }
        _ => false,
    }
}
