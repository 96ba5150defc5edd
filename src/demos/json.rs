//! A JSON grammar, worked the way the teacher cross-checks its own JSON
//! walkthrough against `serde_json`: this demo's `parse` and
//! `serde_json::from_str` are run over the same input and compared, so the
//! dev-dependency is exercised rather than merely declared.

use crate::ast::{ASTRuleTable, ASTRuleTableBuilder};
use crate::{PostProcessor, RuleTable, Tokenizer};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum JsonNode {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<JsonNode>),
    Object(Vec<(String, JsonNode)>),
}

impl JsonNode {
    pub(crate) fn to_serde_value(&self) -> serde_json::Value {
        match self {
            JsonNode::Null => serde_json::Value::Null,
            JsonNode::Bool(b) => serde_json::Value::Bool(*b),
            JsonNode::Number(n) => serde_json::json!(*n),
            JsonNode::String(s) => serde_json::Value::String(s.clone()),
            JsonNode::Array(items) => {
                serde_json::Value::Array(items.iter().map(JsonNode::to_serde_value).collect())
            }
            JsonNode::Object(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_serde_value()))
                    .collect(),
            ),
        }
    }
}

/// Strip the surrounding quotes and resolve backslash escapes of a matched
/// `"string"` literal token's raw text.
fn unquote(raw: &str) -> String {
    let inner = &raw[1..raw.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn rules() -> Rc<RuleTable> {
    Rc::new(
        RuleTable::builder()
            .keyword("true")
            .keyword("false")
            .keyword("null")
            .delimiter("{")
            .delimiter("}")
            .delimiter("[")
            .delimiter("]")
            .delimiter(":")
            .delimiter(",")
            .literal("string", r#""(?:\\.|[^"\\])*""#)
            .literal("number", r"-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")
            .make_case_sensitive()
            .build()
            .unwrap(),
    )
}

fn ast_rules() -> Rc<ASTRuleTable<JsonNode>> {
    Rc::new(
        ASTRuleTableBuilder::<JsonNode>::new()
            .top_rule(vec!["value"])
            .start_rule("value")
            .add_definition(Some("null"))
            .keyword("null", |_, _| {})
            .end_definition(|_| JsonNode::Null, None)
            .add_definition(Some("true"))
            .keyword("true", |_, _| {})
            .end_definition(|_| JsonNode::Bool(true), None)
            .add_definition(Some("false"))
            .keyword("false", |_, _| {})
            .end_definition(|_| JsonNode::Bool(false), None)
            .add_definition(Some("number"))
            .literal("number", |ctx, token| {
                ctx.put("n", token.value().parse::<f64>().expect("number literal matched its own regex"));
            })
            .end_definition(|ctx| JsonNode::Number(ctx.get::<f64>("n").unwrap()), None)
            .add_definition(Some("string"))
            .literal("string", |ctx, token| {
                ctx.put("s", unquote(token.value()));
            })
            .end_definition(|ctx| JsonNode::String(ctx.get::<String>("s").unwrap()), None)
            .add_definition(Some("array"))
            .rule("array", |ctx, node| {
                ctx.put("inner", node);
            })
            .end_definition(|ctx| ctx.get::<JsonNode>("inner").unwrap(), None)
            .add_definition(Some("object"))
            .rule("object", |ctx, node| {
                ctx.put("inner", node);
            })
            .end_definition(|ctx| ctx.get::<JsonNode>("inner").unwrap(), None)
            .start_rule("pair")
            .add_definition(None)
            .literal("string", |ctx, token| {
                ctx.put("key", unquote(token.value()));
            })
            .delimiter(":", |_, _| {})
            .rule("value", |ctx, node| {
                ctx.put("val", node);
            })
            .end_definition(
                |ctx| JsonNode::Object(vec![(ctx.get::<String>("key").unwrap(), ctx.get::<JsonNode>("val").unwrap())]),
                Some("expected ':' and a value"),
            )
            .start_rule("array")
            .add_definition(None)
            .delimiter("[", |_, _| {})
            .optional()
            .rule("value", |ctx, node| {
                ctx.put("items", RefCell::new(vec![node]));
            })
            .repeat(|_ctx| {})
            .delimiter(",", |_, _| {})
            .rule("value", |ctx, node| {
                ctx.get_rc::<RefCell<Vec<JsonNode>>>("items").unwrap().borrow_mut().push(node);
            })
            .stop_repeat()
            .otherwise(|ctx| {
                ctx.put("items", RefCell::new(Vec::<JsonNode>::new()));
            })
            .delimiter("]", |_, _| {})
            .end_definition(
                |ctx| {
                    let items = ctx
                        .get_rc::<RefCell<Vec<JsonNode>>>("items")
                        .map(|r| r.borrow().clone())
                        .unwrap_or_default();
                    JsonNode::Array(items)
                },
                Some("expected ']'"),
            )
            .start_rule("object")
            .add_definition(None)
            .delimiter("{", |_, _| {})
            .optional()
            .rule("pair", |ctx, node| {
                if let JsonNode::Object(entries) = node {
                    ctx.put("entries", RefCell::new(entries));
                }
            })
            .repeat(|_ctx| {})
            .delimiter(",", |_, _| {})
            .rule("pair", |ctx, node| {
                if let JsonNode::Object(mut entries) = node {
                    ctx.get_rc::<RefCell<Vec<(String, JsonNode)>>>("entries")
                        .unwrap()
                        .borrow_mut()
                        .append(&mut entries);
                }
            })
            .stop_repeat()
            .otherwise(|ctx| {
                ctx.put("entries", RefCell::new(Vec::<(String, JsonNode)>::new()));
            })
            .delimiter("}", |_, _| {})
            .end_definition(
                |ctx| {
                    let entries = ctx
                        .get_rc::<RefCell<Vec<(String, JsonNode)>>>("entries")
                        .map(|r| r.borrow().clone())
                        .unwrap_or_default();
                    JsonNode::Object(entries)
                },
                Some("expected '}'"),
            )
            .build()
            .unwrap(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorReporter;

    fn parse(source: &str) -> JsonNode {
        let tokenizer = Tokenizer::new(rules());
        let tokens = tokenizer.tokenize(source, &PostProcessor::empty());
        let ast_rules = ast_rules();
        let mut reporter = ErrorReporter::new();
        let wrapper = crate::ast::build_ast(&tokens, &ast_rules, &mut reporter);
        assert!(!wrapper.has_errors(), "unexpected errors: {:?}", wrapper.errors());
        wrapper.get()[0].clone()
    }

    #[test]
    fn object_and_array_match_serde_json() {
        let source = r#"{"name": "ada", "age": 36, "tags": ["math", "computing"], "active": true, "note": null}"#;
        let ours = parse(source).to_serde_value();
        let reference: serde_json::Value = serde_json::from_str(source).unwrap();
        assert_eq!(ours, reference);
    }

    #[test]
    fn empty_array_and_object() {
        assert_eq!(parse("[]").to_serde_value(), serde_json::json!([]));
        assert_eq!(parse("{}").to_serde_value(), serde_json::json!({}));
    }

    #[test]
    fn nested_structures_match_serde_json() {
        let source = r#"[{"a": [1, 2, {"b": -3.5}]}, false]"#;
        let ours = parse(source).to_serde_value();
        let reference: serde_json::Value = serde_json::from_str(source).unwrap();
        assert_eq!(ours, reference);
    }
}
