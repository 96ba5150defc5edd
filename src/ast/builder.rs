//! The AST rule table builder: a value builder that accumulates rule
//! and definition declarations through explicit nested scopes and produces
//! an immutable [`ASTRuleTable`].

use super::context::BuildContext;
use super::rule_table::{ASTRuleTable, ContextAction, Definition, ResultBuilder, Rule, RuleAction, Step, TerminalAction};
use crate::Token;
use std::collections::HashMap;
use std::rc::Rc;

/// A nested scope opened by `add_definition`, `repeat`, `optional`, or
/// `choice`; closed by its matching terminator.
enum Scope<TNode> {
    Definition {
        rule_name: String,
        def_name: Option<String>,
        steps: Vec<Step<TNode>>,
    },
    Repeat {
        initializer: ContextAction,
        steps: Vec<Step<TNode>>,
    },
    Optional {
        steps: Vec<Step<TNode>>,
    },
    Choice {
        alternatives: Vec<Vec<Step<TNode>>>,
        current: Vec<Step<TNode>>,
    },
}

/// Accumulates named rules and their alternative definitions; `build()`
/// validates every `Rule(name, _)` reference and freezes the table.
pub struct ASTRuleTableBuilder<TNode> {
    top_rules: Vec<String>,
    ignore_comments: bool,
    current_rule: Option<String>,
    rules: HashMap<String, Vec<Definition<TNode>>>,
    scopes: Vec<Scope<TNode>>,
}

impl<TNode> Default for ASTRuleTableBuilder<TNode> {
    fn default() -> Self {
        Self {
            top_rules: Vec::new(),
            ignore_comments: false,
            current_rule: None,
            rules: HashMap::new(),
            scopes: Vec::new(),
        }
    }
}

impl<TNode: 'static> ASTRuleTableBuilder<TNode> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top_rule(mut self, names: Vec<impl Into<String>>) -> Self {
        self.top_rules = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn ignore_comments(mut self, flag: bool) -> Self {
        self.ignore_comments = flag;
        self
    }

    /// Open (or reopen) a rule by name; subsequent `add_definition` calls
    /// append to it.
    pub fn start_rule(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.rules.entry(name.clone()).or_insert_with(Vec::new);
        self.current_rule = Some(name);
        self
    }

    /// Open a new definition (alternative) within the current rule.
    pub fn add_definition(mut self, name: Option<&str>) -> Self {
        let rule_name = self
            .current_rule
            .clone()
            .expect("add_definition called before start_rule");
        self.scopes.push(Scope::Definition {
            rule_name,
            def_name: name.map(str::to_string),
            steps: Vec::new(),
        });
        self
    }

    fn steps_mut(&mut self) -> &mut Vec<Step<TNode>> {
        match self.scopes.last_mut().expect("no open definition/combinator scope") {
            Scope::Definition { steps, .. } => steps,
            Scope::Repeat { steps, .. } => steps,
            Scope::Optional { steps } => steps,
            Scope::Choice { current, .. } => current,
        }
    }

    fn push_step(mut self, step: Step<TNode>) -> Self {
        self.steps_mut().push(step);
        self
    }

    pub fn keyword(self, text: impl Into<String>, action: impl Fn(&BuildContext, &Token) + 'static) -> Self {
        self.push_step(Step::Keyword(text.into(), Rc::new(action) as TerminalAction))
    }

    pub fn operator(self, text: impl Into<String>, action: impl Fn(&BuildContext, &Token) + 'static) -> Self {
        self.push_step(Step::Operator(text.into(), Rc::new(action) as TerminalAction))
    }

    pub fn delimiter(self, text: impl Into<String>, action: impl Fn(&BuildContext, &Token) + 'static) -> Self {
        self.push_step(Step::Delimiter(text.into(), Rc::new(action) as TerminalAction))
    }

    pub fn identifier(self, type_key: impl Into<String>, action: impl Fn(&BuildContext, &Token) + 'static) -> Self {
        self.push_step(Step::Identifier(type_key.into(), Rc::new(action) as TerminalAction))
    }

    pub fn literal(self, type_key: impl Into<String>, action: impl Fn(&BuildContext, &Token) + 'static) -> Self {
        self.push_step(Step::Literal(type_key.into(), Rc::new(action) as TerminalAction))
    }

    pub fn rule(self, name: impl Into<String>, consumer: impl Fn(&BuildContext, TNode) + 'static) -> Self {
        self.push_step(Step::Rule(name.into(), Rc::new(consumer) as RuleAction<TNode>))
    }

    /// Open a `Repeat` scope; `initializer` runs once when the step executes,
    /// before the first iteration attempt.
    pub fn repeat(mut self, initializer: impl Fn(&BuildContext) + 'static) -> Self {
        self.scopes.push(Scope::Repeat {
            initializer: Rc::new(initializer),
            steps: Vec::new(),
        });
        self
    }

    pub fn stop_repeat(mut self) -> Self {
        match self.scopes.pop().expect("stop_repeat without matching repeat") {
            Scope::Repeat { initializer, steps } => self.push_step(Step::Repeat(steps, initializer)),
            _ => panic!("stop_repeat does not match the innermost open scope"),
        }
    }

    pub fn optional(mut self) -> Self {
        self.scopes.push(Scope::Optional { steps: Vec::new() });
        self
    }

    pub fn otherwise(mut self, fallback: impl Fn(&BuildContext) + 'static) -> Self {
        match self.scopes.pop().expect("otherwise without matching optional") {
            Scope::Optional { steps } => self.push_step(Step::Optional(steps, Rc::new(fallback))),
            _ => panic!("otherwise does not match the innermost open scope"),
        }
    }

    pub fn choice(mut self) -> Self {
        self.scopes.push(Scope::Choice {
            alternatives: Vec::new(),
            current: Vec::new(),
        });
        self
    }

    /// Close the current alternative and open the next one within the same
    /// `Choice` scope.
    pub fn or(mut self) -> Self {
        match self.scopes.last_mut().expect("or outside a choice scope") {
            Scope::Choice { alternatives, current } => {
                alternatives.push(std::mem::take(current));
            }
            _ => panic!("or does not match the innermost open scope"),
        }
        self
    }

    pub fn end_choice(mut self) -> Self {
        match self.scopes.pop().expect("end_choice without matching choice") {
            Scope::Choice { mut alternatives, current } => {
                alternatives.push(current);
                self.push_step(Step::Choice(alternatives))
            }
            _ => panic!("end_choice does not match the innermost open scope"),
        }
    }

    /// Close the current definition, attaching its result builder and
    /// optional failure hint.
    pub fn end_definition(mut self, builder: impl Fn(&BuildContext) -> TNode + 'static, hint: Option<&str>) -> Self {
        match self.scopes.pop().expect("end_definition without matching add_definition") {
            Scope::Definition { rule_name, def_name, steps } => {
                let definition = Definition {
                    name: def_name,
                    steps,
                    builder: Rc::new(builder) as ResultBuilder<TNode>,
                    hint: hint.map(str::to_string),
                };
                self.rules
                    .get_mut(&rule_name)
                    .expect("start_rule always creates the entry")
                    .push(definition);
                self
            }
            _ => panic!("end_definition does not match the innermost open scope"),
        }
    }

    /// Validate every `Rule(name, _)` reference (including inside nested
    /// `Repeat`/`Optional`/`Choice` steps) against the declared rule names,
    /// then freeze the table.
    pub fn build(self) -> Result<ASTRuleTable<TNode>, String> {
        if !self.scopes.is_empty() {
            return Err(format!("{} scope(s) left open before build()", self.scopes.len()));
        }
        for name in &self.top_rules {
            if !self.rules.contains_key(name) {
                return Err(format!("top rule '{}' is not declared", name));
            }
        }
        for (rule_name, definitions) in &self.rules {
            for definition in definitions {
                for step in &definition.steps {
                    validate_step(step, &self.rules, rule_name)?;
                }
            }
        }

        let rules = self
            .rules
            .into_iter()
            .map(|(name, definitions)| {
                (
                    name.clone(),
                    Rule {
                        name,
                        definitions,
                    },
                )
            })
            .collect();

        Ok(ASTRuleTable {
            top_rules: self.top_rules,
            ignore_comments: self.ignore_comments,
            rules,
        })
    }
}

fn validate_step<TNode>(
    step: &Step<TNode>,
    rules: &HashMap<String, Vec<Definition<TNode>>>,
    owner: &str,
) -> Result<(), String> {
    match step {
        Step::Rule(name, _) => {
            if !rules.contains_key(name) {
                return Err(format!(
                    "rule '{}' references undeclared rule '{}'",
                    owner, name
                ));
            }
            Ok(())
        }
        Step::Repeat(steps, _) | Step::Optional(steps, _) => {
            steps.iter().try_for_each(|s| validate_step(s, rules, owner))
        }
        Step::Choice(alternatives) => alternatives
            .iter()
            .flatten()
            .try_for_each(|s| validate_step(s, rules, owner)),
        _ => Ok(()),
    }
}
