//! The token post-processor (C4): type-keyed transformations applied to
//! tokens produced by the tokenizer.

use crate::Token;
use std::collections::HashMap;
use std::rc::Rc;

/// A `Token -> Token` transformation. The documented precondition is
/// that it preserves the token's variant; [`PostProcessor::apply`] does not
/// re-check this, matching the teacher crate's stance that lexeme/production
/// closures are trusted collaborators, not re-validated inputs.
pub type Transform = Rc<dyn Fn(Token) -> Token>;

/// An immutable, ordered mapping from a token's type key to the list of
/// transformations to thread it through.
#[derive(Clone, Default)]
pub struct PostProcessor {
    transforms: HashMap<String, Vec<Transform>>,
}

impl PostProcessor {
    pub fn builder() -> PostProcessorBuilder {
        PostProcessorBuilder::new()
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Apply every registered transformation for `token`'s type key, in
    /// registration order. A key with no transformations (including tokens
    /// with no type key at all, like `Start`/`End`) is a no-op.
    pub fn apply(&self, token: Token) -> Token {
        match token.type_key() {
            Some(key) => match self.transforms.get(key) {
                Some(chain) => chain.iter().fold(token, |t, f| f(t)),
                None => token,
            },
            None => token,
        }
    }
}

/// Accumulates type-keyed transformations; `build()` produces an immutable
/// [`PostProcessor`].
#[derive(Default)]
pub struct PostProcessorBuilder {
    transforms: HashMap<String, Vec<Transform>>,
}

impl PostProcessorBuilder {
    pub fn new() -> Self {
        Self {
            transforms: HashMap::new(),
        }
    }

    fn register(mut self, key: &str, transform: Transform) -> Self {
        self.transforms
            .entry(key.to_string())
            .or_insert_with(Vec::new)
            .push(transform);
        self
    }

    pub fn keyword(self, transform: impl Fn(Token) -> Token + 'static) -> Self {
        self.register("keyword", Rc::new(transform))
    }

    pub fn operator(self, transform: impl Fn(Token) -> Token + 'static) -> Self {
        self.register("operator", Rc::new(transform))
    }

    pub fn delimiter(self, transform: impl Fn(Token) -> Token + 'static) -> Self {
        self.register("delimiter", Rc::new(transform))
    }

    pub fn comment(self, transform: impl Fn(Token) -> Token + 'static) -> Self {
        self.register("comment", Rc::new(transform))
    }

    pub fn literal(self, type_key: &str, transform: impl Fn(Token) -> Token + 'static) -> Self {
        self.register(type_key, Rc::new(transform))
    }

    pub fn identifier(self, type_key: &str, transform: impl Fn(Token) -> Token + 'static) -> Self {
        self.register(type_key, Rc::new(transform))
    }

    pub fn build(self) -> PostProcessor {
        PostProcessor {
            transforms: self.transforms,
        }
    }
}
