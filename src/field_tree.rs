//! A byte-trie used to longest-match a set of fixed-string literals
//! (keywords, operators, delimiters) in a single pass, grounded on the
//! teacher crate's `FieldTree`/`Punctuations` lexeme.

pub struct FieldTree<TToken> {
    token: Option<TToken>,
    children: Vec<(u8, FieldTree<TToken>)>,
}

impl<TToken> FieldTree<TToken> {
    pub fn new() -> Self {
        Self {
            token: None,
            children: Vec::new(),
        }
    }

    pub fn insert(&mut self, value: &[u8], token: TToken) -> Result<(), TToken> {
        if !value.is_empty() {
            match self
                .children
                .binary_search_by_key(&value[0], |child| child.0)
            {
                Ok(index) => self.children[index].1.insert(&value[1..], token),
                Err(index) => {
                    let mut field = FieldTree::new();
                    field.insert(&value[1..], token)?;
                    self.children.insert(index, (value[0], field));
                    Ok(())
                }
            }
        } else {
            match self.token.replace(token) {
                Some(t) => Err(t),
                None => Ok(()),
            }
        }
    }
}

impl<TToken: Clone> FieldTree<TToken> {
    /// Walk `code_part` as far as the trie allows, remembering the deepest
    /// node along the path that actually terminates a stored literal. This is
    /// not simply "the node where the walk stops": a stored value can be a
    /// strict prefix of another (`"<"` and `"<="` both inserted), so the walk
    /// may continue past a valid match in search of a longer one and must
    /// fall back to the last valid match if it doesn't pan out.
    pub fn find(&self, code_part: &[u8]) -> Option<(TToken, usize)> {
        let mut current = self;
        let mut index = 0;
        let mut best: Option<(TToken, usize)> = current.token.clone().map(|t| (t, 0));

        while index < code_part.len() {
            match current
                .children
                .binary_search_by_key(&code_part[index], |s| s.0)
            {
                Ok(i) => {
                    index += 1;
                    current = &current.children[i].1;
                    if let Some(t) = current.token.clone() {
                        best = Some((t, index));
                    }
                }
                Err(_) => break,
            }
        }

        best
    }
}
