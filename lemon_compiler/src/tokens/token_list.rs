//! Owned, mutable token sequence

use super::token::Token;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Ordered token collection supporting in-place replacement and range moves
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Token> {
        self.tokens.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Token> {
        self.tokens.iter_mut()
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn insert(&mut self, index: usize, token: Token) {
        self.tokens.insert(index, token);
    }

    /// Remove and return the token at `index`
    pub fn erase(&mut self, index: usize) -> Token {
        self.tokens.remove(index)
    }

    /// Put `token` at `index`, returning the token previously there
    pub fn replace_at(&mut self, index: usize, token: Token) -> Token {
        std::mem::replace(&mut self.tokens[index], token)
    }

    /// Detach `count` tokens starting at `start` into a new list
    pub fn move_range(&mut self, start: usize, count: usize) -> TokenList {
        TokenList {
            tokens: self.tokens.drain(start..start + count).collect(),
        }
    }

    /// Insert every token of `other` starting at `index`, keeping their order
    pub fn splice(&mut self, index: usize, other: impl IntoIterator<Item = Token>) {
        self.tokens.splice(index..index, other);
    }

    /// Take all tokens, leaving the list empty
    pub fn take(&mut self) -> TokenList {
        std::mem::take(self)
    }

    pub fn into_vec(self) -> Vec<Token> {
        self.tokens
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl IndexMut<usize> for TokenList {
    fn index_mut(&mut self, index: usize) -> &mut Token {
        &mut self.tokens[index]
    }
}

impl From<Vec<Token>> for TokenList {
    fn from(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }
}

impl FromIterator<Token> for TokenList {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for TokenList {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::Operator;

    fn ident(name: &str) -> Token {
        Token::Identifier(name.to_string())
    }

    #[test]
    fn test_move_range_detaches_tokens() {
        let mut list: TokenList = vec![ident("a"), ident("b"), ident("c"), ident("d")].into();
        let moved = list.move_range(1, 2);

        assert_eq!(moved.len(), 2);
        assert_eq!(moved[0], ident("b"));
        assert_eq!(list.len(), 2);
        assert_eq!(list[1], ident("d"));
    }

    #[test]
    fn test_replace_erase_splice() {
        let mut list: TokenList = vec![ident("a"), Token::Operator(Operator::BinaryPlus)].into();

        let old = list.replace_at(0, ident("z"));
        assert_eq!(old, ident("a"));

        list.splice(1, vec![ident("x"), ident("y")]);
        assert_eq!(list.len(), 4);
        assert_eq!(list[2], ident("y"));

        assert_eq!(list.erase(3), Token::Operator(Operator::BinaryPlus));
        assert_eq!(list.take().len(), 3);
        assert!(list.is_empty());
    }
}
