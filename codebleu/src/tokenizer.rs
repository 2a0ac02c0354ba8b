//! Source tokenization for similarity scoring.
//!
//! Comments are stripped by plain text substitution, then the remaining text is
//! split into word runs and single non-whitespace symbols. Every token is
//! lower-cased, so all downstream comparisons are case-insensitive.

use crate::constants::{COMMENT_RE, IDENTIFIER_RE, TOKEN_RE};
use rustc_hash::FxHashSet;
use std::borrow::Cow;

/// An ordered, immutable sequence of normalized tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence {
    tokens: Vec<String>,
}

impl TokenSequence {
    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the source produced no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens in source order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    /// Iterate over tokens in source order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Distinct tokens.
    #[must_use]
    pub fn distinct(&self) -> FxHashSet<&str> {
        self.iter().collect()
    }

    /// Distinct identifier-shaped tokens that are not in `keywords`.
    #[must_use]
    pub fn identifiers(&self, keywords: &FxHashSet<String>) -> FxHashSet<&str> {
        self.iter()
            .filter(|tok| is_identifier(tok) && !keywords.contains(*tok))
            .collect()
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Remove `#` / `//` line comments and `/* */` block comments.
///
/// Not string-literal aware: a comment marker inside a string still starts a comment.
#[must_use]
pub fn strip_comments(text: &str) -> Cow<'_, str> {
    COMMENT_RE().replace_all(text, "")
}

/// Tokenize source text into a lower-cased [`TokenSequence`].
#[must_use]
pub fn tokenize(text: &str) -> TokenSequence {
    let stripped = strip_comments(text);
    let tokens = TOKEN_RE()
        .find_iter(&stripped)
        .map(|m| m.as_str().to_lowercase())
        .collect();
    TokenSequence { tokens }
}

/// Whether a token has identifier shape (word run not starting with a digit).
#[must_use]
pub fn is_identifier(token: &str) -> bool {
    IDENTIFIER_RE().is_match(token)
}
