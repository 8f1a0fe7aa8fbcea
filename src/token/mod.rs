use std::fmt;

use crate::category::TokenCategory;
use crate::decoder::Codepoint;

pub mod tokenizer;

/// The ordered sequence of tokens produced from an input.
pub type TokenStream = Vec<Token>;

/// A maximal run of consecutive codepoints sharing one category.
///
/// A token is never empty, and the codepoint immediately before and after it
/// in the stream (if any) belong to a different category. Concatenating the
/// bytes of all tokens of a stream, in order, reproduces the input exactly.
#[derive(Clone, Eq, PartialEq)]
pub struct Token {
    category: TokenCategory,
    codepoints: Vec<Codepoint>,
    byte_len: usize,
}

impl Token {
    /// Starts a new token of the given category, containing one codepoint.
    pub(crate) fn new(category: TokenCategory, cp: Codepoint) -> Token {
        Token {
            category,
            codepoints: vec![cp],
            byte_len: cp.len(),
        }
    }

    /// Appends a codepoint. The caller checks that its category matches.
    pub(crate) fn push(&mut self, cp: Codepoint) {
        self.byte_len += cp.len();
        self.codepoints.push(cp);
    }

    pub fn category(&self) -> TokenCategory {
        self.category
    }

    /// The token's codepoints, in input order.
    pub fn codepoints(&self) -> &[Codepoint] {
        &self.codepoints
    }

    /// Total length of the token's raw bytes.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// The token's raw bytes, concatenated in input order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.byte_len);
        for cp in &self.codepoints {
            bytes.extend_from_slice(cp.as_bytes());
        }
        bytes
    }

    /// The token's content as text. Malformed units are rendered with the
    /// replacement character.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.to_bytes()).into_owned()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}:{:?}", self.category, self.text())
    }
}
