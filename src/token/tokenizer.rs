//! The incremental tokenizer: drives the decoder one byte at a time and
//! merges consecutive same-category codepoints into maximal tokens.

use std::collections::VecDeque;
use std::io::{self, BufRead};

use crate::category::{classify, TokenCategory};
use crate::decoder::{Codepoint, DecodeResult, Decoder};

use super::{Token, TokenStream};

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::category::TokenCategory::*;

    /// The (category, text) outline of a stream, for compact comparisons.
    fn outline(stream: &TokenStream) -> Vec<(TokenCategory, String)> {
        stream
            .iter()
            .map(|token| (token.category(), token.text()))
            .collect()
    }

    #[test]
    fn single_word() {
        let stream = tokenize(b"cat");
        assert_eq!(outline(&stream), [(LatinWord, "cat".into())]);
    }

    #[test]
    fn words_and_whitespace() {
        let stream = tokenize(b"cat dog");
        assert_eq!(
            outline(&stream),
            [
                (LatinWord, "cat".into()),
                (Whitespace, " ".into()),
                (LatinWord, "dog".into()),
            ]
        );
    }

    #[test]
    fn cyrillic_word() {
        let stream = tokenize("кот".as_bytes());
        assert_eq!(outline(&stream), [(CyrillicWord, "кот".into())]);
        assert_eq!(stream[0].codepoints().len(), 3);
        assert_eq!(stream[0].byte_len(), 6);
    }

    #[test]
    fn number_then_word() {
        let stream = tokenize(b"12a");
        assert_eq!(
            outline(&stream),
            [(Number, "12".into()), (LatinWord, "a".into())]
        );
    }

    #[test]
    fn truncated_codepoint_at_end() {
        let stream = tokenize(b"\xD0");
        assert_eq!(stream.len(), 1);
        assert_eq!(stream[0].category(), Unknown);
        assert_eq!(stream[0].to_bytes(), [0xD0]);
        // the trailing unit also closes out an in-progress token
        let stream = tokenize(b"a\xD0");
        assert_eq!(stream.len(), 2);
        assert_eq!(stream[0].category(), LatinWord);
        assert_eq!(stream[1].category(), Unknown);
        assert_eq!(stream[1].to_bytes(), [0xD0]);
    }

    #[test]
    fn adjacent_newlines_merge() {
        let stream = tokenize(b"a\n\nb");
        assert_eq!(
            outline(&stream),
            [
                (LatinWord, "a".into()),
                (Newline, "\n\n".into()),
                (LatinWord, "b".into()),
            ]
        );
        assert_eq!(stream[1].codepoints().len(), 2);
    }

    #[test]
    fn invalid_bytes_become_unknown_tokens() {
        let stream = tokenize(b"a\xFFb");
        assert_eq!(stream.len(), 3);
        assert_eq!(stream[1].category(), Unknown);
        assert_eq!(stream[1].to_bytes(), [0xFF]);
        // consecutive invalid bytes merge like any other run
        let stream = tokenize(b"\xFF\xFE");
        assert_eq!(stream.len(), 1);
        assert_eq!(stream[0].category(), Unknown);
        assert_eq!(stream[0].to_bytes(), [0xFF, 0xFE]);
    }

    #[test]
    fn mixed_scripts() {
        let stream = tokenize("кот и cat — №5".as_bytes());
        assert_eq!(
            outline(&stream),
            [
                (CyrillicWord, "кот".into()),
                (Whitespace, " ".into()),
                (CyrillicWord, "и".into()),
                (Whitespace, " ".into()),
                (LatinWord, "cat".into()),
                (Whitespace, " ".into()),
                (Punctuation, "—".into()),
                (Whitespace, " ".into()),
                (Punctuation, "№".into()),
                (Number, "5".into()),
            ]
        );
    }

    #[test]
    fn push_byte_returns_the_sealed_token() {
        let mut tokenizer = Tokenizer::new();
        assert_eq!(tokenizer.push_byte(b'a'), None);
        let sealed = tokenizer.push_byte(b' ').unwrap();
        assert_eq!((sealed.category(), sealed.text()), (LatinWord, "a".into()));
        let sealed = tokenizer.push_byte(b'b').unwrap();
        assert_eq!(sealed.category(), Whitespace);
        assert_eq!(outline(&tokenizer.finish()), [(LatinWord, "b".into())]);
    }

    #[test]
    fn empty_input() {
        assert_eq!(tokenize(b""), TokenStream::new());
        assert_eq!(Tokenizer::new().finish(), TokenStream::new());
    }

    // concatenating the bytes of all tokens reproduces the input exactly
    #[test]
    fn lossless_partition() {
        let input: &[u8] = b"cat 12 \xD0\xBA\xD0\xBE\xD1\x82\xFF\t\n \xC2\xA0!\xD0";
        let stream = tokenize(input);
        let bytes = stream
            .iter()
            .flat_map(Token::to_bytes)
            .collect::<Vec<u8>>();
        assert_eq!(bytes, input);
    }

    // no two adjacent tokens share a category, and no token is empty
    #[test]
    fn maximality() {
        let mut input = "a1 2b,,«word»\n\nкotё".as_bytes().to_vec();
        input.extend([0xFF, 0xFF]);
        let stream = tokenize(&input);
        for token in &stream {
            assert!(!token.codepoints().is_empty());
        }
        for pair in stream.windows(2) {
            assert_ne!(pair[0].category(), pair[1].category());
        }
    }

    #[test]
    fn determinism() {
        let input = "12 котов и ещё — «3 dogs»…\n".as_bytes();
        assert_eq!(tokenize(input), tokenize(input));
    }

    #[test]
    fn reader_matches_push_based_tokenization() {
        let mut input = "кот и cat, 12".as_bytes().to_vec();
        input.extend([0xFF, b'\n', 0xD0]);
        let streamed = Tokens::new(&input[..])
            .collect::<Result<TokenStream, Error>>()
            .unwrap();
        assert_eq!(streamed, tokenize(&input));
    }
}

/// The incremental tokenizer.
///
/// Bytes are fed one at a time with [`push_byte`](Tokenizer::push_byte);
/// [`finish`](Tokenizer::finish) seals the stream. A `Tokenizer` owns its
/// decoder and the in-progress token exclusively, so a single instance must
/// not be driven from two threads at once.
#[derive(Debug, Default)]
pub struct Tokenizer {
    decoder: Decoder,
    current: Option<Token>,
}

impl Tokenizer {
    /// Creates a new `Tokenizer`.
    pub fn new() -> Tokenizer {
        Tokenizer::default()
    }

    /// Feeds one byte. Returns the sealed token if this byte completed a
    /// codepoint that closed out the previous token.
    pub fn push_byte(&mut self, byte: u8) -> Option<Token> {
        match self.decoder.feed(byte) {
            DecodeResult::Incomplete => None,
            DecodeResult::Complete(cp) => self.step(cp, classify(cp)),
            // an invalid lead byte enters the stream as a malformed unit
            // rather than being silently absorbed
            DecodeResult::Invalid(cp) => self.step(cp, TokenCategory::Unknown),
        }
    }

    /// Feeds a batch of bytes, appending any sealed tokens to `out`.
    pub fn push_bytes(&mut self, bytes: &[u8], out: &mut TokenStream) {
        for &byte in bytes {
            out.extend(self.push_byte(byte));
        }
    }

    /// Seals the stream at end of input: a partial trailing codepoint (if
    /// any) enters the stream as an `Unknown` unit, then the in-progress
    /// token is sealed. Returns zero, one, or two tokens -- two when the
    /// trailing unit closes out a token of another category.
    pub fn finish(mut self) -> TokenStream {
        let mut out = TokenStream::new();
        if let Some(cp) = self.decoder.finish() {
            out.extend(self.step(cp, TokenCategory::Unknown));
        }
        out.extend(self.current.take());
        out
    }

    /// The merge step: appends `cp` to the current token if its category
    /// matches, otherwise seals the current token and starts a new one.
    fn step(&mut self, cp: Codepoint, category: TokenCategory) -> Option<Token> {
        match &mut self.current {
            Some(token) if token.category() == category => {
                token.push(cp);
                None
            }
            current => current.replace(Token::new(category, cp)),
        }
    }
}

/// Tokenizes a complete in-memory input.
pub fn tokenize(input: &[u8]) -> TokenStream {
    let mut tokenizer = Tokenizer::new();
    let mut out = TokenStream::new();
    tokenizer.push_bytes(input, &mut out);
    out.extend(tokenizer.finish());
    out
}

/// An `Iterator` that produces the tokens found in a `BufRead`.
///
/// Yields `Err` once and then ends if the underlying reader fails; the
/// tokenizing itself never fails.
#[derive(Debug)]
pub struct Tokens<R> {
    input: R,
    tokenizer: Option<Tokenizer>,
    pending: VecDeque<Token>,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(input: R) -> Tokens<R> {
        Tokens {
            input,
            tokenizer: Some(Tokenizer::new()),
            pending: VecDeque::new(),
        }
    }
}

impl<R: BufRead> Iterator for Tokens<R> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Result<Token, Error>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(Ok(token));
            }
            // the tokenizer is gone once the stream is drained or the reader
            // has failed
            self.tokenizer.as_ref()?;
            let len = match self.input.fill_buf() {
                Ok(buf) if buf.is_empty() => {
                    // end of input: drain the trailing tokens
                    if let Some(tokenizer) = self.tokenizer.take() {
                        self.pending.extend(tokenizer.finish());
                    }
                    continue;
                }
                Ok(buf) => {
                    if let Some(tokenizer) = self.tokenizer.as_mut() {
                        for &byte in buf {
                            if let Some(token) = tokenizer.push_byte(byte) {
                                self.pending.push_back(token);
                            }
                        }
                    }
                    buf.len()
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.tokenizer = None;
                    return Some(Err(err.into()));
                }
            };
            self.input.consume(len);
        }
    }
}

/// An error encountered while streaming tokens from a reader.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The specified IO error occurred.
    #[error(transparent)]
    IO(#[from] io::Error),
}
