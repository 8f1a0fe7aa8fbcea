use std::fmt;

use crate::decoder::Codepoint;

#[test]
fn classify_ascii() {
    assert_eq!(classify('a'.into()), TokenCategory::LatinWord);
    assert_eq!(classify('Z'.into()), TokenCategory::LatinWord);
    assert_eq!(classify('5'.into()), TokenCategory::Number);
    assert_eq!(classify(' '.into()), TokenCategory::Whitespace);
    assert_eq!(classify('\n'.into()), TokenCategory::Newline);
    assert_eq!(classify(','.into()), TokenCategory::Punctuation);
    assert_eq!(classify('~'.into()), TokenCategory::Punctuation);
    // outside the enumerated tables, not defaulted to punctuation
    assert_eq!(classify('\t'.into()), TokenCategory::Unknown);
    assert_eq!(classify('\x7F'.into()), TokenCategory::Unknown);
}

#[test]
fn classify_cyrillic() {
    for c in ['А', 'Я', 'а', 'я', 'к', 'Ё', 'ё'] {
        assert_eq!(classify(c.into()), TokenCategory::CyrillicWord);
    }
    // Џ sits just below the А–я block
    assert_eq!(classify('Џ'.into()), TokenCategory::Unknown);
    // ѐ sits between я and ё
    assert_eq!(classify('ѐ'.into()), TokenCategory::Unknown);
}

#[test]
fn classify_typography() {
    for c in ['«', '»', '·', '№', '—', '–', '“', '”', '…'] {
        assert_eq!(classify(c.into()), TokenCategory::Punctuation);
    }
    assert_eq!(classify('\u{A0}'.into()), TokenCategory::Whitespace);
    // ends of the general-punctuation span
    assert_eq!(classify('\u{2010}'.into()), TokenCategory::Punctuation);
    assert_eq!(classify('\u{2026}'.into()), TokenCategory::Punctuation);
    assert_eq!(classify('\u{2027}'.into()), TokenCategory::Unknown);
}

#[test]
fn classify_unknown() {
    assert_eq!(classify('€'.into()), TokenCategory::Unknown);
    assert_eq!(classify('💬'.into()), TokenCategory::Unknown);
    // a truncated unit never matches a table entry
    assert_eq!(
        classify(Codepoint::from_bytes(&[0xD0])),
        TokenCategory::Unknown
    );
}

/// The lexical class assigned to a codepoint. Every codepoint maps to
/// exactly one category, so the tokenizer has no error path for
/// classification.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenCategory {
    /// A space or no-break space.
    Whitespace,
    /// A line feed.
    Newline,
    /// A basic Latin letter.
    LatinWord,
    /// A decimal digit.
    Number,
    /// A Cyrillic letter.
    CyrillicWord,
    /// An ASCII or Cyrillic-typography punctuation mark.
    Punctuation,
    /// Anything else, including malformed byte sequences.
    Unknown,
}

impl TokenCategory {
    /// Returns whether tokens of this category carry word content.
    pub fn is_word(&self) -> bool {
        matches!(self, TokenCategory::LatinWord | TokenCategory::CyrillicWord)
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A contiguous span of scalar values sharing one category.
struct ClassRange {
    start: u32,
    end: u32,
    category: TokenCategory,
}

/// The classified scalar spans, sorted by `start` and disjoint.
#[rustfmt::skip]
const RANGES: &[ClassRange] = &[
    ClassRange { start: 0x0A, end: 0x0A, category: TokenCategory::Newline },
    ClassRange { start: 0x20, end: 0x20, category: TokenCategory::Whitespace },
    ClassRange { start: 0x21, end: 0x2F, category: TokenCategory::Punctuation },
    ClassRange { start: 0x30, end: 0x39, category: TokenCategory::Number },
    ClassRange { start: 0x3A, end: 0x40, category: TokenCategory::Punctuation },
    ClassRange { start: 0x41, end: 0x5A, category: TokenCategory::LatinWord },
    ClassRange { start: 0x5B, end: 0x60, category: TokenCategory::Punctuation },
    ClassRange { start: 0x61, end: 0x7A, category: TokenCategory::LatinWord },
    ClassRange { start: 0x7B, end: 0x7E, category: TokenCategory::Punctuation },
    // U+00A0 no-break space
    ClassRange { start: 0xC2A0, end: 0xC2A0, category: TokenCategory::Whitespace },
    // Ё
    ClassRange { start: 0xD081, end: 0xD081, category: TokenCategory::CyrillicWord },
    // А–я
    ClassRange { start: 0xD090, end: 0xD18F, category: TokenCategory::CyrillicWord },
    // ё
    ClassRange { start: 0xD191, end: 0xD191, category: TokenCategory::CyrillicWord },
    // U+2010–U+2026: hyphen and dash variants, quotation variants, bullet,
    // ellipsis
    ClassRange { start: 0xE2_8090, end: 0xE2_80A6, category: TokenCategory::Punctuation },
];

/// Punctuation marks outside the contiguous spans, sorted: « · » №
const PUNCTUATION_MARKS: &[u32] = &[0xC2AB, 0xC2B7, 0xC2BB, 0xE2_8496];

/// Classifies a codepoint by looking its scalar up in the fixed tables.
pub fn classify(cp: Codepoint) -> TokenCategory {
    let scalar = cp.scalar();
    if PUNCTUATION_MARKS.binary_search(&scalar).is_ok() {
        return TokenCategory::Punctuation;
    }
    // the last range starting at or before `scalar` is the only candidate
    let candidate = RANGES.partition_point(|range| range.start <= scalar);
    match candidate.checked_sub(1).map(|i| &RANGES[i]) {
        Some(range) if scalar <= range.end => range.category,
        _ => TokenCategory::Unknown,
    }
}
