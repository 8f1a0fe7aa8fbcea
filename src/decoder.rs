//! An incremental UTF-8 decoder which assembles codepoints one byte at a time.

use std::fmt;

#[test]
fn ascii_byte() {
    let mut decoder = Decoder::new();
    let cp = Codepoint::from('a');
    assert_eq!(decoder.feed(b'a'), DecodeResult::Complete(cp));
    assert_eq!(cp.len(), 1);
    assert_eq!(cp.scalar(), 0x61);
}

#[test]
fn two_byte_sequence() {
    let mut decoder = Decoder::new();
    assert_eq!(decoder.feed(0xD0), DecodeResult::Incomplete);
    assert_eq!(
        decoder.feed(0x90),
        DecodeResult::Complete(Codepoint::from('А'))
    );
}

#[test]
fn four_byte_sequence() {
    let mut decoder = Decoder::new();
    assert_eq!(decoder.feed(0xF0), DecodeResult::Incomplete);
    assert_eq!(decoder.feed(0x9F), DecodeResult::Incomplete);
    assert_eq!(decoder.feed(0x98), DecodeResult::Incomplete);
    let cp = match decoder.feed(0x80) {
        DecodeResult::Complete(cp) => cp,
        other => panic!("expected a complete codepoint, got {other:?}"),
    };
    assert_eq!(cp.as_bytes(), [0xF0, 0x9F, 0x98, 0x80]);
    assert_eq!(cp.scalar(), 0xF09F_9880);
}

#[test]
fn invalid_lead_byte_resets() {
    let mut decoder = Decoder::new();
    // a stray continuation byte cannot start a codepoint
    assert_eq!(
        decoder.feed(0x90),
        DecodeResult::Invalid(Codepoint::from_bytes(&[0x90]))
    );
    // a `11111xxx` byte matches no length signature
    assert_eq!(
        decoder.feed(0xFF),
        DecodeResult::Invalid(Codepoint::from_bytes(&[0xFF]))
    );
    // the decoder is ready for the next codepoint immediately
    assert_eq!(decoder.feed(b'a'), DecodeResult::Complete(Codepoint::from('a')));
}

#[test]
fn finish_drains_partial_codepoint() {
    let mut decoder = Decoder::new();
    assert_eq!(decoder.feed(0xD0), DecodeResult::Incomplete);
    assert_eq!(decoder.finish(), Some(Codepoint::from_bytes(&[0xD0])));
    assert_eq!(decoder.finish(), None);
    // a drained decoder accepts fresh input
    assert_eq!(decoder.feed(b'x'), DecodeResult::Complete(Codepoint::from('x')));
}

/// A single decoded UTF-8 codepoint: its raw bytes and their declared length.
///
/// A codepoint assembled from a malformed or truncated sequence is still
/// representable; its bytes are whatever the decoder gathered.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Codepoint {
    bytes: [u8; 4],
    len: u8,
}

impl Codepoint {
    /// Creates a `Codepoint` holding the given bytes.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is empty or longer than four bytes.
    pub fn from_bytes(bytes: &[u8]) -> Codepoint {
        if bytes.is_empty() || bytes.len() > 4 {
            panic!("codepoint of {} bytes", bytes.len());
        }
        let mut buf = [0; 4];
        buf[..bytes.len()].copy_from_slice(bytes);
        Codepoint {
            bytes: buf,
            len: bytes.len() as u8,
        }
    }

    /// The codepoint's bytes, in input order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// The number of bytes in the codepoint.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// The codepoint's bytes read as a big-endian integer of its declared
    /// length. This is the key the classification tables are indexed by.
    pub fn scalar(&self) -> u32 {
        self.as_bytes()
            .iter()
            .fold(0, |acc, &byte| (acc << 8) | u32::from(byte))
    }
}

impl From<char> for Codepoint {
    /// Generates a `Codepoint` corresponding to the given `char`.
    fn from(c: char) -> Codepoint {
        let mut buf = [0; 4];
        let len = c.encode_utf8(&mut buf).len();
        Codepoint {
            bytes: buf,
            len: len as u8,
        }
    }
}

impl fmt::Debug for Codepoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Codepoint({:#X})", self.scalar())
    }
}

/// The outcome of feeding one byte to a [`Decoder`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeResult {
    /// More bytes are needed to complete the current codepoint.
    Incomplete,
    /// This byte completed a codepoint.
    Complete(Codepoint),
    /// This byte cannot start a codepoint: a stray continuation byte, or a
    /// `11111xxx` byte matching no length signature. The offending byte is
    /// carried as a one-byte malformed unit so the caller can account for it.
    Invalid(Codepoint),
}

/// Incremental UTF-8 decoder. Holds at most one in-progress codepoint; the
/// internal buffer never grows past four bytes, and an invalid lead byte
/// leaves the decoder ready for the next one.
#[derive(Debug, Default)]
pub struct Decoder {
    buf: [u8; 4],
    gathered: u8,
    expected: u8,
}

/// The total length of a codepoint, determined by its lead byte, or `None`
/// if the byte cannot lead a codepoint.
fn expected_len(byte: u8) -> Option<u8> {
    if byte & 0x80 == 0x00 {
        Some(1)
    } else if byte & 0xE0 == 0xC0 {
        Some(2)
    } else if byte & 0xF0 == 0xE0 {
        Some(3)
    } else if byte & 0xF8 == 0xF0 {
        Some(4)
    } else {
        None
    }
}

impl Decoder {
    /// Creates a new, empty `Decoder`.
    pub fn new() -> Decoder {
        Decoder::default()
    }

    /// Feeds one byte to the decoder.
    pub fn feed(&mut self, byte: u8) -> DecodeResult {
        if self.gathered == 0 {
            match expected_len(byte) {
                Some(len) => self.expected = len,
                None => return DecodeResult::Invalid(Codepoint::from_bytes(&[byte])),
            }
        }
        self.buf[self.gathered as usize] = byte;
        self.gathered += 1;
        if self.gathered == self.expected {
            let cp = Codepoint::from_bytes(&self.buf[..self.gathered as usize]);
            self.gathered = 0;
            DecodeResult::Complete(cp)
        } else {
            DecodeResult::Incomplete
        }
    }

    /// Drains a partial codepoint left over at the end of the stream, as a
    /// malformed unit. Returns `None` if the decoder is between codepoints.
    pub fn finish(&mut self) -> Option<Codepoint> {
        if self.gathered == 0 {
            return None;
        }
        let cp = Codepoint::from_bytes(&self.buf[..self.gathered as usize]);
        self.gathered = 0;
        Some(cp)
    }
}
