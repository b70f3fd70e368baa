//! Buffered streaming source reader.
//!
//! Streams characters from any [`Read`] through a fixed-size buffer,
//! decoding UTF-8 incrementally. Lookahead that would run past the bytes
//! read so far (for example probing for a `{{` whose second character sits
//! in the next chunk) transparently pulls more input instead of failing —
//! a template must tokenize identically whether it arrives in one piece
//! or dribbled across many reads.

use std::collections::VecDeque;
use std::io::Read;

use crate::error::LexError;

/// Size of the fixed read buffer in bytes.
pub(crate) const BUF_SIZE: usize = 4096;

/// A character stream over a [`Read`] source with arbitrary lookahead.
pub struct SourceReader<R> {
    inner: R,
    /// Fixed-size read buffer, refilled on demand.
    buf: [u8; BUF_SIZE],
    /// Bytes of an incomplete UTF-8 sequence carried across refills.
    carry: Vec<u8>,
    /// Decoded characters not yet consumed.
    pending: VecDeque<char>,
    /// Character offset of the next character to be consumed.
    pos: usize,
    eof: bool,
}

impl<R: Read> SourceReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: [0; BUF_SIZE],
            carry: Vec::new(),
            pending: VecDeque::new(),
            pos: 0,
            eof: false,
        }
    }

    /// Character offset from the start of the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Look at the next character without consuming it.
    pub fn peek(&mut self) -> Result<Option<char>, LexError> {
        self.peek_at(0)
    }

    /// Look at the character `offset` positions ahead without consuming,
    /// pulling more input as needed.
    pub fn peek_at(&mut self, offset: usize) -> Result<Option<char>, LexError> {
        while self.pending.len() <= offset {
            if !self.fill()? {
                return Ok(None);
            }
        }
        Ok(self.pending.get(offset).copied())
    }

    /// Returns `true` if the upcoming characters are exactly `probe`.
    pub fn starts_with(&mut self, probe: &str) -> Result<bool, LexError> {
        for (i, expected) in probe.chars().enumerate() {
            if self.peek_at(i)? != Some(expected) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Consume and return one character.
    pub fn bump(&mut self) -> Result<Option<char>, LexError> {
        let ch = self.peek()?;
        if ch.is_some() {
            self.pending.pop_front();
            self.pos += 1;
        }
        Ok(ch)
    }

    /// Returns `true` once every character has been consumed.
    pub fn at_end(&mut self) -> Result<bool, LexError> {
        Ok(self.peek()?.is_none())
    }

    /// Read one chunk from the underlying source and decode it into the
    /// pending queue. Returns `false` once the source is exhausted and no
    /// further characters can be produced.
    fn fill(&mut self) -> Result<bool, LexError> {
        if self.eof {
            return Ok(false);
        }
        let n = self.inner.read(&mut self.buf)?;
        if n == 0 {
            self.eof = true;
            // A trailing partial sequence can never complete.
            if !self.carry.is_empty() {
                self.pending.push_back(char::REPLACEMENT_CHARACTER);
                self.carry.clear();
                return Ok(true);
            }
            return Ok(false);
        }
        self.carry.extend_from_slice(&self.buf[..n]);
        self.decode_carry();
        Ok(true)
    }

    /// Decode the valid UTF-8 prefix of `carry` into `pending`, keeping an
    /// incomplete trailing sequence for the next refill and replacing
    /// outright invalid bytes.
    fn decode_carry(&mut self) {
        loop {
            match std::str::from_utf8(&self.carry) {
                Ok(s) => {
                    self.pending.extend(s.chars());
                    self.carry.clear();
                    return;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    if let Ok(s) = std::str::from_utf8(&self.carry[..valid]) {
                        self.pending.extend(s.chars());
                    }
                    match e.error_len() {
                        Some(bad) => {
                            self.pending.push_back(char::REPLACEMENT_CHARACTER);
                            self.carry.drain(..valid + bad);
                        }
                        None => {
                            // Incomplete sequence at the end of the chunk.
                            self.carry.drain(..valid);
                            return;
                        }
                    }
                }
            }
        }
    }
}
