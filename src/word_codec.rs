//! Packing of canonical field elements, 61 bits each, with no ambiguity
//! handling. Both sides must agree on the element count.

use crate::config::*;
use crate::error::*;
use crate::util::{BitReader, BitWriter};
use log::trace;

pub struct WordWriter<'a> {
    bits: BitWriter<'a>,
    words: usize,
}

impl<'a> WordWriter<'a> {
    pub fn new(out: &'a mut [u8]) -> Self {
        Self {
            bits: BitWriter::new(out),
            words: 0,
        }
    }

    pub fn bytes_needed(words: usize) -> usize {
        (words * WORD_BITS as usize + 7) / 8
    }

    pub fn write(&mut self, value: u64) -> Result<()> {
        if value >= PRIME {
            return Err(Fp61Error::NotCanonical { value });
        }
        self.words += 1;
        self.bits.put(value, WORD_BITS)
    }

    /// Returns the total bytes written.
    pub fn flush(&mut self) -> Result<usize> {
        let bytes = self.bits.flush()?;
        trace!("word writer: {} words in {} bytes", self.words, bytes);
        Ok(bytes)
    }
}

pub struct WordReader<'a> {
    bits: BitReader<'a>,
}

impl<'a> WordReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            bits: BitReader::new(data),
        }
    }

    /// Number of whole elements stored in `bytes` bytes.
    pub fn word_count(bytes: usize) -> usize {
        bytes * 8 / WORD_BITS as usize
    }

    /// Next 61-bit element. Does not detect the end of input: past it, the
    /// result is zero-padded.
    pub fn read(&mut self) -> u64 {
        self.bits.take(WORD_BITS)
    }
}
