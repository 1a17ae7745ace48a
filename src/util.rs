//! Little-endian byte helpers and the bit cursors shared by the codecs.

use crate::error::*;

/// Panics if `data` is shorter than 4 bytes.
pub fn read_u32_le(data: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&data[..4]);
    u32::from_le_bytes(buf)
}

/// Panics if `data` is shorter than 8 bytes.
pub fn read_u64_le(data: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&data[..8]);
    u64::from_le_bytes(buf)
}

/// Reads 0..=8 bytes as a zero-extended little-endian word.
pub fn read_bytes_le(bytes: &[u8]) -> u64 {
    debug_assert!(bytes.len() <= 8);
    let mut buf = [0u8; 8];
    buf[..bytes.len()].copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}

/// Panics if `out` is shorter than 8 bytes.
pub fn write_u64_le(out: &mut [u8], value: u64) {
    out[..8].copy_from_slice(&value.to_le_bytes());
}

/// Writes the low `out.len()` (0..=8) bytes of `value`.
pub fn write_bytes_le(out: &mut [u8], value: u64) {
    debug_assert!(out.len() <= 8);
    let n = out.len();
    out.copy_from_slice(&value.to_le_bytes()[..n]);
}

/// LSB-first bit source over a byte slice, refilled up to 8 bytes at a time.
/// Reads past the end yield zero bits without touching memory beyond the slice.
pub(crate) struct BitReader<'a> {
    data: &'a [u8],
    workspace: u64,
    // Valid low bits in `workspace`; everything above them is zero.
    available: u32,
}

impl<'a> BitReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            workspace: 0,
            available: 0,
        }
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.available == 0 && self.data.is_empty()
    }

    pub(crate) fn remaining_bytes(&self) -> usize {
        self.data.len()
    }

    /// Takes the next `need` (1..=61) bits, zero-padded at the end of input.
    pub(crate) fn take(&mut self, need: u32) -> u64 {
        debug_assert!((1..=61).contains(&need));
        let mask = (1u64 << need) - 1;

        if self.available >= need {
            let bits = self.workspace & mask;
            self.workspace >>= need;
            self.available -= need;
            return bits;
        }

        if self.data.is_empty() {
            let bits = self.workspace;
            self.workspace = 0;
            self.available = 0;
            return bits;
        }

        let n = self.data.len().min(8);
        let word = read_bytes_le(&self.data[..n]);
        self.data = &self.data[n..];

        let bits = (self.workspace | (word << self.available)) & mask;
        // 1..=61 bits of `word` went into this result.
        let used = need - self.available;
        self.workspace = word >> used;
        self.available = (self.available + 8 * n as u32).saturating_sub(need);
        bits
    }
}

/// LSB-first bit sink into a caller-provided byte slice.
pub(crate) struct BitWriter<'a> {
    out: &'a mut [u8],
    written: usize,
    workspace: u64,
    available: u32,
}

impl<'a> BitWriter<'a> {
    pub(crate) fn new(out: &'a mut [u8]) -> Self {
        Self {
            out,
            written: 0,
            workspace: 0,
            available: 0,
        }
    }

    /// Absolute index of the next bit to be written.
    pub(crate) fn position(&self) -> u64 {
        self.written as u64 * 8 + self.available as u64
    }

    /// Appends the low `count` (1..=61) bits of `value`.
    pub(crate) fn put(&mut self, value: u64, count: u32) -> Result<()> {
        debug_assert!((1..=61).contains(&count));
        let value = value & ((1u64 << count) - 1);

        self.workspace |= value << self.available;
        let total = self.available + count;
        if total < 64 {
            self.available = total;
            return Ok(());
        }

        let end = self.written + 8;
        if end > self.out.len() {
            return Err(Fp61Error::OutputTooSmall {
                needed: end,
                available: self.out.len(),
            });
        }
        write_u64_le(&mut self.out[self.written..end], self.workspace);
        self.written = end;

        // total >= 64 with count <= 61 means available >= 3 here.
        self.workspace = value >> (64 - self.available);
        self.available = total - 64;
        Ok(())
    }

    /// Sets a bit that was already written as zero.
    pub(crate) fn set_bit(&mut self, pos: u64) {
        debug_assert!(pos < self.position());
        let flushed = self.written as u64 * 8;
        if pos < flushed {
            self.out[(pos / 8) as usize] |= 1 << (pos % 8);
        } else {
            self.workspace |= 1 << (pos - flushed);
        }
    }

    /// Writes out any buffered bits, rounded up to whole bytes, and returns
    /// the total byte count.
    pub(crate) fn flush(&mut self) -> Result<usize> {
        let bytes = (self.available as usize + 7) / 8;
        let end = self.written + bytes;
        if end > self.out.len() {
            return Err(Fp61Error::OutputTooSmall {
                needed: end,
                available: self.out.len(),
            });
        }
        write_bytes_le(&mut self.out[self.written..end], self.workspace);
        self.written = end;
        self.workspace = 0;
        self.available = 0;
        Ok(self.written)
    }
}
