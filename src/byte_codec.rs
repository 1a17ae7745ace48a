//! Lossless conversion between arbitrary bytes and field elements.
//!
//! Input bytes are read as a little-endian bit stream and cut into 61-bit
//! candidates. A candidate whose bits #60..#1 are all set is either p-1 or
//! the all-ones pattern p, which is not a field element. Both are emitted as
//! [`AMBIGUITY`] and the candidate's low bit is carried into bit #0 of the
//! next element, which then takes only 60 fresh bits from the stream.
//! [`ByteWriter`] undoes this exactly.

use crate::config::*;
use crate::error::*;
use crate::util::{BitReader, BitWriter};
use log::trace;

/// Reads field elements out of a byte buffer.
///
/// Yields `Some(fp)` with `fp < p` until the input and any carried bit are
/// used up, then `None` forever.
pub struct ByteReader<'a> {
    bits: BitReader<'a>,
    carry: Option<u64>,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        trace!("byte reader: begin {} bytes", data.len());
        Self {
            bits: BitReader::new(data),
            carry: None,
        }
    }

    /// Upper bound on the number of elements [`ByteReader::read`] produces
    /// for `bytes` input bytes. Every element but the last takes at least
    /// 60 bits of input.
    pub fn max_words(bytes: usize) -> usize {
        (bytes * 8 + 59) / 60
    }

    pub fn read(&mut self) -> Option<u64> {
        let (low, fresh) = match self.carry.take() {
            Some(bit) => (bit, WORD_BITS - 1),
            None if self.bits.is_exhausted() => return None,
            None => (0, WORD_BITS),
        };

        let candidate = (self.bits.take(fresh) << (WORD_BITS - fresh)) | low;
        if candidate >= AMBIGUITY {
            trace!(
                "byte reader: ambiguous word, carrying bit {} ({} bytes left)",
                candidate & 1,
                self.bits.remaining_bytes()
            );
            self.carry = Some(candidate & 1);
            return Some(AMBIGUITY);
        }
        Some(candidate)
    }
}

impl Iterator for ByteReader<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        self.read()
    }
}

/// Writes field elements produced by [`ByteReader`] back out as bytes.
///
/// Output is the original bytes followed by up to a few zero bytes of
/// padding; the original length has to be known by other means.
pub struct ByteWriter<'a> {
    bits: BitWriter<'a>,
    // Position of the low bit of the last ambiguous word, still unknown.
    hole: Option<u64>,
}

impl<'a> ByteWriter<'a> {
    pub fn new(out: &'a mut [u8]) -> Self {
        trace!("byte writer: begin {} byte buffer", out.len());
        Self {
            bits: BitWriter::new(out),
            hole: None,
        }
    }

    /// Output bytes needed to write `words` elements.
    pub fn max_bytes_needed(words: usize) -> usize {
        (words * WORD_BITS as usize + 7) / 8
    }

    pub fn write(&mut self, fp: u64) -> Result<()> {
        if fp >= PRIME {
            return Err(Fp61Error::NotCanonical { value: fp });
        }

        match (self.hole, fp == AMBIGUITY) {
            (None, false) => self.bits.put(fp, WORD_BITS),
            (None, true) => {
                // Bit #0 of AMBIGUITY is clear; it is patched by a later write.
                self.hole = Some(self.bits.position());
                self.bits.put(AMBIGUITY, WORD_BITS)
            }
            (Some(_), true) => self.bits.put(AMBIGUITY >> 1, WORD_BITS - 1),
            (Some(pos), false) => {
                if fp & 1 == 1 {
                    self.bits.set_bit(pos);
                }
                self.hole = None;
                self.bits.put(fp >> 1, WORD_BITS - 1)
            }
        }
    }

    /// Writes any buffered bits and returns the total bytes written.
    /// Output is incomplete until this is called.
    pub fn flush(&mut self) -> Result<usize> {
        if self.hole.is_some() {
            trace!("byte writer: flushing with an unresolved ambiguous word");
        }
        let bytes = self.bits.flush()?;
        trace!("byte writer: flushed {} bytes", bytes);
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    /// Bit-by-bit model of the reader.
    fn reference_words(data: &[u8]) -> Vec<u64> {
        let total = data.len() * 8;
        let bit = |i: usize| -> u64 {
            if i < total {
                ((data[i / 8] >> (i % 8)) & 1) as u64
            } else {
                0
            }
        };

        let mut words = Vec::new();
        let mut pos = 0;
        let mut carry = None;
        loop {
            let (mut x, take) = match carry {
                Some(b) => (b, 60),
                None if pos >= total => break,
                None => (0, 61),
            };
            let shift = 61 - take;
            for i in 0..take {
                x |= bit(pos + i) << (i + shift);
            }
            pos += take;

            if x >= AMBIGUITY {
                carry = Some(x & 1);
                words.push(AMBIGUITY);
            } else {
                carry = None;
                words.push(x);
            }
        }
        words
    }

    fn check_reader(data: &[u8]) {
        let words: Vec<u64> = ByteReader::new(data).collect();
        assert_eq!(words, reference_words(data), "len={}", data.len());

        let ambiguous = words.iter().filter(|&&w| w == AMBIGUITY).count();
        let expected = (data.len() * 8 + ambiguous + 60) / 61;
        assert_eq!(words.len(), expected, "len={}", data.len());
        assert!(words.len() <= ByteReader::max_words(data.len()));
        assert!(words.iter().all(|&w| w < PRIME));
    }

    fn random_bytes(rng: &mut StdRng, len: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(len + 8);
        while data.len() < len {
            // Runs of ones to provoke ambiguity.
            let w = if rng.gen_range(0..100) <= 3 {
                u64::MAX
            } else {
                rng.gen::<u64>()
            };
            data.extend_from_slice(&w.to_le_bytes());
        }
        data.truncate(len);
        data
    }

    #[test]
    fn test_empty_input() {
        let mut reader = ByteReader::new(&[]);
        assert_eq!(reader.read(), None);
        assert_eq!(reader.read(), None);
    }

    #[test]
    fn test_first_word_is_little_endian() {
        let data = [1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let words: Vec<u64> = ByteReader::new(&data).collect();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0], 0x0807060504030201 & MASK61);
        // Bits #61..#63 of the first 8 bytes lead the second word.
        assert_eq!(words[1] & 0x7, 0x0807060504030201 >> 61);
        assert_eq!(words[1] >> 3, 0x0a09);
    }

    #[test]
    fn test_simple_patterns() {
        let simple: Vec<u8> = (0..16).collect();
        let mut all_ones = vec![0xffu8; 16];
        all_ones[0] = 0xfe;
        let mut mixed = vec![0xffu8; 20];
        mixed[0] = 0xfe;
        mixed[8] = 0;

        for data in [&simple, &all_ones, &mixed] {
            for len in 0..=data.len() {
                check_reader(&data[..len]);
            }
        }
    }

    #[test]
    fn test_all_ones_is_ambiguous_every_word() {
        let data = vec![0xffu8; 64];
        let words: Vec<u64> = ByteReader::new(&data).collect();
        // 61 bits, then 60 per ambiguous word, then the tail.
        let full = 1 + (512 - 61) / 60;
        assert!(words[..full].iter().all(|&w| w == AMBIGUITY));
        assert!(words[full..].iter().all(|&w| w != AMBIGUITY));
        check_reader(&data);
    }

    #[test]
    fn test_ambiguous_last_word_emits_carry() {
        // 61 set bits: one ambiguous word, then the carried bit on its own.
        let mut data = vec![0xffu8; 8];
        data[7] = 0x1f;
        let words: Vec<u64> = ByteReader::new(&data).collect();
        assert_eq!(words, vec![AMBIGUITY, 1]);

        data[0] = 0xfe;
        let words: Vec<u64> = ByteReader::new(&data).collect();
        assert_eq!(words, vec![AMBIGUITY, 0]);
    }

    #[test]
    fn test_random_reader() {
        let mut rng = StdRng::seed_from_u64(10);
        for len in 0..2000 {
            let data = random_bytes(&mut rng, len);
            check_reader(&data);
        }
    }

    fn round_trip(data: &[u8]) {
        let words: Vec<u64> = ByteReader::new(data).collect();
        let mut out = vec![0u8; ByteWriter::max_bytes_needed(words.len())];
        let mut writer = ByteWriter::new(&mut out);
        for &w in &words {
            writer.write(w).unwrap();
        }
        let written = writer.flush().unwrap();

        assert!(written >= data.len(), "len={}", data.len());
        assert!(written <= ByteWriter::max_bytes_needed(ByteReader::max_words(data.len())));
        assert_eq!(&out[..data.len()], data, "len={}", data.len());
        assert!(out[data.len()..written].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_round_trip() {
        let mut rng = StdRng::seed_from_u64(11);
        for len in 0..1000 {
            round_trip(&random_bytes(&mut rng, len));
            round_trip(&vec![0xffu8; len]);
        }
    }

    #[test]
    fn test_writer_rejects_non_canonical() {
        let mut out = [0u8; 16];
        let mut writer = ByteWriter::new(&mut out);
        assert_eq!(
            writer.write(PRIME),
            Err(Fp61Error::NotCanonical { value: PRIME })
        );
    }

    #[test]
    fn test_writer_output_too_small() {
        let mut out = [0u8; 4];
        let mut writer = ByteWriter::new(&mut out);
        writer.write(12345).unwrap();
        assert!(matches!(
            writer.flush(),
            Err(Fp61Error::OutputTooSmall { needed: 8, available: 4 })
        ));
    }
}
