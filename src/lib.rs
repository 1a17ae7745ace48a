//! Arithmetic modulo the Mersenne prime p = 2^61 - 1, and codecs that turn
//! byte buffers into vectors of field elements and back.

pub mod byte_codec;
pub mod config;
pub mod element;
pub mod error;
pub mod field_arithmetic;
pub mod linalg_util;
pub mod mul128;
pub mod prg;
pub mod util;
pub mod word_codec;

pub use byte_codec::*;
pub use config::*;
pub use element::*;
pub use error::*;
pub use field_arithmetic::*;
pub use prg::*;
pub use word_codec::*;

pub mod fp61 {
    use super::*;

    /// Convert a byte buffer into field elements
    ///
    /// # Returns
    /// * Canonical field elements, at most `ByteReader::max_words(data.len())`
    pub fn encode_bytes(data: &[u8]) -> Vec<u64> {
        ByteReader::new(data).collect()
    }

    /// Convert field elements from [`encode_bytes`] back into bytes
    ///
    /// # Arguments
    /// * `words` - Elements as produced by `ByteReader`
    /// * `original_len` - Byte length of the encoded buffer
    ///
    /// # Returns
    /// * `Ok(bytes)` - The original buffer
    /// * `Err(Fp61Error)` - A word was not canonical, or the words are too few
    pub fn decode_words(words: &[u64], original_len: usize) -> Result<Vec<u8>> {
        let mut out = vec![0u8; ByteWriter::max_bytes_needed(words.len())];
        let mut writer = ByteWriter::new(&mut out);
        for &fp in words {
            writer.write(fp)?;
        }
        let written = writer.flush()?;
        if written < original_len {
            return Err(Fp61Error::LengthMismatch {
                expected: original_len,
                actual: written,
            });
        }
        out.truncate(original_len);
        Ok(out)
    }

    /// Pack canonical field elements at 61 bits each
    pub fn pack_words(words: &[u64]) -> Result<Vec<u8>> {
        let mut out = vec![0u8; WordWriter::bytes_needed(words.len())];
        let mut writer = WordWriter::new(&mut out);
        for &fp in words {
            writer.write(fp)?;
        }
        writer.flush()?;
        Ok(out)
    }

    /// Unpack `count` elements written by [`pack_words`]
    pub fn unpack_words(data: &[u8], count: usize) -> Vec<u64> {
        let mut reader = WordReader::new(data);
        (0..count).map(|_| reader.read()).collect()
    }
}
