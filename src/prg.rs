use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::Aes128;
use log::debug;

use crate::config::*;
use crate::util::read_u64_le;

/// Deterministic source of field elements, e.g. for linear-combination
/// coefficients. AES-128 in counter mode keyed by the seed.
///
/// Not for secrets: the seed is the whole key.
pub struct FpGenerator {
    cipher: Aes128,
    counter: u128,
    buffer: [u64; 2],
    index: usize,
}

impl FpGenerator {
    pub fn new(seed: u64, stream: u64) -> Self {
        let key_bytes = (((stream as u128) << 64) | seed as u128).to_le_bytes();
        let key = GenericArray::from_slice(&key_bytes);
        debug!("fp generator: seed {:#x} stream {:#x}", seed, stream);
        Self {
            cipher: Aes128::new(key),
            counter: 0,
            buffer: [0; 2],
            index: 2,
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random(), rand::random())
    }

    fn refill(&mut self) {
        let mut block = GenericArray::from(self.counter.to_le_bytes());
        self.cipher.encrypt_block(&mut block);
        self.counter = self.counter.wrapping_add(1);

        self.buffer = [read_u64_le(&block[..8]), read_u64_le(&block[8..])];
        self.index = 0;
    }

    pub fn next_u64(&mut self) -> u64 {
        if self.index == self.buffer.len() {
            self.refill();
        }
        let word = self.buffer[self.index];
        self.index += 1;
        word
    }

    /// Uniform in [0, p-1].
    pub fn next_fp(&mut self) -> u64 {
        loop {
            let fp = mask_to_field(self.next_u64());
            if fp != PRIME {
                return fp;
            }
        }
    }

    /// Uniform in [1, p-1].
    pub fn next_nonzero_fp(&mut self) -> u64 {
        loop {
            let fp = mask_to_field(self.next_u64());
            if fp != 0 && fp != PRIME {
                return fp;
            }
        }
    }

    pub fn fill_fp(&mut self, out: &mut [u64]) {
        for fp in out.iter_mut() {
            *fp = self.next_fp();
        }
    }
}

impl rand::RngCore for FpGenerator {
    fn next_u32(&mut self) -> u32 {
        FpGenerator::next_u64(self) as u32
    }

    fn next_u64(&mut self) -> u64 {
        FpGenerator::next_u64(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = FpGenerator::next_u64(self).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
