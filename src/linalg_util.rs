//! Linear combinations of field-element vectors, the inner loop of a linear
//! erasure code: `R = sum(m_i * f_i) mod p` for coefficients `m_i` and
//! data pieces `f_i` read through [`ByteReader`].
//!
//! Products are only partially reduced and folded three at a time into a
//! partially reduced accumulator with `add4`; each output is finalized once.

use crate::byte_codec::ByteReader;
use crate::config::*;
use crate::error::*;
use crate::field_arithmetic::{add4, finalize, multiply};
use ndarray::{Array1, Array2};

fn check_operand(value: u64) -> Result<()> {
    if value >> 62 != 0 {
        return Err(Fp61Error::NotPartiallyReduced { value });
    }
    Ok(())
}

/// sum(coeffs[i] * words[i]) mod p. Inputs must be `< 2^62`.
pub fn dot_product(coeffs: &[u64], words: &[u64]) -> Result<u64> {
    if coeffs.len() != words.len() {
        return Err(Fp61Error::LengthMismatch {
            expected: coeffs.len(),
            actual: words.len(),
        });
    }
    for &value in coeffs.iter().chain(words) {
        check_operand(value)?;
    }

    let mut acc = 0u64;
    for (c, w) in coeffs.chunks(3).zip(words.chunks(3)) {
        let mut products = [0u64; 3];
        for i in 0..c.len() {
            products[i] = multiply(c[i], w[i]);
        }
        acc = add4(acc, products[0], products[1], products[2]);
    }
    Ok(finalize(acc))
}

/// Rows of field elements, one per piece, zero-padded to the longest row.
pub fn pieces_to_matrix(pieces: &[&[u8]]) -> Array2<u64> {
    let rows: Vec<Vec<u64>> = pieces
        .iter()
        .map(|piece| ByteReader::new(piece).collect())
        .collect();
    let cols = rows.iter().map(Vec::len).max().unwrap_or(0);

    let mut matrix = Array2::zeros((rows.len(), cols));
    for (i, row) in rows.iter().enumerate() {
        for (j, &fp) in row.iter().enumerate() {
            matrix[[i, j]] = fp;
        }
    }
    matrix
}

/// `R[j] = sum_i coeffs[i] * pieces[[i, j]] mod p`.
pub fn matrix_vector_product(pieces: &Array2<u64>, coeffs: &Array1<u64>) -> Result<Array1<u64>> {
    let (rows, cols) = pieces.dim();
    if coeffs.len() != rows {
        return Err(Fp61Error::LengthMismatch {
            expected: rows,
            actual: coeffs.len(),
        });
    }
    for &value in coeffs.iter().chain(pieces.iter()) {
        check_operand(value)?;
    }

    let mut acc: Array1<u64> = Array1::zeros(cols);
    for base in (0..rows).step_by(3) {
        let batch = (rows - base).min(3);
        for j in 0..cols {
            let mut products = [0u64; 3];
            for k in 0..batch {
                products[k] = multiply(coeffs[base + k], pieces[[base + k, j]]);
            }
            acc[j] = add4(acc[j], products[0], products[1], products[2]);
        }
    }

    acc.mapv_inplace(finalize);
    debug_assert!(acc.iter().all(|&r| r < PRIME));
    Ok(acc)
}
