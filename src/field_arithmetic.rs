//! Arithmetic modulo p = 2^61 - 1 on raw `u64` words.
//!
//! Values move through three states that the word itself does not record:
//! raw (any bits), partially reduced (bits #63 and #62 clear) and canonical
//! (`< p`). Each function states which state it takes and returns. The
//! `checked_*` variants validate their inputs instead of trusting the caller,
//! and [`crate::element`] encodes the states as types.
//!
//! Lazy reduction: up to four partially reduced values may be summed, and a
//! sum of two may be fed to [`multiply`], before another reduction is needed.

use crate::config::*;
use crate::error::*;
use crate::mul128::mul128;

/// Clears bits #63 and #62 by folding them back in (2^61 = 1 mod p).
/// Takes any raw value; the result is `< 2^62` but may still be `>= p`.
#[inline(always)]
pub fn partial_reduce(x: u64) -> u64 {
    // Eliminating #63..#61 can carry back into #61, so only #63 and #62
    // are definitely cleared.
    (x & PRIME) + (x >> 61)
}

/// Full reduction of a partially reduced value. The result is `< p`.
///
/// Wrong for exactly one input below 2^62, [`FINALIZE_EXCLUDED`], which
/// [`partial_reduce`] never produces.
#[inline(always)]
pub fn finalize(x: u64) -> u64 {
    debug_assert!(x >> 62 == 0, "finalize input has bit 63 or 62 set");
    // The +1 also handles x = p.
    (x + ((x + 1) >> 61)) & PRIME
}

/// x + y + z + w, partially reduced. Inputs must each be `< 2^62`.
#[inline(always)]
pub fn add4(x: u64, y: u64, z: u64, w: u64) -> u64 {
    debug_assert!((x | y | z | w) >> 62 == 0, "add4 input has bit 63 or 62 set");
    partial_reduce(x + y + z + w)
}

/// -x without reduction. Requires `x <= p`; the result is `<= p`.
///
/// For subtraction use `add4(x, negate(y), 0, 0)`.
#[inline(always)]
pub fn negate(x: u64) -> u64 {
    debug_assert!(x <= PRIME, "negate input exceeds p");
    PRIME - x
}

/// x * y, partially reduced.
///
/// The bit lengths of x and y must add up to at most 124, e.g. both `< 2^62`,
/// or x `< 2^61` with up to four accumulated values in y `< 2^63`.
/// The result is `< 2^62`; call [`finalize`] for a canonical value.
#[inline(always)]
pub fn multiply(x: u64, y: u64) -> u64 {
    debug_assert!(
        bit_length(x) + bit_length(y) <= MUL_INPUT_BITS_MAX,
        "multiply operands exceed 124 bits"
    );
    let (p_hi, p_lo) = mul128(x, y);

    // Eliminate #63..#61 of the low word first so nothing carries into the
    // high word's contribution.
    let mut r = (p_lo & PRIME) + (p_lo >> 61);

    // High bits #123..#64 land on #63..#3 (2^64 = 8 mod p). Bit #124 would
    // reach #64, which the width limit rules out.
    r += (p_hi << 3) & MASK63;

    partial_reduce(r)
}

/// x^-1 mod p for any raw x, or 0 when x = 0 mod p.
///
/// Extended Euclid against the fixed modulus. Bezout coefficients stay within
/// (-p, p) so `i64` is wide enough. Not constant-time.
pub fn inverse(x: u64) -> u64 {
    let x = x % PRIME;
    if x == 0 {
        return 0;
    }

    let (mut r0, mut r1) = (PRIME as i64, x as i64);
    let (mut s0, mut s1) = (0i64, 1i64);

    // p is prime, so the remainders reach 1 before 0.
    while r1 != 1 {
        let q = r0 / r1;
        (r0, r1) = (r1, r0 - q * r1);
        (s0, s1) = (s1, s0 - q * s1);
    }

    if s1 < 0 {
        s1 += PRIME as i64;
    }
    s1 as u64
}

/// x mod p for any raw x.
#[inline(always)]
pub fn reduce(x: u64) -> u64 {
    finalize(partial_reduce(x))
}

pub fn checked_finalize(x: u64) -> Result<u64> {
    if !is_partially_reduced(x) {
        return Err(Fp61Error::NotPartiallyReduced { value: x });
    }
    Ok(finalize(x))
}

pub fn checked_add4(x: u64, y: u64, z: u64, w: u64) -> Result<u64> {
    for value in [x, y, z, w] {
        if value >> 62 != 0 {
            return Err(Fp61Error::NotPartiallyReduced { value });
        }
    }
    Ok(add4(x, y, z, w))
}

pub fn checked_negate(x: u64) -> Result<u64> {
    if x > PRIME {
        return Err(Fp61Error::NotCanonical { value: x });
    }
    Ok(negate(x))
}

pub fn checked_multiply(x: u64, y: u64) -> Result<u64> {
    let (x_bits, y_bits) = (bit_length(x), bit_length(y));
    if x_bits + y_bits > MUL_INPUT_BITS_MAX {
        return Err(Fp61Error::OperandsTooWide { x_bits, y_bits });
    }
    Ok(multiply(x, y))
}
