//! Portable 64x64->128 multiply.
//!
//! Every variant returns `(hi, lo)` with `hi * 2^64 + lo == x * y`.
//! [`mul128`] picks one at build time: the `emulated-mul128` feature forces
//! the schoolbook version, x86_64 builds with BMI2 use `mulx`, everything
//! else uses the compiler's `u128` product.

#[inline(always)]
pub fn mul128(x: u64, y: u64) -> (u64, u64) {
    #[cfg(feature = "emulated-mul128")]
    {
        mul128_emulated(x, y)
    }
    #[cfg(all(
        not(feature = "emulated-mul128"),
        target_arch = "x86_64",
        target_feature = "bmi2"
    ))]
    {
        mul128_intrinsic(x, y)
    }
    #[cfg(all(
        not(feature = "emulated-mul128"),
        not(all(target_arch = "x86_64", target_feature = "bmi2"))
    ))]
    {
        mul128_native(x, y)
    }
}

#[inline(always)]
pub fn mul128_native(x: u64, y: u64) -> (u64, u64) {
    let w = (x as u128) * (y as u128);
    ((w >> 64) as u64, w as u64)
}

#[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
#[inline(always)]
pub fn mul128_intrinsic(x: u64, y: u64) -> (u64, u64) {
    let mut hi = 0u64;
    // SAFETY: only compiled when the target enables BMI2.
    let lo = unsafe { core::arch::x86_64::_mulx_u64(x, y, &mut hi) };
    (hi, lo)
}

/// Schoolbook multiply from four 32x32->64 partial products.
#[inline(always)]
pub fn mul128_emulated(x: u64, y: u64) -> (u64, u64) {
    const LOW32: u64 = 0xffff_ffff;

    let (x_lo, x_hi) = (x & LOW32, x >> 32);
    let (y_lo, y_hi) = (y & LOW32, y >> 32);

    let ll = x_lo * y_lo;
    let lh = x_lo * y_hi;
    let hl = x_hi * y_lo;
    let hh = x_hi * y_hi;

    // At most 3 * (2^32 - 1), no overflow.
    let mid = (ll >> 32) + (lh & LOW32) + (hl & LOW32);

    let lo = (mid << 32) | (ll & LOW32);
    let hi = hh + (lh >> 32) + (hl >> 32) + (mid >> 32);
    (hi, lo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn variants() -> Vec<fn(u64, u64) -> (u64, u64)> {
        #[allow(unused_mut)]
        let mut v: Vec<fn(u64, u64) -> (u64, u64)> = vec![mul128, mul128_native, mul128_emulated];
        #[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
        v.push(mul128_intrinsic);
        v
    }

    #[test]
    fn test_all_ones() {
        for f in variants() {
            assert_eq!(f(u64::MAX, u64::MAX), (0xffff_ffff_ffff_fffe, 1));
        }
    }

    #[test]
    fn test_edges() {
        let edges = [0u64, 1, 2, 0xffff_ffff, 1 << 32, 1 << 63, u64::MAX - 1, u64::MAX];
        for &x in &edges {
            for &y in &edges {
                let expected = mul128_native(x, y);
                for f in variants() {
                    assert_eq!(f(x, y), expected, "x={:#x} y={:#x}", x, y);
                }
            }
        }
    }

    #[test]
    fn test_parity_random() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..100_000 {
            let x: u64 = rng.gen();
            let y: u64 = rng.gen();
            let expected = mul128_native(x, y);
            for f in variants() {
                assert_eq!(f(x, y), expected, "x={:#x} y={:#x}", x, y);
            }
        }
    }
}
