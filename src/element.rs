//! Typed field elements.
//!
//! [`Fp`] is always canonical (`< p`) and [`Partial`] is always partially
//! reduced, so the representational state of a value is checked by the
//! compiler rather than by comments. The only way into `Partial` is
//! through [`Partial::reduce`], [`Partial::add4`], [`Partial::mul`] or from an
//! `Fp`, which keeps it away from the one pattern `finalize` mishandles.

use crate::config::*;
use crate::error::*;
use crate::field_arithmetic::{add4, finalize, inverse, multiply, negate, partial_reduce, reduce};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// Canonical element of F_p, p = 2^61 - 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fp(u64);

/// Partially reduced accumulator: below 2^62, congruent to its value mod p.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Partial(u64);

impl Fp {
    pub const ZERO: Fp = Fp(0);
    pub const ONE: Fp = Fp(1);

    /// Reduces any raw value mod p.
    #[inline]
    pub fn new(raw: u64) -> Self {
        Fp(reduce(raw))
    }

    pub fn from_canonical(value: u64) -> Result<Self> {
        if value >= PRIME {
            return Err(Fp61Error::NotCanonical { value });
        }
        Ok(Fp(value))
    }

    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `None` for zero.
    pub fn inverse(self) -> Option<Self> {
        match inverse(self.0) {
            0 => None,
            i => Some(Fp(i)),
        }
    }

    pub fn checked_inverse(self) -> Result<Self> {
        self.inverse().ok_or(Fp61Error::NoInverse)
    }

    /// Square-and-multiply. Variable time.
    pub fn pow(self, mut exp: u64) -> Self {
        let mut result = Partial::from(Fp::ONE);
        let mut base = Partial::from(self);
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(base);
            }
            base = base.mul(base);
            exp >>= 1;
        }
        result.finalize()
    }
}

impl Partial {
    /// Partially reduces any raw value.
    #[inline]
    pub fn reduce(raw: u64) -> Self {
        Partial(partial_reduce(raw))
    }

    #[inline]
    pub fn add4(x: Self, y: Self, z: Self, w: Self) -> Self {
        Partial(add4(x.0, y.0, z.0, w.0))
    }

    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn mul(self, rhs: Self) -> Self {
        Partial(multiply(self.0, rhs.0))
    }

    #[inline]
    pub fn finalize(self) -> Fp {
        Fp(finalize(self.0))
    }

    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<Fp> for Partial {
    fn from(x: Fp) -> Self {
        Partial(x.0)
    }
}

impl From<Fp> for u64 {
    fn from(x: Fp) -> Self {
        x.0
    }
}

impl TryFrom<u64> for Fp {
    type Error = Fp61Error;

    fn try_from(value: u64) -> Result<Self> {
        Fp::from_canonical(value)
    }
}

impl fmt::Display for Fp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Fp {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Fp(finalize(add4(self.0, rhs.0, 0, 0)))
    }
}

impl AddAssign for Fp {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Neg for Fp {
    type Output = Self;

    fn neg(self) -> Self {
        // negate(0) = p, which finalizes to 0.
        Fp(finalize(negate(self.0)))
    }
}

impl Sub for Fp {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Fp(finalize(add4(self.0, negate(rhs.0), 0, 0)))
    }
}

impl SubAssign for Fp {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul for Fp {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Fp(finalize(multiply(self.0, rhs.0)))
    }
}

impl MulAssign for Fp {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

// Division: a / b = a * b^(-1)
#[allow(clippy::suspicious_arithmetic_impl)]
impl Div for Fp {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let inv = rhs.inverse().expect("division by zero in F_p");
        self * inv
    }
}
