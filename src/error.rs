use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Fp61Error {
    #[error("Multiply operands too wide: {x_bits} + {y_bits} bits exceeds 124")]
    OperandsTooWide { x_bits: u32, y_bits: u32 },

    #[error("Value {value:#018x} is not partially reduced")]
    NotPartiallyReduced { value: u64 },

    #[error("Value {value:#018x} is not a canonical field element")]
    NotCanonical { value: u64 },

    #[error("Output buffer too small: need {needed} bytes, have {available}")]
    OutputTooSmall { needed: usize, available: usize },

    #[error("Zero has no multiplicative inverse")]
    NoInverse,

    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Fp61Error>;
