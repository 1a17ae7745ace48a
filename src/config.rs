/// p = 2^61 - 1
pub const PRIME: u64 = (1u64 << 61) - 1;

pub const MASK61: u64 = PRIME;
pub const MASK62: u64 = (1u64 << 62) - 1;
/// Bit #63 clear, all others set.
pub const MASK63: u64 = (1u64 << 63) - 1;

/// Field value standing in for both p-1 and the all-ones 61-bit pattern.
/// The byte codec disambiguates it with one extra bit.
pub const AMBIGUITY: u64 = PRIME - 1;

/// The one value below 2^62 that `finalize` gets wrong.
pub const FINALIZE_EXCLUDED: u64 = 0x3fff_ffff_ffff_fffe;

/// Bits per packed field element.
pub const WORD_BITS: u32 = 61;

/// Largest combined bit length `multiply` accepts.
pub const MUL_INPUT_BITS_MAX: u32 = 124;

pub fn bit_length(x: u64) -> u32 {
    64 - x.leading_zeros()
}

pub fn is_partially_reduced(x: u64) -> bool {
    x >> 62 == 0 && x != FINALIZE_EXCLUDED
}

pub fn mask_to_field(value: u64) -> u64 {
    value & MASK61
}

pub fn random_fp() -> u64 {
    loop {
        let value = mask_to_field(rand::random::<u64>());
        if value != PRIME {
            return value;
        }
    }
}
