//! Curve and field constants.
//!
//! The base field is GF(p) with p = 2^255 - 19; the curve is the short
//! Weierstraß curve `y^2 = x^3 - 3*x + 13318`. Everything that depends on
//! these two choices (limb layouts of multiples of p, the reduction
//! constant, the window parameters of the scalar ladder) is defined here
//! once and shared by both field backends and the group layer.

/// Curve equation constant b.
pub const CURVE_B: u64 = 13318;

/// Reduction constant: 2^255 = 19 mod p.
pub const REDUCE19: u64 = 19;

// Ten-limb representation (radix 2^25.5): limb i has weight
// 2^ceil(25.5*i), even limbs hold 26 bits, odd limbs hold 25 bits.

/// Bits above the low 25 bits of a limb.
pub const MASK25: u64 = 0xFFFFFFFFFE000000;

/// Bits above the low 26 bits of a limb.
pub const MASK26: u64 = 0xFFFFFFFFFC000000;

/// 2*p in the ten-limb layout.
pub const TWO_P_M25: [u64; 10] = [
    0x07FFFFDA, 0x03FFFFFE, 0x07FFFFFE, 0x03FFFFFE, 0x07FFFFFE,
    0x03FFFFFE, 0x07FFFFFE, 0x03FFFFFE, 0x07FFFFFE, 0x03FFFFFE,
];

/// 4*p in the ten-limb layout.
pub const FOUR_P_M25: [u64; 10] = [
    0x0FFFFFB4, 0x07FFFFFC, 0x0FFFFFFC, 0x07FFFFFC, 0x0FFFFFFC,
    0x07FFFFFC, 0x0FFFFFFC, 0x07FFFFFC, 0x0FFFFFFC, 0x07FFFFFC,
];

// Five-limb representation (radix 2^51).

/// Low 51 bits of a limb.
pub const MASK51: u64 = 0x0007FFFFFFFFFFFF;

/// 2*p in the five-limb layout.
pub const TWO_P_M51: [u64; 5] = [
    0x000FFFFFFFFFFFDA, 0x000FFFFFFFFFFFFE, 0x000FFFFFFFFFFFFE,
    0x000FFFFFFFFFFFFE, 0x000FFFFFFFFFFFFE,
];

/// 4*p in the five-limb layout.
pub const FOUR_P_M51: [u64; 5] = [
    0x001FFFFFFFFFFFB4, 0x001FFFFFFFFFFFFC, 0x001FFFFFFFFFFFFC,
    0x001FFFFFFFFFFFFC, 0x001FFFFFFFFFFFFC,
];

/// Width (in bits) of a scalar window.
pub const WINDOW_BITS: usize = 5;

/// Number of signed windows in a recoded scalar (255 bits / 5).
pub const NUM_WINDOWS: usize = 51;

/// Number of entries in the per-point precomputed table (1*P to 16*P).
pub const TABLE_SIZE: usize = 16;

/// Encoding of the conventional generator G = (5, y), with y even.
pub const GENERATOR: [u8; 64] = [
    0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0xE2, 0x52, 0x91, 0x94, 0xAB, 0x2C, 0x37, 0x47,
    0x4A, 0x92, 0xFE, 0x30, 0xFB, 0x34, 0xB3, 0x62,
    0xC9, 0x99, 0x96, 0xE9, 0x1A, 0xCF, 0xE9, 0xC7,
    0x0E, 0x59, 0x43, 0xD9, 0x26, 0x55, 0x8A, 0x19,
];
