//! Implementations of the base field GF(2^255 - 19).
//!
//! Two structures implement `FieldElement` for the same field, with
//! different internal layouts:
//!
//!  - `GF25519M25`: ten 64-bit limbs in radix 2^25.5 (limbs alternately
//!    hold 26 and 25 bits). Products fit in 64-bit words, so no 128-bit
//!    arithmetic is needed. This is the default.
//!
//!  - `GF25519M51`: five 64-bit limbs in radix 2^51, with 128-bit
//!    intermediate products.
//!
//! Both are always compiled (so that they can be tested against each
//! other); the `GF25519` alias designates the one used by the group law
//! and the ladder. It is selected with the `gf25519_m25` or `gf25519_m51`
//! compilation feature.
//!
//! Both structures follow the same rules:
//!
//!  - An instance encapsulates a field element in redundant form. The
//!    ranges (carried, canonical, loose) and the preconditions of each
//!    operation are described in the `field` module.
//!
//!  - The constant values `Self::ZERO` and `Self::ONE` contain the
//!    elements of value 0 and 1, respectively, with all other limbs
//!    equal to zero.
//!
//!  - Function `decode32(buf: &[u8; 32]) -> Self` decodes 32 bytes with
//!    unsigned little-endian convention; the top bit is ignored and
//!    values in p..2^255-1 are implicitly reduced. This never fails.
//!
//!  - Function `encode32(self) -> [u8; 32]` encodes an element as
//!    exactly 32 bytes, always canonically.
//!
//!  - Selection (`set_cond()`, `set_or_masked()`) and comparisons
//!    (`iszero()`, `equals()`) use `u32` masks: 0xFFFFFFFF for "true",
//!    0x00000000 for "false".

#[cfg(all(feature = "gf25519_m25", feature = "gf25519_m51"))]
compile_error!("features gf25519_m25 and gf25519_m51 are mutually exclusive");

pub mod gf25519_m25;
pub mod gf25519_m51;

pub use gf25519_m25::GF25519M25;
pub use gf25519_m51::GF25519M51;

/// Base field GF(2^255 - 19): ten-limb implementation.
#[cfg(not(feature = "gf25519_m51"))]
pub type GF25519 = GF25519M25;

/// Base field GF(2^255 - 19): five-limb implementation.
#[cfg(feature = "gf25519_m51")]
pub type GF25519 = GF25519M51;
