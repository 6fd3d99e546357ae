//! The base field GF(2^255 - 19).
//!
//! The group law and the scalar ladder are written once, generically over
//! the `FieldElement` trait defined here. Two implementations of that
//! trait live in `backend` (ten limbs in radix 2^25.5, or five limbs in
//! radix 2^51); `GF25519` is the one selected by the compilation
//! features.
//!
//! # Value ranges
//!
//! Field elements use a redundant representation, and most operations do
//! not normalize their output. Each backend defines the following ranges
//! for the limbs of an element:
//!
//!  - *carried*: the output of `set_carry()`, `set_mul()`, `set_square()`,
//!    `set_mul_b()` and `decode32()`. Every limb is at most its radix
//!    bound (a few limbs may reach the bound exactly). The value is not
//!    necessarily lower than p.
//!
//!  - *canonical*: the output of `set_reduce()`; the value is in 0..p-1.
//!
//!  - *loose*: anything else. `set_add()` and `set_sub()` never carry, so
//!    limbs grow with each call.
//!
//! Callers must track how far their operands are from the carried range.
//! The contract that both backends fulfill is:
//!
//!  - `set_add_2p()` adds 2*p with limbs at least as large as those of
//!    any carried value; thus `a + 2p - b` does not underflow if `b` is
//!    carried.
//!
//!  - `set_add_4p()` adds 4*p with limbs at least as large as those of
//!    the sum of three carried values.
//!
//!  - `set_mul()` and `set_square()` accept operands whose limbs are at
//!    most four times the carried limb bounds (e.g. the sum of four
//!    carried values, or a carried value times a sum of four).
//!
//!  - `set_carry()` accepts limbs lower than 2^63.
//!
//! Debug builds check the underflow and overflow conditions.

pub use crate::backend::GF25519;

/// Arithmetic kernel for GF(2^255 - 19).
///
/// All functions are constant-time.
pub trait FieldElement: Copy + Clone + core::fmt::Debug {

    /// Element of value zero (all limbs zero).
    const ZERO: Self;

    /// Element of value one (lowest limb is 1, other limbs are zero).
    const ONE: Self;

    /// Decodes 32 bytes (unsigned little-endian). The top bit of the last
    /// byte is ignored; values in p..2^255-1 are accepted (and thus
    /// implicitly reduced). The output is carried.
    fn decode32(buf: &[u8; 32]) -> Self;

    /// Encodes this value into 32 bytes (canonical, little-endian, top
    /// bit of the last byte is always 0). The source must be carried.
    fn encode32(self) -> [u8; 32];

    /// Adds `rhs` limb-wise, without carry propagation.
    fn set_add(&mut self, rhs: &Self);

    /// Subtracts `rhs` limb-wise, without carry propagation. The caller
    /// must have ensured that no limb of `rhs` exceeds the corresponding
    /// limb of `self` (normally by calling `set_add_2p()` or
    /// `set_add_4p()` first).
    fn set_sub(&mut self, rhs: &Self);

    /// Adds 2*p, expressed with limbs large enough for a subsequent
    /// subtraction of a carried value.
    fn set_add_2p(&mut self);

    /// Adds 4*p, expressed with limbs large enough for a subsequent
    /// subtraction of the sum of up to three carried values.
    fn set_add_4p(&mut self);

    /// Propagates carries, bringing the value back into the carried range
    /// (value is unchanged modulo p).
    fn set_carry(&mut self);

    /// Reduces a carried value into the canonical range 0..p-1.
    fn set_reduce(&mut self);

    /// Multiplies this value by `rhs`. Output is carried.
    fn set_mul(&mut self, rhs: &Self);

    /// Squares this value. Output is carried.
    fn set_square(&mut self);

    /// Adds the curve constant b = 13318 (no carry).
    fn set_add_b(&mut self);

    /// Multiplies this value by the curve constant b = 13318. Output is
    /// carried.
    fn set_mul_b(&mut self);

    /// Sets this value to `a` if `ctl` is 0xFFFFFFFF, leaves it unchanged
    /// if `ctl` is 0x00000000.
    fn set_cond(&mut self, a: &Self, ctl: u32);

    /// ORs the limbs of `a` into this value if `ctl` is 0xFFFFFFFF; does
    /// nothing if `ctl` is 0x00000000. This is meaningful only when
    /// accumulating into an all-zero element.
    fn set_or_masked(&mut self, a: &Self, ctl: u32);

    /// Returns 0xFFFFFFFF if this (carried) value is zero modulo p,
    /// 0x00000000 otherwise.
    fn iszero(self) -> u32;

    /// Returns `a0` if `ctl` is 0x00000000, or `a1` if `ctl` is 0xFFFFFFFF.
    #[inline(always)]
    fn select(a0: &Self, a1: &Self, ctl: u32) -> Self {
        let mut r = *a0;
        r.set_cond(a1, ctl);
        r
    }

    /// Negates this (carried) value; output is carried.
    #[inline]
    fn set_neg(&mut self) {
        let mut r = Self::ZERO;
        r.set_add_2p();
        r.set_sub(self);
        r.set_carry();
        *self = r;
    }

    #[inline(always)]
    fn neg(self) -> Self {
        let mut r = self;
        r.set_neg();
        r
    }

    #[inline(always)]
    fn mul(self, rhs: &Self) -> Self {
        let mut r = self;
        r.set_mul(rhs);
        r
    }

    #[inline(always)]
    fn square(self) -> Self {
        let mut r = self;
        r.set_square();
        r
    }

    /// Squares this value `n` times (in place).
    #[inline]
    fn set_xsquare(&mut self, n: u32) {
        for _ in 0..n {
            self.set_square();
        }
    }

    #[inline(always)]
    fn xsquare(self, n: u32) -> Self {
        let mut r = self;
        r.set_xsquare(n);
        r
    }

    /// Returns the canonical representative of this (carried) value.
    #[inline(always)]
    fn reduced(self) -> Self {
        let mut r = self;
        r.set_reduce();
        r
    }

    /// Compares two carried values; returns 0xFFFFFFFF if they are equal
    /// modulo p, 0x00000000 otherwise.
    #[inline]
    fn equals(self, rhs: Self) -> u32 {
        let mut d = self;
        d.set_add_2p();
        d.set_sub(&rhs);
        d.set_carry();
        d.iszero()
    }

    /// Inverts this (carried) value; zero is mapped to zero.
    ///
    /// This raises the value to the power p - 2 with a fixed sequence
    /// of 254 squarings and 11 multiplications.
    fn set_invert(&mut self) {
        let z = *self;

        let z2 = z.square();                         // 2
        let z9 = z2.xsquare(2).mul(&z);              // 9
        let z11 = z9.mul(&z2);                       // 11
        let z2_5_0 = z11.square().mul(&z9);          // 2^5 - 2^0
        let z2_10_0 = z2_5_0.xsquare(5).mul(&z2_5_0);
        let z2_20_0 = z2_10_0.xsquare(10).mul(&z2_10_0);
        let z2_40_0 = z2_20_0.xsquare(20).mul(&z2_20_0);
        let z2_50_0 = z2_40_0.xsquare(10).mul(&z2_10_0);
        let z2_100_0 = z2_50_0.xsquare(50).mul(&z2_50_0);
        let z2_200_0 = z2_100_0.xsquare(100).mul(&z2_100_0);
        let z2_250_0 = z2_200_0.xsquare(50).mul(&z2_50_0);

        // 2^255 - 2^5 + 11 = p - 2
        *self = z2_250_0.xsquare(5).mul(&z11);
    }

    #[inline(always)]
    fn invert(self) -> Self {
        let mut r = self;
        r.set_invert();
        r
    }
}

// ========================================================================
