//! Constant-time scalar multiplication.
//!
//! Scalars are 32-byte strings interpreted as unsigned little-endian
//! integers; the top bit (bit 255) is ignored, and no clamping or
//! reduction is applied. The multiplication uses a fixed window of 5
//! bits with signed digits:
//!
//!  - The scalar is recoded into 51 digits in -16..+15, plus a top
//!    carry (the "zeroth window" flag), such that:
//!    `k = flag*2^255 + sum_{i=0}^{50} d_i*32^i`.
//!
//!  - A table of the 16 multiples 1*P..16*P is computed.
//!
//!  - The accumulator starts at P or at the neutral (depending on the
//!    flag); then, for each digit from the top, five doublings are
//!    performed and the table entry for the digit is added (after
//!    conditional negation; digit 0 yields the neutral).
//!
//! The sequence of operations and the memory access pattern do not
//! depend on the scalar nor on the point: table entries are always all
//! read (`ct::scan_and_accumulate()`), and the complete addition
//! formulas handle the neutral and equal operands without branching.

// Projective coordinates traditionally use uppercase letters.
#![allow(non_snake_case)]

use core::ops::{Mul, MulAssign};

use crate::constants::{NUM_WINDOWS, TABLE_SIZE, WINDOW_BITS};
use crate::ct::{eq_mask, scan_and_accumulate, sign_mask, Accumulate};
use crate::error::Error;
use crate::field::FieldElement;
use crate::point::{CurvePoint, Point};

/// A scalar recoded into signed 5-bit windows.
#[derive(Clone, Copy, Debug)]
pub struct ScalarWindows {
    digits: [i8; NUM_WINDOWS],
    zeroth: u32,
}

impl ScalarWindows {

    /// Recodes a 32-byte scalar (little-endian, top bit ignored).
    pub fn recode(scalar: &[u8; 32]) -> Self {
        let mut digits = [0i8; NUM_WINDOWS];
        let mut cc = 0u32;
        for i in 0..NUM_WINDOWS {
            // Extract bits 5*i to 5*i+4; for the top window these are
            // bits 250 to 254.
            let off = WINDOW_BITS * i;
            let j = off >> 3;
            let mut v = scalar[j] as u32;
            if j + 1 < 32 {
                v |= (scalar[j + 1] as u32) << 8;
            }
            let w = ((v >> (off & 7)) & 0x1F) + cc;

            // w is in 0..32. Values 16..32 become w - 32, with a carry
            // into the next window.
            cc = ((w >> 5) ^ (w >> 4)) & 1;
            digits[i] = (w as i32 - ((cc << 5) as i32)) as i8;
        }
        Self { digits, zeroth: cc.wrapping_neg() }
    }

    /// Gets the digits (least significant first). Each digit is in
    /// -16..+15.
    #[inline(always)]
    pub fn digits(&self) -> &[i8; NUM_WINDOWS] {
        &self.digits
    }

    /// Gets the zeroth window flag (carry out of the top window, with
    /// weight 2^255), as a mask (0xFFFFFFFF if set).
    #[inline(always)]
    pub fn zeroth(&self) -> u32 {
        self.zeroth
    }
}

impl<F: FieldElement> Accumulate for CurvePoint<F> {

    // (0:0:0) is not a valid point; it is only the starting value of
    // masked accumulation.
    const ZERO: Self = Self { X: F::ZERO, Y: F::ZERO, Z: F::ZERO };

    #[inline]
    fn set_or_masked(&mut self, src: &Self, ctl: u32) {
        self.X.set_or_masked(&src.X, ctl);
        self.Y.set_or_masked(&src.Y, ctl);
        self.Z.set_or_masked(&src.Z, ctl);
    }
}

/// The multiples 1*P to 16*P of a point P.
#[derive(Clone, Copy, Debug)]
pub struct PrecomputedTable<F: FieldElement> {
    points: [CurvePoint<F>; TABLE_SIZE],
}

impl<F: FieldElement> PrecomputedTable<F> {

    /// Builds the table for point `P`: entry i contains (i+1)*P.
    pub fn new(P: &CurvePoint<F>) -> Self {
        let mut win = [CurvePoint::<F>::NEUTRAL; TABLE_SIZE];
        win[0] = *P;
        for i in 1..8 {
            win[2 * i - 1] = win[i - 1].double();
            win[2 * i] = win[2 * i - 1] + win[0];
        }
        win[15] = win[7].double();
        Self { points: win }
    }

    /// Gets `d*P` for a digit `d` in -16..+16 (constant-time).
    ///
    /// For `d = 0`, the neutral is returned.
    pub fn lookup(&self, d: i8) -> CurvePoint<F> {
        // Split d into its sign s (0xFFFFFFFF for negative) and
        // absolute value f.
        let s = sign_mask(d);
        let f = ((d as u32) ^ s).wrapping_sub(s);

        // For f = 0, the index wraps around and nothing matches; we get
        // (0:0:0), which is turned into the neutral (0:1:0).
        let mut P = scan_and_accumulate(&self.points, f.wrapping_sub(1));
        P.Y.set_or_masked(&F::ONE, eq_mask(f, 0));
        P.set_condneg(s);
        P
    }
}

impl<F: FieldElement> CurvePoint<F> {

    /// Multiplies this point by a scalar (in place).
    ///
    /// The scalar is 32 bytes, little-endian; its top bit is ignored.
    /// This operation is constant-time with regard to both the point
    /// and the scalar value.
    pub fn set_mul(&mut self, scalar: &[u8; 32]) {
        let sw = ScalarWindows::recode(scalar);
        let win = PrecomputedTable::new(self);

        // Start with P (if the top carry is set) or the neutral.
        let zf = sw.zeroth();
        let mut Q = scan_and_accumulate(&win.points[..1], !zf & 1);
        Q.Y.set_or_masked(&F::ONE, !zf);

        for i in (0..NUM_WINDOWS).rev() {
            Q.set_xdouble(WINDOW_BITS as u32);
            Q.set_add(&win.lookup(sw.digits()[i]));
        }
        *self = Q;
    }

    /// Multiplies this point by a scalar.
    #[inline(always)]
    pub fn mul(self, scalar: &[u8; 32]) -> Self {
        let mut r = self;
        r.set_mul(scalar);
        r
    }
}

impl<F: FieldElement> Mul<&[u8; 32]> for CurvePoint<F> {
    type Output = CurvePoint<F>;

    #[inline(always)]
    fn mul(self, other: &[u8; 32]) -> CurvePoint<F> {
        let mut r = self;
        r.set_mul(other);
        r
    }
}

impl<F: FieldElement> Mul<&[u8; 32]> for &CurvePoint<F> {
    type Output = CurvePoint<F>;

    #[inline(always)]
    fn mul(self, other: &[u8; 32]) -> CurvePoint<F> {
        let mut r = *self;
        r.set_mul(other);
        r
    }
}

impl<F: FieldElement> MulAssign<&[u8; 32]> for CurvePoint<F> {
    #[inline(always)]
    fn mul_assign(&mut self, other: &[u8; 32]) {
        self.set_mul(other);
    }
}

/// Multiplies an encoded point by a scalar.
///
/// The point is decoded (the all-zero encoding is the neutral); if it is
/// not on the curve, `Error::InvalidPoint` is returned and no
/// multiplication is performed. Otherwise, the product is returned,
/// encoded (the neutral yields 64 zeros).
pub fn scalarmult(scalar: &[u8; 32], point: &[u8; 64])
    -> Result<[u8; 64], Error>
{
    let P = Point::from_bytes(point)?;
    Ok(P.mul(scalar).encode())
}

/// Multiplies the conventional generator by a scalar, and returns the
/// encoded result.
pub fn scalarmult_base(scalar: &[u8; 32]) -> [u8; 64] {
    Point::generator().mul(scalar).encode()
}

// ========================================================================
