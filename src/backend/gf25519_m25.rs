use crate::constants::{CURVE_B, FOUR_P_M25, MASK25, MASK26, REDUCE19, TWO_P_M25};
use crate::ct::{select64, zero_mask64, Accumulate};
use crate::field::FieldElement;

/// Element of GF(2^255 - 19), ten limbs in radix 2^25.5.
#[derive(Clone, Copy, Debug)]
pub struct GF25519M25([u64; 10]);

impl GF25519M25 {

    // INTERNAL FORMAT
    // ===============
    //
    // Value is split over ten unsigned 64-bit limbs z0..z9; limb i has
    // weight 2^ceil(25.5*i), i.e.:
    //   z0 + z1*2^26 + z2*2^51 + z3*2^77 + z4*2^102
    //      + z5*2^128 + z6*2^153 + z7*2^179 + z8*2^204 + z9*2^230
    // Even limbs nominally hold 26 bits, odd limbs 25 bits. The value is
    // implicitly considered modulo p = 2^255 - 19.
    //
    // After set_carry(), all limbs are lower than their radix, except z2
    // and z7 which may be equal to 2^26 and 2^25, respectively (the two
    // carry chains end in z2 and z7 with a carry of at most 1). Call this
    // bound C (per limb). Then:
    //
    //  - 2*p is represented with limbs 2^27-38, 2^26-2, 2^27-2, 2^26-2,...
    //    which are all at least C; 4*p has limbs 2^28-76, 2^27-4,
    //    2^28-4,... which are all at least 3*C.
    //
    //  - In a multiplication, odd limbs of the first operand are doubled
    //    (the product of two odd-index limbs has weight twice the limb
    //    weight of the target), and limbs of the second operand are
    //    multiplied by 19 when the product wraps around 2^255. With
    //    operands up to 4*C each, the largest accumulator (h0) stays
    //    below 0x7C80000000000000 < 2^63, which is the precondition of
    //    set_carry().
    //
    //  - In the carry pass, the carry out of z9 is at most 2^38, and
    //    19 times that is added to z0.

    #[inline(always)]
    fn load3(b: &[u8]) -> u64 {
        (b[0] as u64) | ((b[1] as u64) << 8) | ((b[2] as u64) << 16)
    }

    #[inline(always)]
    fn load4(b: &[u8]) -> u64 {
        (b[0] as u64) | ((b[1] as u64) << 8)
            | ((b[2] as u64) << 16) | ((b[3] as u64) << 24)
    }

    /// Gets the raw limbs.
    #[cfg(test)]
    pub(crate) fn limbs(self) -> [u64; 10] {
        self.0
    }
}

impl FieldElement for GF25519M25 {

    const ZERO: Self = Self([0; 10]);
    const ONE: Self = Self([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

    fn decode32(buf: &[u8; 32]) -> Self {
        let mut r = Self([
            Self::load4(&buf[0..]),
            Self::load3(&buf[4..]) << 6,
            Self::load3(&buf[7..]) << 5,
            Self::load3(&buf[10..]) << 3,
            Self::load3(&buf[13..]) << 2,
            Self::load4(&buf[16..]),
            Self::load3(&buf[20..]) << 7,
            Self::load3(&buf[23..]) << 5,
            Self::load3(&buf[26..]) << 4,
            (Self::load3(&buf[29..]) & 0x7FFFFF) << 2,
        ]);
        r.set_carry();
        r
    }

    fn encode32(self) -> [u8; 32] {
        let mut x = self;
        x.set_reduce();
        let z = &x.0;
        let w0 = z[0] | (z[1] << 26) | (z[2] << 51);
        let w1 = (z[2] >> 13) | (z[3] << 13) | (z[4] << 38);
        let w2 = z[5] | (z[6] << 25) | (z[7] << 51);
        let w3 = (z[7] >> 13) | (z[8] << 12) | (z[9] << 38);
        let mut d = [0u8; 32];
        d[ 0.. 8].copy_from_slice(&w0.to_le_bytes());
        d[ 8..16].copy_from_slice(&w1.to_le_bytes());
        d[16..24].copy_from_slice(&w2.to_le_bytes());
        d[24..32].copy_from_slice(&w3.to_le_bytes());
        d
    }

    #[inline]
    fn set_add(&mut self, rhs: &Self) {
        for i in 0..10 {
            self.0[i] += rhs.0[i];
        }
    }

    #[inline]
    fn set_sub(&mut self, rhs: &Self) {
        for i in 0..10 {
            debug_assert!(self.0[i] >= rhs.0[i]);
            self.0[i] -= rhs.0[i];
        }
    }

    #[inline]
    fn set_add_2p(&mut self) {
        for i in 0..10 {
            self.0[i] += TWO_P_M25[i];
        }
    }

    #[inline]
    fn set_add_4p(&mut self) {
        for i in 0..10 {
            self.0[i] += FOUR_P_M25[i];
        }
    }

    fn set_carry(&mut self) {
        let z = &mut self.0;
        for i in 0..10 {
            debug_assert!(z[i] < (1u64 << 63));
        }

        // Two interleaved chains of seven rounds each:
        //   a: z0 -> z1 -> z2 -> z3 -> z4 -> z5 -> z6 -> z7
        //   b: z5 -> z6 -> z7 -> z8 -> z9 -> z0 -> z1 -> z2
        // The carry out of z9 has weight 2^255 = 19.
        let t = z[0] & MASK26; z[0] ^= t; z[1] += t >> 26;
        let t = z[5] & MASK25; z[5] ^= t; z[6] += t >> 25;
        let t = z[1] & MASK25; z[1] ^= t; z[2] += t >> 25;
        let t = z[6] & MASK26; z[6] ^= t; z[7] += t >> 26;
        let t = z[2] & MASK26; z[2] ^= t; z[3] += t >> 26;
        let t = z[7] & MASK25; z[7] ^= t; z[8] += t >> 25;
        let t = z[3] & MASK25; z[3] ^= t; z[4] += t >> 25;
        let t = z[8] & MASK26; z[8] ^= t; z[9] += t >> 26;
        let t = z[4] & MASK26; z[4] ^= t; z[5] += t >> 26;
        let t = z[9] & MASK25; z[9] ^= t; z[0] += REDUCE19 * (t >> 25);
        let t = z[5] & MASK25; z[5] ^= t; z[6] += t >> 25;
        let t = z[0] & MASK26; z[0] ^= t; z[1] += t >> 26;
        let t = z[6] & MASK26; z[6] ^= t; z[7] += t >> 26;
        let t = z[1] & MASK25; z[1] ^= t; z[2] += t >> 25;
    }

    fn set_reduce(&mut self) {
        let z = &mut self.0;

        // Compute the top carries of z + 19 and z + 38 in parallel:
        //   z + 19 >= 2^255  iff  z >= p
        //   z + 38 >= 2^256  iff  z >= 2*p
        let mut c19 = z[0] + 19;
        let mut c38 = z[0] + 38;
        for i in 0..9 {
            let s = 26 - (i & 1);
            c19 = (c19 >> s) + z[i + 1];
            c38 = (c38 >> s) + z[i + 1];
        }

        // c19 and c38 have weight 2^230: bit 25 is 2^255, bit 26 is 2^256.
        let r2 = (((c38 << 37) as i64) >> 63) as u64;
        let r1 = !r2 & ((((c19 << 38) as i64) >> 63) as u64);

        // Subtract 2*p (add 38, drop 2^256) or p (add 19 and 2^255,
        // drop 2^256).
        z[0] += (r2 & 38) | (r1 & 19);
        z[9] += r1 & (1u64 << 25);

        // Carry modulo 2^256 (not modulo p).
        let t = z[0] & MASK26; z[0] ^= t; z[1] += t >> 26;
        let t = z[1] & MASK25; z[1] ^= t; z[2] += t >> 25;
        let t = z[2] & MASK26; z[2] ^= t; z[3] += t >> 26;
        let t = z[3] & MASK25; z[3] ^= t; z[4] += t >> 25;
        let t = z[4] & MASK26; z[4] ^= t; z[5] += t >> 26;
        let t = z[5] & MASK25; z[5] ^= t; z[6] += t >> 25;
        let t = z[6] & MASK26; z[6] ^= t; z[7] += t >> 26;
        let t = z[7] & MASK25; z[7] ^= t; z[8] += t >> 25;
        let t = z[8] & MASK26; z[8] ^= t; z[9] += t >> 26;
        z[9] &= !MASK26;
    }

    fn set_mul(&mut self, rhs: &Self) {
        let f = &self.0;
        let g = &rhs.0;

        let mut g19 = [0u64; 10];
        for j in 1..10 {
            g19[j] = REDUCE19 * g[j];
        }
        let mut f2 = *f;
        for i in (1..10).step_by(2) {
            f2[i] = 2 * f[i];
        }

        // Round i adds f_i*g_j into h_{i+j}; when i+j >= 10 the product
        // wraps around 2^255 and uses 19*g_j instead. Products of two
        // odd-index limbs use 2*f_i.
        let mut h = [0u64; 10];
        for i in 0..10 {
            for j in 0..10 {
                let a = if (i & j & 1) != 0 { f2[i] } else { f[i] };
                if i + j < 10 {
                    h[i + j] += a * g[j];
                } else {
                    h[i + j - 10] += a * g19[j];
                }
            }
        }

        self.0 = h;
        self.set_carry();
    }

    fn set_square(&mut self) {
        let [f0, f1, f2, f3, f4, f5, f6, f7, f8, f9] = self.0;

        let f19_5 = REDUCE19 * f5;
        let f19_6 = REDUCE19 * f6;
        let f19_7 = REDUCE19 * f7;
        let f19_8 = REDUCE19 * f8;
        let f19_9 = REDUCE19 * f9;

        let f2_0 = 2 * f0;
        let f2_1 = 2 * f1;
        let f2_2 = 2 * f2;
        let f2_3 = 2 * f3;
        let f2_4 = 2 * f4;
        let f2_5 = 2 * f5;
        let f2_6 = 2 * f6;
        let f2_7 = 2 * f7;
        let f2_8 = 2 * f8;
        let f2_9 = 2 * f9;

        let f4_1 = 2 * f2_1;
        let f4_3 = 2 * f2_3;
        let f4_5 = 2 * f2_5;
        let f4_7 = 2 * f2_7;

        let h0 = f0 * f0 + f4_1 * f19_9 + f2_2 * f19_8 + f4_3 * f19_7
            + f2_4 * f19_6 + f2_5 * f19_5;
        let h1 = f2_0 * f1 + f2_2 * f19_9 + f2_3 * f19_8 + f2_4 * f19_7
            + f2_5 * f19_6;
        let h2 = f2_0 * f2 + f2_1 * f1 + f4_3 * f19_9 + f2_4 * f19_8
            + f4_5 * f19_7 + f6 * f19_6;
        let h3 = f2_0 * f3 + f2_1 * f2 + f2_4 * f19_9 + f2_5 * f19_8
            + f2_6 * f19_7;
        let h4 = f2_0 * f4 + f4_1 * f3 + f2 * f2 + f4_5 * f19_9
            + f2_6 * f19_8 + f2_7 * f19_7;
        let h5 = f2_0 * f5 + f2_1 * f4 + f2_2 * f3 + f2_6 * f19_9
            + f2_7 * f19_8;
        let h6 = f2_0 * f6 + f4_1 * f5 + f2_2 * f4 + f2_3 * f3
            + f4_7 * f19_9 + f8 * f19_8;
        let h7 = f2_0 * f7 + f2_1 * f6 + f2_2 * f5 + f2_3 * f4
            + f2_8 * f19_9;
        let h8 = f2_0 * f8 + f4_1 * f7 + f2_2 * f6 + f4_3 * f5 + f4 * f4
            + f2_9 * f19_9;
        let h9 = f2_0 * f9 + f2_1 * f8 + f2_2 * f7 + f2_3 * f6 + f2_4 * f5;

        self.0 = [h0, h1, h2, h3, h4, h5, h6, h7, h8, h9];
        self.set_carry();
    }

    #[inline]
    fn set_add_b(&mut self) {
        self.0[0] += CURVE_B;
    }

    fn set_mul_b(&mut self) {
        for i in 0..10 {
            self.0[i] *= CURVE_B;
        }
        self.set_carry();
    }

    #[inline]
    fn set_cond(&mut self, a: &Self, ctl: u32) {
        for i in 0..10 {
            self.0[i] = select64(self.0[i], a.0[i], ctl);
        }
    }

    #[inline]
    fn set_or_masked(&mut self, a: &Self, ctl: u32) {
        self.0.set_or_masked(&a.0, ctl);
    }

    fn iszero(self) -> u32 {
        let mut x = self;
        x.set_reduce();
        let mut t = 0;
        for i in 0..10 {
            t |= x.0[i];
        }
        zero_mask64(t)
    }
}

// ========================================================================
