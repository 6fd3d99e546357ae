use core::convert::TryFrom;

use crate::constants::{CURVE_B, FOUR_P_M51, MASK51, REDUCE19, TWO_P_M51};
use crate::ct::{select64, zero_mask64, Accumulate};
use crate::field::FieldElement;

/// Element of GF(2^255 - 19), five limbs in radix 2^51.
#[derive(Clone, Copy, Debug)]
pub struct GF25519M51([u64; 5]);

// 64x64->128 multiplication.
#[inline(always)]
fn m(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

impl GF25519M51 {

    // INTERNAL FORMAT
    // ===============
    //
    // Value is split over five unsigned limbs, in base 2^51:
    //   z0 + z1*2^51 + z2*2^102 + z3*2^153 + z4*2^204
    // The value is implicitly considered modulo p = 2^255 - 19.
    //
    // After set_carry() (and thus after mul, square and mul_b), limbs
    // z0, z2, z3 and z4 are lower than 2^51, and z1 is lower than
    // 2^51 + 2^13. Limbs of 2*p are 2^52-38 and 2^52-2 (at least one
    // carried limb), limbs of 4*p are 2^53-76 and 2^53-4 (at least three
    // carried limbs).
    //
    // Multiplications compute 128-bit products. With both operands below
    // 4 times the carried bound (i.e. below 2^53 + 2^15), and 19*b_j below
    // 2^58, each accumulated coefficient is below 5*2^111 < 2^114. The
    // top coefficient c4 has no wrapped terms and stays below 2^109, so
    // the carry out of it, multiplied by 19, fits in the low limb.

    /// Gets the raw limbs.
    #[cfg(test)]
    pub(crate) fn limbs(self) -> [u64; 5] {
        self.0
    }

    // Carry-propagate 128-bit coefficients into limbs.
    #[inline(always)]
    fn set_carry128(&mut self,
        c0: u128, mut c1: u128, mut c2: u128, mut c3: u128, mut c4: u128)
    {
        c1 += ((c0 >> 51) as u64) as u128;
        let mut z0 = (c0 as u64) & MASK51;
        c2 += ((c1 >> 51) as u64) as u128;
        let z1 = (c1 as u64) & MASK51;
        c3 += ((c2 >> 51) as u64) as u128;
        let z2 = (c2 as u64) & MASK51;
        c4 += ((c3 >> 51) as u64) as u128;
        let z3 = (c3 as u64) & MASK51;
        let h = (c4 >> 51) as u64;
        let z4 = (c4 as u64) & MASK51;

        debug_assert!(h < (1u64 << 59));
        z0 += REDUCE19 * h;
        self.0 = [z0 & MASK51, z1 + (z0 >> 51), z2, z3, z4];
    }
}

impl FieldElement for GF25519M51 {

    const ZERO: Self = Self([0; 5]);
    const ONE: Self = Self([1, 0, 0, 0, 0]);

    fn decode32(buf: &[u8; 32]) -> Self {
        let d0 = u64::from_le_bytes(*<&[u8; 8]>::try_from(&buf[ 0.. 8]).unwrap());
        let d1 = u64::from_le_bytes(*<&[u8; 8]>::try_from(&buf[ 8..16]).unwrap());
        let d2 = u64::from_le_bytes(*<&[u8; 8]>::try_from(&buf[16..24]).unwrap());
        let d3 = u64::from_le_bytes(*<&[u8; 8]>::try_from(&buf[24..32]).unwrap())
            & 0x7FFFFFFFFFFFFFFF;
        Self([
            d0 & MASK51,
            (d0 >> 51) | ((d1 << 13) & MASK51),
            (d1 >> 38) | ((d2 << 26) & MASK51),
            (d2 >> 25) | ((d3 << 39) & MASK51),
            d3 >> 12,
        ])
    }

    fn encode32(self) -> [u8; 32] {
        let mut x = self;
        x.set_reduce();
        let z = &x.0;
        let w0 = z[0] | (z[1] << 51);
        let w1 = (z[1] >> 13) | (z[2] << 38);
        let w2 = (z[2] >> 26) | (z[3] << 25);
        let w3 = (z[3] >> 39) | (z[4] << 12);
        let mut d = [0u8; 32];
        d[ 0.. 8].copy_from_slice(&w0.to_le_bytes());
        d[ 8..16].copy_from_slice(&w1.to_le_bytes());
        d[16..24].copy_from_slice(&w2.to_le_bytes());
        d[24..32].copy_from_slice(&w3.to_le_bytes());
        d
    }

    #[inline]
    fn set_add(&mut self, rhs: &Self) {
        for i in 0..5 {
            self.0[i] += rhs.0[i];
        }
    }

    #[inline]
    fn set_sub(&mut self, rhs: &Self) {
        for i in 0..5 {
            debug_assert!(self.0[i] >= rhs.0[i]);
            self.0[i] -= rhs.0[i];
        }
    }

    #[inline]
    fn set_add_2p(&mut self) {
        for i in 0..5 {
            self.0[i] += TWO_P_M51[i];
        }
    }

    #[inline]
    fn set_add_4p(&mut self) {
        for i in 0..5 {
            self.0[i] += FOUR_P_M51[i];
        }
    }

    fn set_carry(&mut self) {
        let z = &mut self.0;
        for i in 0..5 {
            debug_assert!(z[i] < (1u64 << 63));
        }
        z[1] += z[0] >> 51;
        z[0] &= MASK51;
        z[2] += z[1] >> 51;
        z[1] &= MASK51;
        z[3] += z[2] >> 51;
        z[2] &= MASK51;
        z[4] += z[3] >> 51;
        z[3] &= MASK51;
        z[0] += REDUCE19 * (z[4] >> 51);
        z[4] &= MASK51;
        z[1] += z[0] >> 51;
        z[0] &= MASK51;
    }

    fn set_reduce(&mut self) {
        let z = &mut self.0;

        // Top carries of z + 19 and z + 38: z >= p iff z + 19 >= 2^255,
        // and z >= 2*p iff z + 38 >= 2^256.
        let mut c19 = z[0] + 19;
        let mut c38 = z[0] + 38;
        for i in 1..5 {
            c19 = (c19 >> 51) + z[i];
            c38 = (c38 >> 51) + z[i];
        }
        let r2 = (((c38 << 11) as i64) >> 63) as u64;
        let r1 = !r2 & ((((c19 << 12) as i64) >> 63) as u64);

        z[0] += (r2 & 38) | (r1 & 19);
        z[4] += r1 & (1u64 << 51);

        // Carry modulo 2^256.
        z[1] += z[0] >> 51;
        z[0] &= MASK51;
        z[2] += z[1] >> 51;
        z[1] &= MASK51;
        z[3] += z[2] >> 51;
        z[2] &= MASK51;
        z[4] += z[3] >> 51;
        z[3] &= MASK51;
        z[4] &= MASK51;
    }

    fn set_mul(&mut self, rhs: &Self) {
        let a = &self.0;
        let b = &rhs.0;

        let b1_19 = REDUCE19 * b[1];
        let b2_19 = REDUCE19 * b[2];
        let b3_19 = REDUCE19 * b[3];
        let b4_19 = REDUCE19 * b[4];

        let c0 = m(a[0], b[0]) + m(a[4], b1_19) + m(a[3], b2_19)
            + m(a[2], b3_19) + m(a[1], b4_19);
        let c1 = m(a[1], b[0]) + m(a[0], b[1]) + m(a[4], b2_19)
            + m(a[3], b3_19) + m(a[2], b4_19);
        let c2 = m(a[2], b[0]) + m(a[1], b[1]) + m(a[0], b[2])
            + m(a[4], b3_19) + m(a[3], b4_19);
        let c3 = m(a[3], b[0]) + m(a[2], b[1]) + m(a[1], b[2])
            + m(a[0], b[3]) + m(a[4], b4_19);
        let c4 = m(a[4], b[0]) + m(a[3], b[1]) + m(a[2], b[2])
            + m(a[1], b[3]) + m(a[0], b[4]);

        self.set_carry128(c0, c1, c2, c3, c4);
    }

    fn set_square(&mut self) {
        let a = &self.0;
        let a3_19 = REDUCE19 * a[3];
        let a4_19 = REDUCE19 * a[4];

        let c0 = m(a[0], a[0]) + 2 * (m(a[1], a4_19) + m(a[2], a3_19));
        let c1 = m(a[3], a3_19) + 2 * (m(a[0], a[1]) + m(a[2], a4_19));
        let c2 = m(a[1], a[1]) + 2 * (m(a[0], a[2]) + m(a[4], a3_19));
        let c3 = m(a[4], a4_19) + 2 * (m(a[0], a[3]) + m(a[1], a[2]));
        let c4 = m(a[2], a[2]) + 2 * (m(a[0], a[4]) + m(a[1], a[3]));

        self.set_carry128(c0, c1, c2, c3, c4);
    }

    #[inline]
    fn set_add_b(&mut self) {
        self.0[0] += CURVE_B;
    }

    fn set_mul_b(&mut self) {
        // Loose inputs can exceed 2^52, so the products may not fit
        // in 64 bits.
        let z = self.0;
        self.set_carry128(
            m(z[0], CURVE_B), m(z[1], CURVE_B), m(z[2], CURVE_B),
            m(z[3], CURVE_B), m(z[4], CURVE_B));
    }

    #[inline]
    fn set_cond(&mut self, a: &Self, ctl: u32) {
        for i in 0..5 {
            self.0[i] = select64(self.0[i], a.0[i], ctl);
        }
    }

    #[inline]
    fn set_or_masked(&mut self, a: &Self, ctl: u32) {
        self.0.set_or_masked(&a.0, ctl);
    }

    fn iszero(self) -> u32 {
        let x = self.reduced();
        zero_mask64(x.0[0] | x.0[1] | x.0[2] | x.0[3] | x.0[4])
    }
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::GF25519M51;
    use crate::field::FieldElement;
    use crate::field::tests::test_gf;
    use num_bigint::{BigInt, Sign};

    fn limbs_value(z: [u64; 5]) -> BigInt {
        let mut r = BigInt::from(0u32);
        for i in 0..5 {
            r += BigInt::from(z[i]) << (51 * i);
        }
        r
    }

    #[test]
    fn gf25519_m51() {
        test_gf::<GF25519M51>();
    }

    #[test]
    fn decode_limbs() {
        // Every input byte lands in its limb; bit 255 is dropped.
        let mut buf = [0u8; 32];
        for i in 0..32 {
            buf[i] = (7 * i + 0x81) as u8;
        }
        let mut t = buf;
        t[31] &= 0x7F;
        let x = GF25519M51::decode32(&buf);
        let z = x.limbs();
        for i in 0..5 {
            assert!(z[i] < (1u64 << 51));
        }
        assert!(limbs_value(z) == BigInt::from_bytes_le(Sign::Plus, &t));
    }

    #[test]
    fn carry_bounds() {
        let p = (BigInt::from(1u32) << 255) - BigInt::from(19u32);

        let mut z = GF25519M51::ZERO;
        z.set_add_2p();
        assert!(limbs_value(z.limbs()) == &p * 2);
        let mut z = GF25519M51::ZERO;
        z.set_add_4p();
        assert!(limbs_value(z.limbs()) == &p * 4);

        let mut x = GF25519M51([(1u64 << 63) - 1; 5]);
        let v = limbs_value(x.limbs());
        x.set_carry();
        let z = x.limbs();
        for i in 0..5 {
            if i == 1 {
                assert!(z[i] < (1u64 << 51) + (1u64 << 13));
            } else {
                assert!(z[i] < (1u64 << 51));
            }
        }
        assert!((limbs_value(z) - v) % &p == BigInt::from(0u32));

        // Largest loose operands accepted by mul and square.
        let mut a = GF25519M51([(1u64 << 53) + (1u64 << 15); 5]);
        let va = limbs_value(a.limbs());
        let b = a;
        a.set_mul(&b);
        let enc = BigInt::from_bytes_le(Sign::Plus, &a.encode32());
        assert!(enc == (&va * &va) % &p);
        let mut s = b;
        s.set_square();
        assert!(s.encode32() == a.encode32());
    }
}
