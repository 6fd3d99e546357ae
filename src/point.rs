//! Curve13318 points and group law.
//!
//! Curve13318 is the short Weierstraß curve:
//!
//! ```text
//!     y^2 = x^3 - 3*x + 13318
//! ```
//!
//! over the field GF(2^255 - 19). Its group of points has prime order, so
//! there is no cofactor to handle and no point of order 2 (no point has
//! y = 0).
//!
//! Points are represented in projective coordinates (X:Y:Z), with
//! x = X/Z and y = Y/Z for non-neutral points. The neutral element
//! (point-at-infinity) is internally (0:1:0), and more generally any
//! (0:Y:0) with Y != 0; it never uses the invalid triplet (0:0:0).
//!
//! Point addition and doubling use the complete formulas from Renes,
//! Costello and Batina ([eprint 2015/1060]), algorithms 4 and 6 (for
//! curves with a = -3). They work for all inputs, including the neutral,
//! and for doubling through the addition routine; there is no special
//! case and no branch.
//!
//! # Encoding
//!
//! A point is encoded over 64 bytes: the affine x coordinate then the
//! affine y coordinate, each as 32 bytes in unsigned little-endian
//! convention. The neutral has no affine coordinates; it is encoded as
//! 64 bytes of value zero (the point (0, 0) is not on the curve, so this
//! is not ambiguous).
//!
//! When decoding, the top bit of each coordinate is ignored, and values
//! that are not lower than the field modulus are implicitly reduced.
//!
//! The group is generic over the field backend (`CurvePoint<F>`); the
//! `Point` type alias uses the backend selected at compile time.
//!
//! [eprint 2015/1060]: https://eprint.iacr.org/2015/1060

// Projective coordinates traditionally use uppercase letters.
#![allow(non_snake_case)]

use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::constants::GENERATOR;
use crate::error::Error;
use crate::field::{FieldElement, GF25519};

/// A point on Curve13318, in projective coordinates.
#[derive(Clone, Copy, Debug)]
pub struct CurvePoint<F: FieldElement> {
    pub(crate) X: F,
    pub(crate) Y: F,
    pub(crate) Z: F,
}

/// A point on Curve13318, using the default field backend.
pub type Point = CurvePoint<GF25519>;

// Helpers for the group law. Inputs are expected to be carried, except
// where noted.

// a + b (not carried)
#[inline(always)]
fn sum<F: FieldElement>(a: &F, b: &F) -> F {
    let mut r = *a;
    r.set_add(b);
    r
}

// 3*a (not carried)
#[inline(always)]
fn triple<F: FieldElement>(a: &F) -> F {
    let mut r = *a;
    r.set_add(a);
    r.set_add(a);
    r
}

// a + 2*p - b; b must be carried.
#[inline(always)]
fn sub_2p<F: FieldElement>(a: &F, b: &F) -> F {
    let mut r = *a;
    r.set_add_2p();
    r.set_sub(b);
    r
}

// a + 4*p - b; b may be the sum of up to three carried values.
#[inline(always)]
fn sub_4p<F: FieldElement>(a: &F, b: &F) -> F {
    let mut r = *a;
    r.set_add_4p();
    r.set_sub(b);
    r
}

#[inline(always)]
fn carried<F: FieldElement>(a: F) -> F {
    let mut r = a;
    r.set_carry();
    r
}

#[inline(always)]
fn mul_b<F: FieldElement>(a: &F) -> F {
    let mut r = *a;
    r.set_mul_b();
    r
}

impl<F: FieldElement> CurvePoint<F> {

    /// The neutral element (point-at-infinity) in the curve.
    pub const NEUTRAL: Self = Self {
        X: F::ZERO,
        Y: F::ONE,
        Z: F::ZERO,
    };

    /// Returns the conventional generator G = (5, y) (with y even).
    pub fn generator() -> Self {
        let mut P = Self::NEUTRAL;
        let r = P.set_decode(&GENERATOR);
        debug_assert!(r == 0xFFFFFFFF);
        P
    }

    /// Tries to decode a point from 64 bytes.
    ///
    /// The 64 bytes are the two affine coordinates x and y (little-endian,
    /// top bit of each coordinate ignored). If both coordinates decode
    /// to zero, then this is the neutral. Otherwise, the coordinates must
    /// fulfill the curve equation.
    ///
    /// On success, this structure is set to the decoded point, and
    /// 0xFFFFFFFF is returned. On failure, this structure is set to the
    /// neutral point, and 0x00000000 is returned.
    ///
    /// Constant-time behaviour: neither the point value nor the outcome
    /// (success, failure, neutral) leaks through timing-based side
    /// channels.
    pub fn set_decode(&mut self, buf: &[u8; 64]) -> u32 {
        let mut bx = [0u8; 32];
        let mut by = [0u8; 32];
        bx.copy_from_slice(&buf[..32]);
        by.copy_from_slice(&buf[32..]);
        let x = F::decode32(&bx);
        let y = F::decode32(&by);

        // All-zero coordinates encode the neutral.
        let zn = x.iszero() & y.iszero();

        // Check the curve equation: y^2 = x^3 - 3*x + b
        let mut rhs = sub_4p(&x.square().mul(&x), &triple(&x));
        rhs.set_add_b();
        rhs.set_carry();
        let ok = y.square().equals(rhs) & !zn;

        self.X = F::select(&F::ZERO, &x, ok);
        self.Y = F::select(&F::ONE, &y, ok);
        self.Z = F::select(&F::ZERO, &F::ONE, ok);
        ok | zn
    }

    /// Tries to decode a point from 64 bytes.
    ///
    /// See `set_decode()` for the accepted encodings. On success, the
    /// decoded point is returned; on failure, `None` is returned.
    pub fn decode(buf: &[u8; 64]) -> Option<Self> {
        let mut P = Self::NEUTRAL;
        if P.set_decode(buf) != 0 {
            Some(P)
        } else {
            None
        }
    }

    /// Decodes a point from 64 bytes, reporting `Error::InvalidPoint`
    /// if the encoding is neither a curve point nor the neutral.
    ///
    /// Side-channel analysis may reveal whether the decoding succeeded
    /// (but not the point value).
    pub fn from_bytes(buf: &[u8; 64]) -> Result<Self, Error> {
        Self::decode(buf).ok_or(Error::InvalidPoint)
    }

    /// Encodes this point into 64 bytes (affine x, then affine y).
    ///
    /// The neutral is encoded as 64 zeros: Z = 0 inverts to 0, which
    /// makes both coordinates zero.
    pub fn encode(self) -> [u8; 64] {
        let iZ = self.Z.invert();
        let x = self.X.mul(&iZ);
        let y = self.Y.mul(&iZ);
        let mut r = [0u8; 64];
        r[..32].copy_from_slice(&x.encode32());
        r[32..].copy_from_slice(&y.encode32());
        r
    }

    /// Adds point `rhs` to `self`.
    pub fn set_add(&mut self, rhs: &Self) {
        let (X1, Y1, Z1) = (&self.X, &self.Y, &self.Z);
        let (X2, Y2, Z2) = (&rhs.X, &rhs.Y, &rhs.Z);

        // Renes-Costello-Batina 2015, algorithm 4 (a = -3). Comments give
        // the bound on each live value, in multiples of a carried value.
        let t0 = X1.mul(X2);
        let t1 = Y1.mul(Y2);
        let t2 = Z1.mul(Z2);
        let t3 = sum(X1, Y1).mul(&sum(X2, Y2));
        let t3 = carried(sub_4p(&t3, &sum(&t0, &t1)));
        let t4 = sum(Y1, Z1).mul(&sum(Y2, Z2));
        let t4 = carried(sub_4p(&t4, &sum(&t1, &t2)));
        let X3 = sum(X1, Z1).mul(&sum(X2, Z2));
        let Y3 = carried(sub_4p(&X3, &sum(&t0, &t2)));
        let Z3 = mul_b(&t2);
        let X3 = carried(sub_2p(&Y3, &Z3));
        let X3 = triple(&X3);                                   // 3
        let Z3 = carried(sub_4p(&t1, &X3));
        let X3 = sum(&t1, &X3);                                 // 4
        let Y3 = mul_b(&Y3);
        let t2 = triple(&t2);                                   // 3
        let Y3 = carried(sub_2p(&sub_4p(&Y3, &t2), &t0));
        let Y3 = triple(&Y3);                                   // 3
        let t0 = carried(sub_4p(&triple(&t0), &t2));
        let t1 = t4.mul(&Y3);
        let t2 = t0.mul(&Y3);
        let Y3 = carried(sum(&X3.mul(&Z3), &t2));
        let X3 = carried(sub_2p(&X3.mul(&t3), &t1));
        let Z3 = carried(sum(&t4.mul(&Z3), &t3.mul(&t0)));

        self.X = X3;
        self.Y = Y3;
        self.Z = Z3;
    }

    /// Adds two points.
    #[inline(always)]
    pub fn add(self, rhs: &Self) -> Self {
        let mut r = self;
        r.set_add(rhs);
        r
    }

    /// Doubles this point (in place).
    ///
    /// This function is somewhat faster than using plain point addition.
    pub fn set_double(&mut self) {
        let (X, Y, Z) = (&self.X, &self.Y, &self.Z);

        // Renes-Costello-Batina 2015, algorithm 6 (a = -3).
        let t0 = X.square();
        let t1 = Y.square();
        let t2 = Z.square();
        let t3 = X.mul(Y);
        let t3 = sum(&t3, &t3);                                 // 2
        let Z3 = X.mul(Z);
        let Z3 = sum(&Z3, &Z3);                                 // 2
        let Y3 = carried(sub_4p(&mul_b(&t2), &Z3));
        let Y3 = triple(&Y3);                                   // 3
        let X3 = carried(sub_4p(&t1, &Y3));
        let Y3 = sum(&t1, &Y3);                                 // 4
        let Y3 = X3.mul(&Y3);
        let X3 = X3.mul(&t3);
        let t2 = triple(&t2);                                   // 3
        let Z3 = carried(sub_2p(&sub_4p(&mul_b(&Z3), &t2), &t0));
        let Z3 = triple(&Z3);                                   // 3
        let t0 = carried(sub_4p(&triple(&t0), &t2));
        let t0 = t0.mul(&Z3);
        let Y3 = carried(sum(&Y3, &t0));
        let t0 = Y.mul(Z);
        let t0 = sum(&t0, &t0);                                 // 2
        let Z3 = t0.mul(&Z3);
        let X3 = carried(sub_2p(&X3, &Z3));
        let Z3 = t0.mul(&t1);
        let Z3 = sum(&Z3, &Z3);
        let Z3 = carried(sum(&Z3, &Z3));

        self.X = X3;
        self.Y = Y3;
        self.Z = Z3;
    }

    /// Doubles this point.
    #[inline(always)]
    pub fn double(self) -> Self {
        let mut r = self;
        r.set_double();
        r
    }

    /// Doubles this point n times (in place).
    pub fn set_xdouble(&mut self, n: u32) {
        for _ in 0..n {
            self.set_double();
        }
    }

    /// Doubles this point n times.
    #[inline(always)]
    pub fn xdouble(self, n: u32) -> Self {
        let mut r = self;
        r.set_xdouble(n);
        r
    }

    /// Negates this point (in place).
    #[inline(always)]
    pub fn set_neg(&mut self) {
        self.Y.set_neg();
    }

    /// Subtracts point `rhs` from `self`.
    #[inline(always)]
    pub fn set_sub(&mut self, rhs: &Self) {
        self.set_add(&rhs.neg());
    }

    /// Compares two points for equality.
    ///
    /// Returned value is 0xFFFFFFFF if the two points are equal,
    /// 0x00000000 otherwise.
    #[inline]
    pub fn equals(self, rhs: Self) -> u32 {
        // Y != 0 for all points (including the neutral), so the test on
        // Y cannot match between a neutral and a non-neutral point.
        self.X.mul(&rhs.Z).equals(rhs.X.mul(&self.Z))
        & self.Y.mul(&rhs.Z).equals(rhs.Y.mul(&self.Z))
    }

    /// Tests whether this point is the neutral (point-at-infinity).
    ///
    /// Returned value is 0xFFFFFFFF for the neutral, 0x00000000 otherwise.
    #[inline(always)]
    pub fn isneutral(self) -> u32 {
        self.Z.iszero()
    }

    /// Conditionally copies the provided point (`P`) into `self`.
    ///
    ///  - If `ctl` is 0xFFFFFFFF, then the value of `P` is copied into `self`.
    ///
    ///  - if `ctl` is 0x00000000, then the value of `self` is unchanged.
    ///
    /// Value `ctl` MUST be either 0x00000000 or 0xFFFFFFFF.
    #[inline]
    pub fn set_cond(&mut self, P: &Self, ctl: u32) {
        self.X.set_cond(&P.X, ctl);
        self.Y.set_cond(&P.Y, ctl);
        self.Z.set_cond(&P.Z, ctl);
    }

    /// Returns a point equal to `P0` (if `ctl` = 0x00000000) or `P1` (if
    /// `ctl` = 0xFFFFFFFF).
    ///
    /// Value `ctl` MUST be either 0x00000000 or 0xFFFFFFFF.
    #[inline(always)]
    pub fn select(P0: &Self, P1: &Self, ctl: u32) -> Self {
        let mut P = *P0;
        P.set_cond(P1, ctl);
        P
    }

    /// Conditionally negates this point.
    ///
    /// This point is negated if `ctl` = 0xFFFFFFFF, but kept unchanged
    /// if `ctl` = 0x00000000.
    #[inline]
    pub fn set_condneg(&mut self, ctl: u32) {
        let nY = self.Y.neg();
        self.Y.set_cond(&nY, ctl);
    }
}

impl<F: FieldElement> Add<CurvePoint<F>> for CurvePoint<F> {
    type Output = CurvePoint<F>;

    #[inline(always)]
    fn add(self, other: CurvePoint<F>) -> CurvePoint<F> {
        let mut r = self;
        r.set_add(&other);
        r
    }
}

impl<F: FieldElement> Add<&CurvePoint<F>> for CurvePoint<F> {
    type Output = CurvePoint<F>;

    #[inline(always)]
    fn add(self, other: &CurvePoint<F>) -> CurvePoint<F> {
        let mut r = self;
        r.set_add(other);
        r
    }
}

impl<F: FieldElement> Add<CurvePoint<F>> for &CurvePoint<F> {
    type Output = CurvePoint<F>;

    #[inline(always)]
    fn add(self, other: CurvePoint<F>) -> CurvePoint<F> {
        let mut r = *self;
        r.set_add(&other);
        r
    }
}

impl<F: FieldElement> Add<&CurvePoint<F>> for &CurvePoint<F> {
    type Output = CurvePoint<F>;

    #[inline(always)]
    fn add(self, other: &CurvePoint<F>) -> CurvePoint<F> {
        let mut r = *self;
        r.set_add(other);
        r
    }
}

impl<F: FieldElement> AddAssign<CurvePoint<F>> for CurvePoint<F> {
    #[inline(always)]
    fn add_assign(&mut self, other: CurvePoint<F>) {
        self.set_add(&other);
    }
}

impl<F: FieldElement> AddAssign<&CurvePoint<F>> for CurvePoint<F> {
    #[inline(always)]
    fn add_assign(&mut self, other: &CurvePoint<F>) {
        self.set_add(other);
    }
}

impl<F: FieldElement> Neg for CurvePoint<F> {
    type Output = CurvePoint<F>;

    #[inline(always)]
    fn neg(self) -> CurvePoint<F> {
        let mut r = self;
        r.set_neg();
        r
    }
}

impl<F: FieldElement> Neg for &CurvePoint<F> {
    type Output = CurvePoint<F>;

    #[inline(always)]
    fn neg(self) -> CurvePoint<F> {
        let mut r = *self;
        r.set_neg();
        r
    }
}

impl<F: FieldElement> Sub<CurvePoint<F>> for CurvePoint<F> {
    type Output = CurvePoint<F>;

    #[inline(always)]
    fn sub(self, other: CurvePoint<F>) -> CurvePoint<F> {
        let mut r = self;
        r.set_sub(&other);
        r
    }
}

impl<F: FieldElement> Sub<&CurvePoint<F>> for CurvePoint<F> {
    type Output = CurvePoint<F>;

    #[inline(always)]
    fn sub(self, other: &CurvePoint<F>) -> CurvePoint<F> {
        let mut r = self;
        r.set_sub(other);
        r
    }
}

impl<F: FieldElement> Sub<CurvePoint<F>> for &CurvePoint<F> {
    type Output = CurvePoint<F>;

    #[inline(always)]
    fn sub(self, other: CurvePoint<F>) -> CurvePoint<F> {
        let mut r = *self;
        r.set_sub(&other);
        r
    }
}

impl<F: FieldElement> Sub<&CurvePoint<F>> for &CurvePoint<F> {
    type Output = CurvePoint<F>;

    #[inline(always)]
    fn sub(self, other: &CurvePoint<F>) -> CurvePoint<F> {
        let mut r = *self;
        r.set_sub(other);
        r
    }
}

impl<F: FieldElement> SubAssign<CurvePoint<F>> for CurvePoint<F> {
    #[inline(always)]
    fn sub_assign(&mut self, other: CurvePoint<F>) {
        self.set_sub(&other);
    }
}

impl<F: FieldElement> SubAssign<&CurvePoint<F>> for CurvePoint<F> {
    #[inline(always)]
    fn sub_assign(&mut self, other: &CurvePoint<F>) {
        self.set_sub(other);
    }
}

// ========================================================================

#[cfg(test)]
pub(crate) mod tests {

    use super::CurvePoint;
    use crate::backend::{GF25519M25, GF25519M51};
    use crate::error::Error;
    use crate::field::FieldElement;
    use num_bigint::{BigInt, Sign};
    use sha2::{Sha256, Digest};

    pub(crate) fn hex64(s: &str) -> [u8; 64] {
        let mut r = [0u8; 64];
        hex::decode_to_slice(s, &mut r[..]).unwrap();
        r
    }

    // Encodings of k*G.
    pub(crate) static KG: [(u64, &str); 5] = [
        (2, "6aa9c560473836cde1fb2d293464f61560243f948835aae859e97ce21e27cb7843cee7ec9ed988f89f050305e330c62ef8d3cdff317b9ae6bbff876bc5ac0f4f"),
        (3, "618f2127098d792ed71e3edf86302cfacff2b6ed9ce657cb7a710e4f9d5a467fddfa9af3923541c002987c24695fabb82116ef622222eb44f53b62b7ca11ab26"),
        (16, "833490d21bf27e0e963f5f11f134dd81f8b13f5f79939d8ab6b63d013df8b6726574e722dd7f777eddc152b86c1adb98ea7fd99ab247d7a98b79a84e34560a64"),
        (17, "dacd4cf6707dd106646232cc86261e38e58cd10370d58507b4bf70a6ae62033f400e772734f42c03960bf3c7fd26dc3ccdbafe8bef97c864292b42ffb1771e09"),
        (0xdeadbeef, "2a347c777ad51f76afbe6eaa90d52bdae531a2056bf65aa8a097865b0677124847bc87d51862647659472060c30818d0a87ff4c129a7bdcffe0a54ef65c8f90c"),
    ];

    // Affine arithmetic over big integers; None is the neutral.
    type Affine = Option<(BigInt, BigInt)>;

    fn modulus() -> BigInt {
        (BigInt::from(1u32) << 255) - BigInt::from(19u32)
    }

    fn md(x: BigInt) -> BigInt {
        let p = modulus();
        ((x % &p) + &p) % &p
    }

    fn inv(x: &BigInt) -> BigInt {
        let p = modulus();
        x.modpow(&(&p - BigInt::from(2u32)), &p)
    }

    fn ref_add(a: &Affine, b: &Affine) -> Affine {
        let (x1, y1) = match a {
            None => return b.clone(),
            Some(v) => v,
        };
        let (x2, y2) = match b {
            None => return a.clone(),
            Some(v) => v,
        };
        let lambda = if x1 == x2 {
            if md(y1 + y2) == BigInt::from(0u32) {
                return None;
            }
            md((x1 * x1 * 3u32 - 3u32) * inv(&md(y1 * 2u32)))
        } else {
            md((y2 - y1) * inv(&md(x2 - x1)))
        };
        let x3 = md(&lambda * &lambda - x1 - x2);
        let y3 = md(&lambda * (x1 - &x3) - y1);
        Some((x3, y3))
    }

    fn ref_decode(buf: &[u8; 64]) -> Affine {
        if buf.iter().all(|&b| b == 0) {
            return None;
        }
        Some((BigInt::from_bytes_le(Sign::Plus, &buf[..32]),
            BigInt::from_bytes_le(Sign::Plus, &buf[32..])))
    }

    fn ref_encode(a: &Affine) -> [u8; 64] {
        let mut r = [0u8; 64];
        if let Some((x, y)) = a {
            let (_, bx) = x.to_bytes_le();
            let (_, by) = y.to_bytes_le();
            r[..bx.len()].copy_from_slice(&bx);
            r[32..(32 + by.len())].copy_from_slice(&by);
        }
        r
    }

    // Same projective point with coordinates multiplied by a non-zero
    // factor.
    fn rescale<F: FieldElement>(P: &CurvePoint<F>, seed: u64)
        -> CurvePoint<F>
    {
        let mut sh = Sha256::new();
        sh.update(seed.to_le_bytes());
        let mut t = [0u8; 32];
        t.copy_from_slice(&sh.finalize()[..]);
        let k = F::decode32(&t);
        CurvePoint { X: P.X.mul(&k), Y: P.Y.mul(&k), Z: P.Z.mul(&k) }
    }

    fn check_point_ops<F: FieldElement>() {
        let G = CurvePoint::<F>::generator();
        assert!(G.encode() == crate::constants::GENERATOR);
        assert!(G.isneutral() == 0);

        // Vectors, through doublings and additions.
        let P2 = G.double();
        assert!(P2.encode() == hex64(KG[0].1));
        assert!(G.add(&G).equals(P2) == 0xFFFFFFFF);
        let P3 = P2 + G;
        assert!(P3.encode() == hex64(KG[1].1));
        assert!((G + P2).equals(P3) == 0xFFFFFFFF);
        let P16 = G.xdouble(4);
        assert!(P16.encode() == hex64(KG[2].1));
        let P17 = P16 + &G;
        assert!(P17.encode() == hex64(KG[3].1));
        assert!((P17 - P16).equals(G) == 0xFFFFFFFF);
        assert!((P3.double() - P3 - P2).equals(G) == 0xFFFFFFFF);

        // Neutral.
        let N = CurvePoint::<F>::NEUTRAL;
        assert!(N.isneutral() == 0xFFFFFFFF);
        assert!(N.encode() == [0u8; 64]);
        assert!(N.double().isneutral() == 0xFFFFFFFF);
        assert!((N + N).isneutral() == 0xFFFFFFFF);
        assert!((G + N).equals(G) == 0xFFFFFFFF);
        assert!((N + G).equals(G) == 0xFFFFFFFF);
        assert!((G - G).isneutral() == 0xFFFFFFFF);
        assert!((G - G).encode() == [0u8; 64]);
        assert!((G + (-G)).equals(N) == 0xFFFFFFFF);
        assert!(N.equals(G) == 0);
        assert!(G.equals(N) == 0);
        let mut Q = N;
        assert!(Q.set_decode(&[0u8; 64]) == 0xFFFFFFFF);
        assert!(Q.isneutral() == 0xFFFFFFFF);

        // Negation.
        let nG = -G;
        let enc = nG.encode();
        assert!(enc[..32] == G.encode()[..32]);
        let y = BigInt::from_bytes_le(Sign::Plus, &G.encode()[32..]);
        let ny = BigInt::from_bytes_le(Sign::Plus, &enc[32..]);
        assert!(y + ny == modulus());
        assert!((-nG).equals(G) == 0xFFFFFFFF);
        let mut Q = G;
        Q.set_condneg(0);
        assert!(Q.equals(G) == 0xFFFFFFFF);
        Q.set_condneg(0xFFFFFFFF);
        assert!(Q.equals(nG) == 0xFFFFFFFF);

        // Projective equality.
        let R = rescale(&P17, 1);
        assert!(R.equals(P17) == 0xFFFFFFFF);
        assert!(R.encode() == P17.encode());
        assert!(R.equals(P16) == 0);
        assert!(CurvePoint::select(&P2, &P3, 0).equals(P2) == 0xFFFFFFFF);
        assert!(CurvePoint::select(&P2, &P3, 0xFFFFFFFF).equals(P3) == 0xFFFFFFFF);

        // Group law on arbitrary representations (including the
        // neutral) against the affine reference.
        let pts = [N, G, P2, P3, P16, P17, -P3, rescale(&G, 2)];
        for (i, A) in pts.iter().enumerate() {
            let ra = ref_decode(&A.encode());
            let Ar = rescale(A, 100 + i as u64);
            assert!(A.double().encode() == ref_encode(&ref_add(&ra, &ra)));
            assert!(Ar.double().encode() == A.double().encode());
            for B in pts.iter() {
                let rb = ref_decode(&B.encode());
                let e = ref_encode(&ref_add(&ra, &rb));
                assert!((A + B).encode() == e);
                assert!((Ar + B).encode() == e);
            }
        }

        // Chained additions keep carried coordinates.
        let mut Q = G;
        let mut rq = ref_decode(&G.encode());
        let rg = rq.clone();
        for _ in 0..20 {
            Q = (Q + G).double();
            let t = ref_add(&rq, &rg);
            rq = ref_add(&t, &t);
        }
        assert!(Q.encode() == ref_encode(&rq));

        // Decoding.
        for v in KG.iter() {
            let buf = hex64(v.1);
            let P = CurvePoint::<F>::decode(&buf).unwrap();
            assert!(P.encode() == buf);
            let mut bad = buf;
            bad[32] ^= 0x01;
            assert!(CurvePoint::<F>::decode(&bad).is_none());
            match CurvePoint::<F>::from_bytes(&bad) {
                Err(Error::InvalidPoint) => (),
                _ => panic!("accepted invalid point"),
            }
            let mut Q = G;
            assert!(Q.set_decode(&bad) == 0);
            assert!(Q.isneutral() == 0xFFFFFFFF);
        }

        // (0, 0) is the neutral, (0, 1) and (1, 0) are invalid.
        let mut buf = [0u8; 64];
        buf[32] = 1;
        assert!(CurvePoint::<F>::decode(&buf).is_none());
        buf[32] = 0;
        buf[0] = 1;
        assert!(CurvePoint::<F>::decode(&buf).is_none());

        // Top bits of the coordinates are ignored.
        let mut buf = G.encode();
        buf[31] |= 0x80;
        buf[63] |= 0x80;
        assert!(CurvePoint::<F>::decode(&buf).unwrap().equals(G) == 0xFFFFFFFF);
    }

    #[test]
    fn point_m25() {
        check_point_ops::<GF25519M25>();
    }

    #[test]
    fn point_m51() {
        check_point_ops::<GF25519M51>();
    }
}
