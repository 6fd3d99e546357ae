//! Diffie-Hellman key exchange over Curve13318.
//!
//! A private key is a non-zero 255-bit scalar (32 bytes, little-endian,
//! top bit cleared); the public key is the corresponding multiple of the
//! conventional generator, encoded over 64 bytes (see `point`).
//!
//! The key exchange computes the shared point, then derives the 32-byte
//! shared key with SHA-256 over:
//!
//!  - the two encoded public keys, lowest first (in lexicographic order
//!    of the byte strings);
//!
//!  - a single byte of value 0x53 on success, or 0x46 on failure;
//!
//!  - the 64-byte encoding of the shared point (on failure, the private
//!    key bytes are used instead, followed by zeros).
//!
//! On failure (peer key of invalid length, not on the curve, or neutral)
//! a key is still returned, along with a zero status mask. That key
//! cannot be computed by outsiders but is deterministic for a given
//! private key and peer input, and the failure path has the same timing
//! as the success path (for inputs of the correct length).

// Projective coordinates traditionally use uppercase letters.
#![allow(non_snake_case)]

use core::convert::TryFrom;

use rand_core::{CryptoRng, RngCore};
use sha2::{Sha256, Digest};

use crate::ct::select8;
use crate::error::Error;
use crate::point::Point;

/// A Curve13318 private key.
///
/// Such a key wraps around a secret non-zero scalar. It also contains
/// a copy of the public key.
#[derive(Clone, Copy, Debug)]
pub struct PrivateKey {
    sec: [u8; 32],              // secret scalar
    pub public_key: PublicKey,  // public key
}

/// A Curve13318 public key.
///
/// It wraps around a curve point, but also includes a copy of the
/// encoded point. The point and its encoded version can be accessed
/// directly; if modified, then the two values MUST match.
#[derive(Clone, Copy, Debug)]
pub struct PublicKey {
    pub point: Point,
    pub encoded: [u8; 64],
}

impl PrivateKey {

    /// Generates a new private key from a cryptographically secure RNG.
    pub fn generate<T: CryptoRng + RngCore>(rng: &mut T) -> Self {
        loop {
            let mut tmp = [0u8; 32];
            rng.fill_bytes(&mut tmp);
            tmp[31] &= 0x7F;
            if let Some(sk) = Self::from_secret(&tmp) {
                return sk;
            }
        }
    }

    // Builds a private key from its (already masked) scalar; returns
    // None if the scalar yields the neutral (e.g. the zero scalar).
    fn from_secret(sec: &[u8; 32]) -> Option<Self> {
        let point = Point::generator().mul(sec);
        if point.isneutral() != 0 {
            return None;
        }
        let encoded = point.encode();
        Some(Self { sec: *sec, public_key: PublicKey { point, encoded } })
    }

    /// Instantiates a private key by decoding it from bytes.
    ///
    /// The source must have length exactly 32 bytes, with the top bit of
    /// the last byte cleared, and must not encode a scalar that maps to
    /// the neutral (such as zero); otherwise, `None` is returned.
    pub fn decode(buf: &[u8]) -> Option<Self> {
        let sec = <[u8; 32]>::try_from(buf).ok()?;
        if (sec[31] & 0x80) != 0 {
            return None;
        }
        Self::from_secret(&sec)
    }

    /// Encodes a private key into bytes.
    ///
    /// This returns the private scalar (exactly 32 bytes).
    pub fn encode(self) -> [u8; 32] {
        self.sec
    }

    /// ECDH key exchange.
    ///
    /// Given this private key, and the provided peer public key (encoded),
    /// return the 32-byte shared key. The process fails if the `peer_pk`
    /// slice does not have length exactly 64 bytes, or does not encode
    /// a valid curve point, or encodes the neutral. On success, the
    /// 32-byte key is returned along with 0xFFFFFFFFu32. On failure, a
    /// different key (unguessable by outsiders) is returned, along with
    /// 0x00000000u32.
    ///
    /// Processing is constant-time. If the `peer_pk` slice has length
    /// exactly 64 bytes, then outsiders cannot know through timing-based
    /// side-channels whether the process succeeded or failed.
    pub fn ecdh(&self, peer_pk: &[u8]) -> ([u8; 32], u32) {
        // Decode peer public key.
        let mut Q = Point::NEUTRAL;
        let mut ok = match <&[u8; 64]>::try_from(peer_pk) {
            Ok(buf) => Q.set_decode(buf),
            Err(_) => 0,
        };
        ok &= !Q.isneutral();

        // Compute shared output. If the process failed, our private key
        // is used instead.
        let mut shared = Q.mul(&self.sec).encode();
        let mut alt = [0u8; 64];
        alt[..32].copy_from_slice(&self.sec);
        for i in 0..64 {
            shared[i] = select8(alt[i], shared[i], ok);
        }

        let mut sh = Sha256::new();

        // If the source slice did not have length 64 bytes, then the
        // exchange necessarily fails and we do not bother with ordering
        // the public keys.
        if peer_pk.len() == 64 {
            // Compare the two public keys lexicographically, so that
            // we inject the "lowest" first.
            let mut cc = 0u32;
            for i in (0..64).rev() {
                let v1 = self.public_key.encoded[i] as u32;
                let v2 = peer_pk[i] as u32;
                cc = v1.wrapping_sub(v2 + cc) >> 31;
            }
            let z1 = cc.wrapping_neg() as u8;
            let z2 = !z1;
            let mut pk1 = [0u8; 64];
            let mut pk2 = [0u8; 64];
            for i in 0..64 {
                let b1 = self.public_key.encoded[i];
                let b2 = peer_pk[i];
                pk1[i] = (b1 & z1) | (b2 & z2);
                pk2[i] = (b1 & z2) | (b2 & z1);
            }
            sh.update(&pk1);
            sh.update(&pk2);
        } else {
            sh.update(&self.public_key.encoded);
            sh.update(peer_pk);
        }

        // Status byte: success (0x53) or failure (0x46).
        sh.update(&[(0x46 + (ok & 0x0D)) as u8]);
        sh.update(&shared);

        let mut key = [0u8; 32];
        key[..].copy_from_slice(&sh.finalize());
        (key, ok)
    }
}

impl PublicKey {

    /// Creates an instance from a curve point.
    ///
    /// A panic is triggered if the point is the neutral.
    pub fn from_point(point: &Point) -> Self {
        assert!(point.isneutral() == 0);
        Self { point: *point, encoded: point.encode() }
    }

    /// Decodes the provided bytes as a public key.
    ///
    /// If the bytes do not encode a valid curve point, or encode the
    /// neutral, then `Error::InvalidPoint` is returned.
    pub fn from_bytes(buf: &[u8; 64]) -> Result<Self, Error> {
        let point = Point::from_bytes(buf)?;
        if point.isneutral() != 0 {
            return Err(Error::InvalidPoint);
        }
        Ok(Self { point, encoded: point.encode() })
    }

    /// Encodes this public key into exactly 64 bytes.
    ///
    /// This simply returns the contents of the `encoded` field.
    pub fn encode(self) -> [u8; 64] {
        self.encoded
    }
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::{PrivateKey, PublicKey};
    use crate::constants::GENERATOR;
    use crate::error::Error;
    use crate::point::Point;
    use crate::point::tests::{hex64, KG};
    use rand_core::{CryptoRng, RngCore, Error as RngError};
    use sha2::{Sha256, Digest};

    // A pretend RNG for test purposes (deterministic from a given seed).
    struct DRNG {
        buf: [u8; 32],
        ptr: usize,
    }

    impl DRNG {

        fn from_seed(seed: &[u8]) -> Self {
            let mut d = Self {
                buf: [0u8; 32],
                ptr: 0,
            };
            let mut sh = Sha256::new();
            sh.update(seed);
            d.buf[..].copy_from_slice(&sh.finalize());
            d
        }
    }

    impl RngCore for DRNG {

        fn next_u32(&mut self) -> u32 {
            let mut buf = [0u8; 4];
            self.fill_bytes(&mut buf);
            u32::from_le_bytes(buf)
        }

        fn next_u64(&mut self) -> u64 {
            let mut buf = [0u8; 8];
            self.fill_bytes(&mut buf);
            u64::from_le_bytes(buf)
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let len = dest.len();
            let mut off = 0;
            while off < len {
                let mut clen = 32 - self.ptr;
                if clen > (len - off) {
                    clen = len - off;
                }
                dest[off .. off + clen].copy_from_slice(
                    &self.buf[self.ptr .. self.ptr + clen]);
                self.ptr += clen;
                off += clen;
                if self.ptr == 32 {
                    let mut sh = Sha256::new();
                    sh.update(&self.buf);
                    self.buf[..].copy_from_slice(&sh.finalize());
                    self.ptr = 0;
                }
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8])
            -> Result<(), RngError>
        {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for DRNG { }

    #[test]
    fn keys() {
        // Private key 2 has public key 2*G.
        let mut buf = [0u8; 32];
        buf[0] = 2;
        let sk = PrivateKey::decode(&buf).unwrap();
        assert!(sk.encode() == buf);
        assert!(sk.public_key.encode() == hex64(KG[0].1));
        assert!(sk.public_key.point.equals(Point::generator().double()) == 0xFFFFFFFF);

        // Invalid private keys.
        assert!(PrivateKey::decode(&[0u8; 32]).is_none());
        assert!(PrivateKey::decode(&buf[..31]).is_none());
        let mut b2 = buf;
        b2[31] = 0x80;
        assert!(PrivateKey::decode(&b2).is_none());

        // Public keys.
        let pk = PublicKey::from_bytes(&GENERATOR).unwrap();
        assert!(pk.encode() == GENERATOR);
        assert!(PublicKey::from_point(&Point::generator()).encode() == GENERATOR);
        assert!(PublicKey::from_bytes(&[0u8; 64]).err() == Some(Error::InvalidPoint));
        let mut bad = GENERATOR;
        bad[40] ^= 0x10;
        assert!(PublicKey::from_bytes(&bad).err() == Some(Error::InvalidPoint));

        // Generated keys.
        let mut rng = DRNG::from_seed(b"curve13318 keys");
        for _ in 0..5 {
            let sk = PrivateKey::generate(&mut rng);
            let e = sk.encode();
            assert!((e[31] & 0x80) == 0);
            let sk2 = PrivateKey::decode(&e).unwrap();
            assert!(sk2.public_key.encode() == sk.public_key.encode());
        }
    }

    #[test]
    #[should_panic]
    fn public_key_neutral() {
        let _ = PublicKey::from_point(&Point::NEUTRAL);
    }

    #[test]
    fn ecdh() {
        let mut rng = DRNG::from_seed(b"curve13318 ecdh");
        for _ in 0..10 {
            let sk1 = PrivateKey::generate(&mut rng);
            let sk2 = PrivateKey::generate(&mut rng);
            let pk1 = sk1.public_key.encode();
            let pk2 = sk2.public_key.encode();

            // Both sides get the same key.
            let (k1, ok1) = sk1.ecdh(&pk2);
            let (k2, ok2) = sk2.ecdh(&pk1);
            assert!(ok1 == 0xFFFFFFFF && ok2 == 0xFFFFFFFF);
            assert!(k1 == k2);

            // Key is the hash of the ordered public keys, status byte
            // and shared point.
            let shared = sk2.public_key.point.mul(&sk1.encode()).encode();
            let (lo, hi) = {
                let mut swap = false;
                for i in 0..64 {
                    if pk1[i] != pk2[i] {
                        swap = pk1[i] > pk2[i];
                        break;
                    }
                }
                if swap { (pk2, pk1) } else { (pk1, pk2) }
            };
            let mut sh = Sha256::new();
            sh.update(&lo);
            sh.update(&hi);
            sh.update(&[0x53u8]);
            sh.update(&shared);
            assert!(k1[..] == sh.finalize()[..]);

            // Invalid peer key: failure, deterministic key, different
            // from the valid one.
            let mut bad = pk2;
            bad[0] ^= 0x01;
            let (k3, ok3) = sk1.ecdh(&bad);
            assert!(ok3 == 0);
            assert!(k3 != k1);
            let (k4, _) = sk1.ecdh(&bad);
            assert!(k3 == k4);

            // Neutral and wrong length.
            let (k5, ok5) = sk1.ecdh(&[0u8; 64]);
            assert!(ok5 == 0);
            assert!(k5 != k3);
            let (_, ok6) = sk1.ecdh(&pk2[..63]);
            assert!(ok6 == 0);
        }
    }

    // Key derived on failure: public keys (ordered if the peer key has
    // the right length), status byte 0x46, then the private scalar padded
    // with zeros in place of the shared point.
    fn failure_key(sk: &PrivateKey, peer: &[u8]) -> [u8; 32] {
        let own = sk.public_key.encode();
        let mut sh = Sha256::new();
        if peer.len() == 64 {
            if own[..] <= peer[..] {
                sh.update(&own);
                sh.update(peer);
            } else {
                sh.update(peer);
                sh.update(&own);
            }
        } else {
            sh.update(&own);
            sh.update(peer);
        }
        sh.update(&[0x46u8]);
        sh.update(&sk.encode());
        sh.update(&[0u8; 32]);
        let mut key = [0u8; 32];
        key[..].copy_from_slice(&sh.finalize());
        key
    }

    #[test]
    fn ecdh_failure() {
        let mut rng = DRNG::from_seed(b"curve13318 ecdh failure");
        for _ in 0..10 {
            let sk = PrivateKey::generate(&mut rng);
            let peer = PrivateKey::generate(&mut rng).public_key.encode();

            // Off-curve peer key.
            let mut bad = peer;
            bad[33] ^= 0x04;
            let (k, ok) = sk.ecdh(&bad);
            assert!(ok == 0);
            assert!(k == failure_key(&sk, &bad));

            // Neutral (all-zero encoding) sorts below any valid key.
            let (k, ok) = sk.ecdh(&[0u8; 64]);
            assert!(ok == 0);
            assert!(k == failure_key(&sk, &[0u8; 64]));

            // Wrong lengths: keys are hashed in call order.
            let (k, ok) = sk.ecdh(&peer[..63]);
            assert!(ok == 0);
            assert!(k == failure_key(&sk, &peer[..63]));
            let (k, ok) = sk.ecdh(&[]);
            assert!(ok == 0);
            assert!(k == failure_key(&sk, &[]));
        }
    }
}
