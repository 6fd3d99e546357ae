//! Curve13318 is the short Weierstraß curve `y^2 = x^3 - 3*x + 13318`
//! over the field of integers modulo p = 2^255 - 19. This library
//! implements constant-time scalar multiplication on that curve, and a
//! Diffie-Hellman key exchange built on it.
//!
//! The code is organized in layers:
//!
//!  - `field`: the `FieldElement` trait, i.e. the arithmetic kernel for
//!    GF(2^255 - 19) (redundant limb representation, deferred carries),
//!    with two implementations in `backend`. The one used by the upper
//!    layers is selected at compile time (see below).
//!
//!  - `point`: curve points in projective coordinates, with encoding,
//!    decoding (including the curve equation check) and complete
//!    addition and doubling formulas.
//!
//!  - `ladder`: scalar multiplication with signed 5-bit windows and a
//!    16-entry table of precomputed multiples, and the byte-level entry
//!    points `scalarmult()` and `scalarmult_base()`.
//!
//!  - `dh`: private and public keys, and key exchange (ECDH).
//!
//! Constant-time selection primitives are in `ct`, and the curve and
//! field constants in `constants`.
//!
//! # Usage
//!
//! The library is `no_std`. The default `std` feature only adds an
//! implementation of the standard `Error` trait on `Error`.
//!
//! The field backend is chosen with a compile-time feature:
//! `gf25519_m25` (ten 64-bit limbs in radix 2^25.5, the default) or
//! `gf25519_m51` (five 64-bit limbs in radix 2^51, with 128-bit
//! products). Both compute exactly the same values.
//!
//! # Conventions
//!
//! All implemented functions should be strictly constant-time, unless
//! explicitly documented otherwise. In order to avoid unwanted side-channel
//! leaks, Booleans are avoided (compilers tend to "optimize" things a bit
//! too eagerly when handling `bool` values). All functions that return or
//! use a potentially secret Boolean value use the `u32` type; the convention
//! is that 0xFFFFFFFF means "true", and 0x00000000 means "false". No other
//! value shall be used, for they would lead to unpredictable results.
//! Similarly, the `Eq` or `PartialEq` traits are not implemented on field
//! elements and points.
//!
//! Throughout the code, functions that modify the object on which they
//! are called tend to have a name in `set_*()` (e.g. for a curve point
//! `P`, `P.set_double()` modifies the point structure in place, while
//! `P.double()` leaves `P` unmodified and returns the double as a new
//! structure instance).
//!
//! Errors are reported with the `Error` type only at the byte-level API
//! (decoding of points and public keys); everything else is total.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub use rand_core::{CryptoRng, RngCore, Error as RngError};

pub mod backend;
pub mod constants;
pub mod ct;
pub mod dh;
pub mod error;
pub mod field;
pub mod ladder;
pub mod point;

pub use error::Error;
pub use point::{CurvePoint, Point};
pub use ladder::{scalarmult, scalarmult_base};
pub use dh::{PrivateKey, PublicKey};
