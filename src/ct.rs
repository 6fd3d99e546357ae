//! Constant-time selection primitives.
//!
//! All secret-dependent choices in this crate go through the functions
//! of this module. A choice is expressed as a `u32` mask (0xFFFFFFFF for
//! "true", 0x00000000 for "false"), never as a `bool`, and is applied by
//! bitwise masking so that neither the control flow nor the memory access
//! pattern depends on it.
//!
//! Table lookups with a secret index use `scan_and_accumulate()`: every
//! table entry is read, and the matching one is OR-ed into a buffer that
//! starts at all-zero limbs. For curve points this yields (0:0:0) when
//! no entry matches, which is not a valid point; callers that may look
//! up "nothing" must repair the output themselves (see the ladder).

/// Values that can be OR-accumulated under a mask.
///
/// `ZERO` must have all-zero internal words, so that OR-ing a single
/// entry into it reproduces that entry exactly.
pub trait Accumulate: Copy {

    /// The all-zero-words value.
    const ZERO: Self;

    /// OR the words of `src` into `self` if `ctl` is 0xFFFFFFFF; leave
    /// `self` unchanged if `ctl` is 0x00000000.
    fn set_or_masked(&mut self, src: &Self, ctl: u32);
}

/// Expands a `u32` mask into a `u64` mask.
#[inline(always)]
pub fn mask64(ctl: u32) -> u64 {
    ((ctl as i32) as i64) as u64
}

/// Returns 0xFFFFFFFF if `a == b`, 0x00000000 otherwise.
#[inline(always)]
pub fn eq_mask(a: u32, b: u32) -> u32 {
    // a-b and b-a both have their top bit cleared only if a == b
    // (inputs are restricted to values below 2^31).
    debug_assert!(a < 0x80000000 && b < 0x80000000);
    let w = !(a.wrapping_sub(b) | b.wrapping_sub(a));
    ((w as i32) >> 31) as u32
}

/// Returns 0xFFFFFFFF if `x == 0`, 0x00000000 otherwise.
#[inline(always)]
pub fn zero_mask64(x: u64) -> u32 {
    // x | -x has its top bit set only if x != 0.
    let t = x | x.wrapping_neg();
    ((t >> 63) as u32).wrapping_sub(1)
}

/// Returns 0xFFFFFFFF if `k < 0`, 0x00000000 otherwise.
#[inline(always)]
pub fn sign_mask(k: i8) -> u32 {
    ((k as i32) >> 8) as u32
}

/// Returns `a0` if `ctl` is 0x00000000, `a1` if `ctl` is 0xFFFFFFFF.
#[inline(always)]
pub fn select64(a0: u64, a1: u64, ctl: u32) -> u64 {
    a0 ^ (mask64(ctl) & (a0 ^ a1))
}

/// Returns `a0` if `ctl` is 0x00000000, `a1` if `ctl` is 0xFFFFFFFF.
#[inline(always)]
pub fn select8(a0: u8, a1: u8, ctl: u32) -> u8 {
    a0 ^ ((ctl as u8) & (a0 ^ a1))
}

/// Looks up `table[index]` in constant time.
///
/// Every entry is scanned; the one whose position equals `index` is
/// OR-ed into a zero buffer. If `index` is out of range (including the
/// wrapped value `u32::MAX`), then `T::ZERO` is returned. The table
/// length is public, `index` may be secret.
pub fn scan_and_accumulate<T: Accumulate>(table: &[T], index: u32) -> T {
    let mut r = T::ZERO;
    let index = index & 0x7FFFFFFF;
    for (i, e) in table.iter().enumerate() {
        r.set_or_masked(e, eq_mask(i as u32, index));
    }
    r
}

impl<const N: usize> Accumulate for [u64; N] {
    const ZERO: Self = [0u64; N];

    #[inline]
    fn set_or_masked(&mut self, src: &Self, ctl: u32) {
        let m = mask64(ctl);
        for i in 0..N {
            self[i] |= src[i] & m;
        }
    }
}

// ========================================================================
