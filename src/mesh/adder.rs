//! Leaf adder primitives for the neighbor counter.
//!
//! `bit_add` is a half adder over two single bits; `pair_add` adds two
//! 2-bit operands and reports wraparound as an overflow flag instead of a
//! third sum bit.

/// A 2-bit unsigned value, `hi:lo`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sum2 {
    pub lo: bool,
    pub hi: bool,
}

impl Sum2 {
    pub const ZERO: Sum2 = Sum2 { lo: false, hi: false };

    #[inline]
    pub const fn new(hi: bool, lo: bool) -> Self {
        Self { lo, hi }
    }

    /// Low two bits of `value`.
    #[inline]
    pub const fn from_value(value: u8) -> Self {
        Self {
            lo: value & 1 != 0,
            hi: value & 2 != 0,
        }
    }

    #[inline]
    pub const fn value(self) -> u8 {
        ((self.hi as u8) << 1) | self.lo as u8
    }
}

/// Single-bit adder: `(a ^ b, a & b)` as a 2-bit partial sum.
#[inline(always)]
pub fn bit_add(a: bool, b: bool) -> Sum2 {
    Sum2 { lo: a ^ b, hi: a & b }
}

/// 2-bit adder: `(a + b) mod 4` plus `a + b >= 4`.
#[inline(always)]
pub fn pair_add(a: Sum2, b: Sum2) -> (Sum2, bool) {
    let lo = a.lo ^ b.lo;
    let c0 = a.lo & b.lo;
    let hi = a.hi ^ b.hi ^ c0;
    let overflow = (a.hi & b.hi) | (a.hi & c0) | (b.hi & c0);
    (Sum2 { lo, hi }, overflow)
}
