//! Fixed-length bit vectors.
//!
//! A [`BitVector`] is an ordered run of up to 64 bits stored in a single
//! `u64`. Bit `i` is counted from the least-significant end, so on a board
//! map bit `i` is the square with index `i` (a8 = 0, h1 = 63). Vectors are
//! built from bytes, most-significant byte first.
//!
//! Every operation returns a new vector; receivers and arguments are never
//! modified.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

use chesslogic_core::Square;
use thiserror::Error;

/// Errors from bit vector construction and combination.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BitVectorError {
    #[error("bit vectors differ in length: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("bit index {index} is out of range for a {len}-bit vector")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot shift a {len}-bit vector by {shift}")]
    ShiftOutOfRange { shift: usize, len: usize },

    #[error("a bit vector holds at most 8 bytes, got {0}")]
    TooManyBytes(usize),
}

/// A fixed-length sequence of bits, at most 64 long.
///
/// The length is a multiple of 8 fixed at construction. Bits above the
/// length are always zero.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitVector {
    bits: u64,
    len: u8,
}

impl BitVector {
    /// Number of bits in a board map.
    pub const BOARD_BITS: usize = 64;

    /// An all-zero 64-bit vector.
    pub const EMPTY: BitVector = BitVector { bits: 0, len: 64 };

    /// Creates a 64-bit vector from a raw word.
    #[inline]
    pub const fn from_u64(bits: u64) -> Self {
        BitVector { bits, len: 64 }
    }

    /// Creates a vector from byte values, most-significant byte first.
    ///
    /// Values outside 0-255 become zero bytes. The resulting length is eight
    /// bits per byte.
    pub fn from_bytes(bytes: &[i64]) -> Result<Self, BitVectorError> {
        if bytes.len() > 8 {
            return Err(BitVectorError::TooManyBytes(bytes.len()));
        }
        let bits = bytes.iter().fold(0u64, |acc, &byte| {
            let byte = u8::try_from(byte).unwrap_or(0);
            (acc << 8) | u64::from(byte)
        });
        Ok(BitVector {
            bits,
            len: (bytes.len() * 8) as u8,
        })
    }

    /// Returns the raw bits.
    #[inline]
    pub const fn bits(self) -> u64 {
        self.bits
    }

    /// Returns the number of bits in the vector.
    #[inline]
    pub const fn len(self) -> usize {
        self.len as usize
    }

    /// Returns true if the vector has length zero.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Returns true if no bit is set.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.bits == 0
    }

    /// Returns the number of set bits.
    #[inline]
    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }

    #[inline]
    const fn mask(self) -> u64 {
        if self.len >= 64 {
            u64::MAX
        } else {
            (1u64 << self.len) - 1
        }
    }

    #[inline]
    const fn with_bits(self, bits: u64) -> Self {
        BitVector {
            bits: bits & self.mask(),
            len: self.len,
        }
    }

    /// Returns the bit at `index`, counted from the least-significant end.
    #[inline]
    pub fn bit_at(self, index: usize) -> Option<u8> {
        (index < self.len()).then(|| ((self.bits >> index) & 1) as u8)
    }

    fn same_len(self, other: BitVector) -> Result<(), BitVectorError> {
        if self.len == other.len {
            Ok(())
        } else {
            Err(BitVectorError::DimensionMismatch {
                left: self.len(),
                right: other.len(),
            })
        }
    }

    fn check_index(self, index: usize) -> Result<u64, BitVectorError> {
        if index < self.len() {
            Ok(1u64 << index)
        } else {
            Err(BitVectorError::IndexOutOfRange {
                index,
                len: self.len(),
            })
        }
    }

    /// Elementwise AND of two equal-length vectors.
    pub fn and(self, other: BitVector) -> Result<Self, BitVectorError> {
        self.same_len(other)?;
        Ok(self.with_bits(self.bits & other.bits))
    }

    /// Elementwise OR of two equal-length vectors.
    pub fn or(self, other: BitVector) -> Result<Self, BitVectorError> {
        self.same_len(other)?;
        Ok(self.with_bits(self.bits | other.bits))
    }

    /// Elementwise XOR of two equal-length vectors.
    pub fn xor(self, other: BitVector) -> Result<Self, BitVectorError> {
        self.same_len(other)?;
        Ok(self.with_bits(self.bits ^ other.bits))
    }

    /// ANDs the bit at `index` with 1, leaving the vector unchanged.
    pub fn and_index(self, index: usize) -> Result<Self, BitVectorError> {
        let bit = self.check_index(index)?;
        let kept = self.bits & bit;
        Ok(self.with_bits((self.bits & !bit) | kept))
    }

    /// ORs the bit at `index` with 1, setting it.
    pub fn or_index(self, index: usize) -> Result<Self, BitVectorError> {
        let bit = self.check_index(index)?;
        Ok(self.with_bits(self.bits | bit))
    }

    /// XORs the bit at `index` with 1, toggling it.
    pub fn xor_index(self, index: usize) -> Result<Self, BitVectorError> {
        let bit = self.check_index(index)?;
        Ok(self.with_bits(self.bits ^ bit))
    }

    /// Logical shift toward the most-significant end, zero-filling.
    pub fn shift_left(self, n: usize) -> Result<Self, BitVectorError> {
        if n > self.len() {
            return Err(BitVectorError::ShiftOutOfRange {
                shift: n,
                len: self.len(),
            });
        }
        Ok(self.with_bits(self.bits.checked_shl(n as u32).unwrap_or(0)))
    }

    /// Logical shift toward the least-significant end, zero-filling.
    pub fn shift_right(self, n: usize) -> Result<Self, BitVectorError> {
        if n > self.len() {
            return Err(BitVectorError::ShiftOutOfRange {
                shift: n,
                len: self.len(),
            });
        }
        Ok(self.with_bits(self.bits.checked_shr(n as u32).unwrap_or(0)))
    }

    /// Returns an independent vector with the same contents.
    #[inline]
    pub const fn copy(&self) -> Self {
        BitVector {
            bits: self.bits,
            len: self.len,
        }
    }

    /// Returns true if the square's bit is set.
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        self.bits & sq.bit() != 0
    }

    /// Returns this vector with the square's bit set.
    #[inline]
    pub const fn with(self, sq: Square) -> Self {
        self.with_bits(self.bits | sq.bit())
    }

    /// Returns this vector with the square's bit cleared.
    #[inline]
    pub const fn without(self, sq: Square) -> Self {
        self.with_bits(self.bits & !sq.bit())
    }

    /// Iterates over the squares whose bits are set, in index order.
    pub fn squares(self) -> impl Iterator<Item = Square> {
        let mut bits = self.bits;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let index = bits.trailing_zeros() as u8;
            bits &= bits - 1;
            Square::from_index(index)
        })
    }
}

impl Default for BitVector {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl FromIterator<Square> for BitVector {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, BitVector::with)
    }
}

// The operators assume equal lengths, which holds for every board map. Use
// the fallible methods when lengths may differ.

impl BitAnd for BitVector {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        debug_assert_eq!(self.len, rhs.len);
        self.with_bits(self.bits & rhs.bits)
    }
}

impl BitOr for BitVector {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        debug_assert_eq!(self.len, rhs.len);
        self.with_bits(self.bits | rhs.bits)
    }
}

impl BitXor for BitVector {
    type Output = Self;
    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        debug_assert_eq!(self.len, rhs.len);
        self.with_bits(self.bits ^ rhs.bits)
    }
}

impl Not for BitVector {
    type Output = Self;
    #[inline]
    fn not(self) -> Self::Output {
        self.with_bits(!self.bits)
    }
}

/// Formats the bits most-significant first, e.g. `00000001` for `[1]`.
impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.len()).rev() {
            write!(f, "{}", (self.bits >> i) & 1)?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len() != Self::BOARD_BITS {
            return write!(f, "BitVector({})", self);
        }
        writeln!(f, "BitVector({:#018x})", self.bits)?;
        for row in 0..8 {
            write!(f, "{} ", 8 - row)?;
            for column in 0..8 {
                if (self.bits >> (row * 8 + column)) & 1 == 1 {
                    write!(f, "X ")?;
                } else {
                    write!(f, ". ")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn byte(value: i64) -> BitVector {
        BitVector::from_bytes(&[value]).unwrap()
    }

    #[test]
    fn defaults_to_64_zero_bits() {
        let bv = BitVector::default();
        assert_eq!(bv.len(), 64);
        assert!(bv.is_zero());
        assert_eq!(BitVector::from_bytes(&[0; 8]).unwrap(), bv);
    }

    #[test]
    fn out_of_range_bytes_become_zero() {
        let bv = BitVector::from_bytes(&[257, -1]).unwrap();
        assert_eq!(bv.len(), 16);
        assert_eq!(bv.to_string(), "0".repeat(16));
    }

    #[test]
    fn bytes_are_most_significant_first() {
        let bv = BitVector::from_bytes(&[1, 128]).unwrap();
        assert_eq!(bv.to_string(), "0000000110000000");
        assert_eq!(bv.bits(), 0x0180);
    }

    #[test]
    fn too_many_bytes() {
        assert_eq!(
            BitVector::from_bytes(&[0; 9]),
            Err(BitVectorError::TooManyBytes(9))
        );
    }

    #[test]
    fn bit_at_counts_from_least_significant() {
        let bv = byte(129);
        assert_eq!(bv.bit_at(0), Some(1));
        assert_eq!(bv.bit_at(1), Some(0));
        assert_eq!(bv.bit_at(6), Some(0));
        assert_eq!(bv.bit_at(7), Some(1));
        assert_eq!(bv.bit_at(8), None);
    }

    #[test]
    fn binary_operations() {
        let ones = byte(255);
        let zeros = byte(0);
        assert_eq!(ones.and(zeros).unwrap().to_string(), "00000000");
        assert_eq!(ones.or(zeros).unwrap().to_string(), "11111111");
        assert_eq!(ones.xor(zeros).unwrap().to_string(), "11111111");
        assert_eq!(ones.not().to_string(), "00000000");
    }

    #[test]
    fn binary_operations_leave_operands_alone() {
        let ones = byte(255);
        let zeros = byte(0);
        let _ = ones.and(zeros);
        let _ = ones.or(zeros);
        let _ = ones.xor(zeros);
        let _ = !ones;
        let _ = ones.shift_left(8);
        let _ = ones.shift_right(8);
        assert_eq!(ones.to_string(), "11111111");
        assert_eq!(zeros.to_string(), "00000000");
    }

    #[test]
    fn dimension_mismatch() {
        let short = byte(1);
        assert_eq!(
            short.and(BitVector::EMPTY),
            Err(BitVectorError::DimensionMismatch {
                left: 8,
                right: 64
            })
        );
        assert!(short.or(BitVector::EMPTY).is_err());
        assert!(short.xor(BitVector::EMPTY).is_err());
    }

    #[test]
    fn single_bit_and_is_identity() {
        let ones = byte(255);
        for i in 0..4 {
            assert_eq!(ones.and_index(i).unwrap(), ones);
        }
        let sparse = byte(0b1010);
        assert_eq!(sparse.and_index(0).unwrap(), sparse);
        assert_eq!(sparse.and_index(1).unwrap(), sparse);
    }

    #[test]
    fn single_bit_or_sets() {
        assert_eq!(byte(255).or_index(1).unwrap().to_string(), "11111111");
        assert_eq!(byte(0).or_index(3).unwrap().to_string(), "00001000");
    }

    #[test]
    fn single_bit_xor_toggles() {
        let ones = byte(255);
        assert_eq!(ones.xor_index(0).unwrap().to_string(), "11111110");
        assert_eq!(ones.xor_index(1).unwrap().to_string(), "11111101");
        assert_eq!(ones.xor_index(2).unwrap().to_string(), "11111011");
        assert_eq!(ones.xor_index(3).unwrap().to_string(), "11110111");
    }

    #[test]
    fn single_bit_index_out_of_range() {
        assert_eq!(
            byte(0).xor_index(8),
            Err(BitVectorError::IndexOutOfRange { index: 8, len: 8 })
        );
    }

    #[test]
    fn shifts() {
        let ones = byte(255);
        assert_eq!(ones.shift_left(8).unwrap().to_string(), "00000000");
        assert_eq!(ones.shift_left(4).unwrap().to_string(), "11110000");
        assert_eq!(ones.shift_right(8).unwrap().to_string(), "00000000");
        assert_eq!(ones.shift_right(4).unwrap().to_string(), "00001111");
        assert_eq!(
            ones.shift_left(9),
            Err(BitVectorError::ShiftOutOfRange { shift: 9, len: 8 })
        );
        assert!(BitVector::from_u64(u64::MAX).shift_left(64).unwrap().is_zero());
    }

    #[test]
    fn copy_is_independent() {
        let original = byte(42);
        let copied = original.copy();
        let changed = copied.xor_index(0).unwrap();
        assert_eq!(copied, original);
        assert_ne!(changed, original);
    }

    #[test]
    fn square_helpers() {
        let e4 = Square::from_algebraic("e4").unwrap();
        let bv = BitVector::EMPTY.with(e4);
        assert!(bv.contains(e4));
        assert_eq!(bv.bit_at(36), Some(1));
        assert!(bv.without(e4).is_zero());
        assert_eq!(bv.squares().collect::<Vec<_>>(), vec![e4]);
    }

    fn vector() -> impl Strategy<Value = BitVector> {
        any::<u64>().prop_map(BitVector::from_u64)
    }

    proptest! {
        #[test]
        fn and_or_commute(a in vector(), b in vector()) {
            prop_assert_eq!(a.and(b).unwrap(), b.and(a).unwrap());
            prop_assert_eq!(a.or(b).unwrap(), b.or(a).unwrap());
        }

        #[test]
        fn xor_with_self_is_zero(a in vector()) {
            prop_assert!(a.xor(a).unwrap().is_zero());
        }

        #[test]
        fn double_not_is_identity(a in vector()) {
            prop_assert_eq!(!!a, a);
        }

        #[test]
        fn operations_do_not_mutate(a in vector(), b in vector(), k in 0usize..=64) {
            let (a0, b0) = (a, b);
            let _ = a.and(b);
            let _ = a.or(b);
            let _ = a.xor(b);
            let _ = !a;
            let _ = a.shift_left(k);
            let _ = a.shift_right(k);
            prop_assert_eq!(a, a0);
            prop_assert_eq!(b, b0);
        }

        #[test]
        fn shift_left_then_right_clears_high_bits(a in vector(), k in 0usize..=64) {
            let round = a.shift_left(k).unwrap().shift_right(k).unwrap();
            let low = u64::MAX.checked_shr(k as u32).unwrap_or(0);
            prop_assert_eq!(round.bits(), a.bits() & low);
        }

        #[test]
        fn shift_right_then_left_clears_low_bits(a in vector(), k in 0usize..=64) {
            let round = a.shift_right(k).unwrap().shift_left(k).unwrap();
            let high = u64::MAX.checked_shl(k as u32).unwrap_or(0);
            prop_assert_eq!(round.bits(), a.bits() & high);
        }

        #[test]
        fn short_vectors_stay_within_length(bytes in proptest::collection::vec(0i64..256, 0..8), k in 0usize..8) {
            let bv = BitVector::from_bytes(&bytes).unwrap();
            let len = bv.len();
            prop_assert_eq!(len, bytes.len() * 8);
            prop_assert_eq!((!bv).count() + bv.count(), len as u32);
            if k <= len {
                prop_assert!(bv.shift_left(k).unwrap().bits().checked_shr(len as u32).unwrap_or(0) == 0);
            }
        }
    }
}
