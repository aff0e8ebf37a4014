//! The arbitrary precision signed integer value type.

use super::error::MpIntError;
use super::limb::LimbType;
use super::limbs_buffer::{
    find_first_set_bit_mp, find_last_set_bit_mp, test_bit_mp, LimbsBuffer,
};
use core::hash;

/// An arbitrary precision signed integer in sign-and-magnitude representation.
///
/// The magnitude is kept normalized at all times: its most significant limb is non-zero or the
/// magnitude is empty, in which case the value is zero and never negative.
///
/// Operations come in two flavours:
/// - Free functions like [`add_mp_mp()`](crate::add_mp_mp) write into a caller provided
///   destination and reuse its storage. The destination can never alias one of the inputs, but
///   the inputs may alias each other.
/// - Methods like [`MpInt::checked_add()`] return a fresh value.
///
/// On failure, a destination is always left holding a valid value.
#[derive(Default, Clone)]
pub struct MpInt {
    pub(crate) negative: bool,
    pub(crate) limbs: LimbsBuffer,
}

impl MpInt {
    /// The zero value, without any allocation.
    pub const fn new() -> Self {
        Self { negative: false, limbs: LimbsBuffer::new() }
    }

    /// Construct a value from a sign and a little endian sequence of magnitude limbs.
    ///
    /// The limbs need not be normalized.
    pub fn try_from_limbs(negative: bool, limbs: &[LimbType]) -> Result<Self, MpIntError> {
        let mut r = Self { negative, limbs: LimbsBuffer::try_from_limbs(limbs)? };
        r.normalize();
        Ok(r)
    }

    pub(crate) fn from_limbs_buffer(negative: bool, limbs: LimbsBuffer) -> Self {
        let mut r = Self { negative, limbs };
        r.normalize();
        r
    }

    /// Fallible counterpart to [`Clone::clone()`].
    pub fn try_clone(&self) -> Result<Self, MpIntError> {
        let mut r = Self::new();
        copy_mp(&mut r, self)?;
        Ok(r)
    }

    /// The normalized magnitude, least significant limb first.
    pub fn limbs(&self) -> &[LimbType] {
        self.limbs.as_slice()
    }

    /// Number of limbs the value can grow to without reallocation.
    pub fn capacity(&self) -> usize {
        self.limbs.capacity()
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Returns `-1`, `0` or `1` according to the sign.
    pub fn signum(&self) -> i32 {
        if self.negative {
            -1
        } else if self.is_zero() {
            0
        } else {
            1
        }
    }

    pub(crate) fn is_one_mag(&self) -> bool {
        self.limbs() == [1]
    }

    pub(crate) fn is_odd(&self) -> bool {
        self.limbs.load_l(0) & 1 != 0
    }

    /// Drop high zero limbs and canonicalize the sign of zero.
    pub(crate) fn normalize(&mut self) {
        if self.limbs.normalize() == 0 {
            self.negative = false;
        }
    }

    /// Set to zero, keeping the allocation.
    pub(crate) fn set_zero(&mut self) {
        self.limbs.truncate(0);
        self.negative = false;
    }

    pub(crate) fn try_set_l(&mut self, negative: bool, val: LimbType) -> Result<(), MpIntError> {
        self.limbs.try_copy_from(&[val])?;
        self.negative = negative;
        self.normalize();
        Ok(())
    }

    /// Set to zero and give the backing storage back to the allocator.
    pub fn release(&mut self) {
        self.limbs.release();
        self.negative = false;
    }

    /// Number of bits in the magnitude, zero for zero.
    pub fn bit_length(&self) -> u64 {
        find_last_set_bit_mp(self.limbs())
    }

    /// Number of trailing zero bits in the magnitude, zero for zero.
    pub fn trailing_zeros(&self) -> u64 {
        find_first_set_bit_mp(self.limbs())
    }

    /// Test a bit in the infinite two's complement representation.
    pub fn test_bit(&self, pos: u64) -> bool {
        if !self.negative {
            return test_bit_mp(self.limbs(), pos);
        }
        // -x == ~(x - 1): bits below the lowest set bit of x stay clear, the lowest set bit
        // itself stays set and all bits above get inverted.
        let tz = self.trailing_zeros();
        if pos < tz {
            false
        } else if pos == tz {
            true
        } else {
            !test_bit_mp(self.limbs(), pos)
        }
    }

    /// Negate in place.
    pub fn negate(&mut self) {
        if !self.is_zero() {
            self.negative = !self.negative;
        }
    }

    pub fn checked_neg(&self) -> Result<Self, MpIntError> {
        let mut r = Self::new();
        neg_mp(&mut r, self)?;
        Ok(r)
    }

    pub fn checked_abs(&self) -> Result<Self, MpIntError> {
        let mut r = Self::new();
        abs_mp(&mut r, self)?;
        Ok(r)
    }
}

pub fn copy_mp(w: &mut MpInt, u: &MpInt) -> Result<(), MpIntError> {
    w.limbs.try_copy_from(u.limbs())?;
    w.negative = u.negative;
    Ok(())
}

pub fn neg_mp(w: &mut MpInt, u: &MpInt) -> Result<(), MpIntError> {
    copy_mp(w, u)?;
    w.negate();
    Ok(())
}

pub fn abs_mp(w: &mut MpInt, u: &MpInt) -> Result<(), MpIntError> {
    copy_mp(w, u)?;
    w.negative = false;
    Ok(())
}

impl PartialEq for MpInt {
    fn eq(&self, other: &Self) -> bool {
        self.negative == other.negative && self.limbs() == other.limbs()
    }
}

impl Eq for MpInt {}

impl hash::Hash for MpInt {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.negative.hash(state);
        self.limbs().hash(state);
    }
}

#[test]
fn test_mpint_normalized_construction() {
    let x = MpInt::try_from_limbs(true, &[0, 0]).unwrap();
    assert!(x.is_zero());
    assert!(!x.is_negative());
    assert_eq!(x.signum(), 0);

    let x = MpInt::try_from_limbs(true, &[5, 0, 0]).unwrap();
    assert_eq!(x.limbs(), &[5]);
    assert!(x.is_negative());
    assert_eq!(x.signum(), -1);
}

#[test]
fn test_mpint_neg_abs() {
    let x = MpInt::try_from_limbs(false, &[1, 2]).unwrap();
    let y = x.checked_neg().unwrap();
    assert!(y.is_negative());
    assert_eq!(y.limbs(), &[1, 2]);
    assert_eq!(y.checked_abs().unwrap(), x);

    let mut z = MpInt::new();
    z.negate();
    assert!(!z.is_negative());

    // Destination reuse keeps the allocation around.
    let mut w = MpInt::try_from_limbs(false, &[1, 2, 3, 4]).unwrap();
    let cap = w.capacity();
    neg_mp(&mut w, &x).unwrap();
    assert_eq!(w, y);
    assert_eq!(w.capacity(), cap);
}

#[test]
fn test_mpint_bits() {
    let x = MpInt::try_from_limbs(false, &[0b1100]).unwrap();
    assert_eq!(x.bit_length(), 4);
    assert_eq!(x.trailing_zeros(), 2);
    assert!(x.test_bit(2));
    assert!(!x.test_bit(1));
    assert!(!x.test_bit(1000));

    // -12 is ...110100 in two's complement.
    let y = x.checked_neg().unwrap();
    assert!(!y.test_bit(0));
    assert!(!y.test_bit(1));
    assert!(y.test_bit(2));
    assert!(!y.test_bit(3));
    assert!(y.test_bit(4));
    assert!(y.test_bit(1000));
    assert_eq!(MpInt::new().bit_length(), 0);
}

#[test]
fn test_mpint_release() {
    let mut x = MpInt::try_from_limbs(true, &[1, 2, 3]).unwrap();
    x.release();
    assert!(x.is_zero());
    assert!(!x.is_negative());
    assert_eq!(x.capacity(), 0);
}
