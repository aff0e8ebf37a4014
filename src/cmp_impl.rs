//! Implementation of multiprecision integer comparison primitives.

use super::add_impl::ct_sub_mp_mp_borrow;
use super::limb::{LimbChoice, LimbType};
use super::mpint::MpInt;
use core::cmp::Ordering;

/// Compare two normalized magnitudes.
///
/// # Arguments
///
/// * `op0` - The first operand, without high zero limbs.
/// * `op1` - The second operand, without high zero limbs.
///
pub fn cmp_mag_mp_mp(op0: &[LimbType], op1: &[LimbType]) -> Ordering {
    debug_assert!(op0.last().map(|v| *v != 0).unwrap_or(true));
    debug_assert!(op1.last().map(|v| *v != 0).unwrap_or(true));
    op0.len()
        .cmp(&op1.len())
        .then_with(|| op0.iter().rev().cmp(op1.iter().rev()))
}

#[test]
fn test_cmp_mag_mp_mp() {
    assert_eq!(cmp_mag_mp_mp(&[], &[]), Ordering::Equal);
    assert_eq!(cmp_mag_mp_mp(&[], &[1]), Ordering::Less);
    assert_eq!(cmp_mag_mp_mp(&[!0], &[0, 1]), Ordering::Less);
    assert_eq!(cmp_mag_mp_mp(&[2, 1], &[1, 1]), Ordering::Greater);
    assert_eq!(cmp_mag_mp_mp(&[1, 2], &[2, 1]), Ordering::Greater);
    assert_eq!(cmp_mag_mp_mp(&[1, 2], &[1, 2]), Ordering::Equal);
}

/// Compare two magnitudes for `>=`.
///
/// Runs in constant time for a given configuration of input operand widths, i.e. execution time
/// depends only on the operands' lengths, but not their values. High zero limbs are allowed.
pub fn ct_geq_mp_mp(op0: &[LimbType], op1: &[LimbType]) -> LimbChoice {
    !LimbChoice::from(ct_sub_mp_mp_borrow(op0, op1))
}

#[test]
fn test_ct_geq_mp_mp() {
    assert_eq!(ct_geq_mp_mp(&[0, 0], &[0]).unwrap(), 1);
    assert_eq!(ct_geq_mp_mp(&[1, 0], &[2]).unwrap(), 0);
    assert_eq!(ct_geq_mp_mp(&[1, 1], &[2]).unwrap(), 1);
    assert_eq!(ct_geq_mp_mp(&[2], &[1, 1]).unwrap(), 0);
    assert_eq!(ct_geq_mp_mp(&[!0, 1], &[!0, 1, 0]).unwrap(), 1);
}

/// Compare two signed integers.
///
/// Negative values order below non-negative ones, magnitudes decide otherwise.
pub fn cmp_mp_mp(u: &MpInt, v: &MpInt) -> Ordering {
    if core::ptr::eq(u, v) {
        return Ordering::Equal;
    }
    match (u.negative, v.negative) {
        (false, true) => Ordering::Greater,
        (true, false) => Ordering::Less,
        (false, false) => cmp_mag_mp_mp(u.limbs(), v.limbs()),
        (true, true) => cmp_mag_mp_mp(v.limbs(), u.limbs()),
    }
}

impl Ord for MpInt {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_mp_mp(self, other)
    }
}

impl PartialOrd for MpInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl MpInt {
    /// Compare absolute values.
    pub fn cmp_mag(&self, other: &Self) -> Ordering {
        cmp_mag_mp_mp(self.limbs(), other.limbs())
    }

    pub fn cmp_i64(&self, other: i64) -> Ordering {
        let other_negative = other < 0;
        let other_mag = other.unsigned_abs();
        match (self.negative, other_negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (negative, _) => {
                let ord = cmp_mag_u64(self.limbs(), other_mag);
                if negative {
                    ord.reverse()
                } else {
                    ord
                }
            }
        }
    }
}

fn cmp_mag_u64(op0: &[LimbType], op1: u64) -> Ordering {
    let mut op1_limbs: [LimbType; 8 / core::mem::size_of::<LimbType>()] = Default::default();
    let mut op1 = op1;
    for l in op1_limbs.iter_mut() {
        *l = op1 as LimbType;
        op1 = op1.checked_shr(LimbType::BITS).unwrap_or(0);
    }
    let nlimbs = super::limbs_buffer::find_last_set_limb_mp(&op1_limbs);
    cmp_mag_mp_mp(op0, &op1_limbs[..nlimbs])
}

impl PartialEq<i64> for MpInt {
    fn eq(&self, other: &i64) -> bool {
        self.cmp_i64(*other) == Ordering::Equal
    }
}

impl PartialOrd<i64> for MpInt {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        Some(self.cmp_i64(*other))
    }
}

#[test]
fn test_cmp_mp_mp() {
    let a = MpInt::try_from_limbs(false, &[1, 1]).unwrap();
    let b = MpInt::try_from_limbs(false, &[!0]).unwrap();
    let na = a.checked_neg().unwrap();
    let nb = b.checked_neg().unwrap();
    let zero = MpInt::new();

    assert_eq!(cmp_mp_mp(&a, &a), Ordering::Equal);
    assert_eq!(cmp_mp_mp(&a, &b), Ordering::Greater);
    assert_eq!(cmp_mp_mp(&na, &nb), Ordering::Less);
    assert_eq!(cmp_mp_mp(&nb, &b), Ordering::Less);
    assert_eq!(cmp_mp_mp(&zero, &nb), Ordering::Greater);
    assert_eq!(cmp_mp_mp(&zero, &b), Ordering::Less);
    assert_eq!(na.cmp_mag(&a), Ordering::Equal);
    assert!(na < nb && nb < zero && zero < b && b < a);
}

#[test]
fn test_cmp_i64() {
    let a = MpInt::try_from_limbs(false, &[7]).unwrap();
    assert!(a == 7);
    assert!(a > -7);
    assert!(a < 8);
    let na = a.checked_neg().unwrap();
    assert!(na == -7);
    assert!(na < -6);
    assert!(na > -8);
    assert!(na > i64::MIN);
    assert!(MpInt::new() == 0);
    let big = MpInt::try_from_limbs(false, &[0, 0, 1]).unwrap();
    assert!(big > i64::MAX);
    assert!(big.checked_neg().unwrap() < i64::MIN);
}
