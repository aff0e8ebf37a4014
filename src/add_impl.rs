//! Implementation of multiprecision integer addition related primitives.

use super::cmp_impl::cmp_mag_mp_mp;
use super::error::MpIntError;
use super::limb::{ct_add_l_l, ct_add_l_l_c, ct_sub_l_l, ct_sub_l_l_b, LimbChoice, LimbType};
use super::mpint::MpInt;
use core::cmp::Ordering;

/// Add two magnitudes in place.
///
/// The first operand's contents will be replaced by the resulting sum and the carry, if any,
/// returned from the function.
///
/// Runs in constant time for a given configuration of input operand widths, i.e. execution time
/// depends only on the integers' widths, but not their values.
///
/// # Arguments:
///
/// * `op0` - The first input addend. It will be overwritten by the resulting sum. Its length must
///   be greater or equal than the length of the second addend.
/// * `op1` - The second input addend.
///
pub fn ct_add_mp_mp(op0: &mut [LimbType], op1: &[LimbType]) -> LimbType {
    debug_assert!(op1.len() <= op0.len());
    let mut carry = 0;
    for (op0_val, op1_val) in op0.iter_mut().zip(op1.iter()) {
        (carry, *op0_val) = ct_add_l_l_c(*op0_val, *op1_val, carry);
    }
    for op0_val in op0[op1.len()..].iter_mut() {
        (carry, *op0_val) = ct_add_l_l(*op0_val, carry);
    }
    carry
}

#[test]
fn test_ct_add_mp_mp() {
    let mut op0 = [!0, !0];
    let carry = ct_add_mp_mp(&mut op0, &[1]);
    assert_eq!(carry, 1);
    assert_eq!(op0, [0, 0]);

    let mut op0 = [!0, 0];
    let carry = ct_add_mp_mp(&mut op0, &[!0, 1]);
    assert_eq!(carry, 0);
    assert_eq!(op0, [!1, 2]);

    let mut op0 = [5];
    let carry = ct_add_mp_mp(&mut op0, &[]);
    assert_eq!(carry, 0);
    assert_eq!(op0, [5]);
}

/// Subtract two magnitudes in place.
///
/// The first operand's contents will be replaced by the resulting difference and the borrow, if
/// any, returned from the function.
///
/// Runs in constant time for a given configuration of input operand widths, i.e. execution time
/// depends only on the integers' widths, but not their values.
///
/// # Arguments:
///
/// * `op0` - The minuend. It will be overwritten by the resulting difference. Its length must be
///   greater or equal than the length of the subtrahend.
/// * `op1` - The subtrahend.
///
pub fn ct_sub_mp_mp(op0: &mut [LimbType], op1: &[LimbType]) -> LimbType {
    ct_sub_cond_mp_mp(op0, op1, LimbChoice::from(1))
}

#[test]
fn test_ct_sub_mp_mp() {
    let mut op0 = [0, 0];
    let borrow = ct_sub_mp_mp(&mut op0, &[1]);
    assert_eq!(borrow, 1);
    assert_eq!(op0, [!0, !0]);

    let mut op0 = [0, 1];
    let borrow = ct_sub_mp_mp(&mut op0, &[1]);
    assert_eq!(borrow, 0);
    assert_eq!(op0, [!0, 0]);
}

/// Conditionally subtract two magnitudes in place.
///
/// Like [`ct_sub_mp_mp()`], but subtracts only if `cond` is set. Runs in constant time
/// independent of the condition.
pub fn ct_sub_cond_mp_mp(op0: &mut [LimbType], op1: &[LimbType], cond: LimbChoice) -> LimbType {
    debug_assert!(op1.len() <= op0.len());
    let mut borrow = 0;
    for (op0_val, op1_val) in op0.iter_mut().zip(op1.iter()) {
        (borrow, *op0_val) = ct_sub_l_l_b(*op0_val, cond.select(0, *op1_val), borrow);
    }
    for op0_val in op0[op1.len()..].iter_mut() {
        (borrow, *op0_val) = ct_sub_l_l(*op0_val, borrow);
    }
    borrow
}

#[test]
fn test_ct_sub_cond_mp_mp() {
    let mut op0 = [1, 1];
    let borrow = ct_sub_cond_mp_mp(&mut op0, &[2], LimbChoice::from(0));
    assert_eq!(borrow, 0);
    assert_eq!(op0, [1, 1]);
    let borrow = ct_sub_cond_mp_mp(&mut op0, &[2], LimbChoice::from(1));
    assert_eq!(borrow, 0);
    assert_eq!(op0, [!0, 0]);
}

/// Compute only the borrow of `op0 - op1`, without storing the difference anywhere.
///
/// The operands may have different lengths. Runs in constant time for given operand widths.
pub fn ct_sub_mp_mp_borrow(op0: &[LimbType], op1: &[LimbType]) -> LimbType {
    let nlimbs = op0.len().max(op1.len());
    let mut borrow = 0;
    for i in 0..nlimbs {
        let op0_val = op0.get(i).copied().unwrap_or(0);
        let op1_val = op1.get(i).copied().unwrap_or(0);
        (borrow, _) = ct_sub_l_l_b(op0_val, op1_val, borrow);
    }
    borrow
}

pub fn ct_add_mp_l(op0: &mut [LimbType], op1: LimbType) -> LimbType {
    let mut carry = op1;
    for op0_val in op0.iter_mut() {
        (carry, *op0_val) = ct_add_l_l(*op0_val, carry);
    }
    carry
}

#[test]
fn test_ct_add_mp_l() {
    let mut op0 = [!0, !0];
    assert_eq!(ct_add_mp_l(&mut op0, 1), 1);
    assert_eq!(op0, [0, 0]);
    let mut op0 = [!0, 0];
    assert_eq!(ct_add_mp_l(&mut op0, 2), 0);
    assert_eq!(op0, [1, 1]);
}

pub fn ct_sub_mp_l(op0: &mut [LimbType], op1: LimbType) -> LimbType {
    let mut borrow = 0;
    let mut op1 = op1;
    for op0_val in op0.iter_mut() {
        (borrow, *op0_val) = ct_sub_l_l_b(*op0_val, op1, borrow);
        op1 = 0;
    }
    borrow
}

#[test]
fn test_ct_sub_mp_l() {
    let mut op0 = [0, 1];
    assert_eq!(ct_sub_mp_l(&mut op0, 1), 0);
    assert_eq!(op0, [!0, 0]);
    let mut op0 = [0];
    assert_eq!(ct_sub_mp_l(&mut op0, 1), 1);
    assert_eq!(op0, [!0]);
}

/// Shared implementation of signed addition and subtraction.
///
/// Same effective signs add the magnitudes. Otherwise the smaller magnitude gets subtracted from
/// the larger one and the result inherits the sign of the operand with the larger magnitude.
fn addsub_mp_mp(w: &mut MpInt, u: &MpInt, v: &MpInt, subtract: bool) -> Result<(), MpIntError> {
    let u_limbs = u.limbs();
    let v_limbs = v.limbs();
    let v_negative = v.negative ^ (subtract && !v.is_zero());

    if u.negative == v_negative {
        let (op0, op1) = if u_limbs.len() >= v_limbs.len() {
            (u_limbs, v_limbs)
        } else {
            (v_limbs, u_limbs)
        };
        w.limbs.try_resize(op0.len() + 1)?;
        let w_limbs = w.limbs.as_mut_slice();
        w_limbs[..op0.len()].copy_from_slice(op0);
        w_limbs[op0.len()] = 0;
        let carry = ct_add_mp_mp(w_limbs, op1);
        debug_assert_eq!(carry, 0);
        w.negative = u.negative;
    } else {
        let (op0, op1, negative) = match cmp_mag_mp_mp(u_limbs, v_limbs) {
            Ordering::Less => (v_limbs, u_limbs, v_negative),
            Ordering::Equal | Ordering::Greater => (u_limbs, v_limbs, u.negative),
        };
        w.limbs.try_resize(op0.len())?;
        let w_limbs = w.limbs.as_mut_slice();
        w_limbs.copy_from_slice(op0);
        let borrow = ct_sub_mp_mp(w_limbs, op1);
        debug_assert_eq!(borrow, 0);
        w.negative = negative;
    }
    w.normalize();
    Ok(())
}

/// Compute `w = u + v`.
pub fn add_mp_mp(w: &mut MpInt, u: &MpInt, v: &MpInt) -> Result<(), MpIntError> {
    addsub_mp_mp(w, u, v, false)
}

/// Compute `w = u - v`.
pub fn sub_mp_mp(w: &mut MpInt, u: &MpInt, v: &MpInt) -> Result<(), MpIntError> {
    addsub_mp_mp(w, u, v, true)
}

impl MpInt {
    pub fn checked_add(&self, v: &MpInt) -> Result<MpInt, MpIntError> {
        let mut w = MpInt::new();
        add_mp_mp(&mut w, self, v)?;
        Ok(w)
    }

    pub fn checked_sub(&self, v: &MpInt) -> Result<MpInt, MpIntError> {
        let mut w = MpInt::new();
        sub_mp_mp(&mut w, self, v)?;
        Ok(w)
    }
}

#[cfg(test)]
fn test_addsub_one(u: i64, v: i64) {
    let (mu, mv) = (MpInt::from(u), MpInt::from(v));
    let sum = mu.checked_add(&mv).unwrap();
    assert_eq!(sum, MpInt::from(u as i128 + v as i128));
    let diff = mu.checked_sub(&mv).unwrap();
    assert_eq!(diff, MpInt::from(u as i128 - v as i128));
}

#[test]
fn test_add_sub_mp_mp_signs() {
    for u in [0, 1, -1, 7, -7, i64::MAX, i64::MIN, 1 << 40, -(1 << 40)] {
        for v in [0, 1, -1, 7, -7, i64::MAX, i64::MIN, 1 << 40, -(1 << 40)] {
            test_addsub_one(u, v);
        }
    }
}

#[test]
fn test_add_mp_mp_carry_into_new_limb() {
    let u = MpInt::try_from_limbs(false, &[!0, !0]).unwrap();
    let one = MpInt::from(1i64);
    let w = u.checked_add(&one).unwrap();
    assert_eq!(w.limbs(), &[0, 0, 1]);
    let w = w.checked_sub(&one).unwrap();
    assert_eq!(w, u);
}

#[test]
fn test_add_mp_mp_large() {
    let u: MpInt = "123456789012345678901234567890".parse().unwrap();
    let w = u.checked_add(&MpInt::from(-1i64)).unwrap();
    assert_eq!(w.to_string(), "123456789012345678901234567889");
}

#[test]
fn test_add_mp_mp_inverse_and_identity() {
    let u = tst_mk_mpint!("-0x1234567890abcdef1234567890abcdef");
    let zero = MpInt::new();
    assert_eq!(u.checked_add(&zero).unwrap(), u);
    let w = u.checked_add(&u.checked_neg().unwrap()).unwrap();
    assert!(w.is_zero());
    assert!(!w.is_negative());
    // Inputs may alias each other.
    let w = u.checked_sub(&u).unwrap();
    assert!(w.is_zero());
    let w = u.checked_add(&u).unwrap();
    assert_eq!(w, tst_mk_mpint!("-0x2468acf121579bde2468acf121579bde"));
}

#[test]
fn test_add_mp_mp_destination_reuse() {
    let mut w = tst_mk_mpint!("0x1_0000_0000_0000_0000_0000_0000_0000_0000");
    let cap = w.capacity();
    let u = MpInt::from(5i64);
    let v = MpInt::from(-9i64);
    add_mp_mp(&mut w, &u, &v).unwrap();
    assert_eq!(w, MpInt::from(-4i64));
    assert_eq!(w.capacity(), cap);
    sub_mp_mp(&mut w, &u, &v).unwrap();
    assert_eq!(w, MpInt::from(14i64));
}
