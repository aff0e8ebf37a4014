//! Implementation of multiprecision integer multiplication primitives.

use super::error::MpIntError;
use super::limb::{ct_add_l_l_c, ct_mul_add_l_l_l_c, ct_mul_l_l, LimbType, LIMB_BITS};
use super::limbs_buffer::check_nlimbs;
use super::mpint::MpInt;

/// Multiply a magnitude by a limb in place.
///
/// Returns the carry limb out of the most significant position.
///
/// # Arguments:
///
/// * `op0` - The multiplicand, overwritten by the low limbs of the product.
/// * `op1` - The single limb multiplier.
///
pub fn mul_mp_l(op0: &mut [LimbType], op1: LimbType) -> LimbType {
    let mut carry = 0;
    for op0_val in op0.iter_mut() {
        (carry, *op0_val) = ct_mul_add_l_l_l_c(0, *op0_val, op1, carry);
    }
    carry
}

#[test]
fn test_mul_mp_l() {
    let mut op0 = [!0, !0];
    let carry = mul_mp_l(&mut op0, 2);
    assert_eq!(op0, [!1, !0]);
    assert_eq!(carry, 1);

    let mut op0 = [3, 5];
    let carry = mul_mp_l(&mut op0, 0);
    assert_eq!(op0, [0, 0]);
    assert_eq!(carry, 0);
}

/// Schoolbook multiplication of two magnitudes.
///
/// `result` must provide exactly `op0.len() + op1.len()` limbs, its previous contents get
/// overwritten.
fn mul_mp_mp_mag(result: &mut [LimbType], op0: &[LimbType], op1: &[LimbType]) {
    debug_assert_eq!(result.len(), op0.len() + op1.len());
    result.fill(0);
    for (i, op0_val) in op0.iter().enumerate() {
        let mut carry = 0;
        for (j, op1_val) in op1.iter().enumerate() {
            (carry, result[i + j]) = ct_mul_add_l_l_l_c(result[i + j], *op0_val, *op1_val, carry);
        }
        result[i + op1.len()] = carry;
    }
}

/// Square a magnitude.
///
/// Each cross product gets computed only once and doubled afterwards.
/// `result` must provide exactly `2 * op0.len()` limbs.
fn square_mp_mag(result: &mut [LimbType], op0: &[LimbType]) {
    let n = op0.len();
    debug_assert_eq!(result.len(), 2 * n);
    result.fill(0);

    // Sum of op0[i] * op0[j] for i < j.
    for i in 0..n {
        let mut carry = 0;
        for j in i + 1..n {
            (carry, result[i + j]) = ct_mul_add_l_l_l_c(result[i + j], op0[i], op0[j], carry);
        }
        result[i + n] = carry;
    }

    // Double it.
    let mut carry = 0;
    for result_val in result.iter_mut() {
        let next_carry = *result_val >> (LIMB_BITS - 1);
        *result_val = *result_val << 1 | carry;
        carry = next_carry;
    }
    debug_assert_eq!(carry, 0);

    // And add the squares on the diagonal.
    let mut carry = 0;
    for i in 0..n {
        let sq = ct_mul_l_l(op0[i], op0[i]);
        (carry, result[2 * i]) = ct_add_l_l_c(result[2 * i], sq.low(), carry);
        (carry, result[2 * i + 1]) = ct_add_l_l_c(result[2 * i + 1], sq.high(), carry);
    }
    debug_assert_eq!(carry, 0);
}

#[test]
fn test_square_mp_mag() {
    let op0 = [!0, !0, 3];
    let mut sq = [0; 6];
    square_mp_mag(&mut sq, &op0);
    let mut prod = [0; 6];
    mul_mp_mp_mag(&mut prod, &op0, &op0);
    assert_eq!(sq, prod);

    let op0 = [!0];
    let mut sq = [0; 2];
    square_mp_mag(&mut sq, &op0);
    assert_eq!(sq, [1, !1]);
}

/// Compute `w = u * v`.
///
/// If `u` and `v` refer to the same value, a dedicated squaring kernel is used.
pub fn mul_mp_mp(w: &mut MpInt, u: &MpInt, v: &MpInt) -> Result<(), MpIntError> {
    if u.is_zero() || v.is_zero() {
        w.set_zero();
        return Ok(());
    }
    let negative = u.negative ^ v.negative;
    let (op0, op1) = if u.limbs().len() >= v.limbs().len() {
        (u.limbs(), v.limbs())
    } else {
        (v.limbs(), u.limbs())
    };

    if op1.len() == 1 {
        w.limbs.try_resize(op0.len() + 1)?;
        let w_limbs = w.limbs.as_mut_slice();
        w_limbs[..op0.len()].copy_from_slice(op0);
        w_limbs[op0.len()] = mul_mp_l(&mut w_limbs[..op0.len()], op1[0]);
    } else {
        let nlimbs = op0.len() + op1.len();
        check_nlimbs(nlimbs)?;
        w.limbs.try_resize(nlimbs)?;
        if core::ptr::eq(u, v) {
            square_mp_mag(w.limbs.as_mut_slice(), op0);
        } else {
            mul_mp_mp_mag(w.limbs.as_mut_slice(), op0, op1);
        }
    }
    w.negative = negative;
    w.normalize();
    Ok(())
}

impl MpInt {
    pub fn checked_mul(&self, v: &MpInt) -> Result<MpInt, MpIntError> {
        let mut w = MpInt::new();
        mul_mp_mp(&mut w, self, v)?;
        Ok(w)
    }
}

#[test]
fn test_mul_mp_mp_signs() {
    for u in [0i64, 1, -1, 3, -3, i64::MAX, i64::MIN] {
        for v in [0i64, 1, -1, 5, -5, i64::MAX, i64::MIN] {
            let w = MpInt::from(u).checked_mul(&MpInt::from(v)).unwrap();
            assert_eq!(w, MpInt::from(u as i128 * v as i128));
        }
    }
}

#[test]
fn test_mul_mp_mp_multi_limb() {
    let u = tst_mk_mpint!("0xffffffffffffffffffffffffffffffff");
    let v = tst_mk_mpint!("-0x100000000000000000000000000000001");
    let w = u.checked_mul(&v).unwrap();
    assert_eq!(
        w,
        tst_mk_mpint!("-0xffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff")
    );
    assert_eq!(v.checked_mul(&u).unwrap(), w);
}

#[test]
fn test_mul_mp_mp_square_alias() {
    let u = tst_mk_mpint!("-0x123456789abcdef0fedcba9876543210");
    let sq = u.checked_mul(&u).unwrap();
    let u2 = u.try_clone().unwrap();
    assert_eq!(sq, u.checked_mul(&u2).unwrap());
    assert!(!sq.is_negative());

    let mut w = MpInt::new();
    mul_mp_mp(&mut w, &u, &u).unwrap();
    assert_eq!(w, sq);
}
