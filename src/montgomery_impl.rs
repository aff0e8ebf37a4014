//! Montgomery arithmetic for odd moduli.
//!
//! Values in Montgomery form are represented as `a * R mod n`, with `R = 2^(LIMB_BITS * s)` and
//! `s` the number of limbs in `n`. All slices passed around here have exactly `s` limbs.

use super::add_impl::ct_sub_cond_mp_mp;
use super::cmp_impl::ct_geq_mp_mp;
use super::div_impl::tdivmod_mag;
use super::error::MpIntError;
use super::limb::{ct_add_l_l, ct_inv_mod_l, ct_mul_add_l_l_l_c, LimbChoice, LimbType};
use super::limbs_buffer::{find_last_set_bit_mp, test_bit_mp, LimbsBuffer};

#[cfg(test)]
use super::limb::LIMB_BITS;

/// Compute `-n0^-1 mod 2^LIMB_BITS` for an odd limb `n0`.
pub fn ct_montgomery_neg_n0_inv_mod_l(n0: LimbType) -> LimbType {
    debug_assert_eq!(n0 & 1, 1);
    let n0_inv_mod_l = ct_inv_mod_l(n0);
    (!n0_inv_mod_l).wrapping_add(1)
}

#[test]
fn test_ct_montgomery_neg_n0_inv_mod_l() {
    for n0 in 0 as LimbType..128 {
        let n0 = 2 * n0 + 1;
        for j in 0..2048 {
            const MERSENNE_PRIME_13: LimbType = 8191 as LimbType;
            let v = MERSENNE_PRIME_13.wrapping_mul((511 as LimbType).wrapping_mul(j));
            let n0 = n0.wrapping_add(v << 8);
            let neg_n0_inv = ct_montgomery_neg_n0_inv_mod_l(n0);
            assert_eq!(n0.wrapping_mul(neg_n0_inv), !0);
        }
    }
}

/// Single limb Montgomery reduction step.
///
/// Adds the multiple `m * n` of the modulus making the lowest limb vanish and hands out the
/// remaining limbs shifted down by one position.
pub struct CtMontgomeryRedcKernel {
    m: LimbType,
    carry: LimbType,
}

impl CtMontgomeryRedcKernel {
    pub fn start(t0_val: LimbType, n0_val: LimbType, neg_n0_inv_mod_l: LimbType) -> Self {
        let m = t0_val.wrapping_mul(neg_n0_inv_mod_l);
        let (carry, redced_t0_val) = ct_mul_add_l_l_l_c(t0_val, m, n0_val, 0);
        debug_assert_eq!(redced_t0_val, 0);
        Self { m, carry }
    }

    pub fn update(&mut self, t_val: LimbType, n_val: LimbType) -> LimbType {
        let redced_t_val;
        (self.carry, redced_t_val) = ct_mul_add_l_l_l_c(t_val, self.m, n_val, self.carry);
        redced_t_val
    }

    pub fn finish(self, t_val: LimbType) -> (LimbType, LimbType) {
        ct_add_l_l(t_val, self.carry)
    }
}

/// Montgomery multiplication, `result = op0 * op1 * R^-1 mod n`.
///
/// Both factors must be less than `n`.
pub fn ct_montgomery_mul_mod_mp_mp(
    result: &mut [LimbType],
    op0: &[LimbType],
    op1: &[LimbType],
    n: &[LimbType],
    neg_n0_inv_mod_l: LimbType,
) {
    // This is an implementation of the "Finely Integrated Operand Scanning (FIOS)
    // Method" approach to fused multiplication and Montgomery reduction, as
    // described in "Analyzing and Comparing Montgomery Multiplication
    // Algorithm", IEEE Micro, 16(3):26-33, June 1996.
    let n_nlimbs = n.len();
    debug_assert!(n_nlimbs > 0);
    debug_assert_eq!(result.len(), n_nlimbs);
    debug_assert_eq!(op0.len(), n_nlimbs);
    debug_assert_eq!(op1.len(), n_nlimbs);
    let n0_val = n[0];
    debug_assert_eq!(n0_val.wrapping_mul(neg_n0_inv_mod_l), !0);

    result.fill(0);
    let mut result_carry = 0;
    for op0_val in op0.iter() {
        debug_assert!(result_carry <= 1); // Loop invariant.
        let (mut op0_op1_add_carry, result_val) =
            ct_mul_add_l_l_l_c(result[0], *op0_val, op1[0], 0);
        let mut redc_kernel = CtMontgomeryRedcKernel::start(result_val, n0_val, neg_n0_inv_mod_l);

        for j in 1..n_nlimbs {
            let result_val;
            (op0_op1_add_carry, result_val) =
                ct_mul_add_l_l_l_c(result[j], *op0_val, op1[j], op0_op1_add_carry);
            result[j - 1] = redc_kernel.update(result_val, n[j]);
        }

        let (carry0, result_val) = ct_add_l_l(result_carry, op0_op1_add_carry);
        let (carry1, result_val) = redc_kernel.finish(result_val);
        result[n_nlimbs - 1] = result_val;
        result_carry = carry0 + carry1;
    }

    // The result is less than 2 * n, one conditional subtraction brings it into range.
    let needs_sub = LimbChoice::from(result_carry) | ct_geq_mp_mp(result, n);
    ct_sub_cond_mp_mp(result, n, needs_sub);
}

/// Conditional Montgomery multiplication.
///
/// Computes `result = op0 * op1 * R^-1 mod n` if `cond` is set and copies `op0` otherwise. The
/// multiplication is carried out in either case.
pub fn ct_montgomery_mul_mod_cond_mp_mp(
    result: &mut [LimbType],
    op0: &[LimbType],
    op1: &[LimbType],
    n: &[LimbType],
    neg_n0_inv_mod_l: LimbType,
    cond: LimbChoice,
) {
    ct_montgomery_mul_mod_mp_mp(result, op0, op1, n, neg_n0_inv_mod_l);
    for (result_val, op0_val) in result.iter_mut().zip(op0.iter()) {
        *result_val = cond.select(*op0_val, *result_val);
    }
}

/// Compute `op0 * R mod n` for an `op0 < n`.
pub fn to_montgomery_form_mp(op0: &[LimbType], n: &[LimbType]) -> Result<LimbsBuffer, MpIntError> {
    let n_nlimbs = n.len();
    let mut shifted = LimbsBuffer::try_with_nlimbs(n_nlimbs + op0.len())?;
    shifted.as_mut_slice()[n_nlimbs..].copy_from_slice(op0);
    shifted.normalize();
    let (_, mut r) = tdivmod_mag(shifted.as_slice(), n)?;
    r.try_resize(n_nlimbs)?;
    Ok(r)
}

/// Modular exponentiation for an odd modulus.
///
/// Computes `result = base^exp mod n`. The base must be less than `n` and padded to `n`'s
/// length, `n` must be normalized and greater than one. A zero exponent yields one.
pub fn ct_exp_mod_odd_mp_mp(
    result: &mut [LimbType],
    base: &[LimbType],
    exp: &[LimbType],
    n: &[LimbType],
) -> Result<(), MpIntError> {
    let n_nlimbs = n.len();
    debug_assert_eq!(n[0] & 1, 1);
    debug_assert_eq!(result.len(), n_nlimbs);
    debug_assert_eq!(base.len(), n_nlimbs);
    let neg_n0_inv_mod_l = ct_montgomery_neg_n0_inv_mod_l(n[0]);

    let mut one = LimbsBuffer::try_with_nlimbs(n_nlimbs)?;
    one.as_mut_slice()[0] = 1;
    let one_mg = to_montgomery_form_mp(one.as_slice(), n)?;
    let base_mg = to_montgomery_form_mp(base, n)?;
    let mut scratch = LimbsBuffer::try_with_nlimbs(n_nlimbs)?;

    result.copy_from_slice(one_mg.as_slice());
    let mut i = find_last_set_bit_mp(exp);
    while i > 0 {
        i -= 1;
        ct_montgomery_mul_mod_mp_mp(
            scratch.as_mut_slice(),
            result,
            result,
            n,
            neg_n0_inv_mod_l,
        );
        let bit = LimbChoice::from(test_bit_mp(exp, i) as LimbType);
        ct_montgomery_mul_mod_cond_mp_mp(
            result,
            scratch.as_slice(),
            base_mg.as_slice(),
            n,
            neg_n0_inv_mod_l,
            bit,
        );
    }

    // Convert back out of Montgomery form.
    scratch.as_mut_slice().copy_from_slice(result);
    ct_montgomery_mul_mod_mp_mp(
        result,
        scratch.as_slice(),
        one.as_slice(),
        n,
        neg_n0_inv_mod_l,
    );
    Ok(())
}

#[cfg(test)]
fn test_exp_mod_odd_one(base: u64, exp: u64, n: u64) {
    let mut expected: u128 = 1;
    let mut b = base as u128 % n as u128;
    let mut e = exp;
    while e != 0 {
        if e & 1 != 0 {
            expected = expected * b % n as u128;
        }
        b = b * b % n as u128;
        e >>= 1;
    }

    let n_mp = super::mpint::MpInt::from(n);
    let base_mp = super::mpint::MpInt::from(base % n);
    let exp_mp = super::mpint::MpInt::from(exp);
    let n_limbs = n_mp.limbs();
    let mut base_limbs = base_mp.limbs().to_vec();
    base_limbs.resize(n_limbs.len(), 0);
    let mut result = vec![0; n_limbs.len()];
    ct_exp_mod_odd_mp_mp(&mut result, &base_limbs, exp_mp.limbs(), n_limbs).unwrap();
    let result = super::mpint::MpInt::try_from_limbs(false, &result).unwrap();
    assert_eq!(result, super::mpint::MpInt::from(expected as u64));
}

#[test]
fn test_ct_exp_mod_odd_mp_mp() {
    test_exp_mod_odd_one(2, 10, 1001);
    test_exp_mod_odd_one(3, 0, 7);
    test_exp_mod_odd_one(0, 5, 7);
    test_exp_mod_odd_one(4, 6, 7);
    test_exp_mod_odd_one(123456789, 987654321, 1000000007);
    test_exp_mod_odd_one(!0 - 1, !0, !0);
    test_exp_mod_odd_one(0x1234_5678_9abc_def0, 0xfedc_ba98, 0xffff_ffff_ffff_ffc5);
}

#[test]
fn test_ct_montgomery_mul_mod_mp_mp() {
    // Modulus 2^(2 * LIMB_BITS) - 1 spans two limbs. Its R is 2^(2 * LIMB_BITS) == 1 mod n,
    // so Montgomery multiplication coincides with plain modular multiplication.
    let n = [!0, !0];
    let neg_n0_inv_mod_l = ct_montgomery_neg_n0_inv_mod_l(n[0]);
    let op0 = [2, 0];
    let op1 = [0, 1 << (LIMB_BITS - 1)];
    let mut result = [0; 2];
    ct_montgomery_mul_mod_mp_mp(&mut result, &op0, &op1, &n, neg_n0_inv_mod_l);
    // 2 * 2^(2 * LIMB_BITS - 1) == 2^(2 * LIMB_BITS) == 1.
    assert_eq!(result, [1, 0]);

    ct_montgomery_mul_mod_cond_mp_mp(
        &mut result,
        &op0,
        &op1,
        &n,
        neg_n0_inv_mod_l,
        LimbChoice::from(0),
    );
    assert_eq!(result, op0);
}
