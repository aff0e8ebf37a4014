//! Integer and modular exponentiation.

use super::add_impl::sub_mp_mp;
use super::div_impl::rem_mp_mp;
use super::error::MpIntError;
use super::invmod_impl::inverse_mp_mp;
use super::limbs_buffer::{find_last_set_bit_mp, nlimbs_for_bits, test_bit_mp, LimbsBuffer};
use super::montgomery_impl::ct_exp_mod_odd_mp_mp;
use super::mpint::{abs_mp, MpInt};
use super::mul_impl::mul_mp_mp;
use core::mem;
use tracing::trace;

/// Compute `w = u^e` for a non-negative exponent.
///
/// `0^0` is one. Negative exponents fail with [`MpIntError::NegativeExponent`], results whose
/// size would exceed the limb limit with [`MpIntError::LimbsTooLarge`].
pub fn pow_mp_mp(w: &mut MpInt, u: &MpInt, e: &MpInt) -> Result<(), MpIntError> {
    if e.is_negative() {
        return Err(MpIntError::NegativeExponent);
    }
    if e.is_zero() {
        return w.try_set_l(false, 1);
    }
    if u.is_zero() {
        w.set_zero();
        return Ok(());
    }
    let negative = u.is_negative() && e.is_odd();
    if u.is_one_mag() {
        return w.try_set_l(negative, 1);
    }

    // |u| >= 2, so the result has at least (bit_length(u) - 1) * e + 1 bits.
    let e_val = u64::try_from(e).map_err(|_| MpIntError::LimbsTooLarge { nlimbs: usize::MAX })?;
    let min_nbits = (u.bit_length() - 1) as u128 * e_val as u128 + 1;
    let min_nbits =
        u64::try_from(min_nbits).map_err(|_| MpIntError::LimbsTooLarge { nlimbs: usize::MAX })?;
    nlimbs_for_bits(min_nbits)?;

    let mut base = MpInt::new();
    abs_mp(&mut base, u)?;
    let mut acc = MpInt::new();
    acc.try_set_l(false, 1)?;
    let mut scratch = MpInt::new();
    let mut i = find_last_set_bit_mp(e.limbs());
    while i > 0 {
        i -= 1;
        mul_mp_mp(&mut scratch, &acc, &acc)?;
        mem::swap(&mut acc, &mut scratch);
        if test_bit_mp(e.limbs(), i) {
            mul_mp_mp(&mut scratch, &acc, &base)?;
            mem::swap(&mut acc, &mut scratch);
        }
    }

    mem::swap(w, &mut acc);
    w.negative = negative;
    Ok(())
}

/// Square-and-multiply with a reduction after every step, for even moduli.
fn exp_mod_even(w: &mut MpInt, base: &MpInt, e: &MpInt, m: &MpInt) -> Result<(), MpIntError> {
    let mut acc = MpInt::new();
    acc.try_set_l(false, 1)?;
    let mut scratch = MpInt::new();
    let mut i = find_last_set_bit_mp(e.limbs());
    while i > 0 {
        i -= 1;
        mul_mp_mp(&mut scratch, &acc, &acc)?;
        rem_mp_mp(&mut acc, &scratch, m)?;
        if test_bit_mp(e.limbs(), i) {
            mul_mp_mp(&mut scratch, &acc, base)?;
            rem_mp_mp(&mut acc, &scratch, m)?;
        }
    }
    mem::swap(w, &mut acc);
    Ok(())
}

fn exp_mod_odd(w: &mut MpInt, base: &MpInt, e: &MpInt, m: &MpInt) -> Result<(), MpIntError> {
    let m_limbs = m.limbs();
    let mut base_limbs = LimbsBuffer::try_with_nlimbs(m_limbs.len())?;
    base_limbs.as_mut_slice()[..base.limbs().len()].copy_from_slice(base.limbs());
    let mut result = LimbsBuffer::try_with_nlimbs(m_limbs.len())?;
    ct_exp_mod_odd_mp_mp(result.as_mut_slice(), base_limbs.as_slice(), e.limbs(), m_limbs)?;
    *w = MpInt::from_limbs_buffer(false, result);
    Ok(())
}

/// Compute `w = base^e mod m`.
///
/// The result follows the floor remainder convention, i.e. it carries the sign of `m`. A negative
/// exponent raises the inverse of `base` modulo `m`, failing with [`MpIntError::NotInvertible`]
/// if there is none. Odd moduli get processed by a Montgomery ladder whose sequence of
/// operations does not depend on the exponent's bits.
pub fn powm_mp_mp_mp(
    w: &mut MpInt,
    base: &MpInt,
    e: &MpInt,
    m: &MpInt,
) -> Result<(), MpIntError> {
    if m.is_zero() {
        return Err(MpIntError::ZeroModulus);
    }
    let mut m_abs = MpInt::new();
    abs_mp(&mut m_abs, m)?;
    if m_abs.is_one_mag() {
        w.set_zero();
        return Ok(());
    }

    let mut e_abs = MpInt::new();
    abs_mp(&mut e_abs, e)?;
    let mut base_red = MpInt::new();
    if e.is_negative() {
        let mut inv = MpInt::new();
        inverse_mp_mp(&mut inv, base, &m_abs)?;
        rem_mp_mp(&mut base_red, &inv, &m_abs)?;
    } else {
        rem_mp_mp(&mut base_red, base, &m_abs)?;
    }

    let mut r = MpInt::new();
    if e_abs.is_zero() || base_red.is_one_mag() {
        r.try_set_l(false, 1)?;
    } else if base_red.is_zero() {
        r.set_zero();
    } else if m_abs.is_odd() {
        trace!(nlimbs = m_abs.limbs().len(), "powm via Montgomery ladder");
        exp_mod_odd(&mut r, &base_red, &e_abs, &m_abs)?;
    } else {
        trace!(nlimbs = m_abs.limbs().len(), "powm via square-and-multiply");
        exp_mod_even(&mut r, &base_red, &e_abs, &m_abs)?;
    }

    if m.is_negative() && !r.is_zero() {
        sub_mp_mp(w, &r, &m_abs)
    } else {
        mem::swap(w, &mut r);
        Ok(())
    }
}

impl MpInt {
    pub fn checked_pow(&self, e: &MpInt) -> Result<MpInt, MpIntError> {
        let mut w = MpInt::new();
        pow_mp_mp(&mut w, self, e)?;
        Ok(w)
    }

    pub fn checked_powm(&self, e: &MpInt, m: &MpInt) -> Result<MpInt, MpIntError> {
        let mut w = MpInt::new();
        powm_mp_mp_mp(&mut w, self, e, m)?;
        Ok(w)
    }
}

#[test]
fn test_pow_mp_mp() {
    let pow = |u: i64, e: i64| MpInt::from(u).checked_pow(&MpInt::from(e));
    assert_eq!(pow(0, 0).unwrap(), MpInt::from(1i64));
    assert_eq!(pow(-5, 0).unwrap(), MpInt::from(1i64));
    assert!(pow(0, 7).unwrap().is_zero());
    assert_eq!(pow(1, 1 << 40).unwrap(), MpInt::from(1i64));
    assert_eq!(pow(-1, (1 << 40) + 1).unwrap(), MpInt::from(-1i64));
    assert_eq!(pow(-1, 1 << 40).unwrap(), MpInt::from(1i64));
    assert_eq!(pow(3, 5).unwrap(), MpInt::from(243i64));
    assert_eq!(pow(-3, 3).unwrap(), MpInt::from(-27i64));
    assert_eq!(pow(-2, 63).unwrap(), MpInt::from(i64::MIN));
    assert_eq!(pow(2, 100).unwrap(), tst_mk_mpint!("0x10000000000000000000000000"));
    assert_eq!(pow(10, 30).unwrap().to_string(), "1000000000000000000000000000000");
    assert_eq!(pow(2, -1).unwrap_err(), MpIntError::NegativeExponent);
    assert!(matches!(pow(2, i64::MAX), Err(MpIntError::LimbsTooLarge { .. })));
}

#[test]
fn test_powm_mp_mp_mp() {
    let powm =
        |b: i64, e: i64, m: i64| MpInt::from(b).checked_powm(&MpInt::from(e), &MpInt::from(m));
    assert_eq!(powm(4, -1, 7).unwrap(), MpInt::from(2i64));
    assert_eq!(powm(2, 10, 1000).unwrap(), MpInt::from(24i64));
    assert_eq!(powm(2, 10, 1001).unwrap(), MpInt::from(23i64));
    assert_eq!(powm(-2, 3, 7).unwrap(), MpInt::from(6i64));
    assert_eq!(powm(2, 0, -5).unwrap(), MpInt::from(-4i64));
    assert_eq!(powm(3, 2, -7).unwrap(), MpInt::from(-5i64));
    assert_eq!(powm(7, 2, -7).unwrap(), MpInt::new());
    assert!(powm(12345, 678, 1).unwrap().is_zero());
    assert!(powm(12345, 678, -1).unwrap().is_zero());
    assert_eq!(powm(0, 0, 5).unwrap(), MpInt::from(1i64));
    assert!(powm(10, 3, 5).unwrap().is_zero());
    assert_eq!(powm(11, 12345, 5).unwrap(), MpInt::from(1i64));
    assert_eq!(powm(3, -2, 8).unwrap(), MpInt::from(1i64));
    assert_eq!(powm(2, 3, 0).unwrap_err(), MpIntError::ZeroModulus);
    assert_eq!(powm(2, -1, 4).unwrap_err(), MpIntError::NotInvertible);
}

#[test]
fn test_powm_mp_mp_mp_multi_limb() {
    // Fermat: a^(p - 1) == 1 mod p for the prime p = 2^127 - 1.
    let p = tst_mk_mpint!("0x7fffffffffffffffffffffffffffffff");
    let p_minus_1 = p.checked_sub(&MpInt::from(1i64)).unwrap();
    let a = tst_mk_mpint!("0x123456789abcdef0123456789abcdef");
    assert_eq!(a.checked_powm(&p_minus_1, &p).unwrap(), MpInt::from(1i64));

    // Odd and even moduli agree with plain power followed by a floor remainder.
    let e = MpInt::from(37i64);
    let big = a.checked_pow(&e).unwrap();
    for m in [
        tst_mk_mpint!("0xfedcba9876543210fedcba9876543211"),
        tst_mk_mpint!("0xfedcba9876543210fedcba9876543210"),
        tst_mk_mpint!("-0xfedcba9876543210fedcba98765432"),
    ] {
        let expected = big.checked_rem_floor(&m).unwrap();
        assert_eq!(a.checked_powm(&e, &m).unwrap(), expected);
        let neg_a = a.checked_neg().unwrap();
        let expected = neg_a.checked_pow(&e).unwrap().checked_rem_floor(&m).unwrap();
        assert_eq!(neg_a.checked_powm(&e, &m).unwrap(), expected);
    }
}
