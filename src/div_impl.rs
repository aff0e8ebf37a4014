//! Implementation of multiprecision integer division primitives.
//!
//! Three rounding conventions are provided, each under its own name:
//! - [`tdivmod_mp_mp()`]: quotient rounded toward zero, remainder has the sign of the dividend.
//! - [`divmod_mp_mp()`], [`quo_mp_mp()`], [`rem_mp_mp()`]: quotient rounded toward negative
//!   infinity, remainder has the sign of the divisor. This is the convention all higher level
//!   operations build upon.
//! - [`divmod_near_mp_mp()`]: quotient rounded to the nearest integer, ties to even.

use super::add_impl::{ct_add_mp_l, ct_add_mp_mp};
use super::cmp_impl::cmp_mag_mp_mp;
use super::error::MpIntError;
use super::limb::{
    ct_add_l_l, ct_add_l_l_c, ct_mul_add_l_l_l_c, ct_mul_l_l, ct_sub_l_l_b, div_dl_l, DoubleLimb,
    LimbType,
};
use super::limbs_buffer::LimbsBuffer;
use super::mpint::MpInt;
use core::cmp::Ordering;
use core::mem;

#[cfg(test)]
use super::limb::LIMB_BITS;

/// Divide a magnitude by a limb in place.
///
/// Returns the remainder.
///
/// # Arguments
///
/// * `op0` - The dividend, overwritten by the quotient.
/// * `op1` - The non-zero divisor.
///
pub fn div_mp_l(op0: &mut [LimbType], op1: LimbType) -> LimbType {
    debug_assert!(op1 != 0);
    let mut r = 0;
    for op0_val in op0.iter_mut().rev() {
        let (q, rem) = div_dl_l(&DoubleLimb::new(r, *op0_val), op1);
        debug_assert_eq!(q.high(), 0);
        *op0_val = q.low();
        r = rem;
    }
    r
}

#[test]
fn test_div_mp_l() {
    let mut op0 = [0, 1];
    let r = div_mp_l(&mut op0, 3);
    // 2^LIMB_BITS == 1 mod 3 for even LIMB_BITS.
    assert_eq!(r, 1);
    assert_eq!(op0[1], 0);
    assert_eq!(op0[0], !0 / 3);

    let mut op0 = [7];
    assert_eq!(div_mp_l(&mut op0, 7), 0);
    assert_eq!(op0, [1]);
}

fn u_sub_scaled_qv_at(
    u: &mut [LimbType],
    j: usize,
    q: LimbType,
    v: &[LimbType],
    scaling: LimbType,
) -> LimbType {
    let v_nlimbs = v.len();
    let mut scaled_v_carry = 0;
    let mut qv_carry = 0;
    let mut u_borrow = 0;
    for i in 0..v_nlimbs {
        let (carry, scaled_v_low) = ct_mul_add_l_l_l_c(scaled_v_carry, v[i], scaling, 0);
        scaled_v_carry = carry;

        let (carry, qv_low) = ct_mul_add_l_l_l_c(qv_carry, scaled_v_low, q, 0);
        qv_carry = carry;

        (u_borrow, u[j + i]) = ct_sub_l_l_b(u[j + i], qv_low, u_borrow);
    }
    debug_assert_eq!(scaled_v_carry, 0);

    (u_borrow, u[j + v_nlimbs]) = ct_sub_l_l_b(u[j + v_nlimbs], qv_carry, u_borrow);
    u_borrow
}

fn u_add_scaled_v_at(u: &mut [LimbType], j: usize, v: &[LimbType], scaling: LimbType) -> LimbType {
    let v_nlimbs = v.len();
    let mut scaled_v_carry = 0;
    let mut u_carry = 0;
    for i in 0..v_nlimbs {
        let (carry, scaled_v_low) = ct_mul_add_l_l_l_c(scaled_v_carry, v[i], scaling, 0);
        scaled_v_carry = carry;

        (u_carry, u[j + i]) = ct_add_l_l_c(u[j + i], scaled_v_low, u_carry);
    }
    debug_assert_eq!(scaled_v_carry, 0);

    (u_carry, u[j + v_nlimbs]) = ct_add_l_l(u[j + v_nlimbs], u_carry);
    u_carry
}

/// Long division of two magnitudes.
///
/// On return, the remainder is found in the low `v.len()` limbs of `u`, all of `u`'s upper limbs
/// are zero.
///
/// # Arguments
///
/// * `u` - The dividend, with one extra zero limb at the top.
/// * `v` - The normalized divisor, with a non-zero high limb. It must not be longer than the
///   dividend.
/// * `q_out` - Receives the quotient's `u.len() - v.len()` low limbs, if provided.
///
fn div_mp_mp_mag(u: &mut [LimbType], v: &[LimbType], mut q_out: Option<&mut [LimbType]>) {
    // Division algorithm according to D. E. Knuth, "The Art of Computer Programming", vol 2.
    let v_nlimbs = v.len();
    debug_assert!(v_nlimbs > 0);
    let v_high = v[v_nlimbs - 1];
    debug_assert!(v_high != 0);
    let u_nlimbs = u.len() - 1;
    debug_assert!(u_nlimbs >= v_nlimbs);
    debug_assert_eq!(u[u_nlimbs], 0);
    let q_nlimbs = u_nlimbs - v_nlimbs + 1;
    if let Some(q_out) = &q_out {
        debug_assert!(q_out.len() >= q_nlimbs);
    }

    // Normalize divisor's high limb. Calculate 2^LIMB_BITS / (v_high + 1).
    let scaling = {
        // Avoid overflow in calculating v_high + 1. The result is still correct if the
        // increment is skipped in this case.
        let den = if v_high == !0 { v_high } else { v_high + 1 };

        // First calculate (2^LIMB_BITS - 1) / (v_high + 1).
        let q = !0 / den;
        let rem = !0 - den * q;
        // And possibly round up to get 2^LIMB_BITS / (v_high + 1).
        // Note that the test below is equivalent to rem + 1 == v_high + 1.
        q + (rem == v_high) as LimbType
    };

    // v won't get scaled in place, but on the fly as needed. For now, scale only the two high
    // limbs. Multiplying v by scaling does not overflow its width:
    // b >= scaling * (v_high + 1) > scaling * v.
    let mut carry = 0;
    let mut scaled_v_tail_high = 0;
    for v_val in v[..v_nlimbs - 1].iter() {
        let scaled_v_low;
        (carry, scaled_v_low) = ct_mul_add_l_l_l_c(carry, *v_val, scaling, 0);
        scaled_v_tail_high = scaled_v_low;
    }
    let (carry, scaled_v_high) = ct_mul_add_l_l_l_c(carry, v_high, scaling, 0);
    debug_assert_eq!(carry, 0);

    // Scale u. The extra high limb absorbs the last carry.
    let mut carry = 0;
    for u_val in u.iter_mut() {
        (carry, *u_val) = ct_mul_add_l_l_l_c(carry, *u_val, scaling, 0);
    }
    debug_assert_eq!(carry, 0);

    let mut j = q_nlimbs;
    while j > 0 {
        j -= 1;
        let q = {
            let u_h = u[v_nlimbs + j];
            let u_l = u[v_nlimbs + j - 1];

            let (q, r) = div_dl_l(&DoubleLimb::new(u_h, u_l), scaled_v_high);
            // As per the normalization of v_high, q fits a limb plus one bit. If the extra bit
            // is set, then u_h == scaled_v_high, as the loop invariant u[j+n:j] / v < b implies
            // u_h <= scaled_v_high. Cap q to b - 1 then and adjust r to
            // u_h * b + u_l - (b - 1) * v_h = v_h + u_l.
            debug_assert!(q.high() <= 1);
            debug_assert!(q.high() == 0 || u_h == scaled_v_high);
            let (q, r, r_carry) = if q.high() != 0 {
                let (r_carry, r) = ct_add_l_l(u_l, scaled_v_high);
                (!0, r, r_carry)
            } else {
                (q.low(), r, 0)
            };

            // As long as r does not overflow b, check whether q * v[n - 2] > b * r + u[j + n - 2].
            // If so, q is over-estimated by one. A remaining over-estimation is rare and caught
            // by the add-back step below.
            if r_carry == 0 {
                let u_tail_high = if v_nlimbs + j >= 2 { u[v_nlimbs + j - 2] } else { 0 };
                let qv_tail_high = ct_mul_l_l(scaled_v_tail_high, q);
                if qv_tail_high.high() > r
                    || (qv_tail_high.high() == r && qv_tail_high.low() > u_tail_high)
                {
                    q - 1
                } else {
                    q
                }
            } else {
                q
            }
        };

        let borrow = u_sub_scaled_qv_at(u, j, q, v, scaling);
        debug_assert_eq!(borrow & !1, 0);
        let q = if borrow != 0 {
            // q had been over-estimated, add one v back.
            u_add_scaled_v_at(u, j, v, scaling);
            q - 1
        } else {
            q
        };
        if let Some(q_out) = &mut q_out {
            q_out[j] = q;
        }
    }

    // Finally, divide the resulting remainder in u by the scaling again.
    let r = div_mp_l(u, scaling);
    debug_assert_eq!(r, 0);
}

#[cfg(test)]
fn test_div_mp_mp_mag_one(u: &[LimbType], v: &[LimbType]) {
    use super::mul_impl::mul_mp_l;

    let mut r = u.to_vec();
    r.push(0);
    let mut q = vec![0; u.len() - v.len() + 1];
    div_mp_mp_mag(&mut r, v, Some(&mut q));
    assert!(r[v.len()..].iter().all(|l| *l == 0));
    let r_nlimbs = super::limbs_buffer::find_last_set_limb_mp(&r);
    assert_eq!(cmp_mag_mp_mp(&r[..r_nlimbs], v), Ordering::Less);

    // Multiply q by v again and add the remainder back, the result should match u.
    let mut check = vec![0; u.len() + 1];
    for (i, v_val) in v.iter().enumerate() {
        let mut prod = q.clone();
        prod.push(0);
        let carry = mul_mp_l(&mut prod, *v_val);
        assert_eq!(carry, 0);
        let carry = ct_add_mp_mp(&mut check[i..], &prod);
        assert_eq!(carry, 0);
    }
    let carry = ct_add_mp_mp(&mut check, &r[..v.len()]);
    assert_eq!(carry, 0);
    assert_eq!(&check[..u.len()], u);
    assert_eq!(check[u.len()], 0);
}

#[test]
fn test_div_mp_mp_mag() {
    test_div_mp_mp_mag_one(&[5], &[3]);
    test_div_mp_mp_mag_one(&[!0, !0], &[!0]);
    test_div_mp_mp_mag_one(&[!0, !0, !0], &[!0, !0]);
    test_div_mp_mp_mag_one(&[0, 0, 1], &[1, 1]);
    test_div_mp_mp_mag_one(&[!0, !0, !0, !0], &[1, 1 << (LIMB_BITS - 1)]);
    test_div_mp_mp_mag_one(&[0, 0, 0, 1 << (LIMB_BITS - 1)], &[1, 0, 1 << (LIMB_BITS - 1)]);
    test_div_mp_mp_mag_one(&[3, 2, 1, 0x7f], &[!0, 0x7f]);
    test_div_mp_mp_mag_one(&[0, 0, !0 - 1, !0], &[!0, !0]);

    for i in 0..LIMB_BITS {
        for j in 0..LIMB_BITS {
            let v_high: LimbType = 1 << i | 1;
            test_div_mp_mp_mag_one(&[!0, 1 << j, !0, v_high], &[1 << j, v_high]);
            test_div_mp_mp_mag_one(&[0, !0 >> j, v_high], &[!0 >> i, !0, v_high]);
        }
    }
}

/// Truncating division of two normalized magnitudes.
///
/// Returns the quotient and remainder magnitudes, not necessarily normalized. The divisor must be
/// non-zero.
pub(crate) fn tdivmod_mag(
    u: &[LimbType],
    v: &[LimbType],
) -> Result<(LimbsBuffer, LimbsBuffer), MpIntError> {
    debug_assert!(!v.is_empty());
    if cmp_mag_mp_mp(u, v) == Ordering::Less {
        return Ok((LimbsBuffer::new(), LimbsBuffer::try_from_limbs(u)?));
    }

    if v.len() == 1 {
        let mut q = LimbsBuffer::try_from_limbs(u)?;
        let r = div_mp_l(q.as_mut_slice(), v[0]);
        return Ok((q, LimbsBuffer::try_from_limbs(&[r])?));
    }

    let mut r = LimbsBuffer::try_with_nlimbs(u.len() + 1)?;
    r.as_mut_slice()[..u.len()].copy_from_slice(u);
    let mut q = LimbsBuffer::try_with_nlimbs(u.len() - v.len() + 1)?;
    div_mp_mp_mag(r.as_mut_slice(), v, Some(q.as_mut_slice()));
    r.truncate(v.len());
    Ok((q, r))
}

/// Increment a magnitude by one, growing it if needed.
pub(crate) fn inc_mag(op0: &mut LimbsBuffer) -> Result<(), MpIntError> {
    let nlimbs = op0.nlimbs();
    op0.try_resize(nlimbs + 1)?;
    let carry = ct_add_mp_l(op0.as_mut_slice(), 1);
    debug_assert_eq!(carry, 0);
    Ok(())
}

/// Replace a magnitude `r` by `v - r`, for `0 < r < v`.
fn rsub_mag(r: &mut LimbsBuffer, v: &[LimbType]) -> Result<(), MpIntError> {
    r.normalize();
    debug_assert_eq!(cmp_mag_mp_mp(r.as_slice(), v), Ordering::Less);
    r.try_resize(v.len())?;
    // v - r == v + (~r + 1) mod b^n.
    let r_limbs = r.as_mut_slice();
    for r_val in r_limbs.iter_mut() {
        *r_val = !*r_val;
    }
    ct_add_mp_l(r_limbs, 1);
    ct_add_mp_mp(r_limbs, v);
    Ok(())
}

fn store_result(w: &mut MpInt, negative: bool, mut limbs: LimbsBuffer) {
    mem::swap(&mut w.limbs, &mut limbs);
    w.negative = negative;
    w.normalize();
}

/// Truncating division: `u == q * v + r`, `|r| < |v|` and `r` has the sign of `u`.
pub fn tdivmod_mp_mp(
    q: &mut MpInt,
    r: &mut MpInt,
    u: &MpInt,
    v: &MpInt,
) -> Result<(), MpIntError> {
    if v.is_zero() {
        return Err(MpIntError::DivisionByZero);
    }
    let (q_mag, r_mag) = tdivmod_mag(u.limbs(), v.limbs())?;
    store_result(q, u.negative ^ v.negative, q_mag);
    store_result(r, u.negative, r_mag);
    Ok(())
}

type SignedMag = (bool, LimbsBuffer);

/// Floor division of magnitudes with signs.
///
/// Returns the quotient and remainder with their respective signs.
fn floor_divmod(u: &MpInt, v: &MpInt) -> Result<(SignedMag, SignedMag), MpIntError> {
    if v.is_zero() {
        return Err(MpIntError::DivisionByZero);
    }
    let (mut q_mag, mut r_mag) = tdivmod_mag(u.limbs(), v.limbs())?;
    let r_is_zero = r_mag.as_slice().iter().all(|l| *l == 0);
    if u.negative != v.negative && !r_is_zero {
        // Round the quotient away from zero, i.e. toward negative infinity. The remainder
        // becomes |v| - |r| with the sign of v.
        inc_mag(&mut q_mag)?;
        rsub_mag(&mut r_mag, v.limbs())?;
    }
    Ok(((u.negative ^ v.negative, q_mag), (v.negative, r_mag)))
}

/// Floor division: `u == q * v + r`, `|r| < |v|` and `r` has the sign of `v`.
pub fn divmod_mp_mp(q: &mut MpInt, r: &mut MpInt, u: &MpInt, v: &MpInt) -> Result<(), MpIntError> {
    let ((q_negative, q_mag), (r_negative, r_mag)) = floor_divmod(u, v)?;
    store_result(q, q_negative, q_mag);
    store_result(r, r_negative, r_mag);
    Ok(())
}

/// Floor quotient, as in [`divmod_mp_mp()`].
pub fn quo_mp_mp(q: &mut MpInt, u: &MpInt, v: &MpInt) -> Result<(), MpIntError> {
    let ((q_negative, q_mag), _) = floor_divmod(u, v)?;
    store_result(q, q_negative, q_mag);
    Ok(())
}

/// Floor remainder, as in [`divmod_mp_mp()`].
pub fn rem_mp_mp(r: &mut MpInt, u: &MpInt, v: &MpInt) -> Result<(), MpIntError> {
    let (_, (r_negative, r_mag)) = floor_divmod(u, v)?;
    store_result(r, r_negative, r_mag);
    Ok(())
}

/// Division rounding to the nearest quotient, ties to even.
///
/// `u == q * v + r` with `|r| <= |v| / 2`.
pub fn divmod_near_mp_mp(
    q: &mut MpInt,
    r: &mut MpInt,
    u: &MpInt,
    v: &MpInt,
) -> Result<(), MpIntError> {
    if v.is_zero() {
        return Err(MpIntError::DivisionByZero);
    }
    let (mut q_mag, mut r_mag) = tdivmod_mag(u.limbs(), v.limbs())?;
    r_mag.normalize();

    // Compare 2 * |r| against |v|.
    let r_twice = {
        let mut r_twice = LimbsBuffer::try_with_nlimbs(r_mag.nlimbs() + 1)?;
        let r_twice_limbs = r_twice.as_mut_slice();
        r_twice_limbs[..r_mag.nlimbs()].copy_from_slice(r_mag.as_slice());
        let carry = ct_add_mp_mp(&mut r_twice_limbs[..], r_mag.as_slice());
        debug_assert_eq!(carry, 0);
        r_twice.normalize();
        r_twice
    };
    let round_up = match cmp_mag_mp_mp(r_twice.as_slice(), v.limbs()) {
        Ordering::Greater => true,
        Ordering::Equal => q_mag.load_l(0) & 1 != 0,
        Ordering::Less => false,
    };

    let mut r_negative = u.negative;
    if round_up {
        inc_mag(&mut q_mag)?;
        rsub_mag(&mut r_mag, v.limbs())?;
        r_negative = !r_negative;
    }
    store_result(q, u.negative ^ v.negative, q_mag);
    store_result(r, r_negative, r_mag);
    Ok(())
}

impl MpInt {
    /// Floor division, returning quotient and remainder.
    pub fn checked_divmod(&self, v: &MpInt) -> Result<(MpInt, MpInt), MpIntError> {
        let (mut q, mut r) = (MpInt::new(), MpInt::new());
        divmod_mp_mp(&mut q, &mut r, self, v)?;
        Ok((q, r))
    }

    /// Truncating division, returning quotient and remainder.
    pub fn checked_tdivmod(&self, v: &MpInt) -> Result<(MpInt, MpInt), MpIntError> {
        let (mut q, mut r) = (MpInt::new(), MpInt::new());
        tdivmod_mp_mp(&mut q, &mut r, self, v)?;
        Ok((q, r))
    }

    /// Floor quotient.
    pub fn checked_div_floor(&self, v: &MpInt) -> Result<MpInt, MpIntError> {
        let mut q = MpInt::new();
        quo_mp_mp(&mut q, self, v)?;
        Ok(q)
    }

    /// Floor remainder, with the sign of `v`.
    pub fn checked_rem_floor(&self, v: &MpInt) -> Result<MpInt, MpIntError> {
        let mut r = MpInt::new();
        rem_mp_mp(&mut r, self, v)?;
        Ok(r)
    }

    pub fn checked_divmod_near(&self, v: &MpInt) -> Result<(MpInt, MpInt), MpIntError> {
        let (mut q, mut r) = (MpInt::new(), MpInt::new());
        divmod_near_mp_mp(&mut q, &mut r, self, v)?;
        Ok((q, r))
    }
}

#[test]
fn test_divmod_mp_mp_floor() {
    let (q, r) = MpInt::from(-7i64).checked_divmod(&MpInt::from(2i64)).unwrap();
    assert_eq!(q, MpInt::from(-4i64));
    assert_eq!(r, MpInt::from(1i64));

    for u in [0i64, 1, -1, 7, -7, 8, -8, 100, -100, i64::MAX, i64::MIN] {
        for v in [1i64, -1, 2, -2, 3, -3, 9, -9, 1000, -1000, i64::MAX, i64::MIN] {
            let (q, r) = MpInt::from(u).checked_divmod(&MpInt::from(v)).unwrap();
            let (u, v) = (u as i128, v as i128);
            assert_eq!(q, MpInt::from(floor_div(u, v)));
            assert_eq!(r, MpInt::from(u - v * floor_div(u, v)));
        }
    }
}

#[cfg(test)]
fn floor_div(u: i128, v: i128) -> i128 {
    let q = u / v;
    if (u % v != 0) && ((u < 0) != (v < 0)) {
        q - 1
    } else {
        q
    }
}

#[test]
fn test_tdivmod_mp_mp() {
    for u in [0i64, 1, -1, 7, -7, 100, -100, i64::MAX, i64::MIN] {
        for v in [1i64, -1, 2, -2, 3, -3, 1000, -1000, i64::MIN] {
            let (q, r) = MpInt::from(u).checked_tdivmod(&MpInt::from(v)).unwrap();
            let (u, v) = (u as i128, v as i128);
            assert_eq!(q, MpInt::from(u / v));
            assert_eq!(r, MpInt::from(u % v));
        }
    }
}

#[test]
fn test_divmod_mp_mp_by_zero() {
    let u = MpInt::from(5i64);
    let zero = MpInt::new();
    assert_eq!(u.checked_divmod(&zero).unwrap_err(), MpIntError::DivisionByZero);
    assert_eq!(u.checked_tdivmod(&zero).unwrap_err(), MpIntError::DivisionByZero);
    assert_eq!(u.checked_div_floor(&zero).unwrap_err(), MpIntError::DivisionByZero);
    assert_eq!(u.checked_rem_floor(&zero).unwrap_err(), MpIntError::DivisionByZero);
    assert_eq!(u.checked_divmod_near(&zero).unwrap_err(), MpIntError::DivisionByZero);
}

#[test]
fn test_divmod_mp_mp_small_dividend() {
    // |v| > |u|: q == 0 and r == u for agreeing signs, q == -1 and r == u + v otherwise.
    let u = tst_mk_mpint!("12345");
    let v = tst_mk_mpint!("-0x10000000000000000000000000000");
    let (q, r) = u.checked_divmod(&v).unwrap();
    assert_eq!(q, MpInt::from(-1i64));
    assert_eq!(r, u.checked_add(&v).unwrap());
    let (q, r) = u.checked_divmod(&v.checked_neg().unwrap()).unwrap();
    assert!(q.is_zero());
    assert_eq!(r, u);
}

#[test]
fn test_divmod_mp_mp_multi_limb() {
    let u = tst_mk_mpint!("-0x1_23456789_abcdef01_23456789_abcdef01_23456789_abcdef01");
    let v = tst_mk_mpint!("0xfedcba98_76543210_fedcba98");
    let (q, r) = u.checked_divmod(&v).unwrap();
    assert!(!r.is_negative());
    assert_eq!(r.cmp_mag(&v), Ordering::Less);
    assert_eq!(q.checked_mul(&v).unwrap().checked_add(&r).unwrap(), u);

    let (q, r) = u.checked_tdivmod(&v).unwrap();
    assert!(r.is_negative());
    assert_eq!(q.checked_mul(&v).unwrap().checked_add(&r).unwrap(), u);
}

#[test]
fn test_divmod_near_mp_mp() {
    let cases: [(i64, i64, i64, i64); 10] = [
        (7, 2, 4, -1),
        (5, 2, 2, 1),
        (-5, 2, -2, -1),
        (-7, 2, -4, 1),
        (8, 3, 3, -1),
        (7, 3, 2, 1),
        (2, -5, 0, 2),
        (3, -5, -1, -2),
        (-3, -5, 1, 2),
        (0, 3, 0, 0),
    ];
    for (u, v, q_expected, r_expected) in cases {
        let (q, r) = MpInt::from(u).checked_divmod_near(&MpInt::from(v)).unwrap();
        assert_eq!(q, MpInt::from(q_expected), "{} / {}", u, v);
        assert_eq!(r, MpInt::from(r_expected), "{} % {}", u, v);
    }
}

#[test]
fn test_divmod_mp_mp_destination_reuse() {
    let mut q = tst_mk_mpint!("0x1_00000000_00000000_00000000");
    let mut r = MpInt::from(-1i64);
    divmod_mp_mp(&mut q, &mut r, &MpInt::from(17i64), &MpInt::from(-5i64)).unwrap();
    assert_eq!(q, MpInt::from(-4i64));
    assert_eq!(r, MpInt::from(-3i64));
    quo_mp_mp(&mut q, &MpInt::from(17i64), &MpInt::from(5i64)).unwrap();
    assert_eq!(q, MpInt::from(3i64));
    rem_mp_mp(&mut r, &MpInt::from(-17i64), &MpInt::from(5i64)).unwrap();
    assert_eq!(r, MpInt::from(3i64));
}
