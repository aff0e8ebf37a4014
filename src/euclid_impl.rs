//! Greatest common divisor and Bézout coefficients.

use super::add_impl::{ct_sub_mp_mp, sub_mp_mp};
use super::cmp_impl::cmp_mag_mp_mp;
use super::div_impl::{quo_mp_mp, tdivmod_mp_mp};
use super::error::MpIntError;
use super::limb::{LimbType, LIMB_BITS};
use super::limbs_buffer::{find_first_set_bit_mp, LimbsBuffer};
use super::mpint::{abs_mp, MpInt};
use super::mul_impl::mul_mp_mp;
use super::shift_impl::{lshift_mp, rshift_bits_mp};
use core::cmp::Ordering;
use core::mem;

/// Shift a magnitude right in place, dropping high zero limbs afterwards.
fn rshift_mag(op0: &mut LimbsBuffer, distance: u64) {
    let limb_shift = (distance / LIMB_BITS as u64) as usize;
    let bit_shift = (distance % LIMB_BITS as u64) as u32;
    let nlimbs = op0.nlimbs();
    debug_assert!(limb_shift < nlimbs);
    let limbs = op0.as_mut_slice();
    limbs.copy_within(limb_shift.., 0);
    limbs[nlimbs - limb_shift..].fill(0);
    rshift_bits_mp(&mut limbs[..nlimbs - limb_shift], bit_shift);
    op0.normalize();
}

/// Binary gcd of two non-zero magnitudes.
///
/// After stripping the common power of two, both values are kept odd and the smaller one gets
/// repeatedly subtracted from the larger one. Returns the odd part of the gcd in `a` together
/// with the common power of two.
fn gcd_mag(a: &mut LimbsBuffer, b: &mut LimbsBuffer) -> u64 {
    let a_tz = find_first_set_bit_mp(a.as_slice());
    let b_tz = find_first_set_bit_mp(b.as_slice());
    rshift_mag(a, a_tz);
    rshift_mag(b, b_tz);

    loop {
        match cmp_mag_mp_mp(a.as_slice(), b.as_slice()) {
            Ordering::Equal => break,
            Ordering::Greater => mem::swap(a, b),
            Ordering::Less => (),
        }
        // b > a, both odd: b - a is even and non-zero.
        let borrow = ct_sub_mp_mp(b.as_mut_slice(), a.as_slice());
        debug_assert_eq!(borrow, 0);
        let tz = find_first_set_bit_mp(b.as_slice());
        rshift_mag(b, tz);
    }
    a_tz.min(b_tz)
}

/// Compute `g = gcd(u, v)`.
///
/// The result is never negative, `gcd(0, 0)` is zero.
pub fn gcd_mp_mp(g: &mut MpInt, u: &MpInt, v: &MpInt) -> Result<(), MpIntError> {
    if u.is_zero() {
        return abs_mp(g, v);
    } else if v.is_zero() {
        return abs_mp(g, u);
    }

    let mut a = LimbsBuffer::try_from_limbs(u.limbs())?;
    let mut b = LimbsBuffer::try_from_limbs(v.limbs())?;
    let common_tz = gcd_mag(&mut a, &mut b);
    let odd_gcd = MpInt::from_limbs_buffer(false, a);
    lshift_mp(g, &odd_gcd, common_tz)
}

/// Compute `g = gcd(u, v)` along with Bézout coefficients `s`, `t` such that
/// `u * s + v * t == g`.
///
/// For `v == 0`, `s` is the sign of `u` and `t` is zero.
pub fn gcdext_mp_mp(
    g: &mut MpInt,
    s: &mut MpInt,
    t: &mut MpInt,
    u: &MpInt,
    v: &MpInt,
) -> Result<(), MpIntError> {
    if v.is_zero() {
        abs_mp(g, u)?;
        s.try_set_l(u.is_negative(), (!u.is_zero()) as LimbType)?;
        t.set_zero();
        return Ok(());
    }

    // Extended Euclid on the magnitudes, tracking only the coefficient of |u|.
    let mut r0 = MpInt::new();
    let mut r1 = MpInt::new();
    abs_mp(&mut r0, u)?;
    abs_mp(&mut r1, v)?;
    let mut x0 = MpInt::new();
    x0.try_set_l(false, 1)?;
    let mut x1 = MpInt::new();
    let (mut q, mut r) = (MpInt::new(), MpInt::new());
    let mut scratch = MpInt::new();
    while !r1.is_zero() {
        tdivmod_mp_mp(&mut q, &mut r, &r0, &r1)?;
        mem::swap(&mut r0, &mut r1);
        mem::swap(&mut r1, &mut r);

        // (x0, x1) = (x1, x0 - q * x1)
        mul_mp_mp(&mut scratch, &q, &x1)?;
        sub_mp_mp(&mut r, &x0, &scratch)?;
        mem::swap(&mut x0, &mut x1);
        mem::swap(&mut x1, &mut r);
    }

    if u.is_negative() {
        x0.negate();
    }

    // t = (g - u * s) / v, the division is exact.
    mul_mp_mp(&mut scratch, u, &x0)?;
    sub_mp_mp(&mut r, &r0, &scratch)?;
    quo_mp_mp(t, &r, v)?;
    debug_assert!({
        let mut check = MpInt::new();
        mul_mp_mp(&mut check, t, v).is_ok() && check == r
    });

    mem::swap(g, &mut r0);
    mem::swap(s, &mut x0);
    Ok(())
}

impl MpInt {
    pub fn checked_gcd(&self, v: &MpInt) -> Result<MpInt, MpIntError> {
        let mut g = MpInt::new();
        gcd_mp_mp(&mut g, self, v)?;
        Ok(g)
    }

    /// Returns `(g, s, t)` with `self * s + v * t == g == gcd(self, v)`.
    pub fn checked_gcdext(&self, v: &MpInt) -> Result<(MpInt, MpInt, MpInt), MpIntError> {
        let (mut g, mut s, mut t) = (MpInt::new(), MpInt::new(), MpInt::new());
        gcdext_mp_mp(&mut g, &mut s, &mut t, self, v)?;
        Ok((g, s, t))
    }
}

#[cfg(test)]
fn gcd_i128(mut a: i128, mut b: i128) -> i128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.abs()
}

#[test]
fn test_gcd_mp_mp() {
    let vals = [0i64, 1, -1, 2, -6, 12, 35, -49, 1 << 40, 3 << 41, -(5 << 30), i64::MIN];
    for u in vals {
        for v in vals {
            let g = MpInt::from(u).checked_gcd(&MpInt::from(v)).unwrap();
            assert_eq!(g, MpInt::from(gcd_i128(u as i128, v as i128)), "gcd({}, {})", u, v);
        }
    }

    let u = tst_mk_mpint!("0x3_00000000_00000000_00000000");
    let v = tst_mk_mpint!("-0x9_00000000_00000000");
    assert_eq!(u.checked_gcd(&v).unwrap(), tst_mk_mpint!("0x3_00000000_00000000"));
}

#[test]
fn test_gcdext_mp_mp() {
    let (g, s, t) = MpInt::from(240i64).checked_gcdext(&MpInt::from(46i64)).unwrap();
    assert_eq!(g, MpInt::from(2i64));
    assert_eq!(s, MpInt::from(-9i64));
    assert_eq!(t, MpInt::from(47i64));

    let (g, s, t) = MpInt::from(-5i64).checked_gcdext(&MpInt::new()).unwrap();
    assert_eq!(g, MpInt::from(5i64));
    assert_eq!(s, MpInt::from(-1i64));
    assert!(t.is_zero());

    let (g, s, t) = MpInt::new().checked_gcdext(&MpInt::new()).unwrap();
    assert!(g.is_zero() && s.is_zero() && t.is_zero());

    let (g, s, t) = MpInt::new().checked_gcdext(&MpInt::from(-7i64)).unwrap();
    assert_eq!(g, MpInt::from(7i64));
    assert!(s.is_zero());
    assert_eq!(t, MpInt::from(-1i64));

    let vals = [1i64, -1, 6, -6, 35, -49, 97, 1 << 40, -(3 << 41), i64::MAX, i64::MIN];
    for u in vals {
        for v in vals {
            let (mu, mv) = (MpInt::from(u), MpInt::from(v));
            let (g, s, t) = mu.checked_gcdext(&mv).unwrap();
            assert_eq!(g, MpInt::from(gcd_i128(u as i128, v as i128)));
            let us = mu.checked_mul(&s).unwrap();
            let vt = mv.checked_mul(&t).unwrap();
            assert_eq!(us.checked_add(&vt).unwrap(), g, "gcdext({}, {})", u, v);
        }
    }
}
