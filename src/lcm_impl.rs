//! Least common multiple.

use super::div_impl::tdivmod_mp_mp;
use super::error::MpIntError;
use super::euclid_impl::gcd_mp_mp;
use super::mpint::MpInt;
use super::mul_impl::mul_mp_mp;

/// Compute `w = lcm(u, v)`.
///
/// The result is never negative, `lcm(0, v)` is zero.
pub fn lcm_mp_mp(w: &mut MpInt, u: &MpInt, v: &MpInt) -> Result<(), MpIntError> {
    // The Least Common Multiple (LCM) is the product divided by the GCD of the operands. Divide
    // one operand first to keep the intermediate small.
    if u.is_zero() || v.is_zero() {
        w.set_zero();
        return Ok(());
    }
    let mut g = MpInt::new();
    gcd_mp_mp(&mut g, u, v)?;
    let (mut q, mut r) = (MpInt::new(), MpInt::new());
    tdivmod_mp_mp(&mut q, &mut r, u, &g)?;
    debug_assert!(r.is_zero());
    mul_mp_mp(w, &q, v)?;
    w.negative = false;
    Ok(())
}

impl MpInt {
    pub fn checked_lcm(&self, v: &MpInt) -> Result<MpInt, MpIntError> {
        let mut w = MpInt::new();
        lcm_mp_mp(&mut w, self, v)?;
        Ok(w)
    }
}

#[test]
fn test_lcm_mp_mp() {
    let lcm = |u: i64, v: i64| MpInt::from(u).checked_lcm(&MpInt::from(v)).unwrap();
    assert_eq!(lcm(4, 6), MpInt::from(12i64));
    assert_eq!(lcm(-4, 6), MpInt::from(12i64));
    assert_eq!(lcm(4, -6), MpInt::from(12i64));
    assert_eq!(lcm(-7, -7), MpInt::from(7i64));
    assert!(lcm(0, 5).is_zero());
    assert!(lcm(-5, 0).is_zero());
    assert_eq!(lcm(1, -9), MpInt::from(9i64));

    let u = tst_mk_mpint!("0x1_00000000_00000000_00000000");
    let v = tst_mk_mpint!("-0x3_00000000_00000000");
    assert_eq!(u.checked_lcm(&v).unwrap(), tst_mk_mpint!("0x3_00000000_00000000_00000000"));
}
