//! Modular inversion.

use super::error::MpIntError;
use super::euclid_impl::gcdext_mp_mp;
use super::mpint::MpInt;

/// Compute `w` such that `u * w == 1 mod m`.
///
/// The result is the Bézout coefficient of `u` as produced by
/// [`gcdext_mp_mp()`](super::gcdext_mp_mp), it is not reduced into any particular range. Fails
/// with [`MpIntError::ZeroModulus`] for `m == 0` and with [`MpIntError::NotInvertible`] if `u` and
/// `m` are not coprime. On failure `w` is left zero.
pub fn inverse_mp_mp(w: &mut MpInt, u: &MpInt, m: &MpInt) -> Result<(), MpIntError> {
    if m.is_zero() {
        return Err(MpIntError::ZeroModulus);
    }
    let (mut g, mut t) = (MpInt::new(), MpInt::new());
    let result = gcdext_mp_mp(&mut g, w, &mut t, u, m).and_then(|()| {
        if !g.is_one_mag() {
            return Err(MpIntError::NotInvertible);
        }
        Ok(())
    });
    if result.is_err() {
        w.set_zero();
    }
    result
}

impl MpInt {
    pub fn checked_inverse(&self, m: &MpInt) -> Result<MpInt, MpIntError> {
        let mut w = MpInt::new();
        inverse_mp_mp(&mut w, self, m)?;
        Ok(w)
    }
}

#[test]
fn test_inverse_mp_mp() {
    let inv = MpInt::from(4i64).checked_inverse(&MpInt::from(7i64)).unwrap();
    assert_eq!(inv, MpInt::from(2i64));

    for (u, m) in [(3i64, 11i64), (-3, 11), (10, 17), (17, -10), (1, 2), (-1, 5), (12345, 65537)] {
        let inv = MpInt::from(u).checked_inverse(&MpInt::from(m)).unwrap();
        let prod = inv.checked_mul(&MpInt::from(u)).unwrap();
        let r = prod.checked_rem_floor(&MpInt::from(m.abs())).unwrap();
        assert_eq!(r, MpInt::from(1i64), "inverse({}, {})", u, m);
    }

    let u = MpInt::from(6i64);
    assert_eq!(u.checked_inverse(&MpInt::from(9i64)).unwrap_err(), MpIntError::NotInvertible);
    assert_eq!(u.checked_inverse(&MpInt::new()).unwrap_err(), MpIntError::ZeroModulus);
    assert_eq!(
        MpInt::new().checked_inverse(&MpInt::from(5i64)).unwrap_err(),
        MpIntError::NotInvertible
    );
}

#[test]
fn test_inverse_mp_mp_clears_destination() {
    let mut w = MpInt::from(99i64);
    let err = inverse_mp_mp(&mut w, &MpInt::from(6i64), &MpInt::from(9i64)).unwrap_err();
    assert_eq!(err, MpIntError::NotInvertible);
    assert!(w.is_zero());
    assert!(!w.is_negative());

    let mut w = MpInt::from(-99i64);
    inverse_mp_mp(&mut w, &MpInt::from(3i64), &MpInt::from(11i64)).unwrap();
    let r = w.checked_mul(&MpInt::from(3i64)).unwrap();
    assert_eq!(r.checked_rem_floor(&MpInt::from(11i64)).unwrap(), MpInt::from(1i64));
}

#[test]
fn test_inverse_mp_mp_multi_limb() {
    let m = tst_mk_mpint!("0xfffffffffffffffffffffffffffffffeffffffffffffffff");
    let u = tst_mk_mpint!("0x123456789abcdef0123456789abcdef01");
    let inv = u.checked_inverse(&m).unwrap();
    let r = u.checked_mul(&inv).unwrap().checked_rem_floor(&m).unwrap();
    assert_eq!(r, MpInt::from(1i64));
}
