//! Implementation of multiprecision integer shift primitives.
//!
//! Shifts act on the infinite two's complement representation: a left shift multiplies by a power
//! of two and a right shift divides by one, rounding toward negative infinity.

use super::add_impl::ct_add_mp_l;
use super::error::MpIntError;
use super::limb::{LimbType, LIMB_BITS};
use super::limbs_buffer::nlimbs_for_bits;
use super::mpint::MpInt;

/// Shift a magnitude left in place by less than a limb's width.
///
/// Returns the bits shifted out at the top, aligned to the low end of the returned limb.
pub fn lshift_bits_mp(op0: &mut [LimbType], distance: u32) -> LimbType {
    debug_assert!(distance < LIMB_BITS);
    if distance == 0 {
        return 0;
    }
    let mut carry = 0;
    for op0_val in op0.iter_mut() {
        let next_carry = *op0_val >> (LIMB_BITS - distance);
        *op0_val = *op0_val << distance | carry;
        carry = next_carry;
    }
    carry
}

#[test]
fn test_lshift_bits_mp() {
    let mut op0 = [!0, 1];
    assert_eq!(lshift_bits_mp(&mut op0, 1), 0);
    assert_eq!(op0, [!1, 3]);
    let mut op0 = [1 << (LIMB_BITS - 1), 1 << (LIMB_BITS - 2)];
    assert_eq!(lshift_bits_mp(&mut op0, 2), 1);
    assert_eq!(op0, [0, 2]);
    let mut op0 = [5];
    assert_eq!(lshift_bits_mp(&mut op0, 0), 0);
    assert_eq!(op0, [5]);
}

/// Shift a magnitude right in place by less than a limb's width.
///
/// Returns the bits shifted out at the bottom, aligned to the high end of the returned limb.
pub fn rshift_bits_mp(op0: &mut [LimbType], distance: u32) -> LimbType {
    debug_assert!(distance < LIMB_BITS);
    if distance == 0 {
        return 0;
    }
    let mut carry = 0;
    for op0_val in op0.iter_mut().rev() {
        let next_carry = *op0_val << (LIMB_BITS - distance);
        *op0_val = *op0_val >> distance | carry;
        carry = next_carry;
    }
    carry
}

#[test]
fn test_rshift_bits_mp() {
    let mut op0 = [!1, 3];
    assert_eq!(rshift_bits_mp(&mut op0, 1), 0);
    assert_eq!(op0, [!0, 1]);
    let mut op0 = [3, 0];
    assert_eq!(rshift_bits_mp(&mut op0, 1), 1 << (LIMB_BITS - 1));
    assert_eq!(op0, [1, 0]);
}

fn split_distance(distance: u64) -> (usize, u32) {
    // Callers bound the distance by a valid bit count first, the limb part always fits.
    (
        (distance / LIMB_BITS as u64) as usize,
        (distance % LIMB_BITS as u64) as u32,
    )
}

/// Compute `w = u * 2^distance`.
///
/// Fails with [`MpIntError::LimbsTooLarge`] if the result would not be representable.
pub fn lshift_mp(w: &mut MpInt, u: &MpInt, distance: u64) -> Result<(), MpIntError> {
    if u.is_zero() {
        w.set_zero();
        return Ok(());
    }
    let nbits = u
        .bit_length()
        .checked_add(distance)
        .ok_or(MpIntError::LimbsTooLarge { nlimbs: usize::MAX })?;
    nlimbs_for_bits(nbits)?;

    let (limb_shift, bit_shift) = split_distance(distance);
    let u_limbs = u.limbs();
    let u_nlimbs = u_limbs.len();
    w.limbs.try_resize(limb_shift + u_nlimbs + 1)?;
    let w_limbs = w.limbs.as_mut_slice();
    w_limbs[..limb_shift].fill(0);
    w_limbs[limb_shift..limb_shift + u_nlimbs].copy_from_slice(u_limbs);
    w_limbs[limb_shift + u_nlimbs] = 0;
    let carry = lshift_bits_mp(&mut w_limbs[limb_shift..], bit_shift);
    debug_assert_eq!(carry, 0);
    w.negative = u.negative;
    w.normalize();
    Ok(())
}

/// Compute `w = floor(u / 2^distance)`.
pub fn rshift_mp(w: &mut MpInt, u: &MpInt, distance: u64) -> Result<(), MpIntError> {
    if distance >= u.bit_length() {
        // Everything gets shifted out, only the sign extension remains.
        return if u.is_negative() {
            w.try_set_l(true, 1)
        } else {
            w.set_zero();
            Ok(())
        };
    }

    let (limb_shift, bit_shift) = split_distance(distance);
    // A negative value is rounded away from zero whenever any non-zero bit gets shifted out.
    let round_up = u.is_negative() && u.trailing_zeros() < distance;
    let u_limbs = u.limbs();
    let nlimbs = u_limbs.len() - limb_shift;
    w.limbs.try_resize(nlimbs + 1)?;
    let w_limbs = w.limbs.as_mut_slice();
    w_limbs[..nlimbs].copy_from_slice(&u_limbs[limb_shift..]);
    w_limbs[nlimbs] = 0;
    rshift_bits_mp(&mut w_limbs[..nlimbs], bit_shift);
    if round_up {
        let carry = ct_add_mp_l(w_limbs, 1);
        debug_assert_eq!(carry, 0);
    }
    w.negative = u.negative;
    w.normalize();
    Ok(())
}

/// Convert a multiprecision shift distance.
///
/// Returns `None` for distances not fitting a `u64`.
fn shift_distance(distance: &MpInt) -> Result<Option<u64>, MpIntError> {
    if distance.is_negative() {
        return Err(MpIntError::NegativeShift);
    }
    Ok(u64::try_from(distance).ok())
}

/// Like [`lshift_mp()`], but with a multiprecision shift distance.
///
/// Negative distances fail with [`MpIntError::NegativeShift`].
pub fn lshift_mp_mp(w: &mut MpInt, u: &MpInt, distance: &MpInt) -> Result<(), MpIntError> {
    match shift_distance(distance)? {
        Some(distance) => lshift_mp(w, u, distance),
        None if u.is_zero() => {
            w.set_zero();
            Ok(())
        }
        None => Err(MpIntError::LimbsTooLarge { nlimbs: usize::MAX }),
    }
}

/// Like [`rshift_mp()`], but with a multiprecision shift distance.
///
/// Negative distances fail with [`MpIntError::NegativeShift`].
pub fn rshift_mp_mp(w: &mut MpInt, u: &MpInt, distance: &MpInt) -> Result<(), MpIntError> {
    // Any distance beyond u64 range exceeds every representable bit length.
    let distance = shift_distance(distance)?.unwrap_or(u64::MAX);
    rshift_mp(w, u, distance)
}

impl MpInt {
    pub fn checked_shl(&self, distance: u64) -> Result<MpInt, MpIntError> {
        let mut w = MpInt::new();
        lshift_mp(&mut w, self, distance)?;
        Ok(w)
    }

    pub fn checked_shr(&self, distance: u64) -> Result<MpInt, MpIntError> {
        let mut w = MpInt::new();
        rshift_mp(&mut w, self, distance)?;
        Ok(w)
    }

    pub fn checked_shl_mp(&self, distance: &MpInt) -> Result<MpInt, MpIntError> {
        let mut w = MpInt::new();
        lshift_mp_mp(&mut w, self, distance)?;
        Ok(w)
    }

    pub fn checked_shr_mp(&self, distance: &MpInt) -> Result<MpInt, MpIntError> {
        let mut w = MpInt::new();
        rshift_mp_mp(&mut w, self, distance)?;
        Ok(w)
    }
}

#[test]
fn test_lshift_mp() {
    let u = MpInt::from(-3i64);
    assert_eq!(u.checked_shl(0).unwrap(), u);
    assert_eq!(u.checked_shl(4).unwrap(), MpInt::from(-48i64));
    let w = u.checked_shl(2 * LIMB_BITS as u64 + 1).unwrap();
    assert_eq!(w.limbs(), &[0, 0, 6]);
    assert!(w.is_negative());
    assert!(MpInt::new().checked_shl(u64::MAX).unwrap().is_zero());
    assert!(matches!(
        MpInt::from(1i64).checked_shl(u64::MAX),
        Err(MpIntError::LimbsTooLarge { .. })
    ));
}

#[test]
fn test_rshift_mp() {
    assert_eq!(MpInt::from(-5i64).checked_shr(1).unwrap(), MpInt::from(-3i64));
    assert_eq!(MpInt::from(5i64).checked_shr(1).unwrap(), MpInt::from(2i64));
    assert_eq!(MpInt::from(-4i64).checked_shr(2).unwrap(), MpInt::from(-1i64));
    assert_eq!(MpInt::from(-4i64).checked_shr(1).unwrap(), MpInt::from(-2i64));
    assert_eq!(MpInt::from(-1i64).checked_shr(100).unwrap(), MpInt::from(-1i64));
    assert!(MpInt::from(12345i64).checked_shr(14).unwrap().is_zero());
    assert!(MpInt::new().checked_shr(3).unwrap().is_zero());

    // Rounding up a negative value may carry through all remaining limbs.
    let u = MpInt::try_from_limbs(true, &[1, !0, !0]).unwrap();
    let w = u.checked_shr(LIMB_BITS as u64).unwrap();
    assert_eq!(w.limbs(), &[0, 0, 1]);
    assert!(w.is_negative());

    let u = MpInt::try_from_limbs(false, &[0, 0, 6]).unwrap();
    assert_eq!(u.checked_shr(2 * LIMB_BITS as u64 + 1).unwrap(), MpInt::from(3i64));
}

#[test]
fn test_shift_mp_mp() {
    let u = MpInt::from(-7i64);
    assert_eq!(
        u.checked_shl_mp(&MpInt::from(3i64)).unwrap(),
        MpInt::from(-56i64)
    );
    assert_eq!(u.checked_shr_mp(&MpInt::from(1i64)).unwrap(), MpInt::from(-4i64));
    assert_eq!(
        u.checked_shl_mp(&MpInt::from(-1i64)).unwrap_err(),
        MpIntError::NegativeShift
    );
    assert_eq!(
        u.checked_shr_mp(&MpInt::from(-1i64)).unwrap_err(),
        MpIntError::NegativeShift
    );

    let huge = MpInt::from(1i64).checked_shl(100).unwrap();
    assert_eq!(u.checked_shr_mp(&huge).unwrap(), MpInt::from(-1i64));
    assert!(MpInt::from(7i64).checked_shr_mp(&huge).unwrap().is_zero());
    assert!(MpInt::new().checked_shl_mp(&huge).unwrap().is_zero());
    assert!(matches!(
        u.checked_shl_mp(&huge),
        Err(MpIntError::LimbsTooLarge { .. })
    ));
}

#[test]
fn test_shift_mp_destination_reuse() {
    let u = tst_mk_mpint!("0x1234_5678_9abc_def0_1234_5678_9abc_def0");
    let mut w = MpInt::from(-1i64);
    lshift_mp(&mut w, &u, 68).unwrap();
    let mut back = tst_mk_mpint!("0xffff_ffff_ffff_ffff_ffff_ffff_ffff_ffff_ffff_ffff");
    rshift_mp(&mut back, &w, 68).unwrap();
    assert_eq!(back, u);
}
