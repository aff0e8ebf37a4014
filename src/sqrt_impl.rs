//! Integer square root with remainder.

use super::add_impl::{add_mp_mp, sub_mp_mp};
use super::div_impl::quo_mp_mp;
use super::error::MpIntError;
use super::mpint::MpInt;
use super::mul_impl::mul_mp_mp;
use super::shift_impl::{lshift_mp, rshift_mp};
use core::mem;

/// Compute `root = floor(sqrt(u))` and `rem = u - root^2`.
///
/// Fails with [`MpIntError::NegativeSqrt`] for negative `u`.
pub fn sqrtrem_mp(root: &mut MpInt, rem: &mut MpInt, u: &MpInt) -> Result<(), MpIntError> {
    if u.is_negative() {
        return Err(MpIntError::NegativeSqrt);
    }
    if u.is_zero() {
        root.set_zero();
        rem.set_zero();
        return Ok(());
    }

    // Newton's iteration x' = (x + u / x) / 2 decreases monotonically toward floor(sqrt(u)) when
    // started from any x >= sqrt(u). 2^ceil(bits / 2) is such a value.
    let mut x = MpInt::new();
    let one = MpInt::from(1u64);
    lshift_mp(&mut x, &one, (u.bit_length() + 1) / 2)?;
    let (mut y, mut scratch) = (MpInt::new(), MpInt::new());
    loop {
        quo_mp_mp(&mut scratch, u, &x)?;
        add_mp_mp(&mut y, &x, &scratch)?;
        rshift_mp(&mut scratch, &y, 1)?;
        if scratch >= x {
            break;
        }
        mem::swap(&mut x, &mut scratch);
    }

    mul_mp_mp(&mut y, &x, &x)?;
    sub_mp_mp(rem, u, &y)?;
    mem::swap(root, &mut x);
    Ok(())
}

impl MpInt {
    /// Returns `(root, rem)` with `root^2 + rem == self` and `0 <= rem <= 2 * root`.
    pub fn checked_sqrtrem(&self) -> Result<(MpInt, MpInt), MpIntError> {
        let (mut root, mut rem) = (MpInt::new(), MpInt::new());
        sqrtrem_mp(&mut root, &mut rem, self)?;
        Ok((root, rem))
    }
}

#[test]
fn test_sqrtrem_mp() {
    let (root, rem) = MpInt::from(1000000i64).checked_sqrtrem().unwrap();
    assert_eq!(root, MpInt::from(1000i64));
    assert!(rem.is_zero());

    for u in [0u64, 1, 2, 3, 4, 15, 16, 17, 99, 1 << 32, (1 << 32) - 1, u64::MAX] {
        let (root, rem) = MpInt::from(u).checked_sqrtrem().unwrap();
        let expected_root = (u as f64).sqrt() as u128;
        // Correct the floating point estimate.
        let mut r = expected_root;
        while r * r > u as u128 {
            r -= 1;
        }
        while (r + 1) * (r + 1) <= u as u128 {
            r += 1;
        }
        assert_eq!(root, MpInt::from(r as u64), "sqrt({})", u);
        assert_eq!(rem, MpInt::from((u as u128 - r * r) as u64));
    }

    assert_eq!(
        MpInt::from(-4i64).checked_sqrtrem().unwrap_err(),
        MpIntError::NegativeSqrt
    );
}

#[test]
fn test_sqrtrem_mp_multi_limb() {
    let u = tst_mk_mpint!("0x123456789abcdef0123456789abcdef0123456789abcdef");
    let (root, rem) = u.checked_sqrtrem().unwrap();
    let sq = root.checked_mul(&root).unwrap();
    assert_eq!(sq.checked_add(&rem).unwrap(), u);
    assert!(!rem.is_negative());
    assert!(rem <= root.checked_shl(1).unwrap());

    let sq = u.checked_mul(&u).unwrap();
    let (root, rem) = sq.checked_sqrtrem().unwrap();
    assert_eq!(root, u);
    assert!(rem.is_zero());
}
