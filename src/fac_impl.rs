//! Factorials and Fibonacci numbers.

use super::add_impl::{add_mp_mp, sub_mp_mp};
use super::error::MpIntError;
use super::limb::LimbType;
use super::mpint::MpInt;
use super::mul_impl::{mul_mp_l, mul_mp_mp};
use super::shift_impl::lshift_mp;
use core::mem;

/// Extract a non-negative native argument.
fn native_arg(n: &MpInt) -> Result<u64, MpIntError> {
    if n.is_negative() {
        return Err(MpIntError::NegativeArgument);
    }
    u64::try_from(n)
}

/// Multiply a non-negative accumulator by a single limb in place.
fn mul_assign_l(acc: &mut MpInt, l: LimbType) -> Result<(), MpIntError> {
    let nlimbs = acc.limbs.nlimbs();
    acc.limbs.try_resize(nlimbs + 1)?;
    let acc_limbs = acc.limbs.as_mut_slice();
    acc_limbs[nlimbs] = mul_mp_l(&mut acc_limbs[..nlimbs], l);
    acc.normalize();
    Ok(())
}

/// Product of `n, n - step, n - 2 * step, ...` down to and including the last factor `>= 1`.
///
/// Consecutive factors are batched into a single limb for as long as that doesn't overflow.
fn mul_range_step(w: &mut MpInt, n: u64, step: u64) -> Result<(), MpIntError> {
    let mut acc = MpInt::from(1u64);
    let mut batch: LimbType = 1;
    let mut k = n;
    while k >= 1 {
        match LimbType::try_from(k) {
            Ok(k_l) => match batch.checked_mul(k_l) {
                Some(b) => batch = b,
                None => {
                    mul_assign_l(&mut acc, batch)?;
                    batch = k_l;
                }
            },
            Err(_) => {
                // Only reachable with limbs narrower than u64.
                let mut t = MpInt::new();
                mul_mp_mp(&mut t, &acc, &MpInt::from(k))?;
                acc = t;
            }
        }
        k = match k.checked_sub(step) {
            Some(k) => k,
            None => break,
        };
    }
    mul_assign_l(&mut acc, batch)?;
    mem::swap(w, &mut acc);
    Ok(())
}

/// Compute `w = n!`.
///
/// Fails with [`MpIntError::NegativeArgument`] for negative `n` and with
/// [`MpIntError::DoesNotFit`] if `n` exceeds the native word range.
pub fn fac_mp(w: &mut MpInt, n: &MpInt) -> Result<(), MpIntError> {
    let n = native_arg(n)?;
    mul_range_step(w, n, 1)
}

/// Compute the double factorial `w = n!! = n * (n - 2) * (n - 4) * ...`.
pub fn double_fac_mp(w: &mut MpInt, n: &MpInt) -> Result<(), MpIntError> {
    let n = native_arg(n)?;
    mul_range_step(w, n, 2)
}

/// Compute the `n`th Fibonacci number, with `fib(0) == 0` and `fib(1) == 1`.
pub fn fib_mp(w: &mut MpInt, n: &MpInt) -> Result<(), MpIntError> {
    let n = native_arg(n)?;

    // Fast doubling:
    //   F(2k)     = F(k) * (2 * F(k + 1) - F(k))
    //   F(2k + 1) = F(k)^2 + F(k + 1)^2
    let mut a = MpInt::new();
    let mut b = MpInt::from(1u64);
    let (mut c, mut d) = (MpInt::new(), MpInt::new());
    let (mut t0, mut t1) = (MpInt::new(), MpInt::new());
    for i in (0..u64::BITS - n.leading_zeros()).rev() {
        lshift_mp(&mut t0, &b, 1)?;
        sub_mp_mp(&mut t1, &t0, &a)?;
        mul_mp_mp(&mut c, &a, &t1)?;
        mul_mp_mp(&mut t0, &a, &a)?;
        mul_mp_mp(&mut t1, &b, &b)?;
        add_mp_mp(&mut d, &t0, &t1)?;
        if (n >> i) & 1 != 0 {
            add_mp_mp(&mut b, &c, &d)?;
            mem::swap(&mut a, &mut d);
        } else {
            mem::swap(&mut a, &mut c);
            mem::swap(&mut b, &mut d);
        }
    }
    mem::swap(w, &mut a);
    Ok(())
}

impl MpInt {
    pub fn checked_fac(&self) -> Result<MpInt, MpIntError> {
        let mut w = MpInt::new();
        fac_mp(&mut w, self)?;
        Ok(w)
    }

    pub fn checked_double_fac(&self) -> Result<MpInt, MpIntError> {
        let mut w = MpInt::new();
        double_fac_mp(&mut w, self)?;
        Ok(w)
    }

    pub fn checked_fib(&self) -> Result<MpInt, MpIntError> {
        let mut w = MpInt::new();
        fib_mp(&mut w, self)?;
        Ok(w)
    }
}

#[test]
fn test_fac_mp() {
    let fac = |n: u64| MpInt::from(n).checked_fac().unwrap();
    assert_eq!(fac(0), MpInt::from(1u64));
    assert_eq!(fac(1), MpInt::from(1u64));
    assert_eq!(fac(5), MpInt::from(120u64));
    assert_eq!(fac(20), MpInt::from(2432902008176640000u64));
    assert_eq!(fac(25), tst_mk_mpint!("15511210043330985984000000"));
    assert_eq!(fac(30), tst_mk_mpint!("265252859812191058636308480000000"));

    let f100 = fac(100);
    assert_eq!(f100.checked_rem_floor(&fac(99)).unwrap(), MpInt::new());
    assert_eq!(f100.checked_div_floor(&fac(99)).unwrap(), MpInt::from(100u64));
}

#[test]
fn test_double_fac_mp() {
    let double_fac = |n: u64| MpInt::from(n).checked_double_fac().unwrap();
    assert_eq!(double_fac(0), MpInt::from(1u64));
    assert_eq!(double_fac(1), MpInt::from(1u64));
    assert_eq!(double_fac(2), MpInt::from(2u64));
    assert_eq!(double_fac(9), MpInt::from(945u64));
    assert_eq!(double_fac(10), MpInt::from(3840u64));
    assert_eq!(double_fac(31), MpInt::from(191898783962510625u64));
}

#[test]
fn test_fib_mp() {
    let fib = |n: u64| MpInt::from(n).checked_fib().unwrap();
    assert_eq!(fib(0), MpInt::new());
    assert_eq!(fib(1), MpInt::from(1u64));
    assert_eq!(fib(2), MpInt::from(1u64));
    assert_eq!(fib(10), MpInt::from(55u64));
    assert_eq!(fib(90), MpInt::from(2880067194370816120u64));
    assert_eq!(fib(100), tst_mk_mpint!("354224848179261915075"));
    assert_eq!(
        fib(200),
        tst_mk_mpint!("280571172992510140037611932413038677189525")
    );

    let mut prev = MpInt::new();
    let mut cur = MpInt::from(1u64);
    for n in 1..70u64 {
        assert_eq!(fib(n), cur);
        let next = prev.checked_add(&cur).unwrap();
        prev = mem::replace(&mut cur, next);
    }
}

#[test]
fn test_fac_mp_invalid_args() {
    let neg = MpInt::from(-1i64);
    assert_eq!(neg.checked_fac().unwrap_err(), MpIntError::NegativeArgument);
    assert_eq!(neg.checked_double_fac().unwrap_err(), MpIntError::NegativeArgument);
    assert_eq!(neg.checked_fib().unwrap_err(), MpIntError::NegativeArgument);

    let huge = MpInt::from(1u64).checked_shl(64).unwrap();
    assert_eq!(huge.checked_fac().unwrap_err(), MpIntError::DoesNotFit);
    assert_eq!(huge.checked_fib().unwrap_err(), MpIntError::DoesNotFit);
}
