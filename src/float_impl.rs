//! Conversions to and from `f64` and correctly rounded true division.

use super::div_impl::tdivmod_mp_mp;
use super::error::MpIntError;
use super::limb::LIMB_BITS;
use super::mpint::MpInt;
use super::shift_impl::{lshift_mp, rshift_mp};
use tracing::debug;

const F64_MANT_DIG: i64 = f64::MANTISSA_DIGITS as i64;
const F64_MAX_EXP: i64 = f64::MAX_EXP as i64;
const F64_MIN_EXP: i64 = f64::MIN_EXP as i64;

/// Multiply by `2^e`.
///
/// Exact whenever the result is representable, provided that `x` is either zero or has a
/// magnitude of at least one.
fn ldexp(mut x: f64, mut e: i64) -> f64 {
    let pow2 = |e: i64| f64::from_bits(((e + 1023) as u64) << 52);
    while e > 1023 {
        x *= pow2(1023);
        e -= 1023;
        if x.is_infinite() {
            return x;
        }
    }
    while e < -1022 {
        x *= pow2(-1022);
        e += 1022;
        if x == 0.0 {
            return x;
        }
    }
    x * pow2(e)
}

#[test]
fn test_ldexp() {
    assert_eq!(ldexp(1.0, 0), 1.0);
    assert_eq!(ldexp(3.0, 4), 48.0);
    assert_eq!(ldexp(1.0, 1023), 2f64.powi(1023));
    assert!(ldexp(1.0, 1024).is_infinite());
    assert_eq!(ldexp(1.0, -1074), f64::from_bits(1));
    assert_eq!(ldexp(4.0, -1076), f64::from_bits(1));
    assert_eq!(ldexp(1.0, -2000), 0.0);
}

impl MpInt {
    /// Convert from an `f64`, truncating toward zero.
    ///
    /// Fails with [`MpIntError::NonFiniteFloat`] for infinities and NaN.
    pub fn from_f64(x: f64) -> Result<Self, MpIntError> {
        if !x.is_finite() {
            return Err(MpIntError::NonFiniteFloat);
        }
        let t = x.trunc();
        if t == 0.0 {
            return Ok(Self::new());
        }

        // |t| >= 1, hence normal.
        let bits = t.to_bits();
        let biased_exp = ((bits >> 52) & 0x7ff) as i64;
        let mant = (bits & ((1u64 << 52) - 1)) | (1u64 << 52);
        let exp = biased_exp - 1075;
        let mant = Self::from(mant);
        let mut r = Self::new();
        if exp >= 0 {
            lshift_mp(&mut r, &mant, exp as u64)?;
        } else {
            rshift_mp(&mut r, &mant, exp.unsigned_abs())?;
        }
        if t < 0.0 {
            r.negate();
        }
        Ok(r)
    }

    /// Convert to the nearest `f64`, ties to even.
    ///
    /// Fails with [`MpIntError::DoesNotFit`] if the magnitude rounds beyond the largest finite
    /// `f64`.
    pub fn to_f64(&self) -> Result<f64, MpIntError> {
        let nbits = self.bit_length();
        if nbits > F64_MAX_EXP as u64 {
            debug!(nbits, "integer too large for f64");
            return Err(MpIntError::DoesNotFit);
        }

        let mag = if nbits <= u64::BITS as u64 {
            let mut mag = 0u64;
            for (i, l) in self.limbs().iter().enumerate() {
                mag |= (*l as u64) << (i as u32 * LIMB_BITS);
            }
            mag as f64
        } else {
            // Keep the 64 most significant bits and fold everything below into a sticky bit.
            // 64 bits leave enough room below the 53 bit mantissa for rounding to come out right.
            let shift = nbits - u64::BITS as u64;
            let mut top = MpInt::new();
            let abs = MpInt::try_from_limbs(false, self.limbs())?;
            rshift_mp(&mut top, &abs, shift)?;
            let sticky = self.trailing_zeros() < shift;
            let top = u64::try_from(&top)? | sticky as u64;
            ldexp(top as f64, shift as i64)
        };
        if mag.is_infinite() {
            debug!(nbits, "integer rounds beyond f64 range");
            return Err(MpIntError::DoesNotFit);
        }
        Ok(if self.is_negative() { -mag } else { mag })
    }
}

impl TryFrom<f64> for MpInt {
    type Error = MpIntError;

    fn try_from(x: f64) -> Result<Self, Self::Error> {
        Self::from_f64(x)
    }
}

impl TryFrom<&MpInt> for f64 {
    type Error = MpIntError;

    fn try_from(v: &MpInt) -> Result<Self, Self::Error> {
        v.to_f64()
    }
}

/// The quotient `u / v` rounded to the nearest `f64`, ties to even.
///
/// Fails with [`MpIntError::DivisionByZero`] for zero `v` and with [`MpIntError::DoesNotFit`] if
/// the rounded quotient exceeds the `f64` range. Quotients too small for the smallest subnormal
/// come out as a zero carrying the quotient's sign.
pub fn truediv_mp_mp(u: &MpInt, v: &MpInt) -> Result<f64, MpIntError> {
    if v.is_zero() {
        return Err(MpIntError::DivisionByZero);
    }
    let negative = u.is_negative() ^ v.is_negative();
    let signed = |x: f64| if negative { -x } else { x };
    if u.is_zero() {
        return Ok(signed(0.0));
    }

    let a_bits = u.bit_length();
    let b_bits = v.bit_length();
    if a_bits <= F64_MANT_DIG as u64 && b_bits <= F64_MANT_DIG as u64 {
        // Both operands are exact, a single IEEE division rounds correctly.
        let a = u.checked_abs()?.to_f64()?;
        let b = v.checked_abs()?.to_f64()?;
        return Ok(signed(a / b));
    }

    // 2^(diff - 1) < |u / v| < 2^(diff + 1).
    let diff = a_bits as i128 - b_bits as i128;
    if diff > F64_MAX_EXP as i128 {
        debug!(a_bits, b_bits, "quotient too large for f64");
        return Err(MpIntError::DoesNotFit);
    }
    if diff < (F64_MIN_EXP - F64_MANT_DIG - 1) as i128 {
        return Ok(signed(0.0));
    }
    let diff = diff as i64;

    // Scale |u| such that the quotient gets 55 or 56 bits, two or three of which are rounding
    // bits. Subnormal results get proportionally more.
    let shift = diff.max(F64_MIN_EXP) - F64_MANT_DIG - 2;
    let a = MpInt::try_from_limbs(false, u.limbs())?;
    let b = MpInt::try_from_limbs(false, v.limbs())?;
    let mut x = MpInt::new();
    let mut inexact = false;
    if shift <= 0 {
        lshift_mp(&mut x, &a, shift.unsigned_abs())?;
    } else {
        let shift = shift as u64;
        inexact = a.trailing_zeros() < shift;
        rshift_mp(&mut x, &a, shift)?;
    }
    let (mut q, mut r) = (MpInt::new(), MpInt::new());
    tdivmod_mp_mp(&mut q, &mut r, &x, &b)?;
    inexact |= !r.is_zero();
    let q_bits = q.bit_length() as i64;
    let mut q = u64::try_from(&q)?;

    // Round off the extra bits, with the inexact flag acting as a sticky bit.
    let extra_bits = q_bits.max(F64_MIN_EXP - shift) - F64_MANT_DIG;
    let mask = 1u64 << (extra_bits - 1);
    let low = q | inexact as u64;
    q = if low & mask != 0 && low & (3 * mask - 1) != 0 {
        (low + mask) & !(2 * mask - 1)
    } else {
        low & !(2 * mask - 1)
    };
    let dq = q as f64;

    if shift + q_bits >= F64_MAX_EXP
        && (shift + q_bits > F64_MAX_EXP || dq == ldexp(1.0, q_bits))
    {
        debug!(a_bits, b_bits, "quotient rounds beyond f64 range");
        return Err(MpIntError::DoesNotFit);
    }
    Ok(signed(ldexp(dq, shift)))
}

impl MpInt {
    /// The quotient `self / v` as the nearest `f64`.
    pub fn checked_truediv(&self, v: &MpInt) -> Result<f64, MpIntError> {
        truediv_mp_mp(self, v)
    }
}

#[test]
fn test_from_f64() {
    assert_eq!(MpInt::from_f64(-2.9).unwrap(), MpInt::from(-2i64));
    assert_eq!(MpInt::from_f64(2.9).unwrap(), MpInt::from(2i64));
    assert!(MpInt::from_f64(-0.5).unwrap().is_zero());
    assert!(!MpInt::from_f64(-0.5).unwrap().is_negative());
    assert!(MpInt::from_f64(0.0).unwrap().is_zero());
    assert_eq!(MpInt::from_f64(1e18).unwrap(), MpInt::from(1_000_000_000_000_000_000i64));
    assert_eq!(
        MpInt::from_f64(2f64.powi(100)).unwrap(),
        MpInt::from(1u64).checked_shl(100).unwrap()
    );
    assert_eq!(
        MpInt::from_f64(-(2f64.powi(60) + 2f64.powi(10))).unwrap(),
        MpInt::from(-((1i64 << 60) + (1 << 10)))
    );
    assert_eq!(MpInt::from_f64(f64::NAN).unwrap_err(), MpIntError::NonFiniteFloat);
    assert_eq!(MpInt::from_f64(f64::INFINITY).unwrap_err(), MpIntError::NonFiniteFloat);
    assert_eq!(MpInt::try_from(f64::NEG_INFINITY).unwrap_err(), MpIntError::NonFiniteFloat);
}

#[test]
fn test_to_f64() {
    assert_eq!(MpInt::new().to_f64().unwrap(), 0.0);
    assert_eq!(MpInt::from(-3i64).to_f64().unwrap(), -3.0);
    assert_eq!(MpInt::from(u64::MAX).to_f64().unwrap(), u64::MAX as f64);

    // 2^53 + 1 is a tie and rounds to the even 2^53.
    let v = MpInt::from((1u64 << 53) + 1);
    assert_eq!(v.to_f64().unwrap(), 2f64.powi(53));
    // 2^53 + 3 rounds up to 2^53 + 4.
    let v = MpInt::from((1u64 << 53) + 3);
    assert_eq!(v.to_f64().unwrap(), 2f64.powi(53) + 4.0);

    // A tie decided only by bits far below the top 64.
    let one = MpInt::from(1u64);
    let tie = one.checked_shl(200).unwrap().checked_add(&one.checked_shl(147).unwrap()).unwrap();
    assert_eq!(tie.to_f64().unwrap(), 2f64.powi(200));
    let above = tie.checked_add(&one).unwrap();
    assert_eq!(above.to_f64().unwrap(), 2f64.powi(200) + 2f64.powi(148));

    let max = MpInt::from_f64(f64::MAX).unwrap();
    assert_eq!(max.to_f64().unwrap(), f64::MAX);
    assert_eq!(max.checked_neg().unwrap().to_f64().unwrap(), -f64::MAX);
    assert_eq!(one.checked_shl(1024).unwrap().to_f64().unwrap_err(), MpIntError::DoesNotFit);
    // Rounds up to 2^1024.
    let almost = one.checked_shl(1024).unwrap().checked_sub(&one).unwrap();
    assert_eq!(almost.to_f64().unwrap_err(), MpIntError::DoesNotFit);
    assert_eq!(f64::try_from(&MpInt::from(12i64)).unwrap(), 12.0);
}

#[test]
fn test_truediv_mp_mp() {
    let t = |u: i64, v: i64| truediv_mp_mp(&MpInt::from(u), &MpInt::from(v)).unwrap();
    assert_eq!(t(1, 3), 1.0 / 3.0);
    assert_eq!(t(-7, 2), -3.5);
    assert_eq!(t(7, -2), -3.5);
    assert_eq!(t(6, 3), 2.0);
    assert!(t(0, -5) == 0.0 && t(0, -5).is_sign_negative());
    assert!(t(0, 5).is_sign_positive());
    assert_eq!(
        truediv_mp_mp(&MpInt::from(1i64), &MpInt::new()).unwrap_err(),
        MpIntError::DivisionByZero
    );
}

#[test]
fn test_truediv_mp_mp_large() {
    let one = MpInt::from(1u64);
    let big = one.checked_shl(200).unwrap();

    // (2^200 + 2^100) / 2^100 == 2^100 + 1 rounds to 2^100.
    let u = big.checked_add(&one.checked_shl(100).unwrap()).unwrap();
    assert_eq!(truediv_mp_mp(&u, &one.checked_shl(100).unwrap()).unwrap(), 2f64.powi(100));

    let three = MpInt::from(3u64);
    let q = truediv_mp_mp(&big, &three).unwrap();
    assert_eq!(q, 2f64.powi(200) / 3.0);
    let q = truediv_mp_mp(&three, &big).unwrap();
    assert_eq!(q, 3.0 / 2f64.powi(200));

    // Overflow and underflow.
    let huge = one.checked_shl(1100).unwrap();
    assert_eq!(truediv_mp_mp(&huge, &three).unwrap_err(), MpIntError::DoesNotFit);
    assert_eq!(truediv_mp_mp(&huge, &one.checked_shl(100).unwrap()).unwrap(), 2f64.powi(1000));
    let q = truediv_mp_mp(&three.checked_neg().unwrap(), &huge).unwrap();
    assert!(q == 0.0 && q.is_sign_negative());

    // Subnormal results.
    let q = truediv_mp_mp(&one, &one.checked_shl(1074).unwrap()).unwrap();
    assert_eq!(q, f64::from_bits(1));
    let q = truediv_mp_mp(&three, &one.checked_shl(1074).unwrap()).unwrap();
    assert_eq!(q, f64::from_bits(3));
    // 1 / 2^1075 is a tie between zero and the smallest subnormal, and rounds to zero.
    let q = truediv_mp_mp(&one, &one.checked_shl(1075).unwrap()).unwrap();
    assert_eq!(q, 0.0);
}
