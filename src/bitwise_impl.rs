//! Implementation of bitwise operations on multiprecision integers.
//!
//! All operations behave as if applied to the infinite two's complement representations of their
//! operands, i.e. negative values are sign extended with an infinite sequence of set bits.

use super::add_impl::{ct_add_mp_l, ct_sub_mp_l};
use super::error::MpIntError;
use super::limb::{ct_add_l_l, ct_sub_l_l, LimbType};
use super::mpint::MpInt;

/// Compute `w = !u`, which equals `-(u + 1)`.
pub fn not_mp(w: &mut MpInt, u: &MpInt) -> Result<(), MpIntError> {
    let u_limbs = u.limbs();
    if u.is_negative() {
        // !u == |u| - 1.
        w.limbs.try_copy_from(u_limbs)?;
        let borrow = ct_sub_mp_l(w.limbs.as_mut_slice(), 1);
        debug_assert_eq!(borrow, 0);
        w.negative = false;
    } else {
        w.limbs.try_resize(u_limbs.len() + 1)?;
        let w_limbs = w.limbs.as_mut_slice();
        w_limbs[..u_limbs.len()].copy_from_slice(u_limbs);
        w_limbs[u_limbs.len()] = 0;
        let carry = ct_add_mp_l(w_limbs, 1);
        debug_assert_eq!(carry, 0);
        w.negative = true;
    }
    w.normalize();
    Ok(())
}

/// Iterator over the two's complement limbs of a signed magnitude.
///
/// Yields sign extension limbs past the magnitude's end indefinitely.
struct TwosComplementLimbs<'a> {
    limbs: &'a [LimbType],
    negative: bool,
    i: usize,
    borrow: LimbType,
}

impl<'a> TwosComplementLimbs<'a> {
    fn new(u: &'a MpInt) -> Self {
        Self {
            limbs: u.limbs(),
            negative: u.is_negative(),
            i: 0,
            borrow: 1,
        }
    }
}

impl<'a> Iterator for TwosComplementLimbs<'a> {
    type Item = LimbType;

    fn next(&mut self) -> Option<Self::Item> {
        let val = self.limbs.get(self.i).copied().unwrap_or(0);
        self.i += 1;
        if !self.negative {
            return Some(val);
        }
        // -|u| == !(|u| - 1).
        let (borrow, val) = ct_sub_l_l(val, self.borrow);
        self.borrow = borrow;
        Some(!val)
    }
}

fn bitop_mp_mp<F>(w: &mut MpInt, u: &MpInt, v: &MpInt, op: F) -> Result<(), MpIntError>
where
    F: Fn(LimbType, LimbType) -> LimbType,
{
    // One extra limb for the sign extension.
    let nlimbs = u.limbs().len().max(v.limbs().len()) + 1;
    let negative = op(
        (u.is_negative() as LimbType).wrapping_neg(),
        (v.is_negative() as LimbType).wrapping_neg(),
    ) != 0;

    w.limbs.try_resize(nlimbs)?;
    let w_limbs = w.limbs.as_mut_slice();
    let u_iter = TwosComplementLimbs::new(u);
    let v_iter = TwosComplementLimbs::new(v);
    for (w_val, (u_val, v_val)) in w_limbs.iter_mut().zip(u_iter.zip(v_iter)) {
        *w_val = op(u_val, v_val);
    }

    if negative {
        // Convert back from two's complement: |w| == !w + 1.
        let mut carry = 1;
        for w_val in w_limbs.iter_mut() {
            (carry, *w_val) = ct_add_l_l(!*w_val, carry);
        }
    }
    w.negative = negative;
    w.normalize();
    Ok(())
}

/// Compute `w = u & v`.
pub fn and_mp_mp(w: &mut MpInt, u: &MpInt, v: &MpInt) -> Result<(), MpIntError> {
    bitop_mp_mp(w, u, v, |a, b| a & b)
}

/// Compute `w = u | v`.
pub fn or_mp_mp(w: &mut MpInt, u: &MpInt, v: &MpInt) -> Result<(), MpIntError> {
    bitop_mp_mp(w, u, v, |a, b| a | b)
}

/// Compute `w = u ^ v`.
pub fn xor_mp_mp(w: &mut MpInt, u: &MpInt, v: &MpInt) -> Result<(), MpIntError> {
    bitop_mp_mp(w, u, v, |a, b| a ^ b)
}

impl MpInt {
    pub fn checked_not(&self) -> Result<MpInt, MpIntError> {
        let mut w = MpInt::new();
        not_mp(&mut w, self)?;
        Ok(w)
    }

    pub fn checked_and(&self, v: &MpInt) -> Result<MpInt, MpIntError> {
        let mut w = MpInt::new();
        and_mp_mp(&mut w, self, v)?;
        Ok(w)
    }

    pub fn checked_or(&self, v: &MpInt) -> Result<MpInt, MpIntError> {
        let mut w = MpInt::new();
        or_mp_mp(&mut w, self, v)?;
        Ok(w)
    }

    pub fn checked_xor(&self, v: &MpInt) -> Result<MpInt, MpIntError> {
        let mut w = MpInt::new();
        xor_mp_mp(&mut w, self, v)?;
        Ok(w)
    }
}

#[test]
fn test_not_mp() {
    for u in [0i64, 1, -1, 2, -2, i64::MAX, i64::MIN] {
        assert_eq!(MpInt::from(u).checked_not().unwrap(), MpInt::from(!u));
    }
    let u = MpInt::try_from_limbs(false, &[!0]).unwrap();
    let w = u.checked_not().unwrap();
    assert_eq!(w.limbs(), &[0, 1]);
    assert!(w.is_negative());
    assert_eq!(w.checked_not().unwrap(), u);
}

#[test]
fn test_bitop_mp_mp_small() {
    let vals = [0i64, 1, -1, 6, -6, 12, -12, 0x5555, -0x5555, i64::MAX, i64::MIN];
    for u in vals {
        for v in vals {
            let (mu, mv) = (MpInt::from(u), MpInt::from(v));
            assert_eq!(mu.checked_and(&mv).unwrap(), MpInt::from(u & v), "{} & {}", u, v);
            assert_eq!(mu.checked_or(&mv).unwrap(), MpInt::from(u | v), "{} | {}", u, v);
            assert_eq!(mu.checked_xor(&mv).unwrap(), MpInt::from(u ^ v), "{} ^ {}", u, v);
        }
    }
}

#[test]
fn test_bitop_mp_mp_sign_extension() {
    // -2^64 & (2^64 + 5) sign extends the shorter operand's ones.
    let u = tst_mk_mpint!("-0x10000000000000000");
    let v = tst_mk_mpint!("0x10000000000000005");
    assert_eq!(u.checked_and(&v).unwrap(), tst_mk_mpint!("0x10000000000000000"));
    assert_eq!(u.checked_or(&v).unwrap(), tst_mk_mpint!("-0xfffffffffffffffb"));
    assert_eq!(u.checked_xor(&v).unwrap(), tst_mk_mpint!("-0x1fffffffffffffffb"));

    // x ^ x == 0, x & !x == 0, x | !x == -1.
    let x = tst_mk_mpint!("-0x123456789abcdef0123456789");
    let not_x = x.checked_not().unwrap();
    assert!(x.checked_xor(&x).unwrap().is_zero());
    assert!(x.checked_and(&not_x).unwrap().is_zero());
    assert_eq!(x.checked_or(&not_x).unwrap(), MpInt::from(-1i64));
}
