//! Definitions and arithmetic primitives related to [LimbType], the basic unit of multiprecision
//! integer arithmetic.
use core::convert;
use core::mem;
use core::ops;

/// The basic unit of an [`MpInt`](crate::MpInt) magnitude.
///
/// # Notes
///
/// Targets with 64 bit pointers get 64 bit limbs and do their double limb arithmetic on the native
/// `u128`. Everything else falls back to `u32` limbs with `u64` double limbs. None of the
/// multiprecision code depends on the concrete width, only on [`LIMB_BITS`].
///
#[cfg(target_pointer_width = "64")]
pub type LimbType = u64;
#[cfg(target_pointer_width = "64")]
pub type DoubleLimbType = u128;

#[cfg(not(target_pointer_width = "64"))]
pub type LimbType = u32;
#[cfg(not(target_pointer_width = "64"))]
pub type DoubleLimbType = u64;

/// The bit width of a [`LimbType`].
pub const LIMB_BITS: u32 = LimbType::BITS;
/// The size of a [`LimbType`] in bytes.
pub const LIMB_BYTES: usize = mem::size_of::<LimbType>();

#[inline(always)]
pub fn black_box_l(v: LimbType) -> LimbType {
    core::hint::black_box(v)
}

/// A branch free boolean, stored as an all zeros or all ones limb mask.
///
/// Used by the Montgomery kernels, whose control flow must not depend on exponent bits.
#[derive(Clone, Copy, Debug)]
pub struct LimbChoice {
    mask: LimbType,
}

impl LimbChoice {
    pub const fn new(cond: LimbType) -> Self {
        debug_assert!(cond == 0 || cond == 1);
        Self { mask: (0 as LimbType).wrapping_sub(cond) }
    }

    pub fn unwrap(&self) -> LimbType {
        black_box_l(self.mask & 1)
    }

    pub const fn select(&self, v0: LimbType, v1: LimbType) -> LimbType {
        v0 ^ (self.mask & (v0 ^ v1))
    }
}

impl convert::From<LimbType> for LimbChoice {
    fn from(value: LimbType) -> Self {
        Self::new(value)
    }
}

impl ops::Not for LimbChoice {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self { mask: !self.mask }
    }
}

impl ops::BitOr for LimbChoice {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self { mask: self.mask | rhs.mask }
    }
}

#[test]
fn test_limb_choice() {
    let t = LimbChoice::from(1);
    let f = LimbChoice::from(0);
    assert_eq!(t.unwrap(), 1);
    assert_eq!(f.unwrap(), 0);
    assert_eq!((!t).unwrap(), 0);
    assert_eq!((t | f).unwrap(), 1);
    assert_eq!(t.select(3, 5), 5);
    assert_eq!(f.select(3, 5), 3);
}

/// Add two limbs.
///
/// Returns a pair of carry and the [`LimbType::BITS`] lower bits of the sum.
///
/// Runs in constant time.
///
/// # Arguments:
///
/// * `v0` - first operand
/// * `v1` - second operand
///
pub fn ct_add_l_l(v0: LimbType, v1: LimbType) -> (LimbType, LimbType) {
    // Derive the carry arithmetically, overflowing_add() might branch.
    let v0 = black_box_l(v0);
    let v1 = black_box_l(v1);
    let r = v0.wrapping_add(v1);
    let carry = black_box_l((((v0 | v1) & !r) | (v0 & v1)) >> (LIMB_BITS - 1));
    (carry, r)
}

#[test]
fn test_ct_add_l_l() {
    assert_eq!(ct_add_l_l(0, 0), (0, 0));
    assert_eq!(ct_add_l_l(1, 0), (0, 1));
    assert_eq!(ct_add_l_l(!0 - 1, 1), (0, !0));
    assert_eq!(ct_add_l_l(!0, 1), (1, 0));
    assert_eq!(ct_add_l_l(1 << (LIMB_BITS - 1), 1 << (LIMB_BITS - 1)), (1, 0));
    assert_eq!(ct_add_l_l(!0, !0), (1, !0 - 1));
}

pub fn ct_add_l_l_c(v0: LimbType, v1: LimbType, carry: LimbType) -> (LimbType, LimbType) {
    debug_assert!(carry <= 1);
    let (carry0, r) = ct_add_l_l(v0, carry);
    let (carry1, r) = ct_add_l_l(r, v1);
    let carry = carry0 + carry1;
    debug_assert!(carry <= 1);
    (carry, r)
}

/// Subtract two limbs.
///
/// Returns a pair of borrow and the [`LimbType::BITS`] lower bits of the difference.
///
/// Runs in constant time.
///
/// # Arguments:
///
/// * `v0` - first operand
/// * `v1` - second operand
///
pub fn ct_sub_l_l(v0: LimbType, v1: LimbType) -> (LimbType, LimbType) {
    let v0 = black_box_l(v0);
    let v1 = black_box_l(v1);
    let r = v0.wrapping_sub(v1);
    let borrow = black_box_l((((r | v1) & !v0) | (v1 & r)) >> (LIMB_BITS - 1));
    (borrow, r)
}

#[test]
fn test_ct_sub_l_l() {
    assert_eq!(ct_sub_l_l(0, 0), (0, 0));
    assert_eq!(ct_sub_l_l(1, 0), (0, 1));
    assert_eq!(ct_sub_l_l(0, 1), (1, !0));
    assert_eq!(ct_sub_l_l(0, 1 << (LIMB_BITS - 1)), (1, 1 << (LIMB_BITS - 1)));
    assert_eq!(ct_sub_l_l(1 << (LIMB_BITS - 1), (1 << (LIMB_BITS - 1)) + 1), (1, !0));
}

pub fn ct_sub_l_l_b(v0: LimbType, v1: LimbType, borrow: LimbType) -> (LimbType, LimbType) {
    debug_assert!(borrow <= 1);
    let (borrow0, r) = ct_sub_l_l(v0, borrow);
    let (borrow1, r) = ct_sub_l_l(r, v1);
    let borrow = borrow0 + borrow1;
    debug_assert!(borrow <= 1);
    (borrow, r)
}

/// A pair of [`LimbType`]s interpreted as a double precision integer.
///
/// Used for the result of [`LimbType`] multiplications and for the two limb dividends of the long
/// division.
///
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DoubleLimb {
    v: [LimbType; 2],
}

impl DoubleLimb {
    pub fn new(h: LimbType, l: LimbType) -> Self {
        Self { v: [l, h] }
    }

    pub fn high(&self) -> LimbType {
        self.v[1]
    }

    pub fn low(&self) -> LimbType {
        self.v[0]
    }

    fn from_dl(v: DoubleLimbType) -> Self {
        Self::new((v >> LIMB_BITS) as LimbType, v as LimbType)
    }

    fn to_dl(self) -> DoubleLimbType {
        (self.high() as DoubleLimbType) << LIMB_BITS | self.low() as DoubleLimbType
    }
}

/// Multiply two limbs.
///
/// Returns the result as a double precision [`DoubleLimb`].
///
/// # Arguments:
///
/// * `v0` - first operand
/// * `v1` - second operand
///
pub fn ct_mul_l_l(v0: LimbType, v1: LimbType) -> DoubleLimb {
    DoubleLimb::from_dl(v0 as DoubleLimbType * v1 as DoubleLimbType)
}

#[test]
fn test_ct_mul_l_l() {
    let p = ct_mul_l_l(0, 0);
    assert_eq!(p.low(), 0);
    assert_eq!(p.high(), 0);

    let p = ct_mul_l_l(1 << (LIMB_BITS - 1), 2);
    assert_eq!(p.low(), 0);
    assert_eq!(p.high(), 1);

    let p = ct_mul_l_l(1 << (LIMB_BITS - 1), 1 << (LIMB_BITS - 1));
    assert_eq!(p.low(), 0);
    assert_eq!(p.high(), 1 << (LIMB_BITS - 2));

    let p = ct_mul_l_l(!0, !0);
    assert_eq!(p.low(), 1);
    assert_eq!(p.high(), !1);
}

/// Compute `op0 + op10 * op11 + carry`.
///
/// Returns a pair of the high limb carry and the low limb of the result.
pub fn ct_mul_add_l_l_l_c(
    op0: LimbType,
    op10: LimbType,
    op11: LimbType,
    carry: LimbType,
) -> (LimbType, LimbType) {
    // (b - 1)^2 + 2 * (b - 1) = b^2 - 1 always fits a double limb.
    let r = DoubleLimb::from_dl(
        op10 as DoubleLimbType * op11 as DoubleLimbType
            + op0 as DoubleLimbType
            + carry as DoubleLimbType,
    );
    (r.high(), r.low())
}

#[test]
fn test_ct_mul_add_l_l_l_c() {
    assert_eq!(ct_mul_add_l_l_l_c(0, 0, 0, 0), (0, 0));
    assert_eq!(ct_mul_add_l_l_l_c(1, 2, 3, 4), (0, 11));
    assert_eq!(ct_mul_add_l_l_l_c(!0, !0, !0, !0), (!0, !0));
}

/// Divide a double limb by a limb.
///
/// Returns a pair of the double limb quotient and the remainder.
///
/// # Arguments
///
/// * `u` - The [`DoubleLimb`] dividend.
/// * `v` - The non-zero divisor.
///
pub fn div_dl_l(u: &DoubleLimb, v: LimbType) -> (DoubleLimb, LimbType) {
    debug_assert!(v != 0);
    let u = u.to_dl();
    let v = v as DoubleLimbType;
    (DoubleLimb::from_dl(u / v), (u % v) as LimbType)
}

#[test]
fn test_div_dl_l() {
    fn div_and_check(u: DoubleLimb, v: LimbType) {
        let (q, r) = div_dl_l(&u, v);

        // Multiply q by v again and add the remainder back, the result should match the initial u.
        let prod_l = ct_mul_l_l(q.low(), v);
        let prod_h = ct_mul_l_l(q.high(), v);
        assert_eq!(prod_h.high(), 0);
        assert!(r < v);

        let (carry, result_l) = ct_add_l_l(prod_l.low(), r);
        let (carry, result_h) = ct_add_l_l_c(prod_l.high(), prod_h.low(), carry);
        assert_eq!(carry, 0);
        assert_eq!(result_l, u.low());
        assert_eq!(result_h, u.high());
    }

    div_and_check(DoubleLimb::new(!1, !0), !0);
    div_and_check(DoubleLimb::new(0, 0), !0);
    div_and_check(DoubleLimb::new(!0, !0), 1);
    div_and_check(DoubleLimb::new(!0, !1), 2);

    for i in 0..LIMB_BITS {
        for j in 0..LIMB_BITS {
            let u_h = if i != 0 { !0 >> (LIMB_BITS - i) } else { 0 };
            div_and_check(DoubleLimb::new(u_h, !0), 1 << j | 1);
        }
    }
}

/// Compute the inverse of an odd limb modulo `2^LIMB_BITS`.
pub fn ct_inv_mod_l(v: LimbType) -> LimbType {
    // Apply Hensel's lifting lemma for v * x - 1 to lift the trivial root
    // (i.e. inverse of v) mod 2^1 to a root mod 2^LIMB_BITS. Successive steps
    // double the bits, i.e. if r is a root mod 2^k, one step makes it a root mod 2^2*k.
    debug_assert_eq!(v & 1, 1);
    let mut k = 1;
    let mut r: LimbType = 1;
    while k < LIMB_BITS {
        r = (r << 1).wrapping_sub(v.wrapping_mul(r).wrapping_mul(r));
        k *= 2;
    }

    r
}

#[test]
fn test_ct_inv_mod_l() {
    for j in 0..LIMB_BITS {
        let v = ((1 as LimbType) << j) | 1;
        assert_eq!(v.wrapping_mul(ct_inv_mod_l(v)), 1);
    }

    for j in 1..LIMB_BITS {
        let v = ((1 as LimbType) << j).wrapping_sub(1);
        assert_eq!(v.wrapping_mul(ct_inv_mod_l(v)), 1);
    }
}

// Position of MSB + 1, if any, zero otherwise.
pub fn find_last_set_bit_l(v: LimbType) -> usize {
    (LIMB_BITS - v.leading_zeros()) as usize
}

#[test]
fn test_find_last_set_bit_l() {
    assert_eq!(find_last_set_bit_l(0), 0);

    for i in 0..LIMB_BITS as usize {
        let v: LimbType = 1 << i;
        assert_eq!(find_last_set_bit_l(v), i + 1);
        assert_eq!(find_last_set_bit_l(v - 1), i);
    }
}
