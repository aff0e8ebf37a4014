use mpint::{MpInt, MpIntError, ToStrOptions};
use proptest::prelude::*;

fn mk(v: i128) -> MpInt {
    MpInt::from(v)
}

/// Assemble a value from a sign and magnitude limbs in 64 bit chunks, least significant first.
fn mk_large(negative: bool, chunks: &[u64]) -> MpInt {
    let mut v = MpInt::new();
    for chunk in chunks.iter().rev() {
        v = v.checked_shl(64).unwrap().checked_add(&MpInt::from(*chunk)).unwrap();
    }
    if negative {
        v.negate();
    }
    v
}

fn large() -> impl Strategy<Value = MpInt> {
    (any::<bool>(), prop::collection::vec(any::<u64>(), 0..6))
        .prop_map(|(negative, chunks)| mk_large(negative, &chunks))
}

fn assert_normalized(v: &MpInt) {
    if let Some(top) = v.limbs().last() {
        assert_ne!(*top, 0);
    } else {
        assert!(!v.is_negative());
    }
}

fn floor_divmod(a: i128, b: i128) -> (i128, i128) {
    let (mut q, mut r) = (a / b, a % b);
    if r != 0 && (r < 0) != (b < 0) {
        q -= 1;
        r += b;
    }
    (q, r)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn test_add_sub_mul_small(a: i64, b: i64) {
        let (u, v) = (mk(a as i128), mk(b as i128));
        let sum = u.checked_add(&v).unwrap();
        let diff = u.checked_sub(&v).unwrap();
        let prod = u.checked_mul(&v).unwrap();
        prop_assert_eq!(&sum, &mk(a as i128 + b as i128));
        prop_assert_eq!(&diff, &mk(a as i128 - b as i128));
        prop_assert_eq!(&prod, &mk(a as i128 * b as i128));
        for w in [&sum, &diff, &prod] {
            assert_normalized(w);
        }
    }

    #[test]
    fn test_divmod_small(a: i128, b: i64) {
        prop_assume!(b != 0 && !(a == i128::MIN && b == -1));
        let (u, v) = (mk(a), mk(b as i128));

        let (q, r) = u.checked_divmod(&v).unwrap();
        let (eq, er) = floor_divmod(a, b as i128);
        prop_assert_eq!(q, mk(eq));
        prop_assert_eq!(r, mk(er));

        let (q, r) = u.checked_tdivmod(&v).unwrap();
        prop_assert_eq!(q, mk(a / b as i128));
        prop_assert_eq!(r, mk(a % b as i128));
    }

    #[test]
    fn test_additive_identity(a in large()) {
        prop_assert_eq!(a.checked_add(&MpInt::new()).unwrap(), a.clone());
        let zero = a.checked_add(&a.checked_neg().unwrap()).unwrap();
        prop_assert!(zero.is_zero());
        prop_assert!(!zero.is_negative());
        assert_normalized(&zero);
    }

    #[test]
    fn test_division_laws(a in large(), b in large()) {
        prop_assume!(!b.is_zero());

        let (q, r) = a.checked_divmod(&b).unwrap();
        assert_normalized(&q);
        assert_normalized(&r);
        prop_assert_eq!(q.checked_mul(&b).unwrap().checked_add(&r).unwrap(), a.clone());
        prop_assert!(r.cmp_mag(&b).is_lt());
        prop_assert!(r.is_zero() || r.is_negative() == b.is_negative());

        let (q, r) = a.checked_tdivmod(&b).unwrap();
        prop_assert_eq!(q.checked_mul(&b).unwrap().checked_add(&r).unwrap(), a.clone());
        prop_assert!(r.cmp_mag(&b).is_lt());
        prop_assert!(r.is_zero() || r.is_negative() == a.is_negative());

        let (q, r) = a.checked_divmod_near(&b).unwrap();
        prop_assert_eq!(q.checked_mul(&b).unwrap().checked_add(&r).unwrap(), a.clone());
        prop_assert!(r.checked_shl(1).unwrap().cmp_mag(&b).is_le());
    }

    #[test]
    fn test_shift_multiply_equivalence(a in large(), n in 0u64..300) {
        let pow2 = MpInt::from(1u64).checked_shl(n).unwrap();
        prop_assert_eq!(a.checked_shl(n).unwrap(), a.checked_mul(&pow2).unwrap());
        prop_assert_eq!(a.checked_shr(n).unwrap(), a.checked_div_floor(&pow2).unwrap());
        prop_assert_eq!(a.checked_shl(n).unwrap().checked_shr(n).unwrap(), a.clone());
    }

    #[test]
    fn test_bitwise_small(a: i64, b: i64) {
        let (u, v) = (mk(a as i128), mk(b as i128));
        prop_assert_eq!(u.checked_and(&v).unwrap(), mk((a & b) as i128));
        prop_assert_eq!(u.checked_or(&v).unwrap(), mk((a | b) as i128));
        prop_assert_eq!(u.checked_xor(&v).unwrap(), mk((a ^ b) as i128));
        prop_assert_eq!(u.checked_not().unwrap(), mk(!a as i128));
    }

    #[test]
    fn test_bitwise_laws(a in large(), b in large()) {
        prop_assert_eq!(a.checked_not().unwrap().checked_not().unwrap(), a.clone());
        prop_assert_eq!(a.checked_and(&a).unwrap(), a.clone());
        prop_assert_eq!(a.checked_or(&a.checked_not().unwrap()).unwrap(), mk(-1));
        // a ^ b == (a | b) - (a & b)
        let x = a.checked_xor(&b).unwrap();
        let y = a.checked_or(&b).unwrap().checked_sub(&a.checked_and(&b).unwrap()).unwrap();
        prop_assert_eq!(x, y);
    }

    #[test]
    fn test_gcd_laws(a in large(), b in large()) {
        let (g, s, t) = a.checked_gcdext(&b).unwrap();
        prop_assert!(!g.is_negative());
        prop_assert_eq!(&g, &a.checked_gcd(&b).unwrap());
        let bezout = a.checked_mul(&s).unwrap().checked_add(&b.checked_mul(&t).unwrap()).unwrap();
        prop_assert_eq!(&bezout, &g);
        if !g.is_zero() {
            prop_assert!(a.checked_rem_floor(&g).unwrap().is_zero());
            prop_assert!(b.checked_rem_floor(&g).unwrap().is_zero());
        }

        let l = a.checked_lcm(&b).unwrap();
        prop_assert!(!l.is_negative());
        let ab = a.checked_mul(&b).unwrap().checked_abs().unwrap();
        prop_assert_eq!(g.checked_mul(&l).unwrap(), ab);
    }

    #[test]
    fn test_text_round_trip(a in large(), base in 2u32..=36, prefix: bool) {
        let opts = ToStrOptions { prefix, tag: false };
        let s = a.to_str_radix(base, opts).unwrap();
        prop_assert_eq!(MpInt::from_str_radix(&s, base).unwrap(), a.clone());
        if prefix && matches!(base, 2 | 8 | 16) {
            prop_assert_eq!(MpInt::from_str_radix(&s, 0).unwrap(), a.clone());
        }
    }

    #[test]
    fn test_text_matches_native(a: i64) {
        let u = mk(a as i128);
        prop_assert_eq!(u.to_string(), a.to_string());
        prop_assert_eq!(format!("{:x}", u), if a < 0 {
            format!("-{:x}", a.unsigned_abs())
        } else {
            format!("{:x}", a)
        });
        prop_assert_eq!(a.to_string().parse::<MpInt>().unwrap(), u);
    }

    #[test]
    fn test_bytes_round_trip(a in large(), little_endian: bool) {
        let length = (a.bit_length() / 8 + 1) as usize;
        let bytes = a.to_bytes(length, little_endian, true).unwrap();
        prop_assert_eq!(MpInt::from_bytes(&bytes, little_endian, true).unwrap(), a.clone());

        if !a.is_negative() {
            let length = ((a.bit_length() + 7) / 8) as usize;
            let bytes = a.to_bytes(length, little_endian, false).unwrap();
            prop_assert_eq!(MpInt::from_bytes(&bytes, little_endian, false).unwrap(), a.clone());
        } else {
            prop_assert_eq!(
                a.to_bytes(length, little_endian, false).unwrap_err(),
                MpIntError::DoesNotFit
            );
        }
    }

    #[test]
    fn test_bytes_match_native(a: i64) {
        let u = mk(a as i128);
        prop_assert_eq!(u.to_bytes(8, true, true).unwrap(), a.to_le_bytes().to_vec());
        prop_assert_eq!(u.to_bytes(8, false, true).unwrap(), a.to_be_bytes().to_vec());
        prop_assert_eq!(MpInt::from_bytes(&a.to_le_bytes(), true, true).unwrap(), u);
    }

    #[test]
    fn test_native_round_trip(a: i128) {
        let u = mk(a);
        prop_assert_eq!(i128::try_from(&u).unwrap(), a);
        prop_assert_eq!(i64::try_from(&u).ok(), i64::try_from(a).ok());
        prop_assert_eq!(u64::try_from(&u).ok(), u64::try_from(a).ok());
    }

    #[test]
    fn test_float_conversions(a: i64, b: i64) {
        prop_assert_eq!(mk(a as i128).to_f64().unwrap(), a as f64);
        let x = a as f64 / 8.0;
        prop_assert_eq!(MpInt::from_f64(x).unwrap(), mk(x.trunc() as i128));

        // Both operands are exact in an f64, so IEEE division is the oracle.
        let (a, b) = (a >> 11, b >> 11);
        prop_assume!(b != 0);
        let q = mk(a as i128).checked_truediv(&mk(b as i128)).unwrap();
        prop_assert_eq!(q, a as f64 / b as f64);
    }

    #[test]
    fn test_truediv_large(a in large(), b in large(), k in 0u64..200, negative: bool) {
        // Scaling by a power of two is exact, so the rounding must match to_f64's.
        let mut pow2 = MpInt::from(1u64).checked_shl(k).unwrap();
        if negative {
            pow2.negate();
        }
        let expected = a.to_f64().unwrap() / 2f64.powi(k as i32);
        let expected = if negative { -expected } else { expected };
        prop_assert_eq!(a.checked_truediv(&pow2).unwrap(), expected);

        // An exact quotient rounds the same way as the integer itself.
        prop_assume!(!b.is_zero());
        let ab = a.checked_mul(&b).unwrap();
        prop_assert_eq!(ab.checked_truediv(&b).unwrap(), a.to_f64().unwrap());
    }

    #[test]
    fn test_sqrtrem_law(a in large()) {
        let a = a.checked_abs().unwrap();
        let (root, rem) = a.checked_sqrtrem().unwrap();
        prop_assert_eq!(root.checked_mul(&root).unwrap().checked_add(&rem).unwrap(), a);
        prop_assert!(!rem.is_negative());
        prop_assert!(rem <= root.checked_shl(1).unwrap());
    }

    #[test]
    fn test_powm_small(b: u32, e in 0u32..64, m in 1u32..) {
        let (b, m) = (b as u128, m as u128);
        let mut expected = 1 % m;
        for _ in 0..e {
            expected = expected * (b % m) % m;
        }
        let r = mk(b as i128).checked_powm(&mk(e as i128), &mk(m as i128)).unwrap();
        prop_assert_eq!(r, mk(expected as i128));
    }
}
