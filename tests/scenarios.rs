use mpint::{
    add_mp_mp, divmod_mp_mp, mul_mp_mp, powm_mp_mp_mp, sqrtrem_mp, ErrorKind, MpInt, MpIntError,
    ToStrOptions,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn parse(s: &str) -> MpInt {
    MpInt::from_str_radix(s, 0).unwrap()
}

#[test]
fn test_add_multi_limb_with_negative() {
    let u = parse("123456789012345678901234567890");
    let mut w = MpInt::new();
    add_mp_mp(&mut w, &u, &MpInt::from(-1i64)).unwrap();
    assert_eq!(w.to_string(), "123456789012345678901234567889");
}

#[test]
fn test_floor_divmod() {
    let (mut q, mut r) = (MpInt::new(), MpInt::new());
    divmod_mp_mp(&mut q, &mut r, &MpInt::from(-7i64), &MpInt::from(2i64)).unwrap();
    assert_eq!(q, -4i64);
    assert_eq!(r, 1i64);

    let err = divmod_mp_mp(&mut q, &mut r, &MpInt::from(1i64), &MpInt::new()).unwrap_err();
    assert_eq!(err, MpIntError::DivisionByZero);
    assert_eq!(err.kind(), ErrorKind::Domain);
}

#[test]
fn test_parse_separators() {
    assert_eq!(MpInt::from_str_radix("0x_ff", 0).unwrap(), 255i64);
    let err = MpInt::from_str_radix("1__0", 10).unwrap_err();
    assert_eq!(err, MpIntError::InvalidDigits);
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
    assert_eq!(MpInt::from_str_radix("1_0", 10).unwrap(), 10i64);
    assert_eq!(MpInt::from_str_radix("", 10).unwrap_err(), MpIntError::Empty);
    assert_eq!(MpInt::from_str_radix("12", 37).unwrap_err(), MpIntError::InvalidBase(37));
}

#[test]
fn test_powm() {
    let mut w = MpInt::new();
    powm_mp_mp_mp(&mut w, &MpInt::from(4i64), &MpInt::from(-1i64), &MpInt::from(7i64)).unwrap();
    assert_eq!(w, 2i64);
    powm_mp_mp_mp(&mut w, &MpInt::from(2i64), &MpInt::from(10i64), &MpInt::from(1000i64)).unwrap();
    assert_eq!(w, 24i64);

    let err = MpInt::from(2i64)
        .checked_powm(&MpInt::from(-1i64), &MpInt::from(4i64))
        .unwrap_err();
    assert_eq!(err, MpIntError::NotInvertible);
}

#[test]
fn test_bytes_minus_one() {
    let v = MpInt::from(-1i64);
    let bytes = v.to_bytes(2, true, true).unwrap();
    assert_eq!(bytes, [0xff, 0xff]);
    assert_eq!(MpInt::from_bytes(&bytes, true, true).unwrap(), v);
}

#[test]
fn test_sqrtrem() {
    let (mut root, mut rem) = (MpInt::new(), MpInt::new());
    sqrtrem_mp(&mut root, &mut rem, &MpInt::from(1000000i64)).unwrap();
    assert_eq!(root, 1000i64);
    assert_eq!(rem, 0i64);
}

#[test]
fn test_formatting() {
    let v = MpInt::from(-255i64);
    assert_eq!(format!("{}", v), "-255");
    assert_eq!(format!("{:#x}", v), "-0xff");
    assert_eq!(format!("{:X}", v), "-FF");
    assert_eq!(format!("{:#b}", MpInt::from(5i64)), "0b101");
    assert_eq!(format!("{:o}", MpInt::from(8i64)), "10");
    assert_eq!(format!("{:>6}", MpInt::from(42i64)), "    42");
    assert_eq!(format!("{:?}", v), "-255");
    let opts = ToStrOptions { prefix: false, tag: true };
    assert_eq!(v.to_str_radix(10, opts).unwrap(), "mpz(-255)");
}

#[test]
fn test_destination_reuse() {
    // A destination keeps its capacity across operations.
    let u = parse("0x1234567890abcdef1234567890abcdef1234567890abcdef");
    let mut w = MpInt::new();
    mul_mp_mp(&mut w, &u, &u).unwrap();
    let capacity = w.capacity();
    add_mp_mp(&mut w, &MpInt::from(1i64), &MpInt::from(2i64)).unwrap();
    assert_eq!(w, 3i64);
    assert_eq!(w.capacity(), capacity);

    w.release();
    assert!(w.is_zero());
    assert_eq!(w.capacity(), 0);
}

#[test]
fn test_oversized_shift() {
    let err = MpInt::from(1i64).checked_shl(u64::MAX).unwrap_err();
    assert!(matches!(err, MpIntError::LimbsTooLarge { .. }));
    assert_eq!(err.kind(), ErrorKind::Allocation);

    let huge = MpInt::from(1i64).checked_shl(200).unwrap();
    assert_eq!(MpInt::from(-5i64).checked_shr_mp(&huge).unwrap(), -1i64);
    assert_eq!(MpInt::from(5i64).checked_shr_mp(&huge).unwrap(), 0i64);
    assert!(MpInt::new().checked_shl_mp(&huge).unwrap().is_zero());
    assert_eq!(
        MpInt::from(1i64).checked_shl_mp(&MpInt::from(-1i64)).unwrap_err(),
        MpIntError::NegativeShift
    );
}

#[test]
fn test_random_vectors() {
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..200 {
        let a: i64 = rng.gen();
        let b: i64 = rng.gen_range(1..=i64::MAX) * if rng.gen() { 1 } else { -1 };
        let (u, v) = (MpInt::from(a), MpInt::from(b));

        let (a_wide, b_wide) = (a as i128, b as i128);
        let mut expected_q = a_wide.div_euclid(b_wide);
        if b < 0 && a_wide.rem_euclid(b_wide) != 0 {
            expected_q -= 1;
        }
        let (q, r) = u.checked_divmod(&v).unwrap();
        assert_eq!(q, MpInt::from(expected_q));
        assert_eq!(q.checked_mul(&v).unwrap().checked_add(&r).unwrap(), u);

        let p = u.checked_mul(&v).unwrap();
        assert_eq!(p.to_string(), (a_wide * b_wide).to_string());
        let (q, r) = p.checked_divmod(&v).unwrap();
        assert_eq!(q, u);
        assert!(r.is_zero());
    }
}
