//! Conversion between [`MpInt`] values and their textual representation.

use super::add_impl::ct_add_mp_l;
use super::div_impl::div_mp_l;
use super::error::MpIntError;
use super::limb::LimbType;
use super::limbs_buffer::{find_last_set_limb_mp, LimbsBuffer};
use super::mpint::MpInt;
use super::mul_impl::mul_mp_l;
use core::fmt;
use core::str::FromStr;

const DIGITS_LOWER: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const DIGITS_UPPER: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

const TAG_OPEN: &str = "mpz(";
const TAG_CLOSE: &str = ")";

/// Decoration options for [`MpInt::to_str_radix()`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToStrOptions {
    /// Emit `0b`, `0o` or `0x` after the sign for bases 2, 8 and 16 respectively.
    pub prefix: bool,
    /// Wrap the whole text in `mpz(...)`.
    pub tag: bool,
}

fn check_base(base: u32) -> Result<(), MpIntError> {
    if !(2..=36).contains(&base) {
        return Err(MpIntError::InvalidBase(base));
    }
    Ok(())
}

fn base_prefix(base: u32) -> &'static str {
    match base {
        2 => "0b",
        8 => "0o",
        16 => "0x",
        _ => "",
    }
}

/// Largest power of `base` fitting a limb, along with its exponent.
fn limb_chunk_base(base: u32) -> (LimbType, usize) {
    let base = base as LimbType;
    let mut chunk_base = base;
    let mut chunk_ndigits = 1;
    while let Some(next) = chunk_base.checked_mul(base) {
        chunk_base = next;
        chunk_ndigits += 1;
    }
    (chunk_base, chunk_ndigits)
}

/// Upper bound on the limbs needed for `ndigits` digits in any base up to 36.
fn max_nlimbs_for_digits(ndigits: usize) -> Result<usize, MpIntError> {
    // Each digit carries less than six bits. One more limb for the carry.
    ndigits
        .checked_mul(6)
        .map(|nbits| nbits / LimbType::BITS as usize + 2)
        .ok_or(MpIntError::LimbsTooLarge { nlimbs: usize::MAX })
}

/// Render a magnitude's digits, most significant first.
fn mag_to_digits(
    mag: &[LimbType],
    base: u32,
    alphabet: &[u8; 36],
) -> Result<Vec<u8>, MpIntError> {
    debug_assert!((2..=36).contains(&base));
    let mut digits = Vec::new();
    if mag.is_empty() {
        digits.try_reserve(1)?;
        digits.push(b'0');
        return Ok(digits);
    }

    // Each digit carries at least floor(log2(base)) bits.
    let digit_bits = (u32::BITS - 1 - base.leading_zeros()) as usize;
    digits.try_reserve(mag.len() * LimbType::BITS as usize / digit_bits + 1)?;
    let (chunk_base, chunk_ndigits) = limb_chunk_base(base);

    let mut rem = LimbsBuffer::try_from_limbs(mag)?;
    let mut nlimbs = rem.nlimbs();
    while nlimbs != 0 {
        let mut chunk = div_mp_l(&mut rem.as_mut_slice()[..nlimbs], chunk_base);
        nlimbs = find_last_set_limb_mp(&rem.as_slice()[..nlimbs]);
        // Emit all of the chunk's digits, except for leading zeros of the most significant one.
        let mut i = 0;
        while i < chunk_ndigits && (nlimbs != 0 || chunk != 0) {
            digits.push(alphabet[(chunk % base as LimbType) as usize]);
            chunk /= base as LimbType;
            i += 1;
        }
    }
    digits.reverse();
    Ok(digits)
}

impl MpInt {
    /// Render in the given base, which must be in the range 2 to 36.
    ///
    /// Digits beyond 9 are lowercase letters. Options control the base prefix and tag decoration.
    ///
    /// ```
    /// use mpint::{MpInt, ToStrOptions};
    ///
    /// let v = MpInt::from(-255i64);
    /// let opts = ToStrOptions { prefix: true, tag: true };
    /// assert_eq!(v.to_str_radix(16, opts).unwrap(), "mpz(-0xff)");
    /// ```
    pub fn to_str_radix(&self, base: u32, opts: ToStrOptions) -> Result<String, MpIntError> {
        check_base(base)?;
        let digits = mag_to_digits(self.limbs(), base, DIGITS_LOWER)?;
        let mut s = String::new();
        s.try_reserve(digits.len() + TAG_OPEN.len() + TAG_CLOSE.len() + 3)?;
        if opts.tag {
            s.push_str(TAG_OPEN);
        }
        if self.is_negative() {
            s.push('-');
        }
        if opts.prefix {
            s.push_str(base_prefix(base));
        }
        // The alphabet is plain ASCII.
        s.extend(digits.iter().map(|d| *d as char));
        if opts.tag {
            s.push_str(TAG_CLOSE);
        }
        Ok(s)
    }

    /// Parse from text.
    ///
    /// Accepts an optional sign, followed by an optional base prefix `0b`, `0o` or `0x` (case
    /// insensitive) and the digits. A prefix must agree with `base` and can be followed by a
    /// single `_`. Otherwise underscores are permitted only between two digits. A `base` of zero
    /// selects the base from the prefix, defaulting to ten; in that mode a leading zero must
    /// introduce a prefix.
    pub fn from_str_radix(s: &str, base: u32) -> Result<Self, MpIntError> {
        if base != 0 {
            check_base(base)?;
        }
        let mut s = s.as_bytes();
        if s.is_empty() {
            return Err(MpIntError::Empty);
        }

        let negative = match s[0] {
            b'-' => {
                s = &s[1..];
                true
            }
            b'+' => {
                s = &s[1..];
                false
            }
            _ => false,
        };
        if s.is_empty() {
            return Err(MpIntError::Empty);
        }

        let mut base = base;
        if s[0] == b'0' && s.len() >= 2 {
            let prefix_base = match s[1].to_ascii_lowercase() {
                b'b' => 2,
                b'o' => 8,
                b'x' => 16,
                _ => 0,
            };
            if base == 0 {
                if prefix_base == 0 {
                    return Err(MpIntError::InvalidDigits);
                }
                base = prefix_base;
            }
            if prefix_base == base {
                s = &s[2..];
                if s.first() == Some(&b'_') {
                    s = &s[1..];
                }
            }
        }
        if base == 0 {
            base = 10;
        }
        if s.is_empty() {
            return Err(MpIntError::InvalidDigits);
        }

        let (chunk_base, chunk_ndigits) = limb_chunk_base(base);
        let mut limbs = LimbsBuffer::try_with_nlimbs(max_nlimbs_for_digits(s.len())?)?;
        let mut nlimbs = 0;
        let mut chunk: LimbType = 0;
        let mut chunk_scale: LimbType = 1;
        let mut ndigits_in_chunk = 0;
        let mut prev_was_digit = false;
        for (i, c) in s.iter().enumerate() {
            if *c == b'_' {
                if !prev_was_digit || i + 1 == s.len() {
                    return Err(MpIntError::InvalidDigits);
                }
                prev_was_digit = false;
                continue;
            }
            let d = match (*c as char).to_digit(base) {
                Some(d) => d as LimbType,
                None => return Err(MpIntError::InvalidDigits),
            };
            prev_was_digit = true;
            chunk = chunk * base as LimbType + d;
            chunk_scale *= base as LimbType;
            ndigits_in_chunk += 1;
            if ndigits_in_chunk == chunk_ndigits {
                debug_assert_eq!(chunk_scale, chunk_base);
                accumulate_chunk(&mut limbs, &mut nlimbs, chunk_scale, chunk);
                chunk = 0;
                chunk_scale = 1;
                ndigits_in_chunk = 0;
            }
        }
        if ndigits_in_chunk != 0 {
            accumulate_chunk(&mut limbs, &mut nlimbs, chunk_scale, chunk);
        }

        Ok(MpInt::from_limbs_buffer(negative, limbs))
    }
}

/// `limbs = limbs * scale + chunk`, growing the used part by at most one limb.
fn accumulate_chunk(
    limbs: &mut LimbsBuffer,
    nlimbs: &mut usize,
    scale: LimbType,
    chunk: LimbType,
) {
    // Limbs past the used part are still zero.
    let limbs = &mut limbs.as_mut_slice()[..*nlimbs + 1];
    let carry = mul_mp_l(&mut limbs[..*nlimbs], scale);
    limbs[*nlimbs] = carry;
    let carry = ct_add_mp_l(limbs, chunk);
    debug_assert_eq!(carry, 0);
    *nlimbs = find_last_set_limb_mp(limbs);
}

impl FromStr for MpInt {
    type Err = MpIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MpInt::from_str_radix(s, 10)
    }
}

impl MpInt {
    fn fmt_radix(
        &self,
        f: &mut fmt::Formatter<'_>,
        base: u32,
        alphabet: &[u8; 36],
    ) -> fmt::Result {
        let digits = mag_to_digits(self.limbs(), base, alphabet).map_err(|_| fmt::Error)?;
        let digits = core::str::from_utf8(&digits).map_err(|_| fmt::Error)?;
        f.pad_integral(!self.is_negative(), base_prefix(base), digits)
    }
}

impl fmt::Display for MpInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_radix(f, 10, DIGITS_LOWER)
    }
}

impl fmt::Debug for MpInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_radix(f, 10, DIGITS_LOWER)
    }
}

impl fmt::Binary for MpInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_radix(f, 2, DIGITS_LOWER)
    }
}

impl fmt::Octal for MpInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_radix(f, 8, DIGITS_LOWER)
    }
}

impl fmt::LowerHex for MpInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_radix(f, 16, DIGITS_LOWER)
    }
}

impl fmt::UpperHex for MpInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_radix(f, 16, DIGITS_UPPER)
    }
}

#[test]
fn test_max_nlimbs_for_digits() {
    assert_eq!(max_nlimbs_for_digits(0).unwrap(), 2);
    let nlimbs = max_nlimbs_for_digits(1000).unwrap();
    assert!(nlimbs * LimbType::BITS as usize >= 1000 * 6);
    assert_eq!(
        max_nlimbs_for_digits(usize::MAX / 2).unwrap_err(),
        MpIntError::LimbsTooLarge { nlimbs: usize::MAX }
    );
}

#[test]
fn test_to_str_radix() {
    let opts = ToStrOptions::default();
    assert_eq!(MpInt::new().to_str_radix(10, opts).unwrap(), "0");
    assert_eq!(MpInt::from(-255i64).to_str_radix(16, opts).unwrap(), "-ff");
    assert_eq!(MpInt::from(35i64).to_str_radix(36, opts).unwrap(), "z");
    assert_eq!(MpInt::from(5i64).to_str_radix(2, opts).unwrap(), "101");
    assert_eq!(MpInt::from(-8i64).to_str_radix(3, opts).unwrap(), "-22");

    let prefix = ToStrOptions { prefix: true, tag: false };
    assert_eq!(MpInt::from(-5i64).to_str_radix(2, prefix).unwrap(), "-0b101");
    assert_eq!(MpInt::from(8i64).to_str_radix(8, prefix).unwrap(), "0o10");
    assert_eq!(MpInt::from(0i64).to_str_radix(16, prefix).unwrap(), "0x0");
    assert_eq!(MpInt::from(7i64).to_str_radix(10, prefix).unwrap(), "7");

    let tag = ToStrOptions { prefix: false, tag: true };
    assert_eq!(MpInt::from(-12i64).to_str_radix(10, tag).unwrap(), "mpz(-12)");

    assert_eq!(MpInt::from(1i64).to_str_radix(1, opts).unwrap_err(), MpIntError::InvalidBase(1));
    assert_eq!(
        MpInt::from(1i64).to_str_radix(37, opts).unwrap_err(),
        MpIntError::InvalidBase(37)
    );
}

#[test]
fn test_to_str_radix_multi_limb() {
    let u = MpInt::try_from_limbs(false, &[0, 0, 1]).unwrap();
    let expected = if LimbType::BITS == 64 {
        "340282366920938463463374607431768211456"
    } else {
        "18446744073709551616"
    };
    assert_eq!(u.to_string(), expected);
    assert_eq!(
        format!("{:x}", u),
        format!("1{}", "0".repeat(2 * LimbType::BITS as usize / 4))
    );

    // Chunk boundaries with embedded zero digits.
    let s = "1000000000000000000000000000000000000000000000000000000000000000000000000001";
    assert_eq!(s.parse::<MpInt>().unwrap().to_string(), s);
    let s = "-100000000000000000000000000000000000000000000000000000000000000000000000000";
    assert_eq!(s.parse::<MpInt>().unwrap().to_string(), s);
}

#[test]
fn test_from_str_radix() {
    assert_eq!(MpInt::from_str_radix("0x_ff", 0).unwrap(), MpInt::from(255i64));
    assert_eq!(MpInt::from_str_radix("1__0", 10).unwrap_err(), MpIntError::InvalidDigits);
    assert_eq!(MpInt::from_str_radix("-0B101", 0).unwrap(), MpInt::from(-5i64));
    assert_eq!(MpInt::from_str_radix("+0o17", 0).unwrap(), MpInt::from(15i64));
    assert_eq!(MpInt::from_str_radix("0x1F", 16).unwrap(), MpInt::from(31i64));
    assert_eq!(MpInt::from_str_radix("1f", 16).unwrap(), MpInt::from(31i64));
    assert_eq!(MpInt::from_str_radix("1_000_000", 0).unwrap(), MpInt::from(1000000i64));
    assert_eq!(MpInt::from_str_radix("Zz", 36).unwrap(), MpInt::from(1295i64));
    assert_eq!(MpInt::from_str_radix("0", 0).unwrap(), MpInt::new());
    assert_eq!(MpInt::from_str_radix("-0", 10).unwrap(), MpInt::new());
    assert!(!MpInt::from_str_radix("-0", 10).unwrap().is_negative());
    assert_eq!(MpInt::from_str_radix("012", 10).unwrap(), MpInt::from(12i64));
    // A prefix of a different base is read as digits.
    assert_eq!(MpInt::from_str_radix("0b1", 16).unwrap(), MpInt::from(0xb1i64));

    for (s, base) in [
        ("012", 0),
        ("00", 0),
        ("0x", 0),
        ("0x_", 16),
        ("0x__1", 16),
        ("_1", 10),
        ("1_", 10),
        ("1 ", 10),
        ("12a", 10),
        ("2", 2),
        ("--1", 10),
        ("+-1", 10),
        ("0b2", 0),
    ] {
        assert_eq!(
            MpInt::from_str_radix(s, base).unwrap_err(),
            MpIntError::InvalidDigits,
            "{:?} in base {}",
            s,
            base
        );
    }
    assert_eq!(MpInt::from_str_radix("", 10).unwrap_err(), MpIntError::Empty);
    assert_eq!(MpInt::from_str_radix("-", 10).unwrap_err(), MpIntError::Empty);
    assert_eq!(MpInt::from_str_radix("1", 1).unwrap_err(), MpIntError::InvalidBase(1));
    assert_eq!(MpInt::from_str_radix("1", 37).unwrap_err(), MpIntError::InvalidBase(37));
}

#[test]
fn test_fmt_mpint() {
    let v = MpInt::from(-255i64);
    assert_eq!(format!("{}", v), "-255");
    assert_eq!(format!("{:?}", v), "-255");
    assert_eq!(format!("{:x}", v), "-ff");
    assert_eq!(format!("{:#X}", v), "-0xFF");
    assert_eq!(format!("{:#b}", MpInt::from(5i64)), "0b101");
    assert_eq!(format!("{:o}", MpInt::from(8i64)), "10");
    assert_eq!(format!("{:>6}", MpInt::from(42i64)), "    42");
    assert_eq!(format!("{:+}", MpInt::from(42i64)), "+42");
    assert_eq!(format!("{:08}", v), "-0000255");
}

#[test]
fn test_str_round_trip() {
    let u = tst_mk_mpint!("-0x1234_5678_9abc_def0_fedc_ba98_7654_3210_0f1e_2d3c");
    let opts = ToStrOptions { prefix: true, tag: false };
    for base in 2..=36 {
        let s = u.to_str_radix(base, opts).unwrap();
        let back = if [2, 8, 16].contains(&base) {
            MpInt::from_str_radix(&s, 0).unwrap()
        } else {
            MpInt::from_str_radix(&s, base).unwrap()
        };
        assert_eq!(back, u, "base {}", base);
    }
}
