//! Conversions between [`MpInt`] and the native integer types.

use super::error::MpIntError;
use super::limb::{LimbType, LIMB_BITS};
use super::limbs_buffer::LimbsBuffer;
use super::mpint::MpInt;

impl MpInt {
    fn from_u128_mag(negative: bool, mut mag: u128) -> Self {
        let mut limbs = Vec::with_capacity((u128::BITS / LIMB_BITS) as usize);
        while mag != 0 {
            limbs.push(mag as LimbType);
            mag >>= LIMB_BITS;
        }
        Self {
            negative: negative && !limbs.is_empty(),
            limbs: LimbsBuffer::from_vec(limbs),
        }
    }

    /// The magnitude as an `u128`, if it fits.
    fn to_u128_mag(&self) -> Result<u128, MpIntError> {
        if self.bit_length() > u128::BITS as u64 {
            return Err(MpIntError::DoesNotFit);
        }
        Ok(self
            .limbs()
            .iter()
            .rev()
            .fold(0u128, |acc, l| acc << LIMB_BITS | *l as u128))
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for MpInt {
                fn from(v: $t) -> Self {
                    MpInt::from_u128_mag(false, v as u128)
                }
            }
        )*
    };
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for MpInt {
                fn from(v: $t) -> Self {
                    MpInt::from_u128_mag(v < 0, v.unsigned_abs() as u128)
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);
impl_from_signed!(i8, i16, i32, i64, i128, isize);

macro_rules! impl_try_from_mpint_unsigned {
    ($($t:ty),*) => {
        $(
            impl TryFrom<&MpInt> for $t {
                type Error = MpIntError;

                fn try_from(v: &MpInt) -> Result<Self, Self::Error> {
                    if v.is_negative() {
                        return Err(MpIntError::DoesNotFit);
                    }
                    <$t>::try_from(v.to_u128_mag()?).map_err(|_| MpIntError::DoesNotFit)
                }
            }
        )*
    };
}

macro_rules! impl_try_from_mpint_signed {
    ($($t:ty),*) => {
        $(
            impl TryFrom<&MpInt> for $t {
                type Error = MpIntError;

                fn try_from(v: &MpInt) -> Result<Self, Self::Error> {
                    let mag = v.to_u128_mag()?;
                    if v.is_negative() {
                        // The most negative value's magnitude exceeds the maximum by one.
                        if mag == <$t>::MIN.unsigned_abs() as u128 {
                            return Ok(<$t>::MIN);
                        }
                        <$t>::try_from(mag)
                            .map(|v| -v)
                            .map_err(|_| MpIntError::DoesNotFit)
                    } else {
                        <$t>::try_from(mag).map_err(|_| MpIntError::DoesNotFit)
                    }
                }
            }
        )*
    };
}

impl_try_from_mpint_unsigned!(u32, u64, u128, usize);
impl_try_from_mpint_signed!(i32, i64, i128, isize);

#[test]
fn test_from_native() {
    assert!(MpInt::from(0i64).is_zero());
    assert!(!MpInt::from(0i64).is_negative());
    assert_eq!(MpInt::from(-1i32).limbs(), &[1]);
    assert!(MpInt::from(-1i32).is_negative());
    assert_eq!(MpInt::from(u64::MAX).bit_length(), 64);
    assert_eq!(MpInt::from(i64::MIN).bit_length(), 64);
    assert!(MpInt::from(i64::MIN).trailing_zeros() == 63);
    assert_eq!(MpInt::from(u128::MAX).bit_length(), 128);
    assert_eq!(MpInt::from(i128::MIN).bit_length(), 128);
    assert_eq!(MpInt::from(7u8), MpInt::from(7i128));
}

#[test]
fn test_try_from_mpint() {
    for v in [0i64, 1, -1, i64::MAX, i64::MIN, 1 << 40, -(1 << 40)] {
        assert_eq!(i64::try_from(&MpInt::from(v)).unwrap(), v);
        assert_eq!(i128::try_from(&MpInt::from(v)).unwrap(), v as i128);
    }
    for v in [0u64, 1, u64::MAX] {
        assert_eq!(u64::try_from(&MpInt::from(v)).unwrap(), v);
    }
    assert_eq!(u128::try_from(&MpInt::from(u128::MAX)).unwrap(), u128::MAX);
    assert_eq!(i128::try_from(&MpInt::from(i128::MIN)).unwrap(), i128::MIN);
    assert_eq!(i128::try_from(&MpInt::from(i128::MAX)).unwrap(), i128::MAX);

    let too_big = MpInt::from(i64::MAX as i128 + 1);
    assert_eq!(i64::try_from(&too_big).unwrap_err(), MpIntError::DoesNotFit);
    let too_small = MpInt::from(i64::MIN as i128 - 1);
    assert_eq!(i64::try_from(&too_small).unwrap_err(), MpIntError::DoesNotFit);
    assert_eq!(u64::try_from(&MpInt::from(-1i64)).unwrap_err(), MpIntError::DoesNotFit);
    assert_eq!(
        u64::try_from(&MpInt::from(u64::MAX as u128 + 1)).unwrap_err(),
        MpIntError::DoesNotFit
    );
    let huge = MpInt::from(u128::MAX).checked_shl(1).unwrap();
    assert_eq!(u128::try_from(&huge).unwrap_err(), MpIntError::DoesNotFit);
    assert_eq!(i32::try_from(&MpInt::from(-(1i64 << 31))).unwrap(), i32::MIN);
    assert_eq!(u32::try_from(&MpInt::from(1u64 << 32)).unwrap_err(), MpIntError::DoesNotFit);
}
