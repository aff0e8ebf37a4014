//! Conversion between [`MpInt`] values and fixed width byte strings.
//!
//! Byte strings are interpreted as either big or little endian, and either as unsigned magnitudes
//! or as two's complement signed values of exactly the given width.

use super::error::MpIntError;
use super::limb::{LimbType, LIMB_BYTES};
use super::limbs_buffer::LimbsBuffer;
use super::mpint::MpInt;

/// Load the `i`th least significant byte of a magnitude.
fn load_mag_byte(mag: &[LimbType], i: usize) -> u8 {
    match mag.get(i / LIMB_BYTES) {
        Some(l) => (l >> (8 * (i % LIMB_BYTES))) as u8,
        None => 0,
    }
}

/// Whether a value fits `nbits` bits, in two's complement if `signed`.
fn fits_nbits(u: &MpInt, nbits: u64, signed: bool) -> bool {
    let mag_nbits = u.bit_length();
    if mag_nbits == 0 {
        true
    } else if !signed {
        !u.is_negative() && mag_nbits <= nbits
    } else if !u.is_negative() {
        mag_nbits < nbits
    } else {
        // -2^(nbits - 1) is the most negative representable value.
        mag_nbits < nbits || (mag_nbits == nbits && u.trailing_zeros() == nbits - 1)
    }
}

impl MpInt {
    /// Encode into exactly `length` bytes.
    ///
    /// Negative values are encoded in two's complement and require `signed`. Values not fitting
    /// the requested width fail with [`MpIntError::DoesNotFit`].
    pub fn to_bytes(
        &self,
        length: usize,
        little_endian: bool,
        signed: bool,
    ) -> Result<Vec<u8>, MpIntError> {
        let nbits = (length as u64).saturating_mul(8);
        if !fits_nbits(self, nbits, signed) {
            return Err(MpIntError::DoesNotFit);
        }

        let mut bytes = Vec::new();
        bytes.try_reserve_exact(length)?;
        let mag = self.limbs();
        if self.is_negative() {
            // !(|u| - 1) == -|u|, computed bytewise with a borrow chain.
            let mut borrow = 1;
            for i in 0..length {
                let (b, o) = load_mag_byte(mag, i).overflowing_sub(borrow);
                borrow = o as u8;
                bytes.push(!b);
            }
        } else {
            bytes.extend((0..length).map(|i| load_mag_byte(mag, i)));
        }

        if !little_endian {
            bytes.reverse();
        }
        Ok(bytes)
    }

    /// Decode from a byte string.
    ///
    /// For `signed`, the most significant bit of the most significant byte is the sign bit. An
    /// empty byte string decodes to zero.
    pub fn from_bytes(bytes: &[u8], little_endian: bool, signed: bool) -> Result<Self, MpIntError> {
        let length = bytes.len();
        let load_byte = |i: usize| {
            if little_endian {
                bytes[i]
            } else {
                bytes[length - 1 - i]
            }
        };
        let negative = signed && length != 0 && load_byte(length - 1) & 0x80 != 0;

        let nlimbs = length / LIMB_BYTES + (length % LIMB_BYTES != 0) as usize;
        let mut limbs = LimbsBuffer::try_with_nlimbs(nlimbs)?;
        let limbs_slice = limbs.as_mut_slice();
        let mut borrow = 1;
        for i in 0..length {
            let mut b = load_byte(i);
            if negative {
                // |u| == !u + 1.
                let (sum, o) = (!b).overflowing_add(borrow);
                borrow = o as u8;
                b = sum;
            }
            limbs_slice[i / LIMB_BYTES] |= (b as LimbType) << (8 * (i % LIMB_BYTES));
        }
        Ok(MpInt::from_limbs_buffer(negative, limbs))
    }
}

#[test]
fn test_to_bytes() {
    let v = MpInt::from(-1i64);
    assert_eq!(v.to_bytes(2, true, true).unwrap(), [0xff, 0xff]);
    assert_eq!(MpInt::from_bytes(&[0xff, 0xff], true, true).unwrap(), v);

    let v = MpInt::from(0x1234i64);
    assert_eq!(v.to_bytes(2, false, false).unwrap(), [0x12, 0x34]);
    assert_eq!(v.to_bytes(4, true, false).unwrap(), [0x34, 0x12, 0, 0]);
    assert_eq!(v.to_bytes(3, false, true).unwrap(), [0, 0x12, 0x34]);
    assert_eq!(v.to_bytes(1, false, false).unwrap_err(), MpIntError::DoesNotFit);

    assert_eq!(MpInt::from(255i64).to_bytes(1, true, false).unwrap(), [0xff]);
    assert_eq!(MpInt::from(255i64).to_bytes(1, true, true).unwrap_err(), MpIntError::DoesNotFit);
    assert_eq!(MpInt::from(127i64).to_bytes(1, true, true).unwrap(), [0x7f]);
    assert_eq!(MpInt::from(-128i64).to_bytes(1, true, true).unwrap(), [0x80]);
    assert_eq!(MpInt::from(-129i64).to_bytes(1, true, true).unwrap_err(), MpIntError::DoesNotFit);
    assert_eq!(MpInt::from(-256i64).to_bytes(2, false, true).unwrap(), [0xff, 0x00]);
    assert_eq!(MpInt::from(-1i64).to_bytes(1, true, false).unwrap_err(), MpIntError::DoesNotFit);

    assert!(MpInt::new().to_bytes(0, true, true).unwrap().is_empty());
    assert_eq!(MpInt::from(1i64).to_bytes(0, true, false).unwrap_err(), MpIntError::DoesNotFit);
}

#[test]
fn test_from_bytes() {
    assert!(MpInt::from_bytes(&[], true, true).unwrap().is_zero());
    assert_eq!(MpInt::from_bytes(&[0x80], true, true).unwrap(), MpInt::from(-128i64));
    assert_eq!(MpInt::from_bytes(&[0x80], true, false).unwrap(), MpInt::from(128i64));
    assert_eq!(MpInt::from_bytes(&[0xff, 0x00], false, true).unwrap(), MpInt::from(-256i64));
    assert_eq!(MpInt::from_bytes(&[0x00, 0xff], false, true).unwrap(), MpInt::from(255i64));
    assert_eq!(MpInt::from_bytes(&[0, 0, 0, 0x80], true, true).unwrap(), MpInt::from(-(1i64 << 31)));

    let bytes: Vec<u8> = (1..=20).collect();
    let v = MpInt::from_bytes(&bytes, false, false).unwrap();
    assert_eq!(v, tst_mk_mpint!("0x0102030405060708090a0b0c0d0e0f1011121314"));
    assert_eq!(v.to_bytes(20, false, false).unwrap(), bytes);
    let neg = v.checked_neg().unwrap();
    let enc = neg.to_bytes(21, true, true).unwrap();
    assert_eq!(enc[20], 0xff);
    assert_eq!(MpInt::from_bytes(&enc, true, true).unwrap(), neg);
}
