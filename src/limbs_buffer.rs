//! The limb store backing every [`MpInt`](crate::MpInt) magnitude.
//!
//! A [`LimbsBuffer`] owns a growable sequence of limbs, least significant first. All growth goes
//! through [`Vec::try_reserve()`] so that allocator exhaustion surfaces as an error return rather
//! than an abort, and every request is checked against [`MAX_LIMBS`] first so that requests which
//! could never be serviced are refused before the allocator is even asked.

use super::error::MpIntError;
use super::limb::{find_last_set_bit_l, LimbType, LIMB_BITS};
use tracing::debug;
#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Upper bound on the number of limbs in any single buffer.
///
/// Bit counts of buffers up to this size always fit both `usize` and `u64`.
pub const MAX_LIMBS: usize = 1 << (usize::BITS - 8);

/// Check a limb count against [`MAX_LIMBS`].
pub fn check_nlimbs(nlimbs: usize) -> Result<(), MpIntError> {
    if nlimbs > MAX_LIMBS {
        debug!(nlimbs, max = MAX_LIMBS, "refusing oversized limb request");
        return Err(MpIntError::LimbsTooLarge { nlimbs });
    }
    Ok(())
}

/// Number of limbs needed for holding `nbits` bits.
///
/// Fails with [`MpIntError::LimbsTooLarge`] if the result would exceed [`MAX_LIMBS`].
pub fn nlimbs_for_bits(nbits: u64) -> Result<usize, MpIntError> {
    let nlimbs = nbits / LIMB_BITS as u64 + (nbits % LIMB_BITS as u64 != 0) as u64;
    let nlimbs = usize::try_from(nlimbs).unwrap_or(usize::MAX);
    check_nlimbs(nlimbs)?;
    Ok(nlimbs)
}

#[test]
fn test_nlimbs_for_bits() {
    assert_eq!(nlimbs_for_bits(0).unwrap(), 0);
    assert_eq!(nlimbs_for_bits(1).unwrap(), 1);
    assert_eq!(nlimbs_for_bits(LIMB_BITS as u64).unwrap(), 1);
    assert_eq!(nlimbs_for_bits(LIMB_BITS as u64 + 1).unwrap(), 2);
    assert!(matches!(
        nlimbs_for_bits(u64::MAX),
        Err(MpIntError::LimbsTooLarge { .. })
    ));
}

/// Index of the highest non-zero limb plus one, zero if all limbs are zero.
pub fn find_last_set_limb_mp(op0: &[LimbType]) -> usize {
    let mut nlimbs = op0.len();
    while nlimbs > 0 && op0[nlimbs - 1] == 0 {
        nlimbs -= 1;
    }
    nlimbs
}

#[test]
fn test_find_last_set_limb_mp() {
    assert_eq!(find_last_set_limb_mp(&[]), 0);
    assert_eq!(find_last_set_limb_mp(&[0, 0]), 0);
    assert_eq!(find_last_set_limb_mp(&[1, 0]), 1);
    assert_eq!(find_last_set_limb_mp(&[0, 1, 0, 0]), 2);
}

/// Position of the most significant set bit plus one, zero if no bit is set.
pub fn find_last_set_bit_mp(op0: &[LimbType]) -> u64 {
    let nlimbs = find_last_set_limb_mp(op0);
    if nlimbs == 0 {
        return 0;
    }
    (nlimbs as u64 - 1) * LIMB_BITS as u64 + find_last_set_bit_l(op0[nlimbs - 1]) as u64
}

/// Number of trailing zero bits, zero if no bit is set.
pub fn find_first_set_bit_mp(op0: &[LimbType]) -> u64 {
    for (i, &val) in op0.iter().enumerate() {
        if val != 0 {
            return i as u64 * LIMB_BITS as u64 + val.trailing_zeros() as u64;
        }
    }
    0
}

pub fn test_bit_mp(op0: &[LimbType], pos: u64) -> bool {
    let limb_index = pos / LIMB_BITS as u64;
    match usize::try_from(limb_index).ok().and_then(|i| op0.get(i)) {
        Some(val) => (val >> (pos % LIMB_BITS as u64)) & 1 != 0,
        None => false,
    }
}

#[test]
fn test_find_set_bit_mp() {
    assert_eq!(find_last_set_bit_mp(&[]), 0);
    assert_eq!(find_first_set_bit_mp(&[]), 0);
    assert_eq!(find_last_set_bit_mp(&[0, 1]), LIMB_BITS as u64 + 1);
    assert_eq!(find_first_set_bit_mp(&[0, 2]), LIMB_BITS as u64 + 1);
    assert_eq!(find_last_set_bit_mp(&[!0, 0]), LIMB_BITS as u64);
    assert_eq!(find_first_set_bit_mp(&[!0, 0]), 0);
    assert!(test_bit_mp(&[0, 2], LIMB_BITS as u64 + 1));
    assert!(!test_bit_mp(&[0, 2], LIMB_BITS as u64));
    assert!(!test_bit_mp(&[0, 2], u64::MAX));
}

/// Owned, growable limb storage.
///
/// The logical length is the number of limbs currently in use, the capacity may exceed it. Limbs
/// beyond a normalized value's length are never observable.
#[derive(Default)]
pub struct LimbsBuffer {
    limbs: Vec<LimbType>,
}

impl LimbsBuffer {
    pub const fn new() -> Self {
        Self { limbs: Vec::new() }
    }

    /// Allocate a zero filled scratch buffer of `nlimbs` limbs.
    ///
    /// Requests beyond [`MAX_LIMBS`] fail with [`MpIntError::LimbsTooLarge`], allocator
    /// exhaustion with [`MpIntError::AllocFailed`].
    pub fn try_with_nlimbs(nlimbs: usize) -> Result<Self, MpIntError> {
        let mut buf = Self::new();
        buf.try_resize(nlimbs)?;
        Ok(buf)
    }

    pub fn try_from_limbs(limbs: &[LimbType]) -> Result<Self, MpIntError> {
        let mut buf = Self::new();
        buf.try_copy_from(limbs)?;
        Ok(buf)
    }

    pub(crate) fn from_vec(limbs: Vec<LimbType>) -> Self {
        debug_assert!(limbs.len() <= MAX_LIMBS);
        Self { limbs }
    }

    pub fn nlimbs(&self) -> usize {
        self.limbs.len()
    }

    pub fn capacity(&self) -> usize {
        self.limbs.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.limbs.is_empty()
    }

    pub fn as_slice(&self) -> &[LimbType] {
        &self.limbs
    }

    pub fn as_mut_slice(&mut self) -> &mut [LimbType] {
        &mut self.limbs
    }

    /// Load the `i`th limb, reading zero beyond the logical length.
    pub fn load_l(&self, i: usize) -> LimbType {
        self.limbs.get(i).copied().unwrap_or(0)
    }

    /// Grow or shrink to `nlimbs` limbs.
    ///
    /// Existing limbs up to the smaller of the old and new length are preserved, limbs added on
    /// growth read as zero. On failure, the buffer is left untouched.
    pub fn try_resize(&mut self, nlimbs: usize) -> Result<(), MpIntError> {
        let cur_nlimbs = self.limbs.len();
        if nlimbs <= cur_nlimbs {
            self.truncate(nlimbs);
            return Ok(());
        }
        check_nlimbs(nlimbs)?;
        self.limbs.try_reserve(nlimbs - cur_nlimbs)?;
        self.limbs.resize(nlimbs, 0);
        Ok(())
    }

    /// Replace the contents with a copy of `src`, reusing the existing capacity if possible.
    pub fn try_copy_from(&mut self, src: &[LimbType]) -> Result<(), MpIntError> {
        if src.len() > self.limbs.len() {
            self.try_resize(src.len())?;
        } else {
            self.truncate(src.len());
        }
        self.limbs.copy_from_slice(src);
        Ok(())
    }

    pub fn truncate(&mut self, nlimbs: usize) {
        if nlimbs >= self.limbs.len() {
            return;
        }
        #[cfg(feature = "zeroize")]
        self.limbs[nlimbs..].zeroize();
        self.limbs.truncate(nlimbs);
    }

    /// Drop high zero limbs.
    ///
    /// Returns the resulting number of limbs.
    pub fn normalize(&mut self) -> usize {
        let nlimbs = find_last_set_limb_mp(&self.limbs);
        self.limbs.truncate(nlimbs);
        nlimbs
    }

    /// Release the backing allocation, leaving an empty buffer behind.
    pub fn release(&mut self) {
        #[cfg(feature = "zeroize")]
        self.limbs.zeroize();
        self.limbs = Vec::new();
    }
}

impl Clone for LimbsBuffer {
    fn clone(&self) -> Self {
        Self { limbs: self.limbs.clone() }
    }
}

impl Drop for LimbsBuffer {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        self.limbs.zeroize();
    }
}

#[test]
fn test_limbs_buffer_resize() {
    let mut buf = LimbsBuffer::new();
    assert!(buf.is_empty());
    buf.try_resize(3).unwrap();
    assert_eq!(buf.as_slice(), &[0, 0, 0]);
    buf.as_mut_slice()[0] = 1;
    buf.as_mut_slice()[2] = 3;
    buf.try_resize(5).unwrap();
    assert_eq!(buf.as_slice(), &[1, 0, 3, 0, 0]);
    assert_eq!(buf.normalize(), 3);
    buf.try_resize(1).unwrap();
    assert_eq!(buf.as_slice(), &[1]);
    assert!(buf.capacity() >= 5);
    assert_eq!(buf.load_l(0), 1);
    assert_eq!(buf.load_l(7), 0);
    buf.release();
    assert_eq!(buf.nlimbs(), 0);
    assert_eq!(buf.capacity(), 0);
}

#[test]
fn test_limbs_buffer_resize_failure_keeps_state() {
    let mut buf = LimbsBuffer::try_from_limbs(&[5, 6]).unwrap();
    let err = buf.try_resize(MAX_LIMBS + 1).unwrap_err();
    assert_eq!(err, MpIntError::LimbsTooLarge { nlimbs: MAX_LIMBS + 1 });
    assert_eq!(buf.as_slice(), &[5, 6]);

    // Within the limit, but far beyond what any allocator can provide.
    #[cfg(target_pointer_width = "64")]
    {
        let err = buf.try_resize(MAX_LIMBS).unwrap_err();
        assert_eq!(err, MpIntError::AllocFailed);
        assert_eq!(buf.as_slice(), &[5, 6]);
    }
}

#[test]
fn test_limbs_buffer_copy_from() {
    let mut buf = LimbsBuffer::try_with_nlimbs(4).unwrap();
    buf.try_copy_from(&[7, 8]).unwrap();
    assert_eq!(buf.as_slice(), &[7, 8]);
    assert!(buf.capacity() >= 4);
    buf.try_copy_from(&[1, 2, 3, 4, 5]).unwrap();
    assert_eq!(buf.as_slice(), &[1, 2, 3, 4, 5]);
}
