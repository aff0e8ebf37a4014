//! Error reporting for all fallible [`MpInt`](crate::MpInt) operations.

use std::collections::TryReserveError;
use thiserror::Error;

/// Classification of an [`MpIntError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A limb buffer could not be provided.
    Allocation,
    /// Malformed input or an argument outside the accepted range.
    InvalidValue,
    /// The target representation cannot hold the value.
    Overflow,
    /// The operation is mathematically undefined for its operands.
    Domain,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MpIntError {
    #[error("request for {nlimbs} limbs exceeds the supported maximum")]
    LimbsTooLarge { nlimbs: usize },
    #[error("limb allocation failed")]
    AllocFailed,
    #[error("invalid digit string")]
    InvalidDigits,
    #[error("base must be 0 or between 2 and 36, got {0}")]
    InvalidBase(u32),
    #[error("empty input")]
    Empty,
    #[error("negative shift count")]
    NegativeShift,
    #[error("cannot convert non-finite float")]
    NonFiniteFloat,
    #[error("negative argument")]
    NegativeArgument,
    #[error("value does not fit the target representation")]
    DoesNotFit,
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulus is zero")]
    ZeroModulus,
    #[error("base is not invertible for the given modulus")]
    NotInvertible,
    #[error("square root of negative value")]
    NegativeSqrt,
    #[error("negative exponent")]
    NegativeExponent,
}

impl MpIntError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::LimbsTooLarge { .. } | Self::AllocFailed => ErrorKind::Allocation,
            Self::InvalidDigits
            | Self::InvalidBase(_)
            | Self::Empty
            | Self::NegativeShift
            | Self::NonFiniteFloat
            | Self::NegativeArgument => ErrorKind::InvalidValue,
            Self::DoesNotFit => ErrorKind::Overflow,
            Self::DivisionByZero
            | Self::ZeroModulus
            | Self::NotInvertible
            | Self::NegativeSqrt
            | Self::NegativeExponent => ErrorKind::Domain,
        }
    }
}

impl From<TryReserveError> for MpIntError {
    fn from(_: TryReserveError) -> Self {
        Self::AllocFailed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            MpIntError::LimbsTooLarge { nlimbs: 7 }.to_string(),
            "request for 7 limbs exceeds the supported maximum"
        );
        assert_eq!(
            MpIntError::InvalidBase(37).to_string(),
            "base must be 0 or between 2 and 36, got 37"
        );
        assert_eq!(MpIntError::DivisionByZero.to_string(), "division by zero");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(MpIntError::AllocFailed.kind(), ErrorKind::Allocation);
        assert_eq!(MpIntError::LimbsTooLarge { nlimbs: 1 }.kind(), ErrorKind::Allocation);
        assert_eq!(MpIntError::InvalidDigits.kind(), ErrorKind::InvalidValue);
        assert_eq!(MpIntError::NegativeShift.kind(), ErrorKind::InvalidValue);
        assert_eq!(MpIntError::DoesNotFit.kind(), ErrorKind::Overflow);
        assert_eq!(MpIntError::NotInvertible.kind(), ErrorKind::Domain);
        assert_eq!(MpIntError::NegativeExponent.kind(), ErrorKind::Domain);
    }

    #[test]
    fn test_error_from_try_reserve() {
        let mut v = Vec::<u64>::new();
        let err = v.try_reserve(usize::MAX).unwrap_err();
        assert_eq!(MpIntError::from(err), MpIntError::AllocFailed);
    }
}
