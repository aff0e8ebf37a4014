//! Arbitrary precision signed integer arithmetic.
//!
//! [`MpInt`] stores a sign together with a normalized magnitude of [`LimbType`] limbs. Every
//! operation which might need to allocate returns a [`Result`], with oversized requests and
//! allocator exhaustion both reported as [`MpIntError`] rather than aborting.

#[cfg(test)]
mod test_helpers;

mod add_impl;
mod bitwise_impl;
mod bytes_impl;
mod cmp_impl;
mod div_impl;
mod error;
mod euclid_impl;
mod fac_impl;
mod float_impl;
mod invmod_impl;
mod lcm_impl;
mod limb;
mod limbs_buffer;
mod montgomery_impl;
mod mpint;
mod mul_impl;
mod native_impl;
mod pow_impl;
mod shift_impl;
mod sqrt_impl;
mod str_impl;

pub use error::{ErrorKind, MpIntError};

pub use limb::{LimbChoice, LimbType, LIMB_BITS};

pub use limbs_buffer::{nlimbs_for_bits, LimbsBuffer, MAX_LIMBS};

pub use mpint::{abs_mp, copy_mp, neg_mp, MpInt};

pub use add_impl::{add_mp_mp, ct_add_mp_l, ct_add_mp_mp, ct_sub_mp_l, ct_sub_mp_mp, sub_mp_mp};

pub use bitwise_impl::{and_mp_mp, not_mp, or_mp_mp, xor_mp_mp};

pub use cmp_impl::{cmp_mag_mp_mp, cmp_mp_mp};

pub use div_impl::{
    div_mp_l, divmod_mp_mp, divmod_near_mp_mp, quo_mp_mp, rem_mp_mp, tdivmod_mp_mp,
};

pub use euclid_impl::{gcd_mp_mp, gcdext_mp_mp};

pub use fac_impl::{double_fac_mp, fac_mp, fib_mp};

pub use float_impl::truediv_mp_mp;

pub use invmod_impl::inverse_mp_mp;

pub use lcm_impl::lcm_mp_mp;

pub use mul_impl::{mul_mp_l, mul_mp_mp};

pub use pow_impl::{pow_mp_mp, powm_mp_mp_mp};

pub use shift_impl::{lshift_mp, lshift_mp_mp, rshift_mp, rshift_mp_mp};

pub use sqrt_impl::sqrtrem_mp;

pub use str_impl::ToStrOptions;
