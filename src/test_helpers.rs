#![macro_use]

/// Parse a literal with automatic base detection, `0x`, `0o` and `0b` prefixes included.
macro_rules! tst_mk_mpint {
    ($s:expr) => {
        crate::MpInt::from_str_radix($s, 0).unwrap()
    };
}

