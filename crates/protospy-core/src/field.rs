//! Header field narrowing.
//!
//! Integer parameters are carried as `i64` from the command line to the
//! encoder, so that a value too wide for its header field is reported when the
//! packet is serialized instead of being rejected by the argument parser.

use crate::{SenderError, SenderResult};

/// Converts `value` to the width of the header field named `field`.
pub fn narrow<T: TryFrom<i64>>(field: &'static str, value: i64) -> SenderResult<T> {
    T::try_from(value).map_err(|_| SenderError::FieldOutOfRange {
        field,
        value,
        bits: u8::BITS * std::mem::size_of::<T>() as u32,
    })
}
