//! Byte order of multi-byte values.

use serde::{Deserialize, Serialize};

/// Determines how multi-byte values are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ByteOrder {
    /// The first byte read is the least significant.
    Little,
    /// The first byte read is the most significant.
    Big,
}

macro_rules! byte_order_decoders {
    ($(($name:ident: $num:ident),)*) => {
        impl ByteOrder {
            $(
                #[doc = concat!("Decodes a `", stringify!($num), "` from bytes in this order.")]
                #[inline]
                pub fn $name(self, bytes: [u8; std::mem::size_of::<$num>()]) -> $num {
                    match self {
                        ByteOrder::Little => $num::from_le_bytes(bytes),
                        ByteOrder::Big => $num::from_be_bytes(bytes),
                    }
                }
            )*
        }
    };
}

byte_order_decoders! {
    (decode_u16: u16),
    (decode_u32: u32),
    (decode_u64: u64),
    (decode_i16: i16),
    (decode_i32: i32),
    (decode_i64: i64),
    (decode_f32: f32),
    (decode_f64: f64),
}
