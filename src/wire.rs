//! Big-endian conversions for the fixed-width integers on the wire.
//!
//! The wire order is big-endian regardless of the host. Signed integers
//! travel as their two's-complement bit pattern, floats as their IEEE-754
//! bits.

use zerocopy::byteorder::{BigEndian, U16, U32, U64};

macro_rules! be_width {
    ($put:ident, $get:ident, $ty:ty, $be:ident, $n:literal) => {
        #[doc = concat!("Encode a `", stringify!($ty), "` in wire byte order.")]
        #[inline]
        #[must_use]
        pub fn $put(value: $ty) -> [u8; $n] {
            $be::<BigEndian>::new(value).to_bytes()
        }

        #[doc = concat!("Decode a `", stringify!($ty), "` from wire byte order.")]
        #[inline]
        #[must_use]
        pub fn $get(bytes: [u8; $n]) -> $ty {
            $be::<BigEndian>::from_bytes(bytes).get()
        }
    };
}

be_width!(put_u16, get_u16, u16, U16, 2);
be_width!(put_u32, get_u32, u32, U32, 4);
be_width!(put_u64, get_u64, u64, U64, 8);
