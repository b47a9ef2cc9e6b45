//! A block-allocated growable byte buffer and a big-endian pack/unpack codec.
//!
//! # Buffer
//!
//! [`GrowableBuffer`] owns a contiguous region made of whole blocks handed out
//! by a [`BlockAllocator`]. Growth is rounded up to the next block and refused
//! once the configured block ceiling would be crossed.
//!
//! # Codec
//!
//! ```
//! use blockpack::{GrowableBuffer, Pack, Unpack};
//!
//! let mut buffer = GrowableBuffer::new();
//! let mut pack = Pack::new(&mut buffer);
//! pack.push_u16(1)?.push_string("ab")?.write(&vec![9u8, 8, 7])?;
//! assert_eq!(
//!     pack.data(),
//!     &[0, 1, 0, 2, b'a', b'b', 0, 0, 0, 3, 9, 8, 7][..]
//! );
//!
//! let bytes = pack.data().to_vec();
//! let mut unpack = Unpack::new(&bytes);
//! assert_eq!(unpack.pop_u16()?, 1);
//! assert_eq!(unpack.pop_str()?, "ab");
//! assert_eq!(unpack.read::<Vec<u8>>()?, [9, 8, 7]);
//! unpack.finish()?;
//! # Ok::<(), blockpack::Error>(())
//! ```
//!
//! There is no framing, tagging or schema on the wire: the reader must pop
//! exactly the type sequence the writer pushed.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod block;
mod buffer;
pub mod bytes;
mod error;
mod marshal;
mod pack;
mod unpack;
pub mod wire;

#[cfg(test)]
mod tests;

pub use block::{BlockAllocator, DEFAULT_BLOCK_SIZE, HeapBlocks};
pub use buffer::{
    DEFAULT_MAX_BLOCKS, GrowableBuffer, PACK_BLOCK_SIZE, PACK_MAX_BLOCKS, PackBuffer,
};
pub use bytes::{Decode, Encode, decode_map_into, decode_seq_into, encode_map, encode_seq};
pub use error::{Error, Result};
pub use marshal::{Marshallable, Void, bytes_to_object, object_to_bytes, try_bytes_to_object};
pub use pack::{MAX_STRING16, MAX_STRING32, Pack};
pub use unpack::Unpack;

#[cfg(feature = "derive")]
pub use blockpack_macros::Marshallable;
