//! Typed encoding and decoding on top of the cursors.
//!
//! # Traits
//!
//! - [`Encode`] - push a value through a [`Pack`](crate::Pack)
//! - [`Decode`] - pop a value from an [`Unpack`](crate::Unpack)
//!
//! Scalars use their fixed big-endian width, strings the 16-bit length
//! prefix, and sequences, sets and maps a 32-bit element count followed by
//! the elements in iteration order.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use blockpack::{Decode, Encode, GrowableBuffer, Pack, Unpack};
//!
//! let mut scores = BTreeMap::new();
//! scores.insert(String::from("ada"), 36u32);
//!
//! let mut buffer = GrowableBuffer::new();
//! let mut pack = Pack::new(&mut buffer);
//! scores.encode(&mut pack)?;
//!
//! let mut unpack = Unpack::new(pack.data());
//! let decoded = BTreeMap::<String, u32>::decode(&mut unpack)?;
//! unpack.finish()?;
//! assert_eq!(decoded, scores);
//! # Ok::<(), blockpack::Error>(())
//! ```

mod containers;
mod impls;
mod traits;

pub use containers::{decode_map_into, decode_seq_into, encode_map, encode_seq};
pub use traits::{Decode, Encode};
