//! Codec traits.

use crate::block::BlockAllocator;
use crate::error::Result;
use crate::pack::Pack;
use crate::unpack::Unpack;

/// Push a value onto a write cursor.
///
/// # Example
///
/// ```
/// use blockpack::{Encode, GrowableBuffer, Pack};
///
/// let mut buffer = GrowableBuffer::new();
/// let mut pack = Pack::new(&mut buffer);
/// 0x0102u16.encode(&mut pack)?;
/// assert_eq!(pack.data(), &[1, 2]);
/// # Ok::<(), blockpack::Error>(())
/// ```
pub trait Encode {
    /// Append the wire form of `self`.
    fn encode<A: BlockAllocator>(&self, pack: &mut Pack<'_, A>) -> Result<()>;
}

/// Pop an owned value from a read cursor.
///
/// # Example
///
/// ```
/// use blockpack::{Decode, Unpack};
///
/// let mut unpack = Unpack::new(&[1, 2]);
/// assert_eq!(u16::decode(&mut unpack)?, 0x0102);
/// # Ok::<(), blockpack::Error>(())
/// ```
pub trait Decode: Sized {
    /// Consume the wire form of a value.
    fn decode(unpack: &mut Unpack<'_>) -> Result<Self>;
}
