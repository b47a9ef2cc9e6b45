//! User-defined records and whole-object round trips.

use alloc::vec::Vec;

use crate::block::BlockAllocator;
use crate::buffer::PackBuffer;
use crate::bytes::{Decode, Encode};
use crate::error::Result;
use crate::pack::Pack;
use crate::unpack::Unpack;

/// A record that encodes and decodes itself through the cursors.
///
/// The codec adds no framing around a record: `unmarshal` must consume
/// exactly what `marshal` produced, in the same order.
///
/// Every `Marshallable` is also [`Encode`], and every `Marshallable +
/// Default` is [`Decode`], so records nest inside containers and other
/// records.
///
/// # Example
///
/// ```
/// use blockpack::{BlockAllocator, Marshallable, Pack, Result, Unpack};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Login {
///     uid: u32,
///     name: String,
/// }
///
/// impl Marshallable for Login {
///     fn marshal<A: BlockAllocator>(&self, pack: &mut Pack<'_, A>) -> Result<()> {
///         pack.push_u32(self.uid)?.push_string(&self.name)?;
///         Ok(())
///     }
///
///     fn unmarshal(&mut self, unpack: &mut Unpack<'_>) -> Result<()> {
///         self.uid = unpack.pop_u32()?;
///         self.name = unpack.pop_string()?;
///         Ok(())
///     }
/// }
///
/// let login = Login { uid: 7, name: "ada".into() };
/// let bytes = blockpack::object_to_bytes(&login)?;
///
/// let mut decoded = Login::default();
/// assert!(blockpack::bytes_to_object(&bytes, &mut decoded));
/// assert_eq!(decoded, login);
/// # Ok::<(), blockpack::Error>(())
/// ```
pub trait Marshallable {
    /// Encode `self` onto the write cursor.
    fn marshal<A: BlockAllocator>(&self, pack: &mut Pack<'_, A>) -> Result<()>;

    /// Decode into `self` from the read cursor.
    ///
    /// On error `self` may be partially overwritten and must not be trusted.
    fn unmarshal(&mut self, unpack: &mut Unpack<'_>) -> Result<()>;
}

impl<T: Marshallable> Encode for T {
    #[inline]
    fn encode<A: BlockAllocator>(&self, pack: &mut Pack<'_, A>) -> Result<()> {
        self.marshal(pack)
    }
}

impl<T: Marshallable + Default> Decode for T {
    #[inline]
    fn decode(unpack: &mut Unpack<'_>) -> Result<Self> {
        let mut record = T::default();
        record.unmarshal(unpack)?;
        Ok(record)
    }
}

/// The empty record.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Void;

impl Marshallable for Void {
    #[inline]
    fn marshal<A: BlockAllocator>(&self, _pack: &mut Pack<'_, A>) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn unmarshal(&mut self, _unpack: &mut Unpack<'_>) -> Result<()> {
        Ok(())
    }
}

/// Encode a record into a fresh buffer and return the bytes.
pub fn object_to_bytes<T: Marshallable + ?Sized>(record: &T) -> Result<Vec<u8>> {
    let mut buffer = PackBuffer::for_pack();
    let mut pack = Pack::new(&mut buffer);
    record.marshal(&mut pack)?;
    Ok(pack.data().to_vec())
}

/// Decode a record from `bytes`, reporting only success or failure.
///
/// Trailing bytes after the record are ignored; use
/// [`try_bytes_to_object`] to reject them and see the failure kind.
pub fn bytes_to_object<T: Marshallable + ?Sized>(bytes: &[u8], record: &mut T) -> bool {
    let mut unpack = Unpack::new(bytes);
    match record.unmarshal(&mut unpack) {
        Ok(()) => true,
        Err(error) => {
            tracing::debug!(%error, len = bytes.len(), "record decode failed");
            false
        }
    }
}

/// Decode a record from `bytes`, which must be consumed exactly.
pub fn try_bytes_to_object<T: Marshallable + ?Sized>(bytes: &[u8], record: &mut T) -> Result<()> {
    let mut unpack = Unpack::new(bytes);
    record.unmarshal(&mut unpack)?;
    unpack.finish()
}
