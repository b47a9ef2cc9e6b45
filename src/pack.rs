//! Write cursor over a [`GrowableBuffer`].

use core::fmt;

use snafu::{OptionExt, ensure};

use crate::block::{BlockAllocator, HeapBlocks};
use crate::buffer::GrowableBuffer;
use crate::bytes::Encode;
use crate::error::{CapacityExceededSnafu, OversizeStringSnafu, Result};
use crate::wire;

/// Longest string the 16-bit length prefix can carry.
pub const MAX_STRING16: usize = u16::MAX as usize;

/// Longest string the 32-bit length prefix can carry.
pub const MAX_STRING32: usize = u32::MAX as usize;

/// Write head bound to a buffer it does not own.
///
/// The cursor's base is the buffer size at construction, so cursors opened
/// one after another stack without colliding. Every write returns the cursor
/// for chaining; the chain order is the wire order.
///
/// ```
/// use blockpack::{GrowableBuffer, Pack};
///
/// let mut buffer = GrowableBuffer::new();
/// let mut pack = Pack::new(&mut buffer);
///
/// let len_at = pack.position();
/// pack.push_u32(0)?;
/// pack.push_string("payload")?;
/// let len = (pack.position() - len_at - 4) as u32;
/// pack.replace_u32(len_at, len)?;
///
/// assert_eq!(&pack.data()[..4], &[0, 0, 0, 9]);
/// # Ok::<(), blockpack::Error>(())
/// ```
pub struct Pack<'a, A: BlockAllocator = HeapBlocks> {
    buffer: &'a mut GrowableBuffer<A>,
    base: usize,
}

impl<'a, A: BlockAllocator> Pack<'a, A> {
    /// Open a cursor at the current end of `buffer`.
    #[must_use]
    pub fn new(buffer: &'a mut GrowableBuffer<A>) -> Self {
        let base = buffer.size();
        Self { buffer, base }
    }

    /// Open a cursor `extra` bytes past the current end of `buffer`.
    ///
    /// The gap is zero-filled immediately.
    pub fn with_offset(buffer: &'a mut GrowableBuffer<A>, extra: usize) -> Result<Self> {
        let base = buffer
            .size()
            .checked_add(extra)
            .context(CapacityExceededSnafu {
                requested: usize::MAX,
                max_capacity: buffer.max_capacity(),
            })?;
        buffer.resize(base, 0)?;
        Ok(Self { buffer, base })
    }

    /// Bytes written through this cursor.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.buffer.data()[self.base..]
    }

    /// Number of bytes written through this cursor.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buffer.size() - self.base
    }

    /// Whether nothing has been written through this cursor.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Absolute buffer offset where this cursor started.
    #[inline]
    #[must_use]
    pub fn base(&self) -> usize {
        self.base
    }

    /// Absolute buffer offset of the next write.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.buffer.size()
    }

    /// The underlying buffer.
    #[inline]
    #[must_use]
    pub fn buffer(&self) -> &GrowableBuffer<A> {
        &*self.buffer
    }

    /// Append raw bytes.
    #[inline]
    pub fn push(&mut self, bytes: &[u8]) -> Result<&mut Self> {
        self.buffer.append(bytes)?;
        Ok(self)
    }

    /// Append a value through its [`Encode`] impl.
    ///
    /// All or nothing: if encoding fails partway, the bytes it already wrote
    /// are dropped again.
    pub fn write<T: Encode + ?Sized>(&mut self, value: &T) -> Result<&mut Self> {
        let start = self.buffer.size();
        if let Err(error) = value.encode(self) {
            self.buffer.truncate(start);
            return Err(error);
        }
        Ok(self)
    }

    /// Append a byte.
    #[inline]
    pub fn push_u8(&mut self, value: u8) -> Result<&mut Self> {
        self.push(&[value])
    }

    /// Append a big-endian `u16`.
    #[inline]
    pub fn push_u16(&mut self, value: u16) -> Result<&mut Self> {
        self.push(&wire::put_u16(value))
    }

    /// Append a big-endian `u32`.
    #[inline]
    pub fn push_u32(&mut self, value: u32) -> Result<&mut Self> {
        self.push(&wire::put_u32(value))
    }

    /// Append a big-endian `u64`.
    #[inline]
    pub fn push_u64(&mut self, value: u64) -> Result<&mut Self> {
        self.push(&wire::put_u64(value))
    }

    /// Append an `i8` as its bit pattern.
    #[inline]
    pub fn push_i8(&mut self, value: i8) -> Result<&mut Self> {
        self.push_u8(value as u8)
    }

    /// Append an `i16` as its big-endian bit pattern.
    #[inline]
    pub fn push_i16(&mut self, value: i16) -> Result<&mut Self> {
        self.push_u16(value as u16)
    }

    /// Append an `i32` as its big-endian bit pattern.
    #[inline]
    pub fn push_i32(&mut self, value: i32) -> Result<&mut Self> {
        self.push_u32(value as u32)
    }

    /// Append an `i64` as its big-endian bit pattern.
    #[inline]
    pub fn push_i64(&mut self, value: i64) -> Result<&mut Self> {
        self.push_u64(value as u64)
    }

    /// Append `1` for `true`, `0` for `false`.
    #[inline]
    pub fn push_bool(&mut self, value: bool) -> Result<&mut Self> {
        self.push_u8(u8::from(value))
    }

    /// Append the IEEE-754 bits of an `f32`.
    #[inline]
    pub fn push_f32(&mut self, value: f32) -> Result<&mut Self> {
        self.push_u32(value.to_bits())
    }

    /// Append the IEEE-754 bits of an `f64`.
    #[inline]
    pub fn push_f64(&mut self, value: f64) -> Result<&mut Self> {
        self.push_u64(value.to_bits())
    }

    /// Append a 16-bit length prefix followed by the bytes.
    pub fn push_string(&mut self, value: impl AsRef<[u8]>) -> Result<&mut Self> {
        let bytes = value.as_ref();
        let len = string_len(bytes, MAX_STRING16)?;
        self.push_prefixed(&wire::put_u16(len as u16), bytes)
    }

    /// Append a 32-bit length prefix followed by the bytes.
    pub fn push_string32(&mut self, value: impl AsRef<[u8]>) -> Result<&mut Self> {
        let bytes = value.as_ref();
        let len = string_len(bytes, MAX_STRING32)?;
        self.push_prefixed(&wire::put_u32(len as u32), bytes)
    }

    /// Overwrite bytes at absolute buffer offset `pos`.
    ///
    /// Backpatching should stay within bytes that were already written: an
    /// offset at or past the end appends instead.
    #[inline]
    pub fn replace(&mut self, pos: usize, bytes: &[u8]) -> Result<&mut Self> {
        self.buffer.replace(pos, bytes)?;
        Ok(self)
    }

    /// Overwrite a byte at `pos`.
    #[inline]
    pub fn replace_u8(&mut self, pos: usize, value: u8) -> Result<&mut Self> {
        self.replace(pos, &[value])
    }

    /// Overwrite a big-endian `u16` at `pos`.
    #[inline]
    pub fn replace_u16(&mut self, pos: usize, value: u16) -> Result<&mut Self> {
        self.replace(pos, &wire::put_u16(value))
    }

    /// Overwrite a big-endian `u32` at `pos`.
    #[inline]
    pub fn replace_u32(&mut self, pos: usize, value: u32) -> Result<&mut Self> {
        self.replace(pos, &wire::put_u32(value))
    }

    /// Overwrite a big-endian `u64` at `pos`.
    #[inline]
    pub fn replace_u64(&mut self, pos: usize, value: u64) -> Result<&mut Self> {
        self.replace(pos, &wire::put_u64(value))
    }

    /// Overwrite a 16-bit length-prefixed string at `pos`.
    pub fn replace_string(&mut self, pos: usize, value: impl AsRef<[u8]>) -> Result<&mut Self> {
        let bytes = value.as_ref();
        let len = string_len(bytes, MAX_STRING16)?;
        self.replace_prefixed(pos, &wire::put_u16(len as u16), bytes)
    }

    /// Overwrite a 32-bit length-prefixed string at `pos`.
    pub fn replace_string32(&mut self, pos: usize, value: impl AsRef<[u8]>) -> Result<&mut Self> {
        let bytes = value.as_ref();
        let len = string_len(bytes, MAX_STRING32)?;
        self.replace_prefixed(pos, &wire::put_u32(len as u32), bytes)
    }

    /// Append prefix and body, or neither.
    fn push_prefixed(&mut self, prefix: &[u8], body: &[u8]) -> Result<&mut Self> {
        let end = self
            .buffer
            .size()
            .saturating_add(prefix.len() + body.len());
        self.buffer.reserve(end)?;
        self.buffer.append(prefix)?;
        self.buffer.append(body)?;
        Ok(self)
    }

    /// Overwrite prefix then body at `pos`, or neither.
    fn replace_prefixed(&mut self, pos: usize, prefix: &[u8], body: &[u8]) -> Result<&mut Self> {
        let size = self.buffer.size();
        let written = prefix.len() + body.len();
        let end = if pos >= size {
            size.checked_add(written)
        } else {
            pos.checked_add(written).map(|end| end.max(size))
        };
        let end = end.context(CapacityExceededSnafu {
            requested: usize::MAX,
            max_capacity: self.buffer.max_capacity(),
        })?;
        self.buffer.reserve(end)?;
        self.buffer.replace(pos, prefix)?;
        self.buffer.replace(pos.saturating_add(prefix.len()), body)?;
        Ok(self)
    }
}

impl<A: BlockAllocator> fmt::Debug for Pack<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pack")
            .field("base", &self.base)
            .field("size", &self.size())
            .finish()
    }
}

fn string_len(bytes: &[u8], max: usize) -> Result<usize> {
    let len = bytes.len();
    ensure!(len <= max, OversizeStringSnafu { len, max });
    Ok(len)
}
