//! Bounds-checked read cursor over a borrowed byte span.

use alloc::string::String;
use alloc::vec::Vec;

use snafu::ensure;

use crate::bytes::Decode;
use crate::error::{InvalidUtf8Snafu, Result, ShortReadSnafu, TrailingDataSnafu};
use crate::marshal::Marshallable;
use crate::wire;

/// Read head over bytes it does not own.
///
/// Only the cursor position is mutable; the span is never written. A pop
/// that needs more bytes than remain fails with
/// [`Error::ShortRead`](crate::Error::ShortRead) and reads nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unpack<'a> {
    data: &'a [u8],
}

impl<'a> Unpack<'a> {
    /// Create a cursor at the start of `data`.
    #[inline]
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Point the cursor at a new span.
    #[inline]
    pub fn reset(&mut self, data: &'a [u8]) {
        self.data = data;
    }

    /// Bytes not yet consumed.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Number of bytes not yet consumed.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len()
    }

    /// Whether every byte has been consumed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Succeed only if no bytes remain.
    ///
    /// Call after decoding a complete record to catch length mismatches.
    pub fn finish(&self) -> Result<()> {
        ensure!(
            self.data.is_empty(),
            TrailingDataSnafu {
                remaining: self.data.len()
            }
        );
        Ok(())
    }

    /// Take the next `len` bytes, or only look at them when `peek` is set.
    pub fn fetch(&mut self, len: usize, peek: bool) -> Result<&'a [u8]> {
        ensure!(
            len <= self.data.len(),
            ShortReadSnafu {
                needed: len,
                available: self.data.len()
            }
        );
        let (head, tail) = self.data.split_at(len);
        if !peek {
            self.data = tail;
        }
        Ok(head)
    }

    fn fetch_array<const N: usize>(&mut self, peek: bool) -> Result<[u8; N]> {
        let Some((head, tail)) = self.data.split_first_chunk::<N>() else {
            return ShortReadSnafu {
                needed: N,
                available: self.data.len(),
            }
            .fail();
        };
        if !peek {
            self.data = tail;
        }
        Ok(*head)
    }

    /// Decode a value through its [`Decode`] impl.
    #[inline]
    pub fn read<T: Decode>(&mut self) -> Result<T> {
        T::decode(self)
    }

    /// Decode a record in place.
    #[inline]
    pub fn read_into<T: Marshallable + ?Sized>(&mut self, record: &mut T) -> Result<&mut Self> {
        record.unmarshal(self)?;
        Ok(self)
    }

    /// Pop a byte.
    #[inline]
    pub fn pop_u8(&mut self) -> Result<u8> {
        self.fetch_array::<1>(false).map(|[b]| b)
    }

    /// Look at the next byte without consuming it.
    #[inline]
    pub fn peek_u8(&mut self) -> Result<u8> {
        self.fetch_array::<1>(true).map(|[b]| b)
    }

    /// Pop a big-endian `u16`.
    #[inline]
    pub fn pop_u16(&mut self) -> Result<u16> {
        self.fetch_array(false).map(wire::get_u16)
    }

    /// Look at the next big-endian `u16` without consuming it.
    #[inline]
    pub fn peek_u16(&mut self) -> Result<u16> {
        self.fetch_array(true).map(wire::get_u16)
    }

    /// Pop a big-endian `u32`.
    #[inline]
    pub fn pop_u32(&mut self) -> Result<u32> {
        self.fetch_array(false).map(wire::get_u32)
    }

    /// Look at the next big-endian `u32` without consuming it.
    #[inline]
    pub fn peek_u32(&mut self) -> Result<u32> {
        self.fetch_array(true).map(wire::get_u32)
    }

    /// Pop a big-endian `u64`.
    #[inline]
    pub fn pop_u64(&mut self) -> Result<u64> {
        self.fetch_array(false).map(wire::get_u64)
    }

    /// Look at the next big-endian `u64` without consuming it.
    #[inline]
    pub fn peek_u64(&mut self) -> Result<u64> {
        self.fetch_array(true).map(wire::get_u64)
    }

    /// Pop an `i8` from its bit pattern.
    #[inline]
    pub fn pop_i8(&mut self) -> Result<i8> {
        self.pop_u8().map(|v| v as i8)
    }

    /// Pop an `i16` from its big-endian bit pattern.
    #[inline]
    pub fn pop_i16(&mut self) -> Result<i16> {
        self.pop_u16().map(|v| v as i16)
    }

    /// Pop an `i32` from its big-endian bit pattern.
    #[inline]
    pub fn pop_i32(&mut self) -> Result<i32> {
        self.pop_u32().map(|v| v as i32)
    }

    /// Pop an `i64` from its big-endian bit pattern.
    #[inline]
    pub fn pop_i64(&mut self) -> Result<i64> {
        self.pop_u64().map(|v| v as i64)
    }

    /// Pop a boolean. Any non-zero byte is `true`.
    #[inline]
    pub fn pop_bool(&mut self) -> Result<bool> {
        self.pop_u8().map(|v| v != 0)
    }

    /// Pop an `f32` from its IEEE-754 bits.
    #[inline]
    pub fn pop_f32(&mut self) -> Result<f32> {
        self.pop_u32().map(f32::from_bits)
    }

    /// Pop an `f64` from its IEEE-754 bits.
    #[inline]
    pub fn pop_f64(&mut self) -> Result<f64> {
        self.pop_u64().map(f64::from_bits)
    }

    /// Pop a 16-bit length-prefixed byte string without copying.
    pub fn pop_bytes16(&mut self) -> Result<&'a [u8]> {
        let mut probe = *self;
        let len = probe.pop_u16()?;
        let body = probe.fetch(usize::from(len), false)?;
        *self = probe;
        Ok(body)
    }

    /// Pop a 32-bit length-prefixed byte string without copying.
    pub fn pop_bytes32(&mut self) -> Result<&'a [u8]> {
        let mut probe = *self;
        let len = probe.pop_u32()?;
        let body = probe.fetch(len as usize, false)?;
        *self = probe;
        Ok(body)
    }

    /// Pop a 16-bit length-prefixed UTF-8 string without copying.
    pub fn pop_str(&mut self) -> Result<&'a str> {
        self.pop_bytes16().and_then(utf8)
    }

    /// Pop a 32-bit length-prefixed UTF-8 string without copying.
    pub fn pop_str32(&mut self) -> Result<&'a str> {
        self.pop_bytes32().and_then(utf8)
    }

    /// Pop a 16-bit length-prefixed UTF-8 string into an owned copy.
    pub fn pop_string(&mut self) -> Result<String> {
        self.pop_str().map(String::from)
    }

    /// Pop a 32-bit length-prefixed UTF-8 string into an owned copy.
    pub fn pop_string32(&mut self) -> Result<String> {
        self.pop_str32().map(String::from)
    }

    /// Pop a 16-bit length-prefixed byte string into an owned copy.
    pub fn pop_vec16(&mut self) -> Result<Vec<u8>> {
        self.pop_bytes16().map(<[u8]>::to_vec)
    }

    /// Pop a 32-bit length-prefixed byte string into an owned copy.
    pub fn pop_vec32(&mut self) -> Result<Vec<u8>> {
        self.pop_bytes32().map(<[u8]>::to_vec)
    }
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    core::str::from_utf8(bytes).map_err(|e| {
        InvalidUtf8Snafu {
            valid_up_to: e.valid_up_to(),
        }
        .build()
    })
}
