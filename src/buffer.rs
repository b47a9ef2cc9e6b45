//! Growable byte buffer built from whole blocks.

use alloc::boxed::Box;
use core::fmt;
use core::mem;

use snafu::OptionExt;

use crate::block::{BlockAllocator, HeapBlocks};
use crate::error::{AllocationFailedSnafu, CapacityExceededSnafu, Result};

/// Default block ceiling of a [`GrowableBuffer`].
pub const DEFAULT_MAX_BLOCKS: usize = 1024;

/// Block size used by [`GrowableBuffer::for_pack`].
pub const PACK_BLOCK_SIZE: usize = 4 * 1024;

/// Block ceiling used by [`GrowableBuffer::for_pack`]: 1 GiB of 4 KiB blocks.
pub const PACK_MAX_BLOCKS: usize = 256 * 1024;

/// Buffer type the encoder writes into.
pub type PackBuffer = GrowableBuffer<HeapBlocks>;

/// Contiguous byte region made of whole blocks.
///
/// Invariants: `size <= block_count * block_size` and
/// `block_count <= max_blocks`. A failed operation leaves size and content
/// exactly as they were.
pub struct GrowableBuffer<A: BlockAllocator = HeapBlocks> {
    allocator: A,
    region: Box<[u8]>,
    size: usize,
    blocks: usize,
    max_blocks: usize,
}

impl GrowableBuffer<HeapBlocks> {
    /// Create an empty buffer with 4 KiB blocks and the default ceiling.
    #[must_use]
    pub fn new() -> Self {
        Self::with_allocator(HeapBlocks::default(), DEFAULT_MAX_BLOCKS)
    }

    /// Create an empty buffer with 4 KiB blocks and a custom ceiling.
    #[must_use]
    pub fn with_max_blocks(max_blocks: usize) -> Self {
        Self::with_allocator(HeapBlocks::default(), max_blocks)
    }

    /// Create the buffer used for whole-object encoding.
    #[must_use]
    pub fn for_pack() -> Self {
        Self::with_allocator(HeapBlocks::new(PACK_BLOCK_SIZE), PACK_MAX_BLOCKS)
    }
}

impl Default for GrowableBuffer<HeapBlocks> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: BlockAllocator> GrowableBuffer<A> {
    /// Create an empty buffer over a custom allocator.
    ///
    /// No memory is requested until the first growth.
    #[must_use]
    pub fn with_allocator(allocator: A, max_blocks: usize) -> Self {
        Self {
            allocator,
            region: Box::default(),
            size: 0,
            blocks: 0,
            max_blocks,
        }
    }

    /// Bytes in use.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.region[..self.size]
    }

    /// Bytes in use, mutably.
    #[inline]
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.region[..self.size]
    }

    /// Logical size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Alias of [`size`](Self::size).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether no bytes are in use.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of blocks currently owned.
    #[inline]
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks
    }

    /// Size of one block in bytes.
    #[inline]
    #[must_use]
    pub fn block_size(&self) -> usize {
        self.allocator.block_size()
    }

    /// Largest block count this buffer may own.
    #[inline]
    #[must_use]
    pub fn max_blocks(&self) -> usize {
        self.max_blocks
    }

    /// Allocated bytes: `block_count * block_size`.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.region.len()
    }

    /// Ceiling in bytes: `max_blocks * block_size`.
    #[inline]
    #[must_use]
    pub fn max_capacity(&self) -> usize {
        self.max_blocks.saturating_mul(self.block_size())
    }

    /// Allocated but unused bytes.
    #[inline]
    #[must_use]
    pub fn free_capacity(&self) -> usize {
        self.capacity() - self.size
    }

    /// Bytes that could still be written before hitting the ceiling.
    #[inline]
    #[must_use]
    pub fn max_free(&self) -> usize {
        self.max_capacity().saturating_sub(self.size)
    }

    /// The allocator backing this buffer.
    #[inline]
    #[must_use]
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Ensure capacity is at least `capacity` bytes. Size is unchanged.
    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        self.grow(capacity - self.capacity())
    }

    /// Set the logical size to `size`.
    ///
    /// Newly exposed bytes are set to `fill`. Shrinking leaves the bytes past
    /// `size` untouched.
    pub fn resize(&mut self, size: usize, fill: u8) -> Result<()> {
        if size > self.size {
            let increase = size - self.size;
            if increase > self.free_capacity() {
                self.grow(increase - self.free_capacity())?;
            }
            self.region[self.size..size].fill(fill);
        }
        self.size = size;
        Ok(())
    }

    /// Shorten the logical size to `size`. Does nothing if `size` is not
    /// smaller than the current size. Blocks are kept.
    #[inline]
    pub fn truncate(&mut self, size: usize) {
        self.size = self.size.min(size);
    }

    /// Copy `data` to the tail.
    pub fn append(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        if data.len() > self.free_capacity() {
            self.grow(data.len() - self.free_capacity())?;
        }
        let end = self.size + data.len();
        self.region[self.size..end].copy_from_slice(data);
        self.size = end;
        Ok(())
    }

    /// Overwrite bytes starting at `pos`.
    ///
    /// A `pos` at or past the end appends at the current end. A range that
    /// runs past the end extends the buffer first.
    pub fn replace(&mut self, pos: usize, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        if pos >= self.size {
            return self.append(data);
        }
        let end = pos
            .checked_add(data.len())
            .context(CapacityExceededSnafu {
                requested: usize::MAX,
                max_capacity: self.max_capacity(),
            })?;
        if end > self.size {
            self.resize(end, 0)?;
        }
        self.region[pos..end].copy_from_slice(data);
        Ok(())
    }

    /// Remove `len` bytes at `pos`, or everything from `pos` when `len` is
    /// `None`. Bytes after the range move down.
    ///
    /// When the buffer ends up empty and `free_if_empty` is set, all blocks
    /// go back to the allocator.
    pub fn erase(&mut self, pos: usize, len: Option<usize>, free_if_empty: bool) {
        if len == Some(0) || pos >= self.size {
            return;
        }
        match len.and_then(|len| pos.checked_add(len)) {
            Some(end) if end < self.size => {
                self.region.copy_within(end..self.size, pos);
                self.size -= end - pos;
            }
            _ => self.size = pos,
        }
        if self.size == 0 && free_if_empty {
            self.free();
        }
    }

    /// Release every block back to the allocator.
    pub fn free(&mut self) {
        if self.blocks > 0 {
            let region = mem::take(&mut self.region);
            tracing::trace!(blocks = self.blocks, "releasing buffer blocks");
            self.allocator.release(region, self.blocks);
        }
        self.size = 0;
        self.blocks = 0;
    }

    /// Add at least `extra` bytes of capacity, rounded up to whole blocks.
    fn grow(&mut self, extra: usize) -> Result<()> {
        if extra == 0 {
            return Ok(());
        }
        let block_size = self.block_size();
        let wanted = self.blocks.checked_add(extra.div_ceil(block_size));
        let Some(blocks) = wanted.filter(|&blocks| blocks <= self.max_blocks) else {
            tracing::debug!(
                capacity = self.capacity(),
                extra,
                max_blocks = self.max_blocks,
                "buffer growth refused at block ceiling"
            );
            return CapacityExceededSnafu {
                requested: self.capacity().saturating_add(extra),
                max_capacity: self.max_capacity(),
            }
            .fail();
        };

        let region = self.allocator.allocate(blocks);
        let expected = blocks.checked_mul(block_size);
        let Some(mut region) = region.filter(|r| Some(r.len()) == expected) else {
            tracing::debug!(blocks, block_size, "block allocator refused growth");
            return AllocationFailedSnafu { blocks }.fail();
        };
        region[..self.size].copy_from_slice(&self.region[..self.size]);
        let old = mem::replace(&mut self.region, region);
        if self.blocks > 0 {
            self.allocator.release(old, self.blocks);
        }
        tracing::trace!(from = self.blocks, to = blocks, "buffer grew");
        self.blocks = blocks;
        Ok(())
    }
}

impl<A: BlockAllocator> Drop for GrowableBuffer<A> {
    fn drop(&mut self) {
        self.free();
    }
}

impl<A: BlockAllocator> fmt::Debug for GrowableBuffer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrowableBuffer")
            .field("size", &self.size)
            .field("block_count", &self.blocks)
            .field("block_size", &self.block_size())
            .field("max_blocks", &self.max_blocks)
            .finish()
    }
}
