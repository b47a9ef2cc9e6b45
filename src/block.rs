//! Block allocation strategy used by [`GrowableBuffer`](crate::GrowableBuffer).

use alloc::boxed::Box;
use alloc::vec::Vec;

/// Default block size in bytes.
pub const DEFAULT_BLOCK_SIZE: usize = 4 * 1024;

/// Supplies and releases memory in whole, fixed-size blocks.
///
/// `allocate(n)` must return a region of exactly `n * block_size()` bytes,
/// or `None` when the memory is not available. The buffer never aborts on
/// refusal; it reports [`Error::AllocationFailed`](crate::Error) instead.
pub trait BlockAllocator {
    /// Size of one block in bytes. Must be non-zero and constant.
    fn block_size(&self) -> usize;

    /// Allocate a region of `blocks` contiguous blocks.
    fn allocate(&self, blocks: usize) -> Option<Box<[u8]>>;

    /// Return a region previously handed out by [`allocate`](Self::allocate).
    #[inline]
    fn release(&self, region: Box<[u8]>, blocks: usize) {
        let _ = blocks;
        drop(region);
    }
}

/// Heap-backed block allocator.
///
/// Regions are zero-initialised and obtained through fallible reservation,
/// so running out of memory surfaces as a refusal rather than an abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapBlocks {
    block_size: usize,
}

impl HeapBlocks {
    /// Create an allocator handing out blocks of `block_size` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `block_size` is zero.
    #[must_use]
    pub const fn new(block_size: usize) -> Self {
        assert!(block_size > 0, "block size must be > 0");
        Self { block_size }
    }

    /// Create an allocator handing out blocks of `kib` KiB.
    #[must_use]
    pub const fn kib(kib: usize) -> Self {
        Self::new(kib * 1024)
    }
}

impl Default for HeapBlocks {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_SIZE)
    }
}

impl BlockAllocator for HeapBlocks {
    #[inline]
    fn block_size(&self) -> usize {
        self.block_size
    }

    fn allocate(&self, blocks: usize) -> Option<Box<[u8]>> {
        let len = blocks.checked_mul(self.block_size)?;
        let mut region = Vec::new();
        region.try_reserve_exact(len).ok()?;
        region.resize(len, 0);
        Some(region.into_boxed_slice())
    }
}

impl<T: BlockAllocator + ?Sized> BlockAllocator for Box<T> {
    #[inline]
    fn block_size(&self) -> usize {
        (**self).block_size()
    }

    #[inline]
    fn allocate(&self, blocks: usize) -> Option<Box<[u8]>> {
        (**self).allocate(blocks)
    }

    #[inline]
    fn release(&self, region: Box<[u8]>, blocks: usize) {
        (**self).release(region, blocks);
    }
}
