//! Error types for buffer growth, packing and unpacking.

use snafu::Snafu;

/// Error raised by the buffer, the cursors or the codec layer.
///
/// Write-side failures leave the buffer exactly as it was before the call.
/// Read-side failures invalidate the whole in-progress decode.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum Error {
    /// Growth would push the block count past the configured maximum.
    #[snafu(display(
        "capacity exceeded: {requested} bytes requested, maximum capacity is {max_capacity}"
    ))]
    CapacityExceeded {
        /// Capacity that the operation needed.
        requested: usize,
        /// Configured ceiling in bytes.
        max_capacity: usize,
    },

    /// The block allocator refused to hand out memory.
    #[snafu(display("block allocator refused {blocks} blocks"))]
    AllocationFailed {
        /// Total block count that was requested.
        blocks: usize,
    },

    /// A string does not fit the chosen length prefix.
    #[snafu(display("string of {len} bytes exceeds the {max} byte limit of its length prefix"))]
    OversizeString {
        /// Byte length of the string.
        len: usize,
        /// Largest length the prefix can carry.
        max: usize,
    },

    /// A container holds more elements than a 32-bit count can carry.
    #[snafu(display("container of {len} elements exceeds the 32-bit element count"))]
    OversizeCount {
        /// Element count of the container.
        len: usize,
    },

    /// A read needs more bytes than remain.
    #[snafu(display("short read: needed {needed} bytes, only {available} available"))]
    ShortRead {
        /// Bytes needed.
        needed: usize,
        /// Bytes remaining.
        available: usize,
    },

    /// `finish` found unconsumed bytes.
    #[snafu(display("trailing data: {remaining} bytes left unconsumed"))]
    TrailingData {
        /// Bytes left over.
        remaining: usize,
    },

    /// A string field is not valid UTF-8.
    #[snafu(display("invalid UTF-8 after {valid_up_to} bytes"))]
    InvalidUtf8 {
        /// Length of the valid prefix.
        valid_up_to: usize,
    },

    /// A decoded value is out of range for its type.
    #[snafu(display("invalid data: {message}"))]
    InvalidData {
        /// Error description.
        message: &'static str,
    },
}

impl Error {
    /// Build an [`Error::InvalidData`] for decoders written outside this crate.
    #[must_use]
    pub fn invalid_data(message: &'static str) -> Self {
        Self::InvalidData { message }
    }

    /// Whether the error was raised while encoding.
    #[must_use]
    pub fn is_write_side(&self) -> bool {
        matches!(
            self,
            Self::CapacityExceeded { .. }
                | Self::AllocationFailed { .. }
                | Self::OversizeString { .. }
                | Self::OversizeCount { .. }
        )
    }

    /// Whether the error means the input bytes were malformed.
    #[must_use]
    pub fn is_read_side(&self) -> bool {
        !self.is_write_side()
    }
}

/// Result type for blockpack operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;
