//! Derive macro for blockpack records.

use proc_macro::TokenStream;
mod marshal;

/// Derive `Marshallable`.
///
/// Fields are written in declaration order with no framing. Enums write
/// their variant index first, as `u8` unless a `#[repr(uN)]` says otherwise.
/// The index is the variant's position in declaration order; explicit
/// discriminants (`A = 5`) do not change it.
///
/// Field attributes:
/// - `#[blockpack(skip)]` - not written; left untouched (structs) or
///   `Default::default()` (enum variants) when read.
/// - `#[blockpack(long)]` - `String` field with the 32-bit length prefix.
/// - `#[blockpack(nested)]` - field is itself `Marshallable` and is decoded
///   in place. In structs it needs no `Default`; inside enum variants the
///   variant is rebuilt on decode, so the field starts from
///   `Default::default()` and must implement it.
#[proc_macro_derive(Marshallable, attributes(blockpack))]
pub fn derive_marshallable(input: TokenStream) -> TokenStream {
    marshal::derive_marshallable(input)
}
