//! Marshallable derive support.

mod derive;

pub use derive::derive_marshallable;

/// How a field travels on the wire.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum FieldMode {
    /// Through `Encode`/`Decode`.
    Plain,
    /// Not written.
    Skip,
    /// `String` with the 32-bit length prefix.
    Long,
    /// `Marshallable`, decoded in place.
    Nested,
}

/// Read the `#[blockpack(...)]` attributes of a field.
pub fn field_mode(field: &syn::Field) -> syn::Result<FieldMode> {
    let mut mode = FieldMode::Plain;
    for attr in &field.attrs {
        if !attr.path().is_ident("blockpack") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            let next = if meta.path.is_ident("skip") {
                FieldMode::Skip
            } else if meta.path.is_ident("long") {
                FieldMode::Long
            } else if meta.path.is_ident("nested") {
                FieldMode::Nested
            } else {
                return Err(meta.error("expected `skip`, `long` or `nested`"));
            };
            if mode != FieldMode::Plain && mode != next {
                return Err(meta.error("conflicting blockpack field attributes"));
            }
            mode = next;
            Ok(())
        })?;
    }
    Ok(mode)
}

/// Extract the discriminant type from `#[repr(uN)]` on an enum.
/// Returns `None` if no repr or a non-integer repr is used (defaults to u8).
pub fn repr_int_type(attrs: &[syn::Attribute]) -> Option<syn::Ident> {
    for attr in attrs {
        if !attr.path().is_ident("repr") {
            continue;
        }
        let mut found = None;
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(ident) = meta.path.get_ident() {
                if matches!(
                    ident.to_string().as_str(),
                    "u8" | "u16" | "u32" | "u64" | "i8" | "i16" | "i32" | "i64"
                ) {
                    found = Some(ident.clone());
                }
            }
            Ok(())
        });
        if found.is_some() {
            return found;
        }
    }
    None
}

/// Return the max number of variants a discriminant type can hold.
pub fn disc_capacity(disc_type: &str) -> usize {
    match disc_type {
        "u8" => 256,
        "i8" => 128,
        "u16" => 65536,
        "i16" => 32768,
        _ => usize::MAX,
    }
}
