//! Marshallable derive macro implementation.

use super::{FieldMode, disc_capacity, field_mode, repr_int_type};
use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::{Data, DataEnum, DeriveInput, Fields, parse_macro_input};

/// Derive the `Marshallable` trait for a struct or enum.
pub fn derive_marshallable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let (marshal, unmarshal) = match &input.data {
        Data::Struct(data) => generate_struct(&data.fields)?,
        Data::Enum(data) => {
            let disc = repr_int_type(&input.attrs)
                .unwrap_or_else(|| syn::Ident::new("u8", Span::call_site()));
            let max_variants = disc_capacity(&disc.to_string());
            if data.variants.len() > max_variants {
                return Err(syn::Error::new_spanned(
                    input,
                    format!(
                        "enum has {} variants but discriminant type `{}` supports at most {}. \
                         Add #[repr(u16)], #[repr(u32)], etc. to increase capacity.",
                        data.variants.len(),
                        disc,
                        max_variants,
                    ),
                ));
            }
            generate_enum(data, &disc)?
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Marshallable derive is not supported for unions.",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics ::blockpack::Marshallable for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn marshal<__A: ::blockpack::BlockAllocator>(
                &self,
                pack: &mut ::blockpack::Pack<'_, __A>,
            ) -> ::blockpack::Result<()> {
                #marshal
                ::core::result::Result::Ok(())
            }

            #[allow(unused_variables)]
            fn unmarshal(
                &mut self,
                unpack: &mut ::blockpack::Unpack<'_>,
            ) -> ::blockpack::Result<()> {
                #unmarshal
                ::core::result::Result::Ok(())
            }
        }
    })
}

/// Write one field reachable through the reference expression `value`.
fn write_field(mode: FieldMode, value: &TokenStream2) -> TokenStream2 {
    match mode {
        FieldMode::Plain => quote! { ::blockpack::Encode::encode(#value, pack)?; },
        FieldMode::Long => quote! { pack.push_string32(#value)?; },
        FieldMode::Nested => quote! { ::blockpack::Marshallable::marshal(#value, pack)?; },
        FieldMode::Skip => quote! {},
    }
}

/// Expression producing a fresh value of type `ty` from the cursor.
fn read_value(mode: FieldMode, ty: &syn::Type) -> TokenStream2 {
    match mode {
        FieldMode::Plain => quote! { <#ty as ::blockpack::Decode>::decode(unpack)? },
        FieldMode::Long => quote! { unpack.pop_string32()? },
        FieldMode::Nested => quote! {
            {
                let mut value: #ty = ::core::default::Default::default();
                ::blockpack::Marshallable::unmarshal(&mut value, unpack)?;
                value
            }
        },
        FieldMode::Skip => quote! { ::core::default::Default::default() },
    }
}

// Structs decode in place, field by field.

fn generate_struct(fields: &Fields) -> syn::Result<(TokenStream2, TokenStream2)> {
    let mut writes = Vec::new();
    let mut reads = Vec::new();

    for (i, field) in fields.iter().enumerate() {
        let mode = field_mode(field)?;
        let member = match &field.ident {
            Some(ident) => quote! { #ident },
            None => {
                let index = syn::Index::from(i);
                quote! { #index }
            }
        };
        let ty = &field.ty;

        writes.push(write_field(mode, &quote! { &self.#member }));
        reads.push(match mode {
            FieldMode::Skip => quote! {},
            FieldMode::Nested => quote! {
                ::blockpack::Marshallable::unmarshal(&mut self.#member, unpack)?;
            },
            FieldMode::Plain | FieldMode::Long => {
                let value = read_value(mode, ty);
                quote! { self.#member = #value; }
            }
        });
    }

    Ok((quote! { #(#writes)* }, quote! { #(#reads)* }))
}

// Enums write the variant index, then the variant's fields.

fn generate_enum(data: &DataEnum, disc: &syn::Ident) -> syn::Result<(TokenStream2, TokenStream2)> {
    let mut write_arms = Vec::new();
    let mut read_arms = Vec::new();

    for (index, variant) in data.variants.iter().enumerate() {
        let variant_name = &variant.ident;
        let tag = syn::LitInt::new(&format!("{index}{disc}"), Span::call_site());

        let mut bindings = Vec::new();
        let mut writes = Vec::new();
        let mut values = Vec::new();
        for (i, field) in variant.fields.iter().enumerate() {
            let mode = field_mode(field)?;
            let binding = format_ident!("__field{}", i);
            writes.push(write_field(mode, &quote! { #binding }));
            values.push(read_value(mode, &field.ty));
            bindings.push(binding);
        }

        let (pattern, constructor) = match &variant.fields {
            Fields::Named(named) => {
                let names: Vec<_> = named.named.iter().map(|f| &f.ident).collect();
                (
                    quote! { Self::#variant_name { #(#names: #bindings),* } },
                    quote! { Self::#variant_name { #(#names: #values),* } },
                )
            }
            Fields::Unnamed(_) => (
                quote! { Self::#variant_name(#(#bindings),*) },
                quote! { Self::#variant_name(#(#values),*) },
            ),
            Fields::Unit => (
                quote! { Self::#variant_name },
                quote! { Self::#variant_name },
            ),
        };

        write_arms.push(quote! {
            #[allow(unused_variables)]
            #pattern => {
                ::blockpack::Encode::encode(&#tag, pack)?;
                #(#writes)*
            }
        });
        read_arms.push(quote! {
            #tag => #constructor,
        });
    }

    let marshal = quote! {
        match self {
            #(#write_arms)*
        }
    };
    let unmarshal = quote! {
        let tag = <#disc as ::blockpack::Decode>::decode(unpack)?;
        *self = match tag {
            #(#read_arms)*
            _ => {
                return ::core::result::Result::Err(
                    ::blockpack::Error::invalid_data("unknown enum discriminant"),
                );
            }
        };
    };

    Ok((marshal, unmarshal))
}
