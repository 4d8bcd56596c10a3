// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Field, Fields, LitStr};

/// `#[derive(Record)]` macro: generates `Encode`, `Decode` and `Record`
///
/// Every named field is serialized in declaration order, private ones
/// included. Attributes:
/// - `#[record(name = "app::Point")]` on the struct fixes the canonical name
///   (default: `module_path!()::Ident`).
/// - `#[record(skip)]` on a field leaves it off the wire; it is rebuilt with
///   `Default::default()` when decoding.
///
/// Every serialized field type must implement `Encode` and `Decode`. Channel
/// ends (`Sender`, `Receiver`), `fn` pointers and raw pointers have no
/// `Decode` impl, so a record holding one fails to compile. Describe such
/// records with a runtime `TypeDescriptor` instead; encoding them then fails
/// with `UnsupportedKind`.
///
/// A record may refer to itself only through `Option<Box<Self>>`. Recursion
/// through a container (`children: Vec<Self>`, map values, arrays) compiles,
/// but the container's element marker is a zero record that holds another
/// empty container of the same type, so `marshal` fails with
/// `DepthLimitExceeded`.
///
/// Example:
/// ```ignore
/// use tagser::Record;
///
/// #[derive(Record)]
/// #[record(name = "telemetry::Frame")]
/// struct Frame {
///     seq: u64,
///     payload: Vec<u8>,
///     #[record(skip)]
///     scratch: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Record cannot be derived for generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(f) => &f.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Only structs with named fields are supported",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Only structs are supported",
            ))
        }
    };

    let type_name = match record_name(&input.attrs)? {
        Some(lit) => quote! { #lit },
        None => {
            let ident = name.unraw().to_string();
            quote! { ::core::concat!(::core::module_path!(), "::", #ident) }
        }
    };

    let mut wire_fields: Vec<&Field> = Vec::new();
    let mut skipped: Vec<&Field> = Vec::new();
    for field in fields {
        if is_skipped(&field.attrs)? {
            skipped.push(field);
        } else {
            wire_fields.push(field);
        }
    }

    let wire_idents: Vec<_> = wire_fields.iter().filter_map(|f| f.ident.as_ref()).collect();
    let wire_names: Vec<String> = wire_idents.iter().map(|i| i.unraw().to_string()).collect();
    let wire_types: Vec<_> = wire_fields.iter().map(|f| &f.ty).collect();
    let skipped_idents: Vec<_> = skipped.iter().filter_map(|f| f.ident.as_ref()).collect();
    let bindings: Vec<_> = (0..wire_idents.len())
        .map(|i| format_ident!("__field{}", i))
        .collect();
    let count = wire_idents.len();

    Ok(quote! {
        impl ::tagser::Encode for #name {
            fn shape() -> ::tagser::Shape {
                ::tagser::Shape::Record(<Self as ::tagser::Record>::TYPE_NAME.into())
            }

            fn to_value(&self) -> ::tagser::Value {
                static DESCRIPTOR: ::tagser::__private::OnceLock<
                    ::tagser::__private::Arc<::tagser::TypeDescriptor>,
                > = ::tagser::__private::OnceLock::new();
                let descriptor = DESCRIPTOR
                    .get_or_init(|| {
                        ::tagser::__private::Arc::new(<Self as ::tagser::Record>::descriptor())
                    })
                    .clone();
                ::tagser::Value::Record(::tagser::RecordValue::new(
                    descriptor,
                    ::std::vec![#(::tagser::Encode::to_value(&self.#wire_idents)),*],
                ))
            }
        }

        impl ::tagser::Decode for #name {
            fn from_value(value: ::tagser::Value) -> ::tagser::Result<Self> {
                let [#(#bindings),*] = ::tagser::__private::record_fields::<#count>(
                    value,
                    <Self as ::tagser::Record>::TYPE_NAME,
                )?;
                ::core::result::Result::Ok(Self {
                    #(#wire_idents: ::tagser::Decode::from_value(#bindings)?,)*
                    #(#skipped_idents: ::core::default::Default::default(),)*
                })
            }
        }

        impl ::tagser::Record for #name {
            const TYPE_NAME: &'static str = #type_name;

            fn descriptor() -> ::tagser::TypeDescriptor {
                ::tagser::TypeDescriptor::new(
                    <Self as ::tagser::Record>::TYPE_NAME,
                    ::std::vec![#(
                        ::tagser::FieldDescriptor::new(
                            #wire_names,
                            <#wire_types as ::tagser::Encode>::shape(),
                        )
                    ),*],
                )
            }
        }

        impl ::tagser::RegisterSample for #name {
            const POINTER: bool = false;

            fn descriptor() -> ::tagser::TypeDescriptor {
                <Self as ::tagser::Record>::descriptor()
            }
        }
    })
}

/// `#[record(name = "...")]` on the struct.
fn record_name(attrs: &[Attribute]) -> syn::Result<Option<LitStr>> {
    let mut name = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                if lit.value().is_empty() {
                    return Err(syn::Error::new_spanned(&lit, "record name cannot be empty"));
                }
                name = Some(lit);
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"`"))
            }
        })?;
    }
    Ok(name)
}

/// `#[record(skip)]` on a field.
fn is_skipped(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut skip = false;
    for attr in attrs.iter().filter(|a| a.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("expected `skip`"))
            }
        })?;
    }
    Ok(skip)
}
