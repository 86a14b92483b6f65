//! Derive macro implementation for envi

use proc_macro::TokenStream;
use proc_macro2::Literal;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

mod attrs;

use attrs::{ContainerAttrs, FieldAttrs};

/// `Envi` derive macro
///
/// Implements `envi::Envi` for a struct with named fields: a table of field
/// descriptors in declaration order and an `assign` that converts a string into a
/// field by index.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[envi(prefix = "PREFIX_")]`: Add prefix to every non-empty key
///
/// **Field-level**:
/// - `#[envi(env = "KEY")]` or `#[envi(env = "KEY,required")]`: Variable and options
/// - `#[envi(default = "value")]`: Value used when the variable is unset
/// - `#[envi(separator = ":")]`: Separator for `Vec<T>` fields
/// - `#[envi(from_file)]`: Support `{KEY}_FILE` pattern
///
/// Field types that do not implement `envi::EnvValue` are described as opaque and
/// left untouched.
///
/// # Example
///
/// See the `envi` crate documentation for usage examples.
#[proc_macro_derive(Envi, attributes(envi))]
pub fn derive_envi(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let container = ContainerAttrs::from_input(input)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => return Ok(expand_impl(input, Vec::new(), Vec::new())),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Envi only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Envi only supports structs",
            ));
        }
    };

    let mut descriptors = Vec::with_capacity(fields.len());
    let mut assign_arms = Vec::with_capacity(fields.len());

    for (index, field) in fields.iter().enumerate() {
        let attrs = FieldAttrs::from_field(field)?;
        let field_ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
        let field_type = &field.ty;

        let name = field_ident.to_string();
        let tag = attrs.tag(container.prefix.as_deref());
        let default = attrs.default.unwrap_or_default();
        let separator = attrs.separator.unwrap_or_default();
        let from_file = attrs.from_file;
        let index = Literal::usize_unsuffixed(index);

        descriptors.push(quote! {
            ::envi::FieldDescriptor {
                name: #name,
                type_name: ::core::any::type_name::<#field_type>(),
                shape: (&::envi::__private::Probe::<#field_type>::new()).envi_shape(),
                tag: #tag,
                default: #default,
                separator: #separator,
                from_file: #from_file,
            }
        });

        assign_arms.push(quote! {
            #index => (&::envi::__private::Probe::<#field_type>::new())
                .envi_assign(&mut self.#field_ident, value, separator),
        });
    }

    Ok(expand_impl(input, descriptors, assign_arms))
}

fn expand_impl(
    input: &DeriveInput,
    descriptors: Vec<proc_macro2::TokenStream>,
    assign_arms: Vec<proc_macro2::TokenStream>,
) -> proc_macro2::TokenStream {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        impl #impl_generics ::envi::Envi for #struct_name #ty_generics #where_clause {
            fn descriptors() -> ::std::vec::Vec<::envi::FieldDescriptor> {
                #[allow(unused_imports)]
                use ::envi::__private::{FieldProbe as _, OpaqueProbe as _};

                ::std::vec![#(#descriptors),*]
            }

            #[allow(unused_variables)]
            fn assign(
                &mut self,
                index: usize,
                value: &str,
                separator: &str,
            ) -> ::core::result::Result<(), ::envi::Cause> {
                #[allow(unused_imports)]
                use ::envi::__private::{FieldProbe as _, OpaqueProbe as _};

                match index {
                    #(#assign_arms)*
                    _ => ::core::result::Result::Ok(()),
                }
            }
        }
    }
}
