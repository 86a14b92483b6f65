//! Attribute parsing for `#[envi(...)]` annotations.
//!
//! This module extracts and validates binding attributes from the struct and its
//! fields during macro expansion.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, DeriveInput, Field, LitStr};

/// Parsed struct-level `#[envi(...)]` attributes.
#[derive(Debug, Default)]
pub struct ContainerAttrs {
    /// Prefix prepended to every non-empty key.
    pub prefix: Option<String>,
}

impl ContainerAttrs {
    pub fn from_input(input: &DeriveInput) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in envi_attrs(&input.attrs) {
            attr.parse_nested_meta(|meta| {
                // prefix = "..."
                if meta.path.is_ident("prefix") {
                    attrs.prefix = Some(lit_str(&meta)?);
                    return Ok(());
                }

                Err(meta.error("unsupported struct-level envi attribute"))
            })?;
        }

        Ok(attrs)
    }
}

/// Parsed `#[envi(...)]` attributes from a struct field.
///
/// Each entry mirrors one annotation of the field: the `env` tag, its default and
/// its sequence separator.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Raw `env` annotation: key followed by `,`-separated options.
    ///
    /// If `None`, the field reads no variable.
    pub env: Option<String>,

    /// Value used when the variable is unset.
    pub default: Option<String>,

    /// Separator for sequence fields.
    pub separator: Option<String>,

    /// Enable `{KEY}_FILE` lookup for secrets mounted as files.
    pub from_file: bool,
}

impl FieldAttrs {
    /// Extract and parse `#[envi(...)]` attributes from a struct field.
    ///
    /// Unknown keys inside `#[envi(...)]` are reported as errors; other attributes
    /// are left for other macros.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in envi_attrs(&field.attrs) {
            attr.parse_nested_meta(|meta| {
                // env = "KEY,options"
                if meta.path.is_ident("env") {
                    attrs.env = Some(lit_str(&meta)?);
                    return Ok(());
                }

                // default = "value"
                if meta.path.is_ident("default") {
                    attrs.default = Some(lit_str(&meta)?);
                    return Ok(());
                }

                // separator = ":"
                if meta.path.is_ident("separator") {
                    attrs.separator = Some(lit_str(&meta)?);
                    return Ok(());
                }

                // from_file
                if meta.path.is_ident("from_file") {
                    attrs.from_file = true;
                    return Ok(());
                }

                Err(meta.error("unsupported envi attribute"))
            })?;
        }

        Ok(attrs)
    }

    /// The `env` annotation with `prefix` applied to its key.
    ///
    /// An empty key stays empty so that fields without a variable never read one.
    pub fn tag(&self, prefix: Option<&str>) -> String {
        let raw = self.env.as_deref().unwrap_or_default();
        match prefix {
            Some(prefix) if !raw.is_empty() && !raw.starts_with(',') => {
                format!("{prefix}{raw}")
            }
            _ => raw.to_string(),
        }
    }
}

fn envi_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("envi"))
}

fn lit_str(meta: &ParseNestedMeta) -> syn::Result<String> {
    let value = meta.value()?;
    let lit: LitStr = value.parse()?;
    Ok(lit.value())
}
