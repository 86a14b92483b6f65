//! The per-record field table produced by `#[derive(Envi)]`

use crate::bind::bind;
use crate::error::{Cause, EnvError};
use crate::shape::Shape;

/// Metadata for one field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Declared field name
    pub name: &'static str,
    /// Rust type name of the field
    pub type_name: &'static str,
    pub shape: Shape,
    /// Raw `env` annotation: key followed by `,`-separated options
    pub tag: &'static str,
    /// Value used when the variable is unset
    pub default: &'static str,
    /// Sequence separator; empty means `,`
    pub separator: &'static str,
    /// Also consult `{KEY}_FILE`
    pub from_file: bool,
}

/// A record whose fields can be bound from the environment.
///
/// Usually implemented with `#[derive(Envi)]`.
pub trait Envi: Sized {
    /// Field descriptors in declaration order.
    fn descriptors() -> Vec<FieldDescriptor>;

    /// Convert `value` into the field at `index`.
    ///
    /// Indices follow [`Envi::descriptors`]. Unknown indices are ignored.
    fn assign(&mut self, index: usize, value: &str, separator: &str) -> Result<(), Cause>;

    /// Build a record from its `Default` and bind it to the process environment.
    ///
    /// # Errors
    ///
    /// - A `required` environment variable is not set
    /// - An environment variable value cannot be converted into its field's type
    /// - A `from_file` secret file cannot be read
    fn from_env() -> Result<Self, EnvError>
    where
        Self: Default,
    {
        let mut record = Self::default();
        bind(&mut record)?;
        Ok(record)
    }
}
