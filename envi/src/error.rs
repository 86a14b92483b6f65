//! Error types for binding environment variables to record fields

use crate::literal::LiteralError;

/// Error returned when a field cannot be bound.
///
/// Every failure is reported against the field that caused it. A bind stops at the
/// first failing field, so there is at most one `EnvError` per call.
#[derive(Debug, thiserror::Error)]
#[error("Field '{key_name}' of type {field_type} (value {value:?}): {cause}")]
pub struct EnvError {
    /// Declared name of the failing field
    pub key_name: String,
    /// Type name of the failing field
    pub field_type: String,
    /// Raw string that was being resolved or converted
    pub value: String,
    /// What went wrong
    #[source]
    pub cause: Cause,
}

impl EnvError {
    pub(crate) fn new(
        key_name: impl Into<String>,
        field_type: impl Into<String>,
        value: impl Into<String>,
        cause: Cause,
    ) -> Self {
        Self {
            key_name: key_name.into(),
            field_type: field_type.into(),
            value: value.into(),
            cause,
        }
    }

    /// The underlying cause, for callers that branch on the failure kind.
    pub fn cause(&self) -> &Cause {
        &self.cause
    }
}

/// Why a field failed to bind.
#[derive(Debug, thiserror::Error)]
pub enum Cause {
    /// A field tagged `required` has no environment variable set.
    ///
    /// Declared defaults do not satisfy `required`.
    #[error("Environment variable '{key}' is required but not set")]
    RequiredMissing {
        /// Name of the missing environment variable
        key: String,
    },

    /// The `env` annotation carries an option other than `required`.
    #[error("Tag option '{option}' is not supported")]
    UnsupportedOption {
        /// The offending option token
        option: String,
    },

    /// A map entry did not split into exactly one key and one value on `:`.
    #[error("Invalid map entry '{entry}': expected exactly one ':'")]
    InvalidMapEntry {
        /// The offending `key:value` segment
        entry: String,
    },

    /// A literal could not be converted into the field's type.
    #[error("Failed to convert {literal:?} to {target}: {source}")]
    Conversion {
        /// The literal that failed to convert
        literal: String,
        /// Description of the target shape (e.g. `i32`, `duration`)
        target: String,
        /// Parser failure
        source: LiteralError,
    },

    /// The override path referenced a field the record does not declare.
    #[error("No field named '{name}'")]
    FieldNotFound {
        /// The requested field name
        name: String,
    },

    /// The override path was given an empty replacement value.
    #[error("Replacement value must not be empty")]
    EmptyValue,

    /// Failed to read the file named by `{KEY}_FILE` for a `from_file` field.
    #[error("Failed to read file '{path}' for environment variable '{name}': {source}")]
    FileRead {
        /// Name of the `{KEY}_FILE` variable
        name: String,
        /// Path the variable pointed to
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl Cause {
    pub(crate) fn conversion(
        literal: impl Into<String>,
        target: impl std::fmt::Display,
        source: LiteralError,
    ) -> Self {
        Self::Conversion {
            literal: literal.into(),
            target: target.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_includes_field_context() {
        let err = EnvError::new(
            "port",
            "u16",
            "",
            Cause::RequiredMissing {
                key: "PORT".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "Field 'port' of type u16 (value \"\"): Environment variable 'PORT' is required but not set"
        );
    }

    #[test]
    fn test_source_chain_reaches_literal_error() {
        let err = EnvError::new(
            "rate",
            "f32",
            "abc",
            Cause::conversion("abc", "f32", LiteralError::Syntax),
        );
        let cause = err.source().expect("cause");
        assert!(cause.to_string().contains("f32"));
        let literal = cause.source().expect("literal error");
        assert_eq!(literal.to_string(), "invalid syntax");
    }
}
