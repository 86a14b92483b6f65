//! Walking a record's fields and the by-name override path

use crate::error::{Cause, EnvError};
use crate::record::{Envi, FieldDescriptor};
use crate::resolve::resolve;
use crate::shape::Shape;
use crate::source::{ProcessEnv, Source};
use crate::tag::parse_key_and_options;
use std::ops::{Deref, DerefMut};
use tracing::{debug, trace};

/// Bind `record` to the process environment.
///
/// See [`bind_with`].
pub fn bind<R: Envi>(record: &mut R) -> Result<Binding<'_, R>, EnvError> {
    bind_with(record, &ProcessEnv)
}

/// Bind every field of `record` to values looked up in `source`.
///
/// Fields are processed in declaration order. A field whose resolved value is empty
/// is left untouched. The first failing field aborts the bind; fields processed
/// before it keep their new values.
///
/// # Errors
///
/// Returns an [`EnvError`] naming the failing field when a `required` variable is
/// unset, an option is unsupported, a secret file cannot be read, or a value does
/// not convert into the field's type.
pub fn bind_with<'a, R, S>(record: &'a mut R, source: &S) -> Result<Binding<'a, R>, EnvError>
where
    R: Envi,
    S: Source + ?Sized,
{
    for (index, field) in R::descriptors().iter().enumerate() {
        let intent = parse_key_and_options(field.tag);
        let value = match resolve(
            source,
            intent.key,
            field.default,
            &intent.options,
            field.from_file,
        ) {
            Ok(value) => value,
            Err(unresolved) => {
                debug!(field = field.name, key = intent.key, cause = %unresolved.cause, "failed to resolve field");
                return Err(EnvError::new(
                    field.name,
                    field.type_name,
                    unresolved.partial,
                    unresolved.cause,
                ));
            }
        };

        if value.is_empty() {
            trace!(field = field.name, key = intent.key, "no value; leaving field untouched");
            continue;
        }
        if field.shape == Shape::Opaque {
            debug!(field = field.name, type_name = field.type_name, "no conversion for field type; value dropped");
        }

        trace!(field = field.name, key = intent.key, %value, "converting field");
        if let Err(cause) = record.assign(index, &value, field.separator) {
            debug!(field = field.name, %cause, "failed to convert field");
            return Err(EnvError::new(field.name, field.type_name, value, cause));
        }
    }

    Ok(Binding { record })
}

/// Handle to a bound record, used to override single fields afterwards.
#[derive(Debug)]
pub struct Binding<'a, R> {
    record: &'a mut R,
}

impl<'a, R: Envi> Binding<'a, R> {
    /// The bound record.
    pub fn record(&self) -> &R {
        &*self.record
    }

    /// The bound record, for changes made outside the environment.
    pub fn record_mut(&mut self) -> &mut R {
        &mut *self.record
    }

    /// Give up the override path and return the record's borrow.
    pub fn into_inner(self) -> &'a mut R {
        self.record
    }

    /// Convert `value` into the field declared as `field_name`.
    ///
    /// Sequence fields are split on the separator declared for the record's *first*
    /// field, not the target's own. Use [`Binding::set_field`] to split on the
    /// target field's separator.
    ///
    /// # Errors
    ///
    /// - [`Cause::FieldNotFound`] if the record declares no such field
    /// - [`Cause::EmptyValue`] if `value` is empty
    /// - conversion failures, as for [`bind`]
    pub fn set_field_by_name(&mut self, field_name: &str, value: &str) -> Result<(), EnvError> {
        self.override_field(field_name, value, |descriptors, _| {
            descriptors.first().map(|first| first.separator).unwrap_or_default()
        })
    }

    /// Like [`Binding::set_field_by_name`], but splits sequences on the target
    /// field's own separator.
    pub fn set_field(&mut self, field_name: &str, value: &str) -> Result<(), EnvError> {
        self.override_field(field_name, value, |descriptors, index| {
            descriptors[index].separator
        })
    }

    fn override_field(
        &mut self,
        field_name: &str,
        value: &str,
        separator: impl Fn(&[FieldDescriptor], usize) -> &'static str,
    ) -> Result<(), EnvError> {
        let descriptors = R::descriptors();
        let Some(index) = descriptors.iter().position(|d| d.name == field_name) else {
            return Err(EnvError::new(
                field_name,
                "",
                value,
                Cause::FieldNotFound {
                    name: field_name.to_string(),
                },
            ));
        };
        let field = &descriptors[index];
        if value.is_empty() {
            return Err(EnvError::new(field.name, field.type_name, value, Cause::EmptyValue));
        }

        let separator = separator(&descriptors, index);
        trace!(field = field.name, value, separator, "overriding field");
        self.record
            .assign(index, value, separator)
            .map_err(|cause| EnvError::new(field.name, field.type_name, value, cause))
    }
}

impl<R> Deref for Binding<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        &*self.record
    }
}

impl<R> DerefMut for Binding<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut *self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::assign;
    use crate::shape::IntWidth;
    use crate::value::EnvValue;
    use std::collections::HashMap;

    // Hand-written table, equivalent to what the derive generates.
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Settings {
        tags: Vec<String>,
        port: u16,
        hosts: Vec<String>,
        rate: f64,
    }

    impl Envi for Settings {
        fn descriptors() -> Vec<FieldDescriptor> {
            vec![
                FieldDescriptor {
                    name: "tags",
                    type_name: "Vec<String>",
                    shape: <Vec<String>>::shape(),
                    tag: "TAGS",
                    default: "",
                    separator: ";",
                    from_file: false,
                },
                FieldDescriptor {
                    name: "port",
                    type_name: "u16",
                    shape: Shape::Uint(IntWidth::W16),
                    tag: "PORT",
                    default: "3000",
                    separator: "",
                    from_file: false,
                },
                FieldDescriptor {
                    name: "hosts",
                    type_name: "Vec<String>",
                    shape: <Vec<String>>::shape(),
                    tag: "HOSTS",
                    default: "",
                    separator: ":",
                    from_file: false,
                },
                FieldDescriptor {
                    name: "rate",
                    type_name: "f64",
                    shape: <f64>::shape(),
                    tag: "RATE",
                    default: "",
                    separator: "",
                    from_file: false,
                },
            ]
        }

        fn assign(&mut self, index: usize, value: &str, separator: &str) -> Result<(), Cause> {
            match index {
                0 => assign(&mut self.tags, value, separator),
                1 => assign(&mut self.port, value, separator),
                2 => assign(&mut self.hosts, value, separator),
                3 => assign(&mut self.rate, value, separator),
                _ => Ok(()),
            }
        }
    }

    fn source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_bind_with_defaults_and_separators() {
        let env = source(&[("TAGS", "a;b"), ("HOSTS", "x:y")]);
        let mut settings = Settings::default();
        bind_with(&mut settings, &env).unwrap();

        assert_eq!(settings.tags, vec!["a", "b"]);
        assert_eq!(settings.port, 3000);
        assert_eq!(settings.hosts, vec!["x", "y"]);
        assert_eq!(settings.rate, 0.0);
    }

    #[test]
    fn test_empty_value_leaves_field() {
        let env = source(&[("RATE", "")]);
        let mut settings = Settings {
            rate: 2.5,
            ..Settings::default()
        };
        bind_with(&mut settings, &env).unwrap();
        assert_eq!(settings.rate, 2.5);
    }

    #[test]
    fn test_failure_keeps_earlier_fields() {
        let env = source(&[("TAGS", "a"), ("PORT", "99999"), ("HOSTS", "h")]);
        let mut settings = Settings::default();
        let err = bind_with(&mut settings, &env).unwrap_err();

        assert_eq!(err.key_name, "port");
        assert_eq!(err.field_type, "u16");
        assert_eq!(err.value, "99999");
        assert!(matches!(err.cause, Cause::Conversion { .. }));
        assert_eq!(settings.tags, vec!["a"]);
        assert!(settings.hosts.is_empty());
    }

    #[test]
    fn test_set_field_by_name_uses_first_separator() {
        let env = source(&[]);
        let mut settings = Settings::default();
        let mut binding = bind_with(&mut settings, &env).unwrap();

        binding.set_field_by_name("hosts", "a;b:c").unwrap();
        assert_eq!(binding.hosts, vec!["a", "b:c"]);

        binding.set_field("hosts", "a;b:c").unwrap();
        assert_eq!(binding.hosts, vec!["a;b", "c"]);
    }

    #[test]
    fn test_set_field_by_name_touches_only_target() {
        let env = source(&[("TAGS", "t")]);
        let mut settings = Settings::default();
        let mut binding = bind_with(&mut settings, &env).unwrap();

        binding.set_field_by_name("port", "2323").unwrap();
        assert_eq!(binding.port, 2323);
        assert_eq!(binding.tags, vec!["t"]);
    }

    #[test]
    fn test_set_field_by_name_errors() {
        let env = source(&[]);
        let mut settings = Settings::default();
        let mut binding = bind_with(&mut settings, &env).unwrap();

        let err = binding.set_field_by_name("missing", "1").unwrap_err();
        assert!(matches!(err.cause, Cause::FieldNotFound { ref name } if name == "missing"));

        let err = binding.set_field_by_name("port", "").unwrap_err();
        assert!(matches!(err.cause, Cause::EmptyValue));

        let err = binding.set_field_by_name("port", "http").unwrap_err();
        assert!(matches!(err.cause, Cause::Conversion { .. }));
        assert_eq!(binding.port, 3000);
    }
}
