//! Resolution of a field's effective string value

use crate::error::Cause;
use crate::source::Source;
use std::fs;

const REQUIRED: &str = "required";

/// A resolution failure together with the value resolved before it happened.
#[derive(Debug)]
pub struct Unresolved {
    /// Value resolved before the failure; empty for a missing `required` variable
    pub partial: String,
    /// Why resolution failed
    pub cause: Cause,
}

/// Resolve the value for `key`: the looked-up value, else `default`.
///
/// Options are applied in order and the first failure aborts. `required` looks the
/// key up again, so a value that only came from `default` does not satisfy it.
pub fn resolve<S: Source + ?Sized>(
    source: &S,
    key: &str,
    default: &str,
    options: &[&str],
    from_file: bool,
) -> Result<String, Unresolved> {
    let mut value = match lookup(source, key, from_file) {
        Ok(Some(found)) => found,
        Ok(None) => default.to_string(),
        Err(cause) => {
            return Err(Unresolved {
                partial: String::new(),
                cause,
            })
        }
    };

    for option in options {
        match *option {
            "" => {}
            REQUIRED => match lookup(source, key, from_file) {
                Ok(Some(found)) => value = found,
                Ok(None) => {
                    return Err(Unresolved {
                        partial: String::new(),
                        cause: Cause::RequiredMissing {
                            key: key.to_string(),
                        },
                    })
                }
                Err(cause) => {
                    return Err(Unresolved {
                        partial: String::new(),
                        cause,
                    })
                }
            },
            other => {
                return Err(Unresolved {
                    partial: value,
                    cause: Cause::UnsupportedOption {
                        option: other.to_string(),
                    },
                })
            }
        }
    }

    Ok(value)
}

/// Look up `key`, falling back to the file named by `{key}_FILE` when `from_file`
/// is set.
///
/// Priority order:
/// 1. Direct variable (`key`)
/// 2. Trimmed contents of the file at `{key}_FILE`
pub fn lookup<S: Source + ?Sized>(
    source: &S,
    key: &str,
    from_file: bool,
) -> Result<Option<String>, Cause> {
    if let Some(value) = source.lookup(key) {
        return Ok(Some(value));
    }

    if from_file && !key.is_empty() {
        let file_var_name = format!("{}_FILE", key);
        if let Some(file_path) = source.lookup(&file_var_name) {
            return fs::read_to_string(&file_path)
                .map(|s| Some(s.trim().to_string()))
                .map_err(|e| Cause::FileRead {
                    name: file_var_name,
                    path: file_path,
                    source: e,
                });
        }
    }

    Ok(None)
}
