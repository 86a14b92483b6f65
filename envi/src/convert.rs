//! Shape-driven conversion from strings to values

use crate::error::Cause;
use crate::literal::{self, LiteralError};
use crate::shape::Shape;
use crate::value::{EnvValue, SignedDuration, Value};

const DEFAULT_SEPARATOR: &str = ",";
const MAP_ENTRY_SEPARATOR: char = ',';
const MAP_KEY_SEPARATOR: char = ':';

/// Convert `value` into a value of `shape`.
///
/// `separator` only applies to sequences and falls back to `,` when empty. Returns
/// `Ok(None)` for [`Shape::Opaque`]. Opaque elements of a compound shape become
/// [`Value::Opaque`].
pub fn convert(shape: &Shape, value: &str, separator: &str) -> Result<Option<Value>, Cause> {
    if *shape == Shape::Opaque {
        return Ok(None);
    }
    convert_nested(shape, value, separator).map(Some)
}

fn convert_nested(shape: &Shape, value: &str, separator: &str) -> Result<Value, Cause> {
    let converted = match shape {
        Shape::Pointer(inner) => Value::Pointer(Box::new(convert_nested(inner, value, separator)?)),
        Shape::String => Value::String(value.to_string()),
        Shape::Int(width) => Value::Int(
            literal::parse_int(value, width.bits()).map_err(|e| fail(value, shape, e))?,
        ),
        Shape::Uint(width) => Value::Uint(
            literal::parse_uint(value, width.bits()).map_err(|e| fail(value, shape, e))?,
        ),
        Shape::Float(width) => Value::Float(
            literal::parse_float(value, *width).map_err(|e| fail(value, shape, e))?,
        ),
        Shape::Bool => {
            Value::Bool(literal::parse_bool(value).map_err(|e| fail(value, shape, e))?)
        }
        Shape::Duration => {
            Value::Duration(literal::parse_duration(value).map_err(|e| fail(value, shape, e))?)
        }
        Shape::SignedDuration => Value::SignedDuration(SignedDuration::from_nanos(
            literal::parse_signed_duration(value).map_err(|e| fail(value, shape, e))?,
        )),
        Shape::Sequence(element) => {
            let separator = if separator.is_empty() {
                DEFAULT_SEPARATOR
            } else {
                separator
            };
            let items = value
                .split(separator)
                .map(|item| convert_nested(element, item, ""))
                .collect::<Result<_, _>>()?;
            Value::Sequence(items)
        }
        Shape::Mapping(key_shape, value_shape) => {
            let mut entries = Vec::new();
            if !value.trim().is_empty() {
                for entry in value.split(MAP_ENTRY_SEPARATOR) {
                    let mut parts = entry.split(MAP_KEY_SEPARATOR);
                    let (Some(k), Some(v), None) = (parts.next(), parts.next(), parts.next())
                    else {
                        return Err(Cause::InvalidMapEntry {
                            entry: entry.to_string(),
                        });
                    };
                    entries.push((
                        convert_nested(key_shape, k, "")?,
                        convert_nested(value_shape, v, "")?,
                    ));
                }
            }
            Value::Mapping(entries)
        }
        Shape::Opaque => Value::Opaque,
    };
    Ok(converted)
}

/// Convert `value` into `T` and store it in `slot`.
///
/// `slot` is replaced wholesale on success and left untouched on failure or when
/// `T`'s shape is [`Shape::Opaque`].
pub fn assign<T: EnvValue>(slot: &mut T, value: &str, separator: &str) -> Result<(), Cause> {
    let shape = T::shape();
    let Some(converted) = convert(&shape, value, separator)? else {
        return Ok(());
    };
    *slot = T::from_value(converted).ok_or_else(|| fail(value, &shape, LiteralError::Mismatch))?;
    Ok(())
}

fn fail(literal: &str, shape: &Shape, source: LiteralError) -> Cause {
    Cause::conversion(literal, shape, source)
}
