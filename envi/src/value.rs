//! Converted values and the types that can be built from them

use crate::shape::{FloatWidth, IntWidth, Shape};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::time::Duration;

/// A value produced by the converter, before it is stored in a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Duration(Duration),
    SignedDuration(SignedDuration),
    Pointer(Box<Value>),
    Sequence(Vec<Value>),
    /// Entries in source order; later duplicates win when collected.
    Mapping(Vec<(Value, Value)>),
    /// Placeholder for an element of [`Shape::Opaque`] inside a compound value.
    Opaque,
}

/// A span of time that may be negative, in whole nanoseconds.
///
/// `std::time::Duration` fields reject literals such as `-1m30s`; fields of this
/// type accept them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignedDuration(i64);

impl SignedDuration {
    pub const ZERO: Self = Self(0);

    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Magnitude as an unsigned [`Duration`].
    pub const fn unsigned_abs(self) -> Duration {
        Duration::from_nanos(self.0.unsigned_abs())
    }
}

/// A field type the converter knows how to build.
///
/// `shape` tells the converter what to parse; `from_value` moves the result into
/// the concrete type. A type whose shape is [`Shape::Opaque`] receives
/// [`Value::Opaque`] for each element it occupies in a collection and should return
/// its zero value. Implement it for newtypes to bind them directly:
///
/// ```rust
/// use envi::{EnvValue, IntWidth, Shape, Value};
///
/// struct Port(u16);
///
/// impl EnvValue for Port {
///     fn shape() -> Shape {
///         Shape::Uint(IntWidth::W16)
///     }
///
///     fn from_value(value: Value) -> Option<Self> {
///         u16::from_value(value).map(Port)
///     }
/// }
/// ```
pub trait EnvValue: Sized {
    fn shape() -> Shape;

    /// Returns `None` when `value` does not have this type's shape.
    fn from_value(value: Value) -> Option<Self>;
}

impl EnvValue for String {
    fn shape() -> Shape {
        Shape::String
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

macro_rules! impl_int {
    ($($ty:ty => $variant:ident($width:ident)),* $(,)?) => {
        $(
            impl EnvValue for $ty {
                fn shape() -> Shape {
                    Shape::$variant(IntWidth::$width)
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(n) => <$ty>::try_from(n).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_int! {
    i8 => Int(W8),
    i16 => Int(W16),
    i32 => Int(W32),
    i64 => Int(W64),
    isize => Int(Size),
    u8 => Uint(W8),
    u16 => Uint(W16),
    u32 => Uint(W32),
    u64 => Uint(W64),
    usize => Uint(Size),
}

impl EnvValue for f32 {
    fn shape() -> Shape {
        Shape::Float(FloatWidth::F32)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(f as f32),
            _ => None,
        }
    }
}

impl EnvValue for f64 {
    fn shape() -> Shape {
        Shape::Float(FloatWidth::F64)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }
}

impl EnvValue for bool {
    fn shape() -> Shape {
        Shape::Bool
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl EnvValue for Duration {
    fn shape() -> Shape {
        Shape::Duration
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Duration(d) => Some(d),
            _ => None,
        }
    }
}

impl EnvValue for SignedDuration {
    fn shape() -> Shape {
        Shape::SignedDuration
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::SignedDuration(d) => Some(d),
            _ => None,
        }
    }
}

impl<T: EnvValue> EnvValue for Option<T> {
    fn shape() -> Shape {
        Shape::pointer(T::shape())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Pointer(inner) => T::from_value(*inner).map(Some),
            _ => None,
        }
    }
}

impl<T: EnvValue> EnvValue for Box<T> {
    fn shape() -> Shape {
        Shape::pointer(T::shape())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Pointer(inner) => T::from_value(*inner).map(Box::new),
            _ => None,
        }
    }
}

impl<T: EnvValue> EnvValue for Vec<T> {
    fn shape() -> Shape {
        Shape::sequence(T::shape())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Sequence(items) => items.into_iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

impl<K, V> EnvValue for HashMap<K, V>
where
    K: EnvValue + Eq + Hash,
    V: EnvValue,
{
    fn shape() -> Shape {
        Shape::mapping(K::shape(), V::shape())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Mapping(entries) => entries
                .into_iter()
                .map(|(k, v)| Some((K::from_value(k)?, V::from_value(v)?)))
                .collect(),
            _ => None,
        }
    }
}

impl<K, V> EnvValue for BTreeMap<K, V>
where
    K: EnvValue + Ord,
    V: EnvValue,
{
    fn shape() -> Shape {
        Shape::mapping(K::shape(), V::shape())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Mapping(entries) => entries
                .into_iter()
                .map(|(k, v)| Some((K::from_value(k)?, V::from_value(v)?)))
                .collect(),
            _ => None,
        }
    }
}
