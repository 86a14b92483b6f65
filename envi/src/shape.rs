//! Conversion-relevant classification of field types

use std::fmt;

/// Bit width of an integer shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
    /// Pointer-sized (`isize` / `usize`)
    Size,
}

impl IntWidth {
    pub const fn bits(self) -> u32 {
        match self {
            Self::W8 => 8,
            Self::W16 => 16,
            Self::W32 => 32,
            Self::W64 => 64,
            Self::Size => usize::BITS,
        }
    }
}

/// Precision of a floating point shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatWidth {
    F32,
    F64,
}

/// What a field's string value is converted into.
///
/// Compound shapes carry the shape of their elements, so the converter can recurse
/// without knowing the concrete Rust type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    String,
    Int(IntWidth),
    Uint(IntWidth),
    Float(FloatWidth),
    Bool,
    Duration,
    /// Duration that may be negative
    SignedDuration,
    /// Optional or boxed value, allocated when a value is converted
    Pointer(Box<Shape>),
    /// Ordered sequence split on the field's separator
    Sequence(Box<Shape>),
    /// `key:value` pairs split on `,`
    Mapping(Box<Shape>, Box<Shape>),
    /// A type the converter does not know. A value for a field of this shape is
    /// dropped; inside a compound shape each element is [`Value::Opaque`].
    ///
    /// [`Value::Opaque`]: crate::Value::Opaque
    Opaque,
}

impl Shape {
    pub fn pointer(inner: Shape) -> Self {
        Self::Pointer(Box::new(inner))
    }

    pub fn sequence(element: Shape) -> Self {
        Self::Sequence(Box::new(element))
    }

    pub fn mapping(key: Shape, value: Shape) -> Self {
        Self::Mapping(Box::new(key), Box::new(value))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Int(IntWidth::Size) => f.write_str("isize"),
            Self::Int(width) => write!(f, "i{}", width.bits()),
            Self::Uint(IntWidth::Size) => f.write_str("usize"),
            Self::Uint(width) => write!(f, "u{}", width.bits()),
            Self::Float(FloatWidth::F32) => f.write_str("f32"),
            Self::Float(FloatWidth::F64) => f.write_str("f64"),
            Self::Bool => f.write_str("bool"),
            Self::Duration => f.write_str("duration"),
            Self::SignedDuration => f.write_str("signed duration"),
            Self::Pointer(inner) => write!(f, "ptr<{inner}>"),
            Self::Sequence(element) => write!(f, "seq<{element}>"),
            Self::Mapping(key, value) => write!(f, "map<{key}, {value}>"),
            Self::Opaque => f.write_str("opaque"),
        }
    }
}
