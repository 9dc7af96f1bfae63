//! Ordered JSON5 document tree.

use std::fmt;

/// A parsed or serialized JSON5 value.
///
/// Objects keep their entries in insertion order. Integers are held exactly
/// and floats keep their non-finite values, so every value a schema can hold
/// survives a write and a re-read.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `null`
    Null,
    /// `true` or `false`
    Bool(bool),
    /// Any numeric literal.
    Number(Number),
    /// A string.
    String(String),
    /// An array.
    Array(Vec<Self>),
    /// An object in entry order.
    Object(Vec<(String, Self)>),
}

/// A JSON5 number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Non-negative integer.
    PosInt(u64),
    /// Negative integer.
    NegInt(i64),
    /// Floating point value, including `Infinity` and `NaN`.
    Float(f64),
}

impl Value {
    /// Whether this value is neither an object nor an array.
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::Object(_) | Self::Array(_))
    }

    /// Looks up `key` in an object. Returns `None` for other values.
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Object(entries) => entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        u64::try_from(value).map_or(Self::NegInt(value), Self::PosInt)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::PosInt(n) => write!(f, "{n}"),
            Self::NegInt(n) => write!(f, "{n}"),
            Self::Float(n) if n.is_nan() => f.write_str("NaN"),
            Self::Float(n) if n.is_infinite() => {
                f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            // Debug keeps a fraction or exponent, so the text reads back as a float
            Self::Float(n) => write!(f, "{n:?}"),
        }
    }
}
