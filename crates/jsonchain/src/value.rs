//! The decoded JSON tree.
//!
//! [`Value`] is the node type produced by [`decode`](crate::decode). Numbers
//! keep the distinction the decoder made between integer and floating-point
//! literals; integers above `i64::MAX` are held as [`Integer::Unsigned`].

use alloc::{collections::BTreeMap, string::String, vec::Vec};

use crate::{Chain, Kind};

/// Object members. Key order is not significant.
pub type Map = BTreeMap<String, Value>;
/// Array elements.
pub type Array = Vec<Value>;

/// A JSON value as defined by [RFC 8259].
///
/// # Examples
///
/// ```
/// use jsonchain::{Integer, Kind, Value};
///
/// let v: Value = "[1, 2.5, null]".parse().unwrap();
/// assert_eq!(v.kind(), Kind::Array);
/// assert_eq!(
///     v,
///     Value::Array(vec![Value::Integer(Integer::Signed(1)), Value::Float(2.5), Value::Null])
/// );
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// `null`.
    #[default]
    Null,
    /// `true` or `false`.
    Boolean(bool),
    /// An integer literal that fits 64 bits.
    Integer(Integer),
    /// A literal with fraction or exponent, or an integer too large for `u64`.
    Float(f64),
    /// An unescaped string.
    String(String),
    /// An ordered sequence.
    Array(Array),
    /// A mapping from keys to values.
    Object(Map),
}

/// A 64-bit integer of either signedness.
///
/// The decoder produces `Unsigned` only for literals above `i64::MAX`, so a
/// given number has exactly one representation.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Integer {
    /// Anything in `i64` range.
    Signed(i64),
    /// Above `i64::MAX`.
    Unsigned(u64),
}

impl Integer {
    /// Converts to a narrower or differently-signed integer type, if it fits.
    pub(crate) fn narrow<T>(self) -> Option<T>
    where
        T: TryFrom<i64> + TryFrom<u64>,
    {
        match self {
            Integer::Signed(n) => <T as TryFrom<i64>>::try_from(n).ok(),
            Integer::Unsigned(n) => <T as TryFrom<u64>>::try_from(n).ok(),
        }
    }
}

impl From<i64> for Integer {
    fn from(n: i64) -> Self {
        Self::Signed(n)
    }
}

impl From<u64> for Integer {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(Self::Unsigned(n), Self::Signed)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v.into())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Integer(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// The discriminant of this value. Never [`Kind::Invalid`].
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Boolean(_) => Kind::Boolean,
            Value::Integer(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    /// Starts a navigation chain rooted at this value.
    #[must_use]
    pub fn chain(&self) -> Chain<'_> {
        Chain::new(self)
    }

    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Boolean`].
    ///
    /// [`Boolean`]: Value::Boolean
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is an [`Integer`](Value::Integer).
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(..))
    }

    /// Returns `true` if the value is a [`Float`](Value::Float).
    #[must_use]
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(..))
    }

    /// Returns `true` for either kind of number.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonchain::Value;
    ///
    /// assert!(Value::from(42i64).is_number());
    /// assert!(Value::from(4.2).is_number());
    /// assert!(!Value::Null.is_number());
    /// ```
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Integer(..) | Self::Float(..))
    }

    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: Value::String
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }
}
