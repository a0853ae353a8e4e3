use core::fmt;

/// The discriminant of a [`Value`](crate::Value) or [`Chain`](crate::Chain).
///
/// `Invalid` is only ever reported by a chain that carries an error.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Kind {
    /// An error-carrying chain.
    #[default]
    Invalid,
    /// A JSON object.
    Object,
    /// A JSON array, or a slice of one.
    Array,
    /// A JSON string.
    String,
    /// A number literal without fraction or exponent that fits 64 bits.
    Integer,
    /// Any other number literal.
    Float,
    /// `true` or `false`.
    Boolean,
    /// `null`.
    Null,
}

impl Kind {
    /// Lowercase name used in error messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Invalid => "invalid",
            Kind::Object => "object",
            Kind::Array => "array",
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::Boolean => "boolean",
            Kind::Null => "null",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
