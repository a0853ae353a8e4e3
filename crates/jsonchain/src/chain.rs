//! Chainable navigation over a decoded [`Value`].
//!
//! A [`Chain`] is either a position in the tree or the first error met on the
//! way there. Traversal methods consume the chain and return a new one;
//! extraction methods end it with a `Result`. An error, once present, is
//! handed on unchanged and no further node is looked at, so the error a
//! caller finally sees always belongs to the first failing step:
//!
//! ```rust
//! use jsonchain::{AccessError, Error, parse};
//!
//! let doc = parse(r#"{"items": [{"id": "a"}]}"#).unwrap();
//! let id = doc.chain().field("itemz").index(0).field("id").as_str();
//! assert_eq!(id, Err(Error::Access(AccessError::KeyNotFound("itemz".into()))));
//! ```

use alloc::string::ToString;

use crate::{AccessError, DecodeError, Error, Integer, Kind, Map, Value};

/// A navigable view of a decoded value, or the error that ended navigation.
///
/// Chains borrow from the tree they were started on and never copy or modify
/// it. Slicing an array yields a view over the original elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain<'a> {
    inner: Inner<'a>,
}

#[derive(Debug, Clone, PartialEq)]
enum Inner<'a> {
    Node(&'a Value),
    Elements(&'a [Value]),
    Failed(Error),
}

/// Borrowed payload of a chain, as returned by [`Chain::raw`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueRef<'a> {
    /// `null`.
    Null,
    /// `true` or `false`.
    Boolean(bool),
    /// An integer.
    Integer(Integer),
    /// A floating-point number.
    Float(f64),
    /// A string.
    String(&'a str),
    /// An array or array slice.
    Array(&'a [Value]),
    /// An object.
    Object(&'a Map),
}

impl<'a> ValueRef<'a> {
    /// The discriminant of the payload.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            ValueRef::Null => Kind::Null,
            ValueRef::Boolean(_) => Kind::Boolean,
            ValueRef::Integer(_) => Kind::Integer,
            ValueRef::Float(_) => Kind::Float,
            ValueRef::String(_) => Kind::String,
            ValueRef::Array(_) => Kind::Array,
            ValueRef::Object(_) => Kind::Object,
        }
    }
}

impl<'a> From<&'a Value> for ValueRef<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => ValueRef::Null,
            Value::Boolean(b) => ValueRef::Boolean(*b),
            Value::Integer(n) => ValueRef::Integer(*n),
            Value::Float(n) => ValueRef::Float(*n),
            Value::String(s) => ValueRef::String(s.as_str()),
            Value::Array(elements) => ValueRef::Array(elements.as_slice()),
            Value::Object(map) => ValueRef::Object(map),
        }
    }
}

impl<'a> From<&'a Value> for Chain<'a> {
    fn from(value: &'a Value) -> Self {
        Chain::new(value)
    }
}

impl<'a> From<&'a Result<Value, DecodeError>> for Chain<'a> {
    /// Chains over a decode result; a failed decode becomes the chain's error.
    fn from(result: &'a Result<Value, DecodeError>) -> Self {
        match result {
            Ok(value) => Chain::new(value),
            Err(err) => Chain::fail(err.clone()),
        }
    }
}

macro_rules! integer_getters {
    ($($(#[$meta:meta])* $name:ident -> $ty:ty;)*) => {
        $(
            $(#[$meta])*
            ///
            /// # Errors
            ///
            /// Fails with the carried error, with [`AccessError::WrongKind`]
            /// unless the value is an integer, or with
            /// [`AccessError::OutOfRange`] if it does not fit.
            pub fn $name(&self) -> Result<$ty, Error> {
                self.integer()?
                    .narrow::<$ty>()
                    .ok_or_else(|| AccessError::OutOfRange { target: stringify!($ty) }.into())
            }
        )*
    };
}

impl<'a> Chain<'a> {
    /// Starts a chain at `value`.
    #[must_use]
    pub fn new(value: &'a Value) -> Self {
        Self {
            inner: Inner::Node(value),
        }
    }

    fn fail(err: impl Into<Error>) -> Self {
        Self {
            inner: Inner::Failed(err.into()),
        }
    }

    /// The discriminant of the current position, or [`Kind::Invalid`] if the
    /// chain carries an error.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match &self.inner {
            Inner::Node(value) => value.kind(),
            Inner::Elements(_) => Kind::Array,
            Inner::Failed(_) => Kind::Invalid,
        }
    }

    /// The carried error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        match &self.inner {
            Inner::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Returns `true` if the chain does not carry an error.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error().is_none()
    }

    /// Converts the chain into a `Result`, for use with `?`.
    ///
    /// # Errors
    ///
    /// Returns the carried error.
    pub fn into_result(self) -> Result<Self, Error> {
        match self.inner {
            Inner::Failed(err) => Err(err),
            inner => Ok(Self { inner }),
        }
    }

    // --------------------------------------------------------------------------------------------
    // Traversal
    // --------------------------------------------------------------------------------------------

    /// Moves to the member `key` of an object.
    #[must_use]
    pub fn field(self, key: &str) -> Self {
        match self.inner {
            Inner::Failed(_) => self,
            Inner::Node(Value::Object(map)) => match map.get(key) {
                Some(value) => Self::new(value),
                None => Self::fail(AccessError::KeyNotFound(key.to_string())),
            },
            _ => Self::fail(AccessError::NotAnObject),
        }
    }

    /// Moves to element `index` of an array.
    #[must_use]
    pub fn index(self, index: usize) -> Self {
        let elements = match self.elements() {
            Ok(elements) => elements,
            Err(err) => return Self::fail(err),
        };
        match elements.get(index) {
            Some(value) => Self::new(value),
            None => Self::fail(AccessError::IndexOutOfRange {
                index,
                len: elements.len(),
            }),
        }
    }

    /// Narrows an array to the elements `start..end`.
    ///
    /// `start` must be a valid index and `end` at most the length, so
    /// `slice(2, 2)` is an empty array for any array longer than two.
    #[must_use]
    pub fn slice(self, start: usize, end: usize) -> Self {
        let elements = match self.elements() {
            Ok(elements) => elements,
            Err(err) => return Self::fail(err),
        };
        let len = elements.len();
        if start >= len || end > len {
            return Self::fail(AccessError::SliceOutOfRange { start, end, len });
        }
        if start > end {
            return Self::fail(AccessError::InvalidRange { start, end });
        }
        Self {
            inner: Inner::Elements(&elements[start..end]),
        }
    }

    fn elements(&self) -> Result<&'a [Value], Error> {
        match &self.inner {
            Inner::Failed(err) => Err(err.clone()),
            Inner::Node(Value::Array(elements)) => Ok(elements.as_slice()),
            Inner::Elements(elements) => Ok(*elements),
            Inner::Node(_) => Err(AccessError::NotAnArray.into()),
        }
    }

    // --------------------------------------------------------------------------------------------
    // Extraction
    // --------------------------------------------------------------------------------------------

    /// The payload at the current position, whatever its kind.
    ///
    /// # Errors
    ///
    /// Fails only with the carried error.
    pub fn raw(&self) -> Result<ValueRef<'a>, Error> {
        match &self.inner {
            Inner::Failed(err) => Err(err.clone()),
            Inner::Node(value) => Ok(ValueRef::from(*value)),
            Inner::Elements(elements) => Ok(ValueRef::Array(*elements)),
        }
    }

    fn wrong_kind(&self, expected: Kind) -> Error {
        AccessError::WrongKind {
            expected,
            found: self.kind(),
        }
        .into()
    }

    fn node(&self, expected: Kind) -> Result<&'a Value, Error> {
        match &self.inner {
            Inner::Failed(err) => Err(err.clone()),
            Inner::Node(value) if value.kind() == expected => Ok(*value),
            _ => Err(self.wrong_kind(expected)),
        }
    }

    /// The string at the current position.
    ///
    /// # Errors
    ///
    /// Fails with the carried error or [`AccessError::WrongKind`].
    pub fn as_str(&self) -> Result<&'a str, Error> {
        match self.node(Kind::String)? {
            Value::String(s) => Ok(s.as_str()),
            _ => Err(self.wrong_kind(Kind::String)),
        }
    }

    /// The single character making up the string at the current position.
    ///
    /// # Errors
    ///
    /// Fails with the carried error, [`AccessError::WrongKind`],
    /// [`AccessError::EmptyString`] or [`AccessError::MultipleCodePoints`].
    pub fn as_char(&self) -> Result<char, Error> {
        let mut chars = self.as_str()?.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(AccessError::EmptyString.into()),
            (Some(c), None) => Ok(c),
            (Some(_), Some(_)) => Err(AccessError::MultipleCodePoints.into()),
        }
    }

    /// The boolean at the current position.
    ///
    /// # Errors
    ///
    /// Fails with the carried error or [`AccessError::WrongKind`].
    pub fn as_bool(&self) -> Result<bool, Error> {
        match self.node(Kind::Boolean)? {
            Value::Boolean(b) => Ok(*b),
            _ => Err(self.wrong_kind(Kind::Boolean)),
        }
    }

    /// Confirms the current position is `null`.
    ///
    /// # Errors
    ///
    /// Fails with the carried error or [`AccessError::WrongKind`].
    pub fn as_null(&self) -> Result<(), Error> {
        self.node(Kind::Null).map(|_| ())
    }

    /// The array, or array slice, at the current position.
    ///
    /// # Errors
    ///
    /// Fails with the carried error or [`AccessError::WrongKind`].
    pub fn as_array(&self) -> Result<&'a [Value], Error> {
        match &self.inner {
            Inner::Failed(err) => Err(err.clone()),
            Inner::Node(Value::Array(elements)) => Ok(elements.as_slice()),
            Inner::Elements(elements) => Ok(*elements),
            Inner::Node(_) => Err(self.wrong_kind(Kind::Array)),
        }
    }

    /// The object at the current position.
    ///
    /// # Errors
    ///
    /// Fails with the carried error or [`AccessError::WrongKind`].
    pub fn as_object(&self) -> Result<&'a Map, Error> {
        match self.node(Kind::Object)? {
            Value::Object(map) => Ok(map),
            _ => Err(self.wrong_kind(Kind::Object)),
        }
    }

    fn integer(&self) -> Result<Integer, Error> {
        match self.node(Kind::Integer)? {
            Value::Integer(n) => Ok(*n),
            _ => Err(self.wrong_kind(Kind::Integer)),
        }
    }

    integer_getters! {
        /// The integer at the current position as an `i8`.
        as_i8 -> i8;
        /// The integer at the current position as an `i16`.
        as_i16 -> i16;
        /// The integer at the current position as an `i32`.
        as_i32 -> i32;
        /// The integer at the current position as an `i64`.
        as_i64 -> i64;
        /// The integer at the current position as an `isize`.
        as_isize -> isize;
        /// The integer at the current position as a `u8`.
        as_u8 -> u8;
        /// The integer at the current position as a `u16`.
        as_u16 -> u16;
        /// The integer at the current position as a `u32`.
        as_u32 -> u32;
        /// The integer at the current position as a `u64`.
        as_u64 -> u64;
        /// The integer at the current position as a `usize`.
        as_usize -> usize;
    }

    /// The floating-point number at the current position.
    ///
    /// # Errors
    ///
    /// Fails with the carried error or [`AccessError::WrongKind`]. Integers
    /// are not converted.
    pub fn as_f64(&self) -> Result<f64, Error> {
        match self.node(Kind::Float)? {
            Value::Float(n) => Ok(*n),
            _ => Err(self.wrong_kind(Kind::Float)),
        }
    }

    /// The floating-point number at the current position, rounded to `f32`.
    ///
    /// # Errors
    ///
    /// As [`as_f64`](Self::as_f64), plus [`AccessError::OutOfRange`] if the
    /// magnitude exceeds `f32::MAX`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_f32(&self) -> Result<f32, Error> {
        let n = self.as_f64()?;
        if n.abs() > f64::from(f32::MAX) {
            return Err(AccessError::OutOfRange { target: "f32" }.into());
        }
        Ok(n as f32)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use rstest::rstest;

    use super::*;
    use crate::parse;

    fn doc() -> Value {
        parse(
            r#"{
                "name": "widget",
                "letter": "é",
                "empty": "",
                "flag": true,
                "none": null,
                "small": -3,
                "big": 9223372036854775808,
                "ratio": 0.25,
                "huge": 1e300,
                "list": [10, 20, 30, 40, 50],
                "nested": {"deeper": {"leaf": [0, {"x": "found"}]}}
            }"#,
        )
        .unwrap()
    }

    fn access(err: AccessError) -> Error {
        Error::Access(err)
    }

    #[test]
    fn walks_nested_structures() {
        let doc = doc();
        let found = doc
            .chain()
            .field("nested")
            .field("deeper")
            .field("leaf")
            .index(1)
            .field("x");
        assert_eq!(found.kind(), Kind::String);
        assert_eq!(found.as_str(), Ok("found"));
    }

    #[test]
    fn first_error_wins() {
        let doc = doc();
        let chain = doc.chain().field("nested").field("missing").index(9).field("x");
        assert_eq!(chain.kind(), Kind::Invalid);
        let expected = access(AccessError::KeyNotFound("missing".into()));
        assert_eq!(chain.error(), Some(&expected));
        assert_eq!(chain.as_str(), Err(expected.clone()));
        assert_eq!(chain.as_u8(), Err(expected.clone()));
        assert_eq!(chain.raw(), Err(expected.clone()));
        assert_eq!(chain.slice(0, 1).error(), Some(&expected));
    }

    #[rstest]
    #[case("name", AccessError::NotAnArray)]
    #[case("flag", AccessError::NotAnArray)]
    fn index_requires_array(#[case] key: &str, #[case] expected: AccessError) {
        let doc = doc();
        assert_eq!(doc.chain().field(key).index(0).error(), Some(&access(expected)));
    }

    #[test]
    fn field_requires_object() {
        let doc = doc();
        let err = doc.chain().field("list").field("x");
        assert_eq!(err.error(), Some(&access(AccessError::NotAnObject)));
    }

    #[test]
    fn index_bounds() {
        let doc = doc();
        let list = doc.chain().field("list");
        assert_eq!(list.clone().index(4).as_u8(), Ok(50));
        assert_eq!(
            list.index(5).error(),
            Some(&access(AccessError::IndexOutOfRange { index: 5, len: 5 }))
        );
    }

    #[rstest]
    #[case(2, 2, Ok(vec![]))]
    #[case(1, 3, Ok(vec![20, 30]))]
    #[case(0, 5, Ok(vec![10, 20, 30, 40, 50]))]
    #[case(4, 5, Ok(vec![50]))]
    #[case(0, 6, Err(AccessError::SliceOutOfRange { start: 0, end: 6, len: 5 }))]
    #[case(5, 5, Err(AccessError::SliceOutOfRange { start: 5, end: 5, len: 5 }))]
    #[case(3, 1, Err(AccessError::InvalidRange { start: 3, end: 1 }))]
    fn slices(
        #[case] start: usize,
        #[case] end: usize,
        #[case] expected: Result<vec::Vec<u8>, AccessError>,
    ) {
        let doc = doc();
        let slice = doc.chain().field("list").slice(start, end);
        let actual = slice.as_array().map(|elements| {
            elements
                .iter()
                .map(|v| Chain::new(v).as_u8().unwrap())
                .collect::<vec::Vec<_>>()
        });
        assert_eq!(actual, expected.map_err(Error::Access));
    }

    #[test]
    fn slices_are_arrays() {
        let doc = doc();
        let slice = doc.chain().field("list").slice(1, 4);
        assert_eq!(slice.kind(), Kind::Array);
        assert_eq!(slice.clone().index(0).as_i32(), Ok(20));
        assert_eq!(slice.clone().slice(1, 3).index(1).as_i32(), Ok(40));
        assert_eq!(
            slice.clone().index(3).error(),
            Some(&access(AccessError::IndexOutOfRange { index: 3, len: 3 }))
        );
        assert!(matches!(slice.raw(), Ok(ValueRef::Array(elements)) if elements.len() == 3));
    }

    #[test]
    fn wrong_kind_names_both_kinds() {
        let doc = doc();
        let err = doc.chain().field("ratio").as_i64().unwrap_err();
        assert_eq!(
            err,
            access(AccessError::WrongKind {
                expected: Kind::Integer,
                found: Kind::Float
            })
        );
        assert_eq!(err.to_string(), "expected integer, found float");
        assert!(doc.chain().field("small").as_f64().is_err());
        assert!(doc.chain().field("list").as_object().is_err());
        assert!(doc.chain().field("name").as_bool().is_err());
        assert!(doc.chain().field("flag").as_null().is_err());
    }

    #[test]
    fn integer_widths() {
        let doc = doc();
        let small = doc.chain().field("small");
        assert_eq!(small.as_i8(), Ok(-3));
        assert_eq!(small.as_i16(), Ok(-3));
        assert_eq!(small.as_i32(), Ok(-3));
        assert_eq!(small.as_i64(), Ok(-3));
        assert_eq!(small.as_isize(), Ok(-3));
        assert_eq!(
            small.as_u8(),
            Err(access(AccessError::OutOfRange { target: "u8" }))
        );
        assert!(small.as_u64().is_err());
        assert!(small.as_usize().is_err());

        let big = doc.chain().field("big");
        assert_eq!(big.kind(), Kind::Integer);
        assert_eq!(big.as_u64(), Ok(9_223_372_036_854_775_808));
        assert_eq!(
            big.as_i64(),
            Err(access(AccessError::OutOfRange { target: "i64" }))
        );
        assert!(big.as_u32().is_err());
    }

    #[rstest]
    #[case("127", Ok(127), Ok(127))]
    #[case("128", Err("i8"), Ok(128))]
    #[case("255", Err("i8"), Ok(255))]
    #[case("256", Err("i8"), Err("u8"))]
    #[case("-128", Ok(-128), Err("u8"))]
    #[case("-129", Err("i8"), Err("u8"))]
    fn byte_boundaries(
        #[case] text: &str,
        #[case] signed: Result<i8, &'static str>,
        #[case] unsigned: Result<u8, &'static str>,
    ) {
        let value = parse(text).unwrap();
        let out_of_range = |target| access(AccessError::OutOfRange { target });
        assert_eq!(value.chain().as_i8(), signed.map_err(out_of_range));
        assert_eq!(value.chain().as_u8(), unsigned.map_err(out_of_range));
    }

    #[test]
    fn floats() {
        let doc = doc();
        assert_eq!(doc.chain().field("ratio").as_f64(), Ok(0.25));
        assert_eq!(doc.chain().field("ratio").as_f32(), Ok(0.25));
        assert_eq!(doc.chain().field("huge").as_f64(), Ok(1e300));
        assert_eq!(
            doc.chain().field("huge").as_f32(),
            Err(access(AccessError::OutOfRange { target: "f32" }))
        );
        let max = parse("-3.4028234663852886e38").unwrap();
        assert_eq!(max.chain().as_f32(), Ok(-f32::MAX));
    }

    #[test]
    fn strings_and_chars() {
        let doc = doc();
        assert_eq!(doc.chain().field("name").as_str(), Ok("widget"));
        assert_eq!(doc.chain().field("letter").as_char(), Ok('é'));
        assert_eq!(
            doc.chain().field("empty").as_char(),
            Err(access(AccessError::EmptyString))
        );
        assert_eq!(
            doc.chain().field("name").as_char(),
            Err(access(AccessError::MultipleCodePoints))
        );
    }

    #[test]
    fn booleans_and_null() {
        let doc = doc();
        assert_eq!(doc.chain().field("flag").as_bool(), Ok(true));
        assert_eq!(doc.chain().field("none").as_null(), Ok(()));
        assert_eq!(doc.chain().field("none").kind(), Kind::Null);
    }

    #[test]
    fn raw_bypasses_kind_checks() {
        let doc = doc();
        assert_eq!(doc.chain().field("flag").raw(), Ok(ValueRef::Boolean(true)));
        assert_eq!(
            doc.chain().field("big").raw(),
            Ok(ValueRef::Integer(Integer::Unsigned(9_223_372_036_854_775_808)))
        );
        let raw = doc.chain().field("nested").raw().unwrap();
        assert_eq!(raw.kind(), Kind::Object);
    }

    #[test]
    fn getters_are_idempotent() {
        let doc = doc();
        let chain = doc.chain().field("list").index(2);
        assert_eq!(chain.as_u16(), chain.as_u16());
        assert_eq!(chain.as_f64(), chain.as_f64());
        assert_eq!(chain.kind(), chain.kind());
        assert_eq!(chain.as_u16(), Ok(30));
    }

    #[test]
    fn decode_errors_become_chain_errors() {
        let result = parse("{\"a\": }");
        let chain = Chain::from(&result);
        assert_eq!(chain.kind(), Kind::Invalid);
        let err = chain.field("a").as_i32().unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert_eq!(err.to_string(), "invalid character '}' at line 1, column 7");
    }

    #[test]
    fn into_result_supports_question_mark() {
        fn port(doc: &Value) -> Result<u16, Error> {
            let server = doc.chain().field("server").into_result()?;
            server.field("port").as_u16()
        }
        assert_eq!(port(&parse(r#"{"server": {"port": 80}}"#).unwrap()), Ok(80));
        assert!(port(&parse(r#"{"client": {}}"#).unwrap()).is_err());
    }
}
