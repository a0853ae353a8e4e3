use alloc::string::String;

use thiserror::Error;

use crate::Kind;

/// A failure to decode a JSON text, positioned in the source.
///
/// The rendered message has the form `"<reason> at line <L>, column <C>"`.
/// Lines and columns are 1-based; the column counts bytes since the last
/// line feed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason} at line {line}, column {column}")]
pub struct DecodeError {
    pub(crate) reason: SyntaxError,
    pub(crate) offset: usize,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl DecodeError {
    /// Builds an error for `reason` detected at byte `offset` of `input`.
    ///
    /// Line and column are resolved here, once, by scanning the input prefix.
    pub(crate) fn at(input: &[u8], offset: usize, reason: SyntaxError) -> Self {
        let (line, column) = line_column(input, offset);
        Self {
            reason,
            offset,
            line,
            column,
        }
    }

    /// What went wrong.
    #[must_use]
    pub fn reason(&self) -> SyntaxError {
        self.reason
    }

    /// Byte offset into the input where the problem was detected.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 1-based line of the problem.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the problem.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }
}

fn line_column(input: &[u8], offset: usize) -> (usize, usize) {
    let prefix = &input[..offset.min(input.len())];
    let line = 1 + prefix.iter().filter(|&&b| b == b'\n').count();
    let column = match prefix.iter().rposition(|&b| b == b'\n') {
        Some(newline) => prefix.len() - newline,
        None => prefix.len() + 1,
    };
    (line, column)
}

/// The reason a decode failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    /// A byte that cannot start or continue the current token.
    #[error("invalid character '{}'", .0.escape_debug())]
    InvalidCharacter(char),
    /// The input ended in the middle of a value.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A backslash followed by something other than a JSON escape.
    #[error("invalid escape sequence '\\{}'", .0.escape_debug())]
    InvalidEscape(char),
    /// `\u` not followed by four hexadecimal digits.
    #[error("invalid unicode escape sequence")]
    InvalidUnicodeEscape,
    /// A UTF-16 surrogate escape without its partner.
    #[error("unpaired surrogate \\u{0:04X}")]
    LoneSurrogate(u16),
    /// An unescaped control character inside a string.
    #[error("unescaped control character {:?} in string", .0)]
    ControlCharacter(char),
    /// Bytes that are not valid UTF-8.
    #[error("invalid UTF-8")]
    InvalidUtf8,
    /// A malformed number literal.
    #[error("invalid number")]
    InvalidNumber,
    /// A number literal too large to represent as a double.
    #[error("number out of range")]
    NumberOutOfRange,
    /// More nested objects and arrays than the configured limit.
    #[error("maximum depth of {0} exceeded")]
    DepthExceeded(usize),
    /// Something other than whitespace after the top-level value.
    #[error("trailing data after JSON value")]
    TrailingData,
}

/// A failed traversal or extraction on a [`Chain`](crate::Chain).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// `field` was called on something other than an object.
    #[error("not an object")]
    NotAnObject,
    /// `index` or `slice` was called on something other than an array.
    #[error("not an array")]
    NotAnArray,
    /// The object has no such key.
    #[error("key {0:?} not found")]
    KeyNotFound(String),
    /// The index is past the end of the array.
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Array length.
        len: usize,
    },
    /// A slice bound is past the end of the array.
    #[error("slice {start}..{end} out of range for array of length {len}")]
    SliceOutOfRange {
        /// Requested start.
        start: usize,
        /// Requested end.
        end: usize,
        /// Array length.
        len: usize,
    },
    /// A slice whose start is after its end.
    #[error("invalid slice range {start}..{end}")]
    InvalidRange {
        /// Requested start.
        start: usize,
        /// Requested end.
        end: usize,
    },
    /// The extraction needs a different kind of value.
    #[error("expected {expected}, found {found}")]
    WrongKind {
        /// Kind the extraction requires.
        expected: Kind,
        /// Kind actually present.
        found: Kind,
    },
    /// The number does not fit the requested type.
    #[error("number out of range for {target}")]
    OutOfRange {
        /// Name of the requested type.
        target: &'static str,
    },
    /// A character was requested from an empty string.
    #[error("empty string")]
    EmptyString,
    /// A character was requested from a string of several code points.
    #[error("string has more than one code point")]
    MultipleCodePoints,
}

/// The error carried by a [`Chain`](crate::Chain).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The document never decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// A traversal or extraction step failed.
    #[error(transparent)]
    Access(#[from] AccessError),
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(b"", 0, 1, 1)]
    #[case(b"abc", 2, 1, 3)]
    #[case(b"a\nbc", 2, 2, 1)]
    #[case(b"a\nbc", 3, 2, 2)]
    #[case(b"\n\n\n", 3, 4, 1)]
    #[case(b"ab", 10, 1, 3)]
    fn resolves_line_and_column(
        #[case] input: &[u8],
        #[case] offset: usize,
        #[case] line: usize,
        #[case] column: usize,
    ) {
        assert_eq!(line_column(input, offset), (line, column));
    }

    #[test]
    fn renders_reason_and_position() {
        let err = DecodeError::at(b"{\n  x", 4, SyntaxError::InvalidCharacter('x'));
        assert_eq!(err.to_string(), "invalid character 'x' at line 2, column 3");
        assert_eq!(err.offset(), 4);
        assert_eq!(err.reason(), SyntaxError::InvalidCharacter('x'));
    }

    #[test]
    fn chain_error_is_transparent() {
        let err = Error::from(AccessError::KeyNotFound("id".to_string()));
        assert_eq!(err.to_string(), "key \"id\" not found");
    }
}
