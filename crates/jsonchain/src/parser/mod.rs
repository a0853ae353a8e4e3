//! JSON decoder.
//!
//! The whole input is resident, so the parser is a single cursor over the
//! input bytes plus a stack of open containers. Nesting is tracked on the
//! heap rather than by recursion, so unlimited decodes are bounded by memory
//! alone. Every production returns a `Result` and failures unwind through `?`
//! to [`decode`]; nothing is kept from a failed decode.
//!
//! String contents are copied in runs: everything up to the next quote,
//! backslash or control byte is validated as UTF-8 in one step. None of those
//! three can occur inside a multi-byte sequence, so runs never split a
//! character.

mod escape;
mod literal;
mod numbers;
mod options;

use alloc::{string::String, vec::Vec};
use core::{
    mem,
    str::{self, FromStr},
};

use escape::UnicodeEscapeBuffer;
use literal::Literal;
use numbers::NumberLexeme;
pub use options::{DEFAULT_MAX_DEPTH, DecodeOptions};

use crate::{DecodeError, Map, SyntaxError, Value, value::Array};

type Result<T> = core::result::Result<T, DecodeError>;

/// Decodes one JSON document.
///
/// The input must be a single JSON value surrounded by optional whitespace.
///
/// # Errors
///
/// Returns a [`DecodeError`] positioned at the first offending byte if the
/// input is not valid JSON, is not valid UTF-8, nests deeper than
/// `options.max_depth`, or has anything but whitespace after the value.
///
/// # Examples
///
/// ```rust
/// use jsonchain::{DecodeOptions, Kind, decode};
///
/// let value = decode(br#"{"a": [true]}"#, DecodeOptions::default()).unwrap();
/// assert_eq!(value.kind(), Kind::Object);
///
/// let err = decode(b"[1,]", DecodeOptions::default()).unwrap_err();
/// assert_eq!(err.to_string(), "invalid character ']' at line 1, column 4");
/// ```
pub fn decode(input: &[u8], options: DecodeOptions) -> Result<Value> {
    tracing::trace!(
        len = input.len(),
        max_depth = options.max_depth,
        "decoding JSON"
    );
    let result = Parser::new(input, options).parse_document();
    if let Err(err) = &result {
        tracing::debug!(
            reason = %err.reason(),
            line = err.line(),
            column = err.column(),
            "JSON decode failed"
        );
    }
    result
}

/// Decodes `text` with the default nesting limit of [`DEFAULT_MAX_DEPTH`].
///
/// # Errors
///
/// See [`decode`].
pub fn parse(text: &str) -> Result<Value> {
    decode(text.as_bytes(), DecodeOptions::default())
}

/// Decodes `text`, allowing at most `max_depth` nested containers (`0` for no
/// limit).
///
/// # Errors
///
/// See [`decode`].
pub fn parse_with_limit(text: &str, max_depth: usize) -> Result<Value> {
    decode(text.as_bytes(), DecodeOptions::with_max_depth(max_depth))
}

/// Decodes `text` without a nesting limit.
///
/// # Errors
///
/// See [`decode`].
pub fn parse_unlimited(text: &str) -> Result<Value> {
    decode(text.as_bytes(), DecodeOptions::unlimited())
}

impl FromStr for Value {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

/// One open container. Frames live on a heap stack, so nesting costs no
/// native stack.
#[derive(Debug)]
enum Frame {
    Array(Array),
    Object {
        map: Map,
        /// Key waiting for its value.
        pending_key: String,
    },
}

impl Frame {
    fn push(&mut self, value: Value) {
        match self {
            Frame::Array(elements) => elements.push(value),
            Frame::Object { map, pending_key } => {
                if let Some(replaced) = map.insert(mem::take(pending_key), value) {
                    drop_flat(replaced);
                }
            }
        }
    }

    fn closing(&self) -> u8 {
        match self {
            Frame::Array(_) => b']',
            Frame::Object { .. } => b'}',
        }
    }

    fn into_value(self) -> Value {
        match self {
            Frame::Array(elements) => Value::Array(elements),
            Frame::Object { map, .. } => Value::Object(map),
        }
    }
}

/// Drops a tree without recursing once per level.
fn drop_flat(value: Value) {
    let mut pending = Vec::from([value]);
    while let Some(value) = pending.pop() {
        match value {
            Value::Array(elements) => pending.extend(elements),
            Value::Object(map) => pending.extend(map.into_values()),
            _ => {}
        }
    }
}

struct Parser<'src> {
    input: &'src [u8],
    pos: usize,
    /// Open containers, innermost last.
    frames: Vec<Frame>,
    options: DecodeOptions,
}

impl Drop for Parser<'_> {
    /// Frames left by a failed decode may hold arbitrarily deep members.
    fn drop(&mut self) {
        for frame in self.frames.drain(..) {
            drop_flat(frame.into_value());
        }
    }
}

impl<'src> Parser<'src> {
    fn new(input: &'src [u8], options: DecodeOptions) -> Self {
        Self {
            input,
            pos: 0,
            frames: Vec::with_capacity(16),
            options,
        }
    }

    fn parse_document(&mut self) -> Result<Value> {
        self.skip_whitespace();
        let value = self.parse_value()?;
        self.skip_whitespace();
        if self.pos < self.input.len() {
            drop_flat(value);
            return Err(self.error(self.pos, SyntaxError::TrailingData));
        }
        Ok(value)
    }

    // --------------------------------------------------------------------------------------------
    // Cursor
    // --------------------------------------------------------------------------------------------

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline]
    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn skip_digits(&mut self) {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
    }

    /// One or more digits.
    fn expect_digits(&mut self) -> Result<()> {
        if !matches!(self.peek(), Some(b'0'..=b'9')) {
            return Err(self.unexpected(self.pos));
        }
        self.skip_digits();
        Ok(())
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        if self.peek() != Some(byte) {
            return Err(self.unexpected(self.pos));
        }
        self.pos += 1;
        Ok(())
    }

    // --------------------------------------------------------------------------------------------
    // Values
    // --------------------------------------------------------------------------------------------

    /// Parses one value, containers included.
    ///
    /// Each pass of the outer loop reads the start of a value. A scalar or an
    /// empty container is complete at once and is handed to the innermost
    /// open frame; a frame that sees its closing bracket becomes a value in
    /// turn. Otherwise a new frame is opened and the next pass reads its first
    /// member.
    fn parse_value(&mut self) -> Result<Value> {
        'value: loop {
            let mut value = match self.peek() {
                None => return Err(self.unexpected(self.pos)),
                Some(b'[') => {
                    self.open()?;
                    if self.peek() != Some(b']') {
                        self.frames.push(Frame::Array(Array::new()));
                        continue 'value;
                    }
                    self.pos += 1;
                    Value::Array(Array::new())
                }
                Some(b'{') => {
                    self.open()?;
                    if self.peek() != Some(b'}') {
                        let pending_key = self.parse_key()?;
                        self.frames.push(Frame::Object {
                            map: Map::new(),
                            pending_key,
                        });
                        continue 'value;
                    }
                    self.pos += 1;
                    Value::Object(Map::new())
                }
                Some(b'"') => Value::String(self.parse_string()?),
                Some(b'-' | b'0'..=b'9') => self.parse_number()?,
                Some(first) => match Literal::from_first(first) {
                    Some(literal) => self.parse_literal(literal)?,
                    None => return Err(self.unexpected(self.pos)),
                },
            };

            loop {
                let Some(mut frame) = self.frames.pop() else {
                    return Ok(value);
                };
                frame.push(value);

                self.skip_whitespace();
                match self.peek() {
                    Some(b',') => {
                        self.pos += 1;
                        self.skip_whitespace();
                        self.resume(frame)?;
                        continue 'value;
                    }
                    Some(byte) if byte == frame.closing() => {
                        self.pos += 1;
                        value = frame.into_value();
                    }
                    _ => {
                        self.frames.push(frame);
                        return Err(self.unexpected(self.pos));
                    }
                }
            }
        }
    }

    /// Puts `frame` back on the stack after a `,`, reading the next key if it
    /// is an object. The frame is on the stack even if that fails.
    fn resume(&mut self, mut frame: Frame) -> Result<()> {
        if let Frame::Object { pending_key, .. } = &mut frame {
            match self.parse_key() {
                Ok(key) => *pending_key = key,
                Err(err) => {
                    self.frames.push(frame);
                    return Err(err);
                }
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Consumes an opening bracket, enforcing the depth limit against the
    /// containers already open.
    fn open(&mut self) -> Result<()> {
        if self.options.depth_exceeded(self.frames.len()) {
            return Err(self.error(
                self.pos,
                SyntaxError::DepthExceeded(self.options.max_depth),
            ));
        }
        self.pos += 1;
        self.skip_whitespace();
        Ok(())
    }

    /// Parses `"key"` and the following `:`, leaving the cursor on the value.
    fn parse_key(&mut self) -> Result<String> {
        if self.peek() != Some(b'"') {
            return Err(self.unexpected(self.pos));
        }
        let key = self.parse_string()?;
        self.skip_whitespace();
        self.expect(b':')?;
        self.skip_whitespace();
        Ok(key)
    }

    fn parse_literal(&mut self, literal: Literal) -> Result<Value> {
        match literal.match_prefix(&self.input[self.pos..]) {
            Ok(len) => {
                self.pos += len;
                Ok(literal.value())
            }
            Err(mismatch) => Err(self.unexpected(self.pos + mismatch)),
        }
    }

    fn parse_number(&mut self) -> Result<Value> {
        let start = self.pos;
        let mut integral = true;

        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        match self.peek() {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => self.skip_digits(),
            _ => return Err(self.unexpected(self.pos)),
        }
        if self.peek() == Some(b'.') {
            integral = false;
            self.pos += 1;
            self.expect_digits()?;
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            integral = false;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            self.expect_digits()?;
        }

        // The grammar above only admits ASCII.
        let literal = str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| self.error(start, SyntaxError::InvalidNumber))?;
        let lexeme = if integral {
            NumberLexeme::Integer(literal)
        } else {
            NumberLexeme::Float(literal)
        };
        lexeme.to_value().map_err(|reason| self.error(start, reason))
    }

    // --------------------------------------------------------------------------------------------
    // Strings
    // --------------------------------------------------------------------------------------------

    fn parse_string(&mut self) -> Result<String> {
        self.expect(b'"')?;
        let mut out = String::new();

        loop {
            let rest = &self.input[self.pos..];
            let run = rest
                .iter()
                .position(|&b| b == b'"' || b == b'\\' || b < 0x20)
                .unwrap_or(rest.len());
            if run > 0 {
                let text = str::from_utf8(&rest[..run]).map_err(|err| {
                    self.error(self.pos + err.valid_up_to(), SyntaxError::InvalidUtf8)
                })?;
                out.push_str(text);
                self.pos += run;
            }

            match self.peek() {
                None => return Err(self.unexpected(self.pos)),
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    self.pos += 1;
                    self.parse_escape(&mut out)?;
                }
                Some(control) => {
                    return Err(self.error(
                        self.pos,
                        SyntaxError::ControlCharacter(char::from(control)),
                    ));
                }
            }
        }
    }

    /// Parses the escape after a backslash.
    fn parse_escape(&mut self, out: &mut String) -> Result<()> {
        let c = match self.peek() {
            None => return Err(self.unexpected(self.pos)),
            Some(b'"') => '"',
            Some(b'\\') => '\\',
            Some(b'/') => '/',
            Some(b'b') => '\u{0008}',
            Some(b'f') => '\u{000C}',
            Some(b'n') => '\n',
            Some(b'r') => '\r',
            Some(b't') => '\t',
            Some(b'u') => {
                self.pos += 1;
                return self.parse_unicode_escape(out);
            }
            Some(_) => {
                let c = self.char_at(self.pos)?;
                return Err(self.error(self.pos, SyntaxError::InvalidEscape(c)));
            }
        };
        self.pos += 1;
        out.push(c);
        Ok(())
    }

    /// Parses the digits after `\u`, and the low half of a surrogate pair if
    /// the first unit is a high surrogate.
    fn parse_unicode_escape(&mut self, out: &mut String) -> Result<()> {
        // Surrogate errors point at the backslash of the first escape.
        let escape_start = self.pos - 2;
        let high = self.code_unit()?;

        let low = if escape::is_high_surrogate(high) {
            if !self.input[self.pos..].starts_with(b"\\u") {
                return Err(self.error(escape_start, SyntaxError::LoneSurrogate(high)));
            }
            self.pos += 2;
            let low = self.code_unit()?;
            if !escape::is_low_surrogate(low) {
                return Err(self.error(escape_start, SyntaxError::LoneSurrogate(high)));
            }
            Some(low)
        } else {
            None
        };

        let c = escape::decode_code_units(high, low)
            .ok_or_else(|| self.error(escape_start, SyntaxError::LoneSurrogate(high)))?;
        out.push(c);
        Ok(())
    }

    fn code_unit(&mut self) -> Result<u16> {
        let mut escape = UnicodeEscapeBuffer::new();
        loop {
            let Some(b) = self.peek() else {
                return Err(self.unexpected(self.pos));
            };
            match escape.feed(b) {
                Ok(unit) => {
                    self.pos += 1;
                    if let Some(unit) = unit {
                        return Ok(unit);
                    }
                }
                Err(reason) => return Err(self.error(self.pos, reason)),
            }
        }
    }

    // --------------------------------------------------------------------------------------------
    // Errors
    // --------------------------------------------------------------------------------------------

    fn error(&self, offset: usize, reason: SyntaxError) -> DecodeError {
        DecodeError::at(self.input, offset, reason)
    }

    /// The error for finding the byte at `offset` where something else was
    /// required.
    fn unexpected(&self, offset: usize) -> DecodeError {
        if offset >= self.input.len() {
            return self.error(offset, SyntaxError::UnexpectedEndOfInput);
        }
        match self.char_at(offset) {
            Ok(c) => self.error(offset, SyntaxError::InvalidCharacter(c)),
            Err(err) => err,
        }
    }

    /// Decodes the character starting at `offset`.
    fn char_at(&self, offset: usize) -> Result<char> {
        let width = match self.input[offset] {
            0x00..=0x7F => 1,
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 0,
        };
        self.input
            .get(offset..offset + width)
            .and_then(|bytes| str::from_utf8(bytes).ok())
            .and_then(|s| s.chars().next())
            .ok_or_else(|| self.error(offset, SyntaxError::InvalidUtf8))
    }
}
