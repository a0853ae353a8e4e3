//! Decoding of `\uXXXX` escapes.
//!
//! [`UnicodeEscapeBuffer`] accumulates exactly four ASCII hexadecimal digits
//! into a UTF-16 code unit. Pairing surrogates is left to the caller, since a
//! high surrogate is only meaningful together with the escape that follows it.

use crate::SyntaxError;

/// Accumulates four hexadecimal digits into one UTF-16 code unit.
#[derive(Debug)]
pub(crate) struct UnicodeEscapeBuffer {
    acc: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self { acc: 0, len: 0 }
    }

    #[inline]
    fn hex_val(b: u8) -> Option<u16> {
        match b {
            b'0'..=b'9' => Some(u16::from(b - b'0')),
            b'a'..=b'f' => Some(u16::from(b - b'a' + 10)),
            b'A'..=b'F' => Some(u16::from(b - b'A' + 10)),
            _ => None,
        }
    }

    /// Feeds one byte of the escape.
    ///
    /// - `Ok(None)` while fewer than four digits have been seen.
    /// - `Ok(Some(unit))` on the fourth digit; the buffer is then reset.
    /// - `Err` if `b` is not an ASCII hex digit.
    pub fn feed(&mut self, b: u8) -> Result<Option<u16>, SyntaxError> {
        let d = Self::hex_val(b).ok_or(SyntaxError::InvalidUnicodeEscape)?;
        self.acc = (self.acc << 4) | d;
        self.len += 1;

        if self.len < 4 {
            return Ok(None);
        }

        let unit = self.acc;
        self.acc = 0;
        self.len = 0;
        Ok(Some(unit))
    }
}

pub(crate) fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

pub(crate) fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Decodes a single code unit, or a surrogate pair when `low` is given.
///
/// Returns `None` for anything that is not a valid scalar value, e.g. an
/// unpaired surrogate.
pub(crate) fn decode_code_units(high: u16, low: Option<u16>) -> Option<char> {
    let mut units = char::decode_utf16(core::iter::once(high).chain(low));
    let c = units.next()?.ok()?;
    units.next().is_none().then_some(c)
}
