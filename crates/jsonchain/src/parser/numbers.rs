use crate::{Integer, SyntaxError, Value};

/// Lexical shape of a number literal that already matched the JSON grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberLexeme<'a> {
    /// No `.` and no exponent.
    Integer(&'a str),
    /// Has `.` or an exponent.
    Float(&'a str),
}

impl NumberLexeme<'_> {
    /// Converts the literal to a node.
    ///
    /// Integer literals try `i64`, then `u64`, then fall back to `f64` with
    /// whatever precision loss that implies. A literal whose magnitude does
    /// not fit a finite `f64` is rejected.
    pub fn to_value(self) -> Result<Value, SyntaxError> {
        let literal = match self {
            NumberLexeme::Integer(literal) => {
                if let Ok(n) = literal.parse::<i64>() {
                    return Ok(Value::Integer(Integer::Signed(n)));
                }
                if let Ok(n) = literal.parse::<u64>() {
                    return Ok(Value::Integer(Integer::Unsigned(n)));
                }
                literal
            }
            NumberLexeme::Float(literal) => literal,
        };

        let n: f64 = literal.parse().map_err(|_| SyntaxError::InvalidNumber)?;
        if n.is_finite() {
            Ok(Value::Float(n))
        } else {
            Err(SyntaxError::NumberOutOfRange)
        }
    }
}
