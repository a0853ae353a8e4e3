use crate::Value;

/// One of the three keyword literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Literal {
    Null,
    True,
    False,
}

impl Literal {
    /// The literal a value starting with `first` must be, if any.
    pub fn from_first(first: u8) -> Option<Self> {
        match first {
            b'n' => Some(Literal::Null),
            b't' => Some(Literal::True),
            b'f' => Some(Literal::False),
            _ => None,
        }
    }

    fn text(self) -> &'static [u8] {
        match self {
            Literal::Null => b"null",
            Literal::True => b"true",
            Literal::False => b"false",
        }
    }

    pub fn value(self) -> Value {
        match self {
            Literal::Null => Value::Null,
            Literal::True => Value::Boolean(true),
            Literal::False => Value::Boolean(false),
        }
    }

    /// Matches the literal against the start of `rest`.
    ///
    /// `Ok(len)` on a full match, otherwise `Err(i)` where `i` is the index of
    /// the first byte that differs (or `rest.len()` if input ran out).
    pub fn match_prefix(self, rest: &[u8]) -> Result<usize, usize> {
        let text = self.text();
        match text.iter().zip(rest).position(|(expected, actual)| expected != actual) {
            Some(i) => Err(i),
            None if rest.len() < text.len() => Err(rest.len()),
            None => Ok(text.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Literal::True, b"true", Ok(4))]
    #[case(Literal::True, b"true,", Ok(4))]
    #[case(Literal::True, b"tru!", Err(3))]
    #[case(Literal::True, b"tru", Err(3))]
    #[case(Literal::False, b"falsy", Err(4))]
    #[case(Literal::Null, b"nULL", Err(1))]
    #[case(Literal::Null, b"nullx", Ok(4))]
    fn matches_prefix(
        #[case] literal: Literal,
        #[case] rest: &[u8],
        #[case] expected: Result<usize, usize>,
    ) {
        assert_eq!(literal.match_prefix(rest), expected);
    }

    #[test]
    fn first_byte_selects_literal() {
        assert_eq!(Literal::from_first(b'n'), Some(Literal::Null));
        assert_eq!(Literal::from_first(b'N'), None);
        assert_eq!(Literal::False.value(), Value::Boolean(false));
    }
}
