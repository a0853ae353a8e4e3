/// Nesting limit used by [`DecodeOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Configuration options for [`decode`](crate::decode).
///
/// # Examples
///
/// ```rust
/// use jsonchain::{DecodeOptions, decode};
///
/// let shallow = DecodeOptions::with_max_depth(1);
/// assert!(decode(b"[1, 2]", shallow).is_ok());
/// assert!(decode(b"[[1], 2]", shallow).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// How many objects and arrays may be open at the same time.
    ///
    /// Opening one more than this fails with
    /// [`SyntaxError::DepthExceeded`](crate::SyntaxError::DepthExceeded) at
    /// the offending bracket. `0` disables the check. Open containers are
    /// tracked on the heap, so any limit is safe to decode with.
    ///
    /// # Default
    ///
    /// [`DEFAULT_MAX_DEPTH`]
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    /// Options with the given nesting limit (`0` for none).
    #[must_use]
    pub const fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Options without a nesting limit.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self::with_max_depth(0)
    }

    pub(crate) fn depth_exceeded(&self, depth: usize) -> bool {
        self.max_depth > 0 && depth >= self.max_depth
    }
}
