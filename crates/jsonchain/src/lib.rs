//! A JSON decoder with a chainable, error-propagating accessor layer.
//!
//! Decoding turns a complete JSON text into an owned [`Value`] tree. A
//! [`Chain`] then walks that tree by key, index or slice and finishes with a
//! typed extraction. Errors stick to the chain, so a whole path can be written
//! out and checked once at the end:
//!
//! ```rust
//! use jsonchain::parse;
//!
//! let doc = parse(r#"{"servers": [{"port": 8080}, {"port": 8443}]}"#).unwrap();
//! let port = doc.chain().field("servers").index(1).field("port").as_u16();
//! assert_eq!(port, Ok(8443));
//!
//! let missing = doc.chain().field("servers").index(7).field("port").as_u16();
//! assert!(missing.is_err());
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod chain;
mod error;
mod kind;
mod parser;
mod value;


pub use chain::{Chain, ValueRef};
pub use error::{AccessError, DecodeError, Error, SyntaxError};
pub use kind::Kind;
pub use parser::{
    DEFAULT_MAX_DEPTH, DecodeOptions, decode, parse, parse_unlimited, parse_with_limit,
};
pub use value::{Array, Integer, Map, Value};
