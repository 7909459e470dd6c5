//! DAV XML request parsing.

mod error;
mod propfind;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use propfind::parse_propfind;
