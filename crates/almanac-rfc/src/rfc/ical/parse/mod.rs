//! iCalendar parsing (RFC 5545).
//!
//! - Lexer: unfolding and content line splitting
//! - Values: typed value parsers
//! - Parser: component tree construction

mod error;
mod lexer;
mod parser;
mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{ContentLine, parse_content_line, unfold};
pub use parser::parse;
pub use values::{
    parse_date, parse_datetime, parse_duration, parse_integer, parse_rrule, parse_utc_offset,
    unescape_text,
};
