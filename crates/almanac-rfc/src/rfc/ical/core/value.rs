//! Typed property values.

use super::{Date, DateTime, RRule, UtcOffset};

/// The value of a property, typed where the property name implies a type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Unescaped `TEXT`.
    Text(String),
    Integer(i32),
    DateTime(DateTime),
    Date(Date),
    Recur(Box<RRule>),
    UtcOffset(UtcOffset),
    /// Anything the parser does not type; kept as raw text.
    Unknown(String),
}
