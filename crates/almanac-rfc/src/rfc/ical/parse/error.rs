//! iCalendar parse error types.

use std::fmt;

/// Result type for iCalendar parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that occurred during iCalendar parsing, with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// 1-based physical line the offending content line starts on.
    pub line: usize,
    /// 1-based column within the logical line, 0 when not applicable.
    pub column: usize,
    /// Offending text, trimmed for display.
    pub context: Option<String>,
}

impl ParseError {
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize, column: usize) -> Self {
        Self {
            kind,
            line,
            column,
            context: None,
        }
    }

    /// Creates an error that is not tied to a position in the input.
    #[must_use]
    pub fn semantic(kind: ParseErrorKind) -> Self {
        Self::new(kind, 0, 0)
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context: String = context.into();
        self.context = Some(context.chars().take(80).collect());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "line {}, column {}: {}", self.line, self.column, self.kind)?;
        } else {
            write!(f, "{}", self.kind)?;
        }
        if let Some(context) = &self.context {
            write!(f, " ({context})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Kinds of iCalendar parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    EmptyInput,
    /// Content line has no `:` separating name from value.
    MissingColon,
    InvalidPropertyName,
    UnterminatedQuote,
    /// Input does not start with `BEGIN:VCALENDAR`.
    NotCalendar,
    /// `BEGIN` without its matching `END`.
    UnclosedComponent(String),
    /// `END` that does not close the innermost open component.
    MismatchedEnd { expected: String, found: String },
    /// Content after the closing `END:VCALENDAR`.
    TrailingContent,
    InvalidDate,
    InvalidDateTime,
    InvalidUtcOffset,
    InvalidInteger,
    InvalidDuration,
    InvalidRRule(String),
    MissingComponent(&'static str),
    MissingProperty(&'static str),
    /// Structurally parsed, but the event it describes is not valid.
    InvalidEvent(String),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "empty input"),
            Self::MissingColon => write!(f, "content line is missing ':'"),
            Self::InvalidPropertyName => write!(f, "invalid property name"),
            Self::UnterminatedQuote => write!(f, "unterminated quoted parameter value"),
            Self::NotCalendar => write!(f, "input does not start with BEGIN:VCALENDAR"),
            Self::UnclosedComponent(name) => write!(f, "component {name} is never closed"),
            Self::MismatchedEnd { expected, found } => {
                write!(f, "expected END:{expected}, found END:{found}")
            }
            Self::TrailingContent => write!(f, "content after END:VCALENDAR"),
            Self::InvalidDate => write!(f, "invalid DATE value"),
            Self::InvalidDateTime => write!(f, "invalid DATE-TIME value"),
            Self::InvalidUtcOffset => write!(f, "invalid UTC-OFFSET value"),
            Self::InvalidInteger => write!(f, "invalid INTEGER value"),
            Self::InvalidDuration => write!(f, "invalid DURATION value"),
            Self::InvalidRRule(msg) => write!(f, "invalid RRULE: {msg}"),
            Self::MissingComponent(name) => write!(f, "missing required component {name}"),
            Self::MissingProperty(name) => write!(f, "missing required property {name}"),
            Self::InvalidEvent(msg) => write!(f, "invalid event: {msg}"),
        }
    }
}
