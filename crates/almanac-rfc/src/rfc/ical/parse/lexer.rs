//! Content line lexing (RFC 5545 §3.1).

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::Parameter;

/// A logical content line after unfolding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Uppercased property name.
    pub name: String,
    pub params: Vec<Parameter>,
    /// Raw value text, still escaped.
    pub value: String,
    /// Physical line the content line started on.
    pub line: usize,
    /// Column at which the value starts.
    pub value_column: usize,
}

impl ContentLine {
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .and_then(Parameter::value)
    }
}

/// Splits input into logical lines, joining folded continuations.
///
/// Accepts CRLF and bare LF. Each entry carries the 1-based physical line
/// number it started on. Blank lines are dropped.
#[must_use]
pub fn unfold(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (idx, raw) in input.split('\n').enumerate() {
        let physical = raw.strip_suffix('\r').unwrap_or(raw);
        if let Some(continuation) = physical
            .strip_prefix(' ')
            .or_else(|| physical.strip_prefix('\t'))
        {
            if let Some((_, last)) = lines.last_mut() {
                last.push_str(continuation);
                continue;
            }
        }
        if !physical.is_empty() {
            lines.push((idx + 1, physical.to_string()));
        }
    }

    lines
}

/// Parses one logical line into name, parameters and raw value.
///
/// ## Errors
/// Returns an error if the name is empty or malformed, a quoted parameter
/// value is unterminated, or there is no `:` before the value.
pub fn parse_content_line(text: &str, line: usize) -> ParseResult<ContentLine> {
    let name_end = text
        .find([';', ':'])
        .ok_or_else(|| ParseError::new(ParseErrorKind::MissingColon, line, 1).with_context(text))?;
    let name = &text[..name_end];
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ParseError::new(ParseErrorKind::InvalidPropertyName, line, 1).with_context(text));
    }

    let mut params = Vec::new();
    let mut rest = &text[name_end..];

    while let Some(after_semi) = rest.strip_prefix(';') {
        let column = text.len() - after_semi.len() + 1;
        let eq = after_semi
            .find('=')
            .ok_or_else(|| ParseError::new(ParseErrorKind::MissingColon, line, column))?;
        let param_name = &after_semi[..eq];
        let (values, remaining) = parse_param_values(&after_semi[eq + 1..], line, column)?;
        params.push(Parameter::with_values(param_name, values));
        rest = remaining;
    }

    let value = rest
        .strip_prefix(':')
        .ok_or_else(|| ParseError::new(ParseErrorKind::MissingColon, line, 1).with_context(text))?;

    Ok(ContentLine {
        name: name.to_ascii_uppercase(),
        params,
        value: value.to_string(),
        line,
        value_column: text.len() - value.len() + 1,
    })
}

/// Reads a comma-separated parameter value list up to the next unquoted `;` or `:`.
fn parse_param_values(input: &str, line: usize, column: usize) -> ParseResult<(Vec<String>, &str)> {
    let mut values = Vec::new();
    let mut rest = input;

    loop {
        if let Some(quoted) = rest.strip_prefix('"') {
            let close = quoted
                .find('"')
                .ok_or_else(|| ParseError::new(ParseErrorKind::UnterminatedQuote, line, column))?;
            values.push(decode_caret(&quoted[..close]));
            rest = &quoted[close + 1..];
        } else {
            let end = rest.find([',', ';', ':']).unwrap_or(rest.len());
            values.push(decode_caret(&rest[..end]));
            rest = &rest[end..];
        }

        match rest.strip_prefix(',') {
            Some(next) => rest = next,
            None => return Ok((values, rest)),
        }
    }
}

/// Decodes RFC 6868 caret escapes in a parameter value.
fn decode_caret(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '^' {
            match chars.peek() {
                Some('n') => {
                    out.push('\n');
                    chars.next();
                }
                Some('\'') => {
                    out.push('"');
                    chars.next();
                }
                Some('^') => {
                    out.push('^');
                    chars.next();
                }
                _ => out.push('^'),
            }
        } else {
            out.push(c);
        }
    }
    out
}
