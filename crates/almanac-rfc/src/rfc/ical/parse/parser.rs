//! iCalendar document parser.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{ContentLine, parse_content_line, unfold};
use super::values::{
    parse_date, parse_datetime, parse_integer, parse_rrule, parse_utc_offset, unescape_text,
};
use crate::rfc::ical::core::{Component, ComponentKind, ICalendar, Property, Value, names};

/// Properties whose value is `TEXT`.
const TEXT_PROPERTIES: &[&str] = &[
    "UID",
    "SUMMARY",
    "LOCATION",
    "DESCRIPTION",
    "COMMENT",
    "CONTACT",
    "CLASS",
    "STATUS",
    "TRANSP",
    "TZID",
    "TZNAME",
    "PRODID",
    "VERSION",
    "CALSCALE",
    "METHOD",
];

/// Properties whose value is `DATE-TIME` or, with `VALUE=DATE`, `DATE`.
const DATE_TIME_PROPERTIES: &[&str] = &[
    "DTSTART",
    "DTEND",
    "DTSTAMP",
    "DUE",
    "RECURRENCE-ID",
    "CREATED",
    "LAST-MODIFIED",
];

const INTEGER_PROPERTIES: &[&str] = &["SEQUENCE", "PRIORITY"];

/// Parses an iCalendar document.
///
/// ## Summary
/// Unfolds the input, lexes each content line and builds the component tree
/// rooted at `VCALENDAR`. Properties with a known value type are parsed into a
/// typed `Value`; everything else is kept raw.
///
/// ## Errors
/// Returns an error if the input is empty, is not a `VCALENDAR`, has
/// unbalanced `BEGIN`/`END` lines, has content after the calendar, or contains
/// a malformed content line or typed value.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<ICalendar> {
    let lines = unfold(input.trim_start_matches('\u{feff}'));
    let Some((first_line, first)) = lines.first() else {
        return Err(ParseError::semantic(ParseErrorKind::EmptyInput));
    };

    let first = parse_content_line(first, *first_line)?;
    if first.name != names::BEGIN || !first.value.eq_ignore_ascii_case("VCALENDAR") {
        return Err(
            ParseError::new(ParseErrorKind::NotCalendar, first.line, 1).with_context(first.value)
        );
    }

    let mut iter = lines[1..].iter();
    let root = parse_component(Component::calendar(), first.line, &mut iter)?;

    if let Some((line, _)) = iter.next() {
        return Err(ParseError::new(ParseErrorKind::TrailingContent, *line, 1));
    }

    tracing::debug!(children = root.children.len(), "Parsed iCalendar document");
    Ok(ICalendar { root })
}

/// Fills `component` from the lines that follow its `BEGIN` up to the matching `END`.
fn parse_component<'a>(
    mut component: Component,
    begin_line: usize,
    lines: &mut impl Iterator<Item = &'a (usize, String)>,
) -> ParseResult<Component> {
    while let Some((line_no, text)) = lines.next() {
        let line = parse_content_line(text, *line_no)?;

        match line.name.as_str() {
            names::BEGIN => {
                let child = Component::custom(line.value.to_ascii_uppercase());
                let child = parse_component(child, line.line, lines)?;
                component.add_child(child);
            }
            names::END => {
                if line.value.eq_ignore_ascii_case(&component.name) {
                    return Ok(component);
                }
                return Err(ParseError::new(
                    ParseErrorKind::MismatchedEnd {
                        expected: component.name.clone(),
                        found: line.value.clone(),
                    },
                    line.line,
                    line.value_column,
                ));
            }
            _ => {
                let property = build_property(line, component.kind)?;
                component.add_property(property);
            }
        }
    }

    Err(ParseError::new(
        ParseErrorKind::UnclosedComponent(component.name.clone()),
        begin_line,
        1,
    ))
}

/// Types the value of a content line according to its property name.
fn build_property(line: ContentLine, parent: Option<ComponentKind>) -> ParseResult<Property> {
    let name = line.name.as_str();
    let (ln, col) = (line.line, line.value_column);

    let value = if TEXT_PROPERTIES.contains(&name) {
        Value::Text(unescape_text(&line.value))
    } else if DATE_TIME_PROPERTIES.contains(&name) {
        let is_date = line
            .param("VALUE")
            .is_some_and(|v| v.eq_ignore_ascii_case("DATE"))
            || line.value.len() == 8;
        if is_date {
            Value::Date(parse_date(&line.value, ln, col)?)
        } else {
            Value::DateTime(parse_datetime(&line.value, line.param("TZID"), ln, col)?)
        }
    } else if INTEGER_PROPERTIES.contains(&name) {
        Value::Integer(parse_integer(&line.value, ln, col)?)
    } else if name == names::TZOFFSETFROM || name == names::TZOFFSETTO {
        Value::UtcOffset(parse_utc_offset(&line.value, ln, col)?)
    } else if name == names::RRULE {
        match parse_rrule(&line.value, ln, col) {
            Ok(rule) => Value::Recur(Box::new(rule)),
            // Only the event's own rule has to fit the model; observance rules
            // inside client-supplied VTIMEZONEs are kept verbatim.
            Err(err) if parent != Some(ComponentKind::Event) => {
                tracing::debug!(%err, "Keeping untyped RRULE outside VEVENT");
                Value::Unknown(line.value.clone())
            }
            Err(err) => return Err(err),
        }
    } else {
        Value::Unknown(line.value.clone())
    };

    Ok(Property {
        name: line.name,
        params: line.params,
        value,
        raw_value: line.value,
    })
}
