//! iCalendar property types (RFC 5545 §3.5, §3.7-3.8).

use super::{Date, DateTime, Parameter, RRule, UtcOffset, Value};
use crate::rfc::ical::build::escape_text;

/// Property names used by the parser, the codec and the `VTIMEZONE` builder.
pub mod names {
    pub const BEGIN: &str = "BEGIN";
    pub const END: &str = "END";
    pub const VERSION: &str = "VERSION";
    pub const PRODID: &str = "PRODID";
    pub const CALSCALE: &str = "CALSCALE";
    pub const UID: &str = "UID";
    pub const DTSTAMP: &str = "DTSTAMP";
    pub const DTSTART: &str = "DTSTART";
    pub const DTEND: &str = "DTEND";
    pub const DURATION: &str = "DURATION";
    pub const RRULE: &str = "RRULE";
    pub const RECURRENCE_ID: &str = "RECURRENCE-ID";
    pub const SUMMARY: &str = "SUMMARY";
    pub const LOCATION: &str = "LOCATION";
    pub const DESCRIPTION: &str = "DESCRIPTION";
    pub const CLASS: &str = "CLASS";
    pub const TZID: &str = "TZID";
    pub const TZNAME: &str = "TZNAME";
    pub const TZOFFSETFROM: &str = "TZOFFSETFROM";
    pub const TZOFFSETTO: &str = "TZOFFSETTO";
}

/// A property: name, parameters and value.
///
/// `raw_value` keeps the value text exactly as it appeared on the wire (after
/// unfolding) so untyped properties serialize back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<Parameter>,
    pub value: Value,
    pub raw_value: String,
}

impl Property {
    /// Creates a property with a text value.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            raw_value: escape_text(&value),
            value: Value::Text(value),
        }
    }

    /// Creates a date-time property. Zoned values get their `TZID` parameter.
    #[must_use]
    pub fn datetime(name: impl Into<String>, dt: DateTime) -> Self {
        let params = dt.tzid().map(Parameter::tzid).into_iter().collect();
        Self {
            name: name.into().to_ascii_uppercase(),
            params,
            raw_value: dt.to_string(),
            value: Value::DateTime(dt),
        }
    }

    #[must_use]
    pub fn date(name: impl Into<String>, d: Date) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: vec![Parameter::value_type("DATE")],
            raw_value: d.to_string(),
            value: Value::Date(d),
        }
    }

    #[must_use]
    pub fn recur(name: impl Into<String>, rule: RRule) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            raw_value: rule.to_string(),
            value: Value::Recur(Box::new(rule)),
        }
    }

    #[must_use]
    pub fn utc_offset(name: impl Into<String>, offset: UtcOffset) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            raw_value: offset.to_string(),
            value: Value::UtcOffset(offset),
        }
    }

    /// Returns the value of the first parameter with the given name.
    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .and_then(Parameter::value)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime> {
        match &self.value {
            Value::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<&Date> {
        match &self.value {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_rrule(&self) -> Option<&RRule> {
        match &self.value {
            Value::Recur(rule) => Some(rule),
            _ => None,
        }
    }
}
