//! iCalendar document serialization.

use super::{escape_param_value, escape_text, fold_line};
use crate::rfc::ical::core::{Component, ICalendar, Property, Value, names};

/// Serializes a whole iCalendar object.
///
/// ## Summary
/// Writes the VCALENDAR tree with CRLF line endings, folded at 75 octets.
#[must_use]
pub fn serialize(ical: &ICalendar) -> String {
    let mut out = String::new();
    serialize_component(&ical.root, &mut out);
    out
}

/// Serializes a component and its children into `out`.
pub fn serialize_component(component: &Component, out: &mut String) {
    out.push_str(&fold_line(&format!("{}:{}", names::BEGIN, component.name)));
    for prop in &component.properties {
        out.push_str(&serialize_property(prop));
    }
    for child in &component.children {
        serialize_component(child, out);
    }
    out.push_str(&fold_line(&format!("{}:{}", names::END, component.name)));
}

/// Serializes a single property as one folded content line.
#[must_use]
pub fn serialize_property(prop: &Property) -> String {
    let mut line = prop.name.clone();
    for param in &prop.params {
        line.push(';');
        line.push_str(&param.name);
        line.push('=');
        let values: Vec<String> = param.values.iter().map(|v| escape_param_value(v)).collect();
        line.push_str(&values.join(","));
    }
    line.push(':');
    line.push_str(&value_text(&prop.value, &prop.raw_value));
    fold_line(&line)
}

fn value_text(value: &Value, raw: &str) -> String {
    match value {
        Value::Text(text) => escape_text(text),
        Value::Integer(n) => n.to_string(),
        Value::DateTime(dt) => dt.to_string(),
        Value::Date(d) => d.to_string(),
        Value::Recur(rule) => rule.to_string(),
        Value::UtcOffset(offset) => offset.to_string(),
        Value::Unknown(_) => raw.to_string(),
    }
}
