//! Value parsers for the iCalendar types the codec reads (RFC 5545 §3.3).

use almanac_core::types::{Frequency, Weekday, WeekdayNum};
use chrono::{NaiveDate, NaiveTime, TimeDelta};

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{Date, DateTime, DateTimeForm, RRule, RRuleUntil, UtcOffset};

fn digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_naive_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !digits(s) {
        return None;
    }
    let year = s[0..4].parse().ok()?;
    let month = s[4..6].parse().ok()?;
    let day = s[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses a `DATE` value (`YYYYMMDD`).
///
/// ## Errors
/// Returns `InvalidDate` for malformed or out-of-range dates.
pub fn parse_date(s: &str, line: usize, col: usize) -> ParseResult<Date> {
    parse_naive_date(s)
        .map(Date)
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidDate, line, col).with_context(s))
}

/// Parses a `DATE-TIME` value (`YYYYMMDDTHHMMSS[Z]`).
///
/// A trailing `Z` wins over any `TZID`, as required by RFC 5545 §3.3.5.
///
/// ## Errors
/// Returns `InvalidDateTime` for malformed or out-of-range values.
pub fn parse_datetime(s: &str, tzid: Option<&str>, line: usize, col: usize) -> ParseResult<DateTime> {
    let err = || ParseError::new(ParseErrorKind::InvalidDateTime, line, col).with_context(s);

    let (body, utc) = match s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        Some(body) => (body, true),
        None => (s, false),
    };
    let (date_part, time_part) = body.split_once(['T', 't']).ok_or_else(err)?;
    let date = parse_naive_date(date_part).ok_or_else(err)?;
    if time_part.len() != 6 || !digits(time_part) {
        return Err(err());
    }
    let hour = time_part[0..2].parse().map_err(|_| err())?;
    let minute = time_part[2..4].parse().map_err(|_| err())?;
    // Leap second 60 is clamped to 59.
    let second: u32 = time_part[4..6].parse().map_err(|_| err())?;
    let time = NaiveTime::from_hms_opt(hour, minute, second.min(59)).ok_or_else(err)?;

    let form = if utc {
        DateTimeForm::Utc
    } else if let Some(tzid) = tzid {
        DateTimeForm::Zoned {
            tzid: tzid.to_string(),
        }
    } else {
        DateTimeForm::Floating
    };

    Ok(DateTime {
        local: date.and_time(time),
        form,
    })
}

/// Parses a `UTC-OFFSET` value (`+HHMM[SS]`).
///
/// ## Errors
/// Returns `InvalidUtcOffset` if the sign is missing or the fields are malformed.
pub fn parse_utc_offset(s: &str, line: usize, col: usize) -> ParseResult<UtcOffset> {
    let err = || ParseError::new(ParseErrorKind::InvalidUtcOffset, line, col).with_context(s);

    let (sign, body) = if let Some(body) = s.strip_prefix('+') {
        (1, body)
    } else if let Some(body) = s.strip_prefix('-') {
        (-1, body)
    } else {
        return Err(err());
    };
    if !(body.len() == 4 || body.len() == 6) || !digits(body) {
        return Err(err());
    }
    let hours: i32 = body[0..2].parse().map_err(|_| err())?;
    let minutes: i32 = body[2..4].parse().map_err(|_| err())?;
    let seconds: i32 = if body.len() == 6 {
        body[4..6].parse().map_err(|_| err())?
    } else {
        0
    };
    if minutes > 59 || seconds > 59 {
        return Err(err());
    }
    Ok(UtcOffset(sign * (hours * 3600 + minutes * 60 + seconds)))
}

/// Parses an `INTEGER` value.
///
/// ## Errors
/// Returns `InvalidInteger` if the text is not a signed 32-bit integer.
pub fn parse_integer(s: &str, line: usize, col: usize) -> ParseResult<i32> {
    s.trim()
        .parse()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidInteger, line, col).with_context(s))
}

/// Parses a `DURATION` value (`[+-]P[nW]` or `[+-]P[nD][T[nH][nM][nS]]`).
///
/// ## Errors
/// Returns `InvalidDuration` for malformed values.
pub fn parse_duration(s: &str, line: usize, col: usize) -> ParseResult<TimeDelta> {
    let err = || ParseError::new(ParseErrorKind::InvalidDuration, line, col).with_context(s);

    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let rest = rest.strip_prefix(['P', 'p']).ok_or_else(err)?;
    if rest.is_empty() {
        return Err(err());
    }

    let mut seconds: i64 = 0;
    let mut number = String::new();
    let mut in_time = false;
    let mut saw_component = false;

    for c in rest.chars() {
        match c.to_ascii_uppercase() {
            '0'..='9' => number.push(c),
            'T' if !in_time && number.is_empty() => in_time = true,
            unit => {
                let n: i64 = number.parse().map_err(|_| err())?;
                number.clear();
                let factor = match (unit, in_time) {
                    ('W', false) => 7 * 86_400,
                    ('D', false) => 86_400,
                    ('H', true) => 3_600,
                    ('M', true) => 60,
                    ('S', true) => 1,
                    _ => return Err(err()),
                };
                seconds = n
                    .checked_mul(factor)
                    .and_then(|v| seconds.checked_add(v))
                    .ok_or_else(err)?;
                saw_component = true;
            }
        }
    }
    if !number.is_empty() || !saw_component {
        return Err(err());
    }

    let delta = TimeDelta::try_seconds(seconds).ok_or_else(err)?;
    Ok(if negative { -delta } else { delta })
}

/// Parses a `RECUR` value.
///
/// ## Errors
/// Returns `InvalidRRule` if `FREQ` is missing, a part is malformed or out of
/// range, a part is repeated, `COUNT` and `UNTIL` are both present, or the rule
/// uses a part RFC 5545 does not define.
pub fn parse_rrule(s: &str, line: usize, col: usize) -> ParseResult<RRule> {
    let err = |msg: String| {
        ParseError::new(ParseErrorKind::InvalidRRule(msg), line, col).with_context(s)
    };

    let mut freq: Option<Frequency> = None;
    let mut rule = RRule::new(Frequency::Daily);
    let mut seen: Vec<String> = Vec::new();

    for part in s.split(';').filter(|p| !p.is_empty()) {
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| err(format!("part {part} has no value")))?;
        let key = key.to_ascii_uppercase();
        if seen.contains(&key) {
            return Err(err(format!("{key} appears more than once")));
        }
        seen.push(key.clone());

        match key.as_str() {
            "FREQ" => {
                freq = Some(
                    Frequency::parse(value).ok_or_else(|| err(format!("unknown FREQ {value}")))?,
                );
            }
            "INTERVAL" => {
                let interval: u32 = value
                    .parse()
                    .map_err(|_| err(format!("bad INTERVAL {value}")))?;
                if interval == 0 {
                    return Err(err("INTERVAL must be positive".to_string()));
                }
                rule.interval = Some(interval);
            }
            "COUNT" => {
                let count: u32 = value
                    .parse()
                    .map_err(|_| err(format!("bad COUNT {value}")))?;
                if count == 0 {
                    return Err(err("COUNT must be positive".to_string()));
                }
                rule.count = Some(count);
            }
            "UNTIL" => {
                rule.until = Some(if value.len() == 8 {
                    RRuleUntil::Date(parse_date(value, line, col)?)
                } else {
                    RRuleUntil::DateTime(parse_datetime(value, None, line, col)?)
                });
            }
            "BYSECOND" => {
                rule.by_second = parse_list(value, |n: u8| n <= 60)
                    .ok_or_else(|| err(format!("bad BYSECOND {value}")))?;
            }
            "BYMINUTE" => {
                rule.by_minute = parse_list(value, |n: u8| n <= 59)
                    .ok_or_else(|| err(format!("bad BYMINUTE {value}")))?;
            }
            "BYHOUR" => {
                rule.by_hour = parse_list(value, |n: u8| n <= 23)
                    .ok_or_else(|| err(format!("bad BYHOUR {value}")))?;
            }
            "BYDAY" => {
                rule.by_day = value
                    .split(',')
                    .map(|d| WeekdayNum::parse(d).ok_or_else(|| err(format!("bad BYDAY entry {d}"))))
                    .collect::<ParseResult<_>>()?;
            }
            "BYMONTHDAY" => {
                rule.by_month_day = parse_list(value, |n: i8| n != 0 && n.unsigned_abs() <= 31)
                    .ok_or_else(|| err(format!("bad BYMONTHDAY {value}")))?;
            }
            "BYYEARDAY" => {
                rule.by_year_day = parse_list(value, |n: i16| n != 0 && n.unsigned_abs() <= 366)
                    .ok_or_else(|| err(format!("bad BYYEARDAY {value}")))?;
            }
            "BYWEEKNO" => {
                rule.by_week_no = parse_list(value, |n: i8| n != 0 && n.unsigned_abs() <= 53)
                    .ok_or_else(|| err(format!("bad BYWEEKNO {value}")))?;
            }
            "BYMONTH" => {
                rule.by_month = parse_list(value, |n: u8| (1..=12).contains(&n))
                    .ok_or_else(|| err(format!("bad BYMONTH {value}")))?;
            }
            "BYSETPOS" => {
                rule.by_set_pos = parse_list(value, |n: i16| n != 0 && n.unsigned_abs() <= 366)
                    .ok_or_else(|| err(format!("bad BYSETPOS {value}")))?;
            }
            "WKST" => {
                rule.wkst =
                    Some(Weekday::parse(value).ok_or_else(|| err(format!("bad WKST {value}")))?);
            }
            other => return Err(err(format!("unsupported rule part {other}"))),
        }
    }

    rule.freq = freq.ok_or_else(|| err("FREQ is required".to_string()))?;
    if rule.count.is_some() && rule.until.is_some() {
        return Err(err("COUNT and UNTIL are mutually exclusive".to_string()));
    }
    Ok(rule)
}

fn parse_list<T: std::str::FromStr>(value: &str, valid: impl Fn(T) -> bool) -> Option<Vec<T>>
where
    T: Copy,
{
    value
        .split(',')
        .map(|v| v.trim().parse::<T>().ok().filter(|n| valid(*n)))
        .collect()
}

/// Unescapes a `TEXT` value (RFC 5545 §3.3.11).
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
