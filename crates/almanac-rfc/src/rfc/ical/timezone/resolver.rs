//! Timezone resolution and UTC conversion for iCalendar date-times.
//!
//! Uses ICU4X for Windows timezone ID to IANA mapping and timezone canonicalization.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use icu::time::zone::WindowsParser;
use icu::time::zone::iana::IanaParserExtended;

/// Error during timezone conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Unknown or invalid timezone identifier.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Local time cannot be placed on the UTC line at all.
    #[error("Unrepresentable local time: {0}")]
    OutOfRange(String),
}

/// Resolver for timezone identifiers.
///
/// Caches resolved zones by the TZID text the client used.
#[derive(Debug, Default)]
pub struct TimeZoneResolver {
    cache: HashMap<String, Tz>,
}

impl TimeZoneResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Resolves a timezone identifier to a `chrono_tz::Tz`.
    ///
    /// Accepts IANA names (including aliases), Windows zone names and the
    /// `/mozilla.org/` style prefixes some clients put in front of IANA names.
    ///
    /// ## Errors
    /// Returns `ConversionError::UnknownTimezone` if the TZID cannot be resolved.
    pub fn resolve(&mut self, tzid: &str) -> Result<Tz, ConversionError> {
        if let Some(tz) = self.cache.get(tzid) {
            return Ok(*tz);
        }

        let normalized = normalize_tzid(tzid);
        let tz = Tz::from_str(&normalized).map_err(|err| {
            tracing::debug!(%tzid, %normalized, %err, "Unresolvable TZID");
            ConversionError::UnknownTimezone(tzid.to_string())
        })?;

        self.cache.insert(tzid.to_string(), tz);
        Ok(tz)
    }
}

/// Normalizes common CalDAV/iCalendar timezone identifiers to IANA names.
fn normalize_tzid(tzid: &str) -> String {
    let stripped = tzid
        .strip_prefix("/mozilla.org/")
        .or_else(|| tzid.strip_prefix("/softwarestudio.org/"))
        .or_else(|| tzid.strip_prefix('/'))
        .unwrap_or(tzid)
        .trim();

    if Tz::from_str(stripped).is_ok() {
        return stripped.to_string();
    }

    let windows_parser = WindowsParser::new();
    if let Some(tz) = windows_parser.parse(stripped, None) {
        let iana_parser = IanaParserExtended::new();
        for entry in iana_parser.iter() {
            if entry.time_zone == tz {
                return entry.canonical.to_string();
            }
        }
    }

    // Handles aliases like Europe/Kiev -> Europe/Kyiv and case differences
    let iana_parser = IanaParserExtended::new();
    let parsed = iana_parser.parse(stripped);
    if parsed.time_zone != icu::time::TimeZone::UNKNOWN {
        return parsed.canonical.to_string();
    }

    stripped.to_string()
}

/// ## Summary
/// Converts a wall-clock time in `tz` to UTC.
///
/// A time inside a DST gap is read with the offset in effect before the gap,
/// so 02:30 on a spring-forward night in Berlin lands on 03:30 CEST. An
/// ambiguous time in a fold resolves to the earlier of its two instants.
///
/// ## Errors
/// Returns `ConversionError::OutOfRange` if the local time is at the edge of
/// the representable range.
pub fn local_to_utc(local: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>, ConversionError> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt.with_timezone(&Utc)),
        LocalResult::None => {
            let day_before = local
                .checked_sub_signed(TimeDelta::days(1))
                .ok_or_else(|| ConversionError::OutOfRange(local.to_string()))?;
            let before = tz.offset_from_utc_datetime(&day_before).fix();
            let utc = local
                .checked_sub_signed(TimeDelta::seconds(i64::from(before.local_minus_utc())))
                .ok_or_else(|| ConversionError::OutOfRange(local.to_string()))?;
            tracing::debug!(%local, %tz, "Local time falls in a DST gap");
            Ok(DateTime::from_naive_utc_and_offset(utc, Utc))
        }
    }
}

/// Converts an instant to the wall-clock time it shows in `tz`.
#[must_use]
pub fn utc_to_local(instant: DateTime<Utc>, tz: Tz) -> NaiveDateTime {
    instant.with_timezone(&tz).naive_local()
}
