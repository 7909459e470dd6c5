use chrono::{DateTime, SubsecRound, Timelike, Utc};

use crate::error::{CoreError, CoreResult};
use crate::types::{Classification, Frequency, Weekday, WeekdayNum};

/// Returns whether a timezone name is the bare `UTC` zone, written as `Z`
/// time without a TZID. Aliases such as `Etc/UTC` keep their own name.
#[must_use]
pub fn is_utc_zone(name: &str) -> bool {
    name == "UTC"
}

/// An instant paired with the named timezone it was expressed in.
///
/// The name travels with the instant so that wall-clock rendering never has to
/// guess the zone back from an offset. iCalendar times carry whole seconds, so
/// the instant is truncated to the second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTime {
    pub instant: DateTime<Utc>,
    pub timezone: String,
}

impl EventTime {
    #[must_use]
    pub fn new(instant: DateTime<Utc>, timezone: impl Into<String>) -> Self {
        Self {
            instant: instant.trunc_subsecs(0),
            timezone: timezone.into(),
        }
    }

    #[must_use]
    pub fn utc(instant: DateTime<Utc>) -> Self {
        Self::new(instant, "UTC")
    }

    #[must_use]
    pub fn is_utc(&self) -> bool {
        is_utc_zone(&self.timezone)
    }
}

/// Recurrence of an event, carrying every RFC 5545 rule part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recurrence {
    pub frequency: Frequency,
    /// Always at least 1.
    pub interval: u32,
    /// Ordered `BYDAY` set, kept in the order the client sent it.
    pub by_day: Vec<WeekdayNum>,
    pub by_month_day: Vec<i8>,
    pub by_year_day: Vec<i16>,
    pub by_week_no: Vec<i8>,
    pub by_month: Vec<u8>,
    pub by_hour: Vec<u8>,
    pub by_minute: Vec<u8>,
    pub by_second: Vec<u8>,
    pub by_set_pos: Vec<i16>,
    pub week_start: Option<Weekday>,
    pub count: Option<u32>,
    pub until: Option<DateTime<Utc>>,
}

impl Recurrence {
    #[must_use]
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: 1,
            by_day: Vec::new(),
            by_month_day: Vec::new(),
            by_year_day: Vec::new(),
            by_week_no: Vec::new(),
            by_month: Vec::new(),
            by_hour: Vec::new(),
            by_minute: Vec::new(),
            by_second: Vec::new(),
            by_set_pos: Vec::new(),
            week_start: None,
            count: None,
            until: None,
        }
    }

    #[must_use]
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_by_day(mut self, days: Vec<WeekdayNum>) -> Self {
        self.by_day = days;
        self
    }

    #[must_use]
    pub fn with_by_month_day(mut self, days: Vec<i8>) -> Self {
        self.by_month_day = days;
        self
    }

    #[must_use]
    pub fn with_by_month(mut self, months: Vec<u8>) -> Self {
        self.by_month = months;
        self
    }

    #[must_use]
    pub fn with_by_year_day(mut self, days: Vec<i16>) -> Self {
        self.by_year_day = days;
        self
    }

    #[must_use]
    pub fn with_by_week_no(mut self, weeks: Vec<i8>) -> Self {
        self.by_week_no = weeks;
        self
    }

    /// Sets the `BYHOUR`, `BYMINUTE` and `BYSECOND` lists in one call.
    #[must_use]
    pub fn with_by_time(mut self, hours: Vec<u8>, minutes: Vec<u8>, seconds: Vec<u8>) -> Self {
        self.by_hour = hours;
        self.by_minute = minutes;
        self.by_second = seconds;
        self
    }

    #[must_use]
    pub fn with_by_set_pos(mut self, positions: Vec<i16>) -> Self {
        self.by_set_pos = positions;
        self
    }

    #[must_use]
    pub fn with_week_start(mut self, day: Weekday) -> Self {
        self.week_start = Some(day);
        self
    }

    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until.trunc_subsecs(0));
        self
    }
}

/// A single calendar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Used verbatim as the iCalendar `UID`.
    pub id: String,
    pub summary: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub classification: Option<Classification>,
    pub start: EventTime,
    pub end: EventTime,
    pub recurrence: Option<Recurrence>,
    /// Zone the event is anchored in; equals `start.timezone`.
    pub timezone: String,
    /// `DTSTAMP`; filled in at encode time when absent.
    pub stamp: Option<DateTime<Utc>>,
}

impl Event {
    /// Creates an event anchored in the timezone of `start`.
    #[must_use]
    pub fn new(id: impl Into<String>, start: EventTime, end: EventTime) -> Self {
        let timezone = start.timezone.clone();
        Self {
            id: id.into(),
            summary: None,
            location: None,
            description: None,
            classification: None,
            start,
            end,
            recurrence: None,
            timezone,
            stamp: None,
        }
    }

    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = Some(classification);
        self
    }

    #[must_use]
    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    #[must_use]
    pub fn with_stamp(mut self, stamp: DateTime<Utc>) -> Self {
        self.stamp = Some(stamp.trunc_subsecs(0));
        self
    }

    /// ## Summary
    /// Checks the structural invariants of the event.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidEvent` if the id is empty, if a time carries
    /// sub-second precision, if start is not strictly before end, if the anchor timezone is missing or disagrees with
    /// the start, if a recurring event mixes timezones, or if the recurrence
    /// carries a zero interval or both `COUNT` and `UNTIL`.
    pub fn validate(&self) -> CoreResult<()> {
        if self.id.trim().is_empty() {
            return Err(CoreError::InvalidEvent("event id is empty".to_string()));
        }
        if has_subsecond(self.start.instant) || has_subsecond(self.end.instant) {
            return Err(CoreError::InvalidEvent(
                "event times must be whole seconds".to_string(),
            ));
        }
        if self.start.instant >= self.end.instant {
            return Err(CoreError::InvalidEvent(format!(
                "start {} is not before end {}",
                self.start.instant, self.end.instant
            )));
        }
        if self.timezone.is_empty() {
            return Err(CoreError::InvalidEvent("timezone name is empty".to_string()));
        }
        if self.start.timezone != self.timezone {
            return Err(CoreError::InvalidEvent(format!(
                "start timezone {} differs from event timezone {}",
                self.start.timezone, self.timezone
            )));
        }

        if let Some(recurrence) = &self.recurrence {
            if self.end.timezone != self.timezone {
                return Err(CoreError::InvalidEvent(format!(
                    "recurring event mixes timezones {} and {}",
                    self.timezone, self.end.timezone
                )));
            }
            if recurrence.interval == 0 {
                return Err(CoreError::InvalidEvent(
                    "recurrence interval must be positive".to_string(),
                ));
            }
            if recurrence.until.is_some_and(has_subsecond) {
                return Err(CoreError::InvalidEvent(
                    "recurrence UNTIL must be whole seconds".to_string(),
                ));
            }
            if recurrence.count.is_some() && recurrence.until.is_some() {
                return Err(CoreError::InvalidEvent(
                    "recurrence cannot carry both COUNT and UNTIL".to_string(),
                ));
            }
        }

        Ok(())
    }
}

fn has_subsecond(instant: DateTime<Utc>) -> bool {
    instant.nanosecond() != 0
}
