//! Conversion between the event model and iCalendar text.

use almanac_core::model::{Event, EventTime, Recurrence};
use almanac_core::types::Classification;
use chrono::{DateTime as ChronoDateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

use super::build::serialize;
use super::core::{
    Component, DateTime, DateTimeForm, ICalendar, Property, RRule, RRuleUntil,
    names,
};
use super::parse::{ParseError, ParseErrorKind, parse, parse_duration};
use super::timezone::{TimeZoneResolver, build_vtimezone, local_to_utc, utc_to_local};
use crate::error::{RfcError, RfcResult};

/// Encodes events to iCalendar text and decodes them back.
///
/// Every emitted document is a `VCALENDAR` holding one `VEVENT`, preceded by a
/// `VTIMEZONE` for each non-UTC zone the event uses.
#[derive(Debug, Clone)]
pub struct ICalCodec {
    product_id: String,
}

impl ICalCodec {
    #[must_use]
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
        }
    }

    /// ## Summary
    /// Renders an event as a complete iCalendar document.
    ///
    /// Zoned times are written as wall-clock values with a `TZID` parameter,
    /// UTC times with a `Z` suffix. `UNTIL` is always written in UTC.
    ///
    /// ## Errors
    /// Returns an error if the event fails validation or names a timezone that
    /// cannot be resolved.
    #[tracing::instrument(skip(self, event), fields(event_id = %event.id))]
    pub fn encode(&self, event: &Event) -> RfcResult<String> {
        event.validate()?;

        let mut resolver = TimeZoneResolver::new();
        let mut ical = ICalendar::new(self.product_id.clone());

        let mut zones: Vec<&str> = Vec::new();
        for time in [&event.start, &event.end] {
            if !time.is_utc() && !zones.contains(&time.timezone.as_str()) {
                zones.push(&time.timezone);
            }
        }
        for tzid in zones {
            let tz = resolver.resolve(tzid)?;
            ical.add_timezone(build_vtimezone(tzid, tz, event.start.instant));
        }

        let mut vevent = Component::event();
        vevent.add_property(Property::text(names::UID, &event.id));
        vevent.add_property(Property::datetime(
            names::DTSTAMP,
            DateTime::utc(event.stamp.unwrap_or_else(Utc::now)),
        ));
        vevent.add_property(Property::datetime(
            names::DTSTART,
            wall_clock(&event.start, &mut resolver)?,
        ));
        vevent.add_property(Property::datetime(
            names::DTEND,
            wall_clock(&event.end, &mut resolver)?,
        ));
        if let Some(recurrence) = &event.recurrence {
            vevent.add_property(Property::recur(names::RRULE, to_rrule(recurrence)));
        }
        if let Some(summary) = &event.summary {
            vevent.add_property(Property::text(names::SUMMARY, summary));
        }
        if let Some(location) = &event.location {
            vevent.add_property(Property::text(names::LOCATION, location));
        }
        if let Some(description) = &event.description {
            vevent.add_property(Property::text(names::DESCRIPTION, description));
        }
        if let Some(classification) = event.classification {
            vevent.add_property(Property::text(names::CLASS, classification.as_str()));
        }
        ical.add_event(vevent);

        Ok(serialize(&ical))
    }

    /// ## Summary
    /// Reads the event described by an iCalendar document.
    ///
    /// The first `VEVENT` without `RECURRENCE-ID` is taken as the event;
    /// overridden instances and components other than `VEVENT` are ignored.
    /// Floating times and all-day dates are read as UTC. A missing `DTEND`
    /// is derived from `DURATION`, or from a one-day span for all-day events.
    ///
    /// ## Errors
    /// Returns an error if the text is not well-formed iCalendar, has no
    /// `VEVENT`, lacks `UID` or `DTSTART`, names an unknown timezone, carries
    /// an invalid recurrence rule, or describes an event whose start is not
    /// before its end.
    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn decode(&self, text: &str) -> RfcResult<Event> {
        let ical = parse(text)?;
        let master = ical
            .events()
            .into_iter()
            .find(|e| e.get_property(names::RECURRENCE_ID).is_none())
            .ok_or_else(|| ParseError::semantic(ParseErrorKind::MissingComponent("VEVENT")))?;

        let mut resolver = TimeZoneResolver::new();

        let id = master
            .uid()
            .map(str::trim)
            .filter(|uid| !uid.is_empty())
            .ok_or_else(|| ParseError::semantic(ParseErrorKind::MissingProperty("UID")))?
            .to_string();

        let start_prop = master
            .get_property(names::DTSTART)
            .ok_or_else(|| ParseError::semantic(ParseErrorKind::MissingProperty("DTSTART")))?;
        let (start, start_tz, all_day) = read_time(start_prop, &mut resolver)?;

        let end = if let Some(end_prop) = master.get_property(names::DTEND) {
            read_time(end_prop, &mut resolver)?.0
        } else if let Some(duration_prop) = master.get_property(names::DURATION) {
            let duration = parse_duration(&duration_prop.raw_value, 0, 0)?;
            let instant = start.instant.checked_add_signed(duration).ok_or_else(|| {
                ParseError::semantic(ParseErrorKind::InvalidDuration)
                    .with_context(duration_prop.raw_value.clone())
            })?;
            EventTime::new(instant, start.timezone.clone())
        } else if all_day {
            EventTime::new(start.instant + chrono::TimeDelta::days(1), start.timezone.clone())
        } else {
            start.clone()
        };

        let mut event = Event::new(id, start, end);

        if let Some(rule) = master.get_property(names::RRULE).and_then(Property::as_rrule) {
            event.recurrence = Some(from_rrule(rule, start_tz, &mut resolver)?);
        }
        event.summary = text_property(master, names::SUMMARY);
        event.location = text_property(master, names::LOCATION);
        event.description = text_property(master, names::DESCRIPTION);
        event.classification = master
            .get_property(names::CLASS)
            .and_then(Property::as_text)
            .and_then(Classification::parse);
        event.stamp = master
            .get_property(names::DTSTAMP)
            .and_then(Property::as_datetime)
            .filter(|dt| dt.is_utc())
            .map(|dt| dt.local.and_utc());

        event
            .validate()
            .map_err(|err| ParseError::semantic(ParseErrorKind::InvalidEvent(err.to_string())))?;
        if let Some(recurrence) = &event.recurrence {
            check_recurrence(&event, recurrence)?;
        }

        tracing::debug!(event_id = %event.id, timezone = %event.timezone, "Decoded event");
        Ok(event)
    }
}

fn text_property(component: &Component, name: &str) -> Option<String> {
    component
        .get_property(name)
        .and_then(Property::as_text)
        .map(str::to_string)
}

/// Renders an event time as it should appear on the wire.
fn wall_clock(time: &EventTime, resolver: &mut TimeZoneResolver) -> RfcResult<DateTime> {
    if time.is_utc() {
        return Ok(DateTime::utc(time.instant));
    }
    let tz = resolver.resolve(&time.timezone)?;
    Ok(DateTime::zoned(
        utc_to_local(time.instant, tz),
        time.timezone.clone(),
    ))
}

/// Reads a `DTSTART`/`DTEND` property into an event time.
///
/// Returns the resolved zone (`None` for UTC) and whether the value was a `DATE`.
fn read_time(
    prop: &Property,
    resolver: &mut TimeZoneResolver,
) -> RfcResult<(EventTime, Option<Tz>, bool)> {
    if let Some(dt) = prop.as_datetime() {
        return match &dt.form {
            DateTimeForm::Utc | DateTimeForm::Floating => {
                Ok((EventTime::utc(dt.local.and_utc()), None, false))
            }
            DateTimeForm::Zoned { tzid } => {
                let tz = resolver.resolve(tzid)?;
                let instant = local_to_utc(dt.local, tz)?;
                Ok((EventTime::new(instant, tzid.clone()), Some(tz), false))
            }
        };
    }

    if let Some(date) = prop.as_date() {
        let midnight = date.0.and_time(chrono::NaiveTime::MIN);
        return Ok((EventTime::utc(midnight.and_utc()), None, true));
    }

    Err(ParseError::semantic(ParseErrorKind::InvalidDateTime)
        .with_context(format!("{}:{}", prop.name, prop.raw_value))
        .into())
}

fn to_rrule(recurrence: &Recurrence) -> RRule {
    let mut rule = RRule::new(recurrence.frequency);
    rule.interval = Some(recurrence.interval);
    rule.until = recurrence
        .until
        .map(|until| RRuleUntil::DateTime(DateTime::utc(until)));
    rule.count = recurrence.count;
    rule.by_day.clone_from(&recurrence.by_day);
    rule.by_month_day.clone_from(&recurrence.by_month_day);
    rule.by_year_day.clone_from(&recurrence.by_year_day);
    rule.by_week_no.clone_from(&recurrence.by_week_no);
    rule.by_month.clone_from(&recurrence.by_month);
    rule.by_hour.clone_from(&recurrence.by_hour);
    rule.by_minute.clone_from(&recurrence.by_minute);
    rule.by_second.clone_from(&recurrence.by_second);
    rule.by_set_pos.clone_from(&recurrence.by_set_pos);
    rule.wkst = recurrence.week_start;
    rule
}

/// Maps a parsed rule onto the model, normalizing `UNTIL` to UTC.
///
/// A date or floating `UNTIL` is read as wall-clock time in the event's zone;
/// a date bound covers the whole of that day.
fn from_rrule(
    rule: &RRule,
    event_tz: Option<Tz>,
    resolver: &mut TimeZoneResolver,
) -> RfcResult<Recurrence> {
    let to_instant = |local: NaiveDateTime| -> RfcResult<ChronoDateTime<Utc>> {
        match event_tz {
            Some(tz) => Ok(local_to_utc(local, tz)?),
            None => Ok(local.and_utc()),
        }
    };

    let until = match &rule.until {
        None => None,
        Some(RRuleUntil::Date(date)) => {
            let end_of_day = date
                .0
                .and_hms_opt(23, 59, 59)
                .unwrap_or_else(|| date.0.and_time(chrono::NaiveTime::MIN));
            Some(to_instant(end_of_day)?)
        }
        Some(RRuleUntil::DateTime(dt)) => Some(match &dt.form {
            DateTimeForm::Utc => dt.local.and_utc(),
            DateTimeForm::Floating => to_instant(dt.local)?,
            DateTimeForm::Zoned { tzid } => local_to_utc(dt.local, resolver.resolve(tzid)?)?,
        }),
    };

    Ok(Recurrence {
        frequency: rule.freq,
        interval: rule.interval.unwrap_or(1),
        by_day: rule.by_day.clone(),
        by_month_day: rule.by_month_day.clone(),
        by_year_day: rule.by_year_day.clone(),
        by_week_no: rule.by_week_no.clone(),
        by_month: rule.by_month.clone(),
        by_hour: rule.by_hour.clone(),
        by_minute: rule.by_minute.clone(),
        by_second: rule.by_second.clone(),
        by_set_pos: rule.by_set_pos.clone(),
        week_start: rule.wkst,
        count: rule.count,
        until,
    })
}

/// Runs the rule through the `rrule` engine so combinations it cannot expand
/// are rejected at write time rather than at read time.
fn check_recurrence(event: &Event, recurrence: &Recurrence) -> RfcResult<()> {
    let start = if event.start.is_utc() {
        format!("DTSTART:{}", DateTime::utc(event.start.instant))
    } else {
        let mut resolver = TimeZoneResolver::new();
        let tz = resolver.resolve(&event.timezone)?;
        format!(
            "DTSTART;TZID={}:{}",
            tz.name(),
            DateTime::floating(utc_to_local(event.start.instant, tz))
        )
    };
    let text = format!("{start}\nRRULE:{}", to_rrule(recurrence));
    text.parse::<rrule::RRuleSet>().map_err(|err| {
        tracing::debug!(%err, rule = %text, "Recurrence rejected by rrule");
        RfcError::RRule(err)
    })?;
    Ok(())
}
