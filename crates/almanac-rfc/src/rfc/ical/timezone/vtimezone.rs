//! `VTIMEZONE` synthesis from the IANA database.

use almanac_core::types::{Frequency, Weekday, WeekdayNum};
use chrono::{DateTime, Datelike, NaiveDate, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::{OffsetComponents, Tz};

use crate::rfc::ical::core::{
    Component, ComponentKind, DateTime as ICalDateTime, Property, RRule, UtcOffset, names,
};

/// A change of UTC offset in a zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// First instant at which `offset_to` applies.
    pub at: DateTime<Utc>,
    pub offset_from: i32,
    pub offset_to: i32,
    /// Whether the new offset includes daylight saving time.
    pub is_dst: bool,
}

impl Transition {
    /// Wall-clock time of the transition, read with the offset before it.
    #[must_use]
    pub fn local_onset(&self) -> chrono::NaiveDateTime {
        self.at.naive_utc() + TimeDelta::seconds(i64::from(self.offset_from))
    }
}

fn offset_seconds(tz: Tz, at: DateTime<Utc>) -> i32 {
    tz.offset_from_utc_datetime(&at.naive_utc())
        .fix()
        .local_minus_utc()
}

fn is_dst(tz: Tz, at: DateTime<Utc>) -> bool {
    tz.offset_from_utc_datetime(&at.naive_utc()).dst_offset() != TimeDelta::zero()
}

fn year_start(year: i32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single()
}

/// ## Summary
/// Finds every offset transition of `tz` within the given calendar year (UTC).
///
/// Scans day by day and bisects each day whose offset changed down to the
/// second. Zones that change offset twice within one day are not supported.
#[must_use]
pub fn transitions_in_year(tz: Tz, year: i32) -> Vec<Transition> {
    let (Some(start), Some(end)) = (year_start(year), year_start(year + 1)) else {
        return Vec::new();
    };

    let mut transitions = Vec::new();
    let mut cursor = start;
    let mut current = offset_seconds(tz, cursor);

    while cursor < end {
        let next = (cursor + TimeDelta::days(1)).min(end);
        let next_offset = offset_seconds(tz, next);

        if next_offset != current {
            // Offsets change on whole seconds.
            let (mut lo, mut hi) = (cursor.timestamp(), next.timestamp());
            while hi - lo > 1 {
                let mid = lo + (hi - lo) / 2;
                let offset = DateTime::from_timestamp(mid, 0).map(|at| offset_seconds(tz, at));
                if offset == Some(current) {
                    lo = mid;
                } else {
                    hi = mid;
                }
            }
            let at = DateTime::from_timestamp(hi, 0).unwrap_or(next);
            transitions.push(Transition {
                at,
                offset_from: current,
                offset_to: next_offset,
                is_dst: is_dst(tz, at),
            });
            current = next_offset;
        }

        cursor = next;
    }

    transitions
}

/// Describes the date of `day` as "the nth weekday of its month", counting
/// from the end when it falls in the last week.
fn weekday_rule(day: NaiveDate) -> WeekdayNum {
    let weekday = Weekday::from(day.weekday());
    let days_in_month = NaiveDate::from_ymd_opt(day.year(), day.month(), 1)
        .and_then(|first| first.checked_add_months(chrono::Months::new(1)))
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day());

    if day.day() + 7 > days_in_month {
        WeekdayNum::nth(-1, weekday)
    } else {
        let ordinal = i8::try_from(day.day().div_ceil(7)).unwrap_or(5);
        WeekdayNum::nth(ordinal, weekday)
    }
}

/// Derives a yearly `RRULE` for `transition` if the following year repeats it
/// on the same weekday-of-month with the same offsets.
fn yearly_rule(transition: &Transition, next_year: &[Transition]) -> Option<RRule> {
    let onset = transition.local_onset().date();
    let by_day = weekday_rule(onset);

    let repeats = next_year.iter().any(|t| {
        let next_onset = t.local_onset().date();
        t.offset_from == transition.offset_from
            && t.offset_to == transition.offset_to
            && t.is_dst == transition.is_dst
            && next_onset.month() == onset.month()
            && t.local_onset().time() == transition.local_onset().time()
            && weekday_rule(next_onset) == by_day
    });
    if !repeats {
        return None;
    }

    let mut rule = RRule::new(Frequency::Yearly);
    rule.by_month = vec![u8::try_from(onset.month()).ok()?];
    rule.by_day = vec![by_day];
    Some(rule)
}

fn observance(
    kind: ComponentKind,
    onset: chrono::NaiveDateTime,
    offset_from: i32,
    offset_to: i32,
    rule: Option<RRule>,
) -> Component {
    let mut component = Component::new(kind);
    component.add_property(Property::datetime(
        names::DTSTART,
        ICalDateTime::floating(onset),
    ));
    if let Some(rule) = rule {
        component.add_property(Property::recur(names::RRULE, rule));
    }
    component.add_property(Property::utc_offset(
        names::TZOFFSETFROM,
        UtcOffset(offset_from),
    ));
    component.add_property(Property::utc_offset(
        names::TZOFFSETTO,
        UtcOffset(offset_to),
    ));
    component
}

/// ## Summary
/// Builds a `VTIMEZONE` for `tz`, labelled with `tzid`, describing the
/// offsets in force around `anchor`.
///
/// Emits one `STANDARD`/`DAYLIGHT` observance per transition in the anchor's
/// year, each with a yearly rule when the next year repeats it. A zone with
/// no transitions in that year gets a single `STANDARD` observance carrying
/// its fixed offset.
#[must_use]
pub fn build_vtimezone(tzid: &str, tz: Tz, anchor: DateTime<Utc>) -> Component {
    let year = anchor.with_timezone(&tz).year();
    let transitions = transitions_in_year(tz, year);

    let mut vtimezone = Component::timezone();
    vtimezone.add_property(Property::text(names::TZID, tzid));

    if transitions.is_empty() {
        let offset = offset_seconds(tz, anchor);
        vtimezone.add_child(observance(
            ComponentKind::Standard,
            chrono::NaiveDateTime::default(),
            offset,
            offset,
            None,
        ));
        return vtimezone;
    }

    let next_year = transitions_in_year(tz, year + 1);
    for transition in &transitions {
        let kind = if transition.is_dst {
            ComponentKind::Daylight
        } else {
            ComponentKind::Standard
        };
        vtimezone.add_child(observance(
            kind,
            transition.local_onset(),
            transition.offset_from,
            transition.offset_to,
            yearly_rule(transition, &next_year),
        ));
    }

    vtimezone
}
