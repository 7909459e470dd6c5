//! Timezone and recurrence fidelity through PUT then GET.

use salvo::http::StatusCode;

use super::helpers::*;

async fn put_then_get(service: &salvo::Service, object_id: &str, body: &str) -> TestResponse {
    let path = object_path("calendar", object_id);
    let _created = TestRequest::put(&path)
        .icalendar_body(body)
        .send(service)
        .await
        .assert_status(StatusCode::CREATED);

    TestRequest::get(&path)
        .send(service)
        .await
        .assert_status(StatusCode::OK)
}

/// ## Summary
/// A weekly Friday event in CET keeps TZID on both DTSTART and DTEND.
#[test_log::test(tokio::test)]
async fn weekly_recurrence_in_cet_keeps_tzid() {
    let service = create_test_service();
    let body = recurring_event(
        "weekly-cet",
        "CET",
        "20260130T160000",
        "20260130T163000",
        "FREQ=WEEKLY;BYDAY=FR",
    );

    let response = put_then_get(&service, "weekly-cet", &body).await;

    assert_eq!(
        response.ical_line("DTSTART").as_deref(),
        Some("DTSTART;TZID=CET:20260130T160000")
    );
    assert_eq!(
        response.ical_line("DTEND").as_deref(),
        Some("DTEND;TZID=CET:20260130T163000")
    );
    assert_eq!(response.ical_line("RRULE").as_deref(), Some("RRULE:FREQ=WEEKLY;BYDAY=FR"));
    let _response = response.assert_body_contains("BEGIN:VTIMEZONE\r\nTZID:CET\r\n");
}

/// ## Summary
/// An event in Hong Kong keeps its local wall-clock times.
#[test_log::test(tokio::test)]
async fn hong_kong_event_keeps_wall_clock() {
    let service = create_test_service();
    let body = zoned_event(
        "hk-evening",
        "Dinner",
        "Asia/Hong_Kong",
        "20260305T200000",
        "20260305T210000",
    );

    let response = put_then_get(&service, "hk-evening", &body).await;

    let start = response.ical_line("DTSTART").expect("DTSTART present");
    let end = response.ical_line("DTEND").expect("DTEND present");
    assert!(start.starts_with("DTSTART;TZID=Asia/Hong_Kong:"), "{start}");
    assert!(start.ends_with("T200000"), "{start}");
    assert!(end.ends_with("T210000"), "{end}");
}

/// ## Summary
/// Interval, ordinal BYDAY and COUNT survive the round trip.
#[test_log::test(tokio::test)]
async fn recurrence_parts_survive() {
    let service = create_test_service();
    let body = recurring_event(
        "monthly-last-friday",
        "Europe/Berlin",
        "20260130T090000",
        "20260130T100000",
        "FREQ=MONTHLY;INTERVAL=2;COUNT=6;BYDAY=-1FR",
    );

    let response = put_then_get(&service, "monthly-last-friday", &body).await;

    assert_eq!(
        response.ical_line("RRULE").as_deref(),
        Some("RRULE:FREQ=MONTHLY;INTERVAL=2;COUNT=6;BYDAY=-1FR")
    );
}

/// ## Summary
/// Time-of-day and week-number rule parts are stored and served back.
#[test_log::test(tokio::test)]
async fn hourly_rule_parts_survive() {
    let service = create_test_service();
    let body = recurring_event(
        "twice-daily",
        "Europe/Berlin",
        "20260130T090000",
        "20260130T091500",
        "FREQ=DAILY;BYHOUR=9,17;BYMINUTE=0",
    );

    let response = put_then_get(&service, "twice-daily", &body).await;

    assert_eq!(
        response.ical_line("RRULE").as_deref(),
        Some("RRULE:FREQ=DAILY;BYMINUTE=0;BYHOUR=9,17")
    );
}

/// ## Summary
/// A zone-qualified client TZID is served back under the name the client used.
#[test_log::test(tokio::test)]
async fn prefixed_tzid_is_preserved() {
    let service = create_test_service();
    let body = zoned_event(
        "mozilla-berlin",
        "Prefixed",
        "/mozilla.org/Europe/Berlin",
        "20260310T080000",
        "20260310T090000",
    );

    let response = put_then_get(&service, "mozilla-berlin", &body).await;

    assert_eq!(
        response.ical_line("DTSTART").as_deref(),
        Some("DTSTART;TZID=/mozilla.org/Europe/Berlin:20260310T080000")
    );
}

/// ## Summary
/// UTC events are written in UTC form without a VTIMEZONE.
#[test_log::test(tokio::test)]
async fn utc_event_has_no_vtimezone() {
    let service = create_test_service();
    let response = put_then_get(&service, "utc", &sample_icalendar_event("utc", "UTC")).await;

    assert_eq!(response.ical_line("DTSTART").as_deref(), Some("DTSTART:20260126T100000Z"));
    let _response = response.assert_body_not_contains("VTIMEZONE");
}

/// ## Summary
/// An unknown timezone is rejected with 400.
#[test_log::test(tokio::test)]
async fn unknown_timezone_is_bad_request() {
    let service = create_test_service();
    let body = zoned_event("mars", "Mars", "Mars/Olympus_Mons", "20260305T200000", "20260305T210000");

    let _rejected = TestRequest::put(&object_path("calendar", "mars"))
        .icalendar_body(&body)
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
