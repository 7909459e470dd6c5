//! Tests for PUT.
//!
//! Verifies creation, replacement, body validation and preconditions.

use chrono::{Duration, Utc};
use salvo::http::StatusCode;

use super::helpers::*;

// ============================================================================
// Create and replace
// ============================================================================

/// ## Summary
/// Creating the event from the long-numeric-UID regression returns 201 and
/// GET returns the same UID, SUMMARY and LOCATION.
#[test_log::test(tokio::test)]
async fn put_long_numeric_uid_round_trips() {
    let service = create_test_service();
    let tomorrow = (Utc::now() + Duration::days(1)).format("%Y%m%d").to_string();
    let uid = "2010042814505442675";
    let body = format!(
        "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Client//EN\r\n\
BEGIN:VEVENT\r\n\
UID:{uid}\r\n\
DTSTART;TZID=Europe/Berlin:{tomorrow}T150000\r\n\
DTEND;TZID=Europe/Berlin:{tomorrow}T160000\r\n\
SUMMARY:bug 22352\r\n\
LOCATION:test\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n"
    );
    let path = object_path("calendar", uid);

    let _created = TestRequest::put(&path)
        .icalendar_body(&body)
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .assert_header_exists("ETag");

    let response = TestRequest::get(&path)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("BEGIN:VEVENT");

    assert_eq!(response.ical_line("UID").as_deref(), Some("UID:2010042814505442675"));
    assert_eq!(response.ical_line("SUMMARY").as_deref(), Some("SUMMARY:bug 22352"));
    assert_eq!(response.ical_line("LOCATION").as_deref(), Some("LOCATION:test"));
}

/// ## Summary
/// A second PUT to the same resource replaces it with 204 and a new ETag.
#[test_log::test(tokio::test)]
async fn put_existing_returns_no_content() {
    let service = create_test_service();
    let path = object_path("calendar", "replace-me");

    let created = TestRequest::put(&path)
        .icalendar_body(&sample_icalendar_event("replace-me", "First"))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED);
    let first_etag = created.get_etag().map(str::to_string);

    let updated = TestRequest::put(&path)
        .icalendar_body(&sample_icalendar_event("replace-me", "Second"))
        .send(&service)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert_ne!(updated.get_etag().map(str::to_string), first_etag);

    let _fetched = TestRequest::get(&path)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("SUMMARY:Second")
        .assert_body_not_contains("SUMMARY:First");
}

/// ## Summary
/// PUT into the schedule inbox is accepted like any other collection.
#[test_log::test(tokio::test)]
async fn put_into_schedule_inbox() {
    let service = create_test_service();
    let _created = TestRequest::put(&object_path("schedule-inbox", "invite"))
        .icalendar_body(&sample_icalendar_event("invite", "Invitation"))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED);
}

// ============================================================================
// Rejections
// ============================================================================

/// ## Summary
/// Malformed bodies, missing UIDs and inverted times are 400.
#[test_log::test(tokio::test)]
async fn put_invalid_calendar_data_is_bad_request() {
    let service = create_test_service();
    let path = object_path("calendar", "bad");

    let missing_uid = "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nDTSTART:20260126T100000Z\r\nDTEND:20260126T110000Z\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
    let inverted = "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nUID:bad\r\nDTSTART:20260126T110000Z\r\nDTEND:20260126T100000Z\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
    let unterminated = "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nUID:bad\r\n";

    for body in ["this is not icalendar", missing_uid, inverted, unterminated] {
        let _rejected = TestRequest::put(&path)
            .icalendar_body(body)
            .send(&service)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    let _nothing_stored = TestRequest::get(&path)
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

/// ## Summary
/// PUT into a collection that does not exist is 404.
#[test_log::test(tokio::test)]
async fn put_into_missing_collection_is_not_found() {
    let service = create_test_service();
    let _missing = TestRequest::put(&object_path("no-such-calendar", "x"))
        .icalendar_body(&sample_icalendar_event("x", "X"))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

/// ## Summary
/// PUT on a collection path is 405 with an Allow header.
#[test_log::test(tokio::test)]
async fn put_on_collection_is_method_not_allowed() {
    let service = create_test_service();
    let _rejected = TestRequest::put(&collection_path("calendar"))
        .icalendar_body(&sample_icalendar_event("x", "X"))
        .send(&service)
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED)
        .assert_header_contains("Allow", "PROPFIND");
}

// ============================================================================
// Preconditions
// ============================================================================

/// ## Summary
/// `If-None-Match: *` creates once and then fails with 412.
#[test_log::test(tokio::test)]
async fn put_if_none_match_star_is_create_only() {
    let service = create_test_service();
    let path = object_path("calendar", "create-only");
    let body = sample_icalendar_event("create-only", "Once");

    let _created = TestRequest::put(&path)
        .if_none_match("*")
        .icalendar_body(&body)
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED);

    let _conflict = TestRequest::put(&path)
        .if_none_match("*")
        .icalendar_body(&body)
        .send(&service)
        .await
        .assert_status(StatusCode::PRECONDITION_FAILED);
}

/// ## Summary
/// `If-Match` must name the current ETag.
#[test_log::test(tokio::test)]
async fn put_if_match_guards_updates() {
    let service = create_test_service();
    let path = object_path("calendar", "guarded");

    let created = TestRequest::put(&path)
        .icalendar_body(&sample_icalendar_event("guarded", "v1"))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED);
    let etag = created.get_etag().expect("ETag on create").to_string();

    let _stale = TestRequest::put(&path)
        .if_match("\"stale\"")
        .icalendar_body(&sample_icalendar_event("guarded", "v2"))
        .send(&service)
        .await
        .assert_status(StatusCode::PRECONDITION_FAILED);

    let _fresh = TestRequest::put(&path)
        .if_match(&etag)
        .icalendar_body(&sample_icalendar_event("guarded", "v2"))
        .send(&service)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let _missing = TestRequest::put(&object_path("calendar", "absent"))
        .if_match("*")
        .icalendar_body(&sample_icalendar_event("absent", "v1"))
        .send(&service)
        .await
        .assert_status(StatusCode::PRECONDITION_FAILED);
}
