//! Tests for GET and HEAD methods.
//!
//! Verifies resource retrieval, ETag handling, and conditional requests.

use salvo::http::StatusCode;

use super::helpers::*;

async fn seed(service: &salvo::Service, object_id: &str) -> String {
    TestRequest::put(&object_path("calendar", object_id))
        .icalendar_body(&sample_icalendar_event(object_id, "Seeded"))
        .send(service)
        .await
        .assert_status(StatusCode::CREATED)
        .get_etag()
        .expect("ETag on create")
        .to_string()
}

// ============================================================================
// Basic GET Tests
// ============================================================================

/// ## Summary
/// GET on a calendar object returns the iCalendar text with its metadata headers.
#[test_log::test(tokio::test)]
async fn get_calendar_object_headers() {
    let service = create_test_service();
    let etag = seed(&service, "headers").await;

    let _response = TestRequest::get(&object_path("calendar", "headers"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .assert_header("Content-Type", "text/calendar; charset=utf-8")
        .assert_header("ETag", &etag)
        .assert_header_exists("Last-Modified")
        .assert_body_contains("BEGIN:VCALENDAR\r\n")
        .assert_body_contains("PRODID:-//Almanac//Test//EN\r\n")
        .assert_body_contains("UID:headers\r\n")
        .assert_body_contains("END:VCALENDAR\r\n");
}

/// ## Summary
/// Repeated GETs of an unchanged object return identical bodies and ETags.
#[test_log::test(tokio::test)]
async fn get_is_stable() {
    let service = create_test_service();
    let _etag = seed(&service, "stable").await;
    let path = object_path("calendar", "stable");

    let first = TestRequest::get(&path).send(&service).await;
    let second = TestRequest::get(&path).send(&service).await;
    assert_eq!(first.body, second.body);
    assert_eq!(first.get_etag(), second.get_etag());
}

/// ## Summary
/// GET of a missing object is 404.
#[test_log::test(tokio::test)]
async fn get_missing_object_is_not_found() {
    let service = create_test_service();
    let _response = TestRequest::get(&object_path("calendar", "nope"))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

/// ## Summary
/// GET on a collection is 405.
#[test_log::test(tokio::test)]
async fn get_collection_is_method_not_allowed() {
    let service = create_test_service();
    let _response = TestRequest::get(&collection_path("calendar"))
        .send(&service)
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

// ============================================================================
// HEAD
// ============================================================================

/// ## Summary
/// HEAD carries the GET headers without a body.
#[test_log::test(tokio::test)]
async fn head_has_headers_without_body() {
    let service = create_test_service();
    let etag = seed(&service, "head").await;

    let _response = TestRequest::head(&object_path("calendar", "head"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .assert_header("ETag", &etag)
        .assert_header("Content-Type", "text/calendar; charset=utf-8")
        .assert_body_empty();
}

// ============================================================================
// Conditional GET
// ============================================================================

/// ## Summary
/// A matching If-None-Match is 304; a different tag gets the full response.
#[test_log::test(tokio::test)]
async fn get_if_none_match() {
    let service = create_test_service();
    let etag = seed(&service, "cond").await;
    let path = object_path("calendar", "cond");

    let _not_modified = TestRequest::get(&path)
        .if_none_match(&etag)
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_MODIFIED)
        .assert_header("ETag", &etag);

    let _modified = TestRequest::get(&path)
        .if_none_match("\"something-else\", \"another\"")
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    let _star = TestRequest::get(&path)
        .if_none_match("*")
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_MODIFIED);
}

/// ## Summary
/// A stale If-Match on GET is 412.
#[test_log::test(tokio::test)]
async fn get_if_match_stale_fails() {
    let service = create_test_service();
    let etag = seed(&service, "match").await;
    let path = object_path("calendar", "match");

    let _failed = TestRequest::get(&path)
        .if_match("\"stale\"")
        .send(&service)
        .await
        .assert_status(StatusCode::PRECONDITION_FAILED);

    let _ok = TestRequest::get(&path)
        .if_match(&etag)
        .send(&service)
        .await
        .assert_status(StatusCode::OK);
}
