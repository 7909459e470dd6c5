//! Tests for PROPFIND.
//!
//! Verifies depth handling, per-property status, discovery properties and
//! conditional requests against collections.

use salvo::http::StatusCode;

use super::helpers::*;

const CALDAV: &str = "urn:ietf:params:xml:ns:caldav";
const CALSERVER: &str = "http://calendarserver.org/ns/";

fn discovery_props() -> String {
    propfind_props(&[
        ("DAV:", "resourcetype"),
        ("DAV:", "owner"),
        ("DAV:", "current-user-principal"),
        ("DAV:", "supported-report-set"),
        (CALDAV, "supported-calendar-component-set"),
        (CALSERVER, "getctag"),
    ])
}

// ============================================================================
// Discovery
// ============================================================================

/// ## Summary
/// Depth 0 on a calendar collection returns exactly one response carrying
/// every discovery property.
#[test_log::test(tokio::test)]
async fn propfind_depth_zero_calendar_collection() {
    let service = create_test_service();

    let response = TestRequest::propfind(&collection_path("calendar"))
        .depth("0")
        .xml_body(&discovery_props())
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_header("Content-Type", "application/xml; charset=utf-8")
        .assert_body_contains("<D:href>/dav/caldav/calendar/</D:href>")
        .assert_body_contains("<D:collection/>")
        .assert_body_contains("<C:calendar/>")
        .assert_body_contains("<D:owner><D:href>/dav/principals/users/tester/</D:href></D:owner>")
        .assert_body_contains(
            "<D:current-user-principal><D:href>/dav/principals/users/tester/</D:href></D:current-user-principal>",
        )
        .assert_body_contains("<C:calendar-multiget/>")
        .assert_body_contains("<C:comp name=\"VEVENT\"/>")
        .assert_body_contains("<CS:getctag>")
        .assert_body_not_contains("404 Not Found");

    assert_eq!(response.count_multistatus_responses(), 1);
}

/// ## Summary
/// Depth 0 on the calendar home answers what it can and reports the rest
/// with a per-property 404.
#[test_log::test(tokio::test)]
async fn propfind_depth_zero_home_reports_unsupported_per_property() {
    let service = create_test_service();

    let response = TestRequest::propfind("/dav/caldav/")
        .depth("0")
        .xml_body(&discovery_props())
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains("HTTP/1.1 200 OK")
        .assert_body_contains("HTTP/1.1 404 Not Found")
        .assert_body_contains("<C:supported-calendar-component-set/>")
        .assert_body_contains("<CS:getctag/>")
        .assert_body_contains("/dav/principals/users/tester/");

    assert_eq!(response.count_multistatus_responses(), 1);
}

/// ## Summary
/// Unknown properties come back under a 404 propstat; the request succeeds.
#[test_log::test(tokio::test)]
async fn propfind_unknown_property() {
    let service = create_test_service();
    let _response = TestRequest::propfind(&collection_path("calendar"))
        .xml_body(&propfind_props(&[("DAV:", "displayname"), ("http://example.com/ns/", "color")]))
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains("<D:displayname>Calendar</D:displayname>")
        .assert_body_contains("xmlns:X=\"http://example.com/ns/\"")
        .assert_body_contains("HTTP/1.1 404 Not Found");
}

// ============================================================================
// Depth
// ============================================================================

/// ## Summary
/// Depth 1 on a collection lists the collection and each contained object.
#[test_log::test(tokio::test)]
async fn propfind_depth_one_lists_objects() {
    let service = create_test_service();
    for id in ["a", "b"] {
        let _created = TestRequest::put(&object_path("calendar", id))
            .icalendar_body(&sample_icalendar_event(id, id))
            .send(&service)
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = TestRequest::propfind(&collection_path("calendar"))
        .depth("1")
        .xml_body(&propfind_props(&[("DAV:", "getetag"), ("DAV:", "getcontenttype")]))
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains("<D:href>/dav/caldav/calendar/a.ics</D:href>")
        .assert_body_contains("<D:href>/dav/caldav/calendar/b.ics</D:href>")
        .assert_body_contains("<D:getcontenttype>text/calendar; charset=utf-8</D:getcontenttype>");

    assert_eq!(response.count_multistatus_responses(), 3);
}

/// ## Summary
/// Depth 1 on the home lists the home, the default calendar and the inbox.
#[test_log::test(tokio::test)]
async fn propfind_depth_one_home_lists_collections() {
    let service = create_test_service();

    let response = TestRequest::propfind("/dav/caldav/")
        .depth("1")
        .xml_body(&propfind_props(&[("DAV:", "resourcetype")]))
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains("<D:href>/dav/caldav/calendar/</D:href>")
        .assert_body_contains("<D:href>/dav/caldav/schedule-inbox/</D:href>")
        .assert_body_contains("<C:schedule-inbox/>");

    assert_eq!(response.count_multistatus_responses(), 3);
}

/// ## Summary
/// Without a Depth header only the target is reported.
#[test_log::test(tokio::test)]
async fn propfind_defaults_to_depth_zero() {
    let service = create_test_service();
    let _created = TestRequest::put(&object_path("calendar", "x"))
        .icalendar_body(&sample_icalendar_event("x", "x"))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED);

    let response = TestRequest::propfind(&collection_path("calendar"))
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS);

    assert_eq!(response.count_multistatus_responses(), 1);
}

/// ## Summary
/// An unparseable Depth header is 400.
#[test_log::test(tokio::test)]
async fn propfind_invalid_depth_is_bad_request() {
    let service = create_test_service();
    let _response = TestRequest::propfind(&collection_path("calendar"))
        .depth("2")
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

// ============================================================================
// Request bodies
// ============================================================================

/// ## Summary
/// An empty body is allprop; allprop never reports 404 propstats.
#[test_log::test(tokio::test)]
async fn propfind_empty_body_and_allprop() {
    let service = create_test_service();

    for body in ["", propfind_allprop()] {
        let _response = TestRequest::propfind(&collection_path("calendar"))
            .xml_body(body)
            .send(&service)
            .await
            .assert_status(StatusCode::MULTI_STATUS)
            .assert_body_contains("<D:displayname>Calendar</D:displayname>")
            .assert_body_contains("<CS:getctag>")
            .assert_body_not_contains("404 Not Found");
    }
}

/// ## Summary
/// propname lists the supported property names without values.
#[test_log::test(tokio::test)]
async fn propfind_propname() {
    let service = create_test_service();
    let body = r#"<?xml version="1.0" encoding="utf-8"?>
<D:propfind xmlns:D="DAV:"><D:propname/></D:propfind>"#;

    let _response = TestRequest::propfind(&collection_path("calendar"))
        .xml_body(body)
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains("<D:displayname/>")
        .assert_body_contains("<CS:getctag/>")
        .assert_body_not_contains("Calendar</D:displayname>");
}

/// ## Summary
/// An empty `prop` element still yields a response with a propstat.
#[test_log::test(tokio::test)]
async fn propfind_empty_prop_has_propstat() {
    let service = create_test_service();
    let body = r#"<?xml version="1.0" encoding="utf-8"?>
<D:propfind xmlns:D="DAV:"><D:prop/></D:propfind>"#;

    let _response = TestRequest::propfind(&collection_path("calendar"))
        .xml_body(body)
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains(
            "<D:response><D:href>/dav/caldav/calendar/</D:href><D:propstat><D:prop></D:prop><D:status>HTTP/1.1 200 OK</D:status></D:propstat></D:response>",
        );
}

/// ## Summary
/// Malformed XML is 400.
#[test_log::test(tokio::test)]
async fn propfind_malformed_body_is_bad_request() {
    let service = create_test_service();
    for body in [
        "<D:propfind xmlns:D=\"DAV:\"><D:prop>",
        "<D:propfind xmlns:D=\"DAV:\"><D:prop></D:propfind>",
    ] {
        let _response = TestRequest::propfind(&collection_path("calendar"))
            .xml_body(body)
            .send(&service)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

// ============================================================================
// Conditional requests
// ============================================================================

/// ## Summary
/// If-None-Match with an arbitrary token on the collection root is a normal 207.
#[test_log::test(tokio::test)]
async fn propfind_collection_root_if_none_match() {
    let service = create_test_service();

    for path in ["/dav/", "/dav/caldav/", "/dav/caldav/calendar/"] {
        let _response = TestRequest::propfind(path)
            .depth("0")
            .if_none_match("\"arbitrary-token\"")
            .xml_body(&discovery_props())
            .send(&service)
            .await
            .assert_status(StatusCode::MULTI_STATUS);
    }
}

/// ## Summary
/// On a calendar object a matching If-None-Match is 304.
#[test_log::test(tokio::test)]
async fn propfind_object_if_none_match() {
    let service = create_test_service();
    let path = object_path("calendar", "conditional");
    let created = TestRequest::put(&path)
        .icalendar_body(&sample_icalendar_event("conditional", "Conditional"))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED);
    let etag = created.get_etag().expect("ETag on create").to_string();

    let _not_modified = TestRequest::propfind(&path)
        .if_none_match(&etag)
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_MODIFIED);

    let _changed = TestRequest::propfind(&path)
        .if_none_match("\"older\"")
        .xml_body(&propfind_props(&[("DAV:", "getetag")]))
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains(&format!("<D:getetag>{}</D:getetag>", etag.replace('"', "&quot;")));
}

// ============================================================================
// Principals
// ============================================================================

/// ## Summary
/// The principal resource reports its URL, home and inbox.
#[test_log::test(tokio::test)]
async fn propfind_principal() {
    let service = create_test_service();
    let _response = TestRequest::propfind("/dav/principals/users/tester/")
        .xml_body(&propfind_props(&[
            ("DAV:", "principal-URL"),
            (CALDAV, "calendar-home-set"),
            (CALDAV, "schedule-inbox-URL"),
        ]))
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains("<D:principal-URL><D:href>/dav/principals/users/tester/</D:href></D:principal-URL>")
        .assert_body_contains("<C:calendar-home-set><D:href>/dav/caldav/</D:href></C:calendar-home-set>")
        .assert_body_contains("<C:schedule-inbox-URL><D:href>/dav/caldav/schedule-inbox/</D:href></C:schedule-inbox-URL>");
}

/// ## Summary
/// Scheduling discovery walks from current-user-principal to the principal
/// and reads both scheduling collection URLs there.
#[test_log::test(tokio::test)]
async fn propfind_scheduling_discovery() {
    let service = create_test_service();
    let _root = TestRequest::propfind("/dav/")
        .depth("0")
        .xml_body(&propfind_props(&[("DAV:", "current-user-principal")]))
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains("<D:href>/dav/principals/users/tester/</D:href>");

    let _principal = TestRequest::propfind("/dav/principals/users/tester/")
        .depth("0")
        .xml_body(&propfind_props(&[
            (CALDAV, "schedule-inbox-URL"),
            (CALDAV, "schedule-outbox-URL"),
        ]))
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains("<C:schedule-outbox-URL><D:href>/dav/caldav/schedule-outbox/</D:href></C:schedule-outbox-URL>")
        .assert_body_not_contains("404 Not Found");
}

/// ## Summary
/// PROPFIND on an unknown principal or collection is 404.
#[test_log::test(tokio::test)]
async fn propfind_missing_resources() {
    let service = create_test_service();
    for path in [
        "/dav/principals/users/nobody/",
        "/dav/caldav/no-such-calendar/",
        "/dav/caldav/calendar/missing.ics",
        "/elsewhere/",
    ] {
        let _response = TestRequest::propfind(path)
            .send(&service)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
