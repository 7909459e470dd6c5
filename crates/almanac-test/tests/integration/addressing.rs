//! Tests for resource addressing through the HTTP surface.
//!
//! Object identifiers are opaque strings: numeric ids of any length must
//! survive unchanged and reserved characters travel percent-encoded.

use salvo::http::StatusCode;

use super::helpers::*;

async fn put_and_fetch(service: &salvo::Service, path: &str, uid: &str) -> TestResponse {
    let _created = TestRequest::put(path)
        .icalendar_body(&sample_icalendar_event(uid, "Addressed"))
        .send(service)
        .await
        .assert_status(StatusCode::CREATED);

    TestRequest::get(path)
        .send(service)
        .await
        .assert_status(StatusCode::OK)
}

/// ## Summary
/// Numeric ids from 1 to 30 digits are stored and served without precision loss.
#[test_log::test(tokio::test)]
async fn numeric_ids_of_any_length() {
    let service = create_test_service();

    for len in 1..=30 {
        let id: String = "1234567890".chars().cycle().take(len).collect();
        let response = put_and_fetch(&service, &object_path("calendar", &id), &id).await;
        assert_eq!(response.ical_line("UID"), Some(format!("UID:{id}")));
    }
}

/// ## Summary
/// A long numeric id is listed under its exact href.
#[test_log::test(tokio::test)]
async fn long_numeric_id_href_is_exact() {
    let service = create_test_service();
    let uid = "2010042814505442675";
    let _fetched = put_and_fetch(&service, &object_path("calendar", uid), uid).await;

    let _listing = TestRequest::propfind(&collection_path("calendar"))
        .depth("1")
        .xml_body(&propfind_props(&[("DAV:", "getetag")]))
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains("<D:href>/dav/caldav/calendar/2010042814505442675.ics</D:href>");
}

/// ## Summary
/// Reserved characters in an object id round-trip through percent-encoding.
#[test_log::test(tokio::test)]
async fn reserved_characters_are_percent_encoded() {
    let service = create_test_service();
    let path = "/dav/caldav/calendar/a%20b%26c.ics";
    let _fetched = put_and_fetch(&service, path, "a b&c").await;

    let _listing = TestRequest::propfind(&collection_path("calendar"))
        .depth("1")
        .xml_body(&propfind_props(&[("DAV:", "getetag")]))
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains("<D:href>/dav/caldav/calendar/a%20b%26c.ics</D:href>");

    let _deleted = TestRequest::delete(path)
        .send(&service)
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

/// ## Summary
/// Exchange-style hexadecimal ids are accepted as-is.
#[test_log::test(tokio::test)]
async fn uuid_like_id() {
    let service = create_test_service();
    let id = "040000008200E00074C5B7101A82E008";
    let response = put_and_fetch(&service, &object_path("calendar", id), id).await;
    assert_eq!(response.ical_line("UID"), Some(format!("UID:{id}")));
}

/// ## Summary
/// Paths that match no resource shape are 404.
#[test_log::test(tokio::test)]
async fn unknown_shapes_are_not_found() {
    let service = create_test_service();

    for path in [
        "/dav/caldav/calendar/object.txt",
        "/dav/caldav/calendar/.ics",
        "/dav/caldav/calendar/object.ics/",
        "/dav/caldav/calendar/nested/object.ics",
        "/dav/principals/",
        "/dav/unknown/",
        "/davx/caldav/",
        "/other/caldav/calendar/",
    ] {
        let _response = TestRequest::get(path)
            .send(&service)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
