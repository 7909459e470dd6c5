//! Tests for the authentication middleware.

use salvo::http::StatusCode;

use super::helpers::*;

/// ## Summary
/// Under proxy authentication a request without the user header is 401.
#[test_log::test(tokio::test)]
async fn proxy_auth_requires_header() {
    let service = create_service_with(&proxy_config());

    let _rejected = TestRequest::propfind("/dav/caldav/")
        .send(&service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let _blank = TestRequest::propfind("/dav/caldav/")
        .header(PROXY_USER_HEADER, "   ")
        .send(&service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

/// ## Summary
/// The proxy-supplied user becomes the current principal.
#[test_log::test(tokio::test)]
async fn proxy_auth_uses_header_user() {
    let service = create_service_with(&proxy_config());

    let _response = TestRequest::propfind("/dav/")
        .header(PROXY_USER_HEADER, "jane")
        .xml_body(&propfind_props(&[("DAV:", "current-user-principal")]))
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains("<D:href>/dav/principals/users/jane/</D:href>");
}

/// ## Summary
/// Each proxy user sees only their own calendar objects.
#[test_log::test(tokio::test)]
async fn proxy_users_are_isolated() {
    let service = create_service_with(&proxy_config());
    let path = object_path("calendar", "private");

    let _created = TestRequest::put(&path)
        .header(PROXY_USER_HEADER, "alice")
        .icalendar_body(&sample_icalendar_event("private", "Alice only"))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED);

    let _own = TestRequest::get(&path)
        .header(PROXY_USER_HEADER, "alice")
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    let _other = TestRequest::get(&path)
        .header(PROXY_USER_HEADER, "bob")
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

/// ## Summary
/// In single-user mode every request acts as the configured user.
#[test_log::test(tokio::test)]
async fn single_user_needs_no_header() {
    let service = create_test_service();
    let _response = TestRequest::propfind("/dav/")
        .xml_body(&propfind_props(&[("DAV:", "current-user-principal")]))
        .send(&service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains(&format!("/dav/principals/users/{TEST_USER}/"));
}
