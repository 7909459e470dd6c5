//! Tests for DELETE.

use salvo::http::StatusCode;

use super::helpers::*;

/// ## Summary
/// DELETE of a stored object is 204; afterwards it is gone.
#[test_log::test(tokio::test)]
async fn delete_existing_object() {
    let service = create_test_service();
    let path = object_path("calendar", "doomed");

    let _created = TestRequest::put(&path)
        .icalendar_body(&sample_icalendar_event("doomed", "Doomed"))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED);

    let _deleted = TestRequest::delete(&path)
        .send(&service)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let _gone = TestRequest::get(&path)
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let _again = TestRequest::delete(&path)
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

/// ## Summary
/// DELETE of a missing schedule-inbox item is a clean 404.
#[test_log::test(tokio::test)]
async fn delete_missing_schedule_inbox_item() {
    let service = create_test_service();
    let _response = TestRequest::delete(&object_path("schedule-inbox", "6f1c9a40-unknown"))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

/// ## Summary
/// DELETE of an item in the schedule inbox works like any other object.
#[test_log::test(tokio::test)]
async fn delete_schedule_inbox_item() {
    let service = create_test_service();
    let path = object_path("schedule-inbox", "request-1");

    let _created = TestRequest::put(&path)
        .icalendar_body(&sample_icalendar_event("request-1", "Invitation"))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED);

    let _deleted = TestRequest::delete(&path)
        .send(&service)
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

/// ## Summary
/// DELETE in a collection that does not exist is 404, not a server error.
#[test_log::test(tokio::test)]
async fn delete_in_missing_collection() {
    let service = create_test_service();
    let _response = TestRequest::delete(&object_path("no-such-calendar", "x"))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

/// ## Summary
/// A stale If-Match protects the object from deletion.
#[test_log::test(tokio::test)]
async fn delete_if_match_stale_fails() {
    let service = create_test_service();
    let path = object_path("calendar", "kept");

    let _created = TestRequest::put(&path)
        .icalendar_body(&sample_icalendar_event("kept", "Kept"))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED);

    let _refused = TestRequest::delete(&path)
        .if_match("\"stale\"")
        .send(&service)
        .await
        .assert_status(StatusCode::PRECONDITION_FAILED);

    let _still_there = TestRequest::get(&path)
        .send(&service)
        .await
        .assert_status(StatusCode::OK);
}

/// ## Summary
/// DELETE on a collection path is 405.
#[test_log::test(tokio::test)]
async fn delete_collection_is_method_not_allowed() {
    let service = create_test_service();
    let _response = TestRequest::delete(&collection_path("calendar"))
        .send(&service)
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
