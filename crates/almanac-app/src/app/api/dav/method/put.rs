//! PUT method handler for calendar objects.

use almanac_service::caldav::DavMethod;
use salvo::{Depot, Request, Response, handler};

/// ## Summary
/// Handles PUT requests storing an iCalendar document as a calendar object.
///
/// ## Side Effects
/// Creates or replaces the object and bumps the collection's ctag.
///
/// ## Errors
/// Returns 400 for unparseable bodies, 404 when the collection is missing,
/// 412 for failed preconditions.
#[handler]
#[tracing::instrument(skip_all, fields(
    method = "PUT",
    path = %req.uri().path()
))]
pub async fn put(req: &mut Request, res: &mut Response, depot: &Depot) {
    tracing::info!("Handling PUT request");
    super::serve(req, depot, res, DavMethod::Put).await;
}
