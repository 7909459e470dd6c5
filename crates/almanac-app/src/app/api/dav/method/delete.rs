//! DELETE method handler for calendar objects.

use almanac_service::caldav::DavMethod;
use salvo::{Depot, Request, Response, handler};

/// ## Summary
/// Handles DELETE requests for calendar objects.
///
/// ## Side Effects
/// Removes the object and bumps the collection's ctag.
///
/// ## Errors
/// Returns 404 if the object is not found, 412 for failed preconditions.
#[handler]
#[tracing::instrument(skip_all, fields(
    method = "DELETE",
    path = %req.uri().path()
))]
pub async fn delete(req: &mut Request, res: &mut Response, depot: &Depot) {
    tracing::info!("Handling DELETE request");
    super::serve(req, depot, res, DavMethod::Delete).await;
}
