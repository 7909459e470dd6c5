//! GET and HEAD method handlers for calendar objects.

use almanac_service::caldav::DavMethod;
use salvo::{Depot, Request, Response, handler};

/// ## Summary
/// Handles GET requests for calendar objects.
///
/// ## Side Effects
/// Sets `ETag`, `Last-Modified`, `Content-Type` headers and the iCalendar body.
///
/// ## Errors
/// Returns 404 for missing objects, 405 for collections, 304 or 412 for
/// failed preconditions.
#[handler]
#[tracing::instrument(skip_all, fields(
    method = "GET",
    path = %req.uri().path()
))]
pub async fn get(req: &mut Request, res: &mut Response, depot: &Depot) {
    tracing::info!("Handling GET request");
    super::serve(req, depot, res, DavMethod::Get).await;
}

/// ## Summary
/// Handles HEAD requests for calendar objects: GET without a body.
#[handler]
#[tracing::instrument(skip_all, fields(
    method = "HEAD",
    path = %req.uri().path()
))]
pub async fn head(req: &mut Request, res: &mut Response, depot: &Depot) {
    tracing::info!("Handling HEAD request");
    super::serve(req, depot, res, DavMethod::Head).await;
}
