//! PROPFIND method handler.

use almanac_service::caldav::DavMethod;
use salvo::{Depot, Request, Response, handler};

/// ## Summary
/// Handles PROPFIND requests on collections, objects and principals.
///
/// ## Side Effects
/// Returns a 207 Multi-Status XML response.
///
/// ## Errors
/// Returns 400 for malformed bodies or `Depth` headers, 404 for missing resources.
#[handler]
#[tracing::instrument(skip_all, fields(
    method = "PROPFIND",
    path = %req.uri().path()
))]
pub async fn propfind(req: &mut Request, res: &mut Response, depot: &Depot) {
    tracing::info!("Handling PROPFIND request");
    super::serve(req, depot, res, DavMethod::Propfind).await;
}
