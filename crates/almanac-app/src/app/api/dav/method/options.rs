//! OPTIONS method handler.

use almanac_service::caldav::DavMethod;
use salvo::{Depot, Request, Response, handler};

/// ## Summary
/// Handles OPTIONS requests on any path.
///
/// ## Side Effects
/// Sets the `Allow` and `DAV` headers on the response.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
pub async fn options(req: &mut Request, res: &mut Response, depot: &Depot) {
    tracing::info!("Handling OPTIONS request");
    super::serve(req, depot, res, DavMethod::Options).await;
}
