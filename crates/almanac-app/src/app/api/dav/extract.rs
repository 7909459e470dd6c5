//! Translation of salvo requests into handler requests.

use almanac_rfc::rfc::dav::conditional::ConditionalHeaders;
use almanac_service::caldav::{DavMethod, DavRequest};
use almanac_service::store::RequestContext;
use salvo::http::header::{self, HeaderName};
use salvo::{Depot, Request};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::get_context_from_depot;

const DEPTH: HeaderName = HeaderName::from_static("depth");

/// Joins every value of a header with commas, `None` if it is absent.
fn header_value(req: &Request, name: &HeaderName) -> Option<String> {
    let values: Vec<&str> = req
        .headers()
        .get_all(name)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}

/// ## Summary
/// Builds a [`DavRequest`] from the incoming request and the authenticated
/// user in the depot.
///
/// OPTIONS needs no identity and runs with an anonymous context.
///
/// ## Errors
/// Returns `AppError::NotAuthenticated` if no user was stored for a method
/// that needs one, and `AppError::Body` if the body cannot be read.
pub async fn dav_request(req: &mut Request, depot: &Depot, method: DavMethod) -> AppResult<DavRequest> {
    let context = match get_context_from_depot(depot) {
        Ok(context) => context,
        Err(_) if method == DavMethod::Options => RequestContext::new(""),
        Err(e) => return Err(e),
    };

    let conditional = ConditionalHeaders::from_values(
        header_value(req, &header::IF_MATCH).as_deref(),
        header_value(req, &header::IF_NONE_MATCH).as_deref(),
    );
    let depth = header_value(req, &DEPTH);
    let path = req.uri().path().to_string();

    let body = req
        .payload()
        .await
        .map_err(|e| AppError::Body(e.to_string()))?
        .to_vec();
    tracing::debug!(bytes = body.len(), "Request body read successfully");

    let mut request = DavRequest::new(method, path, context)
        .with_conditional(conditional)
        .with_body(body);
    if let Some(depth) = depth {
        request = request.with_depth(depth);
    }
    Ok(request)
}
