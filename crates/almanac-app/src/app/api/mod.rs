mod dav;

use salvo::Router;

use crate::middleware::auth::AuthMiddleware;

/// ## Summary
/// Constructs the router serving every DAV resource.
///
/// Requests outside the configured base path reach the handler too and are
/// answered 404 there.
#[must_use]
pub fn routes() -> Router {
    Router::new()
        .hoop(AuthMiddleware)
        .push(Router::with_path("{**rest}").push(dav::routes()))
}
