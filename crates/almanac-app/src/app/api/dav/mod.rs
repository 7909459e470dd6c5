// Thin salvo adapters over the transport-independent resource handler.

use salvo::Router;

pub mod extract;
pub mod method;
pub mod response;

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .options(method::options::options)
        .get(method::get_head::get)
        .head(method::get_head::head)
        .put(method::put::put)
        .delete(method::delete::delete)
        .push(
            // PROPFIND method
            Router::new()
                .filter_fn(|req, _| req.method().as_str() == "PROPFIND")
                .goal(method::propfind::propfind),
        )
}
