pub mod delete;
pub mod get_head;
pub mod options;
pub mod propfind;
pub mod put;


use almanac_service::caldav::DavMethod;
use salvo::{Depot, Request, Response};

use crate::app::api::dav::extract::dav_request;
use crate::app::api::dav::response::{write_error, write_response};
use crate::caldav_handler::get_handler_from_depot;

/// ## Summary
/// Runs one request through the resource handler and writes its answer.
///
/// ## Side Effects
/// Reads the request body and sets status, headers and body on `res`.
async fn serve(req: &mut Request, depot: &Depot, res: &mut Response, method: DavMethod) {
    let handler = match get_handler_from_depot(depot) {
        Ok(handler) => handler,
        Err(e) => {
            write_error(res, &e);
            return;
        }
    };

    match dav_request(req, depot, method).await {
        Ok(request) => write_response(res, handler.handle(request).await),
        Err(e) => write_error(res, &e),
    }
}
