//! `CalDAV` request coordination.

mod handler;

pub use handler::{CalDavResourceHandler, DavMethod, DavRequest, DavResponse};
