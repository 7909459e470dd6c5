//! Transport-independent CalDAV request handling: the backing-store
//! contract, address resolution, PROPFIND property resolution and the
//! per-method coordinator.

pub mod caldav;
pub mod dav;
pub mod error;
pub mod store;
