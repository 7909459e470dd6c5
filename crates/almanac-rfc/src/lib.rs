//! Wire formats spoken by the server: iCalendar (RFC 5545) and the
//! `WebDAV`/`CalDAV` XML vocabulary (RFC 4918, RFC 4791).

pub mod error;
pub mod rfc;
