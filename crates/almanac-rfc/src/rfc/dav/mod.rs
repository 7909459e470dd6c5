//! `WebDAV` and `CalDAV` protocol vocabulary (RFC 4918, RFC 4791, RFC 6638).
//!
//! - `core`: names, properties, multistatus, Depth and href types
//! - `parse`: PROPFIND request bodies
//! - `build`: multistatus response bodies
//! - `conditional`: `If-Match` / `If-None-Match` evaluation

pub mod build;
pub mod conditional;
pub mod core;
pub mod parse;
