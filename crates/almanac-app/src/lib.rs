//! HTTP surface of the Almanac `CalDAV` server.

pub mod app;
pub mod caldav_handler;
pub mod config;
pub mod error;
pub mod middleware;
