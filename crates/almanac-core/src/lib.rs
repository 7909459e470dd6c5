//! Shared configuration, domain model and route constants for the Almanac
//! CalDAV server.

pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod types;
