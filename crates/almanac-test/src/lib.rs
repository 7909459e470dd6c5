//! Almanac CalDAV server - integration test support.
//!
//! This crate re-exports the workspace crates so integration tests can use
//! `almanac_test::` paths.

pub mod component {
    pub use almanac_core::{constants, error, model, types};
    pub use almanac_service::{caldav, dav, store};

    pub mod config {
        pub use almanac_app::config::ConfigHandler;
        pub use almanac_core::config::*;
    }

    pub mod middleware {
        pub use almanac_app::middleware::*;
    }
}

pub mod app {
    pub use almanac_app::*;

    pub mod api {
        pub use almanac_app::app::api::*;
    }
}

pub use almanac_rfc as rfc;
