//! `WebDAV` addressing and property discovery.

mod address;
mod properties;

pub use address::{ResourceAddress, ResourceAddressResolver};
pub use properties::{KnownProperty, PropertyResponseBuilder, ResourceView};
