//! DAV XML response serialization.

mod multistatus;

pub use multistatus::serialize_multistatus;
