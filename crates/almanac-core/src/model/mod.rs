//! Domain model owned by the backing store and viewed by the protocol layer.

mod collection;
mod event;
mod principal;

pub use collection::{Collection, ResourceKind, ResourceMetadata};
pub use event::{Event, EventTime, Recurrence, is_utc_zone};
pub use principal::Principal;
