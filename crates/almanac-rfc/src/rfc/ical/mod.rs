//! iCalendar (RFC 5545) support.
//!
//! - `core`: the generic component/property tree
//! - `parse`: text to tree
//! - `build`: tree to folded, escaped text
//! - `timezone`: zone resolution, wall-clock conversion and `VTIMEZONE` synthesis
//! - `codec`: tree to and from the event model

pub mod build;
pub mod codec;
pub mod core;
pub mod parse;
pub mod timezone;

pub use codec::ICalCodec;
