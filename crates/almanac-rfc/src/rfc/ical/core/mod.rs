//! iCalendar core models (RFC 5545).
//!
//! A generic tree of components and properties. Properties the codec knows
//! about carry a typed `Value`; everything else keeps its raw text so it can be
//! written back untouched.

mod component;
mod datetime;
mod parameter;
mod property;
mod rrule;
mod value;

pub use component::{Component, ComponentKind, ICalendar};
pub use datetime::{Date, DateTime, DateTimeForm, UtcOffset};
pub use parameter::Parameter;
pub use property::{Property, names};
pub use rrule::{RRule, RRuleUntil};
pub use value::Value;
