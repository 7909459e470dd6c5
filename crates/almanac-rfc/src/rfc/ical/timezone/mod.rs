//! Timezone handling: TZID resolution, wall-clock conversion and
//! `VTIMEZONE` synthesis.

mod resolver;
mod vtimezone;

pub use resolver::{ConversionError, TimeZoneResolver, local_to_utc, utc_to_local};
pub use vtimezone::{Transition, build_vtimezone, transitions_in_year};
