use thiserror::Error;

use crate::rfc::dav::parse::ParseError as DavParseError;
use crate::rfc::ical::parse::ParseError as ICalParseError;
use crate::rfc::ical::timezone::ConversionError;

/// RFC parsing and validation errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("iCalendar parse error: {0}")]
    ICalParse(#[from] ICalParseError),

    #[error("DAV XML parse error: {0}")]
    DavParse(#[from] DavParseError),

    #[error("Timezone error: {0}")]
    Timezone(#[from] ConversionError),

    #[error("RRule validation error: {0}")]
    RRule(#[from] rrule::RRuleError),

    #[error("XML write error: {0}")]
    XmlWrite(String),

    #[error(transparent)]
    CoreError(#[from] almanac_core::error::CoreError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
