//! Multistatus response types (RFC 4918 §13).

use super::href::Href;
use super::property::DavProperty;

/// A `207 Multi-Status` body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Multistatus {
    pub responses: Vec<PropstatResponse>,
}

impl Multistatus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_response(&mut self, response: PropstatResponse) {
        self.responses.push(response);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

/// A single `<D:response>` within a multistatus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropstatResponse {
    pub href: Href,
    /// Property statuses grouped by status code.
    pub propstats: Vec<Propstat>,
}

impl PropstatResponse {
    #[must_use]
    pub fn new(href: impl Into<Href>) -> Self {
        Self {
            href: href.into(),
            propstats: Vec::new(),
        }
    }

    /// ## Summary
    /// Creates a response with found and not-found properties.
    ///
    /// Empty groups are omitted, so a response where every property resolved
    /// carries a single `200` propstat. A response always holds at least one
    /// propstat: with nothing to report it carries an empty `200` group.
    #[must_use]
    pub fn with_found_and_not_found(
        href: impl Into<Href>,
        found: Vec<DavProperty>,
        not_found: Vec<DavProperty>,
    ) -> Self {
        let mut propstats = Vec::new();
        if !found.is_empty() {
            propstats.push(Propstat::new(Status::Ok, found));
        }
        if !not_found.is_empty() {
            propstats.push(Propstat::new(Status::NotFound, not_found));
        }
        if propstats.is_empty() {
            propstats.push(Propstat::new(Status::Ok, Vec::new()));
        }

        Self {
            href: href.into(),
            propstats,
        }
    }

    /// Returns the propstat group with the given status, if any.
    #[must_use]
    pub fn propstat(&self, status: Status) -> Option<&Propstat> {
        self.propstats.iter().find(|p| p.status == status)
    }
}

/// Property status grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Propstat {
    pub status: Status,
    pub properties: Vec<DavProperty>,
}

impl Propstat {
    #[must_use]
    pub fn new(status: Status, properties: Vec<DavProperty>) -> Self {
        Self { status, properties }
    }
}

/// HTTP status for propstat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// 200 OK
    Ok,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
}

impl Status {
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Forbidden => 403,
            Self::NotFound => 404,
        }
    }

    #[must_use]
    pub const fn reason_phrase(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not Found",
        }
    }

    /// Returns the status line, e.g. `HTTP/1.1 404 Not Found`.
    #[must_use]
    pub fn status_line(self) -> String {
        format!("HTTP/1.1 {} {}", self.code(), self.reason_phrase())
    }
}
