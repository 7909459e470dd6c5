//! Mapping between resource identifiers and URL paths.

use almanac_core::constants::{
    CALDAV_ROUTE_COMPONENT, CALENDAR_OBJECT_EXTENSION, PRINCIPAL_USERS_COMPONENT,
    PRINCIPALS_ROUTE_COMPONENT, SCHEDULE_INBOX_COMPONENT, SCHEDULE_OUTBOX_COMPONENT,
};
use almanac_core::types::CollectionType;
use almanac_rfc::rfc::dav::core::{Href, decode_segment, encode_segment};

use crate::error::{ServiceError, ServiceResult};

/// A resource addressed by a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceAddress {
    /// `<base>/`
    Root,
    /// `<base>/caldav/`
    CalendarHome,
    /// `<base>/caldav/<collection>/`
    Collection {
        collection_id: String,
        kind: CollectionType,
    },
    /// `<base>/caldav/<collection>/<object>.ics`
    Object {
        collection_id: String,
        object_id: String,
    },
    /// `<base>/principals/users/<user>/`
    Principal { user: String },
}

impl ResourceAddress {
    /// Returns whether the address names a collection-like resource.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        !matches!(self, Self::Object { .. })
    }
}

/// Maps collection and object identifiers to canonical URL paths and back.
///
/// Identifiers are opaque strings: they are percent-encoded segment by
/// segment and never interpreted as numbers.
#[derive(Debug, Clone)]
pub struct ResourceAddressResolver {
    /// Either empty or `/segment[/segment...]`, without a trailing slash.
    base_path: String,
}

impl ResourceAddressResolver {
    /// Creates a resolver for routes mounted under `base_path`.
    #[must_use]
    pub fn new(base_path: &str) -> Self {
        let trimmed = base_path.trim().trim_matches('/');
        let base_path = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        Self { base_path }
    }

    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    #[must_use]
    pub fn root_href(&self) -> Href {
        Href::new(format!("{}/", self.base_path))
    }

    #[must_use]
    pub fn home_href(&self) -> Href {
        Href::new(format!("{}/{CALDAV_ROUTE_COMPONENT}/", self.base_path))
    }

    #[must_use]
    pub fn collection_href(&self, collection_id: &str) -> Href {
        Href::new(format!(
            "{}/{CALDAV_ROUTE_COMPONENT}/{}/",
            self.base_path,
            encode_segment(collection_id)
        ))
    }

    #[must_use]
    pub fn schedule_inbox_href(&self) -> Href {
        self.collection_href(SCHEDULE_INBOX_COMPONENT)
    }

    #[must_use]
    pub fn schedule_outbox_href(&self) -> Href {
        self.collection_href(SCHEDULE_OUTBOX_COMPONENT)
    }

    /// ## Summary
    /// Returns the canonical URL path of a calendar object.
    #[must_use]
    pub fn resolve(&self, collection_id: &str, object_id: &str) -> Href {
        Href::new(format!(
            "{}/{CALDAV_ROUTE_COMPONENT}/{}/{}{CALENDAR_OBJECT_EXTENSION}",
            self.base_path,
            encode_segment(collection_id),
            encode_segment(object_id)
        ))
    }

    #[must_use]
    pub fn principal_href(&self, user: &str) -> Href {
        Href::new(format!(
            "{}/{PRINCIPALS_ROUTE_COMPONENT}/{PRINCIPAL_USERS_COMPONENT}/{}/",
            self.base_path,
            encode_segment(user)
        ))
    }

    /// Returns the canonical href of an address.
    #[must_use]
    pub fn href_for(&self, address: &ResourceAddress) -> Href {
        match address {
            ResourceAddress::Root => self.root_href(),
            ResourceAddress::CalendarHome => self.home_href(),
            ResourceAddress::Collection { collection_id, .. } => self.collection_href(collection_id),
            ResourceAddress::Object {
                collection_id,
                object_id,
            } => self.resolve(collection_id, object_id),
            ResourceAddress::Principal { user } => self.principal_href(user),
        }
    }

    /// ## Summary
    /// Parses a percent-encoded request path into a resource address.
    ///
    /// Collection paths match with or without their trailing slash. Object
    /// paths must end in `.ics` and carry no trailing slash.
    ///
    /// ## Errors
    /// Returns `ServiceError::AddressNotFound` if the path lies outside the
    /// base path, matches no known shape, or decodes to invalid UTF-8.
    pub fn parse(&self, path: &str) -> ServiceResult<ResourceAddress> {
        let not_found = || ServiceError::AddressNotFound(path.to_string());

        let rest = path.strip_prefix(self.base_path.as_str()).ok_or_else(not_found)?;
        if !rest.is_empty() && !rest.starts_with('/') {
            return Err(not_found());
        }

        let trailing_slash = rest.ends_with('/');
        let trimmed = rest.trim_start_matches('/').trim_end_matches('/');
        let segments: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };
        if segments.iter().any(|s| s.is_empty()) {
            return Err(not_found());
        }

        let address = match segments.as_slice() {
            [] => ResourceAddress::Root,
            [caldav] if *caldav == CALDAV_ROUTE_COMPONENT => ResourceAddress::CalendarHome,
            [caldav, collection] if *caldav == CALDAV_ROUTE_COMPONENT => {
                let collection_id = decode_segment(collection).ok_or_else(not_found)?;
                let kind = if collection_id == SCHEDULE_INBOX_COMPONENT {
                    CollectionType::ScheduleInbox
                } else {
                    CollectionType::Calendar
                };
                ResourceAddress::Collection {
                    collection_id,
                    kind,
                }
            }
            [caldav, collection, object] if *caldav == CALDAV_ROUTE_COMPONENT && !trailing_slash => {
                let encoded = object
                    .strip_suffix(CALENDAR_OBJECT_EXTENSION)
                    .filter(|id| !id.is_empty())
                    .ok_or_else(not_found)?;
                ResourceAddress::Object {
                    collection_id: decode_segment(collection).ok_or_else(not_found)?,
                    object_id: decode_segment(encoded).ok_or_else(not_found)?,
                }
            }
            [principals, users, user]
                if *principals == PRINCIPALS_ROUTE_COMPONENT
                    && *users == PRINCIPAL_USERS_COMPONENT =>
            {
                ResourceAddress::Principal {
                    user: decode_segment(user).ok_or_else(not_found)?,
                }
            }
            _ => return Err(not_found()),
        };

        tracing::debug!(%path, ?address, "Resolved address");
        Ok(address)
    }
}
