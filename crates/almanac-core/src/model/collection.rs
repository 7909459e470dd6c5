use chrono::{DateTime, Utc};

use crate::types::CollectionType;

/// A calendar-bearing collection as reported by the backing store.
///
/// URLs are not stored here; they are derived from `id` by the address resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub id: String,
    pub collection_type: CollectionType,
    pub display_name: Option<String>,
    /// Component names accepted by the collection, e.g. `VEVENT`.
    pub supported_components: Vec<String>,
    /// User name of the owning principal.
    pub owner: String,
    /// Opaque change token; differs after every membership or content change.
    pub ctag: String,
}

impl Collection {
    #[must_use]
    pub fn calendar(id: impl Into<String>, owner: impl Into<String>, ctag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            collection_type: CollectionType::Calendar,
            display_name: None,
            supported_components: vec!["VEVENT".to_string()],
            owner: owner.into(),
            ctag: ctag.into(),
        }
    }

    #[must_use]
    pub fn schedule_inbox(owner: impl Into<String>, ctag: impl Into<String>) -> Self {
        Self {
            id: crate::constants::SCHEDULE_INBOX_COMPONENT.to_string(),
            collection_type: CollectionType::ScheduleInbox,
            display_name: None,
            supported_components: vec!["VEVENT".to_string()],
            owner: owner.into(),
            ctag: ctag.into(),
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// What kind of WebDAV resource an entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Collection(CollectionType),
    CalendarObject,
}

/// Store-owned bookkeeping for a single calendar object resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMetadata {
    /// Resource name inside its collection, without the `.ics` suffix.
    pub object_id: String,
    /// Quoted entity tag; changes on every content mutation.
    pub etag: String,
    pub last_modified: DateTime<Utc>,
    pub kind: ResourceKind,
}
