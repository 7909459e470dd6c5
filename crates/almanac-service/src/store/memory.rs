//! In-process backing store.

use std::collections::{BTreeMap, HashMap};

use almanac_core::model::{Collection, Event, Principal, ResourceKind, ResourceMetadata};
use almanac_core::types::CollectionType;
use almanac_rfc::rfc::ical::ICalCodec;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{
    BackingStore, DeleteOutcome, PutOutcome, PutResult, RequestContext, StoreError, StoreResult,
    StoredEvent, generate_etag,
};

#[derive(Debug)]
struct CollectionEntry {
    collection: Collection,
    objects: BTreeMap<String, StoredEvent>,
}

impl CollectionEntry {
    fn new(collection: Collection) -> Self {
        Self {
            collection,
            objects: BTreeMap::new(),
        }
    }

    fn touch(&mut self) {
        self.collection.ctag = new_ctag();
    }
}

#[derive(Debug)]
struct PrincipalEntry {
    principal: Principal,
    collections: BTreeMap<String, CollectionEntry>,
}

fn new_ctag() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// A [`BackingStore`] holding everything in memory behind one lock.
///
/// Every principal is provisioned on first sight with a default calendar and
/// a schedule inbox. Entity tags are digests of the canonical iCalendar text
/// the store would serve for the event.
#[derive(Debug)]
pub struct InMemoryStore {
    codec: ICalCodec,
    default_calendar: String,
    default_calendar_display_name: String,
    principals: RwLock<HashMap<String, PrincipalEntry>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new(
        codec: ICalCodec,
        default_calendar: impl Into<String>,
        default_calendar_display_name: impl Into<String>,
    ) -> Self {
        Self {
            codec,
            default_calendar: default_calendar.into(),
            default_calendar_display_name: default_calendar_display_name.into(),
            principals: RwLock::new(HashMap::new()),
        }
    }

    /// ## Summary
    /// Registers `principal` unless it already exists and returns the stored
    /// record.
    ///
    /// A new principal gets its default calendar and schedule inbox. Known
    /// principals are served under the read lock.
    pub async fn provision(&self, principal: Principal) -> Principal {
        {
            let principals = self.principals.read().await;
            if let Some(entry) = principals.get(&principal.name) {
                return entry.principal.clone();
            }
        }

        let mut principals = self.principals.write().await;
        let entry = principals.entry(principal.name.clone()).or_insert_with(|| {
            tracing::debug!(user = %principal.name, "Provisioning principal");
            let owner = principal.name.clone();
            let calendar = Collection::calendar(&self.default_calendar, &owner, new_ctag())
                .with_display_name(&self.default_calendar_display_name);
            let inbox = Collection::schedule_inbox(&owner, new_ctag());

            let mut collections = BTreeMap::new();
            collections.insert(calendar.id.clone(), CollectionEntry::new(calendar));
            collections.insert(inbox.id.clone(), CollectionEntry::new(inbox));
            PrincipalEntry {
                principal,
                collections,
            }
        });
        entry.principal.clone()
    }

    /// ## Summary
    /// Adds a calendar collection to an existing principal.
    ///
    /// Returns the existing collection unchanged if the id is taken.
    ///
    /// ## Errors
    /// Returns `StoreError::Unavailable` if the principal is unknown.
    pub async fn create_calendar(
        &self,
        owner: &str,
        collection_id: &str,
        display_name: Option<&str>,
    ) -> StoreResult<Collection> {
        let mut principals = self.principals.write().await;
        let entry = principals
            .get_mut(owner)
            .ok_or_else(|| StoreError::Unavailable(format!("unknown principal {owner}")))?;

        let collection = entry
            .collections
            .entry(collection_id.to_string())
            .or_insert_with(|| {
                let mut collection = Collection::calendar(collection_id, owner, new_ctag());
                collection.display_name = display_name.map(str::to_string);
                CollectionEntry::new(collection)
            });
        Ok(collection.collection.clone())
    }
}

#[async_trait]
impl BackingStore for InMemoryStore {
    async fn current_principal(&self, ctx: &RequestContext) -> StoreResult<Principal> {
        Ok(self.provision(Principal::new(&ctx.user)).await)
    }

    async fn get_principal(&self, name: &str) -> StoreResult<Option<Principal>> {
        let principals = self.principals.read().await;
        Ok(principals.get(name).map(|entry| entry.principal.clone()))
    }

    async fn get_collection_metadata(
        &self,
        owner: &str,
        collection_id: &str,
    ) -> StoreResult<Option<Collection>> {
        let principals = self.principals.read().await;
        Ok(principals
            .get(owner)
            .and_then(|entry| entry.collections.get(collection_id))
            .map(|c| c.collection.clone()))
    }

    async fn list_collections(&self, owner: &str) -> StoreResult<Vec<Collection>> {
        let principals = self.principals.read().await;
        let mut collections: Vec<Collection> = principals
            .get(owner)
            .map(|entry| {
                entry
                    .collections
                    .values()
                    .map(|c| c.collection.clone())
                    .collect()
            })
            .unwrap_or_default();
        collections.sort_by_key(|c| c.collection_type == CollectionType::ScheduleInbox);
        Ok(collections)
    }

    async fn list_objects(&self, owner: &str, collection_id: &str) -> StoreResult<Vec<ResourceMetadata>> {
        let principals = self.principals.read().await;
        let collection = principals
            .get(owner)
            .and_then(|entry| entry.collections.get(collection_id))
            .ok_or_else(|| StoreError::CollectionNotFound(collection_id.to_string()))?;
        Ok(collection
            .objects
            .values()
            .map(|stored| stored.metadata.clone())
            .collect())
    }

    async fn get_event(
        &self,
        owner: &str,
        collection_id: &str,
        object_id: &str,
    ) -> StoreResult<Option<StoredEvent>> {
        let principals = self.principals.read().await;
        Ok(principals
            .get(owner)
            .and_then(|entry| entry.collections.get(collection_id))
            .and_then(|c| c.objects.get(object_id))
            .cloned())
    }

    #[tracing::instrument(skip(self, event), fields(event_id = %event.id))]
    async fn put_event(
        &self,
        owner: &str,
        collection_id: &str,
        object_id: &str,
        mut event: Event,
    ) -> StoreResult<PutResult> {
        let now = Utc::now();
        if event.stamp.is_none() {
            event.stamp = Some(now);
        }
        let canonical = self
            .codec
            .encode(&event)
            .map_err(|err| StoreError::Encode(err.to_string()))?;

        let metadata = ResourceMetadata {
            object_id: object_id.to_string(),
            etag: generate_etag(canonical.as_bytes(), &uuid::Uuid::now_v7().to_string()),
            last_modified: now,
            kind: ResourceKind::CalendarObject,
        };

        let mut principals = self.principals.write().await;
        let collection = principals
            .get_mut(owner)
            .and_then(|entry| entry.collections.get_mut(collection_id))
            .ok_or_else(|| StoreError::CollectionNotFound(collection_id.to_string()))?;

        let previous = collection.objects.insert(
            object_id.to_string(),
            StoredEvent {
                event,
                metadata: metadata.clone(),
            },
        );
        collection.touch();

        let outcome = if previous.is_some() {
            PutOutcome::Updated
        } else {
            PutOutcome::Created
        };
        tracing::debug!(?outcome, etag = %metadata.etag, "Stored event");
        Ok(PutResult { outcome, metadata })
    }

    async fn delete_event(
        &self,
        owner: &str,
        collection_id: &str,
        object_id: &str,
    ) -> StoreResult<DeleteOutcome> {
        let mut principals = self.principals.write().await;
        let Some(collection) = principals
            .get_mut(owner)
            .and_then(|entry| entry.collections.get_mut(collection_id))
        else {
            return Ok(DeleteOutcome::NotFound);
        };

        if collection.objects.remove(object_id).is_some() {
            collection.touch();
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::NotFound)
        }
    }
}
