//! FILENAME: engine/src/feed.rs
//! PURPOSE: Record sources and the change feed that keeps list screens fresh.
//! CONTEXT: Screens fetch a full snapshot from a `RecordSource`, then subscribe
//! to the `ChangeFeed` for the record kind they show. Any insert, update or
//! delete triggers a refetch; nothing is patched incrementally. `MemoryStore`
//! is an in-process source that publishes to its own feed on every write.

use crate::record::{attach_request_counts, Citizen, Communication, MilitaryPersonnel, Record, ServiceRequest};
use crate::{log_debug, log_warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

// ============================================================================
// EVENTS
// ============================================================================

/// The record collections the CRM stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Citizens,
    Requests,
    Communications,
    Military,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Citizens,
        EntityKind::Requests,
        EntityKind::Communications,
        EntityKind::Military,
    ];

    /// Storage table name.
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::Citizens => "citizens",
            EntityKind::Requests => "requests",
            EntityKind::Communications => "communications",
            EntityKind::Military => "military_personnel",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeOp {
    Insert,
    Update,
    Delete,
}

/// One change to a stored record. `record` is the affected row as JSON
/// (the new row for insert/update, the removed row for delete).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeEvent {
    pub kind: EntityKind,
    pub op: ChangeOp,
    pub record: serde_json::Value,
}

impl ChangeEvent {
    pub fn record_id(&self) -> Option<&str> {
        self.record.get("id").and_then(|v| v.as_str())
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{kind} unavailable: {reason}")]
    Unavailable { kind: EntityKind, reason: String },

    #[error("record not found in {kind}: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ============================================================================
// CHANGE FEED
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&ChangeEvent)>;

struct Subscription {
    id: SubscriptionId,
    kind: EntityKind,
    callback: Callback,
}

/// Synchronous publish/subscribe hub. Callbacks run in subscription order on
/// the publishing thread.
#[derive(Default)]
pub struct ChangeFeed {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, kind: EntityKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&ChangeEvent) + 'static,
    {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscriptions.push(Subscription {
            id,
            kind,
            callback: Box::new(callback),
        });
        log_debug!("FEED", "subscribe {:?} on {}", id, kind);
        id
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        let removed = self.subscriptions.len() != before;
        log_debug!("FEED", "unsubscribe {:?} removed={}", id, removed);
        removed
    }

    /// Delivers the event to every subscriber of its kind.
    /// Returns the number of callbacks invoked.
    pub fn publish(&mut self, event: &ChangeEvent) -> usize {
        let mut delivered = 0;
        for sub in self.subscriptions.iter_mut().filter(|s| s.kind == event.kind) {
            (sub.callback)(event);
            delivered += 1;
        }
        log_debug!(
            "FEED",
            "publish {:?} {} id={} delivered={}",
            event.op,
            event.kind,
            event.record_id().unwrap_or("?"),
            delivered
        );
        delivered
    }

    pub fn subscriber_count(&self, kind: EntityKind) -> usize {
        self.subscriptions.iter().filter(|s| s.kind == kind).count()
    }
}

impl fmt::Debug for ChangeFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeFeed")
            .field("next_id", &self.next_id)
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

// ============================================================================
// RECORD SOURCE
// ============================================================================

/// Where list screens and the dashboard fetch their snapshots from.
pub trait RecordSource {
    fn list_citizens(&self) -> Result<Vec<Citizen>, FetchError>;
    fn list_requests(&self) -> Result<Vec<ServiceRequest>, FetchError>;
    fn list_communications(&self) -> Result<Vec<Communication>, FetchError>;
    fn list_military(&self) -> Result<Vec<MilitaryPersonnel>, FetchError>;
}

/// Records that a `MemoryStore` can hold.
pub trait StoredRecord: Record + Serialize + Clone {
    const KIND: EntityKind;
    fn rows(store: &MemoryStore) -> &Vec<Self>;
    fn rows_mut(store: &mut MemoryStore) -> &mut Vec<Self>;
}

impl StoredRecord for Citizen {
    const KIND: EntityKind = EntityKind::Citizens;
    fn rows(store: &MemoryStore) -> &Vec<Self> {
        &store.citizens
    }
    fn rows_mut(store: &mut MemoryStore) -> &mut Vec<Self> {
        &mut store.citizens
    }
}

impl StoredRecord for ServiceRequest {
    const KIND: EntityKind = EntityKind::Requests;
    fn rows(store: &MemoryStore) -> &Vec<Self> {
        &store.requests
    }
    fn rows_mut(store: &mut MemoryStore) -> &mut Vec<Self> {
        &mut store.requests
    }
}

impl StoredRecord for Communication {
    const KIND: EntityKind = EntityKind::Communications;
    fn rows(store: &MemoryStore) -> &Vec<Self> {
        &store.communications
    }
    fn rows_mut(store: &mut MemoryStore) -> &mut Vec<Self> {
        &mut store.communications
    }
}

impl StoredRecord for MilitaryPersonnel {
    const KIND: EntityKind = EntityKind::Military;
    fn rows(store: &MemoryStore) -> &Vec<Self> {
        &store.military
    }
    fn rows_mut(store: &mut MemoryStore) -> &mut Vec<Self> {
        &mut store.military
    }
}

/// In-process record store. Writes publish on the store's own feed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    citizens: Vec<Citizen>,
    requests: Vec<ServiceRequest>,
    communications: Vec<Communication>,
    military: Vec<MilitaryPersonnel>,
    unavailable: HashSet<EntityKind>,
    feed: ChangeFeed,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed_mut(&mut self) -> &mut ChangeFeed {
        &mut self.feed
    }

    /// Makes every fetch of `kind` fail until cleared.
    pub fn set_unavailable(&mut self, kind: EntityKind, unavailable: bool) {
        if unavailable {
            self.unavailable.insert(kind);
        } else {
            self.unavailable.remove(&kind);
        }
    }

    fn check_available(&self, kind: EntityKind) -> Result<(), FetchError> {
        if self.unavailable.contains(&kind) {
            log_warn!("STORE", "fetch of {} refused: marked unavailable", kind);
            return Err(FetchError::Unavailable {
                kind,
                reason: "source marked unavailable".to_string(),
            });
        }
        Ok(())
    }

    pub fn get<T: StoredRecord>(&self, id: &str) -> Option<&T> {
        T::rows(self).iter().find(|r| r.id() == id)
    }

    pub fn len<T: StoredRecord>(&self) -> usize {
        T::rows(self).len()
    }

    /// Inserts a new row or replaces the row with the same id.
    pub fn upsert<T: StoredRecord>(&mut self, record: T) -> Result<ChangeOp, FetchError> {
        let payload = serde_json::to_value(&record)?;
        let rows = T::rows_mut(self);
        let op = match rows.iter().position(|r| r.id() == record.id()) {
            Some(index) => {
                rows[index] = record;
                ChangeOp::Update
            }
            None => {
                rows.push(record);
                ChangeOp::Insert
            }
        };
        self.feed.publish(&ChangeEvent {
            kind: T::KIND,
            op,
            record: payload,
        });
        Ok(op)
    }

    pub fn delete<T: StoredRecord>(&mut self, id: &str) -> Result<T, FetchError> {
        let rows = T::rows_mut(self);
        let index = rows
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| FetchError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            })?;
        let removed = rows.remove(index);
        let payload = serde_json::to_value(&removed)?;
        self.feed.publish(&ChangeEvent {
            kind: T::KIND,
            op: ChangeOp::Delete,
            record: payload,
        });
        Ok(removed)
    }
}

impl RecordSource for MemoryStore {
    /// Active citizens only, newest first, with request counts attached.
    fn list_citizens(&self) -> Result<Vec<Citizen>, FetchError> {
        self.check_available(EntityKind::Citizens)?;
        let mut citizens: Vec<Citizen> = self.citizens.iter().filter(|c| c.is_active).cloned().collect();
        citizens.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        attach_request_counts(&mut citizens, &mut [], &self.requests);
        Ok(citizens)
    }

    /// Newest submission first, with the owning citizen embedded.
    fn list_requests(&self) -> Result<Vec<ServiceRequest>, FetchError> {
        self.check_available(EntityKind::Requests)?;
        let mut requests = self.requests.clone();
        for request in requests.iter_mut() {
            if request.citizen.is_none() {
                request.citizen = self.get::<Citizen>(&request.citizen_id).map(Citizen::to_ref);
            }
        }
        requests.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(requests)
    }

    fn list_communications(&self) -> Result<Vec<Communication>, FetchError> {
        self.check_available(EntityKind::Communications)?;
        let mut communications = self.communications.clone();
        for comm in communications.iter_mut() {
            if comm.citizen.is_none() {
                comm.citizen = self.get::<Citizen>(&comm.citizen_id).map(Citizen::to_ref);
            }
        }
        communications.sort_by(|a, b| b.communication_date.cmp(&a.communication_date));
        Ok(communications)
    }

    fn list_military(&self) -> Result<Vec<MilitaryPersonnel>, FetchError> {
        self.check_available(EntityKind::Military)?;
        let mut military = self.military.clone();
        military.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        attach_request_counts(&mut [], &mut military, &self.requests);
        Ok(military)
    }
}
