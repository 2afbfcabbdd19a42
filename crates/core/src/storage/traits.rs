use async_trait::async_trait;

use crate::event::{Event, EventPatch};

use super::Result;

/// Persistence contract for events and their band/member associations.
///
/// Reads return a consistent snapshot; writes are atomic per identifier.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Gets every stored event, undecorated, in store order.
    async fn find_all(&self) -> Result<Vec<Event>>;

    /// Gets an event by its ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Event>>;

    /// Inserts or replaces the event stored under `event.id`.
    ///
    /// When `event.bands` is present the stored associations are rewritten
    /// to match it; when absent they are left as they are.
    async fn save(&self, event: &Event) -> Result<Event>;

    /// Applies `patch` to the event stored under `id` as one atomic write.
    ///
    /// Band associations are left untouched and nothing is ever inserted:
    /// a missing ID fails with `NotFound`. Returns the stored event.
    async fn apply_patch(&self, id: i64, patch: &EventPatch) -> Result<Event>;

    /// Deletes an event by its ID. Deleting a missing ID is not an error.
    async fn delete_by_id(&self, id: i64) -> Result<()>;
}
