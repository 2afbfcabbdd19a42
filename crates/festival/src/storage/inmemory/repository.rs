//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use festival_core::event::{Event, EventPatch};
use festival_core::storage::{EventRepository, RepositoryError, Result};

/// In-memory event storage.
///
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    events: Arc<RwLock<BTreeMap<i64, Event>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryRepository {
    async fn find_all(&self) -> Result<Vec<Event>> {
        let events = self.events.read().await;
        Ok(events.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Event>> {
        let events = self.events.read().await;
        Ok(events.get(&id).cloned())
    }

    async fn save(&self, event: &Event) -> Result<Event> {
        let mut events = self.events.write().await;
        let mut stored = event.clone();
        if stored.bands.is_none() {
            stored.bands = events.get(&event.id).and_then(|e| e.bands.clone());
        }
        events.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn apply_patch(&self, id: i64, patch: &EventPatch) -> Result<Event> {
        let mut events = self.events.write().await;
        let event = events
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::event_not_found(id))?;
        patch.clone().apply_to(event);
        Ok(event.clone())
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let mut events = self.events.write().await;
        if events.remove(&id).is_none() {
            tracing::debug!(event_id = id, "Delete of unknown event ignored");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use festival_core::event::{Band, Member};

    fn grasspop() -> Event {
        Event::new(1, "GrasPop Metal Meeting").with_bands([
            Band::new(1, "Metallica").with_members([Member::new(1, "Queen Anika Walsh")])
        ])
    }

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let repo = InMemoryRepository::new();

        let saved = repo.save(&grasspop()).await.unwrap();
        let found = repo.find_by_id(1).await.unwrap();

        assert_eq!(saved, grasspop());
        assert_eq!(found, Some(grasspop()));
    }

    #[tokio::test]
    async fn test_find_by_id_nonexistent() {
        let repo = InMemoryRepository::new();

        assert_eq!(repo.find_by_id(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_all_is_ordered_by_id() {
        let repo = InMemoryRepository::new();
        repo.save(&Event::new(3, "C")).await.unwrap();
        repo.save(&Event::new(1, "A")).await.unwrap();
        repo.save(&Event::new(2, "B")).await.unwrap();

        let ids: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|e| e.id)
            .collect();

        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_save_without_bands_keeps_stored_bands() {
        let repo = InMemoryRepository::new();
        repo.save(&grasspop()).await.unwrap();

        let renamed = Event::new(1, "Renamed");
        let saved = repo.save(&renamed).await.unwrap();

        assert_eq!(saved.title.as_deref(), Some("Renamed"));
        assert_eq!(saved.bands, grasspop().bands);
    }

    #[tokio::test]
    async fn test_apply_patch_keeps_bands() {
        let repo = InMemoryRepository::new();
        repo.save(&grasspop()).await.unwrap();

        let patch = EventPatch {
            nb_stars: Some(2),
            ..Default::default()
        };
        let patched = repo.apply_patch(1, &patch).await.unwrap();

        assert_eq!(patched.nb_stars, Some(2));
        assert_eq!(patched.bands, grasspop().bands);
        assert_eq!(repo.find_by_id(1).await.unwrap(), Some(patched));
    }

    #[tokio::test]
    async fn test_apply_patch_on_missing_event_does_not_insert() {
        let repo = InMemoryRepository::new();

        let patch = EventPatch {
            title: Some("Ghost".to_string()),
            ..Default::default()
        };
        let result = repo.apply_patch(1, &patch).await;

        assert_eq!(result, Err(RepositoryError::event_not_found(1)));
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = InMemoryRepository::new();
        repo.save(&grasspop()).await.unwrap();

        repo.delete_by_id(1).await.unwrap();
        repo.delete_by_id(1).await.unwrap();

        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
