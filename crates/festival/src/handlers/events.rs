//! Event handlers.
//!
//! Listing and search return decorated events: titles and band names carry
//! a bracketed count. Storage always holds the undecorated values.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use festival_core::event::{filter_and_decorate, Event, EventPatch};
use festival_core::storage::{EventRepository, RepositoryError};

use crate::{handlers::AppError, state::AppState};

/// Error response with message (for payload validation errors).
fn error_response(status: StatusCode, message: impl Into<String>) -> (StatusCode, String) {
    let msg = message.into();
    tracing::warn!(status = %status, message = %msg, "API error");
    (status, msg)
}

/// Query parameters for listing events.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive substring matched against member names.
    pub query: Option<String>,
}

// ============================================================================
// List / Search
// ============================================================================

/// List all events, optionally filtered (GET /api/events).
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<Event>>, AppError> {
    search_impl(&state, params.query.as_deref()).await
}

/// Search events by member name (GET /api/events/search/{query}).
pub async fn search_events(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Result<Json<Vec<Event>>, AppError> {
    search_impl(&state, Some(&query)).await
}

async fn search_impl(state: &AppState, query: Option<&str>) -> Result<Json<Vec<Event>>, AppError> {
    tracing::debug!(query = ?query, "Received event search request");

    let events = state.event_repo.find_all().await?;
    let decorated = filter_and_decorate(&events, query);

    tracing::debug!(total = events.len(), matched = decorated.len(), "Filtered events");

    Ok(Json(decorated))
}

// ============================================================================
// Update
// ============================================================================

/// Update an event by ID (PUT /api/events/{id}).
///
/// Only the fields present in the JSON body are changed. Bands are never
/// touched by an update.
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<EventPatch>, JsonRejection>,
) -> Result<StatusCode, Response> {
    let Json(patch) = payload.map_err(|e| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("Failed to parse event payload: {e}"),
        )
        .into_response()
    })?;

    tracing::debug!(event_id = id, patch = ?patch, "Received update event request");

    update_event_impl(state.event_repo.as_ref(), id, patch)
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    Ok(StatusCode::OK)
}

/// Applies the patch to the stored event in one repository write.
///
/// Fails with `NotFound` without writing anything when `id` is unknown.
/// Band associations are never touched.
pub async fn update_event_impl(
    repo: &dyn EventRepository,
    id: i64,
    patch: EventPatch,
) -> Result<Event, RepositoryError> {
    if patch.is_empty() {
        tracing::debug!(event_id = id, "Empty patch, nothing to update");
        return repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::event_not_found(id));
    }

    let updated = repo.apply_patch(id, &patch).await?;

    tracing::info!(event_id = id, "Updated event");

    Ok(updated)
}

// ============================================================================
// Delete
// ============================================================================

/// Delete an event by ID (DELETE /api/events/{id}).
///
/// Deleting an unknown id still answers 200.
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    tracing::debug!(event_id = id, "Received delete event request");

    state.event_repo.delete_by_id(id).await?;

    tracing::info!(event_id = id, "Deleted event");

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryRepository;
    use festival_core::event::{Band, Member};

    fn stored() -> Event {
        Event::new(1, "GrasPop Metal Meeting")
            .with_img_url("img/0000.png")
            .with_nb_stars(5)
            .with_bands([Band::new(1, "Metallica").with_members([Member::new(1, "John Doe")])])
    }

    #[tokio::test]
    async fn test_update_applies_present_fields_only() {
        let repo = InMemoryRepository::new();
        repo.save(&stored()).await.unwrap();

        let patch = EventPatch {
            title: Some("GrasPop 2025".to_string()),
            comment: Some("Sold out".to_string()),
            ..Default::default()
        };
        let updated = update_event_impl(&repo, 1, patch).await.unwrap();

        assert_eq!(updated.title.as_deref(), Some("GrasPop 2025"));
        assert_eq!(updated.comment.as_deref(), Some("Sold out"));
        assert_eq!(updated.img_url.as_deref(), Some("img/0000.png"));
        assert_eq!(updated.nb_stars, Some(5));
        assert_eq!(updated.bands, stored().bands);
        assert_eq!(repo.find_by_id(1).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_unknown_event_is_not_found_and_writes_nothing() {
        let repo = InMemoryRepository::new();

        let patch = EventPatch {
            title: Some("Ghost".to_string()),
            ..Default::default()
        };
        let result = update_event_impl(&repo, 42, patch).await;

        assert_eq!(result, Err(RepositoryError::event_not_found(42)));
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_after_delete_does_not_recreate_event() {
        let repo = InMemoryRepository::new();
        repo.save(&stored()).await.unwrap();
        repo.delete_by_id(1).await.unwrap();

        let patch = EventPatch {
            title: Some("Updated".to_string()),
            ..Default::default()
        };
        let result = update_event_impl(&repo, 1, patch).await;

        assert_eq!(result, Err(RepositoryError::event_not_found(1)));
        assert_eq!(repo.find_by_id(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_with_empty_patch_returns_stored_event() {
        let repo = InMemoryRepository::new();
        repo.save(&stored()).await.unwrap();

        let unchanged = update_event_impl(&repo, 1, EventPatch::default())
            .await
            .unwrap();

        assert_eq!(unchanged, stored());
    }
}
