//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. Storage sits behind an `EventRepository` trait object;
//! the concrete backend is picked by feature flag.

use std::{sync::Arc, time::Duration};

use festival_core::storage::EventRepository;

use crate::config::Config;

/// Shared application state.
///
/// This is cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Event repository.
    pub event_repo: Arc<dyn EventRepository>,
    /// Time budget for a single request.
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates a new AppState around the given repository and configuration.
    fn build(event_repo: Arc<dyn EventRepository>, config: &Config) -> Self {
        Self {
            event_repo,
            request_timeout: config.request_timeout(),
        }
    }
}

// ============================================================================
// Factory functions for the storage backends
// ============================================================================

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::*;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);

            tracing::info!(path = %config.sqlite_path, "Opened SQLite event store");

            Ok(Self::build(sqlite_repo, config))
        }
    }
}

#[cfg(feature = "inmemory")]
mod inmemory {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage.
        /// Useful for development without any external dependencies.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let inmemory_repo = Arc::new(InMemoryRepository::new());

            tracing::warn!("Using in-memory event store, data is lost on shutdown");

            Ok(Self::build(inmemory_repo, config))
        }
    }
}

// ============================================================================
// Test support - provides Default implementation for unit tests
// ============================================================================

#[cfg(test)]
mod test_support {
    use super::*;
    use crate::mock_data::seed_demo_events;
    use crate::storage::InMemoryRepository;

    impl Default for AppState {
        /// Creates an empty AppState with in-memory storage for testing.
        fn default() -> Self {
            let config = Config::default();
            Self::build(Arc::new(InMemoryRepository::new()), &config)
        }
    }

    impl AppState {
        /// Creates an AppState with in-memory storage holding the demo line-up.
        pub async fn with_demo_data() -> Self {
            let state = Self::default();
            seed_demo_events(state.event_repo.as_ref())
                .await
                .expect("in-memory seed cannot fail");
            state
        }
    }
}
