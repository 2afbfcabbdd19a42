//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `EventRepository`
//! trait defined in `festival_core::storage`. The backend is selected at
//! compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `sqlite` (default): relational storage using `rusqlite` and `tokio-rusqlite`
//! - `inmemory`: process-local storage, nothing is persisted
//!
//! These features are mutually exclusive. The in-memory backend is always
//! compiled for tests.
//!
//! # Examples
//!
//! Build with SQLite (default):
//! ```bash
//! cargo build -p festival
//! ```
//!
//! Build with in-memory storage:
//! ```bash
//! cargo build -p festival --no-default-features --features inmemory
//! ```

#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!(
    "Features 'sqlite' and 'inmemory' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "sqlite", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'sqlite' or 'inmemory' feature. \
    Example: cargo build -p festival --features sqlite"
);

#[cfg(any(test, feature = "inmemory"))]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(test, feature = "inmemory"))]
pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
