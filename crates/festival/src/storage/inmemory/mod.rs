//! In-memory storage backend.
//!
//! Stores events in a `BTreeMap` wrapped in `Arc<RwLock<_>>`, so `find_all`
//! returns them ordered by ID like the SQLite backend. Useful for testing
//! and development when persistence is not required.
//!
//! # Example
//!
//! ```rust,ignore
//! use festival::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
