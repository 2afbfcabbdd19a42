//! Functional core for the festival events backend.
//!
//! Pure types and functions only: the event/band/member model, the display
//! decoration and member-name filter, partial updates, and the repository
//! contract the storage backends implement.

pub mod event;
pub mod storage;
