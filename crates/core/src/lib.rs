//! OpenCrochet domain core.
//!
//! Pure domain logic shared by the database layer and the HTTP server:
//!
//! - [`category`]: the closed category and difficulty enumerations.
//! - [`tutorial`]: the canonical tutorial record.
//! - [`import`]: the CSV import pipeline (parse, validate, transform, upload).
//! - [`filter`]: filter-state composition and query-string synchronization.
//! - [`store`]: the record store trait plus an in-memory implementation.
//! - [`catalog`]: the read layer that degrades gracefully on store failure.
//! - [`seed`]: the demonstration dataset used as an injectable fallback.

pub mod catalog;
pub mod category;
pub mod error;
pub mod filter;
pub mod import;
pub mod seed;
pub mod slug;
pub mod store;
pub mod tutorial;
pub mod types;
