//! FILENAME: core/persistence/src/lib.rs
//! View Persistence Module
//!
//! Handles saving and loading view configurations. The store only talks to
//! the `ViewRepository` trait; `JsonViewRepository` keeps one JSON file per
//! page on disk and `MemoryViewRepository` keeps everything in process.

mod error;
mod json_store;
mod memory;
mod repository;

pub use error::PersistenceError;
pub use json_store::JsonViewRepository;
pub use memory::MemoryViewRepository;
pub use repository::{next_view_id, upsert_view, ViewRepository};
