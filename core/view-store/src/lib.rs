//! FILENAME: core/view-store/src/lib.rs
//! PURPOSE: Editable, persisted table views per page.
//! CONTEXT: Wraps the pure reducer in an injectable `ViewStore` and connects
//! it to a `persistence::ViewRepository`. Rendering is delegated to
//! `view_engine::ViewPipeline` with the page's catalog.

pub mod action;
pub mod error;
pub mod reducer;
pub mod store;

pub use action::{ColumnUpdate, ViewAction};
pub use error::ViewError;
pub use reducer::{ensure_locked_columns, reduce};
pub use store::{LoadTicket, ViewStore};
