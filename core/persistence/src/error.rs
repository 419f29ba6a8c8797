//! FILENAME: core/persistence/src/error.rs

use records::Page;
use thiserror::Error;
use view_engine::ViewId;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("View {id} not found on page {page}")]
    ViewNotFound { page: Page, id: ViewId },
}
