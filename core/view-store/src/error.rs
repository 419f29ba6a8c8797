//! FILENAME: core/view-store/src/error.rs

use persistence::PersistenceError;
use records::{CellType, Page, ValueType};
use thiserror::Error;

/// Why an action was rejected or a store operation failed.
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Column '{key}' is locked and cannot be removed")]
    LockedColumn { key: String },

    #[error("Column index {index} out of range ({len} columns)")]
    ColumnIndexOutOfRange { index: usize, len: usize },

    #[error("View index {index} out of range ({len} views)")]
    ViewIndexOutOfRange { index: usize, len: usize },

    #[error("Column '{0}' is already shown")]
    DuplicateColumn(String),

    #[error("Column '{0}' does not exist on this page")]
    UnknownColumn(String),

    #[error("Cell type {cell_type:?} cannot display {value_type} values")]
    IncompatibleCellType {
        cell_type: CellType,
        value_type: ValueType,
    },

    #[error("Cannot remove the last view")]
    LastView,

    #[error("Page {0} is not registered")]
    UnknownPage(Page),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}
