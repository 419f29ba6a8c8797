//! FILENAME: core/records/src/lib.rs
//! PURPOSE: Shared record model for the table view engine.
//! CONTEXT: Re-exports the value, record and column types used by
//! `view-engine`, `view-store` and `persistence`.

pub mod catalog;
pub mod column;
pub mod record;
pub mod value;

// Re-export commonly used types at the crate root
pub use catalog::{ColumnCatalog, Page};
pub use column::{find_column, CellType, ColumnMetaData, SelectOption};
pub use record::{Record, RecordId};
pub use value::{format_duration, format_number, FieldValue, ValueType};
