//! FILENAME: core/records/src/column.rs
//! PURPOSE: Column metadata describing one displayable field of a table.

use serde::{Deserialize, Serialize};

use crate::value::ValueType;

// ============================================================================
// CELL TYPES
// ============================================================================

/// How the table layer renders a column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    AliasCell,
    NumericCell,
    BooleanCell,
    EnumCell,
    BarCell,
    TextCell,
    DurationCell,
    DateCell,
    LongTextCell,
}

const NUMERIC_CELL_OPTIONS: &[CellType] = &[
    CellType::NumericCell,
    CellType::BarCell,
    CellType::TextCell,
    CellType::LongTextCell,
];
const STRING_CELL_OPTIONS: &[CellType] = &[CellType::TextCell, CellType::LongTextCell];
const BOOLEAN_CELL_OPTIONS: &[CellType] = &[CellType::BooleanCell];
const ENUM_CELL_OPTIONS: &[CellType] = &[CellType::EnumCell];
const DATE_CELL_OPTIONS: &[CellType] = &[CellType::DateCell];
const DURATION_CELL_OPTIONS: &[CellType] = &[CellType::DurationCell, CellType::TextCell];

impl CellType {
    /// Cell types a column of `value_type` may be switched to.
    pub fn options_for(value_type: ValueType) -> &'static [CellType] {
        match value_type {
            ValueType::Number => NUMERIC_CELL_OPTIONS,
            ValueType::String => STRING_CELL_OPTIONS,
            ValueType::Boolean => BOOLEAN_CELL_OPTIONS,
            ValueType::Enum | ValueType::Array => ENUM_CELL_OPTIONS,
            ValueType::Date => DATE_CELL_OPTIONS,
            ValueType::Duration => DURATION_CELL_OPTIONS,
        }
    }

    /// Whether this cell type can render a value of `value_type`.
    ///
    /// Alias cells render node aliases, which are plain strings, and enum
    /// columns keep whatever generated cell type they came with.
    pub fn accepts(&self, value_type: ValueType) -> bool {
        match (self, value_type) {
            (CellType::AliasCell, ValueType::String) => true,
            (CellType::TextCell, ValueType::Enum) => true,
            _ => Self::options_for(value_type).contains(self),
        }
    }
}

// ============================================================================
// COLUMN METADATA
// ============================================================================

/// A fixed option for enum columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        SelectOption {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Describes one displayable field of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMetaData {
    /// Record field key this column reads.
    pub key: String,

    /// Column header text.
    pub heading: String,

    /// Rendering cell type.
    #[serde(rename = "type")]
    pub cell_type: CellType,

    pub value_type: ValueType,

    /// Fixed option set for enum columns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub select_options: Vec<SelectOption>,

    /// Locked columns cannot be removed from a view.
    #[serde(default)]
    pub locked: bool,
}

impl ColumnMetaData {
    pub fn new(
        key: impl Into<String>,
        heading: impl Into<String>,
        cell_type: CellType,
        value_type: ValueType,
    ) -> Self {
        ColumnMetaData {
            key: key.into(),
            heading: heading.into(),
            cell_type,
            value_type,
            select_options: Vec::new(),
            locked: false,
        }
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.select_options = options;
        self
    }

    /// Returns the label for an enum tag, falling back to the tag itself.
    pub fn option_label<'a>(&'a self, value: &'a str) -> &'a str {
        self.select_options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
            .unwrap_or(value)
    }
}

/// Finds a column by key in a column list.
pub fn find_column<'a>(columns: &'a [ColumnMetaData], key: &str) -> Option<&'a ColumnMetaData> {
    columns.iter().find(|c| c.key == key)
}
