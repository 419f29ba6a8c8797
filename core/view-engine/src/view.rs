//! FILENAME: core/view-engine/src/view.rs
//! The output of one pipeline run, ready for a table renderer.

use serde::Serialize;

use records::{ColumnMetaData, FieldValue};

use crate::diagnostics::ConfigurationWarning;
use crate::group::ViewRow;

/// Rows produced by rendering a view, plus any configuration problems found.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedView<'a> {
    pub rows: Vec<ViewRow<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<ConfigurationWarning>,
}

impl<'a> RenderedView<'a> {
    /// Number of underlying records (summary rows excluded).
    pub fn record_count(&self) -> usize {
        self.rows.iter().filter(|r| !r.is_summary()).count()
    }

    /// Number of group summary rows.
    pub fn group_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_summary()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Record ids in output order, skipping summary rows.
    pub fn record_ids(&self) -> Vec<&'a str> {
        self.rows
            .iter()
            .filter_map(|r| r.as_record())
            .map(|r| r.id.0.as_str())
            .collect()
    }

    /// Formats every row as display strings, one per column.
    ///
    /// Enum tags are shown by their option label. A summary row shows its
    /// group label in the grouped column.
    pub fn display_rows(&self, columns: &[ColumnMetaData]) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|column| match row {
                        ViewRow::GroupSummary(summary) if summary.column_key == column.key => {
                            summary.label.clone()
                        }
                        _ => display_cell(column, row.value(&column.key)),
                    })
                    .collect()
            })
            .collect()
    }
}

fn display_cell(column: &ColumnMetaData, value: &FieldValue) -> String {
    match value {
        FieldValue::Enum(tag) => column.option_label(tag).to_string(),
        FieldValue::List(items) => items
            .iter()
            .map(|tag| column.option_label(tag))
            .collect::<Vec<_>>()
            .join(", "),
        other => other.display_value(),
    }
}
