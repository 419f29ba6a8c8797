//! FILENAME: core/view-engine/src/schema.rs
//! The set of columns a view is validated against.
//!
//! Without a page catalog the view's own columns are the schema. With a
//! catalog, every catalog column is known and the catalog's sortable and
//! filterable lists are enforced as well.

use records::{find_column, ColumnCatalog, ColumnMetaData};

use crate::diagnostics::{ConfigIssue, ViewSection};

#[derive(Debug, Clone, Copy)]
pub struct Schema<'a> {
    columns: &'a [ColumnMetaData],
    sortable: Option<&'a [String]>,
    filterable: Option<&'a [String]>,
}

impl<'a> Schema<'a> {
    pub fn from_columns(columns: &'a [ColumnMetaData]) -> Self {
        Schema {
            columns,
            sortable: None,
            filterable: None,
        }
    }

    pub fn from_catalog(catalog: &'a ColumnCatalog) -> Self {
        Schema {
            columns: &catalog.columns,
            sortable: Some(&catalog.sortable),
            filterable: Some(&catalog.filterable),
        }
    }

    pub fn column(&self, key: &str) -> Option<&'a ColumnMetaData> {
        find_column(self.columns, key)
    }

    /// Looks up a column for `section`, reporting unknown or disallowed keys.
    pub fn resolve(&self, key: &str, section: ViewSection) -> Result<&'a ColumnMetaData, ConfigIssue> {
        let column = self.column(key).ok_or_else(|| ConfigIssue::UnknownColumn {
            section,
            column_key: key.to_string(),
        })?;

        let allowed = match section {
            ViewSection::Sort => self.sortable,
            ViewSection::Filter => self.filterable,
            ViewSection::GroupBy => None,
        };
        if let Some(keys) = allowed {
            if !keys.iter().any(|k| k == key) {
                let column_key = key.to_string();
                return Err(match section {
                    ViewSection::Sort => ConfigIssue::NotSortable { column_key },
                    _ => ConfigIssue::NotFilterable { column_key },
                });
            }
        }

        Ok(column)
    }
}
