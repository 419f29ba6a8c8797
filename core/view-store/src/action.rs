//! FILENAME: core/view-store/src/action.rs
//! Edits a user can make to the views of a page.

use records::{CellType, ColumnMetaData};
use serde::{Deserialize, Serialize};
use view_engine::{FilterTree, GroupBy, SortClause, View, ViewId};

/// Partial update of a column. `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub cell_type: Option<CellType>,
}

impl ColumnUpdate {
    pub fn heading(heading: impl Into<String>) -> Self {
        ColumnUpdate {
            heading: Some(heading.into()),
            cell_type: None,
        }
    }

    pub fn cell_type(cell_type: CellType) -> Self {
        ColumnUpdate {
            heading: None,
            cell_type: Some(cell_type),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ViewAction {
    /// Appends a column to a view.
    AddColumn {
        view_index: usize,
        column: ColumnMetaData,
    },
    /// Removes a column. Locked columns are refused.
    DeleteColumn {
        view_index: usize,
        column_index: usize,
    },
    UpdateColumn {
        view_index: usize,
        column_index: usize,
        update: ColumnUpdate,
    },
    /// Moves the column at `from_index` to `to_index`.
    UpdateColumnsOrder {
        view_index: usize,
        from_index: usize,
        to_index: usize,
    },
    UpdateFilters {
        view_index: usize,
        filters: FilterTree,
    },
    UpdateSort {
        view_index: usize,
        sort_by: Vec<SortClause>,
    },
    UpdateGroupBy {
        view_index: usize,
        group_by: Option<GroupBy>,
    },
    SelectView {
        view_index: usize,
    },
    /// Adds a view and selects it.
    AddView {
        view: View,
    },
    /// Removes a view. The last remaining view cannot be removed.
    DeleteView {
        view_index: usize,
    },
    UpdateTitle {
        view_index: usize,
        title: String,
    },
    /// Records the id the repository assigned to a saved view.
    MarkSaved {
        view_index: usize,
        id: ViewId,
    },
}

impl ViewAction {
    pub fn name(&self) -> &'static str {
        match self {
            ViewAction::AddColumn { .. } => "addColumn",
            ViewAction::DeleteColumn { .. } => "deleteColumn",
            ViewAction::UpdateColumn { .. } => "updateColumn",
            ViewAction::UpdateColumnsOrder { .. } => "updateColumnsOrder",
            ViewAction::UpdateFilters { .. } => "updateFilters",
            ViewAction::UpdateSort { .. } => "updateSort",
            ViewAction::UpdateGroupBy { .. } => "updateGroupBy",
            ViewAction::SelectView { .. } => "selectView",
            ViewAction::AddView { .. } => "addView",
            ViewAction::DeleteView { .. } => "deleteView",
            ViewAction::UpdateTitle { .. } => "updateTitle",
            ViewAction::MarkSaved { .. } => "markSaved",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_use_camel_case_json() {
        let action = ViewAction::UpdateColumnsOrder {
            view_index: 0,
            from_index: 2,
            to_index: 1,
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "updateColumnsOrder");
        assert_eq!(json["fromIndex"], 2);
        assert_eq!(json["toIndex"], 1);
        assert_eq!(action.name(), "updateColumnsOrder");
    }
}
