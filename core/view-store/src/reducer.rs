//! FILENAME: core/view-store/src/reducer.rs
//! Pure state transitions for the views of one page.
//!
//! `reduce` never mutates its input. On `Err` the caller keeps the previous
//! state, so a rejected action is a no-op.

use records::{ColumnCatalog, ColumnMetaData};
use view_engine::{View, ViewResponse};

use crate::action::{ColumnUpdate, ViewAction};
use crate::error::ViewError;

/// Applies `action` to `state`, returning the next state.
///
/// With a catalog, added columns must exist in it and its locked columns are
/// protected even when the view's copy of the column is not marked locked.
pub fn reduce(
    state: &ViewResponse,
    action: ViewAction,
    catalog: Option<&ColumnCatalog>,
) -> Result<ViewResponse, ViewError> {
    let mut next = state.clone();

    match action {
        ViewAction::AddColumn { view_index, column } => {
            if let Some(catalog) = catalog {
                if catalog.column(&column.key).is_none() {
                    return Err(ViewError::UnknownColumn(column.key));
                }
            }
            let view = view_mut(&mut next, view_index)?;
            if view.column_index(&column.key).is_some() {
                return Err(ViewError::DuplicateColumn(column.key));
            }
            view.columns.push(column);
        }

        ViewAction::DeleteColumn {
            view_index,
            column_index,
        } => {
            let view = view_mut(&mut next, view_index)?;
            let column = column_at(view, column_index)?;
            if is_locked(column, catalog) {
                return Err(ViewError::LockedColumn {
                    key: column.key.clone(),
                });
            }
            view.columns.remove(column_index);
        }

        ViewAction::UpdateColumn {
            view_index,
            column_index,
            update,
        } => {
            let view = view_mut(&mut next, view_index)?;
            column_at(view, column_index)?;
            apply_column_update(&mut view.columns[column_index], update)?;
        }

        ViewAction::UpdateColumnsOrder {
            view_index,
            from_index,
            to_index,
        } => {
            let view = view_mut(&mut next, view_index)?;
            column_at(view, from_index)?;
            column_at(view, to_index)?;
            let column = view.columns.remove(from_index);
            view.columns.insert(to_index, column);
        }

        ViewAction::UpdateFilters {
            view_index,
            filters,
        } => view_mut(&mut next, view_index)?.filters = filters,

        ViewAction::UpdateSort {
            view_index,
            sort_by,
        } => view_mut(&mut next, view_index)?.sort_by = sort_by,

        ViewAction::UpdateGroupBy {
            view_index,
            group_by,
        } => view_mut(&mut next, view_index)?.group_by = group_by,

        ViewAction::SelectView { view_index } => {
            view_mut(&mut next, view_index)?;
            next.selected_view_index = view_index;
        }

        ViewAction::AddView { mut view } => {
            if let Some(catalog) = catalog {
                ensure_locked_columns(&mut view, catalog);
            }
            next.views.push(view);
            next.selected_view_index = next.views.len() - 1;
        }

        ViewAction::DeleteView { view_index } => {
            view_mut(&mut next, view_index)?;
            if next.views.len() == 1 {
                return Err(ViewError::LastView);
            }
            next.views.remove(view_index);
            if next.selected_view_index > view_index
                || next.selected_view_index >= next.views.len()
            {
                next.selected_view_index -= 1;
            }
        }

        ViewAction::UpdateTitle { view_index, title } => {
            view_mut(&mut next, view_index)?.title = title;
        }

        ViewAction::MarkSaved { view_index, id } => {
            view_mut(&mut next, view_index)?.id = Some(id);
        }
    }

    Ok(next)
}

/// Inserts the catalog's locked columns a view is missing, at the front and
/// in catalog order. Returns how many were inserted.
pub fn ensure_locked_columns(view: &mut View, catalog: &ColumnCatalog) -> usize {
    let missing: Vec<ColumnMetaData> = catalog
        .locked_columns()
        .filter(|locked| view.column_index(&locked.key).is_none())
        .cloned()
        .collect();
    let count = missing.len();
    view.columns.splice(0..0, missing);
    count
}

fn view_mut(state: &mut ViewResponse, index: usize) -> Result<&mut View, ViewError> {
    let len = state.views.len();
    state
        .views
        .get_mut(index)
        .ok_or(ViewError::ViewIndexOutOfRange { index, len })
}

fn column_at(view: &View, index: usize) -> Result<&ColumnMetaData, ViewError> {
    view.columns.get(index).ok_or(ViewError::ColumnIndexOutOfRange {
        index,
        len: view.columns.len(),
    })
}

fn is_locked(column: &ColumnMetaData, catalog: Option<&ColumnCatalog>) -> bool {
    column.locked
        || catalog
            .and_then(|c| c.column(&column.key))
            .map_or(false, |c| c.locked)
}

fn apply_column_update(column: &mut ColumnMetaData, update: ColumnUpdate) -> Result<(), ViewError> {
    if let Some(cell_type) = update.cell_type {
        if !cell_type.accepts(column.value_type) {
            return Err(ViewError::IncompatibleCellType {
                cell_type,
                value_type: column.value_type,
            });
        }
        column.cell_type = cell_type;
    }
    if let Some(heading) = update.heading {
        column.heading = heading;
    }
    Ok(())
}
