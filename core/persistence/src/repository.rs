//! FILENAME: core/persistence/src/repository.rs

use records::Page;
use view_engine::{View, ViewId, ViewResponse};

use crate::error::PersistenceError;

/// Storage for the saved views of each page.
pub trait ViewRepository {
    /// Loads the saved views of `page`. `None` means nothing was ever saved.
    fn load_views(&self, page: Page) -> Result<Option<ViewResponse>, PersistenceError>;

    /// Saves `view`, assigning an id when it has none. Returns the id.
    fn save_view(&mut self, page: Page, view: &View) -> Result<ViewId, PersistenceError>;

    fn delete_view(&mut self, page: Page, id: ViewId) -> Result<(), PersistenceError>;
}

/// Next free id: one past the highest id in use, starting at 1.
pub fn next_view_id(views: &[View]) -> ViewId {
    views.iter().filter_map(|v| v.id).max().map_or(1, |max| max + 1)
}

/// Replaces the view with the same id or appends a new one.
pub fn upsert_view(views: &mut Vec<View>, view: &View) -> ViewId {
    let id = view.id.unwrap_or_else(|| next_view_id(views));
    let mut stored = view.clone();
    stored.id = Some(id);

    match views.iter_mut().find(|v| v.id == Some(id)) {
        Some(existing) => *existing = stored,
        None => views.push(stored),
    }
    id
}

/// Removes the view with `id`.
pub(crate) fn remove_view(
    page: Page,
    views: &mut Vec<View>,
    id: ViewId,
) -> Result<(), PersistenceError> {
    let index = views
        .iter()
        .position(|v| v.id == Some(id))
        .ok_or(PersistenceError::ViewNotFound { page, id })?;
    views.remove(index);
    Ok(())
}
