//! FILENAME: core/persistence/src/memory.rs
//! In-process view repository.

use rustc_hash::FxHashMap;

use records::Page;
use view_engine::{View, ViewId, ViewResponse};

use crate::error::PersistenceError;
use crate::repository::{remove_view, upsert_view, ViewRepository};

#[derive(Debug, Clone, Default)]
pub struct MemoryViewRepository {
    pages: FxHashMap<Page, Vec<View>>,
}

impl MemoryViewRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `page` with `views` as if they had been saved.
    pub fn with_views(mut self, page: Page, views: Vec<View>) -> Self {
        let stored = self.pages.entry(page).or_default();
        for view in &views {
            upsert_view(stored, view);
        }
        self
    }
}

impl ViewRepository for MemoryViewRepository {
    fn load_views(&self, page: Page) -> Result<Option<ViewResponse>, PersistenceError> {
        Ok(self
            .pages
            .get(&page)
            .filter(|views| !views.is_empty())
            .map(|views| ViewResponse::new(page, views.clone())))
    }

    fn save_view(&mut self, page: Page, view: &View) -> Result<ViewId, PersistenceError> {
        Ok(upsert_view(self.pages.entry(page).or_default(), view))
    }

    fn delete_view(&mut self, page: Page, id: ViewId) -> Result<(), PersistenceError> {
        let views = self
            .pages
            .get_mut(&page)
            .ok_or(PersistenceError::ViewNotFound { page, id })?;
        remove_view(page, views, id)
    }
}
