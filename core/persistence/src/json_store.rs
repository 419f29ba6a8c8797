//! FILENAME: core/persistence/src/json_store.rs
//! File-backed view repository: one pretty-printed JSON file per page.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use records::Page;
use view_engine::{View, ViewId, ViewResponse};

use crate::error::PersistenceError;
use crate::repository::{remove_view, upsert_view, ViewRepository};

#[derive(Debug, Clone)]
pub struct JsonViewRepository {
    dir: PathBuf,
}

impl JsonViewRepository {
    /// Stores pages under `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `page`'s views.
    pub fn page_path(&self, page: Page) -> PathBuf {
        self.dir.join(format!("{}.json", page.as_str()))
    }

    fn read_page(&self, page: Page) -> Result<Option<ViewResponse>, PersistenceError> {
        let path = self.page_path(page);
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)?;
        let response: ViewResponse = serde_json::from_str(&json)?;
        if response.page != page {
            return Err(PersistenceError::InvalidFormat(format!(
                "{} holds views for page {}, expected {}",
                path.display(),
                response.page,
                page
            )));
        }
        Ok(Some(response))
    }

    fn write_page(&self, response: &ViewResponse) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.page_path(response.page);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, serde_json::to_string_pretty(response)?)?;
        fs::rename(&tmp, &path)?;

        debug!(
            "Wrote {} view(s) for {} to {}",
            response.views.len(),
            response.page,
            path.display()
        );
        Ok(())
    }
}

impl ViewRepository for JsonViewRepository {
    fn load_views(&self, page: Page) -> Result<Option<ViewResponse>, PersistenceError> {
        Ok(self.read_page(page)?.filter(|r| !r.views.is_empty()))
    }

    fn save_view(&mut self, page: Page, view: &View) -> Result<ViewId, PersistenceError> {
        let mut response = self
            .read_page(page)?
            .unwrap_or_else(|| ViewResponse::new(page, Vec::new()));
        let id = upsert_view(&mut response.views, view);
        self.write_page(&response)?;
        Ok(id)
    }

    fn delete_view(&mut self, page: Page, id: ViewId) -> Result<(), PersistenceError> {
        let mut response = self
            .read_page(page)?
            .ok_or(PersistenceError::ViewNotFound { page, id })?;
        remove_view(page, &mut response.views, id)?;
        if response.selected_view_index >= response.views.len() {
            response.selected_view_index = 0;
        }
        self.write_page(&response)
    }
}
