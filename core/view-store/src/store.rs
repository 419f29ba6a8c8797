//! FILENAME: core/view-store/src/store.rs
//! PURPOSE: The state container holding every page's views.
//! CONTEXT: The store is an ordinary value owned by its caller. All edits go
//! through `dispatch`, which runs the pure reducer and only commits on
//! success. Loading from a repository is split into `begin_load` and
//! `complete_load` so that an answer arriving after a newer request was made
//! is dropped instead of overwriting fresher state.

use log::{debug, info};
use rustc_hash::FxHashMap;

use persistence::{PersistenceError, ViewRepository};
use records::{ColumnCatalog, Page, Record};
use view_engine::{RenderOptions, RenderedView, View, ViewId, ViewPipeline, ViewResponse};

use crate::action::ViewAction;
use crate::error::ViewError;
use crate::reducer::{ensure_locked_columns, reduce};

/// Identifies one load request for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub page: Page,
    generation: u64,
}

#[derive(Debug, Clone)]
struct PageState {
    catalog: ColumnCatalog,
    default_view: View,
    response: ViewResponse,
    /// Generation of the most recent load request.
    generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ViewStore {
    pages: FxHashMap<Page, PageState>,
    options: RenderOptions,
}

impl ViewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Registers a page with its catalog and the view shown before anything
    /// has been loaded. Re-registering resets the page.
    pub fn register_page(&mut self, catalog: ColumnCatalog, mut default_view: View) {
        let page = catalog.page;
        ensure_locked_columns(&mut default_view, &catalog);
        let response = ViewResponse::new(page, vec![default_view.clone()]);
        self.pages.insert(
            page,
            PageState {
                catalog,
                default_view,
                response,
                generation: 0,
            },
        );
    }

    // ========================================================================
    // SELECTORS
    // ========================================================================

    pub fn view_response(&self, page: Page) -> Option<&ViewResponse> {
        self.pages.get(&page).map(|s| &s.response)
    }

    pub fn selected_view(&self, page: Page) -> Option<&View> {
        self.view_response(page).and_then(|r| r.selected())
    }

    pub fn catalog(&self, page: Page) -> Option<&ColumnCatalog> {
        self.pages.get(&page).map(|s| &s.catalog)
    }

    /// Renders the selected view of `page` over `records`.
    pub fn render<'a>(&self, page: Page, records: &'a [Record]) -> Result<RenderedView<'a>, ViewError> {
        let state = self.page(page)?;
        let view = state
            .response
            .selected()
            .ok_or(ViewError::ViewIndexOutOfRange {
                index: state.response.selected_view_index,
                len: state.response.views.len(),
            })?;

        Ok(ViewPipeline::new()
            .with_catalog(&state.catalog)
            .with_options(self.options.clone())
            .render(view, records))
    }

    // ========================================================================
    // DISPATCH
    // ========================================================================

    /// Applies `action` to `page`. A rejected action leaves the state as it
    /// was and is returned as the error.
    pub fn dispatch(&mut self, page: Page, action: ViewAction) -> Result<(), ViewError> {
        let state = self.page_mut(page)?;
        let name = action.name();

        match reduce(&state.response, action, Some(&state.catalog)) {
            Ok(next) => {
                state.response = next;
                Ok(())
            }
            Err(e) => {
                debug!("Rejected {} on {}: {}", name, page, e);
                Err(e)
            }
        }
    }

    // ========================================================================
    // PERSISTENCE
    // ========================================================================

    /// Saves the selected view of `page` and records the assigned id.
    pub fn save_selected<R>(&mut self, page: Page, repo: &mut R) -> Result<ViewId, ViewError>
    where
        R: ViewRepository + ?Sized,
    {
        let state = self.page(page)?;
        let view_index = state.response.selected_view_index;
        let view = state.response.selected().ok_or(ViewError::ViewIndexOutOfRange {
            index: view_index,
            len: state.response.views.len(),
        })?;

        let id = repo.save_view(page, view)?;
        self.dispatch(page, ViewAction::MarkSaved { view_index, id })?;
        Ok(id)
    }

    /// Starts a load for `page`. Any ticket issued earlier becomes stale.
    pub fn begin_load(&mut self, page: Page) -> Result<LoadTicket, ViewError> {
        let state = self.page_mut(page)?;
        state.generation += 1;
        Ok(LoadTicket {
            page,
            generation: state.generation,
        })
    }

    /// Applies the result of a load.
    ///
    /// Returns `Ok(false)` when the ticket is stale and the result was
    /// ignored. A successful load with nothing saved keeps the default view.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Option<ViewResponse>, PersistenceError>,
    ) -> Result<bool, ViewError> {
        let state = self.page_mut(ticket.page)?;
        if ticket.generation != state.generation {
            info!(
                "Ignoring stale view load for {} (generation {}, latest {})",
                ticket.page, ticket.generation, state.generation
            );
            return Ok(false);
        }

        let Some(mut loaded) = result? else {
            state.response = ViewResponse::new(ticket.page, vec![state.default_view.clone()]);
            return Ok(true);
        };

        if loaded.views.is_empty() {
            loaded.views.push(state.default_view.clone());
        }
        for view in &mut loaded.views {
            ensure_locked_columns(view, &state.catalog);
        }
        loaded.page = ticket.page;
        if loaded.selected_view_index >= loaded.views.len() {
            loaded.selected_view_index = 0;
        }

        debug!("Loaded {} view(s) for {}", loaded.views.len(), ticket.page);
        state.response = loaded;
        Ok(true)
    }

    /// Loads `page` from `repo` in one step.
    pub fn load_from<R>(&mut self, repo: &R, page: Page) -> Result<bool, ViewError>
    where
        R: ViewRepository + ?Sized,
    {
        let ticket = self.begin_load(page)?;
        let result = repo.load_views(page);
        self.complete_load(ticket, result)
    }

    fn page(&self, page: Page) -> Result<&PageState, ViewError> {
        self.pages.get(&page).ok_or(ViewError::UnknownPage(page))
    }

    fn page_mut(&mut self, page: Page) -> Result<&mut PageState, ViewError> {
        self.pages.get_mut(&page).ok_or(ViewError::UnknownPage(page))
    }
}
