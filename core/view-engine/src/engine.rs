//! FILENAME: core/view-engine/src/engine.rs
//! View Pipeline - filter, then sort, then group.
//!
//! The pipeline is a pure function of (view, records). Configuration
//! problems are collected from all three stages and surfaced as one
//! `ConfigurationWarning`, logged once per run.

use log::{debug, trace, warn};

use records::{ColumnCatalog, Record};

use crate::definition::{RenderOptions, View};
use crate::diagnostics::ConfigurationWarning;
use crate::filter::{CompiledFilter, Filtered};
use crate::group;
use crate::schema::Schema;
use crate::sort;
use crate::view::RenderedView;

/// Renders views, optionally validating them against a page catalog.
#[derive(Debug, Clone, Default)]
pub struct ViewPipeline<'c> {
    catalog: Option<&'c ColumnCatalog>,
    options: RenderOptions,
}

impl<'c> ViewPipeline<'c> {
    pub fn new() -> Self {
        ViewPipeline {
            catalog: None,
            options: RenderOptions::default(),
        }
    }

    /// Validates against `catalog` instead of the view's own columns. The
    /// catalog's sortable and filterable lists are then enforced too.
    pub fn with_catalog(mut self, catalog: &'c ColumnCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Runs filter, sort and group over `records`.
    ///
    /// Never fails: invalid filter clauses evaluate to false, invalid sort
    /// clauses are skipped and an invalid group-by disables grouping.
    pub fn render<'a>(&self, view: &View, records: &'a [Record]) -> RenderedView<'a> {
        let schema = match self.catalog {
            Some(catalog) => Schema::from_catalog(catalog),
            None => Schema::from_columns(&view.columns),
        };

        debug!(
            "Rendering view '{}' over {} records",
            view.title,
            records.len()
        );

        // Filter
        let filter = CompiledFilter::compile(&view.filters, &schema);
        let mut issues = filter.issues().to_vec();
        let filtered = Filtered::new(&filter, records).to_vec();
        trace!("{} of {} records passed the filter", filtered.len(), records.len());

        // Sort
        let (sort_clauses, sort_issues) = sort::retain_valid(&view.sort_by, &schema);
        issues.extend(sort_issues);
        let sorted = sort::sort_all(&sort_clauses, filtered);

        // Group
        let group_by = match group::validate(view.group_by.as_ref(), &schema) {
            Some(issue) => {
                issues.push(issue);
                None
            }
            None => view.group_by.as_ref(),
        };
        let rows = group::group_all(group_by, &view.columns, sorted, &self.options);

        let warning = ConfigurationWarning::from_issues(issues);
        if let Some(w) = &warning {
            warn!("View '{}': {}", view.title, w);
        }

        RenderedView { rows, warning }
    }
}

/// Renders `view` over `records`, validating against the view's own columns.
pub fn render<'a>(view: &View, records: &'a [Record]) -> RenderedView<'a> {
    ViewPipeline::new().render(view, records)
}
