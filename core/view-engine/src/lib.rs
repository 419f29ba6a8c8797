//! FILENAME: core/view-engine/src/lib.rs
//! Table view engine.
//!
//! Turns a saved view configuration and a set of records into the rows a
//! table shows. Knows nothing about how views are stored or edited; that
//! lives in `view-store` and `persistence`.
//!
//! Layers:
//! - `definition`: Serializable configuration (what a view IS)
//! - `schema` / `diagnostics`: Validation of a view against its columns
//! - `filter`, `sort`, `group`: The three pipeline stages
//! - `view`: Renderable output for the frontend (WHAT we display)
//! - `engine`: The pipeline tying the stages together

pub mod definition;
pub mod diagnostics;
pub mod schema;
pub mod filter;
pub mod sort;
pub mod group;
pub mod view;
pub mod engine;

pub use definition::*;
pub use diagnostics::{ConfigIssue, ConfigurationWarning, ViewSection};
pub use schema::Schema;
pub use filter::{
    evaluate, filter_all, filter_compiled, CompiledFilter, Filtered, FilteredIter,
    RecordPredicate,
};
pub use sort::{compare_values, sort_all};
pub use group::{group_all, partition, Aggregation, Group, GroupSummary, ViewRow};
pub use view::RenderedView;
pub use engine::{render, ViewPipeline};
