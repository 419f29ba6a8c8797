//! FILENAME: core/view-engine/src/definition.rs
//! View Definition - The serializable configuration.
//!
//! This module contains all the types needed to DESCRIBE a table view.
//! These structures are designed to be:
//! - Serializable (for saving/loading through the views API)
//! - Closed per value type, so a condition that cannot apply to a type
//!   cannot be written down
//! - Immutable snapshots of user intent

use chrono::{DateTime, Utc};
use records::{ColumnMetaData, Page, ValueType};
use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a saved view.
pub type ViewId = u32;

// ============================================================================
// FILTER CONDITIONS
// ============================================================================

/// Comparison against a number (or a duration in seconds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum NumberCondition {
    Equals { value: f64 },
    NotEquals { value: f64 },
    GreaterThan { value: f64 },
    GreaterThanOrEqual { value: f64 },
    LessThan { value: f64 },
    LessThanOrEqual { value: f64 },
    Between { min: f64, max: f64 },
    NotBetween { min: f64, max: f64 },
}

/// Text operators. Text comparisons are always case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextOperator {
    Contains,
    NotContains,
    Equals,
    NotEquals,
    BeginsWith,
    EndsWith,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextCondition {
    pub operator: TextOperator,
    pub value: String,
}

/// Set membership over enum tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "values", rename_all = "camelCase")]
pub enum EnumCondition {
    In(Vec<String>),
    NotIn(Vec<String>),
}

/// Comparison against an instant. Bounds of `Between` are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DateCondition {
    Before { value: DateTime<Utc> },
    After { value: DateTime<Utc> },
    Between { start: DateTime<Utc>, end: DateTime<Utc> },
}

/// The predicate part of a filter clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "condition", rename_all = "camelCase")]
pub enum Condition {
    Number(NumberCondition),
    /// Seconds.
    Duration(NumberCondition),
    Text(TextCondition),
    Enum(EnumCondition),
    Date(DateCondition),
    Boolean(bool),
    IsEmpty,
    IsNotEmpty,
}

impl Condition {
    /// Whether this condition can be evaluated against a column of `value_type`.
    pub fn applies_to(&self, value_type: ValueType) -> bool {
        match self {
            Condition::IsEmpty | Condition::IsNotEmpty => true,
            Condition::Number(_) => value_type == ValueType::Number,
            Condition::Duration(_) => value_type == ValueType::Duration,
            Condition::Text(_) => matches!(
                value_type,
                ValueType::String | ValueType::Enum | ValueType::Array
            ),
            Condition::Enum(_) => matches!(value_type, ValueType::Enum | ValueType::Array),
            Condition::Date(_) => value_type == ValueType::Date,
            Condition::Boolean(_) => value_type == ValueType::Boolean,
        }
    }

    /// Short name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Condition::Number(_) => "number",
            Condition::Duration(_) => "duration",
            Condition::Text(_) => "text",
            Condition::Enum(_) => "enum",
            Condition::Date(_) => "date",
            Condition::Boolean(_) => "boolean",
            Condition::IsEmpty => "isEmpty",
            Condition::IsNotEmpty => "isNotEmpty",
        }
    }
}

// ============================================================================
// FILTER TREE
// ============================================================================

/// A single predicate on one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterClause {
    pub column_key: String,
    #[serde(flatten)]
    pub condition: Condition,
}

impl FilterClause {
    pub fn new(column_key: impl Into<String>, condition: Condition) -> Self {
        FilterClause {
            column_key: column_key.into(),
            condition,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Combinator {
    And,
    Or,
}

/// Boolean combinator tree of filter clauses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterTree {
    Clause(FilterClause),
    Group {
        combinator: Combinator,
        children: Vec<FilterTree>,
    },
}

impl FilterTree {
    pub fn clause(column_key: impl Into<String>, condition: Condition) -> Self {
        FilterTree::Clause(FilterClause::new(column_key, condition))
    }

    pub fn and(children: Vec<FilterTree>) -> Self {
        FilterTree::Group {
            combinator: Combinator::And,
            children,
        }
    }

    pub fn or(children: Vec<FilterTree>) -> Self {
        FilterTree::Group {
            combinator: Combinator::Or,
            children,
        }
    }

    /// True for a group without children.
    pub fn is_empty(&self) -> bool {
        matches!(self, FilterTree::Group { children, .. } if children.is_empty())
    }

    /// Visits every clause in depth-first order.
    pub fn clauses(&self) -> Vec<&FilterClause> {
        let mut out = Vec::new();
        self.collect_clauses(&mut out);
        out
    }

    fn collect_clauses<'a>(&'a self, out: &mut Vec<&'a FilterClause>) {
        match self {
            FilterTree::Clause(clause) => out.push(clause),
            FilterTree::Group { children, .. } => {
                for child in children {
                    child.collect_clauses(out);
                }
            }
        }
    }
}

impl Default for FilterTree {
    /// The empty AND group, which matches every record.
    fn default() -> Self {
        FilterTree::and(Vec::new())
    }
}

// ============================================================================
// SORT AND GROUP
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Ascending
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortClause {
    pub column_key: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortClause {
    pub fn ascending(column_key: impl Into<String>) -> Self {
        SortClause {
            column_key: column_key.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column_key: impl Into<String>) -> Self {
        SortClause {
            column_key: column_key.into(),
            direction: SortDirection::Descending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupBy {
    pub column_key: String,
}

impl GroupBy {
    pub fn new(column_key: impl Into<String>) -> Self {
        GroupBy {
            column_key: column_key.into(),
        }
    }
}

// ============================================================================
// LAYOUT OPTIONS
// ============================================================================

/// Where a group's summary row goes relative to its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SubtotalLocation {
    /// Summary row first, then members (default).
    #[default]
    AtTop,
    /// Members first, then the summary row.
    AtBottom,
}

/// Controls how rendered rows are produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Label used for the group of records with an empty group-by value.
    #[serde(default = "default_blank_label")]
    pub blank_label: String,

    #[serde(default)]
    pub subtotal_location: SubtotalLocation,
}

fn default_blank_label() -> String {
    "(blank)".to_string()
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            blank_label: default_blank_label(),
            subtotal_location: SubtotalLocation::AtTop,
        }
    }
}

// ============================================================================
// MAIN DEFINITION STRUCTS
// ============================================================================

/// A saved, user-editable table configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    /// Set once the view has been saved remotely.
    #[serde(default)]
    pub id: Option<ViewId>,

    pub title: String,

    /// Displayed columns, in display order.
    pub columns: Vec<ColumnMetaData>,

    #[serde(default)]
    pub filters: FilterTree,

    #[serde(default)]
    pub sort_by: Vec<SortClause>,

    #[serde(default)]
    pub group_by: Option<GroupBy>,
}

impl View {
    pub fn new(title: impl Into<String>, columns: Vec<ColumnMetaData>) -> Self {
        View {
            id: None,
            title: title.into(),
            columns,
            filters: FilterTree::default(),
            sort_by: Vec::new(),
            group_by: None,
        }
    }

    pub fn with_filters(mut self, filters: FilterTree) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_sort(mut self, sort_by: Vec<SortClause>) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn with_group_by(mut self, group_by: Option<GroupBy>) -> Self {
        self.group_by = group_by;
        self
    }

    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }
}

/// All views of one page plus the one currently shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
    pub page: Page,
    pub views: Vec<View>,
    #[serde(default)]
    pub selected_view_index: usize,
}

impl ViewResponse {
    pub fn new(page: Page, views: Vec<View>) -> Self {
        ViewResponse {
            page,
            views,
            selected_view_index: 0,
        }
    }

    /// The selected view, if the index is in range.
    pub fn selected(&self) -> Option<&View> {
        self.views.get(self.selected_view_index)
    }
}
