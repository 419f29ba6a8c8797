//! FILENAME: core/view-engine/src/group.rs
//! Group-By Engine - partitions rows by one column and aggregates each group.
//!
//! Groups appear in the order their key is first seen in the input and
//! members keep their input order, so grouping an already sorted sequence
//! never reorders it beyond bringing members together. Every group emits a
//! synthetic summary row; which value each column gets in that row is decided
//! by the column's value type (see `Aggregation::for_column`).

use rustc_hash::FxHashMap;
use serde::Serialize;

use records::{find_column, ColumnMetaData, FieldValue, Record, ValueType};

use crate::definition::{GroupBy, RenderOptions, SubtotalLocation};
use crate::diagnostics::{ConfigIssue, ViewSection};
use crate::schema::Schema;

// ============================================================================
// GROUP KEYS
// ============================================================================

/// Wrapper around f64 that implements Eq and Hash for use as HashMap keys.
/// NaN values are treated as equal to each other.
#[derive(Debug, Clone, Copy)]
pub struct OrderedFloat(pub f64);

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        if self.0.is_nan() && other.0.is_nan() {
            true
        } else {
            self.0 == other.0
        }
    }
}

impl Eq for OrderedFloat {}

impl std::hash::Hash for OrderedFloat {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        if self.0.is_nan() {
            u64::MAX.hash(state);
        } else if self.0 == 0.0 {
            // -0.0 and 0.0 are equal and must hash alike
            0u64.hash(state);
        } else {
            self.0.to_bits().hash(state);
        }
    }
}

/// A normalized, hashable representation of a field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum GroupKey {
    Empty,
    Text(String),
    Number(OrderedFloat),
    Boolean(bool),
    Date(i64, u32),
    Duration(i64),
    Enum(String),
    List(Vec<String>),
}

/// Blank values and NaN all land in the blank group.
fn is_blank_key(value: &FieldValue) -> bool {
    match value {
        FieldValue::Number(n) => n.is_nan(),
        other => other.is_empty(),
    }
}

impl From<&FieldValue> for GroupKey {
    fn from(value: &FieldValue) -> Self {
        if is_blank_key(value) {
            return GroupKey::Empty;
        }
        match value {
            FieldValue::Empty => GroupKey::Empty,
            FieldValue::Text(s) => GroupKey::Text(s.clone()),
            FieldValue::Number(n) => GroupKey::Number(OrderedFloat(*n)),
            FieldValue::Boolean(b) => GroupKey::Boolean(*b),
            FieldValue::Date(d) => GroupKey::Date(d.timestamp(), d.timestamp_subsec_nanos()),
            FieldValue::Duration(secs) => GroupKey::Duration(*secs),
            FieldValue::Enum(s) => GroupKey::Enum(s.clone()),
            FieldValue::List(items) => GroupKey::List(items.clone()),
        }
    }
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// What a column shows in a group's summary row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Aggregation {
    /// Sum of the members' numeric values.
    Sum,
    /// The group key itself (used for the group-by column).
    GroupLabel,
    /// Nothing.
    Blank,
}

impl Aggregation {
    pub fn for_column(column: &ColumnMetaData, group_column_key: &str) -> Self {
        if column.key == group_column_key {
            Aggregation::GroupLabel
        } else if column.value_type.is_numeric() {
            Aggregation::Sum
        } else {
            Aggregation::Blank
        }
    }
}

/// Running sum over the numeric members of a group.
#[derive(Debug, Clone, Copy, Default)]
struct SumAccumulator {
    sum: f64,
    count_numbers: u64,
}

impl SumAccumulator {
    fn add(&mut self, value: &FieldValue) {
        if let Some(n) = value.as_f64() {
            if !n.is_nan() {
                self.sum += n;
                self.count_numbers += 1;
            }
        }
    }

    fn compute(&self, value_type: ValueType) -> FieldValue {
        if self.count_numbers == 0 {
            return FieldValue::Empty;
        }
        match value_type {
            ValueType::Duration => FieldValue::Duration(self.sum.round() as i64),
            _ => FieldValue::Number(self.sum),
        }
    }
}

// ============================================================================
// OUTPUT TYPES
// ============================================================================

/// Synthetic aggregate row emitted for each group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    /// The column the rows were grouped by.
    pub column_key: String,
    /// The group's key value.
    pub key: FieldValue,
    /// Display label of the key.
    pub label: String,
    pub member_count: usize,
    /// Aggregated value per column key.
    pub values: FxHashMap<String, FieldValue>,
}

impl GroupSummary {
    /// Returns the aggregated value of a column, `Empty` if there is none.
    pub fn value(&self, key: &str) -> &FieldValue {
        static EMPTY: FieldValue = FieldValue::Empty;
        self.values.get(key).unwrap_or(&EMPTY)
    }
}

/// One row of rendered table output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rowType", content = "row", rename_all = "camelCase")]
pub enum ViewRow<'a> {
    GroupSummary(GroupSummary),
    Record(&'a Record),
}

impl<'a> ViewRow<'a> {
    pub fn as_record(&self) -> Option<&'a Record> {
        match self {
            ViewRow::Record(record) => Some(*record),
            ViewRow::GroupSummary(_) => None,
        }
    }

    pub fn as_summary(&self) -> Option<&GroupSummary> {
        match self {
            ViewRow::GroupSummary(summary) => Some(summary),
            ViewRow::Record(_) => None,
        }
    }

    pub fn is_summary(&self) -> bool {
        matches!(self, ViewRow::GroupSummary(_))
    }

    /// Value shown in a column of this row.
    pub fn value(&self, key: &str) -> &FieldValue {
        match self {
            ViewRow::GroupSummary(summary) => summary.value(key),
            ViewRow::Record(record) => record.value(key),
        }
    }
}

/// A group in nested form: the key and its members.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<'a> {
    pub key: FieldValue,
    pub members: Vec<&'a Record>,
}

// ============================================================================
// PARTITION AND GROUP
// ============================================================================

/// Partitions `rows` by their value at `column_key`, in first-seen order.
pub fn partition<'a>(column_key: &str, rows: &[&'a Record]) -> Vec<Group<'a>> {
    let mut index: FxHashMap<GroupKey, usize> = FxHashMap::default();
    let mut groups: Vec<Group<'a>> = Vec::new();

    for &record in rows {
        let value = record.value(column_key);
        let key = GroupKey::from(value);
        let slot = *index.entry(key).or_insert_with(|| {
            let key_value = if is_blank_key(value) {
                FieldValue::Empty
            } else {
                value.clone()
            };
            groups.push(Group {
                key: key_value,
                members: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].members.push(record);
    }

    groups
}

/// Builds the summary row of one group.
pub fn summarize(
    group: &Group<'_>,
    column_key: &str,
    columns: &[ColumnMetaData],
    options: &RenderOptions,
) -> GroupSummary {
    let mut values = FxHashMap::default();

    for column in columns {
        let value = match Aggregation::for_column(column, column_key) {
            Aggregation::GroupLabel => group.key.clone(),
            Aggregation::Blank => FieldValue::Empty,
            Aggregation::Sum => {
                let mut acc = SumAccumulator::default();
                for member in &group.members {
                    acc.add(member.value(&column.key));
                }
                acc.compute(column.value_type)
            }
        };
        values.insert(column.key.clone(), value);
    }

    GroupSummary {
        column_key: column_key.to_string(),
        key: group.key.clone(),
        label: key_label(&group.key, find_column(columns, column_key), options),
        member_count: group.members.len(),
        values,
    }
}

fn key_label(key: &FieldValue, column: Option<&ColumnMetaData>, options: &RenderOptions) -> String {
    if key.is_empty() {
        return options.blank_label.clone();
    }
    match (key, column) {
        (FieldValue::Enum(tag), Some(column)) => column.option_label(tag).to_string(),
        _ => key.display_value(),
    }
}

/// Groups `rows` and flattens the result into renderable rows.
///
/// With no group-by the rows pass through unchanged. `columns` decides which
/// columns the summary rows aggregate.
pub fn group_all<'a>(
    group_by: Option<&GroupBy>,
    columns: &[ColumnMetaData],
    rows: Vec<&'a Record>,
    options: &RenderOptions,
) -> Vec<ViewRow<'a>> {
    let Some(group_by) = group_by else {
        return rows.into_iter().map(ViewRow::Record).collect();
    };

    let groups = partition(&group_by.column_key, &rows);
    let mut out = Vec::with_capacity(rows.len() + groups.len());

    for group in &groups {
        let summary = ViewRow::GroupSummary(summarize(group, &group_by.column_key, columns, options));
        let members = group.members.iter().map(|&r| ViewRow::Record(r));

        match options.subtotal_location {
            SubtotalLocation::AtTop => {
                out.push(summary);
                out.extend(members);
            }
            SubtotalLocation::AtBottom => {
                out.extend(members);
                out.push(summary);
            }
        }
    }

    out
}

/// Reports a group-by on an unknown column.
pub fn validate(group_by: Option<&GroupBy>, schema: &Schema<'_>) -> Option<ConfigIssue> {
    let group_by = group_by?;
    schema
        .resolve(&group_by.column_key, ViewSection::GroupBy)
        .err()
}
