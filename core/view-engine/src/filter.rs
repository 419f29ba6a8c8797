//! FILENAME: core/view-engine/src/filter.rs
//! Filter Engine - evaluates a filter tree against records.
//!
//! Evaluation is a pure function of (tree, record). Clause semantics:
//! - an absent or blank value fails every condition except `IsEmpty`
//! - numbers, durations and dates compare by numeric ordering
//! - text compares case-insensitively (substring or equality)
//! - enum conditions test set membership of the tag
//! - a present value of the wrong type fails the clause
//!
//! `And` over no children is true, `Or` over no children is false.

use records::{ColumnMetaData, FieldValue, Record};

use crate::definition::{
    Combinator, Condition, DateCondition, EnumCondition, FilterClause, FilterTree,
    NumberCondition, TextCondition, TextOperator,
};
use crate::diagnostics::{ConfigIssue, ViewSection};
use crate::schema::Schema;

// ============================================================================
// EVALUATION
// ============================================================================

/// Anything that can decide whether a record is kept.
pub trait RecordPredicate {
    fn matches(&self, record: &Record) -> bool;
}

/// Evaluates `tree` against `record`.
pub fn evaluate(tree: &FilterTree, record: &Record) -> bool {
    match tree {
        FilterTree::Clause(clause) => matches_clause(clause, record),
        FilterTree::Group {
            combinator,
            children,
        } => match combinator {
            Combinator::And => children.iter().all(|child| evaluate(child, record)),
            Combinator::Or => children.iter().any(|child| evaluate(child, record)),
        },
    }
}

impl RecordPredicate for FilterTree {
    fn matches(&self, record: &Record) -> bool {
        evaluate(self, record)
    }
}

/// Evaluates a single clause against a record.
pub fn matches_clause(clause: &FilterClause, record: &Record) -> bool {
    matches_condition(&clause.condition, record.value(&clause.column_key))
}

/// Evaluates a condition against a single value.
pub fn matches_condition(condition: &Condition, value: &FieldValue) -> bool {
    match condition {
        Condition::IsEmpty => return value.is_empty(),
        Condition::IsNotEmpty => return !value.is_empty(),
        _ => {}
    }

    if value.is_empty() {
        return false;
    }

    match (condition, value) {
        (Condition::Number(cond), FieldValue::Number(n)) => matches_number(cond, *n),
        (Condition::Duration(cond), FieldValue::Duration(secs)) => matches_number(cond, *secs as f64),
        // Durations delivered as raw second counts
        (Condition::Duration(cond), FieldValue::Number(n)) => matches_number(cond, *n),
        (Condition::Text(cond), FieldValue::Text(s) | FieldValue::Enum(s)) => matches_text(cond, s),
        (Condition::Text(cond), FieldValue::List(items)) => matches_text_list(cond, items),
        (Condition::Enum(cond), FieldValue::Enum(tag) | FieldValue::Text(tag)) => match cond {
            EnumCondition::In(set) => set.iter().any(|v| v == tag),
            EnumCondition::NotIn(set) => !set.iter().any(|v| v == tag),
        },
        (Condition::Enum(cond), FieldValue::List(items)) => {
            let any_in = |set: &Vec<String>| items.iter().any(|item| set.contains(item));
            match cond {
                EnumCondition::In(set) => any_in(set),
                EnumCondition::NotIn(set) => !any_in(set),
            }
        }
        (Condition::Date(cond), FieldValue::Date(d)) => match cond {
            DateCondition::Before { value } => d < value,
            DateCondition::After { value } => d > value,
            DateCondition::Between { start, end } => d >= start && d <= end,
        },
        (Condition::Boolean(expected), FieldValue::Boolean(b)) => b == expected,
        _ => false,
    }
}

fn matches_number(cond: &NumberCondition, n: f64) -> bool {
    if n.is_nan() {
        return false;
    }
    match *cond {
        NumberCondition::Equals { value } => n == value,
        NumberCondition::NotEquals { value } => n != value,
        NumberCondition::GreaterThan { value } => n > value,
        NumberCondition::GreaterThanOrEqual { value } => n >= value,
        NumberCondition::LessThan { value } => n < value,
        NumberCondition::LessThanOrEqual { value } => n <= value,
        NumberCondition::Between { min, max } => n >= min && n <= max,
        NumberCondition::NotBetween { min, max } => n < min || n > max,
    }
}

fn matches_text(cond: &TextCondition, text: &str) -> bool {
    let haystack = text.to_lowercase();
    let needle = cond.value.to_lowercase();
    match cond.operator {
        TextOperator::Contains => haystack.contains(&needle),
        TextOperator::NotContains => !haystack.contains(&needle),
        TextOperator::Equals => haystack == needle,
        TextOperator::NotEquals => haystack != needle,
        TextOperator::BeginsWith => haystack.starts_with(&needle),
        TextOperator::EndsWith => haystack.ends_with(&needle),
    }
}

/// Positive operators match when any item matches; negated operators
/// match when no item matches the positive form.
fn matches_text_list(cond: &TextCondition, items: &[String]) -> bool {
    let positive = match cond.operator {
        TextOperator::NotContains => Some(TextOperator::Contains),
        TextOperator::NotEquals => Some(TextOperator::Equals),
        _ => None,
    };

    match positive {
        Some(operator) => {
            let cond = TextCondition {
                operator,
                value: cond.value.clone(),
            };
            !items.iter().any(|item| matches_text(&cond, item))
        }
        None => items.iter().any(|item| matches_text(cond, item)),
    }
}

// ============================================================================
// VALIDATION AND COMPILATION
// ============================================================================

/// Lists every clause of `tree` that is unknown to or incompatible with
/// `schema`, in depth-first order.
pub fn validate(tree: &FilterTree, schema: &Schema<'_>) -> Vec<ConfigIssue> {
    tree.clauses()
        .into_iter()
        .filter_map(|clause| check_clause(clause, schema).err())
        .collect()
}

fn check_clause(clause: &FilterClause, schema: &Schema<'_>) -> Result<(), ConfigIssue> {
    let column = schema.resolve(&clause.column_key, ViewSection::Filter)?;
    if !clause.condition.applies_to(column.value_type) {
        return Err(ConfigIssue::IncompatibleCondition {
            column_key: clause.column_key.clone(),
            condition: clause.condition.name().to_string(),
            value_type: column.value_type,
        });
    }
    Ok(())
}

#[derive(Debug, Clone)]
enum Node {
    Clause(FilterClause),
    /// A clause that failed validation.
    Never,
    Group {
        combinator: Combinator,
        children: Vec<Node>,
    },
}

impl Node {
    fn matches(&self, record: &Record) -> bool {
        match self {
            Node::Clause(clause) => matches_clause(clause, record),
            Node::Never => false,
            Node::Group {
                combinator: Combinator::And,
                children,
            } => children.iter().all(|c| c.matches(record)),
            Node::Group {
                combinator: Combinator::Or,
                children,
            } => children.iter().any(|c| c.matches(record)),
        }
    }
}

/// A filter tree checked against a schema, with invalid clauses replaced by
/// constant `false`.
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    root: Node,
    issues: Vec<ConfigIssue>,
}

impl CompiledFilter {
    /// Compiles `tree`, collecting the issues found along the way.
    pub fn compile(tree: &FilterTree, schema: &Schema<'_>) -> Self {
        let mut issues = Vec::new();
        let root = Self::compile_node(tree, schema, &mut issues);
        CompiledFilter { root, issues }
    }

    /// Problems found while compiling, in depth-first clause order.
    pub fn issues(&self) -> &[ConfigIssue] {
        &self.issues
    }

    fn compile_node(tree: &FilterTree, schema: &Schema<'_>, issues: &mut Vec<ConfigIssue>) -> Node {
        match tree {
            FilterTree::Clause(clause) => match check_clause(clause, schema) {
                Ok(()) => Node::Clause(clause.clone()),
                Err(issue) => {
                    issues.push(issue);
                    Node::Never
                }
            },
            FilterTree::Group {
                combinator,
                children,
            } => Node::Group {
                combinator: *combinator,
                children: children
                    .iter()
                    .map(|child| Self::compile_node(child, schema, issues))
                    .collect(),
            },
        }
    }
}

impl RecordPredicate for CompiledFilter {
    fn matches(&self, record: &Record) -> bool {
        self.root.matches(record)
    }
}

impl<P: RecordPredicate + ?Sized> RecordPredicate for &P {
    fn matches(&self, record: &Record) -> bool {
        (**self).matches(record)
    }
}

// ============================================================================
// FILTERED SEQUENCE
// ============================================================================

/// A lazily evaluated, restartable filtered view over a record slice.
/// Each call to `iter` starts a fresh pass in input order.
#[derive(Debug, Clone)]
pub struct Filtered<'a, P> {
    predicate: P,
    records: &'a [Record],
}

impl<'a, P: RecordPredicate> Filtered<'a, P> {
    pub fn new(predicate: P, records: &'a [Record]) -> Self {
        Filtered { predicate, records }
    }

    pub fn predicate(&self) -> &P {
        &self.predicate
    }

    pub fn iter(&self) -> FilteredIter<'_, 'a, P> {
        FilteredIter {
            predicate: &self.predicate,
            inner: self.records.iter(),
        }
    }

    /// Materializes the surviving records.
    pub fn to_vec(&self) -> Vec<&'a Record> {
        self.iter().collect()
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }
}

impl<'f, 'a, P: RecordPredicate> IntoIterator for &'f Filtered<'a, P> {
    type Item = &'a Record;
    type IntoIter = FilteredIter<'f, 'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug)]
pub struct FilteredIter<'f, 'a, P> {
    predicate: &'f P,
    inner: std::slice::Iter<'a, Record>,
}

impl<P> Clone for FilteredIter<'_, '_, P> {
    fn clone(&self) -> Self {
        FilteredIter {
            predicate: self.predicate,
            inner: self.inner.clone(),
        }
    }
}

impl<'a, P: RecordPredicate> Iterator for FilteredIter<'_, 'a, P> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        let predicate = self.predicate;
        self.inner.by_ref().find(|record| predicate.matches(record))
    }
}

/// Filters `records` by `tree`, preserving input order.
///
/// The tree is checked against `columns` first: a clause on an unknown
/// column, or one whose condition does not fit the column's value type,
/// evaluates to false. The issues are available from `predicate().issues()`.
pub fn filter_all<'a>(
    tree: &FilterTree,
    columns: &[ColumnMetaData],
    records: &'a [Record],
) -> Filtered<'a, CompiledFilter> {
    let filter = CompiledFilter::compile(tree, &Schema::from_columns(columns));
    Filtered::new(filter, records)
}

/// Filters `records` by an already compiled filter.
pub fn filter_compiled<'a, P: RecordPredicate>(filter: P, records: &'a [Record]) -> Filtered<'a, P> {
    Filtered::new(filter, records)
}
