//! FILENAME: core/view-engine/src/sort.rs
//! Sort Engine - stable multi-clause ordering of records.
//!
//! Clauses are applied left to right; the first clause that tells two records
//! apart decides. Records that tie on every clause keep their input order.
//! Blank values (absent, empty, NaN) always sort last, whatever the direction.

use std::cmp::Ordering;

use records::{FieldValue, Record};

use crate::definition::{SortClause, SortDirection};
use crate::diagnostics::{ConfigIssue, ViewSection};
use crate::schema::Schema;

/// Sorts rows by `clauses`. An empty clause list leaves the order unchanged.
pub fn sort_all<'a>(clauses: &[SortClause], mut rows: Vec<&'a Record>) -> Vec<&'a Record> {
    if clauses.is_empty() {
        return rows;
    }
    // `sort_by` is a stable merge sort
    rows.sort_by(|a, b| compare_records(clauses, a, b));
    rows
}

/// Compares two records under `clauses`.
pub fn compare_records(clauses: &[SortClause], a: &Record, b: &Record) -> Ordering {
    for clause in clauses {
        let ordering = compare_for_sort(
            a.value(&clause.column_key),
            b.value(&clause.column_key),
            clause.direction,
        );
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Reports sort clauses that reference unknown or unsortable columns.
pub fn validate(clauses: &[SortClause], schema: &Schema<'_>) -> Vec<ConfigIssue> {
    clauses
        .iter()
        .filter_map(|clause| schema.resolve(&clause.column_key, ViewSection::Sort).err())
        .collect()
}

/// Keeps only the clauses that resolve against `schema`.
pub fn retain_valid(clauses: &[SortClause], schema: &Schema<'_>) -> (Vec<SortClause>, Vec<ConfigIssue>) {
    let mut valid = Vec::with_capacity(clauses.len());
    let mut issues = Vec::new();
    for clause in clauses {
        match schema.resolve(&clause.column_key, ViewSection::Sort) {
            Ok(_) => valid.push(clause.clone()),
            Err(issue) => issues.push(issue),
        }
    }
    (valid, issues)
}

// ============================================================================
// VALUE COMPARISON
// ============================================================================

fn is_blank(value: &FieldValue) -> bool {
    match value {
        FieldValue::Number(n) => n.is_nan(),
        other => other.is_empty(),
    }
}

/// Compares two values for `direction`, keeping blanks at the end.
fn compare_for_sort(a: &FieldValue, b: &FieldValue, direction: SortDirection) -> Ordering {
    match (is_blank(a), is_blank(b)) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = compare_values(a, b);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
    }
}

/// Fixed rank used when two values of different types meet.
fn type_rank(value: &FieldValue) -> u8 {
    match value {
        FieldValue::Number(_) => 0,
        FieldValue::Duration(_) => 1,
        FieldValue::Date(_) => 2,
        FieldValue::Text(_) => 3,
        FieldValue::Enum(_) => 4,
        FieldValue::List(_) => 5,
        FieldValue::Boolean(_) => 6,
        FieldValue::Empty => 7,
    }
}

/// Case-insensitive ordinal comparison.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Ascending comparison of two non-blank values.
pub fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Number(x), FieldValue::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (FieldValue::Duration(x), FieldValue::Duration(y)) => x.cmp(y),
        // Durations delivered as raw second counts
        (FieldValue::Number(x), FieldValue::Duration(y)) => {
            x.partial_cmp(&(*y as f64)).unwrap_or(Ordering::Equal)
        }
        (FieldValue::Duration(x), FieldValue::Number(y)) => {
            (*x as f64).partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (FieldValue::Date(x), FieldValue::Date(y)) => x.cmp(y),
        (FieldValue::Text(x), FieldValue::Text(y)) => compare_text(x, y),
        (FieldValue::Enum(x), FieldValue::Enum(y)) => compare_text(x, y),
        (FieldValue::List(x), FieldValue::List(y)) => compare_text(&x.join(","), &y.join(",")),
        (FieldValue::Boolean(x), FieldValue::Boolean(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ids(rows: &[&Record]) -> Vec<String> {
        rows.iter().map(|r| r.id.0.clone()).collect()
    }

    #[test]
    fn numbers_descending() {
        let data = vec![
            Record::new(1u64).with("amt", 10.0),
            Record::new(2u64).with("amt", 5.0),
            Record::new(3u64).with("amt", 20.0),
        ];
        let sorted = sort_all(&[SortClause::descending("amt")], data.iter().collect());
        assert_eq!(ids(&sorted), vec!["3", "1", "2"]);
    }

    #[test]
    fn blanks_sort_last_in_both_directions() {
        let data = vec![
            Record::new(1u64),
            Record::new(2u64).with("amt", f64::NAN),
            Record::new(3u64).with("amt", 1.0),
            Record::new(4u64).with("amt", 2.0),
        ];

        let asc = sort_all(&[SortClause::ascending("amt")], data.iter().collect());
        assert_eq!(ids(&asc), vec!["3", "4", "1", "2"]);

        let desc = sort_all(&[SortClause::descending("amt")], data.iter().collect());
        assert_eq!(ids(&desc), vec!["4", "3", "1", "2"]);
    }

    #[test]
    fn ties_fall_through_to_next_clause() {
        let data = vec![
            Record::new(1u64).with("status", "open").with("amt", 1.0),
            Record::new(2u64).with("status", "closed").with("amt", 3.0),
            Record::new(3u64).with("status", "Open").with("amt", 2.0),
        ];
        let clauses = [SortClause::ascending("status"), SortClause::descending("amt")];
        let sorted = sort_all(&clauses, data.iter().collect());
        // "Open" and "open" tie on status, so amount decides
        assert_eq!(ids(&sorted), vec!["2", "3", "1"]);
    }

    #[test]
    fn stable_for_equal_rows() {
        let data: Vec<Record> = (0..10u64)
            .map(|i| Record::new(i).with("group", if i % 2 == 0 { "a" } else { "b" }))
            .collect();
        let sorted = sort_all(&[SortClause::ascending("group")], data.iter().collect());
        assert_eq!(
            ids(&sorted),
            vec!["0", "2", "4", "6", "8", "1", "3", "5", "7", "9"]
        );
    }

    #[test]
    fn idempotent() {
        let data = vec![
            Record::new(1u64).with("amt", 3.0).with("peer", "b"),
            Record::new(2u64).with("amt", 3.0).with("peer", "a"),
            Record::new(3u64).with("amt", 1.0),
        ];
        let clauses = [SortClause::descending("amt"), SortClause::ascending("peer")];
        let once = sort_all(&clauses, data.iter().collect());
        let twice = sort_all(&clauses, once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn dates_and_durations() {
        let early = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let data = vec![
            Record::new(1u64).with("closedOn", late).with("delta", FieldValue::Duration(60)),
            Record::new(2u64).with("closedOn", early).with("delta", FieldValue::Duration(3_600)),
        ];

        let by_date = sort_all(&[SortClause::ascending("closedOn")], data.iter().collect());
        assert_eq!(ids(&by_date), vec!["2", "1"]);

        let by_delta = sort_all(&[SortClause::descending("delta")], data.iter().collect());
        assert_eq!(ids(&by_delta), vec!["2", "1"]);
    }

    #[test]
    fn seconds_and_durations_compare_by_magnitude() {
        let data = vec![
            Record::new(1u64).with("delta", 100.0),
            Record::new(2u64).with("delta", FieldValue::Duration(50)),
            Record::new(3u64).with("delta", FieldValue::Duration(200)),
        ];

        let asc = sort_all(&[SortClause::ascending("delta")], data.iter().collect());
        assert_eq!(ids(&asc), vec!["2", "1", "3"]);

        let desc = sort_all(&[SortClause::descending("delta")], data.iter().collect());
        assert_eq!(ids(&desc), vec!["3", "1", "2"]);
    }

    #[test]
    fn empty_clauses_pass_through() {
        let data = vec![Record::new(2u64), Record::new(1u64)];
        let sorted = sort_all(&[], data.iter().collect());
        assert_eq!(ids(&sorted), vec!["2", "1"]);
    }
}
