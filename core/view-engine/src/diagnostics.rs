//! FILENAME: core/view-engine/src/diagnostics.rs
//! Configuration diagnostics collected while evaluating a view.
//!
//! A bad clause never aborts a render. It degrades to `false` (filters) or
//! to a no-op (sort and group), and the problem is reported once per run as a
//! single aggregated warning.

use records::ValueType;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which part of a view a problem was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewSection {
    Filter,
    Sort,
    GroupBy,
}

impl fmt::Display for ViewSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewSection::Filter => "filter",
            ViewSection::Sort => "sort",
            ViewSection::GroupBy => "group-by",
        };
        f.write_str(name)
    }
}

/// A single configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ConfigIssue {
    #[error("{section} references unknown column '{column_key}'")]
    UnknownColumn {
        section: ViewSection,
        column_key: String,
    },

    #[error("{condition} condition cannot be applied to {value_type} column '{column_key}'")]
    IncompatibleCondition {
        column_key: String,
        condition: String,
        value_type: ValueType,
    },

    #[error("column '{column_key}' is not sortable")]
    NotSortable { column_key: String },

    #[error("column '{column_key}' is not filterable")]
    NotFilterable { column_key: String },
}

/// All configuration problems of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationWarning {
    pub issues: Vec<ConfigIssue>,
}

impl ConfigurationWarning {
    /// Builds a warning from collected issues, dropping duplicates while
    /// keeping first-seen order. Returns None when there is nothing to report.
    pub fn from_issues(issues: Vec<ConfigIssue>) -> Option<Self> {
        let mut unique: Vec<ConfigIssue> = Vec::with_capacity(issues.len());
        for issue in issues {
            if !unique.contains(&issue) {
                unique.push(issue);
            }
        }

        if unique.is_empty() {
            None
        } else {
            Some(ConfigurationWarning { issues: unique })
        }
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for ConfigurationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view configuration has {} problem(s): ", self.issues.len())?;
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_collapse_into_one_issue() {
        let issue = ConfigIssue::UnknownColumn {
            section: ViewSection::Filter,
            column_key: "nope".into(),
        };
        let warning = ConfigurationWarning::from_issues(vec![issue.clone(), issue.clone()]).unwrap();
        assert_eq!(warning.issues, vec![issue]);
    }

    #[test]
    fn no_issues_means_no_warning() {
        assert!(ConfigurationWarning::from_issues(Vec::new()).is_none());
    }

    #[test]
    fn message_lists_every_issue() {
        let warning = ConfigurationWarning::from_issues(vec![
            ConfigIssue::UnknownColumn {
                section: ViewSection::Sort,
                column_key: "x".into(),
            },
            ConfigIssue::IncompatibleCondition {
                column_key: "amt".into(),
                condition: "text".into(),
                value_type: ValueType::Number,
            },
        ])
        .unwrap();

        assert_eq!(
            warning.to_string(),
            "view configuration has 2 problem(s): sort references unknown column 'x'; \
             text condition cannot be applied to number column 'amt'"
        );
    }
}
