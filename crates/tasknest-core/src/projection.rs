//! Display projection of the task collection.
//!
//! [`project`] turns the full task list into the ordered list the interface
//! shows, given a [`ViewQuery`] and the current date. It has no hidden inputs:
//! the same arguments always give the same output.
//!
//! Steps run in a fixed order: status filter, category filter, title search,
//! then a stable sort.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use feruca::Collator;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !task.completed,
            StatusFilter::Completed => task.completed,
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Active => write!(f, "active"),
            StatusFilter::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid status filter: {0} (expected all, active or completed)")]
pub struct ParseStatusFilterError(String);

impl FromStr for StatusFilter {
    type Err = ParseStatusFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" | "pending" => Ok(StatusFilter::Active),
            "completed" | "done" => Ok(StatusFilter::Completed),
            _ => Err(ParseStatusFilterError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Keep collection order.
    #[default]
    None,
    DaysAsc,
    DaysDesc,
    AlphaAsc,
    AlphaDesc,
}

impl std::fmt::Display for SortOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOption::None => write!(f, "none"),
            SortOption::DaysAsc => write!(f, "days-asc"),
            SortOption::DaysDesc => write!(f, "days-desc"),
            SortOption::AlphaAsc => write!(f, "alpha-asc"),
            SortOption::AlphaDesc => write!(f, "alpha-desc"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid sort option: {0} (expected none, days-asc, days-desc, alpha-asc or alpha-desc)")]
pub struct ParseSortOptionError(String);

impl FromStr for SortOption {
    type Err = ParseSortOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "none" => Ok(SortOption::None),
            "days-asc" | "daysasc" => Ok(SortOption::DaysAsc),
            "days-desc" | "daysdesc" => Ok(SortOption::DaysDesc),
            "alpha-asc" | "alphaasc" => Ok(SortOption::AlphaAsc),
            "alpha-desc" | "alphadesc" => Ok(SortOption::AlphaDesc),
            _ => Err(ParseSortOptionError(s.to_string())),
        }
    }
}

/// Everything the projection depends on besides the tasks and the date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub status: StatusFilter,
    /// `None` means no category filter.
    pub category: Option<Uuid>,
    pub search: String,
    pub sort: SortOption,
}

impl ViewQuery {
    fn keeps(&self, task: &Task, needle: Option<&str>) -> bool {
        if !self.status.matches(task) {
            return false;
        }
        if let Some(category) = self.category {
            if task.category_id != Some(category) {
                return false;
            }
        }
        match needle {
            Some(needle) => task.title.to_lowercase().contains(needle),
            None => true,
        }
    }
}

/// Computes the displayed task list.
pub fn project(tasks: &[Task], query: &ViewQuery, today: NaiveDate) -> Vec<Task> {
    // Trimming only decides whether the search applies; the text itself is
    // matched as typed.
    let needle = (!query.search.trim().is_empty()).then(|| query.search.to_lowercase());

    let mut visible: Vec<Task> = tasks
        .iter()
        .filter(|task| query.keeps(task, needle.as_deref()))
        .cloned()
        .collect();

    match query.sort {
        SortOption::None => {}
        SortOption::DaysAsc => visible.sort_by(|a, b| {
            compare_days(days_remaining(a, today), days_remaining(b, today), false)
        }),
        SortOption::DaysDesc => visible.sort_by(|a, b| {
            compare_days(days_remaining(a, today), days_remaining(b, today), true)
        }),
        SortOption::AlphaAsc => {
            let mut collator = Collator::default();
            visible.sort_by(|a, b| collator.collate(&a.title, &b.title));
        }
        SortOption::AlphaDesc => {
            let mut collator = Collator::default();
            visible.sort_by(|a, b| collator.collate(&b.title, &a.title));
        }
    }

    visible
}

/// Calendar days from `today` until the task is due. `None` when the task has
/// no due date, which is not the same as being due today.
pub fn days_remaining(task: &Task, today: NaiveDate) -> Option<i64> {
    task.due_date.map(|due| (due - today).num_days())
}

/// Undated tasks go last in both directions.
fn compare_days(a: Option<i64>, b: Option<i64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if descending => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Title comparison using the Unicode Collation Algorithm with the CLDR root
/// tailoring: accents and case only break ties between otherwise equal
/// letters, and non-Latin scripts follow their alphabet order.
///
/// Sorting many titles should reuse one [`Collator`] as [`project`] does.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    Collator::default().collate(a, b)
}

/// Lenient due-date parser for imported data.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `YYYY-MM-DDTHH:MM[:SS]`.
/// Empty or unrecognised text yields `None`.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|datetime| datetime.date())
}
