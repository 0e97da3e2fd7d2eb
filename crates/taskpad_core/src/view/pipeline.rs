//! Filter, search and sort pipeline over a task snapshot.
//!
//! # Invariants
//! - Filtering keeps a task only when status, category and search all match.
//! - Sorting is stable on `created_at`; equal timestamps keep input order.
//! - Counts always describe the unfiltered input.

use crate::model::task::Task;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Completion-state filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    /// Only tasks with `completed == false`.
    Active,
    /// Only tasks with `completed == true`.
    Completed,
}

impl StatusFilter {
    fn accepts(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

/// Category filter: the `all` sentinel or one exact tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Tag(String),
}

impl CategoryFilter {
    fn accepts(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => task.category == *tag,
        }
    }
}

/// Display order by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    CreatedDesc,
    CreatedAsc,
}

/// Error for unrecognized textual view options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseViewOptionError {
    kind: &'static str,
    value: String,
}

impl Display for ParseViewOptionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} `{}`", self.kind, self.value)
    }
}

impl Error for ParseViewOptionError {}

impl FromStr for StatusFilter {
    type Err = ParseViewOptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(ParseViewOptionError {
                kind: "status filter",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseViewOptionError;

    /// `all` is the sentinel; every other string is taken as a tag.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(Self::All),
            tag => Ok(Self::Tag(tag.to_string())),
        }
    }
}

impl FromStr for SortMode {
    type Err = ParseViewOptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "created-desc" => Ok(Self::CreatedDesc),
            "created-asc" => Ok(Self::CreatedAsc),
            other => Err(ParseViewOptionError {
                kind: "sort mode",
                value: other.to_string(),
            }),
        }
    }
}

/// Parameters of one view computation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewQuery {
    pub status: StatusFilter,
    pub category: CategoryFilter,
    /// Case-insensitive substring matched against title and description.
    pub search: String,
    pub sort: SortMode,
}

/// Aggregate counts over the full collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskCounts {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
}

impl TaskCounts {
    pub fn of(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            total,
            completed,
            active: total - completed,
        }
    }
}

/// Output of [`compute_view`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    /// Filtered tasks in display order; may be empty.
    pub tasks: Vec<Task>,
    pub counts: TaskCounts,
    /// Whether a non-empty search text shaped `tasks`. Lets the caller pick
    /// empty-state wording.
    pub searched: bool,
}

impl TaskView {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Derives the display list and counts from `tasks` (store order).
pub fn compute_view(tasks: &[Task], query: &ViewQuery) -> TaskView {
    let needle = query.search.to_lowercase();

    let mut visible: Vec<Task> = tasks
        .iter()
        .filter(|task| query.status.accepts(task))
        .filter(|task| query.category.accepts(task))
        .filter(|task| task.matches_lowercase(&needle))
        .cloned()
        .collect();

    // `sort_by` is stable, which the tie rule relies on.
    match query.sort {
        SortMode::CreatedAsc => visible.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortMode::CreatedDesc => visible.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }

    TaskView {
        tasks: visible,
        counts: TaskCounts::of(tasks),
        searched: !query.search.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryFilter, SortMode, StatusFilter};

    #[test]
    fn parses_textual_options() {
        assert_eq!("active".parse::<StatusFilter>().unwrap(), StatusFilter::Active);
        assert_eq!("created-asc".parse::<SortMode>().unwrap(), SortMode::CreatedAsc);
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "errands".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Tag("errands".to_string())
        );
    }

    #[test]
    fn rejects_unknown_status_and_sort() {
        let err = "done".parse::<StatusFilter>().unwrap_err();
        assert_eq!(err.to_string(), "unknown status filter `done`");
        assert!("newest".parse::<SortMode>().is_err());
    }
}
