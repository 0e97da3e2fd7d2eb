//! Task domain model.
//!
//! # Responsibility
//! - Define the single record kept by the task store.
//! - Validate titles and identities before a task enters the collection.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is trimmed and never empty.
//! - `created_at` is set once, truncated to millisecond precision so the
//!   persisted ISO-8601 form round-trips exactly.
//! - `completed` is the only field mutated after creation.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque task identifier.
///
/// New tasks get UUID v4 strings, but any non-empty string is accepted so
/// records persisted by older builds keep their identity.
pub type TaskId = String;

/// Validation error for task invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Identifier is empty.
    EmptyId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::EmptyId => write!(f, "task id must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// One user-created to-do item.
///
/// Tasks are created only by [`crate::TaskStore::create`] or read back from
/// the durable slot; outside the crate they are read-only.
///
/// Serialized with camelCase field names (`createdAt`) to match the durable
/// slot layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Task {
    pub(crate) id: TaskId,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) category: String,
    pub(crate) completed: bool,
    #[serde(with = "iso_millis")]
    pub(crate) created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task with a generated id and the current time.
    ///
    /// Title and description are trimmed before validation.
    ///
    /// # Errors
    /// - `EmptyTitle` when the trimmed title is empty.
    pub(crate) fn new(
        title: &str,
        description: &str,
        category: impl Into<String>,
    ) -> Result<Self, TaskValidationError> {
        Self::with_id(
            Uuid::new_v4().to_string(),
            title,
            description,
            category,
            Utc::now(),
        )
    }

    /// Creates a task with a caller-provided id and creation time.
    pub(crate) fn with_id(
        id: impl Into<TaskId>,
        title: &str,
        description: &str,
        category: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, TaskValidationError> {
        let task = Self {
            id: id.into(),
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            category: category.into(),
            completed: false,
            created_at: created_at.trunc_subsecs(3),
        };
        task.validate()?;
        Ok(task)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free text, empty when the user left it blank.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Open category tag; see [`crate::model::category`].
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Validates the invariants that persisted records must also satisfy.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Flips the completion flag and returns the new value.
    pub(crate) fn toggle_completion(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }

    /// Case-insensitive substring match against title or description.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix,
/// e.g. `2024-05-01T08:30:00.000Z`. Finer input precision is truncated on
/// read so a load/persist cycle is lossless.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&text)
            .map(|value| value.with_timezone(&Utc).trunc_subsecs(3))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskValidationError};
    use chrono::{TimeZone, Utc};

    #[test]
    fn matches_lowercase_checks_title_and_description() {
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        let task = Task::with_id("1", "Buy Milk", "Oat, not Soy", "life", created_at).unwrap();

        assert!(task.matches_lowercase(""));
        assert!(task.matches_lowercase("milk"));
        assert!(task.matches_lowercase("soy"));
        assert!(!task.matches_lowercase("bread"));
    }

    #[test]
    fn validate_rejects_empty_id() {
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        let err = Task::with_id("", "title", "", "work", created_at).unwrap_err();
        assert_eq!(err, TaskValidationError::EmptyId);
    }

    #[test]
    fn new_sets_defaults_and_trims_input() {
        let task = Task::new("  Buy milk  ", "  oat  ", "life").unwrap();

        assert!(!task.id().is_empty());
        assert_eq!(task.title(), "Buy milk");
        assert_eq!(task.description(), "oat");
        assert_eq!(task.category(), "life");
        assert!(!task.is_completed());
    }

    #[test]
    fn new_rejects_blank_titles() {
        assert_eq!(
            Task::new("", "d", "work").unwrap_err(),
            TaskValidationError::EmptyTitle
        );
        assert_eq!(
            Task::new("   \t", "d", "work").unwrap_err(),
            TaskValidationError::EmptyTitle
        );
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = Task::new("a", "", "work").unwrap();
        let b = Task::new("b", "", "work").unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn toggle_completion_is_a_pure_flip() {
        let mut task = Task::new("flip me", "", "study").unwrap();
        assert!(task.toggle_completion());
        assert!(!task.toggle_completion());
        assert!(!task.is_completed());
    }

    #[test]
    fn created_at_is_truncated_to_milliseconds() {
        let created_at = Utc.timestamp_opt(1_714_552_200, 123_456_789).unwrap();
        let task = Task::with_id("x", "t", "", "work", created_at).unwrap();

        assert_eq!(task.created_at().timestamp_subsec_nanos(), 123_000_000);
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(serde_json::from_str::<Task>(&json).unwrap(), task);
    }
}
