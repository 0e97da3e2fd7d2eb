//! Task store: the authoritative task collection and its persistence.
//!
//! # Responsibility
//! - Own the ordered task collection (newest first).
//! - Apply create/delete/toggle/clear-completed mutations.
//! - Round-trip the whole collection through a durable key-value slot.
//!
//! # Invariants
//! - Task ids are unique within the collection.
//! - Every mutator persists the full collection afterwards, even when the
//!   mutation was a no-op.
//! - Unknown ids are never an error for delete/toggle.
//! - Load never fails: missing data is an empty list, corrupt data is logged
//!   and replaced by an empty list.
//! - Persisted write failures are logged and returned; the in-memory change
//!   is kept and rewritten by the next successful persist.

use crate::model::task::{Task, TaskValidationError};
use crate::storage::{KeyValueSlot, StorageError, TASKS_STORAGE_KEY};
use crate::view::pipeline::{compute_view, TaskCounts, TaskView, ViewQuery};
use log::{error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error returned by task store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Creation input rejected; the collection is unchanged.
    Validation(TaskValidationError),
    /// The durable slot could not be written.
    Storage(StorageError),
    /// The collection could not be encoded.
    Serialize(serde_json::Error),
}

impl StoreError {
    /// Returns whether this is the recoverable empty-title rejection.
    pub fn is_empty_title(&self) -> bool {
        matches!(self, Self::Validation(TaskValidationError::EmptyTitle))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "failed to persist tasks: {err}"),
            Self::Serialize(err) => write!(f, "failed to encode tasks: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Reasons a load falls back to an empty collection.
#[derive(Debug)]
enum LoadError {
    Storage(StorageError),
    Corrupt(String),
}

/// Task collection bound to one durable slot.
pub struct TaskStore<S: KeyValueSlot> {
    slot: S,
    tasks: Vec<Task>,
}

impl<S: KeyValueSlot> TaskStore<S> {
    /// Loads the persisted collection from `slot`.
    ///
    /// # Contract
    /// - Missing entry -> empty collection.
    /// - Unreadable slot or corrupt entry -> logged, empty collection.
    /// - Never returns an error and never writes to the slot.
    pub fn load(slot: S) -> Self {
        let started_at = Instant::now();
        let tasks = match read_tasks(&slot) {
            Ok(Some(tasks)) => {
                info!(
                    "event=tasks_load module=store status=ok count={} duration_ms={}",
                    tasks.len(),
                    started_at.elapsed().as_millis()
                );
                tasks
            }
            Ok(None) => {
                info!("event=tasks_load module=store status=empty count=0");
                Vec::new()
            }
            Err(LoadError::Corrupt(details)) => {
                error!(
                    "event=tasks_load module=store status=corrupt error_code=storage_load_corrupt error={}",
                    details
                );
                Vec::new()
            }
            Err(LoadError::Storage(err)) => {
                error!(
                    "event=tasks_load module=store status=error error_code=storage_read_failed error={}",
                    err
                );
                Vec::new()
            }
        };

        Self { slot, tasks }
    }

    /// Creates a task at the front of the collection and persists.
    ///
    /// # Errors
    /// - `StoreError::Validation(EmptyTitle)` when the trimmed title is empty;
    ///   nothing is changed or persisted.
    /// - `StoreError::Storage` when persisting fails; the task stays in memory.
    pub fn create(&mut self, title: &str, description: &str, category: &str) -> StoreResult<Task> {
        let mut task = Task::new(title, description, category).map_err(|err| {
            warn!(
                "event=task_create module=store status=rejected error_code=validation error={}",
                err
            );
            err
        })?;
        while self.get(&task.id).is_some() {
            task.id = Uuid::new_v4().to_string();
        }

        self.tasks.insert(0, task.clone());
        info!(
            "event=task_create module=store status=ok task_id={} total={}",
            task.id,
            self.tasks.len()
        );
        self.persist()?;
        Ok(task)
    }

    /// Removes the task with `id`; unknown ids are a no-op.
    pub fn delete(&mut self, id: &str) -> StoreResult<()> {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        info!(
            "event=task_delete module=store status=ok task_id={} removed={}",
            id,
            before != self.tasks.len()
        );
        self.persist()
    }

    /// Flips `completed` on the task with `id`.
    ///
    /// Returns the new flag, or `None` when the id is unknown.
    pub fn toggle_completion(&mut self, id: &str) -> StoreResult<Option<bool>> {
        let toggled = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .map(Task::toggle_completion);
        match toggled {
            Some(completed) => info!(
                "event=task_toggle module=store status=ok task_id={} completed={}",
                id, completed
            ),
            None => info!(
                "event=task_toggle module=store status=not_found task_id={}",
                id
            ),
        }
        self.persist()?;
        Ok(toggled)
    }

    /// Removes every completed task and returns how many were removed.
    ///
    /// Destructive: callers are expected to confirm with the user first.
    pub fn clear_completed(&mut self) -> StoreResult<usize> {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed);
        let removed = before - self.tasks.len();
        info!(
            "event=tasks_clear_completed module=store status=ok removed={} remaining={}",
            removed,
            self.tasks.len()
        );
        self.persist()?;
        Ok(removed)
    }

    /// Current collection in store order (newest created first).
    pub fn snapshot(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up one task by id.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn counts(&self) -> TaskCounts {
        TaskCounts::of(&self.tasks)
    }

    /// Runs the view pipeline over the current snapshot.
    pub fn compute_view(&self, query: &ViewQuery) -> TaskView {
        compute_view(&self.tasks, query)
    }

    /// Serializes the full collection and overwrites the durable slot.
    pub fn persist(&mut self) -> StoreResult<()> {
        let encoded = serde_json::to_string(&self.tasks).map_err(|err| {
            error!(
                "event=tasks_persist module=store status=error error_code=encode_failed error={}",
                err
            );
            err
        })?;

        match self.slot.write(TASKS_STORAGE_KEY, &encoded) {
            Ok(()) => {
                info!(
                    "event=tasks_persist module=store status=ok count={} bytes={}",
                    self.tasks.len(),
                    encoded.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=tasks_persist module=store status=error error_code=storage_write_failed error={}",
                    err
                );
                Err(err.into())
            }
        }
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Releases the slot, e.g. to reload it as a fresh process would.
    pub fn into_slot(self) -> S {
        self.slot
    }
}

fn read_tasks<S: KeyValueSlot>(slot: &S) -> Result<Option<Vec<Task>>, LoadError> {
    let raw = match slot.read(TASKS_STORAGE_KEY) {
        Ok(Some(raw)) if !raw.trim().is_empty() => raw,
        Ok(_) => return Ok(None),
        Err(err) => return Err(LoadError::Storage(err)),
    };

    let tasks: Vec<Task> =
        serde_json::from_str(&raw).map_err(|err| LoadError::Corrupt(describe_json_error(&err)))?;

    let mut seen_ids = HashSet::with_capacity(tasks.len());
    for (index, task) in tasks.iter().enumerate() {
        task.validate()
            .map_err(|err| LoadError::Corrupt(format!("record {index}: {err}")))?;
        if !seen_ids.insert(task.id.as_str()) {
            return Err(LoadError::Corrupt(format!("record {index}: duplicate id")));
        }
    }

    Ok(Some(tasks))
}

// serde_json messages can quote persisted user text; keep only the shape.
fn describe_json_error(err: &serde_json::Error) -> String {
    format!(
        "{:?} error at line {} column {}",
        err.classify(),
        err.line(),
        err.column()
    )
}
