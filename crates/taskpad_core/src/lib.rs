//! Core domain logic for Taskpad.
//! This crate owns the task collection, its persistence and the view
//! pipeline; presentation layers only call into it.

pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::category::{category_label, DEFAULT_CATEGORY, WELL_KNOWN_CATEGORIES};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use service::task_store::{StoreError, StoreResult, TaskStore};
pub use storage::{
    KeyValueSlot, MemorySlot, SqliteSlot, StorageError, StorageResult, TASKS_STORAGE_KEY,
};
pub use view::pipeline::{
    compute_view, CategoryFilter, ParseViewOptionError, SortMode, StatusFilter, TaskCounts,
    TaskView, ViewQuery,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
