//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical task record used by the store and the view.
//! - Keep category label policy next to the data it describes.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Tasks are hard-deleted; there are no tombstones.

pub mod category;
pub mod task;
