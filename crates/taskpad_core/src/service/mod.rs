//! Core use-case services.
//!
//! # Responsibility
//! - Expose the task store as the single entry point for mutations.
//! - Keep presentation layers decoupled from storage details.

pub mod task_store;
