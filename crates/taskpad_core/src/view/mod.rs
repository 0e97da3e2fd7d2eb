//! Display-list derivation.
//!
//! # Responsibility
//! - Turn a store snapshot plus filter/search/sort parameters into the list
//!   the presentation layer renders.
//!
//! # Invariants
//! - The pipeline is pure: no mutation, no persistence, no logging.

pub mod pipeline;
