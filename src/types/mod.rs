//! Core domain types for the artifact size tracker.
//!
//! This module contains the fundamental identifier types used throughout the
//! application, designed to encode invariants via the type system.

pub mod ids;

// Re-export commonly used types at the module level
pub use ids::{PrNumber, RepoId, Sha, StatusUrl};
