//! Core domain types for SLO tracking.
//!
//! This module contains the fundamental types used throughout the crate,
//! designed to encode invariants via the type system: labels compare
//! case-insensitively, only pull requests can be drafts, and durations are
//! normalised to whole days.

pub mod duration;
pub mod ids;
pub mod item;
pub mod label;

// Re-export commonly used types at the module level
pub use duration::SloDuration;
pub use ids::{InvalidRepoId, ItemNumber, ItemRef, Login, RepoId};
pub use item::{Item, ItemKind};
pub use label::{LabelName, LabelVocabulary};
