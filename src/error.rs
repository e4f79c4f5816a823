//! Errors raised by SLO computations.

use thiserror::Error;

use crate::types::{ItemRef, LabelName};

/// Error type for SLO computations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SloError {
    /// The item carries a label that no visible `labeled` event applied.
    ///
    /// The label snapshot and timeline snapshot disagree; usually the timeline
    /// was truncated. Re-fetching a fuller timeline is the caller's job.
    #[error("{item} has label '{label}' but its timeline never applies it")]
    DataIntegrity { item: ItemRef, label: LabelName },
}
