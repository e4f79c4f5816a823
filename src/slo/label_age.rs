//! Time since a tracked label was applied.
//!
//! Unlike the SLO clock this never pauses: it is simply the time since the
//! most recent application of a label the item still carries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SloError;
use crate::timeline::TimelineEvent;
use crate::types::{Item, LabelName, LabelVocabulary, SloDuration};

/// Labels whose age is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedLabel {
    /// Waiting to be discussed at the next meeting.
    Agenda,
    /// Waiting on edits from the author.
    NeedsEdits,
}

impl TrackedLabel {
    /// Every tracked label, in reporting order.
    pub const ALL: [TrackedLabel; 2] = [TrackedLabel::Agenda, TrackedLabel::NeedsEdits];

    /// Returns the label name this key stands for in `vocab`.
    pub fn name<'a>(&self, vocab: &'a LabelVocabulary) -> &'a LabelName {
        match self {
            TrackedLabel::Agenda => &vocab.agenda,
            TrackedLabel::NeedsEdits => &vocab.needs_edits,
        }
    }
}

impl fmt::Display for TrackedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackedLabel::Agenda => write!(f, "agenda"),
            TrackedLabel::NeedsEdits => write!(f, "needs_edits"),
        }
    }
}

/// Returns the time since `tracked` was last applied to `item`.
///
/// Returns `Ok(None)` if the item doesn't currently carry the label.
///
/// # Errors
///
/// [`SloError::DataIntegrity`] if the item carries the label but no
/// `labeled` event for it appears in the timeline.
pub fn time_since_label_applied(
    item: &Item,
    tracked: TrackedLabel,
    vocab: &LabelVocabulary,
    now: DateTime<Utc>,
) -> Result<Option<SloDuration>, SloError> {
    let label = tracked.name(vocab);
    if !item.has_label(label) {
        return Ok(None);
    }

    let applied_at = item
        .timeline
        .iter()
        .rev()
        .find(|e| e.applied_label() == Some(label))
        .map(TimelineEvent::at);

    match applied_at {
        Some(at) => Ok(Some(SloDuration::from(now - at))),
        None => {
            tracing::warn!(item = %item.item_ref(), %label, "Label present but never applied in timeline");
            Err(SloError::DataIntegrity {
                item: item.item_ref(),
                label: label.clone(),
            })
        }
    }
}
