//! Timeline event types.
//!
//! Each variant is an immutable historical fact about an item, carrying the
//! instant it happened and whatever payload the clock needs from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{LabelName, Login};

/// Where a comment-like event came from.
///
/// All three sources count the same way: a response from whoever wrote them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentSource {
    /// A comment on the conversation tab.
    IssueComment,
    /// A submitted pull request review.
    Review,
    /// A comment inside a review thread.
    ReviewThreadComment,
}

/// A single event from an item's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimelineEvent {
    /// A label was applied.
    Labeled { at: DateTime<Utc>, label: LabelName },

    /// A label was removed.
    Unlabeled { at: DateTime<Utc>, label: LabelName },

    /// A pull request was converted back to a draft.
    ConvertedToDraft { at: DateTime<Utc> },

    /// A draft pull request was marked ready for review.
    ReadyForReview { at: DateTime<Utc> },

    /// The item was closed (for pull requests, merged or not).
    Closed { at: DateTime<Utc> },

    /// The item was reopened.
    Reopened { at: DateTime<Utc> },

    /// Someone commented or reviewed.
    Commented {
        at: DateTime<Utc>,
        author: Login,
        source: CommentSource,
    },
}

impl TimelineEvent {
    /// Returns the instant this event happened.
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            TimelineEvent::Labeled { at, .. }
            | TimelineEvent::Unlabeled { at, .. }
            | TimelineEvent::ConvertedToDraft { at }
            | TimelineEvent::ReadyForReview { at }
            | TimelineEvent::Closed { at }
            | TimelineEvent::Reopened { at }
            | TimelineEvent::Commented { at, .. } => *at,
        }
    }

    /// Returns the label this event applies, if it is a `Labeled` event.
    pub fn applied_label(&self) -> Option<&LabelName> {
        match self {
            TimelineEvent::Labeled { label, .. } => Some(label),
            _ => None,
        }
    }

    /// Short name of the event kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            TimelineEvent::Labeled { .. } => "labeled",
            TimelineEvent::Unlabeled { .. } => "unlabeled",
            TimelineEvent::ConvertedToDraft { .. } => "converted_to_draft",
            TimelineEvent::ReadyForReview { .. } => "ready_for_review",
            TimelineEvent::Closed { .. } => "closed",
            TimelineEvent::Reopened { .. } => "reopened",
            TimelineEvent::Commented { .. } => "commented",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn serde_uses_kind_tag() {
        let event = TimelineEvent::Labeled {
            at: t0(),
            label: LabelName::new("agenda+"),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "labeled",
                "at": "2024-03-01T12:00:00Z",
                "label": "agenda+"
            })
        );
    }

    #[test]
    fn deserializes_comment_events() {
        let json = r#"{
            "kind": "commented",
            "at": "2024-03-01T12:00:00Z",
            "author": "octocat",
            "source": "review_thread_comment"
        }"#;
        let event: TimelineEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            TimelineEvent::Commented {
                at: t0(),
                author: Login::new("octocat"),
                source: CommentSource::ReviewThreadComment,
            }
        );
        assert_eq!(event.at(), t0());
        assert_eq!(event.kind(), "commented");
    }

    #[test]
    fn applied_label_only_for_labeled() {
        let label = LabelName::new("needs edits");
        let labeled = TimelineEvent::Labeled {
            at: t0(),
            label: label.clone(),
        };
        let unlabeled = TimelineEvent::Unlabeled { at: t0(), label };
        assert!(labeled.applied_label().is_some());
        assert!(unlabeled.applied_label().is_none());
    }
}
