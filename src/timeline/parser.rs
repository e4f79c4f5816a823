//! Tracker payload parser.
//!
//! This module parses the GraphQL node of an issue or pull request, including
//! its `timelineItems` connection, into an [`Item`]. The parser is designed to
//! be robust against unknown fields and timeline item types.
//!
//! # Parsing Strategy
//!
//! 1. The item kind is determined from the node's `__typename`
//! 2. Labels and timeline items are read from their `nodes` lists; `null`
//!    nodes are skipped
//! 3. Unknown timeline item types are ignored (not an error)
//! 4. Review threads are flattened into one event per comment, and the
//!    resulting events are stably sorted by instant
//! 5. Malformed payloads return `Err` with details

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::types::{Item, ItemNumber, LabelName, Login, RepoId};

use super::Timeline;
use super::event::{CommentSource, TimelineEvent};

/// Error type for payload parsing failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON deserialization failed (includes missing required fields).
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Field has an invalid value (e.g., an unsupported item type).
    #[error("invalid field value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },
}

/// Parses an issue or pull request node into an [`Item`].
///
/// # Arguments
///
/// * `repo` - The repository the node was fetched from
/// * `payload` - The raw JSON of the GraphQL `Issue` or `PullRequest` node
///
/// # Examples
///
/// ```
/// use slo_clock::timeline::parse_item;
/// use slo_clock::types::RepoId;
///
/// let payload = br#"{
///     "__typename": "Issue",
///     "number": 42,
///     "createdAt": "2024-01-01T00:00:00Z",
///     "author": { "login": "octocat" },
///     "labels": { "nodes": [{ "name": "priority: soon" }] },
///     "timelineItems": { "nodes": [
///         { "__typename": "LabeledEvent",
///           "createdAt": "2024-01-02T00:00:00Z",
///           "label": { "name": "priority: soon" } }
///     ] }
/// }"#;
///
/// let item = parse_item(RepoId::new("owner", "repo"), payload).unwrap();
/// assert_eq!(item.timeline.len(), 1);
/// ```
pub fn parse_item(repo: RepoId, payload: &[u8]) -> Result<Item, ParseError> {
    let raw: RawItem = serde_json::from_slice(payload)?;

    let author = raw
        .author
        .map(|a| Login::new(a.login))
        .unwrap_or_else(|| Login::new(Login::GHOST));

    let labels: Vec<LabelName> = raw
        .labels
        .map(|c| c.nodes.into_iter().flatten().map(|l| LabelName::new(l.name)).collect())
        .unwrap_or_default();

    let mut events = Vec::new();
    if let Some(items) = raw.timeline_items {
        for node in items.nodes.into_iter().flatten() {
            push_events(node, &mut events);
        }
    }

    if !events.is_sorted_by_key(TimelineEvent::at) {
        tracing::debug!(
            repo = %repo,
            number = raw.number,
            events = events.len(),
            "Reordering timeline events by instant"
        );
    }
    let timeline = Timeline::sorted(events);
    let number = ItemNumber(raw.number);

    match raw.typename.as_str() {
        "Issue" => Ok(Item::issue(
            repo,
            number,
            raw.created_at,
            author,
            labels,
            timeline,
        )),
        "PullRequest" => Ok(Item::pull_request(
            repo,
            number,
            raw.created_at,
            author,
            raw.is_draft.unwrap_or(false),
            labels,
            timeline,
        )),
        other => Err(ParseError::InvalidField {
            field: "__typename",
            value: other.to_string(),
        }),
    }
}

/// Converts one timeline node into zero or more events.
fn push_events(node: RawTimelineItem, events: &mut Vec<TimelineEvent>) {
    match node {
        RawTimelineItem::LabeledEvent(e) => events.push(TimelineEvent::Labeled {
            at: e.created_at,
            label: LabelName::new(e.label.name),
        }),
        RawTimelineItem::UnlabeledEvent(e) => events.push(TimelineEvent::Unlabeled {
            at: e.created_at,
            label: LabelName::new(e.label.name),
        }),
        RawTimelineItem::ConvertToDraftEvent(e) => {
            events.push(TimelineEvent::ConvertedToDraft { at: e.created_at })
        }
        RawTimelineItem::ReadyForReviewEvent(e) => {
            events.push(TimelineEvent::ReadyForReview { at: e.created_at })
        }
        RawTimelineItem::ClosedEvent(e) => events.push(TimelineEvent::Closed { at: e.created_at }),
        RawTimelineItem::ReopenedEvent(e) => {
            events.push(TimelineEvent::Reopened { at: e.created_at })
        }
        RawTimelineItem::IssueComment(c) => {
            push_comment(c.author, c.created_at, CommentSource::IssueComment, events)
        }
        RawTimelineItem::PullRequestReview(r) => {
            // Pending reviews have no submission time yet.
            let at = r.submitted_at.unwrap_or(r.created_at);
            push_comment(r.author, at, CommentSource::Review, events)
        }
        RawTimelineItem::PullRequestReviewThread(t) => {
            for c in t.comments.nodes.into_iter().flatten() {
                push_comment(
                    c.author,
                    c.created_at,
                    CommentSource::ReviewThreadComment,
                    events,
                );
            }
        }
        RawTimelineItem::Other => {}
    }
}

/// Records a comment-like event. Comments from deleted accounts are dropped
/// since they can never match the item's author.
fn push_comment(
    author: Option<RawActor>,
    at: DateTime<Utc>,
    source: CommentSource,
    events: &mut Vec<TimelineEvent>,
) {
    if let Some(author) = author {
        events.push(TimelineEvent::Commented {
            at,
            author: Login::new(author.login),
            source,
        });
    }
}

// ============================================================================
// Raw payload structures for deserialization
//
// These match the tracker's GraphQL JSON structure. Connections are read
// through their `nodes` list only; pagination is the fetcher's concern.
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
    #[serde(rename = "__typename")]
    typename: String,
    number: u64,
    created_at: DateTime<Utc>,
    author: Option<RawActor>,
    #[serde(default)]
    is_draft: Option<bool>,
    #[serde(default)]
    labels: Option<RawConnection<RawLabel>>,
    #[serde(default)]
    timeline_items: Option<RawConnection<RawTimelineItem>>,
}

#[derive(Debug, Deserialize)]
struct RawConnection<T> {
    nodes: Vec<Option<T>>,
}

#[derive(Debug, Deserialize)]
struct RawActor {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RawLabel {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "__typename")]
enum RawTimelineItem {
    LabeledEvent(RawLabelEvent),
    UnlabeledEvent(RawLabelEvent),
    ConvertToDraftEvent(RawStateEvent),
    ReadyForReviewEvent(RawStateEvent),
    ClosedEvent(RawStateEvent),
    ReopenedEvent(RawStateEvent),
    IssueComment(RawComment),
    PullRequestReview(RawReview),
    PullRequestReviewThread(RawReviewThread),
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLabelEvent {
    created_at: DateTime<Utc>,
    label: RawLabel,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStateEvent {
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawComment {
    created_at: DateTime<Utc>,
    author: Option<RawActor>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReview {
    created_at: DateTime<Utc>,
    #[serde(default)]
    submitted_at: Option<DateTime<Utc>>,
    author: Option<RawActor>,
}

#[derive(Debug, Deserialize)]
struct RawReviewThread {
    comments: RawConnection<RawComment>,
}
