//! Shared test fixtures and arbitrary generators for property-based testing.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;

use crate::timeline::{CommentSource, Timeline, TimelineEvent};
use crate::types::{Item, ItemNumber, LabelName, Login, RepoId};

/// Author of every fixture item.
pub const AUTHOR: &str = "alice";

/// Returns the instant `n` days after fixture items are created.
pub fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + TimeDelta::days(n)
}

fn labels(names: &[&str]) -> Vec<LabelName> {
    names.iter().map(|n| LabelName::new(*n)).collect()
}

/// An issue #1 in whatwg/html created at `day(0)` by `AUTHOR`.
pub fn issue(names: &[&str]) -> Item {
    Item::issue(
        RepoId::new("whatwg", "html"),
        ItemNumber(1),
        day(0),
        Login::new(AUTHOR),
        labels(names),
        Timeline::default(),
    )
}

/// A pull request #2 in whatwg/html created at `day(0)` by `AUTHOR`.
pub fn pull_request(is_draft: bool, names: &[&str]) -> Item {
    Item::pull_request(
        RepoId::new("whatwg", "html"),
        ItemNumber(2),
        day(0),
        Login::new(AUTHOR),
        is_draft,
        labels(names),
        Timeline::default(),
    )
}

/// Replaces the item's timeline. Panics if `events` are out of order.
pub fn with_timeline(mut item: Item, events: Vec<TimelineEvent>) -> Item {
    item.timeline = Timeline::new(events).unwrap();
    item
}

pub fn labeled(at: DateTime<Utc>, name: &str) -> TimelineEvent {
    TimelineEvent::Labeled {
        at,
        label: LabelName::new(name),
    }
}

pub fn unlabeled(at: DateTime<Utc>, name: &str) -> TimelineEvent {
    TimelineEvent::Unlabeled {
        at,
        label: LabelName::new(name),
    }
}

pub fn closed(at: DateTime<Utc>) -> TimelineEvent {
    TimelineEvent::Closed { at }
}

pub fn reopened(at: DateTime<Utc>) -> TimelineEvent {
    TimelineEvent::Reopened { at }
}

pub fn ready_for_review(at: DateTime<Utc>) -> TimelineEvent {
    TimelineEvent::ReadyForReview { at }
}

pub fn converted_to_draft(at: DateTime<Utc>) -> TimelineEvent {
    TimelineEvent::ConvertedToDraft { at }
}

pub fn commented(at: DateTime<Utc>, author: &str) -> TimelineEvent {
    TimelineEvent::Commented {
        at,
        author: Login::new(author),
        source: CommentSource::IssueComment,
    }
}

/// The kind of an event, without its instant.
#[derive(Debug, Clone)]
enum EventKind {
    Labeled(&'static str),
    Unlabeled(&'static str),
    ConvertedToDraft,
    ReadyForReview,
    Closed,
    Reopened,
    Commented(&'static str),
}

impl EventKind {
    fn at(self, at: DateTime<Utc>) -> TimelineEvent {
        match self {
            EventKind::Labeled(name) => labeled(at, name),
            EventKind::Unlabeled(name) => unlabeled(at, name),
            EventKind::ConvertedToDraft => converted_to_draft(at),
            EventKind::ReadyForReview => ready_for_review(at),
            EventKind::Closed => closed(at),
            EventKind::Reopened => reopened(at),
            EventKind::Commented(author) => commented(at, author),
        }
    }
}

pub fn arb_label_name() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("priority: urgent"),
        Just("Priority: Soon"),
        Just("priority: eventually"),
        Just("needs reporter feedback"),
        Just("agenda+"),
        Just("needs edits"),
        Just("unrelated"),
    ]
}

fn arb_author() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(AUTHOR), Just("bob")]
}

fn arb_event_kind() -> impl Strategy<Value = EventKind> {
    prop_oneof![
        arb_label_name().prop_map(EventKind::Labeled),
        arb_label_name().prop_map(EventKind::Unlabeled),
        Just(EventKind::ConvertedToDraft),
        Just(EventKind::ReadyForReview),
        Just(EventKind::Closed),
        Just(EventKind::Reopened),
        arb_author().prop_map(EventKind::Commented),
    ]
}

/// Lays out kinds at non-decreasing instants starting from `day(0)`.
fn place(steps: Vec<(i64, EventKind)>) -> Vec<TimelineEvent> {
    let mut at = day(0);
    steps
        .into_iter()
        .map(|(gap_hours, kind)| {
            at += TimeDelta::hours(gap_hours);
            kind.at(at)
        })
        .collect()
}

/// Any chronologically ordered timeline of up to 20 events.
pub fn arb_timeline() -> impl Strategy<Value = Vec<TimelineEvent>> {
    prop::collection::vec((0i64..200, arb_event_kind()), 0..20).prop_map(place)
}

/// Timelines that never pause a `Triage` clock: no draft toggles, closes or
/// feedback labels.
pub fn arb_quiet_events() -> impl Strategy<Value = Vec<TimelineEvent>> {
    let kind = prop_oneof![
        prop_oneof![Just("agenda+"), Just("needs edits"), Just("priority: soon")]
            .prop_map(EventKind::Labeled),
        prop_oneof![Just("agenda+"), Just("needs edits")].prop_map(EventKind::Unlabeled),
        arb_author().prop_map(EventKind::Commented),
    ];
    prop::collection::vec((0i64..200, kind), 0..12).prop_map(place)
}
