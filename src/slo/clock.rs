//! The SLO clock.
//!
//! Replays an item's timeline to find how long it has been "on the clock":
//! the total time during which no pause reason was active, from creation up to
//! the evaluation instant.
//!
//! # Pausing
//!
//! The clock tracks a set of [`PauseReason`]s. It runs only while the set is
//! empty; which reasons are present, and how many, doesn't matter for time
//! accounting. Adding a reason already present or removing an absent one never
//! moves the clock.
//!
//! # Draft rebasing
//!
//! The first `ready_for_review` event discards all time accumulated so far,
//! provided no earlier draft-status change was seen. A pull request opened as
//! a draft therefore starts its clock when it is first marked ready, not when
//! it was opened. Later `ready_for_review` events do not rebase.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

use crate::timeline::TimelineEvent;
use crate::types::{Item, LabelName, LabelVocabulary, Login, SloDuration};

use super::tier::SloTier;

/// A condition that stops the SLO clock while it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PauseReason {
    /// The pull request is a draft.
    Draft,

    /// Waiting on the reporter to respond.
    NeedFeedback,

    /// The item is closed.
    Closed,

    /// The active labels don't satisfy the item's tier.
    NoSloLabel,
}

impl fmt::Display for PauseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PauseReason::Draft => "draft",
            PauseReason::NeedFeedback => "need-feedback",
            PauseReason::Closed => "closed",
            PauseReason::NoSloLabel => "no-slo-label",
        };
        write!(f, "{}", name)
    }
}

/// Returns how long `item` has been on the SLO clock for `tier`, as of `now`.
///
/// The tier is normally the result of [`classify`](super::classify) on the
/// item's current state; it is applied to the whole history.
pub fn accumulate_running_time(
    item: &Item,
    now: DateTime<Utc>,
    tier: SloTier,
    vocab: &LabelVocabulary,
) -> SloDuration {
    let mut clock = ClockState::new(item, tier, vocab);
    for event in &item.timeline {
        clock.apply(event);
    }
    clock.finish(now)
}

/// Replay state for a single computation.
struct ClockState<'a> {
    tier: SloTier,
    vocab: &'a LabelVocabulary,
    author: &'a Login,
    accumulated: TimeDelta,
    segment_start: DateTime<Utc>,
    paused: BTreeSet<PauseReason>,
    active_labels: HashSet<LabelName>,
    draft_changed: bool,
}

impl<'a> ClockState<'a> {
    fn new(item: &'a Item, tier: SloTier, vocab: &'a LabelVocabulary) -> Self {
        let mut state = ClockState {
            tier,
            vocab,
            author: &item.author,
            accumulated: TimeDelta::zero(),
            segment_start: item.created_at,
            paused: BTreeSet::new(),
            active_labels: HashSet::new(),
            draft_changed: false,
        };
        // Labels are rebuilt from the timeline, so replay starts with none.
        if !state.tier_satisfied() {
            state.paused.insert(PauseReason::NoSloLabel);
        }
        state
    }

    fn tier_satisfied(&self) -> bool {
        self.tier.satisfied_by(&self.active_labels, self.vocab)
    }

    fn apply(&mut self, event: &TimelineEvent) {
        let at = event.at();
        match event {
            TimelineEvent::ReadyForReview { .. } => {
                if !self.draft_changed {
                    tracing::debug!(
                        %at,
                        discarded = %SloDuration::from(self.accumulated),
                        "First ready-for-review; restarting clock"
                    );
                    self.accumulated = TimeDelta::zero();
                    self.segment_start = at;
                }
                self.draft_changed = true;
                self.unpause(PauseReason::Draft, at);
            }
            TimelineEvent::ConvertedToDraft { .. } => {
                self.draft_changed = true;
                self.pause(PauseReason::Draft, at);
            }
            TimelineEvent::Labeled { label, .. } => {
                self.active_labels.insert(label.clone());
                if *label == self.vocab.needs_feedback {
                    self.pause(PauseReason::NeedFeedback, at);
                }
                if self.tier_satisfied() {
                    self.unpause(PauseReason::NoSloLabel, at);
                }
            }
            TimelineEvent::Unlabeled { label, .. } => {
                self.active_labels.remove(label);
                if *label == self.vocab.needs_feedback {
                    self.unpause(PauseReason::NeedFeedback, at);
                }
                if !self.tier_satisfied() {
                    self.pause(PauseReason::NoSloLabel, at);
                }
            }
            TimelineEvent::Closed { .. } => self.pause(PauseReason::Closed, at),
            TimelineEvent::Reopened { .. } => self.unpause(PauseReason::Closed, at),
            TimelineEvent::Commented { author, .. } => {
                // Feedback labels often stay applied after the reporter replies.
                if author == self.author {
                    self.unpause(PauseReason::NeedFeedback, at);
                }
            }
        }
    }

    fn pause(&mut self, reason: PauseReason, at: DateTime<Utc>) {
        if self.paused.is_empty() {
            self.accumulated += elapsed(self.segment_start, at);
        }
        if self.paused.insert(reason) {
            tracing::trace!(%reason, %at, paused = self.paused.len(), "Clock paused");
        }
    }

    fn unpause(&mut self, reason: PauseReason, at: DateTime<Utc>) {
        if self.paused.remove(&reason) {
            tracing::trace!(%reason, %at, paused = self.paused.len(), "Pause reason cleared");
            if self.paused.is_empty() {
                self.segment_start = at;
            }
        }
    }

    fn finish(mut self, now: DateTime<Utc>) -> SloDuration {
        if self.paused.is_empty() {
            self.accumulated += elapsed(self.segment_start, now);
        }
        SloDuration::from(self.accumulated)
    }
}

/// Time from `start` to `end`, never negative.
fn elapsed(start: DateTime<Utc>, end: DateTime<Utc>) -> TimeDelta {
    (end - start).max(TimeDelta::zero())
}
