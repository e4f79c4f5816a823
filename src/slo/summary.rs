//! Per-item SLO summary.
//!
//! Combines tier classification, the SLO clock, and tracked label ages into a
//! single result for one item.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::SloError;
use crate::types::{Item, ItemRef, LabelVocabulary, SloDuration};

use super::clock::accumulate_running_time;
use super::label_age::{TrackedLabel, time_since_label_applied};
use super::policy::TriagePolicy;
use super::tier::{SloTier, classify};

/// SLO state of one item at an evaluation instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSummary {
    pub item: ItemRef,
    pub tier: SloTier,
    /// Time on the SLO clock; `None` when the item isn't tracked.
    pub on_clock: Option<SloDuration>,
    /// Age of each tracked label the item currently carries.
    pub label_ages: BTreeMap<TrackedLabel, SloDuration>,
}

/// Evaluates `item` as of `now`.
///
/// Items in repositories that don't use label-based triage get tier `None`.
///
/// # Errors
///
/// Fails with the first [`SloError::DataIntegrity`] found among the tracked
/// labels.
pub fn summarize(
    item: &Item,
    policy: &dyn TriagePolicy,
    vocab: &LabelVocabulary,
    now: DateTime<Utc>,
) -> Result<ItemSummary, SloError> {
    let tier = if policy.uses_label_triage(&item.repo) {
        classify(item, policy, vocab)
    } else {
        SloTier::None
    };

    let on_clock = tier
        .is_tracked()
        .then(|| accumulate_running_time(item, now, tier, vocab));

    let mut label_ages = BTreeMap::new();
    for tracked in TrackedLabel::ALL {
        if let Some(age) = time_since_label_applied(item, tracked, vocab, now)? {
            label_ages.insert(tracked, age);
        }
    }

    tracing::debug!(item = %item.item_ref(), %tier, "Summarized item");

    Ok(ItemSummary {
        item: item.item_ref(),
        tier,
        on_clock,
        label_ages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slo::policy::{DefaultTriagePolicy, RepoTriageConfig};
    use crate::test_utils::{closed, day, issue, labeled, with_timeline};
    use chrono::TimeDelta;

    #[test]
    fn untriaged_issue_is_on_clock() {
        let item = with_timeline(
            issue(&["agenda+"]),
            vec![labeled(day(4), "agenda+"), closed(day(6))],
        );
        let summary =
            summarize(&item, &DefaultTriagePolicy, &LabelVocabulary::default(), day(10)).unwrap();

        assert_eq!(summary.tier, SloTier::Triage);
        assert_eq!(summary.on_clock.map(|d| d.total()), Some(TimeDelta::days(6)));
        assert_eq!(
            summary.label_ages.get(&TrackedLabel::Agenda).map(|d| d.total()),
            Some(TimeDelta::days(6))
        );
        assert!(!summary.label_ages.contains_key(&TrackedLabel::NeedsEdits));
    }

    #[test]
    fn untracked_tier_has_no_clock() {
        let item = with_timeline(
            issue(&["priority: eventually"]),
            vec![labeled(day(3), "priority: eventually")],
        );
        let summary =
            summarize(&item, &DefaultTriagePolicy, &LabelVocabulary::default(), day(10)).unwrap();
        assert_eq!(summary.tier, SloTier::None);
        assert_eq!(summary.on_clock, None);
    }

    #[test]
    fn repos_without_label_triage_are_untracked() {
        let config: RepoTriageConfig = serde_json::from_value(serde_json::json!({
            "repos": { "whatwg/html": { "label_triage": false } }
        }))
        .unwrap();
        let item = issue(&["priority: urgent"]);
        let summary = summarize(&item, &config, &LabelVocabulary::default(), day(10)).unwrap();
        assert_eq!(summary.tier, SloTier::None);
        assert_eq!(summary.on_clock, None);
    }

    #[test]
    fn data_integrity_fault_propagates() {
        let item = issue(&["needs edits"]);
        let err = summarize(&item, &DefaultTriagePolicy, &LabelVocabulary::default(), day(10))
            .unwrap_err();
        assert!(matches!(err, SloError::DataIntegrity { .. }));
    }

    #[test]
    fn serializes_to_json() {
        let item = issue(&[]);
        let summary =
            summarize(&item, &DefaultTriagePolicy, &LabelVocabulary::default(), day(2)).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["tier"], "triage");
        assert_eq!(json["on_clock"]["days"], 2);
        assert_eq!(json["item"]["number"], 1);
    }
}
