//! SLO tier classification.
//!
//! An item's tier decides whether it is on an SLO clock at all and, if so,
//! which labels keep that clock running:
//!
//! - `None`: not subject to timed tracking
//! - `Triage`: waiting for an initial priority
//! - `Soon`: accepts `priority: soon` or `priority: urgent`
//! - `Urgent`: accepts only `priority: urgent`

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::types::{Item, LabelName, LabelVocabulary};

use super::policy::TriagePolicy;

/// The SLO category that applies to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SloTier {
    None,
    Triage,
    Soon,
    Urgent,
}

impl SloTier {
    /// Returns true if the item is subject to an SLO clock.
    pub fn is_tracked(&self) -> bool {
        !matches!(self, SloTier::None)
    }

    /// Returns true if `active_labels` currently satisfy this tier.
    ///
    /// `None` is never satisfied and `Triage` always is: an untriaged item has
    /// nothing further to wait for.
    pub fn satisfied_by(&self, active_labels: &HashSet<LabelName>, vocab: &LabelVocabulary) -> bool {
        match self {
            SloTier::None => false,
            SloTier::Triage => true,
            SloTier::Soon => {
                active_labels.contains(&vocab.soon) || active_labels.contains(&vocab.urgent)
            }
            SloTier::Urgent => active_labels.contains(&vocab.urgent),
        }
    }
}

impl fmt::Display for SloTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SloTier::None => "none",
            SloTier::Triage => "triage",
            SloTier::Soon => "soon",
            SloTier::Urgent => "urgent",
        };
        write!(f, "{}", name)
    }
}

/// Classifies an item by its current labels and draft state.
///
/// The first matching rule wins:
/// 1. Drafts and items awaiting reporter feedback are `None`
/// 2. `priority: urgent` gives `Urgent`
/// 3. `priority: soon` gives `Soon`
/// 4. `priority: eventually`, or the repository's own triage predicate, gives `None`
/// 5. Everything else needs `Triage`
pub fn classify(item: &Item, policy: &dyn TriagePolicy, vocab: &LabelVocabulary) -> SloTier {
    if item.is_draft() || item.has_label(&vocab.needs_feedback) {
        SloTier::None
    } else if item.has_label(&vocab.urgent) {
        SloTier::Urgent
    } else if item.has_label(&vocab.soon) {
        SloTier::Soon
    } else if item.has_label(&vocab.eventually) || policy.is_triaged(item) {
        SloTier::None
    } else {
        SloTier::Triage
    }
}
