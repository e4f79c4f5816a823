//! Issue and pull request snapshots.
//!
//! An [`Item`] is everything the SLO computations read about one issue or pull
//! request: when and by whom it was opened, its current labels and draft
//! state, and its timeline. Items are read-only inputs built fresh for each
//! computation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ItemNumber, ItemRef, Login, RepoId};
use super::label::LabelName;
use crate::timeline::Timeline;

/// Whether an item is an issue or a pull request.
///
/// Only pull requests can be drafts, so the draft flag lives here rather than
/// on [`Item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    Issue,
    PullRequest { is_draft: bool },
}

/// A snapshot of an issue or pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub repo: RepoId,
    pub number: ItemNumber,
    pub kind: ItemKind,
    pub created_at: DateTime<Utc>,
    pub author: Login,
    /// Labels currently applied, in the order the tracker listed them.
    pub labels: Vec<LabelName>,
    pub timeline: Timeline,
}

impl Item {
    /// Creates an issue snapshot.
    pub fn issue(
        repo: RepoId,
        number: ItemNumber,
        created_at: DateTime<Utc>,
        author: Login,
        labels: Vec<LabelName>,
        timeline: Timeline,
    ) -> Self {
        Item {
            repo,
            number,
            kind: ItemKind::Issue,
            created_at,
            author,
            labels,
            timeline,
        }
    }

    /// Creates a pull request snapshot.
    pub fn pull_request(
        repo: RepoId,
        number: ItemNumber,
        created_at: DateTime<Utc>,
        author: Login,
        is_draft: bool,
        labels: Vec<LabelName>,
        timeline: Timeline,
    ) -> Self {
        Item {
            repo,
            number,
            kind: ItemKind::PullRequest { is_draft },
            created_at,
            author,
            labels,
            timeline,
        }
    }

    /// Returns true if this is a pull request currently in draft.
    pub fn is_draft(&self) -> bool {
        matches!(self.kind, ItemKind::PullRequest { is_draft: true })
    }

    /// Returns true if the item currently carries `label`.
    pub fn has_label(&self, label: &LabelName) -> bool {
        self.labels.contains(label)
    }

    pub fn item_ref(&self) -> ItemRef {
        ItemRef {
            repo: self.repo.clone(),
            number: self.number,
        }
    }
}
