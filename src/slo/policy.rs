//! Per-repository triage rules.
//!
//! Repositories differ in whether they use label-based triage at all, and in
//! what counts as "already triaged" beyond the priority labels. Those rules
//! come from a [`TriagePolicy`]; [`RepoTriageConfig`] is the
//! configuration-file implementation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::types::{Item, LabelName, RepoId};

/// Environment variable naming the triage configuration file.
pub const CONFIG_ENV_VAR: &str = "SLO_CLOCK_CONFIG";

/// Repository-specific triage rules consulted during classification.
pub trait TriagePolicy {
    /// Returns true if `repo` relies on label-based triage.
    ///
    /// Repositories that don't are not tracked against any SLO.
    fn uses_label_triage(&self, _repo: &RepoId) -> bool {
        true
    }

    /// Returns true if the repository considers `item` already triaged even
    /// though it carries no priority label.
    fn is_triaged(&self, _item: &Item) -> bool {
        false
    }
}

/// Policy with no repository-specific rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTriagePolicy;

impl TriagePolicy for DefaultTriagePolicy {}

/// Error loading triage configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Triage rules for one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoRules {
    /// Whether the repository uses label-based triage.
    pub label_triage: bool,

    /// Labels that mark an item as triaged.
    pub triaged_labels: Vec<LabelName>,
}

impl Default for RepoRules {
    fn default() -> Self {
        RepoRules {
            label_triage: true,
            triaged_labels: Vec::new(),
        }
    }
}

/// Triage rules keyed by repository (`owner/repo`).
///
/// ```json
/// { "repos": { "whatwg/html": { "triaged_labels": ["spec"] } } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoTriageConfig {
    pub repos: BTreeMap<String, RepoRules>,
}

impl RepoTriageConfig {
    /// Creates an empty configuration: every repository gets default rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
            path: display,
            source,
        })
    }

    /// Loads configuration from the file named by `SLO_CLOCK_CONFIG`.
    ///
    /// Returns the empty configuration when the variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::new()),
        }
    }

    /// Returns the rules for `repo`, if any are configured.
    pub fn rules(&self, repo: &RepoId) -> Option<&RepoRules> {
        self.repos.get(&repo.to_string())
    }
}

impl TriagePolicy for RepoTriageConfig {
    fn uses_label_triage(&self, repo: &RepoId) -> bool {
        self.rules(repo).is_none_or(|r| r.label_triage)
    }

    fn is_triaged(&self, item: &Item) -> bool {
        self.rules(&item.repo)
            .is_some_and(|r| r.triaged_labels.iter().any(|l| item.has_label(l)))
    }
}
