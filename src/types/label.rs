//! Label names and the recognised label vocabulary.
//!
//! The tracker treats label names case-insensitively, so [`LabelName`] keeps
//! the spelling it was given for display but compares and hashes by its
//! lowercased form.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A label name, compared case-insensitively.
#[derive(Debug, Clone)]
pub struct LabelName {
    display: String,
    key: String,
}

impl LabelName {
    pub fn new(name: impl Into<String>) -> Self {
        let display = name.into();
        let key = display.to_lowercase();
        LabelName { display, key }
    }

    /// Returns the name as originally spelled.
    pub fn as_str(&self) -> &str {
        &self.display
    }

    /// Returns the lowercased form used for comparison.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for LabelName {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for LabelName {}

impl Hash for LabelName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for LabelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display)
    }
}

impl From<&str> for LabelName {
    fn from(s: &str) -> Self {
        LabelName::new(s)
    }
}

impl From<String> for LabelName {
    fn from(s: String) -> Self {
        LabelName::new(s)
    }
}

impl Serialize for LabelName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display)
    }
}

impl<'de> Deserialize<'de> for LabelName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(LabelName::new)
    }
}

/// The label names that drive tier decisions and label-age tracking.
///
/// Passed explicitly to every computation rather than read from globals, so a
/// repository that spells its labels differently can supply its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelVocabulary {
    pub urgent: LabelName,
    pub soon: LabelName,
    pub eventually: LabelName,
    pub needs_feedback: LabelName,
    pub agenda: LabelName,
    pub needs_edits: LabelName,
}

impl Default for LabelVocabulary {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelVocabulary {
    /// Creates the vocabulary with the standard label names.
    pub fn new() -> Self {
        LabelVocabulary {
            urgent: LabelName::new("priority: urgent"),
            soon: LabelName::new("priority: soon"),
            eventually: LabelName::new("priority: eventually"),
            needs_feedback: LabelName::new("needs reporter feedback"),
            agenda: LabelName::new("agenda+"),
            needs_edits: LabelName::new("needs edits"),
        }
    }
}
