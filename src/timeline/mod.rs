//! Item timelines.
//!
//! A [`Timeline`] is an item's event history, oldest first. Construction checks
//! that instants never decrease, so code replaying a timeline can rely on
//! chronological order without re-sorting.

pub mod event;
pub mod parser;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use event::{CommentSource, TimelineEvent};
pub use parser::{ParseError, parse_item};

/// Error returned when a timeline is not in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimelineError {
    #[error("timeline event {index} at {current} precedes the previous event at {previous}")]
    OutOfOrder {
        index: usize,
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },
}

/// A chronologically ordered sequence of timeline events.
///
/// Events with equal instants keep the order they were given in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<TimelineEvent>", into = "Vec<TimelineEvent>")]
pub struct Timeline {
    events: Vec<TimelineEvent>,
}

impl Timeline {
    /// Creates a timeline, rejecting events whose instants decrease.
    pub fn new(events: Vec<TimelineEvent>) -> Result<Self, TimelineError> {
        for (index, pair) in events.windows(2).enumerate() {
            let (previous, current) = (pair[0].at(), pair[1].at());
            if current < previous {
                return Err(TimelineError::OutOfOrder {
                    index: index + 1,
                    previous,
                    current,
                });
            }
        }
        Ok(Timeline { events })
    }

    /// Creates a timeline from events in any order.
    ///
    /// The sort is stable, so events sharing an instant keep their relative
    /// order.
    pub fn sorted(mut events: Vec<TimelineEvent>) -> Self {
        events.sort_by_key(TimelineEvent::at);
        Timeline { events }
    }

    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimelineEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl TryFrom<Vec<TimelineEvent>> for Timeline {
    type Error = TimelineError;

    fn try_from(events: Vec<TimelineEvent>) -> Result<Self, Self::Error> {
        Timeline::new(events)
    }
}

impl From<Timeline> for Vec<TimelineEvent> {
    fn from(timeline: Timeline) -> Self {
        timeline.events
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelineEvent;
    type IntoIter = std::slice::Iter<'a, TimelineEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn at(hours: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + TimeDelta::hours(hours)
    }

    #[test]
    fn accepts_ordered_and_equal_instants() {
        let timeline = Timeline::new(vec![
            TimelineEvent::Closed { at: at(1) },
            TimelineEvent::Reopened { at: at(1) },
            TimelineEvent::Closed { at: at(2) },
        ])
        .unwrap();
        assert_eq!(timeline.len(), 3);
    }

    #[test]
    fn rejects_decreasing_instants() {
        let err = Timeline::new(vec![
            TimelineEvent::Closed { at: at(5) },
            TimelineEvent::Reopened { at: at(6) },
            TimelineEvent::Closed { at: at(4) },
        ])
        .unwrap_err();
        assert_eq!(
            err,
            TimelineError::OutOfOrder {
                index: 2,
                previous: at(6),
                current: at(4),
            }
        );
    }

    #[test]
    fn sorted_is_stable() {
        let timeline = Timeline::sorted(vec![
            TimelineEvent::Reopened { at: at(3) },
            TimelineEvent::Closed { at: at(1) },
            TimelineEvent::ConvertedToDraft { at: at(1) },
        ]);
        let kinds: Vec<_> = timeline.iter().map(TimelineEvent::kind).collect();
        assert_eq!(kinds, ["closed", "converted_to_draft", "reopened"]);
    }

    #[test]
    fn deserialization_validates_order() {
        let json = r#"[
            {"kind": "closed", "at": "2024-01-02T00:00:00Z"},
            {"kind": "reopened", "at": "2024-01-01T00:00:00Z"}
        ]"#;
        assert!(serde_json::from_str::<Timeline>(json).is_err());
    }
}
