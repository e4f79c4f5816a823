//! SLO computations.
//!
//! - [`classify`] decides which tier applies to an item
//! - [`accumulate_running_time`] replays the timeline to find time on the clock
//! - [`time_since_label_applied`] measures how long a tracked label has been applied
//! - [`summarize`] combines all three for one item
//!
//! Every computation is a pure function of its inputs. State lives only for
//! the duration of one call, so callers may evaluate items in parallel.

pub mod clock;
pub mod label_age;
pub mod policy;
pub mod summary;
pub mod tier;

pub use clock::{PauseReason, accumulate_running_time};
pub use label_age::{TrackedLabel, time_since_label_applied};
pub use policy::{ConfigError, DefaultTriagePolicy, RepoRules, RepoTriageConfig, TriagePolicy};
pub use summary::{ItemSummary, summarize};
pub use tier::{SloTier, classify};
