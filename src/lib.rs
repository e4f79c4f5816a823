//! SLO Clock - service-level-objective time accounting for issue tracker items.
//!
//! This library decides which SLO tier applies to an issue or pull request and
//! replays its timeline to find how long it has been "on the clock", pausing
//! while the item is a draft, awaiting reporter feedback, closed, or missing a
//! qualifying priority label.

pub mod error;
pub mod slo;
pub mod timeline;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use error::SloError;
