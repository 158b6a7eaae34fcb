//! Single-elimination support.
//!
//! - [`BracketProjector`] lays out the whole tree up front, with `"TBD"`
//!   teams past round 1, as a planning preview.
//! - [`NextRoundPairer`] turns one round's results into the next round's
//!   fixtures and gives them a simplified schedule.
//!
//! Neither goes through the slot packer: bracket slots are a preview, and
//! round scheduling only honours the daily match cap.

mod advance;
mod bracket;

pub use advance::{NextRound, NextRoundPairer};
pub use bracket::{num_rounds, BracketProjector};
