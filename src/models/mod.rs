//! Fixture scheduling domain models.
//!
//! Provides the data types shared by match generation, the slot packer,
//! and the knockout projector.
//!
//! # Domain Mappings
//!
//! | u-fixture | Scheduling analogue |
//! |-----------|--------------------|
//! | Fixture | Task to place |
//! | Team | Resource that needs rest between uses |
//! | Venue | Resource with one unit per slot |
//! | Slot | Discrete time bucket (day × template) |
//! | Schedule | Assignment list |

mod bracket;
mod calendar;
mod constraint;
mod fixture;
mod participant;
mod schedule;

pub use bracket::{Bracket, BracketMatch, BracketRound, Feeder, FromMatches, MatchResult, RoundMatch};
pub use calendar::{
    date_after, parse_start_date, round_template, Slot, SlotCalendar, DEFAULT_ROUND_SLOT,
    DEFAULT_SLOT,
};
pub use constraint::Constraints;
pub use fixture::{Fixture, Matchup};
pub use participant::{is_bye, Team, Venue, BYE, TBD};
pub use schedule::{Schedule, ScheduledMatch, Violation, ViolationType};
