//! Schedule (solution) model.
//!
//! A schedule is the flattened list of placed matches in slot order,
//! followed by any matches forced in by the termination fallback.
//! Each placement keeps the slot index and calendar day it was made
//! for, so it can be audited without re-parsing labels.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Fixture;

/// A fixture with an assigned slot and venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMatch {
    /// Display string, `"<team1> vs <team2>"`.
    #[serde(rename = "match")]
    pub label: String,
    /// The placed fixture.
    #[serde(flatten)]
    pub fixture: Fixture,
    /// Slot label, optionally date-qualified.
    pub time_slot: String,
    /// Assigned venue.
    pub venue: String,
    /// Placed by the termination fallback: constraints not guaranteed.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
    /// Global slot index the match was placed in.
    #[serde(skip)]
    pub slot_index: usize,
    /// Calendar day of the slot.
    #[serde(skip)]
    pub day: usize,
}

impl ScheduledMatch {
    /// Creates a placement for a fixture.
    pub fn new(
        fixture: Fixture,
        time_slot: impl Into<String>,
        venue: impl Into<String>,
        slot_index: usize,
        day: usize,
    ) -> Self {
        Self {
            label: fixture.label(),
            fixture,
            time_slot: time_slot.into(),
            venue: venue.into(),
            fallback: false,
            slot_index,
            day,
        }
    }

    /// Marks the placement as forced by the fallback.
    pub fn as_fallback(mut self) -> Self {
        self.fallback = true;
        self
    }

    /// First team.
    #[inline]
    pub fn team1(&self) -> &str {
        &self.fixture.team1
    }

    /// Second team.
    #[inline]
    pub fn team2(&self) -> &str {
        &self.fixture.team2
    }

    /// Whether the given team plays in this match.
    pub fn involves(&self, team: &str) -> bool {
        self.fixture.involves(team)
    }
}

/// A complete fixture schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    /// Placements in output order.
    pub matches: Vec<ScheduledMatch>,
}

/// A constraint violation found when auditing a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity (team, venue, or matchup).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A team plays twice in one slot.
    TeamDoubleBooked,
    /// A venue hosts two matches in one slot.
    VenueDoubleBooked,
    /// A team plays again before its rest gap elapsed.
    RestGap,
    /// A venue is reused before its rest gap elapsed.
    VenueRestGap,
    /// The same two teams meet again too soon.
    MatchupGap,
    /// An input fixture is missing from, or duplicated in, the output.
    Coverage,
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a placement.
    pub fn push(&mut self, placed: ScheduledMatch) {
        self.matches.push(placed);
    }

    /// Number of placed matches.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether nothing was placed.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Matches played by a team, in output order.
    pub fn matches_for_team(&self, team: &str) -> Vec<&ScheduledMatch> {
        self.matches.iter().filter(|m| m.involves(team)).collect()
    }

    /// Matches hosted by a venue, in output order.
    pub fn matches_for_venue(&self, venue: &str) -> Vec<&ScheduledMatch> {
        self.matches.iter().filter(|m| m.venue == venue).collect()
    }

    /// Matches sharing a slot label.
    pub fn matches_in_slot(&self, time_slot: &str) -> Vec<&ScheduledMatch> {
        self.matches
            .iter()
            .filter(|m| m.time_slot == time_slot)
            .collect()
    }

    /// Matches that were forced in by the fallback.
    pub fn fallback_matches(&self) -> impl Iterator<Item = &ScheduledMatch> {
        self.matches.iter().filter(|m| m.fallback)
    }

    /// Number of fallback placements.
    pub fn fallback_count(&self) -> usize {
        self.fallback_matches().count()
    }

    /// Last calendar day used, if any.
    pub fn last_day(&self) -> Option<usize> {
        self.matches.iter().map(|m| m.day).max()
    }

    /// Match counts per venue.
    pub fn venue_usage(&self) -> BTreeMap<String, usize> {
        let mut usage = BTreeMap::new();
        for m in &self.matches {
            *usage.entry(m.venue.clone()).or_insert(0) += 1;
        }
        usage
    }
}
