//! Allocator state carried across slots.
//!
//! Every counter is an explicit map behind an accessor that returns the
//! zero/absent default, so reads never insert. The whole state belongs to
//! one packing run and is dropped with it.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::{Fixture, Matchup, Schedule, ScheduledMatch, Slot};

/// A successful placement decision.
///
/// Returned by the packer's check instead of annotating the candidate
/// fixture, then folded into [`AllocatorState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// The placed fixture.
    pub fixture: Fixture,
    /// Slot index.
    pub slot_index: usize,
    /// Calendar day of the slot.
    pub day: usize,
    /// Slot label.
    pub time_slot: String,
    /// Chosen venue.
    pub venue: String,
}

impl Placement {
    /// Creates a placement of `fixture` into `slot` at `venue`.
    pub fn new(fixture: Fixture, slot: &Slot, venue: impl Into<String>) -> Self {
        Self {
            fixture,
            slot_index: slot.index,
            day: slot.day,
            time_slot: slot.label.clone(),
            venue: venue.into(),
        }
    }

    /// Converts into the output record.
    pub fn into_scheduled(self) -> ScheduledMatch {
        ScheduledMatch::new(
            self.fixture,
            self.time_slot,
            self.venue,
            self.slot_index,
            self.day,
        )
    }
}

/// What has been placed in one slot.
#[derive(Debug, Clone, Default)]
pub struct SlotState {
    teams: HashSet<String>,
    venues: HashSet<String>,
    matches: Vec<ScheduledMatch>,
}

impl SlotState {
    /// Placed matches, in placement order.
    pub fn matches(&self) -> &[ScheduledMatch] {
        &self.matches
    }
}

/// Constraint state for one packing run.
#[derive(Debug, Clone, Default)]
pub struct AllocatorState {
    team_last_day: HashMap<String, usize>,
    team_day_matches: HashMap<String, HashMap<usize, u32>>,
    venue_last_used: HashMap<String, usize>,
    venue_totals: HashMap<String, u32>,
    matchup_last_day: HashMap<Matchup, usize>,
    day_totals: HashMap<usize, u32>,
    slots: BTreeMap<usize, SlotState>,
    rotation: usize,
}

impl AllocatorState {
    /// Creates empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent day the team played.
    pub fn team_last_day(&self, team: &str) -> Option<usize> {
        self.team_last_day.get(team).copied()
    }

    /// Matches the team has on a day.
    pub fn team_matches_on(&self, team: &str, day: usize) -> u32 {
        self.team_day_matches
            .get(team)
            .and_then(|days| days.get(&day))
            .copied()
            .unwrap_or(0)
    }

    /// Most recent day the venue hosted a match.
    pub fn venue_last_used(&self, venue: &str) -> Option<usize> {
        self.venue_last_used.get(venue).copied()
    }

    /// Matches hosted by the venue so far.
    pub fn venue_total(&self, venue: &str) -> u32 {
        self.venue_totals.get(venue).copied().unwrap_or(0)
    }

    /// Most recent day the two teams met.
    pub fn matchup_last_day(&self, matchup: &Matchup) -> Option<usize> {
        self.matchup_last_day.get(matchup).copied()
    }

    /// Matches placed on a day, across all slots and venues.
    pub fn day_total(&self, day: usize) -> u32 {
        self.day_totals.get(&day).copied().unwrap_or(0)
    }

    /// Matches placed in a slot.
    pub fn slot_match_count(&self, slot_index: usize) -> usize {
        self.slots.get(&slot_index).map_or(0, |s| s.matches.len())
    }

    /// Whether the team already plays in the slot.
    pub fn team_in_slot(&self, slot_index: usize, team: &str) -> bool {
        self.slots
            .get(&slot_index)
            .is_some_and(|s| s.teams.contains(team))
    }

    /// Whether the venue is already taken in the slot.
    pub fn venue_in_slot(&self, slot_index: usize, venue: &str) -> bool {
        self.slots
            .get(&slot_index)
            .is_some_and(|s| s.venues.contains(venue))
    }

    /// Slot contents, if anything was placed there.
    pub fn slot(&self, slot_index: usize) -> Option<&SlotState> {
        self.slots.get(&slot_index)
    }

    /// Position of the venue rotation cursor (placements so far).
    pub fn rotation_cursor(&self) -> usize {
        self.rotation
    }

    /// Total placements recorded.
    pub fn placed_count(&self) -> usize {
        self.slots.values().map(|s| s.matches.len()).sum()
    }

    /// Folds a placement into every counter.
    pub fn record(&mut self, placement: Placement) {
        let day = placement.day;
        for team in [&placement.fixture.team1, &placement.fixture.team2] {
            self.team_last_day.insert(team.clone(), day);
            *self
                .team_day_matches
                .entry(team.clone())
                .or_default()
                .entry(day)
                .or_insert(0) += 1;
        }

        self.matchup_last_day
            .insert(placement.fixture.matchup(), day);
        self.venue_last_used.insert(placement.venue.clone(), day);
        *self.venue_totals.entry(placement.venue.clone()).or_insert(0) += 1;
        *self.day_totals.entry(day).or_insert(0) += 1;
        self.rotation += 1;

        let slot = self.slots.entry(placement.slot_index).or_default();
        slot.teams.insert(placement.fixture.team1.clone());
        slot.teams.insert(placement.fixture.team2.clone());
        slot.venues.insert(placement.venue.clone());
        slot.matches.push(placement.into_scheduled());
    }

    /// Flattens placements by slot index into a schedule.
    pub fn into_schedule(self) -> Schedule {
        Schedule {
            matches: self
                .slots
                .into_values()
                .flat_map(|s| s.matches)
                .collect(),
        }
    }
}
