//! Greedy slot packer.
//!
//! # Algorithm
//! 1. Walk slot indices 0, 1, 2, ... skipping blacked-out slots.
//! 2. In each slot, scan the pending queue in order. A fixture is placed
//!    unless one of the checks below defers it to the next slot.
//! 3. Stop when the queue is empty or after `20 × fixtures` slot indices.
//! 4. Append any leftovers with the fallback: one per day past the last
//!    slot examined, first template label, first venue, no checks.
//!
//! # Checks (first failure wins)
//! 1. slot holds `max_concurrent_matches` matches
//! 2. day holds `max_matches_per_day` matches
//! 3. a team is unavailable (already in slot, day cap, rest gap)
//! 4. the same pairing met within `avoid_same_matchup_gap` idle days
//! 5. no venue is eligible
//!
//! # Complexity
//! O(L × q × v) where L = slot limit, q = queue length, v = venues.
//!
//! No backtracking: an early placement is never revisited to make room
//! for a later one.

use std::fmt;

use super::state::{AllocatorState, Placement};
use super::venue::VenueSelector;
use crate::models::{is_bye, Constraints, Fixture, Schedule, ScheduledMatch, Slot, SlotCalendar, Venue};

/// Slot indices examined per input fixture before the fallback kicks in.
pub const ITERATION_FACTOR: usize = 20;

/// Venue assigned by the fallback when no venues are configured.
pub const FALLBACK_VENUE: &str = "TBD";

/// Why a fixture was not placed in a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferral {
    /// The slot already holds `max_concurrent_matches` matches.
    SlotFull,
    /// The day already holds `max_matches_per_day` matches.
    DayFull,
    /// The team cannot play in this slot.
    TeamUnavailable(String),
    /// The pairing met too recently.
    MatchupTooSoon,
    /// Every venue is taken, capped, or resting.
    NoVenue,
}

impl fmt::Display for Deferral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deferral::SlotFull => write!(f, "slot full"),
            Deferral::DayFull => write!(f, "daily cap reached"),
            Deferral::TeamUnavailable(team) => write!(f, "{team} unavailable"),
            Deferral::MatchupTooSoon => write!(f, "matchup played too recently"),
            Deferral::NoVenue => write!(f, "no eligible venue"),
        }
    }
}

/// Result of a packing run.
#[derive(Debug, Clone)]
pub struct PackOutcome {
    /// Placed matches in slot order, fallback placements last.
    pub schedule: Schedule,
    /// Slot indices examined (including blacked-out ones).
    pub slots_examined: usize,
    /// Slot indices skipped as blacked out.
    pub blackout_slots: usize,
}

/// Greedy slot/venue allocator.
///
/// # Example
///
/// ```
/// use u_fixture::models::{Constraints, Fixture, SlotCalendar, Venue};
/// use u_fixture::scheduler::SlotPacker;
///
/// let calendar = SlotCalendar::new(&["Morning".into()], None);
/// let packer = SlotPacker::new(calendar, &[Venue::new("Oval")], Constraints::default());
/// let outcome = packer.pack(vec![Fixture::new("A", "B"), Fixture::new("C", "D")]);
///
/// assert_eq!(outcome.schedule.len(), 2);
/// assert_eq!(outcome.schedule.matches[0].time_slot, "Day 1 - Morning");
/// assert_eq!(outcome.schedule.matches[1].time_slot, "Day 2 - Morning");
/// ```
#[derive(Debug, Clone)]
pub struct SlotPacker {
    calendar: SlotCalendar,
    constraints: Constraints,
    venues: VenueSelector,
}

impl SlotPacker {
    /// Creates a packer.
    pub fn new(calendar: SlotCalendar, venues: &[Venue], constraints: Constraints) -> Self {
        let venues = VenueSelector::from_constraints(venues, &constraints);
        Self {
            calendar,
            constraints,
            venues,
        }
    }

    /// Slot calendar in use.
    pub fn calendar(&self) -> &SlotCalendar {
        &self.calendar
    }

    /// Places every fixture, falling back when the slot limit is reached.
    pub fn pack(&self, fixtures: Vec<Fixture>) -> PackOutcome {
        let total = fixtures.len();
        let limit = total * ITERATION_FACTOR;
        let mut state = AllocatorState::new();
        let mut queue = fixtures;
        let mut slot_index = 0;
        let mut blackout_slots = 0;

        while !queue.is_empty() && slot_index < limit {
            let slot = self.calendar.slot(slot_index);
            if self
                .constraints
                .is_blacked_out(slot.date.as_deref(), &slot.label)
            {
                tracing::debug!(slot = %slot.label, "skipping blacked-out slot");
                blackout_slots += 1;
                slot_index += 1;
                continue;
            }

            let mut pending = Vec::with_capacity(queue.len());
            for fixture in queue {
                match self.check(&fixture, &slot, &state) {
                    Ok(venue) => {
                        let placement = Placement::new(fixture, &slot, venue);
                        state.record(placement);
                    }
                    Err(reason) => {
                        tracing::trace!(
                            slot = %slot.label,
                            fixture = %fixture.label(),
                            %reason,
                            "deferred"
                        );
                        pending.push(fixture);
                    }
                }
            }
            queue = pending;
            slot_index += 1;
        }

        let mut schedule = state.into_schedule();
        if !queue.is_empty() {
            tracing::warn!(
                unplaced = queue.len(),
                slots_examined = slot_index,
                "slot limit reached, placing remaining fixtures without constraints"
            );
            self.place_fallback(&mut schedule, queue, slot_index);
        }

        tracing::info!(
            fixtures = total,
            slots_examined = slot_index,
            fallback = schedule.fallback_count(),
            "packing complete"
        );

        PackOutcome {
            schedule,
            slots_examined: slot_index,
            blackout_slots,
        }
    }

    /// Runs the placement checks for one fixture in one slot.
    ///
    /// Returns the chosen venue, or the first check that failed.
    pub fn check<'a>(
        &'a self,
        fixture: &Fixture,
        slot: &Slot,
        state: &AllocatorState,
    ) -> Result<&'a str, Deferral> {
        let c = &self.constraints;

        if state.slot_match_count(slot.index) >= c.max_concurrent_matches as usize {
            return Err(Deferral::SlotFull);
        }
        if let Some(cap) = c.day_cap() {
            if state.day_total(slot.day) >= cap {
                return Err(Deferral::DayFull);
            }
        }
        for team in [&fixture.team1, &fixture.team2] {
            if !self.team_available(team, slot, state) {
                return Err(Deferral::TeamUnavailable(team.clone()));
            }
        }
        if let Some(last) = state.matchup_last_day(&fixture.matchup()) {
            if slot.day - last <= c.avoid_same_matchup_gap as usize {
                return Err(Deferral::MatchupTooSoon);
            }
        }
        self.venues
            .select(state, slot.index, slot.day)
            .ok_or(Deferral::NoVenue)
    }

    /// Whether a team can play in the slot. `BYE` is always available.
    pub fn team_available(&self, team: &str, slot: &Slot, state: &AllocatorState) -> bool {
        if is_bye(team) {
            return true;
        }
        if state.team_in_slot(slot.index, team) {
            return false;
        }
        if state.team_matches_on(team, slot.day) >= self.constraints.max_matches_per_team_per_day {
            return false;
        }
        match state.team_last_day(team) {
            Some(last) => slot.day - last > self.constraints.rest_gap as usize,
            None => true,
        }
    }

    fn place_fallback(&self, schedule: &mut Schedule, leftovers: Vec<Fixture>, slot_index: usize) {
        let first_day = slot_index / self.calendar.slots_per_day() + 1;
        let venue = self
            .venues
            .venues()
            .first()
            .map(String::as_str)
            .unwrap_or(FALLBACK_VENUE);

        for (offset, fixture) in leftovers.into_iter().enumerate() {
            let day = first_day + offset;
            let label = self.calendar.label_for(day, 0);
            let index = day * self.calendar.slots_per_day();
            schedule.push(ScheduledMatch::new(fixture, label, venue, index, day).as_fallback());
        }
    }
}
