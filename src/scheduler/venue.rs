//! Venue selection for a candidate placement.
//!
//! # Eligibility
//! A venue is eligible in a slot when it is not already used in that slot,
//! has not reached `max_matches_per_venue`, and its last use is at least
//! `min_venue_rest_gap + 1` days back.
//!
//! # Policies
//! - **Balanced**: fewest matches so far, then least recently used
//!   (never-used venues first), then venue-list order.
//! - **Rotation**: the first eligible venue at or after the rotation cursor,
//!   in cyclic venue-list order. The cursor advances on every placement,
//!   whichever venue the placement used.

use super::state::AllocatorState;
use crate::models::{Constraints, Venue};

/// How an eligible venue is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VenuePolicy {
    /// Spread matches evenly across venues.
    #[default]
    Balanced,
    /// Walk the venue list in a fixed cycle.
    Rotation,
}

/// Picks venues under the configured policy and venue constraints.
#[derive(Debug, Clone)]
pub struct VenueSelector {
    venues: Vec<String>,
    policy: VenuePolicy,
    max_per_venue: Option<u32>,
    rest_gap: u32,
}

impl VenueSelector {
    /// Creates a selector for the given venues.
    pub fn new(venues: &[Venue], policy: VenuePolicy) -> Self {
        Self {
            venues: venues.iter().map(|v| v.name.clone()).collect(),
            policy,
            max_per_venue: None,
            rest_gap: 0,
        }
    }

    /// Creates a selector configured from constraints.
    pub fn from_constraints(venues: &[Venue], constraints: &Constraints) -> Self {
        let policy = if constraints.balance_venue_usage {
            VenuePolicy::Balanced
        } else {
            VenuePolicy::Rotation
        };
        Self::new(venues, policy)
            .with_max_per_venue(constraints.venue_cap())
            .with_rest_gap(constraints.min_venue_rest_gap)
    }

    /// Sets the lifetime per-venue cap.
    pub fn with_max_per_venue(mut self, max: Option<u32>) -> Self {
        self.max_per_venue = max;
        self
    }

    /// Sets the venue rest gap in idle days.
    pub fn with_rest_gap(mut self, days: u32) -> Self {
        self.rest_gap = days;
        self
    }

    /// Configured venue names, in list order.
    pub fn venues(&self) -> &[String] {
        &self.venues
    }

    /// Active policy.
    pub fn policy(&self) -> VenuePolicy {
        self.policy
    }

    /// Whether a venue may host a match in the slot.
    pub fn is_eligible(
        &self,
        venue: &str,
        state: &AllocatorState,
        slot_index: usize,
        day: usize,
    ) -> bool {
        if state.venue_in_slot(slot_index, venue) {
            return false;
        }
        if let Some(max) = self.max_per_venue {
            if state.venue_total(venue) >= max {
                return false;
            }
        }
        match state.venue_last_used(venue) {
            Some(last) => day.saturating_sub(last) > self.rest_gap as usize,
            None => true,
        }
    }

    /// Eligible venues in list order.
    pub fn eligible<'a>(
        &'a self,
        state: &AllocatorState,
        slot_index: usize,
        day: usize,
    ) -> Vec<&'a str> {
        self.venues
            .iter()
            .map(String::as_str)
            .filter(|v| self.is_eligible(v, state, slot_index, day))
            .collect()
    }

    /// Chooses a venue, or `None` when no venue is eligible.
    pub fn select(&self, state: &AllocatorState, slot_index: usize, day: usize) -> Option<&str> {
        match self.policy {
            VenuePolicy::Balanced => self
                .eligible(state, slot_index, day)
                .into_iter()
                .min_by_key(|v| (state.venue_total(v), state.venue_last_used(v))),
            VenuePolicy::Rotation => {
                let n = self.venues.len();
                let cursor = state.rotation_cursor();
                (0..n)
                    .map(|k| self.venues[(cursor + k) % n].as_str())
                    .find(|v| self.is_eligible(v, state, slot_index, day))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Fixture, SlotCalendar};
    use crate::scheduler::state::Placement;

    fn venues(names: &[&str]) -> Vec<Venue> {
        names.iter().map(|n| Venue::new(*n)).collect()
    }

    fn place(state: &mut AllocatorState, slot_index: usize, venue: &str) {
        let slot = SlotCalendar::new(&["Morning".to_string()], None).slot(slot_index);
        state.record(Placement::new(
            Fixture::new(format!("H{slot_index}"), format!("A{slot_index}")),
            &slot,
            venue,
        ));
    }

    #[test]
    fn test_balanced_prefers_unused() {
        let selector = VenueSelector::new(&venues(&["V1", "V2", "V3"]), VenuePolicy::Balanced);
        let mut state = AllocatorState::new();
        assert_eq!(selector.select(&state, 0, 0), Some("V1"));

        place(&mut state, 0, "V1");
        assert_eq!(selector.select(&state, 1, 1), Some("V2"));
        place(&mut state, 1, "V2");
        assert_eq!(selector.select(&state, 2, 2), Some("V3"));
    }

    #[test]
    fn test_balanced_tie_breaks_on_least_recent() {
        let selector = VenueSelector::new(&venues(&["V1", "V2"]), VenuePolicy::Balanced);
        let mut state = AllocatorState::new();
        place(&mut state, 0, "V2");
        place(&mut state, 1, "V1");
        // Both used once; V2 was used longer ago.
        assert_eq!(selector.select(&state, 2, 2), Some("V2"));
    }

    #[test]
    fn test_slot_exclusion() {
        let selector = VenueSelector::new(&venues(&["V1"]), VenuePolicy::Balanced);
        let mut state = AllocatorState::new();
        place(&mut state, 0, "V1");
        assert_eq!(selector.select(&state, 0, 0), None);
        assert_eq!(selector.select(&state, 1, 1), Some("V1"));
    }

    #[test]
    fn test_venue_cap() {
        let selector = VenueSelector::new(&venues(&["V1", "V2"]), VenuePolicy::Balanced)
            .with_max_per_venue(Some(1));
        let mut state = AllocatorState::new();
        place(&mut state, 0, "V1");
        place(&mut state, 1, "V2");
        assert!(selector.eligible(&state, 2, 2).is_empty());
        assert_eq!(selector.select(&state, 2, 2), None);
    }

    #[test]
    fn test_venue_rest_gap() {
        let selector =
            VenueSelector::new(&venues(&["V1"]), VenuePolicy::Balanced).with_rest_gap(2);
        let mut state = AllocatorState::new();
        place(&mut state, 0, "V1");
        assert_eq!(selector.select(&state, 1, 1), None);
        assert_eq!(selector.select(&state, 2, 2), None);
        assert_eq!(selector.select(&state, 3, 3), Some("V1"));
    }

    #[test]
    fn test_rotation_advances_per_placement() {
        let selector = VenueSelector::new(&venues(&["V1", "V2", "V3"]), VenuePolicy::Rotation);
        let mut state = AllocatorState::new();
        assert_eq!(selector.select(&state, 0, 0), Some("V1"));

        // Cursor moves even though V3 was the venue actually used.
        place(&mut state, 0, "V3");
        assert_eq!(selector.select(&state, 1, 1), Some("V2"));
        place(&mut state, 1, "V2");
        assert_eq!(selector.select(&state, 2, 2), Some("V3"));
    }

    #[test]
    fn test_rotation_skips_ineligible() {
        let selector = VenueSelector::new(&venues(&["V1", "V2"]), VenuePolicy::Rotation);
        let mut state = AllocatorState::new();
        place(&mut state, 0, "V2");
        // Cursor at V2, but V2 is taken in slot 0.
        assert_eq!(selector.select(&state, 0, 0), Some("V1"));
    }

    #[test]
    fn test_no_venues() {
        let selector = VenueSelector::new(&[], VenuePolicy::Rotation);
        assert_eq!(selector.select(&AllocatorState::new(), 0, 0), None);
    }

    #[test]
    fn test_from_constraints() {
        let c = Constraints::new()
            .with_balance_venue_usage(false)
            .with_max_matches_per_venue(0);
        let selector = VenueSelector::from_constraints(&venues(&["V1"]), &c);
        assert_eq!(selector.policy(), VenuePolicy::Rotation);
        assert_eq!(selector.venues(), ["V1".to_string()]);
    }
}
