//! Operational constraints for fixture allocation.
//!
//! Every option is optional on input; missing fields take the defaults
//! below. Gap options count *idle* calendar days, so a gap of `g` means two
//! consecutive uses must be at least `g + 1` days apart.
//!
//! | Option | Default | Scope |
//! |--------|---------|-------|
//! | `rest_gap` | 1 | team |
//! | `max_matches_per_day` | none | day |
//! | `max_matches_per_team_per_day` | 1 | team × day |
//! | `min_venue_rest_gap` | 0 | venue |
//! | `max_matches_per_venue` | none | venue (lifetime) |
//! | `balance_venue_usage` | true | venue policy |
//! | `avoid_same_matchup_gap` | 4 | matchup |
//! | `blackout_dates` | empty | slot / day |
//! | `max_concurrent_matches` | 3 | slot |
//! | `priority_matches` | empty | ordering |

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Constraint configuration for one scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    /// Idle days a team needs between two matches.
    pub rest_gap: u32,
    /// Cap on matches across all venues on one calendar day.
    pub max_matches_per_day: Option<u32>,
    /// Cap on a single team's matches within one calendar day.
    pub max_matches_per_team_per_day: u32,
    /// Idle days before a venue may be reused.
    pub min_venue_rest_gap: u32,
    /// Lifetime cap on matches hosted by one venue.
    pub max_matches_per_venue: Option<u32>,
    /// Balance venue usage (`true`) or rotate through the venue list (`false`).
    pub balance_venue_usage: bool,
    /// Idle days before the same two teams may meet again.
    pub avoid_same_matchup_gap: u32,
    /// Dates (`YYYY-MM-DD`) or full slot labels that cannot host matches.
    pub blackout_dates: HashSet<String>,
    /// Cap on simultaneous matches within one slot.
    pub max_concurrent_matches: u32,
    /// Pairings to attempt before all others, in order.
    pub priority_matches: Vec<(String, String)>,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            rest_gap: 1,
            max_matches_per_day: None,
            max_matches_per_team_per_day: 1,
            min_venue_rest_gap: 0,
            max_matches_per_venue: None,
            balance_venue_usage: true,
            avoid_same_matchup_gap: 4,
            blackout_dates: HashSet::new(),
            max_concurrent_matches: 3,
            priority_matches: Vec::new(),
        }
    }
}

impl Constraints {
    /// Creates the default constraint set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the team rest gap.
    pub fn with_rest_gap(mut self, days: u32) -> Self {
        self.rest_gap = days;
        self
    }

    /// Sets the daily match cap.
    pub fn with_max_matches_per_day(mut self, max: u32) -> Self {
        self.max_matches_per_day = Some(max);
        self
    }

    /// Sets the per-team daily match cap.
    pub fn with_max_matches_per_team_per_day(mut self, max: u32) -> Self {
        self.max_matches_per_team_per_day = max;
        self
    }

    /// Sets the venue rest gap.
    pub fn with_min_venue_rest_gap(mut self, days: u32) -> Self {
        self.min_venue_rest_gap = days;
        self
    }

    /// Sets the lifetime per-venue cap.
    pub fn with_max_matches_per_venue(mut self, max: u32) -> Self {
        self.max_matches_per_venue = Some(max);
        self
    }

    /// Chooses between balanced and rotating venue selection.
    pub fn with_balance_venue_usage(mut self, balance: bool) -> Self {
        self.balance_venue_usage = balance;
        self
    }

    /// Sets the repeat-matchup gap.
    pub fn with_avoid_same_matchup_gap(mut self, days: u32) -> Self {
        self.avoid_same_matchup_gap = days;
        self
    }

    /// Adds a blacked-out date or slot label.
    pub fn with_blackout(mut self, date_or_label: impl Into<String>) -> Self {
        self.blackout_dates.insert(date_or_label.into());
        self
    }

    /// Sets the per-slot concurrency cap.
    pub fn with_max_concurrent_matches(mut self, max: u32) -> Self {
        self.max_concurrent_matches = max;
        self
    }

    /// Appends a priority pairing.
    pub fn with_priority_match(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.priority_matches.push((a.into(), b.into()));
        self
    }

    /// Effective daily cap. A configured zero means "no cap".
    pub fn day_cap(&self) -> Option<u32> {
        self.max_matches_per_day.filter(|&m| m > 0)
    }

    /// Effective per-venue cap. A configured zero means "no cap".
    pub fn venue_cap(&self) -> Option<u32> {
        self.max_matches_per_venue.filter(|&m| m > 0)
    }

    /// Whether a slot is blacked out by its date or its full label.
    pub fn is_blacked_out(&self, date: Option<&str>, label: &str) -> bool {
        date.is_some_and(|d| self.blackout_dates.contains(d)) || self.blackout_dates.contains(label)
    }
}
