//! Schedule quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Days spanned | Last calendar day used + 1 |
//! | Fallback matches | Placements made without constraint checks |
//! | Venue spread | Max − min matches across configured venues |
//! | Team load | Matches per team (`BYE` excluded) |

use std::collections::BTreeMap;

use crate::models::{is_bye, Schedule, Venue};

/// Schedule summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleKpi {
    /// Number of placed matches.
    pub total_matches: usize,
    /// Number of fallback placements.
    pub fallback_matches: usize,
    /// Calendar days from the first day to the last used day.
    pub days_spanned: usize,
    /// Matches per configured venue (zero for unused venues).
    pub matches_per_venue: BTreeMap<String, usize>,
    /// Matches per team.
    pub matches_per_team: BTreeMap<String, usize>,
    /// Difference between the busiest and the idlest venue.
    pub venue_spread: usize,
}

impl ScheduleKpi {
    /// Computes KPIs for a schedule over the configured venues.
    pub fn calculate(schedule: &Schedule, venues: &[Venue]) -> Self {
        let mut matches_per_venue: BTreeMap<String, usize> =
            venues.iter().map(|v| (v.name.clone(), 0)).collect();
        for (venue, count) in schedule.venue_usage() {
            *matches_per_venue.entry(venue).or_insert(0) += count;
        }

        let mut matches_per_team: BTreeMap<String, usize> = BTreeMap::new();
        for m in &schedule.matches {
            for team in [m.team1(), m.team2()] {
                if !is_bye(team) {
                    *matches_per_team.entry(team.to_string()).or_insert(0) += 1;
                }
            }
        }

        let venue_spread = match (
            matches_per_venue.values().max(),
            matches_per_venue.values().min(),
        ) {
            (Some(max), Some(min)) => max - min,
            _ => 0,
        };

        Self {
            total_matches: schedule.len(),
            fallback_matches: schedule.fallback_count(),
            days_spanned: schedule.last_day().map_or(0, |d| d + 1),
            matches_per_venue,
            matches_per_team,
            venue_spread,
        }
    }

    /// Whether every match was placed under full constraint checks.
    pub fn fully_constrained(&self) -> bool {
        self.fallback_matches == 0
    }

    /// Whether the schedule fits the given day horizon and venue spread.
    pub fn meets_thresholds(&self, max_days: usize, max_venue_spread: usize) -> bool {
        self.days_spanned <= max_days && self.venue_spread <= max_venue_spread
    }
}
