//! Next-round pairing from reported results.
//!
//! # Algorithm
//! 1. Sort results by `match_id` (bracket order, not submission order).
//! 2. Pair winners at positions `(2k, 2k + 1)` into next-round match `k + 1`.
//!    An odd final winner meets `BYE`.
//! 3. Schedule the new fixtures sequentially: venues rotate through the
//!    list, and the day advances whenever `max_matches_per_day` fixtures
//!    have been laid out. No other constraint is consulted.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::error::{Result, SchedulerError};
use crate::models::{
    date_after, round_template, Constraints, MatchResult, RoundMatch, Venue, BYE,
};

/// The fixtures of a newly opened round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextRound {
    /// Round number of the new fixtures.
    pub round: u32,
    /// Fixtures with their slot and venue.
    pub matches: Vec<RoundMatch>,
}

/// Pairs winners of one round into the next.
#[derive(Debug, Clone)]
pub struct NextRoundPairer {
    venues: Vec<String>,
    time_slots: Vec<String>,
    start: Option<NaiveDate>,
    day_cap: Option<u32>,
}

impl NextRoundPairer {
    /// Creates a pairer. Only `max_matches_per_day` is read from the constraints.
    pub fn new(
        venues: &[Venue],
        time_slots: &[String],
        start: Option<NaiveDate>,
        constraints: &Constraints,
    ) -> Self {
        Self {
            venues: venues.iter().map(|v| v.name.clone()).collect(),
            time_slots: time_slots.to_vec(),
            start,
            day_cap: constraints.day_cap(),
        }
    }

    /// Builds and schedules the round after `current_round`.
    ///
    /// When a `match_id` is reported twice, the later result wins.
    pub fn advance(&self, current_round: u32, results: &[MatchResult]) -> Result<NextRound> {
        let winners: BTreeMap<u32, &str> = results
            .iter()
            .map(|r| (r.match_id, r.winner.as_str()))
            .collect();
        let winners: Vec<(u32, &str)> = winners.into_iter().collect();

        let round = current_round + 1;
        if !winners.is_empty() && self.venues.is_empty() {
            return Err(SchedulerError::NoVenues);
        }

        let mut day_index = 0;
        let mut matches = Vec::with_capacity(winners.len().div_ceil(2));
        for (k, pair) in winners.chunks(2).enumerate() {
            let match_id = k as u32 + 1;
            let (first_id, team1) = pair[0];
            let (team2, from_matches) = match pair.get(1) {
                Some(&(second_id, second)) => (second, vec![first_id, second_id]),
                None => (BYE, vec![first_id]),
            };

            let template = round_template(&self.time_slots, day_index);
            let time_slot = match date_after(self.start, day_index) {
                Some(date) => format!("{date} - {template}"),
                None => format!("Round {round} - Match {match_id}"),
            };

            matches.push(RoundMatch {
                match_id,
                round,
                label: format!("{team1} vs {team2}"),
                team1: team1.to_string(),
                team2: team2.to_string(),
                time_slot,
                venue: self.venues[k % self.venues.len()].clone(),
                from_matches,
            });

            if let Some(cap) = self.day_cap {
                if matches.len() % cap as usize == 0 {
                    day_index += 1;
                }
            }
        }

        tracing::info!(
            round,
            results = results.len(),
            fixtures = matches.len(),
            "paired next knockout round"
        );

        Ok(NextRound { round, matches })
    }
}
