//! Bracket projection.
//!
//! # Shape
//! `num_rounds = ceil(log2(n))` (1 when `n <= 1`). Round 1 holds `n / 2`
//! matches and every later round half of the previous one. Projection stops
//! once the next round would be empty, so for `n = 5` the bracket reports
//! 3 rounds but emits rounds 1 and 2 only.
//!
//! # Placement
//! Match `m` of round `r` sits on day `(r - 1) * 2 + (m - 1)`, takes the slot
//! template at that index (first template when out of range) and the venue
//! `venues[(m - 1) % len]`.

use chrono::NaiveDate;

use crate::error::{Result, SchedulerError};
use crate::models::{
    date_after, round_template, Bracket, BracketMatch, BracketRound, FromMatches, ScheduledMatch,
    Venue, TBD,
};

/// Rounds needed to reduce `num_teams` entrants to one winner.
pub fn num_rounds(num_teams: usize) -> u32 {
    if num_teams <= 1 {
        1
    } else {
        usize::BITS - (num_teams - 1).leading_zeros()
    }
}

/// Builds bracket skeletons from a venue list and slot template.
#[derive(Debug, Clone)]
pub struct BracketProjector {
    venues: Vec<String>,
    time_slots: Vec<String>,
    start: Option<NaiveDate>,
}

impl BracketProjector {
    /// Creates a projector.
    pub fn new(venues: &[Venue], time_slots: &[String], start: Option<NaiveDate>) -> Self {
        Self {
            venues: venues.iter().map(|v| v.name.clone()).collect(),
            time_slots: time_slots.to_vec(),
            start,
        }
    }

    /// Projects a bracket with every team `"TBD"`.
    pub fn project(&self, num_teams: usize) -> Result<Bracket> {
        self.project_with_first_round(num_teams, &[])
    }

    /// Projects a bracket, copying round-1 teams, slot, and venue from the
    /// already scheduled first round where a `match_id` matches.
    pub fn project_with_first_round(
        &self,
        num_teams: usize,
        first_round: &[ScheduledMatch],
    ) -> Result<Bracket> {
        let total_rounds = num_rounds(num_teams);
        let mut rounds = Vec::new();
        let mut per_round = num_teams / 2;

        for round in 1..=total_rounds {
            let mut matches = Vec::with_capacity(per_round);
            for match_id in 1..=per_round as u32 {
                let planned = self.planned_match(round, match_id)?;
                let resolved = (round == 1)
                    .then(|| find_resolved(first_round, match_id))
                    .flatten();
                matches.push(match resolved {
                    Some(m) => BracketMatch {
                        label: m.label.clone(),
                        team1: m.team1().to_string(),
                        team2: m.team2().to_string(),
                        time_slot: m.time_slot.clone(),
                        venue: m.venue.clone(),
                        ..planned
                    },
                    None => planned,
                });
            }

            rounds.push(BracketRound {
                round,
                total_matches: matches.len(),
                matches,
            });

            per_round /= 2;
            if per_round == 0 {
                break;
            }
        }

        tracing::debug!(
            num_teams,
            total_rounds,
            emitted = rounds.len(),
            "projected knockout bracket"
        );

        Ok(Bracket {
            total_rounds,
            total_teams: num_teams,
            rounds,
        })
    }

    fn planned_match(&self, round: u32, match_id: u32) -> Result<BracketMatch> {
        if self.venues.is_empty() {
            return Err(SchedulerError::NoVenues);
        }
        let position = (match_id - 1) as usize;
        let day_index = (round as usize - 1) * 2 + position;
        let template = round_template(&self.time_slots, day_index);
        let time_slot = match date_after(self.start, day_index) {
            Some(date) => format!("{date} - {template}"),
            None => format!("Round {round} - {template}"),
        };

        Ok(BracketMatch {
            match_id,
            round,
            label: format!("{TBD} vs {TBD}"),
            team1: TBD.to_string(),
            team2: TBD.to_string(),
            time_slot,
            venue: self.venues[position % self.venues.len()].clone(),
            from_matches: FromMatches::for_match(round, match_id),
        })
    }
}

fn find_resolved(first_round: &[ScheduledMatch], match_id: u32) -> Option<&ScheduledMatch> {
    first_round
        .iter()
        .find(|m| m.fixture.match_id == Some(match_id) && m.fixture.round == Some(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_start_date, Feeder, Fixture};

    fn projector(venues: &[&str], slots: &[&str], start: Option<&str>) -> BracketProjector {
        let venues: Vec<Venue> = venues.iter().map(|v| Venue::new(*v)).collect();
        let slots: Vec<String> = slots.iter().map(|s| s.to_string()).collect();
        BracketProjector::new(&venues, &slots, parse_start_date(start))
    }

    #[test]
    fn test_num_rounds() {
        assert_eq!(num_rounds(0), 1);
        assert_eq!(num_rounds(1), 1);
        assert_eq!(num_rounds(2), 1);
        assert_eq!(num_rounds(3), 2);
        assert_eq!(num_rounds(4), 2);
        assert_eq!(num_rounds(5), 3);
        assert_eq!(num_rounds(8), 3);
        assert_eq!(num_rounds(9), 4);
        assert_eq!(num_rounds(16), 4);
    }

    #[test]
    fn test_eight_team_bracket() {
        let b = projector(&["V1", "V2"], &["Morning", "Evening"], None)
            .project(8)
            .unwrap();
        assert_eq!(b.total_rounds, 3);
        assert_eq!(b.total_teams, 8);
        let counts: Vec<_> = b.rounds.iter().map(|r| r.total_matches).collect();
        assert_eq!(counts, vec![4, 2, 1]);
        assert_eq!(b.match_count(), 7);

        let final_match = &b.round(3).unwrap().matches[0];
        assert_eq!(final_match.team1, "TBD");
        assert_eq!(final_match.label, "TBD vs TBD");
        assert_eq!(
            final_match.from_matches.winner_1,
            Some(Feeder { round: 2, match_id: 1 })
        );
        assert_eq!(
            final_match.from_matches.winner_2,
            Some(Feeder { round: 2, match_id: 2 })
        );
    }

    #[test]
    fn test_five_teams_stops_after_round_two() {
        let b = projector(&["V1"], &["Morning"], None).project(5).unwrap();
        assert_eq!(b.total_rounds, 3);
        assert_eq!(b.rounds.len(), 2);
        assert_eq!(b.rounds[0].total_matches, 2);
        assert_eq!(b.rounds[1].total_matches, 1);
        assert!(b.round(3).is_none());
    }

    #[test]
    fn test_single_team_emits_empty_round() {
        let b = projector(&[], &[], None).project(1).unwrap();
        assert_eq!(b.total_rounds, 1);
        assert_eq!(b.rounds.len(), 1);
        assert_eq!(b.rounds[0].total_matches, 0);
    }

    #[test]
    fn test_slot_and_venue_layout() {
        let b = projector(&["V1", "V2"], &["Morning", "Evening"], Some("2026-03-01"))
            .project(4)
            .unwrap();
        let r1 = &b.rounds[0].matches;
        assert_eq!(r1[0].time_slot, "2026-03-01 - Morning");
        assert_eq!(r1[1].time_slot, "2026-03-02 - Evening");
        assert_eq!(r1[0].venue, "V1");
        assert_eq!(r1[1].venue, "V2");

        // Round 2 starts at day offset 2, past the template: first entry.
        let r2 = &b.rounds[1].matches;
        assert_eq!(r2[0].time_slot, "2026-03-03 - Morning");
        assert_eq!(r2[0].venue, "V1");
    }

    #[test]
    fn test_undated_labels() {
        let b = projector(&["V1"], &[], None).project(4).unwrap();
        assert_eq!(b.rounds[0].matches[0].time_slot, "Round 1 - Morning");
        assert_eq!(b.rounds[1].matches[0].time_slot, "Round 2 - Morning");
    }

    #[test]
    fn test_no_venues_is_an_error() {
        let err = projector(&[], &["Morning"], None).project(4).unwrap_err();
        assert_eq!(err, SchedulerError::NoVenues);
    }

    #[test]
    fn test_first_round_copied_from_schedule() {
        let first_round = vec![
            ScheduledMatch::new(
                Fixture::new("A", "B").in_round(1, 1),
                "Day 1 - Morning",
                "Oval",
                0,
                0,
            ),
            ScheduledMatch::new(
                Fixture::new("C", "D").in_round(1, 2),
                "Day 1 - Morning",
                "Park",
                0,
                0,
            ),
        ];
        let b = projector(&["V1"], &["Morning"], None)
            .project_with_first_round(4, &first_round)
            .unwrap();

        let m1 = &b.rounds[0].matches[0];
        assert_eq!(m1.label, "A vs B");
        assert_eq!(m1.venue, "Oval");
        assert_eq!(m1.time_slot, "Day 1 - Morning");
        assert_eq!(m1.match_id, 1);
        assert_eq!(m1.from_matches, FromMatches::default());
        assert_eq!(b.rounds[0].matches[1].team2, "D");
        assert_eq!(b.rounds[1].matches[0].team1, "TBD");
    }
}
