/// Property-based tests for the scheduling invariants.
///
/// Random team counts, venue lists, slot templates and constraint sets are
/// pushed through generation and packing; the produced schedule must cover
/// every fixture exactly once and pass the audit.
use proptest::prelude::*;
use std::collections::HashSet;

use u_fixture::generation::{generate_fixtures, TournamentFormat};
use u_fixture::knockout::{num_rounds, BracketProjector, NextRoundPairer};
use u_fixture::models::{Constraints, MatchResult, SlotCalendar, Team, Venue};
use u_fixture::scheduler::SlotPacker;
use u_fixture::validation::{audit_schedule, check_coverage};

fn format_strategy() -> impl Strategy<Value = TournamentFormat> {
    prop_oneof![
        Just(TournamentFormat::RoundRobin),
        Just(TournamentFormat::League),
        Just(TournamentFormat::Knockout),
    ]
}

fn constraints_strategy() -> impl Strategy<Value = Constraints> {
    (
        (0u32..3, prop::option::of(0u32..5), 1u32..3, 0u32..3),
        (prop::option::of(1u32..8), any::<bool>(), 0u32..5, 1u32..4),
    )
        .prop_map(
            |(
                (rest_gap, per_day, per_team_day, venue_gap),
                (venue_cap, balance, matchup_gap, concurrent),
            )| {
                let mut c = Constraints::default()
                    .with_rest_gap(rest_gap)
                    .with_max_matches_per_team_per_day(per_team_day)
                    .with_min_venue_rest_gap(venue_gap)
                    .with_balance_venue_usage(balance)
                    .with_avoid_same_matchup_gap(matchup_gap)
                    .with_max_concurrent_matches(concurrent);
                if let Some(max) = per_day {
                    c = c.with_max_matches_per_day(max);
                }
                if let Some(max) = venue_cap {
                    c = c.with_max_matches_per_venue(max);
                }
                c
            },
        )
}

fn teams(n: usize) -> Vec<Team> {
    (0..n).map(|i| Team::new(format!("T{i}"))).collect()
}

fn venues(n: usize) -> Vec<Venue> {
    (0..n).map(|i| Venue::new(format!("V{i}"))).collect()
}

fn templates(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("Slot {i}")).collect()
}

proptest! {
    #[test]
    fn test_fixture_counts(n in 0usize..12, format in format_strategy()) {
        let fixtures = generate_fixtures(&teams(n), format);
        let expected = match format {
            TournamentFormat::RoundRobin => n * n.saturating_sub(1) / 2,
            TournamentFormat::League => n * n.saturating_sub(1),
            TournamentFormat::Knockout => n.div_ceil(2),
        };
        prop_assert_eq!(fixtures.len(), expected);
        prop_assert!(fixtures.iter().all(|f| f.team1 != f.team2));
    }

    #[test]
    fn test_packed_schedule_is_complete_and_clean(
        n in 2usize..8,
        format in format_strategy(),
        venue_count in 0usize..4,
        slot_count in 0usize..4,
        constraints in constraints_strategy(),
    ) {
        let fixtures = generate_fixtures(&teams(n), format);
        let calendar = SlotCalendar::new(&templates(slot_count), None);
        let packer = SlotPacker::new(calendar, &venues(venue_count), constraints.clone());
        let outcome = packer.pack(fixtures.clone());

        prop_assert_eq!(outcome.schedule.len(), fixtures.len());
        prop_assert!(check_coverage(&fixtures, &outcome.schedule).is_empty());

        let violations = audit_schedule(&outcome.schedule, &constraints);
        prop_assert!(violations.is_empty(), "violations: {:?}", violations);

        if venue_count == 0 {
            prop_assert_eq!(outcome.schedule.fallback_count(), fixtures.len());
        }
    }

    #[test]
    fn test_slot_team_and_venue_exclusive(
        n in 2usize..8,
        venue_count in 1usize..4,
        slot_count in 1usize..4,
    ) {
        let fixtures = generate_fixtures(&teams(n), TournamentFormat::RoundRobin);
        let calendar = SlotCalendar::new(&templates(slot_count), None);
        let schedule = SlotPacker::new(calendar, &venues(venue_count), Constraints::default())
            .pack(fixtures)
            .schedule;

        let mut venue_slots = HashSet::new();
        let mut team_slots = HashSet::new();
        for m in &schedule.matches {
            prop_assert!(venue_slots.insert((m.time_slot.clone(), m.venue.clone())));
            prop_assert!(team_slots.insert((m.time_slot.clone(), m.team1().to_string())));
            prop_assert!(team_slots.insert((m.time_slot.clone(), m.team2().to_string())));
        }
    }

    #[test]
    fn test_bracket_rounds_halve(n in 0usize..70) {
        let projector = BracketProjector::new(&venues(2), &templates(2), None);
        let bracket = projector.project(n).unwrap();

        prop_assert_eq!(bracket.total_rounds, num_rounds(n));
        prop_assert!(bracket.rounds.len() as u32 <= bracket.total_rounds);
        prop_assert_eq!(bracket.rounds[0].total_matches, n / 2);
        for pair in bracket.rounds.windows(2) {
            prop_assert_eq!(pair[1].total_matches, pair[0].total_matches / 2);
            prop_assert!(pair[1].total_matches > 0);
        }
    }

    #[test]
    fn test_next_round_seats_every_winner_once(ids in prop::collection::btree_set(1u32..64, 0..20)) {
        let results: Vec<MatchResult> = ids
            .iter()
            .map(|id| MatchResult::new(*id, format!("W{id}")))
            .collect();
        let pairer = NextRoundPairer::new(&venues(2), &templates(1), None, &Constraints::default());
        let next = pairer.advance(1, &results).unwrap();

        prop_assert_eq!(next.matches.len(), ids.len().div_ceil(2));
        let seated: Vec<&str> = next
            .matches
            .iter()
            .flat_map(|m| [m.team1.as_str(), m.team2.as_str()])
            .filter(|t| *t != "BYE")
            .collect();
        prop_assert_eq!(seated.len(), ids.len());
        let unique: HashSet<&str> = seated.iter().copied().collect();
        prop_assert_eq!(unique.len(), ids.len());
    }
}
