//! Input validation and schedule auditing.
//!
//! `validate_input` checks the structural integrity of a tournament before
//! scheduling. Detects:
//! - Duplicate team or venue names
//! - An empty venue list
//! - Priority pairings that name unknown teams or pair a team with itself
//!
//! Findings are advisory: the scheduler still runs on such input.
//!
//! `audit_schedule` re-checks a produced schedule against the placement
//! invariants (slot exclusivity, rest gaps, matchup gaps) and
//! `check_coverage` against the input fixture list. Fallback placements are
//! exempt from the gap checks.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::{
    is_bye, Constraints, Fixture, Matchup, Schedule, ScheduledMatch, Team, Venue, Violation,
    ViolationType,
};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two teams or two venues share a name.
    DuplicateName,
    /// No venue is configured.
    NoVenues,
    /// A priority pairing names a team that is not entered.
    UnknownTeam,
    /// A priority pairing pairs a team with itself.
    SelfPairing,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates tournament input.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_input(
    teams: &[Team],
    venues: &[Venue],
    constraints: &Constraints,
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut team_names = HashSet::new();
    for t in teams {
        if !team_names.insert(t.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate team name: {}", t.name),
            ));
        }
    }

    let mut venue_names = HashSet::new();
    for v in venues {
        if !venue_names.insert(v.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate venue name: {}", v.name),
            ));
        }
    }

    if venues.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoVenues,
            "No venues configured; every match will be placed by the fallback",
        ));
    }

    for (a, b) in &constraints.priority_matches {
        if a == b {
            errors.push(ValidationError::new(
                ValidationErrorKind::SelfPairing,
                format!("Priority pairing '{a}' vs '{b}' pairs a team with itself"),
            ));
        }
        for name in [a, b] {
            if !team_names.contains(name.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownTeam,
                    format!("Priority pairing references unknown team '{name}'"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Audits a schedule against the slot and gap invariants.
pub fn audit_schedule(schedule: &Schedule, constraints: &Constraints) -> Vec<Violation> {
    let mut violations = Vec::new();

    // Slot exclusivity
    let mut by_slot: BTreeMap<usize, Vec<&ScheduledMatch>> = BTreeMap::new();
    for m in &schedule.matches {
        by_slot.entry(m.slot_index).or_default().push(m);
    }
    for matches in by_slot.values() {
        let mut teams = HashSet::new();
        let mut venues = HashSet::new();
        for m in matches {
            for team in [m.team1(), m.team2()] {
                if !is_bye(team) && !teams.insert(team) {
                    violations.push(Violation::new(
                        ViolationType::TeamDoubleBooked,
                        team,
                        format!("{team} plays twice in {}", m.time_slot),
                    ));
                }
            }
            if !venues.insert(m.venue.as_str()) {
                violations.push(Violation::new(
                    ViolationType::VenueDoubleBooked,
                    &m.venue,
                    format!("{} hosts two matches in {}", m.venue, m.time_slot),
                ));
            }
        }
    }

    // Gaps between consecutive constrained uses
    let mut team_days: HashMap<&str, Vec<&ScheduledMatch>> = HashMap::new();
    let mut venue_days: HashMap<&str, Vec<&ScheduledMatch>> = HashMap::new();
    let mut matchup_days: HashMap<Matchup, Vec<&ScheduledMatch>> = HashMap::new();
    for m in schedule.matches.iter().filter(|m| !m.fallback) {
        for team in [m.team1(), m.team2()] {
            if !is_bye(team) {
                team_days.entry(team).or_default().push(m);
            }
        }
        venue_days.entry(m.venue.as_str()).or_default().push(m);
        matchup_days.entry(m.fixture.matchup()).or_default().push(m);
    }

    for (team, uses) in team_days {
        check_gaps(&mut violations, uses, constraints.rest_gap, |prev, next| {
            Violation::new(
                ViolationType::RestGap,
                team,
                format!(
                    "{team} plays on day {} and again on day {} (rest gap {})",
                    prev.day + 1,
                    next.day + 1,
                    constraints.rest_gap
                ),
            )
        });
    }
    for (venue, uses) in venue_days {
        check_gaps(&mut violations, uses, constraints.min_venue_rest_gap, |prev, next| {
            Violation::new(
                ViolationType::VenueRestGap,
                venue,
                format!(
                    "{venue} is used on day {} and again on day {} (venue rest gap {})",
                    prev.day + 1,
                    next.day + 1,
                    constraints.min_venue_rest_gap
                ),
            )
        });
    }
    for (matchup, uses) in matchup_days {
        check_gaps(&mut violations, uses, constraints.avoid_same_matchup_gap, |prev, next| {
            Violation::new(
                ViolationType::MatchupGap,
                matchup.to_string(),
                format!(
                    "{matchup} meet on day {} and again on day {} (matchup gap {})",
                    prev.day + 1,
                    next.day + 1,
                    constraints.avoid_same_matchup_gap
                ),
            )
        });
    }

    violations
}

/// Checks that every fixture appears exactly once in the schedule.
pub fn check_coverage(fixtures: &[Fixture], schedule: &Schedule) -> Vec<Violation> {
    let mut expected: HashMap<&Fixture, i64> = HashMap::new();
    for f in fixtures {
        *expected.entry(f).or_insert(0) += 1;
    }
    for m in &schedule.matches {
        *expected.entry(&m.fixture).or_insert(0) -= 1;
    }

    let mut violations: Vec<Violation> = expected
        .into_iter()
        .filter(|(_, balance)| *balance != 0)
        .map(|(fixture, balance)| {
            let message = if balance > 0 {
                format!("{} is missing {balance} time(s)", fixture.label())
            } else {
                format!("{} is scheduled {} extra time(s)", fixture.label(), -balance)
            };
            Violation::new(ViolationType::Coverage, fixture.label(), message)
        })
        .collect();
    violations.sort_by(|a, b| a.entity_id.cmp(&b.entity_id));
    violations
}

fn check_gaps(
    violations: &mut Vec<Violation>,
    mut uses: Vec<&ScheduledMatch>,
    gap: u32,
    report: impl Fn(&ScheduledMatch, &ScheduledMatch) -> Violation,
) {
    uses.sort_by_key(|m| m.slot_index);
    for pair in uses.windows(2) {
        if pair[1].day - pair[0].day <= gap as usize {
            violations.push(report(pair[0], pair[1]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams(names: &[&str]) -> Vec<Team> {
        names.iter().map(|n| Team::new(*n)).collect()
    }

    fn placed(a: &str, b: &str, venue: &str, slot_index: usize, day: usize) -> ScheduledMatch {
        ScheduledMatch::new(Fixture::new(a, b), format!("slot {slot_index}"), venue, slot_index, day)
    }

    #[test]
    fn test_valid_input() {
        let c = Constraints::default().with_priority_match("B", "A");
        assert!(validate_input(&teams(&["A", "B"]), &[Venue::new("V1")], &c).is_ok());
    }

    #[test]
    fn test_duplicate_names() {
        let errors = validate_input(
            &teams(&["A", "A"]),
            &[Venue::new("V1"), Venue::new("V1")],
            &Constraints::default(),
        )
        .unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::DuplicateName)
                .count(),
            2
        );
        assert!(errors.iter().any(|e| e.message.contains("venue")));
    }

    #[test]
    fn test_no_venues() {
        let errors = validate_input(&teams(&["A"]), &[], &Constraints::default()).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NoVenues);
    }

    #[test]
    fn test_bad_priority_pairs() {
        let c = Constraints::default()
            .with_priority_match("A", "Z")
            .with_priority_match("B", "B");
        let errors = validate_input(&teams(&["A", "B"]), &[Venue::new("V1")], &c).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::UnknownTeam));
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::SelfPairing));
    }

    #[test]
    fn test_audit_clean_schedule() {
        let s = Schedule {
            matches: vec![
                placed("A", "B", "V1", 0, 0),
                placed("C", "D", "V2", 0, 0),
                placed("A", "C", "V1", 2, 2),
            ],
        };
        assert!(audit_schedule(&s, &Constraints::default().with_avoid_same_matchup_gap(0)).is_empty());
    }

    #[test]
    fn test_audit_double_booking() {
        let s = Schedule {
            matches: vec![placed("A", "B", "V1", 0, 0), placed("A", "C", "V1", 0, 0)],
        };
        let v = audit_schedule(&s, &Constraints::default());
        assert!(v.iter().any(|x| x.violation_type == ViolationType::TeamDoubleBooked && x.entity_id == "A"));
        assert!(v.iter().any(|x| x.violation_type == ViolationType::VenueDoubleBooked));
    }

    #[test]
    fn test_audit_gaps() {
        let s = Schedule {
            matches: vec![placed("A", "B", "V1", 0, 0), placed("B", "A", "V1", 1, 1)],
        };
        let v = audit_schedule(&s, &Constraints::default());
        assert!(v.iter().any(|x| x.violation_type == ViolationType::RestGap));
        assert!(v.iter().any(|x| x.violation_type == ViolationType::MatchupGap));
        assert!(!v.iter().any(|x| x.violation_type == ViolationType::VenueRestGap));
    }

    #[test]
    fn test_audit_exempts_fallback() {
        let s = Schedule {
            matches: vec![
                placed("A", "B", "V1", 0, 0),
                placed("A", "B", "V1", 1, 1).as_fallback(),
            ],
        };
        assert!(audit_schedule(&s, &Constraints::default()).is_empty());
    }

    #[test]
    fn test_audit_ignores_bye() {
        let s = Schedule {
            matches: vec![placed("A", "BYE", "V1", 0, 0), placed("C", "BYE", "V2", 0, 0)],
        };
        assert!(audit_schedule(&s, &Constraints::default()).is_empty());
    }

    #[test]
    fn test_coverage() {
        let fixtures = vec![Fixture::new("A", "B"), Fixture::new("C", "D")];
        let s = Schedule {
            matches: vec![placed("A", "B", "V1", 0, 0), placed("A", "B", "V1", 2, 2)],
        };
        let v = check_coverage(&fixtures, &s);
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].entity_id, "A vs B");
        assert!(v[0].message.contains("extra"));
        assert!(v[1].message.contains("missing"));
    }
}
