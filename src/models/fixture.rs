//! Fixture (unscheduled match) and matchup models.
//!
//! A fixture is a fixture requirement: two teams that must meet, plus the
//! knockout bookkeeping (`match_id`, `round`) when the format has rounds.
//! A matchup is the unordered view of the same pair, used for repeat-meeting
//! gaps and priority lookups.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A match that still needs a slot and a venue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fixture {
    /// Home (first-listed) team.
    pub team1: String,
    /// Away (second-listed) team.
    pub team2: String,
    /// Bracket-order identifier (knockout only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_id: Option<u32>,
    /// Knockout round number, starting at 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<u32>,
}

impl Fixture {
    /// Creates a fixture without round information.
    pub fn new(team1: impl Into<String>, team2: impl Into<String>) -> Self {
        Self {
            team1: team1.into(),
            team2: team2.into(),
            match_id: None,
            round: None,
        }
    }

    /// Tags the fixture with a knockout round and match id.
    pub fn in_round(mut self, round: u32, match_id: u32) -> Self {
        self.round = Some(round);
        self.match_id = Some(match_id);
        self
    }

    /// The unordered pair for this fixture.
    pub fn matchup(&self) -> Matchup {
        Matchup::new(&self.team1, &self.team2)
    }

    /// Whether the given team plays in this fixture.
    pub fn involves(&self, team: &str) -> bool {
        self.team1 == team || self.team2 == team
    }

    /// Display string, e.g. `"Lions vs Tigers"`.
    pub fn label(&self) -> String {
        format!("{} vs {}", self.team1, self.team2)
    }
}

/// Unordered team pair. Names are stored sorted so `(a, b) == (b, a)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Matchup {
    low: String,
    high: String,
}

impl Matchup {
    /// Creates a normalized matchup.
    pub fn new(a: &str, b: &str) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self {
            low: low.to_string(),
            high: high.to_string(),
        }
    }

    /// The two team names in sorted order.
    pub fn teams(&self) -> (&str, &str) {
        (&self.low, &self.high)
    }
}

impl fmt::Display for Matchup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.low, self.high)
    }
}
