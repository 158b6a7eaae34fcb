//! Knockout bracket models.
//!
//! A bracket is a list of rounds; every match past round 1 names the two
//! earlier matches whose winners feed it. Later rounds carry `"TBD"` teams
//! until results arrive.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Reference to an earlier bracket match, rendered as `"Round r, Match m"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Feeder {
    /// Round of the feeding match.
    pub round: u32,
    /// Match number within that round.
    pub match_id: u32,
}

impl fmt::Display for Feeder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Round {}, Match {}", self.round, self.match_id)
    }
}

impl FromStr for Feeder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || format!("malformed feeder reference: {s:?}");
        let (round, match_id) = s.split_once(", ").ok_or_else(malformed)?;
        let round = round
            .strip_prefix("Round ")
            .and_then(|r| r.parse().ok())
            .ok_or_else(malformed)?;
        let match_id = match_id
            .strip_prefix("Match ")
            .and_then(|m| m.parse().ok())
            .ok_or_else(malformed)?;
        Ok(Self { round, match_id })
    }
}

impl Serialize for Feeder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Feeder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// The two matches feeding a bracket match. Both are `None` in round 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FromMatches {
    /// Feeds `team1`.
    pub winner_1: Option<Feeder>,
    /// Feeds `team2`.
    pub winner_2: Option<Feeder>,
}

impl FromMatches {
    /// Feeders of match `match_id` in round `round`: matches `2m-1` and `2m`
    /// of the previous round. Round 1 has none.
    pub fn for_match(round: u32, match_id: u32) -> Self {
        if round <= 1 {
            return Self::default();
        }
        Self {
            winner_1: Some(Feeder {
                round: round - 1,
                match_id: (2 * match_id).saturating_sub(1),
            }),
            winner_2: Some(Feeder {
                round: round - 1,
                match_id: 2 * match_id,
            }),
        }
    }
}

/// One match slot in a projected bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketMatch {
    /// Match number within the round, starting at 1.
    pub match_id: u32,
    /// Round number, starting at 1.
    pub round: u32,
    /// Display string, `"<team1> vs <team2>"`.
    #[serde(rename = "match")]
    pub label: String,
    /// First team, or `"TBD"`.
    pub team1: String,
    /// Second team, or `"TBD"`.
    pub team2: String,
    /// Planned slot label.
    pub time_slot: String,
    /// Planned venue.
    pub venue: String,
    /// Matches whose winners meet here.
    pub from_matches: FromMatches,
}

/// All matches of one bracket round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketRound {
    /// Round number.
    pub round: u32,
    /// Number of matches in the round.
    pub total_matches: usize,
    /// The matches.
    pub matches: Vec<BracketMatch>,
}

/// A projected knockout bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    /// `ceil(log2(total_teams))`, or 1 for fewer than two teams.
    pub total_rounds: u32,
    /// Number of entrants.
    pub total_teams: usize,
    /// Emitted rounds; may be fewer than `total_rounds` when a round
    /// would hold zero matches.
    pub rounds: Vec<BracketRound>,
}

impl Bracket {
    /// Looks up a round by number.
    pub fn round(&self, round: u32) -> Option<&BracketRound> {
        self.rounds.iter().find(|r| r.round == round)
    }

    /// Total matches across emitted rounds.
    pub fn match_count(&self) -> usize {
        self.rounds.iter().map(|r| r.total_matches).sum()
    }
}

/// A result reported for a completed knockout match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Bracket-order identifier of the completed match.
    pub match_id: u32,
    /// Winning team.
    pub winner: String,
}

impl MatchResult {
    /// Creates a result.
    pub fn new(match_id: u32, winner: impl Into<String>) -> Self {
        Self {
            match_id,
            winner: winner.into(),
        }
    }
}

/// A next-round fixture with its simplified schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundMatch {
    /// Match number within the new round.
    pub match_id: u32,
    /// The new round number.
    pub round: u32,
    /// Display string, `"<team1> vs <team2>"`.
    #[serde(rename = "match")]
    pub label: String,
    /// First winner.
    pub team1: String,
    /// Second winner, or `"BYE"`.
    pub team2: String,
    /// Slot label.
    pub time_slot: String,
    /// Venue.
    pub venue: String,
    /// Match ids of the previous round that fed this one.
    pub from_matches: Vec<u32>,
}
