//! Fixture generation.
//!
//! Builds the raw fixture list for a tournament format:
//!
//! | Format | Fixtures | Count |
//! |--------|----------|-------|
//! | `round_robin` | every unordered pair once | n(n-1)/2 |
//! | `league` | every ordered pair once (home and away) | n(n-1) |
//! | `knockout` | input order taken pairwise, odd team meets `BYE` | ceil(n/2) |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SchedulerError;
use crate::models::{Fixture, Team, BYE};

/// Supported tournament formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    /// Single round robin.
    RoundRobin,
    /// Double round robin with reversed home/away roles.
    League,
    /// Single elimination.
    Knockout,
}

impl TournamentFormat {
    /// Wire tag of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoundRobin => "round_robin",
            Self::League => "league",
            Self::Knockout => "knockout",
        }
    }
}

impl fmt::Display for TournamentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TournamentFormat {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "round_robin" => Ok(Self::RoundRobin),
            "league" => Ok(Self::League),
            "knockout" => Ok(Self::Knockout),
            other => Err(SchedulerError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Generates the fixture list for a format, in generation order.
pub fn generate_fixtures(teams: &[Team], format: TournamentFormat) -> Vec<Fixture> {
    let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
    match format {
        TournamentFormat::RoundRobin => pairs(&names)
            .map(|(a, b)| Fixture::new(a, b))
            .collect(),
        TournamentFormat::League => pairs(&names)
            .flat_map(|(a, b)| [Fixture::new(a, b), Fixture::new(b, a)])
            .collect(),
        TournamentFormat::Knockout => names
            .chunks(2)
            .zip(1u32..)
            .map(|(pair, match_id)| {
                let away = pair.get(1).copied().unwrap_or(BYE);
                Fixture::new(pair[0], away).in_round(1, match_id)
            })
            .collect(),
    }
}

/// All `(names[i], names[j])` with `i < j`, in lexicographic index order.
fn pairs<'a>(names: &'a [&'a str]) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
    names
        .iter()
        .enumerate()
        .flat_map(move |(i, &a)| names[i + 1..].iter().map(move |&b| (a, b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn teams(n: usize) -> Vec<Team> {
        (0..n).map(|i| Team::new(format!("T{i}"))).collect()
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("round_robin".parse::<TournamentFormat>(), Ok(TournamentFormat::RoundRobin));
        assert_eq!("league".parse::<TournamentFormat>(), Ok(TournamentFormat::League));
        assert_eq!("knockout".parse::<TournamentFormat>(), Ok(TournamentFormat::Knockout));

        let err = "swiss".parse::<TournamentFormat>().unwrap_err();
        assert_eq!(err, SchedulerError::UnsupportedFormat("swiss".into()));
        assert_eq!(err.to_string(), "Unsupported tournament format");
    }

    #[test]
    fn test_round_robin_pairs() {
        let fixtures = generate_fixtures(&teams(5), TournamentFormat::RoundRobin);
        assert_eq!(fixtures.len(), 10);

        let unique: HashSet<_> = fixtures.iter().map(Fixture::matchup).collect();
        assert_eq!(unique.len(), 10);
        assert_eq!(fixtures[0], Fixture::new("T0", "T1"));
        assert_eq!(fixtures[4], Fixture::new("T1", "T2"));
    }

    #[test]
    fn test_league_home_and_away() {
        let fixtures = generate_fixtures(&teams(4), TournamentFormat::League);
        assert_eq!(fixtures.len(), 12);
        assert_eq!(fixtures[0], Fixture::new("T0", "T1"));
        assert_eq!(fixtures[1], Fixture::new("T1", "T0"));

        let ordered: HashSet<_> = fixtures
            .iter()
            .map(|f| (f.team1.clone(), f.team2.clone()))
            .collect();
        assert_eq!(ordered.len(), 12);
    }

    #[test]
    fn test_knockout_with_bye() {
        let fixtures = generate_fixtures(&teams(5), TournamentFormat::Knockout);
        assert_eq!(fixtures.len(), 3);
        assert_eq!(fixtures[0], Fixture::new("T0", "T1").in_round(1, 1));
        assert_eq!(fixtures[1], Fixture::new("T2", "T3").in_round(1, 2));
        assert_eq!(fixtures[2], Fixture::new("T4", "BYE").in_round(1, 3));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(generate_fixtures(&[], TournamentFormat::RoundRobin).is_empty());
        assert!(generate_fixtures(&teams(1), TournamentFormat::League).is_empty());
        assert_eq!(
            generate_fixtures(&teams(1), TournamentFormat::Knockout),
            vec![Fixture::new("T0", "BYE").in_round(1, 1)]
        );
    }
}
