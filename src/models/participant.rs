//! Team and venue models.
//!
//! Both are identified purely by name, unique within one tournament.
//! They serialize as `{"name": "..."}` objects on the request boundary.

use serde::{Deserialize, Serialize};

/// Sentinel opponent: a team paired against `BYE` advances without playing.
pub const BYE: &str = "BYE";

/// Placeholder for a bracket slot whose team is not yet known.
pub const TBD: &str = "TBD";

/// A competing team.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team {
    /// Team name (unique within a tournament).
    pub name: String,
}

/// A venue that can host one match per slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Venue {
    /// Venue name (unique within a tournament).
    pub name: String,
}

impl Team {
    /// Creates a team.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Venue {
    /// Creates a venue.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Whether a team name is the bye sentinel.
#[inline]
pub fn is_bye(team: &str) -> bool {
    team == BYE
}
