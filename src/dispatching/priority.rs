//! Priority pairings.
//!
//! A stable partition, not a sort: priority fixtures move ahead of the rest
//! but keep their generation order, and so do the others. The position of a
//! pair in the priority list carries no rank.

use std::collections::HashSet;

use crate::models::{Fixture, Matchup};

/// Set of normalized priority matchups.
#[derive(Debug, Clone, Default)]
pub struct PrioritySet {
    pairs: HashSet<Matchup>,
}

impl PrioritySet {
    /// Builds the set from `[team, team]` pairs in any order.
    pub fn new(pairs: &[(String, String)]) -> Self {
        Self {
            pairs: pairs.iter().map(|(a, b)| Matchup::new(a, b)).collect(),
        }
    }

    /// Whether the fixture's pairing is prioritized.
    pub fn contains(&self, fixture: &Fixture) -> bool {
        self.pairs.contains(&fixture.matchup())
    }

    /// Number of distinct priority matchups.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pairing is prioritized.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Moves fixtures whose pairing is prioritized to the front, stably.
pub fn prioritize(fixtures: Vec<Fixture>, priority: &[(String, String)]) -> Vec<Fixture> {
    if priority.is_empty() {
        return fixtures;
    }
    let set = PrioritySet::new(priority);
    let (mut first, rest): (Vec<_>, Vec<_>) = fixtures.into_iter().partition(|f| set.contains(f));
    tracing::debug!(
        prioritized = first.len(),
        remaining = rest.len(),
        "reordered fixtures by priority pairings"
    );
    first.extend(rest);
    first
}
