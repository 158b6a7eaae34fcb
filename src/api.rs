//! Request/response boundary.
//!
//! Transport-agnostic request and response types plus the functions that
//! serve them. A transport (HTTP, CLI, queue worker) decodes a request,
//! calls one function, and encodes the response unchanged.
//!
//! | Operation | Request | Response |
//! |-----------|---------|----------|
//! | schedule | [`TournamentInput`] | [`ScheduleResponse`] |
//! | knockout bracket | [`KnockoutBracketRequest`] | [`BracketResponse`] |
//! | knockout next round | [`KnockoutRoundRequest`] | [`NextRoundResponse`] |
//! | liveness | none | [`StatusResponse`] |
//!
//! Business errors come back as an `{"error": "..."}` payload variant, not
//! as a transport failure; [`ScheduleResponse::is_error`] and friends let a
//! transport map them to a status code if it wants to.

use serde::{Deserialize, Serialize};

use crate::dispatching::prioritize;
use crate::error::{Result, SchedulerError};
use crate::generation::{generate_fixtures, TournamentFormat};
use crate::knockout::{BracketProjector, NextRoundPairer};
use crate::models::{
    parse_start_date, Bracket, BracketRound, Constraints, MatchResult, RoundMatch, Schedule,
    SlotCalendar, Team, Venue,
};
use crate::scheduler::SlotPacker;
use crate::validation::validate_input;

/// Liveness message.
pub const STATUS_MESSAGE: &str = "u-fixture scheduler is running";

/// A tournament to schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentInput {
    /// Entered teams, in seeding order.
    pub teams: Vec<Team>,
    /// Available venues.
    pub venues: Vec<Venue>,
    /// `round_robin`, `league`, or `knockout`.
    pub format: String,
    /// Daily slot template, e.g. `["Morning", "Evening"]`.
    #[serde(default)]
    pub time_slots: Vec<String>,
    /// First day, `YYYY-MM-DD`.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Constraint overrides.
    #[serde(default)]
    pub constraints: Option<Constraints>,
}

/// Request to project a knockout bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnockoutBracketRequest {
    /// Caller's tournament identifier, echoed back.
    pub tournament_id: String,
    /// Number of entrants.
    pub num_teams: usize,
    /// Venues to rotate through.
    pub venues: Vec<Venue>,
    /// Slot template.
    #[serde(default)]
    pub time_slots: Vec<String>,
    /// First day, `YYYY-MM-DD`.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Accepted for symmetry with other requests; projection ignores it.
    #[serde(default)]
    pub constraints: Option<Constraints>,
}

/// Request to open the next knockout round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnockoutRoundRequest {
    /// Caller's tournament identifier, echoed back.
    pub tournament_id: String,
    /// The round the results belong to.
    pub current_round: u32,
    /// Winners of the completed round.
    pub match_results: Vec<MatchResult>,
    /// Venues to rotate through.
    pub venues: Vec<Venue>,
    /// Slot template.
    #[serde(default)]
    pub time_slots: Vec<String>,
    /// First day of the new round, `YYYY-MM-DD`.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Only `max_matches_per_day` is honoured.
    #[serde(default)]
    pub constraints: Option<Constraints>,
}

/// Business error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

impl From<SchedulerError> for ErrorResponse {
    fn from(e: SchedulerError) -> Self {
        Self {
            error: e.to_string(),
        }
    }
}

/// Response to a schedule request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScheduleResponse {
    /// Knockout: bracket skeleton plus the scheduled first round.
    Knockout {
        /// Always `knockout`.
        format: TournamentFormat,
        /// Rounds needed to find a winner.
        total_rounds: u32,
        /// Number of entrants.
        total_teams: usize,
        /// Emitted bracket rounds.
        bracket: Vec<BracketRound>,
        /// Scheduled first-round fixtures.
        current_round_schedule: Schedule,
    },
    /// Round robin or league.
    Fixtures {
        /// Every fixture with its slot and venue.
        schedule: Schedule,
    },
    /// Business error.
    Error(ErrorResponse),
}

/// Response to a bracket request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BracketResponse {
    /// Projected bracket.
    Bracket {
        /// Echoed identifier.
        tournament_id: String,
        /// Rounds needed to find a winner.
        total_rounds: u32,
        /// Number of entrants.
        total_teams: usize,
        /// Emitted bracket rounds.
        bracket: Vec<BracketRound>,
    },
    /// Business error.
    Error(ErrorResponse),
}

/// Response to a next-round request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NextRoundResponse {
    /// The new round.
    Round {
        /// Echoed identifier.
        tournament_id: String,
        /// The new round number.
        current_round: u32,
        /// Number of new fixtures.
        total_matches: usize,
        /// New fixtures with slot and venue.
        schedule: Vec<RoundMatch>,
    },
    /// Business error.
    Error(ErrorResponse),
}

/// Liveness response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Fixed message.
    pub message: String,
}

/// Typed result of scheduling a tournament.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TournamentPlan {
    /// Round robin or league schedule.
    Fixtures(Schedule),
    /// Knockout bracket and its scheduled first round.
    Knockout {
        /// Projected bracket with round 1 resolved.
        bracket: Bracket,
        /// Scheduled first-round fixtures.
        first_round: Schedule,
    },
}

impl ScheduleResponse {
    /// Whether this is an error payload.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl BracketResponse {
    /// Whether this is an error payload.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl NextRoundResponse {
    /// Whether this is an error payload.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl From<TournamentPlan> for ScheduleResponse {
    fn from(plan: TournamentPlan) -> Self {
        match plan {
            TournamentPlan::Fixtures(schedule) => Self::Fixtures { schedule },
            TournamentPlan::Knockout {
                bracket,
                first_round,
            } => Self::Knockout {
                format: TournamentFormat::Knockout,
                total_rounds: bracket.total_rounds,
                total_teams: bracket.total_teams,
                bracket: bracket.rounds,
                current_round_schedule: first_round,
            },
        }
    }
}

/// Generates, orders, and packs the tournament's fixtures.
///
/// The format is checked before any allocation work starts.
pub fn plan_tournament(input: &TournamentInput) -> Result<TournamentPlan> {
    let format: TournamentFormat = input.format.parse()?;
    let constraints = input.constraints.clone().unwrap_or_default();

    if let Err(findings) = validate_input(&input.teams, &input.venues, &constraints) {
        for finding in &findings {
            tracing::warn!(kind = ?finding.kind, "{finding}");
        }
    }

    let fixtures = generate_fixtures(&input.teams, format);
    let fixtures = prioritize(fixtures, &constraints.priority_matches);

    let start = parse_start_date(input.start_date.as_deref());
    let calendar = SlotCalendar::new(&input.time_slots, start);
    let schedule = SlotPacker::new(calendar, &input.venues, constraints)
        .pack(fixtures)
        .schedule;

    match format {
        TournamentFormat::Knockout => {
            let bracket = BracketProjector::new(&input.venues, &input.time_slots, start)
                .project_with_first_round(input.teams.len(), &schedule.matches)?;
            Ok(TournamentPlan::Knockout {
                bracket,
                first_round: schedule,
            })
        }
        TournamentFormat::RoundRobin | TournamentFormat::League => {
            Ok(TournamentPlan::Fixtures(schedule))
        }
    }
}

/// Serves a schedule request.
pub fn schedule_tournament(input: &TournamentInput) -> ScheduleResponse {
    tracing::info!(format = %input.format, teams = input.teams.len(), "schedule request");
    match plan_tournament(input) {
        Ok(plan) => plan.into(),
        Err(e) => {
            tracing::info!("schedule request rejected: {e}");
            ScheduleResponse::Error(e.into())
        }
    }
}

/// Serves a bracket request.
pub fn knockout_bracket(request: &KnockoutBracketRequest) -> BracketResponse {
    tracing::info!(
        tournament_id = %request.tournament_id,
        num_teams = request.num_teams,
        "bracket request"
    );
    let start = parse_start_date(request.start_date.as_deref());
    let projector = BracketProjector::new(&request.venues, &request.time_slots, start);
    match projector.project(request.num_teams) {
        Ok(bracket) => BracketResponse::Bracket {
            tournament_id: request.tournament_id.clone(),
            total_rounds: bracket.total_rounds,
            total_teams: bracket.total_teams,
            bracket: bracket.rounds,
        },
        Err(e) => {
            tracing::warn!("bracket projection failed: {e}");
            BracketResponse::Error(e.into())
        }
    }
}

/// Serves a next-round request.
pub fn knockout_next_round(request: &KnockoutRoundRequest) -> NextRoundResponse {
    tracing::info!(
        tournament_id = %request.tournament_id,
        round = request.current_round,
        results = request.match_results.len(),
        "next-round request"
    );
    let start = parse_start_date(request.start_date.as_deref());
    let constraints = request.constraints.clone().unwrap_or_default();
    let pairer = NextRoundPairer::new(&request.venues, &request.time_slots, start, &constraints);
    match pairer.advance(request.current_round, &request.match_results) {
        Ok(next) => NextRoundResponse::Round {
            tournament_id: request.tournament_id.clone(),
            current_round: next.round,
            total_matches: next.matches.len(),
            schedule: next.matches,
        },
        Err(e) => {
            tracing::warn!("next-round pairing failed: {e}");
            NextRoundResponse::Error(e.into())
        }
    }
}

/// Serves a liveness probe.
pub fn status() -> StatusResponse {
    StatusResponse {
        message: STATUS_MESSAGE.to_string(),
    }
}
