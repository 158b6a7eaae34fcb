//! Tournament fixture scheduling.
//!
//! Turns a team list, a venue list, and a daily slot template into a dated
//! fixture list, and manages knockout brackets round by round.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Team`, `Venue`, `Fixture`, `Constraints`,
//!   `SlotCalendar`, `Schedule`, `Bracket`
//! - **`generation`**: Fixture lists for round robin, league, and knockout
//! - **`dispatching`**: Priority reordering of the fixture queue
//! - **`scheduler`**: Greedy slot/venue packer, venue selection, and KPIs
//! - **`knockout`**: Bracket projection and next-round pairing
//! - **`validation`**: Input checks and schedule audits
//! - **`api`**: Request/response types and the operations that serve them
//! - **`logging`**: Subscriber setup for binaries
//!
//! # Pipeline
//!
//! ```text
//! teams ─▶ generate_fixtures ─▶ prioritize ─▶ SlotPacker::pack ─▶ Schedule
//!                                                   │
//!                                      (knockout) BracketProjector
//! ```
//!
//! # Example
//!
//! ```
//! use u_fixture::api::{schedule_tournament, ScheduleResponse, TournamentInput};
//! use u_fixture::models::{Team, Venue};
//!
//! let input = TournamentInput {
//!     teams: vec![Team::new("A"), Team::new("B"), Team::new("C")],
//!     venues: vec![Venue::new("Oval")],
//!     format: "round_robin".into(),
//!     time_slots: vec!["Morning".into()],
//!     start_date: Some("2026-05-01".into()),
//!     constraints: None,
//! };
//!
//! match schedule_tournament(&input) {
//!     ScheduleResponse::Fixtures { schedule } => assert_eq!(schedule.len(), 3),
//!     other => panic!("unexpected response: {other:?}"),
//! }
//! ```
//!
//! # References
//!
//! - Kendall et al. (2010), "Scheduling in sports: An annotated bibliography"
//! - Ribeiro (2012), "Sports scheduling: Problems and applications"

pub mod api;
pub mod dispatching;
pub mod error;
pub mod generation;
pub mod knockout;
pub mod logging;
pub mod models;
pub mod scheduler;
pub mod validation;
