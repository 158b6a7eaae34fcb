//! Greedy fixture allocation and schedule metrics.
//!
//! # Algorithm
//!
//! `SlotPacker` walks an unbounded sequence of slots and places every
//! pending fixture that passes the concurrency, daily, team, matchup and
//! venue checks. It never backtracks. A fixed iteration cap guarantees
//! termination; whatever is still pending at the cap is placed by the
//! fallback and flagged.
//!
//! # KPI
//!
//! `ScheduleKpi` summarises a produced schedule: span in days, venue
//! spread, per-team load and fallback count.

mod kpi;
mod packer;
mod state;
mod venue;

pub use kpi::ScheduleKpi;
pub use packer::{Deferral, PackOutcome, SlotPacker, FALLBACK_VENUE, ITERATION_FACTOR};
pub use state::{AllocatorState, Placement, SlotState};
pub use venue::{VenuePolicy, VenueSelector};
