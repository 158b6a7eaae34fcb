//! Fixture ordering before placement.
//!
//! The packer walks its queue in order on every slot, so fixtures near the
//! front get the first chance at each slot. Ordering is therefore the only
//! lever for favouring particular pairings.
//!
//! # Usage
//!
//! ```
//! use u_fixture::dispatching::prioritize;
//! use u_fixture::models::Fixture;
//!
//! let fixtures = vec![Fixture::new("A", "B"), Fixture::new("C", "D")];
//! let ordered = prioritize(fixtures, &[("D".into(), "C".into())]);
//! assert_eq!(ordered[0], Fixture::new("C", "D"));
//! ```

mod priority;

pub use priority::{prioritize, PrioritySet};
