// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod bracket;
mod draw;
mod error;
mod pairing;
mod schedule;
mod types;
mod validation;
mod venue;

#[cfg(test)]
mod tests;

pub use bracket::{advance_winner, auto_advance_byes};
pub use draw::{GroupAssignment, GroupDraw, draw};
pub use pairing::{MIN_ENTRANTS, generate_group_pairings, generate_pairings};
pub use schedule::{assign_schedule, assign_schedule_with};
pub use venue::{PoolOrderVenueSelector, PriorityVenueSelector, RandomVenueSelector, VenueSelector};

// Re-export public types
pub use error::FixtureError;
pub use types::{
    AbstractMatch, DEFAULT_DAY_START, EntrantId, Group, GroupId, ScheduledMatch, SchedulingConfig,
    TournamentFormat, Venue, VenueAssignmentMode, VenueId, VenueReservation,
};
pub use validation::{validate_group_assignment, validate_schedule};
