// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::FixtureError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use time::{Date, Duration, PrimitiveDateTime, Time};

/// Daily anchor used when no explicit start time is configured.
pub const DEFAULT_DAY_START: Time = time::macros::time!(9:00);

const MINUTES_PER_DAY: i64 = 24 * 60;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from any string-like value.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value.to_string())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(
    /// Identifier of a team or registration. Only compared for equality.
    EntrantId
);

opaque_id!(
    /// Identifier of a group that already exists on the caller's side.
    GroupId
);

opaque_id!(
    /// Identifier of a venue.
    VenueId
);

/// A named group that entrants are drawn into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Caller-assigned identifier.
    pub id: GroupId,
    /// Display name (e.g. "Group A").
    pub name: String,
}

impl Group {
    /// Creates a new group.
    #[must_use]
    pub fn new(id: impl Into<GroupId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A venue in the scheduling pool.
///
/// Larger `priority` values are preferred by the priority strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    /// Caller-assigned identifier.
    pub id: VenueId,
    /// Preference weight. Higher wins.
    pub priority: u32,
}

impl Venue {
    /// Creates a new venue.
    #[must_use]
    pub fn new(id: impl Into<VenueId>, priority: u32) -> Self {
        Self {
            id: id.into(),
            priority,
        }
    }
}

/// Supported tournament formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentFormat {
    /// Every entrant meets every other entrant once.
    RoundRobin,
    /// Knockout bracket, losers leave after one defeat.
    SingleElimination,
}

impl TournamentFormat {
    /// Canonical upper-case name of the format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RoundRobin => "ROUND_ROBIN",
            Self::SingleElimination => "SINGLE_ELIMINATION",
        }
    }
}

impl FromStr for TournamentFormat {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_selector(s).as_str() {
            "ROUND_ROBIN" | "ROUNDROBIN" | "LEAGUE" => Ok(Self::RoundRobin),
            "SINGLE_ELIMINATION" | "KNOCKOUT" => Ok(Self::SingleElimination),
            _ => Err(FixtureError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for TournamentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the assigner picks a venue for each match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VenueAssignmentMode {
    /// Venues are pre-assigned on the matches; only dates are computed.
    Manual,
    /// Venue chosen uniformly at random among free venues.
    Random,
    /// Highest-priority free venue, equal priorities rotated.
    #[default]
    Priority,
}

impl VenueAssignmentMode {
    /// Canonical upper-case name of the mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "MANUAL",
            Self::Random => "RANDOM",
            Self::Priority => "PRIORITY",
        }
    }

    /// Whether this mode has to pick venues from the pool.
    #[must_use]
    pub const fn requires_venue_pool(&self) -> bool {
        matches!(self, Self::Random | Self::Priority)
    }
}

impl FromStr for VenueAssignmentMode {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_selector(s).as_str() {
            "MANUAL" => Ok(Self::Manual),
            "RANDOM" => Ok(Self::Random),
            "PRIORITY" => Ok(Self::Priority),
            _ => Err(FixtureError::invalid(format!(
                "unknown venue assignment mode '{s}'"
            ))),
        }
    }
}

impl std::fmt::Display for VenueAssignmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize_selector(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

/// A match without date or venue.
///
/// `team_a`/`team_b` are `None` while the slot waits for a winner from an
/// earlier round. A bye carries its entrant in `team_a` and never gets a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbstractMatch {
    /// Round number, contiguous from 1.
    pub round_number: u32,
    /// Match number within the round, contiguous from 1.
    pub match_number: u32,
    /// First slot.
    pub team_a: Option<EntrantId>,
    /// Second slot.
    pub team_b: Option<EntrantId>,
    /// Group tag when the match belongs to a group stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupId>,
    /// Venue fixed by the caller (used in manual venue mode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<VenueId>,
    /// Automatic advance of `team_a`; no game is played.
    #[serde(default)]
    pub bye: bool,
}

impl AbstractMatch {
    /// Creates a match between two (possibly pending) slots.
    #[must_use]
    pub fn new(
        round_number: u32,
        match_number: u32,
        team_a: Option<EntrantId>,
        team_b: Option<EntrantId>,
    ) -> Self {
        Self {
            round_number,
            match_number,
            team_a,
            team_b,
            group: None,
            venue: None,
            bye: false,
        }
    }

    /// Creates a bye that advances `entrant` without a game.
    #[must_use]
    pub fn bye(round_number: u32, match_number: u32, entrant: EntrantId) -> Self {
        Self {
            round_number,
            match_number,
            team_a: Some(entrant),
            team_b: None,
            group: None,
            venue: None,
            bye: true,
        }
    }

    /// Tags the match with a group.
    #[must_use]
    pub fn with_group(mut self, group: GroupId) -> Self {
        self.group = Some(group);
        self
    }

    /// Pre-assigns a venue.
    #[must_use]
    pub fn with_venue(mut self, venue: VenueId) -> Self {
        self.venue = Some(venue);
        self
    }

    /// Whether `entrant` occupies either slot.
    #[must_use]
    pub fn involves(&self, entrant: &EntrantId) -> bool {
        self.team_a.as_ref() == Some(entrant) || self.team_b.as_ref() == Some(entrant)
    }

    /// Scheduling priority key: earlier rounds first.
    #[must_use]
    pub const fn order_key(&self) -> (u32, u32) {
        (self.round_number, self.match_number)
    }
}

/// An abstract match with its date and venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMatch {
    /// The pairing being scheduled.
    pub fixture: AbstractMatch,
    /// Kick-off. `None` for byes.
    pub scheduled_at: Option<PrimitiveDateTime>,
    /// Assigned venue, if any.
    pub venue: Option<VenueId>,
}

impl ScheduledMatch {
    /// The occupied venue window `[start, start + duration + rest)`.
    #[must_use]
    pub fn window(&self, slot_minutes: u32) -> Option<(PrimitiveDateTime, PrimitiveDateTime)> {
        let start = self.scheduled_at?;
        let end = start.checked_add(Duration::minutes(i64::from(slot_minutes)))?;
        Some((start, end))
    }
}

/// A period in which a venue is already occupied outside this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueReservation {
    /// The booked venue.
    pub venue: VenueId,
    /// Start of the booking (inclusive).
    pub start: PrimitiveDateTime,
    /// End of the booking (exclusive).
    pub end: PrimitiveDateTime,
}

impl VenueReservation {
    /// Creates a reservation.
    #[must_use]
    pub fn new(venue: impl Into<VenueId>, start: PrimitiveDateTime, end: PrimitiveDateTime) -> Self {
        Self {
            venue: venue.into(),
            start,
            end,
        }
    }
}

/// Parameters of one schedule assignment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingConfig {
    start_date: Date,
    end_date: Date,
    day_start: Time,
    matches_per_day: u32,
    match_duration_minutes: u32,
    rest_time_minutes: u32,
    venue_assignment_mode: VenueAssignmentMode,
    venues: Vec<Venue>,
    reservations: Vec<VenueReservation>,
}

impl SchedulingConfig {
    /// Creates a scheduling configuration with priority venue mode, no venues
    /// and the default day start.
    ///
    /// Rules that depend on the day start, the venue pool or reservations are
    /// checked by [`Self::validate`] once the builder chain is complete.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `end_date` is before `start_date`
    /// - `matches_per_day` is zero
    /// - `match_duration_minutes` is zero
    pub fn new(
        start_date: Date,
        end_date: Date,
        matches_per_day: u32,
        match_duration_minutes: u32,
        rest_time_minutes: u32,
    ) -> Result<Self, FixtureError> {
        let config = Self {
            start_date,
            end_date,
            day_start: DEFAULT_DAY_START,
            matches_per_day,
            match_duration_minutes,
            rest_time_minutes,
            venue_assignment_mode: VenueAssignmentMode::default(),
            venues: Vec::new(),
            reservations: Vec::new(),
        };
        config.validate_window()?;
        Ok(config)
    }

    /// Sets the daily anchor time of the first slot.
    #[must_use]
    pub fn with_day_start(mut self, day_start: Time) -> Self {
        self.day_start = day_start;
        self
    }

    /// Sets the venue assignment mode.
    #[must_use]
    pub fn with_mode(mut self, mode: VenueAssignmentMode) -> Self {
        self.venue_assignment_mode = mode;
        self
    }

    /// Replaces the venue pool.
    #[must_use]
    pub fn with_venues(mut self, venues: Vec<Venue>) -> Self {
        self.venues = venues;
        self
    }

    /// Replaces the list of pre-existing venue bookings.
    #[must_use]
    pub fn with_reservations(mut self, reservations: Vec<VenueReservation>) -> Self {
        self.reservations = reservations;
        self
    }

    /// Returns the first schedulable date.
    #[must_use]
    pub const fn start_date(&self) -> Date {
        self.start_date
    }

    /// Returns the last schedulable date.
    #[must_use]
    pub const fn end_date(&self) -> Date {
        self.end_date
    }

    /// Returns the time of the first slot of each day.
    #[must_use]
    pub const fn day_start(&self) -> Time {
        self.day_start
    }

    /// Returns the number of slots per day.
    #[must_use]
    pub const fn matches_per_day(&self) -> u32 {
        self.matches_per_day
    }

    /// Returns the length of a match in minutes.
    #[must_use]
    pub const fn match_duration_minutes(&self) -> u32 {
        self.match_duration_minutes
    }

    /// Returns the turnover time after each match in minutes.
    #[must_use]
    pub const fn rest_time_minutes(&self) -> u32 {
        self.rest_time_minutes
    }

    /// Returns the venue assignment mode.
    #[must_use]
    pub const fn venue_assignment_mode(&self) -> VenueAssignmentMode {
        self.venue_assignment_mode
    }

    /// Returns the venue pool in caller order.
    #[must_use]
    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    /// Returns the pre-existing venue bookings.
    #[must_use]
    pub fn reservations(&self) -> &[VenueReservation] {
        &self.reservations
    }

    /// Length of one venue window: match plus rest.
    #[must_use]
    pub const fn slot_minutes(&self) -> u32 {
        self.match_duration_minutes.saturating_add(self.rest_time_minutes)
    }

    /// Computes the start of `slot` (0-based) on `day`.
    ///
    /// # Errors
    ///
    /// Returns an error if the result cannot be represented.
    pub fn slot_start(&self, day: Date, slot: u32) -> Result<PrimitiveDateTime, FixtureError> {
        let offset = Duration::minutes(i64::from(slot) * i64::from(self.slot_minutes()));
        PrimitiveDateTime::new(day, self.day_start)
            .checked_add(offset)
            .ok_or_else(|| FixtureError::DateArithmeticOverflow {
                operation: format!("computing slot {slot} on {day}"),
            })
    }

    /// Checks every structural constraint of the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if:
    /// - the window is inverted
    /// - the day capacity or match duration is zero
    /// - the last slot of a day would start after midnight
    /// - a venue id appears twice
    /// - a reservation ends before it starts
    pub fn validate(&self) -> Result<(), FixtureError> {
        self.validate_window()?;

        // Rule: every slot of a day starts on that same day
        let (hour, minute, _) = self.day_start.as_hms();
        let first_slot = i64::from(hour) * 60 + i64::from(minute);
        let last_slot = first_slot
            + i64::from(self.matches_per_day - 1) * i64::from(self.slot_minutes());
        if last_slot >= MINUTES_PER_DAY {
            return Err(FixtureError::invalid(format!(
                "{} slots of {} minutes starting at {} do not fit in one day",
                self.matches_per_day,
                self.slot_minutes(),
                self.day_start
            )));
        }

        let mut seen = HashSet::new();
        for venue in &self.venues {
            if !seen.insert(&venue.id) {
                return Err(FixtureError::invalid(format!(
                    "venue '{}' appears more than once",
                    venue.id
                )));
            }
        }

        for reservation in &self.reservations {
            if reservation.end <= reservation.start {
                return Err(FixtureError::invalid(format!(
                    "reservation of venue '{}' ends before it starts",
                    reservation.venue
                )));
            }
        }

        Ok(())
    }

    /// Window and capacity rules that hold regardless of the builder settings.
    fn validate_window(&self) -> Result<(), FixtureError> {
        if self.end_date < self.start_date {
            return Err(FixtureError::invalid(format!(
                "end date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }

        if self.matches_per_day == 0 {
            return Err(FixtureError::invalid("matches per day must be at least 1"));
        }

        if self.match_duration_minutes == 0 {
            return Err(FixtureError::invalid(
                "match duration must be at least 1 minute",
            ));
        }

        Ok(())
    }
}
