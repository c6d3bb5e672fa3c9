// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::EntrantId;
use time::Date;

/// Errors that can occur while drawing, pairing or scheduling fixtures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureError {
    /// Inputs are structurally unusable (no groups, empty window, zero capacity).
    InvalidConfiguration {
        /// Description of the offending input.
        reason: String,
    },
    /// Not enough entrants to build a pairing.
    InsufficientEntrants {
        /// Minimum number of entrants required.
        required: usize,
        /// Number of entrants supplied.
        provided: usize,
    },
    /// Tournament format is not one of the supported formats.
    UnsupportedFormat(String),
    /// The date window cannot hold every match at the configured density.
    SchedulingWindowExhausted {
        /// Last date of the scheduling window.
        end_date: Date,
        /// Matches placed before the window ran out.
        scheduled: usize,
        /// Matches that needed a slot.
        total: usize,
    },
    /// A venue is required but the venue pool is empty.
    NoVenueAvailable,
    /// The same entrant was supplied more than once.
    DuplicateEntrant(EntrantId),
    /// No match exists at the given position.
    MatchNotFound {
        /// Round number (1-based).
        round: u32,
        /// Match number within the round (1-based).
        match_number: u32,
    },
    /// The reported winner did not take part in the match.
    InvalidWinner {
        /// Round number (1-based).
        round: u32,
        /// Match number within the round (1-based).
        match_number: u32,
        /// The rejected winner.
        winner: EntrantId,
    },
    /// The next-round slot already holds a different entrant.
    SlotAlreadyFilled {
        /// Round number of the slot being written.
        round: u32,
        /// Match number of the slot being written.
        match_number: u32,
        /// Entrant currently occupying the slot.
        occupant: EntrantId,
    },
    /// A produced schedule breaks a scheduling invariant.
    ScheduleConflict {
        /// Description of the violated invariant.
        reason: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl FixtureError {
    /// Shorthand for an `InvalidConfiguration` error.
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Stable machine-readable name of the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration { .. } => "InvalidConfiguration",
            Self::InsufficientEntrants { .. } => "InsufficientEntrants",
            Self::UnsupportedFormat(_) => "UnsupportedFormat",
            Self::SchedulingWindowExhausted { .. } => "SchedulingWindowExhausted",
            Self::NoVenueAvailable => "NoVenueAvailable",
            Self::DuplicateEntrant(_) => "DuplicateEntrant",
            Self::MatchNotFound { .. } => "MatchNotFound",
            Self::InvalidWinner { .. } => "InvalidWinner",
            Self::SlotAlreadyFilled { .. } => "SlotAlreadyFilled",
            Self::ScheduleConflict { .. } => "ScheduleConflict",
            Self::DateArithmeticOverflow { .. } => "DateArithmeticOverflow",
        }
    }
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfiguration { reason } => {
                write!(f, "Invalid configuration: {reason}")
            }
            Self::InsufficientEntrants { required, provided } => {
                write!(
                    f,
                    "Insufficient entrants: need at least {required}, got {provided}"
                )
            }
            Self::UnsupportedFormat(format) => {
                write!(f, "Unsupported tournament format: '{format}'")
            }
            Self::SchedulingWindowExhausted {
                end_date,
                scheduled,
                total,
            } => {
                write!(
                    f,
                    "Scheduling window ending {end_date} is exhausted after placing {scheduled} of {total} matches"
                )
            }
            Self::NoVenueAvailable => {
                write!(f, "No venue available: the venue pool is empty")
            }
            Self::DuplicateEntrant(entrant) => {
                write!(f, "Entrant '{entrant}' was supplied more than once")
            }
            Self::MatchNotFound {
                round,
                match_number,
            } => {
                write!(f, "Match {match_number} of round {round} not found")
            }
            Self::InvalidWinner {
                round,
                match_number,
                winner,
            } => {
                write!(
                    f,
                    "Entrant '{winner}' did not play in match {match_number} of round {round}"
                )
            }
            Self::SlotAlreadyFilled {
                round,
                match_number,
                occupant,
            } => {
                write!(
                    f,
                    "Match {match_number} of round {round} already holds entrant '{occupant}' in that slot"
                )
            }
            Self::ScheduleConflict { reason } => write!(f, "Schedule conflict: {reason}"),
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for FixtureError {}
