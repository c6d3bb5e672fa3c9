// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{EntrantId, FixtureError};
use time::macros::date;

#[test]
fn test_fixture_error_display() {
    let err: FixtureError = FixtureError::InvalidConfiguration {
        reason: String::from("no groups"),
    };
    assert_eq!(format!("{err}"), "Invalid configuration: no groups");

    let err: FixtureError = FixtureError::InsufficientEntrants {
        required: 2,
        provided: 1,
    };
    assert_eq!(
        format!("{err}"),
        "Insufficient entrants: need at least 2, got 1"
    );

    let err: FixtureError = FixtureError::UnsupportedFormat(String::from("SWISS"));
    assert_eq!(format!("{err}"), "Unsupported tournament format: 'SWISS'");

    let err: FixtureError = FixtureError::SchedulingWindowExhausted {
        end_date: date!(2026 - 03 - 01),
        scheduled: 4,
        total: 8,
    };
    assert_eq!(
        format!("{err}"),
        "Scheduling window ending 2026-03-01 is exhausted after placing 4 of 8 matches"
    );

    let err: FixtureError = FixtureError::NoVenueAvailable;
    assert_eq!(
        format!("{err}"),
        "No venue available: the venue pool is empty"
    );

    let err: FixtureError = FixtureError::DuplicateEntrant(EntrantId::from("T1"));
    assert_eq!(format!("{err}"), "Entrant 'T1' was supplied more than once");

    let err: FixtureError = FixtureError::MatchNotFound {
        round: 2,
        match_number: 3,
    };
    assert_eq!(format!("{err}"), "Match 3 of round 2 not found");

    let err: FixtureError = FixtureError::InvalidWinner {
        round: 1,
        match_number: 1,
        winner: EntrantId::from("T9"),
    };
    assert_eq!(
        format!("{err}"),
        "Entrant 'T9' did not play in match 1 of round 1"
    );

    let err: FixtureError = FixtureError::SlotAlreadyFilled {
        round: 2,
        match_number: 1,
        occupant: EntrantId::from("T1"),
    };
    assert_eq!(
        format!("{err}"),
        "Match 1 of round 2 already holds entrant 'T1' in that slot"
    );

    let err: FixtureError = FixtureError::ScheduleConflict {
        reason: String::from("double booked"),
    };
    assert_eq!(format!("{err}"), "Schedule conflict: double booked");

    let err: FixtureError = FixtureError::DateArithmeticOverflow {
        operation: String::from("advancing past 9999-12-31"),
    };
    assert_eq!(
        format!("{err}"),
        "Date arithmetic overflow while advancing past 9999-12-31"
    );
}

#[test]
fn test_fixture_error_kind() {
    assert_eq!(FixtureError::NoVenueAvailable.kind(), "NoVenueAvailable");
    assert_eq!(
        FixtureError::UnsupportedFormat(String::from("x")).kind(),
        "UnsupportedFormat"
    );
    assert_eq!(
        FixtureError::InsufficientEntrants {
            required: 2,
            provided: 0
        }
        .kind(),
        "InsufficientEntrants"
    );
}
