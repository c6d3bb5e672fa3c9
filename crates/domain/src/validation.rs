// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::draw::GroupAssignment;
use crate::error::FixtureError;
use crate::schedule::overlaps;
use crate::types::{EntrantId, ScheduledMatch, SchedulingConfig};
use std::collections::HashMap;
use time::Date;

/// Validates that a draw covers every entrant exactly once with balanced groups.
///
/// # Arguments
///
/// * `entrants` - The entrants that were drawn
/// * `assignment` - The draw result to check
///
/// # Errors
///
/// Returns `InvalidConfiguration` if:
/// - an entrant is missing or appears more than once
/// - the assignment contains an entrant that was not drawn
/// - two groups differ in size by more than one
pub fn validate_group_assignment(
    entrants: &[EntrantId],
    assignment: &GroupAssignment,
) -> Result<(), FixtureError> {
    let mut seen: HashMap<&EntrantId, usize> = HashMap::new();
    for group_draw in assignment.iter() {
        for entrant in &group_draw.entrants {
            *seen.entry(entrant).or_default() += 1;
        }
    }

    for entrant in entrants {
        match seen.remove(entrant) {
            Some(1) => {}
            Some(count) => {
                return Err(FixtureError::invalid(format!(
                    "entrant '{entrant}' was drawn {count} times"
                )));
            }
            None => {
                return Err(FixtureError::invalid(format!(
                    "entrant '{entrant}' was not drawn into any group"
                )));
            }
        }
    }

    if let Some(stray) = seen.keys().next() {
        return Err(FixtureError::invalid(format!(
            "entrant '{stray}' is in the draw but was never entered"
        )));
    }

    let sizes = assignment.sizes();
    let smallest = sizes.iter().min().copied().unwrap_or(0);
    let largest = sizes.iter().max().copied().unwrap_or(0);
    if largest - smallest > 1 {
        return Err(FixtureError::invalid(format!(
            "group sizes range from {smallest} to {largest}"
        )));
    }

    Ok(())
}

/// Validates the scheduling invariants of an assignment result.
///
/// This is a read-only post-condition check: it scans every pair of matches
/// sharing a venue and does not trust how the schedule was produced.
///
/// # Errors
///
/// Returns `ScheduleConflict` if:
/// - a played match has no date, or a bye has one
/// - a date falls outside `[start_date, end_date]`
/// - a day holds more than `matches_per_day` matches
/// - a venue is required by the mode but missing
/// - two matches at one venue overlap
/// - a match overlaps a reservation of its venue
pub fn validate_schedule(
    scheduled: &[ScheduledMatch],
    config: &SchedulingConfig,
) -> Result<(), FixtureError> {
    let slot_minutes = config.slot_minutes();
    let mut per_day: HashMap<Date, u32> = HashMap::new();

    for entry in scheduled {
        let fixture = &entry.fixture;
        let label = format!(
            "match {} of round {}",
            fixture.match_number, fixture.round_number
        );

        let Some(start) = entry.scheduled_at else {
            if fixture.bye {
                continue;
            }
            return Err(conflict(format!("{label} has no date")));
        };

        if fixture.bye {
            return Err(conflict(format!("{label} is a bye but has a date")));
        }

        if start.date() < config.start_date() || start.date() > config.end_date() {
            return Err(conflict(format!(
                "{label} on {} is outside {} to {}",
                start.date(),
                config.start_date(),
                config.end_date()
            )));
        }

        let count = per_day.entry(start.date()).or_default();
        *count += 1;
        if *count > config.matches_per_day() {
            return Err(conflict(format!(
                "{} holds more than {} matches",
                start.date(),
                config.matches_per_day()
            )));
        }

        if entry.venue.is_none() && config.venue_assignment_mode().requires_venue_pool() {
            return Err(conflict(format!("{label} has no venue")));
        }
    }

    for (index, first) in scheduled.iter().enumerate() {
        let (Some(venue), Some((first_start, first_end))) =
            (&first.venue, first.window(slot_minutes))
        else {
            continue;
        };

        for second in &scheduled[index + 1..] {
            if second.venue.as_ref() != Some(venue) {
                continue;
            }
            let Some((second_start, second_end)) = second.window(slot_minutes) else {
                continue;
            };
            if overlaps(first_start, first_end, second_start, second_end) {
                return Err(conflict(format!(
                    "venue '{venue}' is double booked at {first_start} and {second_start}"
                )));
            }
        }

        for reservation in config.reservations() {
            if &reservation.venue == venue
                && overlaps(first_start, first_end, reservation.start, reservation.end)
            {
                return Err(conflict(format!(
                    "venue '{venue}' is reserved from {} to {} but hosts a match at {first_start}",
                    reservation.start, reservation.end
                )));
            }
        }
    }

    Ok(())
}

fn conflict(reason: String) -> FixtureError {
    FixtureError::ScheduleConflict { reason }
}
