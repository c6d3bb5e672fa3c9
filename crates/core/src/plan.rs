// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The planning pipeline.
//!
//! `draw -> pairings -> schedule -> validation`, with no partial results:
//! the first failing stage aborts the whole plan.

use crate::error::CoreError;
use crate::request::{FixturePlan, FixtureRequest};
use fixture_domain::{
    AbstractMatch, EntrantId, GroupAssignment, ScheduledMatch, advance_winner, assign_schedule,
    auto_advance_byes, draw, generate_group_pairings, generate_pairings,
    validate_group_assignment, validate_schedule,
};
use rand::Rng;
use tracing::{debug, info};

/// Plans a complete fixture from a request.
///
/// When the request names groups the entrants are drawn first and every
/// group gets its own pairings; otherwise all entrants form one pool.
///
/// # Arguments
///
/// * `request` - Entrants, optional groups, format and scheduling parameters
/// * `rng` - Random source for the draw and for random venue selection
///
/// # Errors
///
/// Returns an error if any stage fails. No partial plan is returned.
pub fn plan_fixture<R: Rng + ?Sized>(
    request: &FixtureRequest,
    rng: &mut R,
) -> Result<FixturePlan, CoreError> {
    info!(
        entrants = request.entrants.len(),
        groups = request.groups.len(),
        format = %request.format,
        mode = %request.schedule.venue_assignment_mode(),
        "Planning fixture"
    );

    let (group_draw, fixtures) = pair_entrants(request, rng)?;
    debug!(matches = fixtures.len(), "Pairings generated");

    let matches = assign_schedule(&fixtures, &request.schedule, rng)?;
    validate_schedule(&matches, &request.schedule)?;

    let plan = FixturePlan {
        draw: group_draw,
        matches,
    };
    info!(
        matches = plan.matches.len(),
        played = plan.played_count(),
        rounds = plan.round_count(),
        "Fixture planned"
    );
    Ok(plan)
}

fn pair_entrants<R: Rng + ?Sized>(
    request: &FixtureRequest,
    rng: &mut R,
) -> Result<(Option<GroupAssignment>, Vec<AbstractMatch>), CoreError> {
    if !request.has_draw() {
        let fixtures = generate_pairings(&request.entrants, request.format)?;
        return Ok((None, fixtures));
    }

    let assignment = draw(&request.entrants, &request.groups, rng)?;
    validate_group_assignment(&request.entrants, &assignment)?;
    debug!(sizes = ?assignment.sizes(), "Group draw complete");

    let fixtures = generate_group_pairings(&assignment, request.format)?;
    Ok((Some(assignment), fixtures))
}

/// Records the winner of a match and fills the next-round slot.
///
/// Dates and venues of the plan are left untouched.
///
/// # Returns
///
/// The next-round match that received the winner, or `None` after the final.
///
/// # Errors
///
/// Returns an error if the match is unknown, `winner` did not play in it,
/// or the next-round slot already holds someone else.
pub fn record_result(
    plan: &mut FixturePlan,
    round: u32,
    match_number: u32,
    winner: &EntrantId,
) -> Result<Option<ScheduledMatch>, CoreError> {
    let mut fixtures = plan.fixtures();
    let advanced = advance_winner(&mut fixtures, round, match_number, winner)?;
    write_back(plan, fixtures);

    info!(round, match_number, %winner, "Result recorded");

    Ok(advanced.and_then(|next| plan.find(next.round_number, next.match_number).cloned()))
}

/// Advances every bye entrant of the plan into round 2.
///
/// Returns the number of byes advanced.
///
/// # Errors
///
/// Returns an error if a round-2 slot already holds a different entrant.
pub fn advance_byes(plan: &mut FixturePlan) -> Result<usize, CoreError> {
    let mut fixtures = plan.fixtures();
    let advanced = auto_advance_byes(&mut fixtures)?;
    write_back(plan, fixtures);

    debug!(advanced, "Byes advanced");
    Ok(advanced)
}

fn write_back(plan: &mut FixturePlan, fixtures: Vec<AbstractMatch>) {
    for (entry, fixture) in plan.matches.iter_mut().zip(fixtures) {
        entry.fixture = fixture;
    }
}
