// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pairing generation for round-robin and single-elimination formats.
//!
//! Output is purely structural: round and match numbers plus two slots.
//! Dates and venues are attached later by the schedule assigner.
//!
//! ## Round-robin (circle method)
//!
//! - Odd entrant counts are padded with a rest placeholder
//! - Entrant 0 stays fixed, the others rotate one position per round
//! - `n' - 1` rounds of `n' / 2` pairings; pairings with the placeholder are dropped
//! - The fixed entrant alternates between slot A and slot B
//!
//! ## Single elimination
//!
//! - Bracket size is the next power of two, `ceil(log2 n)` rounds
//! - Byes go to the first entrants in input order and are emitted as
//!   round-1 matches with `team_b = None` and `bye = true`
//! - Remaining entrants are paired in input order
//! - Later rounds hold placeholder slots; match `k` of round `r + 1` is fed
//!   by matches `2k - 1` and `2k` of round `r`

use crate::draw::{GroupAssignment, ensure_unique};
use crate::error::FixtureError;
use crate::types::{AbstractMatch, EntrantId, TournamentFormat};

/// Minimum number of entrants for any pairing.
pub const MIN_ENTRANTS: usize = 2;

/// Generates the match structure for `entrants` in the given format.
///
/// # Errors
///
/// Returns an error if:
/// - fewer than two entrants are supplied (`InsufficientEntrants`)
/// - an entrant appears twice (`DuplicateEntrant`)
pub fn generate_pairings(
    entrants: &[EntrantId],
    format: TournamentFormat,
) -> Result<Vec<AbstractMatch>, FixtureError> {
    if entrants.len() < MIN_ENTRANTS {
        return Err(FixtureError::InsufficientEntrants {
            required: MIN_ENTRANTS,
            provided: entrants.len(),
        });
    }
    ensure_unique(entrants)?;

    match format {
        TournamentFormat::RoundRobin => round_robin(entrants),
        TournamentFormat::SingleElimination => single_elimination(entrants),
    }
}

/// Generates pairings for every group of a draw and merges them.
///
/// Round numbers are shared across groups: round 1 of every group becomes
/// round 1 of the result. Match numbers are renumbered so they stay
/// contiguous within each round, groups keeping the draw's order.
///
/// # Errors
///
/// Returns an error if any group has fewer than two entrants.
pub fn generate_group_pairings(
    assignment: &GroupAssignment,
    format: TournamentFormat,
) -> Result<Vec<AbstractMatch>, FixtureError> {
    let mut merged: Vec<AbstractMatch> = Vec::new();

    for group_draw in assignment.iter() {
        let matches = generate_pairings(&group_draw.entrants, format)?;
        merged.extend(
            matches
                .into_iter()
                .map(|m| m.with_group(group_draw.group.clone())),
        );
    }

    // Stable: groups keep the draw's order within a round
    merged.sort_by_key(|m| m.round_number);

    let mut current_round = 0;
    let mut next_number = 1;
    for m in &mut merged {
        if m.round_number != current_round {
            current_round = m.round_number;
            next_number = 1;
        }
        m.match_number = next_number;
        next_number += 1;
    }

    Ok(merged)
}

fn round_robin(entrants: &[EntrantId]) -> Result<Vec<AbstractMatch>, FixtureError> {
    // None marks the rest placeholder
    let mut circle: Vec<Option<EntrantId>> = entrants.iter().cloned().map(Some).collect();
    if circle.len() % 2 == 1 {
        circle.push(None);
    }

    let size = circle.len();
    let rounds = size - 1;
    let mut matches = Vec::with_capacity(rounds * size / 2);

    for round_index in 0..rounds {
        let round_number = to_u32(round_index + 1)?;
        let mut match_number = 0;

        for i in 0..size / 2 {
            let (Some(first), Some(second)) = (&circle[i], &circle[size - 1 - i]) else {
                continue;
            };

            let (team_a, team_b) = if i == 0 && round_index % 2 == 1 {
                (second.clone(), first.clone())
            } else {
                (first.clone(), second.clone())
            };

            match_number += 1;
            matches.push(AbstractMatch::new(
                round_number,
                match_number,
                Some(team_a),
                Some(team_b),
            ));
        }

        circle[1..].rotate_right(1);
    }

    Ok(matches)
}

fn single_elimination(entrants: &[EntrantId]) -> Result<Vec<AbstractMatch>, FixtureError> {
    let bracket_size = entrants.len().next_power_of_two();
    let rounds = bracket_size.trailing_zeros();
    let byes = bracket_size - entrants.len();

    let mut matches = Vec::with_capacity(bracket_size - 1);
    let mut match_number: u32 = 0;

    for entrant in &entrants[..byes] {
        match_number += 1;
        matches.push(AbstractMatch::bye(1, match_number, entrant.clone()));
    }

    for pair in entrants[byes..].chunks_exact(2) {
        match_number += 1;
        matches.push(AbstractMatch::new(
            1,
            match_number,
            Some(pair[0].clone()),
            Some(pair[1].clone()),
        ));
    }

    for round_number in 2..=rounds {
        let matches_in_round = to_u32(bracket_size >> round_number)?;
        for number in 1..=matches_in_round {
            matches.push(AbstractMatch::new(round_number, number, None, None));
        }
    }

    Ok(matches)
}

fn to_u32(value: usize) -> Result<u32, FixtureError> {
    u32::try_from(value)
        .map_err(|_| FixtureError::invalid(format!("{value} exceeds the supported bracket size")))
}
