// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Result propagation through a single-elimination bracket.
//!
//! Generation only emits the bracket shape. When a result arrives, the
//! winner is written into exactly one slot of the next round; nothing else
//! in the bracket is recomputed.
//!
//! Positions are counted within `(round, group)`, so group-tagged brackets
//! that were renumbered by group merging still feed the right match:
//! position `k` of round `r` feeds position `ceil(k / 2)` of round `r + 1`,
//! slot A for odd `k` and slot B for even `k`.

use crate::error::FixtureError;
use crate::types::{AbstractMatch, EntrantId, GroupId};

/// Writes the winner of a match into its next-round slot.
///
/// # Arguments
///
/// * `matches` - The bracket, as produced by the pairing generator
/// * `round` - Round of the decided match
/// * `match_number` - Match number of the decided match
/// * `winner` - The winning entrant; must occupy a slot of that match
///
/// # Returns
///
/// The updated next-round match, or `None` when the decided match was the final.
///
/// # Errors
///
/// Returns an error if:
/// - the match does not exist (`MatchNotFound`)
/// - `winner` did not play in it (`InvalidWinner`)
/// - the target slot holds a different entrant (`SlotAlreadyFilled`)
/// - the next round is not half the size of this one (`InvalidConfiguration`)
pub fn advance_winner(
    matches: &mut [AbstractMatch],
    round: u32,
    match_number: u32,
    winner: &EntrantId,
) -> Result<Option<AbstractMatch>, FixtureError> {
    let source = matches
        .iter()
        .find(|m| m.round_number == round && m.match_number == match_number)
        .ok_or(FixtureError::MatchNotFound {
            round,
            match_number,
        })?;

    if !source.involves(winner) {
        return Err(FixtureError::InvalidWinner {
            round,
            match_number,
            winner: winner.clone(),
        });
    }

    let group = source.group.clone();
    let current = positions(matches, round, group.as_ref());
    let next = positions(matches, round + 1, group.as_ref());

    if next.is_empty() {
        return Ok(None);
    }
    if current.len() != next.len() * 2 {
        return Err(FixtureError::invalid(format!(
            "round {} has {} matches but round {round} has {}; not an elimination bracket",
            round + 1,
            next.len(),
            current.len()
        )));
    }

    // 1-based position of the decided match within its round
    let position = current
        .iter()
        .position(|&index| matches[index].match_number == match_number)
        .map_or(1, |offset| offset + 1);
    let target = next[(position - 1) / 2];

    let next_match = &mut matches[target];
    let (next_round, next_number) = (next_match.round_number, next_match.match_number);
    let slot = if position % 2 == 1 {
        &mut next_match.team_a
    } else {
        &mut next_match.team_b
    };

    if let Some(occupant) = slot.as_ref().filter(|occupant| *occupant != winner) {
        return Err(FixtureError::SlotAlreadyFilled {
            round: next_round,
            match_number: next_number,
            occupant: occupant.clone(),
        });
    }
    *slot = Some(winner.clone());

    Ok(Some(next_match.clone()))
}

/// Advances every bye entrant into round 2.
///
/// Returns the number of byes advanced.
///
/// # Errors
///
/// Returns an error if a target slot already holds a different entrant.
pub fn auto_advance_byes(matches: &mut [AbstractMatch]) -> Result<usize, FixtureError> {
    let byes: Vec<(u32, u32, EntrantId)> = matches
        .iter()
        .filter(|m| m.bye)
        .filter_map(|m| {
            m.team_a
                .clone()
                .map(|entrant| (m.round_number, m.match_number, entrant))
        })
        .collect();

    for (round, match_number, entrant) in &byes {
        advance_winner(matches, *round, *match_number, entrant)?;
    }

    Ok(byes.len())
}

/// Indices of the matches of `round` in `group`, ordered by match number.
fn positions(matches: &[AbstractMatch], round: u32, group: Option<&GroupId>) -> Vec<usize> {
    let mut indices: Vec<usize> = matches
        .iter()
        .enumerate()
        .filter(|(_, m)| m.round_number == round && m.group.as_ref() == group)
        .map(|(index, _)| index)
        .collect();
    indices.sort_by_key(|&index| matches[index].match_number);
    indices
}
