// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Random, balanced group draw.
//!
//! ## Invariants
//!
//! - Every entrant lands in exactly one group
//! - Group sizes differ by at most one
//! - Order inside a group is assignment order, not seeding
//!
//! The random source is always supplied by the caller so a fixed seed
//! reproduces the same draw.

use crate::error::FixtureError;
use crate::types::{EntrantId, Group, GroupId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Entrants drawn into one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDraw {
    /// The group.
    pub group: GroupId,
    /// Entrants in assignment order.
    pub entrants: Vec<EntrantId>,
}

/// Result of a draw: one entry per group, in the caller's group order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupAssignment {
    groups: Vec<GroupDraw>,
}

impl GroupAssignment {
    /// Builds an assignment from already-drawn groups.
    #[must_use]
    pub const fn from_groups(groups: Vec<GroupDraw>) -> Self {
        Self { groups }
    }

    /// Returns the entrants of `group`, if the group is part of the draw.
    #[must_use]
    pub fn entrants(&self, group: &GroupId) -> Option<&[EntrantId]> {
        self.groups
            .iter()
            .find(|draw| &draw.group == group)
            .map(|draw| draw.entrants.as_slice())
    }

    /// Iterates groups in the caller's order.
    pub fn iter(&self) -> impl Iterator<Item = &GroupDraw> {
        self.groups.iter()
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the draw has no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group sizes in the caller's order.
    #[must_use]
    pub fn sizes(&self) -> Vec<usize> {
        self.groups.iter().map(|draw| draw.entrants.len()).collect()
    }

    /// Total number of drawn entrants.
    #[must_use]
    pub fn total_entrants(&self) -> usize {
        self.groups.iter().map(|draw| draw.entrants.len()).sum()
    }
}

/// Draws entrants into groups as evenly as possible.
///
/// # Arguments
///
/// * `entrants` - Entrants to draw (not modified)
/// * `groups` - Target groups; entrant `i` of the shuffled order goes to `groups[i % groups.len()]`
/// * `rng` - Random source used for the shuffle
///
/// # Errors
///
/// Returns an error if:
/// - `groups` is empty or a group id appears twice (`InvalidConfiguration`)
/// - an entrant appears twice (`DuplicateEntrant`)
pub fn draw<R: Rng + ?Sized>(
    entrants: &[EntrantId],
    groups: &[Group],
    rng: &mut R,
) -> Result<GroupAssignment, FixtureError> {
    if groups.is_empty() {
        return Err(FixtureError::invalid("a draw needs at least one group"));
    }
    let mut seen_groups = HashSet::with_capacity(groups.len());
    for group in groups {
        if !seen_groups.insert(&group.id) {
            return Err(FixtureError::invalid(format!(
                "group '{}' appears more than once",
                group.id
            )));
        }
    }
    ensure_unique(entrants)?;

    let mut shuffled: Vec<EntrantId> = entrants.to_vec();
    fisher_yates(&mut shuffled, rng);

    let mut drawn: Vec<GroupDraw> = groups
        .iter()
        .map(|group| GroupDraw {
            group: group.id.clone(),
            entrants: Vec::with_capacity(entrants.len() / groups.len() + 1),
        })
        .collect();

    for (index, entrant) in shuffled.into_iter().enumerate() {
        drawn[index % groups.len()].entrants.push(entrant);
    }

    Ok(GroupAssignment::from_groups(drawn))
}

/// Unbiased in-place shuffle.
pub(crate) fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Rejects entrant lists that contain the same id twice.
pub(crate) fn ensure_unique(entrants: &[EntrantId]) -> Result<(), FixtureError> {
    let mut seen = HashSet::with_capacity(entrants.len());
    for entrant in entrants {
        if !seen.insert(entrant) {
            return Err(FixtureError::DuplicateEntrant(entrant.clone()));
        }
    }
    Ok(())
}
