// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fixture_domain::{
    AbstractMatch, EntrantId, Group, GroupAssignment, ScheduledMatch, SchedulingConfig,
    TournamentFormat,
};
use serde::{Deserialize, Serialize};

/// Everything needed to plan one fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureRequest {
    /// Entrants taking part.
    pub entrants: Vec<EntrantId>,
    /// Groups to draw into. Empty means a single pool without a draw.
    #[serde(default)]
    pub groups: Vec<Group>,
    /// Tournament format applied to the pool or to every group.
    pub format: TournamentFormat,
    /// Calendar and venue parameters.
    pub schedule: SchedulingConfig,
}

impl FixtureRequest {
    /// Creates a request without groups.
    #[must_use]
    pub const fn new(
        entrants: Vec<EntrantId>,
        format: TournamentFormat,
        schedule: SchedulingConfig,
    ) -> Self {
        Self {
            entrants,
            groups: Vec::new(),
            format,
            schedule,
        }
    }

    /// Draws the entrants into `groups` before pairing.
    #[must_use]
    pub fn with_groups(mut self, groups: Vec<Group>) -> Self {
        self.groups = groups;
        self
    }

    /// Whether the request runs a group draw.
    #[must_use]
    pub fn has_draw(&self) -> bool {
        !self.groups.is_empty()
    }
}

/// The result of planning a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixturePlan {
    /// Group draw, when the request named groups.
    pub draw: Option<GroupAssignment>,
    /// Every match, ordered by `(round_number, match_number)`.
    pub matches: Vec<ScheduledMatch>,
}

impl FixturePlan {
    /// The abstract matches of the plan, in plan order.
    #[must_use]
    pub fn fixtures(&self) -> Vec<AbstractMatch> {
        self.matches.iter().map(|entry| entry.fixture.clone()).collect()
    }

    /// Number of matches that are actually played (byes excluded).
    #[must_use]
    pub fn played_count(&self) -> usize {
        self.matches.iter().filter(|entry| !entry.fixture.bye).count()
    }

    /// Number of distinct rounds.
    #[must_use]
    pub fn round_count(&self) -> u32 {
        self.matches
            .iter()
            .map(|entry| entry.fixture.round_number)
            .max()
            .unwrap_or(0)
    }

    /// Finds a match by round and match number.
    #[must_use]
    pub fn find(&self, round: u32, match_number: u32) -> Option<&ScheduledMatch> {
        self.matches.iter().find(|entry| {
            entry.fixture.round_number == round && entry.fixture.match_number == match_number
        })
    }
}
