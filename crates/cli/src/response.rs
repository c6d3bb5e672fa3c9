// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CliError;
use crate::request::DATETIME_FORMAT;
use fixture_domain::{EntrantId, GroupId, ScheduledMatch, VenueId};
use fixture_engine::FixturePlan;
use serde::Serialize;

/// Output document printed on stdout.
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<GroupResponse>>,
    pub matches: Vec<MatchResponse>,
}

#[derive(Debug, Serialize)]
pub struct GroupResponse {
    pub group: GroupId,
    pub entrants: Vec<EntrantId>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub round: u32,
    pub match_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupId>,
    pub team_a: Option<EntrantId>,
    pub team_b: Option<EntrantId>,
    pub bye: bool,
    pub scheduled_at: Option<String>,
    pub venue: Option<VenueId>,
}

impl PlanResponse {
    /// Renders a plan with human-readable kick-off times.
    ///
    /// # Errors
    ///
    /// Returns an error if a kick-off time cannot be formatted.
    pub fn from_plan(plan: &FixturePlan) -> Result<Self, CliError> {
        let groups = plan.draw.as_ref().map(|assignment| {
            assignment
                .iter()
                .map(|draw| GroupResponse {
                    group: draw.group.clone(),
                    entrants: draw.entrants.clone(),
                })
                .collect()
        });

        let matches = plan
            .matches
            .iter()
            .map(MatchResponse::from_scheduled)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { groups, matches })
    }
}

impl MatchResponse {
    fn from_scheduled(entry: &ScheduledMatch) -> Result<Self, CliError> {
        let scheduled_at = entry
            .scheduled_at
            .map(|at| at.format(DATETIME_FORMAT))
            .transpose()?;

        Ok(Self {
            round: entry.fixture.round_number,
            match_number: entry.fixture.match_number,
            group: entry.fixture.group.clone(),
            team_a: entry.fixture.team_a.clone(),
            team_b: entry.fixture.team_b.clone(),
            bye: entry.fixture.bye,
            scheduled_at,
            venue: entry.venue.clone(),
        })
    }
}
