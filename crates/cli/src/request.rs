// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request file format.
//!
//! Dates are `YYYY-MM-DD`, times `HH:MM`, reservation bounds `YYYY-MM-DD HH:MM`.
//!
//! The file has no per-match venue field, so `"venue_assignment_mode": "MANUAL"`
//! schedules dates only: every match comes out with `venue: null`. Use
//! `PRIORITY` or `RANDOM` to have venues picked from `venues`.

use crate::error::CliError;
use fixture_domain::{
    EntrantId, Group, SchedulingConfig, TournamentFormat, Venue, VenueAssignmentMode,
    VenueReservation,
};
use fixture_engine::FixtureRequest;
use serde::Deserialize;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};

pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
pub const TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");
pub const DATETIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

#[derive(Debug, Deserialize)]
pub struct FixtureRequestFile {
    pub entrants: Vec<String>,
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
    pub format: String,
    pub schedule: ScheduleSection,
}

#[derive(Debug, Deserialize)]
pub struct GroupEntry {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleSection {
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub day_start: Option<String>,
    pub matches_per_day: u32,
    pub match_duration_minutes: u32,
    #[serde(default)]
    pub rest_time_minutes: u32,
    #[serde(default)]
    pub venue_assignment_mode: Option<String>,
    #[serde(default)]
    pub venues: Vec<VenueEntry>,
    #[serde(default)]
    pub reservations: Vec<ReservationEntry>,
}

#[derive(Debug, Deserialize)]
pub struct VenueEntry {
    pub id: String,
    #[serde(default)]
    pub priority: u32,
}

#[derive(Debug, Deserialize)]
pub struct ReservationEntry {
    pub venue: String,
    pub start: String,
    pub end: String,
}

impl FixtureRequestFile {
    /// Converts the file contents into an engine request.
    ///
    /// # Errors
    ///
    /// Returns an error if a date, time, format or mode does not parse, or if
    /// the scheduling parameters are invalid.
    pub fn into_request(self) -> Result<FixtureRequest, CliError> {
        let format: TournamentFormat = self.format.parse()?;
        let schedule = self.schedule.into_config()?;
        let entrants: Vec<EntrantId> = self.entrants.into_iter().map(EntrantId::from).collect();
        let groups: Vec<Group> = self
            .groups
            .into_iter()
            .map(|entry| {
                let name = entry.name.unwrap_or_else(|| entry.id.clone());
                Group::new(entry.id, name)
            })
            .collect();

        Ok(FixtureRequest::new(entrants, format, schedule).with_groups(groups))
    }
}

impl ScheduleSection {
    fn into_config(self) -> Result<SchedulingConfig, CliError> {
        let start_date = parse_date("start_date", &self.start_date)?;
        let end_date = parse_date("end_date", &self.end_date)?;

        let mut config = SchedulingConfig::new(
            start_date,
            end_date,
            self.matches_per_day,
            self.match_duration_minutes,
            self.rest_time_minutes,
        )?;

        if let Some(day_start) = &self.day_start {
            config = config.with_day_start(parse_time("day_start", day_start)?);
        }
        if let Some(mode) = &self.venue_assignment_mode {
            config = config.with_mode(mode.parse::<VenueAssignmentMode>()?);
        }

        let venues = self
            .venues
            .into_iter()
            .map(|entry| Venue::new(entry.id, entry.priority))
            .collect();
        let reservations = self
            .reservations
            .iter()
            .map(|entry| {
                Ok(VenueReservation::new(
                    entry.venue.as_str(),
                    parse_datetime("reservation start", &entry.start)?,
                    parse_datetime("reservation end", &entry.end)?,
                ))
            })
            .collect::<Result<Vec<_>, CliError>>()?;

        let config = config.with_venues(venues).with_reservations(reservations);
        config.validate()?;
        Ok(config)
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<Date, CliError> {
    Date::parse(value, DATE_FORMAT).map_err(|source| CliError::Parse {
        field,
        value: value.to_string(),
        source,
    })
}

fn parse_time(field: &'static str, value: &str) -> Result<Time, CliError> {
    Time::parse(value, TIME_FORMAT).map_err(|source| CliError::Parse {
        field,
        value: value.to_string(),
        source,
    })
}

fn parse_datetime(field: &'static str, value: &str) -> Result<PrimitiveDateTime, CliError> {
    PrimitiveDateTime::parse(value, DATETIME_FORMAT).map_err(|source| CliError::Parse {
        field,
        value: value.to_string(),
        source,
    })
}
