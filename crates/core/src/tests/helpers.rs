// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::FixtureRequest;
use fixture_domain::{EntrantId, Group, SchedulingConfig, TournamentFormat, Venue};
use rand::SeedableRng;
use rand::rngs::StdRng;
use time::macros::date;

pub fn create_test_entrants(count: usize) -> Vec<EntrantId> {
    (1..=count).map(|i| EntrantId::new(format!("Team {i}"))).collect()
}

pub fn create_test_groups(count: usize) -> Vec<Group> {
    (0..count)
        .map(|i| {
            let letter = char::from(b'A' + u8::try_from(i).unwrap());
            Group::new(format!("G{letter}"), format!("Group {letter}"))
        })
        .collect()
}

pub fn create_test_venues() -> Vec<Venue> {
    vec![
        Venue::new("Main Stadium", 10),
        Venue::new("North Field", 5),
        Venue::new("South Field", 5),
    ]
}

pub fn create_test_config() -> SchedulingConfig {
    SchedulingConfig::new(date!(2026 - 03 - 01), date!(2026 - 06 - 30), 4, 90, 30)
        .unwrap()
        .with_venues(create_test_venues())
}

pub fn create_test_request(count: usize, format: TournamentFormat) -> FixtureRequest {
    FixtureRequest::new(create_test_entrants(count), format, create_test_config())
}

pub fn create_test_rng() -> StdRng {
    StdRng::seed_from_u64(2026)
}
