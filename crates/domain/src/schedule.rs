// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar and venue assignment for abstract matches.
//!
//! Matches are placed in `(round_number, match_number)` order using a
//! `(day, slot)` cursor:
//!
//! - A day holds `matches_per_day` slots
//! - Slot `s` starts at `day_start + s * (duration + rest)`
//! - A venue window is `[start, start + duration + rest)`
//! - Running past `end_date` is an error, never a truncation
//!
//! ## Invariants
//!
//! - No venue carries two overlapping windows, including caller reservations
//! - If no candidate venue is free, the slot stays empty and the next one is tried
//! - Byes get neither a date nor a venue and consume no slot
//! - Manual and priority modes are pure functions of their inputs
//!
//! ## Example
//!
//! ```text
//! matches_per_day = 2, duration = 90, rest = 30, day_start = 09:00
//!
//! Match 1: 2026-01-01 09:00
//! Match 2: 2026-01-01 11:00
//! Match 3: 2026-01-02 09:00
//! ```

use crate::error::FixtureError;
use crate::types::{
    AbstractMatch, ScheduledMatch, SchedulingConfig, VenueAssignmentMode, VenueId,
    VenueReservation,
};
use crate::venue::{PriorityVenueSelector, RandomVenueSelector, VenueSelector};
use rand::Rng;
use std::collections::HashMap;
use time::{Date, Duration, PrimitiveDateTime};
use tracing::debug;

/// Assigns dates and venues using the strategy named by the configuration's mode.
///
/// # Arguments
///
/// * `matches` - Abstract matches in any order
/// * `config` - Scheduling window, capacity and venue pool
/// * `rng` - Random source, only consulted in `RANDOM` mode
///
/// # Returns
///
/// Every input match, ordered by `(round_number, match_number)`.
///
/// # Errors
///
/// Returns an error if:
/// - the configuration is invalid (`InvalidConfiguration`)
/// - a venue is required but the pool is empty (`NoVenueAvailable`)
/// - the window cannot hold every match (`SchedulingWindowExhausted`)
pub fn assign_schedule<R: Rng + ?Sized>(
    matches: &[AbstractMatch],
    config: &SchedulingConfig,
    rng: &mut R,
) -> Result<Vec<ScheduledMatch>, FixtureError> {
    match config.venue_assignment_mode() {
        VenueAssignmentMode::Manual => place_matches(matches, config, &mut Placement::Manual),
        VenueAssignmentMode::Random => {
            let mut selector = RandomVenueSelector::new(rng);
            place_matches(matches, config, &mut Placement::Pool(&mut selector))
        }
        VenueAssignmentMode::Priority => {
            let mut selector = PriorityVenueSelector::new();
            place_matches(matches, config, &mut Placement::Pool(&mut selector))
        }
    }
}

/// Assigns dates and venues with a caller-supplied venue strategy.
///
/// In `MANUAL` mode the pre-assigned venues are kept and `selector` is not used.
///
/// # Errors
///
/// Same as [`assign_schedule`].
pub fn assign_schedule_with(
    matches: &[AbstractMatch],
    config: &SchedulingConfig,
    selector: &mut dyn VenueSelector,
) -> Result<Vec<ScheduledMatch>, FixtureError> {
    if config.venue_assignment_mode() == VenueAssignmentMode::Manual {
        return place_matches(matches, config, &mut Placement::Manual);
    }
    place_matches(matches, config, &mut Placement::Pool(selector))
}

enum Placement<'s> {
    Manual,
    Pool(&'s mut dyn VenueSelector),
}

/// Outcome of trying one slot for one match.
enum SlotOutcome {
    Placed(Option<VenueId>),
    Blocked,
}

fn place_matches(
    matches: &[AbstractMatch],
    config: &SchedulingConfig,
    placement: &mut Placement<'_>,
) -> Result<Vec<ScheduledMatch>, FixtureError> {
    config.validate()?;

    let mut ordered: Vec<&AbstractMatch> = matches.iter().collect();
    ordered.sort_by_key(|m| m.order_key());

    let total = ordered.iter().filter(|m| !m.bye).count();
    if total > 0
        && config.venue_assignment_mode().requires_venue_pool()
        && config.venues().is_empty()
    {
        return Err(FixtureError::NoVenueAvailable);
    }

    let mut book = VenueBook::new(config.reservations());
    let mut cursor = SlotCursor::new(config.start_date());
    let mut scheduled = Vec::with_capacity(ordered.len());
    let mut placed = 0;

    for fixture in ordered {
        if fixture.bye {
            scheduled.push(ScheduledMatch {
                fixture: fixture.clone(),
                scheduled_at: None,
                venue: None,
            });
            continue;
        }

        loop {
            if cursor.slot == config.matches_per_day() {
                cursor.next_day()?;
                debug!(day = %cursor.day, "day capacity reached, moving to next day");
            }

            if cursor.day > config.end_date() {
                return Err(FixtureError::SchedulingWindowExhausted {
                    end_date: config.end_date(),
                    scheduled: placed,
                    total,
                });
            }

            let start = config.slot_start(cursor.day, cursor.slot)?;
            let end = window_end(start, config.slot_minutes())?;
            cursor.slot += 1;

            match try_slot(fixture, config, placement, &book, start, end) {
                SlotOutcome::Placed(venue) => {
                    if let Some(venue) = &venue {
                        book.reserve(venue.clone(), start, end);
                    }
                    scheduled.push(ScheduledMatch {
                        fixture: fixture.clone(),
                        scheduled_at: Some(start),
                        venue,
                    });
                    placed += 1;
                    break;
                }
                SlotOutcome::Blocked => {
                    debug!(
                        round = fixture.round_number,
                        match_number = fixture.match_number,
                        %start,
                        "no free venue for slot, trying the next one"
                    );
                }
            }
        }
    }

    Ok(scheduled)
}

fn try_slot(
    fixture: &AbstractMatch,
    config: &SchedulingConfig,
    placement: &mut Placement<'_>,
    book: &VenueBook,
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
) -> SlotOutcome {
    match placement {
        Placement::Manual => match &fixture.venue {
            Some(venue) if !book.is_free(venue, start, end) => SlotOutcome::Blocked,
            venue => SlotOutcome::Placed(venue.clone()),
        },
        Placement::Pool(selector) => selector
            .rank(config.venues(), start)
            .into_iter()
            .find(|venue| book.is_free(&venue.id, start, end))
            .map_or(SlotOutcome::Blocked, |venue| {
                SlotOutcome::Placed(Some(venue.id.clone()))
            }),
    }
}

fn window_end(
    start: PrimitiveDateTime,
    slot_minutes: u32,
) -> Result<PrimitiveDateTime, FixtureError> {
    start
        .checked_add(Duration::minutes(i64::from(slot_minutes)))
        .ok_or_else(|| FixtureError::DateArithmeticOverflow {
            operation: format!("computing the venue window starting {start}"),
        })
}

/// Position of the scheduling walk.
struct SlotCursor {
    day: Date,
    slot: u32,
}

impl SlotCursor {
    const fn new(day: Date) -> Self {
        Self { day, slot: 0 }
    }

    fn next_day(&mut self) -> Result<(), FixtureError> {
        self.day = self
            .day
            .next_day()
            .ok_or_else(|| FixtureError::DateArithmeticOverflow {
                operation: format!("advancing past {}", self.day),
            })?;
        self.slot = 0;
        Ok(())
    }
}

/// Occupied windows per venue.
struct VenueBook {
    windows: HashMap<VenueId, Vec<(PrimitiveDateTime, PrimitiveDateTime)>>,
}

impl VenueBook {
    fn new(reservations: &[VenueReservation]) -> Self {
        let mut book = Self {
            windows: HashMap::new(),
        };
        for reservation in reservations {
            book.reserve(reservation.venue.clone(), reservation.start, reservation.end);
        }
        book
    }

    fn is_free(&self, venue: &VenueId, start: PrimitiveDateTime, end: PrimitiveDateTime) -> bool {
        self.windows.get(venue).is_none_or(|taken| {
            taken
                .iter()
                .all(|(taken_start, taken_end)| !overlaps(start, end, *taken_start, *taken_end))
        })
    }

    fn reserve(&mut self, venue: VenueId, start: PrimitiveDateTime, end: PrimitiveDateTime) {
        self.windows.entry(venue).or_default().push((start, end));
    }
}

/// Half-open interval overlap.
pub(crate) fn overlaps(
    a_start: PrimitiveDateTime,
    a_end: PrimitiveDateTime,
    b_start: PrimitiveDateTime,
    b_end: PrimitiveDateTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{EntrantId, Venue};
    use crate::venue::PoolOrderVenueSelector;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::macros::{date, datetime};

    fn matches(count: u32) -> Vec<AbstractMatch> {
        (1..=count)
            .map(|i| {
                AbstractMatch::new(
                    1,
                    i,
                    Some(EntrantId::new(format!("H{i}"))),
                    Some(EntrantId::new(format!("A{i}"))),
                )
            })
            .collect()
    }

    fn config(end: Date, per_day: u32) -> SchedulingConfig {
        SchedulingConfig::new(date!(2026 - 01 - 01), end, per_day, 90, 30)
            .unwrap()
            .with_venues(vec![Venue::new("main", 10), Venue::new("side", 1)])
    }

    #[test]
    fn test_window_exhausted_for_single_day() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = assign_schedule(&matches(8), &config(date!(2026 - 01 - 01), 4), &mut rng);

        assert_eq!(
            result,
            Err(FixtureError::SchedulingWindowExhausted {
                end_date: date!(2026 - 01 - 01),
                scheduled: 4,
                total: 8,
            })
        );
    }

    #[test]
    fn test_slots_and_day_rollover() {
        let mut rng = StdRng::seed_from_u64(0);
        let scheduled =
            assign_schedule(&matches(5), &config(date!(2026 - 01 - 10), 2), &mut rng).unwrap();

        let times: Vec<PrimitiveDateTime> =
            scheduled.iter().map(|m| m.scheduled_at.unwrap()).collect();
        assert_eq!(
            times,
            vec![
                datetime!(2026-01-01 9:00),
                datetime!(2026-01-01 11:00),
                datetime!(2026-01-02 9:00),
                datetime!(2026-01-02 11:00),
                datetime!(2026-01-03 9:00),
            ]
        );
    }

    #[test]
    fn test_priority_prefers_highest_priority_venue() {
        let mut rng = StdRng::seed_from_u64(0);
        let scheduled =
            assign_schedule(&matches(3), &config(date!(2026 - 01 - 10), 3), &mut rng).unwrap();

        assert!(
            scheduled
                .iter()
                .all(|m| m.venue == Some(VenueId::from("main")))
        );
    }

    #[test]
    fn test_priority_skips_reserved_venue() {
        let config = config(date!(2026 - 01 - 10), 2).with_reservations(vec![
            VenueReservation::new(
                "main",
                datetime!(2026-01-01 8:00),
                datetime!(2026-01-01 10:00),
            ),
        ]);
        let mut rng = StdRng::seed_from_u64(0);
        let scheduled = assign_schedule(&matches(2), &config, &mut rng).unwrap();

        assert_eq!(scheduled[0].venue, Some(VenueId::from("side")));
        assert_eq!(scheduled[0].scheduled_at, Some(datetime!(2026-01-01 9:00)));
        assert_eq!(scheduled[1].venue, Some(VenueId::from("main")));
    }

    #[test]
    fn test_blocked_slot_moves_to_next_slot() {
        let config = SchedulingConfig::new(date!(2026 - 01 - 01), date!(2026 - 01 - 05), 2, 60, 0)
            .unwrap()
            .with_venues(vec![Venue::new("only", 1)])
            .with_reservations(vec![VenueReservation::new(
                "only",
                datetime!(2026-01-01 9:00),
                datetime!(2026-01-01 10:00),
            )]);
        let mut rng = StdRng::seed_from_u64(0);
        let scheduled = assign_schedule(&matches(2), &config, &mut rng).unwrap();

        assert_eq!(scheduled[0].scheduled_at, Some(datetime!(2026-01-01 10:00)));
        assert_eq!(scheduled[1].scheduled_at, Some(datetime!(2026-01-02 9:00)));
    }

    #[test]
    fn test_manual_mode_keeps_preassigned_venues() {
        let config = config(date!(2026 - 01 - 10), 4).with_mode(VenueAssignmentMode::Manual);
        let fixtures = vec![
            matches(1)[0].clone().with_venue(VenueId::from("stadium")),
            AbstractMatch::new(1, 2, Some(EntrantId::from("X")), Some(EntrantId::from("Y"))),
        ];
        let mut rng = StdRng::seed_from_u64(0);
        let scheduled = assign_schedule(&fixtures, &config, &mut rng).unwrap();

        assert_eq!(scheduled[0].venue, Some(VenueId::from("stadium")));
        assert_eq!(scheduled[1].venue, None);
        assert!(scheduled.iter().all(|m| m.scheduled_at.is_some()));
    }

    #[test]
    fn test_early_day_start_allows_long_days() {
        let config = SchedulingConfig::new(date!(2026 - 01 - 01), date!(2026 - 01 - 01), 16, 60, 0)
            .unwrap()
            .with_day_start(time::macros::time!(6:00))
            .with_venues(vec![Venue::new("main", 1)]);
        let mut rng = StdRng::seed_from_u64(0);

        let scheduled = assign_schedule(&matches(16), &config, &mut rng).unwrap();

        assert_eq!(scheduled[0].scheduled_at, Some(datetime!(2026-01-01 6:00)));
        assert_eq!(scheduled[15].scheduled_at, Some(datetime!(2026-01-01 21:00)));
    }

    #[test]
    fn test_manual_mode_needs_no_pool() {
        let config = SchedulingConfig::new(date!(2026 - 01 - 01), date!(2026 - 01 - 01), 4, 90, 15)
            .unwrap()
            .with_mode(VenueAssignmentMode::Manual);
        let mut rng = StdRng::seed_from_u64(0);

        assert!(assign_schedule(&matches(4), &config, &mut rng).is_ok());
    }

    #[test]
    fn test_empty_pool_is_rejected() {
        let config =
            SchedulingConfig::new(date!(2026 - 01 - 01), date!(2026 - 01 - 05), 4, 90, 15).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(
            assign_schedule(&matches(1), &config, &mut rng),
            Err(FixtureError::NoVenueAvailable)
        );
    }

    #[test]
    fn test_byes_are_not_placed() {
        let fixtures = vec![
            AbstractMatch::bye(1, 1, EntrantId::from("A")),
            AbstractMatch::new(1, 2, Some(EntrantId::from("B")), Some(EntrantId::from("C"))),
            AbstractMatch::new(2, 1, None, None),
        ];
        let mut rng = StdRng::seed_from_u64(0);
        let scheduled =
            assign_schedule(&fixtures, &config(date!(2026 - 01 - 01), 4), &mut rng).unwrap();

        assert_eq!(scheduled[0].scheduled_at, None);
        assert_eq!(scheduled[0].venue, None);
        assert_eq!(scheduled[1].scheduled_at, Some(datetime!(2026-01-01 9:00)));
        assert_eq!(scheduled[2].scheduled_at, Some(datetime!(2026-01-01 11:00)));
    }

    #[test]
    fn test_output_follows_round_then_match_order() {
        let mut fixtures = matches(3);
        fixtures.push(AbstractMatch::new(
            2,
            1,
            Some(EntrantId::from("X")),
            Some(EntrantId::from("Y")),
        ));
        fixtures.reverse();
        let mut rng = StdRng::seed_from_u64(0);
        let scheduled =
            assign_schedule(&fixtures, &config(date!(2026 - 01 - 10), 4), &mut rng).unwrap();

        let keys: Vec<(u32, u32)> = scheduled.iter().map(|m| m.fixture.order_key()).collect();
        assert_eq!(keys, vec![(1, 1), (1, 2), (1, 3), (2, 1)]);
    }

    #[test]
    fn test_random_mode_dates_do_not_depend_on_seed() {
        let config = config(date!(2026 - 01 - 10), 3).with_mode(VenueAssignmentMode::Random);
        let first = assign_schedule(&matches(7), &config, &mut StdRng::seed_from_u64(1)).unwrap();
        let second = assign_schedule(&matches(7), &config, &mut StdRng::seed_from_u64(2)).unwrap();

        let first_dates: Vec<_> = first.iter().map(|m| m.scheduled_at).collect();
        let second_dates: Vec<_> = second.iter().map(|m| m.scheduled_at).collect();
        assert_eq!(first_dates, second_dates);
    }

    #[test]
    fn test_random_mode_spreads_across_venues() {
        let config = SchedulingConfig::new(date!(2026 - 01 - 01), date!(2026 - 03 - 31), 4, 90, 30)
            .unwrap()
            .with_mode(VenueAssignmentMode::Random)
            .with_venues((0..4).map(|i| Venue::new(format!("V{i}"), 1)).collect());
        let mut rng = StdRng::seed_from_u64(17);

        let scheduled = assign_schedule(&matches(40), &config, &mut rng).unwrap();

        let used: std::collections::HashSet<&VenueId> =
            scheduled.iter().filter_map(|m| m.venue.as_ref()).collect();
        assert!(used.len() > 1, "random mode always picked {used:?}");
    }

    #[test]
    fn test_random_mode_is_reproducible_for_fixed_seed() {
        let config = SchedulingConfig::new(date!(2026 - 01 - 01), date!(2026 - 03 - 31), 4, 90, 30)
            .unwrap()
            .with_mode(VenueAssignmentMode::Random)
            .with_venues((0..4).map(|i| Venue::new(format!("V{i}"), 1)).collect());

        let first = assign_schedule(&matches(20), &config, &mut StdRng::seed_from_u64(5)).unwrap();
        let second =
            assign_schedule(&matches(20), &config, &mut StdRng::seed_from_u64(5)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_selector() {
        let config = config(date!(2026 - 01 - 10), 2);
        let scheduled =
            assign_schedule_with(&matches(2), &config, &mut PoolOrderVenueSelector).unwrap();

        assert!(
            scheduled
                .iter()
                .all(|m| m.venue == Some(VenueId::from("main")))
        );
    }

    #[test]
    fn test_overlaps_is_half_open() {
        let nine = datetime!(2026-01-01 9:00);
        let ten = datetime!(2026-01-01 10:00);
        let eleven = datetime!(2026-01-01 11:00);

        assert!(!overlaps(nine, ten, ten, eleven));
        assert!(overlaps(nine, eleven, ten, eleven));
    }
}
