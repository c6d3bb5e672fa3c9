// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Venue preference strategies.
//!
//! A strategy only orders the candidates. The assigner walks that order and
//! takes the first venue whose window is free, so no strategy can cause a
//! double booking.

use crate::draw::fisher_yates;
use crate::types::Venue;
use rand::Rng;
use time::PrimitiveDateTime;

/// Orders the venue pool by preference for one slot.
pub trait VenueSelector {
    /// Returns the candidates for the slot starting at `start`, most preferred first.
    fn rank<'v>(&mut self, venues: &'v [Venue], start: PrimitiveDateTime) -> Vec<&'v Venue>;
}

/// Highest priority first. Venues sharing a priority take turns.
///
/// The rotation counter advances on every call, so a run over the same
/// inputs always produces the same sequence.
#[derive(Debug, Clone, Default)]
pub struct PriorityVenueSelector {
    turn: usize,
}

impl PriorityVenueSelector {
    /// Creates a selector with its rotation at the start.
    #[must_use]
    pub const fn new() -> Self {
        Self { turn: 0 }
    }
}

impl VenueSelector for PriorityVenueSelector {
    fn rank<'v>(&mut self, venues: &'v [Venue], _start: PrimitiveDateTime) -> Vec<&'v Venue> {
        let mut ranked: Vec<&Venue> = venues.iter().collect();
        ranked.sort_by(|a, b| b.priority.cmp(&a.priority));

        let mut tier_start = 0;
        while tier_start < ranked.len() {
            let priority = ranked[tier_start].priority;
            let tier_len = ranked[tier_start..]
                .iter()
                .take_while(|venue| venue.priority == priority)
                .count();
            ranked[tier_start..tier_start + tier_len].rotate_left(self.turn % tier_len);
            tier_start += tier_len;
        }

        self.turn = self.turn.wrapping_add(1);
        ranked
    }
}

/// Uniformly random order, drawn from the injected source.
pub struct RandomVenueSelector<'r, R: Rng + ?Sized> {
    rng: &'r mut R,
}

impl<'r, R: Rng + ?Sized> RandomVenueSelector<'r, R> {
    /// Wraps a random source.
    pub fn new(rng: &'r mut R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + ?Sized> VenueSelector for RandomVenueSelector<'_, R> {
    fn rank<'v>(&mut self, venues: &'v [Venue], _start: PrimitiveDateTime) -> Vec<&'v Venue> {
        let mut ranked: Vec<&Venue> = venues.iter().collect();
        fisher_yates(&mut ranked, &mut *self.rng);
        ranked
    }
}

/// Caller's pool order, ignoring priority.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoolOrderVenueSelector;

impl VenueSelector for PoolOrderVenueSelector {
    fn rank<'v>(&mut self, venues: &'v [Venue], _start: PrimitiveDateTime) -> Vec<&'v Venue> {
        venues.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::macros::datetime;

    fn ids(ranked: &[&Venue]) -> Vec<String> {
        ranked.iter().map(|venue| venue.id.to_string()).collect()
    }

    #[test]
    fn test_priority_orders_by_descending_priority() {
        let venues = vec![
            Venue::new("low", 1),
            Venue::new("high", 10),
            Venue::new("mid", 5),
        ];
        let mut selector = PriorityVenueSelector::new();

        let ranked = selector.rank(&venues, datetime!(2026-01-01 9:00));
        assert_eq!(ids(&ranked), vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_priority_rotates_equal_tiers() {
        let venues = vec![
            Venue::new("north", 5),
            Venue::new("south", 5),
            Venue::new("annex", 1),
        ];
        let mut selector = PriorityVenueSelector::new();
        let at = datetime!(2026-01-01 9:00);

        assert_eq!(ids(&selector.rank(&venues, at)), vec!["north", "south", "annex"]);
        assert_eq!(ids(&selector.rank(&venues, at)), vec!["south", "north", "annex"]);
        assert_eq!(ids(&selector.rank(&venues, at)), vec!["north", "south", "annex"]);
    }

    #[test]
    fn test_random_selector_is_seed_deterministic() {
        let venues: Vec<Venue> = (0..6).map(|i| Venue::new(format!("V{i}"), 1)).collect();
        let at = datetime!(2026-01-01 9:00);

        let mut first_rng = StdRng::seed_from_u64(42);
        let mut second_rng = StdRng::seed_from_u64(42);
        let first = ids(&RandomVenueSelector::new(&mut first_rng).rank(&venues, at));
        let second = ids(&RandomVenueSelector::new(&mut second_rng).rank(&venues, at));

        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
    }

    #[test]
    fn test_pool_order_keeps_caller_order() {
        let venues = vec![Venue::new("b", 1), Venue::new("a", 9)];
        let ranked = PoolOrderVenueSelector.rank(&venues, datetime!(2026-01-01 9:00));

        assert_eq!(ids(&ranked), vec!["b", "a"]);
    }
}
