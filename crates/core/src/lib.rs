// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod plan;
mod request;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use error::CoreError;
pub use plan::{advance_byes, plan_fixture, record_result};
pub use request::{FixturePlan, FixtureRequest};
