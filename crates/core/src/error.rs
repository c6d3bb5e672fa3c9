// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fixture_domain::FixtureError;

/// Errors that can occur while planning or progressing a fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A fixture rule was violated.
    FixtureViolation(FixtureError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FixtureViolation(err) => write!(f, "Fixture violation: {err}"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FixtureViolation(err) => Some(err),
        }
    }
}

impl From<FixtureError> for CoreError {
    fn from(err: FixtureError) -> Self {
        Self::FixtureViolation(err)
    }
}
