// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fixture_domain::FixtureError;
use fixture_engine::CoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read request file '{}': {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid {field} '{value}': {source}")]
    Parse {
        field: &'static str,
        value: String,
        #[source]
        source: time::error::Parse,
    },

    #[error("Failed to render date: {0}")]
    Render(#[from] time::error::Format),

    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
