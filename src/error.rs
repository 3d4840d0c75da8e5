// Copyright 2024-2026 Tork Governance Contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration errors.
//!
//! The only failure a caller can observe. Raised while building a detector
//! or governance engine; scanning itself never fails.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("At least one region must be configured")]
    EmptyRegions,

    #[error("Invalid policy version '{0}': expected MAJOR.MINOR[.PATCH][-PRERELEASE]")]
    InvalidPolicyVersion(String),

    #[error("Invalid custom pattern name '{0}': use letters, digits and underscores")]
    InvalidCustomPatternName(String),

    #[error("Invalid custom pattern '{name}': {source}")]
    InvalidCustomPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
