// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for typeahead configuration

use thiserror::Error;

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("max-results must be greater than zero")]
    ZeroMaxResults,

    #[error("Validation error: {0}")]
    Validation(String),
}
