// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for case configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, validating or saving a case configuration
#[derive(Error, Debug)]
pub enum Error {
    /// A field is missing its required range or holds an unsupported value.
    #[error("Invalid configuration: {field} {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Malformed configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Build a validation error for `field`.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field for validation errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Error::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }

    #[inline]
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}
