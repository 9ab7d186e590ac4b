// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for case processing
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running a case or persisting its results
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] fuselab_core::Error),

    #[error(transparent)]
    Geometry(#[from] fuselab_geometry::Error),

    /// Computation succeeded but a result file could not be written
    #[error("Cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Profile has no samples")]
    EmptyProfile,
}

impl Error {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// True when the case was rejected before any computation.
    #[inline]
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Config(e) if e.is_validation())
    }
}
