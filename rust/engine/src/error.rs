// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for engine requests
pub type Result<T> = std::result::Result<T, Error>;

/// Engine errors
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Processing(#[from] fuselab_processing::Error),

    #[error(transparent)]
    Geometry(#[from] fuselab_geometry::Error),

    #[error("Failed to start worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// The worker ended without sending a response
    #[error("Worker thread exited before delivering a response")]
    WorkerDisconnected,
}

impl From<fuselab_core::Error> for Error {
    fn from(e: fuselab_core::Error) -> Self {
        Error::Processing(e.into())
    }
}

impl Error {
    /// True when the request was rejected by configuration validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Processing(e) if e.is_validation())
    }
}
