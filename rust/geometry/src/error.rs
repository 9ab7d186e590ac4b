// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during meshing and STL encoding
#[derive(Error, Debug)]
pub enum Error {
    /// Inconsistent or under-resolved input to the revolution step.
    /// Raised before any vertex is built.
    #[error("Invalid mesh input: {0}")]
    MeshShape(String),

    #[error("Invalid STL data: {0}")]
    InvalidStl(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error on {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn mesh_shape(msg: impl Into<String>) -> Self {
        Error::MeshShape(msg.into())
    }

    /// True for failures of the underlying reader/writer or filesystem.
    #[inline]
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_) | Error::File { .. })
    }
}
