// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Backend-neutral facade over the FuseLab pipeline.
//!
//! A presentation layer sends [`Request`]s and gets [`Response`]s back,
//! either inline through [`Engine::handle`] or from a worker thread through
//! [`Engine::spawn`]. Requests and responses are serde types, so they can
//! cross an IPC or FFI boundary as JSON.

pub mod engine;
pub mod error;
pub mod types;

pub use engine::{Engine, PendingResponse};
pub use error::{Error, Result};
pub use types::{Request, Response};
