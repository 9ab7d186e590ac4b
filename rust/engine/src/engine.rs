// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use fuselab_geometry::export_fuselage_stl;
use fuselab_processing::{compute_case, distributions, run_case, sweep, sweep_modes};

use crate::error::{Error, Result};
use crate::types::{Request, Response};

/// Stateless request dispatcher.
///
/// [`Engine::handle`] runs a request on the calling thread. [`Engine::spawn`]
/// runs it on a dedicated worker thread and hands the result back over a
/// channel, so a UI thread never blocks on a case run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine;

impl Engine {
    pub fn new() -> Self {
        Engine
    }

    /// Execute `request` synchronously.
    pub fn handle(&self, request: Request) -> Result<Response> {
        let start = std::time::Instant::now();
        let kind = request.kind();
        tracing::debug!(kind, "Handling request");

        let response = match request {
            Request::RunCase { config, persist } => {
                let payload = if persist {
                    run_case(&config)?
                } else {
                    compute_case(&config)?
                };
                Response::Case(payload)
            }
            Request::ExportStl {
                profile,
                path,
                options,
            } => {
                let export = export_fuselage_stl(&profile, &path, &options)?;
                tracing::info!(
                    path = %export.path.display(),
                    format = ?export.format,
                    triangles = export.triangles,
                    bytes = export.bytes,
                    "Exported STL"
                );
                Response::Exported(export)
            }
            Request::Distributions {
                profile,
                op,
                cf_model,
            } => Response::Distributions(distributions(&profile, &op, &cf_model)?),
            Request::Sweep { config, parameter } => {
                config.validate()?;
                Response::Sweep(sweep(&config, parameter))
            }
            Request::SweepModes { config } => {
                config.validate()?;
                Response::ModeOverlay(sweep_modes(&config))
            }
        };

        tracing::debug!(kind, elapsed_us = start.elapsed().as_micros() as u64, "Request done");
        Ok(response)
    }

    /// Execute `request` on a worker thread.
    pub fn spawn(&self, request: Request) -> Result<PendingResponse> {
        let engine = *self;
        let (tx, rx) = mpsc::channel();

        let worker = thread::Builder::new()
            .name(format!("fuselab-{}", request.kind()))
            .spawn(move || {
                // Nobody may be waiting any more
                let _ = tx.send(engine.handle(request));
            })
            .map_err(Error::Spawn)?;

        Ok(PendingResponse {
            rx,
            worker: Some(worker),
        })
    }
}

/// Result of a spawned request, delivered once.
#[derive(Debug)]
pub struct PendingResponse {
    rx: Receiver<Result<Response>>,
    worker: Option<JoinHandle<()>>,
}

impl PendingResponse {
    /// Block until the worker delivers its result.
    pub fn wait(mut self) -> Result<Response> {
        let result = self.rx.recv().map_err(|_| Error::WorkerDisconnected);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        result?
    }

    /// Poll without blocking; `None` while the worker is still busy.
    pub fn try_wait(&self) -> Option<Result<Response>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(Error::WorkerDisconnected)),
        }
    }
}
