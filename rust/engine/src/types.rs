// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request and response types of the engine.

use std::path::PathBuf;

use fuselab_core::{CaseConfig, CfModel, FlowParams};
use fuselab_geometry::{Profile, StlExport, StlOptions};
use fuselab_processing::{Distributions, ModeOverlay, ResultPayload, Sweep, SweepParameter};
use serde::{Deserialize, Deserializer, Serialize};

/// Commands a presentation layer can issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Run a case; result files are written only when `persist` is set.
    RunCase {
        #[serde(deserialize_with = "loaded_config")]
        config: CaseConfig,
        #[serde(default)]
        persist: bool,
    },
    /// Revolve a profile and write it as STL.
    ExportStl {
        profile: Profile,
        path: PathBuf,
        #[serde(default)]
        options: StlOptions,
    },
    Distributions {
        profile: Profile,
        op: FlowParams,
        cf_model: CfModel,
    },
    Sweep {
        #[serde(deserialize_with = "loaded_config")]
        config: CaseConfig,
        parameter: SweepParameter,
    },
    /// `l / d` sweep for every friction regime.
    SweepModes {
        #[serde(deserialize_with = "loaded_config")]
        config: CaseConfig,
    },
}

impl Request {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Request::RunCase { .. } => "run_case",
            Request::ExportStl { .. } => "export_stl",
            Request::Distributions { .. } => "distributions",
            Request::Sweep { .. } => "sweep",
            Request::SweepModes { .. } => "sweep_modes",
        }
    }
}

/// Result of a [`Request`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Response {
    Case(ResultPayload),
    Exported(StlExport),
    Distributions(Distributions),
    Sweep(Sweep),
    ModeOverlay(ModeOverlay),
}

/// Decode a configuration the same way a config file is loaded: defaults
/// merged, `base_ratio` carried over, bounds checked and paths normalized.
fn loaded_config<'de, D: Deserializer<'de>>(deserializer: D) -> Result<CaseConfig, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    CaseConfig::from_value(value).map_err(serde::de::Error::custom)
}
