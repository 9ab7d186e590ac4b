// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # FuseLab Core
//!
//! Case configuration for axisymmetric fuselage studies.
//!
//! ## Overview
//!
//! - **Typed sections**: geometry, operating point, skin-friction model,
//!   profile builder, mass model, persistence and presentation hints
//! - **Defaults**: a single immutable [`CaseConfig::default()`] completes
//!   partial JSON documents field by field
//! - **Validation**: every range bound is checked before a case runs, and the
//!   first violation names the offending field
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fuselab_core::{load_config, CfMode};
//!
//! let cfg = load_config("config.json")?;
//! if cfg.cf_model.mode == CfMode::Laminar {
//!     println!("laminar case, Re based on l = {}", cfg.geom.l);
//! }
//! ```

pub mod config;
pub mod error;
pub mod nan;

pub use config::{
    load_config, save_config, BuilderParams, CaseConfig, CfMode, CfModel, FlowParams,
    GeometryParams, IoConfig, MassParams, PlotConfig,
};
pub use error::{Error, Result};
pub use nan::nan_or_f64;
