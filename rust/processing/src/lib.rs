// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # FuseLab Processing
//!
//! Drag, mass and the case pipeline built on top of the geometry crate.
//!
//! ```rust,ignore
//! use fuselab_core::load_config;
//! use fuselab_processing::run_case;
//!
//! let cfg = load_config("config.json")?;
//! let payload = run_case(&cfg)?;
//! println!("CD = {:.4}, D = {:.3} N", payload.aero.cd_total, payload.aero.d_total);
//! ```

pub mod aero;
pub mod analysis;
pub mod error;
pub mod mass;
pub mod payload;
pub mod persist;
pub mod pipeline;

pub use aero::{
    cf_laminar, cf_transition_hoerner, cf_turbulent_ittc, delta_cd_base, evaluate,
    evaluate_dimensions, hoerner_form_factor, skin_friction, AeroResult,
};
pub use analysis::{
    distributions, sweep, sweep_grid, sweep_modes, Distributions, ModeCurve, ModeOverlay, Sweep,
    SweepParameter,
};
pub use error::{Error, Result};
pub use mass::{mass_from_surface, MassResult};
pub use payload::ResultPayload;
pub use persist::{save_profile_csv, save_results_json, stamp_name};
pub use pipeline::{compute_case, persist_case, run_case};
