// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Local flow distributions along the body and one-parameter sweeps of the
//! drag model.
//!
//! Local friction uses the point-wise flat-plate correlations
//! (`0.664 / sqrt(Re_x)` laminar, `0.0592 / Re_x^0.2` turbulent), which differ
//! from the length-averaged ones used by [`crate::aero`].

use std::f64::consts::PI;

use fuselab_core::{CaseConfig, CfMode, CfModel, FlowParams};
use fuselab_geometry::{gradient, linspace, Profile};
use serde::{Deserialize, Serialize};

use crate::aero::evaluate_dimensions;
use crate::error::{Error, Result};

/// Fineness ratio range of the l/d sweeps
pub const LD_RANGE: (f64, f64) = (1.5, 12.0);
pub const LD_POINTS: usize = 60;
pub const BASE_RATIO_RANGE: (f64, f64) = (0.0, 0.8);
pub const BASE_RATIO_POINTS: usize = 41;
pub const VELOCITY_POINTS: usize = 60;
pub const THREE_D_POINTS: usize = 41;

/// Per-sample flow quantities along the profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distributions {
    pub x: Vec<f64>,
    /// Local Reynolds number
    #[serde(rename = "Re_x")]
    pub re_x: Vec<f64>,
    #[serde(rename = "Cf_local")]
    pub cf_local: Vec<f64>,
    /// Wall shear stress [Pa]
    pub tau_w: Vec<f64>,
    /// Lateral surface per unit length `2 pi y sqrt(1 + y'^2)` [m]
    #[serde(rename = "dS_dx")]
    pub ds_dx: Vec<f64>,
    /// Friction drag accumulated from the nose [N]
    #[serde(rename = "Df_cum")]
    pub df_cum: Vec<f64>,
}

/// Local Reynolds number, friction, shear and cumulative friction drag.
pub fn distributions(profile: &Profile, op: &FlowParams, model: &CfModel) -> Result<Distributions> {
    let n = profile.x.len().min(profile.y.len());
    if n == 0 {
        return Err(Error::EmptyProfile);
    }
    let x = &profile.x[..n];
    let y = &profile.y[..n];

    // Index-spaced differences of x give the width of each sample
    let index: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let dx = gradient(x, &index);
    let dydx = gradient(y, x);

    let nu = op.nu.max(1e-12);
    let q = 0.5 * op.rho * op.velocity * op.velocity;

    let re_x: Vec<f64> = x.iter().map(|xi| (op.velocity * xi / nu).max(1e-6)).collect();
    let cf_local: Vec<f64> = re_x
        .iter()
        .map(|&re| local_skin_friction(model, re))
        .collect();
    let tau_w: Vec<f64> = cf_local.iter().map(|cf| q * cf).collect();
    let ds_dx: Vec<f64> = y
        .iter()
        .zip(&dydx)
        .map(|(r, s)| 2.0 * PI * r * (1.0 + s * s).sqrt())
        .collect();

    let mut acc = 0.0;
    let df_cum = tau_w
        .iter()
        .zip(&ds_dx)
        .zip(&dx)
        .map(|((t, s), w)| {
            acc += t * s * w;
            acc
        })
        .collect();

    Ok(Distributions {
        x: x.to_vec(),
        re_x,
        cf_local,
        tau_w,
        ds_dx,
        df_cum,
    })
}

/// Point-wise flat-plate friction at local Reynolds number `re_x`.
pub fn local_skin_friction(model: &CfModel, re_x: f64) -> f64 {
    let re = re_x.max(1.0);
    let turbulent = 0.0592 / re.powf(0.2);
    match model.mode {
        CfMode::Laminar => 0.664 / re.sqrt(),
        CfMode::Turbulent => turbulent.max(0.0),
        CfMode::Transition => (turbulent - model.k_transition / re.sqrt()).max(0.0),
    }
}

/// Parameter varied by a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    /// `l / d` at fixed diameter
    FinenessRatio,
    BaseRatio,
    Velocity,
    ThreeDCorrection,
}

impl SweepParameter {
    pub const ALL: [SweepParameter; 4] = [
        SweepParameter::FinenessRatio,
        SweepParameter::BaseRatio,
        SweepParameter::Velocity,
        SweepParameter::ThreeDCorrection,
    ];
}

/// Total drag coefficient over a parameter grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sweep {
    pub parameter: SweepParameter,
    pub values: Vec<f64>,
    #[serde(rename = "CD_total")]
    pub cd_total: Vec<f64>,
}

/// One curve of a mode overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeCurve {
    pub mode: CfMode,
    #[serde(rename = "CD_total")]
    pub cd_total: Vec<f64>,
}

/// `CD_total` against `l / d` for every friction regime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeOverlay {
    pub ld: Vec<f64>,
    pub curves: Vec<ModeCurve>,
}

/// Grid a sweep runs over, derived from the case's current values.
pub fn sweep_grid(cfg: &CaseConfig, parameter: SweepParameter) -> Vec<f64> {
    match parameter {
        SweepParameter::FinenessRatio => linspace(LD_RANGE.0, LD_RANGE.1, LD_POINTS),
        SweepParameter::BaseRatio => {
            linspace(BASE_RATIO_RANGE.0, BASE_RATIO_RANGE.1, BASE_RATIO_POINTS)
        }
        SweepParameter::Velocity => {
            let v0 = cfg.op.velocity;
            linspace((0.25 * v0).max(0.1), 2.5 * v0, VELOCITY_POINTS)
        }
        SweepParameter::ThreeDCorrection => {
            let k0 = cfg.cf_model.three_d_correction;
            linspace(0.8 * k0, 1.3 * k0, THREE_D_POINTS)
        }
    }
}

/// Evaluate `CD_total` while varying one parameter of `cfg`.
pub fn sweep(cfg: &CaseConfig, parameter: SweepParameter) -> Sweep {
    let values = sweep_grid(cfg, parameter);
    let cd_total = values
        .iter()
        .map(|&v| cd_total_with(cfg, &cfg.cf_model, parameter, v))
        .collect();

    tracing::debug!(?parameter, points = values.len(), "Sweep evaluated");
    Sweep {
        parameter,
        values,
        cd_total,
    }
}

/// `l / d` sweep repeated for the laminar, transition and turbulent regimes.
pub fn sweep_modes(cfg: &CaseConfig) -> ModeOverlay {
    let ld = sweep_grid(cfg, SweepParameter::FinenessRatio);
    let curves = CfMode::ALL
        .iter()
        .map(|&mode| {
            let model = CfModel {
                mode,
                ..cfg.cf_model.clone()
            };
            let cd_total = ld
                .iter()
                .map(|&v| cd_total_with(cfg, &model, SweepParameter::FinenessRatio, v))
                .collect();
            ModeCurve { mode, cd_total }
        })
        .collect();

    ModeOverlay { ld, curves }
}

fn cd_total_with(cfg: &CaseConfig, model: &CfModel, parameter: SweepParameter, value: f64) -> f64 {
    let (mut l, d) = (cfg.geom.l, cfg.geom.d);
    let mut op = cfg.op.clone();
    let mut model = model.clone();

    match parameter {
        SweepParameter::FinenessRatio => l = value * d,
        SweepParameter::BaseRatio => op.base_ratio = value,
        SweepParameter::Velocity => op.velocity = value,
        SweepParameter::ThreeDCorrection => model.three_d_correction = value,
    }

    evaluate_dimensions(l, d, &op, &model).cd_total
}
