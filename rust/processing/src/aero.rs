// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Closed-form drag model: flat-plate skin friction scaled by a Hoerner form
//! factor, plus an optional flat-base penalty. All coefficients refer to the
//! frontal area.

use std::f64::consts::PI;

use fuselab_core::{nan_or_f64, CfMode, CfModel, FlowParams};
use fuselab_geometry::Profile;
use serde::{Deserialize, Serialize};

/// Base drag increment per unit `(base diameter / d)^2`
pub const BASE_DRAG_FACTOR: f64 = 0.029;

/// Aerodynamic coefficients and forces of one operating point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AeroResult {
    /// Reynolds number based on body length
    #[serde(rename = "ReL", deserialize_with = "nan_or_f64")]
    pub re_l: f64,
    #[serde(rename = "Cf", deserialize_with = "nan_or_f64")]
    pub cf: f64,
    /// Skin friction after the 3D correction
    #[serde(rename = "Cf_eff", deserialize_with = "nan_or_f64")]
    pub cf_eff: f64,
    /// Hoerner form factor
    #[serde(rename = "F", deserialize_with = "nan_or_f64")]
    pub form_factor: f64,
    #[serde(rename = "CD_clean", deserialize_with = "nan_or_f64")]
    pub cd_clean: f64,
    #[serde(rename = "CD_base", deserialize_with = "nan_or_f64")]
    pub cd_base: f64,
    #[serde(rename = "CD_total", deserialize_with = "nan_or_f64")]
    pub cd_total: f64,
    /// Frontal area [m^2]
    #[serde(rename = "S_f", deserialize_with = "nan_or_f64")]
    pub s_frontal: f64,
    /// Approximate wetted area `0.75 pi d l` [m^2]
    #[serde(rename = "S_w", deserialize_with = "nan_or_f64")]
    pub s_wet: f64,
    /// Dynamic pressure [Pa]
    #[serde(deserialize_with = "nan_or_f64")]
    pub q: f64,
    #[serde(rename = "D_clean", deserialize_with = "nan_or_f64")]
    pub d_clean: f64,
    #[serde(rename = "D_base", deserialize_with = "nan_or_f64")]
    pub d_base: f64,
    #[serde(rename = "D_total", deserialize_with = "nan_or_f64")]
    pub d_total: f64,
}

/// Mean laminar flat-plate friction (Blasius).
pub fn cf_laminar(re_l: f64) -> f64 {
    if re_l <= 0.0 {
        return f64::NAN;
    }
    1.328 / re_l.sqrt()
}

/// Smooth turbulent friction, ITTC/Hoerner correlation, floored at zero.
///
/// The correlation has no finite value up to `Re = 1` (`log10 Re <= 0`); it
/// reads as zero there.
pub fn cf_turbulent_ittc(re_l: f64) -> f64 {
    if re_l <= 0.0 {
        return f64::NAN;
    }
    if re_l <= 1.0 {
        return 0.0;
    }
    floor_zero(0.455 / re_l.log10().powf(2.58) - 1700.0 / re_l)
}

/// Turbulent friction with Hoerner's transition correction `k / sqrt(Re)`.
pub fn cf_transition_hoerner(re_l: f64, k: f64) -> f64 {
    if re_l <= 0.0 {
        return f64::NAN;
    }
    floor_zero(cf_turbulent_ittc(re_l) - k / re_l.sqrt())
}

/// Friction coefficient of the selected regime.
pub fn skin_friction(model: &CfModel, re_l: f64) -> f64 {
    match model.mode {
        CfMode::Laminar => cf_laminar(re_l),
        CfMode::Transition => cf_transition_hoerner(re_l, model.k_transition),
        CfMode::Turbulent => cf_turbulent_ittc(re_l),
    }
}

/// Hoerner form factor `F` such that `CD_frontal = Cf * F`.
pub fn hoerner_form_factor(l_over_d: f64) -> f64 {
    let d_over_l = 1.0 / l_over_d;
    3.0 * l_over_d + 4.5 * d_over_l.sqrt() + 21.0 * d_over_l * d_over_l
}

/// Base drag increment for a flat base; zero unless `base_ratio > 0`.
pub fn delta_cd_base(base_ratio: f64) -> f64 {
    if base_ratio > 0.0 {
        BASE_DRAG_FACTOR * base_ratio * base_ratio
    } else {
        0.0
    }
}

/// Frontal and approximate wetted areas `(S_f, S_w)`.
pub fn reference_areas(l: f64, d: f64) -> (f64, f64) {
    (0.25 * PI * d * d, 0.75 * PI * d * l)
}

/// Evaluate the drag model for a body of length `l` and diameter `d`.
pub fn evaluate_dimensions(l: f64, d: f64, op: &FlowParams, model: &CfModel) -> AeroResult {
    let re_l = op.velocity * l / op.nu;
    let cf = skin_friction(model, re_l);
    let cf_eff = cf * model.three_d_correction;
    let form_factor = hoerner_form_factor(l / d);

    let cd_clean = cf_eff * form_factor;
    let cd_base = delta_cd_base(op.base_ratio);
    let cd_total = cd_clean + cd_base;

    let (s_frontal, s_wet) = reference_areas(l, d);
    let q = 0.5 * op.rho * op.velocity * op.velocity;

    AeroResult {
        re_l,
        cf,
        cf_eff,
        form_factor,
        cd_clean,
        cd_base,
        cd_total,
        s_frontal,
        s_wet,
        q,
        d_clean: q * cd_clean * s_frontal,
        d_base: q * cd_base * s_frontal,
        d_total: q * cd_total * s_frontal,
    }
}

/// Evaluate the drag model on a built profile's nominal dimensions.
#[inline]
pub fn evaluate(profile: &Profile, op: &FlowParams, model: &CfModel) -> AeroResult {
    evaluate_dimensions(profile.l, profile.d, op, model)
}

// NaN passes through
#[inline]
fn floor_zero(v: f64) -> f64 {
    if v < 0.0 {
        0.0
    } else {
        v
    }
}
