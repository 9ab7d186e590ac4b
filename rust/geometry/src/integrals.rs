// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Surface and volume integrals of a body of revolution.
//!
//! All quantities are trapezoidal quadratures over the sampled profile, so the
//! result depends on sample density. Nose and tail resolutions of a few
//! hundred samples give stable values.

use std::f64::consts::PI;

use fuselab_core::nan_or_f64;
use serde::{Deserialize, Serialize};

use crate::profile::Profile;

/// Areas, volume and centroids of a revolved profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Integrals {
    /// Lateral (wetted) surface [m^2]
    #[serde(rename = "S_lateral", deserialize_with = "nan_or_f64")]
    pub s_lateral: f64,
    /// Lateral surface plus the base disk when it is included [m^2]
    #[serde(rename = "S_total", deserialize_with = "nan_or_f64")]
    pub s_total: f64,
    /// Area of the disk closing the last sample [m^2]
    #[serde(rename = "A_base", deserialize_with = "nan_or_f64")]
    pub a_base: f64,
    /// Enclosed volume [m^3]
    #[serde(rename = "V", deserialize_with = "nan_or_f64")]
    pub volume: f64,
    /// Axial position of the surface centroid; NaN for a zero surface
    #[serde(deserialize_with = "nan_or_f64")]
    pub x_cg_surface: f64,
    /// Axial position of the volume centroid; NaN for a zero volume
    #[serde(deserialize_with = "nan_or_f64")]
    pub x_cg_volume: f64,
}

/// Cross-sectional area along the body and its axial derivative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaDistribution {
    pub x: Vec<f64>,
    pub area: Vec<f64>,
    pub darea_dx: Vec<f64>,
}

/// Integrate the profile.
pub fn geom_integrals(profile: &Profile, include_base_disk_area: bool) -> Integrals {
    let n = profile.x.len().min(profile.y.len());
    let x = &profile.x[..n];
    let y = &profile.y[..n];

    let dydx = gradient(y, x);
    let arc: Vec<f64> = dydx.iter().map(|s| (1.0 + s * s).sqrt()).collect();

    let lateral_integrand: Vec<f64> = y.iter().zip(&arc).map(|(r, a)| r * a).collect();
    let s_lateral = 2.0 * PI * trapezoid(&lateral_integrand, x);

    let (y_last, x_last) = match (y.last(), x.last()) {
        (Some(&r), Some(&xl)) => (r, xl),
        _ => (0.0, 0.0),
    };
    let a_base = PI * y_last * y_last;

    let s_total = if include_base_disk_area {
        s_lateral + a_base
    } else {
        s_lateral
    };

    let area_integrand: Vec<f64> = y.iter().map(|r| r * r).collect();
    let volume = PI * trapezoid(&area_integrand, x);

    let surface_moment: Vec<f64> = x.iter().zip(&lateral_integrand).map(|(xi, f)| xi * f).collect();
    let mut xs_total = 2.0 * PI * trapezoid(&surface_moment, x);
    if include_base_disk_area {
        xs_total += a_base * x_last;
    }
    let x_cg_surface = if s_total > 0.0 { xs_total / s_total } else { f64::NAN };

    let volume_moment: Vec<f64> = x.iter().zip(&area_integrand).map(|(xi, f)| xi * f).collect();
    let xv = PI * trapezoid(&volume_moment, x);
    let x_cg_volume = if volume > 0.0 { xv / volume } else { f64::NAN };

    Integrals {
        s_lateral,
        s_total,
        a_base,
        volume,
        x_cg_surface,
        x_cg_volume,
    }
}

/// Cross-sectional area `pi * y^2` and `dA/dx` at every sample.
pub fn area_distribution(profile: &Profile) -> AreaDistribution {
    let n = profile.x.len().min(profile.y.len());
    let x = profile.x[..n].to_vec();
    let area: Vec<f64> = profile.y[..n].iter().map(|r| PI * r * r).collect();
    let darea_dx = gradient(&area, &x);
    AreaDistribution { x, area, darea_dx }
}

/// Derivative of `y` with respect to `x` on a non-uniform grid.
///
/// Second-order centered differences in the interior, first-order one-sided
/// differences at both ends. Fewer than two samples yield zeros.
pub fn gradient(y: &[f64], x: &[f64]) -> Vec<f64> {
    let n = y.len().min(x.len());
    if n < 2 {
        return vec![0.0; n];
    }

    let mut out = Vec::with_capacity(n);
    out.push((y[1] - y[0]) / (x[1] - x[0]));
    for i in 1..n - 1 {
        let hs = x[i] - x[i - 1];
        let hd = x[i + 1] - x[i];
        let num = hs * hs * y[i + 1] + (hd * hd - hs * hs) * y[i] - hd * hd * y[i - 1];
        out.push(num / (hs * hd * (hd + hs)));
    }
    out.push((y[n - 1] - y[n - 2]) / (x[n - 1] - x[n - 2]));
    out
}

/// Trapezoidal integral of `y` over `x`.
pub fn trapezoid(y: &[f64], x: &[f64]) -> f64 {
    y.windows(2)
        .zip(x.windows(2))
        .map(|(yw, xw)| 0.5 * (yw[0] + yw[1]) * (xw[1] - xw[0]))
        .sum()
}
