// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fuselage meridian profile: Haack nose, cylindrical midsection and
//! cosine-blended boattail.

use std::f64::consts::PI;

use fuselab_core::{BuilderParams, GeometryParams};
use serde::{Deserialize, Serialize};

/// Number of samples used for a non-empty cylindrical midsection
pub const CYLINDER_SAMPLES: usize = 60;

/// Sampled upper half of the body's meridian, revolved about the x axis
///
/// `x` is non-decreasing, `y` is the local radius with `y[0] == 0` at the
/// nose apex. No two consecutive samples share both coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Requested body length (same as `l`)
    #[serde(rename = "L")]
    pub length: f64,
    /// Body radius `d / 2`
    #[serde(rename = "R")]
    pub radius: f64,
    pub l: f64,
    pub d: f64,
    /// Fineness ratio `l / d`
    pub ld: f64,
    /// Nose length
    #[serde(rename = "Ln")]
    pub ln: f64,
    /// Cylinder length
    #[serde(rename = "Lc")]
    pub lc: f64,
    /// Tail length actually used
    #[serde(rename = "Lt")]
    pub lt: f64,
    pub r_tip: f64,
    /// Tail length asked for through `Lt_frac`
    #[serde(rename = "Lt_requested")]
    pub lt_requested: f64,
    /// Set when the tail-angle floor replaced the requested tail length
    pub tail_extended: bool,
}

impl Profile {
    /// Number of samples
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Distance from the nose apex to the last sample
    pub fn axial_extent(&self) -> f64 {
        match (self.x.first(), self.x.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }

    /// Peak boattail angle of the tail actually built, in degrees
    pub fn tail_angle_deg(&self) -> f64 {
        max_tail_angle_deg(self.lt, self.radius, self.r_tip).0
    }
}

/// Build the fuselage profile from validated parameters.
///
/// When `enforce_tail_angle` is set and the requested tail is too short to
/// keep the boattail below `alpha_max_deg`, the tail is lengthened to the
/// minimum admissible length and the cylinder shrinks to make room. Once the
/// cylinder is gone the body ends up longer than `l`. Either case is reported
/// through [`Profile::tail_extended`] and never clamped back.
pub fn build_fuselage(geom: &GeometryParams, builder: &BuilderParams) -> Profile {
    let l = geom.l;
    let d = geom.d;
    let radius = d / 2.0;
    let r_tip = builder.r_tip;

    let ln = builder.ln_frac * l;
    let lt_requested = builder.lt_frac * l;
    let mut lt = lt_requested;
    let mut tail_extended = false;

    if builder.enforce_tail_angle {
        if let Some(lt_min) = min_tail_length_for_angle(builder.alpha_max_deg, radius, r_tip) {
            if lt < lt_min {
                lt = lt_min;
                tail_extended = true;
            }
        }
    }

    let lc = (l - ln - lt).max(0.0);

    let (nose_x, nose_y) = haack_nose(ln, radius, builder.c_haack, builder.nn);

    let (cyl_x, cyl_y) = if lc > 0.0 {
        let xs = linspace(ln, ln + lc, CYLINDER_SAMPLES);
        let ys = vec![radius; xs.len()];
        (xs, ys)
    } else {
        (vec![ln], vec![radius])
    };

    let (tail_x, tail_y) = tail_cosine(lt, radius, r_tip, builder.nt, ln + lc);

    let capacity = nose_x.len() + cyl_x.len() + tail_x.len();
    let mut x = Vec::with_capacity(capacity);
    let mut y = Vec::with_capacity(capacity);
    append_segment(&mut x, &mut y, &nose_x, &nose_y);
    append_segment(&mut x, &mut y, &cyl_x, &cyl_y);
    append_segment(&mut x, &mut y, &tail_x, &tail_y);

    Profile {
        x,
        y,
        length: l,
        radius,
        l,
        d,
        ld: l / d,
        ln,
        lc,
        lt,
        r_tip,
        lt_requested,
        tail_extended,
    }
}

/// Haack-series nose of length `ln` reaching radius `r`.
///
/// Parametrized by `theta` in `[0, pi]`; `c = 0` gives the LD-Haack
/// (Von Karman) ogive and `c = 1/3` the LV-Haack shape.
pub fn haack_nose(ln: f64, r: f64, c: f64, n: usize) -> (Vec<f64>, Vec<f64>) {
    let theta = linspace(0.0, PI, n);
    let scale = r / PI.sqrt();

    let x: Vec<f64> = theta.iter().map(|t| 0.5 * ln * (1.0 - t.cos())).collect();
    let mut y: Vec<f64> = theta
        .iter()
        .map(|&t| {
            let radicand = t - 0.5 * (2.0 * t).sin() + c * t.sin().powi(3);
            scale * radicand.max(0.0).sqrt()
        })
        .collect();

    // Floor noise at both ends: apex on the axis, shoulder exactly at R
    if let Some(first) = y.first_mut() {
        *first = 0.0;
    }
    if n > 1 {
        if let Some(last) = y.last_mut() {
            *last = r;
        }
    }

    (x, y)
}

/// Cosine-blended tail from `(x0, r_root)` to `(x0 + lt, r_tip)`.
///
/// The slope is zero at both the root and the tip.
pub fn tail_cosine(lt: f64, r_root: f64, r_tip: f64, n: usize, x0: f64) -> (Vec<f64>, Vec<f64>) {
    let s = linspace(0.0, 1.0, n);

    let x = s.iter().map(|s| x0 + s * lt).collect();
    let mut y: Vec<f64> = s
        .iter()
        .map(|s| r_tip + (r_root - r_tip) * 0.5 * (1.0 + (PI * s).cos()))
        .collect();

    if let Some(first) = y.first_mut() {
        *first = r_root;
    }

    (x, y)
}

/// Peak boattail angle of a cosine tail, reached at mid-length.
///
/// Returns `(angle_deg, tan_angle)`.
pub fn max_tail_angle_deg(lt: f64, r_root: f64, r_tip: f64) -> (f64, f64) {
    let tan_alpha = 0.5 * PI * (r_root - r_tip) / lt;
    (tan_alpha.atan().to_degrees(), tan_alpha)
}

/// Shortest cosine tail whose boattail angle stays below `alpha_deg`.
///
/// `None` when `tan(alpha_deg) <= 0`: no finite length satisfies the bound,
/// so the constraint is not applied.
pub fn min_tail_length_for_angle(alpha_deg: f64, r_root: f64, r_tip: f64) -> Option<f64> {
    let tan_alpha = alpha_deg.to_radians().tan();
    if tan_alpha > 0.0 {
        Some(0.5 * PI * (r_root - r_tip) / tan_alpha)
    } else {
        None
    }
}

/// `n` evenly spaced values from `start` to `stop` inclusive; the last value
/// is exactly `stop`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            values[n - 1] = stop;
            values
        }
    }
}

/// Append a segment, dropping its first sample when it repeats the last one.
fn append_segment(xs: &mut Vec<f64>, ys: &mut Vec<f64>, seg_x: &[f64], seg_y: &[f64]) {
    let skip = match (xs.last(), ys.last(), seg_x.first(), seg_y.first()) {
        (Some(&px), Some(&py), Some(&qx), Some(&qy)) => px == qx && py == qy,
        _ => false,
    };
    let start = usize::from(skip);
    xs.extend_from_slice(&seg_x[start.min(seg_x.len())..]);
    ys.extend_from_slice(&seg_y[start.min(seg_y.len())..]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn defaults() -> (GeometryParams, BuilderParams) {
        (GeometryParams::default(), BuilderParams::default())
    }

    #[test]
    fn test_linspace_endpoints() {
        let v = linspace(0.2, 0.9, 7);
        assert_eq!(v.len(), 7);
        assert_eq!(v[0], 0.2);
        assert_eq!(v[6], 0.9);
        assert!(v.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
    }

    #[test]
    fn test_haack_nose_endpoints() {
        let (x, y) = haack_nose(0.3, 0.09, 1.0 / 3.0, 50);
        assert_eq!(x.len(), 50);
        assert_eq!(x[0], 0.0);
        assert_eq!(y[0], 0.0);
        assert_relative_eq!(x[49], 0.3, epsilon = 1e-15);
        assert_eq!(y[49], 0.09);
        assert!(y.iter().all(|&r| (0.0..=0.09 + 1e-12).contains(&r)));
    }

    #[test]
    fn test_von_karman_nose_is_monotonic() {
        let (x, y) = haack_nose(0.5, 0.1, 0.0, 100);
        assert!(x.windows(2).all(|w| w[1] > w[0]));
        assert!(y.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_tail_cosine_endpoints_and_flat_ends() {
        let (x, y) = tail_cosine(0.4, 0.09, 0.01, 101, 0.5);
        assert_eq!(x[0], 0.5);
        assert_eq!(y[0], 0.09);
        assert_relative_eq!(x[100], 0.9, epsilon = 1e-15);
        assert_eq!(y[100], 0.01);
        // zero slope at root and tip: first step is much flatter than mid-tail
        let first_slope = (y[0] - y[1]) / (x[1] - x[0]);
        let mid_slope = (y[50] - y[51]) / (x[51] - x[50]);
        assert!(first_slope < 0.05 * mid_slope);
    }

    #[test]
    fn test_min_tail_length_formula() {
        let lt = min_tail_length_for_angle(13.0, 0.09, 0.0).unwrap();
        assert_relative_eq!(lt, 0.5 * PI * 0.09 / 13.0f64.to_radians().tan(), epsilon = 1e-15);

        // the tail built at that length hits the angle exactly
        let (angle, _) = max_tail_angle_deg(lt, 0.09, 0.0);
        assert_relative_eq!(angle, 13.0, epsilon = 1e-9);
    }

    #[test]
    fn test_min_tail_length_skipped_for_obtuse_angle() {
        assert!(min_tail_length_for_angle(120.0, 0.09, 0.0).is_none());
        assert!(min_tail_length_for_angle(0.0, 0.09, 0.0).is_none());
    }

    #[test]
    fn test_profile_invariants() {
        let (geom, builder) = defaults();
        let p = build_fuselage(&geom, &builder);

        assert_eq!(p.x.len(), p.y.len());
        assert_eq!(p.y[0], 0.0);
        assert_eq!(*p.y.last().unwrap(), builder.r_tip);
        assert!(p.x.windows(2).all(|w| w[1] >= w[0]));
        assert!(p.y.iter().all(|&r| r >= 0.0));
        for i in 1..p.len() {
            assert!(
                !(p.x[i] == p.x[i - 1] && p.y[i] == p.y[i - 1]),
                "repeated vertex at {}",
                i
            );
        }
    }

    #[test]
    fn test_segments_join_without_duplicates() {
        let (geom, builder) = defaults();
        let p = build_fuselage(&geom, &builder);
        // nose + cylinder + tail minus the two shared joins
        assert_eq!(p.len(), builder.nn + CYLINDER_SAMPLES + builder.nt - 2);
    }

    #[test]
    fn test_cylinder_absorbs_lengthened_tail() {
        // 13 deg on a 0.09 m radius needs ~0.61 m of tail, more than Lt_frac * l
        let (geom, builder) = defaults();
        let p = build_fuselage(&geom, &builder);
        let lt_min = min_tail_length_for_angle(13.0, 0.09, 0.0).unwrap();

        assert!(p.tail_extended);
        assert_relative_eq!(p.lt, lt_min);
        assert!(p.lc > 0.0);
        assert_relative_eq!(p.axial_extent(), geom.l, epsilon = 1e-12);
        assert_relative_eq!(p.ln + p.lc + p.lt, geom.l, epsilon = 1e-12);
        assert_relative_eq!(p.tail_angle_deg(), 13.0, epsilon = 1e-9);
    }

    #[test]
    fn test_long_tail_is_kept() {
        let geom = GeometryParams::default();
        let builder = BuilderParams {
            lt_frac: 0.6,
            ln_frac: 0.2,
            ..BuilderParams::default()
        };
        let p = build_fuselage(&geom, &builder);
        assert!(!p.tail_extended);
        assert_relative_eq!(p.lt, 0.6 * geom.l);
        assert_relative_eq!(p.axial_extent(), geom.l, epsilon = 1e-12);
    }

    #[test]
    fn test_angle_floor_extends_tail() {
        let geom = GeometryParams::default();
        let builder = BuilderParams {
            lt_frac: 0.05,
            alpha_max_deg: 5.0,
            r_tip: 0.0,
            ..BuilderParams::default()
        };
        let p = build_fuselage(&geom, &builder);
        let lt_min = min_tail_length_for_angle(5.0, geom.d / 2.0, 0.0).unwrap();

        assert!(p.tail_extended);
        assert_relative_eq!(p.lt, lt_min);
        assert_relative_eq!(p.lt_requested, 0.05 * geom.l);
        assert!(p.axial_extent() > geom.l);
        assert_eq!(p.lc, 0.0);
    }

    #[test]
    fn test_disabled_floor_keeps_requested_tail() {
        let geom = GeometryParams::default();
        let builder = BuilderParams {
            lt_frac: 0.05,
            alpha_max_deg: 5.0,
            enforce_tail_angle: false,
            ..BuilderParams::default()
        };
        let p = build_fuselage(&geom, &builder);
        assert!(!p.tail_extended);
        assert_relative_eq!(p.lt, 0.05 * geom.l);
        assert_relative_eq!(p.axial_extent(), geom.l, epsilon = 1e-12);
    }

    #[test]
    fn test_no_cylinder_emits_single_joint() {
        let geom = GeometryParams::default();
        let builder = BuilderParams {
            ln_frac: 0.5,
            lt_frac: 0.5,
            nn: 20,
            nt: 20,
            ..BuilderParams::default()
        };
        let p = build_fuselage(&geom, &builder);
        assert_eq!(p.lc, 0.0);
        // the lone cylinder point coincides with both neighbours
        assert_eq!(p.len(), 20 + 20 - 1);
    }

    #[test]
    fn test_blunt_tail_ends_at_tip_radius() {
        let geom = GeometryParams::default();
        let builder = BuilderParams {
            r_tip: 0.02,
            ..BuilderParams::default()
        };
        let p = build_fuselage(&geom, &builder);
        assert_eq!(*p.y.last().unwrap(), 0.02);
    }
}
