// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Revolution of a meridian profile about the x axis into a closed
//! triangulated surface.

use std::f64::consts::PI;

use nalgebra::Point3;

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::profile::Profile;

/// Minimum angular resolution for a closed ring
pub const MIN_THETA_SEGMENTS: usize = 3;

/// Revolve `(x, r)` samples into a triangle mesh with `n_theta` angular steps.
///
/// Vertices are stored ring by ring: sample `i` at angle `j` has index
/// `i * n_theta + j`. Each quad between samples `i`, `i + 1` and angles `j`,
/// `j + 1 (mod n_theta)` yields the triangles `(p0, p1, p2)` and
/// `(p0, p2, p3)`. The modulo wrap closes the surface angularly.
///
/// Input shape is checked before anything is allocated.
pub fn revolve_profile(x: &[f64], r: &[f64], n_theta: usize) -> Result<Mesh> {
    if x.len() != r.len() {
        return Err(Error::mesh_shape(format!(
            "x and r must have the same length (got {} and {})",
            x.len(),
            r.len()
        )));
    }
    if x.len() < 2 {
        return Err(Error::mesh_shape(format!(
            "at least 2 axial samples are required (got {})",
            x.len()
        )));
    }
    if n_theta < MIN_THETA_SEGMENTS {
        return Err(Error::mesh_shape(format!(
            "n_theta must be >= {} (got {})",
            MIN_THETA_SEGMENTS, n_theta
        )));
    }

    let n_ax = x.len();
    let vertex_count = n_ax
        .checked_mul(n_theta)
        .filter(|&n| n <= u32::MAX as usize)
        .ok_or_else(|| {
            Error::mesh_shape(format!(
                "{} x {} vertices exceed the 32-bit index range",
                n_ax, n_theta
            ))
        })?;
    let triangle_count = 2 * (n_ax - 1) * n_theta;

    let angles: Vec<(f64, f64)> = (0..n_theta)
        .map(|j| {
            let theta = 2.0 * PI * j as f64 / n_theta as f64;
            (theta.cos(), theta.sin())
        })
        .collect();

    let mut mesh = Mesh::with_capacity(vertex_count, triangle_count);

    for (&xi, &ri) in x.iter().zip(r) {
        for &(cos_t, sin_t) in &angles {
            mesh.add_vertex(Point3::new(xi, ri * cos_t, ri * sin_t));
        }
    }

    let n = n_theta as u32;
    let vid = |i: u32, j: u32| i * n + j;
    for i in 0..(n_ax - 1) as u32 {
        for j in 0..n {
            let jn = (j + 1) % n;
            let p0 = vid(i, j);
            let p1 = vid(i + 1, j);
            let p2 = vid(i + 1, jn);
            let p3 = vid(i, jn);
            mesh.add_triangle(p0, p1, p2);
            mesh.add_triangle(p0, p2, p3);
        }
    }

    Ok(mesh)
}

/// Revolve a built fuselage profile.
#[inline]
pub fn revolve_fuselage(profile: &Profile, n_theta: usize) -> Result<Mesh> {
    revolve_profile(&profile.x, &profile.y, n_theta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_triangle_and_vertex_counts() {
        let x = [0.0, 0.5, 1.0];
        let r = [0.0, 0.2, 0.1];
        let mesh = revolve_profile(&x, &r, 4).unwrap();
        assert_eq!(mesh.vertex_count(), 3 * 4);
        assert_eq!(mesh.triangle_count(), 2 * (3 - 1) * 4);
    }

    #[test]
    fn test_ring_positions() {
        let mesh = revolve_profile(&[0.0, 1.0], &[1.0, 1.0], 4).unwrap();
        // second angle of the first ring sits at 90 degrees
        let p = mesh.positions[1];
        assert_relative_eq!(p.x, 0.0);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-15);
        assert_relative_eq!(p.z, 1.0, epsilon = 1e-15);
        // no duplicated seam ring: last angle is 270 degrees, not 360
        let last = mesh.positions[3];
        assert_relative_eq!(last.z, -1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_angular_wrap_closes_ring() {
        let n_theta = 5;
        let mesh = revolve_profile(&[0.0, 1.0], &[0.5, 0.5], n_theta).unwrap();
        // last quad of the first band reuses angle 0
        let last_quad = &mesh.indices[(2 * (n_theta - 1)) * 3..];
        assert_eq!(last_quad, &[4, 9, 5, 4, 5, 0]);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn test_consistent_winding() {
        // on a plain cylinder every facet faces the same side of the wall
        let mesh = revolve_profile(&[0.0, 1.0, 2.0], &[1.0, 1.0, 1.0], 16).unwrap();
        for n in mesh.facet_normals() {
            assert_relative_eq!(n.x, 0.0, epsilon = 1e-12);
        }
        let signs: Vec<bool> = mesh
            .triangles()
            .zip(mesh.facet_normals())
            .map(|([v0, v1, v2], n)| {
                let c = (v0.coords + v1.coords + v2.coords) / 3.0;
                n.dot(&nalgebra::Vector3::new(0.0, c.y, c.z)) > 0.0
            })
            .collect();
        assert!(signs.iter().all(|&s| s == signs[0]));
    }

    #[test]
    fn test_apex_ring_gives_degenerate_facets() {
        let mesh = revolve_profile(&[0.0, 1.0], &[0.0, 1.0], 8).unwrap();
        let normals = mesh.facet_normals();
        // (p0, p2, p3) collapses when p0 and p3 are both on the axis
        assert_eq!(normals[1], nalgebra::Vector3::zeros());
        assert!(normals[0].norm() > 0.99);
    }

    #[test]
    fn test_shape_errors() {
        assert!(matches!(
            revolve_profile(&[0.0, 1.0], &[0.0], 8),
            Err(Error::MeshShape(_))
        ));
        assert!(matches!(
            revolve_profile(&[0.0], &[0.0], 8),
            Err(Error::MeshShape(_))
        ));
        assert!(matches!(
            revolve_profile(&[0.0, 1.0], &[0.0, 1.0], 2),
            Err(Error::MeshShape(_))
        ));
    }
}
