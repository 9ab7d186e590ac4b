// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! FuseLab Geometry
//!
//! Axisymmetric fuselage geometry: meridian profile construction, surface and
//! volume integrals, revolution into a triangle mesh and STL encoding.
//! nalgebra provides the point and vector types.

pub mod error;
pub mod integrals;
pub mod mesh;
pub mod profile;
pub mod revolve;
pub mod stl;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use error::{Error, Result};
pub use integrals::{area_distribution, geom_integrals, gradient, trapezoid, AreaDistribution, Integrals};
pub use mesh::{facet_normal, Mesh};
pub use profile::{
    build_fuselage, haack_nose, linspace, max_tail_angle_deg, min_tail_length_for_angle,
    tail_cosine, Profile,
};
pub use revolve::{revolve_fuselage, revolve_profile};
pub use stl::{
    binary_stl_size, export_fuselage_stl, load_binary_stl, read_binary_stl, save_stl,
    write_stl_ascii, write_stl_binary, BinaryStl, StlExport, StlFormat, StlOptions, StlTriangle,
};
