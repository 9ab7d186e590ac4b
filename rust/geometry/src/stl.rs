// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! STL (stereolithography) encoding.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (solid name, space padded)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (always 0)
//! end
//! ```
//!
//! All numbers are little-endian, so a file holds exactly
//! `84 + 50 * triangle_count` bytes.
//!
//! # ASCII Format
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```
//!
//! Numbers use six-digit scientific notation with a signed exponent of at
//! least two digits (`-9.000000e-02`). Facet normals are recomputed from the
//! winding of every triangle.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::mesh::{facet_normal, Mesh};
use crate::profile::Profile;
use crate::revolve::revolve_fuselage;

/// STL binary header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
pub const TRIANGLE_SIZE: usize = 50;

/// Angular resolution used when none is given
pub const DEFAULT_THETA_SEGMENTS: usize = 128;

pub const DEFAULT_SOLID_NAME: &str = "fuselage";

/// STL encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StlFormat {
    #[default]
    Ascii,
    Binary,
}

/// Parameters of a fuselage export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StlOptions {
    pub format: StlFormat,
    /// Angular segments of the revolution (>= 3)
    pub n_theta: usize,
    pub solid_name: String,
}

impl Default for StlOptions {
    fn default() -> Self {
        Self {
            format: StlFormat::Ascii,
            n_theta: DEFAULT_THETA_SEGMENTS,
            solid_name: DEFAULT_SOLID_NAME.to_string(),
        }
    }
}

/// Summary of a written STL file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StlExport {
    pub path: PathBuf,
    pub format: StlFormat,
    pub triangles: usize,
    pub bytes: u64,
}

/// One triangle record of a binary STL file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StlTriangle {
    pub normal: [f32; 3],
    pub vertices: [[f32; 3]; 3],
    pub attribute: u16,
}

/// Decoded binary STL file
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryStl {
    pub header: [u8; HEADER_SIZE],
    pub triangles: Vec<StlTriangle>,
}

impl BinaryStl {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Header text without the trailing padding
    pub fn solid_name(&self) -> String {
        String::from_utf8_lossy(&self.header)
            .trim_end_matches([' ', '\0'])
            .to_string()
    }
}

/// Exact size of a binary STL file holding `triangle_count` triangles.
#[inline]
pub fn binary_stl_size(triangle_count: usize) -> u64 {
    (HEADER_SIZE + 4) as u64 + (TRIANGLE_SIZE as u64) * triangle_count as u64
}

/// 80-byte header carrying `solid_name`.
///
/// Non-ASCII characters are dropped, the name is cut to 79 bytes and the rest
/// is padded with spaces.
pub fn binary_header(solid_name: &str) -> [u8; HEADER_SIZE] {
    let mut header = [b' '; HEADER_SIZE];
    let name: Vec<u8> = solid_name
        .bytes()
        .filter(u8::is_ascii)
        .take(HEADER_SIZE - 1)
        .collect();
    header[..name.len()].copy_from_slice(&name);
    header
}

/// Write `mesh` as binary STL.
pub fn write_stl_binary<W: Write>(mesh: &Mesh, solid_name: &str, mut writer: W) -> Result<()> {
    let count = u32::try_from(mesh.triangle_count()).map_err(|_| {
        Error::InvalidStl(format!(
            "{} triangles exceed the binary STL count field",
            mesh.triangle_count()
        ))
    })?;

    writer.write_all(&binary_header(solid_name))?;
    writer.write_all(&count.to_le_bytes())?;

    let mut record = [0u8; TRIANGLE_SIZE];
    for [v0, v1, v2] in mesh.triangles() {
        let n = facet_normal(&v0, &v1, &v2);
        put_vec3(&mut record[0..12], n.x, n.y, n.z);
        put_point(&mut record[12..24], &v0);
        put_point(&mut record[24..36], &v1);
        put_point(&mut record[36..48], &v2);
        record[48..50].copy_from_slice(&0u16.to_le_bytes());
        writer.write_all(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write `mesh` as ASCII STL.
pub fn write_stl_ascii<W: Write>(mesh: &Mesh, solid_name: &str, mut writer: W) -> Result<()> {
    writeln!(writer, "solid {}", solid_name)?;

    for [v0, v1, v2] in mesh.triangles() {
        let n = facet_normal(&v0, &v1, &v2);
        writeln!(writer, "  facet normal {} {} {}", sci(n.x), sci(n.y), sci(n.z))?;
        writeln!(writer, "    outer loop")?;
        for v in [v0, v1, v2] {
            writeln!(writer, "      vertex {} {} {}", sci(v.x), sci(v.y), sci(v.z))?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid {}", solid_name)?;
    writer.flush()?;
    Ok(())
}

/// Write `mesh` to `path`, creating parent directories. Returns the file size.
pub fn save_stl(mesh: &Mesh, path: &Path, format: StlFormat, solid_name: &str) -> Result<u64> {
    let file_err = |source: std::io::Error| Error::File {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(file_err)?;
    }

    let file = File::create(path).map_err(file_err)?;
    let writer = BufWriter::new(file);
    match format {
        StlFormat::Binary => write_stl_binary(mesh, solid_name, writer)?,
        StlFormat::Ascii => write_stl_ascii(mesh, solid_name, writer)?,
    }

    Ok(fs::metadata(path).map_err(file_err)?.len())
}

/// Revolve `profile` and write it to `path`.
///
/// The profile and resolution are checked before the destination is touched.
pub fn export_fuselage_stl(
    profile: &Profile,
    path: impl AsRef<Path>,
    options: &StlOptions,
) -> Result<StlExport> {
    let path = path.as_ref();
    let mesh = revolve_fuselage(profile, options.n_theta)?;
    let bytes = save_stl(&mesh, path, options.format, &options.solid_name)?;

    Ok(StlExport {
        path: path.to_path_buf(),
        format: options.format,
        triangles: mesh.triangle_count(),
        bytes,
    })
}

/// Decode a binary STL stream.
pub fn read_binary_stl<R: Read>(mut reader: R) -> Result<BinaryStl> {
    let mut header = [0u8; HEADER_SIZE];
    reader
        .read_exact(&mut header)
        .map_err(|e| truncated(e, "header"))?;

    let mut count = [0u8; 4];
    reader
        .read_exact(&mut count)
        .map_err(|e| truncated(e, "triangle count"))?;
    let count = u32::from_le_bytes(count) as usize;

    // Cap the reservation; the count field is untrusted
    let mut triangles = Vec::with_capacity(count.min(1 << 20));
    let mut record = [0u8; TRIANGLE_SIZE];
    for i in 0..count {
        reader.read_exact(&mut record).map_err(|e| {
            if e.kind() == ErrorKind::UnexpectedEof {
                Error::InvalidStl(format!("expected {} triangles, found {}", count, i))
            } else {
                Error::Io(e)
            }
        })?;

        triangles.push(StlTriangle {
            normal: get_vec3(&record[0..12]),
            vertices: [
                get_vec3(&record[12..24]),
                get_vec3(&record[24..36]),
                get_vec3(&record[36..48]),
            ],
            attribute: u16::from_le_bytes([record[48], record[49]]),
        });
    }

    Ok(BinaryStl { header, triangles })
}

/// Read a binary STL file.
pub fn load_binary_stl(path: impl AsRef<Path>) -> Result<BinaryStl> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::File {
        path: path.to_path_buf(),
        source,
    })?;
    read_binary_stl(BufReader::new(file))
}

/// `{:.6e}` with a signed exponent of at least two digits (`1.000000e+00`).
fn sci(v: f64) -> String {
    let s = format!("{:.6e}", v);
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => s,
    }
}

fn truncated(e: std::io::Error, what: &str) -> Error {
    if e.kind() == ErrorKind::UnexpectedEof {
        Error::InvalidStl(format!("file ends inside the {}", what))
    } else {
        Error::Io(e)
    }
}

#[inline]
fn put_point(buf: &mut [u8], p: &Point3<f64>) {
    put_vec3(buf, p.x, p.y, p.z);
}

#[inline]
fn put_vec3(buf: &mut [u8], x: f64, y: f64, z: f64) {
    buf[0..4].copy_from_slice(&(x as f32).to_le_bytes());
    buf[4..8].copy_from_slice(&(y as f32).to_le_bytes());
    buf[8..12].copy_from_slice(&(z as f32).to_le_bytes());
}

#[inline]
fn get_vec3(buf: &[u8]) -> [f32; 3] {
    let f = |o: usize| f32::from_le_bytes([buf[o], buf[o + 1], buf[o + 2], buf[o + 3]]);
    [f(0), f(4), f(8)]
}
