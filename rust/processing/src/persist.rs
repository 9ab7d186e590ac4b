// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Result files: profile CSV, payload JSON and timestamped file names.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use fuselab_geometry::Profile;

use crate::error::{Error, Result};
use crate::payload::ResultPayload;

/// Header row of the profile CSV
pub const PROFILE_CSV_HEADER: &str = "x_m,y_m";

/// Write the profile samples as `x_m,y_m` rows.
pub fn save_profile_csv(profile: &Profile, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    create_parent(path)?;

    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_profile_csv(profile, &mut writer).map_err(|e| Error::io(path, e))?;
    writer.flush().map_err(|e| Error::io(path, e))?;

    tracing::info!(path = %path.display(), samples = profile.len(), "Saved profile CSV");
    Ok(())
}

/// CSV encoding of the profile, one sample per line.
pub fn write_profile_csv<W: Write>(profile: &Profile, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "{}", PROFILE_CSV_HEADER)?;
    for (x, y) in profile.x.iter().zip(&profile.y) {
        writeln!(writer, "{},{}", x, y)?;
    }
    Ok(())
}

/// Write the payload as indented JSON.
pub fn save_results_json(payload: &ResultPayload, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    create_parent(path)?;

    let json = payload.to_json_pretty()?;
    fs::write(path, json).map_err(|e| Error::io(path, e))?;

    tracing::info!(path = %path.display(), "Saved results JSON");
    Ok(())
}

/// `basename_YYYY-MM-DD_HHMMSSZ[_suffix][.ext]` stamped with the current UTC time.
pub fn stamp_name(basename: &str, suffix: &str, ext: &str) -> String {
    stamp_name_at(basename, suffix, ext, Utc::now())
}

/// [`stamp_name`] for a fixed instant.
pub fn stamp_name_at(basename: &str, suffix: &str, ext: &str, at: DateTime<Utc>) -> String {
    let mut name = format!("{}_{}", basename, at.format("%Y-%m-%d_%H%M%SZ"));
    if !suffix.is_empty() {
        name.push('_');
        name.push_str(suffix);
    }
    if !ext.is_empty() {
        if !ext.starts_with('.') {
            name.push('.');
        }
        name.push_str(ext);
    }
    name
}

fn create_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))
        }
        _ => Ok(()),
    }
}
