// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Case configuration.
//!
//! A case is described by seven sections (`geom`, `op`, `cf_model`, `builder`,
//! `mass`, `io`, `plots`) exchanged as nested JSON. Every section carries
//! `#[serde(default)]`, so a partial document is completed field by field from
//! [`CaseConfig::default()`]: missing sections and missing keys inside present
//! sections both fall back to the default value.
//!
//! ```rust,ignore
//! use fuselab_core::CaseConfig;
//!
//! let cfg = CaseConfig::from_json_str(r#"{ "geom": { "l": 1.4 } }"#)?;
//! assert_eq!(cfg.geom.d, 0.18);
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Skin-friction correlation used by the aerodynamic model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CfMode {
    /// Flat-plate laminar mean (Blasius)
    Laminar,
    /// Turbulent ITTC value with Hoerner's transition correction
    Transition,
    /// Smooth turbulent ITTC correlation
    #[default]
    Turbulent,
}

impl CfMode {
    pub const ALL: [CfMode; 3] = [CfMode::Laminar, CfMode::Transition, CfMode::Turbulent];

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            CfMode::Laminar => "laminar",
            CfMode::Transition => "transition",
            CfMode::Turbulent => "turbulent",
        }
    }
}

impl fmt::Display for CfMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CfMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "laminar" => Ok(CfMode::Laminar),
            "transition" => Ok(CfMode::Transition),
            "turbulent" => Ok(CfMode::Turbulent),
            other => Err(Error::validation(
                "cf_model.mode",
                format!("must be 'laminar' | 'transition' | 'turbulent' (got '{}')", other),
            )),
        }
    }
}

/// Body dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryParams {
    /// Body length [m]
    pub l: f64,
    /// Maximum body diameter [m]
    pub d: f64,
    /// Flat base diameter over body diameter
    pub base_ratio: f64,
}

impl Default for GeometryParams {
    fn default() -> Self {
        Self {
            l: 1.10,
            d: 0.18,
            base_ratio: 0.0,
        }
    }
}

/// Free-stream operating point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowParams {
    /// Velocity [m/s]
    #[serde(rename = "V")]
    pub velocity: f64,
    /// Fluid density [kg/m^3]
    pub rho: f64,
    /// Kinematic viscosity [m^2/s]
    pub nu: f64,
    /// Copied from `geom.base_ratio` when a configuration is loaded
    pub base_ratio: f64,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            velocity: 10.0,
            rho: 1.225,
            nu: 1.5e-5,
            base_ratio: 0.0,
        }
    }
}

/// Skin-friction model selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CfModel {
    pub mode: CfMode,
    /// Hoerner transition constant `k` in `Cf_turb - k / sqrt(Re)`
    pub k_transition: f64,
    /// Multiplier taking flat-plate Cf to an axisymmetric body
    #[serde(rename = "threeD_correction")]
    pub three_d_correction: f64,
}

impl Default for CfModel {
    fn default() -> Self {
        Self {
            mode: CfMode::Turbulent,
            k_transition: 1700.0,
            three_d_correction: 1.07,
        }
    }
}

/// Profile construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderParams {
    /// Nose length as a fraction of `l`
    #[serde(rename = "Ln_frac")]
    pub ln_frac: f64,
    /// Haack shape constant (0 = LD-Haack / Von Karman, 1/3 = LV-Haack)
    #[serde(rename = "C_haack")]
    pub c_haack: f64,
    /// Nose sample count
    #[serde(rename = "Nn")]
    pub nn: usize,
    /// Tail length as a fraction of `l`
    #[serde(rename = "Lt_frac")]
    pub lt_frac: f64,
    /// Tail tip radius [m]
    pub r_tip: f64,
    /// Tail sample count
    #[serde(rename = "Nt")]
    pub nt: usize,
    /// Lengthen the tail when the boattail would exceed `alpha_max_deg`
    pub enforce_tail_angle: bool,
    pub alpha_max_deg: f64,
}

impl Default for BuilderParams {
    fn default() -> Self {
        Self {
            ln_frac: 0.25,
            c_haack: 1.0 / 3.0,
            nn: 200,
            lt_frac: 0.25,
            r_tip: 0.0,
            nt: 200,
            enforce_tail_angle: true,
            alpha_max_deg: 13.0,
        }
    }
}

/// Shell mass model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MassParams {
    /// Use `sigma_surface` directly instead of `rho_material * t_skin`
    pub use_surface_density: bool,
    /// Areal density [kg/m^2]
    pub sigma_surface: f64,
    /// Skin material density [kg/m^3]
    pub rho_material: f64,
    /// Skin thickness [m]
    pub t_skin: f64,
    /// Count the flat base disk in the total surface
    pub include_base_disk_area: bool,
    /// Gravitational acceleration [m/s^2]
    pub g: f64,
}

impl Default for MassParams {
    fn default() -> Self {
        Self {
            use_surface_density: false,
            sigma_surface: 1.0,
            rho_material: 1250.0,
            t_skin: 0.0005,
            include_base_disk_area: false,
            g: 9.81,
        }
    }
}

/// Result persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    pub export_csv: bool,
    pub csv_path: PathBuf,
    pub export_json: bool,
    pub json_path: PathBuf,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            export_csv: true,
            csv_path: PathBuf::from("results/data/fuselaje_xy.csv"),
            export_json: true,
            json_path: PathBuf::from("results/data/resultados.json"),
        }
    }
}

/// Presentation hints. Carried through for the host UI; never acted on here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub make_plots: bool,
    pub dpi: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            make_plots: true,
            dpi: 140,
        }
    }
}

/// Complete description of one fuselage case
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseConfig {
    pub geom: GeometryParams,
    pub op: FlowParams,
    pub cf_model: CfModel,
    pub builder: BuilderParams,
    pub mass: MassParams,
    pub io: IoConfig,
    pub plots: PlotConfig,
}

impl CaseConfig {
    /// Parse, complete with defaults, validate and normalize a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Same as [`CaseConfig::from_json_str`] for an already parsed document.
    pub fn from_value(value: Value) -> Result<Self> {
        check_mode(&value)?;
        check_counts(&value)?;

        let mut cfg: CaseConfig = serde_json::from_value(value)?;
        // base_ratio is a geometric property; the flow section only mirrors it
        cfg.op.base_ratio = cfg.geom.base_ratio;

        cfg.validate()?;
        Ok(cfg.with_normalized_paths())
    }

    /// Check every range bound, reporting the first violation.
    pub fn validate(&self) -> Result<()> {
        let geom = &self.geom;
        require(geom.l > 0.0, "geom.l", "must be > 0")?;
        require(geom.d > 0.0, "geom.d", "must be > 0")?;
        require(geom.base_ratio >= 0.0, "geom.base_ratio", "must be >= 0")?;

        let op = &self.op;
        require(op.velocity > 0.0, "op.V", "must be > 0")?;
        require(op.rho > 0.0, "op.rho", "must be > 0")?;
        require(op.nu > 0.0, "op.nu", "must be > 0")?;
        require(op.base_ratio >= 0.0, "op.base_ratio", "must be >= 0")?;

        require(
            self.cf_model.three_d_correction > 0.0,
            "cf_model.threeD_correction",
            "must be > 0",
        )?;

        let b = &self.builder;
        require(b.ln_frac > 0.0 && b.ln_frac < 1.0, "builder.Ln_frac", "must be in (0, 1)")?;
        require(b.lt_frac > 0.0 && b.lt_frac < 1.0, "builder.Lt_frac", "must be in (0, 1)")?;
        require(b.nn >= 10, "builder.Nn", "must be >= 10")?;
        require(b.nt >= 10, "builder.Nt", "must be >= 10")?;
        require(b.r_tip >= 0.0, "builder.r_tip", "must be >= 0")?;
        require(b.alpha_max_deg > 0.0, "builder.alpha_max_deg", "must be > 0")?;

        let m = &self.mass;
        if m.use_surface_density {
            require(m.sigma_surface > 0.0, "mass.sigma_surface", "must be > 0")?;
        } else {
            require(m.rho_material > 0.0, "mass.rho_material", "must be > 0")?;
            require(m.t_skin > 0.0, "mass.t_skin", "must be > 0")?;
        }
        require(m.g > 0.0, "mass.g", "must be > 0")?;

        require(self.plots.dpi >= 50, "plots.dpi", "must be >= 50")?;

        Ok(())
    }

    /// Place a bare relative CSV path under `results/data/`.
    pub fn with_normalized_paths(mut self) -> Self {
        let csv = &self.io.csv_path;
        if csv.is_relative() && !csv.starts_with("results") {
            self.io.csv_path = Path::new("results").join("data").join(csv);
        }
        self
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Load a case configuration from a JSON file.
pub fn load_config(path: impl AsRef<Path>) -> Result<CaseConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    CaseConfig::from_json_str(&text)
}

/// Write a case configuration as pretty JSON, creating parent directories.
pub fn save_config(cfg: &CaseConfig, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, cfg.to_json_pretty()?).map_err(io_err)
}

#[inline]
fn require(ok: bool, field: &'static str, reason: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(Error::validation(field, reason))
    }
}

/// Reject unknown skin-friction modes as a validation error rather than a
/// generic deserialization failure.
fn check_mode(value: &Value) -> Result<()> {
    match value.get("cf_model").and_then(|c| c.get("mode")) {
        None => Ok(()),
        Some(Value::String(s)) => s.parse::<CfMode>().map(|_| ()),
        Some(other) => Err(Error::validation(
            "cf_model.mode",
            format!("must be a string, got {}", other),
        )),
    }
}

/// Integer fields, checked here so a negative or fractional value is
/// reported against its field instead of as a type mismatch.
const COUNT_FIELDS: [(&str, &str, &str, u64); 3] = [
    ("builder", "Nn", "builder.Nn", usize::MAX as u64),
    ("builder", "Nt", "builder.Nt", usize::MAX as u64),
    ("plots", "dpi", "plots.dpi", u32::MAX as u64),
];

fn check_counts(value: &Value) -> Result<()> {
    for (section, key, field, max) in COUNT_FIELDS {
        let Some(raw) = value.get(section).and_then(|s| s.get(key)) else {
            continue;
        };
        match raw.as_u64() {
            Some(n) if n <= max => {}
            _ => {
                return Err(Error::validation(
                    field,
                    format!("must be a non-negative integer, got {}", raw),
                ))
            }
        }
    }
    Ok(())
}
