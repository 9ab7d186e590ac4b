// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use fuselab_core::{CaseConfig, CfMode};
use fuselab_processing::{compute_case, run_case, ResultPayload};

fn config_in(dir: &Path, extra: &str) -> CaseConfig {
    let json = format!(
        r#"{{
            "geom": {{ "l": 1.10, "d": 0.18 {extra} }},
            "io": {{
                "csv_path": {csv:?},
                "json_path": {json:?}
            }}
        }}"#,
        extra = extra,
        csv = dir.join("data").join("profile.csv").display().to_string(),
        json = dir.join("data").join("results.json").display().to_string(),
    );
    CaseConfig::from_json_str(&json).unwrap()
}

#[test]
fn reference_case_writes_both_files() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(dir.path(), "");
    let payload = run_case(&cfg).unwrap();

    assert_relative_eq!(payload.aero.re_l, 733_333.333_333_333_4, max_relative = 1e-12);
    assert!(payload.aero.cf_eff > 0.0);
    assert_eq!(payload.aero.cd_base, 0.0);
    assert_relative_eq!(payload.geom.axial_extent(), 1.10, epsilon = 1e-12);

    let csv = fs::read_to_string(&cfg.io.csv_path).unwrap();
    assert_eq!(csv.lines().next(), Some("x_m,y_m"));
    assert_eq!(csv.lines().count(), payload.geom.len() + 1);

    let json = fs::read_to_string(&cfg.io.json_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    for section in ["geom", "aero", "integrals", "mass"] {
        assert!(value.get(section).is_some(), "missing section {}", section);
    }
    assert!(value["geom"]["x"].is_array());
    assert!(value["aero"]["CD_total"].is_number());

    let reloaded: ResultPayload = serde_json::from_str(&json).unwrap();
    assert_eq!(reloaded.geom.len(), payload.geom.len());
    assert_eq!(reloaded.geom.tail_extended, payload.geom.tail_extended);
    assert_relative_eq!(reloaded.aero.d_total, payload.aero.d_total, max_relative = 1e-12);
    assert_relative_eq!(reloaded.mass.m_shell, payload.mass.m_shell, max_relative = 1e-12);
}

#[test]
fn base_ratio_adds_exact_base_drag() {
    let dir = tempfile::tempdir().unwrap();
    let mut clean = config_in(dir.path(), "");
    clean.io.export_csv = false;
    clean.io.export_json = false;
    let mut based = config_in(dir.path(), r#", "base_ratio": 0.3"#);
    based.io.export_csv = false;
    based.io.export_json = false;
    assert_eq!(based.op.base_ratio, 0.3);

    let a = compute_case(&clean).unwrap();
    let b = compute_case(&based).unwrap();
    assert_eq!(a.aero.cd_clean, b.aero.cd_clean);
    assert_relative_eq!(b.aero.cd_base, 0.029 * 0.09, epsilon = 1e-15);
    assert_relative_eq!(
        b.aero.d_total - a.aero.d_total,
        b.aero.q * 0.029 * 0.09 * b.aero.s_frontal,
        epsilon = 1e-12
    );
}

#[test]
fn effective_friction_is_non_negative_in_every_mode() {
    for mode in CfMode::ALL {
        let mut cfg = CaseConfig::default();
        cfg.io.export_csv = false;
        cfg.io.export_json = false;
        cfg.cf_model.mode = mode;
        // 1e-5 m/s puts ReL below 1
        for velocity in [1.0e-5, 0.5, 10.0, 80.0] {
            cfg.op.velocity = velocity;
            let payload = compute_case(&cfg).unwrap();
            assert!(payload.aero.re_l > 0.0);
            assert!(payload.aero.cf_eff >= 0.0, "{} at {} m/s", mode, velocity);
            assert!(payload.aero.d_total.is_finite(), "{} at {} m/s", mode, velocity);
        }
    }
}

#[test]
fn binding_tail_angle_changes_geometry() {
    let mut cfg = CaseConfig::default();
    cfg.io.export_csv = false;
    cfg.io.export_json = false;
    cfg.builder.alpha_max_deg = 5.0;
    cfg.builder.lt_frac = 0.05;
    cfg.geom.l = 3.0;

    let payload = compute_case(&cfg).unwrap();
    assert!(payload.geom.tail_extended);
    assert!(payload.geom.lt > 0.05 * 3.0);
    assert!(payload.geom.tail_angle_deg() <= 5.0 + 1e-9);
}

#[test]
fn invalid_case_leaves_no_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config_in(dir.path(), "");
    cfg.op.nu = -1.0;
    assert!(run_case(&cfg).unwrap_err().is_validation());
    assert!(!cfg.io.csv_path.exists());
    assert!(!dir.path().join("data").exists());
}

#[test]
fn non_finite_values_serialize_as_null() {
    let mut payload = compute_case(&CaseConfig {
        io: fuselab_core::IoConfig {
            export_csv: false,
            export_json: false,
            ..Default::default()
        },
        ..Default::default()
    })
    .unwrap();
    payload.integrals.x_cg_surface = f64::NAN;

    let value: serde_json::Value =
        serde_json::from_str(&payload.to_json_pretty().unwrap()).unwrap();
    assert!(value["integrals"]["x_cg_surface"].is_null());
}

#[test]
fn payload_with_nan_decodes_back() {
    let mut cfg = CaseConfig::default();
    cfg.io.export_csv = false;
    cfg.io.export_json = false;
    let mut payload = compute_case(&cfg).unwrap();
    payload.integrals.x_cg_surface = f64::NAN;
    payload.integrals.x_cg_volume = f64::NAN;
    payload.aero.cf = f64::NAN;
    payload.mass.m_shell = f64::NAN;

    let json = payload.to_json_pretty().unwrap();
    let back: ResultPayload = serde_json::from_str(&json).unwrap();
    assert!(back.integrals.x_cg_surface.is_nan());
    assert!(back.integrals.x_cg_volume.is_nan());
    assert!(back.aero.cf.is_nan());
    assert!(back.mass.m_shell.is_nan());
    assert_relative_eq!(back.aero.cd_total, payload.aero.cd_total, max_relative = 1e-12);
}

#[test]
fn persisted_results_decode_back() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config_in(dir.path(), "");
    cfg.op.velocity = 1.0e-5;
    let payload = run_case(&cfg).unwrap();

    let json = fs::read_to_string(&cfg.io.json_path).unwrap();
    let back: ResultPayload = serde_json::from_str(&json).unwrap();
    assert_eq!(back.geom.len(), payload.geom.len());
    assert_eq!(back.aero.cf, 0.0);
}
