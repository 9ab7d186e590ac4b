// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use fuselab_core::CaseConfig;
use fuselab_engine::{Engine, Request, Response};
use fuselab_geometry::stl::binary_stl_size;
use fuselab_geometry::{StlFormat, StlOptions};

fn case_profile(engine: &Engine) -> fuselab_geometry::Profile {
    match engine
        .handle(Request::RunCase {
            config: CaseConfig::default(),
            persist: false,
        })
        .unwrap()
    {
        Response::Case(payload) => payload.geom,
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn run_then_export_from_a_worker() {
    let engine = Engine::new();
    let profile = case_profile(&engine);
    let samples = profile.len();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stl").join("body.stl");
    let pending = engine
        .spawn(Request::ExportStl {
            profile,
            path: path.clone(),
            options: StlOptions {
                format: StlFormat::Binary,
                n_theta: 32,
                ..StlOptions::default()
            },
        })
        .unwrap();

    match pending.wait().unwrap() {
        Response::Exported(export) => {
            assert_eq!(export.triangles, 2 * (samples - 1) * 32);
            assert_eq!(export.bytes, binary_stl_size(export.triangles));
            assert_eq!(export.path, path);
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn requests_decode_from_json() {
    let json = r#"{
        "type": "sweep",
        "config": { "geom": { "l": 2.0, "d": 0.25 } },
        "parameter": "base_ratio"
    }"#;
    let request: Request = serde_json::from_str(json).unwrap();
    assert_eq!(request.kind(), "sweep");

    match Engine::new().handle(request).unwrap() {
        Response::Sweep(sweep) => {
            assert_eq!(sweep.values.len(), 41);
            assert!(sweep.cd_total.windows(2).all(|w| w[1] >= w[0]));
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn export_defaults_to_ascii() {
    let json = r#"{ "type": "run_case", "config": {} }"#;
    let request: Request = serde_json::from_str(json).unwrap();
    let engine = Engine::new();
    let profile = match engine.handle(request).unwrap() {
        Response::Case(payload) => payload.geom,
        other => panic!("unexpected response: {other:?}"),
    };

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("body.stl");
    let response = engine
        .handle(Request::ExportStl {
            profile,
            path: path.clone(),
            options: StlOptions {
                n_theta: 8,
                ..StlOptions::default()
            },
        })
        .unwrap();
    assert!(matches!(response, Response::Exported(ref e) if e.format == StlFormat::Ascii));
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("solid fuselage"));
}

#[test]
fn responses_encode_to_json() {
    let engine = Engine::new();
    let profile = case_profile(&engine);
    let response = engine
        .handle(Request::Distributions {
            profile,
            op: Default::default(),
            cf_model: Default::default(),
        })
        .unwrap();

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["type"], "distributions");
    assert!(value["data"]["Df_cum"].is_array());
}

#[test]
fn decoded_configs_are_loaded_like_files() {
    let json = r#"{ "type": "run_case", "config": { "geom": { "base_ratio": 0.3 } } }"#;
    let request: Request = serde_json::from_str(json).unwrap();
    match Engine::new().handle(request).unwrap() {
        Response::Case(payload) => assert!(payload.aero.cd_base > 0.0),
        other => panic!("unexpected response: {other:?}"),
    }

    let invalid = r#"{ "type": "sweep_modes", "config": { "op": { "V": 0.0 } } }"#;
    let err = serde_json::from_str::<Request>(invalid).unwrap_err();
    assert!(err.to_string().contains("op.V"));
}

#[test]
fn case_responses_survive_json() {
    let engine = Engine::new();
    let config = CaseConfig::from_json_str(r#"{ "op": { "V": 1.0e-5 } }"#).unwrap();
    let mut response = engine
        .handle(Request::RunCase {
            config,
            persist: false,
        })
        .unwrap();
    if let Response::Case(payload) = &mut response {
        payload.integrals.x_cg_surface = f64::NAN;
    }

    let json = serde_json::to_string(&response).unwrap();
    match serde_json::from_str::<Response>(&json).unwrap() {
        Response::Case(payload) => {
            assert!(payload.aero.cf_eff >= 0.0);
            assert!(payload.integrals.x_cg_surface.is_nan());
        }
        other => panic!("unexpected response: {other:?}"),
    }
}
