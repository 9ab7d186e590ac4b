// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Case runner: profile, drag, integrals and mass for one configuration.

use fuselab_core::CaseConfig;
use fuselab_geometry::{build_fuselage, geom_integrals};

use crate::aero::evaluate;
use crate::error::Result;
use crate::mass::mass_from_surface;
use crate::payload::ResultPayload;
use crate::persist::{save_profile_csv, save_results_json};

/// Compute a case without touching the filesystem.
///
/// The configuration is validated first; nothing is computed for an invalid
/// case. Numerical degeneracies show up as NaN fields, never as errors.
pub fn compute_case(cfg: &CaseConfig) -> Result<ResultPayload> {
    cfg.validate()?;

    tracing::info!(
        l = cfg.geom.l,
        d = cfg.geom.d,
        velocity = cfg.op.velocity,
        mode = %cfg.cf_model.mode,
        "Running fuselage case"
    );

    let profile = build_fuselage(&cfg.geom, &cfg.builder);
    if profile.tail_extended {
        tracing::warn!(
            lt_requested = profile.lt_requested,
            lt = profile.lt,
            lc = profile.lc,
            alpha_max_deg = cfg.builder.alpha_max_deg,
            "Tail lengthened to respect the boattail angle limit"
        );
    }
    tracing::debug!(samples = profile.len(), extent = profile.axial_extent(), "Profile built");

    let aero = evaluate(&profile, &cfg.op, &cfg.cf_model);
    tracing::debug!(re_l = aero.re_l, cf = aero.cf, cd_total = aero.cd_total, "Drag evaluated");

    let integrals = geom_integrals(&profile, cfg.mass.include_base_disk_area);
    let mass = mass_from_surface(integrals.s_total, &cfg.mass);
    tracing::debug!(
        s_total = integrals.s_total,
        volume = integrals.volume,
        m_shell = mass.m_shell,
        "Integrals and mass evaluated"
    );

    Ok(ResultPayload {
        geom: profile,
        aero,
        integrals,
        mass,
    })
}

/// Write the result files enabled in `cfg.io`.
pub fn persist_case(cfg: &CaseConfig, payload: &ResultPayload) -> Result<()> {
    if cfg.io.export_csv {
        save_profile_csv(&payload.geom, &cfg.io.csv_path)?;
    }
    if cfg.io.export_json {
        save_results_json(payload, &cfg.io.json_path)?;
    }
    Ok(())
}

/// Compute a case and persist it.
pub fn run_case(cfg: &CaseConfig) -> Result<ResultPayload> {
    let start = std::time::Instant::now();

    let payload = compute_case(cfg)?;
    persist_case(cfg, &payload)?;

    tracing::info!(
        cd_total = payload.aero.cd_total,
        d_total = payload.aero.d_total,
        m_shell = payload.mass.m_shell,
        elapsed_us = start.elapsed().as_micros() as u64,
        "Case complete"
    );
    Ok(payload)
}
