// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use fuselab_core::{nan_or_f64, MassParams};
use serde::{Deserialize, Serialize};

/// Shell mass estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassResult {
    /// Areal density [kg/m^2]
    #[serde(deserialize_with = "nan_or_f64")]
    pub sigma: f64,
    /// Shell mass [kg]
    #[serde(deserialize_with = "nan_or_f64")]
    pub m_shell: f64,
    /// Shell weight [N]
    #[serde(rename = "W_shell", deserialize_with = "nan_or_f64")]
    pub w_shell: f64,
}

/// Shell mass from the wetted surface, either from a direct areal density or
/// from material density times skin thickness.
pub fn mass_from_surface(s_total: f64, params: &MassParams) -> MassResult {
    let sigma = if params.use_surface_density {
        params.sigma_surface
    } else {
        params.rho_material * params.t_skin
    };
    let m_shell = sigma * s_total;

    MassResult {
        sigma,
        m_shell,
        w_shell: m_shell * params.g,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_material_density() {
        let m = mass_from_surface(2.0, &MassParams::default());
        // 1250 kg/m^3 * 0.5 mm
        assert_relative_eq!(m.sigma, 0.625, epsilon = 1e-12);
        assert_relative_eq!(m.m_shell, 1.25, epsilon = 1e-12);
        assert_relative_eq!(m.w_shell, 1.25 * 9.81, epsilon = 1e-12);
    }

    #[test]
    fn test_surface_density_override() {
        let params = MassParams {
            use_surface_density: true,
            sigma_surface: 1.5,
            ..MassParams::default()
        };
        let m = mass_from_surface(0.4, &params);
        assert_eq!(m.sigma, 1.5);
        assert_relative_eq!(m.m_shell, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_nan_surface_propagates() {
        assert!(mass_from_surface(f64::NAN, &MassParams::default()).m_shell.is_nan());
    }
}
