// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use fuselab_geometry::{Integrals, Profile};
use serde::{Deserialize, Serialize};

use crate::aero::AeroResult;
use crate::mass::MassResult;

/// Complete result of one case run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPayload {
    pub geom: Profile,
    pub aero: AeroResult,
    pub integrals: Integrals,
    pub mass: MassResult,
}

impl ResultPayload {
    /// Pretty-printed JSON; non-finite numbers become `null`.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
