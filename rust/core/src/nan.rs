// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serde support for result fields that may hold NaN.
//!
//! serde_json writes non-finite floats as `null`; these fields read `null`
//! back as NaN so a degenerate payload still decodes.

use serde::{Deserialize, Deserializer};

/// Decode an `f64`, mapping `null` to NaN.
pub fn nan_or_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}
