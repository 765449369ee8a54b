// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tunables of the morphing system.

use anyhow::{Context, Result};
use metamorph_lanes::CarrierRules;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Runtime configuration, loaded from RON. Every field may be omitted.
///
/// ```ron
/// (
///     carrier_grace_ticks: 20,
///     acquire_on_kill: false,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphConfig {
    /// Ticks a fresh carrier waits before it can be picked up.
    pub carrier_grace_ticks: u32,
    /// Multiplier on both half-widths when testing carrier contact.
    pub carrier_reach_factor: f32,
    /// Largest carrier collision width.
    pub carrier_max_width: f32,
    /// Largest carrier collision height.
    pub carrier_max_height: f32,
    /// Distance inside which a carrier drifts toward its owner.
    pub carrier_homing_range: f32,
    /// Blocks per tick a carrier drifts.
    pub carrier_homing_speed: f32,
    /// Whether killing a creature drops its morph for the killer.
    pub acquire_on_kill: bool,
    /// Whether creative players may morph into anything in the catalog.
    pub allow_creative_morphing: bool,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            carrier_grace_ticks: 30,
            carrier_reach_factor: 1.4,
            carrier_max_width: 1.5,
            carrier_max_height: 2.0,
            carrier_homing_range: 8.0,
            carrier_homing_speed: 0.1,
            acquire_on_kill: true,
            allow_creative_morphing: true,
        }
    }
}

impl MorphConfig {
    /// Parses a RON document.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        ron::from_str(text).context("Failed to parse morph configuration")
    }

    /// Reads and parses a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_ron_str(&text).with_context(|| format!("In {}", path.display()))
    }

    /// Serializes to pretty RON.
    pub fn to_ron_string(&self) -> Result<String> {
        let pretty = ron::ser::PrettyConfig::default().indentor("  ".to_string());
        ron::ser::to_string_pretty(self, pretty).context("Failed to serialize morph configuration")
    }

    /// Carrier lane tuning.
    pub fn carrier_rules(&self) -> CarrierRules {
        CarrierRules {
            reach_factor: self.carrier_reach_factor,
            homing_range: self.carrier_homing_range,
            homing_speed: self.carrier_homing_speed,
        }
    }

    /// Carrier size clamp as (width, height).
    pub fn carrier_max_size(&self) -> [f32; 2] {
        [self.carrier_max_width, self.carrier_max_height]
    }
}
