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

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default movement speed multiplier.
pub const DEFAULT_SPEED: f32 = 1.0;

/// Per-morph tuning. Every field is optional so that a settings table entry
/// can override only what it names and leave the rest to the factory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphSettings {
    /// Names of passive abilities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abilities: Option<Vec<String>>,
    /// Name of the active action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Name of the melee attack.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack: Option<String>,
    /// Movement speed multiplier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
    /// Maximum health override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<f32>,
    /// Collision width override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Collision height override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    /// Whether mobs treat the morph as one of their own.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostile: Option<bool>,
}

impl MorphSettings {
    /// Returns `self` with every unset field taken from `base`.
    pub fn overlay(&self, base: &MorphSettings) -> MorphSettings {
        MorphSettings {
            abilities: self.abilities.clone().or_else(|| base.abilities.clone()),
            action: self.action.clone().or_else(|| base.action.clone()),
            attack: self.attack.clone().or_else(|| base.attack.clone()),
            speed: self.speed.or(base.speed),
            health: self.health.or(base.health),
            width: self.width.or(base.width),
            height: self.height.or(base.height),
            hostile: self.hostile.or(base.hostile),
        }
    }

    /// Parses a settings table: a JSON object keyed by morph name.
    pub fn table_from_json(text: &str) -> Result<HashMap<String, MorphSettings>, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        *self == MorphSettings::default()
    }

    /// Speed multiplier, defaulting to the player's.
    pub fn speed_or_default(&self) -> f32 {
        self.speed.unwrap_or(DEFAULT_SPEED)
    }
}
