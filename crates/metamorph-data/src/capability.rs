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

//! Per-player morph state.

use crate::holder::{MorphHolder, PLAYER_HEIGHT, PLAYER_MAX_HEALTH, PLAYER_WIDTH};
use crate::morph::{Morph, DEFAULT_SPEED};
use crate::registry::MorphManager;
use metamorph_core::TagCompound;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The morphing capability of one player.
///
/// Owned exclusively by its player and mutated only through this API. On the
/// authoritative side every mutation is followed by a broadcast; observers
/// mirror it without running their own selection logic.
#[derive(Debug, Clone, Default)]
pub struct Morphing {
    acquired: Vec<Morph>,
    current: Option<Morph>,
    action_timer: u32,
}

impl Morphing {
    /// An unmorphed capability with nothing acquired.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a capability from already-resolved parts without running any
    /// holder hooks. Duplicate acquisitions are dropped.
    pub fn from_parts(current: Option<Morph>, acquired: Vec<Morph>) -> Self {
        let mut morphing = Self {
            current,
            ..Self::default()
        };
        for morph in acquired {
            morphing.acquire_morph(morph);
        }
        morphing
    }

    /// Adds a morph to the acquired set. Returns `false`, and changes
    /// nothing, if it was already there.
    pub fn acquire_morph(&mut self, morph: Morph) -> bool {
        if self.acquired.contains(&morph) {
            return false;
        }
        self.acquired.push(morph);
        true
    }

    /// Acquired morphs in acquisition order.
    pub fn acquired_morphs(&self) -> &[Morph] {
        &self.acquired
    }

    /// Whether `morph` has been acquired.
    pub fn has_acquired(&self, morph: &Morph) -> bool {
        self.acquired.contains(morph)
    }

    /// The acquired morph at `index`.
    pub fn acquired_at(&self, index: usize) -> Option<&Morph> {
        self.acquired.get(index)
    }

    /// The active morph.
    pub fn current_morph(&self) -> Option<&Morph> {
        self.current.as_ref()
    }

    /// Whether a morph is active.
    pub fn is_morphed(&self) -> bool {
        self.current.is_some()
    }

    /// Ticks left before the action can fire again.
    pub fn action_timer(&self) -> u32 {
        self.action_timer
    }

    /// Replaces the active morph, `None` meaning demorph.
    ///
    /// The previous morph's abilities are torn down, the new morph is applied
    /// to the holder (or the player's own size restored) and the action timer
    /// is reset.
    pub fn set_current_morph(&mut self, morph: Option<Morph>, holder: &mut dyn MorphHolder) {
        if let Some(previous) = self.current.take() {
            previous.on_demorph(holder);
        }
        match &morph {
            Some(next) => next.on_morph(holder),
            None => {
                holder.set_size(PLAYER_WIDTH, PLAYER_HEIGHT);
                holder.set_speed_multiplier(DEFAULT_SPEED);
                holder.set_max_health(PLAYER_MAX_HEALTH);
            }
        }
        self.current = morph;
        self.action_timer = 0;
    }

    /// Clears the active morph.
    pub fn demorph(&mut self, holder: &mut dyn MorphHolder) {
        self.set_current_morph(None, holder);
    }

    /// Re-applies the active morph to a fresh holder, e.g. after a rejoin.
    pub fn reapply(&self, holder: &mut dyn MorphHolder) {
        if let Some(morph) = &self.current {
            morph.on_morph(holder);
        }
    }

    /// Per-tick update.
    pub fn update(&mut self, holder: &mut dyn MorphHolder) {
        if let Some(morph) = &self.current {
            morph.update(holder);
        }
        self.action_timer = self.action_timer.saturating_sub(1);
    }

    /// Fires the active morph's action. Returns whether it fired; does
    /// nothing while unmorphed or cooling down.
    pub fn action(&mut self, holder: &mut dyn MorphHolder) -> bool {
        let Some(morph) = &self.current else {
            return false;
        };
        if self.action_timer > 0 {
            return false;
        }
        match morph.action(holder) {
            Some(cooldown) => {
                self.action_timer = cooldown;
                true
            }
            None => false,
        }
    }

    /// Applies the active morph's attack to `target`.
    pub fn attack(&self, target: &mut dyn MorphHolder, attacker: &mut dyn MorphHolder) {
        if let Some(morph) = &self.current {
            morph.attack(target, attacker);
        }
    }

    /// Snapshot for long-lived save data.
    pub fn to_data(&self) -> MorphingData {
        let mut seen = HashSet::new();
        let acquired_morphs = self
            .acquired
            .iter()
            .filter(|m| seen.insert(*m))
            .map(Morph::to_tag)
            .collect();
        MorphingData {
            current_morph: self.current.as_ref().map(Morph::to_tag),
            acquired_morphs,
        }
    }

    /// Restores from save data. Records that no longer resolve are logged
    /// and dropped.
    pub fn from_data(data: &MorphingData, manager: &MorphManager) -> Self {
        let current = data
            .current_morph
            .as_ref()
            .and_then(|tag| manager.resolve(tag));
        let acquired = data
            .acquired_morphs
            .iter()
            .filter_map(|tag| manager.resolve(tag))
            .collect();
        Self::from_parts(current, acquired)
    }
}

/// Persisted layout of a [`Morphing`] capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MorphingData {
    /// The active morph's tag form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_morph: Option<TagCompound>,
    /// Tag forms of the acquired morphs, without duplicates.
    #[serde(default)]
    pub acquired_morphs: Vec<TagCompound>,
}

impl MorphingData {
    /// Encodes as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decodes from JSON.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_layout_uses_camel_case_and_omits_absent_current() {
        let data = MorphingData::default();
        assert_eq!(data.to_json().unwrap(), r#"{"acquiredMorphs":[]}"#);

        let parsed = MorphingData::from_json(r#"{"currentMorph":{"Name":"x"}}"#).unwrap();
        assert!(parsed.acquired_morphs.is_empty());
        assert_eq!(
            parsed.current_morph.unwrap().get_string("Name"),
            Some("x")
        );
    }
}
