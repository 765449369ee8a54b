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

//! The pickup carrier: a morph lying in the world, waiting for its owner.

use crate::model::PoseName;
use crate::morph::Morph;
use crate::registry::MorphManager;
use metamorph_core::math::{clamp, Vec3};
use metamorph_core::{EntityId, TagCompound};

const OWNER_KEY: &str = "Owner";
const MORPH_KEY: &str = "Morph";
const TIMER_KEY: &str = "Timer";
const POS_KEY: &str = "Pos";

/// Where a carrier is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarrierState {
    /// Just spawned; not collectible yet.
    Cooldown,
    /// Looking for its owner.
    Seeking,
    /// Handed over. Terminal.
    Delivered,
}

/// A morph waiting to be picked up by one specific player.
///
/// The owner is held as an identity token only. Whoever ticks the carrier
/// looks the live player up by that token every tick, since the player may
/// have reconnected as a new object in the meantime.
#[derive(Debug, Clone)]
pub struct MorphCarrier {
    id: EntityId,
    owner: EntityId,
    morph: Morph,
    timer: u32,
    grace_ticks: u32,
    position: Vec3,
    width: f32,
    height: f32,
    delivered: bool,
}

impl MorphCarrier {
    /// Spawns a carrier in cooldown. Its box is the morph's standing size,
    /// clamped to `max_size`.
    pub fn new(
        id: EntityId,
        owner: EntityId,
        morph: Morph,
        position: Vec3,
        grace_ticks: u32,
        max_size: [f32; 2],
    ) -> Self {
        let [w, h] = morph.size_for(PoseName::Standing);
        Self {
            id,
            owner,
            morph,
            timer: grace_ticks,
            grace_ticks,
            position,
            width: clamp(w, 0.0, max_size[0]),
            height: clamp(h, 0.0, max_size[1]),
            delivered: false,
        }
    }

    /// The carrier's own identity.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Identity of the player it is meant for.
    pub fn owner(&self) -> EntityId {
        self.owner
    }

    /// The morph it carries.
    pub fn morph(&self) -> &Morph {
        &self.morph
    }

    /// Current position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Moves the carrier.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Collision width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Collision height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Remaining cooldown ticks.
    pub fn timer(&self) -> u32 {
        self.timer
    }

    /// How far the spawn animation has progressed, from 0 to 1.
    pub fn growth(&self) -> f32 {
        if self.grace_ticks == 0 {
            return 1.0;
        }
        1.0 - self.timer as f32 / self.grace_ticks as f32
    }

    /// Current state.
    pub fn state(&self) -> CarrierState {
        if self.delivered {
            CarrierState::Delivered
        } else if self.timer > 0 {
            CarrierState::Cooldown
        } else {
            CarrierState::Seeking
        }
    }

    /// Advances the cooldown by one tick.
    pub fn tick_timer(&mut self) {
        self.timer = self.timer.saturating_sub(1);
    }

    /// Moves to [`CarrierState::Delivered`]. Returns `false` if it already was.
    pub fn mark_delivered(&mut self) -> bool {
        !std::mem::replace(&mut self.delivered, true)
    }

    /// Whether the carrier has been handed over.
    pub fn is_delivered(&self) -> bool {
        self.delivered
    }

    /// Carriers never despawn on their own.
    pub fn can_despawn(&self) -> bool {
        false
    }

    /// Distance under which an owner `owner_width` wide touches the carrier.
    pub fn reach(&self, owner_width: f32, factor: f32) -> f32 {
        self.width / 2.0 * factor + owner_width / 2.0 * factor
    }

    /// Save form, for hosts that persist world entities.
    pub fn to_tag(&self) -> TagCompound {
        let mut tag = TagCompound::new();
        tag.set(OWNER_KEY, self.owner.to_string());
        tag.set_compound(MORPH_KEY, self.morph.to_tag());
        tag.set(TIMER_KEY, self.timer);
        tag.set(POS_KEY, self.position.to_array().to_vec());
        tag
    }

    /// Restores a saved carrier. Returns `None`, logging why, if the owner
    /// or the morph cannot be read back.
    pub fn from_tag(
        id: EntityId,
        tag: &TagCompound,
        manager: &MorphManager,
        grace_ticks: u32,
        max_size: [f32; 2],
    ) -> Option<Self> {
        let owner = match tag.get_string(OWNER_KEY).map(str::parse::<EntityId>) {
            Some(Ok(owner)) => owner,
            _ => {
                log::warn!("Dropping saved carrier {}: owner missing or invalid", id);
                return None;
            }
        };
        let morph = tag
            .get_compound(MORPH_KEY)
            .and_then(|m| manager.resolve(&m))?;
        let position = tag
            .get_f32_triple(POS_KEY)
            .map(Vec3::from)
            .unwrap_or(Vec3::ZERO);
        let mut carrier = Self::new(id, owner, morph, position, grace_ticks, max_size);
        if let Some(timer) = tag.get_i64(TIMER_KEY) {
            carrier.timer = timer.clamp(0, grace_ticks as i64) as u32;
        }
        Some(carrier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morph::{EntityMorph, MorphKind};
    use approx::assert_relative_eq;

    fn carrier(size: [f32; 2]) -> MorphCarrier {
        let morph = Morph::new(
            "minecraft:ghast",
            MorphKind::Entity(EntityMorph::new(TagCompound::new(), size[0], size[1])),
        );
        MorphCarrier::new(
            EntityId::new_v4(),
            EntityId::new_v4(),
            morph,
            Vec3::ZERO,
            3,
            [1.5, 2.0],
        )
    }

    #[test]
    fn size_is_clamped() {
        let c = carrier([4.0, 4.0]);
        assert_relative_eq!(c.width(), 1.5);
        assert_relative_eq!(c.height(), 2.0);
    }

    #[test]
    fn cooldown_then_seeking_then_delivered() {
        let mut c = carrier([0.9, 0.9]);
        assert_eq!(c.state(), CarrierState::Cooldown);
        assert_relative_eq!(c.growth(), 0.0);
        for _ in 0..3 {
            c.tick_timer();
        }
        assert_eq!(c.state(), CarrierState::Seeking);
        assert_relative_eq!(c.growth(), 1.0);
        assert!(c.mark_delivered());
        assert!(!c.mark_delivered());
        assert_eq!(c.state(), CarrierState::Delivered);
        assert!(!c.can_despawn());
    }

    #[test]
    fn reach_uses_both_widths() {
        let c = carrier([1.0, 1.0]);
        assert_relative_eq!(c.reach(0.6, 1.4), 0.5 * 1.4 + 0.3 * 1.4);
    }
}
