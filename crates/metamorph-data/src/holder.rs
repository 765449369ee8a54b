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

//! The seam between morph logic and the host's living entities.

use metamorph_core::math::Vec3;
use metamorph_core::EntityId;

/// Width of an unmorphed player, in blocks.
pub const PLAYER_WIDTH: f32 = 0.6;
/// Height of an unmorphed player, in blocks.
pub const PLAYER_HEIGHT: f32 = 1.8;
/// Maximum health of an unmorphed player.
pub const PLAYER_MAX_HEALTH: f32 = 20.0;
/// Air supply of a player with full lungs, in ticks.
pub const MAX_AIR: i32 = 300;

/// A timed status effect applied by an attack.
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    /// Effect identifier, e.g. `"wither"`.
    pub name: String,
    /// Duration in ticks.
    pub duration: u32,
    /// Zero-based potency.
    pub amplifier: u8,
}

impl Effect {
    /// Creates a level-one effect.
    pub fn new(name: impl Into<String>, duration: u32) -> Self {
        Self {
            name: name.into(),
            duration,
            amplifier: 0,
        }
    }
}

/// A living entity a morph can be worn by, or aimed at.
///
/// Abilities, actions and attacks only ever touch the world through this
/// trait. The host adapts its own entity type to it; the SDK ships a plain
/// `PlayerBody` for
/// simulation and tests.
pub trait MorphHolder {
    /// Stable identity of the entity.
    fn id(&self) -> EntityId;
    /// Feet position in world space.
    fn position(&self) -> Vec3;
    /// Current collision width.
    fn width(&self) -> f32;
    /// Current collision height.
    fn height(&self) -> f32;
    /// Whether the entity is alive.
    fn is_alive(&self) -> bool;
    /// Unit vector the entity is looking along.
    fn look_direction(&self) -> Vec3;
    /// Whether the entity is crouching.
    fn is_sneaking(&self) -> bool;
    /// Whether the entity is gliding or flying.
    fn is_flying(&self) -> bool;
    /// Whether the entity is submerged.
    fn is_in_water(&self) -> bool;
    /// Whether the entity walked into a wall this tick.
    fn is_collided_horizontally(&self) -> bool;
    /// Whether this view runs on the presentation side.
    fn is_remote(&self) -> bool {
        false
    }

    /// Sets the collision box.
    fn set_size(&mut self, width: f32, height: f32);
    /// Grants or revokes free flight.
    fn set_may_fly(&mut self, may_fly: bool);
    /// Puts out any fire on the entity.
    fn extinguish(&mut self);
    /// Sets the remaining air supply in ticks.
    fn set_air(&mut self, air: i32);
    /// Marks the entity as clinging to a wall.
    fn set_climbing(&mut self, climbing: bool);
    /// Adds to the current velocity.
    fn apply_impulse(&mut self, impulse: Vec3);
    /// Applies a status effect.
    fn add_effect(&mut self, effect: Effect);
    /// Sets the movement speed multiplier, 1.0 being the player default.
    fn set_speed_multiplier(&mut self, speed: f32);
    /// Sets the maximum health.
    fn set_max_health(&mut self, health: f32);
    /// Launches a projectile of the given kind from the entity's eyes.
    fn spawn_projectile(&mut self, kind: &str, direction: Vec3);
}
