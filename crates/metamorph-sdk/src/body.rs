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

//! A plain-data player entity.

use metamorph_core::math::Vec3;
use metamorph_core::EntityId;
use metamorph_data::holder::{MAX_AIR, PLAYER_HEIGHT, PLAYER_MAX_HEALTH, PLAYER_WIDTH};
use metamorph_data::{Effect, MorphHolder};

/// Horizontal velocity kept per tick.
const FRICTION: f32 = 0.91;

/// A projectile launch requested by an action.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileRequest {
    /// Projectile kind, e.g. `"fireball"`.
    pub kind: String,
    /// Launch origin.
    pub origin: Vec3,
    /// Launch direction.
    pub direction: Vec3,
}

/// Player state as the morphing system sees it.
///
/// Hosts mirror their own entity into this each tick, or use it directly in
/// headless simulations. Side effects that need the world (projectiles,
/// effects) are queued for the host to drain.
#[derive(Debug, Clone)]
pub struct PlayerBody {
    /// Identity.
    pub id: EntityId,
    /// Feet position.
    pub position: Vec3,
    /// Velocity in blocks per tick.
    pub velocity: Vec3,
    /// Look direction, unit length.
    pub look: Vec3,
    /// Collision width.
    pub width: f32,
    /// Collision height.
    pub height: f32,
    /// Crouching.
    pub sneaking: bool,
    /// Gliding or flying.
    pub flying: bool,
    /// Submerged.
    pub in_water: bool,
    /// Walked into a wall this tick.
    pub collided_horizontally: bool,
    /// Alive.
    pub alive: bool,
    /// Presentation-side view.
    pub remote: bool,
    /// Free flight allowed.
    pub may_fly: bool,
    /// Clinging to a wall.
    pub climbing: bool,
    /// Burning.
    pub on_fire: bool,
    /// Remaining air in ticks.
    pub air: i32,
    /// Movement speed multiplier.
    pub speed: f32,
    /// Maximum health.
    pub max_health: f32,
    /// Effects applied and not yet drained by the host.
    pub effects: Vec<Effect>,
    /// Projectiles requested and not yet drained by the host.
    pub projectiles: Vec<ProjectileRequest>,
}

impl PlayerBody {
    /// A standing, unmorphed player.
    pub fn new(id: EntityId, position: Vec3) -> Self {
        Self {
            id,
            position,
            velocity: Vec3::ZERO,
            look: Vec3::new(0.0, 0.0, 1.0),
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            sneaking: false,
            flying: false,
            in_water: false,
            collided_horizontally: false,
            alive: true,
            remote: false,
            may_fly: false,
            climbing: false,
            on_fire: false,
            air: MAX_AIR,
            speed: 1.0,
            max_health: PLAYER_MAX_HEALTH,
            effects: Vec::new(),
            projectiles: Vec::new(),
        }
    }

    /// The same player as seen from the presentation side.
    pub fn remote_view(id: EntityId, position: Vec3) -> Self {
        Self {
            remote: true,
            ..Self::new(id, position)
        }
    }

    /// Integrates velocity for one tick.
    pub fn step(&mut self) {
        self.position = self.position + self.velocity;
        self.velocity = Vec3::new(
            self.velocity.x * FRICTION,
            if self.may_fly || self.climbing {
                self.velocity.y * FRICTION
            } else {
                self.velocity.y - 0.08
            },
            self.velocity.z * FRICTION,
        );
        if self.position.y < 0.0 {
            self.position.y = 0.0;
            self.velocity.y = 0.0;
        }
    }

    /// Takes the queued projectile requests.
    pub fn drain_projectiles(&mut self) -> Vec<ProjectileRequest> {
        std::mem::take(&mut self.projectiles)
    }

    /// Takes the queued effects.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }
}

impl MorphHolder for PlayerBody {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn look_direction(&self) -> Vec3 {
        self.look
    }

    fn is_sneaking(&self) -> bool {
        self.sneaking
    }

    fn is_flying(&self) -> bool {
        self.flying
    }

    fn is_in_water(&self) -> bool {
        self.in_water
    }

    fn is_collided_horizontally(&self) -> bool {
        self.collided_horizontally
    }

    fn is_remote(&self) -> bool {
        self.remote
    }

    fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn set_may_fly(&mut self, may_fly: bool) {
        self.may_fly = may_fly;
        if !may_fly {
            self.flying = false;
        }
    }

    fn extinguish(&mut self) {
        self.on_fire = false;
    }

    fn set_air(&mut self, air: i32) {
        self.air = air;
    }

    fn set_climbing(&mut self, climbing: bool) {
        self.climbing = climbing;
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity = self.velocity + impulse;
    }

    fn add_effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    fn set_speed_multiplier(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn set_max_health(&mut self, health: f32) {
        self.max_health = health;
    }

    fn spawn_projectile(&mut self, kind: &str, direction: Vec3) {
        let eyes = self.position + Vec3::new(0.0, self.height * 0.85, 0.0);
        self.projectiles.push(ProjectileRequest {
            kind: kind.to_string(),
            origin: eyes,
            direction,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn step_applies_gravity_unless_flying() {
        let mut body = PlayerBody::new(EntityId::new_v4(), Vec3::new(0.0, 10.0, 0.0));
        body.step();
        body.step();
        assert!(body.position.y < 10.0);

        let mut flyer = PlayerBody::new(EntityId::new_v4(), Vec3::new(0.0, 10.0, 0.0));
        flyer.set_may_fly(true);
        flyer.apply_impulse(Vec3::new(1.0, 0.0, 0.0));
        flyer.step();
        assert_relative_eq!(flyer.position.y, 10.0);
        assert_relative_eq!(flyer.position.x, 1.0);
        assert_relative_eq!(flyer.velocity.x, FRICTION);
    }

    #[test]
    fn projectiles_leave_from_the_eyes() {
        let mut body = PlayerBody::new(EntityId::new_v4(), Vec3::ZERO);
        body.spawn_projectile("fireball", Vec3::new(0.0, 0.0, 1.0));
        let shots = body.drain_projectiles();
        assert_eq!(shots.len(), 1);
        assert_relative_eq!(shots[0].origin.y, 1.8 * 0.85);
        assert!(body.projectiles.is_empty());
    }
}
