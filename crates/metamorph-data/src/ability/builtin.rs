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

use super::{Ability, AbilityEntry, AbilityRegistration, Action, Attack};
use crate::holder::{Effect, MorphHolder, MAX_AIR};
use metamorph_core::math::Vec3;
use std::sync::Arc;

/// Free flight while morphed.
#[derive(Debug, Default, Clone, Copy)]
pub struct Fly;

impl Ability for Fly {
    fn on_morph(&self, holder: &mut dyn MorphHolder) {
        holder.set_may_fly(true);
    }

    fn on_demorph(&self, holder: &mut dyn MorphHolder) {
        holder.set_may_fly(false);
    }
}

/// Immunity to burning.
#[derive(Debug, Default, Clone, Copy)]
pub struct FireProof;

impl Ability for FireProof {
    fn update(&self, holder: &mut dyn MorphHolder) {
        holder.extinguish();
    }
}

/// Never runs out of air underwater.
#[derive(Debug, Default, Clone, Copy)]
pub struct WaterBreath;

impl Ability for WaterBreath {
    fn update(&self, holder: &mut dyn MorphHolder) {
        if holder.is_in_water() {
            holder.set_air(MAX_AIR);
        }
    }
}

/// Climbs walls like a spider.
#[derive(Debug, Default, Clone, Copy)]
pub struct Climb;

impl Climb {
    /// Upward speed while pressed against a wall.
    pub const LIFT: f32 = 0.2;
}

impl Ability for Climb {
    fn on_demorph(&self, holder: &mut dyn MorphHolder) {
        holder.set_climbing(false);
    }

    fn update(&self, holder: &mut dyn MorphHolder) {
        let against_wall = holder.is_collided_horizontally();
        holder.set_climbing(against_wall);
        if against_wall {
            holder.apply_impulse(Vec3::new(0.0, Self::LIFT, 0.0));
        }
    }
}

/// Faster movement in water.
#[derive(Debug, Default, Clone, Copy)]
pub struct Swim;

impl Swim {
    /// Extra forward push per tick while submerged.
    pub const PUSH: f32 = 0.05;
}

impl Ability for Swim {
    fn update(&self, holder: &mut dyn MorphHolder) {
        if holder.is_in_water() {
            let push = holder.look_direction() * Self::PUSH;
            holder.apply_impulse(push);
        }
    }
}

/// Jumps forward along the look direction.
#[derive(Debug, Default, Clone, Copy)]
pub struct Leap;

impl Action for Leap {
    fn cooldown_ticks(&self) -> u32 {
        20
    }

    fn execute(&self, holder: &mut dyn MorphHolder) -> bool {
        let look = holder.look_direction();
        holder.apply_impulse(Vec3::new(look.x, 0.4, look.z));
        true
    }
}

/// Shoots a fireball where the holder is looking.
#[derive(Debug, Default, Clone, Copy)]
pub struct Fireball;

impl Action for Fireball {
    fn cooldown_ticks(&self) -> u32 {
        40
    }

    fn execute(&self, holder: &mut dyn MorphHolder) -> bool {
        if holder.is_remote() {
            return false;
        }
        let look = holder.look_direction();
        holder.spawn_projectile("fireball", look);
        true
    }
}

/// Withers the target.
#[derive(Debug, Default, Clone, Copy)]
pub struct WitherAttack;

impl Attack for WitherAttack {
    fn attack(&self, target: &mut dyn MorphHolder, _attacker: &mut dyn MorphHolder) {
        target.add_effect(Effect::new("wither", 200));
    }
}

/// Poisons the target.
#[derive(Debug, Default, Clone, Copy)]
pub struct PoisonAttack;

impl Attack for PoisonAttack {
    fn attack(&self, target: &mut dyn MorphHolder, _attacker: &mut dyn MorphHolder) {
        target.add_effect(Effect::new("poison", 140));
    }
}

macro_rules! register {
    ($name:literal, $kind:ident, $ty:ident) => {
        inventory::submit! {
            AbilityRegistration {
                name: $name,
                create: {
                    fn create() -> AbilityEntry {
                        AbilityEntry::$kind(Arc::new($ty))
                    }
                    create
                },
            }
        }
    };
}

register!("fly", Ability, Fly);
register!("fire_proof", Ability, FireProof);
register!("water_breath", Ability, WaterBreath);
register!("climb", Ability, Climb);
register!("swim", Ability, Swim);
register!("leap", Action, Leap);
register!("fireball", Action, Fireball);
register!("wither", Attack, WitherAttack);
register!("poison", Attack, PoisonAttack);
