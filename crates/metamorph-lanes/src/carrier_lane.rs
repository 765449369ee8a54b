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

//! Moves pickup carriers toward their owners and hands the morph over on
//! contact.

use metamorph_core::math::Vec3;
use metamorph_core::EntityId;
use metamorph_data::{CarrierState, Morph, MorphCarrier};

/// What a carrier needs to know about its live owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OwnerView {
    /// Feet position.
    pub position: Vec3,
    /// Collision width.
    pub width: f32,
}

/// The world as seen by the carrier lane.
pub trait CarrierWorld {
    /// Looks the owner up by identity. `None` while the player is offline or
    /// dead.
    fn locate_owner(&self, owner: EntityId) -> Option<OwnerView>;

    /// Gives `morph` to `owner`. Returns whether it was newly acquired.
    fn deliver(&mut self, owner: EntityId, morph: &Morph) -> bool;
}

/// Tuning for the carrier lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarrierRules {
    /// Multiplier on both half-widths when testing contact.
    pub reach_factor: f32,
    /// Distance inside which the carrier drifts toward its owner.
    pub homing_range: f32,
    /// Blocks moved per tick while drifting.
    pub homing_speed: f32,
}

impl Default for CarrierRules {
    fn default() -> Self {
        Self {
            reach_factor: 1.4,
            homing_range: 8.0,
            homing_speed: 0.1,
        }
    }
}

/// Outcome of one carrier tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierTick {
    /// Still in its grace period.
    Cooling,
    /// The owner could not be found this tick.
    OwnerAbsent,
    /// Owner found but out of reach.
    Seeking,
    /// Handed over this tick.
    Delivered {
        /// Whether the owner did not have the morph yet.
        acquired: bool,
    },
    /// Already delivered earlier; nothing happened.
    Finished,
}

/// A completed hand-over.
#[derive(Debug, Clone)]
pub struct Delivery {
    /// The carrier that was consumed.
    pub carrier: EntityId,
    /// Who received it.
    pub owner: EntityId,
    /// What was delivered.
    pub morph: Morph,
    /// Whether the owner did not have the morph yet.
    pub acquired: bool,
}

/// Advances one carrier by a tick.
///
/// A delivered carrier never calls into the world again, so delivery happens
/// exactly once even if the carrier is ticked after it.
pub fn tick_carrier(
    carrier: &mut MorphCarrier,
    world: &mut dyn CarrierWorld,
    rules: &CarrierRules,
) -> CarrierTick {
    match carrier.state() {
        CarrierState::Delivered => return CarrierTick::Finished,
        CarrierState::Cooldown => {
            carrier.tick_timer();
            return CarrierTick::Cooling;
        }
        CarrierState::Seeking => {}
    }

    let Some(owner) = world.locate_owner(carrier.owner()) else {
        return CarrierTick::OwnerAbsent;
    };

    let offset = owner.position - carrier.position();
    let distance = offset.length();
    if distance < carrier.reach(owner.width, rules.reach_factor) {
        if !carrier.mark_delivered() {
            return CarrierTick::Finished;
        }
        let acquired = world.deliver(carrier.owner(), carrier.morph());
        log::debug!(
            "Carrier {} delivered '{}' to {} (new: {})",
            carrier.id(),
            carrier.morph().name(),
            carrier.owner(),
            acquired
        );
        return CarrierTick::Delivered { acquired };
    }

    if distance > 0.0 && distance < rules.homing_range && rules.homing_speed > 0.0 {
        let step = rules.homing_speed.min(distance);
        carrier.set_position(carrier.position() + offset.normalize() * step);
    }
    CarrierTick::Seeking
}

/// Advances every carrier and removes the ones that were delivered.
pub fn tick_carriers(
    carriers: &mut Vec<MorphCarrier>,
    world: &mut dyn CarrierWorld,
    rules: &CarrierRules,
) -> Vec<Delivery> {
    let mut deliveries = Vec::new();
    carriers.retain_mut(|carrier| match tick_carrier(carrier, world, rules) {
        CarrierTick::Delivered { acquired } => {
            deliveries.push(Delivery {
                carrier: carrier.id(),
                owner: carrier.owner(),
                morph: carrier.morph().clone(),
                acquired,
            });
            false
        }
        CarrierTick::Finished => false,
        _ => true,
    });
    deliveries
}
