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

use metamorph_core::math::Vec3;
use metamorph_core::{EntityId, TagCompound};
use metamorph_data::morph::EntityMorph;
use metamorph_data::{CarrierState, Morph, MorphCarrier, MorphKind, Morphing};
use metamorph_lanes::{tick_carrier, tick_carriers, CarrierRules, CarrierTick, CarrierWorld, OwnerView};
use std::collections::HashMap;

struct Player {
    position: Vec3,
    morphing: Morphing,
    online: bool,
}

#[derive(Default)]
struct World {
    players: HashMap<EntityId, Player>,
    deliveries: Vec<(EntityId, String)>,
}

impl World {
    fn join(&mut self, position: Vec3) -> EntityId {
        let id = EntityId::new_v4();
        self.players.insert(
            id,
            Player {
                position,
                morphing: Morphing::new(),
                online: true,
            },
        );
        id
    }
}

impl CarrierWorld for World {
    fn locate_owner(&self, owner: EntityId) -> Option<OwnerView> {
        self.players
            .get(&owner)
            .filter(|p| p.online)
            .map(|p| OwnerView {
                position: p.position,
                width: 0.6,
            })
    }

    fn deliver(&mut self, owner: EntityId, morph: &Morph) -> bool {
        self.deliveries.push((owner, morph.name().to_string()));
        self.players
            .get_mut(&owner)
            .is_some_and(|p| p.morphing.acquire_morph(morph.clone()))
    }
}

fn morph(name: &str) -> Morph {
    Morph::new(name, MorphKind::Entity(EntityMorph::new(TagCompound::new(), 0.9, 0.9)))
}

fn carrier(owner: EntityId, name: &str, position: Vec3) -> MorphCarrier {
    MorphCarrier::new(EntityId::new_v4(), owner, morph(name), position, 30, [1.5, 2.0])
}

#[test]
fn waits_out_the_grace_period() {
    let mut world = World::default();
    let owner = world.join(Vec3::ZERO);
    let mut c = carrier(owner, "minecraft:pig", Vec3::ZERO);
    let rules = CarrierRules::default();

    for _ in 0..30 {
        assert_eq!(tick_carrier(&mut c, &mut world, &rules), CarrierTick::Cooling);
    }
    assert!(world.deliveries.is_empty());
    assert_eq!(
        tick_carrier(&mut c, &mut world, &rules),
        CarrierTick::Delivered { acquired: true }
    );
}

#[test]
fn delivers_exactly_once() {
    let mut world = World::default();
    let owner = world.join(Vec3::new(3.0, 0.0, 0.0));
    let mut c = carrier(owner, "minecraft:pig", Vec3::ZERO);
    let rules = CarrierRules::default();

    for _ in 0..500 {
        tick_carrier(&mut c, &mut world, &rules);
    }
    assert_eq!(c.state(), CarrierState::Delivered);
    assert_eq!(world.deliveries.len(), 1);
    assert_eq!(tick_carrier(&mut c, &mut world, &rules), CarrierTick::Finished);
    assert_eq!(world.deliveries.len(), 1);
}

#[test]
fn waits_for_an_offline_owner_indefinitely() {
    let mut world = World::default();
    let owner = world.join(Vec3::ZERO);
    world.players.get_mut(&owner).unwrap().online = false;
    let mut c = carrier(owner, "minecraft:pig", Vec3::ZERO);
    let rules = CarrierRules::default();

    for _ in 0..30 {
        tick_carrier(&mut c, &mut world, &rules);
    }
    for _ in 0..1_000 {
        assert_eq!(tick_carrier(&mut c, &mut world, &rules), CarrierTick::OwnerAbsent);
    }
    assert!(!c.can_despawn());

    // rejoining under the same identity is enough
    world.players.get_mut(&owner).unwrap().online = true;
    assert_eq!(
        tick_carrier(&mut c, &mut world, &rules),
        CarrierTick::Delivered { acquired: true }
    );
}

#[test]
fn already_owned_morph_is_consumed_silently() {
    let mut world = World::default();
    let owner = world.join(Vec3::ZERO);
    world
        .players
        .get_mut(&owner)
        .unwrap()
        .morphing
        .acquire_morph(morph("minecraft:pig"));

    let mut carriers = vec![carrier(owner, "minecraft:pig", Vec3::ZERO)];
    let rules = CarrierRules::default();
    let mut deliveries = Vec::new();
    for _ in 0..31 {
        deliveries.extend(tick_carriers(&mut carriers, &mut world, &rules));
    }
    assert!(carriers.is_empty());
    assert_eq!(deliveries.len(), 1);
    assert!(!deliveries[0].acquired);
}

#[test]
fn two_carriers_never_cross_deliver() {
    let mut world = World::default();
    let alice = world.join(Vec3::new(0.0, 0.0, 0.0));
    let bob = world.join(Vec3::new(0.5, 0.0, 0.0));
    let mut carriers = vec![
        carrier(alice, "minecraft:pig", Vec3::new(0.25, 0.0, 0.0)),
        carrier(bob, "minecraft:cow", Vec3::new(0.25, 0.0, 0.0)),
    ];
    let rules = CarrierRules::default();
    for _ in 0..40 {
        tick_carriers(&mut carriers, &mut world, &rules);
    }
    assert!(carriers.is_empty());

    let names = |id: EntityId| -> Vec<String> {
        world.players[&id]
            .morphing
            .acquired_morphs()
            .iter()
            .map(|m| m.name().to_string())
            .collect()
    };
    assert_eq!(names(alice), vec!["minecraft:pig".to_string()]);
    assert_eq!(names(bob), vec!["minecraft:cow".to_string()]);
}

#[test]
fn drifts_toward_a_nearby_owner_only() {
    let mut world = World::default();
    let near = world.join(Vec3::new(5.0, 0.0, 0.0));
    let far = world.join(Vec3::new(50.0, 0.0, 0.0));
    let rules = CarrierRules::default();

    let mut homing = carrier(near, "minecraft:pig", Vec3::ZERO);
    let mut idle = carrier(far, "minecraft:pig", Vec3::ZERO);
    for _ in 0..31 {
        tick_carrier(&mut homing, &mut world, &rules);
        tick_carrier(&mut idle, &mut world, &rules);
    }
    assert!(homing.position().x > 0.0);
    assert_eq!(idle.position(), Vec3::ZERO);
}
