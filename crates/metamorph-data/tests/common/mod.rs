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

#![allow(dead_code)]

use metamorph_core::math::Vec3;
use metamorph_core::{EntityId, TagCompound};
use metamorph_data::morph::{EntityMorph, ENTITY_DATA_KEY};
use metamorph_data::registry::Registration;
use metamorph_data::{Effect, MorphError, MorphFactory, MorphHolder, MorphKind, MorphList, MorphSettings};
use metamorph_data::Morph;

/// A factory claiming a fixed set of names, tagging what it builds with its
/// own id so tests can tell factories apart.
pub struct TestFactory {
    pub id: &'static str,
    pub names: Vec<&'static str>,
    pub settings: Vec<(&'static str, MorphSettings)>,
    pub broken: bool,
}

impl TestFactory {
    pub fn new(id: &'static str, names: &[&'static str]) -> Self {
        Self {
            id,
            names: names.to_vec(),
            settings: Vec::new(),
            broken: false,
        }
    }

    pub fn broken(id: &'static str, names: &[&'static str]) -> Self {
        Self {
            broken: true,
            ..Self::new(id, names)
        }
    }
}

impl MorphFactory for TestFactory {
    fn id(&self) -> &str {
        self.id
    }

    fn register(&self, registration: &mut Registration<'_>) {
        for (name, settings) in &self.settings {
            registration
                .settings
                .insert(name.to_string(), settings.clone());
        }
    }

    fn has_morph(&self, name: &str) -> bool {
        self.names.contains(&name)
    }

    fn build(&self, tag: &TagCompound) -> Result<Morph, MorphError> {
        let name = tag.get_string("Name").ok_or(MorphError::MissingName)?;
        if self.broken {
            return Err(MorphError::MalformedPayload {
                name: name.to_string(),
                reason: format!("factory '{}' is broken", self.id),
            });
        }
        let data = match tag.get(ENTITY_DATA_KEY) {
            None => TagCompound::new(),
            Some(value) => TagCompound::from_value(value.clone()).ok_or_else(|| {
                MorphError::MalformedPayload {
                    name: name.to_string(),
                    reason: "entity data is not a compound".into(),
                }
            })?,
        };
        Ok(Morph::new(name, MorphKind::Entity(EntityMorph::new(data, 0.9, 0.9))))
    }

    fn collect_morphs(&self, list: &mut MorphList) {
        for name in &self.names {
            let mut data = TagCompound::new();
            data.set("Factory", self.id);
            list.add_morph(Morph::new(
                *name,
                MorphKind::Entity(EntityMorph::new(data, 0.9, 0.9)),
            ));
        }
    }
}

pub fn tag(text: &str) -> TagCompound {
    TagCompound::from_json_str(text).unwrap()
}

/// A holder that records what morphs did to it.
#[derive(Debug)]
pub struct TestHolder {
    pub id: EntityId,
    pub position: Vec3,
    pub size: (f32, f32),
    pub sneaking: bool,
    pub flying: bool,
    pub may_fly: bool,
    pub speed: f32,
    pub max_health: f32,
    pub impulses: Vec<Vec3>,
    pub effects: Vec<Effect>,
    pub projectiles: Vec<String>,
}

impl TestHolder {
    pub fn new() -> Self {
        Self {
            id: EntityId::new_v4(),
            position: Vec3::ZERO,
            size: (0.6, 1.8),
            sneaking: false,
            flying: false,
            may_fly: false,
            speed: 1.0,
            max_health: 20.0,
            impulses: Vec::new(),
            effects: Vec::new(),
            projectiles: Vec::new(),
        }
    }
}

impl MorphHolder for TestHolder {
    fn id(&self) -> EntityId {
        self.id
    }
    fn position(&self) -> Vec3 {
        self.position
    }
    fn width(&self) -> f32 {
        self.size.0
    }
    fn height(&self) -> f32 {
        self.size.1
    }
    fn is_alive(&self) -> bool {
        true
    }
    fn look_direction(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, 1.0)
    }
    fn is_sneaking(&self) -> bool {
        self.sneaking
    }
    fn is_flying(&self) -> bool {
        self.flying
    }
    fn is_in_water(&self) -> bool {
        false
    }
    fn is_collided_horizontally(&self) -> bool {
        false
    }
    fn set_size(&mut self, width: f32, height: f32) {
        self.size = (width, height);
    }
    fn set_may_fly(&mut self, may_fly: bool) {
        self.may_fly = may_fly;
    }
    fn extinguish(&mut self) {}
    fn set_air(&mut self, _air: i32) {}
    fn set_climbing(&mut self, _climbing: bool) {}
    fn apply_impulse(&mut self, impulse: Vec3) {
        self.impulses.push(impulse);
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
    fn spawn_projectile(&mut self, kind: &str, _direction: Vec3) {
        self.projectiles.push(kind.to_string());
    }
}
