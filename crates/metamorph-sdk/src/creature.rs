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

//! The host's creature catalog as the entity factory sees it.

use metamorph_core::TagCompound;
use metamorph_data::MorphSettings;
use std::collections::BTreeMap;

/// Type id of the pickup carrier itself. Never morphable.
pub const CARRIER_TYPE_ID: &str = "metamorph.Morph";

/// One creature kind.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatureKind {
    /// Type id, also the morph name.
    pub type_id: String,
    /// Adult collision width.
    pub width: f32,
    /// Adult collision height.
    pub height: f32,
    /// Whether the kind is a living creature. Only living kinds are morphs.
    pub living: bool,
    /// Default tuning for morphs of this kind.
    pub settings: MorphSettings,
}

impl CreatureKind {
    /// A living kind with no default behaviour.
    pub fn living(type_id: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            type_id: type_id.into(),
            width,
            height,
            living: true,
            settings: MorphSettings::default(),
        }
    }

    /// A non-living kind.
    pub fn object(type_id: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            living: false,
            ..Self::living(type_id, width, height)
        }
    }

    /// Adds passive abilities.
    pub fn with_abilities(mut self, abilities: &[&str]) -> Self {
        self.settings.abilities = Some(abilities.iter().map(|a| a.to_string()).collect());
        self
    }

    /// Sets the active action.
    pub fn with_action(mut self, action: &str) -> Self {
        self.settings.action = Some(action.to_string());
        self
    }

    /// Sets the melee attack.
    pub fn with_attack(mut self, attack: &str) -> Self {
        self.settings.attack = Some(attack.to_string());
        self
    }

    /// Marks the kind hostile.
    pub fn hostile(mut self) -> Self {
        self.settings.hostile = Some(true);
        self
    }

    /// Sets the movement speed multiplier.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.settings.speed = Some(speed);
        self
    }

    /// Sets the maximum health.
    pub fn with_health(mut self, health: f32) -> Self {
        self.settings.health = Some(health);
        self
    }
}

/// Creature kinds by type id, plus catalog variants.
///
/// A variant is a `(type id, json)` pair: the JSON object is merged into the
/// default snapshot to produce an extra catalog entry, e.g. a charged creeper.
#[derive(Debug, Clone, Default)]
pub struct CreatureTable {
    kinds: BTreeMap<String, CreatureKind>,
    variants: Vec<(String, String)>,
}

impl CreatureTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock creatures.
    pub fn vanilla() -> Self {
        let mut table = Self::new();
        let kinds = [
            CreatureKind::living("Pig", 0.9, 0.9).with_health(10.0),
            CreatureKind::living("Cow", 0.9, 1.4).with_health(10.0),
            CreatureKind::living("Sheep", 0.9, 1.3).with_health(8.0),
            CreatureKind::living("Chicken", 0.4, 0.7).with_health(4.0),
            CreatureKind::living("Wolf", 0.6, 0.85).with_speed(1.2),
            CreatureKind::living("Villager", 0.6, 1.95),
            CreatureKind::living("Bat", 0.5, 0.9)
                .with_abilities(&["fly"])
                .with_health(6.0),
            CreatureKind::living("Squid", 0.8, 0.8)
                .with_abilities(&["swim", "water_breath"])
                .with_health(10.0),
            CreatureKind::living("Guardian", 0.85, 0.85)
                .with_abilities(&["swim", "water_breath"])
                .hostile()
                .with_health(30.0),
            CreatureKind::living("Zombie", 0.6, 1.95).hostile(),
            CreatureKind::living("Skeleton", 0.6, 1.99).hostile(),
            CreatureKind::living("WitherSkeleton", 0.7, 2.4)
                .with_abilities(&["fire_proof"])
                .with_attack("wither")
                .hostile(),
            CreatureKind::living("Creeper", 0.6, 1.7).hostile(),
            CreatureKind::living("Spider", 1.4, 0.9)
                .with_abilities(&["climb"])
                .hostile()
                .with_health(16.0),
            CreatureKind::living("CaveSpider", 0.7, 0.5)
                .with_abilities(&["climb"])
                .with_attack("poison")
                .hostile()
                .with_health(12.0),
            CreatureKind::living("Enderman", 0.6, 2.9)
                .hostile()
                .with_health(40.0),
            CreatureKind::living("Blaze", 0.6, 1.8)
                .with_abilities(&["fly", "fire_proof"])
                .with_action("fireball")
                .hostile(),
            CreatureKind::living("Ghast", 4.0, 4.0)
                .with_abilities(&["fly", "fire_proof"])
                .with_action("fireball")
                .hostile()
                .with_health(10.0),
            CreatureKind::living("Slime", 0.51, 0.51).hostile(),
            CreatureKind::living("LavaSlime", 0.51, 0.51)
                .with_abilities(&["fire_proof"])
                .with_action("leap")
                .hostile(),
            CreatureKind::living("VillagerGolem", 1.4, 2.7)
                .with_speed(0.8)
                .with_health(100.0),
            CreatureKind::living("Witch", 0.6, 1.95)
                .with_attack("poison")
                .hostile()
                .with_health(26.0),
            CreatureKind::living("Rabbit", 0.4, 0.5)
                .with_action("leap")
                .with_health(3.0),
            CreatureKind::object("ArmorStand", 0.5, 1.975),
            CreatureKind::object("Boat", 1.375, 0.5625),
        ];
        for kind in kinds {
            table.insert(kind);
        }
        table.add_variant("Creeper", r#"{"powered": true}"#);
        table.add_variant("Skeleton", r#"{"SkeletonType": 1}"#);
        table.add_variant("Sheep", r#"{"Color": 15}"#);
        table.add_variant("Slime", r#"{"Size": 1}"#);
        table.add_variant("Slime", r#"{"Size": 3}"#);
        table
    }

    /// Adds or replaces a kind.
    pub fn insert(&mut self, kind: CreatureKind) {
        self.kinds.insert(kind.type_id.clone(), kind);
    }

    /// Looks up a kind.
    pub fn get(&self, type_id: &str) -> Option<&CreatureKind> {
        self.kinds.get(type_id)
    }

    /// Whether `type_id` names a living kind other than the carrier.
    pub fn is_morphable(&self, type_id: &str) -> bool {
        type_id != CARRIER_TYPE_ID && self.get(type_id).is_some_and(|k| k.living)
    }

    /// Kinds in type id order.
    pub fn kinds(&self) -> impl Iterator<Item = &CreatureKind> {
        self.kinds.values()
    }

    /// Collision box of a particular creature instance.
    ///
    /// Babies (`Age < 0` or `IsBaby`) are half size; sized creatures scale
    /// by `Size + 1`.
    pub fn dimensions(&self, type_id: &str, data: &TagCompound) -> Option<(f32, f32)> {
        let kind = self.get(type_id)?;
        let mut factor = 1.0;
        let baby = data.get_i64("Age").is_some_and(|age| age < 0)
            || data.get_bool("IsBaby").unwrap_or(false);
        if baby {
            factor *= 0.5;
        }
        if let Some(size) = data.get_i64("Size") {
            factor *= (size.max(0) + 1) as f32;
        }
        Some((kind.width * factor, kind.height * factor))
    }

    /// Declares an extra catalog entry for `type_id`.
    pub fn add_variant(&mut self, type_id: impl Into<String>, json: impl Into<String>) {
        self.variants.push((type_id.into(), json.into()));
    }

    /// Declared variants in insertion order.
    pub fn variants(&self) -> &[(String, String)] {
        &self.variants
    }

    /// Number of kinds.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether the table holds no kinds.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
