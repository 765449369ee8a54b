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

//! The morph value: an identity a player can take on.
//!
//! A [`Morph`] is a name plus a variant-specific payload ([`MorphKind`]). Two
//! morphs are equal when both agree, so a morph can key a map and answer "is
//! this the active one". Behaviour bound from settings (abilities, action,
//! attack) rides along but takes no part in equality.

mod custom;
mod entity;
mod settings;

pub use custom::{CustomMorph, MODEL_KEY, SCALE_KEY, TEXTURE_KEY};
pub use entity::{strip_session_fields, EntityMorph, SESSION_FIELDS};
pub use settings::{MorphSettings, DEFAULT_SPEED};

use crate::ability::{Ability, AbilityRegistry, Action, Attack};
use crate::holder::{MorphHolder, PLAYER_MAX_HEALTH};
use crate::model::{Model, PoseName};
use metamorph_core::TagCompound;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Tag key holding the morph name.
pub const NAME_KEY: &str = "Name";
/// Tag key holding an entity-backed morph's snapshot.
pub const ENTITY_DATA_KEY: &str = "EntityData";
/// Tag key holding a custom morph's model reference and overrides.
pub const CUSTOM_KEY: &str = "Custom";

/// The closed set of morph variants.
#[derive(Debug, Clone)]
pub enum MorphKind {
    /// Wraps a creature snapshot.
    Entity(EntityMorph),
    /// Wraps a skeletal model.
    Custom(CustomMorph),
}

impl MorphKind {
    /// The variant's payload.
    pub fn payload(&self) -> &TagCompound {
        match self {
            MorphKind::Entity(e) => e.data(),
            MorphKind::Custom(c) => c.payload(),
        }
    }

    fn payload_key(&self) -> &'static str {
        match self {
            MorphKind::Entity(_) => ENTITY_DATA_KEY,
            MorphKind::Custom(_) => CUSTOM_KEY,
        }
    }

    fn size_for(&self, pose: PoseName) -> [f32; 2] {
        match self {
            MorphKind::Entity(e) => [e.width(), e.height()],
            MorphKind::Custom(c) => {
                let [w, h] = c.model().size_for(pose);
                let [sx, sy, _] = c.scale();
                [w * sx, h * sy]
            }
        }
    }
}

/// What the presentation side needs to draw a morph.
#[derive(Debug, Clone, Copy)]
pub enum MorphPose<'a> {
    /// Draw the wrapped creature as the host would.
    Creature {
        /// Creature kind.
        type_id: &'a str,
        /// Its attribute snapshot.
        data: &'a TagCompound,
        /// Whether the holder is crouching.
        sneaking: bool,
    },
    /// Pose and draw a skeletal model.
    Skeleton {
        /// The shared model.
        model: &'a Arc<Model>,
        /// Pose chosen from the holder's state.
        pose: PoseName,
        /// Whole-model scale.
        scale: [f32; 3],
        /// Texture, if any.
        texture: Option<&'a str>,
    },
}

#[derive(Clone, Default)]
struct Behaviour {
    abilities: Vec<Arc<dyn Ability>>,
    action: Option<Arc<dyn Action>>,
    attack: Option<Arc<dyn Attack>>,
}

/// One identity a player can take on.
#[derive(Clone)]
pub struct Morph {
    name: String,
    kind: MorphKind,
    settings: MorphSettings,
    behaviour: Behaviour,
}

impl Morph {
    /// Creates a morph with default settings and no behaviour bound.
    pub fn new(name: impl Into<String>, kind: MorphKind) -> Self {
        Self {
            name: name.into(),
            kind,
            settings: MorphSettings::default(),
            behaviour: Behaviour::default(),
        }
    }

    /// Sets the settings a factory considers this morph's defaults.
    pub fn with_settings(mut self, settings: MorphSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Stable name, the resolution key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The variant.
    pub fn kind(&self) -> &MorphKind {
        &self.kind
    }

    /// The variant's payload.
    pub fn payload(&self) -> &TagCompound {
        self.kind.payload()
    }

    /// Effective settings.
    pub fn settings(&self) -> &MorphSettings {
        &self.settings
    }

    /// Overlays `overrides` on the current settings and binds the named
    /// behaviours from `registry`. Unknown names are logged and skipped.
    pub fn bind(&mut self, overrides: Option<&MorphSettings>, registry: &AbilityRegistry) {
        if let Some(overrides) = overrides {
            self.settings = overrides.overlay(&self.settings);
        }

        let mut behaviour = Behaviour::default();
        for name in self.settings.abilities.iter().flatten() {
            match registry.ability(name) {
                Some(ability) => behaviour.abilities.push(ability),
                None => log::warn!("Morph '{}' names unknown ability '{}'", self.name, name),
            }
        }
        if let Some(name) = &self.settings.action {
            behaviour.action = registry.action(name);
            if behaviour.action.is_none() {
                log::warn!("Morph '{}' names unknown action '{}'", self.name, name);
            }
        }
        if let Some(name) = &self.settings.attack {
            behaviour.attack = registry.attack(name);
            if behaviour.attack.is_none() {
                log::warn!("Morph '{}' names unknown attack '{}'", self.name, name);
            }
        }
        self.behaviour = behaviour;
    }

    /// Serializes to the tag form `{"Name": .., "<variant key>": payload}`.
    pub fn to_tag(&self) -> TagCompound {
        let mut tag = TagCompound::new();
        tag.set(NAME_KEY, self.name.clone());
        tag.set_compound(self.kind.payload_key(), self.payload().clone());
        tag
    }

    /// Collision box (width, height) in the given pose, settings first.
    pub fn size_for(&self, pose: PoseName) -> [f32; 2] {
        let [w, h] = self.kind.size_for(pose);
        [
            self.settings.width.unwrap_or(w),
            self.settings.height.unwrap_or(h),
        ]
    }

    /// Collision width for the holder's current pose.
    pub fn width(&self, holder: &dyn MorphHolder) -> f32 {
        self.size_for(pose_of(holder))[0]
    }

    /// Collision height for the holder's current pose.
    pub fn height(&self, holder: &dyn MorphHolder) -> f32 {
        self.size_for(pose_of(holder))[1]
    }

    /// Whether mobs treat this morph as one of their own.
    pub fn is_hostile(&self) -> bool {
        self.settings.hostile.unwrap_or(false)
    }

    /// Whether the morph has an action bound.
    pub fn has_action(&self) -> bool {
        self.behaviour.action.is_some()
    }

    /// Number of passive abilities bound.
    pub fn ability_count(&self) -> usize {
        self.behaviour.abilities.len()
    }

    /// Applies the morph to a holder that just assumed it.
    pub fn on_morph(&self, holder: &mut dyn MorphHolder) {
        let [w, h] = self.size_for(pose_of(holder));
        holder.set_size(w, h);
        holder.set_speed_multiplier(self.settings.speed_or_default());
        holder.set_max_health(self.settings.health.unwrap_or(PLAYER_MAX_HEALTH));
        for ability in &self.behaviour.abilities {
            ability.on_morph(holder);
        }
    }

    /// Undoes [`on_morph`](Self::on_morph) side effects of the abilities.
    /// Restoring the player's own size is the capability's job.
    pub fn on_demorph(&self, holder: &mut dyn MorphHolder) {
        for ability in &self.behaviour.abilities {
            ability.on_demorph(holder);
        }
    }

    /// Per-tick update: keeps the holder's box in sync with the pose and runs
    /// the passive abilities.
    pub fn update(&self, holder: &mut dyn MorphHolder) {
        let [w, h] = self.size_for(pose_of(holder));
        if holder.width() != w || holder.height() != h {
            holder.set_size(w, h);
        }
        for ability in &self.behaviour.abilities {
            ability.update(holder);
        }
    }

    /// Runs the bound action. Returns its cooldown if it fired.
    pub fn action(&self, holder: &mut dyn MorphHolder) -> Option<u32> {
        let action = self.behaviour.action.as_ref()?;
        action.execute(holder).then(|| action.cooldown_ticks())
    }

    /// Applies the bound attack to `target`, if any.
    pub fn attack(&self, target: &mut dyn MorphHolder, attacker: &mut dyn MorphHolder) {
        if let Some(attack) = &self.behaviour.attack {
            attack.attack(target, attacker);
        }
    }

    /// What to draw for this morph on `holder`.
    pub fn pose(&self, holder: &dyn MorphHolder) -> MorphPose<'_> {
        match &self.kind {
            MorphKind::Entity(e) => MorphPose::Creature {
                type_id: &self.name,
                data: e.data(),
                sneaking: holder.is_sneaking(),
            },
            MorphKind::Custom(c) => MorphPose::Skeleton {
                model: c.model(),
                pose: pose_of(holder),
                scale: c.scale(),
                texture: c.texture(),
            },
        }
    }
}

/// Reads the morph name from a tag record.
pub fn name_of(tag: &TagCompound) -> Option<&str> {
    tag.get_string(NAME_KEY)
}

fn pose_of(holder: &dyn MorphHolder) -> PoseName {
    PoseName::select(holder.is_sneaking(), holder.is_flying())
}

impl PartialEq for Morph {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind.payload_key() == other.kind.payload_key()
            && self.payload() == other.payload()
    }
}

impl Eq for Morph {}

impl Hash for Morph {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.kind.payload_key().hash(state);
        self.payload().hash(state);
    }
}

impl fmt::Debug for Morph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Morph")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("settings", &self.settings)
            .finish()
    }
}

impl fmt::Display for Morph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn pig(data: &str) -> Morph {
        let data = TagCompound::from_json_str(data).unwrap();
        Morph::new("minecraft:pig", MorphKind::Entity(EntityMorph::new(data, 0.9, 0.9)))
    }

    #[test]
    fn equality_is_name_and_payload() {
        assert_eq!(pig("{}"), pig(r#"{"Pos":[1,2,3]}"#));
        assert_ne!(pig("{}"), pig(r#"{"Saddle":true}"#));

        let mut set = HashSet::new();
        set.insert(pig("{}"));
        assert!(set.contains(&pig(r#"{"Motion":[0,1,0]}"#)));
        assert!(!set.contains(&pig(r#"{"Saddle":true}"#)));
    }

    #[test]
    fn settings_do_not_affect_equality() {
        let plain = pig("{}");
        let tuned = pig("{}").with_settings(MorphSettings {
            speed: Some(2.0),
            ..Default::default()
        });
        assert_eq!(plain, tuned);
    }

    #[test]
    fn tag_form_nests_payload_under_variant_key() {
        let tag = pig(r#"{"Saddle":true}"#).to_tag();
        assert_eq!(name_of(&tag), Some("minecraft:pig"));
        let data = tag.get_compound(ENTITY_DATA_KEY).unwrap();
        assert_eq!(data.get_bool("Saddle"), Some(true));
    }

    #[test]
    fn bind_resolves_names_and_skips_unknown() {
        let registry = AbilityRegistry::with_registered();
        let mut morph = pig("{}").with_settings(MorphSettings {
            abilities: Some(vec!["fly".into(), "teleport".into()]),
            action: Some("leap".into()),
            ..Default::default()
        });
        morph.bind(None, &registry);
        assert_eq!(morph.ability_count(), 1);
        assert!(morph.has_action());

        let overrides = MorphSettings {
            abilities: Some(vec![]),
            width: Some(2.0),
            ..Default::default()
        };
        morph.bind(Some(&overrides), &registry);
        assert_eq!(morph.ability_count(), 0);
        assert!(morph.has_action());
        assert_eq!(morph.size_for(PoseName::Standing), [2.0, 0.9]);
    }
}
