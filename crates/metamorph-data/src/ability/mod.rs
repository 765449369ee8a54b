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

//! Passive abilities, active actions and melee attacks that a morph grants.
//!
//! Behaviours are looked up by name through an [`AbilityRegistry`]. Built-in
//! behaviours register themselves at link time with [`inventory::submit!`],
//! so a downstream crate can add its own the same way without touching this
//! one.

mod builtin;

pub use builtin::{
    Climb, FireProof, Fireball, Fly, Leap, PoisonAttack, Swim, WaterBreath, WitherAttack,
};

use crate::holder::MorphHolder;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A passive behaviour, active for as long as the morph is worn.
pub trait Ability: fmt::Debug + Send + Sync {
    /// Called once when the holder assumes a morph with this ability.
    fn on_morph(&self, _holder: &mut dyn MorphHolder) {}
    /// Called once when the holder leaves the morph.
    fn on_demorph(&self, _holder: &mut dyn MorphHolder) {}
    /// Called every tick while the morph is worn.
    fn update(&self, _holder: &mut dyn MorphHolder) {}
}

/// A behaviour triggered on demand by the player.
pub trait Action: fmt::Debug + Send + Sync {
    /// Ticks that must pass before the action can fire again.
    fn cooldown_ticks(&self) -> u32;
    /// Performs the action. Returns `false` if nothing happened, in which
    /// case no cooldown is started.
    fn execute(&self, holder: &mut dyn MorphHolder) -> bool;
}

/// A behaviour applied to the target of a melee hit.
pub trait Attack: fmt::Debug + Send + Sync {
    /// Applies the attack's extra effect to `target`.
    fn attack(&self, target: &mut dyn MorphHolder, attacker: &mut dyn MorphHolder);
}

/// One registered behaviour, of any of the three kinds.
#[derive(Debug, Clone)]
pub enum AbilityEntry {
    /// A passive ability.
    Ability(Arc<dyn Ability>),
    /// An active action.
    Action(Arc<dyn Action>),
    /// A melee attack.
    Attack(Arc<dyn Attack>),
}

/// A link-time registration of a named behaviour.
pub struct AbilityRegistration {
    /// Lookup name used in morph settings.
    pub name: &'static str,
    /// Constructor for the behaviour.
    pub create: fn() -> AbilityEntry,
}

inventory::collect!(AbilityRegistration);

/// Name-indexed table of abilities, actions and attacks.
#[derive(Default)]
pub struct AbilityRegistry {
    abilities: HashMap<String, Arc<dyn Ability>>,
    actions: HashMap<String, Arc<dyn Action>>,
    attacks: HashMap<String, Arc<dyn Attack>>,
}

impl AbilityRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every behaviour submitted with
    /// [`inventory::submit!`] across the linked crates.
    pub fn with_registered() -> Self {
        let mut registry = Self::new();
        for registration in inventory::iter::<AbilityRegistration> {
            registry.insert(registration.name, (registration.create)());
        }
        log::debug!(
            "Ability registry loaded: {} abilities, {} actions, {} attacks",
            registry.abilities.len(),
            registry.actions.len(),
            registry.attacks.len()
        );
        registry
    }

    /// Adds or replaces a behaviour under `name`.
    pub fn insert(&mut self, name: impl Into<String>, entry: AbilityEntry) {
        let name = name.into();
        match entry {
            AbilityEntry::Ability(a) => {
                self.abilities.insert(name, a);
            }
            AbilityEntry::Action(a) => {
                self.actions.insert(name, a);
            }
            AbilityEntry::Attack(a) => {
                self.attacks.insert(name, a);
            }
        }
    }

    /// Looks up a passive ability.
    pub fn ability(&self, name: &str) -> Option<Arc<dyn Ability>> {
        self.abilities.get(name).cloned()
    }

    /// Looks up an action.
    pub fn action(&self, name: &str) -> Option<Arc<dyn Action>> {
        self.actions.get(name).cloned()
    }

    /// Looks up an attack.
    pub fn attack(&self, name: &str) -> Option<Arc<dyn Attack>> {
        self.attacks.get(name).cloned()
    }
}

impl fmt::Debug for AbilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut abilities: Vec<_> = self.abilities.keys().collect();
        let mut actions: Vec<_> = self.actions.keys().collect();
        let mut attacks: Vec<_> = self.attacks.keys().collect();
        abilities.sort();
        actions.sort();
        attacks.sort();
        f.debug_struct("AbilityRegistry")
            .field("abilities", &abilities)
            .field("actions", &actions)
            .field("attacks", &attacks)
            .finish()
    }
}
