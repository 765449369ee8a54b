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

use super::display::display_name;
use super::factory::{MorphFactory, Presentation, Registration};
use super::list::MorphList;
use crate::ability::AbilityRegistry;
use crate::error::MorphError;
use crate::morph::{name_of, Morph, MorphSettings};
use metamorph_core::TagCompound;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<Arc<MorphManager>> = OnceLock::new();

/// The process-wide morph registry.
///
/// Populated during startup: factories are added, then the universal phase
/// ([`register`](Self::register)) and, where something is drawn, the
/// presentation phase ([`register_presentation`](Self::register_presentation))
/// run once each. After that the manager is shared read-only, typically via
/// [`install`](Self::install).
pub struct MorphManager {
    factories: Vec<Arc<dyn MorphFactory>>,
    settings: HashMap<String, MorphSettings>,
    abilities: AbilityRegistry,
    presentation: Option<Presentation>,
    registered: bool,
}

impl MorphManager {
    /// A manager with no factories and every linked-in behaviour available.
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
            settings: HashMap::new(),
            abilities: AbilityRegistry::with_registered(),
            presentation: None,
            registered: false,
        }
    }

    /// Appends a factory. Later factories take precedence.
    ///
    /// A factory added after a phase already ran is put through that phase
    /// immediately.
    pub fn add_factory(&mut self, factory: Arc<dyn MorphFactory>) {
        log::info!(
            "MorphManager: Added factory '{}' (position {})",
            factory.id(),
            self.factories.len()
        );
        if self.registered {
            self.register_one(factory.as_ref());
        }
        if let Some(presentation) = &mut self.presentation {
            factory.register_presentation(presentation);
        }
        self.factories.push(factory);
    }

    /// Runs the universal registration phase. Idempotent.
    ///
    /// Factories run in the order they were added, so settings written by a
    /// later factory replace an earlier one's for the same name, the same
    /// precedence resolution uses.
    pub fn register(&mut self) {
        if self.registered {
            return;
        }
        let factories = self.factories.clone();
        for factory in &factories {
            self.register_one(factory.as_ref());
        }
        self.registered = true;
        log::info!(
            "MorphManager: Registered {} factories, {} settings entries",
            self.factories.len(),
            self.settings.len()
        );
    }

    /// Runs the presentation registration phase. Idempotent.
    pub fn register_presentation(&mut self) {
        if self.presentation.is_some() {
            return;
        }
        let mut presentation = Presentation::default();
        for factory in &self.factories {
            factory.register_presentation(&mut presentation);
        }
        log::info!(
            "MorphManager: Presentation ready, {} models, {} labels",
            presentation.models().len(),
            presentation.localization.len()
        );
        self.presentation = Some(presentation);
    }

    fn register_one(&mut self, factory: &dyn MorphFactory) {
        let mut registration = Registration {
            settings: &mut self.settings,
            abilities: &mut self.abilities,
        };
        factory.register(&mut registration);
    }

    /// Whether any factory claims `name`.
    pub fn has(&self, name: &str) -> bool {
        self.factories.iter().rev().any(|f| f.has_morph(name))
    }

    /// Resolves a tag record into a morph, with settings applied.
    ///
    /// Claiming factories are tried most recent first and the first
    /// successful build wins. Failures are logged and yield `None`.
    pub fn resolve(&self, tag: &TagCompound) -> Option<Morph> {
        match self.try_resolve(tag) {
            Ok(morph) => Some(morph),
            Err(e) => {
                log::warn!("Could not resolve morph: {}", e);
                None
            }
        }
    }

    /// Like [`resolve`](Self::resolve), but reports why it failed.
    pub fn try_resolve(&self, tag: &TagCompound) -> Result<Morph, MorphError> {
        let name = name_of(tag).ok_or(MorphError::MissingName)?;
        let mut failure = None;
        for factory in self.factories.iter().rev() {
            if !factory.has_morph(name) {
                continue;
            }
            match factory.build(tag) {
                Ok(mut morph) => {
                    morph.bind(self.settings.get(name), &self.abilities);
                    log::trace!("Resolved '{}' with factory '{}'", name, factory.id());
                    return Ok(morph);
                }
                Err(e) => {
                    log::debug!("Factory '{}' failed on '{}': {}", factory.id(), name, e);
                    failure = Some(e);
                }
            }
        }
        Err(failure.unwrap_or_else(|| MorphError::UnknownMorph(name.to_string())))
    }

    /// Builds the catalog. Factories contribute most recent first, so a name
    /// is owned by the same factory that would resolve it.
    pub fn morphs(&self) -> MorphList {
        let mut list = MorphList::new();
        for (position, factory) in self.factories.iter().enumerate().rev() {
            list.begin_contribution(position, factory.id());
            factory.collect_morphs(&mut list);
        }
        list.for_each_mut(|morph| {
            let overrides = self.settings.get(morph.name());
            morph.bind(overrides, &self.abilities);
        });
        list
    }

    /// Human-readable label for a morph name.
    pub fn display_name(&self, name: &str) -> String {
        display_name(
            name,
            self.presentation.as_ref().map(|p| &p.localization),
        )
    }

    /// Settings override registered for `name`.
    pub fn settings(&self, name: &str) -> Option<&MorphSettings> {
        self.settings.get(name)
    }

    /// Adds or replaces a settings override.
    pub fn set_settings(&mut self, name: impl Into<String>, settings: MorphSettings) {
        self.settings.insert(name.into(), settings);
    }

    /// Merges a JSON settings table into the overrides. Entries in the table
    /// replace existing ones.
    pub fn load_settings_json(&mut self, text: &str) -> Result<usize, serde_json::Error> {
        let table = MorphSettings::table_from_json(text)?;
        let count = table.len();
        self.settings.extend(table);
        Ok(count)
    }

    /// Named behaviours.
    pub fn abilities(&self) -> &AbilityRegistry {
        &self.abilities
    }

    /// Named behaviours, for registration-time overrides.
    pub fn abilities_mut(&mut self) -> &mut AbilityRegistry {
        &mut self.abilities
    }

    /// Presentation state, if that phase ran.
    pub fn presentation(&self) -> Option<&Presentation> {
        self.presentation.as_ref()
    }

    /// Registered factories, in registration order.
    pub fn factories(&self) -> impl Iterator<Item = &Arc<dyn MorphFactory>> {
        self.factories.iter()
    }

    /// Number of factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether no factory was added.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Publishes this manager as the process-wide instance. If one was
    /// already installed, that one is kept and returned.
    pub fn install(self) -> Arc<MorphManager> {
        let manager = Arc::new(self);
        if GLOBAL.set(manager.clone()).is_err() {
            log::warn!("MorphManager already installed; keeping the first instance");
        }
        GLOBAL.get().cloned().unwrap_or(manager)
    }

    /// The process-wide instance, once installed.
    pub fn global() -> Option<Arc<MorphManager>> {
        GLOBAL.get().cloned()
    }
}

impl Default for MorphManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MorphManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<_> = self.factories.iter().map(|f| f.id().to_string()).collect();
        f.debug_struct("MorphManager")
            .field("factories", &ids)
            .field("settings", &self.settings.len())
            .field("registered", &self.registered)
            .field("presentation", &self.presentation.is_some())
            .finish()
    }
}
