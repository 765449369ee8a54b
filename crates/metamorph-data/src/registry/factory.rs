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

use super::display::Localization;
use super::list::MorphList;
use crate::ability::AbilityRegistry;
use crate::error::MorphError;
use crate::model::Model;
use crate::morph::{Morph, MorphSettings};
use metamorph_core::TagCompound;
use std::collections::HashMap;
use std::sync::Arc;

/// What a factory may touch during the universal registration phase.
pub struct Registration<'a> {
    /// Per-name settings overrides.
    pub settings: &'a mut HashMap<String, MorphSettings>,
    /// Named behaviours.
    pub abilities: &'a mut AbilityRegistry,
}

/// State gathered during the presentation registration phase. Only built
/// where something is drawn.
#[derive(Debug, Default)]
pub struct Presentation {
    /// Display labels.
    pub localization: Localization,
    models: Vec<Arc<Model>>,
}

impl Presentation {
    /// Queues a model for skeleton compilation. A model already queued under
    /// the same name is replaced.
    pub fn add_model(&mut self, model: Arc<Model>) {
        self.models.retain(|m| m.name != model.name);
        self.models.push(model);
    }

    /// Models to compile, in registration order.
    pub fn models(&self) -> &[Arc<Model>] {
        &self.models
    }
}

/// A pluggable resolver and builder for one family of morph names.
pub trait MorphFactory: Send + Sync {
    /// Identifier used in logs and catalog ownership.
    fn id(&self) -> &str;

    /// Universal registration: settings and behaviours.
    fn register(&self, _registration: &mut Registration<'_>) {}

    /// Presentation registration: labels and models to compile.
    fn register_presentation(&self, _presentation: &mut Presentation) {}

    /// Whether this factory can build morphs called `name`.
    fn has_morph(&self, name: &str) -> bool;

    /// Builds a morph from its tag form.
    fn build(&self, tag: &TagCompound) -> Result<Morph, MorphError>;

    /// Adds this factory's catalog entries to `list`.
    fn collect_morphs(&self, list: &mut MorphList);
}
