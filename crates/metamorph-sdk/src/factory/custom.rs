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

use metamorph_core::TagCompound;
use metamorph_data::model::ModelLibrary;
use metamorph_data::morph::{name_of, CustomMorph, CUSTOM_KEY};
use metamorph_data::registry::{translation_key, Presentation, Registration};
use metamorph_data::{Morph, MorphError, MorphFactory, MorphKind, MorphList, MorphSettings};
use std::collections::HashMap;
use std::sync::Arc;

/// Name prefix claimed by [`CustomMorphFactory`].
pub const CUSTOM_PREFIX: &str = "custom:";

/// Builds morphs drawn with skeletal models, named `custom:<model>`.
#[derive(Debug, Clone, Default)]
pub struct CustomMorphFactory {
    models: Arc<ModelLibrary>,
    settings: HashMap<String, MorphSettings>,
}

impl CustomMorphFactory {
    /// A factory over `models`.
    pub fn new(models: Arc<ModelLibrary>) -> Self {
        Self {
            models,
            settings: HashMap::new(),
        }
    }

    /// Registers tuning for the morph of `model`.
    pub fn with_settings(mut self, model: &str, settings: MorphSettings) -> Self {
        self.settings.insert(Self::morph_name(model), settings);
        self
    }

    /// The morph name for `model`.
    pub fn morph_name(model: &str) -> String {
        format!("{CUSTOM_PREFIX}{model}")
    }

    /// The model library.
    pub fn models(&self) -> &Arc<ModelLibrary> {
        &self.models
    }

    fn model_name(name: &str) -> Option<&str> {
        name.strip_prefix(CUSTOM_PREFIX)
    }
}

impl MorphFactory for CustomMorphFactory {
    fn id(&self) -> &str {
        "custom"
    }

    fn register(&self, registration: &mut Registration<'_>) {
        for (name, settings) in &self.settings {
            registration.settings.insert(name.clone(), settings.clone());
        }
    }

    fn register_presentation(&self, presentation: &mut Presentation) {
        for model in self.models.models() {
            presentation
                .localization
                .insert(translation_key(&Self::morph_name(&model.name)), model.name.clone());
            presentation.add_model(model);
        }
    }

    fn has_morph(&self, name: &str) -> bool {
        Self::model_name(name).is_some_and(|m| self.models.contains(m))
    }

    fn build(&self, tag: &TagCompound) -> Result<Morph, MorphError> {
        let name = name_of(tag).ok_or(MorphError::MissingName)?;
        let model_name =
            Self::model_name(name).ok_or_else(|| MorphError::UnknownMorph(name.to_string()))?;
        let model = self
            .models
            .get(model_name)
            .ok_or_else(|| MorphError::UnknownModel(model_name.to_string()))?;
        let payload = match tag.get(CUSTOM_KEY) {
            None => TagCompound::new(),
            Some(value) => TagCompound::from_value(value.clone()).ok_or_else(|| {
                MorphError::MalformedPayload {
                    name: name.to_string(),
                    reason: format!("`{CUSTOM_KEY}` is not a compound"),
                }
            })?,
        };
        Ok(Morph::new(
            name,
            MorphKind::Custom(CustomMorph::with_overrides(model, payload)),
        ))
    }

    fn collect_morphs(&self, list: &mut MorphList) {
        for model in self.models.models() {
            let name = Self::morph_name(&model.name);
            list.add_morph(Morph::new(name, MorphKind::Custom(CustomMorph::new(model))));
        }
    }
}
