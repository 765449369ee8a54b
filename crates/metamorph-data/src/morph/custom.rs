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

use crate::model::Model;
use metamorph_core::TagCompound;
use std::sync::Arc;

/// Payload key naming the model.
pub const MODEL_KEY: &str = "Model";
/// Payload key overriding the model's texture.
pub const TEXTURE_KEY: &str = "Texture";
/// Payload key overriding the model's scale.
pub const SCALE_KEY: &str = "Scale";

/// A morph drawn with a skeletal [`Model`].
///
/// The payload is the model reference plus optional per-instance overrides.
/// The model itself is shared and read-only.
#[derive(Debug, Clone)]
pub struct CustomMorph {
    model: Arc<Model>,
    payload: TagCompound,
}

impl CustomMorph {
    /// Wraps a model with no overrides.
    pub fn new(model: Arc<Model>) -> Self {
        let mut payload = TagCompound::new();
        payload.set(MODEL_KEY, model.name.clone());
        Self { model, payload }
    }

    /// Wraps a model with the overrides found in `payload`. The model key is
    /// always rewritten to match `model`.
    pub fn with_overrides(model: Arc<Model>, mut payload: TagCompound) -> Self {
        payload.set(MODEL_KEY, model.name.clone());
        Self { model, payload }
    }

    /// Overrides the texture.
    pub fn set_texture(&mut self, texture: impl Into<String>) {
        self.payload.set(TEXTURE_KEY, texture.into());
    }

    /// Overrides the scale.
    pub fn set_scale(&mut self, scale: [f32; 3]) {
        self.payload.set(SCALE_KEY, scale.to_vec());
    }

    /// The shared model.
    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    /// The payload: model name plus overrides.
    pub fn payload(&self) -> &TagCompound {
        &self.payload
    }

    /// Texture to draw with.
    pub fn texture(&self) -> Option<&str> {
        self.payload
            .get_string(TEXTURE_KEY)
            .or(self.model.texture.as_deref())
    }

    /// Whole-model scale to draw with.
    pub fn scale(&self) -> [f32; 3] {
        self.payload
            .get_f32_triple(SCALE_KEY)
            .unwrap_or(self.model.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_shadow_model_defaults() {
        let mut model = Model::new("robot");
        model.texture = Some("robot.png".into());
        let model = Arc::new(model);

        let mut morph = CustomMorph::new(model.clone());
        assert_eq!(morph.texture(), Some("robot.png"));
        assert_eq!(morph.scale(), [1.0, 1.0, 1.0]);

        morph.set_texture("rusty.png");
        morph.set_scale([2.0, 2.0, 2.0]);
        assert_eq!(morph.texture(), Some("rusty.png"));
        assert_eq!(morph.scale(), [2.0, 2.0, 2.0]);
        assert_eq!(morph.payload().get_string(MODEL_KEY), Some("robot"));
    }
}
