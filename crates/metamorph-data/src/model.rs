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

//! Skeletal model definitions for custom morphs.
//!
//! A [`Model`] is pure data: a flat list of named limbs, each naming its
//! parent, and a set of named poses assigning each limb a [`LimbTransform`].
//! Turning it into something renderable is the job of the skeleton lane.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The pose a skeleton is drawn in, chosen from the holder's state each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoseName {
    /// Default pose.
    Standing,
    /// Holder is crouching.
    Sneaking,
    /// Holder is gliding or flying.
    Flying,
}

impl PoseName {
    /// Picks the pose for the holder's state. Sneaking takes precedence over
    /// flying.
    pub fn select(sneaking: bool, flying: bool) -> Self {
        if sneaking {
            PoseName::Sneaking
        } else if flying {
            PoseName::Flying
        } else {
            PoseName::Standing
        }
    }

    /// The key this pose is stored under in a [`Model`].
    pub fn as_str(self) -> &'static str {
        match self {
            PoseName::Standing => "standing",
            PoseName::Sneaking => "sneaking",
            PoseName::Flying => "flying",
        }
    }
}

impl fmt::Display for PoseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn player_size() -> [f32; 2] {
    [0.6, 1.8]
}

/// Local transform of one limb within one pose, in model pixels and degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimbTransform {
    /// Offset from the parent's frame.
    #[serde(default)]
    pub translate: [f32; 3],
    /// Euler rotation in degrees.
    #[serde(default)]
    pub rotate: [f32; 3],
    /// Per-axis scale.
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
}

impl Default for LimbTransform {
    fn default() -> Self {
        Self {
            translate: [0.0; 3],
            rotate: [0.0; 3],
            scale: unit_scale(),
        }
    }
}

impl LimbTransform {
    /// A transform that only translates.
    pub fn at(translate: [f32; 3]) -> Self {
        Self {
            translate,
            ..Self::default()
        }
    }

    /// Sets the rotation.
    pub fn rotated(mut self, rotate: [f32; 3]) -> Self {
        self.rotate = rotate;
        self
    }

    /// Sets the scale.
    pub fn scaled(mut self, scale: [f32; 3]) -> Self {
        self.scale = scale;
        self
    }
}

/// A named part of a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Limb {
    /// Unique name within the model.
    pub name: String,
    /// Name of the parent limb. Empty for a root limb.
    #[serde(default)]
    pub parent: String,
    /// Texture offset, in pixels.
    #[serde(default)]
    pub texture: [u32; 2],
    /// Box size, in pixels.
    #[serde(default)]
    pub size: [f32; 3],
    /// Box anchor within the limb, as a fraction of its size.
    #[serde(default)]
    pub anchor: [f32; 3],
}

impl Limb {
    /// A limb with no geometry under `parent` (empty for a root).
    pub fn new(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: parent.into(),
            texture: [0, 0],
            size: [0.0; 3],
            anchor: [0.0; 3],
        }
    }

    /// Whether the limb declares no parent at all.
    pub fn is_root(&self) -> bool {
        self.parent.is_empty()
    }
}

/// A named pose: collision size plus per-limb transforms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Collision box (width, height) while in this pose. Falls back to the
    /// model's size.
    #[serde(default)]
    pub size: Option<[f32; 2]>,
    /// Transform per limb name. Limbs not listed keep whatever was applied
    /// last.
    #[serde(default)]
    pub limbs: HashMap<String, LimbTransform>,
}

impl Pose {
    /// An empty pose with the given collision size.
    pub fn sized(width: f32, height: f32) -> Self {
        Self {
            size: Some([width, height]),
            limbs: HashMap::new(),
        }
    }

    /// Adds a limb transform.
    pub fn with_limb(mut self, limb: impl Into<String>, transform: LimbTransform) -> Self {
        self.limbs.insert(limb.into(), transform);
        self
    }
}

/// A complete skeletal model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Unique model name.
    pub name: String,
    /// Default texture location.
    #[serde(default)]
    pub texture: Option<String>,
    /// Whole-model scale.
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
    /// Default collision box (width, height).
    #[serde(default = "player_size")]
    pub size: [f32; 2],
    /// Limbs in declaration order.
    #[serde(default)]
    pub limbs: Vec<Limb>,
    /// Poses by name.
    #[serde(default)]
    pub poses: HashMap<String, Pose>,
}

impl Model {
    /// An empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            texture: None,
            scale: unit_scale(),
            size: player_size(),
            limbs: Vec::new(),
            poses: HashMap::new(),
        }
    }

    /// Sets the default collision box.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = [width, height];
        self
    }

    /// Sets the whole-model scale.
    pub fn with_scale(mut self, scale: [f32; 3]) -> Self {
        self.scale = scale;
        self
    }

    /// Adds a limb.
    pub fn with_limb(mut self, limb: Limb) -> Self {
        self.limbs.push(limb);
        self
    }

    /// Adds or replaces a pose.
    pub fn with_pose(mut self, name: impl Into<String>, pose: Pose) -> Self {
        self.poses.insert(name.into(), pose);
        self
    }

    /// Looks up a limb by name.
    pub fn limb(&self, name: &str) -> Option<&Limb> {
        self.limbs.iter().find(|l| l.name == name)
    }

    /// Looks up a pose, falling back to the standing pose.
    pub fn pose_or_standing(&self, pose: PoseName) -> Option<&Pose> {
        self.poses
            .get(pose.as_str())
            .or_else(|| self.poses.get(PoseName::Standing.as_str()))
    }

    /// Collision (width, height) for a pose, before any overrides.
    pub fn size_for(&self, pose: PoseName) -> [f32; 2] {
        self.pose_or_standing(pose)
            .and_then(|p| p.size)
            .unwrap_or(self.size)
    }
}

/// Registered models by name.
#[derive(Debug, Clone, Default)]
pub struct ModelLibrary {
    models: HashMap<String, Arc<Model>>,
}

impl ModelLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a model, keyed by its name.
    pub fn insert(&mut self, model: Model) -> Arc<Model> {
        let model = Arc::new(model);
        if self
            .models
            .insert(model.name.clone(), model.clone())
            .is_some()
        {
            log::warn!("Model '{}' was registered twice; keeping the latest", model.name);
        }
        model
    }

    /// Looks up a model.
    pub fn get(&self, name: &str) -> Option<Arc<Model>> {
        self.models.get(name).cloned()
    }

    /// Whether a model is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// All models, sorted by name.
    pub fn models(&self) -> Vec<Arc<Model>> {
        let mut models: Vec<_> = self.models.values().cloned().collect();
        models.sort_by(|a, b| a.name.cmp(&b.name));
        models
    }

    /// Number of registered models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the library is empty.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sneaking_beats_flying() {
        assert_eq!(PoseName::select(true, true), PoseName::Sneaking);
        assert_eq!(PoseName::select(false, true), PoseName::Flying);
        assert_eq!(PoseName::select(false, false), PoseName::Standing);
    }

    #[test]
    fn missing_pose_falls_back_to_standing_size() {
        let model = Model::new("blob").with_pose("standing", Pose::sized(1.0, 1.0));
        assert_eq!(model.size_for(PoseName::Flying), [1.0, 1.0]);

        let sized = Model::new("tall")
            .with_size(0.5, 2.5)
            .with_pose("sneaking", Pose::default());
        assert_eq!(sized.size_for(PoseName::Sneaking), [0.5, 2.5]);

        let empty = Model::new("empty");
        assert_eq!(empty.size_for(PoseName::Standing), [0.6, 1.8]);
    }

    #[test]
    fn limb_transform_deserializes_with_defaults() {
        let t: LimbTransform = serde_json::from_str(r#"{"rotate":[90,0,0]}"#).unwrap();
        assert_eq!(t.translate, [0.0; 3]);
        assert_eq!(t.rotate, [90.0, 0.0, 0.0]);
        assert_eq!(t.scale, [1.0; 3]);
    }
}
