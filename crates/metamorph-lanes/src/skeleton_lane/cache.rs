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

use super::pose::SkeletonPose;
use super::skeleton::Skeleton;
use super::stack::draw_transforms;
use ahash::AHashMap;
use metamorph_core::math::{AffineTransform, Vec3};
use metamorph_core::EntityId;
use metamorph_data::model::Model;
use metamorph_data::{Morph, MorphCarrier, MorphHolder, MorphKind, MorphPose, PoseName};
use std::sync::Arc;

/// Compiled skeletons by model name, shared read-only by every entity.
#[derive(Debug, Clone, Default)]
pub struct SkeletonLibrary {
    skeletons: AHashMap<String, Arc<Skeleton>>,
}

impl SkeletonLibrary {
    /// An empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles every model. Models that fail are logged and left out.
    pub fn compile_all<'a>(models: impl IntoIterator<Item = &'a Arc<Model>>) -> Self {
        let mut library = Self::new();
        for model in models {
            match Skeleton::compile(model.clone()) {
                Ok(skeleton) => library.insert(skeleton),
                Err(e) => log::warn!("Skipping model '{}': {}", model.name, e),
            }
        }
        log::info!("SkeletonLibrary: Compiled {} skeletons", library.len());
        library
    }

    /// Adds or replaces a skeleton.
    pub fn insert(&mut self, skeleton: Skeleton) {
        self.skeletons
            .insert(skeleton.name().to_string(), Arc::new(skeleton));
    }

    /// Looks up a skeleton by model name.
    pub fn get(&self, model: &str) -> Option<&Arc<Skeleton>> {
        self.skeletons.get(model)
    }

    /// Number of skeletons.
    pub fn len(&self) -> usize {
        self.skeletons.len()
    }

    /// Whether the library is empty.
    pub fn is_empty(&self) -> bool {
        self.skeletons.is_empty()
    }
}

/// A skeleton posed for one frame.
#[derive(Debug, Clone)]
pub struct PosedSkeleton {
    /// The shared skeleton.
    pub skeleton: Arc<Skeleton>,
    /// Pose that was applied.
    pub pose: PoseName,
    /// Draw frame per limb, indexed like the skeleton's limbs.
    pub transforms: Vec<AffineTransform>,
}

impl PosedSkeleton {
    /// Draw frame of the named limb.
    pub fn limb(&self, name: &str) -> Option<AffineTransform> {
        self.skeleton
            .limb_index(name)
            .and_then(|i| self.transforms.get(i).copied())
    }
}

struct CachedPose {
    model: String,
    state: SkeletonPose,
}

/// Entity-local applied transforms.
///
/// Shared skeletons are never mutated; each entity keeps its own
/// [`SkeletonPose`] here so that limbs missing from a pose keep their last
/// transform for that entity only.
#[derive(Default)]
pub struct PoseCache {
    entries: AHashMap<EntityId, CachedPose>,
}

impl PoseCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Poses `morph`'s skeleton for `entity`. Returns `None` for morphs the
    /// host draws itself, or whose model has no skeleton.
    pub fn pose_morph(
        &mut self,
        entity: EntityId,
        morph_pose: MorphPose<'_>,
        library: &SkeletonLibrary,
    ) -> Option<PosedSkeleton> {
        match morph_pose {
            MorphPose::Skeleton {
                model, pose, scale, ..
            } => self.pose_model(entity, &model.name, pose, Vec3::from(scale), library),
            MorphPose::Creature { .. } => None,
        }
    }

    /// Poses the morph worn by `holder`.
    pub fn pose_holder(
        &mut self,
        holder: &dyn MorphHolder,
        morph: &Morph,
        library: &SkeletonLibrary,
    ) -> Option<PosedSkeleton> {
        self.pose_morph(holder.id(), morph.pose(holder), library)
    }

    /// Poses a carrier's morph, standing, grown by its spawn progress.
    pub fn pose_carrier(
        &mut self,
        carrier: &MorphCarrier,
        library: &SkeletonLibrary,
    ) -> Option<PosedSkeleton> {
        let MorphKind::Custom(custom) = carrier.morph().kind() else {
            return None;
        };
        let scale = Vec3::from(custom.scale()) * carrier.growth();
        self.pose_model(
            carrier.id(),
            &custom.model().name,
            PoseName::Standing,
            scale,
            library,
        )
    }

    /// Poses a model by name for `entity`.
    pub fn pose_model(
        &mut self,
        entity: EntityId,
        model: &str,
        pose: PoseName,
        scale: Vec3,
        library: &SkeletonLibrary,
    ) -> Option<PosedSkeleton> {
        let skeleton = library.get(model)?.clone();
        let entry = self.entries.entry(entity).or_insert_with(|| CachedPose {
            model: model.to_string(),
            state: skeleton.new_pose(),
        });
        if entry.model != model {
            entry.model = model.to_string();
            entry.state = skeleton.new_pose();
        }
        skeleton.apply_pose(pose.as_str(), &mut entry.state);
        let transforms = draw_transforms(&skeleton, &entry.state, AffineTransform::from_scale(scale));
        log::trace!("Posed '{}' for {} as {}", model, entity, pose);
        Some(PosedSkeleton {
            skeleton,
            pose,
            transforms,
        })
    }

    /// Drops the cached pose of an entity that left.
    pub fn forget(&mut self, entity: EntityId) {
        self.entries.remove(&entity);
    }

    /// Number of entities with a cached pose.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
