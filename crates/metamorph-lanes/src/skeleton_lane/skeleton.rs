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

use super::pose::{LimbPose, SkeletonPose};
use ahash::AHashMap;
use metamorph_core::graph::topological_sort;
use metamorph_data::model::Model;
use metamorph_data::PoseName;
use std::sync::Arc;
use thiserror::Error;

/// Why a model could not be compiled into a skeleton.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkeletonError {
    /// Two limbs share a name.
    #[error("model `{model}` declares limb `{limb}` more than once")]
    DuplicateLimb {
        /// The model.
        model: String,
        /// The repeated limb name.
        limb: String,
    },
    /// Parent links loop back on themselves.
    #[error("model `{model}` has a parent cycle through {limbs:?}")]
    Cycle {
        /// The model.
        model: String,
        /// Limbs that could not be ordered.
        limbs: Vec<String>,
    },
}

#[derive(Debug, Clone)]
struct LimbNode {
    name: String,
    parent: Option<usize>,
}

/// A compiled, shareable limb tree.
#[derive(Debug, Clone)]
pub struct Skeleton {
    model: Arc<Model>,
    limbs: Vec<LimbNode>,
    order: Vec<usize>,
    by_name: AHashMap<String, usize>,
}

impl Skeleton {
    /// Compiles a model.
    ///
    /// A limb whose parent does not exist is logged and treated as a root.
    pub fn compile(model: Arc<Model>) -> Result<Self, SkeletonError> {
        let mut by_name = AHashMap::with_capacity(model.limbs.len());
        for (index, limb) in model.limbs.iter().enumerate() {
            if by_name.insert(limb.name.clone(), index).is_some() {
                return Err(SkeletonError::DuplicateLimb {
                    model: model.name.clone(),
                    limb: limb.name.clone(),
                });
            }
        }

        let limbs: Vec<LimbNode> = model
            .limbs
            .iter()
            .map(|limb| {
                let parent = if limb.is_root() {
                    None
                } else {
                    let parent = by_name.get(&limb.parent).copied();
                    if parent.is_none() {
                        log::warn!(
                            "Model '{}': limb '{}' names missing parent '{}', treating it as a root",
                            model.name,
                            limb.name,
                            limb.parent
                        );
                    }
                    parent
                };
                LimbNode {
                    name: limb.name.clone(),
                    parent,
                }
            })
            .collect();

        let edges = limbs
            .iter()
            .enumerate()
            .filter_map(|(child, node)| node.parent.map(|parent| (parent, child)));
        let order = topological_sort(0..limbs.len(), edges).map_err(|cycle| {
            SkeletonError::Cycle {
                model: model.name.clone(),
                limbs: cycle
                    .unresolved
                    .iter()
                    .map(|&i| limbs[i].name.clone())
                    .collect(),
            }
        })?;

        Ok(Self {
            model,
            limbs,
            order,
            by_name,
        })
    }

    /// The source model.
    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    /// The model's name.
    pub fn name(&self) -> &str {
        &self.model.name
    }

    /// Number of limbs.
    pub fn len(&self) -> usize {
        self.limbs.len()
    }

    /// Whether the skeleton has no limbs.
    pub fn is_empty(&self) -> bool {
        self.limbs.is_empty()
    }

    /// Index of the named limb.
    pub fn limb_index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Name of the limb at `index`.
    pub fn limb_name(&self, index: usize) -> Option<&str> {
        self.limbs.get(index).map(|l| l.name.as_str())
    }

    /// Parent of the limb at `index`.
    pub fn parent(&self, index: usize) -> Option<usize> {
        self.limbs.get(index).and_then(|l| l.parent)
    }

    /// Limb indices, parents before children.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// A fresh per-entity pose, with the standing pose applied.
    pub fn new_pose(&self) -> SkeletonPose {
        let mut state = SkeletonPose::new(self.limbs.len());
        self.apply_pose(PoseName::Standing.as_str(), &mut state);
        state
    }

    /// Applies the named pose to `state`, parents first. Limbs the pose does
    /// not mention, or every limb if the pose does not exist, keep their last
    /// applied transform. Returns the number of limbs updated.
    pub fn apply_pose(&self, pose: &str, state: &mut SkeletonPose) -> usize {
        state.resize(self.limbs.len());
        let Some(pose) = self.model.poses.get(pose) else {
            return 0;
        };
        let mut updated = 0;
        for &index in &self.order {
            let node = &self.limbs[index];
            if let Some(transform) = pose.limbs.get(&node.name) {
                state.set(index, LimbPose::from_transform(transform, node.parent.is_none()));
                updated += 1;
            }
        }
        updated
    }
}
