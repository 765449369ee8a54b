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

//! Render-stack matrices for a posed skeleton.
//!
//! Drawing a limb pushes its own scale, pivot and rotation on top of its
//! parent's frame, so a limb's scale also scales everything below it. The
//! attachment frame of a limb (where held items or child geometry go) is the
//! same stack rebuilt by un-winding through every ancestor, each applying its
//! stored scale again on the way.

use super::pose::SkeletonPose;
use super::skeleton::Skeleton;
use metamorph_core::math::AffineTransform;

/// Draw frame of every limb, indexed like the skeleton's limbs.
///
/// `base` places the model in the world, including the whole-model scale.
pub fn draw_transforms(
    skeleton: &Skeleton,
    pose: &SkeletonPose,
    base: AffineTransform,
) -> Vec<AffineTransform> {
    let mut frames = vec![AffineTransform::IDENTITY; skeleton.len()];
    for &index in skeleton.order() {
        let parent_frame = skeleton.parent(index).map_or(base, |p| frames[p]);
        let local = pose
            .limb(index)
            .map(|limb| limb.local_transform())
            .unwrap_or_default();
        frames[index] = parent_frame * local;
    }
    frames
}

/// Attachment frame of one limb, rebuilt through its ancestors.
///
/// Returns `None` if `limb` is out of range.
pub fn attachment_transform(
    skeleton: &Skeleton,
    pose: &SkeletonPose,
    limb: usize,
    base: AffineTransform,
) -> Option<AffineTransform> {
    if limb >= skeleton.len() {
        return None;
    }
    let mut chain = vec![limb];
    let mut cursor = limb;
    while let Some(parent) = skeleton.parent(cursor) {
        chain.push(parent);
        cursor = parent;
    }

    let frame = chain.iter().rev().fold(base, |frame, &index| {
        let local = pose
            .limb(index)
            .map(|limb| limb.local_transform())
            .unwrap_or_default();
        frame * local
    });
    Some(frame)
}
