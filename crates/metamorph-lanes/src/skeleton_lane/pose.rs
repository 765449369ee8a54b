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

use metamorph_core::math::{degrees_to_radians, AffineTransform, Vec3};
use metamorph_data::LimbTransform;

/// Model units per block.
pub const PIXEL_SCALE: f32 = 1.0 / 16.0;

/// Vertical offset of a root limb's pivot, in model units. Root limbs are
/// placed relative to the model's vertical center rather than their own joint.
pub const ROOT_ORIGIN_Y: f32 = 24.0;

/// One limb's applied transform, in render space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbPose {
    /// Rotation pivot, in model units.
    pub pivot: Vec3,
    /// Euler rotation in radians, composed Z, Y, X.
    pub rotation: Vec3,
    /// Per-axis scale of the limb and everything below it.
    pub scale: Vec3,
}

impl Default for LimbPose {
    fn default() -> Self {
        Self {
            pivot: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl LimbPose {
    /// Converts a model transform. The Y pivot is flipped, shifted by
    /// [`ROOT_ORIGIN_Y`] for root limbs; Z is flipped. Y and Z rotations are
    /// negated, X is not.
    pub fn from_transform(transform: &LimbTransform, root: bool) -> Self {
        let [tx, ty, tz] = transform.translate;
        let [rx, ry, rz] = transform.rotate;
        let pivot_y = if root { -ty + ROOT_ORIGIN_Y } else { -ty };
        Self {
            pivot: Vec3::new(tx, pivot_y, -tz),
            rotation: Vec3::new(
                degrees_to_radians(rx),
                -degrees_to_radians(ry),
                -degrees_to_radians(rz),
            ),
            scale: Vec3::from(transform.scale),
        }
    }

    /// The limb's contribution to the render stack: its own scale, then the
    /// move to its pivot, then its rotation.
    pub fn local_transform(&self) -> AffineTransform {
        AffineTransform::from_scale(self.scale)
            * AffineTransform::from_translation(self.pivot * PIXEL_SCALE)
            * AffineTransform::from_euler_zyx(self.rotation)
    }
}

/// Per-entity applied transforms, indexed like the skeleton's limbs.
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonPose {
    limbs: Vec<LimbPose>,
}

impl SkeletonPose {
    /// `len` limbs at rest.
    pub fn new(len: usize) -> Self {
        Self {
            limbs: vec![LimbPose::default(); len],
        }
    }

    /// Applied transform of the limb at `index`.
    pub fn limb(&self, index: usize) -> Option<&LimbPose> {
        self.limbs.get(index)
    }

    /// All applied transforms.
    pub fn limbs(&self) -> &[LimbPose] {
        &self.limbs
    }

    /// Number of limbs.
    pub fn len(&self) -> usize {
        self.limbs.len()
    }

    /// Whether there are no limbs.
    pub fn is_empty(&self) -> bool {
        self.limbs.is_empty()
    }

    pub(crate) fn set(&mut self, index: usize, pose: LimbPose) {
        if let Some(slot) = self.limbs.get_mut(index) {
            *slot = pose;
        }
    }

    pub(crate) fn resize(&mut self, len: usize) {
        self.limbs.resize(len, LimbPose::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use metamorph_core::math::FRAC_PI_2;

    #[test]
    fn root_pivot_is_offset_and_child_pivot_is_not() {
        let t = LimbTransform::at([2.0, 10.0, 3.0]);
        let root = LimbPose::from_transform(&t, true);
        let child = LimbPose::from_transform(&t, false);
        assert_eq!(root.pivot, Vec3::new(2.0, 14.0, -3.0));
        assert_eq!(child.pivot, Vec3::new(2.0, -10.0, -3.0));
    }

    #[test]
    fn y_and_z_rotations_are_negated() {
        let t = LimbTransform::default().rotated([90.0, 90.0, 90.0]);
        let pose = LimbPose::from_transform(&t, false);
        assert_relative_eq!(pose.rotation.x, FRAC_PI_2);
        assert_relative_eq!(pose.rotation.y, -FRAC_PI_2);
        assert_relative_eq!(pose.rotation.z, -FRAC_PI_2);
    }

    #[test]
    fn local_transform_scales_the_pivot_offset() {
        let pose = LimbPose {
            pivot: Vec3::new(16.0, 0.0, 0.0),
            rotation: Vec3::ZERO,
            scale: Vec3::splat(2.0),
        };
        let origin = pose.local_transform().transform_point(Vec3::ZERO);
        assert_relative_eq!(origin.x, 2.0);
    }
}
