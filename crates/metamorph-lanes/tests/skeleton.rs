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

use approx::assert_relative_eq;
use metamorph_core::math::{AffineTransform, Vec3, FRAC_PI_2};
use metamorph_core::EntityId;
use metamorph_data::model::{Limb, Model, Pose};
use metamorph_data::{LimbTransform, PoseName};
use metamorph_lanes::skeleton_lane::{attachment_transform, draw_transforms, PIXEL_SCALE};
use metamorph_lanes::{PoseCache, Skeleton, SkeletonLibrary};
use std::sync::Arc;

fn body_and_leg() -> Arc<Model> {
    Arc::new(
        Model::new("walker")
            .with_limb(Limb::new("body", ""))
            .with_limb(Limb::new("leg", "body"))
            .with_pose(
                "standing",
                Pose::default()
                    .with_limb("body", LimbTransform::default())
                    .with_limb("leg", LimbTransform::default().rotated([0.0, 90.0, 0.0])),
            )
            .with_pose(
                "sneaking",
                Pose::default().with_limb("body", LimbTransform::at([0.0, 4.0, 0.0])),
            ),
    )
}

fn chain(depth: usize, scale: f32, rotate: [f32; 3]) -> Arc<Model> {
    let mut model = Model::new("chain");
    let mut standing = Pose::default();
    for i in 0..depth {
        let name = format!("link{i}");
        let parent = if i == 0 { String::new() } else { format!("link{}", i - 1) };
        model = model.with_limb(Limb::new(name.clone(), parent));
        standing = standing.with_limb(
            name,
            LimbTransform::at([16.0, 0.0, 0.0])
                .rotated(rotate)
                .scaled([scale; 3]),
        );
    }
    Arc::new(model.with_pose("standing", standing))
}

#[test]
fn leg_rotation_is_negated_on_y() {
    let skeleton = Skeleton::compile(body_and_leg()).unwrap();
    let state = skeleton.new_pose();
    let leg = state.limb(skeleton.limb_index("leg").unwrap()).unwrap();
    assert_relative_eq!(leg.rotation.x, 0.0);
    assert_relative_eq!(leg.rotation.y, -FRAC_PI_2);
    assert_relative_eq!(leg.rotation.z, 0.0);
}

#[test]
fn posing_is_deterministic() {
    let skeleton = Skeleton::compile(chain(6, 0.9, [10.0, 20.0, 30.0])).unwrap();
    let mut a = skeleton.new_pose();
    let mut b = skeleton.new_pose();
    skeleton.apply_pose("standing", &mut a);
    skeleton.apply_pose("standing", &mut b);
    skeleton.apply_pose("standing", &mut b);
    let first = draw_transforms(&skeleton, &a, AffineTransform::IDENTITY);
    let second = draw_transforms(&skeleton, &b, AffineTransform::IDENTITY);
    assert_eq!(first, second);
}

#[test]
fn pose_missing_a_limb_keeps_its_last_transform() {
    let skeleton = Skeleton::compile(body_and_leg()).unwrap();
    let mut state = skeleton.new_pose();
    let leg = skeleton.limb_index("leg").unwrap();
    let body = skeleton.limb_index("body").unwrap();
    let leg_before = *state.limb(leg).unwrap();

    assert_eq!(skeleton.apply_pose("sneaking", &mut state), 1);
    assert_eq!(*state.limb(leg).unwrap(), leg_before);
    assert_eq!(state.limb(body).unwrap().pivot, Vec3::new(0.0, 20.0, 0.0));
}

#[test]
fn scale_compounds_down_the_tree() {
    let skeleton = Skeleton::compile(chain(2, 2.0, [0.0; 3])).unwrap();
    let state = skeleton.new_pose();
    let frames = draw_transforms(&skeleton, &state, AffineTransform::IDENTITY);
    let origin = |name: &str| frames[skeleton.limb_index(name).unwrap()].transform_point(Vec3::ZERO);

    // root: scale 2 around a pivot of (16, 0 + 24, 0) pixels
    let root = origin("link0");
    assert_relative_eq!(root.x, 2.0 * 16.0 * PIXEL_SCALE);
    assert_relative_eq!(root.y, 2.0 * 24.0 * PIXEL_SCALE);

    // child: its own scale and its parent's both apply to its pivot
    let child = origin("link1");
    assert_relative_eq!(child.x, 2.0 * (2.0 * 16.0 + 16.0) * PIXEL_SCALE);
    assert_relative_eq!(child.y, root.y);
}

#[test]
fn attachment_frame_matches_draw_frame_in_deep_chains() {
    let skeleton = Skeleton::compile(chain(8, 1.1, [10.0, 20.0, 30.0])).unwrap();
    let state = skeleton.new_pose();
    let base = AffineTransform::from_translation(Vec3::new(0.0, 1.5, 0.0));
    let frames = draw_transforms(&skeleton, &state, base);
    for limb in 0..skeleton.len() {
        let attached = attachment_transform(&skeleton, &state, limb, base).unwrap();
        let p = Vec3::new(0.25, -0.5, 1.0);
        let a = attached.transform_point(p);
        let d = frames[limb].transform_point(p);
        assert_relative_eq!(a.x, d.x, epsilon = 1e-4);
        assert_relative_eq!(a.y, d.y, epsilon = 1e-4);
        assert_relative_eq!(a.z, d.z, epsilon = 1e-4);
    }
    assert!(attachment_transform(&skeleton, &state, skeleton.len(), base).is_none());
}

#[test]
fn pose_cache_keeps_state_per_entity() {
    let library = SkeletonLibrary::compile_all([&body_and_leg()]);
    let mut cache = PoseCache::new();
    let a = EntityId::new_v4();
    let b = EntityId::new_v4();

    let sneaking = cache
        .pose_model(a, "walker", PoseName::Sneaking, Vec3::ONE, &library)
        .unwrap();
    let standing = cache
        .pose_model(b, "walker", PoseName::Standing, Vec3::ONE, &library)
        .unwrap();
    assert_ne!(sneaking.limb("body"), standing.limb("body"));
    assert_eq!(cache.len(), 2);

    assert!(cache
        .pose_model(a, "missing", PoseName::Standing, Vec3::ONE, &library)
        .is_none());
    cache.forget(a);
    assert_eq!(cache.len(), 1);
}

#[test]
fn broken_models_are_left_out_of_the_library() {
    let broken = Arc::new(
        Model::new("loop")
            .with_limb(Limb::new("a", "b"))
            .with_limb(Limb::new("b", "a")),
    );
    let library = SkeletonLibrary::compile_all([&broken, &body_and_leg()]);
    assert_eq!(library.len(), 1);
    assert!(library.get("loop").is_none());
}
