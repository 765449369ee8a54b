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

//! The demo content registered by the harness.

use metamorph_data::model::{Limb, Model, ModelLibrary, Pose};
use metamorph_data::{LimbTransform, MorphManager, MorphSettings};
use metamorph_sdk::{CustomMorphFactory, EntityMorphFactory};
use std::sync::Arc;

/// Name of the demo model.
pub const GOLEM: &str = "golem";

fn golem() -> Model {
    let mut model = Model::new(GOLEM).with_size(1.2, 2.6).with_scale([1.2, 1.2, 1.2]);
    model.texture = Some("textures/golem.png".into());
    model
        .with_limb(Limb::new("body", ""))
        .with_limb(Limb::new("head", "body"))
        .with_limb(Limb::new("left_arm", "body"))
        .with_limb(Limb::new("right_arm", "body"))
        .with_limb(Limb::new("left_hand", "left_arm"))
        .with_limb(Limb::new("right_hand", "right_arm"))
        .with_pose(
            "standing",
            Pose::default()
                .with_limb("body", LimbTransform::at([0.0, 0.0, 0.0]))
                .with_limb("head", LimbTransform::at([0.0, 14.0, 0.0]))
                .with_limb("left_arm", LimbTransform::at([8.0, 12.0, 0.0]))
                .with_limb("right_arm", LimbTransform::at([-8.0, 12.0, 0.0]))
                .with_limb("left_hand", LimbTransform::at([0.0, -10.0, 0.0]))
                .with_limb("right_hand", LimbTransform::at([0.0, -10.0, 0.0])),
        )
        .with_pose(
            "sneaking",
            Pose::sized(1.2, 2.0)
                .with_limb("body", LimbTransform::at([0.0, -6.0, 2.0]).rotated([25.0, 0.0, 0.0]))
                .with_limb("head", LimbTransform::at([0.0, 12.0, -2.0])),
        )
        .with_pose(
            "flying",
            Pose::default()
                .with_limb("left_arm", LimbTransform::at([8.0, 12.0, 0.0]).rotated([0.0, 0.0, 80.0]))
                .with_limb("right_arm", LimbTransform::at([-8.0, 12.0, 0.0]).rotated([0.0, 0.0, -80.0])),
        )
}

/// Builds the registry and runs both registration phases.
pub fn manager() -> Arc<MorphManager> {
    let mut models = ModelLibrary::new();
    models.insert(golem());

    let custom = CustomMorphFactory::new(Arc::new(models)).with_settings(
        GOLEM,
        MorphSettings {
            abilities: Some(vec!["climb".into()]),
            action: Some("leap".into()),
            speed: Some(0.8),
            health: Some(40.0),
            ..MorphSettings::default()
        },
    );

    let mut manager = MorphManager::new();
    manager.add_factory(Arc::new(EntityMorphFactory::vanilla()));
    manager.add_factory(Arc::new(custom));
    manager.register();
    manager.register_presentation();
    Arc::new(manager)
}
