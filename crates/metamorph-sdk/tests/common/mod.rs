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


#![allow(dead_code)]

use metamorph_core::TagCompound;
use metamorph_data::model::{Limb, Model, ModelLibrary, Pose};
use metamorph_data::{LimbTransform, MorphManager, MorphSettings};
use metamorph_sdk::{CustomMorphFactory, EntityMorphFactory};
use std::sync::Arc;

pub fn robot() -> Model {
    Model::new("robot")
        .with_size(0.8, 2.2)
        .with_limb(Limb::new("body", ""))
        .with_limb(Limb::new("head", "body"))
        .with_limb(Limb::new("arm", "body"))
        .with_pose(
            "standing",
            Pose::default()
                .with_limb("body", LimbTransform::at([0.0, 0.0, 0.0]))
                .with_limb("head", LimbTransform::at([0.0, 12.0, 0.0]))
                .with_limb("arm", LimbTransform::at([6.0, 10.0, 0.0])),
        )
        .with_pose(
            "sneaking",
            Pose::sized(0.8, 1.6).with_limb("body", LimbTransform::at([0.0, -4.0, 0.0])),
        )
}

pub fn models() -> Arc<ModelLibrary> {
    let mut library = ModelLibrary::new();
    library.insert(robot());
    Arc::new(library)
}

/// A manager with the stock creatures and the robot model, both phases run.
pub fn manager() -> Arc<MorphManager> {
    let mut manager = MorphManager::new();
    manager.add_factory(Arc::new(EntityMorphFactory::vanilla()));
    manager.add_factory(Arc::new(CustomMorphFactory::new(models()).with_settings(
        "robot",
        MorphSettings {
            speed: Some(1.5),
            ..MorphSettings::default()
        },
    )));
    manager.register();
    manager.register_presentation();
    Arc::new(manager)
}

pub fn tag(text: &str) -> TagCompound {
    TagCompound::from_json_str(text).unwrap()
}
