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

//! The public-facing API of the morphing system.
//!
//! Hosts build a [`MorphManager`](metamorph_data::MorphManager) from the
//! factories in [`factory`], then drive an authoritative [`MorphServer`] and
//! any number of observing [`MorphClient`]s connected through [`net`] links.

pub mod body;
pub mod client;
pub mod config;
pub mod creature;
pub mod factory;
pub mod logging;
pub mod net;
pub mod server;

pub use body::PlayerBody;
pub use client::MorphClient;
pub use config::MorphConfig;
pub use creature::{CreatureKind, CreatureTable};
pub use factory::{CustomMorphFactory, EntityMorphFactory};
pub use server::MorphServer;

/// Everything a host usually needs.
pub mod prelude {
    pub use crate::body::PlayerBody;
    pub use crate::client::MorphClient;
    pub use crate::config::MorphConfig;
    pub use crate::creature::CreatureTable;
    pub use crate::factory::{CustomMorphFactory, EntityMorphFactory};
    pub use crate::net::{link_pair, ClientMessage, FeedbackKind, ServerMessage};
    pub use crate::server::MorphServer;
    pub use metamorph_core::math::Vec3;
    pub use metamorph_core::{EntityId, TagCompound};
    pub use metamorph_data::model::{Limb, Model, ModelLibrary, Pose};
    pub use metamorph_data::{LimbTransform, Morph, MorphManager, MorphSettings, Morphing, MorphingData};
}
