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

//! # Metamorph Data
//!
//! The data layer of the morphing system: what a morph *is* ([`Morph`]), what a
//! player *holds* ([`Morphing`]), what lies in the world waiting for its owner
//! ([`MorphCarrier`]), and how opaque tag records turn into typed morphs
//! ([`MorphManager`] and its [`MorphFactory`] plug-ins).

#![warn(missing_docs)]

pub mod ability;
pub mod capability;
pub mod carrier;
pub mod error;
pub mod holder;
pub mod model;
pub mod morph;
pub mod registry;

pub use capability::{Morphing, MorphingData};
pub use carrier::{CarrierState, MorphCarrier};
pub use error::MorphError;
pub use holder::{Effect, MorphHolder};
pub use model::{LimbTransform, Model, ModelLibrary, PoseName};
pub use morph::{Morph, MorphKind, MorphPose, MorphSettings};
pub use registry::{MorphFactory, MorphList, MorphManager};
