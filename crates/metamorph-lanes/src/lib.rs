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

//! # Metamorph Lanes
//!
//! The work done every tick or every frame: posing skeletal models
//! ([`skeleton_lane`]), walking pickup carriers toward their owners
//! ([`carrier_lane`]) and running active morphs' abilities
//! ([`morphing_lane`]).

#![warn(missing_docs)]

pub mod carrier_lane;
pub mod morphing_lane;
pub mod skeleton_lane;

pub use carrier_lane::{tick_carrier, tick_carriers, CarrierRules, CarrierTick, CarrierWorld, Delivery, OwnerView};
pub use morphing_lane::update_morphing;
pub use skeleton_lane::{
    LimbPose, PoseCache, PosedSkeleton, Skeleton, SkeletonError, SkeletonLibrary, SkeletonPose,
};
