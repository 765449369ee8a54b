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

//! Skeletal posing for custom-model morphs.
//!
//! A [`Model`](metamorph_data::Model) is compiled once into a shared, read-only
//! [`Skeleton`]: limbs in an indexed table, parents as indices, and a
//! parent-first traversal order. Each entity keeps its own [`SkeletonPose`],
//! the transforms last applied to each limb, and from it the render stack
//! matrices are computed.

mod cache;
mod pose;
mod skeleton;
mod stack;

pub use cache::{PoseCache, PosedSkeleton, SkeletonLibrary};
pub use pose::{LimbPose, SkeletonPose, PIXEL_SCALE, ROOT_ORIGIN_Y};
pub use skeleton::{Skeleton, SkeletonError};
pub use stack::{attachment_transform, draw_transforms};
