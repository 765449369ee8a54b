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

use metamorph_core::math::Vec3;
use metamorph_core::{EntityId, TagCompound};
use serde::{Deserialize, Serialize};

/// Requests from an observer to the authoritative side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClientMessage {
    /// Take on the acquired morph at `index`, or demorph when `None`.
    SelectMorph {
        /// Index into the acquired list.
        index: Option<u32>,
    },
    /// Trigger the current morph's action.
    Action,
    /// Creative mode: take on a morph directly.
    CreativeMorph {
        /// Tag form of the morph.
        morph: TagCompound,
    },
    /// Creative mode: acquire a morph directly.
    CreativeAcquire {
        /// Tag form of the morph.
        morph: TagCompound,
    },
}

/// Audio-visual cue kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackKind {
    /// A carrier reached its owner.
    MorphPickup,
    /// A player took on a morph.
    Morph,
    /// A player returned to their own form.
    Demorph,
    /// A morph action fired.
    Action,
}

/// Broadcasts from the authoritative side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ServerMessage {
    /// `player`'s current morph changed. Sent to every observer.
    MorphState {
        /// Whose state.
        player: EntityId,
        /// New current morph, `None` when demorphed.
        morph: Option<TagCompound>,
    },
    /// The receiving player acquired a morph.
    AcquireMorph {
        /// Tag form of the morph.
        morph: TagCompound,
    },
    /// Full state of the receiving player, sent on join.
    MorphingSnapshot {
        /// Current morph.
        current: Option<TagCompound>,
        /// Acquired morphs in acquisition order.
        acquired: Vec<TagCompound>,
    },
    /// A carrier entered the world.
    CarrierSpawn {
        /// Carrier identity.
        carrier: EntityId,
        /// Owner identity.
        owner: EntityId,
        /// Spawn position.
        position: Vec3,
        /// Tag form of the carried morph.
        morph: TagCompound,
    },
    /// A carrier left the world.
    CarrierDespawn {
        /// Carrier identity.
        carrier: EntityId,
    },
    /// Play a cue at `player`.
    Feedback {
        /// Where the cue plays.
        player: EntityId,
        /// Which cue.
        kind: FeedbackKind,
    },
}
