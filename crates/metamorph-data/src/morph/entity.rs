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

use metamorph_core::TagCompound;

/// Attribute keys that describe one particular creature instance rather than
/// its kind. They are removed from every snapshot before it is stored so that
/// two snapshots of the same kind taken at different times compare equal.
pub const SESSION_FIELDS: &[&str] = &[
    "id",
    "UUID",
    "UUIDMost",
    "UUIDLeast",
    "Pos",
    "Motion",
    "Rotation",
    "FallDistance",
    "Fire",
    "Air",
    "OnGround",
    "Dimension",
    "PortalCooldown",
    "HurtTime",
    "HurtByTimestamp",
    "DeathTime",
    "Health",
];

/// Removes [`SESSION_FIELDS`] from a creature snapshot.
pub fn strip_session_fields(data: &mut TagCompound) {
    for key in SESSION_FIELDS {
        data.remove(key);
    }
}

/// A morph wrapping the attribute snapshot of a living creature.
///
/// The creature kind is the morph's name; the snapshot is the payload. The
/// collision box is resolved once when the morph is built.
#[derive(Debug, Clone)]
pub struct EntityMorph {
    data: TagCompound,
    width: f32,
    height: f32,
}

impl EntityMorph {
    /// Wraps a snapshot, stripping its session fields.
    pub fn new(mut data: TagCompound, width: f32, height: f32) -> Self {
        strip_session_fields(&mut data);
        Self {
            data,
            width,
            height,
        }
    }

    /// The stripped attribute snapshot.
    pub fn data(&self) -> &TagCompound {
        &self.data
    }

    /// Collision width of the wrapped creature.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Collision height of the wrapped creature.
    pub fn height(&self) -> f32 {
        self.height
    }
}
