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

//! Stable identity tokens for players and world objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Namespace used to derive deterministic ids from names (`EntityId::from_name`).
const ENTITY_NAMESPACE: Uuid = Uuid::from_u128(0x6d65_7461_6d6f_7270_6869_6465_6e74_6974);

/// An opaque, session-independent identity for an entity.
///
/// Unlike an in-memory handle, an `EntityId` survives reconnects: a player who
/// leaves and joins again gets a fresh in-memory body but keeps the same id.
/// Anything that needs to find "the same player later" stores this token and
/// looks the live object up again instead of holding a reference to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Generates a new random id.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derives a deterministic id from a name (e.g. an account name).
    pub fn from_name(name: &str) -> Self {
        Self(Uuid::new_v5(&ENTITY_NAMESPACE, name.as_bytes()))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for EntityId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
