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

//! Error types for morph construction and resolution.

use metamorph_core::TagError;
use thiserror::Error;

/// Why a morph could not be built from its tag record.
///
/// None of these are fatal to the simulation: the registry logs them and
/// callers degrade to "no morph".
#[derive(Debug, Error)]
pub enum MorphError {
    /// The tag record has no `Name` field.
    #[error("morph tag has no `Name` field")]
    MissingName,
    /// No registered factory claims the name.
    #[error("no factory claims morph `{0}`")]
    UnknownMorph(String),
    /// The creature kind is unknown or not a living creature.
    #[error("`{0}` is not a known living creature kind")]
    UnknownCreature(String),
    /// The referenced skeletal model is not registered.
    #[error("model `{0}` is not registered")]
    UnknownModel(String),
    /// The payload is present but cannot be interpreted.
    #[error("malformed payload for `{name}`: {reason}")]
    MalformedPayload {
        /// The morph name.
        name: String,
        /// What was wrong with it.
        reason: String,
    },
    /// A catalog variant's override data could not be parsed.
    #[error("malformed override data for `{name}`: {source}")]
    MalformedOverride {
        /// The morph name the override was meant for.
        name: String,
        /// The underlying parse error.
        #[source]
        source: TagError,
    },
}
