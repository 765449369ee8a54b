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

use super::message::{ClientMessage, ServerMessage};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Leading byte of a server-to-client frame.
pub const TAG_SERVER_MSG: u8 = 0x5E;
/// Leading byte of a client-to-server frame.
pub const TAG_CLIENT_MSG: u8 = 0xC1;

/// Why a frame could not be produced or read.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Zero-length frame.
    #[error("empty frame")]
    Empty,
    /// The leading byte belongs to the other direction or to nothing.
    #[error("unexpected frame tag {found:#04x}, expected {expected:#04x}")]
    UnexpectedTag {
        /// Tag expected for this message type.
        expected: u8,
        /// Tag found.
        found: u8,
    },
    /// Serialization failed.
    #[error("failed to encode frame: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
    /// The body is not a valid message.
    #[error("failed to decode frame: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}

/// A message with a framed wire form: one tag byte, then a MessagePack body.
pub trait WireMessage: Serialize + DeserializeOwned {
    /// Leading byte for this direction.
    const TAG: u8;

    /// Encodes into a fresh frame.
    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let mut out = vec![Self::TAG];
        rmp_serde::encode::write_named(&mut out, self)?;
        Ok(out)
    }

    /// Decodes a frame produced by [`WireMessage::encode`].
    fn decode(frame: &[u8]) -> Result<Self, CodecError> {
        let (&tag, body) = frame.split_first().ok_or(CodecError::Empty)?;
        if tag != Self::TAG {
            return Err(CodecError::UnexpectedTag {
                expected: Self::TAG,
                found: tag,
            });
        }
        Ok(rmp_serde::from_slice(body)?)
    }
}

impl WireMessage for ServerMessage {
    const TAG: u8 = TAG_SERVER_MSG;
}

impl WireMessage for ClientMessage {
    const TAG: u8 = TAG_CLIENT_MSG;
}
