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

//! Synchronization between the authoritative side and its observers.
//!
//! Messages travel as MessagePack frames with a one-byte direction tag over
//! ordered in-process links. Each direction of a [`Link`] preserves send
//! order, which is all the client mirror relies on.

mod codec;
mod connection;
mod message;

pub use codec::{CodecError, WireMessage, TAG_CLIENT_MSG, TAG_SERVER_MSG};
pub use connection::{link_pair, ClientLink, Link, ServerLink};
pub use message::{ClientMessage, FeedbackKind, ServerMessage};
