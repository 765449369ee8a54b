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

use super::codec::WireMessage;
use super::message::{ClientMessage, ServerMessage};
use metamorph_core::event::EventBus;
use std::fmt;
use std::marker::PhantomData;

/// One end of an ordered, framed, in-process connection.
///
/// Sends `Out` messages and receives `In` messages. Frames that fail to
/// decode are logged and dropped; they never stall the link.
pub struct Link<Out, In> {
    outbound: flume::Sender<Vec<u8>>,
    inbound: EventBus<Vec<u8>>,
    _marker: PhantomData<fn(Out) -> In>,
}

/// The authoritative side's end.
pub type ServerLink = Link<ServerMessage, ClientMessage>;
/// An observer's end.
pub type ClientLink = Link<ClientMessage, ServerMessage>;

/// Creates a connected pair of ends.
pub fn link_pair() -> (ServerLink, ClientLink) {
    let to_client = EventBus::new();
    let to_server = EventBus::new();
    let server = Link {
        outbound: to_client.sender(),
        inbound: to_server,
        _marker: PhantomData,
    };
    let client = Link {
        outbound: server.inbound.sender(),
        inbound: to_client,
        _marker: PhantomData,
    };
    (server, client)
}

impl<Out: WireMessage, In: WireMessage> Link<Out, In> {
    /// Encodes and queues `message`. Returns `false` if it was dropped.
    pub fn send(&self, message: &Out) -> bool {
        let frame = match message.encode() {
            Ok(frame) => frame,
            Err(e) => {
                log::error!("Link: dropping outbound message: {e}");
                return false;
            }
        };
        if self.outbound.send(frame).is_err() {
            log::debug!("Link: peer disconnected, message dropped");
            return false;
        }
        true
    }

    /// Takes every queued inbound message, in send order.
    pub fn drain(&self) -> Vec<In> {
        self.inbound
            .drain()
            .into_iter()
            .filter_map(|frame| match In::decode(&frame) {
                Ok(message) => Some(message),
                Err(e) => {
                    log::warn!("Link: dropping inbound frame: {e}");
                    None
                }
            })
            .collect()
    }

    /// Queues a raw frame as if the peer had sent it.
    pub fn inject_raw(&self, frame: Vec<u8>) {
        self.inbound.publish(frame);
    }

    /// Number of inbound frames waiting.
    pub fn pending(&self) -> usize {
        self.inbound.len()
    }
}

impl<Out, In> fmt::Debug for Link<Out, In> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Link")
            .field("pending", &self.inbound.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_direction_keeps_order() {
        let (server, client) = link_pair();
        assert!(client.send(&ClientMessage::SelectMorph { index: Some(0) }));
        assert!(client.send(&ClientMessage::Action));
        assert!(client.send(&ClientMessage::SelectMorph { index: None }));

        assert_eq!(
            server.drain(),
            vec![
                ClientMessage::SelectMorph { index: Some(0) },
                ClientMessage::Action,
                ClientMessage::SelectMorph { index: None },
            ]
        );
        assert!(client.drain().is_empty());
    }

    #[test]
    fn garbage_frames_are_skipped() {
        let (server, client) = link_pair();
        server.inject_raw(vec![0x00, 0x01]);
        client.send(&ClientMessage::Action);
        assert_eq!(server.pending(), 2);
        assert_eq!(server.drain(), vec![ClientMessage::Action]);
    }
}
