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

//! The observing side of a morph session.

use crate::body::PlayerBody;
use crate::config::MorphConfig;
use crate::net::{ClientLink, ClientMessage, FeedbackKind, ServerMessage};
use metamorph_core::math::Vec3;
use metamorph_core::{EntityId, TagCompound};
use metamorph_data::{Morph, MorphCarrier, MorphManager, Morphing};
use metamorph_lanes::{PoseCache, PosedSkeleton, SkeletonLibrary};
use std::collections::HashMap;
use std::sync::Arc;

/// Client ticks a selection may wait for confirmation. The server ignores
/// invalid requests without answering, so an unanswered prediction expires.
pub const PENDING_TIMEOUT_TICKS: u32 = 40;

/// A selection sent and not yet confirmed.
#[derive(Debug, Clone, Copy)]
struct PendingSelection {
    index: Option<usize>,
    age: u32,
}

/// Another player as last broadcast.
#[derive(Debug)]
struct Observed {
    body: PlayerBody,
    morphing: Morphing,
}

/// Mirrors the authoritative state for one local player.
///
/// Only broadcasts change the mirror. A selection requested locally is
/// remembered as pending until the next state broadcast for the local
/// player arrives, so prediction never overwrites confirmed state. A request
/// the server rejected gets no broadcast; its prediction is dropped after
/// [`PENDING_TIMEOUT_TICKS`] calls to [`MorphClient::tick`].
pub struct MorphClient {
    manager: Arc<MorphManager>,
    config: MorphConfig,
    link: ClientLink,
    body: PlayerBody,
    morphing: Morphing,
    pending_selection: Option<PendingSelection>,
    others: HashMap<EntityId, Observed>,
    carriers: HashMap<EntityId, MorphCarrier>,
    skeletons: SkeletonLibrary,
    poses: PoseCache,
    feedback: Vec<(EntityId, FeedbackKind)>,
}

impl MorphClient {
    /// A client for player `local`. Skeletons are compiled from the
    /// manager's presentation phase, if it ran.
    pub fn new(manager: Arc<MorphManager>, config: MorphConfig, local: EntityId, link: ClientLink) -> Self {
        let skeletons = match manager.presentation() {
            Some(presentation) => SkeletonLibrary::compile_all(presentation.models()),
            None => {
                log::warn!("MorphClient: presentation phase has not run, no skeletons");
                SkeletonLibrary::new()
            }
        };
        Self {
            manager,
            config,
            link,
            body: PlayerBody::remote_view(local, Vec3::ZERO),
            morphing: Morphing::new(),
            pending_selection: None,
            others: HashMap::new(),
            carriers: HashMap::new(),
            skeletons,
            poses: PoseCache::new(),
            feedback: Vec::new(),
        }
    }

    /// Asks to take on the acquired morph at `index`, or to demorph.
    /// Returns `false` without sending when the index is out of range.
    pub fn request_select(&mut self, index: Option<usize>) -> bool {
        let wire_index = match index {
            None => None,
            Some(i) if i < self.morphing.acquired_morphs().len() => match u32::try_from(i) {
                Ok(i) => Some(i),
                Err(_) => return false,
            },
            Some(_) => return false,
        };
        if !self.link.send(&ClientMessage::SelectMorph { index: wire_index }) {
            return false;
        }
        self.pending_selection = Some(PendingSelection { index, age: 0 });
        true
    }

    /// Asks to fire the current morph's action.
    pub fn request_action(&self) -> bool {
        self.morphing.is_morphed() && self.link.send(&ClientMessage::Action)
    }

    /// Creative mode: asks to take on `morph` directly.
    pub fn request_creative_morph(&self, morph: &Morph) -> bool {
        self.link.send(&ClientMessage::CreativeMorph {
            morph: morph.to_tag(),
        })
    }

    /// Creative mode: asks to acquire `morph` directly.
    pub fn request_creative_acquire(&self, morph: &Morph) -> bool {
        self.link.send(&ClientMessage::CreativeAcquire {
            morph: morph.to_tag(),
        })
    }

    /// Applies every queued broadcast. Returns how many were applied.
    pub fn poll(&mut self) -> usize {
        let messages = self.link.drain();
        let count = messages.len();
        for message in messages {
            self.apply(message);
        }
        count
    }

    fn apply(&mut self, message: ServerMessage) {
        match message {
            ServerMessage::MorphState { player, morph } => {
                let morph = self.resolve_optional(morph.as_ref());
                if player == self.body.id {
                    self.morphing.set_current_morph(morph, &mut self.body);
                    self.pending_selection = None;
                } else if morph.is_none() {
                    // Demorphed or gone: nothing left to draw for them.
                    self.others.remove(&player);
                    self.poses.forget(player);
                } else {
                    let observed = self.others.entry(player).or_insert_with(|| Observed {
                        body: PlayerBody::remote_view(player, Vec3::ZERO),
                        morphing: Morphing::new(),
                    });
                    observed.morphing.set_current_morph(morph, &mut observed.body);
                }
            }
            ServerMessage::AcquireMorph { morph } => {
                if let Some(morph) = self.resolve(&morph) {
                    self.morphing.acquire_morph(morph);
                }
            }
            ServerMessage::MorphingSnapshot { current, acquired } => {
                let acquired = acquired.iter().filter_map(|tag| self.resolve(tag)).collect();
                let current = self.resolve_optional(current.as_ref());
                self.morphing = Morphing::from_parts(None, acquired);
                self.morphing.set_current_morph(current, &mut self.body);
                self.pending_selection = None;
            }
            ServerMessage::CarrierSpawn {
                carrier,
                owner,
                position,
                morph,
            } => {
                let Some(morph) = self.resolve(&morph) else {
                    return;
                };
                let carrier = MorphCarrier::new(
                    carrier,
                    owner,
                    morph,
                    position,
                    self.config.carrier_grace_ticks,
                    self.config.carrier_max_size(),
                );
                self.poses.pose_carrier(&carrier, &self.skeletons);
                self.carriers.insert(carrier.id(), carrier);
            }
            ServerMessage::CarrierDespawn { carrier } => {
                self.carriers.remove(&carrier);
                self.poses.forget(carrier);
            }
            ServerMessage::Feedback { player, kind } => self.feedback.push((player, kind)),
        }
    }

    fn resolve(&self, tag: &TagCompound) -> Option<Morph> {
        self.manager.resolve(tag)
    }

    fn resolve_optional(&self, tag: Option<&TagCompound>) -> Option<Morph> {
        tag.and_then(|tag| self.resolve(tag))
    }

    /// Advances local animation one tick: carrier spawn growth and the
    /// local morph's abilities.
    pub fn tick(&mut self) {
        if let Some(pending) = self.pending_selection.as_mut() {
            pending.age += 1;
        }
        if let Some(pending) = self.pending_selection {
            if pending.age >= PENDING_TIMEOUT_TICKS {
                log::debug!("MorphClient: selection {:?} never confirmed", pending.index);
                self.pending_selection = None;
            }
        }
        for carrier in self.carriers.values_mut() {
            carrier.tick_timer();
        }
        self.morphing.update(&mut self.body);
    }

    /// Poses the local player's morph, if it is skeletal.
    pub fn pose_local(&mut self) -> Option<PosedSkeleton> {
        let morph = self.morphing.current_morph()?;
        self.poses.pose_holder(&self.body, morph, &self.skeletons)
    }

    /// Poses another player's morph, if it is skeletal.
    pub fn pose_player(&mut self, player: EntityId) -> Option<PosedSkeleton> {
        let observed = self.others.get(&player)?;
        let morph = observed.morphing.current_morph()?;
        self.poses.pose_holder(&observed.body, morph, &self.skeletons)
    }

    /// Poses a carrier's morph, if it is skeletal.
    pub fn pose_carrier(&mut self, carrier: EntityId) -> Option<PosedSkeleton> {
        let carrier = self.carriers.get(&carrier)?;
        self.poses.pose_carrier(carrier, &self.skeletons)
    }

    /// Takes the cues received since the last call.
    pub fn take_feedback(&mut self) -> Vec<(EntityId, FeedbackKind)> {
        std::mem::take(&mut self.feedback)
    }

    /// The local player's id.
    pub fn local_id(&self) -> EntityId {
        self.body.id
    }

    /// The local player's mirrored body.
    pub fn body(&self) -> &PlayerBody {
        &self.body
    }

    /// The local player's mirrored body, for the host to move.
    pub fn body_mut(&mut self) -> &mut PlayerBody {
        &mut self.body
    }

    /// Confirmed state of the local player.
    pub fn morphing(&self) -> &Morphing {
        &self.morphing
    }

    /// The selection awaiting confirmation, if any.
    pub fn pending_selection(&self) -> Option<Option<usize>> {
        self.pending_selection.map(|p| p.index)
    }

    /// Confirmed current morph of any observed player.
    pub fn current_of(&self, player: EntityId) -> Option<&Morph> {
        if player == self.body.id {
            return self.morphing.current_morph();
        }
        self.others.get(&player)?.morphing.current_morph()
    }

    /// Entities with cached pose state.
    pub fn cached_poses(&self) -> usize {
        self.poses.len()
    }

    /// The mirrored body of another player.
    pub fn observed_body(&self, player: EntityId) -> Option<&PlayerBody> {
        self.others.get(&player).map(|o| &o.body)
    }

    /// Carriers currently known.
    pub fn carriers(&self) -> impl Iterator<Item = &MorphCarrier> {
        self.carriers.values()
    }

    /// A known carrier.
    pub fn carrier(&self, id: EntityId) -> Option<&MorphCarrier> {
        self.carriers.get(&id)
    }

    /// Compiled skeletons.
    pub fn skeletons(&self) -> &SkeletonLibrary {
        &self.skeletons
    }

    /// Label to show for `morph`.
    pub fn display_name(&self, morph: &Morph) -> String {
        self.manager.display_name(morph.name())
    }
}
