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

//! The authoritative morph session.

use crate::body::PlayerBody;
use crate::config::MorphConfig;
use crate::net::{ClientMessage, FeedbackKind, ServerLink, ServerMessage};
use metamorph_core::math::Vec3;
use metamorph_core::{EntityId, TagCompound};
use metamorph_data::morph::{ENTITY_DATA_KEY, NAME_KEY};
use metamorph_data::{Morph, MorphCarrier, MorphHolder, MorphManager, Morphing, MorphingData};
use metamorph_lanes::{tick_carriers, update_morphing, CarrierWorld, Delivery, OwnerView};
use std::collections::BTreeMap;
use std::sync::Arc;

struct ServerPlayer {
    body: PlayerBody,
    morphing: Morphing,
    link: ServerLink,
    creative: bool,
}

/// Adapts the player table to the carrier lane.
struct PlayerDirectory<'a> {
    players: &'a mut BTreeMap<EntityId, ServerPlayer>,
}

impl CarrierWorld for PlayerDirectory<'_> {
    fn locate_owner(&self, owner: EntityId) -> Option<OwnerView> {
        self.players
            .get(&owner)
            .filter(|p| p.body.alive)
            .map(|p| OwnerView {
                position: p.body.position,
                width: p.body.width,
            })
    }

    fn deliver(&mut self, owner: EntityId, morph: &Morph) -> bool {
        self.players
            .get_mut(&owner)
            .is_some_and(|p| p.morphing.acquire_morph(morph.clone()))
    }
}

/// Owns every player's morph state and every carrier in the world.
///
/// All mutation happens here; observers only ever see the results through
/// [`ServerMessage`] broadcasts. One [`MorphServer::tick`] drains inbound
/// requests, then runs capabilities, then carriers, then sends notifications.
pub struct MorphServer {
    manager: Arc<MorphManager>,
    config: MorphConfig,
    players: BTreeMap<EntityId, ServerPlayer>,
    carriers: Vec<MorphCarrier>,
    ticks: u64,
}

impl MorphServer {
    /// A server with no players.
    pub fn new(manager: Arc<MorphManager>, config: MorphConfig) -> Self {
        Self {
            manager,
            config,
            players: BTreeMap::new(),
            carriers: Vec::new(),
            ticks: 0,
        }
    }

    /// Adds a player, restoring `saved` state if any. Returns `false` if the
    /// id is already present.
    pub fn join(&mut self, mut body: PlayerBody, link: ServerLink, saved: Option<&MorphingData>) -> bool {
        let id = body.id;
        if self.players.contains_key(&id) {
            log::warn!("MorphServer: player {id} joined twice");
            return false;
        }

        let morphing = saved
            .map(|data| Morphing::from_data(data, &self.manager))
            .unwrap_or_default();
        morphing.reapply(&mut body);

        let data = morphing.to_data();
        link.send(&ServerMessage::MorphingSnapshot {
            current: data.current_morph.clone(),
            acquired: data.acquired_morphs,
        });
        for (other_id, other) in &self.players {
            link.send(&ServerMessage::MorphState {
                player: *other_id,
                morph: other.morphing.current_morph().map(Morph::to_tag),
            });
        }
        for carrier in &self.carriers {
            link.send(&carrier_spawn(carrier));
        }
        self.broadcast(&ServerMessage::MorphState {
            player: id,
            morph: data.current_morph,
        });

        log::info!(
            "MorphServer: player {id} joined with {} morph(s)",
            morphing.acquired_morphs().len()
        );
        self.players.insert(
            id,
            ServerPlayer {
                body,
                morphing,
                link,
                creative: false,
            },
        );
        true
    }

    /// Removes a player and returns the state to persist.
    pub fn leave(&mut self, id: EntityId) -> Option<MorphingData> {
        let player = self.players.remove(&id)?;
        self.broadcast(&ServerMessage::MorphState {
            player: id,
            morph: None,
        });
        log::info!("MorphServer: player {id} left");
        Some(player.morphing.to_data())
    }

    /// Whether creative-mode requests from `id` are honoured.
    pub fn set_creative(&mut self, id: EntityId, creative: bool) {
        if let Some(player) = self.players.get_mut(&id) {
            player.creative = creative;
        }
    }

    /// Takes on the acquired morph at `index`, or demorphs when `None`.
    /// Returns `false` for an unknown player or an index out of range.
    pub fn select_morph(&mut self, id: EntityId, index: Option<usize>) -> bool {
        let Some(player) = self.players.get_mut(&id) else {
            return false;
        };
        let next = match index {
            None => None,
            Some(i) => match player.morphing.acquired_at(i) {
                Some(morph) => Some(morph.clone()),
                None => {
                    log::debug!("MorphServer: {id} selected morph {i} it does not own");
                    return false;
                }
            },
        };
        self.apply_morph(id, next)
    }

    /// Takes on `morph` without acquiring it.
    pub fn morph_directly(&mut self, id: EntityId, morph: Morph) -> bool {
        self.apply_morph(id, Some(morph))
    }

    fn apply_morph(&mut self, id: EntityId, morph: Option<Morph>) -> bool {
        let Some(player) = self.players.get_mut(&id) else {
            return false;
        };
        let tag = morph.as_ref().map(Morph::to_tag);
        let kind = if morph.is_some() {
            FeedbackKind::Morph
        } else {
            FeedbackKind::Demorph
        };
        player.morphing.set_current_morph(morph, &mut player.body);
        log::debug!(
            "MorphServer: {id} is now {}",
            player.morphing.current_morph().map_or("themselves", Morph::name)
        );
        self.broadcast(&ServerMessage::MorphState {
            player: id,
            morph: tag,
        });
        self.broadcast(&ServerMessage::Feedback { player: id, kind });
        true
    }

    /// Adds `morph` to a player's acquired list and notifies them. Returns
    /// `false` if they already own it.
    pub fn acquire(&mut self, id: EntityId, morph: Morph) -> bool {
        let Some(player) = self.players.get_mut(&id) else {
            return false;
        };
        let tag = morph.to_tag();
        if !player.morphing.acquire_morph(morph) {
            return false;
        }
        player.link.send(&ServerMessage::AcquireMorph { morph: tag });
        true
    }

    /// Fires the current morph's action for `id`.
    pub fn action(&mut self, id: EntityId) -> bool {
        let Some(player) = self.players.get_mut(&id) else {
            return false;
        };
        if !player.morphing.action(&mut player.body) {
            return false;
        }
        self.broadcast(&ServerMessage::Feedback {
            player: id,
            kind: FeedbackKind::Action,
        });
        true
    }

    /// Lets `attacker`'s morph strike `target`, a creature the host owns.
    pub fn attack(&mut self, attacker: EntityId, target: &mut dyn MorphHolder) -> bool {
        let Some(player) = self.players.get_mut(&attacker) else {
            return false;
        };
        if !player.morphing.is_morphed() {
            return false;
        }
        player.morphing.attack(target, &mut player.body);
        true
    }

    /// Drops a carrier holding `morph` for `owner` and announces it.
    pub fn spawn_carrier(&mut self, owner: EntityId, morph: Morph, position: Vec3) -> EntityId {
        let carrier = MorphCarrier::new(
            EntityId::new_v4(),
            owner,
            morph,
            position,
            self.config.carrier_grace_ticks,
            self.config.carrier_max_size(),
        );
        let id = carrier.id();
        log::debug!(
            "MorphServer: carrier {id} with '{}' dropped for {owner}",
            carrier.morph().name()
        );
        self.broadcast(&carrier_spawn(&carrier));
        self.carriers.push(carrier);
        id
    }

    /// Reacts to `killer` killing a creature. Drops a carrier when the
    /// killer does not own that morph yet and none is already on its way.
    pub fn on_creature_killed(
        &mut self,
        killer: EntityId,
        type_id: &str,
        snapshot: TagCompound,
        position: Vec3,
    ) -> Option<EntityId> {
        if !self.config.acquire_on_kill {
            return None;
        }
        let player = self.players.get(&killer)?;

        let mut tag = TagCompound::new();
        tag.set(NAME_KEY, type_id);
        tag.set_compound(ENTITY_DATA_KEY, snapshot);
        let morph = self.manager.resolve(&tag)?;

        if player.morphing.has_acquired(&morph) {
            return None;
        }
        let pending = self
            .carriers
            .iter()
            .any(|c| c.owner() == killer && c.morph() == &morph);
        if pending {
            return None;
        }
        Some(self.spawn_carrier(killer, morph, position))
    }

    /// Advances the session one tick. Returns the carriers that reached
    /// their owners.
    pub fn tick(&mut self) -> Vec<Delivery> {
        self.ticks += 1;

        let ids: Vec<EntityId> = self.players.keys().copied().collect();
        for id in ids {
            let requests = match self.players.get(&id) {
                Some(player) => player.link.drain(),
                None => continue,
            };
            for request in requests {
                self.handle(id, request);
            }
        }

        let morphed = update_morphing(
            self.players
                .values_mut()
                .map(|p| (&mut p.morphing, &mut p.body)),
        );

        let rules = self.config.carrier_rules();
        let mut directory = PlayerDirectory {
            players: &mut self.players,
        };
        let deliveries = tick_carriers(&mut self.carriers, &mut directory, &rules);

        for delivery in &deliveries {
            if delivery.acquired {
                if let Some(owner) = self.players.get(&delivery.owner) {
                    owner.link.send(&ServerMessage::AcquireMorph {
                        morph: delivery.morph.to_tag(),
                    });
                }
                self.broadcast(&ServerMessage::Feedback {
                    player: delivery.owner,
                    kind: FeedbackKind::MorphPickup,
                });
            }
            self.broadcast(&ServerMessage::CarrierDespawn {
                carrier: delivery.carrier,
            });
        }

        log::trace!(
            "MorphServer: tick {} ({} morphed, {} carriers)",
            self.ticks,
            morphed,
            self.carriers.len()
        );
        deliveries
    }

    fn handle(&mut self, id: EntityId, request: ClientMessage) {
        let honoured = match request {
            ClientMessage::SelectMorph { index } => {
                self.select_morph(id, index.map(|i| i as usize))
            }
            ClientMessage::Action => self.action(id),
            ClientMessage::CreativeMorph { morph } => match self.creative_morph(id, &morph) {
                Some(morph) => self.morph_directly(id, morph),
                None => false,
            },
            ClientMessage::CreativeAcquire { morph } => match self.creative_morph(id, &morph) {
                Some(morph) => self.acquire(id, morph),
                None => false,
            },
        };
        if !honoured {
            log::debug!("MorphServer: request from {id} ignored");
        }
    }

    fn creative_morph(&self, id: EntityId, tag: &TagCompound) -> Option<Morph> {
        let creative = self.players.get(&id).is_some_and(|p| p.creative);
        if !(creative && self.config.allow_creative_morphing) {
            return None;
        }
        self.manager.resolve(tag)
    }

    fn broadcast(&self, message: &ServerMessage) {
        for player in self.players.values() {
            player.link.send(message);
        }
    }

    /// A player's body.
    pub fn body(&self, id: EntityId) -> Option<&PlayerBody> {
        self.players.get(&id).map(|p| &p.body)
    }

    /// A player's body, for the host to move.
    pub fn body_mut(&mut self, id: EntityId) -> Option<&mut PlayerBody> {
        self.players.get_mut(&id).map(|p| &mut p.body)
    }

    /// A player's morph state.
    pub fn morphing(&self, id: EntityId) -> Option<&Morphing> {
        self.players.get(&id).map(|p| &p.morphing)
    }

    /// Carriers still in the world.
    pub fn carriers(&self) -> &[MorphCarrier] {
        &self.carriers
    }

    /// Ids of the connected players.
    pub fn players(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.players.keys().copied()
    }

    /// The shared registry.
    pub fn manager(&self) -> &Arc<MorphManager> {
        &self.manager
    }

    /// Session tuning.
    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

fn carrier_spawn(carrier: &MorphCarrier) -> ServerMessage {
    ServerMessage::CarrierSpawn {
        carrier: carrier.id(),
        owner: carrier.owner(),
        position: carrier.position(),
        morph: carrier.morph().to_tag(),
    }
}
