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


mod common;

use approx::assert_relative_eq;
use common::{manager, tag};
use metamorph_core::math::Vec3;
use metamorph_core::EntityId;
use metamorph_sdk::net::{link_pair, FeedbackKind};
use metamorph_sdk::client::PENDING_TIMEOUT_TICKS;
use metamorph_sdk::{MorphClient, MorphConfig, MorphServer, PlayerBody};

fn connect(server: &mut MorphServer, id: EntityId) -> MorphClient {
    let (server_end, client_end) = link_pair();
    assert!(server.join(PlayerBody::new(id, Vec3::ZERO), server_end, None));
    let mut client = MorphClient::new(server.manager().clone(), server.config().clone(), id, client_end);
    client.poll();
    client
}

#[test]
fn kill_pickup_select_action_demorph() {
    let mut server = MorphServer::new(manager(), MorphConfig::default());
    let player = EntityId::new_v4();
    let mut client = connect(&mut server, player);
    assert!(!client.morphing().is_morphed());

    let snapshot = tag(r#"{"UUID": "dead-beef", "Health": 10.0, "ExplosionPower": 1}"#);
    let carrier = server
        .on_creature_killed(player, "Ghast", snapshot.clone(), Vec3::new(0.5, 0.0, 0.0))
        .unwrap();
    assert!(server
        .on_creature_killed(player, "Ghast", snapshot, Vec3::new(0.5, 0.0, 0.0))
        .is_none());

    client.poll();
    assert_relative_eq!(client.carrier(carrier).unwrap().width(), 1.5);

    for _ in 0..30 {
        assert!(server.tick().is_empty());
    }
    let deliveries = server.tick();
    assert_eq!(deliveries.len(), 1);
    assert!(deliveries[0].acquired);
    assert!(server.carriers().is_empty());

    client.poll();
    assert!(client.carrier(carrier).is_none());
    assert_eq!(client.morphing().acquired_morphs().len(), 1);
    assert!(client
        .take_feedback()
        .contains(&(player, FeedbackKind::MorphPickup)));

    assert!(client.request_select(Some(0)));
    assert_eq!(client.pending_selection(), Some(Some(0)));
    assert!(!client.morphing().is_morphed());

    server.tick();
    let body = server.body(player).unwrap();
    assert_relative_eq!(body.width, 4.0);
    assert!(body.may_fly);
    assert_relative_eq!(body.max_health, 10.0);

    client.poll();
    assert_eq!(client.pending_selection(), None);
    assert_eq!(client.current_of(player).map(|m| m.name()), Some("Ghast"));
    assert_relative_eq!(client.body().height, 4.0);

    assert!(client.request_action());
    server.tick();
    let shots = server.body_mut(player).unwrap().drain_projectiles();
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].kind, "fireball");

    assert!(client.request_select(None));
    server.tick();
    client.poll();
    assert!(!client.morphing().is_morphed());
    assert_relative_eq!(client.body().width, 0.6);
    assert_relative_eq!(server.body(player).unwrap().width, 0.6);
    assert!(client.take_feedback().contains(&(player, FeedbackKind::Demorph)));
}

#[test]
fn owned_morphs_drop_no_carrier() {
    let mut server = MorphServer::new(manager(), MorphConfig::default());
    let player = EntityId::new_v4();
    let _client = connect(&mut server, player);

    let pig = server.manager().resolve(&tag(r#"{"Name": "Pig"}"#)).unwrap();
    assert!(server.acquire(player, pig.clone()));
    assert!(!server.acquire(player, pig));

    let dropped = server.on_creature_killed(
        player,
        "Pig",
        tag(r#"{"UUID": "one", "Pos": [4, 5, 6]}"#),
        Vec3::ZERO,
    );
    assert!(dropped.is_none());
    assert!(server
        .on_creature_killed(player, "ArmorStand", tag("{}"), Vec3::ZERO)
        .is_none());

    let config = MorphConfig {
        acquire_on_kill: false,
        ..MorphConfig::default()
    };
    let mut quiet = MorphServer::new(manager(), config);
    let _client = connect(&mut quiet, player);
    assert!(quiet
        .on_creature_killed(player, "Cow", tag("{}"), Vec3::ZERO)
        .is_none());
}

#[test]
fn unowned_selection_is_ignored() {
    let mut server = MorphServer::new(manager(), MorphConfig::default());
    let player = EntityId::new_v4();
    let mut client = connect(&mut server, player);

    assert!(!client.request_select(Some(0)));
    assert!(!server.select_morph(player, Some(3)));
    server.tick();
    assert_eq!(client.poll(), 0);
    assert!(!server.morphing(player).unwrap().is_morphed());
}

#[test]
fn observers_see_each_other() {
    let mut server = MorphServer::new(manager(), MorphConfig::default());
    let alice = EntityId::new_v4();
    let bob = EntityId::new_v4();
    let mut alice_client = connect(&mut server, alice);

    let spider = server.manager().resolve(&tag(r#"{"Name": "Spider"}"#)).unwrap();
    server.acquire(alice, spider);
    assert!(server.select_morph(alice, Some(0)));
    let cow = server.manager().resolve(&tag(r#"{"Name": "Cow"}"#)).unwrap();
    let pending = server.spawn_carrier(alice, cow, Vec3::new(20.0, 0.0, 0.0));

    let mut bob_client = connect(&mut server, bob);
    assert_eq!(bob_client.current_of(alice).map(|m| m.name()), Some("Spider"));
    assert!(bob_client.carrier(pending).is_some());
    assert!(bob_client.morphing().acquired_morphs().is_empty());

    alice_client.poll();
    assert_eq!(alice_client.current_of(bob), None);
    assert_eq!(alice_client.current_of(alice).map(|m| m.name()), Some("Spider"));

    server.select_morph(alice, None);
    bob_client.poll();
    assert_eq!(bob_client.current_of(alice), None);
}

#[test]
fn leaving_and_rejoining_restores_state() {
    let mut server = MorphServer::new(manager(), MorphConfig::default());
    let player = EntityId::new_v4();
    let _client = connect(&mut server, player);

    let robot = server.manager().resolve(&tag(r#"{"Name": "custom:robot"}"#)).unwrap();
    server.acquire(player, robot);
    server.select_morph(player, Some(0));

    let saved = server.leave(player).unwrap();
    assert!(server.body(player).is_none());
    let json = saved.to_json().unwrap();
    let restored = metamorph_data::MorphingData::from_json(&json).unwrap();

    let (server_end, client_end) = link_pair();
    assert!(server.join(PlayerBody::new(player, Vec3::ZERO), server_end, Some(&restored)));
    let body = server.body(player).unwrap();
    assert_relative_eq!(body.height, 2.2);
    assert_relative_eq!(body.speed, 1.5);

    let mut client = MorphClient::new(server.manager().clone(), MorphConfig::default(), player, client_end);
    client.poll();
    assert_eq!(client.morphing().acquired_morphs().len(), 1);
    assert_eq!(client.current_of(player).map(|m| m.name()), Some("custom:robot"));

    let posed = client.pose_local().unwrap();
    assert_eq!(posed.transforms.len(), 3);
    let head = posed.limb("head").unwrap().translation();
    assert_relative_eq!(head.y, (24.0 - 12.0) / 16.0, epsilon = 1e-5);
}

#[test]
fn creative_requests_need_creative_mode() {
    let mut server = MorphServer::new(manager(), MorphConfig::default());
    let player = EntityId::new_v4();
    let mut client = connect(&mut server, player);
    let wolf = server.manager().resolve(&tag(r#"{"Name": "Wolf"}"#)).unwrap();

    client.request_creative_acquire(&wolf);
    server.tick();
    assert!(server.morphing(player).unwrap().acquired_morphs().is_empty());

    server.set_creative(player, true);
    client.request_creative_acquire(&wolf);
    client.request_creative_morph(&wolf);
    server.tick();
    let morphing = server.morphing(player).unwrap();
    assert_eq!(morphing.acquired_morphs().len(), 1);
    assert_eq!(morphing.current_morph().map(|m| m.name()), Some("Wolf"));

    client.poll();
    assert_eq!(client.morphing().acquired_morphs().len(), 1);
    assert_relative_eq!(client.body().speed, 1.2);
}

#[test]
fn demorphed_and_departed_players_are_forgotten() {
    let mut server = MorphServer::new(manager(), MorphConfig::default());
    let alice = EntityId::new_v4();
    let bob = EntityId::new_v4();
    let _alice_client = connect(&mut server, alice);
    let mut bob_client = connect(&mut server, bob);

    let robot = server.manager().resolve(&tag(r#"{"Name": "custom:robot"}"#)).unwrap();
    server.acquire(alice, robot);
    server.select_morph(alice, Some(0));
    bob_client.poll();
    assert!(bob_client.observed_body(alice).is_some());
    assert!(bob_client.pose_player(alice).is_some());
    assert_eq!(bob_client.cached_poses(), 1);

    server.select_morph(alice, None);
    bob_client.poll();
    assert!(bob_client.observed_body(alice).is_none());
    assert!(bob_client.pose_player(alice).is_none());
    assert_eq!(bob_client.cached_poses(), 0);

    server.select_morph(alice, Some(0));
    bob_client.poll();
    assert!(bob_client.pose_player(alice).is_some());
    server.leave(alice);
    bob_client.poll();
    assert!(bob_client.observed_body(alice).is_none());
    assert_eq!(bob_client.current_of(alice), None);
    assert_eq!(bob_client.cached_poses(), 0);
}

#[test]
fn unanswered_selection_expires() {
    let mut server = MorphServer::new(manager(), MorphConfig::default());
    let player = EntityId::new_v4();
    let mut client = connect(&mut server, player);
    let pig = server.manager().resolve(&tag(r#"{"Name": "Pig"}"#)).unwrap();
    server.acquire(player, pig);
    client.poll();

    assert!(client.request_select(Some(0)));
    for _ in 1..PENDING_TIMEOUT_TICKS {
        client.tick();
    }
    assert_eq!(client.pending_selection(), Some(Some(0)));
    client.tick();
    assert_eq!(client.pending_selection(), None);
    assert!(!client.morphing().is_morphed());

    assert!(client.request_select(Some(0)));
    assert_eq!(client.pending_selection(), Some(Some(0)));
}
