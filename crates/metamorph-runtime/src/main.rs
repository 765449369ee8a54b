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

//! Headless harness: runs one scripted morph session and logs what happens.
//!
//! Usage: `metamorph-runtime [config.ron]`

mod demo;

use anyhow::{bail, Context, Result};
use metamorph_core::math::Vec3;
use metamorph_core::{EntityId, TagCompound};
use metamorph_sdk::net::link_pair;
use metamorph_sdk::{CustomMorphFactory, MorphClient, MorphConfig, MorphServer, PlayerBody};

/// Upper bound on ticks spent waiting for a carrier.
const MAX_PICKUP_TICKS: u32 = 600;

fn main() -> Result<()> {
    metamorph_sdk::logging::init("info");

    let config = match std::env::args().nth(1) {
        Some(path) => MorphConfig::load(&path)?,
        None => MorphConfig::default(),
    };
    log::info!("Config: {config:?}");

    let manager = demo::manager();
    log::info!(
        "Registry: {} factories, {} morph names",
        manager.len(),
        manager.morphs().len()
    );

    let mut server = MorphServer::new(manager.clone(), config.clone());
    let player = EntityId::from_name("steve");
    let (server_end, client_end) = link_pair();
    server.join(PlayerBody::new(player, Vec3::ZERO), server_end, None);
    let mut client = MorphClient::new(manager, config, player, client_end);
    client.poll();

    // Kill a blaze two blocks away and wait for the carrier to reach us.
    let snapshot = TagCompound::from_json_str(r#"{"UUID": "blaze-1", "Health": 20.0, "Fire": 0}"#)
        .context("Bad demo snapshot")?;
    let Some(carrier) = server.on_creature_killed(player, "Blaze", snapshot, Vec3::new(2.0, 0.0, 0.0)) else {
        bail!("No carrier dropped for the blaze");
    };
    log::info!("Carrier {carrier} dropped");

    let mut ticks = 0;
    while server.carriers().iter().any(|c| c.id() == carrier) {
        ticks += 1;
        if ticks > MAX_PICKUP_TICKS {
            bail!("Carrier never reached its owner");
        }
        for delivery in server.tick() {
            log::info!(
                "Tick {ticks}: '{}' delivered (new: {})",
                delivery.morph.name(),
                delivery.acquired
            );
        }
        client.poll();
        client.tick();
    }

    // Take on the blaze and fire.
    step(&mut server, &mut client, |c| c.request_select(Some(0)))?;
    let body = client.body();
    log::info!(
        "Morphed into {}: {}x{} may_fly={}",
        client.display_name(client.morphing().current_morph().context("Select not applied")?),
        body.width,
        body.height,
        body.may_fly
    );
    step(&mut server, &mut client, |c| c.request_action())?;
    if let Some(body) = server.body_mut(player) {
        for shot in body.drain_projectiles() {
            log::info!("Projectile '{}' from {:?} along {:?}", shot.kind, shot.origin, shot.direction);
        }
    }

    // Grant the golem directly and pose it.
    let golem = server
        .manager()
        .resolve(&name_tag(&CustomMorphFactory::morph_name(demo::GOLEM)))
        .context("Golem did not resolve")?;
    server.acquire(player, golem);
    step(&mut server, &mut client, |c| c.request_select(Some(1)))?;
    log_pose(&mut client, "standing");

    client.body_mut().sneaking = true;
    log_pose(&mut client, "sneaking");

    step(&mut server, &mut client, |c| c.request_select(None))?;
    log::info!("Back to normal: {}x{}", client.body().width, client.body().height);
    for (who, kind) in client.take_feedback() {
        log::debug!("Feedback {kind:?} at {who}");
    }

    let saved = server.leave(player).context("Player vanished")?;
    log::info!("Saved state: {}", saved.to_json()?);
    Ok(())
}

/// Sends one request, runs one tick and applies the broadcasts.
fn step(
    server: &mut MorphServer,
    client: &mut MorphClient,
    request: impl FnOnce(&mut MorphClient) -> bool,
) -> Result<()> {
    if !request(client) {
        bail!("Request refused locally");
    }
    server.tick();
    client.poll();
    client.tick();
    Ok(())
}

fn name_tag(name: &str) -> TagCompound {
    let mut tag = TagCompound::new();
    tag.set("Name", name);
    tag
}

fn log_pose(client: &mut MorphClient, label: &str) {
    let Some(posed) = client.pose_local() else {
        log::warn!("Nothing to pose ({label})");
        return;
    };
    for (i, transform) in posed.transforms.iter().enumerate() {
        let name = posed.skeleton.limb_name(i).unwrap_or("?");
        log::info!("{label}: {name} at {:?}", transform.translation());
    }
}
