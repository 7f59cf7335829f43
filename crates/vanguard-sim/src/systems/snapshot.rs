//! Snapshot system: queries the ECS world and builds a `WorldSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::{Entity, World};

use vanguard_core::components::*;
use vanguard_core::constants::POWER_BUDGET;
use vanguard_core::enums::{AlertLevel, SubsystemKind};
use vanguard_core::events::SimEvent;
use vanguard_core::state::*;
use vanguard_core::types::{Position, SimTime};

use crate::systems::movement::effective_velocity;

/// Build a complete snapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    alert: AlertLevel,
    waypoint: Option<Position>,
    player: Option<Entity>,
    events: Vec<SimEvent>,
) -> WorldSnapshot {
    WorldSnapshot {
        time: *time,
        alert,
        paused: false,
        waypoint,
        ships: build_ships(world),
        torpedoes: build_torpedoes(world),
        beams: build_beams(world),
        helm: player.and_then(|p| build_helm(world, p, waypoint)),
        events,
    }
}

type ShipQuery<'a> = (
    &'a Ship,
    &'a Position,
    &'a Helm,
    &'a Hull,
    &'a Shields,
    &'a Subsystems,
    &'a Targeting,
    Option<&'a NpcBrain>,
    Option<&'a PlayerShip>,
    Option<&'a RepairBay>,
);

/// All ships ordered by id.
pub fn build_ships(world: &World) -> Vec<ShipView> {
    let mut query = world.query::<ShipQuery<'_>>();
    let mut ships: Vec<ShipView> = query.iter().map(|(_, item)| ship_view(item)).collect();
    ships.sort_by_key(|s| s.id);
    ships
}

/// A single ship's view, if `entity` is a live ship.
pub fn build_ship(world: &World, entity: Entity) -> Option<ShipView> {
    let mut query = world.query_one::<ShipQuery<'_>>(entity).ok()?;
    let view = query.get().map(ship_view);
    view
}

fn ship_view(
    (ship, pos, helm, hull, shields, subsystems, targeting, brain, player, bay): (
        &Ship,
        &Position,
        &Helm,
        &Hull,
        &Shields,
        &Subsystems,
        &Targeting,
        Option<&NpcBrain>,
        Option<&PlayerShip>,
        Option<&RepairBay>,
    ),
) -> ShipView {
    let is_player = player.is_some();
    let display_name = if ship.scanned || is_player {
        ship.name.clone()
    } else {
        format!("Contact {}", ship.id)
    };

    let subsystem_views = SubsystemKind::ALL
        .iter()
        .map(|&kind| {
            let s = subsystems.get(kind);
            SubsystemView {
                system: kind,
                hp: s.hp,
                power: s.power,
                effectiveness: s.effectiveness(),
                repair_cooldown: bay.map_or(0, |b| b.cooldowns[kind.index()]),
            }
        })
        .collect();

    ShipView {
        id: ship.id,
        name: ship.name.clone(),
        display_name,
        class: ship.class.clone(),
        faction: ship.faction,
        is_player,
        position: *pos,
        heading: helm.heading,
        velocity: helm.velocity,
        effective_velocity: effective_velocity(helm, subsystems),
        max_velocity: helm.max_velocity,
        hull: hull.current,
        max_hull: hull.max,
        shields: shields.strength,
        max_shields: shields.max,
        subsystems: subsystem_views,
        behavior: brain.map(|b| b.behavior),
        target: targeting.target,
        scanned: ship.scanned,
        destroyed: player.is_some_and(|p| p.destroyed),
        collision_radius: ship.collision_radius,
    }
}

fn build_torpedoes(world: &World) -> Vec<TorpedoView> {
    let mut query = world.query::<(&Torpedo, &Position)>();
    let mut torpedoes: Vec<TorpedoView> = query
        .iter()
        .map(|(_, (t, pos))| TorpedoView {
            id: t.id,
            position: *pos,
            heading: t.heading,
            owner: t.owner,
            target: t.target,
            lifetime_ticks: t.lifetime_ticks,
        })
        .collect();
    torpedoes.sort_by_key(|t| t.id);
    torpedoes
}

fn build_beams(world: &World) -> Vec<BeamView> {
    let mut query = world.query::<&Beam>();
    let beams: Vec<BeamView> = query
        .iter()
        .map(|(_, b)| BeamView {
            owner: b.owner,
            origin: b.origin,
            target: b.target,
            lifetime_ticks: b.lifetime_ticks,
        })
        .collect();
    beams
}

/// Distance from the player to the waypoint.
pub fn waypoint_distance(world: &World, player: Entity, waypoint: Option<Position>) -> Option<f64> {
    let waypoint = waypoint?;
    let pos = world.get::<&Position>(player).ok()?;
    Some(pos.distance_to(&waypoint))
}

/// Ticks to the waypoint at the current effective velocity. `None` when
/// stopped or without a waypoint.
pub fn waypoint_eta(world: &World, player: Entity, waypoint: Option<Position>) -> Option<f64> {
    let distance = waypoint_distance(world, player, waypoint)?;
    let speed = {
        let helm = world.get::<&Helm>(player).ok()?;
        let subsystems = world.get::<&Subsystems>(player).ok()?;
        effective_velocity(&helm, &subsystems)
    };
    (speed > 0.0).then(|| distance / speed)
}

fn build_helm(world: &World, player: Entity, waypoint: Option<Position>) -> Option<HelmView> {
    let total_power = world.get::<&Subsystems>(player).ok()?.total_power();
    let cooldowns = world
        .get::<&WeaponCooldowns>(player)
        .map(|c| *c)
        .unwrap_or_default();
    Some(HelmView {
        waypoint_distance: waypoint_distance(world, player, waypoint),
        waypoint_eta: waypoint_eta(world, player, waypoint),
        total_power,
        power_over_budget: total_power > POWER_BUDGET,
        phaser_cooldown: cooldowns.phaser,
        torpedo_cooldown: cooldowns.torpedo,
    })
}
