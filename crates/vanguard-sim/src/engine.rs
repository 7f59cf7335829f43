//! Simulation engine: the World Model, its command surface, and the tick.
//!
//! `SimulationEngine` owns the hecs world, the RNG, the alert level, the
//! waypoint and the event bus. Collaborators read through accessors and
//! snapshots and mutate only through the command methods below. Completely
//! headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use vanguard_core::commands::PlayerCommand;
use vanguard_core::components::*;
use vanguard_core::constants::*;
use vanguard_core::enums::{AlertLevel, SubsystemKind, WeaponKind};
use vanguard_core::errors::CommandError;
use vanguard_core::events::{EventKind, SimEvent};
use vanguard_core::roster::ShipSpec;
use vanguard_core::state::{ShipView, WorldSnapshot};
use vanguard_core::types::{normalize_heading, Position, ShipId, SimTime};

use crate::event_bus::{EventBus, SubscriptionId};
use crate::scenario::Scenario;
use crate::systems;
use crate::systems::hails::HailSchedule;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Ticks per second of real time.
    pub tick_rate: u32,
    /// Most ticks one clock frame may run.
    pub max_catch_up_ticks: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_rate: TICK_RATE,
            max_catch_up_ticks: MAX_CATCH_UP_TICKS,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    config: SimConfig,
    rng: Box<dyn RngCore + Send>,
    alert: AlertLevel,
    waypoint: Option<Position>,
    player: Option<Entity>,
    next_ship_id: u32,
    next_torpedo_id: u32,
    hails: HailSchedule,
    bus: EventBus,
    /// Events raised by systems, not yet published.
    pending_events: Vec<SimEvent>,
    /// Events published since the last snapshot, oldest dropped past
    /// `FRAME_EVENT_CAPACITY`.
    frame_events: VecDeque<SimEvent>,
    despawn_buffer: Vec<Entity>,
}

impl SimulationEngine {
    /// Create an empty world seeded from `config`.
    pub fn new(config: SimConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }

    /// Create an empty world drawing randomness from `rng`.
    pub fn with_rng(config: SimConfig, rng: impl RngCore + Send + 'static) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            config,
            rng: Box::new(rng),
            alert: AlertLevel::default(),
            waypoint: None,
            player: None,
            next_ship_id: 0,
            next_torpedo_id: 0,
            hails: HailSchedule::default(),
            bus: EventBus::new(),
            pending_events: Vec::new(),
            frame_events: VecDeque::new(),
            despawn_buffer: Vec::new(),
        }
    }

    /// Create a world populated from a scenario.
    pub fn from_scenario(config: SimConfig, scenario: &Scenario) -> Self {
        let mut engine = Self::new(config);
        engine.load_scenario(scenario);
        engine
    }

    /// Populate the world: player first, then NPCs in roster order.
    pub fn load_scenario(&mut self, scenario: &Scenario) {
        self.spawn_player(&scenario.player);
        for spec in &scenario.npcs {
            self.add_ship(spec.clone());
        }
        if let Some(wp) = scenario.waypoint {
            self.set_waypoint(wp.x, wp.y);
        }
        self.set_alert_level(scenario.alert);
        info!(
            scenario = %scenario.name,
            npcs = scenario.npcs.len(),
            "scenario loaded"
        );
    }

    // --- Events ---

    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&SimEvent) + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe(kind, handler)
    }

    pub fn subscribe_all(&mut self, handler: impl FnMut(&SimEvent) + 'static) -> SubscriptionId {
        self.bus.subscribe_all(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    // --- Roster ---

    /// Create the player ship. Only one may exist; a second call returns
    /// the existing id.
    pub fn spawn_player(&mut self, spec: &ShipSpec) -> ShipId {
        if let Some(id) = self.player_id() {
            debug_assert!(false, "player ship already spawned");
            return id;
        }
        let id = self.allocate_ship_id();
        let entity = world_setup::spawn_ship(&mut self.world, id, spec, true);
        self.player = Some(entity);
        self.pending_events.push(SimEvent::ShipAdded {
            ship_id: id,
            name: spec.name.clone(),
            faction: spec.faction,
        });
        self.flush_events();
        id
    }

    /// Add an NPC ship.
    pub fn add_ship(&mut self, spec: ShipSpec) -> ShipId {
        let id = self.allocate_ship_id();
        world_setup::spawn_ship(&mut self.world, id, &spec, false);
        debug!(ship_id = %id, name = %spec.name, faction = ?spec.faction, "ship added");
        self.pending_events.push(SimEvent::ShipAdded {
            ship_id: id,
            name: spec.name,
            faction: spec.faction,
        });
        self.flush_events();
        id
    }

    /// Remove an NPC. Returns `Ok(false)` if it was already gone. The player
    /// ship is never removed.
    pub fn remove_ship(&mut self, id: ShipId) -> Result<bool, CommandError> {
        let result = if Some(id) == self.player_id() {
            Err(CommandError::NotAnNpc(id))
        } else {
            Ok(world_setup::despawn_ship(
                &mut self.world,
                id,
                &mut self.pending_events,
            ))
        };
        self.finish("remove_ship", result)
    }

    pub fn get_ship(&self, id: ShipId) -> Option<ShipView> {
        let entity = world_setup::find_ship(&self.world, id)?;
        systems::snapshot::build_ship(&self.world, entity)
    }

    /// All ships, ordered by id.
    pub fn list_ships(&self) -> Vec<ShipView> {
        systems::snapshot::build_ships(&self.world)
    }

    // --- Read accessors ---

    pub fn player_id(&self) -> Option<ShipId> {
        let entity = self.player?;
        self.world.get::<&Ship>(entity).ok().map(|s| s.id)
    }

    pub fn player_destroyed(&self) -> bool {
        self.player
            .and_then(|e| self.world.get::<&PlayerShip>(e).ok().map(|p| p.destroyed))
            .unwrap_or(false)
    }

    pub fn alert_level(&self) -> AlertLevel {
        self.alert
    }

    pub fn waypoint(&self) -> Option<Position> {
        self.waypoint
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn waypoint_distance(&self) -> Option<f64> {
        systems::snapshot::waypoint_distance(&self.world, self.player?, self.waypoint)
    }

    /// Ticks to the waypoint at current effective velocity.
    pub fn waypoint_eta(&self) -> Option<f64> {
        systems::snapshot::waypoint_eta(&self.world, self.player?, self.waypoint)
    }

    pub fn pending_hails(&self) -> usize {
        self.hails.len()
    }

    /// Build a snapshot, handing over the events published since the last one.
    pub fn snapshot(&mut self) -> WorldSnapshot {
        let events = self.frame_events.drain(..).collect();
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.alert,
            self.waypoint,
            self.player,
            events,
        )
    }

    // --- Commands ---

    /// Apply one operator command.
    pub fn apply(&mut self, command: PlayerCommand) -> Result<(), CommandError> {
        match command {
            PlayerCommand::FireWeapon { weapon, target } => self.fire_weapon(weapon, target),
            PlayerCommand::SetTarget { target } => self.set_target(target),
            PlayerCommand::SetThrottle { percent } => self.set_throttle_percent(percent),
            PlayerCommand::SetHeading { degrees } => self.set_heading_degrees(degrees),
            PlayerCommand::Turn { delta } => self.turn(delta),
            PlayerCommand::SetWaypoint { x, y } => {
                self.set_waypoint(x, y);
                Ok(())
            }
            PlayerCommand::ClearWaypoint => {
                self.clear_waypoint();
                Ok(())
            }
            PlayerCommand::SetPower { system, value } => self.set_power(system, value),
            PlayerCommand::Repair { system } => self.repair_subsystem(system),
            PlayerCommand::SetAlertLevel { level } => {
                self.set_alert_level(level);
                Ok(())
            }
            PlayerCommand::Scan { ship_id } => self.scan(ship_id),
            PlayerCommand::Hail { ship_id } => self.hail(ship_id),
            PlayerCommand::SpawnShip { spec } => {
                self.add_ship(spec);
                Ok(())
            }
            PlayerCommand::RemoveShip { ship_id } => self.remove_ship(ship_id).map(|_| ()),
        }
    }

    /// Fire a player weapon at `target`, or at the locked target.
    pub fn fire_weapon(
        &mut self,
        weapon: WeaponKind,
        target: Option<ShipId>,
    ) -> Result<(), CommandError> {
        let result = self.try_fire_weapon(weapon, target);
        self.finish("fire_weapon", result)
    }

    fn try_fire_weapon(
        &mut self,
        weapon: WeaponKind,
        target: Option<ShipId>,
    ) -> Result<(), CommandError> {
        let player = self.player_entity()?;
        if self.player_destroyed() {
            return Err(CommandError::PlayerDestroyed);
        }
        let (locked, weapons_online, cooldown) = {
            let (targeting, subsystems, cooldowns) = self
                .world
                .query_one_mut::<(&Targeting, &Subsystems, &WeaponCooldowns)>(player)
                .map_err(|_| CommandError::NoPlayerShip)?;
            (
                targeting.target,
                subsystems.get(SubsystemKind::Weapons).online(),
                cooldowns.remaining(weapon),
            )
        };
        if !weapons_online {
            return Err(CommandError::WeaponsOffline);
        }
        if cooldown > 0 {
            return Err(CommandError::WeaponCooling(cooldown));
        }

        let target = target.or(locked);
        match weapon {
            WeaponKind::Phaser => systems::weapons::fire_phaser(
                &mut self.world,
                player,
                target,
                &mut *self.rng,
                &mut self.pending_events,
            )?,
            WeaponKind::Torpedo => {
                let torpedo_id = self.next_torpedo_id;
                systems::weapons::fire_torpedo(
                    &mut self.world,
                    player,
                    target,
                    torpedo_id,
                    &mut self.pending_events,
                )?;
                self.next_torpedo_id += 1;
            }
        }

        if let Ok(mut cooldowns) = self.world.get::<&mut WeaponCooldowns>(player) {
            match weapon {
                WeaponKind::Phaser => cooldowns.phaser = PHASER_COOLDOWN_TICKS,
                WeaponKind::Torpedo => cooldowns.torpedo = TORPEDO_COOLDOWN_TICKS,
            }
        }
        Ok(())
    }

    /// Lock (or with `None`, release) the player's engagement target.
    pub fn set_target(&mut self, target: Option<ShipId>) -> Result<(), CommandError> {
        let result = self.try_set_target(target);
        self.finish("set_target", result)
    }

    fn try_set_target(&mut self, target: Option<ShipId>) -> Result<(), CommandError> {
        let player = self.player_entity()?;
        let player_id = self.player_id().ok_or(CommandError::NoPlayerShip)?;
        if let Some(id) = target {
            if id == player_id {
                return Err(CommandError::InvalidTarget(id));
            }
            if world_setup::find_ship(&self.world, id).is_none() {
                return Err(CommandError::ShipNotFound(id));
            }
        }
        let mut targeting = self
            .world
            .get::<&mut Targeting>(player)
            .map_err(|_| CommandError::NoPlayerShip)?;
        if targeting.target != target {
            targeting.target = target;
            self.pending_events.push(SimEvent::TargetChanged {
                ship_id: player_id,
                target,
            });
        }
        Ok(())
    }

    /// Set nominal speed as a percentage of max velocity.
    pub fn set_throttle_percent(&mut self, percent: f64) -> Result<(), CommandError> {
        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 100.0)
        };
        let result = self.with_player_helm(|helm| {
            helm.velocity = helm.max_velocity * percent / 100.0;
        });
        self.finish("set_throttle", result)
    }

    pub fn set_heading_degrees(&mut self, degrees: f64) -> Result<(), CommandError> {
        let result = self.with_player_helm(|helm| helm.heading = normalize_heading(degrees));
        self.finish("set_heading", result)
    }

    /// Turn by a signed number of degrees.
    pub fn turn(&mut self, delta: f64) -> Result<(), CommandError> {
        let result = self.with_player_helm(|helm| {
            helm.heading = normalize_heading(helm.heading + delta);
        });
        self.finish("turn", result)
    }

    /// Set player subsystem power, clamped to [0, 100].
    pub fn set_power(&mut self, system: SubsystemKind, value: f64) -> Result<(), CommandError> {
        let result = match self.player_id() {
            Some(id) => self.try_set_ship_power(id, system, value),
            None => Err(CommandError::NoPlayerShip),
        };
        self.finish("set_power", result)
    }

    /// Set any ship's subsystem power, clamped to [0, 100]. The 200 budget
    /// is advisory and not enforced.
    pub fn set_ship_power(
        &mut self,
        ship_id: ShipId,
        system: SubsystemKind,
        value: f64,
    ) -> Result<(), CommandError> {
        let result = self.try_set_ship_power(ship_id, system, value);
        self.finish("set_ship_power", result)
    }

    fn try_set_ship_power(
        &mut self,
        ship_id: ShipId,
        system: SubsystemKind,
        value: f64,
    ) -> Result<(), CommandError> {
        let entity = world_setup::find_ship(&self.world, ship_id)
            .ok_or(CommandError::ShipNotFound(ship_id))?;
        let mut subsystems = self
            .world
            .get::<&mut Subsystems>(entity)
            .map_err(|_| CommandError::ShipNotFound(ship_id))?;
        let power = world_setup::clamp_power(value);
        subsystems.get_mut(system).power = power;
        self.pending_events.push(SimEvent::PowerChanged {
            ship_id,
            system,
            power,
            total_power: subsystems.total_power(),
        });
        Ok(())
    }

    /// Dispatch a repair crew to a player subsystem.
    pub fn repair_subsystem(&mut self, system: SubsystemKind) -> Result<(), CommandError> {
        let result = match self.player_entity() {
            Ok(player) => {
                systems::repair::start(&mut self.world, player, system, &mut self.pending_events)
            }
            Err(e) => Err(e),
        };
        self.finish("repair", result)
    }

    /// Change the alert level. Returns whether it changed; unchanged is a no-op.
    pub fn set_alert_level(&mut self, level: AlertLevel) -> bool {
        if level == self.alert {
            return false;
        }
        let from = std::mem::replace(&mut self.alert, level);
        info!(?from, to = ?level, "alert level changed");
        self.pending_events
            .push(SimEvent::AlertChanged { from, to: level });
        self.flush_events();
        true
    }

    pub fn set_waypoint(&mut self, x: f64, y: f64) {
        let position = Position::new(x, y);
        self.waypoint = Some(position);
        self.pending_events.push(SimEvent::WaypointSet { position });
        self.flush_events();
    }

    /// Clear the waypoint. No event if none was set.
    pub fn clear_waypoint(&mut self) {
        if self.waypoint.take().is_some() {
            self.pending_events.push(SimEvent::WaypointCleared);
            self.flush_events();
        }
    }

    /// Active sensor scan of a contact.
    pub fn scan(&mut self, ship_id: ShipId) -> Result<(), CommandError> {
        let result = match self.player_entity() {
            Ok(player) => {
                systems::sensors::scan(&mut self.world, player, ship_id, &mut self.pending_events)
            }
            Err(e) => Err(e),
        };
        self.finish("scan", result)
    }

    /// Hail an NPC. The answer arrives as a `HailResponse` event a fixed
    /// number of ticks later.
    pub fn hail(&mut self, ship_id: ShipId) -> Result<(), CommandError> {
        let result = if world_setup::find_ship(&self.world, ship_id).is_none() {
            Err(CommandError::ShipNotFound(ship_id))
        } else if Some(ship_id) == self.player_id() {
            Err(CommandError::NotAnNpc(ship_id))
        } else {
            self.hails
                .schedule(ship_id, self.time.tick + HAIL_RESPONSE_DELAY_TICKS);
            Ok(())
        };
        self.finish("hail", result)
    }

    // --- Tick ---

    /// Advance the simulation by exactly one tick, in fixed phase order.
    pub fn tick(&mut self) {
        // 1. Game clock
        self.time
            .advance_by(1.0 / self.config.tick_rate.max(1) as f64);

        // 2. Player movement + waypoint arrival
        if let Some(player) = self.player {
            systems::movement::run_player(
                &mut self.world,
                player,
                &mut self.waypoint,
                &mut self.pending_events,
            );
        }

        // 3. NPC AI + movement
        let player = self.player_state();
        systems::npc_ai::run(
            &mut self.world,
            player,
            &mut *self.rng,
            &mut self.pending_events,
        );

        // 4. Projectile movement + collision
        systems::projectiles::run(
            &mut self.world,
            &mut *self.rng,
            &mut self.pending_events,
            &mut self.despawn_buffer,
        );

        // 5. Beam decay
        systems::beams::run(&mut self.world, &mut self.despawn_buffer);

        // 6. Cooldowns
        systems::repair::run(&mut self.world);
        systems::weapons::tick_cooldowns(&mut self.world);

        // 7. Alert automation
        if let Some((_, player_pos)) = self.player_state() {
            if let Some(level) = systems::alert::run(&self.world, player_pos, self.alert) {
                self.set_alert_level(level);
            }
        }

        // 8. Shield regeneration
        systems::shields::run(&mut self.world);

        // 9. Deferred hail responses
        self.hails
            .run(&self.world, self.time.tick, &mut self.pending_events);

        self.flush_events();
    }

    // --- Internals ---

    fn allocate_ship_id(&mut self) -> ShipId {
        self.next_ship_id += 1;
        ShipId(self.next_ship_id)
    }

    fn player_entity(&self) -> Result<Entity, CommandError> {
        self.player
            .filter(|e| self.world.contains(*e))
            .ok_or(CommandError::NoPlayerShip)
    }

    fn player_state(&self) -> Option<(ShipId, Position)> {
        let entity = self.player?;
        let id = self.world.get::<&Ship>(entity).ok()?.id;
        let pos = *self.world.get::<&Position>(entity).ok()?;
        Some((id, pos))
    }

    fn with_player_helm(&mut self, f: impl FnOnce(&mut Helm)) -> Result<(), CommandError> {
        let player = self.player_entity()?;
        let mut helm = self
            .world
            .get::<&mut Helm>(player)
            .map_err(|_| CommandError::NoPlayerShip)?;
        f(&mut *helm);
        Ok(())
    }

    /// Publish buffered events and log a rejected command.
    fn finish<T>(
        &mut self,
        command: &str,
        result: Result<T, CommandError>,
    ) -> Result<T, CommandError> {
        if let Err(reason) = &result {
            debug!(command, %reason, "command rejected");
        }
        self.flush_events();
        result
    }

    /// Deliver pending events to subscribers, in order, and record them
    /// for the next snapshot.
    fn flush_events(&mut self) {
        for event in std::mem::take(&mut self.pending_events) {
            self.bus.publish(&event);
            if self.frame_events.len() == FRAME_EVENT_CAPACITY {
                self.frame_events.pop_front();
            }
            self.frame_events.push_back(event);
        }
    }
}
