//! Simulation constants and tuning parameters.
//!
//! Distances are world units, speeds are units per tick, angles are degrees.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 20;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Maximum ticks executed per clock frame; older due ticks are dropped.
pub const MAX_CATCH_UP_TICKS: u32 = 5;

// --- Subsystems ---

pub const SUBSYSTEM_MAX_HP: f64 = 100.0;

pub const SUBSYSTEM_MAX_POWER: f64 = 100.0;

/// Power assigned to each subsystem at spawn (four of these fill the budget).
pub const DEFAULT_SUBSYSTEM_POWER: f64 = 50.0;

/// Advisory total power budget. Exceeding it is reported, never blocked.
pub const POWER_BUDGET: f64 = 200.0;

// --- Ships ---

pub const DEFAULT_COLLISION_RADIUS: f64 = 20.0;

pub const DEFAULT_MAX_HULL: f64 = 100.0;

pub const DEFAULT_MAX_SHIELDS: f64 = 100.0;

pub const DEFAULT_MAX_VELOCITY: f64 = 5.0;

pub const DEFAULT_TURN_RATE: f64 = 3.0;

// --- Navigation ---

/// Distance at which the player's waypoint counts as reached.
pub const WAYPOINT_ARRIVAL_RADIUS: f64 = 20.0;

/// Distance at which an NPC advances to its next patrol point.
pub const PATROL_ARRIVAL_RADIUS: f64 = 30.0;

/// How far ahead a fleeing NPC aims, directly away from the player.
pub const FLEE_DISTANCE: f64 = 500.0;

// --- NPC behavior ---

/// Friendlies close on the player beyond this distance.
pub const FRIENDLY_ESCORT_RANGE: f64 = 500.0;

/// Hostiles below this hull fraction break off and flee.
pub const HOSTILE_FLEE_HULL_FRACTION: f64 = 0.3;

pub const HOSTILE_ATTACK_RANGE: f64 = 800.0;

pub const HOSTILE_APPROACH_RANGE: f64 = 1500.0;

pub const PATROL_SPEED_FRACTION: f64 = 0.5;

pub const APPROACH_SPEED_FRACTION: f64 = 0.8;

pub const ATTACK_SPEED_FRACTION: f64 = 1.0;

pub const FLEE_SPEED_FRACTION: f64 = 1.0;

/// Attacking NPCs only open fire inside this distance.
pub const NPC_PHASER_RANGE: f64 = 400.0;

/// Per-tick chance an attacking NPC in range fires its phaser.
pub const NPC_PHASER_CHANCE: f64 = 0.02;

// --- Weapons ---

pub const PHASER_RANGE: f64 = 500.0;

pub const PHASER_BASE_DAMAGE: f64 = 15.0;

/// Ticks a phaser beam stays visible.
pub const PHASER_BEAM_LIFETIME_TICKS: u32 = 10;

/// Player phaser recharge (1 second).
pub const PHASER_COOLDOWN_TICKS: u32 = 20;

pub const TORPEDO_BASE_DAMAGE: f64 = 30.0;

pub const TORPEDO_SPEED: f64 = 8.0;

/// Torpedo self-destruct timer (6 seconds).
pub const TORPEDO_LIFETIME_TICKS: u32 = 120;

pub const TORPEDO_COLLISION_RADIUS: f64 = 8.0;

/// Player torpedo tube reload (3 seconds).
pub const TORPEDO_COOLDOWN_TICKS: u32 = 60;

// --- Damage ---

/// Fraction of incoming damage shields can soak at full shield power.
pub const SHIELD_ABSORB_FACTOR: f64 = 0.8;

/// Hull damage above this can cascade into a subsystem.
pub const SUBSYSTEM_HIT_THRESHOLD: f64 = 5.0;

pub const SUBSYSTEM_HIT_CHANCE: f64 = 0.3;

/// Subsystem hp lost per point of hull damage on a cascade hit.
pub const SUBSYSTEM_HIT_FACTOR: f64 = 0.5;

/// Shield points regained per tick at full power and full shield hp.
pub const SHIELD_REGEN_RATE: f64 = 0.1;

// --- Alert automation ---

pub const ALERT_RED_RANGE: f64 = 500.0;

pub const ALERT_YELLOW_RANGE: f64 = 1000.0;

/// Nearest hostile must be beyond this to stand down to normal.
pub const ALERT_CLEAR_RANGE: f64 = 1500.0;

// --- Damage control ---

pub const REPAIR_AMOUNT: f64 = 25.0;

/// Per-subsystem repair crew turnaround (5 seconds).
pub const REPAIR_COOLDOWN_TICKS: u32 = 100;

// --- Sensors and comms ---

/// Scan range at full sensor effectiveness.
pub const SCAN_RANGE: f64 = 1000.0;

/// Delay before a hailed ship answers (2 seconds).
pub const HAIL_RESPONSE_DELAY_TICKS: u64 = 40;

// --- Snapshots ---

/// Most events a snapshot can carry. Older events are dropped when nobody
/// takes snapshots; bus subscribers still see every event.
pub const FRAME_EVENT_CAPACITY: usize = 1024;
