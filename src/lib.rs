//! Debt Dash - a 3-lane endless runner with a hostile economy
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, run economy)
//! - `shop`: Permanent upgrades bought with banked money
//! - `persistence`: Injected key-value store for the player profile
//! - `settings`: Player preferences
//!
//! Rendering, input capture and audio playback live outside this crate and
//! talk to it through `sim::Simulation`, `sim::Hooks` and `persistence::Store`.

pub mod persistence;
pub mod settings;
pub mod shop;
pub mod sim;

pub use settings::Settings;
pub use shop::{PurchaseError, ShopLedger};
pub use sim::{Simulation, tick};

/// Game configuration constants
pub mod consts {
    /// Depth at which new obstacles appear (the horizon)
    pub const SPAWN_DEPTH: f32 = -60.0;
    /// Depth past the player at which obstacles are dropped
    pub const CLEANUP_DEPTH: f32 = 10.0;
    /// The player sits at depth zero
    pub const PLAYER_DEPTH: f32 = 0.0;
    /// Collision window along the travel axis
    pub const COLLISION_THRESHOLD: f32 = 1.2;
    /// Converts abstract speed into world units per second
    pub const DISTANCE_SCALE: f32 = 15.0;

    /// World-space X offset between adjacent lanes
    pub const LANE_SPACING: f32 = 2.0;

    /// Starting run speed
    pub const START_SPEED: f32 = 1.0;
    /// Speed cap
    pub const MAX_SPEED: f32 = 3.0;
    /// Speed gained per difficulty escalation
    pub const SPEED_INCREMENT: f32 = 0.1;
    /// Distance units accumulated between difficulty escalations
    pub const DIFFICULTY_QUANTUM: f32 = 500.0;

    /// Seconds between spawns at the start of a run
    pub const BASE_SPAWN_INTERVAL: f32 = 1.5;
    /// Spawn interval floor
    pub const MIN_SPAWN_INTERVAL: f32 = 0.5;
    /// Seconds shaved off the spawn interval per escalation
    pub const SPAWN_INTERVAL_STEP: f32 = 0.05;

    /// Baseline category weights (must sum to 100)
    pub const BASE_LETHAL_WEIGHT: f32 = 15.0;
    pub const BASE_FINANCIAL_WEIGHT: f32 = 50.0;
    pub const BASE_COLLECTIBLE_WEIGHT: f32 = 35.0;
    /// Collectibles never drop below this weight, whatever the distance
    pub const COLLECTIBLE_WEIGHT_FLOOR: f32 = 15.0;
    /// Distance-multiplier cap (difficulty stops scaling at 2x)
    pub const DISTANCE_MULTIPLIER_CAP: f32 = 2.0;
    /// Distance units per unit of distance multiplier
    pub const DISTANCE_MULTIPLIER_SCALE: f32 = 1000.0;
    /// Per-unit weight shifts applied by the distance multiplier
    pub const LETHAL_WEIGHT_SHIFT: f32 = 5.0;
    pub const FINANCIAL_WEIGHT_SHIFT: f32 = 10.0;
    pub const COLLECTIBLE_WEIGHT_SHIFT: f32 = -10.0;

    /// Waves at the start of a run that never spawn lethal obstacles
    pub const LETHAL_SAFE_WAVES: u32 = 3;
    /// Obstacles spawned before the wave counter advances
    pub const WAVE_SIZE: u32 = 2;
    /// A lethal obstacle still above this depth blocks a second lethal draw
    pub const LETHAL_APPROACH_DEPTH: f32 = -10.0;

    /// Percentage damage never lands below this amount
    pub const PERCENT_DAMAGE_FLOOR: i64 = 50;
    /// Penalty applied when a financial config lookup misses
    pub const FALLBACK_DAMAGE: i64 = 100;
    /// Reward applied when a collectible config lookup misses
    pub const FALLBACK_REWARD: i64 = 50;
}
