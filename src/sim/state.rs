//! Game state and core simulation types
//!
//! All state a run needs lives here, owned by [`Simulation`] and handed to
//! the frame driver explicitly; there are no ambient globals.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::catalog::EntityType;
use super::spawn::SpawnState;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, no simulation running
    #[default]
    Menu,
    /// Active gameplay
    Running,
    /// Frozen mid-run
    Paused,
    /// Run ended
    GameOver,
}

/// Why the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Hit a lethal obstacle
    Collision(EntityType),
    /// Player gave up from the pause screen
    Quit,
}

/// One of the three discrete tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lane {
    Left,
    #[default]
    Center,
    Right,
}

impl Lane {
    /// Lane to the left, clamped (no wraparound)
    pub fn left(self) -> Lane {
        match self {
            Lane::Left | Lane::Center => Lane::Left,
            Lane::Right => Lane::Center,
        }
    }

    /// Lane to the right, clamped
    pub fn right(self) -> Lane {
        match self {
            Lane::Left => Lane::Center,
            Lane::Center | Lane::Right => Lane::Right,
        }
    }

    /// World-space X offset, for the presentation layer
    pub fn world_x(self) -> f32 {
        match self {
            Lane::Left => -LANE_SPACING,
            Lane::Center => 0.0,
            Lane::Right => LANE_SPACING,
        }
    }

    /// All lanes, in left-to-right order
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Center, Lane::Right];
}

/// A spawned entity approaching the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Unique within the run (monotonic counter)
    pub id: u32,
    pub kind: EntityType,
    pub lane: Lane,
    /// Signed distance from the player along the travel axis; spawns
    /// negative at the horizon and increases toward zero
    pub depth: f32,
    /// Resolved this run; skipped by collision and dropped at cleanup
    pub consumed: bool,
}

impl Obstacle {
    /// World-space X for the renderer
    pub fn world_x(&self) -> f32 {
        self.lane.world_x()
    }
}

/// The player's discrete position and jump latch
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerState {
    pub lane: Lane,
    pub is_jumping: bool,
}

impl PlayerState {
    /// Shift one lane left; no-op at the edge
    pub fn move_left(&mut self) {
        self.lane = self.lane.left();
    }

    /// Shift one lane right; no-op at the edge
    pub fn move_right(&mut self) {
        self.lane = self.lane.right();
    }

    /// Latch the jump; a second jump mid-air is ignored
    pub fn jump(&mut self) {
        if !self.is_jumping {
            self.is_jumping = true;
        }
    }

    /// Presentation layer reports the jump animation finished
    pub fn land(&mut self) {
        self.is_jumping = false;
    }

    /// Reset for a fresh run
    pub fn reset(&mut self) {
        *self = PlayerState::default();
    }
}

/// Timed power-up effects, decayed by the clock each running tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    /// Financial damage is absorbed while positive
    pub shield_secs: f32,
    /// Money collectibles are pulled in from every lane while positive
    pub magnet_secs: f32,
}

impl ActiveEffects {
    pub fn shield_active(&self) -> bool {
        self.shield_secs > 0.0
    }

    pub fn magnet_active(&self) -> bool {
        self.magnet_secs > 0.0
    }

    pub fn decay(&mut self, dt: f32) {
        self.shield_secs = (self.shield_secs - dt).max(0.0);
        self.magnet_secs = (self.magnet_secs - dt).max(0.0);
    }
}

/// Per-run and persisted economy state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub phase: GamePhase,
    /// Distance score, already multiplied
    pub score: u64,
    /// Raw distance units this run; drives difficulty, not score
    pub distance_traveled: f32,
    /// In-run balance; negative means debt
    pub current_money: i64,
    /// Banked balance, persisted across runs
    pub total_money: i64,
    /// From education upgrades, applied to score gain
    pub score_multiplier: f64,
    pub speed: f32,
    /// Persisted best score
    pub high_score: u64,
    pub is_new_high_score: bool,
    /// Money collected this run, banked at game over
    pub money_earned: i64,
    /// Financial hits absorbed before damage applies (vehicle upgrades)
    pub defense_charges: u32,
    pub death_cause: Option<DeathCause>,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            phase: GamePhase::Menu,
            score: 0,
            distance_traveled: 0.0,
            current_money: 0,
            total_money: 0,
            score_multiplier: 1.0,
            speed: START_SPEED,
            high_score: 0,
            is_new_high_score: false,
            money_earned: 0,
            defense_charges: 0,
            death_cause: None,
        }
    }
}

/// Score multiplier and defense granted by owned upgrades, fixed per run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunLoadout {
    pub score_multiplier: f64,
    pub defense_charges: u32,
}

impl Default for RunLoadout {
    fn default() -> Self {
        Self { score_multiplier: 1.0, defense_charges: 0 }
    }
}

/// Optional callbacks fired synchronously during collision resolution
///
/// Fire-and-forget: the audio layer hangs sounds off these; the simulation
/// never depends on them.
#[derive(Default)]
pub struct Hooks {
    /// A lethal obstacle ended the run
    pub on_lethal: Option<Box<dyn FnMut(EntityType)>>,
    /// A financial obstacle hit; the amount is the damage actually applied
    /// (zero when a shield or defense charge absorbed it)
    pub on_financial_hit: Option<Box<dyn FnMut(EntityType, i64)>>,
    /// A collectible was picked up; the amount is the money granted
    /// (zero for power-ups)
    pub on_collectible: Option<Box<dyn FnMut(EntityType, i64)>>,
}

/// Complete simulation context
///
/// Owns every state object the clock touches; the frame driver holds one of
/// these and calls [`super::tick`] on it once per frame.
pub struct Simulation {
    /// Run seed, kept for reproducibility
    pub seed: u64,
    pub run: RunState,
    pub player: PlayerState,
    pub effects: ActiveEffects,
    /// Active obstacles; exclusively owned here
    pub obstacles: Vec<Obstacle>,
    pub spawn: SpawnState,
    pub hooks: Hooks,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl Simulation {
    /// Fresh simulation in the menu phase
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            run: RunState::default(),
            player: PlayerState::default(),
            effects: ActiveEffects::default(),
            obstacles: Vec::new(),
            spawn: SpawnState::default(),
            hooks: Hooks::default(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate an obstacle ID, unique within the run
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset everything per-run; persisted scalars are reloaded by the
    /// economy transitions, not here
    pub(crate) fn reset_run(&mut self) {
        self.player.reset();
        self.effects = ActiveEffects::default();
        self.obstacles.clear();
        self.spawn = SpawnState::default();
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.next_id = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lane_moves_clamp_without_wraparound() {
        let mut player = PlayerState::default();
        assert_eq!(player.lane, Lane::Center);
        player.move_left();
        assert_eq!(player.lane, Lane::Left);
        player.move_left();
        assert_eq!(player.lane, Lane::Left);
        player.move_right();
        player.move_right();
        assert_eq!(player.lane, Lane::Right);
        player.move_right();
        assert_eq!(player.lane, Lane::Right);
    }

    #[test]
    fn jump_latch_rejects_double_jump() {
        let mut player = PlayerState::default();
        player.jump();
        assert!(player.is_jumping);
        // Mid-air jump stays latched, not re-triggered
        player.jump();
        assert!(player.is_jumping);
        player.land();
        assert!(!player.is_jumping);
        player.jump();
        assert!(player.is_jumping);
    }

    #[test]
    fn effects_decay_to_zero_and_expire() {
        let mut effects = ActiveEffects { shield_secs: 0.1, magnet_secs: 1.0 };
        assert!(effects.shield_active());
        effects.decay(0.5);
        assert!(!effects.shield_active());
        assert!(effects.magnet_active());
        effects.decay(0.6);
        assert!(!effects.magnet_active());
        assert_eq!(effects.shield_secs, 0.0);
    }

    #[test]
    fn obstacle_ids_are_unique() {
        let mut sim = Simulation::new(7);
        let a = sim.next_obstacle_id();
        let b = sim.next_obstacle_id();
        assert_ne!(a, b);
    }

    #[test]
    fn lane_world_positions_are_symmetric() {
        assert_eq!(Lane::Left.world_x(), -Lane::Right.world_x());
        assert_eq!(Lane::Center.world_x(), 0.0);
    }
}
