//! Run economy and game state machine
//!
//! Menu -> Running -> Paused -> Running -> GameOver -> (restart | menu).
//! Guarded transitions are silent no-ops: the UI and the clock race, and a
//! stray pause or a late money mutation after death must not corrupt the run.

use crate::persistence::{
    self, Store, add_to_total_money, get_high_score, get_total_money,
};

use super::catalog::EntityType;
use super::state::{DeathCause, GamePhase, RunLoadout, RunState, Simulation};

impl RunState {
    /// Add distance points, scaled by the education multiplier
    ///
    /// No-op unless running.
    pub fn add_score(&mut self, points: f32) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.score += (points as f64 * self.score_multiplier).ceil() as u64;
    }

    /// Collect money; also counts toward the amount banked at game over
    ///
    /// No-op unless running.
    pub fn add_money(&mut self, amount: i64) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.current_money += amount;
        self.money_earned += amount;
    }

    /// Pay a financial penalty
    ///
    /// Debt is allowed: the balance may go unboundedly negative and the run
    /// keeps going. No-op unless running, so late ticks after a death can
    /// never mutate a finished run.
    pub fn lose_money(&mut self, amount: i64) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.current_money -= amount;
        if self.current_money < 0 {
            log::debug!("in debt: balance {}", self.current_money);
        }
    }
}

impl Simulation {
    /// Refresh the persisted scalars without touching the run, so the menu
    /// HUD shows the banked balance and record after shopping
    pub fn load_persisted(&mut self, store: &dyn Store) {
        self.run.total_money = get_total_money(store);
        self.run.high_score = get_high_score(store);
    }

    /// Begin a run from the menu (or anywhere): per-run state resets, the
    /// persisted scalars reload, and the shop loadout applies.
    pub fn start_game(&mut self, store: &dyn Store, loadout: RunLoadout) {
        self.reset_run();
        self.run = RunState {
            phase: GamePhase::Running,
            total_money: get_total_money(store),
            high_score: get_high_score(store),
            score_multiplier: loadout.score_multiplier,
            defense_charges: loadout.defense_charges,
            ..RunState::default()
        };
        log::info!(
            "run started: seed {}, multiplier {:.2}, defense {}",
            self.seed,
            loadout.score_multiplier,
            loadout.defense_charges
        );
    }

    /// Restart after a game over; identical bookkeeping to a fresh start
    pub fn restart_game(&mut self, store: &dyn Store, loadout: RunLoadout) {
        self.start_game(store, loadout);
    }

    /// Freeze the run; no-op unless running
    pub fn pause_game(&mut self) {
        if self.run.phase == GamePhase::Running {
            self.run.phase = GamePhase::Paused;
        }
    }

    /// Unfreeze; no-op unless paused
    pub fn resume_game(&mut self) {
        if self.run.phase == GamePhase::Paused {
            self.run.phase = GamePhase::Running;
        }
    }

    /// Back to the title screen
    pub fn go_to_menu(&mut self) {
        self.run.phase = GamePhase::Menu;
    }

    /// A lethal obstacle ended the run; no-op unless running
    pub fn die_from_collision(&mut self, kind: EntityType, store: &mut dyn Store) {
        if self.run.phase != GamePhase::Running {
            return;
        }
        self.run.death_cause = Some(DeathCause::Collision(kind));
        self.end_game(store);
    }

    /// Player gives up mid-run (running or paused)
    pub fn quit_run(&mut self, store: &mut dyn Store) {
        if !matches!(self.run.phase, GamePhase::Running | GamePhase::Paused) {
            return;
        }
        self.run.death_cause = Some(DeathCause::Quit);
        self.end_game(store);
    }

    /// Game-over bookkeeping: bank the run's earnings and persist the high
    /// score, then transition
    fn end_game(&mut self, store: &mut dyn Store) {
        let run = &mut self.run;
        run.is_new_high_score = persistence::update_high_score_if_better(store, run.score);
        if run.is_new_high_score {
            run.high_score = run.score;
            log::info!("new high score: {}", run.score);
        }
        run.total_money = add_to_total_money(store, run.money_earned);
        run.phase = GamePhase::GameOver;
        log::info!(
            "game over ({:?}): score {}, banked {}, balance {}",
            run.death_cause,
            run.score,
            run.money_earned,
            run.total_money
        );
    }
}
