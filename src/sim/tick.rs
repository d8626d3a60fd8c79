//! Per-frame simulation step
//!
//! The frame driver calls [`tick`] once per rendered frame with the elapsed
//! delta. The whole step is gated on the Running phase: pausing freezes the
//! world deterministically, and no partial tick ever leaks through.

use crate::consts::*;
use crate::persistence::Store;

use super::collision::{self, Absorb, Resolution};
use super::state::{GamePhase, Simulation};

/// Advance the simulation by one frame
///
/// Order per tick: effect decay, spawn check, advance & score, collision
/// pass, position update, cleanup, difficulty escalation.
pub fn tick(sim: &mut Simulation, dt: f32, store: &mut dyn Store) {
    if sim.run.phase != GamePhase::Running {
        return;
    }

    sim.effects.decay(dt);

    // Spawn check
    sim.spawn.since_last_spawn += dt;
    if sim.spawn.since_last_spawn > sim.spawn.spawn_interval {
        sim.spawn_obstacle();
        sim.spawn.since_last_spawn = 0.0;
    }

    // Advance & score
    let move_amount = sim.run.speed * dt * DISTANCE_SCALE;
    sim.run.add_score(move_amount);
    sim.run.distance_traveled += move_amount;
    sim.spawn.distance_since_escalation += move_amount;

    // Collision pass, against post-advance depths. Hits resolve one at a
    // time so shield expiry and defense charges account sequentially.
    for idx in 0..sim.obstacles.len() {
        let obstacle = sim.obstacles[idx];
        if !collision::eligible(&obstacle, sim.player.lane, &sim.effects) {
            continue;
        }
        if !collision::in_collision_range(obstacle.depth, move_amount) {
            continue;
        }
        let resolution = collision::resolve(
            obstacle.kind,
            sim.run.current_money,
            &sim.effects,
            sim.run.defense_charges,
        );
        sim.obstacles[idx].consumed = true;
        apply(sim, resolution, store);
        if sim.run.phase != GamePhase::Running {
            // Death ends the pass; the post-mortem guards would ignore the
            // rest anyway
            break;
        }
    }

    // Position update
    for obstacle in &mut sim.obstacles {
        obstacle.depth += move_amount;
    }

    // Cleanup: consumed this tick, or gone past the player
    sim.obstacles
        .retain(|o| !o.consumed && o.depth < CLEANUP_DEPTH);

    // Difficulty escalation
    if sim.spawn.distance_since_escalation > DIFFICULTY_QUANTUM {
        sim.spawn.distance_since_escalation = 0.0;
        sim.run.speed = (sim.run.speed + SPEED_INCREMENT).min(MAX_SPEED);
        sim.spawn.spawn_interval =
            (sim.spawn.spawn_interval - SPAWN_INTERVAL_STEP).max(MIN_SPAWN_INTERVAL);
        log::info!(
            "difficulty up: speed {:.2}, spawn interval {:.2}s",
            sim.run.speed,
            sim.spawn.spawn_interval
        );
    }
}

/// Apply one resolved hit to the run state and fire the matching hook
fn apply(sim: &mut Simulation, resolution: Resolution, store: &mut dyn Store) {
    match resolution {
        Resolution::Death { kind } => {
            log::debug!("lethal hit: {kind:?}");
            if let Some(hook) = sim.hooks.on_lethal.as_mut() {
                hook(kind);
            }
            sim.die_from_collision(kind, store);
        }
        Resolution::Damage { kind, amount, absorbed_by } => {
            let applied = match absorbed_by {
                Some(Absorb::Shield) => 0,
                Some(Absorb::DefenseCharge) => {
                    sim.run.defense_charges -= 1;
                    log::debug!(
                        "defense absorbed {kind:?} ({} charges left)",
                        sim.run.defense_charges
                    );
                    0
                }
                None => {
                    sim.run.lose_money(amount);
                    amount
                }
            };
            log::debug!("financial hit: {kind:?} for {applied}");
            if let Some(hook) = sim.hooks.on_financial_hit.as_mut() {
                hook(kind, applied);
            }
        }
        Resolution::Reward { kind, amount } => {
            sim.run.add_money(amount);
            log::debug!("collected {kind:?} for {amount}");
            if let Some(hook) = sim.hooks.on_collectible.as_mut() {
                hook(kind, amount);
            }
        }
        Resolution::PowerUp { kind, power, duration_secs } => {
            use super::catalog::PowerUpKind;
            match power {
                PowerUpKind::Shield => {
                    sim.effects.shield_secs = sim.effects.shield_secs.max(duration_secs);
                }
                PowerUpKind::Magnet => {
                    sim.effects.magnet_secs = sim.effects.magnet_secs.max(duration_secs);
                }
            }
            log::debug!("power-up {power:?} active for {duration_secs}s");
            if let Some(hook) = sim.hooks.on_collectible.as_mut() {
                hook(kind, 0);
            }
        }
    }
}
