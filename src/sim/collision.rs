//! Lane collision detection and resolution
//!
//! Collision here is a 1D range check along the travel axis: same lane,
//! depth inside the player window after this tick's advance. The functions
//! are pure decisions; the clock applies them to the run state.

use crate::consts::*;

use super::catalog::{Category, Damage, EntityType, Payload, PowerUpKind, Reward, config_of};
use super::state::{ActiveEffects, Lane, Obstacle};

/// Overlap test against the player window, using the post-advance depth
pub fn in_collision_range(depth: f32, move_amount: f32) -> bool {
    (depth + move_amount - PLAYER_DEPTH).abs() < COLLISION_THRESHOLD
}

/// Whether a money collectible can be pulled across lanes by the magnet
fn is_money_collectible(kind: EntityType) -> bool {
    if kind.category() != Category::Collectible {
        return false;
    }
    match config_of(kind) {
        Some(config) => matches!(
            config.payload,
            Payload::Collectible { reward: Reward::Money(_) }
        ),
        // Lookup miss resolves as a flat money reward, so treat it as one
        None => true,
    }
}

/// Lane eligibility for a hit this tick
pub fn eligible(obstacle: &Obstacle, player_lane: Lane, effects: &ActiveEffects) -> bool {
    if obstacle.consumed {
        return false;
    }
    if obstacle.lane == player_lane {
        return true;
    }
    effects.magnet_active() && is_money_collectible(obstacle.kind)
}

/// What absorbed a financial hit, if anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absorb {
    /// Timed shield power-up
    Shield,
    /// One vehicle defense charge
    DefenseCharge,
}

/// Decided outcome of a hit, before the run state is touched
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Unconditional death; no mitigation applies
    Death { kind: EntityType },
    /// Financial damage. `amount` is the computed penalty; when
    /// `absorbed_by` is set, zero damage actually lands.
    Damage {
        kind: EntityType,
        amount: i64,
        absorbed_by: Option<Absorb>,
    },
    /// Flat money gain
    Reward { kind: EntityType, amount: i64 },
    /// Timed effect activation
    PowerUp {
        kind: EntityType,
        power: PowerUpKind,
        duration_secs: f32,
    },
}

/// Resolve a hit by category
///
/// Percentage damage is taken of the current balance (not the banked
/// total), floored so a near-empty wallet still stings. Config lookup
/// misses fall back to default penalty/reward values rather than halting
/// the frame loop.
pub fn resolve(
    kind: EntityType,
    current_money: i64,
    effects: &ActiveEffects,
    defense_charges: u32,
) -> Resolution {
    match kind.category() {
        Category::Lethal => Resolution::Death { kind },
        Category::Financial => {
            let amount = match config_of(kind).map(|c| c.payload) {
                Some(Payload::Financial { damage: Damage::Fixed(value) }) => value,
                Some(Payload::Financial { damage: Damage::Percentage(pct) }) => {
                    let cut = (current_money.abs() as f64 * pct as f64 / 100.0).floor() as i64;
                    cut.max(PERCENT_DAMAGE_FLOOR)
                }
                _ => FALLBACK_DAMAGE,
            };
            let absorbed_by = if effects.shield_active() {
                Some(Absorb::Shield)
            } else if defense_charges > 0 {
                Some(Absorb::DefenseCharge)
            } else {
                None
            };
            Resolution::Damage { kind, amount, absorbed_by }
        }
        Category::Collectible => match config_of(kind).map(|c| c.payload) {
            Some(Payload::Collectible { reward: Reward::Money(amount) }) => {
                Resolution::Reward { kind, amount }
            }
            Some(Payload::Collectible {
                reward: Reward::PowerUp { kind: power, duration_secs },
            }) => Resolution::PowerUp { kind, power, duration_secs },
            _ => Resolution::Reward { kind, amount: FALLBACK_REWARD },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collision_window_is_exclusive() {
        assert!(in_collision_range(-1.0, 0.5));
        assert!(in_collision_range(0.0, 0.0));
        // Exactly on the threshold is a miss, on either side
        assert!(!in_collision_range(COLLISION_THRESHOLD, 0.0));
        assert!(!in_collision_range(-COLLISION_THRESHOLD, 0.0));
        assert!(!in_collision_range(-5.0, 0.0));
        // The advance can carry an obstacle into the window
        assert!(in_collision_range(-5.0, 4.5));
    }

    #[test]
    fn percentage_damage_of_a_thousand_is_150() {
        let effects = ActiveEffects::default();
        let resolution = resolve(EntityType::TaxAudit, 1000, &effects, 0);
        assert_eq!(
            resolution,
            Resolution::Damage { kind: EntityType::TaxAudit, amount: 150, absorbed_by: None }
        );
    }

    #[test]
    fn percentage_damage_is_floored() {
        let effects = ActiveEffects::default();
        // 15% of 100 is 15, below the floor of 50
        match resolve(EntityType::TaxAudit, 100, &effects, 0) {
            Resolution::Damage { amount, .. } => assert_eq!(amount, PERCENT_DAMAGE_FLOOR),
            other => panic!("expected damage, got {other:?}"),
        }
        // Percentage is taken of the absolute balance when in debt
        match resolve(EntityType::TaxAudit, -2000, &effects, 0) {
            Resolution::Damage { amount, .. } => assert_eq!(amount, 300),
            other => panic!("expected damage, got {other:?}"),
        }
    }

    #[test]
    fn fixed_damage_uses_the_configured_value() {
        let effects = ActiveEffects::default();
        match resolve(EntityType::VehicleTax, 0, &effects, 0) {
            Resolution::Damage { amount, absorbed_by, .. } => {
                assert_eq!(amount, 200);
                assert_eq!(absorbed_by, None);
            }
            other => panic!("expected damage, got {other:?}"),
        }
    }

    #[test]
    fn shield_absorbs_before_defense_charges() {
        let shielded = ActiveEffects { shield_secs: 1.0, magnet_secs: 0.0 };
        match resolve(EntityType::TollBooth, 500, &shielded, 3) {
            Resolution::Damage { absorbed_by, .. } => {
                assert_eq!(absorbed_by, Some(Absorb::Shield));
            }
            other => panic!("expected damage, got {other:?}"),
        }
        let bare = ActiveEffects::default();
        match resolve(EntityType::TollBooth, 500, &bare, 3) {
            Resolution::Damage { absorbed_by, .. } => {
                assert_eq!(absorbed_by, Some(Absorb::DefenseCharge));
            }
            other => panic!("expected damage, got {other:?}"),
        }
    }

    #[test]
    fn lethal_ignores_shield_and_defense() {
        let shielded = ActiveEffects { shield_secs: 10.0, magnet_secs: 0.0 };
        assert_eq!(
            resolve(EntityType::Motorbike, 0, &shielded, 99),
            Resolution::Death { kind: EntityType::Motorbike }
        );
    }

    #[test]
    fn collectibles_resolve_to_money_or_powerups() {
        let effects = ActiveEffects::default();
        assert_eq!(
            resolve(EntityType::Coin, 0, &effects, 0),
            Resolution::Reward { kind: EntityType::Coin, amount: 50 }
        );
        match resolve(EntityType::Magnet, 0, &effects, 0) {
            Resolution::PowerUp { power, duration_secs, .. } => {
                assert_eq!(power, PowerUpKind::Magnet);
                assert_eq!(duration_secs, 10.0);
            }
            other => panic!("expected power-up, got {other:?}"),
        }
    }

    #[test]
    fn magnet_extends_eligibility_to_money_in_other_lanes() {
        let obstacle = Obstacle {
            id: 1,
            kind: EntityType::Coin,
            lane: Lane::Left,
            depth: -0.5,
            consumed: false,
        };
        let bare = ActiveEffects::default();
        let magnetized = ActiveEffects { shield_secs: 0.0, magnet_secs: 5.0 };
        assert!(!eligible(&obstacle, Lane::Right, &bare));
        assert!(eligible(&obstacle, Lane::Right, &magnetized));
        assert!(eligible(&obstacle, Lane::Left, &bare));

        // Magnet never pulls hazards or power-ups across lanes
        let hazard = Obstacle { kind: EntityType::TollBooth, ..obstacle };
        assert!(!eligible(&hazard, Lane::Right, &magnetized));
        let powerup = Obstacle { kind: EntityType::Shield, ..obstacle };
        assert!(!eligible(&powerup, Lane::Right, &magnetized));
    }

    #[test]
    fn consumed_obstacles_are_never_eligible() {
        let obstacle = Obstacle {
            id: 1,
            kind: EntityType::Coin,
            lane: Lane::Center,
            depth: 0.0,
            consumed: true,
        };
        let effects = ActiveEffects { shield_secs: 0.0, magnet_secs: 5.0 };
        assert!(!eligible(&obstacle, Lane::Center, &effects));
    }
}
