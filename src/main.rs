//! Debt Dash entry point
//!
//! Headless demo driver: runs a scripted autopilot through a full run at a
//! fixed timestep, persisting the profile like a real frontend would. Useful
//! for eyeballing the simulation without a renderer attached.

use std::time::{SystemTime, UNIX_EPOCH};

use debt_dash::persistence::{FileStore, Store};
use debt_dash::shop::ShopLedger;
use debt_dash::sim::{
    Category, GamePhase, Lane, Simulation, tick, validate_catalog,
};
use debt_dash::{Settings, consts};

const PROFILE_PATH: &str = "debt-dash-profile.json";
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up after this much simulated time
const MAX_RUN_SECS: f32 = 300.0;

fn main() {
    env_logger::init();

    if let Err(err) = validate_catalog() {
        log::error!("catalog invalid: {err}");
        std::process::exit(1);
    }

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

    let mut store = FileStore::open(PROFILE_PATH);
    let settings = Settings::load(&store);
    log::info!(
        "profile loaded (sound {}, music {}, vibration {})",
        settings.sound_enabled,
        settings.music_enabled,
        settings.vibration_enabled
    );

    let ledger = ShopLedger::load(&store);
    let mut sim = Simulation::new(seed);
    sim.start_game(&store, ledger.loadout());

    let mut elapsed = 0.0f32;
    let mut next_report = 5.0f32;
    while sim.run.phase == GamePhase::Running && elapsed < MAX_RUN_SECS {
        steer(&mut sim);
        tick(&mut sim, FRAME_DT, &mut store);
        elapsed += FRAME_DT;
        if elapsed >= next_report {
            next_report += 5.0;
            log::info!(
                "t={elapsed:.0}s score {} money {} speed {:.1} obstacles {}",
                sim.run.score,
                sim.run.current_money,
                sim.run.speed,
                sim.obstacles.len()
            );
        }
    }

    log::info!(
        "run over: cause {:?}, score {} (best {}{}), earned {}, banked {}",
        sim.run.death_cause,
        sim.run.score,
        sim.run.high_score,
        if sim.run.is_new_high_score { ", new record" } else { "" },
        sim.run.money_earned,
        sim.run.total_money
    );

    shop_spree(&mut store, ledger);
}

/// Pick the best adjacent lane: dodge what hurts, chase what pays
fn steer(sim: &mut Simulation) {
    let current = sim.player.lane;
    let mut value = [0.0f32; 3];
    for obstacle in &sim.obstacles {
        if obstacle.consumed || obstacle.depth > consts::PLAYER_DEPTH || obstacle.depth < -25.0 {
            continue;
        }
        // Closer obstacles dominate the decision
        let weight = 25.0 + obstacle.depth;
        let idx = lane_index(obstacle.lane);
        match obstacle.kind.category() {
            Category::Lethal => value[idx] -= 10.0 * weight,
            Category::Financial => value[idx] -= weight,
            Category::Collectible => value[idx] += weight,
        }
    }
    let here = lane_index(current);
    let mut best = here;
    for candidate in [lane_index(current.left()), lane_index(current.right())] {
        if value[candidate] > value[best] {
            best = candidate;
        }
    }
    if best < here {
        sim.player.move_left();
    } else if best > here {
        sim.player.move_right();
    }
}

fn lane_index(lane: Lane) -> usize {
    match lane {
        Lane::Left => 0,
        Lane::Center => 1,
        Lane::Right => 2,
    }
}

/// Spend the banked balance on whatever upgrades it covers
fn shop_spree(store: &mut dyn Store, mut ledger: ShopLedger) {
    for item in debt_dash::shop::SHOP_CATALOG {
        match ledger.buy_item(item.id, store) {
            Ok(bought) => log::info!("shop: bought {}", bought.name),
            Err(err) => log::debug!("shop: {} skipped ({err})", item.name),
        }
    }
    log::info!(
        "loadout for next run: multiplier {:.2}, defense {}",
        ledger.total_multiplier(),
        ledger.total_defense()
    );
}
