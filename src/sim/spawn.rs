//! Obstacle spawn policy
//!
//! Decides what occupies a lane and when. Category odds shift with distance
//! traveled, kinds are weighted within their category, and a thin layer of
//! anti-frustration rules keeps early waves and lethal pile-ups in check.
//! Every roll comes from the run's seeded RNG, so a seed replays exactly.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

use super::catalog::{Category, EntityType, catalog_for};
use super::state::{Lane, Obstacle, Simulation};

/// Spawn cadence and wave bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnState {
    /// Seconds since the last spawn
    pub since_last_spawn: f32,
    /// Current seconds between spawns; stepped down by escalation
    pub spawn_interval: f32,
    /// Completed waves this run
    pub wave_count: u32,
    /// Obstacles spawned in the current wave
    pub spawned_in_wave: u32,
    /// Distance units since the last difficulty escalation
    pub distance_since_escalation: f32,
}

impl Default for SpawnState {
    fn default() -> Self {
        Self {
            since_last_spawn: 0.0,
            spawn_interval: BASE_SPAWN_INTERVAL,
            wave_count: 0,
            spawned_in_wave: 0,
            distance_since_escalation: 0.0,
        }
    }
}

/// Category weights at a given distance, always summing to 100
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryWeights {
    pub lethal: f32,
    pub financial: f32,
    pub collectible: f32,
}

impl CategoryWeights {
    /// Distance-shifted weights: lethal and financial odds grow with
    /// distance, collectibles shrink but never starve
    pub fn at_distance(distance: f32) -> Self {
        let multiplier = (distance.max(0.0) / DISTANCE_MULTIPLIER_SCALE)
            .min(DISTANCE_MULTIPLIER_CAP);
        let lethal = BASE_LETHAL_WEIGHT + LETHAL_WEIGHT_SHIFT * multiplier;
        let financial = BASE_FINANCIAL_WEIGHT + FINANCIAL_WEIGHT_SHIFT * multiplier;
        let collectible = (BASE_COLLECTIBLE_WEIGHT + COLLECTIBLE_WEIGHT_SHIFT * multiplier)
            .max(COLLECTIBLE_WEIGHT_FLOOR);
        Self { lethal, financial, collectible }.normalized()
    }

    fn total(&self) -> f32 {
        self.lethal + self.financial + self.collectible
    }

    /// Rescale so the three weights sum to 100
    fn normalized(self) -> Self {
        let scale = 100.0 / self.total();
        Self {
            lethal: self.lethal * scale,
            financial: self.financial * scale,
            collectible: self.collectible * scale,
        }
    }

    /// Map a uniform roll in [0, 100) to a category
    pub fn pick(&self, mut roll: f32) -> Category {
        roll -= self.lethal;
        if roll < 0.0 {
            return Category::Lethal;
        }
        roll -= self.financial;
        if roll < 0.0 {
            return Category::Financial;
        }
        Category::Collectible
    }
}

/// Weighted kind selection within a category
///
/// Classic cumulative-weight walk: subtract each weight from the roll until
/// it drops to zero or below. Falls back to the first entry on floating-point
/// edge cases.
pub fn pick_kind(category: Category, rng: &mut Pcg32) -> EntityType {
    let catalog = catalog_for(category);
    let total: u32 = catalog.iter().map(|c| c.spawn_weight).sum();
    let mut roll = rng.random_range(0.0..total as f32);
    for config in catalog {
        roll -= config.spawn_weight as f32;
        if roll <= 0.0 {
            return config.kind;
        }
    }
    catalog[0].kind
}

/// Lanes are chosen uniformly, independent of kind
pub fn pick_lane(rng: &mut Pcg32) -> Lane {
    Lane::ALL[rng.random_range(0..Lane::ALL.len())]
}

impl Simulation {
    /// Roll and place one obstacle at the horizon, then advance the wave
    /// bookkeeping
    pub(crate) fn spawn_obstacle(&mut self) {
        let weights = CategoryWeights::at_distance(self.run.distance_traveled);
        let roll = self.rng.random_range(0.0..100.0);
        let mut category = weights.pick(roll);

        // Anti-frustration: the opening waves are lethal-free, and a second
        // lethal never stacks behind one still approaching
        if category == Category::Lethal && !self.lethal_allowed() {
            category = Category::Financial;
        }

        let kind = pick_kind(category, &mut self.rng);
        let lane = pick_lane(&mut self.rng);
        let id = self.next_obstacle_id();
        self.obstacles.push(Obstacle {
            id,
            kind,
            lane,
            depth: SPAWN_DEPTH,
            consumed: false,
        });
        log::debug!(
            "spawn #{id}: {kind:?} in {lane:?} (wave {})",
            self.spawn.wave_count
        );

        self.spawn.spawned_in_wave += 1;
        if self.spawn.spawned_in_wave >= WAVE_SIZE {
            self.spawn.wave_count += 1;
            self.spawn.spawned_in_wave = 0;
        }
    }

    fn lethal_allowed(&self) -> bool {
        if self.spawn.wave_count < LETHAL_SAFE_WAVES {
            return false;
        }
        !self.obstacles.iter().any(|o| {
            !o.consumed
                && o.kind.category() == Category::Lethal
                && o.depth < LETHAL_APPROACH_DEPTH
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::state::RunLoadout;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn running_sim(seed: u64) -> Simulation {
        let store = MemoryStore::new();
        let mut sim = Simulation::new(seed);
        sim.start_game(&store, RunLoadout::default());
        sim
    }

    #[test]
    fn baseline_weights_sum_to_100() {
        let weights = CategoryWeights::at_distance(0.0);
        assert!((weights.total() - 100.0).abs() < 1e-3);
        assert!((weights.lethal - 15.0).abs() < 1e-3);
        assert!((weights.financial - 50.0).abs() < 1e-3);
        assert!((weights.collectible - 35.0).abs() < 1e-3);
    }

    #[test]
    fn weights_cap_at_twice_the_scale_distance() {
        let at_cap = CategoryWeights::at_distance(2000.0);
        let past_cap = CategoryWeights::at_distance(50_000.0);
        assert_eq!(at_cap, past_cap);
        // At the cap, lethal and financial odds have grown
        assert!(at_cap.lethal > 15.0);
        assert!(at_cap.financial > 50.0);
        assert!(at_cap.collectible < 35.0);
    }

    #[test]
    fn collectible_weight_never_starves() {
        for distance in [0.0, 500.0, 1000.0, 1500.0, 2000.0, 1e6] {
            let raw = BASE_COLLECTIBLE_WEIGHT
                + COLLECTIBLE_WEIGHT_SHIFT
                    * (distance / DISTANCE_MULTIPLIER_SCALE).min(DISTANCE_MULTIPLIER_CAP);
            let floored = raw.max(COLLECTIBLE_WEIGHT_FLOOR);
            assert!(floored >= COLLECTIBLE_WEIGHT_FLOOR);
        }
    }

    proptest! {
        #[test]
        fn weights_always_renormalize_to_100(distance in 0.0f32..10_000.0) {
            let weights = CategoryWeights::at_distance(distance);
            prop_assert!((weights.total() - 100.0).abs() < 1e-3);
            prop_assert!(weights.lethal >= 0.0);
            prop_assert!(weights.financial >= 0.0);
            prop_assert!(weights.collectible > 0.0);
        }

        #[test]
        fn category_pick_covers_the_whole_roll_range(
            distance in 0.0f32..10_000.0,
            roll in 0.0f32..100.0,
        ) {
            let weights = CategoryWeights::at_distance(distance);
            // Must not panic and must return one of the three
            let _ = weights.pick(roll);
        }
    }

    #[test]
    fn spawn_sequence_is_deterministic_for_a_seed() {
        let mut a = running_sim(42);
        let mut b = running_sim(42);
        for _ in 0..200 {
            a.spawn_obstacle();
            b.spawn_obstacle();
        }
        let seq_a: Vec<_> = a.obstacles.iter().map(|o| (o.kind, o.lane)).collect();
        let seq_b: Vec<_> = b.obstacles.iter().map(|o| (o.kind, o.lane)).collect();
        assert_eq!(seq_a, seq_b);

        let mut c = running_sim(43);
        for _ in 0..200 {
            c.spawn_obstacle();
        }
        let seq_c: Vec<_> = c.obstacles.iter().map(|o| (o.kind, o.lane)).collect();
        assert_ne!(seq_a, seq_c, "different seeds should diverge");
    }

    #[test]
    fn no_lethal_spawns_before_wave_three() {
        let mut sim = running_sim(7);
        let mut draws = 0;
        while draws < 10_000 {
            // Rewind the wave clock, keep the RNG stream rolling
            sim.spawn.wave_count = 0;
            sim.spawn.spawned_in_wave = 0;
            sim.obstacles.clear();
            while sim.spawn.wave_count < LETHAL_SAFE_WAVES {
                sim.spawn_obstacle();
                draws += 1;
            }
            for obstacle in &sim.obstacles {
                assert_ne!(
                    obstacle.kind.category(),
                    Category::Lethal,
                    "lethal {:?} spawned during the safe waves",
                    obstacle.kind
                );
            }
        }
    }

    #[test]
    fn lethal_draw_downgrades_while_one_is_still_approaching() {
        let mut sim = running_sim(11);
        sim.spawn.wave_count = LETHAL_SAFE_WAVES;
        let id = sim.next_obstacle_id();
        sim.obstacles.push(Obstacle {
            id,
            kind: EntityType::Motorbike,
            lane: Lane::Center,
            depth: -30.0,
            consumed: false,
        });
        for _ in 0..2_000 {
            sim.spawn_obstacle();
            // Pin the wave counter so the safe-wave rule stays out of the way
            sim.spawn.wave_count = LETHAL_SAFE_WAVES;
        }
        let lethals = sim
            .obstacles
            .iter()
            .filter(|o| o.kind.category() == Category::Lethal)
            .count();
        assert_eq!(lethals, 1, "only the seeded lethal may exist");
    }

    #[test]
    fn lethal_can_spawn_once_safe_waves_pass_and_buffer_clears() {
        let mut sim = running_sim(3);
        sim.spawn.wave_count = LETHAL_SAFE_WAVES;
        sim.run.distance_traveled = 2000.0; // max lethal odds
        let mut saw_lethal = false;
        for _ in 0..2_000 {
            sim.obstacles.clear();
            sim.spawn.wave_count = LETHAL_SAFE_WAVES;
            sim.spawn_obstacle();
            if sim.obstacles[0].kind.category() == Category::Lethal {
                saw_lethal = true;
                break;
            }
        }
        assert!(saw_lethal, "lethals should be reachable after the safe waves");
    }

    #[test]
    fn waves_hold_at_most_two_spawns() {
        let mut sim = running_sim(5);
        for spawned in 1..=20u32 {
            sim.spawn_obstacle();
            assert_eq!(sim.spawn.wave_count, spawned / WAVE_SIZE);
            assert_eq!(sim.spawn.spawned_in_wave, spawned % WAVE_SIZE);
        }
    }

    #[test]
    fn kind_pick_respects_category() {
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..500 {
            assert_eq!(pick_kind(Category::Lethal, &mut rng).category(), Category::Lethal);
            assert_eq!(
                pick_kind(Category::Financial, &mut rng).category(),
                Category::Financial
            );
            assert_eq!(
                pick_kind(Category::Collectible, &mut rng).category(),
                Category::Collectible
            );
        }
    }

    #[test]
    fn lane_pick_reaches_all_three_lanes() {
        let mut rng = Pcg32::seed_from_u64(13);
        let mut seen = [false; 3];
        for _ in 0..100 {
            match pick_lane(&mut rng) {
                Lane::Left => seen[0] = true,
                Lane::Center => seen[1] = true,
                Lane::Right => seen[2] = true,
            }
        }
        assert_eq!(seen, [true, true, true]);
    }
}
