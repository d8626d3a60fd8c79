//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Driven by explicit elapsed-time deltas only
//! - Seeded RNG only
//! - No rendering, input or platform dependencies
//!
//! The excluded collaborators (renderer, input, audio, storage backend)
//! talk to it through `Simulation`, `Hooks` and the `Store` trait.

pub mod catalog;
pub mod collision;
pub mod economy;
pub mod spawn;
pub mod state;
pub mod tick;

pub use catalog::{
    ALL_ENTITY_TYPES, COLLECTIBLE_CATALOG, CatalogError, Category, Damage, EntityConfig,
    EntityType, FINANCIAL_CATALOG, LETHAL_CATALOG, Payload, PowerUpKind, Reward, catalog_for,
    config_of, validate_catalog,
};
pub use collision::{Absorb, Resolution};
pub use spawn::{CategoryWeights, SpawnState};
pub use state::{
    ActiveEffects, DeathCause, GamePhase, Hooks, Lane, Obstacle, PlayerState, RunLoadout,
    RunState, Simulation,
};
pub use tick::tick;
