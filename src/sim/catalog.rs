//! Static obstacle catalog
//!
//! Every spawnable entity, its category and its damage/reward parameters.
//! The category mapping is a single exhaustive match so that adding a kind
//! forces every resolution site to handle it.

use serde::{Deserialize, Serialize};

/// Resolution policy for an entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Instant death on contact
    Lethal,
    /// Drains money on contact
    Financial,
    /// Grants money or a power-up on contact
    Collectible,
}

/// Every concrete thing that can occupy a lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    // Lethal
    Motorbike,
    SpeedingCar,
    StrayDog,
    OpenManhole,
    KiteLine,
    // Financial
    TaxAudit,
    TransferFee,
    TollBooth,
    ImportDuty,
    VehicleTax,
    OverdueBill,
    // Collectible
    Coin,
    Banknote,
    WireTransfer,
    HolidayBonus,
    Shield,
    Magnet,
}

impl EntityType {
    /// Category membership, fixed at compile time
    pub fn category(self) -> Category {
        match self {
            EntityType::Motorbike
            | EntityType::SpeedingCar
            | EntityType::StrayDog
            | EntityType::OpenManhole
            | EntityType::KiteLine => Category::Lethal,
            EntityType::TaxAudit
            | EntityType::TransferFee
            | EntityType::TollBooth
            | EntityType::ImportDuty
            | EntityType::VehicleTax
            | EntityType::OverdueBill => Category::Financial,
            EntityType::Coin
            | EntityType::Banknote
            | EntityType::WireTransfer
            | EntityType::HolidayBonus
            | EntityType::Shield
            | EntityType::Magnet => Category::Collectible,
        }
    }
}

/// How a financial obstacle computes its damage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Damage {
    /// Flat amount
    Fixed(i64),
    /// Percentage of the current balance, floored at
    /// [`crate::consts::PERCENT_DAMAGE_FLOOR`]
    Percentage(u32),
}

/// Timed power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Absorbs financial damage while active
    Shield,
    /// Collects money from every lane while active
    Magnet,
}

/// What a collectible grants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Reward {
    Money(i64),
    PowerUp { kind: PowerUpKind, duration_secs: f32 },
}

/// Category-specific payload of an entity config
///
/// Serialize-only: configs are static data, never read back in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Payload {
    Lethal { death_message: &'static str },
    Financial { damage: Damage },
    Collectible { reward: Reward },
}

impl Payload {
    fn category(&self) -> Category {
        match self {
            Payload::Lethal { .. } => Category::Lethal,
            Payload::Financial { .. } => Category::Financial,
            Payload::Collectible { .. } => Category::Collectible,
        }
    }
}

/// Static configuration for one entity kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntityConfig {
    pub kind: EntityType,
    pub name: &'static str,
    /// Relative likelihood within the kind's category
    pub spawn_weight: u32,
    pub payload: Payload,
}

/// Lethal obstacles
pub const LETHAL_CATALOG: &[EntityConfig] = &[
    EntityConfig {
        kind: EntityType::Motorbike,
        name: "Two Guys on a Motorbike",
        spawn_weight: 8,
        payload: Payload::Lethal { death_message: "Run down by a motorbike" },
    },
    EntityConfig {
        kind: EntityType::SpeedingCar,
        name: "Speeding Car",
        spawn_weight: 4,
        payload: Payload::Lethal { death_message: "Flattened by a speeding car" },
    },
    EntityConfig {
        kind: EntityType::StrayDog,
        name: "Angry Stray Dog",
        spawn_weight: 5,
        payload: Payload::Lethal { death_message: "Bitten by the stray" },
    },
    EntityConfig {
        kind: EntityType::OpenManhole,
        name: "Open Manhole",
        spawn_weight: 3,
        payload: Payload::Lethal { death_message: "Fell down a manhole" },
    },
    EntityConfig {
        kind: EntityType::KiteLine,
        name: "Glass-Coated Kite Line",
        spawn_weight: 2,
        payload: Payload::Lethal { death_message: "Clotheslined by a kite string" },
    },
];

/// Financial obstacles
pub const FINANCIAL_CATALOG: &[EntityConfig] = &[
    EntityConfig {
        kind: EntityType::TaxAudit,
        name: "Tax Audit",
        spawn_weight: 5,
        payload: Payload::Financial { damage: Damage::Percentage(15) },
    },
    EntityConfig {
        kind: EntityType::TransferFee,
        name: "Transfer Fee",
        spawn_weight: 20,
        payload: Payload::Financial { damage: Damage::Fixed(50) },
    },
    EntityConfig {
        kind: EntityType::TollBooth,
        name: "Toll Booth",
        spawn_weight: 15,
        payload: Payload::Financial { damage: Damage::Fixed(100) },
    },
    EntityConfig {
        kind: EntityType::ImportDuty,
        name: "Import Duty",
        spawn_weight: 10,
        payload: Payload::Financial { damage: Damage::Fixed(150) },
    },
    EntityConfig {
        kind: EntityType::VehicleTax,
        name: "Overdue Vehicle Tax",
        spawn_weight: 8,
        payload: Payload::Financial { damage: Damage::Fixed(200) },
    },
    EntityConfig {
        kind: EntityType::OverdueBill,
        name: "Overdue Bill",
        spawn_weight: 15,
        payload: Payload::Financial { damage: Damage::Fixed(75) },
    },
];

/// Collectibles
pub const COLLECTIBLE_CATALOG: &[EntityConfig] = &[
    EntityConfig {
        kind: EntityType::Coin,
        name: "Coin",
        spawn_weight: 20,
        payload: Payload::Collectible { reward: Reward::Money(50) },
    },
    EntityConfig {
        kind: EntityType::Banknote,
        name: "Banknote",
        spawn_weight: 8,
        payload: Payload::Collectible { reward: Reward::Money(100) },
    },
    EntityConfig {
        kind: EntityType::WireTransfer,
        name: "Incoming Wire Transfer",
        spawn_weight: 5,
        payload: Payload::Collectible { reward: Reward::Money(75) },
    },
    EntityConfig {
        kind: EntityType::HolidayBonus,
        name: "Holiday Bonus",
        spawn_weight: 2,
        payload: Payload::Collectible { reward: Reward::Money(200) },
    },
    EntityConfig {
        kind: EntityType::Shield,
        name: "Anti-Tax Shield",
        spawn_weight: 1,
        payload: Payload::Collectible {
            reward: Reward::PowerUp { kind: PowerUpKind::Shield, duration_secs: 5.0 },
        },
    },
    EntityConfig {
        kind: EntityType::Magnet,
        name: "Money Magnet",
        spawn_weight: 1,
        payload: Payload::Collectible {
            reward: Reward::PowerUp { kind: PowerUpKind::Magnet, duration_secs: 10.0 },
        },
    },
];

/// All seventeen kinds, for iteration in validation and tests
pub const ALL_ENTITY_TYPES: &[EntityType] = &[
    EntityType::Motorbike,
    EntityType::SpeedingCar,
    EntityType::StrayDog,
    EntityType::OpenManhole,
    EntityType::KiteLine,
    EntityType::TaxAudit,
    EntityType::TransferFee,
    EntityType::TollBooth,
    EntityType::ImportDuty,
    EntityType::VehicleTax,
    EntityType::OverdueBill,
    EntityType::Coin,
    EntityType::Banknote,
    EntityType::WireTransfer,
    EntityType::HolidayBonus,
    EntityType::Shield,
    EntityType::Magnet,
];

/// Catalog slice for a category
pub fn catalog_for(category: Category) -> &'static [EntityConfig] {
    match category {
        Category::Lethal => LETHAL_CATALOG,
        Category::Financial => FINANCIAL_CATALOG,
        Category::Collectible => COLLECTIBLE_CATALOG,
    }
}

/// Look up the static config for a kind
///
/// A miss is non-fatal; resolution falls back to default penalty/reward
/// values. `validate_catalog` guarantees it cannot happen for a validated
/// build.
pub fn config_of(kind: EntityType) -> Option<&'static EntityConfig> {
    catalog_for(kind.category()).iter().find(|c| c.kind == kind)
}

/// Catalog invariant violations, detectable at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A kind is missing from its category's catalog
    Missing(EntityType),
    /// A kind appears more than once across the catalogs
    Duplicate(EntityType),
    /// A config's payload disagrees with its kind's category
    CategoryMismatch(EntityType),
    /// A category's weights sum to zero
    EmptyCategory(Category),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Missing(k) => write!(f, "entity {k:?} has no catalog entry"),
            CatalogError::Duplicate(k) => write!(f, "entity {k:?} appears more than once"),
            CatalogError::CategoryMismatch(k) => {
                write!(f, "entity {k:?} payload disagrees with its category")
            }
            CatalogError::EmptyCategory(c) => {
                write!(f, "category {c:?} has zero total spawn weight")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Startup validation of the static catalogs
///
/// The only legitimately fatal check in the crate; call it before entering
/// the frame loop, never from inside it.
pub fn validate_catalog() -> Result<(), CatalogError> {
    for &kind in ALL_ENTITY_TYPES {
        let own = catalog_for(kind.category());
        let in_own = own.iter().filter(|c| c.kind == kind).count();
        let everywhere = [LETHAL_CATALOG, FINANCIAL_CATALOG, COLLECTIBLE_CATALOG]
            .iter()
            .flat_map(|c| c.iter())
            .filter(|c| c.kind == kind)
            .count();
        match (in_own, everywhere) {
            (0, 0) => return Err(CatalogError::Missing(kind)),
            // Listed only under a foreign category
            (0, _) => return Err(CatalogError::CategoryMismatch(kind)),
            (1, 1) => {}
            _ => return Err(CatalogError::Duplicate(kind)),
        }
        if let Some(config) = own.iter().find(|c| c.kind == kind)
            && config.payload.category() != kind.category()
        {
            return Err(CatalogError::CategoryMismatch(kind));
        }
    }
    for category in [Category::Lethal, Category::Financial, Category::Collectible] {
        let total: u32 = catalog_for(category).iter().map(|c| c.spawn_weight).sum();
        if total == 0 {
            return Err(CatalogError::EmptyCategory(category));
        }
    }
    Ok(())
}
