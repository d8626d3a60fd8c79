//! Shop catalog and upgrade ledger
//!
//! Permanent upgrades bought with the banked balance: education raises the
//! score multiplier, vehicles absorb financial hits. The owned-item
//! inventory persists through the same store as the rest of the profile.

use serde::{Deserialize, Serialize};

use crate::persistence::{Store, get_total_money, save_total_money};
use crate::sim::RunLoadout;

const INVENTORY_KEY: &str = "debt-dash:inventory";

/// What an owned item contributes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ItemKind {
    /// Adds `multiplier - 1` to the run's score multiplier
    Education { multiplier: f64 },
    /// Adds absorbed-financial-hit charges per run
    Vehicle { defense: u32 },
}

/// A purchasable upgrade
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub cost: i64,
    pub kind: ItemKind,
}

/// The full upgrade catalog
pub const SHOP_CATALOG: &[ShopItem] = &[
    ShopItem {
        id: "edu_1",
        name: "Language Course",
        description: "Multiplies your score by 1.2x.",
        cost: 500,
        kind: ItemKind::Education { multiplier: 1.2 },
    },
    ShopItem {
        id: "edu_2",
        name: "Technical Degree",
        description: "Multiplies your score by 1.4x.",
        cost: 1200,
        kind: ItemKind::Education { multiplier: 1.4 },
    },
    ShopItem {
        id: "edu_3",
        name: "Online College",
        description: "Multiplies your score by 1.6x.",
        cost: 2500,
        kind: ItemKind::Education { multiplier: 1.6 },
    },
    ShopItem {
        id: "edu_4",
        name: "Postgraduate Degree",
        description: "Multiplies your score by 2x.",
        cost: 5000,
        kind: ItemKind::Education { multiplier: 2.0 },
    },
    ShopItem {
        id: "veh_1",
        name: "Bicycle",
        description: "Absorbs 1 financial hit per run.",
        cost: 800,
        kind: ItemKind::Vehicle { defense: 1 },
    },
    ShopItem {
        id: "veh_2",
        name: "Electric Scooter",
        description: "Absorbs 2 financial hits per run.",
        cost: 1500,
        kind: ItemKind::Vehicle { defense: 2 },
    },
    ShopItem {
        id: "veh_3",
        name: "Used Hatchback",
        description: "Absorbs 3 financial hits per run.",
        cost: 3000,
        kind: ItemKind::Vehicle { defense: 3 },
    },
    ShopItem {
        id: "veh_4",
        name: "Armored Sedan",
        description: "Absorbs 5 financial hits per run.",
        cost: 8000,
        kind: ItemKind::Vehicle { defense: 5 },
    },
];

/// Catalog lookup by item id
pub fn item_by_id(id: &str) -> Option<&'static ShopItem> {
    SHOP_CATALOG.iter().find(|item| item.id == id)
}

/// Why a purchase was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    AlreadyOwned,
    UnknownItem(String),
    InsufficientFunds { cost: i64, balance: i64 },
}

impl std::fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PurchaseError::AlreadyOwned => write!(f, "you already own this item"),
            PurchaseError::UnknownItem(id) => write!(f, "no such item: {id}"),
            PurchaseError::InsufficientFunds { cost, balance } => {
                write!(f, "costs {cost}, you have {balance}")
            }
        }
    }
}

impl std::error::Error for PurchaseError {}

/// Owned-upgrade inventory with derived run bonuses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopLedger {
    inventory: Vec<String>,
}

impl ShopLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the persisted inventory; absent or corrupt data means empty
    pub fn load(store: &dyn Store) -> Self {
        let inventory = store
            .get(INVENTORY_KEY)
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(inventory) => Some(inventory),
                Err(err) => {
                    log::warn!("inventory unreadable ({err}), starting empty");
                    None
                }
            })
            .unwrap_or_default();
        Self { inventory }
    }

    fn save(&self, store: &mut dyn Store) {
        match serde_json::to_string(&self.inventory) {
            Ok(raw) => store.set(INVENTORY_KEY, &raw),
            Err(err) => log::warn!("could not encode inventory: {err}"),
        }
    }

    pub fn has_item(&self, id: &str) -> bool {
        self.inventory.iter().any(|owned| owned == id)
    }

    pub fn inventory(&self) -> &[String] {
        &self.inventory
    }

    /// Attempt a purchase: debits the persisted balance and persists the
    /// grown inventory on success
    pub fn buy_item(
        &mut self,
        id: &str,
        store: &mut dyn Store,
    ) -> Result<&'static ShopItem, PurchaseError> {
        if self.has_item(id) {
            return Err(PurchaseError::AlreadyOwned);
        }
        let item = item_by_id(id).ok_or_else(|| PurchaseError::UnknownItem(id.to_string()))?;
        let balance = get_total_money(store);
        if balance < item.cost {
            return Err(PurchaseError::InsufficientFunds { cost: item.cost, balance });
        }
        save_total_money(store, balance - item.cost);
        self.inventory.push(id.to_string());
        self.save(store);
        log::info!("bought {} for {}", item.name, item.cost);
        Ok(item)
    }

    /// Total score multiplier: 1 + sum of each education bonus over 1
    pub fn total_multiplier(&self) -> f64 {
        let bonus: f64 = self
            .owned_items()
            .filter_map(|item| match item.kind {
                ItemKind::Education { multiplier } => Some(multiplier - 1.0),
                ItemKind::Vehicle { .. } => None,
            })
            .sum();
        1.0 + bonus
    }

    /// Total financial hits absorbed per run
    pub fn total_defense(&self) -> u32 {
        self.owned_items()
            .filter_map(|item| match item.kind {
                ItemKind::Vehicle { defense } => Some(defense),
                ItemKind::Education { .. } => None,
            })
            .sum()
    }

    /// Package the derived bonuses for `Simulation::start_game`
    pub fn loadout(&self) -> RunLoadout {
        RunLoadout {
            score_multiplier: self.total_multiplier(),
            defense_charges: self.total_defense(),
        }
    }

    fn owned_items(&self) -> impl Iterator<Item = &'static ShopItem> + '_ {
        self.inventory.iter().filter_map(|id| item_by_id(id))
    }
}
