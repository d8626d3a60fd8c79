//! Player-profile persistence
//!
//! The simulation never talks to storage directly; it is handed a [`Store`]
//! and treats it as a synchronous key-value accessor. Reads fall back to
//! defaults and writes are best-effort: a broken backend degrades the
//! profile, never the run.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Storage keys
const TOTAL_MONEY_KEY: &str = "debt-dash:total_money";
const HIGH_SCORE_KEY: &str = "debt-dash:high_score";

/// String key-value storage boundary
///
/// Implementations must not block the frame: `set` is fire-and-forget and
/// failures stay inside the implementation.
pub trait Store {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Banked balance, defaulting to zero for a fresh profile
pub fn get_total_money(store: &dyn Store) -> i64 {
    store
        .get(TOTAL_MONEY_KEY)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0)
}

pub fn save_total_money(store: &mut dyn Store, amount: i64) {
    store.set(TOTAL_MONEY_KEY, &amount.to_string());
}

/// Banks an amount on top of the persisted balance and returns the new total
pub fn add_to_total_money(store: &mut dyn Store, amount: i64) -> i64 {
    let total = get_total_money(store) + amount;
    save_total_money(store, total);
    total
}

/// Best distance score, defaulting to zero
pub fn get_high_score(store: &dyn Store) -> u64 {
    store
        .get(HIGH_SCORE_KEY)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0)
}

pub fn save_high_score(store: &mut dyn Store, score: u64) {
    store.set(HIGH_SCORE_KEY, &score.to_string());
}

/// Persists the score if it beats the stored best; returns whether it did
pub fn update_high_score_if_better(store: &mut dyn Store, score: u64) -> bool {
    if score > get_high_score(store) {
        save_high_score(store, score);
        true
    } else {
        false
    }
}

/// In-memory store for tests and ephemeral profiles
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// JSON-file-backed store
///
/// The whole profile is one flat JSON object. An unreadable or corrupt file
/// yields an empty profile; write errors are logged and swallowed.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    log::warn!("profile {} is corrupt ({err}), starting fresh", path.display());
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self { path, entries }
    }

    fn flush(&self) {
        let payload = match serde_json::to_string_pretty(&self.entries) {
            Ok(payload) => payload,
            Err(err) => {
                log::warn!("could not encode profile: {err}");
                return;
            }
        };
        if let Some(parent) = self.path.parent()
            && let Err(err) = fs::create_dir_all(parent)
        {
            log::warn!("could not create {}: {err}", parent.display());
            return;
        }
        if let Err(err) = fs::write(&self.path, payload) {
            log::warn!("could not write profile {}: {err}", self.path.display());
        }
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush();
    }
}
