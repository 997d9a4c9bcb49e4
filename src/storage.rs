//! Per-player progress persisted in a string key-value store
//! (`window.localStorage` in the browser).

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

pub const CURRENT_PLAYER_KEY: &str = "currentPlayer";
const SESSION_KEY_PREFIX: &str = "gameState_";

pub fn session_key(identity: &str) -> String {
    format!("{SESSION_KEY_PREFIX}{identity}")
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// `window.localStorage`.
pub struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    pub fn open() -> Result<Self> {
        let window = web_sys::window().context("no global `window`")?;
        let storage = window
            .local_storage()
            .map_err(|e| anyhow!("localStorage access denied: {:?}", e))?
            .context("localStorage unavailable")?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| anyhow!("localStorage get `{}`: {:?}", key, e))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| anyhow!("localStorage set `{}`: {:?}", key, e))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| anyhow!("localStorage remove `{}`: {:?}", key, e))
    }
}

/// In-memory store; clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Saved progress for one player, stored as
/// `{"collectedTrees":..,"playerEnergy":..,"gameTimer":..}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub collected_trees: u32,
    #[serde(default = "default_energy")]
    pub player_energy: i32,
    #[serde(default = "default_timer")]
    pub game_timer: u32,
}

fn default_energy() -> i32 {
    GameConfig::default().max_energy
}

fn default_timer() -> u32 {
    GameConfig::default().countdown_secs
}

impl Session {
    pub fn fresh(cfg: &GameConfig) -> Self {
        Self {
            collected_trees: 0,
            player_energy: cfg.max_energy,
            game_timer: cfg.countdown_secs,
        }
    }

    /// Replaces values that would make a resumed run end on its first tick.
    pub fn sanitized(self, cfg: &GameConfig) -> Self {
        Self {
            collected_trees: self.collected_trees.min(cfg.total_trees),
            player_energy: if (1..=cfg.max_energy).contains(&self.player_energy) {
                self.player_energy
            } else {
                cfg.max_energy
            },
            game_timer: if self.game_timer == 0 {
                cfg.countdown_secs
            } else {
                self.game_timer.min(cfg.countdown_secs)
            },
        }
    }
}

pub struct SessionStore {
    backend: Box<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// localStorage when the browser allows it, memory otherwise.
    pub fn browser() -> Self {
        match LocalStore::open() {
            Ok(local) => Self::new(Box::new(local)),
            Err(e) => {
                log::warn!("progress will not survive a reload: {e:#}");
                Self::new(Box::new(MemoryStore::default()))
            }
        }
    }

    pub fn save(&self, identity: Option<&str>, session: &Session) -> Result<()> {
        let Some(identity) = identity else {
            return Ok(());
        };
        let raw = serde_json::to_string(session)?;
        self.backend.set(&session_key(identity), &raw)
    }

    /// Stored session for `identity`. A blob that does not parse counts as
    /// absent.
    pub fn load(&self, identity: &str) -> Result<Option<Session>> {
        let Some(raw) = self.backend.get(&session_key(identity))? else {
            return Ok(None);
        };
        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                log::warn!("ignoring corrupt session for `{identity}`: {e}");
                Ok(None)
            }
        }
    }

    /// Like `load`, but always yields something playable.
    pub fn load_or_default(&self, identity: &str, cfg: &GameConfig) -> Session {
        match self.load(identity) {
            Ok(Some(session)) => session.sanitized(cfg),
            Ok(None) => Session::fresh(cfg),
            Err(e) => {
                log::warn!("could not read session for `{identity}`: {e:#}");
                Session::fresh(cfg)
            }
        }
    }

    pub fn clear(&self, identity: &str) -> Result<()> {
        self.backend.remove(&session_key(identity))
    }

    pub fn current_player(&self) -> Result<Option<String>> {
        Ok(self
            .backend
            .get(CURRENT_PLAYER_KEY)?
            .filter(|name| !name.trim().is_empty()))
    }

    pub fn set_current_player(&self, identity: &str) -> Result<()> {
        self.backend.set(CURRENT_PLAYER_KEY, identity)
    }
}
