//! Ties a `GameState` to the player identity and the session store: name
//! entry, save-on-pickup, save-on-exit and end-of-run bookkeeping.

use anyhow::{Result, ensure};

use crate::config::{GameConfig, LevelData};
use crate::model::{GameEvent, GamePhase, GameState};
use crate::state::InputCommand;
use crate::storage::SessionStore;

pub struct GameSession {
    store: SessionStore,
    identity: Option<String>,
    game: GameState,
}

impl GameSession {
    pub fn new(store: SessionStore, config: GameConfig, level: LevelData) -> Self {
        Self {
            store,
            identity: None,
            game: GameState::new(config, level),
        }
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn phase(&self) -> GamePhase {
        self.game.phase
    }

    /// Name remembered from an earlier visit, if any.
    pub fn remembered_player(&self) -> Option<String> {
        match self.store.current_player() {
            Ok(name) => name,
            Err(e) => {
                log::warn!("could not read remembered player: {e:#}");
                None
            }
        }
    }

    /// Accepts a name from the entry form and starts that player's run,
    /// resuming saved progress when there is any. Blank names are rejected
    /// without touching any state.
    pub fn submit_name(&mut self, raw: &str) -> Result<String> {
        let name = raw.trim();
        ensure!(!name.is_empty(), "Please enter a valid name!");
        if self.game.phase != GamePhase::NotStarted {
            log::debug!("name submitted mid-run; ignored");
            return Ok(name.to_string());
        }

        if self.identity.as_deref() != Some(name) {
            self.identity = Some(name.to_string());
            if let Err(e) = self.store.set_current_player(name) {
                log::warn!("could not remember player `{name}`: {e:#}");
            }
        }

        let session = self.store.load_or_default(name, &self.game.config);
        self.game.reset();
        self.game.restore(&session);
        self.game.start();
        log::info!(
            "{name} starts with {}/{} trees, {} energy, {}s",
            session.collected_trees,
            self.game.config.total_trees,
            session.player_energy,
            session.game_timer
        );
        Ok(name.to_string())
    }

    pub fn queue_input(&mut self, cmd: InputCommand) {
        self.game.queue_input(cmd);
    }

    /// One display frame. Tree pickups are saved straight away.
    pub fn frame(&mut self, dt_ms: f64) -> Vec<GameEvent> {
        let was_playing = self.game.phase == GamePhase::Playing;
        let events = self.game.tick(dt_ms);
        for ev in &events {
            log::debug!("{ev:?}");
            if matches!(ev, GameEvent::TreeCollected { .. }) {
                self.persist();
            }
        }
        if was_playing && self.game.is_over() {
            self.finish_run();
        }
        events
    }

    /// One countdown second.
    pub fn second(&mut self) -> Option<GameEvent> {
        let ev = self.game.tick_second();
        if ev.is_some() {
            self.finish_run();
        }
        ev
    }

    /// Page is going away: keep whatever the running game has.
    pub fn save_now(&self) {
        if self.game.phase == GamePhase::Playing {
            self.persist();
        }
    }

    /// Back to the name form after a finished run.
    pub fn retry(&mut self) {
        self.game.reset();
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(self.identity(), &self.game.snapshot()) {
            log::warn!("saving progress failed: {e:#}");
        }
    }

    // A finished run leaves nothing to resume.
    fn finish_run(&self) {
        log::info!("run over: {:?}", self.game.phase);
        if let Some(name) = self.identity() {
            if let Err(e) = self.store.clear(name) {
                log::warn!("could not clear session for `{name}`: {e:#}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LossCause;
    use crate::state::Key;
    use crate::storage::{KeyValueStore, MemoryStore, Session};

    fn session_with(mem: &MemoryStore) -> GameSession {
        let cfg = GameConfig::default();
        let level = LevelData::bundled(&cfg).unwrap();
        GameSession::new(SessionStore::new(Box::new(mem.clone())), cfg, level)
    }

    fn stored(mem: &MemoryStore, name: &str) -> Option<Session> {
        SessionStore::new(Box::new(mem.clone())).load(name).unwrap()
    }

    #[test]
    fn new_player_starts_with_defaults() {
        let mem = MemoryStore::default();
        let mut s = session_with(&mem);
        assert_eq!(s.submit_name("  Alice ").unwrap(), "Alice");
        assert_eq!(s.identity(), Some("Alice"));
        assert_eq!(s.phase(), GamePhase::Playing);
        assert_eq!(
            s.game().snapshot(),
            Session {
                collected_trees: 0,
                player_energy: 100,
                game_timer: 60
            }
        );
        assert_eq!(mem.get("currentPlayer").unwrap().as_deref(), Some("Alice"));
    }

    #[test]
    fn blank_name_is_rejected_without_side_effects() {
        let mem = MemoryStore::default();
        let mut s = session_with(&mem);
        assert!(s.submit_name("   ").is_err());
        assert!(s.submit_name("").is_err());
        assert_eq!(s.identity(), None);
        assert_eq!(s.phase(), GamePhase::NotStarted);
        assert_eq!(mem.get("currentPlayer").unwrap(), None);
    }

    #[test]
    fn returning_player_resumes_saved_progress() {
        let mem = MemoryStore::default();
        SessionStore::new(Box::new(mem.clone()))
            .save(
                Some("Alice"),
                &Session {
                    collected_trees: 2,
                    player_energy: 60,
                    game_timer: 25,
                },
            )
            .unwrap();
        SessionStore::new(Box::new(mem.clone()))
            .set_current_player("Alice")
            .unwrap();

        let mut s = session_with(&mem);
        assert_eq!(s.remembered_player().as_deref(), Some("Alice"));
        s.submit_name("Alice").unwrap();
        assert_eq!(s.game().collected_trees, 2);
        assert_eq!(s.game().player.energy, 60);
        assert_eq!(s.game().countdown.remaining, 25);
        assert_eq!(s.game().entities.live_trees().count(), 3);
    }

    #[test]
    fn tree_pickup_saves_immediately() {
        let mem = MemoryStore::default();
        let mut s = session_with(&mem);
        s.submit_name("Alice").unwrap();
        let tree = s.game.level.trees[1];
        s.game.player.x = tree.x;
        s.game.player.y = tree.y;
        let events = s.frame(16.0);
        assert!(events.contains(&GameEvent::TreeCollected { index: 1, collected: 1 }));
        assert_eq!(stored(&mem, "Alice").map(|x| x.collected_trees), Some(1));
    }

    #[test]
    fn save_now_snapshots_a_running_game_only() {
        let mem = MemoryStore::default();
        let mut s = session_with(&mem);
        s.save_now();
        assert_eq!(stored(&mem, "Alice"), None);

        s.submit_name("Alice").unwrap();
        s.second();
        s.save_now();
        assert_eq!(stored(&mem, "Alice").map(|x| x.game_timer), Some(59));
    }

    #[test]
    fn timeout_ends_run_and_clears_session() {
        let mem = MemoryStore::default();
        let mut s = session_with(&mem);
        s.submit_name("Alice").unwrap();
        s.save_now();
        let mut last = None;
        for _ in 0..60 {
            last = s.second().or(last);
        }
        assert_eq!(last, Some(GameEvent::TimeUp));
        assert_eq!(s.phase(), GamePhase::Lost(LossCause::TimeUp));
        assert_eq!(stored(&mem, "Alice"), None);
        assert_eq!(s.second(), None);
    }

    #[test]
    fn winning_run_leaves_nothing_to_resume() {
        let mem = MemoryStore::default();
        let mut s = session_with(&mem);
        s.submit_name("Alice").unwrap();
        let trees = s.game.level.trees.clone();
        for (i, tree) in trees.iter().enumerate().take(4) {
            s.game.player.x = tree.x;
            s.game.player.y = tree.y;
            s.frame(16.0);
            assert_eq!(stored(&mem, "Alice").map(|x| x.collected_trees), Some(i as u32 + 1));
        }

        let last = trees[4];
        s.game.player.x = last.x;
        s.game.player.y = last.y;
        let events = s.frame(16.0);
        assert_eq!(events.last(), Some(&GameEvent::Won));
        assert_eq!(s.phase(), GamePhase::Won);
        assert_eq!(stored(&mem, "Alice"), None);

        s.retry();
        s.submit_name("Alice").unwrap();
        assert_eq!(s.game().collected_trees, 0);
        assert_eq!(s.phase(), GamePhase::Playing);
    }

    #[test]
    fn retry_returns_to_name_entry_with_fresh_defaults() {
        let mem = MemoryStore::default();
        let mut s = session_with(&mem);
        s.submit_name("Alice").unwrap();
        s.save_now();
        assert!(stored(&mem, "Alice").is_some());
        s.game.player.energy = 10;
        let h = s.game.level.hazards[0];
        s.game.player.x = h.x;
        s.game.player.y = h.y;
        s.frame(16.0);
        assert_eq!(s.phase(), GamePhase::Lost(LossCause::Defeated));
        assert_eq!(stored(&mem, "Alice"), None);

        s.retry();
        assert_eq!(s.phase(), GamePhase::NotStarted);
        assert_eq!(s.identity(), Some("Alice"));
        s.submit_name("Alice").unwrap();
        assert_eq!(s.game().player.energy, 100);
        assert_eq!(s.game().countdown.remaining, 60);
    }

    #[test]
    fn identities_do_not_share_progress() {
        let mem = MemoryStore::default();
        let mut s = session_with(&mem);
        s.submit_name("Alice").unwrap();
        s.queue_input(crate::state::InputCommand::KeyDown(Key::Right));
        let tree = s.game.level.trees[0];
        s.game.player.x = tree.x;
        s.game.player.y = tree.y;
        s.frame(16.0);
        assert_eq!(stored(&mem, "Alice").map(|x| x.collected_trees), Some(1));

        s.retry();
        s.submit_name("Bob").unwrap();
        assert_eq!(s.game().collected_trees, 0);
        assert_eq!(mem.get("currentPlayer").unwrap().as_deref(), Some("Bob"));
        assert_eq!(stored(&mem, "Alice").map(|x| x.collected_trees), Some(1));
    }
}
