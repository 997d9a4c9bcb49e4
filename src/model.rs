//! Core game aggregate for Tree Energy.
//! `GameState` owns everything a run needs and advances one display frame or
//! one countdown second at a time. Nothing in here touches the browser.

use crate::config::{GameConfig, LevelData, Point};
use crate::state::{
    Camera, Countdown, EntityRegistry, InputCommand, InputState, SpriteAnimator,
    check_collisions,
};
use crate::storage::Session;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    /// Row of this facing on the player sprite sheet.
    pub fn sheet_row(self) -> u32 {
        match self {
            Direction::Down => 0,
            Direction::Left => 1,
            Direction::Right => 2,
            Direction::Up => 3,
        }
    }

    pub fn delta(self, speed: f64) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, -speed),
            Direction::Down => (0.0, speed),
            Direction::Left => (-speed, 0.0),
            Direction::Right => (speed, 0.0),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Player {
    /// Top-left corner in world pixels.
    pub x: f64,
    pub y: f64,
    /// May dip below zero for the frame a hazard lands; see `check_collisions`.
    pub energy: i32,
    pub facing: Direction,
}

impl Player {
    pub fn pos(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LossCause {
    Defeated,
    TimeUp,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GamePhase {
    #[default]
    NotStarted,
    Playing,
    Won,
    Lost(LossCause),
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    EnergyCollected { index: usize, energy: i32 },
    Damaged { index: usize, energy: i32 },
    TreeCollected { index: usize, collected: u32 },
    PlayerDefeated,
    TimeUp,
    Won,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub config: GameConfig,
    pub level: LevelData,
    pub phase: GamePhase,
    pub player: Player,
    pub entities: EntityRegistry,
    pub collected_trees: u32,
    pub countdown: Countdown,
    pub camera: Camera,
    pub input: InputState,
    pub animation: SpriteAnimator,
}

impl GameState {
    pub fn new(config: GameConfig, level: LevelData) -> Self {
        let entities = EntityRegistry::from_level(&level);
        let mut state = Self {
            player: Player {
                x: level.player_start.x,
                y: level.player_start.y,
                energy: config.max_energy,
                facing: Direction::Down,
            },
            countdown: Countdown::new(config.countdown_secs),
            entities,
            collected_trees: 0,
            phase: GamePhase::NotStarted,
            camera: Camera::default(),
            input: InputState::default(),
            animation: SpriteAnimator::default(),
            config,
            level,
        };
        state.update_camera();
        state
    }

    /// Fresh run on the same level and tuning, keeping nothing else.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone(), self.level.clone());
    }

    /// Loads persisted progress into a not-yet-started run.
    pub fn restore(&mut self, session: &Session) {
        self.collected_trees = session.collected_trees.min(self.config.total_trees);
        self.player.energy = session.player_energy.clamp(0, self.config.max_energy);
        // An expired or oversized timer restarts the full countdown.
        let secs = match session.game_timer {
            0 => self.config.countdown_secs,
            t => t.min(self.config.countdown_secs),
        };
        self.countdown = Countdown::new(secs);
        self.entities.reconcile_trees(self.collected_trees);
    }

    pub fn snapshot(&self) -> Session {
        Session {
            collected_trees: self.collected_trees,
            player_energy: self.player.energy.clamp(0, self.config.max_energy),
            game_timer: self.countdown.remaining,
        }
    }

    /// NotStarted → Playing; starts the countdown.
    pub fn start(&mut self) {
        if self.phase == GamePhase::NotStarted {
            self.phase = GamePhase::Playing;
            self.countdown.start();
        }
    }

    /// Input outside a running game is dropped.
    pub fn queue_input(&mut self, cmd: InputCommand) {
        if self.phase == GamePhase::Playing {
            self.input.push(cmd);
        }
    }

    /// One display frame: input, movement, camera, collisions, bookkeeping,
    /// terminal check, in that order. Does nothing outside `Playing`.
    pub fn tick(&mut self, dt_ms: f64) -> Vec<GameEvent> {
        if self.phase != GamePhase::Playing {
            return Vec::new();
        }

        self.input.drain();
        if let Some(dir) = self.input.resolve() {
            self.player.facing = dir;
            let (dx, dy) = dir.delta(self.config.player_speed);
            self.move_player(dx, dy);
        }
        self.update_camera();

        let mut events = check_collisions(
            &mut self.player,
            &mut self.entities,
            &mut self.collected_trees,
            &self.config,
        );

        if self.collected_trees >= self.config.total_trees {
            self.finish(GamePhase::Won);
            events.push(GameEvent::Won);
            return events;
        }
        if self.player.energy <= 0 {
            self.player.energy = 0;
            self.finish(GamePhase::Lost(LossCause::Defeated));
            if !events.contains(&GameEvent::PlayerDefeated) {
                events.push(GameEvent::PlayerDefeated);
            }
            return events;
        }

        self.animation.advance(
            dt_ms,
            self.config.frame_interval_ms,
            self.config.frames_per_row,
        );
        events
    }

    /// One countdown second. Reports `TimeUp` when time runs out with trees
    /// still missing.
    pub fn tick_second(&mut self) -> Option<GameEvent> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        if self.countdown.tick() && self.collected_trees < self.config.total_trees {
            self.finish(GamePhase::Lost(LossCause::TimeUp));
            return Some(GameEvent::TimeUp);
        }
        None
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    fn finish(&mut self, phase: GamePhase) {
        self.phase = phase;
        self.countdown.cancel();
    }

    fn move_player(&mut self, dx: f64, dy: f64) {
        let max_x = (self.level.world.width - self.config.player_box).max(0.0);
        let max_y = (self.level.world.height - self.config.player_box).max(0.0);
        self.player.x = (self.player.x + dx).clamp(0.0, max_x);
        self.player.y = (self.player.y + dy).clamp(0.0, max_y);
    }

    fn update_camera(&mut self) {
        self.camera = Camera::follow(
            self.player.x,
            self.player.y,
            self.level.world,
            self.config.viewport,
        );
    }
}
