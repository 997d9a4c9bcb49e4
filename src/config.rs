//! Tuning constants, asset locations and the bundled level.
//!
//! Everything that describes *this* map or *this* balance lives here so the
//! engine code in `model` and `state` never hardcodes coordinates.

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

const BUNDLED_LEVEL: &str = include_str!("../assets/level.json");

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Canvas size in pixels; the camera shows this much of the world.
    pub viewport: Size,
    /// Pixels moved per frame while a direction is held.
    pub player_speed: f64,
    /// Collision box of the player (matches one sprite-sheet cell).
    pub player_box: f64,
    /// Size the player sprite is drawn at.
    pub player_draw_size: f64,
    pub max_energy: i32,
    pub orb_energy: i32,
    pub hazard_damage: i32,
    pub item_box: f64,
    pub hazard_box: f64,
    pub total_trees: u32,
    pub countdown_secs: u32,
    pub frame_interval_ms: f64,
    pub frames_per_row: u32,
    pub sprite_cell: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport: Size {
                width: 500.0,
                height: 500.0,
            },
            player_speed: 2.0,
            player_box: 64.0,
            player_draw_size: 50.0,
            max_energy: 100,
            orb_energy: 10,
            hazard_damage: 20,
            item_box: 30.0,
            hazard_box: 20.0,
            total_trees: 5,
            countdown_secs: 60,
            frame_interval_ms: 200.0,
            frames_per_row: 4,
            sprite_cell: 64.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelData {
    pub world: Size,
    pub player_start: Point,
    pub energy_orbs: Vec<Point>,
    pub hazards: Vec<Point>,
    pub trees: Vec<Point>,
}

impl LevelData {
    pub fn from_json(raw: &str, cfg: &GameConfig) -> Result<Self> {
        let level: LevelData = serde_json::from_str(raw).context("parsing level data")?;
        level.validate(cfg)?;
        Ok(level)
    }

    /// The map shipped with the game.
    pub fn bundled(cfg: &GameConfig) -> Result<Self> {
        Self::from_json(BUNDLED_LEVEL, cfg).context("assets/level.json")
    }

    fn validate(&self, cfg: &GameConfig) -> Result<()> {
        ensure!(
            self.trees.len() == cfg.total_trees as usize,
            "level has {} trees, expected {}",
            self.trees.len(),
            cfg.total_trees
        );
        let inside = |p: &Point| {
            p.x >= 0.0 && p.y >= 0.0 && p.x <= self.world.width && p.y <= self.world.height
        };
        let all = self
            .energy_orbs
            .iter()
            .chain(&self.hazards)
            .chain(&self.trees)
            .chain(std::iter::once(&self.player_start));
        for p in all {
            ensure!(inside(p), "entity at ({}, {}) lies outside the world", p.x, p.y);
        }
        Ok(())
    }
}

/// Image and audio URLs, relative to the page.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetPaths {
    pub background: &'static str,
    pub player: &'static str,
    pub energy: &'static str,
    pub enemy: &'static str,
    pub tree_energy: &'static str,
    /// Growing tree, one image per collected count (1..=4).
    pub tree_stages: [&'static str; 4],
    pub victory: &'static str,
    pub music: &'static str,
    pub pickup: &'static str,
    pub damage: &'static str,
    pub tree_collected: &'static str,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            background: "assets/imgs/gameWallpeper.png",
            player: "assets/imgs/player.png",
            energy: "assets/imgs/energy.png",
            enemy: "assets/imgs/zz.png",
            tree_energy: "assets/imgs/te.png",
            tree_stages: [
                "assets/imgs/t22.png",
                "assets/imgs/t33.png",
                "assets/imgs/t44.png",
                "assets/imgs/t11.png",
            ],
            victory: "assets/imgs/background.jpeg",
            music: "assets/media/gamemusic.mp3",
            pickup: "assets/media/collect.mp3",
            damage: "assets/media/energyless.mp3",
            tree_collected: "assets/media/powerup.mp3",
        }
    }
}
