//! Startup settings.
//!
//! Read from an optional JSON file; every field has a default so a partial
//! file (or none at all) is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GameError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Derive the play area from the terminal size instead of `width`/`height`.
    pub full_screen: bool,
    pub width: i32,
    pub height: i32,
    pub caption: String,
    pub icon_image: PathBuf,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            width: 800,
            height: 600,
            caption: "Alien Defense".to_string(),
            icon_image: PathBuf::from("assets/icon.txt"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub player_image: PathBuf,
    pub alien_images: [PathBuf; 5],
    pub bullet_image: PathBuf,
    pub background_image: PathBuf,
    /// Integer upscale applied to ship and projectile sprites at load time.
    pub sprite_scale: u32,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            player_image: PathBuf::from("assets/player.txt"),
            alien_images: [
                PathBuf::from("assets/alien1.txt"),
                PathBuf::from("assets/alien2.txt"),
                PathBuf::from("assets/alien3.txt"),
                PathBuf::from("assets/alien4.txt"),
                PathBuf::from("assets/alien5.txt"),
            ],
            bullet_image: PathBuf::from("assets/bullet.txt"),
            background_image: PathBuf::from("assets/background.txt"),
            sprite_scale: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    pub fps: u32,
    pub player_lives: i32,
    /// Pixels per frame.
    pub player_speed: i32,
    /// Projectile pixels per frame; player shots travel up, enemy shots down.
    pub laser_speed: i32,
    /// Enemy descent in pixels per frame.
    pub enemy_speed: i32,
    /// Each on-screen enemy tries to fire with probability 1/N per frame.
    /// 0 keeps enemies silent, as in the classic game.
    pub enemy_fire_chance: u32,
    /// Remove enemies whose health ran out.  Off by default: a shot-down
    /// enemy keeps descending until it crosses the bottom edge.
    pub clear_destroyed_enemies: bool,
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            fps: 60,
            player_lives: 5,
            player_speed: 5,
            laser_speed: 4,
            enemy_speed: 1,
            enemy_fire_chance: 240,
            clear_destroyed_enemies: false,
        }
    }
}

impl GameplaySettings {
    /// Frames the loss banner stays up before the loop exits.
    pub fn loss_grace_frames(&self) -> u32 {
        self.fps.saturating_mul(5)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub display: DisplaySettings,
    pub assets: AssetPaths,
    pub gameplay: GameplaySettings,
    /// Where log output goes; stderr when unset.
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Load settings from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, GameError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let json = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| GameError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
