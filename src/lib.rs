//! Alien Defense: a wave-based arcade shooter.
//!
//! - `sprite`: pixel images and opacity masks
//! - `collision`: mask-accurate hit testing
//! - `entities`: projectiles, combatants, player, enemies, game state
//! - `compute`: per-frame game rules (input, waves, enemy advance)
//! - `director`: the frame loop and render pass
//! - `display`: presentation traits plus terminal and headless backends

pub mod assets;
pub mod collision;
pub mod compute;
pub mod config;
pub mod director;
pub mod display;
pub mod entities;
pub mod error;
pub mod sprite;

pub use error::GameError;
