#![allow(dead_code)]

use std::rc::Rc;

use alien_defense::assets::Assets;
use alien_defense::config::GameplaySettings;
use alien_defense::sprite::{Image, Rgb};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const PLAYER_W: i32 = 40;
pub const PLAYER_H: i32 = 30;
pub const ENEMY_W: i32 = 64;
pub const ENEMY_H: i32 = 48;
pub const SHOT_W: i32 = 4;
pub const SHOT_H: i32 = 16;

/// Solid rectangular sprites with known sizes.
pub fn test_assets() -> Assets {
    let enemy = Rc::new(Image::filled(ENEMY_W, ENEMY_H, Rgb(80, 200, 80)));
    Assets {
        player: Rc::new(Image::filled(PLAYER_W, PLAYER_H, Rgb::WHITE)),
        enemies: [
            enemy.clone(),
            enemy.clone(),
            enemy.clone(),
            enemy.clone(),
            enemy,
        ],
        projectile: Rc::new(Image::filled(SHOT_W, SHOT_H, Rgb(240, 220, 60))),
        background: Rc::new(Image::filled(8, 6, Rgb(0, 0, 40))),
        icon: Rc::new(Image::filled(2, 2, Rgb::WHITE)),
    }
}

/// Default tuning with enemy fire switched off so runs are predictable.
pub fn quiet_tuning() -> GameplaySettings {
    GameplaySettings {
        enemy_fire_chance: 0,
        ..GameplaySettings::default()
    }
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}
