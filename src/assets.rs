//! Every image the game draws, loaded once at startup.

use std::rc::Rc;

use crate::config::AssetPaths;
use crate::entities::EnemyVariant;
use crate::error::GameError;
use crate::sprite::Image;

#[derive(Clone, Debug)]
pub struct Assets {
    pub player: Rc<Image>,
    pub enemies: [Rc<Image>; 5],
    pub projectile: Rc<Image>,
    pub background: Rc<Image>,
    pub icon: Rc<Image>,
}

impl Assets {
    /// Load every sprite named in `paths`, upscaling ship and projectile
    /// sprites by `paths.sprite_scale`.  Any failure is fatal.
    pub fn load(paths: &AssetPaths, icon_path: &std::path::Path) -> Result<Self, GameError> {
        let scaled = |path: &std::path::Path| -> Result<Rc<Image>, GameError> {
            Ok(Rc::new(Image::load(path)?.scale_by(paths.sprite_scale)))
        };

        let [a1, a2, a3, a4, a5] = &paths.alien_images;
        let assets = Self {
            player: scaled(&paths.player_image)?,
            enemies: [
                scaled(a1)?,
                scaled(a2)?,
                scaled(a3)?,
                scaled(a4)?,
                scaled(a5)?,
            ],
            projectile: scaled(&paths.bullet_image)?,
            // Stretched to the play area by the director.
            background: Rc::new(Image::load(&paths.background_image)?),
            icon: Rc::new(Image::load(icon_path)?),
        };
        log::info!(
            "assets loaded: player {}x{}, projectile {}x{}",
            assets.player.width(),
            assets.player.height(),
            assets.projectile.width(),
            assets.projectile.height()
        );
        Ok(assets)
    }

    /// Ship and projectile images for an enemy variant.  Every variant
    /// currently fires the same projectile.
    pub fn enemy_images(&self, variant: EnemyVariant) -> (Rc<Image>, Rc<Image>) {
        let ship = &self.enemies[variant.index() as usize - 1];
        (Rc::clone(ship), Rc::clone(&self.projectile))
    }

    /// Widest enemy sprite; the wave spawner keeps every variant on screen.
    pub fn max_enemy_width(&self) -> i32 {
        self.enemies.iter().map(|e| e.width()).max().unwrap_or(0)
    }
}
