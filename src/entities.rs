//! Game entities: projectiles, the shared combatant core, player, enemies
//! and the session state.

use std::rc::Rc;

use crate::assets::Assets;
use crate::collision::{collide, Collidable, Target};
use crate::display::Surface;
use crate::error::GameError;
use crate::sprite::{Image, Mask};

/// Frames a combatant waits between shots.
pub const COOLDOWN: u32 = 30;
pub const START_HEALTH: i32 = 100;
/// Health removed by one projectile hit.
pub const HIT_DAMAGE: i32 = 10;

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectile {
    pub x: i32,
    pub y: i32,
    image: Rc<Image>,
}

impl Projectile {
    pub fn new(x: i32, y: i32, image: Rc<Image>) -> Self {
        Self { x, y, image }
    }

    /// Vertical travel; negative is up the screen.
    pub fn move_by(&mut self, dy: i32) {
        self.y += dy;
    }

    /// Outside `[0, height]`, bounds inclusive.
    pub fn is_off_screen(&self, height: i32) -> bool {
        !(0..=height).contains(&self.y)
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.blit(&self.image, (self.x, self.y));
    }
}

impl Collidable for Projectile {
    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn mask(&self) -> Option<&Mask> {
        Some(self.image.mask())
    }
}

// ── Combatant core ───────────────────────────────────────────────────────────

/// State shared by the player and every enemy: health, the fire cooldown and
/// the projectiles this ship has in flight.
#[derive(Clone, Debug)]
pub struct Combatant {
    pub x: i32,
    pub y: i32,
    /// Not clamped; may go negative before the loss check runs.
    pub health: i32,
    pub projectiles: Vec<Projectile>,
    cooldown_counter: u32,
    image: Rc<Image>,
    projectile_image: Rc<Image>,
}

impl Combatant {
    pub fn new(x: i32, y: i32, image: Rc<Image>, projectile_image: Rc<Image>) -> Self {
        Self {
            x,
            y,
            health: START_HEALTH,
            projectiles: Vec::new(),
            cooldown_counter: 0,
            image,
            projectile_image,
        }
    }

    pub fn cooldown_counter(&self) -> u32 {
        self.cooldown_counter
    }

    /// Ready to fire exactly when the counter is 0.
    pub fn can_fire(&self) -> bool {
        self.cooldown_counter == 0
    }

    pub fn advance_cooldown(&mut self) {
        if self.cooldown_counter >= COOLDOWN {
            self.cooldown_counter = 0;
        } else if self.cooldown_counter > 0 {
            self.cooldown_counter += 1;
        }
    }

    /// Spawn a projectile at the ship's position if the cooldown allows it.
    pub fn fire(&mut self) -> bool {
        if !self.can_fire() {
            return false;
        }
        self.projectiles.push(Projectile::new(
            self.x,
            self.y,
            Rc::clone(&self.projectile_image),
        ));
        self.cooldown_counter = 1;
        true
    }

    /// Advance the cooldown once, then move every projectile by `velocity`.
    /// Projectiles leaving `[0, play_height]` are dropped; the rest are tested
    /// against `targets` in order and the first one hit loses `HIT_DAMAGE`
    /// health and consumes the projectile.  Returns the number of hits.
    pub fn advance_projectiles<T: Target>(
        &mut self,
        velocity: i32,
        play_height: i32,
        targets: &mut [T],
    ) -> usize {
        self.advance_cooldown();

        let mut hits = 0;
        self.projectiles.retain_mut(|projectile| {
            projectile.move_by(velocity);
            if projectile.is_off_screen(play_height) {
                return false;
            }
            match targets.iter_mut().find(|target| collide(&**target, &*projectile)) {
                Some(target) => {
                    target.take_hit(HIT_DAMAGE);
                    hits += 1;
                    false
                }
                None => true,
            }
        });
        hits
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.blit(&self.image, (self.x, self.y));
        for projectile in &self.projectiles {
            projectile.draw(surface);
        }
    }

    pub fn width(&self) -> i32 {
        self.image.width()
    }

    pub fn height(&self) -> i32 {
        self.image.height()
    }
}

impl Collidable for Combatant {
    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn mask(&self) -> Option<&Mask> {
        Some(self.image.mask())
    }
}

impl Target for Combatant {
    fn take_hit(&mut self, damage: i32) {
        self.health -= damage;
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub ship: Combatant,
    /// Starting health.  Recorded only; damage is never clamped against it.
    pub max_health: i32,
}

impl Player {
    pub fn new(x: i32, y: i32, image: Rc<Image>, projectile_image: Rc<Image>) -> Self {
        let ship = Combatant::new(x, y, image, projectile_image);
        let max_health = ship.health;
        Self { ship, max_health }
    }

    /// Move `speed` pixels in `direction` unless that would leave the
    /// `screen_width`×`screen_height` area.  Returns whether the ship moved.
    pub fn steer(
        &mut self,
        direction: Direction,
        speed: i32,
        screen_width: i32,
        screen_height: i32,
    ) -> bool {
        let ship = &mut self.ship;
        match direction {
            Direction::Left if ship.x - speed >= 0 => ship.x -= speed,
            Direction::Right if ship.x + speed + ship.width() <= screen_width => {
                ship.x += speed
            }
            Direction::Up if ship.y - speed >= 0 => ship.y -= speed,
            Direction::Down if ship.y + speed + ship.height() <= screen_height => {
                ship.y += speed
            }
            _ => return false,
        }
        true
    }

    pub fn width(&self) -> i32 {
        self.ship.width()
    }

    pub fn height(&self) -> i32 {
        self.ship.height()
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.ship.draw(surface);
    }
}

impl Collidable for Player {
    fn position(&self) -> (i32, i32) {
        self.ship.position()
    }

    fn mask(&self) -> Option<&Mask> {
        self.ship.mask()
    }
}

impl Target for Player {
    fn take_hit(&mut self, damage: i32) {
        self.ship.take_hit(damage);
    }
}

// ── Enemies ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyVariant {
    Drone,
    Wasp,
    Squid,
    Crab,
    Saucer,
}

impl EnemyVariant {
    pub const ALL: [EnemyVariant; 5] = [
        EnemyVariant::Drone,
        EnemyVariant::Wasp,
        EnemyVariant::Squid,
        EnemyVariant::Crab,
        EnemyVariant::Saucer,
    ];

    /// 1-based lookup into the variant table.
    pub fn from_index(index: u8) -> Result<Self, GameError> {
        match index {
            1..=5 => Ok(Self::ALL[index as usize - 1]),
            _ => Err(GameError::InvalidEnemyVariant { index }),
        }
    }

    pub fn index(self) -> u8 {
        match self {
            EnemyVariant::Drone => 1,
            EnemyVariant::Wasp => 2,
            EnemyVariant::Squid => 3,
            EnemyVariant::Crab => 4,
            EnemyVariant::Saucer => 5,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub ship: Combatant,
    pub variant: EnemyVariant,
}

impl Enemy {
    pub fn new(x: i32, y: i32, variant: EnemyVariant, assets: &Assets) -> Self {
        let (image, projectile_image) = assets.enemy_images(variant);
        Self {
            ship: Combatant::new(x, y, image, projectile_image),
            variant,
        }
    }

    pub fn descend(&mut self, speed: i32) {
        self.ship.y += speed;
    }

    /// The sprite's bottom edge is below the play area.
    pub fn has_crossed_bottom(&self, play_height: i32) -> bool {
        self.ship.y + self.ship.height() > play_height
    }

    pub fn is_destroyed(&self) -> bool {
        self.ship.health <= 0
    }

    pub fn width(&self) -> i32 {
        self.ship.width()
    }

    pub fn height(&self) -> i32 {
        self.ship.height()
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.ship.draw(surface);
    }
}

impl Collidable for Enemy {
    fn position(&self) -> (i32, i32) {
        self.ship.position()
    }

    fn mask(&self) -> Option<&Mask> {
        self.ship.mask()
    }
}

impl Target for Enemy {
    fn take_hit(&mut self, damage: i32) {
        self.ship.take_hit(damage);
    }
}

// ── Session state ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Lost,
}

/// Everything that changes from frame to frame.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Waves cleared so far; the first wave is level 1.
    pub level: u32,
    pub lives: i32,
    pub status: GameStatus,
    /// Frames spent in `GameStatus::Lost`.
    pub lost_frames: u32,
    /// Size of the most recent wave.
    pub wave_length: usize,
    pub width: i32,
    pub height: i32,
}
