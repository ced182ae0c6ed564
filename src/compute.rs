//! Game rules, one step of the frame at a time.
//!
//! Every function here mutates the `GameState` it is handed and nothing
//! else; randomness comes in through an injected `Rng` so tests can seed it.

use rand::Rng;

use crate::assets::Assets;
use crate::config::GameplaySettings;
use crate::display::KeyState;
use crate::entities::{Direction, Enemy, EnemyVariant, GameState, GameStatus, Player};
use crate::error::GameError;

// ── Wave tuning ───────────────────────────────────────────────────────────────

pub const INITIAL_WAVE_LENGTH: usize = 5;
/// Enemies added to each new wave.
pub const WAVE_INCREMENT: usize = 5;
/// Horizontal gap kept between spawned enemies and the screen edges.
pub const SPAWN_MARGIN: i32 = 50;
pub const SPAWN_Y_MIN: i32 = -1500;
pub const SPAWN_Y_MAX: i32 = -100;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fresh session for a `width`×`height` play area.  The player starts
/// centred horizontally, three quarters of the way down.
pub fn init_state(assets: &Assets, width: i32, height: i32, lives: i32) -> GameState {
    let player = Player::new(
        width / 2,
        height * 3 / 4,
        assets.player.clone(),
        assets.projectile.clone(),
    );
    GameState {
        player,
        enemies: Vec::new(),
        level: 0,
        lives,
        status: GameStatus::Playing,
        lost_frames: 0,
        wave_length: INITIAL_WAVE_LENGTH,
        width,
        height,
    }
}

/// Waves spawn in `[SPAWN_MARGIN, width - SPAWN_MARGIN - enemy_width]`; the
/// play area must leave that range non-empty for every variant.
pub fn check_play_area(assets: &Assets, width: i32, height: i32) -> Result<(), GameError> {
    let min_width = 2 * SPAWN_MARGIN + assets.max_enemy_width();
    if width < min_width || height <= 0 {
        return Err(GameError::PlayAreaTooSmall {
            width,
            height,
            min_width,
        });
    }
    Ok(())
}

// ── Session checks ───────────────────────────────────────────────────────────

pub fn is_lost(state: &GameState) -> bool {
    state.lives <= 0 || state.player.ship.health <= 0
}

// ── Waves ────────────────────────────────────────────────────────────────────

/// Start the next level: grow the wave and scatter that many enemies above
/// the top edge so they drift in staggered.
pub fn spawn_wave(state: &mut GameState, assets: &Assets, rng: &mut impl Rng) {
    state.level += 1;
    state.wave_length += WAVE_INCREMENT;

    for _ in 0..state.wave_length {
        let variant = EnemyVariant::ALL[rng.gen_range(0..EnemyVariant::ALL.len())];
        let (image, _) = assets.enemy_images(variant);
        let x_max = (state.width - SPAWN_MARGIN - image.width()).max(SPAWN_MARGIN);
        let x = rng.gen_range(SPAWN_MARGIN..=x_max);
        let y = rng.gen_range(SPAWN_Y_MIN..=SPAWN_Y_MAX);
        state.enemies.push(Enemy::new(x, y, variant, assets));
    }

    log::info!(
        "level {}: spawned wave of {}",
        state.level,
        state.wave_length
    );
}

// ── Input ────────────────────────────────────────────────────────────────────

/// Apply held keys to the player.  Each direction is checked on its own, so
/// a blocked axis does not stop movement on the other.
pub fn apply_input(state: &mut GameState, keys: &KeyState, speed: i32) {
    let (width, height) = (state.width, state.height);
    let player = &mut state.player;

    let requests = [
        (keys.left, Direction::Left),
        (keys.right, Direction::Right),
        (keys.up, Direction::Up),
        (keys.down, Direction::Down),
    ];
    for (held, direction) in requests {
        if held {
            player.steer(direction, speed, width, height);
        }
    }

    if keys.fire {
        player.ship.fire();
    }
}

// ── Per-frame advance ────────────────────────────────────────────────────────

/// Move every enemy down, let it shoot, resolve its projectiles against the
/// player, and retire enemies that crossed the bottom edge at the cost of a
/// life.  Returns the number of lives lost this frame.
pub fn advance_enemies(
    state: &mut GameState,
    tuning: &GameplaySettings,
    rng: &mut impl Rng,
) -> i32 {
    let height = state.height;
    let player = &mut state.player;
    let mut escaped = 0;

    state.enemies.retain_mut(|enemy| {
        enemy.descend(tuning.enemy_speed);

        if tuning.enemy_fire_chance > 0
            && enemy.ship.y >= 0
            && rng.gen_ratio(1, tuning.enemy_fire_chance)
        {
            enemy.ship.fire();
        }

        let hits = enemy.ship.advance_projectiles(
            tuning.laser_speed,
            height,
            std::slice::from_mut(&mut *player),
        );
        if hits > 0 {
            log::debug!("player hit {hits}x, health {}", player.ship.health);
        }

        if enemy.has_crossed_bottom(height) {
            escaped += 1;
            false
        } else {
            true
        }
    });

    if escaped > 0 {
        state.lives -= escaped;
        log::debug!("{escaped} enemies got through, {} lives left", state.lives);
    }
    escaped
}

/// Resolve the player's projectiles against the whole wave.  Enemies whose
/// health ran out stay in the wave unless `clear_destroyed_enemies` is set,
/// in which case they are removed.  Returns the number of enemies removed.
pub fn advance_player_projectiles(state: &mut GameState, tuning: &GameplaySettings) -> usize {
    state
        .player
        .ship
        .advance_projectiles(-tuning.laser_speed, state.height, &mut state.enemies);

    if !tuning.clear_destroyed_enemies {
        return 0;
    }
    let before = state.enemies.len();
    state.enemies.retain(|enemy| !enemy.is_destroyed());
    before - state.enemies.len()
}
