mod common;

use alien_defense::compute::*;
use alien_defense::config::GameplaySettings;
use alien_defense::display::KeyState;
use alien_defense::entities::*;
use alien_defense::GameError;

use common::*;

fn make_state() -> GameState {
    init_state(&test_assets(), 800, 600, 5)
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_player_position() {
    let s = make_state();
    assert_eq!(s.player.ship.x, 400); // width / 2
    assert_eq!(s.player.ship.y, 450); // height * 3 / 4
    assert_eq!(s.player.ship.health, START_HEALTH);
}

#[test]
fn init_state_counters() {
    let s = make_state();
    assert!(s.enemies.is_empty());
    assert_eq!(s.level, 0);
    assert_eq!(s.lives, 5);
    assert_eq!(s.wave_length, INITIAL_WAVE_LENGTH);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.lost_frames, 0);
    assert_eq!((s.width, s.height), (800, 600));
}

#[test]
fn play_area_must_fit_a_wave() {
    let assets = test_assets();
    assert!(check_play_area(&assets, 800, 600).is_ok());
    assert!(check_play_area(&assets, 2 * SPAWN_MARGIN + ENEMY_W, 600).is_ok());
    match check_play_area(&assets, 2 * SPAWN_MARGIN + ENEMY_W - 1, 600) {
        Err(GameError::PlayAreaTooSmall { min_width, .. }) => {
            assert_eq!(min_width, 2 * SPAWN_MARGIN + ENEMY_W)
        }
        other => panic!("expected PlayAreaTooSmall, got {other:?}"),
    }
}

// ── is_lost ───────────────────────────────────────────────────────────────────

#[test]
fn lost_when_out_of_lives_or_health() {
    let mut s = make_state();
    assert!(!is_lost(&s));

    s.lives = 0;
    assert!(is_lost(&s));

    let mut s = make_state();
    s.player.ship.health = 0;
    assert!(is_lost(&s));

    s.player.ship.health = -10;
    assert!(is_lost(&s));
}

// ── spawn_wave ────────────────────────────────────────────────────────────────

#[test]
fn first_wave_is_level_one_with_ten_enemies() {
    let assets = test_assets();
    let mut s = make_state();
    spawn_wave(&mut s, &assets, &mut seeded_rng());
    assert_eq!(s.level, 1);
    assert_eq!(s.wave_length, 10);
    assert_eq!(s.enemies.len(), 10);
}

#[test]
fn waves_grow_by_five() {
    let assets = test_assets();
    let mut rng = seeded_rng();
    let mut s = make_state();
    for n in 1..=6usize {
        s.enemies.clear();
        spawn_wave(&mut s, &assets, &mut rng);
        assert_eq!(s.level, n as u32);
        assert_eq!(s.wave_length, 5 + 5 * n);
        assert_eq!(s.enemies.len(), 5 + 5 * n);
    }
}

#[test]
fn wave_enemies_start_inside_the_spawn_box() {
    let assets = test_assets();
    let mut rng = seeded_rng();
    let mut s = make_state();
    for _ in 0..4 {
        s.enemies.clear();
        spawn_wave(&mut s, &assets, &mut rng);
        for e in &s.enemies {
            assert!((SPAWN_MARGIN..=800 - SPAWN_MARGIN - ENEMY_W).contains(&e.ship.x));
            assert!((SPAWN_Y_MIN..=SPAWN_Y_MAX).contains(&e.ship.y));
            assert_eq!(e.ship.health, START_HEALTH);
        }
    }
}

#[test]
fn waves_use_several_variants() {
    let assets = test_assets();
    let mut s = make_state();
    let mut rng = seeded_rng();
    for _ in 0..3 {
        s.enemies.clear();
        spawn_wave(&mut s, &assets, &mut rng);
    }
    let distinct: std::collections::HashSet<_> = s.enemies.iter().map(|e| e.variant).collect();
    assert!(distinct.len() > 1);
}

// ── apply_input ───────────────────────────────────────────────────────────────

#[test]
fn input_moves_player_on_both_axes() {
    let mut s = make_state();
    let keys = KeyState {
        left: true,
        up: true,
        ..KeyState::default()
    };
    apply_input(&mut s, &keys, 5);
    assert_eq!((s.player.ship.x, s.player.ship.y), (395, 445));
}

#[test]
fn opposite_keys_cancel_out() {
    let mut s = make_state();
    let keys = KeyState {
        left: true,
        right: true,
        ..KeyState::default()
    };
    apply_input(&mut s, &keys, 5);
    assert_eq!(s.player.ship.x, 400);
}

#[test]
fn held_fire_respects_the_cooldown() {
    let mut s = make_state();
    let keys = KeyState {
        fire: true,
        ..KeyState::default()
    };
    apply_input(&mut s, &keys, 5);
    apply_input(&mut s, &keys, 5);
    assert_eq!(s.player.ship.projectiles.len(), 1);
}

// ── advance_enemies ───────────────────────────────────────────────────────────

#[test]
fn enemies_descend_at_their_speed() {
    let assets = test_assets();
    let mut s = make_state();
    s.enemies.push(Enemy::new(100, 50, EnemyVariant::Drone, &assets));
    let tuning = GameplaySettings {
        enemy_speed: 3,
        ..quiet_tuning()
    };
    advance_enemies(&mut s, &tuning, &mut seeded_rng());
    assert_eq!(s.enemies[0].ship.y, 53);
}

#[test]
fn enemy_crossing_the_bottom_costs_a_life() {
    let assets = test_assets();
    let mut s = make_state();
    s.enemies.push(Enemy::new(100, 600 - ENEMY_H, EnemyVariant::Drone, &assets)); // crosses
    s.enemies.push(Enemy::new(300, 600 - ENEMY_H - 1, EnemyVariant::Wasp, &assets)); // touches

    let lost = advance_enemies(&mut s, &quiet_tuning(), &mut seeded_rng());
    assert_eq!(lost, 1);
    assert_eq!(s.lives, 4);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies[0].variant, EnemyVariant::Wasp);
}

#[test]
fn several_enemies_can_escape_in_one_frame() {
    let assets = test_assets();
    let mut s = make_state();
    for x in [60, 200, 400] {
        s.enemies.push(Enemy::new(x, 590, EnemyVariant::Squid, &assets));
    }
    advance_enemies(&mut s, &quiet_tuning(), &mut seeded_rng());
    assert!(s.enemies.is_empty());
    assert_eq!(s.lives, 2);
}

#[test]
fn on_screen_enemies_fire_downwards() {
    let assets = test_assets();
    let mut s = make_state();
    s.enemies.push(Enemy::new(300, 100, EnemyVariant::Crab, &assets));
    let tuning = GameplaySettings {
        enemy_fire_chance: 1,
        ..GameplaySettings::default()
    };

    advance_enemies(&mut s, &tuning, &mut seeded_rng());
    let enemy = &s.enemies[0];
    assert_eq!(enemy.ship.projectiles.len(), 1);
    // fired at the new position (101), then moved by the laser speed
    assert_eq!(enemy.ship.projectiles[0].y, 105);
    assert_eq!(enemy.ship.projectiles[0].x, 300);
}

#[test]
fn enemies_above_the_screen_hold_fire() {
    let assets = test_assets();
    let mut s = make_state();
    s.enemies.push(Enemy::new(300, -200, EnemyVariant::Crab, &assets));
    let tuning = GameplaySettings {
        enemy_fire_chance: 1,
        ..GameplaySettings::default()
    };
    advance_enemies(&mut s, &tuning, &mut seeded_rng());
    assert!(s.enemies[0].ship.projectiles.is_empty());
}

#[test]
fn enemy_projectile_hits_the_player() {
    let assets = test_assets();
    let mut s = make_state(); // player at (400, 450), 40x30
    let mut enemy = Enemy::new(100, 100, EnemyVariant::Drone, &assets);
    enemy
        .ship
        .projectiles
        .push(Projectile::new(410, 440, assets.projectile.clone()));
    s.enemies.push(enemy);

    advance_enemies(&mut s, &quiet_tuning(), &mut seeded_rng());
    assert_eq!(s.player.ship.health, 90);
    assert!(s.enemies[0].ship.projectiles.is_empty());
}

// ── advance_player_projectiles ────────────────────────────────────────────────

#[test]
fn player_shot_damages_enemy() {
    let assets = test_assets();
    let mut s = make_state();
    s.enemies.push(Enemy::new(100, 100, EnemyVariant::Drone, &assets));
    s.player
        .ship
        .projectiles
        .push(Projectile::new(110, 120, assets.projectile.clone()));

    let destroyed = advance_player_projectiles(&mut s, &quiet_tuning());
    assert_eq!(destroyed, 0);
    assert_eq!(s.enemies[0].ship.health, 90);
    assert!(s.player.ship.projectiles.is_empty());
}

fn wave_with_a_dying_enemy(assets: &alien_defense::assets::Assets) -> GameState {
    let mut s = make_state();
    let mut weak = Enemy::new(100, 100, EnemyVariant::Drone, assets);
    weak.ship.health = HIT_DAMAGE;
    s.enemies.push(weak);
    s.enemies.push(Enemy::new(500, 100, EnemyVariant::Wasp, assets));
    s.player
        .ship
        .projectiles
        .push(Projectile::new(110, 120, assets.projectile.clone()));
    s
}

#[test]
fn destroyed_enemies_stay_in_the_wave_by_default() {
    let assets = test_assets();
    let mut s = wave_with_a_dying_enemy(&assets);

    let removed = advance_player_projectiles(&mut s, &quiet_tuning());
    assert_eq!(removed, 0);
    assert_eq!(s.enemies.len(), 2);
    assert!(s.enemies[0].is_destroyed());
    assert!(s.player.ship.projectiles.is_empty());
}

#[test]
fn destroyed_enemy_still_costs_a_life_at_the_bottom() {
    let assets = test_assets();
    let mut s = make_state();
    let mut wreck = Enemy::new(100, 600 - ENEMY_H, EnemyVariant::Drone, &assets);
    wreck.ship.health = 0;
    s.enemies.push(wreck);

    advance_player_projectiles(&mut s, &quiet_tuning());
    assert_eq!(s.enemies.len(), 1);
    advance_enemies(&mut s, &quiet_tuning(), &mut seeded_rng());
    assert!(s.enemies.is_empty());
    assert_eq!(s.lives, 4);
}

#[test]
fn destroyed_enemies_can_be_cleared() {
    let assets = test_assets();
    let mut s = wave_with_a_dying_enemy(&assets);
    let tuning = GameplaySettings {
        clear_destroyed_enemies: true,
        ..quiet_tuning()
    };

    let removed = advance_player_projectiles(&mut s, &tuning);
    assert_eq!(removed, 1);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies[0].variant, EnemyVariant::Wasp);
    assert_eq!(s.lives, 5); // shooting an enemy down is free
}

#[test]
fn player_shots_travel_up() {
    let mut s = make_state();
    s.player.ship.fire();
    advance_player_projectiles(&mut s, &quiet_tuning());
    assert_eq!(s.player.ship.projectiles[0].y, 446);
}
