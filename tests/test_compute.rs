use square_survival::compute::*;
use square_survival::consts::*;
use square_survival::entities::*;
use square_survival::resolver::apply_power_up;

use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameState {
    GameState::new(0.0)
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// High bits fail every spawn roll; low bits keep range draws at their minimum.
fn quiet_rng() -> StepRng {
    StepRng::new(0xFFFF_FF00_0000_0000, 1)
}

// ── init_state / restart ─────────────────────────────────────────────────────

#[test]
fn init_state_is_fresh_session() {
    let s = init_state(&mut seeded_rng());
    assert_eq!(s.player.lives, 3);
    assert_eq!(s.score, 0);
    assert_eq!(s.frame, 0);
    assert_eq!(s.status, GameStatus::Playing);
    assert!(s.projectiles.is_empty());
    assert!(s.obstacles.is_empty());
    assert!(s.power_ups.is_empty());
    assert_eq!(
        s.danger_zone.phase,
        ZonePhase::Idle { cooldown: DANGER_ZONE_COOLDOWN }
    );
}

#[test]
fn restart_recreates_everything_after_game_over() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    s.score = 40;
    s.player.lives = 0;
    s.projectiles.push(Projectile::aimed((0.0, 0.0), 20.0, 5.0, (100.0, 100.0)));
    s.obstacles.push(GroundObstacle::new(Heading::Left));
    s.power_ups.push(PowerUp::new(PowerUpKind::Life, 10.0, 520.0));

    let s2 = restart(&s, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::Playing);
    assert_eq!(s2.score, 0);
    assert_eq!(s2.player, Player::new());
    assert!(s2.projectiles.is_empty());
    assert!(s2.obstacles.is_empty());
    assert!(s2.power_ups.is_empty());
}

#[test]
fn restart_ignored_while_playing() {
    let mut s = make_state();
    s.score = 12;
    let s2 = restart(&s, &mut seeded_rng());
    assert_eq!(s2.score, 12);
}

// ── jump ─────────────────────────────────────────────────────────────────────

#[test]
fn jump_uses_jump_force_and_spends_a_jump() {
    let p = Player::new();
    let p2 = jump(&p);
    assert_eq!(p2.velocity_y, BASE_JUMP_FORCE);
    assert_eq!(p2.jumps_left, 1);
}

#[test]
fn double_jump_then_no_more() {
    let p = jump(&jump(&Player::new()));
    assert_eq!(p.jumps_left, 0);
    let p3 = jump(&p);
    assert_eq!(p3, p); // no-op
}

#[test]
fn jump_with_no_jumps_left_is_noop() {
    let mut p = Player::new();
    p.jumps_left = 0;
    p.velocity_y = 3.0;
    assert_eq!(jump(&p), p);
}

#[test]
fn boosted_jump_force_is_used() {
    let p = apply_power_up(&Player::new(), PowerUpKind::Jump);
    assert_eq!(jump(&p).velocity_y, BOOSTED_JUMP_FORCE);
}

#[test]
fn player_jump_ignored_after_game_over() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    let s2 = player_jump(&s);
    assert_eq!(s2.player.jumps_left, MAX_JUMPS);
}

// ── update_player ────────────────────────────────────────────────────────────

#[test]
fn gravity_accumulates() {
    let p = Player::new();
    let p2 = update_player(&p);
    assert!((p2.velocity_y - GRAVITY).abs() < 1e-6);
    assert!((p2.rect.y - (p.rect.y + GRAVITY)).abs() < 1e-4);
    let p3 = update_player(&p2);
    assert!((p3.velocity_y - 2.0 * GRAVITY).abs() < 1e-6);
}

#[test]
fn landing_resets_velocity_and_jumps() {
    let mut p = Player::new();
    p.rect.y = HEIGHT - PLAYER_SIZE - 1.0;
    p.velocity_y = 5.0;
    p.jumps_left = 0;
    let p2 = update_player(&p);
    assert_eq!(p2.rect.bottom(), HEIGHT);
    assert_eq!(p2.velocity_y, 0.0);
    assert_eq!(p2.jumps_left, 2);
}

#[test]
fn player_settles_on_floor() {
    let mut p = Player::new();
    for _ in 0..200 {
        p = update_player(&p);
    }
    assert_eq!(p.rect.bottom(), HEIGHT);
    assert_eq!(p.velocity_y, 0.0);
    assert_eq!(p.jumps_left, 2);
}

#[test]
fn invincibility_lasts_exactly_300_updates() {
    let mut p = apply_power_up(&Player::new(), PowerUpKind::Invincibility);
    for _ in 0..POWER_UP_DURATION - 1 {
        p = update_player(&p);
        assert!(p.invincible);
    }
    p = update_player(&p);
    assert!(!p.invincible);
    assert_eq!(p.invincible_timer, 0);
}

#[test]
fn speed_boost_reverts_when_timer_expires() {
    let mut p = apply_power_up(&Player::new(), PowerUpKind::Speed);
    p.speed_timer = 2;
    p = update_player(&p);
    assert_eq!(p.speed, BOOSTED_SPEED);
    p = update_player(&p);
    assert_eq!(p.speed, BASE_PLAYER_SPEED);
    assert_eq!(p.speed_timer, 0);
}

#[test]
fn jump_boost_reverts_when_timer_expires() {
    let mut p = apply_power_up(&Player::new(), PowerUpKind::Jump);
    p.jump_boost_timer = 1;
    p = update_player(&p);
    assert_eq!(p.jump_force, BASE_JUMP_FORCE);
}

// ── move_player_left / move_player_right ─────────────────────────────────────

#[test]
fn moves_by_current_speed() {
    let s = make_state(); // x = 400
    assert_eq!(move_player_left(&s).player.rect.x, 400.0 - BASE_PLAYER_SPEED);
    assert_eq!(move_player_right(&s).player.rect.x, 400.0 + BASE_PLAYER_SPEED);
}

#[test]
fn moves_faster_with_speed_boost() {
    let mut s = make_state();
    s.player = apply_power_up(&s.player, PowerUpKind::Speed);
    assert_eq!(move_player_right(&s).player.rect.x, 400.0 + BOOSTED_SPEED);
}

#[test]
fn move_does_not_mutate_original() {
    let s = make_state();
    let _ = move_player_left(&s);
    let _ = move_player_right(&s);
    assert_eq!(s.player.rect.x, 400.0);
}

#[test]
fn moves_ignored_after_game_over() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    assert_eq!(move_player_right(&s).player.rect.x, 400.0);
}

#[test]
fn right_edge_is_clamped_exactly() {
    let mut s = make_state();
    s.player.rect.x = WIDTH - PLAYER_SIZE;
    s.player.rect.y = HEIGHT - PLAYER_SIZE;
    let s2 = tick(&move_player_right(&s), &mut quiet_rng());
    assert_eq!(s2.player.rect.right(), WIDTH);
}

#[test]
fn left_edge_is_clamped_exactly() {
    let mut s = make_state();
    s.player.rect.x = 2.0;
    let s2 = tick(&move_player_left(&s), &mut quiet_rng());
    assert_eq!(s2.player.rect.left(), 0.0);
}

// ── tick: score clock ────────────────────────────────────────────────────────

#[test]
fn thirty_quiet_ticks_score_one_point() {
    let mut rng = quiet_rng();
    let mut s = init_state(&mut rng);
    for _ in 0..30 {
        s = tick(&s, &mut rng);
    }
    assert_eq!(s.frame, 30);
    assert_eq!(s.score, 1);
    assert_eq!(s.player.lives, 3);
    assert_eq!(s.status, GameStatus::Playing);
}

#[test]
fn no_point_before_thirty_ticks() {
    let mut rng = quiet_rng();
    let mut s = init_state(&mut rng);
    for _ in 0..29 {
        s = tick(&s, &mut rng);
    }
    assert_eq!(s.score, 0);
}

#[test]
fn tick_after_game_over_changes_nothing() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    s.frame = 77;
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.frame, 77);
    assert_eq!(s2.score, 0);
}

// ── tick: movement & collisions ──────────────────────────────────────────────

#[test]
fn tick_moves_projectiles_and_obstacles() {
    let mut s = make_state();
    s.projectiles
        .push(Projectile::aimed((100.0, -20.0), 20.0, 5.0, (100.0, 300.0)));
    s.obstacles.push(GroundObstacle::new(Heading::Right));
    let s2 = tick(&s, &mut quiet_rng());
    assert!((s2.projectiles[0].y - (-15.0)).abs() < 1e-4);
    assert_eq!(s2.obstacles[0].rect.x, -OBSTACLE_WIDTH + OBSTACLE_SPEED);
}

#[test]
fn spawned_projectile_aims_at_player_after_gravity() {
    let s = make_state();
    let s2 = tick(&s, &mut StepRng::new(0, 1));
    assert_eq!(s2.projectiles.len(), 1);

    // The new projectile has already taken one step this tick.
    let p = &s2.projectiles[0];
    let origin = (p.x - p.vx, p.y - p.vy);
    let sine_to = |target: (f32, f32)| {
        let (dx, dy) = (target.0 - origin.0, target.1 - origin.1);
        (dx * p.vy - dy * p.vx).abs() / (dx.hypot(dy) * p.speed)
    };

    let updated = update_player(&s.player).rect.center();
    assert_eq!(s2.player.rect.center(), updated);
    assert!(sine_to(updated) < 1e-4);
    assert!(sine_to(s.player.rect.center()) > 1e-4);
}

#[test]
fn last_life_lost_ends_game_same_tick() {
    let mut s = make_state();
    s.player.lives = 1;
    let mut p = Projectile::aimed((405.0, 305.0), 20.0, 5.0, (405.0, 305.0));
    p.vx = 0.0;
    p.vy = 0.0;
    s.projectiles.push(p);
    let s2 = tick(&s, &mut quiet_rng());
    assert_eq!(s2.player.lives, 0);
    assert_eq!(s2.status, GameStatus::GameOver);
    assert!(s2.projectiles.is_empty());
}

#[test]
fn lives_only_rise_through_pickups_and_zero_means_game_over() {
    let mut rng = seeded_rng();
    let mut s = init_state(&mut rng);
    for _ in 0..20_000 {
        let prev = s.clone();
        // Bounce left and right so the player meets the hazards.
        s = if (prev.frame / 90) % 2 == 0 {
            move_player_left(&s)
        } else {
            move_player_right(&s)
        };
        s = tick(&s, &mut rng);

        if s.player.lives > prev.player.lives {
            assert!(s.power_ups.len() <= prev.power_ups.len());
        }
        assert_eq!(s.player.lives <= 0, s.status == GameStatus::GameOver);

        if s.status == GameStatus::GameOver {
            s = restart(&s, &mut rng);
        }
    }
}
