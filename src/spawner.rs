/// Per-tick Bernoulli spawning.
///
/// Each entity class rolls independently every tick, so several classes can
/// appear on the same tick. All randomness comes through the injected `rng`.

use rand::Rng;

use crate::consts::*;
use crate::entities::{GameState, GroundObstacle, Heading, PowerUp, PowerUpKind, Projectile};

// ── Difficulty ramp ──────────────────────────────────────────────────────────

/// Difficulty level: one step per DIFFICULTY_STEP points.
pub fn difficulty(score: u32) -> u32 {
    score / DIFFICULTY_STEP
}

pub fn projectile_chance(score: u32) -> f64 {
    PROJECTILE_BASE_CHANCE + difficulty(score) as f64 * PROJECTILE_CHANCE_PER_LEVEL
}

pub fn obstacle_chance(score: u32) -> f64 {
    OBSTACLE_BASE_CHANCE + difficulty(score) as f64 * OBSTACLE_CHANCE_PER_LEVEL
}

/// Power-ups do not scale with difficulty.
pub fn power_up_chance(_score: u32) -> f64 {
    POWER_UP_CHANCE
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// A projectile entering from the top, left or right edge, aimed at `target`.
pub fn spawn_projectile(target: (f32, f32), rng: &mut impl Rng) -> Projectile {
    let size = rng.gen_range(PROJECTILE_MIN_SIZE..=PROJECTILE_MAX_SIZE) as f32;
    let origin = match rng.gen_range(0..3u32) {
        0 => (rng.gen_range(0..=WIDTH as i32) as f32, -size),
        1 => (-size, rng.gen_range(0..=HEIGHT as i32) as f32),
        _ => (WIDTH + size, rng.gen_range(0..=HEIGHT as i32) as f32),
    };
    let speed = PROJECTILE_MIN_SPEED + rng.gen::<f32>() * PROJECTILE_SPEED_SPREAD;
    Projectile::aimed(origin, size, speed, target)
}

pub fn spawn_obstacle(rng: &mut impl Rng) -> GroundObstacle {
    let heading = if rng.gen_bool(0.5) {
        Heading::Right
    } else {
        Heading::Left
    };
    GroundObstacle::new(heading)
}

/// A random power-up somewhere in the low band just above the floor.
pub fn spawn_power_up(rng: &mut impl Rng) -> PowerUp {
    let kind = PowerUpKind::ALL[rng.gen_range(0..PowerUpKind::ALL.len() as u32) as usize];
    let x = rng.gen_range(0..=(WIDTH - POWER_UP_SIZE) as i32) as f32;
    let y = rng.gen_range(
        (HEIGHT as i32 - POWER_UP_BAND_TOP)..=(HEIGHT as i32 - POWER_UP_BAND_BOTTOM),
    ) as f32;
    PowerUp::new(kind, x, y)
}

// ── Per-tick roll ────────────────────────────────────────────────────────────

/// Roll once for each entity class and append whatever spawned.
/// Projectiles aim at the player's current centre.
pub fn spawn(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut projectiles = state.projectiles.clone();
    let mut obstacles = state.obstacles.clone();
    let mut power_ups = state.power_ups.clone();

    if rng.gen::<f64>() < projectile_chance(state.score) {
        projectiles.push(spawn_projectile(state.player.rect.center(), rng));
    }
    if rng.gen::<f64>() < obstacle_chance(state.score) {
        obstacles.push(spawn_obstacle(rng));
    }
    if rng.gen::<f64>() < power_up_chance(state.score) {
        power_ups.push(spawn_power_up(rng));
    }

    GameState {
        projectiles,
        obstacles,
        power_ups,
        ..state.clone()
    }
}
