/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::consts::*;
use crate::danger_zone;
use crate::entities::{GameState, GameStatus, GroundObstacle, Player, Projectile};
use crate::geometry::Rect;
use crate::resolver::resolve_collisions;
use crate::spawner;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh session.
pub fn init_state(rng: &mut impl Rng) -> GameState {
    GameState::new(danger_zone::random_x(rng))
}

/// Start over after a game over: everything, danger zone included, is
/// recreated. Ignored while still playing.
pub fn restart(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status != GameStatus::GameOver {
        return state.clone();
    }
    log::info!("restarting after final score {}", state.score);
    init_state(rng)
}

// ── Player physics ───────────────────────────────────────────────────────────

/// Jump if any jumps remain (two in the air: double jump).
pub fn jump(player: &Player) -> Player {
    if player.jumps_left == 0 {
        return player.clone();
    }
    Player {
        velocity_y: player.jump_force,
        jumps_left: player.jumps_left - 1,
        ..player.clone()
    }
}

/// Gravity, floor landing and power-up timers for one tick.
pub fn update_player(player: &Player) -> Player {
    let mut p = player.clone();

    p.velocity_y += GRAVITY;
    p.rect.y += p.velocity_y;

    if p.rect.bottom() >= HEIGHT {
        p.rect.y = HEIGHT - p.rect.h;
        p.velocity_y = 0.0;
        p.jumps_left = MAX_JUMPS;
    }

    if p.invincible {
        p.invincible_timer = p.invincible_timer.saturating_sub(1);
        if p.invincible_timer == 0 {
            p.invincible = false;
        }
    }

    if p.speed_timer > 0 {
        p.speed_timer -= 1;
        if p.speed_timer == 0 {
            p.speed = BASE_PLAYER_SPEED;
        }
    }

    if p.jump_boost_timer > 0 {
        p.jump_boost_timer -= 1;
        if p.jump_boost_timer == 0 {
            p.jump_force = BASE_JUMP_FORCE;
        }
    }

    p
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

fn shift_player(state: &GameState, dx: f32) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    let rect = Rect {
        x: state.player.rect.x + dx,
        ..state.player.rect
    };
    GameState {
        player: Player {
            rect,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Move left by the player's current speed. Screen bounds are enforced by
/// the resolver at the end of the tick.
pub fn move_player_left(state: &GameState) -> GameState {
    shift_player(state, -state.player.speed)
}

pub fn move_player_right(state: &GameState) -> GameState {
    shift_player(state, state.player.speed)
}

pub fn player_jump(state: &GameState) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    GameState {
        player: jump(&state.player),
        ..state.clone()
    }
}

// ── Entity movement ──────────────────────────────────────────────────────────

pub fn advance_projectile(p: &Projectile) -> Projectile {
    Projectile {
        x: p.x + p.vx,
        y: p.y + p.vy,
        ..p.clone()
    }
}

pub fn advance_obstacle(o: &GroundObstacle) -> GroundObstacle {
    GroundObstacle {
        rect: Rect {
            x: o.rect.x + o.heading.velocity(),
            ..o.rect
        },
        ..o.clone()
    }
}

// ── Per-tick update (RNG is injected) ───────────────────────────────────────

/// Advance the simulation by one tick.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
/// A finished game is returned unchanged.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    // ── 1. Player physics ────────────────────────────────────────────────────
    let player = update_player(&state.player);

    // ── 2. Score clock ───────────────────────────────────────────────────────
    let frame = state.frame + 1;
    let score = if frame % TICKS_PER_POINT == 0 {
        state.score + 1
    } else {
        state.score
    };

    let state = GameState {
        player,
        frame,
        score,
        ..state.clone()
    };

    // ── 3. Spawning ──────────────────────────────────────────────────────────
    let state = spawner::spawn(&state, rng);

    // ── 4. Danger zone & movement ────────────────────────────────────────────
    let state = GameState {
        danger_zone: danger_zone::advance(&state.danger_zone, rng),
        projectiles: state.projectiles.iter().map(advance_projectile).collect(),
        obstacles: state.obstacles.iter().map(advance_obstacle).collect(),
        ..state
    };

    // ── 5. Collisions, effects, status ───────────────────────────────────────
    resolve_collisions(&state)
}
