/// Collision & effects resolution for one tick.
///
/// Every collection is evaluated mark-and-sweep: each element is checked
/// exactly once against the player, then only the survivors are kept.

use crate::consts::{
    BOOSTED_JUMP_FORCE, BOOSTED_SPEED, DESPAWN_MARGIN, POWER_UP_DURATION,
};
use crate::danger_zone;
use crate::entities::{GameState, GameStatus, Player, PowerUpKind};

/// Apply a power-up to the player. Timed effects overwrite any running timer.
pub fn apply_power_up(player: &Player, kind: PowerUpKind) -> Player {
    match kind {
        PowerUpKind::Life => Player {
            lives: player.lives + 1,
            ..player.clone()
        },
        PowerUpKind::Invincibility => Player {
            invincible: true,
            invincible_timer: POWER_UP_DURATION,
            ..player.clone()
        },
        PowerUpKind::Speed => Player {
            speed: BOOSTED_SPEED,
            speed_timer: POWER_UP_DURATION,
            ..player.clone()
        },
        PowerUpKind::Jump => Player {
            jump_force: BOOSTED_JUMP_FORCE,
            jump_boost_timer: POWER_UP_DURATION,
            ..player.clone()
        },
    }
}

/// Resolve all player contacts, despawn expired entities, update the game
/// status and clamp the player on screen.
pub fn resolve_collisions(state: &GameState) -> GameState {
    let mut player = state.player.clone();
    let screen = GameState::screen();
    let despawn_bounds = screen.inflate(DESPAWN_MARGIN);

    // ── Projectiles ──────────────────────────────────────────────────────────
    let mut hits = 0;
    let projectiles = state
        .projectiles
        .iter()
        .filter(|p| {
            let rect = p.rect();
            if rect.intersects(&player.rect) {
                hits += 1;
                false
            } else {
                rect.intersects(&despawn_bounds)
            }
        })
        .cloned()
        .collect();

    // ── Ground obstacles ─────────────────────────────────────────────────────
    let obstacles = state
        .obstacles
        .iter()
        .filter(|o| {
            if o.rect.intersects(&player.rect) {
                hits += 1;
                false
            } else {
                !o.has_exited()
            }
        })
        .cloned()
        .collect();

    if !player.invincible && hits > 0 {
        player.lives -= hits;
        log::debug!("player hit {} time(s), {} lives left", hits, player.lives);
    }

    // ── Power-ups ────────────────────────────────────────────────────────────
    let mut collected = Vec::new();
    let power_ups = state
        .power_ups
        .iter()
        .filter(|pu| {
            if pu.rect.intersects(&player.rect) {
                collected.push(pu.kind);
                false
            } else {
                true
            }
        })
        .cloned()
        .collect();

    for kind in collected {
        log::debug!("collected {:?}", kind);
        player = apply_power_up(&player, kind);
    }

    // ── Danger zone ──────────────────────────────────────────────────────────
    if danger_zone::check_collision(&state.danger_zone, &player.rect) && !player.invincible {
        player.lives -= 1;
        log::debug!("danger zone hit, {} lives left", player.lives);
    }

    // ── Status & clamp ───────────────────────────────────────────────────────
    let status = if player.lives <= 0 {
        if state.status == GameStatus::Playing {
            log::info!("game over with score {}", state.score);
        }
        GameStatus::GameOver
    } else {
        state.status
    };

    player.rect = player.rect.clamp_within(&screen);

    GameState {
        player,
        projectiles,
        obstacles,
        power_ups,
        status,
        ..state.clone()
    }
}
