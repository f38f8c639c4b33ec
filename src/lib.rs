//! Square Survival - a single-screen arcade dodger for the terminal.
//!
//! - `entities`: pure game data (player, hazards, pickups, session state)
//! - `geometry`: float AABB used for every hit box
//! - `compute`: pure state transitions driven by the game loop
//! - `spawner`, `resolver`, `danger_zone`: the per-tick rules
//! - `display`: terminal rendering, no game logic
//! - `config`: user settings

pub mod compute;
pub mod config;
pub mod danger_zone;
pub mod display;
pub mod entities;
pub mod geometry;
pub mod resolver;
pub mod spawner;

/// Game tuning constants. The world is a fixed 800×600 logical surface
/// measured in pixels; all speeds are per tick.
pub mod consts {
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;

    /// Default simulation rate.
    pub const TICK_RATE: u32 = 60;

    // Player
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const BASE_PLAYER_SPEED: f32 = 5.0;
    pub const BASE_JUMP_FORCE: f32 = -12.0;
    pub const GRAVITY: f32 = 0.6;
    pub const MAX_JUMPS: u8 = 2;
    pub const STARTING_LIVES: i32 = 3;

    // Power-up effects
    pub const BOOSTED_SPEED: f32 = 8.0;
    pub const BOOSTED_JUMP_FORCE: f32 = -16.0;
    pub const POWER_UP_DURATION: u32 = 300;

    /// One point every this many ticks (≈ 2 points/second at 60 Hz).
    pub const TICKS_PER_POINT: u64 = 30;
    /// Points per difficulty level.
    pub const DIFFICULTY_STEP: u32 = 50;

    // Spawn chances per tick
    pub const PROJECTILE_BASE_CHANCE: f64 = 0.03;
    pub const PROJECTILE_CHANCE_PER_LEVEL: f64 = 0.01;
    pub const OBSTACLE_BASE_CHANCE: f64 = 0.005;
    pub const OBSTACLE_CHANCE_PER_LEVEL: f64 = 0.002;
    pub const POWER_UP_CHANCE: f64 = 0.002;

    // Projectiles
    pub const PROJECTILE_MIN_SIZE: i32 = 15;
    pub const PROJECTILE_MAX_SIZE: i32 = 25;
    pub const PROJECTILE_MIN_SPEED: f32 = 4.0;
    pub const PROJECTILE_SPEED_SPREAD: f32 = 2.0;
    /// Off-screen slack before a projectile is despawned.
    pub const DESPAWN_MARGIN: f32 = 100.0;

    // Ground obstacles
    pub const OBSTACLE_WIDTH: f32 = 100.0;
    pub const OBSTACLE_HEIGHT: f32 = 20.0;
    pub const OBSTACLE_FLOOR_GAP: f32 = 10.0;
    pub const OBSTACLE_SPEED: f32 = 7.0;

    // Power-ups sit in a low band: top edge in HEIGHT-100 ..= HEIGHT-50
    pub const POWER_UP_SIZE: f32 = 25.0;
    pub const POWER_UP_BAND_TOP: i32 = 100;
    pub const POWER_UP_BAND_BOTTOM: i32 = 50;

    // Danger zone cycle (ticks)
    pub const DANGER_ZONE_COOLDOWN: u32 = 600;
    pub const DANGER_ZONE_WARNING: u32 = 90;
    pub const DANGER_ZONE_ACTIVE: u32 = 120;
}
