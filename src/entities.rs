/// All game entity types: pure data plus their constructors.
///
/// Behaviour (physics, spawning, collisions) lives in `compute`, `spawner`,
/// `resolver` and `danger_zone`.

use crate::consts::*;
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    /// Positive values fall, negative values rise.
    pub velocity_y: f32,
    pub jumps_left: u8,
    pub lives: i32,
    pub speed: f32,
    pub jump_force: f32,
    pub invincible: bool,
    pub invincible_timer: u32,
    pub speed_timer: u32,
    pub jump_boost_timer: u32,
}

impl Player {
    /// A fresh player, top-left corner at the middle of the screen.
    pub fn new() -> Self {
        Player {
            rect: Rect::new(WIDTH / 2.0, HEIGHT / 2.0, PLAYER_SIZE, PLAYER_SIZE),
            velocity_y: 0.0,
            jumps_left: MAX_JUMPS,
            lives: STARTING_LIVES,
            speed: BASE_PLAYER_SPEED,
            jump_force: BASE_JUMP_FORCE,
            invincible: false,
            invincible_timer: 0,
            speed_timer: 0,
            jump_boost_timer: 0,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A square shot that flies in a straight line toward where the player was
/// when it spawned. Position is sub-pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Pixels per tick along the flight direction.
    pub speed: f32,
    pub vx: f32,
    pub vy: f32,
}

impl Projectile {
    /// Build a projectile at `origin` heading for `target`. The velocity is
    /// fixed here; projectiles are never re-aimed.
    pub fn aimed(origin: (f32, f32), size: f32, speed: f32, target: (f32, f32)) -> Self {
        let dx = target.0 - origin.0;
        let dy = target.1 - origin.1;
        let distance = dx.hypot(dy);
        // Degenerate aim: fall straight down.
        let (ux, uy) = if distance > f32::EPSILON {
            (dx / distance, dy / distance)
        } else {
            (0.0, 1.0)
        };
        Projectile {
            x: origin.0,
            y: origin.1,
            size,
            speed,
            vx: ux * speed,
            vy: uy * speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

// ── Ground obstacles ──────────────────────────────────────────────────────────

/// Direction an obstacle travels in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    /// Enters from the left edge, leaves through the right.
    Right,
    /// Enters from the right edge, leaves through the left.
    Left,
}

impl Heading {
    /// Signed horizontal velocity in pixels per tick.
    pub fn velocity(self) -> f32 {
        match self {
            Heading::Right => OBSTACLE_SPEED,
            Heading::Left => -OBSTACLE_SPEED,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GroundObstacle {
    pub rect: Rect,
    pub heading: Heading,
}

impl GroundObstacle {
    /// Place a new obstacle just outside the edge it enters from.
    pub fn new(heading: Heading) -> Self {
        let x = match heading {
            Heading::Right => -OBSTACLE_WIDTH,
            Heading::Left => WIDTH,
        };
        let y = HEIGHT - OBSTACLE_HEIGHT - OBSTACLE_FLOOR_GAP;
        GroundObstacle {
            rect: Rect::new(x, y, OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            heading,
        }
    }

    /// True once the obstacle has fully left through the edge it travels toward.
    pub fn has_exited(&self) -> bool {
        match self.heading {
            Heading::Right => self.rect.left() > WIDTH,
            Heading::Left => self.rect.right() < 0.0,
        }
    }
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// +1 life, permanent.
    Life,
    /// Immune to damage for POWER_UP_DURATION ticks.
    Invincibility,
    /// Horizontal speed raised to BOOSTED_SPEED for POWER_UP_DURATION ticks.
    Speed,
    /// Jump force raised to BOOSTED_JUMP_FORCE for POWER_UP_DURATION ticks.
    Jump,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Life,
        PowerUpKind::Invincibility,
        PowerUpKind::Speed,
        PowerUpKind::Jump,
    ];
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub rect: Rect,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, x: f32, y: f32) -> Self {
        PowerUp {
            rect: Rect::new(x, y, POWER_UP_SIZE, POWER_UP_SIZE),
            kind,
        }
    }
}

// ── Danger zone ───────────────────────────────────────────────────────────────

/// Phase of the vertical danger zone, each carrying its remaining ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZonePhase {
    Idle { cooldown: u32 },
    /// Visible but harmless.
    Warning { remaining: u32 },
    /// Visible and damaging.
    Active { remaining: u32 },
}

/// Full-height hazard column covering a fifth of the screen.
#[derive(Clone, Debug, PartialEq)]
pub struct DangerZone {
    pub rect: Rect,
    pub phase: ZonePhase,
}

impl DangerZone {
    pub fn width() -> f32 {
        (WIDTH / 5.0).floor()
    }

    /// Idle zone with a full cooldown, left edge at `x`.
    pub fn at(x: f32) -> Self {
        DangerZone {
            rect: Rect::new(x, 0.0, Self::width(), HEIGHT),
            phase: ZonePhase::Idle {
                cooldown: DANGER_ZONE_COOLDOWN,
            },
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self.phase, ZonePhase::Idle { .. })
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, ZonePhase::Active { .. })
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// One game session. Cloneable so the pure update functions can return a
/// new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<GroundObstacle>,
    pub power_ups: Vec<PowerUp>,
    pub danger_zone: DangerZone,
    pub score: u32,
    /// Ticks simulated while playing; drives the score clock.
    pub frame: u64,
    pub status: GameStatus,
}

impl GameState {
    /// Fresh session with the danger zone placed at `zone_x`.
    pub fn new(zone_x: f32) -> Self {
        GameState {
            player: Player::new(),
            projectiles: Vec::new(),
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            danger_zone: DangerZone::at(zone_x),
            score: 0,
            frame: 0,
            status: GameStatus::Playing,
        }
    }

    /// The playable surface.
    pub fn screen() -> Rect {
        Rect::new(0.0, 0.0, WIDTH, HEIGHT)
    }
}
