/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.  The 800×600 world is scaled onto the
/// cells inside the border every frame, so any terminal size works.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::consts::{HEIGHT, WIDTH};
use crate::entities::{GameState, GameStatus, PowerUpKind, ZonePhase};
use crate::geometry::Rect;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_PLAYER_INVINCIBLE: Color = Color::Yellow;
const C_PROJECTILE: Color = Color::Blue;
const C_OBSTACLE: Color = Color::Magenta;
const C_ZONE_WARNING: Color = Color::Yellow;
const C_ZONE_ACTIVE: Color = Color::Red;
const C_LIFE: Color = Color::Green;
const C_INVINCIBILITY: Color = Color::Yellow;
const C_SPEED: Color = Color::DarkYellow; // closest terminal orange
const C_JUMP: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

/// Smallest terminal the playfield can be drawn in.
pub const MIN_COLS: u16 = 20;
pub const MIN_ROWS: u16 = 10;

// ── Viewport & glyphs ─────────────────────────────────────────────────────────

/// Terminal surface the frame is drawn onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    /// Plain ASCII instead of block/box-drawing characters.
    pub ascii: bool,
}

impl Viewport {
    pub fn is_too_small(&self) -> bool {
        self.cols < MIN_COLS || self.rows < MIN_ROWS
    }
}

struct Glyphs {
    player: &'static str,
    projectile: &'static str,
    obstacle: &'static str,
    power_up: &'static str,
    zone_warning: &'static str,
    zone_active: &'static str,
    heart: &'static str,
    hint: &'static str,
}

static BLOCK_GLYPHS: Glyphs = Glyphs {
    player: "█",
    projectile: "●",
    obstacle: "▀",
    power_up: "■",
    zone_warning: "░",
    zone_active: "▓",
    heart: "♥",
    hint: "← → / A D : Move   SPACE / ↑ : Jump   Q : Quit",
};

static ASCII_GLYPHS: Glyphs = Glyphs {
    player: "@",
    projectile: "o",
    obstacle: "=",
    power_up: "+",
    zone_warning: ".",
    zone_active: "!",
    heart: "*",
    hint: "<- -> / A D : Move   SPACE / W : Jump   Q : Quit",
};

fn glyphs(viewport: &Viewport) -> &'static Glyphs {
    if viewport.ascii {
        &ASCII_GLYPHS
    } else {
        &BLOCK_GLYPHS
    }
}

// ── World → cell mapping ──────────────────────────────────────────────────────

/// Block of terminal cells covered by a world rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSpan {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

/// Map a world rectangle onto the playfield cells (inside the border,
/// rows 2 .. rows-2).  Anything visible covers at least one cell; anything
/// fully off screen maps to `None`.
pub fn cell_span(rect: &Rect, viewport: &Viewport) -> Option<CellSpan> {
    let inner_w = viewport.cols.saturating_sub(2);
    let inner_h = viewport.rows.saturating_sub(4);
    if inner_w == 0 || inner_h == 0 {
        return None;
    }

    let left = rect.left().max(0.0);
    let right = rect.right().min(WIDTH);
    let top = rect.top().max(0.0);
    let bottom = rect.bottom().min(HEIGHT);
    if right <= left || bottom <= top {
        return None;
    }

    let (c0, c1) = scale_span(left, right, WIDTH, inner_w);
    let (r0, r1) = scale_span(top, bottom, HEIGHT, inner_h);

    Some(CellSpan {
        col: 1 + c0,
        row: 2 + r0,
        width: c1 - c0,
        height: r1 - r0,
    })
}

/// Cell range `[start, end)` covering world interval `[lo, hi)`.
fn scale_span(lo: f32, hi: f32, world: f32, cells: u16) -> (u16, u16) {
    let to_cells = |v: f32| v * cells as f32 / world;
    let start = (to_cells(lo).floor() as u16).min(cells - 1);
    let end = (to_cells(hi).ceil() as u16).clamp(start + 1, cells);
    (start, end)
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    viewport: &Viewport,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    if viewport.is_too_small() {
        out.queue(cursor::MoveTo(0, 0))?;
        out.queue(style::SetForegroundColor(Color::Red))?;
        out.queue(Print(format!(
            "Terminal too small: need {}x{}",
            MIN_COLS, MIN_ROWS
        )))?;
        out.queue(style::ResetColor)?;
        out.flush()?;
        return Ok(());
    }

    let g = glyphs(viewport);
    draw_border(out, viewport)?;

    match state.status {
        GameStatus::Playing => {
            draw_hud(out, state, g)?;
            draw_danger_zone(out, state, viewport, g)?;

            for pu in &state.power_ups {
                fill(out, &pu.rect, viewport, power_up_color(pu.kind), g.power_up)?;
            }
            for obstacle in &state.obstacles {
                fill(out, &obstacle.rect, viewport, C_OBSTACLE, g.obstacle)?;
            }
            for p in &state.projectiles {
                fill(out, &p.rect(), viewport, C_PROJECTILE, g.projectile)?;
            }

            let player_color = if state.player.invincible {
                C_PLAYER_INVINCIBLE
            } else {
                C_PLAYER
            };
            fill(out, &state.player.rect, viewport, player_color, g.player)?;
        }
        GameStatus::GameOver => draw_game_over(out, state, viewport)?,
    }

    draw_controls_hint(out, viewport, g)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, viewport.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

pub fn power_up_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::Life => C_LIFE,
        PowerUpKind::Invincibility => C_INVINCIBILITY,
        PowerUpKind::Speed => C_SPEED,
        PowerUpKind::Jump => C_JUMP,
    }
}

fn fill<W: Write>(
    out: &mut W,
    rect: &Rect,
    viewport: &Viewport,
    color: Color,
    glyph: &str,
) -> std::io::Result<()> {
    let Some(span) = cell_span(rect, viewport) else {
        return Ok(());
    };
    let line = glyph.repeat(span.width as usize);
    out.queue(style::SetForegroundColor(color))?;
    for row in span.row..span.row + span.height {
        out.queue(cursor::MoveTo(span.col, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, viewport: &Viewport) -> std::io::Result<()> {
    let w = viewport.cols as usize;
    let h = viewport.rows;
    let (top, bottom, wall) = if viewport.ascii {
        (
            format!("+{}+", "-".repeat(w.saturating_sub(2))),
            format!("+{}+", "-".repeat(w.saturating_sub(2))),
            "|",
        )
    } else {
        (
            format!("┌{}┐", "─".repeat(w.saturating_sub(2))),
            format!("└{}┘", "─".repeat(w.saturating_sub(2))),
            "│",
        )
    };

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(top))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(bottom))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print(wall))?;
        out.queue(cursor::MoveTo(viewport.cols.saturating_sub(1), row))?;
        out.queue(Print(wall))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, g: &Glyphs) -> std::io::Result<()> {
    let p = &state.player;
    let hearts = g.heart.repeat(p.lives.clamp(0, 10) as usize);

    let mut segments: Vec<(String, Color)> = vec![
        (format!("Lives: {} {}", p.lives, hearts), C_HUD_LIVES),
        (format!("Score: {}", state.score), C_HUD_SCORE),
    ];
    if p.invincible {
        segments.push(("INVINCIBLE".to_string(), C_INVINCIBILITY));
    }
    if p.speed_timer > 0 {
        segments.push(("SPEED UP".to_string(), C_SPEED));
    }
    if p.jump_boost_timer > 0 {
        segments.push(("JUMP UP".to_string(), C_JUMP));
    }

    out.queue(cursor::MoveTo(1, 0))?;
    for (i, (text, color)) in segments.iter().enumerate() {
        if i > 0 {
            out.queue(Print("   "))?;
        }
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(text))?;
    }

    Ok(())
}

// ── Danger zone ───────────────────────────────────────────────────────────────

fn draw_danger_zone<W: Write>(
    out: &mut W,
    state: &GameState,
    viewport: &Viewport,
    g: &Glyphs,
) -> std::io::Result<()> {
    let zone = &state.danger_zone;
    match zone.phase {
        ZonePhase::Idle { .. } => Ok(()),
        ZonePhase::Warning { .. } => {
            fill(out, &zone.rect, viewport, C_ZONE_WARNING, g.zone_warning)
        }
        ZonePhase::Active { .. } => {
            fill(out, &zone.rect, viewport, C_ZONE_ACTIVE, g.zone_active)
        }
    }
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(
    out: &mut W,
    viewport: &Viewport,
    g: &Glyphs,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, viewport.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(g.hint))?;
    Ok(())
}

// ── Game-over screen ──────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    viewport: &Viewport,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", state.score);
    let (top, title, bottom) = if viewport.ascii {
        (
            "+------------------+",
            "|    GAME  OVER    |",
            "+------------------+",
        )
    } else {
        (
            "╔══════════════════╗",
            "║    GAME  OVER    ║",
            "╚══════════════════╝",
        )
    };
    let lines: &[(&str, Color)] = &[
        (top, Color::Red),
        (title, Color::Red),
        (bottom, Color::Red),
        (score_line.as_str(), Color::Yellow),
        ("R - Restart   Q - Quit", Color::White),
    ];

    let cx = viewport.cols / 2;
    let start_row = (viewport.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
