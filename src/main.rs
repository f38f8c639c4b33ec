use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use square_survival::compute::{
    init_state, move_player_left, move_player_right, player_jump, restart, tick,
};
use square_survival::config::Settings;
use square_survival::display::{self, Viewport};
use square_survival::entities::{GameState, GameStatus};

#[derive(Parser, Debug)]
#[command(name = "square_survival", about = "Dodge, jump and survive as long as you can")]
struct Args {
    /// Seed for every random decision (spawns, danger zone placement).
    #[arg(long)]
    seed: Option<u64>,

    /// Simulation ticks per second.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=240))]
    tick_rate: Option<u32>,

    /// JSON settings file; flags given here take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write log records to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Draw with plain ASCII characters.
    #[arg(long)]
    ascii: bool,
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// Returns true if `key` was seen within the last `window` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64, window: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= window)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64, window: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame, window))
}

/// Records a press of `key` on `frame`.  Returns true for a new press and
/// false for a press that arrives while the key is still held, which is how
/// terminals without release events report auto-repeat.
fn register_press(
    key_frame: &mut HashMap<KeyCode, u64>,
    key: KeyCode,
    frame: u64,
    window: u64,
) -> bool {
    let fresh = !is_held(key_frame, &key, frame, window);
    key_frame.insert(key, frame);
    fresh
}

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];

fn is_jump_key(code: &KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W')
    )
}

fn viewport(ascii: bool) -> Result<Viewport> {
    let (cols, rows) = terminal::size().context("querying terminal size")?;
    Ok(Viewport { cols, rows, ascii })
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `key_frame` map records the frame of the last press/repeat
/// event for every key, and a key counts as held while that frame is within
/// the hold window.  Terminals with keyboard enhancement also send releases,
/// which drop the key at once.  Jumps fire on press edges only:
/// a press that arrives while the key is still held is auto-repeat.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    settings: &Settings,
    rng: &mut StdRng,
) -> Result<()> {
    let frame_len = settings.frame_duration();
    let hold_window = settings.hold_window_frames();

    let mut state: GameState = init_state(rng);
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut jump_pressed = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    let fresh = register_press(&mut key_frame, code, frame, hold_window);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if state.status == GameStatus::GameOver =>
                        {
                            state = restart(&state, rng);
                        }
                        c if fresh && is_jump_key(&c) => jump_pressed = true,
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Apply input, then simulate ────────────────────────────────────────
        if state.status == GameStatus::Playing {
            let left = any_held(&key_frame, &LEFT_KEYS, frame, hold_window);
            let right = any_held(&key_frame, &RIGHT_KEYS, frame, hold_window);
            if left && !right {
                state = move_player_left(&state);
            } else if right && !left {
                state = move_player_right(&state);
            }
            if jump_pressed {
                state = player_jump(&state);
            }
            state = tick(&state, rng);
        }

        display::render(out, &state, &viewport(settings.ascii)?)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            builder
                .filter_level(log::LevelFilter::Info)
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        // stderr shares the alternate screen, so keep it quiet by default
        None => {
            builder.filter_level(log::LevelFilter::Warn);
        }
    }
    builder.parse_default_env().init();
    Ok(())
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(rate) = args.tick_rate {
        settings.tick_rate = rate;
    }
    if args.ascii {
        settings.ascii = true;
    }
    settings.validate()?;
    log::info!("Effective settings: {}", settings.to_json()?);
    Ok(settings)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;
    let settings = load_settings(&args)?;

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!(
        "Square Survival starting: seed={} tick_rate={}",
        seed,
        settings.tick_rate
    );
    let mut rng = StdRng::seed_from_u64(seed);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)
        .context("entering alternate screen")?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Terminals without the kitty protocol fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                log::warn!("input thread stopped: {}", e);
                break;
            }
        }
    });

    let result = game_loop(&mut out, &rx, &settings, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("Square Survival exiting");
    result
}
