use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, TryRecvError};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use road_dodge::compute::{apply_command, init_state, tick};
use road_dodge::config::{GameConfig, DIFFICULTY_INCREMENT, FPS, OBSTACLE_BASE_SPEED, OBSTACLE_SPAWN_RATE};
use road_dodge::display::{self, Viewport};
use road_dodge::entities::GameState;
use road_dodge::input::{Command, KeyTracker};

#[derive(Parser, Debug)]
#[command(name = "road_dodge")]
#[command(about = "Steer down a three-lane road and dodge the oncoming traffic")]
struct Args {
    /// Target frames per second
    #[arg(long, default_value_t = FPS)]
    fps: u32,

    /// Frames between obstacle spawns
    #[arg(long, default_value_t = OBSTACLE_SPAWN_RATE)]
    spawn_rate: u32,

    /// Obstacle speed in pixels per frame before difficulty scaling
    #[arg(long, default_value_t = OBSTACLE_BASE_SPEED)]
    base_speed: i32,

    /// Added to the difficulty multiplier every frame
    #[arg(long, default_value_t = DIFFICULTY_INCREMENT)]
    difficulty_increment: f64,

    /// Stop the difficulty multiplier from growing past this value
    #[arg(long)]
    max_multiplier: Option<f64>,

    /// Seed for obstacle placement, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (RUST_LOG selects the level, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> GameConfig {
        GameConfig {
            fps: self.fps,
            spawn_rate: self.spawn_rate,
            base_speed: self.base_speed,
            difficulty_increment: self.difficulty_increment,
            max_multiplier: self.max_multiplier,
            ..GameConfig::default()
        }
    }
}

/// The terminal is in raw alternate-screen mode while playing, so logs only
/// go anywhere when a file is given.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Run frames until a quit command clears `state.running`.
///
/// Each frame drains every pending key event, updates the held-key tracker,
/// applies any commands, advances the game one step with the movement keys
/// still held, draws, and then sleeps out the rest of the frame budget.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut impl Rng,
) -> Result<()> {
    let frame_budget = Duration::from_secs_f64(1.0 / f64::from(state.config.fps));
    let mut keys = KeyTracker::new();
    let mut frame: u64 = 0;

    while state.running {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        loop {
            match rx.try_recv() {
                Ok(ev) => {
                    if let Some(command) = keys.handle_event(&ev, frame) {
                        *state = apply_command(state, command);
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("input reader stopped, treating as a close request");
                    *state = apply_command(state, Command::Quit);
                    break;
                }
            }
        }

        let input = keys.snapshot(frame);
        *state = tick(state, &input, rng);

        let (cols, rows) = terminal::size().context("failed to read terminal size")?;
        let view = Viewport::new(cols, rows, state.config.world_width, state.config.world_height);
        display::render(out, state, &view).context("failed to draw frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
    Ok(())
}

fn run<W: Write>(out: &mut W, config: GameConfig, rng: &mut impl Rng) -> Result<GameState> {
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

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
            Err(_) => break,
        }
    });

    let mut state = init_state(config);
    info!(?config, "starting game");
    game_loop(out, &mut state, &rx, rng)?;
    Ok(state)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = args.config();
    config.validate().context("invalid game settings")?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("failed to put the terminal in raw mode")?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let result = run(&mut out, config, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let state = result.context("terminal error")?;
    println!("Final score: {}", state.score);
    Ok(())
}
