//! Typewar - Entry Point
//!
//! Loads the config, word list and level, then either runs the interactive
//! terminal game at a fixed tick rate or replays a headless input script and
//! prints the final frame as JSON.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

use typewar::campaign::Level;
use typewar::core::config::GameConfig;
use typewar::core::error::Result;
use typewar::simulation::{render, run_script, update, GameState, Script};
use typewar::ui::{GameUI, TerminalInput, TerminalUi};
use typewar::words::DEFAULT_WORDS;

/// Typewar - type the words on the map to march your units
#[derive(Parser, Debug)]
#[command(name = "typewar")]
#[command(about = "Typing strategy game: expand nodes and dispatch units by typing")]
struct Args {
    /// Whitespace-separated word list (defaults to the built-in list)
    #[arg(long)]
    words: Option<PathBuf>,

    /// Level TOML file (defaults to the built-in level)
    #[arg(long)]
    level: Option<PathBuf>,

    /// Config TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible word assignment
    #[arg(long)]
    seed: Option<u64>,

    /// Override ticks per second
    #[arg(long)]
    tps: Option<u32>,

    /// Replay a TOML input script headless and print the final frame
    #[arg(long)]
    script: Option<PathBuf>,

    /// Log file for the interactive game
    #[arg(long, default_value = "typewar.log")]
    log_file: PathBuf,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("typewar=info"))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // The terminal game owns the screen, so it logs to a file
    if args.script.is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .init();
    } else {
        let file = std::fs::File::create(&args.log_file)?;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }

    tracing::info!("Typewar starting...");

    let config = load_config(&args)?;
    let vocabulary = match &args.words {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEFAULT_WORDS.to_string(),
    };
    let level = match &args.level {
        Some(path) => Level::load(path)?,
        None => Level::builtin()?,
    };

    let mut state = GameState::new(config, &vocabulary, level)?;

    match &args.script {
        Some(path) => run_headless(&mut state, path),
        None => run_terminal(&mut state),
    }
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(tps) = args.tps {
        config.ticks_per_second = tps;
    }
    config.validate()?;
    Ok(config)
}

fn run_headless(state: &mut GameState, path: &Path) -> Result<()> {
    let script = Script::load(path)?;
    let events = run_script(state, &script)?;
    tracing::info!(
        "Script finished after {} ticks with {} events",
        state.current_tick,
        events.len()
    );
    println!("{}", serde_json::to_string_pretty(&render(state))?);
    Ok(())
}

fn run_terminal(state: &mut GameState) -> Result<()> {
    let mut tui = TerminalUi::init()?;
    let result = game_loop(&mut tui, state);
    tui.cleanup()?;
    result
}

/// Fixed-tick loop: collect input until the tick deadline, update, draw
fn game_loop(tui: &mut TerminalUi, state: &mut GameState) -> Result<()> {
    let mut ui = GameUI::new();
    let mut input = TerminalInput::new(tui.keyboard_enhanced());
    let tick_len = Duration::from_secs_f64(1.0 / state.config.ticks_per_second as f64);
    let mut next_tick = Instant::now() + tick_len;

    loop {
        let polled = input.collect_until(next_tick)?;
        if polled.quit {
            ui.quit_requested = true;
            break;
        }
        if polled.toggle_log {
            ui.toggle_action_log();
        }

        let tick = state.current_tick;
        for event in update(state, &polled.tick) {
            ui.record(tick, &event, &state.graph);
        }
        tui.draw(&render(state), &ui)?;

        next_tick += tick_len;
        let now = Instant::now();
        if next_tick < now {
            // Fell behind; resync instead of bursting catch-up ticks
            next_tick = now + tick_len;
        }
    }

    tracing::info!("Quit at tick {}", state.current_tick);
    Ok(())
}
