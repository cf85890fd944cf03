//! Perspective Shift: a quarter-turn puzzle platformer
//!
//! The world is a handful of boxes seen through an orthographic camera that
//! turns in 90° steps. Collision happens in screen space, so platforms that
//! line up on screen are walkable no matter how far apart they really are.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod audio;
mod game;
mod input;
mod math;
mod world;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use clap::Parser;
use macroquad::prelude::*;
use app::{AppState, FrameOutcome};
use game::renderer::Viewport;
use world::{create_default_level, load_level, Level};

#[derive(Parser, Debug)]
#[command(name = "perspective-shift", version, about = "Quarter-turn perspective platformer")]
struct Args {
    /// Level file to play (plain or brotli-compressed RON)
    #[arg(long, value_name = "PATH")]
    level: Option<PathBuf>,

    /// Start with the F3 debug overlay shown
    #[arg(long)]
    debug: bool,

    /// Load and validate a level file, print a summary and exit
    #[arg(long, value_name = "PATH", conflicts_with = "level")]
    check: Option<PathBuf>,

    /// Master volume, 0 to 1
    #[arg(long, default_value_t = 0.8)]
    volume: f32,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Perspective Shift".to_string(),
        window_width: 720,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// `--check`: validate without opening a window
fn check_level(path: &Path) -> ExitCode {
    match load_level(path) {
        Ok(level) => {
            println!("{}: '{}'", path.display(), level.name);
            println!("  platforms: {}", level.platforms.len());
            println!("  colors:    {}", level.colors.len());
            println!(
                "  spawn:     ({}, {}, {})",
                level.spawn.x, level.spawn.y, level.spawn.z
            );
            match level.goal {
                Some(goal) => println!("  goal:      platform {}", goal),
                None => println!("  goal:      none"),
            }
            println!("  monolith:  {}", if level.monolith.is_some() { "yes" } else { "no" });
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {}", path.display(), e);
            ExitCode::FAILURE
        }
    }
}

/// The level to start with. A bad file falls back to the built-in level
fn initial_level(path: Option<&Path>) -> Level {
    let Some(path) = path else {
        log::info!("no level given, using the built-in level");
        return create_default_level();
    };
    match load_level(path) {
        Ok(level) => level,
        Err(e) => {
            log::warn!("failed to load {}: {}, using the built-in level", path.display(), e);
            create_default_level()
        }
    }
}

async fn run(args: Args) {
    let level = initial_level(args.level.as_deref());
    let mut app = AppState::new(level, args.level, args.debug);
    app.audio.set_master_volume(args.volume);
    if !app.audio.is_active() {
        log::info!("running without sound");
    }

    loop {
        if app.update(get_frame_time() as f64) == FrameOutcome::Quit {
            break;
        }
        app.draw(&Viewport::fit(screen_width(), screen_height()));
        next_frame().await;
    }

    log::info!("bye after {} ticks", app.world.ticks());
}

fn main() -> ExitCode {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    init_logging();
    let args = Args::parse();
    log::info!("perspective-shift v{}", VERSION);

    if let Some(path) = &args.check {
        return check_level(path);
    }

    macroquad::Window::from_config(window_conf(), run(args));
    ExitCode::SUCCESS
}
