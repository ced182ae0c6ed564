use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use alien_defense::assets::Assets;
use alien_defense::config::Settings;
use alien_defense::director::Director;
use alien_defense::display::terminal::TerminalSurface;
use alien_defense::display::Surface;

/// Defend against descending alien waves.
/// Move with the arrow keys or WASD, fire with Space, Esc quits.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// JSON settings file; built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the target frame rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Override the starting number of lives.
    #[arg(long)]
    lives: Option<i32>,

    /// Seed for wave layout and enemy fire; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Size the play area from the terminal.
    #[arg(long)]
    full_screen: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        // stderr shares the terminal with the game; keep it quiet by default
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    if let Some(fps) = cli.fps {
        settings.gameplay.fps = fps;
    }
    if let Some(lives) = cli.lives {
        settings.gameplay.player_lives = lives;
    }
    if cli.full_screen {
        settings.display.full_screen = true;
    }
    if cli.log_file.is_some() {
        settings.log_file = cli.log_file.clone();
    }
    init_logging(settings.log_file.as_ref())?;
    log::info!("settings: {settings:?}");

    let assets =
        Assets::load(&settings.assets, &settings.display.icon_image).context("loading assets")?;
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // Restores the terminal when dropped, including on error paths below.
    let mut screen = TerminalSurface::open(&settings.display).context("opening terminal")?;
    let mut director = Director::new(
        assets,
        settings.gameplay.clone(),
        screen.width(),
        screen.height(),
        rng,
    )
    .context("starting game")?;

    let reason = director.run(&mut screen).context("game loop")?;
    drop(screen);

    let state = director.state();
    println!(
        "Game over ({reason:?}): reached level {} with {} lives left.",
        state.level,
        state.lives.max(0)
    );
    Ok(())
}
