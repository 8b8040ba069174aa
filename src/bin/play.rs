use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;

use clap::Parser;
use monopoly_client::cli::TuiApp;
use monopoly_client::config::{ClientConfig, ConfigError};
use monopoly_client::engine::ProcessEngine;
use monopoly_client::view::ViewController;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser, Clone)]
#[command(name = "monopoly-play")]
#[command(about = "Play Monopoly in the terminal against an external rules engine")]
struct Args {
    /// Rules engine program, e.g. "monopoly-engine"
    #[arg(short = 'e', long)]
    engine: Option<String>,

    /// Arguments for the engine program, given after `--`
    #[arg(last = true)]
    engine_args: Vec<String>,

    /// JSON config file; flags below override its values
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Seed handed to the engine
    #[arg(long)]
    seed: Option<String>,

    /// Number of players (2-4)
    #[arg(short = 'p', long)]
    players: Option<usize>,

    #[arg(long)]
    starting_funds: Option<i64>,

    /// Side length of the board in board units
    #[arg(long)]
    board_size: Option<f64>,

    /// Where log output goes; the terminal belongs to the board
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<ClientConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    };
    if let Some(engine) = &args.engine {
        config.engine = Some(engine.clone());
    }
    if !args.engine_args.is_empty() {
        config.engine_args = args.engine_args.clone();
    }
    if let Some(seed) = &args.seed {
        config.setup.seed = seed.clone();
    }
    if let Some(players) = args.players {
        config.setup.player_count = players;
    }
    if let Some(funds) = args.starting_funds {
        config.setup.starting_funds = funds;
    }
    if let Some(size) = args.board_size {
        config.layout.size = size;
    }
    if let Some(log_file) = &args.log_file {
        config.log_file = log_file.clone();
    }
    config.validate()?;
    Ok(config)
}

fn init_tracing(log_file: &Path) -> io::Result<()> {
    let file = File::create(log_file)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        process::exit(2);
    });

    if let Err(err) = init_tracing(&config.log_file) {
        eprintln!(
            "Error: cannot open log file {}: {err}",
            config.log_file.display()
        );
        process::exit(1);
    }

    let Some(program) = config.engine.as_deref() else {
        eprintln!("Error: no engine given; pass --engine or set \"engine\" in the config file");
        process::exit(2);
    };

    let engine = ProcessEngine::spawn(program, &config.engine_args).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        process::exit(1);
    });

    let controller = ViewController::start(
        engine,
        &config.setup,
        config.layout,
        config.bid_increments.clone(),
    )
    .unwrap_or_else(|err| {
        eprintln!("Error: could not start the game: {err}");
        process::exit(1);
    });
    info!(session = %controller.session_id(), "game started");

    let mut app = TuiApp::new(controller);
    if let Err(err) = app.run() {
        eprintln!("Error: terminal failure: {err}");
        process::exit(1);
    }
}
