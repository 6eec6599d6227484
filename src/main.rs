//! vision-hud - themed assistant boot sequence and weather HUD
//!
//! Run without arguments to launch the TUI, or use subcommands for CLI mode.
//!
//! Available as the `vision` command.

use std::fs::OpenOptions;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vision_hud::cli::commands::{Cli, Commands, TuiArgs};
use vision_hud::cli::{config, weather};
use vision_hud::core::config::Config;
use vision_hud::error::Result;
use vision_hud::tui::App;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.command.is_none());

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize logging: stderr for CLI commands, a log file while the TUI owns the terminal
fn init_logging(tui: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if tui {
        let file = Config::log_path().ok().and_then(|path| {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).ok()?;
            }
            OpenOptions::new().create(true).append(true).open(path).ok()
        });

        // Without a log file, stay silent rather than draw over the screen
        if let Some(file) = file {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        // No subcommand - launch TUI mode
        None => run_tui(cli.tui).await,

        Some(Commands::Weather(args)) => weather::handle_weather(args.command).await,

        Some(Commands::Config(args)) => config::handle_config(args.command),
    }
}

/// Run the TUI application
async fn run_tui(args: TuiArgs) -> Result<()> {
    let config = Config::load()?;

    let mut app = App::new(&config, &args);
    app.run().await
}
