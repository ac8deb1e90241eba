// Entry point: checks for mpv, loads config, queues CLI paths, and runs the TUI.

use std::path::PathBuf;

use clap::Parser;

use chakrabeats::action::Action;
use chakrabeats::app::App;
use chakrabeats::config::Config;
use chakrabeats::logging;
use chakrabeats::player::playlist::collect_audio_files;

#[derive(Parser)]
#[command(name = "chakrabeats", version, about = "Anime-themed terminal music player")]
struct Cli {
    /// Audio files or folders to add to the playlist.
    paths: Vec<PathBuf>,
}

fn check_dependencies() {
    if which::which("mpv").is_err() {
        eprintln!("Error: mpv is required but not found. Install it with your package manager (e.g. brew install mpv).");
        std::process::exit(1);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    check_dependencies();

    let config = Config::load().unwrap_or_default();
    logging::init()?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "chakrabeats starting");

    let mut app = App::new(config)?;

    let tx = app.action_sender();
    for path in &cli.paths {
        match collect_audio_files(path) {
            Ok(files) => tx.send(Action::AddPaths(files))?,
            Err(e) => tx.send(Action::ShowError(e.to_string()))?,
        }
    }

    app.run().await?;
    Ok(())
}
