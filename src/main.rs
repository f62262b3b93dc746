use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use tokio::sync::Mutex;
use xmsync::{cli, config, error, types::PkceToken};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Sync the station rotation into a Spotify playlist
    Sync(SyncOptions),

    /// Show the current station rotation
    Tracks(TracksOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SyncOptions {
    /// XMPlaylist station key (defaults to XMPLAYLIST_STATION)
    #[clap(long)]
    station: Option<String>,

    /// Drop repeated tracks before uploading
    #[clap(long)]
    dedupe: bool,

    /// Spread the tracks across created "Part n" playlists instead of the
    /// configured playlist
    #[clap(long)]
    split: bool,

    /// Base name for playlists created by --split
    #[clap(long)]
    name: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct TracksOptions {
    /// XMPlaylist station key (defaults to XMPLAYLIST_STATION)
    #[clap(long)]
    station: Option<String>,

    /// Read the snapshot of the last successful fetch instead of the live API
    #[clap(long)]
    cached: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }

        Command::Sync(opt) => cli::sync(opt.station, opt.dedupe, opt.split, opt.name).await,

        Command::Tracks(opt) => cli::tracks(opt.station, opt.cached).await,

        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
