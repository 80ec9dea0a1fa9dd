use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use setplaylist::{cli, config, types::PkceToken, warning};
use tokio::sync::Mutex;

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
    /// Log in with Spotify
    Auth,

    /// Search Spotify for an artist
    Search(SearchOptions),

    /// Show an artist with past setlists and upcoming shows
    Band(BandOptions),

    /// Preview or create a playlist from a setlist
    #[command(subcommand)]
    Setlist(SetlistCommand),

    /// Preview or create a hype playlist from an artist's top tracks
    #[command(subcommand)]
    Hype(HypeCommand),

    /// Add an artist to your favorites, or remove it
    Favorite(ArtistArg),

    /// List your favorite artists
    Favorites,

    /// List recently assembled playlists
    Playlists(PlaylistsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Artist name
    pub query: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ArtistArg {
    /// Spotify artist id
    pub artist_id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct BandOptions {
    /// Spotify artist id
    pub artist_id: String,

    /// Page of setlists to show
    #[clap(long, default_value_t = 1)]
    pub page: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct SetlistArgs {
    /// Spotify artist id
    pub artist_id: String,

    /// setlist.fm setlist id
    pub setlist_id: String,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SetlistCommand {
    /// Show the playlist a setlist turns into
    Show(SetlistArgs),

    /// Create the playlist on your Spotify account
    Create(SetlistArgs),
}

#[derive(Subcommand, Debug, Clone)]
pub enum HypeCommand {
    /// Show the hype playlist of an artist
    Show(ArtistArg),

    /// Create the hype playlist on your Spotify account
    Create(ArtistArg),
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistsOptions {
    /// Only playlists created on your account
    #[clap(long)]
    pub mine: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Search(opt) => cli::search(opt.query).await,
        Command::Band(opt) => cli::band(opt.artist_id, opt.page).await,
        Command::Setlist(SetlistCommand::Show(args)) => {
            cli::show_setlist(args.artist_id, args.setlist_id).await
        }
        Command::Setlist(SetlistCommand::Create(args)) => {
            cli::create_setlist(args.artist_id, args.setlist_id).await
        }
        Command::Hype(HypeCommand::Show(arg)) => cli::show_hype(arg.artist_id).await,
        Command::Hype(HypeCommand::Create(arg)) => cli::create_hype(arg.artist_id).await,
        Command::Favorite(arg) => cli::toggle_favorite(arg.artist_id).await,
        Command::Favorites => cli::list_favorites().await,
        Command::Playlists(opt) => cli::list_playlists(opt.mine).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
