use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing::{error, info};

use previewfm::{
    cli,
    config::{self, Config},
    discovery::Discovery,
    server,
};

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
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve(ServeOptions),

    /// List the genre seeds known to the catalog
    Genres,

    /// Pick an artist and show its top tracks with previews
    Discover(DiscoverOptions),

    /// Show a page of random tracks
    Tracks,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone, Default)]
pub struct ServeOptions {
    /// Address to bind, overrides SERVER_ADDRESS / PORT
    #[clap(long)]
    pub address: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DiscoverOptions {
    /// Restrict the artist search to a genre
    #[clap(long)]
    pub genre: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    // .env may carry RUST_LOG, so it is loaded before the subscriber exists
    let loaded = config::load_env().await;

    tracing_subscriber::fmt()
        .with_env_filter(config::log_filter(
            std::env::var("RUST_LOG").ok().as_deref(),
        ))
        .init();

    if let Err(e) = loaded {
        error!("Cannot load environment: {}", e);
    }

    let cli = Cli::parse();
    let mut config = Config::from_env();

    match cli.command.unwrap_or(Command::Serve(ServeOptions::default())) {
        Command::Serve(opt) => {
            if let Some(address) = opt.address {
                config.server_address = address;
            }

            info!(
                "Starting {} v{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            );
            if let Err(e) = server::start_api_server(Discovery::from_config(config)).await {
                error!("Server stopped: {}", e);
                std::process::exit(1);
            }
        }
        Command::Genres => cli::genres(&Discovery::from_config(config)).await,
        Command::Discover(opt) => cli::discover(&Discovery::from_config(config), opt.genre).await,
        Command::Tracks => cli::tracks(&Discovery::from_config(config)).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
