use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use std::path::PathBuf;
use watchlist_config::{Config, PathManager};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "watchlist")]
#[command(about = "Watchlist - search movies and TV shows and keep track of what to watch")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server
    #[command(long_about = "Serve the watch-list pages. Requires a TMDb API key and a reachable CouchDB/Cloudant database; see 'watchlist config show'.")]
    Serve {
        /// Address to listen on, overrides server.listen_addr (e.g. 0.0.0.0:8080)
        #[arg(long, value_name = "ADDR")]
        listen: Option<String>,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
    /// Create the list database if it does not exist yet
    InitDb,
}

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Show the effective configuration (masks sensitive data)
    #[command(long_about = "Display the configuration after environment overrides are applied. The TMDb API key and the database password are masked unless --full is given.")]
    Show {
        /// Show secrets in clear text
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Print the path of the config file
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config_file = cli
        .config
        .clone()
        .unwrap_or_else(|| PathManager::default().config_file());
    let config = Config::load(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    logging::init_logging(cli.verbose, cli.quiet, &config.logging).map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    let result = match cli.command {
        Commands::Serve { listen } => commands::serve::run_serve(config, listen, &output).await,
        Commands::Config { cmd } => commands::config::run_config(cmd, &config, &config_file, &output),
        Commands::InitDb => commands::init_db::run_init_db(&config, &output).await,
    };

    // Command failures are reported in the selected output format
    if let Err(e) = result {
        output.error(e.to_string());
        std::process::exit(1);
    }
    Ok(())
}
