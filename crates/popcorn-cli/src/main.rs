use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, config, details, search};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "popcorn")]
#[command(about = "popcorn - search movies, rate what you watched")]
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

    /// Write logs to this file (rotated daily) instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog by title
    Search {
        /// Title fragment (at least 3 characters)
        query: String,
    },
    /// Show full details for one title
    Details {
        /// IMDb identifier, e.g. tt1375666
        imdb_id: String,
    },
    /// Interactive session: search, open details and rate movies
    #[command(long_about = "Start an interactive session. Search the catalog, open a result to see its details, rate it to add it to your watched list, and review or prune that list. The watched list lives only as long as the session.")]
    Browse {
        /// Initial query (defaults to search.initial_query from the config)
        #[arg(long)]
        query: Option<String>,
    },
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Store the OMDb API key in the config file
    SetKey {
        /// API key (prompted for when omitted)
        key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Search { query } => search::run_search(query, &output).await,
        Commands::Details { imdb_id } => details::run_details(imdb_id, &output).await,
        Commands::Browse { query } => browse::run_browse(query, &output).await,
        Commands::Config { cmd } => config::run_config(cmd, &output).await,
    }
}
