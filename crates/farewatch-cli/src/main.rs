use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "farewatch")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Watches one flight route's ticket price and emails an alert when it moves past a threshold",
    long_about = "Farewatch drives a headless Chrome session through a booking site's search form, \
                  reads the ticket price for one route and date on a fixed schedule, and sends an \
                  email once the price drifts past the configured percentage threshold."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to ~/.farewatch/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Monitor the route on a fixed schedule and alert on threshold breaches
    Watch {
        /// Departure city (prompted for when omitted)
        #[arg(long)]
        origin: Option<String>,

        /// Destination city (prompted for when omitted)
        #[arg(long)]
        destination: Option<String>,

        /// Travel date in DD.MM.YYYY form (prompted for when omitted)
        #[arg(long)]
        date: Option<String>,
    },

    /// Fetch the price once, print it, and exit
    Check {
        /// Departure city (prompted for when omitted)
        #[arg(long)]
        origin: Option<String>,

        /// Destination city (prompted for when omitted)
        #[arg(long)]
        destination: Option<String>,

        /// Travel date in DD.MM.YYYY form (prompted for when omitted)
        #[arg(long)]
        date: Option<String>,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Watch {
            origin,
            destination,
            date,
        } => commands::watch::execute(cli.config, origin, destination, date),
        Commands::Check {
            origin,
            destination,
            date,
        } => commands::check::execute(cli.config, origin, destination, date),
        Commands::Completion { shell } => commands::completion::execute(shell, &mut Cli::command()),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("farewatch=debug,farewatch_core=debug,farewatch_browser=debug,farewatch_notify=debug")
    } else {
        EnvFilter::new("farewatch=info,farewatch_core=info,farewatch_browser=info,farewatch_notify=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
