use clap::{Parser, Subcommand};
use pitchpost_core::{logging, Config};

mod commands;

#[derive(Parser)]
#[command(name = "pitchpost", version, about = "PitchPost competition finder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show open, upcoming-closed and past competitions
    Board(commands::board::BoardArgs),
    /// Inspect a single competition
    Event {
        #[command(subcommand)]
        action: commands::event::EventAction,
    },
    /// Manage "applied" / "to apply" labels
    Interest {
        #[command(subcommand)]
        action: commands::interest::InterestAction,
    },
    /// Rank competitions by distance from a position
    Nearby(commands::nearby::NearbyArgs),
    /// List map markers for competitions with coordinates
    Map(commands::map::MapArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    logging::init_logging(Some(&config.logging.level));

    let result = match cli.command {
        Commands::Board(args) => commands::board::run(args, &config),
        Commands::Event { action } => commands::event::run(action, &config),
        Commands::Interest { action } => commands::interest::run(action),
        Commands::Nearby(args) => commands::nearby::run(args, &config),
        Commands::Map(args) => commands::map::run(args, &config),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
