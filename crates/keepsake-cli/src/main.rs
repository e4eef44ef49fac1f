use clap::{Parser, Subcommand};

mod commands;
mod surfaces;

#[derive(Parser)]
#[command(name = "keepsake-cli", version, about = "Keepsake CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Date-password gate
    Gate {
        #[command(subcommand)]
        action: commands::gate::GateAction,
    },
    /// Photo gallery
    Gallery {
        #[command(subcommand)]
        action: commands::gallery::GalleryAction,
    },
    /// Time together since the start date
    Together,
    /// Type out the letter
    Letter {
        /// Print the whole letter at once
        #[arg(long)]
        instant: bool,
    },
    /// Background music control
    Music {
        #[command(subcommand)]
        action: commands::music::MusicAction,
    },
    /// Print the timeline
    Timeline,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Gate { action } => commands::gate::run(action),
        Commands::Gallery { action } => commands::gallery::run(action),
        Commands::Together => commands::together::run(),
        Commands::Letter { instant } => commands::letter::run(instant),
        Commands::Music { action } => commands::music::run(action),
        Commands::Timeline => commands::timeline::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
