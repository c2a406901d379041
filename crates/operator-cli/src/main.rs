use clap::{Parser, Subcommand};
use operator_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "operator-cli", version, about = "Operator Standard CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Strike escalation tiers and rules
    Strikes {
        #[command(subcommand)]
        action: commands::strikes::StrikesAction,
    },
    /// Social and crew gates
    Gate {
        #[command(subcommand)]
        action: commands::gate::GateAction,
    },
    /// Night reflection scoring
    Reflect {
        #[command(subcommand)]
        action: commands::reflect::ReflectAction,
    },
    /// Proof trigger detection
    Proof {
        #[command(subcommand)]
        action: commands::proof::ProofAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();

    // Only gate and reflect read settings; other commands never touch the file.
    let loaded = match cli.command {
        Commands::Gate { .. } | Commands::Reflect { .. } => Some(Config::load()),
        _ => None,
    };
    let level = match &loaded {
        Some(Ok(config)) => config.logging.level.as_str(),
        _ => "info",
    };
    init_tracing(level);

    let config = match loaded {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            tracing::warn!(error = %e, "failed to load config, using defaults");
            Config::default()
        }
        None => Config::default(),
    };

    let result = match cli.command {
        Commands::Strikes { action } => commands::strikes::run(action),
        Commands::Gate { action } => commands::gate::run(action, &config),
        Commands::Reflect { action } => commands::reflect::run(action, &config),
        Commands::Proof { action } => commands::proof::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
