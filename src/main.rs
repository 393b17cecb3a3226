use anyhow::Result;
use clap::{Parser, Subcommand};

/// mealmind - household meal planning
#[derive(Parser)]
#[command(name = "mealmind")]
#[command(about = "Household meal planning: meal library, weekly plans, shopping lists", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop the database if it exists and recreate it with migrations
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = mealmind::Config::load(cli.config)?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealmind::observability::init_observability(&config.observability.log_level)?;

    match cli.command {
        Commands::Serve { host, port } => mealmind::server::serve(config, host, port).await,
        Commands::Migrate => mealmind::migrate::migrate(&config).await,
        Commands::Reset => mealmind::migrate::reset(&config).await,
    }
}
