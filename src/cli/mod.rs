pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "muni")]
#[command(about = "Muni CLI - Operations tooling for the municipal back-office API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "http://127.0.0.1:3000",
        help = "Base URL of a running API server"
    )]
    pub server: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Verify required environment variables before starting the server")]
    CheckEnv,

    #[command(about = "Query server liveness and database connectivity")]
    Health,

    #[command(about = "First-run administrator bootstrap")]
    Bootstrap {
        #[command(subcommand)]
        cmd: commands::bootstrap::BootstrapCommands,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::CheckEnv => commands::check_env::handle(),
        Commands::Health => commands::health::handle(&cli.server).await,
        Commands::Bootstrap { cmd } => commands::bootstrap::handle(cmd, &cli.server).await,
    }
}
