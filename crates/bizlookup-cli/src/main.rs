mod db;
mod discover;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::{db::DbCommands, discover::DiscoverArgs};

#[derive(Debug, Parser)]
#[command(name = "bizlookup")]
#[command(about = "Business lookup command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Rank stored businesses by distance from a point and print them as JSON
    Discover(DiscoverArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("bizlookup: no command given, see --help");
        return Ok(());
    };

    let config = bizlookup_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    // stdout carries command output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let pool_config = bizlookup_db::PoolConfig::from_app_config(&config);
    let pool = bizlookup_db::connect_pool(&config.database_url, pool_config).await?;
    tracing::debug!(?command, "running command");

    let result = match command {
        Commands::Db { command } => db::run_db_command(&pool, command).await,
        Commands::Discover(args) => discover::run_discover(&pool, args).await,
    };

    pool.close().await;
    result
}
