//! `db` sub-command handlers: connectivity, migrations and seeding.

use clap::Subcommand;
use sqlx::PgPool;

/// Sub-commands available under `db`.
#[derive(Debug, Subcommand)]
pub enum DbCommands {
    /// Verify the database connection
    Ping,
    /// Apply pending migrations
    Migrate,
    /// Insert the sample businesses, or random ones with `--random`
    Seed {
        /// Number of random businesses to insert instead of the samples
        #[arg(long)]
        random: Option<usize>,
    },
}

/// Run a `db` sub-command against `pool`.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub(crate) async fn run_db_command(pool: &PgPool, command: DbCommands) -> anyhow::Result<()> {
    match command {
        DbCommands::Ping => {
            bizlookup_db::ping(pool).await?;
            println!("database connection ok");
        }
        DbCommands::Migrate => {
            let applied = bizlookup_db::run_migrations(pool).await?;
            tracing::info!(applied, "migrations complete");
            println!("applied {applied} migration(s)");
        }
        DbCommands::Seed { random: None } => {
            let inserted = bizlookup_db::seed_sample_businesses(pool).await?;
            println!("inserted {inserted} sample businesses");
        }
        DbCommands::Seed {
            random: Some(count),
        } => {
            let inserted = bizlookup_db::seed_random_businesses(pool, count).await?;
            println!("inserted {inserted} random businesses");
        }
    }

    Ok(())
}
