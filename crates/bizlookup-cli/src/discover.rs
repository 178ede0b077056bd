use anyhow::Context;
use bizlookup_core::{discover, validate_discovery_query, RawDiscoveryQuery};
use bizlookup_db::PgBusinessStore;
use clap::Args;
use sqlx::PgPool;

/// Discovery parameters, passed through as raw strings so they are coerced
/// and validated exactly like HTTP query parameters.
#[derive(Debug, Args)]
pub struct DiscoverArgs {
    /// Origin latitude in degrees (default 0)
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<String>,
    /// Origin longitude in degrees (default 0)
    #[arg(long, allow_hyphen_values = true)]
    pub long: Option<String>,
    /// Maximum number of results; -1 for all (default -1)
    #[arg(long, allow_hyphen_values = true)]
    pub limit: Option<String>,
    /// Only businesses of exactly this type
    #[arg(long = "type")]
    pub business_type: Option<String>,
}

impl From<DiscoverArgs> for RawDiscoveryQuery {
    fn from(args: DiscoverArgs) -> Self {
        Self {
            lat: args.lat,
            long: args.long,
            limit: args.limit,
            business_type: args.business_type,
        }
    }
}

/// Validate `args`, rank the stored businesses and print the result as
/// pretty JSON.
///
/// # Errors
///
/// Returns an error if validation fails or the store cannot be read.
pub(crate) async fn run_discover(pool: &PgPool, args: DiscoverArgs) -> anyhow::Result<()> {
    let raw = RawDiscoveryQuery::from(args);
    let query = validate_discovery_query(&raw).context("invalid discovery query")?;

    let store = PgBusinessStore::new(pool.clone());
    let results = discover(&store, &query)
        .await
        .context("failed to load businesses")?;

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
