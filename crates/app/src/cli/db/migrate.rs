use std::time::Duration;

use clap::Args;
use storefront_app::{context::bootstrap_database, database::ConnectRetry};

#[derive(Debug, Args)]
pub(crate) struct MigrateArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Connection attempts before giving up
    #[arg(long, env = "DATABASE_CONNECT_RETRIES", default_value_t = 5)]
    retries: u32,

    /// Seconds to wait between connection attempts
    #[arg(long, env = "DATABASE_CONNECT_RETRY_DELAY_SECS", default_value_t = 5)]
    retry_delay_secs: u64,
}

pub(crate) async fn run(args: MigrateArgs) -> Result<(), String> {
    let retry = ConnectRetry {
        attempts: args.retries,
        delay: Duration::from_secs(args.retry_delay_secs),
    };

    let db = bootstrap_database(&args.database_url, retry)
        .await
        .map_err(|error| format!("{error}"))?;

    db.close().await;

    println!("migrations applied");

    Ok(())
}
