//! Database Config

use std::time::Duration;

use clap::Args;

use storefront_app::database::ConnectRetry;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Connection attempts made at startup before giving up
    #[arg(long, env = "DATABASE_CONNECT_RETRIES", default_value_t = 5)]
    pub connect_retries: u32,

    /// Seconds to wait between connection attempts
    #[arg(long, env = "DATABASE_CONNECT_RETRY_DELAY_SECS", default_value_t = 5)]
    pub connect_retry_delay_secs: u64,
}

impl DatabaseConfig {
    #[must_use]
    pub fn connect_retry(&self) -> ConnectRetry {
        ConnectRetry {
            attempts: self.connect_retries,
            delay: Duration::from_secs(self.connect_retry_delay_secs),
        }
    }
}
