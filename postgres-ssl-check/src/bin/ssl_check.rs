//! PostgreSQL SSL connectivity check
//!
//! Tests an SSL connection to the configured database, then seeds sample
//! users. Exits 1 when the connection test fails; seeding problems are
//! reported but do not change the exit code.

use anyhow::Result;
use common::init_logging;
use postgres_ssl_check::{create_sample_data, test_connection, ConnectionConfig, Reporter};
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _guard = init_logging("postgres-ssl-check");

    let config = ConnectionConfig::from_env();
    debug!(?config, "Loaded configuration");

    let mut reporter = Reporter::stdout();

    reporter.blank();
    if test_connection(&config, &mut reporter).await {
        reporter.blank();
        create_sample_data(&config, &mut reporter).await;
        reporter.blank();
        reporter.success("Example script completed successfully!");
        Ok(())
    } else {
        reporter.blank();
        reporter.failure("Connection test failed");
        std::process::exit(1);
    }
}
