//! Connectivity prober
//!
//! Opens an SSL session and runs the read-only diagnostic queries, reporting
//! each result as it arrives. The first failure aborts the remaining queries.

use crate::config::ConnectionConfig;
use crate::error::{Error, Result};
use crate::report::Reporter;
use crate::session::Session;
use crate::ssl::cert_expires_within;
use std::io::Write;
use tokio_postgres::Client;
use tracing::{debug, warn};

pub const VERSION_QUERY: &str = "SELECT version()";

pub const SSL_STATUS_QUERY: &str = "SHOW ssl";

/// Encryption details of the session running the query
pub const SESSION_SSL_QUERY: &str = r#"
SELECT
    host(inet_client_addr()) AS client_addr,
    host(inet_server_addr()) AS server_addr,
    pg_stat_ssl.ssl,
    pg_stat_ssl.version
FROM pg_stat_ssl
JOIN pg_stat_activity ON pg_stat_ssl.pid = pg_stat_activity.pid
WHERE pg_stat_activity.pid = pg_backend_pid()
"#;

pub const USER_COUNT_QUERY: &str = "SELECT COUNT(*) AS count FROM users";

pub const TABLES_QUERY: &str = r#"
SELECT table_name::text
FROM information_schema.tables
WHERE table_schema = 'public'
ORDER BY table_name
"#;

const VERSION_DISPLAY_CHARS: usize = 50;

/// Warn when the trusted root certificate has less than this left.
const ROOT_CERT_EXPIRY_WARNING_SECS: u64 = 30 * 86400;

/// Row of `pg_stat_ssl` for the current backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SslSession {
    /// `None` for unix-socket sessions
    pub client_addr: Option<String>,
    pub server_addr: Option<String>,
    pub ssl: bool,
    /// Negotiated protocol, e.g. `TLSv1.3`
    pub version: Option<String>,
}

pub async fn server_version(client: &Client) -> Result<String> {
    let row = client.query_one(VERSION_QUERY, &[]).await?;
    Ok(row.try_get(0)?)
}

/// Value of the server's `ssl` setting (`on` or `off`)
pub async fn ssl_setting(client: &Client) -> Result<String> {
    let row = client.query_one(SSL_STATUS_QUERY, &[]).await?;
    Ok(row.try_get("ssl")?)
}

pub async fn session_ssl(client: &Client) -> Result<Option<SslSession>> {
    let row = client.query_opt(SESSION_SSL_QUERY, &[]).await?;

    row.map(|row| -> Result<SslSession> {
        Ok(SslSession {
            client_addr: row.try_get("client_addr")?,
            server_addr: row.try_get("server_addr")?,
            ssl: row.try_get::<_, Option<bool>>("ssl")?.unwrap_or(false),
            version: row.try_get("version")?,
        })
    })
    .transpose()
}

pub async fn user_count(client: &Client) -> Result<i64> {
    let row = client.query_one(USER_COUNT_QUERY, &[]).await?;
    Ok(row.try_get("count")?)
}

/// Names of all tables in the `public` schema, sorted
pub async fn public_tables(client: &Client) -> Result<Vec<String>> {
    let rows = client.query(TABLES_QUERY, &[]).await?;
    rows.iter()
        .map(|row| row.try_get::<_, String>(0).map_err(Error::from))
        .collect()
}

/// First 50 characters of the version banner, followed by an ellipsis
pub fn truncate_version(version: &str) -> String {
    let head: String = version.chars().take(VERSION_DISPLAY_CHARS).collect();
    format!("{}...", head)
}

/// Print the encryption status of the current session.
///
/// A missing row or `ssl = false` is reported as a warning, never a failure.
pub fn report_session_ssl<W: Write>(reporter: &mut Reporter<W>, session: Option<&SslSession>) {
    match session {
        Some(info) if info.ssl => {
            reporter.success("Connection is encrypted");
            reporter.detail(format_args!(
                "Client: {}",
                info.client_addr.as_deref().unwrap_or("local")
            ));
            reporter.detail(format_args!(
                "Server: {}",
                info.server_addr.as_deref().unwrap_or("local")
            ));
            reporter.detail(format_args!(
                "TLS Version: {}",
                info.version.as_deref().unwrap_or("unknown")
            ));
        }
        _ => reporter.warning("Connection is not encrypted"),
    }
}

pub fn report_tables<W: Write>(reporter: &mut Reporter<W>, tables: &[String]) {
    reporter.success("Tables in database:");
    for table in tables {
        reporter.detail(format_args!("- {}", table));
    }
}

async fn run_diagnostics<W: Write>(client: &Client, reporter: &mut Reporter<W>) -> Result<()> {
    let version = server_version(client).await?;
    reporter.detail(format_args!("Version: {}", truncate_version(&version)));

    let ssl = ssl_setting(client).await?;
    reporter.success(format_args!("SSL Status: {}", ssl));

    let session = session_ssl(client).await?;
    report_session_ssl(reporter, session.as_ref());

    let count = user_count(client).await?;
    reporter.success("Sample query successful");
    reporter.detail(format_args!("Users in database: {}", count));

    let tables = public_tables(client).await?;
    report_tables(reporter, &tables);

    Ok(())
}

fn check_root_cert(config: &ConnectionConfig) {
    let Some(path) = &config.ssl_root_cert else {
        return;
    };

    match cert_expires_within(path, ROOT_CERT_EXPIRY_WARNING_SECS) {
        Ok(true) => warn!(root_cert = %path, "Root certificate expires within 30 days"),
        Ok(false) => {}
        // Reported by the connector when the session opens
        Err(e) => {
            debug!(root_cert = %path, error = %e, "Could not inspect root certificate")
        }
    }
}

/// Test the database connection and its SSL status.
///
/// Returns `true` when every diagnostic query succeeded. The session is
/// closed before returning on both paths.
pub async fn test_connection<W: Write>(
    config: &ConnectionConfig,
    reporter: &mut Reporter<W>,
) -> bool {
    reporter.header("Testing PostgreSQL Connection with SSL");
    reporter.rule();

    check_root_cert(config);

    let session = match Session::open(config).await {
        Ok(session) => session,
        Err(e) => {
            debug!(error = ?e, "Connection failed");
            reporter.failure(format_args!("{}: {}", e.label(), e));
            return false;
        }
    };
    reporter.success("Connected to PostgreSQL");

    let result = run_diagnostics(session.client(), reporter).await;
    session.close().await;

    if let Err(e) = result {
        debug!(error = ?e, "Diagnostics aborted");
        reporter.failure(format_args!("{}: {}", e.label(), e));
        return false;
    }

    reporter.rule();
    reporter.success("All tests passed!");
    reporter.blank();
    reporter.line("Connection string format:");
    reporter.line(config.redacted_connection_string());

    true
}
