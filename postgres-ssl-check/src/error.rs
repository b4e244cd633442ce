//! Error types for connectivity checks

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Connection refusal, authentication failure or a failed query.
    #[error("{}", describe_db_error(.0))]
    Database(#[from] tokio_postgres::Error),

    /// The TLS connector could not be built.
    #[error("TLS setup failed: {0}")]
    Tls(#[from] openssl::error::ErrorStack),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    /// The background connection driver panicked or was cancelled.
    #[error("connection task failed: {0}")]
    ConnectionTask(String),
}

impl Error {
    /// Whether the error came from the database layer rather than local setup.
    pub fn is_database(&self) -> bool {
        matches!(self, Self::Database(_))
    }

    /// Label printed in front of the message on the console.
    pub fn label(&self) -> &'static str {
        if self.is_database() {
            "Database error"
        } else {
            "Unexpected error"
        }
    }
}

/// Prefer the server's own message over the client's generic "db error".
fn describe_db_error(err: &tokio_postgres::Error) -> String {
    match err.as_db_error() {
        Some(db) => format!("{}: {}", db.severity(), db.message()),
        None => with_sources(err),
    }
}

/// Render an error followed by its `source()` chain, skipping causes the
/// message already includes.
fn with_sources(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

pub type Result<T> = std::result::Result<T, Error>;
