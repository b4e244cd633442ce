//! PostgreSQL SSL connectivity check
//!
//! Probes a PostgreSQL server over an encrypted session and seeds a couple of
//! sample rows. Each step opens its own session and closes it before
//! returning:
//! - [`test_connection`] runs the read-only diagnostics
//! - [`create_sample_data`] performs the idempotent sample insert

pub mod config;
pub mod error;
pub mod probe;
pub mod report;
pub mod seed;
pub mod session;
pub mod ssl;

pub use config::ConnectionConfig;
pub use error::{Error, Result};
pub use probe::test_connection;
pub use report::Reporter;
pub use seed::{create_sample_data, SeedOutcome};
pub use session::Session;
