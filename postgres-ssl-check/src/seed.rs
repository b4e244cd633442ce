//! Sample-data seeder
//!
//! Inserts two fixed users. Rows whose username already exists are skipped
//! by the database, so repeated runs never duplicate or fail.

use crate::config::ConnectionConfig;
use crate::error::Result;
use crate::report::Reporter;
use crate::session::Session;
use std::io::Write;
use tokio_postgres::types::ToSql;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleUser {
    pub username: &'static str,
    pub email: &'static str,
}

pub static SAMPLE_USERS: [SampleUser; 2] = [
    SampleUser {
        username: "john_doe",
        email: "john@example.com",
    },
    SampleUser {
        username: "jane_smith",
        email: "jane@example.com",
    },
];

/// `id` is cast to text so serial, bigserial and uuid keys all decode.
pub const INSERT_SAMPLE_USERS: &str = r#"
INSERT INTO users (username, email)
VALUES
    ($1, $2),
    ($3, $4)
ON CONFLICT (username) DO NOTHING
RETURNING id::text AS id, username
"#;

/// A row created by this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededUser {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    pub inserted: Vec<SeededUser>,
}

impl SeedOutcome {
    /// Sample usernames that were skipped because they already existed
    pub fn already_present(&self) -> Vec<&'static str> {
        SAMPLE_USERS
            .iter()
            .map(|user| user.username)
            .filter(|name| !self.inserted.iter().any(|u| u.username == *name))
            .collect()
    }
}

/// Insert the sample users in one statement and commit.
pub async fn seed_sample_users(session: &mut Session) -> Result<SeedOutcome> {
    let params: Vec<&(dyn ToSql + Sync)> = SAMPLE_USERS
        .iter()
        .flat_map(|user| {
            [
                &user.username as &(dyn ToSql + Sync),
                &user.email as &(dyn ToSql + Sync),
            ]
        })
        .collect();

    let tx = session.client_mut().transaction().await?;
    let rows = tx.query(INSERT_SAMPLE_USERS, &params).await?;
    tx.commit().await?;

    let mut inserted = Vec::with_capacity(rows.len());
    for row in &rows {
        inserted.push(SeededUser {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
        });
    }

    info!(inserted = inserted.len(), "Sample users seeded");

    Ok(SeedOutcome { inserted })
}

pub fn report_seed_outcome<W: Write>(reporter: &mut Reporter<W>, outcome: &SeedOutcome) {
    if outcome.inserted.is_empty() {
        reporter.info("Sample users already exist");
        return;
    }

    reporter.success(format_args!(
        "Inserted {} sample users",
        outcome.inserted.len()
    ));
    for user in &outcome.inserted {
        reporter.detail(format_args!("- {} (ID: {})", user.username, user.id));
    }

    for username in outcome.already_present() {
        reporter.info(format_args!("{} already exists", username));
    }
}

/// Insert the sample data, reporting the result.
///
/// Failures are printed and swallowed; they never affect the caller's
/// outcome. Returns what was inserted when the seed ran to completion.
pub async fn create_sample_data<W: Write>(
    config: &ConnectionConfig,
    reporter: &mut Reporter<W>,
) -> Option<SeedOutcome> {
    let mut session = match Session::open(config).await {
        Ok(session) => session,
        Err(e) => {
            debug!(error = ?e, "Seed connection failed");
            reporter.failure(format_args!("Error creating sample data: {}", e));
            return None;
        }
    };

    let result = seed_sample_users(&mut session).await;
    session.close().await;

    match result {
        Ok(outcome) => {
            report_seed_outcome(reporter, &outcome);
            Some(outcome)
        }
        Err(e) => {
            debug!(error = ?e, "Seeding failed");
            reporter.failure(format_args!("Error creating sample data: {}", e));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{buffered, output};

    fn seeded(id: &str, username: &str) -> SeededUser {
        SeededUser {
            id: id.to_string(),
            username: username.to_string(),
        }
    }

    #[test]
    fn test_insert_has_one_placeholder_per_field() {
        let placeholders = (1..=SAMPLE_USERS.len() * 2)
            .filter(|n| INSERT_SAMPLE_USERS.contains(&format!("${}", n)))
            .count();
        assert_eq!(placeholders, 4);
        assert!(INSERT_SAMPLE_USERS.contains("ON CONFLICT (username) DO NOTHING"));
    }

    #[test]
    fn test_report_fresh_insert() {
        let outcome = SeedOutcome {
            inserted: vec![seeded("1", "john_doe"), seeded("2", "jane_smith")],
        };
        assert!(outcome.already_present().is_empty());

        let mut reporter = buffered();
        report_seed_outcome(&mut reporter, &outcome);
        assert_eq!(
            output(reporter),
            "✓ Inserted 2 sample users\n  - john_doe (ID: 1)\n  - jane_smith (ID: 2)\n"
        );
    }

    #[test]
    fn test_report_rerun_inserts_nothing() {
        let outcome = SeedOutcome::default();
        assert_eq!(outcome.already_present(), vec!["john_doe", "jane_smith"]);

        let mut reporter = buffered();
        report_seed_outcome(&mut reporter, &outcome);
        assert_eq!(output(reporter), "ℹ Sample users already exist\n");
    }

    #[test]
    fn test_report_partial_insert() {
        let outcome = SeedOutcome {
            inserted: vec![seeded("7", "jane_smith")],
        };
        assert_eq!(outcome.already_present(), vec!["john_doe"]);

        let mut reporter = buffered();
        report_seed_outcome(&mut reporter, &outcome);
        assert_eq!(
            output(reporter),
            "✓ Inserted 1 sample users\n  - jane_smith (ID: 7)\nℹ john_doe already exists\n"
        );
    }

    #[tokio::test]
    async fn test_seed_failure_is_swallowed() {
        let config = ConnectionConfig {
            host: "127.0.0.1".to_string(),
            port: "1".to_string(),
            ..ConnectionConfig::default()
        };

        let mut reporter = buffered();
        assert!(create_sample_data(&config, &mut reporter).await.is_none());
        let out = output(reporter);
        assert!(out.starts_with("✗ Error creating sample data:"));
        assert!(out.to_lowercase().contains("refused"), "cause missing: {}", out);
    }
}
