//! Database session lifecycle
//!
//! A session owns one client and the task driving its connection. Callers
//! must hand it back through [`Session::close`] on every path.

use crate::config::ConnectionConfig;
use crate::error::{Error, Result};
use crate::ssl::build_connector;
use tokio::task::JoinHandle;
use tokio_postgres::Client;
use tracing::{debug, instrument, warn};

pub struct Session {
    client: Client,
    connection: JoinHandle<std::result::Result<(), tokio_postgres::Error>>,
}

impl Session {
    /// Open an SSL session to the configured database.
    #[instrument(skip_all, fields(host = %config.host, port = %config.port, database = %config.database))]
    pub async fn open(config: &ConnectionConfig) -> Result<Self> {
        let pg_config = config.to_pg_config()?;
        let connector = build_connector(config)?;

        debug!("Connecting");
        let (client, connection) = pg_config.connect(connector).await?;
        let connection = tokio::spawn(connection);
        debug!("Connected");

        Ok(Self { client, connection })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut Client {
        &mut self.client
    }

    /// Terminate the session and wait for the connection to shut down.
    pub async fn close(self) {
        let Self { client, connection } = self;
        drop(client);

        match connection.await {
            Ok(Ok(())) => debug!("Connection closed"),
            Ok(Err(e)) => warn!(error = %Error::from(e), "Connection closed with error"),
            Err(e) => warn!(error = %Error::ConnectionTask(e.to_string()), "Connection task failed"),
        }
    }
}
