//! TLS connector setup
//!
//! Builds the openssl connector used for `sslmode=require` sessions and
//! inspects the optional root certificate.

use crate::config::ConnectionConfig;
use crate::error::{Error, Result};
use openssl::asn1::Asn1Time;
use openssl::ssl::{SslConnector, SslMethod, SslVerifyMode};
use openssl::x509::X509;
use postgres_openssl::MakeTlsConnector;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Build the TLS connector for a session.
///
/// Without a root certificate the server certificate is not verified, which
/// lets self-signed deployments work while still encrypting the channel.
/// With one, the server must present a certificate signed by it.
pub fn build_connector(config: &ConnectionConfig) -> Result<MakeTlsConnector> {
    let mut builder = SslConnector::builder(SslMethod::tls())?;

    match &config.ssl_root_cert {
        Some(path) => {
            let root_cert = load_certificate(path)?;
            builder.cert_store_mut().add_cert(root_cert)?;
            builder.set_verify(SslVerifyMode::PEER);
            debug!(root_cert = %path, "Verifying server certificate");
        }
        None => {
            builder.set_verify(SslVerifyMode::NONE);
            debug!("Server certificate verification disabled");
        }
    }

    Ok(MakeTlsConnector::new(builder.build()))
}

/// Read and parse a PEM certificate
pub fn load_certificate(path: impl AsRef<Path>) -> Result<X509> {
    let path = path.as_ref();
    let pem = fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    X509::from_pem(&pem).map_err(|e| {
        Error::Config(format!(
            "{} is not a PEM certificate: {}",
            path.display(),
            e
        ))
    })
}

/// Check if a certificate will expire within the given seconds.
///
/// An already expired certificate counts as expiring.
pub fn cert_expires_within(path: impl AsRef<Path>, seconds: u64) -> Result<bool> {
    let cert = load_certificate(path)?;

    let now = Asn1Time::days_from_now(0)?;
    let diff = now.diff(cert.not_after())?;

    let total_seconds = (diff.days as i64 * 86400) + diff.secs as i64;

    Ok(total_seconds < seconds as i64)
}
