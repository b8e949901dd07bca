//! Credential validation by probe connection.
//!
//! A probe connection is opened solely to test that the supplied credentials
//! are accepted by the aliased database, then closed immediately. It is never
//! pooled or reused. The actual client stack sits behind the
//! [`ProbeConnector`] seam; [`SqlxProbeConnector`] is the live implementation.

use std::sync::Once;

use sqlx::{AnyConnection, Connection};
use tokio::runtime::{Handle, Runtime};
use url::Url;

use crate::config::DbConnectionConfig;
use crate::error::AuthError;

/// An open probe connection. Exists only to be closed.
pub trait ProbeConnection {
    /// Release the connection. A failure here is reported but must not
    /// change an authentication outcome that has already been determined.
    fn close(self: Box<Self>) -> Result<(), AuthError>;
}

/// Opens probe connections against a connection target string.
///
/// The secret must never appear in errors or logs produced by
/// implementations.
pub trait ProbeConnector: Send + Sync {
    fn connect(
        &self,
        target: &str,
        username: &str,
        secret: &str,
    ) -> Result<Box<dyn ProbeConnection>, AuthError>;
}

/// Build the connection target string for a driver/host/port/database tuple.
///
/// Oracle-family drivers join with `:@`; every other driver joins with `://`.
pub fn connection_target(driver: &str, host: &str, port: &str, database: &str) -> String {
    let separator = if driver.to_lowercase().contains("oracle") {
        ":@"
    } else {
        "://"
    };
    format!("{}{}{}:{}/{}", driver, separator, host, port, database)
}

/// Proves credential validity by attempting one probe connection.
pub struct ConnectionValidator {
    connector: Box<dyn ProbeConnector>,
}

impl ConnectionValidator {
    pub fn new(connector: Box<dyn ProbeConnector>) -> Self {
        Self { connector }
    }

    /// Returns true when `config` is complete and a probe connection opens
    /// with the supplied credentials.
    ///
    /// Every failure -- incomplete config, bad password, unreachable host,
    /// unknown database -- maps uniformly to false, so the outcome leaks no
    /// detail about the cause. The probe connection, if opened, is closed
    /// before returning; a close failure is logged without changing the
    /// result.
    pub fn validate(&self, config: &DbConnectionConfig, username: &str, secret: &str) -> bool {
        let (Some(driver), Some(host), Some(port), Some(database)) = (
            config.driver.as_deref(),
            config.host.as_deref(),
            config.port.as_deref(),
            config.database.as_deref(),
        ) else {
            tracing::error!(
                username = %username,
                "Incomplete connection configuration, skipping probe"
            );
            return false;
        };

        let target = connection_target(driver, host, port, database);
        tracing::debug!(target = %target, username = %username, "Attempting probe connection");

        match self.connector.connect(&target, username, secret) {
            Ok(connection) => {
                if let Err(e) = connection.close() {
                    tracing::error!(target = %target, error = %e, "Cannot close probe connection");
                }
                true
            }
            Err(e) => {
                tracing::error!(
                    target = %target,
                    username = %username,
                    error = %e,
                    "Probe connection failed"
                );
                false
            }
        }
    }
}

/// Live connector bridging the synchronous probe seam onto sqlx's async
/// `Any` driver (PostgreSQL and MySQL).
///
/// Owns a private tokio runtime and drives each connect/close with
/// `block_on`; no timeout is imposed beyond what the underlying driver does.
/// Targets sqlx cannot parse (including the Oracle `:@` form) fail the probe
/// like any other connection error.
pub struct SqlxProbeConnector {
    runtime: Runtime,
}

static INSTALL_DRIVERS: Once = Once::new();

impl SqlxProbeConnector {
    pub fn new() -> Result<Self, AuthError> {
        INSTALL_DRIVERS.call_once(sqlx::any::install_default_drivers);
        let runtime = Runtime::new()
            .map_err(|e| AuthError::Config(format!("Failed to start probe runtime: {}", e)))?;
        Ok(Self { runtime })
    }

    /// Parse the target and inject the credentials as URL userinfo.
    fn credentialed_url(target: &str, username: &str, secret: &str) -> Result<Url, AuthError> {
        let mut url = Url::parse(target).map_err(|e| AuthError::UnsupportedTarget {
            target: target.to_string(),
            reason: e.to_string(),
        })?;
        if url.set_username(username).is_err() || url.set_password(Some(secret)).is_err() {
            return Err(AuthError::UnsupportedTarget {
                target: target.to_string(),
                reason: "target does not accept credentials".to_string(),
            });
        }
        Ok(url)
    }
}

impl ProbeConnector for SqlxProbeConnector {
    fn connect(
        &self,
        target: &str,
        username: &str,
        secret: &str,
    ) -> Result<Box<dyn ProbeConnection>, AuthError> {
        let url = Self::credentialed_url(target, username, secret)?;
        let connection = self
            .runtime
            .block_on(AnyConnection::connect(url.as_str()))
            .map_err(|e| AuthError::Connection {
                target: target.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Box::new(SqlxProbeConnection {
            connection,
            handle: self.runtime.handle().clone(),
            target: target.to_string(),
        }))
    }
}

struct SqlxProbeConnection {
    connection: AnyConnection,
    handle: Handle,
    target: String,
}

impl ProbeConnection for SqlxProbeConnection {
    fn close(self: Box<Self>) -> Result<(), AuthError> {
        let SqlxProbeConnection {
            connection,
            handle,
            target,
        } = *self;
        handle
            .block_on(connection.close())
            .map_err(|e| AuthError::Connection {
                target,
                reason: e.to_string(),
            })
    }
}
