//! Alias resolution: alias -> database connection parameters.

use crate::config::source::PropertySource;

/// Connection parameters for one aliased database.
///
/// Fields may be individually absent when the config source lacks them;
/// absence is not itself an error, only a cause of downstream validation
/// failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DbConnectionConfig {
    pub driver: Option<String>,
    pub host: Option<String>,
    pub port: Option<String>,
    pub database: Option<String>,
}

impl DbConnectionConfig {
    /// True when all four fields are populated.
    pub fn is_complete(&self) -> bool {
        self.driver.is_some()
            && self.host.is_some()
            && self.port.is_some()
            && self.database.is_some()
    }
}

/// Resolves a database alias to its connection parameters.
///
/// Convention: one global `db.driver` key, then `db.<alias>.host`,
/// `db.<alias>.port`, and `db.<alias>.name`, with the alias lower-cased
/// before lookup. The source is consulted fresh on every call.
pub struct DbConfigResolver {
    source: Box<dyn PropertySource>,
}

impl DbConfigResolver {
    pub fn new(source: Box<dyn PropertySource>) -> Self {
        Self { source }
    }

    /// Resolve connection parameters for `alias`. Never fails; an unknown
    /// alias or unreadable source yields an (incomplete) default config.
    pub fn resolve(&self, alias: &str) -> DbConnectionConfig {
        let alias = alias.to_lowercase();
        let config = DbConnectionConfig {
            driver: self.source.get("db.driver"),
            host: self.source.get(&format!("db.{}.host", alias)),
            port: self.source.get(&format!("db.{}.port", alias)),
            database: self.source.get(&format!("db.{}.name", alias)),
        };
        if config == DbConnectionConfig::default() {
            tracing::error!(
                alias = %alias,
                "No connection information found for database alias"
            );
        }
        config
    }
}
