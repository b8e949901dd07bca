//! Key/value property sources backing database connection configuration.
//!
//! Sources are consulted fresh on every lookup; there is no caching or
//! invalidation layer. A source that cannot be read logs the failure and
//! answers `None` -- the pipeline then degrades to a rejection downstream
//! instead of surfacing an error.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::AuthError;

/// Read-only key/value source for connection configuration.
///
/// Keys use the dotted convention `db.driver`, `db.<alias>.host`,
/// `db.<alias>.port`, `db.<alias>.name`. Implementations must consult their
/// backing store fresh on every call and must never panic or error on a
/// missing/unreadable store.
pub trait PropertySource: Send + Sync {
    /// Look up a single dotted key. `None` means absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;
}

/// Property source backed by a TOML file, re-read on every lookup.
///
/// Dotted keys are walked through nested tables, so the conventional layout
/// is:
///
/// ```toml
/// [db]
/// driver = "postgresql"
///
/// [db.sales]
/// host = "db1"
/// port = "5432"
/// name = "salesdb"
/// ```
///
/// A missing, unreadable, or invalid file is logged and treated as an empty
/// source. Concurrent reads are safe; a concurrent out-of-band edit may be
/// observed mid-authentication, which is accepted.
pub struct TomlFileSource {
    path: PathBuf,
}

impl TomlFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_table(&self) -> Result<toml::Value, AuthError> {
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(contents.parse::<toml::Value>()?)
    }
}

impl PropertySource for TomlFileSource {
    fn get(&self, key: &str) -> Option<String> {
        let mut value = match self.read_table() {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "Cannot read connection properties file"
                );
                return None;
            }
        };
        for segment in key.split('.') {
            value = value.as_table()?.get(segment)?.clone();
        }
        value.as_str().map(str::to_string)
    }
}

/// In-memory property source for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry, builder-style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl PropertySource for MemorySource {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}
