//! Database-credential authentication with profile attribute propagation.
//!
//! Validates `user@databaseAlias` logins by opening a probe connection to the
//! aliased database with the supplied credentials, then hands the surrounding
//! authentication chain a principal whose attribute bag (username, enciphered
//! password, database name/host/port) can later be applied as persisted user
//! preferences.
//!
//! The chain itself, the preference store, and the real database client stack
//! are external collaborators behind the [`provider::AuthenticationProvider`],
//! [`applier::PreferenceService`], and [`probe::ProbeConnector`] seams.
//!
//! ```no_run
//! use std::sync::Arc;
//! use dbauth::cipher::SecretCipher;
//! use dbauth::config::{DbConfigResolver, TomlFileSource};
//! use dbauth::principal::AttributeKeys;
//! use dbauth::probe::{ConnectionValidator, SqlxProbeConnector};
//! use dbauth::provider::{AuthenticationProvider, DbAuthProvider};
//!
//! # fn main() -> Result<(), dbauth::error::AuthError> {
//! let provider = DbAuthProvider::new(
//!     DbConfigResolver::new(Box::new(TomlFileSource::new("conf/db.toml"))),
//!     ConnectionValidator::new(Box::new(SqlxProbeConnector::new()?)),
//!     Arc::new(SecretCipher::new(&[0u8; 32])),
//!     AttributeKeys::default(),
//! );
//! let outcome = provider.authenticate("alice@sales", "secret");
//! # let _ = outcome;
//! # Ok(())
//! # }
//! ```

pub mod applier;
pub mod cipher;
pub mod config;
pub mod error;
pub mod identity;
pub mod principal;
pub mod probe;
pub mod provider;

pub use applier::{PreferenceService, ProfileAttributeApplier};
pub use cipher::SecretCipher;
pub use config::{DbConfigResolver, DbConnectionConfig, MemorySource, PropertySource, TomlFileSource};
pub use error::AuthError;
pub use identity::{parse_identity, ParsedIdentity};
pub use principal::{
    AttributeBag, AttributeKeys, AuthOutcome, Credential, Principal, SessionPrincipal,
};
pub use probe::{ConnectionValidator, ProbeConnection, ProbeConnector, SqlxProbeConnector};
pub use provider::{AuthenticationProvider, DbAuthProvider};
