//! Value types flowing through the authentication pipeline: credentials,
//! the attribute bag, principals, and the three-way outcome.

use zeroize::Zeroize;

/// Raw login input: composite identity plus plaintext secret.
///
/// Never persisted as-is; the secret is zeroed on drop.
#[derive(Clone)]
pub struct Credential {
    pub identity: String,
    pub secret: String,
}

impl Credential {
    pub fn new(identity: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            secret: secret.into(),
        }
    }
}

impl Drop for Credential {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("identity", &self.identity)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Names of the five attributes attached to an authenticated principal.
///
/// Immutable once constructed; `Default` yields the conventional `db*` names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeKeys {
    /// Labels the parsed database username.
    pub username: String,
    /// Labels the enciphered password (never the plaintext).
    pub password: String,
    /// Labels the resolved database name.
    pub database: String,
    /// Labels the resolved host.
    pub host: String,
    /// Labels the resolved port.
    pub port: String,
}

impl Default for AttributeKeys {
    fn default() -> Self {
        Self {
            username: "dbusername".to_string(),
            password: "dbpassword".to_string(),
            database: "dbname".to_string(),
            host: "dbhost".to_string(),
            port: "dbport".to_string(),
        }
    }
}

/// Ordered mapping of attribute name -> string value with unique keys.
///
/// Iteration follows insertion order; inserting an existing key replaces the
/// value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeBag {
    entries: Vec<(String, String)>,
}

impl AttributeBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry. Replacement keeps the original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An authenticated principal produced by a successful decision.
///
/// Carries the full composite identity as entered, the raw secret (for the
/// surrounding authentication context), an always-empty authority set, and
/// the attribute bag for later propagation.
#[derive(Clone, PartialEq, Eq)]
pub struct Principal {
    identity: String,
    secret: String,
    authorities: Vec<String>,
    attributes: AttributeBag,
}

impl Principal {
    pub(crate) fn new(identity: String, secret: String, attributes: AttributeBag) -> Self {
        Self {
            identity,
            secret,
            authorities: Vec::new(),
            attributes,
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Always empty: this mechanism defines no authorization semantics.
    pub fn authorities(&self) -> &[String] {
        &self.authorities
    }

    pub fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }
}

impl Drop for Principal {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl std::fmt::Debug for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Principal")
            .field("identity", &self.identity)
            .field("secret", &"[REDACTED]")
            .field("authorities", &self.authorities)
            .field("attributes", &self.attributes.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .finish()
    }
}

/// The current principal as seen by the surrounding authentication context.
///
/// Only the external-auth-enriched variant carries an attribute bag; the
/// applier is a no-op for any other shape.
#[derive(Debug, Clone)]
pub enum SessionPrincipal {
    /// Principal produced by this mechanism.
    External(Principal),
    /// Principal established by some other mechanism in the chain.
    Builtin { username: String },
}

/// Result of one authentication decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Credentials proved valid; carries the enriched principal.
    Authenticated(Principal),
    /// This mechanism applies, but the credentials are invalid. Deliberately
    /// carries no detail about the cause.
    Rejected,
    /// This mechanism does not apply to the input; other mechanisms in the
    /// chain should proceed.
    NoDecision,
}

impl AuthOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthOutcome::Authenticated(_))
    }

    /// Extract the principal if authenticated.
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            AuthOutcome::Authenticated(principal) => Some(principal),
            _ => None,
        }
    }
}
