//! The authentication decision: parse -> resolve -> validate -> build.

use std::sync::Arc;

use crate::cipher::SecretCipher;
use crate::config::DbConfigResolver;
use crate::identity::parse_identity;
use crate::principal::{AttributeBag, AttributeKeys, AuthOutcome, Credential, Principal};
use crate::probe::ConnectionValidator;

/// Capability interface implemented by authentication mechanisms.
///
/// The surrounding chain calls `authenticate` and interprets
/// [`AuthOutcome::NoDecision`] as "try the next mechanism". No error ever
/// escapes this boundary.
pub trait AuthenticationProvider: Send + Sync {
    fn authenticate(&self, identity: &str, secret: &str) -> AuthOutcome;

    /// Authenticate from a raw [`Credential`].
    fn authenticate_credential(&self, credential: &Credential) -> AuthOutcome {
        self.authenticate(&credential.identity, &credential.secret)
    }
}

/// Authenticates `user@databaseAlias` logins by probe-connecting to the
/// aliased database with the supplied credentials.
///
/// On success the principal carries an attribute bag with the parsed
/// username, the enciphered password, and the resolved database name, host,
/// and port, under the configured key names.
///
/// Stateless per request; shareable across threads.
pub struct DbAuthProvider {
    resolver: DbConfigResolver,
    validator: ConnectionValidator,
    cipher: Arc<SecretCipher>,
    keys: AttributeKeys,
}

impl DbAuthProvider {
    pub fn new(
        resolver: DbConfigResolver,
        validator: ConnectionValidator,
        cipher: Arc<SecretCipher>,
        keys: AttributeKeys,
    ) -> Self {
        Self {
            resolver,
            validator,
            cipher,
            keys,
        }
    }
}

impl AuthenticationProvider for DbAuthProvider {
    /// Runs the pipeline states in order, each at most once:
    /// parse (no `@` or empty alias -> NoDecision), resolve (never fails by
    /// itself), validate (false -> Rejected), build principal
    /// (-> Authenticated).
    fn authenticate(&self, identity: &str, secret: &str) -> AuthOutcome {
        let Some(parsed) = parse_identity(identity) else {
            tracing::debug!(identity = %identity, "Identity is not a database login, abstaining");
            return AuthOutcome::NoDecision;
        };

        let config = self.resolver.resolve(&parsed.alias);

        if !self.validator.validate(&config, &parsed.username, secret) {
            return AuthOutcome::Rejected;
        }

        let enciphered = match self.cipher.encrypt(secret) {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(identity = %identity, error = %e, "Cannot encipher secret attribute");
                return AuthOutcome::Rejected;
            }
        };

        // Validation required a complete config, so the fields are present.
        let mut attributes = AttributeBag::new();
        attributes.insert(self.keys.username.clone(), parsed.username);
        attributes.insert(self.keys.password.clone(), enciphered);
        attributes.insert(self.keys.database.clone(), config.database.unwrap_or_default());
        attributes.insert(self.keys.host.clone(), config.host.unwrap_or_default());
        attributes.insert(self.keys.port.clone(), config.port.unwrap_or_default());

        AuthOutcome::Authenticated(Principal::new(
            identity.to_string(),
            secret.to_string(),
            attributes,
        ))
    }
}
