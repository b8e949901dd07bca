//! End-to-end flow: authenticate a composite identity against a TOML config
//! source and a scripted probe connector, then apply the resulting
//! principal's attributes through a recording preference service.

use std::sync::{Arc, Mutex};

use dbauth::{
    AttributeKeys, AuthError, AuthOutcome, AuthenticationProvider, ConnectionValidator,
    DbAuthProvider, DbConfigResolver, PreferenceService, ProbeConnection, ProbeConnector,
    ProfileAttributeApplier, SecretCipher, SessionPrincipal, TomlFileSource,
};

const DB_TOML: &str = r#"
[db]
driver = "postgresql"

[db.sales]
host = "db1"
port = "5432"
name = "salesdb"
"#;

/// Connector accepting exactly one (target, username, secret) triple.
struct ScriptedConnector {
    target: &'static str,
    user: &'static str,
    secret: &'static str,
}

struct ScriptedConnection;

impl ProbeConnection for ScriptedConnection {
    fn close(self: Box<Self>) -> Result<(), AuthError> {
        Ok(())
    }
}

impl ProbeConnector for ScriptedConnector {
    fn connect(
        &self,
        target: &str,
        username: &str,
        secret: &str,
    ) -> Result<Box<dyn ProbeConnection>, AuthError> {
        if target == self.target && username == self.user && secret == self.secret {
            Ok(Box::new(ScriptedConnection))
        } else {
            Err(AuthError::Connection {
                target: target.to_string(),
                reason: "authentication failed".to_string(),
            })
        }
    }
}

struct RecordingService {
    applied: Arc<Mutex<Vec<(String, String)>>>,
}

impl PreferenceService for RecordingService {
    fn set_current_user_preference_value(&self, key: &str, value: &str) -> Result<(), AuthError> {
        self.applied
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }
}

/// Helper: provider wired against a freshly written db.toml and a connector
/// accepting (alice, secret) on the sales database target.
fn sales_provider(dir: &tempfile::TempDir, cipher: Arc<SecretCipher>) -> DbAuthProvider {
    let path = dir.path().join("db.toml");
    std::fs::write(&path, DB_TOML).unwrap();

    DbAuthProvider::new(
        DbConfigResolver::new(Box::new(TomlFileSource::new(path))),
        ConnectionValidator::new(Box::new(ScriptedConnector {
            target: "postgresql://db1:5432/salesdb",
            user: "alice",
            secret: "secret",
        })),
        cipher,
        AttributeKeys::default(),
    )
}

#[test]
fn full_pipeline_authenticates_and_applies_attributes() {
    let dir = tempfile::tempdir().unwrap();
    let cipher = Arc::new(SecretCipher::new(&[42u8; 32]));
    let provider = sales_provider(&dir, Arc::clone(&cipher));

    // Authenticate.
    let outcome = provider.authenticate("alice@sales", "secret");
    let principal = outcome.principal().expect("should authenticate").clone();
    assert_eq!(principal.identity(), "alice@sales");

    // The bag holds exactly the five expected attributes, password enciphered.
    let bag = principal.attributes();
    assert_eq!(bag.get("dbusername"), Some("alice"));
    assert_eq!(bag.get("dbname"), Some("salesdb"));
    assert_eq!(bag.get("dbhost"), Some("db1"));
    assert_eq!(bag.get("dbport"), Some("5432"));
    let token = bag.get("dbpassword").unwrap().to_string();
    assert_ne!(token, "secret");
    assert_eq!(cipher.decrypt(&token).unwrap(), "secret");

    // Apply: one preference write per entry, in bag order.
    let applied = Arc::new(Mutex::new(Vec::new()));
    let applier = ProfileAttributeApplier::new(Box::new(RecordingService {
        applied: Arc::clone(&applied),
    }));
    applier.apply(&SessionPrincipal::External(principal));

    let applied = applied.lock().unwrap();
    let keys: Vec<_> = applied.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["dbusername", "dbpassword", "dbname", "dbhost", "dbport"]);
    assert_eq!(applied[1].1, token);
}

#[test]
fn identity_without_alias_lets_the_chain_proceed() {
    let dir = tempfile::tempdir().unwrap();
    let provider = sales_provider(&dir, Arc::new(SecretCipher::new(&[42u8; 32])));
    assert_eq!(provider.authenticate("jasperadmin", "secret"), AuthOutcome::NoDecision);
}

#[test]
fn unknown_alias_and_wrong_password_reject_identically() {
    let dir = tempfile::tempdir().unwrap();
    let provider = sales_provider(&dir, Arc::new(SecretCipher::new(&[42u8; 32])));
    let unknown_alias = provider.authenticate("alice@hr", "secret");
    let wrong_password = provider.authenticate("alice@sales", "wrong");
    assert_eq!(unknown_alias, AuthOutcome::Rejected);
    assert_eq!(unknown_alias, wrong_password);
}

#[test]
fn missing_config_file_degrades_to_rejection() {
    let provider = DbAuthProvider::new(
        DbConfigResolver::new(Box::new(TomlFileSource::new("/nonexistent/db.toml"))),
        ConnectionValidator::new(Box::new(ScriptedConnector {
            target: "postgresql://db1:5432/salesdb",
            user: "alice",
            secret: "secret",
        })),
        Arc::new(SecretCipher::new(&[42u8; 32])),
        AttributeKeys::default(),
    );
    assert_eq!(provider.authenticate("alice@sales", "secret"), AuthOutcome::Rejected);
}

#[test]
fn config_edit_is_seen_by_the_next_authentication() {
    let dir = tempfile::tempdir().unwrap();
    let cipher = Arc::new(SecretCipher::new(&[42u8; 32]));
    let provider = sales_provider(&dir, cipher);

    assert!(provider.authenticate("alice@sales", "secret").is_authenticated());

    // Point the sales alias at another host; the scripted connector no longer
    // matches the rebuilt target, so the same credentials now reject.
    let path = dir.path().join("db.toml");
    std::fs::write(&path, DB_TOML.replace("db1", "db9")).unwrap();
    assert_eq!(provider.authenticate("alice@sales", "secret"), AuthOutcome::Rejected);
}

#[test]
fn concurrent_authentications_share_the_provider() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(sales_provider(&dir, Arc::new(SecretCipher::new(&[42u8; 32]))));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let provider = Arc::clone(&provider);
            std::thread::spawn(move || {
                if i % 2 == 0 {
                    provider.authenticate("alice@sales", "secret").is_authenticated()
                } else {
                    provider.authenticate("alice@sales", "wrong") == AuthOutcome::Rejected
                }
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
