use thiserror::Error;

/// Errors raised at the seams of the authentication pipeline.
///
/// None of these ever cross the `authenticate` boundary: the provider logs
/// them and degrades to an `AuthOutcome` variant. They surface directly only
/// from the collaborator traits (`ProbeConnector`, `PreferenceService`) and
/// from `SecretCipher`.
///
/// No variant carries a secret.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported connection target '{target}': {reason}")]
    UnsupportedTarget { target: String, reason: String },

    #[error("Connection failed to {target}: {reason}")]
    Connection { target: String, reason: String },

    #[error("Cipher error: {0}")]
    Cipher(String),

    #[error("Failed to set preference '{key}': {reason}")]
    Preference { key: String, reason: String },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl From<toml::de::Error> for AuthError {
    fn from(err: toml::de::Error) -> Self {
        AuthError::Config(format!("Invalid TOML: {}", err))
    }
}
