use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Admin username and password, sent as HTTP Basic auth on every request.
///
/// The backend validates the pair only when a request uses it; there is no
/// separate login endpoint.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: SecretString,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// `Basic base64(username:password)`, recomputed on each call.
    pub fn basic_auth_header(&self) -> String {
        let pair =
            format!("{}:{}", self.username, self.password.expose_secret());
        format!("Basic {}", STANDARD.encode(pair))
    }

    /// Decode an `Authorization` header value back into a pair.
    pub fn from_basic_auth_header(header: &str) -> Option<Self> {
        let encoded = header.strip_prefix("Basic ")?;
        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let pair = String::from_utf8(decoded).ok()?;
        let (username, password) = pair.split_once(':')?;
        Some(Self::new(username, password))
    }

    /// Plaintext form for session storage.
    pub fn to_stored(&self) -> StoredCredentials {
        StoredCredentials {
            username: self.username.clone(),
            password: self.password.expose_secret().to_string(),
        }
    }
}

impl From<StoredCredentials> for AdminCredentials {
    fn from(stored: StoredCredentials) -> Self {
        Self::new(stored.username, stored.password)
    }
}

impl PartialEq for AdminCredentials {
    fn eq(&self, other: &Self) -> bool {
        self.username == other.username
            && self.password.expose_secret() == other.password.expose_secret()
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Serialized shape of the credential pair in browser session storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub username: String,
    pub password: String,
}
