//! Authentication for the remote estimation API.
//!
//! Credentials are read from the environment on every call, never cached:
//! a changed variable must be reflected on the next call.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use tracing::warn;

/// Environment variable holding the API username.
pub const USERNAME_ENV: &str = "API_USERNAME";

/// Environment variable holding the API password.
pub const PASSWORD_ENV: &str = "API_PASSWORD";

/// Optional credentials for the remote estimation API.
///
/// Present values are guaranteed non-empty; missing or empty environment
/// variables normalize to `None`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiCredentials {
    username: Option<String>,
    password: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("username", &self.username.as_ref().map(|_| "[REDACTED]"))
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl ApiCredentials {
    /// Create credentials from explicit values. Empty strings count as unset.
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        Self {
            username: username.filter(|v| !v.is_empty()),
            password: password.filter(|v| !v.is_empty()),
        }
    }

    /// Read credentials from the process environment.
    ///
    /// Called once per estimation call. A partially-set pair disables
    /// authentication rather than failing the call; the `warn!` makes the
    /// likely misconfiguration visible in logs.
    pub fn from_env() -> Self {
        let credentials = Self::new(
            std::env::var(USERNAME_ENV).ok(),
            std::env::var(PASSWORD_ENV).ok(),
        );

        match (&credentials.username, &credentials.password) {
            (Some(_), None) => warn!(
                "{} is set but {} is not; calling the estimation API unauthenticated",
                USERNAME_ENV, PASSWORD_ENV
            ),
            (None, Some(_)) => warn!(
                "{} is set but {} is not; calling the estimation API unauthenticated",
                PASSWORD_ENV, USERNAME_ENV
            ),
            _ => {}
        }

        credentials
    }

    /// Build the `Authorization` header value, if both credentials are set.
    ///
    /// Returns `Basic <base64(username:password)>`, or `None` when either
    /// credential is missing (the call then proceeds unauthenticated).
    pub fn basic_auth_header(&self) -> Option<String> {
        let (username, password) = self.username.as_deref().zip(self.password.as_deref())?;
        let encoded = STANDARD.encode(format!("{}:{}", username, password));
        Some(format!("Basic {}", encoded))
    }
}
