//! OAuth2 client-credential token management.
//!
//! The HTTP exchange with the authorization server lives outside this crate:
//! callers implement [`TokenIssuer`] over their HTTP client of choice. The
//! [`TokenManager`] caches the issued token and transparently re-issues it
//! once its lifetime has elapsed.

use crate::error::AuthError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Token response of a `client_credentials` grant.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    /// The token value sent in `Authorization` headers.
    pub access_token: String,
    /// Token type reported by the server, usually `bearer`.
    #[serde(default)]
    pub token_type: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
}

/// Client id/secret pair for the `client_credentials` grant.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    client_id: String,
    client_secret: String,
}

impl ClientCredentials {
    /// Create a credentials pair.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// The client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// `Basic <base64(id:secret)>` authorization header value, as sent to
    /// the token endpoint.
    pub fn basic_authorization(&self) -> String {
        let raw = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

/// Produces fresh access tokens.
///
/// Implemented over the actual HTTP call to the authorization server's
/// `/oauth/token` endpoint.
pub trait TokenIssuer: Send + Sync {
    /// Obtain a new token from the authorization server.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenRequest`] when the server cannot be reached
    /// or rejects the request.
    fn issue(&self) -> Result<AccessToken, AuthError>;
}

struct Cached {
    token: AccessToken,
    obtained_at: Instant,
}

impl Cached {
    fn expired(&self) -> bool {
        self.obtained_at.elapsed() >= Duration::from_secs(self.token.expires_in)
    }
}

/// Caches an access token and re-issues it once expired.
///
/// # Examples
///
/// ```rust
/// use crosscut::auth::{AccessToken, TokenIssuer, TokenManager};
/// use crosscut::error::AuthError;
///
/// struct StaticIssuer;
///
/// impl TokenIssuer for StaticIssuer {
///     fn issue(&self) -> Result<AccessToken, AuthError> {
///         Ok(AccessToken {
///             access_token: "abc123".into(),
///             token_type: "bearer".into(),
///             expires_in: 3600,
///         })
///     }
/// }
///
/// let manager = TokenManager::new(StaticIssuer);
/// assert_eq!(manager.bearer().unwrap(), "bearer abc123");
/// ```
pub struct TokenManager {
    issuer: Box<dyn TokenIssuer>,
    cached: Mutex<Option<Cached>>,
}

impl TokenManager {
    /// Create a manager obtaining tokens from `issuer`.
    pub fn new(issuer: impl TokenIssuer + 'static) -> Self {
        Self {
            issuer: Box::new(issuer),
            cached: Mutex::new(None),
        }
    }

    /// The current token value, re-issued when the cached one has expired.
    ///
    /// # Errors
    ///
    /// Propagates the issuer's [`AuthError`]; the cache is only overwritten
    /// after a successful issue.
    pub fn token(&self) -> Result<String, AuthError> {
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(current) = cached.as_ref() {
            if !current.expired() {
                return Ok(current.token.access_token.clone());
            }
        }
        let token = self.issuer.issue()?;
        let value = token.access_token.clone();
        *cached = Some(Cached {
            token,
            obtained_at: Instant::now(),
        });
        Ok(value)
    }

    /// `bearer <token>` authorization header value.
    ///
    /// # Errors
    ///
    /// Same as [`token`](Self::token).
    pub fn bearer(&self) -> Result<String, AuthError> {
        Ok(format!("bearer {}", self.token()?))
    }
}
