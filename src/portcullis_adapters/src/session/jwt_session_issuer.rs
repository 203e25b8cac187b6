use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use portcullis_core::{SessionToken, SessionTokenError, SessionTokenIssuer, UserId};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, SessionSettings};

/// Session tokens live for twelve hours, uniformly; the window is not
/// configurable per call.
pub const SESSION_TOKEN_TTL_SECONDS: i64 = 43_200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

/// Issues HS256-signed session tokens from a process-wide signing
/// secret: loaded once at construction, immutable afterwards.
#[derive(Clone)]
pub struct JwtSessionIssuer {
    jwt_secret: Secret<String>,
}

impl JwtSessionIssuer {
    /// A blank secret is a fatal configuration fault; it is rejected
    /// here, before the issuer can serve a single request.
    pub fn new(jwt_secret: Secret<String>) -> Result<Self, ConfigError> {
        if jwt_secret.expose_secret().trim().is_empty() {
            return Err(ConfigError::MissingJwtSecret);
        }
        Ok(Self { jwt_secret })
    }

    pub fn from_settings(settings: &SessionSettings) -> Result<Self, ConfigError> {
        Self::new(settings.jwt_secret.clone())
    }

    /// Standard signature + expiry verification; nothing bespoke beyond
    /// what the signing scheme already provides.
    pub fn verify(&self, token: &SessionToken) -> Result<SessionClaims, SessionTokenError> {
        let secret = self.jwt_secret.expose_secret().as_bytes();

        decode::<SessionClaims>(
            token.as_str(),
            &DecodingKey::from_secret(secret),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| SessionTokenError::Invalid(e.to_string()))
    }
}

impl SessionTokenIssuer for JwtSessionIssuer {
    fn issue(&self, subject: &UserId) -> Result<SessionToken, SessionTokenError> {
        let delta = chrono::Duration::try_seconds(SESSION_TOKEN_TTL_SECONDS).ok_or(
            SessionTokenError::Signing("Failed to create session token duration".to_string()),
        )?;

        let issued_at = Utc::now();
        let expires_at = issued_at
            .checked_add_signed(delta)
            .ok_or(SessionTokenError::Signing(
                "Duration out of range".to_string(),
            ))?;

        let iat: usize = issued_at
            .timestamp()
            .try_into()
            .map_err(|_| SessionTokenError::Signing("Failed to cast i64 to usize".to_string()))?;
        let exp: usize = expires_at
            .timestamp()
            .try_into()
            .map_err(|_| SessionTokenError::Signing("Failed to cast i64 to usize".to_string()))?;

        let claims = SessionClaims {
            sub: subject.to_string(),
            iat,
            exp,
        };

        encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.expose_secret().as_bytes()),
        )
        .map(SessionToken::new)
        .map_err(|e| SessionTokenError::Signing(e.to_string()))
    }
}
