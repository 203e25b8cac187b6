use chrono::{DateTime, Duration, Utc};
use rand::RngCore;

/// Lifetime of a password-reset token, from issuance to expiry.
pub const RESET_TOKEN_TTL_SECONDS: i64 = 3_600;

/// Entropy of a reset token before hex encoding.
const RESET_TOKEN_BYTES: usize = 20;

/// Single-use, time-limited password-reset capability.
///
/// Compared by plain string equality; the token is high-entropy and
/// invalidated on first successful use.
#[derive(Clone, PartialEq, Eq)]
pub struct ResetToken(String);

impl ResetToken {
    /// Generate a fresh token from the thread-local CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; RESET_TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ResetToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Debug for ResetToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ResetToken").field(&"[REDACTED]").finish()
    }
}

/// The stored reset state of a user: token and expiry as one unit.
///
/// A user either has a complete request or none at all; the pair cannot
/// be stored half-set.
#[derive(Debug, Clone)]
pub struct ResetRequest {
    token: ResetToken,
    expires_at: DateTime<Utc>,
}

impl ResetRequest {
    pub fn new(token: ResetToken, expires_at: DateTime<Utc>) -> Self {
        Self { token, expires_at }
    }

    /// Issue a fresh request expiring [`RESET_TOKEN_TTL_SECONDS`] after `now`.
    pub fn issue(now: DateTime<Utc>) -> Self {
        let expires_at = now
            .checked_add_signed(Duration::seconds(RESET_TOKEN_TTL_SECONDS))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            token: ResetToken::generate(),
            expires_at,
        }
    }

    pub fn token(&self) -> &ResetToken {
        &self.token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn matches(&self, candidate: &ResetToken) -> bool {
        self.token == *candidate
    }

    /// An expired request is indistinguishable from no request for every
    /// validation; no background sweep is required.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
