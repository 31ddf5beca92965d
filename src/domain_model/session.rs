use crate::domain_model::Role;
use chrono::{DateTime, Utc};
use std::fmt;

/// Opaque server-generated session token. The value is the only thing the
/// client ever sees; everything it maps to stays server-side.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct SessionToken(pub String);

impl SessionToken {
    /// Mint a fresh token from the OS RNG (122 random bits via UUIDv4).
    pub fn generate() -> Self {
        SessionToken(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-side session state. The role is snapshotted at issuance; a role
/// change on the underlying user does not affect live sessions.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub username: String,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
