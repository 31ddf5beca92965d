use crate::domain_model::{Principal, SessionToken};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown username, wrong password or disabled account. One variant
    /// on purpose: callers must not be able to tell these apart.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Missing, unknown, expired or revoked session token, reported
    /// uniformly.
    #[error("invalid session")]
    InvalidSession,
    #[error("store error: {0}")]
    Store(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(Debug, Clone)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub principal: Principal,
    pub token: SessionToken,
}

#[async_trait::async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, AuthError>;
    async fn verify_password(&self, password: &str, password_hash: &str)
    -> Result<bool, AuthError>;
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verify credentials and mint a session on success.
    async fn login(&self, request: LoginInput) -> Result<LoginResult, AuthError>;
    /// Map a presented token back to its principal.
    async fn resolve(&self, token: &SessionToken) -> Result<Principal, AuthError>;
    /// Revoke a session. Idempotent; revoking an unknown token is a no-op.
    async fn logout(&self, token: &SessionToken) -> Result<(), AuthError>;
}
