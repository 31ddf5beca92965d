use crate::application_port::AuthError;
use crate::domain_model::UserRecord;

/// Credential store: the single read the authenticator needs.
#[async_trait::async_trait]
pub trait UserRepo: Send + Sync {
    /// Exact, case-sensitive lookup. `None` is a normal outcome, not an
    /// error; only an underlying store fault is an `Err`.
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError>;
}
