use crate::application_port::AuthError;
use crate::domain_model::{SessionRecord, SessionToken};
use chrono::{DateTime, Utc};

/// Shared token → session map. Implementations must insert a fully-built
/// record atomically; a reader never observes a partial session.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, token: &SessionToken, record: SessionRecord) -> Result<(), AuthError>;
    async fn get(&self, token: &SessionToken) -> Result<Option<SessionRecord>, AuthError>;
    async fn remove(&self, token: &SessionToken) -> Result<(), AuthError>;
    /// Drop every session that expired at or before `now`; returns how
    /// many were dropped.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, AuthError>;
}
