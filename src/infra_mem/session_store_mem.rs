use crate::application_port::AuthError;
use crate::domain_model::{SessionRecord, SessionToken};
use crate::domain_port::SessionStore;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// Process-local token → session map. DashMap gives atomic per-entry
/// insert/remove, so resolves never see a half-written session and reads
/// do not wait on unrelated writes.
pub struct MemSessionStore {
    sessions: DashMap<String, SessionRecord>,
}

impl MemSessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for MemSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SessionStore for MemSessionStore {
    async fn insert(&self, token: &SessionToken, record: SessionRecord) -> Result<(), AuthError> {
        self.sessions.insert(token.0.clone(), record);
        Ok(())
    }

    async fn get(&self, token: &SessionToken) -> Result<Option<SessionRecord>, AuthError> {
        Ok(self.sessions.get(&token.0).map(|entry| entry.value().clone()))
    }

    async fn remove(&self, token: &SessionToken) -> Result<(), AuthError> {
        self.sessions.remove(&token.0);
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, AuthError> {
        let before = self.sessions.len();
        self.sessions.retain(|_, record| !record.is_expired(now));
        Ok(before.saturating_sub(self.sessions.len()))
    }
}
