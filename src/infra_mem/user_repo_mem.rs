use crate::application_port::AuthError;
use crate::domain_model::UserRecord;
use crate::domain_port::UserRepo;
use dashmap::DashMap;

/// In-memory credential store, keyed by username. Backs the "mem" backend
/// and the unit tests; the rows are provisioned at construction and never
/// mutated afterwards, matching the read-only contract.
pub struct MemUserRepo {
    users: DashMap<String, UserRecord>,
}

impl MemUserRepo {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }

    pub fn add_user(&self, record: UserRecord) {
        self.users.insert(record.username.clone(), record);
    }
}

impl Default for MemUserRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl UserRepo for MemUserRepo {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError> {
        Ok(self.users.get(username).map(|entry| entry.value().clone()))
    }
}
