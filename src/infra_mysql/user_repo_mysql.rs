use crate::application_port::AuthError;
use crate::domain_model::{Role, UserId, UserRecord};
use crate::domain_port::UserRepo;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

pub struct MySqlUserRepo {
    pool: MySqlPool,
}

impl MySqlUserRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlUserRepo { pool }
    }

    fn row_to_record(row: MySqlRow) -> Result<UserRecord, AuthError> {
        let id: UserId = row
            .try_get("id")
            .map_err(|e| AuthError::Store(e.to_string()))?;
        let username: String = row
            .try_get("username")
            .map_err(|e| AuthError::Store(e.to_string()))?;
        let password_hash: String = row
            .try_get("password")
            .map_err(|e| AuthError::Store(e.to_string()))?;
        let role_text: String = row
            .try_get("role")
            .map_err(|e| AuthError::Store(e.to_string()))?;
        let enabled: bool = row
            .try_get("enabled")
            .map_err(|e| AuthError::Store(e.to_string()))?;

        // An unknown role string is a provisioning bug, not a wrong
        // password; surface it as a store fault.
        let role: Role = role_text
            .parse()
            .map_err(|e: crate::domain_model::UnknownRole| AuthError::Store(e.to_string()))?;

        Ok(UserRecord {
            id,
            username,
            password_hash,
            role,
            enabled,
        })
    }
}

#[async_trait::async_trait]
impl UserRepo for MySqlUserRepo {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError> {
        let row_opt: Option<MySqlRow> = sqlx::query(
            r#"
SELECT id, username, password, role, enabled
FROM users
WHERE username = ?
"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Store(e.to_string()))?;

        row_opt.map(Self::row_to_record).transpose()
    }
}
