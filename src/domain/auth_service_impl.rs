use crate::application_port::{
    AuthError, AuthService, CredentialHasher, LoginInput, LoginResult,
};
use crate::domain_model::{Principal, SessionRecord, SessionToken};
use crate::domain_port::{SessionStore, UserRepo};
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use std::sync::Arc;

pub struct Argon2PasswordHasher;

#[async_trait::async_trait]
impl CredentialHasher for Argon2PasswordHasher {
    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = argon2::password_hash::SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::InternalError(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    async fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| AuthError::InternalError(format!("invalid PHC hash: {e}")))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::InternalError(format!("verify error: {e}"))),
        }
    }
}

pub struct RealAuthService {
    user_repo: Arc<dyn UserRepo>,
    credential_hasher: Arc<dyn CredentialHasher>,
    session_store: Arc<dyn SessionStore>,
    session_ttl: Duration,
}

impl RealAuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        credential_hasher: Arc<dyn CredentialHasher>,
        session_store: Arc<dyn SessionStore>,
        session_ttl: std::time::Duration,
    ) -> Self {
        Self {
            user_repo,
            credential_hasher,
            session_store,
            session_ttl: Duration::from_std(session_ttl).unwrap_or(Duration::hours(1)),
        }
    }
}

#[async_trait::async_trait]
impl AuthService for RealAuthService {
    async fn login(&self, request: LoginInput) -> Result<LoginResult, AuthError> {
        let LoginInput { username, password } = request;

        // Every rejection below is the same InvalidCredentials; the actual
        // cause only reaches the logs.
        let Some(user) = self.user_repo.find_by_username(&username).await? else {
            tracing::debug!(%username, "login rejected: unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        let ok = self
            .credential_hasher
            .verify_password(&password, &user.password_hash)
            .await?;
        if !ok {
            tracing::debug!(%username, "login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        if !user.enabled {
            tracing::debug!(%username, "login rejected: account disabled");
            return Err(AuthError::InvalidCredentials);
        }

        let token = SessionToken::generate();
        let issued_at = Utc::now();
        let record = SessionRecord {
            username: user.username.clone(),
            role: user.role,
            issued_at,
            expires_at: issued_at + self.session_ttl,
        };
        self.session_store.insert(&token, record).await?;

        tracing::info!(%username, role = %user.role, "login succeeded");

        Ok(LoginResult {
            principal: Principal {
                username: user.username,
                role: user.role,
            },
            token,
        })
    }

    async fn resolve(&self, token: &SessionToken) -> Result<Principal, AuthError> {
        let Some(record) = self.session_store.get(token).await? else {
            return Err(AuthError::InvalidSession);
        };

        if record.is_expired(Utc::now()) {
            // Drop it eagerly; the sweeper would get it eventually anyway.
            self.session_store.remove(token).await?;
            return Err(AuthError::InvalidSession);
        }

        Ok(Principal {
            username: record.username,
            role: record.role,
        })
    }

    async fn logout(&self, token: &SessionToken) -> Result<(), AuthError> {
        self.session_store.remove(token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_model::{Role, UserId, UserRecord};
    use crate::infra_mem::{MemSessionStore, MemUserRepo};

    async fn service_with_users(users: Vec<UserRecord>) -> RealAuthService {
        let repo = MemUserRepo::new();
        for user in users {
            repo.add_user(user);
        }
        RealAuthService::new(
            Arc::new(repo),
            Arc::new(Argon2PasswordHasher),
            Arc::new(MemSessionStore::new()),
            std::time::Duration::from_secs(3600),
        )
    }

    async fn user(username: &str, password: &str, role: Role, enabled: bool) -> UserRecord {
        let hash = Argon2PasswordHasher
            .hash_password(password)
            .await
            .expect("hash");
        UserRecord {
            id: UserId(1),
            username: username.to_string(),
            password_hash: hash,
            role,
            enabled,
        }
    }

    fn login_input(username: &str, password: &str) -> LoginInput {
        LoginInput {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn hash_then_verify_roundtrip() {
        let hasher = Argon2PasswordHasher;
        let hash = hasher.hash_password("lechuguita123").await.expect("hash");
        assert!(hasher.verify_password("lechuguita123", &hash).await.expect("verify"));
        assert!(!hasher.verify_password("lechuguita124", &hash).await.expect("verify"));
        assert!(!hasher.verify_password("", &hash).await.expect("verify"));
    }

    #[tokio::test]
    async fn unknown_username_rejected_generically() {
        let service = service_with_users(vec![]).await;
        let err = service.login(login_input("nobody", "whatever")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn wrong_password_rejected_generically() {
        let carmen = user("carmen", "lechuguita123", Role::Admin, true).await;
        let service = service_with_users(vec![carmen]).await;
        let err = service.login(login_input("carmen", "wrong")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn disabled_account_rejected_even_with_correct_password() {
        let mario = user("mario", "patata789", Role::User, false).await;
        let service = service_with_users(vec![mario]).await;
        let err = service.login(login_input("mario", "patata789")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn successful_login_carries_stored_role() {
        let carmen = user("carmen", "lechuguita123", Role::Admin, true).await;
        let service = service_with_users(vec![carmen]).await;
        let result = service
            .login(login_input("carmen", "lechuguita123"))
            .await
            .expect("login");
        assert_eq!(result.principal.username, "carmen");
        assert_eq!(result.principal.role, Role::Admin);
    }

    #[tokio::test]
    async fn issued_token_resolves_until_revoked() {
        let carmen = user("carmen", "lechuguita123", Role::Admin, true).await;
        let service = service_with_users(vec![carmen]).await;
        let result = service
            .login(login_input("carmen", "lechuguita123"))
            .await
            .expect("login");

        let principal = service.resolve(&result.token).await.expect("resolve");
        assert_eq!(principal, result.principal);

        service.logout(&result.token).await.expect("logout");
        let err = service.resolve(&result.token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidSession));

        // revoke is idempotent
        service.logout(&result.token).await.expect("logout again");
    }

    #[tokio::test]
    async fn unknown_token_is_invalid_session() {
        let service = service_with_users(vec![]).await;
        let err = service.resolve(&SessionToken::generate()).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidSession));
    }

    #[tokio::test]
    async fn expired_session_is_invalid_and_removed() {
        let carmen = user("carmen", "lechuguita123", Role::Admin, true).await;
        let repo = MemUserRepo::new();
        repo.add_user(carmen);
        let store = Arc::new(MemSessionStore::new());
        let service = RealAuthService::new(
            Arc::new(repo),
            Arc::new(Argon2PasswordHasher),
            store.clone(),
            std::time::Duration::from_secs(0),
        );

        let result = service
            .login(login_input("carmen", "lechuguita123"))
            .await
            .expect("login");
        let err = service.resolve(&result.token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidSession));
        assert!(store.get(&result.token).await.expect("get").is_none());
    }
}
