use crate::api::v1::PolicyTable;
use crate::application_port::{AuthService, CatalogService, CredentialHasher};
use crate::domain::{Argon2PasswordHasher, RealAuthService, RealCatalogService};
use crate::domain_model::{Role, UserId, UserRecord};
use crate::domain_port::{SessionStore, UserRepo, VerduraRepo};
use crate::infra_mem::{MemSessionStore, MemUserRepo, MemVerduraRepo};
use crate::infra_mysql::{MySqlUserRepo, MySqlVerduraRepo};
use crate::logger::*;
use crate::settings::Settings;
use chrono::Utc;
use sqlx::{MySql, Pool};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// All collaborators, assembled once at startup and passed around
/// explicitly. There is no ambient security configuration anywhere else.
pub struct Server {
    pub auth_service: Arc<dyn AuthService>,
    pub catalog_service: Arc<dyn CatalogService>,
    pub policy: PolicyTable,
    sweeper_handle: Mutex<Option<JoinHandle<()>>>,
    cancel: CancellationToken,
    pool: Option<Pool<MySql>>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let credential_hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2PasswordHasher);

        // Sessions are process-local by design; the store itself is the
        // explicit replacement for container-managed cookies.
        let session_store = Arc::new(MemSessionStore::new());

        let (user_repo, verdura_repo, pool): (
            Arc<dyn UserRepo>,
            Arc<dyn VerduraRepo>,
            Option<Pool<MySql>>,
        ) = match settings.store.backend.as_str() {
            "mysql" => {
                let dsn = settings
                    .store
                    .mysql_dsn
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("store.mysql_dsn required for mysql backend"))?;
                let pool = Pool::<MySql>::connect(dsn).await?;
                (
                    Arc::new(MySqlUserRepo::new(pool.clone())),
                    Arc::new(MySqlVerduraRepo::new(pool.clone())),
                    Some(pool),
                )
            }
            "mem" => {
                let user_repo = MemUserRepo::new();
                seed_demo_users(&user_repo, credential_hasher.as_ref()).await?;
                let verdura_repo = MemVerduraRepo::new();
                verdura_repo.add_row("Tomate", 3.82, false);
                verdura_repo.add_row("Calabaza", 2.61, true);
                verdura_repo.add_row("Lechuga", 1.12, true);
                warn!("mem backend active: demo users and catalog rows seeded");
                (Arc::new(user_repo), Arc::new(verdura_repo), None)
            }
            other => return Err(anyhow::anyhow!("Unknown store backend: {}", other)),
        };

        let auth_service: Arc<dyn AuthService> = Arc::new(RealAuthService::new(
            user_repo,
            credential_hasher,
            session_store.clone(),
            Duration::from_secs(settings.auth.session_ttl_secs),
        ));
        let catalog_service: Arc<dyn CatalogService> =
            Arc::new(RealCatalogService::new(verdura_repo));

        let cancel = CancellationToken::new();
        let sweeper_handle = spawn_session_sweeper(
            session_store,
            Duration::from_secs(settings.auth.sweep_interval_secs),
            cancel.clone(),
        );

        info!("server started");

        Ok(Self {
            auth_service,
            catalog_service,
            policy: PolicyTable::verduleria_default(),
            sweeper_handle: Mutex::new(Some(sweeper_handle)),
            cancel,
            pool,
        })
    }

    pub async fn shutdown(&self) {
        info!("server shutting down...");

        self.cancel.cancel();

        let handle = match self.sweeper_handle.lock() {
            Ok(mut lock) => lock.take(),
            Err(_) => None,
        };
        if let Some(handle) = handle {
            let r = handle.await;
            info!("session sweeper stopped: {:?}", r);
        }

        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}

/// Periodically drop expired sessions so the map does not accumulate
/// tokens nobody will ever present again.
fn spawn_session_sweeper(
    session_store: Arc<MemSessionStore>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("session sweeper shutting down...");
                    break;
                }
                _ = ticker.tick() => {
                    match session_store.purge_expired(Utc::now()).await {
                        Ok(0) => {}
                        Ok(purged) => debug!(purged, "expired sessions purged"),
                        Err(e) => error!("session sweep failed: {}", e),
                    }
                }
            }
        }
    })
}

/// Fixture users for the "mem" backend; real deployments provision users
/// out-of-band in the `users` table.
async fn seed_demo_users(
    user_repo: &MemUserRepo,
    hasher: &dyn CredentialHasher,
) -> anyhow::Result<()> {
    let fixtures = [
        ("carmen", "lechuguita123", Role::Admin, true),
        ("pepe", "acelga456", Role::User, true),
        ("mario", "patata789", Role::User, false),
    ];

    for (id, (username, password, role, enabled)) in fixtures.into_iter().enumerate() {
        let password_hash = hasher
            .hash_password(password)
            .await
            .map_err(|e| anyhow::anyhow!("seeding {}: {}", username, e))?;
        user_repo.add_user(UserRecord {
            id: UserId(id as i64 + 1),
            username: username.to_string(),
            password_hash,
            role,
            enabled,
        });
    }

    Ok(())
}
