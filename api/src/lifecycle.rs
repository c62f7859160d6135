//! Composition root: builds every component once and runs the HTTP server.

use std::net::TcpListener;
use std::sync::Arc;

use actix_web::{dev::Server, HttpServer};
use anyhow::Context;
use tg_core::{
    AuthService, KeyManager, RevocationCleanupConfig, RevocationCleanupService, RevocationStore,
    TokenService, TokenServiceConfig,
};
use tg_infra::{DatabasePool, MySqlCredentialVerifier, MySqlRevocationStore};
use tg_shared::AppConfig;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::app::{create_app, protected_endpoints};
use crate::state::{AppState, SharedStore, SharedVerifier};

/// A bound, ready-to-run server plus its background sweeper
pub struct Application {
    port: u16,
    server: Server,
    pool: DatabasePool,
    sweeper: Option<JoinHandle<()>>,
}

impl Application {
    /// Load keys, connect the store, create its indexes and bind the listener
    ///
    /// Every step runs once; any failure is returned and must abort startup.
    pub async fn build(config: AppConfig) -> anyhow::Result<Self> {
        let keys = KeyManager::load(&config.auth).context("failed to load signing key")?;

        let pool = DatabasePool::new(&config.database)
            .await
            .context("failed to connect to database")?;
        info!(pool = %pool.statistics(), "Database pool ready");

        let revocation = MySqlRevocationStore::new(
            pool.pool().clone(),
            config.auth.revocation.collection_name.clone(),
        )?;
        revocation
            .ensure_indexes()
            .await
            .context("failed to create revocation indexes")?;
        let store: SharedStore = Arc::new(revocation);

        let registry = protected_endpoints();
        let auth = match keys {
            Some(keys) => {
                let token_config = TokenServiceConfig::from_auth_config(&config.auth)?;
                let tokens = TokenService::new(keys, Arc::clone(&store), token_config)
                    .with_audience(registry.endpoints());
                let verifier: SharedVerifier = Arc::new(MySqlCredentialVerifier::new(pool.pool().clone()));
                Some(Arc::new(AuthService::new(verifier, Arc::new(tokens))))
            }
            None => {
                warn!("Authentication is disabled; every endpoint is public and auth routes are not mounted");
                None
            }
        };

        let sweeper = Arc::new(RevocationCleanupService::new(
            Arc::clone(&store),
            RevocationCleanupConfig {
                interval: config.auth.revocation.sweep_interval,
                enabled: true,
                store_timeout: config.auth.revocation.store_timeout,
            },
        ))
        .start_background_task();

        let address = config.server.bind_address();
        let listener =
            TcpListener::bind(&address).with_context(|| format!("failed to bind {address}"))?;
        let port = listener.local_addr()?.port();

        let state = AppState::new(store, auth, registry)
            .with_store_timeout(config.auth.revocation.store_timeout);
        let mut server = HttpServer::new(move || create_app(state.clone()));
        if config.server.workers > 0 {
            server = server.workers(config.server.workers);
        }
        let server = server.listen(listener)?.run();

        info!(port, environment = %config.environment, "Server bound");

        Ok(Self {
            port,
            server,
            pool,
            sweeper,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until the server stops, then stop the sweeper and close the pool
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let result = self.server.await;

        if let Some(sweeper) = self.sweeper {
            sweeper.abort();
        }
        self.pool.close().await;
        info!("Server stopped");

        result
    }
}
