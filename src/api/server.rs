//! API server
//!
//! Assembles state, middleware and routes, then serves with graceful
//! shutdown on Ctrl+C or SIGTERM.

use crate::api::{
    handlers::AppState,
    middleware::{create_cors_layer, request_id_middleware},
    routes::create_router,
};
use crate::auth::CredentialService;
use crate::betting::{MarketAggregator, WagerLedger};
use crate::config::AppConfig;
use crate::repository::{BetRepository, UserAccountRepository};
use crate::sports::MatchFeed;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

/// HTTP server wiring the core into axum
pub struct ApiServer {
    config: AppConfig,
    users: Arc<dyn UserAccountRepository>,
    bets: Arc<dyn BetRepository>,
    credentials: Arc<dyn CredentialService>,
    feed: Arc<dyn MatchFeed>,
}

impl ApiServer {
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserAccountRepository>,
        bets: Arc<dyn BetRepository>,
        credentials: Arc<dyn CredentialService>,
        feed: Arc<dyn MatchFeed>,
    ) -> Self {
        Self {
            config,
            users,
            bets,
            credentials,
            feed,
        }
    }

    /// Run until shutdown signal
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "bibet=info,tower_http=info".into()),
            )
            .init();

        let addr = SocketAddr::from((
            self.config.server.host.parse::<std::net::IpAddr>()?,
            self.config.server.port,
        ));
        let app = self.create_app();

        info!("Starting Bibet API server");
        info!("   Listen: http://{}", addr);
        info!("   Environment: {}", self.config.server.environment);
        info!("   Health check: http://{}/health", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("API server stopped gracefully");
        Ok(())
    }

    fn create_app(&self) -> axum::Router {
        let state = Arc::new(AppState {
            ledger: WagerLedger::new(self.users.clone(), self.bets.clone()),
            market: MarketAggregator::new(self.bets.clone(), self.users.clone()),
            users: self.users.clone(),
            credentials: self.credentials.clone(),
            feed: self.feed.clone(),
            environment: self.config.server.environment.clone(),
        });

        create_router(state)
            .layer(axum::middleware::from_fn(request_id_middleware))
            .layer(create_cors_layer(self.config.server.cors_origins.clone()))
            .layer(TimeoutLayer::new(Duration::from_secs(
                self.config.server.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }
}
