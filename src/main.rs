use anyhow::Result;
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use ticket_audit::{
    application::{
        commands::audit::AuditRecord, dto::AuthenticatedUser, ports::time::Clock,
        services::ApplicationServices,
    },
    config::{AppConfig, StorageBackend},
    domain::{
        audit::AuditLogRepository,
        user::{Role, UserId},
    },
    infrastructure::{
        database,
        repositories::{InMemoryAuditLogRepository, PostgresAuditLogRepository},
        security::api_key::ApiKeyAuthenticator,
        time::SystemClock,
    },
    presentation::http::{routes::build_router, state::HttpState},
};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    let audit_repo = audit_repository(&config).await?;

    let admin = AuthenticatedUser::with_role(UserId(1), "admin", Role::Admin);
    let authenticator = Arc::new(ApiKeyAuthenticator::new().with_key(config.admin_token(), admin));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let services = Arc::new(ApplicationServices::new(
        audit_repo,
        authenticator,
        clock,
        config.redaction_policy(),
        config.diff_options(),
    ));

    services
        .audit_writer
        .record(
            AuditRecord::new("system.start", "Service")
                .metadata(json!({ "listenAddr": config.listen_addr() })),
        )
        .await;

    let state = HttpState {
        services: Arc::clone(&services),
        allowed_origins: config.allowed_origins().to_vec(),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let dropped = services.audit_writer.standalone_sink().dropped_writes();
    if dropped > 0 {
        tracing::warn!(dropped, "standalone audit writes were lost during this run");
    }

    Ok(())
}

async fn audit_repository(config: &AppConfig) -> Result<Arc<dyn AuditLogRepository>> {
    match config.storage() {
        StorageBackend::Postgres => {
            let pool =
                database::init_pool(config.database_url(), config.database_max_connections())
                    .await?;
            database::run_migrations(&pool).await?;
            Ok(Arc::new(PostgresAuditLogRepository::new(pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory audit storage; entries are lost on restart");
            Ok(Arc::new(InMemoryAuditLogRepository::new()))
        }
    }
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
