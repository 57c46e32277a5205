use api::ExerciseManager;
use api_server::settings::Settings;
use sqlite::{DBType, SqliteExerciseRepository};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("unable to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("unable to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "exercise_log=info,api_server=info,api=info,sqlite=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::new()?;

    let repo = match &settings.db_path {
        Some(path) => {
            info!("Opening exercise store at {}", path.display());
            SqliteExerciseRepository::new(DBType::File(path)).await?
        }
        None => {
            warn!("EXERCISE_LOG_DB_PATH is not set, exercises are kept in memory");
            SqliteExerciseRepository::new(DBType::InMemory).await?
        }
    };
    let repo = Arc::new(repo);
    let manager = ExerciseManager::new(Arc::clone(&repo))?;

    let listener = TcpListener::bind(settings.server_addr()).await?;
    info!("Starting server at http://{}", listener.local_addr()?);

    axum::serve(listener, api_server::app(manager))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down gracefully...");
    repo.close().await;
    info!("Shutdown complete");

    Ok(())
}
