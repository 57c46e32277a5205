use api::repository::ExerciseRepository;
use api::ExerciseManager;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod routes;
pub mod settings;

/// The complete application: the exercise resource plus a health probe,
/// with a tracing span around every request.
pub fn app<T>(manager: ExerciseManager<T>) -> Router
where
    T: ExerciseRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(routes::exercise_routes(manager))
        .layer(TraceLayer::new_for_http())
}
