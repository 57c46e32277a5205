use api::repository::ExerciseRepository;
use api::{Exercise, ExerciseFields, ExerciseId, ExerciseManagement, ExerciseManager};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tracing::debug;

use crate::error::{ApiError, Result};

/// Routes for the `/exercises` resource, backed by `manager`.
pub fn exercise_routes<T>(manager: ExerciseManager<T>) -> Router
where
    T: ExerciseRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/exercises", get(list::<T>).post(create::<T>))
        .route(
            "/exercises/{id}",
            get(show::<T>).put(update::<T>).delete(delete::<T>),
        )
        .with_state(manager)
}

// An unparseable body is answered like any other invalid candidate.
fn candidate(body: std::result::Result<Json<Value>, JsonRejection>) -> Result<ExerciseFields> {
    let Json(value) = body.map_err(|rejection| {
        debug!("unreadable body: {}", rejection);
        ApiError::InvalidRequest
    })?;
    Ok(ExerciseFields::try_from(&value)?)
}

// Ids the store could never have issued resolve to nothing.
fn exercise_id(raw: &str) -> Result<ExerciseId> {
    raw.parse::<ExerciseId>().map_err(|e| {
        debug!("{}", e);
        ApiError::NotFound
    })
}

async fn create<T>(
    State(manager): State<ExerciseManager<T>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Exercise>)>
where
    T: ExerciseRepository + Send + Sync + 'static,
{
    let fields = candidate(body)?;
    let exercise = manager.create(fields).await.map_err(ApiError::on_write)?;
    Ok((StatusCode::CREATED, Json(exercise)))
}

async fn list<T>(State(manager): State<ExerciseManager<T>>) -> Result<Json<Vec<Exercise>>>
where
    T: ExerciseRepository + Send + Sync + 'static,
{
    let exercises = manager.list().await.map_err(ApiError::on_read)?;
    Ok(Json(exercises))
}

async fn show<T>(
    State(manager): State<ExerciseManager<T>>,
    Path(id): Path<String>,
) -> Result<Json<Exercise>>
where
    T: ExerciseRepository + Send + Sync + 'static,
{
    let id = exercise_id(&id)?;
    let exercise = manager.get_by_id(id).await.map_err(ApiError::on_read)?;
    Ok(Json(exercise))
}

async fn update<T>(
    State(manager): State<ExerciseManager<T>>,
    Path(id): Path<String>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<Exercise>>
where
    T: ExerciseRepository + Send + Sync + 'static,
{
    // The body is judged before the id, an invalid body is a 400 even for
    // an id that does not exist.
    let fields = candidate(body)?;
    let id = exercise_id(&id)?;
    let exercise = manager
        .update(id, fields)
        .await
        .map_err(ApiError::on_write)?;
    Ok(Json(exercise))
}

async fn delete<T>(
    State(manager): State<ExerciseManager<T>>,
    Path(id): Path<String>,
) -> Result<StatusCode>
where
    T: ExerciseRepository + Send + Sync + 'static,
{
    let id = exercise_id(&id)?;
    manager.delete(id).await.map_err(ApiError::on_read)?;
    Ok(StatusCode::NO_CONTENT)
}
