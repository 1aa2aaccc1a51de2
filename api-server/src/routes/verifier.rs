use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use factgraph_core::{NewsIn, NewsOut, TaskStatus};

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/verify", post(verify))
        .route("/verify/:task_id", get(verify_status))
}

async fn verify(
    State(state): State<AppState>,
    payload: Result<Json<NewsIn>, JsonRejection>,
) -> Result<Json<NewsOut>, ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let task_id = state.tasks.create().await;
    tracing::info!(task_id = %task_id, chars = payload.text.chars().count(), "verification queued");

    let tasks = state.tasks.clone();
    let verifier = state.verifier.clone();
    let id = task_id.clone();
    tokio::spawn(async move {
        let run_id = id.clone();
        let outcome =
            tokio::task::spawn_blocking(move || verifier.verify(&run_id, &payload.text)).await;
        let status = match outcome {
            Ok(Ok(())) => {
                tracing::info!(task_id = %id, "verification done");
                TaskStatus::Done
            }
            Ok(Err(err)) => {
                tracing::error!(task_id = %id, error = %err, "verification failed");
                TaskStatus::Error
            }
            Err(err) => {
                tracing::error!(task_id = %id, error = %err, "verification task panicked");
                TaskStatus::Error
            }
        };
        tasks.set(&id, status).await;
    });

    Ok(Json(NewsOut {
        task_id,
        status: TaskStatus::Processing,
    }))
}

async fn verify_status(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<NewsOut>, ApiError> {
    let status = state
        .tasks
        .get(&task_id)
        .await
        .ok_or(ApiError::TaskNotFound)?;
    Ok(Json(NewsOut { task_id, status }))
}
