use crate::error::ApiError;
use crate::state::AppState;
use crate::tasks::short_id;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use factgraph_core::{QIn, QOut};

pub(super) fn router() -> Router<AppState> {
    Router::new().route("/answer", post(answer))
}

// The QA pipeline is not wired in yet; the reply echoes the question.
async fn answer(payload: Result<Json<QIn>, JsonRejection>) -> Result<Json<QOut>, ApiError> {
    let Json(q) = payload?;
    q.validate()?;
    Ok(Json(QOut {
        answer: format!("（模擬回答）你問：{}，id={}", q.question, short_id(6)),
    }))
}
