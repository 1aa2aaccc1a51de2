//! Typed calls to the `/api` backend.

use crate::config::api_base;
use factgraph_core::routes::encode_segment;
use factgraph_core::{NewsIn, NewsOut, QIn, QOut};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

fn url(path: &str) -> String {
    format!("{}{path}", api_base())
}

async fn read<R: DeserializeOwned>(response: Response) -> Result<R, String> {
    if !response.ok() {
        // FastAPI-style error bodies carry a `detail` field.
        let detail = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| v.get("detail").map(|d| d.to_string()))
            .unwrap_or_else(|| response.status_text());
        return Err(format!("HTTP {}: {}", response.status(), detail.trim_matches('"')));
    }
    response
        .json::<R>()
        .await
        .map_err(|e| format!("parse error: {e}"))
}

pub async fn post<A, R>(path: &str, body: &A) -> Result<R, String>
where
    A: Serialize,
    R: DeserializeOwned,
{
    let response = Request::post(&url(path))
        .json(body)
        .map_err(|e| format!("serialization error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("network error: {e}"))?;
    read(response).await
}

pub async fn submit_news(news: &NewsIn) -> Result<NewsOut, String> {
    post("/api/verify", news).await
}

/// `Ok(None)` when the backend does not know the task.
pub async fn fetch_task(task_id: &str) -> Result<Option<NewsOut>, String> {
    let response = Request::get(&url(&format!("/api/verify/{}", encode_segment(task_id))))
        .send()
        .await
        .map_err(|e| format!("network error: {e}"))?;
    if response.status() == 404 {
        return Ok(None);
    }
    read(response).await.map(Some)
}

pub async fn ask(question: &QIn) -> Result<QOut, String> {
    post("/api/answer", question).await
}
