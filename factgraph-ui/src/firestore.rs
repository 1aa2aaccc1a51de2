use factgraph_core::backend::Document;
use factgraph_core::{BackendConfig, ConfigError};
use gloo_net::http::Request;
use leptos::use_context;
use std::rc::Rc;

/// Handle to the Firestore REST surface. Cheap to clone.
#[derive(Clone)]
pub struct Firestore {
    config: Rc<BackendConfig>,
}

impl Firestore {
    pub fn init(config: BackendConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config: Rc::new(config),
        })
    }

    pub fn project_id(&self) -> &str {
        &self.config.project_id
    }

    /// Fetches `[collection, doc]`; a missing document is `Ok(None)`.
    pub async fn get_document(&self, segments: &[&str]) -> Result<Option<Document>, String> {
        let url = self.config.document_url(segments).map_err(|e| e.to_string())?;
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| format!("network error: {e}"))?;
        if response.status() == 404 {
            return Ok(None);
        }
        if !response.ok() {
            return Err(format!(
                "HTTP {}: {}",
                response.status(),
                response.status_text()
            ));
        }
        let raw: serde_json::Value = response
            .json()
            .await
            .map_err(|e| format!("parse error: {e}"))?;
        Ok(Some(Document::from_rest(&raw)))
    }
}

pub fn use_firestore() -> Option<Firestore> {
    use_context::<Firestore>()
}
