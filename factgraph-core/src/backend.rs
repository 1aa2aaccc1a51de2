//! Document-store (Firestore) configuration and wire helpers.
//!
//! The browser handle built from [`BackendConfig`] talks to the Firestore REST
//! surface; everything here is target independent so the URL layout and the
//! typed-value decoding can be checked natively.

use crate::routes::encode_segment;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const FIRESTORE_BASE: &str = "https://firestore.googleapis.com/v1";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
    pub measurement_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("backend config is missing {0}")]
    Missing(&'static str),
    #[error("'{0}' is not a document path (expected collection/doc pairs)")]
    InvalidDocumentPath(String),
}

impl BackendConfig {
    /// Builds the config from `FIREBASE_*` keys supplied by `lookup`.
    ///
    /// Absent keys become empty strings; call [`BackendConfig::validate`] to
    /// reject an unusable result.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).unwrap_or_default();
        Self {
            api_key: get("FIREBASE_API_KEY"),
            auth_domain: get("FIREBASE_AUTH_DOMAIN"),
            project_id: get("FIREBASE_PROJECT_ID"),
            storage_bucket: get("FIREBASE_STORAGE_BUCKET"),
            messaging_sender_id: get("FIREBASE_MESSAGING_SENDER_ID"),
            app_id: get("FIREBASE_APP_ID"),
            measurement_id: get("FIREBASE_MEASUREMENT_ID"),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Missing("apiKey"));
        }
        if self.project_id.trim().is_empty() {
            return Err(ConfigError::Missing("projectId"));
        }
        if self.app_id.trim().is_empty() {
            return Err(ConfigError::Missing("appId"));
        }
        Ok(())
    }

    pub fn documents_root(&self) -> String {
        format!(
            "{FIRESTORE_BASE}/projects/{}/databases/(default)/documents",
            self.project_id
        )
    }

    /// REST URL for a single document given as `[collection, doc, ...]`
    /// segments, e.g. `["tasks", "1a2b3c4d"]`. Each segment is
    /// percent-encoded, so ids may hold any characters.
    pub fn document_url(&self, segments: &[&str]) -> Result<String, ConfigError> {
        if segments.is_empty() || segments.len() % 2 != 0 || segments.iter().any(|s| s.is_empty())
        {
            return Err(ConfigError::InvalidDocumentPath(segments.join("/")));
        }
        let path = segments
            .iter()
            .map(|s| encode_segment(s))
            .collect::<Vec<_>>()
            .join("/");
        Ok(format!(
            "{}/{}?key={}",
            self.documents_root(),
            path,
            encode_segment(&self.api_key)
        ))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub name: String,
    pub fields: Map<String, Value>,
}

impl Document {
    /// Decodes the REST representation (`{"name", "fields": {...}}`).
    pub fn from_rest(raw: &Value) -> Self {
        let name = raw
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let fields = raw
            .get("fields")
            .and_then(Value::as_object)
            .map(decode_fields)
            .unwrap_or_default();
        Self { name, fields }
    }

    /// Last path component of the document name.
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }
}

pub fn decode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), decode_value(v)))
        .collect()
}

/// Converts one Firestore typed value into plain JSON.
pub fn decode_value(typed: &Value) -> Value {
    let Some(obj) = typed.as_object() else {
        return Value::Null;
    };
    let Some((kind, inner)) = obj.iter().next() else {
        return Value::Null;
    };
    match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" => inner.as_bool().map(Value::Bool).unwrap_or(Value::Null),
        "integerValue" => match inner {
            Value::String(s) => s
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(s.clone())),
            other => other.clone(),
        },
        "doubleValue" => inner.clone(),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner.clone(),
        "geoPointValue" => inner.clone(),
        "mapValue" => inner
            .get("fields")
            .and_then(Value::as_object)
            .map(|f| Value::Object(decode_fields(f)))
            .unwrap_or_else(|| Value::Object(Map::new())),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|vals| vals.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        _ => Value::Null,
    }
}
