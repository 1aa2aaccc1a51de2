use crate::DevState;
use axum::body::Body;
use axum::extract::Request;
use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use factgraph_core::ProxyRule;
use thiserror::Error;

pub const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

#[derive(Debug, Error)]
pub enum ProxyFailure {
    #[error("failed to read request body: {0}")]
    ReadBody(#[source] axum::Error),
    #[error("upstream request to {url} failed: {source}")]
    Upstream {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl IntoResponse for ProxyFailure {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "proxy error");
        let status = match self {
            ProxyFailure::ReadBody(_) => StatusCode::BAD_REQUEST,
            ProxyFailure::Upstream { .. } => StatusCode::BAD_GATEWAY,
        };
        (status, self.to_string()).into_response()
    }
}

/// Forwards `req` to the rule's target and relays the response.
pub async fn forward(state: &DevState, req: Request) -> Result<Response, ProxyFailure> {
    let (parts, body) = req.into_parts();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let url = state.rule.forward_url(path_and_query);

    let body = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(ProxyFailure::ReadBody)?;

    let mut headers = parts.headers;
    prepare_request_headers(&mut headers, &state.rule);

    tracing::debug!(method = %parts.method, url = %url, "proxying");
    let upstream = state
        .client
        .request(parts.method, &url)
        .headers(headers)
        .body(body)
        .send()
        .await
        .map_err(|source| ProxyFailure::Upstream {
            url: url.clone(),
            source,
        })?;

    let status = upstream.status();
    let mut headers = upstream.headers().clone();
    strip_hop_by_hop(&mut headers);
    headers.remove(header::CONTENT_LENGTH);
    let bytes = upstream
        .bytes()
        .await
        .map_err(|source| ProxyFailure::Upstream { url, source })?;

    let mut res = Response::new(Body::from(bytes));
    *res.status_mut() = status;
    *res.headers_mut() = headers;
    Ok(res)
}

/// Drops hop-by-hop headers and, with `change_origin`, points `Host` and
/// `Origin` at the target.
pub fn prepare_request_headers(headers: &mut HeaderMap, rule: &ProxyRule) {
    strip_hop_by_hop(headers);
    headers.remove(header::CONTENT_LENGTH);
    if !rule.change_origin {
        return;
    }
    if let Ok(host) = HeaderValue::from_str(rule.target_authority()) {
        headers.insert(header::HOST, host);
    }
    if headers.contains_key(header::ORIGIN) {
        if let Ok(origin) = HeaderValue::from_str(&rule.target_origin()) {
            headers.insert(header::ORIGIN, origin);
        }
    }
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP {
        headers.remove(HeaderName::from_static(name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn browser_headers() -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::HOST, HeaderValue::from_static("localhost:5173"));
        h.insert(header::ORIGIN, HeaderValue::from_static("http://localhost:5173"));
        h.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        h.insert(header::CONTENT_LENGTH, HeaderValue::from_static("12"));
        h.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        h
    }

    #[test]
    fn change_origin_rewrites_host_and_origin() {
        let mut h = browser_headers();
        prepare_request_headers(&mut h, &ProxyRule::default());
        assert_eq!(h[header::HOST], "127.0.0.1:8080");
        assert_eq!(h[header::ORIGIN], "http://127.0.0.1:8080");
        assert!(!h.contains_key(header::CONNECTION));
        assert!(!h.contains_key(header::CONTENT_LENGTH));
        assert_eq!(h[header::ACCEPT], "application/json");
    }

    #[test]
    fn without_change_origin_headers_pass_through() {
        let rule = ProxyRule {
            change_origin: false,
            ..ProxyRule::default()
        };
        let mut h = browser_headers();
        prepare_request_headers(&mut h, &rule);
        assert_eq!(h[header::HOST], "localhost:5173");
        assert_eq!(h[header::ORIGIN], "http://localhost:5173");
    }

    #[test]
    fn origin_is_not_invented() {
        let mut h = HeaderMap::new();
        prepare_request_headers(&mut h, &ProxyRule::default());
        assert!(!h.contains_key(header::ORIGIN));
        assert_eq!(h[header::HOST], "127.0.0.1:8080");
    }
}
